use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{Transaction, TransactionType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    InvalidAccountId(String),
    InvalidTransactionType(String),
    InvalidDate(String),
    InvertedRange { start: NaiveDate, end: NaiveDate },
}

impl Display for FilterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidAccountId(value) => write!(f, "invalid account id '{value}'"),
            Self::InvalidTransactionType(value) => {
                write!(f, "unsupported transaction type '{value}'")
            }
            Self::InvalidDate(value) => write!(f, "invalid date '{value}', expected YYYY-MM-DD"),
            Self::InvertedRange { start, end } => {
                write!(f, "start date {start} is after end date {end}")
            }
        }
    }
}

impl std::error::Error for FilterError {}

/// Optional constraints on the transactions listing. Every present field must
/// hold; date bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TransactionFilter {
    #[serde(default)]
    pub account_id: Option<u32>,
    #[serde(default)]
    pub transaction_type: Option<TransactionType>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl TransactionFilter {
    /// Builds a filter from raw form fields, where a blank field means "any".
    pub fn from_form(
        account_id: &str,
        transaction_type: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<Self, FilterError> {
        let account_id = non_blank(account_id)
            .map(|raw| {
                raw.parse::<u32>()
                    .map_err(|_| FilterError::InvalidAccountId(raw.to_string()))
            })
            .transpose()?;
        let transaction_type = non_blank(transaction_type)
            .map(|raw| {
                TransactionType::parse(raw)
                    .ok_or_else(|| FilterError::InvalidTransactionType(raw.to_string()))
            })
            .transpose()?;
        let start_date = non_blank(start_date).map(parse_date).transpose()?;
        let end_date = non_blank(end_date).map(parse_date).transpose()?;

        let filter = Self {
            account_id,
            transaction_type,
            start_date,
            end_date,
        };
        filter.validate()?;
        Ok(filter)
    }

    pub fn validate(&self) -> Result<(), FilterError> {
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start > end {
                return Err(FilterError::InvertedRange { start, end });
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.account_id.is_none()
            && self.transaction_type.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
    }

    pub fn matches(&self, transaction: &Transaction) -> bool {
        if self
            .account_id
            .is_some_and(|account_id| transaction.account_id != account_id)
        {
            return false;
        }
        if self
            .transaction_type
            .is_some_and(|kind| transaction.transaction_type != kind)
        {
            return false;
        }
        if self.start_date.is_some_and(|start| transaction.date < start) {
            return false;
        }
        if self.end_date.is_some_and(|end| transaction.date > end) {
            return false;
        }
        true
    }

    pub fn apply(&self, transactions: &[Transaction]) -> Vec<Transaction> {
        transactions
            .iter()
            .filter(|transaction| self.matches(transaction))
            .cloned()
            .collect()
    }
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, FilterError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| FilterError::InvalidDate(value.to_string()))
}
