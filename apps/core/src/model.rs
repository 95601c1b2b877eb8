use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    Savings,
    Checking,
}

impl AccountType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Savings => "SAVINGS",
            Self::Checking => "CHECKING",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "SAVINGS" => Some(Self::Savings),
            "CHECKING" => Some(Self::Checking),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Deposit,
    Withdrawal,
    Transfer,
}

impl TransactionType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Deposit => "DEPOSIT",
            Self::Withdrawal => "WITHDRAWAL",
            Self::Transfer => "TRANSFER",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "DEPOSIT" => Some(Self::Deposit),
            "WITHDRAWAL" => Some(Self::Withdrawal),
            "TRANSFER" => Some(Self::Transfer),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionStatus {
    Completed,
    Pending,
    Failed,
}

impl TransactionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "Completed",
            Self::Pending => "Pending",
            Self::Failed => "Failed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoanStatus {
    Approved,
    Pending,
    Rejected,
}

impl LoanStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Approved => "APPROVED",
            Self::Pending => "PENDING",
            Self::Rejected => "REJECTED",
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),+) => {
        $(impl Display for $ty {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        })+
    };
}

display_as_str!(AccountType, TransactionType, TransactionStatus, LoanStatus);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub account_id: u32,
    pub account_type: AccountType,
    pub balance: Decimal,
    pub created_at: NaiveDate,
    #[serde(default)]
    pub interest_rate: Decimal,
    #[serde(default)]
    pub last_transaction: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub transaction_id: u32,
    pub date: NaiveDate,
    pub transaction_type: TransactionType,
    pub amount: Decimal,
    pub account_id: u32,
    pub status: TransactionStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub loan_id: u32,
    pub amount: Decimal,
    pub interest_rate: Decimal,
    pub status: LoanStatus,
    pub purpose: String,
    pub branch_id: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub branch_id: u32,
    pub name: String,
}

/// A named partition of searchable records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Accounts,
    Transactions,
    Loans,
}

impl Category {
    pub const ALL: [Category; 3] = [Self::Accounts, Self::Transactions, Self::Loans];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Accounts => "accounts",
            Self::Transactions => "transactions",
            Self::Loans => "loans",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "accounts" | "account" => Some(Self::Accounts),
            "transactions" | "transaction" => Some(Self::Transactions),
            "loans" | "loan" => Some(Self::Loans),
            _ => None,
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Any searchable record, keyed by the canonical id of its own kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", content = "record", rename_all = "snake_case")]
pub enum Record {
    Account(Account),
    Transaction(Transaction),
    Loan(Loan),
}

impl Record {
    pub fn id(&self) -> u32 {
        match self {
            Self::Account(account) => account.account_id,
            Self::Transaction(transaction) => transaction.transaction_id,
            Self::Loan(loan) => loan.loan_id,
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Self::Account(_) => Category::Accounts,
            Self::Transaction(_) => Category::Transactions,
            Self::Loan(_) => Category::Loans,
        }
    }
}

/// The three searchable collections, handed to the engine per call.
///
/// A category absent from serialized input is treated as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collections {
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub loans: Vec<Loan>,
}

pub fn normalize_for_search(input: &str) -> String {
    input.to_lowercase()
}

/// Shortest decimal rendering of an amount: `1500.50` becomes `"1500.5"`.
pub fn decimal_text(value: Decimal) -> String {
    value.normalize().to_string()
}
