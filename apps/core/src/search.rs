use serde::{Deserialize, Serialize};

use crate::model::{
    decimal_text, normalize_for_search, Account, Category, Collections, Loan, Record, Transaction,
};

/// Matches grouped by category, each in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    pub accounts: Vec<Account>,
    pub transactions: Vec<Transaction>,
    pub loans: Vec<Loan>,
}

/// One dropdown row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub category: Category,
    pub id: u32,
    pub label: String,
    pub link: String,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty() && self.transactions.is_empty() && self.loans.is_empty()
    }

    pub fn len(&self) -> usize {
        self.accounts.len() + self.transactions.len() + self.loans.len()
    }

    pub fn count(&self, category: Category) -> usize {
        match category {
            Category::Accounts => self.accounts.len(),
            Category::Transactions => self.transactions.len(),
            Category::Loans => self.loans.len(),
        }
    }

    /// Dropdown rows: at most `limit_per_category` per category, categories in
    /// fixed order.
    pub fn preview(&self, limit_per_category: usize) -> Vec<SearchHit> {
        let accounts = self
            .accounts
            .iter()
            .take(limit_per_category)
            .cloned()
            .map(Record::Account);
        let transactions = self
            .transactions
            .iter()
            .take(limit_per_category)
            .cloned()
            .map(Record::Transaction);
        let loans = self
            .loans
            .iter()
            .take(limit_per_category)
            .cloned()
            .map(Record::Loan);

        accounts
            .chain(transactions)
            .chain(loans)
            .map(|record| SearchHit::from(&record))
            .collect()
    }
}

impl From<&Record> for SearchHit {
    fn from(record: &Record) -> Self {
        let label = match record {
            Record::Account(account) => {
                format!("{} Account #{}", account.account_type, account.account_id)
            }
            Record::Transaction(transaction) => format!(
                "{} - ${}",
                transaction.transaction_type,
                decimal_text(transaction.amount)
            ),
            Record::Loan(loan) => format!("Loan #{} - {}", loan.loan_id, loan.purpose),
        };
        let category = record.category();
        let id = record.id();

        Self {
            category,
            id,
            label,
            link: format!("/{category}/{id}"),
        }
    }
}

pub fn search(query: &str, collections: &Collections) -> SearchResults {
    if query.trim().is_empty() {
        return SearchResults::default();
    }

    let needle = normalize_for_search(query);

    SearchResults {
        accounts: collections
            .accounts
            .iter()
            .filter(|account| account_matches(account, &needle))
            .cloned()
            .collect(),
        transactions: collections
            .transactions
            .iter()
            .filter(|transaction| transaction_matches(transaction, &needle))
            .cloned()
            .collect(),
        loans: collections
            .loans
            .iter()
            .filter(|loan| loan_matches(loan, &needle))
            .cloned()
            .collect(),
    }
}

fn account_matches(account: &Account, needle: &str) -> bool {
    contains(account.account_type.as_str(), needle)
        || account.account_id.to_string().contains(needle)
}

fn transaction_matches(transaction: &Transaction, needle: &str) -> bool {
    contains(transaction.transaction_type.as_str(), needle)
        || decimal_text(transaction.amount).contains(needle)
        || transaction.account_id.to_string().contains(needle)
}

fn loan_matches(loan: &Loan, needle: &str) -> bool {
    contains(&loan.purpose, needle)
        || decimal_text(loan.amount).contains(needle)
        || contains(loan.status.as_str(), needle)
}

fn contains(field: &str, needle: &str) -> bool {
    normalize_for_search(field).contains(needle)
}
