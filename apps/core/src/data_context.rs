use std::fmt::{Display, Formatter};
use std::path::Path;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::{
    Account, AccountType, Branch, Category, Collections, Loan, LoanStatus, Transaction,
    TransactionStatus, TransactionType,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    Read(String),
    Parse(String),
    AccountNotFound(u32),
    BranchNotFound(u32),
    InvalidAmount(Decimal),
    InvalidInterestRate(Decimal),
    EmptyPurpose,
    IdsExhausted(Category),
}

impl Display for DataError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read(error) => write!(f, "read failed: {error}"),
            Self::Parse(error) => write!(f, "invalid data fixture: {error}"),
            Self::AccountNotFound(id) => write!(f, "account not found: {id}"),
            Self::BranchNotFound(id) => write!(f, "branch not found: {id}"),
            Self::InvalidAmount(amount) => write!(f, "invalid amount: {amount}"),
            Self::InvalidInterestRate(rate) => {
                write!(f, "interest rate must be between 0 and 100: {rate}")
            }
            Self::EmptyPurpose => write!(f, "loan purpose is required"),
            Self::IdsExhausted(category) => write!(f, "no free id left for {category}"),
        }
    }
}

impl std::error::Error for DataError {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub total_balance: Decimal,
    pub active_accounts: usize,
    pub total_transactions: usize,
    pub recent_transactions: Vec<Transaction>,
}

/// Owner of the in-memory collections the dashboard screens read and mutate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataContext {
    #[serde(flatten)]
    pub collections: Collections,
    #[serde(default)]
    pub branches: Vec<Branch>,
}

impl DataContext {
    pub fn new(collections: Collections, branches: Vec<Branch>) -> Self {
        Self {
            collections,
            branches,
        }
    }

    pub fn load(path: &Path) -> Result<Self, DataError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| DataError::Read(format!("'{}': {e}", path.display())))?;
        Self::from_json5_str(&raw)
    }

    pub fn from_json5_str(raw: &str) -> Result<Self, DataError> {
        json5::from_str(raw).map_err(|e| DataError::Parse(e.to_string()))
    }

    /// The mock data the dashboard ships with.
    pub fn seeded() -> Self {
        let accounts = vec![
            Account {
                account_id: 1,
                account_type: AccountType::Savings,
                balance: Decimal::new(1_500_000, 2),
                created_at: const { date(2024, 1, 15) },
                interest_rate: Decimal::new(25, 1),
                last_transaction: Some(const { date(2024, 3, 10) }),
            },
            Account {
                account_id: 2,
                account_type: AccountType::Checking,
                balance: Decimal::new(850_000, 2),
                created_at: const { date(2024, 2, 1) },
                interest_rate: Decimal::new(1, 1),
                last_transaction: Some(const { date(2024, 3, 9) }),
            },
            Account {
                account_id: 3,
                account_type: AccountType::Savings,
                balance: Decimal::new(150_000, 2),
                created_at: const { date(2024, 3, 1) },
                interest_rate: Decimal::new(25, 1),
                last_transaction: Some(const { date(2024, 3, 5) }),
            },
        ];

        let transactions = vec![
            seeded_transaction(
                7,
                const { date(2024, 3, 10) },
                TransactionType::Deposit,
                Decimal::new(1000, 0),
                1,
            ),
            seeded_transaction(
                6,
                const { date(2024, 3, 9) },
                TransactionType::Withdrawal,
                Decimal::new(500, 0),
                2,
            ),
            seeded_transaction(
                5,
                const { date(2024, 3, 8) },
                TransactionType::Transfer,
                Decimal::new(750, 0),
                1,
            ),
            seeded_transaction(
                4,
                const { date(2024, 3, 5) },
                TransactionType::Deposit,
                Decimal::new(250_050, 2),
                3,
            ),
            Transaction {
                status: TransactionStatus::Pending,
                ..seeded_transaction(
                    3,
                    const { date(2024, 3, 2) },
                    TransactionType::Withdrawal,
                    Decimal::new(12_075, 2),
                    2,
                )
            },
            seeded_transaction(
                2,
                const { date(2024, 2, 20) },
                TransactionType::Deposit,
                Decimal::new(8500, 0),
                2,
            ),
            seeded_transaction(
                1,
                const { date(2024, 1, 15) },
                TransactionType::Deposit,
                Decimal::new(15_000, 0),
                1,
            ),
        ];

        let loans = vec![
            Loan {
                loan_id: 1,
                amount: Decimal::new(50_000, 0),
                interest_rate: Decimal::new(55, 1),
                status: LoanStatus::Approved,
                purpose: "Home Renovation".to_string(),
                branch_id: 1,
            },
            Loan {
                loan_id: 2,
                amount: Decimal::new(25_000, 0),
                interest_rate: Decimal::new(60, 1),
                status: LoanStatus::Pending,
                purpose: "Business Expansion".to_string(),
                branch_id: 2,
            },
            Loan {
                loan_id: 3,
                amount: Decimal::new(10_000, 0),
                interest_rate: Decimal::new(75, 1),
                status: LoanStatus::Approved,
                purpose: "Education".to_string(),
                branch_id: 1,
            },
        ];

        let branches = vec![
            Branch {
                branch_id: 1,
                name: "Main Branch".to_string(),
            },
            Branch {
                branch_id: 2,
                name: "Downtown Branch".to_string(),
            },
            Branch {
                branch_id: 3,
                name: "West Side Branch".to_string(),
            },
        ];

        Self::new(
            Collections {
                accounts,
                transactions,
                loans,
            },
            branches,
        )
    }

    pub fn collections(&self) -> &Collections {
        &self.collections
    }

    pub fn open_account(
        &mut self,
        account_type: AccountType,
        initial_deposit: Decimal,
        opened_on: NaiveDate,
    ) -> Result<&Account, DataError> {
        if initial_deposit < Decimal::ZERO {
            return Err(DataError::InvalidAmount(initial_deposit));
        }

        let account_id = next_id(
            Category::Accounts,
            self.collections.accounts.iter().map(|a| a.account_id),
        )?;
        self.collections.accounts.push(Account {
            account_id,
            account_type,
            balance: initial_deposit,
            created_at: opened_on,
            interest_rate: Decimal::ZERO,
            last_transaction: None,
        });
        let index = self.collections.accounts.len() - 1;
        Ok(&self.collections.accounts[index])
    }

    pub fn close_account(&mut self, account_id: u32) -> Result<Account, DataError> {
        let index = self
            .collections
            .accounts
            .iter()
            .position(|account| account.account_id == account_id)
            .ok_or(DataError::AccountNotFound(account_id))?;
        Ok(self.collections.accounts.remove(index))
    }

    /// Records a completed transaction at the head of the newest-first list.
    pub fn record_transaction(
        &mut self,
        account_id: u32,
        transaction_type: TransactionType,
        amount: Decimal,
        date: NaiveDate,
    ) -> Result<&Transaction, DataError> {
        if amount <= Decimal::ZERO {
            return Err(DataError::InvalidAmount(amount));
        }
        if !self
            .collections
            .accounts
            .iter()
            .any(|account| account.account_id == account_id)
        {
            return Err(DataError::AccountNotFound(account_id));
        }

        let transaction_id = next_id(
            Category::Transactions,
            self.collections
                .transactions
                .iter()
                .map(|t| t.transaction_id),
        )?;
        self.collections.transactions.insert(
            0,
            Transaction {
                transaction_id,
                date,
                transaction_type,
                amount,
                account_id,
                status: TransactionStatus::Completed,
            },
        );
        Ok(&self.collections.transactions[0])
    }

    pub fn apply_for_loan(
        &mut self,
        amount: Decimal,
        branch_id: u32,
        purpose: &str,
        interest_rate: Decimal,
    ) -> Result<&Loan, DataError> {
        if amount <= Decimal::ZERO {
            return Err(DataError::InvalidAmount(amount));
        }
        if interest_rate < Decimal::ZERO || interest_rate > Decimal::ONE_HUNDRED {
            return Err(DataError::InvalidInterestRate(interest_rate));
        }
        let purpose = purpose.trim();
        if purpose.is_empty() {
            return Err(DataError::EmptyPurpose);
        }
        if self.branch_name(branch_id).is_none() {
            return Err(DataError::BranchNotFound(branch_id));
        }

        let loan_id = next_id(
            Category::Loans,
            self.collections.loans.iter().map(|l| l.loan_id),
        )?;
        self.collections.loans.push(Loan {
            loan_id,
            amount,
            interest_rate,
            status: LoanStatus::Pending,
            purpose: purpose.to_string(),
            branch_id,
        });
        let index = self.collections.loans.len() - 1;
        Ok(&self.collections.loans[index])
    }

    pub fn branch_name(&self, branch_id: u32) -> Option<&str> {
        self.branches
            .iter()
            .find(|branch| branch.branch_id == branch_id)
            .map(|branch| branch.name.as_str())
    }

    pub fn overview(&self, recent: usize) -> Overview {
        Overview {
            total_balance: self
                .collections
                .accounts
                .iter()
                .map(|account| account.balance)
                .sum(),
            active_accounts: self.collections.accounts.len(),
            total_transactions: self.collections.transactions.len(),
            recent_transactions: self
                .collections
                .transactions
                .iter()
                .take(recent)
                .cloned()
                .collect(),
        }
    }
}

fn next_id(category: Category, ids: impl Iterator<Item = u32>) -> Result<u32, DataError> {
    ids.max()
        .unwrap_or(0)
        .checked_add(1)
        .ok_or(DataError::IdsExhausted(category))
}

/// Only called in `const` blocks, so an impossible seed date fails the build.
const fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("invalid seed date"),
    }
}

fn seeded_transaction(
    transaction_id: u32,
    date: NaiveDate,
    transaction_type: TransactionType,
    amount: Decimal,
    account_id: u32,
) -> Transaction {
    Transaction {
        transaction_id,
        date,
        transaction_type,
        amount,
        account_id,
        status: TransactionStatus::Completed,
    }
}
