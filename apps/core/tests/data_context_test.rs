use std::path::PathBuf;

use bankdash_core::data_context::{DataContext, DataError};
use bankdash_core::model::{AccountType, Category, LoanStatus, TransactionStatus, TransactionType};
use bankdash_core::search::search;
use chrono::NaiveDate;
use rust_decimal::Decimal;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("dashboard.json5")
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 11).unwrap()
}

#[test]
fn loads_json5_fixture_with_missing_category() {
    let data = DataContext::load(&fixture_path()).unwrap();

    assert_eq!(data.collections.accounts.len(), 3);
    assert_eq!(data.collections.transactions.len(), 3);
    assert!(data.collections.loans.is_empty());
    assert_eq!(data.branch_name(1), Some("Main Branch"));

    let third = &data.collections.accounts[2];
    assert_eq!(third.balance, Decimal::new(15005, 1));
    assert_eq!(third.interest_rate, Decimal::ZERO);
    assert_eq!(third.last_transaction, None);
    assert_eq!(data.collections.transactions[2].status, TransactionStatus::Failed);
}

#[test]
fn loaded_fixture_is_searchable() {
    let data = DataContext::load(&fixture_path()).unwrap();

    let results = search("120.75", &data.collections);
    assert_eq!(results.transactions.len(), 1);
    assert_eq!(results.transactions[0].account_id, 12);
    assert!(search("education", &data.collections).loans.is_empty());
}

#[test]
fn missing_fixture_reports_read_error() {
    let result = DataContext::load(&fixture_path().with_file_name("missing.json5"));
    assert!(matches!(result, Err(DataError::Read(_))));
}

#[test]
fn malformed_dates_are_rejected_at_load() {
    let raw = r#"{ transactions: [
        { transactionId: 1, date: "3/9/2024", transactionType: "DEPOSIT",
          amount: 5, accountId: 1, status: "Completed" } ] }"#;
    assert!(matches!(
        DataContext::from_json5_str(raw),
        Err(DataError::Parse(_))
    ));
}

#[test]
fn open_account_assigns_next_id() {
    let mut data = DataContext::seeded();
    let account = data
        .open_account(AccountType::Checking, Decimal::new(250, 0), today())
        .unwrap()
        .clone();

    assert_eq!(account.account_id, 4);
    assert_eq!(account.balance, Decimal::new(250, 0));
    assert_eq!(data.collections.accounts.last(), Some(&account));

    assert_eq!(
        data.open_account(AccountType::Savings, Decimal::new(-1, 0), today()),
        Err(DataError::InvalidAmount(Decimal::new(-1, 0)))
    );
}

#[test]
fn close_account_removes_it_and_ids_do_not_repeat() {
    let mut data = DataContext::seeded();
    let closed = data.close_account(3).unwrap();
    assert_eq!(closed.account_id, 3);
    assert_eq!(data.collections.accounts.len(), 2);
    assert_eq!(data.close_account(3), Err(DataError::AccountNotFound(3)));

    data.close_account(1).unwrap();
    let reopened = data
        .open_account(AccountType::Savings, Decimal::ZERO, today())
        .unwrap();
    assert_eq!(reopened.account_id, 3);
}

#[test]
fn recorded_transactions_go_first() {
    let mut data = DataContext::seeded();
    let recorded = data
        .record_transaction(2, TransactionType::Transfer, Decimal::new(40, 0), today())
        .unwrap()
        .clone();

    assert_eq!(recorded.transaction_id, 8);
    assert_eq!(recorded.status, TransactionStatus::Completed);
    assert_eq!(data.collections.transactions[0], recorded);
    assert_eq!(data.collections.transactions.len(), 8);
}

#[test]
fn record_transaction_validates_amount_and_account() {
    let mut data = DataContext::seeded();
    assert_eq!(
        data.record_transaction(1, TransactionType::Deposit, Decimal::ZERO, today()),
        Err(DataError::InvalidAmount(Decimal::ZERO))
    );
    assert_eq!(
        data.record_transaction(99, TransactionType::Deposit, Decimal::ONE, today()),
        Err(DataError::AccountNotFound(99))
    );
    assert_eq!(data.collections.transactions.len(), 7);
}

#[test]
fn loan_application_is_pending_and_appended() {
    let mut data = DataContext::seeded();
    let loan = data
        .apply_for_loan(Decimal::new(12_000, 0), 3, "  Car  ", Decimal::new(65, 1))
        .unwrap()
        .clone();

    assert_eq!(loan.loan_id, 4);
    assert_eq!(loan.status, LoanStatus::Pending);
    assert_eq!(loan.purpose, "Car");
    assert_eq!(data.collections.loans.last(), Some(&loan));
}

#[test]
fn loan_application_validation() {
    let mut data = DataContext::seeded();
    let rate = Decimal::new(5, 0);

    assert_eq!(
        data.apply_for_loan(Decimal::ZERO, 1, "Car", rate),
        Err(DataError::InvalidAmount(Decimal::ZERO))
    );
    assert_eq!(
        data.apply_for_loan(Decimal::ONE, 1, "Car", Decimal::new(101, 0)),
        Err(DataError::InvalidInterestRate(Decimal::new(101, 0)))
    );
    assert_eq!(
        data.apply_for_loan(Decimal::ONE, 1, "   ", rate),
        Err(DataError::EmptyPurpose)
    );
    assert_eq!(
        data.apply_for_loan(Decimal::ONE, 9, "Car", rate),
        Err(DataError::BranchNotFound(9))
    );
    assert_eq!(data.collections.loans.len(), 3);
}

#[test]
fn overview_summarizes_collections() {
    let data = DataContext::seeded();
    let overview = data.overview(3);

    assert_eq!(overview.total_balance, Decimal::new(25_000, 0));
    assert_eq!(overview.active_accounts, 3);
    assert_eq!(overview.total_transactions, 7);
    let recent: Vec<u32> = overview
        .recent_transactions
        .iter()
        .map(|t| t.transaction_id)
        .collect();
    assert_eq!(recent, vec![7, 6, 5]);
}

#[test]
fn seeded_dates_are_the_real_calendar_dates() {
    let data = DataContext::seeded();
    assert_eq!(
        data.collections.accounts[0].created_at,
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    );
    let newest = &data.collections.transactions[0];
    assert_eq!(newest.date, NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
    assert!(data
        .collections
        .transactions
        .iter()
        .all(|t| t.date.format("%Y").to_string() == "2024"));
}

#[test]
fn exhausted_account_ids_are_an_error_not_a_duplicate() {
    let mut data = DataContext::from_json5_str(
        r#"{
            accounts: [{
                accountId: 4294967295,
                accountType: "SAVINGS",
                balance: 10,
                createdAt: "2024-01-01",
            }],
        }"#,
    )
    .unwrap();

    assert_eq!(
        data.open_account(AccountType::Checking, Decimal::ONE, today()),
        Err(DataError::IdsExhausted(Category::Accounts))
    );
    assert_eq!(data.collections.accounts.len(), 1);
}
