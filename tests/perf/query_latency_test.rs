use std::time::Instant;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::model::{
    Account, AccountType, Collections, Loan, LoanStatus, Transaction, TransactionStatus,
    TransactionType,
};
use crate::pagination::paginate;
use crate::search::search;

fn p95_ms(samples: &mut [f64]) -> f64 {
    samples.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let last = samples.len().saturating_sub(1);
    let idx = ((last as f64) * 0.95).round() as usize;
    samples[idx.min(last)]
}

fn large_collections() -> Collections {
    let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let accounts = (1..=500)
        .map(|i| Account {
            account_id: i,
            account_type: if i % 2 == 0 {
                AccountType::Checking
            } else {
                AccountType::Savings
            },
            balance: Decimal::new(i as i64 * 100, 2),
            created_at: date,
            interest_rate: Decimal::ZERO,
            last_transaction: None,
        })
        .collect();
    let transactions = (1..=3_000)
        .map(|i| Transaction {
            transaction_id: i,
            date,
            transaction_type: match i % 3 {
                0 => TransactionType::Deposit,
                1 => TransactionType::Withdrawal,
                _ => TransactionType::Transfer,
            },
            amount: Decimal::new(i as i64 * 25, 1),
            account_id: i % 500 + 1,
            status: TransactionStatus::Completed,
        })
        .collect();
    let loans = (1..=300)
        .map(|i| Loan {
            loan_id: i,
            amount: Decimal::new(i as i64 * 1_000, 0),
            interest_rate: Decimal::new(55, 1),
            status: LoanStatus::Pending,
            purpose: format!("Purpose {i:04}"),
            branch_id: 1,
        })
        .collect();

    Collections {
        accounts,
        transactions,
        loans,
    }
}

#[test]
fn warm_search_and_page_p95_under_50ms() {
    let collections = large_collections();

    for _ in 0..10 {
        let _ = search("transfer", &collections);
    }

    let mut batch_p95 = Vec::with_capacity(5);
    for _ in 0..5 {
        let mut samples = Vec::with_capacity(40);
        for _ in 0..40 {
            let start = Instant::now();
            let results = search("12", &collections);
            let _ = paginate(&results.transactions, 5, 3);
            samples.push(start.elapsed().as_secs_f64() * 1000.0);
        }
        batch_p95.push(p95_ms(&mut samples));
    }

    batch_p95.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let median_p95 = batch_p95[batch_p95.len() / 2];

    assert!(
        median_p95 <= 50.0,
        "median batch p95 too high: {median_p95:.3}ms (budget 50.0ms); batches={batch_p95:?}",
    );
}
