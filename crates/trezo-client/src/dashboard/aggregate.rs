use std::collections::BTreeMap;

use crate::contracts::types::{ChartPoint, Totals, Transaction, TransactionKind};

use super::window::effective_date_iso;

/// Income is the credit sum, expense the debit sum. Kinds the server may
/// invent later land in neither bucket.
pub fn totals(transactions: &[Transaction]) -> Totals {
    let mut income = 0.0;
    let mut expense = 0.0;
    for transaction in transactions {
        match transaction.kind {
            TransactionKind::Credit => income += transaction.amount,
            TransactionKind::Debit => expense += transaction.amount,
            TransactionKind::Unknown => {}
        }
    }

    Totals { income, expense }
}

/// Daily income series for the chart. A bucket exists for every distinct
/// date in the input, debit-only days included (their income is zero), so
/// the series mirrors exactly the dates a reader sees in the list. Only
/// credits accumulate: this is an income-over-time view, not net cash flow.
/// The ordered map keys on the ISO date, which makes output order and
/// content independent of input order.
pub fn chart_series(transactions: &[Transaction]) -> Vec<ChartPoint> {
    let mut buckets: BTreeMap<&str, f64> = BTreeMap::new();
    for transaction in transactions {
        let bucket = buckets.entry(effective_date_iso(transaction)).or_insert(0.0);
        if transaction.kind == TransactionKind::Credit {
            *bucket += transaction.amount;
        }
    }

    buckets
        .into_iter()
        .map(|(iso, income)| ChartPoint {
            day: day_label(iso),
            income,
        })
        .collect()
}

/// `YYYY-MM-DD` to the `DD.MM` chart label; anything malformed is shown
/// verbatim rather than dropped.
fn day_label(iso: &str) -> String {
    if iso.len() >= 10 && iso.is_ascii() {
        format!("{}.{}", &iso[8..10], &iso[5..7])
    } else {
        iso.to_string()
    }
}
