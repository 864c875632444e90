use std::io;

use serde_json::Value;

use super::format::{aligned_pairs, key_value_rows, money};

pub fn render_summary(data: &Value) -> io::Result<String> {
    let window = data.get("window").and_then(Value::as_str).unwrap_or("all");
    let balance = data.get("balance").and_then(Value::as_f64).unwrap_or(0.0);
    let transaction_count = data
        .get("transaction_count")
        .and_then(Value::as_u64)
        .unwrap_or(0);
    let filtered_count = data
        .get("filtered_count")
        .and_then(Value::as_u64)
        .unwrap_or(0);
    let totals = data.get("totals").cloned().unwrap_or(Value::Null);
    let income = totals.get("income").and_then(Value::as_f64).unwrap_or(0.0);
    let expense = totals.get("expense").and_then(Value::as_f64).unwrap_or(0.0);

    let mut lines = vec![format!("Dashboard summary for the `{window}` window."), String::new()];

    lines.push("Summary:".to_string());
    lines.extend(key_value_rows(
        &[
            ("Balance:", money(balance)),
            (
                "Transactions:",
                format!("{filtered_count} in window ({transaction_count} total)"),
            ),
            ("Income:", format!("+{}", money(income))),
            ("Expense:", format!("-{}", money(expense))),
        ],
        2,
    ));

    lines.push(String::new());
    lines.push("Income by day:".to_string());
    let series_rows = series_rows(data);
    if series_rows.is_empty() {
        lines.push("  (no days in this window)".to_string());
    } else {
        lines.extend(aligned_pairs(&series_rows, 2));
    }

    lines.push(String::new());
    lines.push("Transactions:".to_string());
    let transaction_lines = transaction_lines(data);
    if transaction_lines.is_empty() {
        lines.push("  (none in this window)".to_string());
    } else {
        lines.extend(transaction_lines);
    }

    Ok(lines.join("\n"))
}

fn series_rows(data: &Value) -> Vec<(String, String)> {
    data.get("series")
        .and_then(Value::as_array)
        .map(|points| {
            points
                .iter()
                .map(|point| {
                    let day = point.get("day").and_then(Value::as_str).unwrap_or("?");
                    let income = point.get("income").and_then(Value::as_f64).unwrap_or(0.0);
                    (day.to_string(), money(income))
                })
                .collect()
        })
        .unwrap_or_default()
}

fn transaction_lines(data: &Value) -> Vec<String> {
    let Some(transactions) = data.get("transactions").and_then(Value::as_array) else {
        return Vec::new();
    };

    let rows: Vec<(String, String)> = transactions
        .iter()
        .map(|transaction| {
            let date = transaction
                .get("date")
                .and_then(Value::as_str)
                .filter(|value| !value.is_empty())
                .or_else(|| transaction.get("date_iso").and_then(Value::as_str))
                .unwrap_or("-");
            let partner = transaction
                .get("partner")
                .and_then(Value::as_str)
                .filter(|value| !value.is_empty())
                .unwrap_or("(unknown)");
            let amount = transaction
                .get("amount")
                .and_then(Value::as_f64)
                .unwrap_or(0.0);
            let sign = match transaction.get("type").and_then(Value::as_str) {
                Some("credit") => "+",
                Some("debit") => "-",
                _ => " ",
            };
            (
                format!("{date}  {partner}"),
                format!("{sign}{}", money(amount)),
            )
        })
        .collect();

    aligned_pairs(&rows, 2)
}
