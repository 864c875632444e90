use chrono::{Datelike, Duration, NaiveDate};

use crate::contracts::types::Transaction;

/// Entries without a `date_iso` sort as this sentinel: excluded from every
/// rolling window, still visible under `all`.
pub const EARLIEST_DATE_ISO: &str = "1900-01-01";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateWindow {
    #[default]
    All,
    Last7Days,
    LastMonth,
    Last3Months,
    Last6Months,
    LastYear,
}

impl DateWindow {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Last7Days => "7d",
            Self::LastMonth => "1m",
            Self::Last3Months => "3m",
            Self::Last6Months => "6m",
            Self::LastYear => "1y",
        }
    }

    pub fn from_selector(value: &str) -> Option<Self> {
        match value {
            "all" => Some(Self::All),
            "7d" => Some(Self::Last7Days),
            "1m" => Some(Self::LastMonth),
            "3m" => Some(Self::Last3Months),
            "6m" => Some(Self::Last6Months),
            "1y" => Some(Self::LastYear),
            _ => None,
        }
    }

    /// Inclusive cutoff for the window, `None` for `all`. Month and year
    /// steps clamp to the end of a shorter target month (Jan 31 minus one
    /// month is the last day of February).
    pub fn cutoff(self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::All => None,
            Self::Last7Days => Some(today - Duration::days(7)),
            Self::LastMonth => Some(shift_months_clamped(today, -1)),
            Self::Last3Months => Some(shift_months_clamped(today, -3)),
            Self::Last6Months => Some(shift_months_clamped(today, -6)),
            Self::LastYear => Some(shift_years_clamped(today, -1)),
        }
    }
}

pub(crate) fn effective_date_iso(transaction: &Transaction) -> &str {
    transaction.date_iso.as_deref().unwrap_or(EARLIEST_DATE_ISO)
}

/// Keeps entries whose effective `date_iso` is lexicographically on or after
/// the cutoff. Both sides are zero-padded ISO dates, so string comparison is
/// calendar comparison. Input order is preserved.
pub fn filter_by_window(
    transactions: &[Transaction],
    window: DateWindow,
    today: NaiveDate,
) -> Vec<Transaction> {
    let Some(cutoff) = window.cutoff(today) else {
        return transactions.to_vec();
    };
    let cutoff_iso = format_iso_date(&cutoff);

    transactions
        .iter()
        .filter(|transaction| effective_date_iso(transaction) >= cutoff_iso.as_str())
        .cloned()
        .collect()
}

pub fn format_iso_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn shift_months_clamped(date: NaiveDate, months: i32) -> NaiveDate {
    let current_month = i32::try_from(date.month()).unwrap_or(1);
    let mut raw_month = current_month + months;
    let mut year = date.year();

    while raw_month > 12 {
        raw_month -= 12;
        year += 1;
    }
    while raw_month < 1 {
        raw_month += 12;
        year -= 1;
    }

    let month_u32 = u32::try_from(raw_month).unwrap_or(1);
    let day = date.day().min(days_in_month(year, month_u32));
    if let Some(result) = NaiveDate::from_ymd_opt(year, month_u32, day) {
        return result;
    }
    date
}

pub fn shift_years_clamped(date: NaiveDate, years: i32) -> NaiveDate {
    let year = date.year() + years;
    let day = date.day().min(days_in_month(year, date.month()));
    if let Some(result) = NaiveDate::from_ymd_opt(year, date.month(), day) {
        return result;
    }
    date
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 31,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::contracts::types::{Transaction, TransactionKind};

    use super::{
        DateWindow, filter_by_window, format_iso_date, shift_months_clamped, shift_years_clamped,
    };

    fn txn(date_iso: Option<&str>) -> Transaction {
        Transaction {
            amount: 10.0,
            kind: TransactionKind::Credit,
            date_iso: date_iso.map(str::to_string),
            date: String::new(),
            partner: String::new(),
            details: String::new(),
            ref_number: None,
            filename: None,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_shift_clamps_end_of_month_transitions() {
        let mar_31 = date(2026, 3, 31);
        assert_eq!(format_iso_date(&shift_months_clamped(mar_31, -1)), "2026-02-28");

        let leap_mar_31 = date(2024, 3, 31);
        assert_eq!(
            format_iso_date(&shift_months_clamped(leap_mar_31, -1)),
            "2024-02-29"
        );

        let jan_31 = date(2026, 1, 31);
        assert_eq!(format_iso_date(&shift_months_clamped(jan_31, -3)), "2025-10-31");
    }

    #[test]
    fn year_shift_clamps_leap_day() {
        let feb_29 = date(2024, 2, 29);
        assert_eq!(format_iso_date(&shift_years_clamped(feb_29, -1)), "2023-02-28");
    }

    #[test]
    fn seven_day_window_at_fixed_today() {
        let today = date(2024, 3, 10);
        let cutoff = DateWindow::Last7Days.cutoff(today).unwrap();
        assert_eq!(format_iso_date(&cutoff), "2024-03-03");

        let transactions = vec![
            txn(Some("2024-03-01")),
            txn(Some("2024-03-03")),
            txn(Some("2024-03-05")),
        ];
        let filtered = filter_by_window(&transactions, DateWindow::Last7Days, today);
        let kept: Vec<&str> = filtered
            .iter()
            .map(|t| t.date_iso.as_deref().unwrap())
            .collect();
        assert_eq!(kept, vec!["2024-03-03", "2024-03-05"]);
    }

    #[test]
    fn all_window_keeps_everything_in_input_order() {
        let transactions = vec![txn(Some("2024-03-05")), txn(None), txn(Some("1999-12-31"))];
        let filtered = filter_by_window(&transactions, DateWindow::All, date(2024, 3, 10));
        assert_eq!(filtered.len(), 3);
        assert_eq!(filtered[0].date_iso.as_deref(), Some("2024-03-05"));
        assert_eq!(filtered[1].date_iso, None);
        assert_eq!(filtered[2].date_iso.as_deref(), Some("1999-12-31"));
    }

    #[test]
    fn missing_date_never_matches_a_rolling_window() {
        let transactions = vec![txn(None), txn(Some("2024-03-09"))];
        for window in [
            DateWindow::Last7Days,
            DateWindow::LastMonth,
            DateWindow::Last3Months,
            DateWindow::Last6Months,
            DateWindow::LastYear,
        ] {
            let filtered = filter_by_window(&transactions, window, date(2024, 3, 10));
            assert_eq!(filtered.len(), 1, "window {}", window.as_str());
            assert_eq!(filtered[0].date_iso.as_deref(), Some("2024-03-09"));
        }
    }

    #[test]
    fn narrower_windows_keep_subsets_of_wider_ones() {
        let today = date(2024, 3, 10);
        let transactions = vec![
            txn(Some("2024-03-09")),
            txn(Some("2024-02-20")),
            txn(Some("2023-12-01")),
            txn(Some("2023-06-01")),
            txn(Some("2022-01-01")),
            txn(None),
        ];

        let ordered = [
            DateWindow::Last7Days,
            DateWindow::LastMonth,
            DateWindow::Last3Months,
            DateWindow::Last6Months,
            DateWindow::LastYear,
            DateWindow::All,
        ];
        for pair in ordered.windows(2) {
            let narrow = filter_by_window(&transactions, pair[0], today);
            let wide = filter_by_window(&transactions, pair[1], today);
            assert!(narrow.len() <= wide.len());
            for kept in &narrow {
                assert!(
                    wide.iter().any(|t| t.date_iso == kept.date_iso),
                    "{} not in wider window {}",
                    kept.date_iso.as_deref().unwrap_or("<none>"),
                    pair[1].as_str()
                );
            }
        }

        let all = filter_by_window(&transactions, DateWindow::All, today);
        assert_eq!(all.len(), transactions.len());
    }

    #[test]
    fn selector_round_trips() {
        for selector in ["all", "7d", "1m", "3m", "6m", "1y"] {
            let window = DateWindow::from_selector(selector).unwrap();
            assert_eq!(window.as_str(), selector);
        }
        assert!(DateWindow::from_selector("2w").is_none());
    }
}
