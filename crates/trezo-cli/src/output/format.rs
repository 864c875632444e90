pub fn key_value_rows(entries: &[(&str, String)], indent: usize) -> Vec<String> {
    if entries.is_empty() {
        return Vec::new();
    }

    let label_width = entries
        .iter()
        .map(|(label, _)| label.len())
        .max()
        .unwrap_or(0);
    let padding = " ".repeat(indent);

    entries
        .iter()
        .map(|(label, value)| format!("{padding}{label:<label_width$}  {value}"))
        .collect()
}

pub fn money(value: f64) -> String {
    format!("{value:.2}")
}

/// Two-column listing with the left column padded to its widest value.
pub fn aligned_pairs(rows: &[(String, String)], indent: usize) -> Vec<String> {
    let left_width = rows.iter().map(|(left, _)| left.len()).max().unwrap_or(0);
    let padding = " ".repeat(indent);

    rows.iter()
        .map(|(left, right)| format!("{padding}{left:<left_width$}  {right}"))
        .collect()
}
