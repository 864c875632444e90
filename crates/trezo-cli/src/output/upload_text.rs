use std::io;

use serde_json::Value;

use super::format::{aligned_pairs, key_value_rows};

pub fn render_upload_run(data: &Value) -> io::Result<String> {
    let message = data
        .get("message")
        .and_then(Value::as_str)
        .ok_or_else(|| io::Error::other("upload output requires message"))?;
    let submitted = data.get("submitted").and_then(Value::as_u64).unwrap_or(0);
    let succeeded = data.get("succeeded").and_then(Value::as_u64).unwrap_or(0);
    let failed = data.get("failed").and_then(Value::as_u64).unwrap_or(0);

    let mut lines = vec![message.to_string(), String::new()];
    lines.push("Summary:".to_string());
    lines.extend(key_value_rows(
        &[
            ("Submitted:", submitted.to_string()),
            ("Succeeded:", succeeded.to_string()),
            ("Failed:", failed.to_string()),
        ],
        2,
    ));

    let task_rows = task_rows(data);
    if !task_rows.is_empty() {
        lines.push(String::new());
        lines.push("Statements:".to_string());
        lines.extend(aligned_pairs(&task_rows, 2));
    }

    Ok(lines.join("\n"))
}

fn task_rows(data: &Value) -> Vec<(String, String)> {
    data.get("tasks")
        .and_then(Value::as_array)
        .map(|tasks| {
            tasks
                .iter()
                .map(|task| {
                    let file_name = task
                        .get("file_name")
                        .and_then(Value::as_str)
                        .unwrap_or("(unnamed)");
                    let status = task.get("status").and_then(Value::as_str).unwrap_or("?");
                    let added = task.get("added").and_then(Value::as_i64).unwrap_or(0);

                    let outcome = if status == "success" {
                        format!("{status} ({added} transactions added)")
                    } else {
                        status.to_string()
                    };
                    (file_name.to_string(), outcome)
                })
                .collect()
        })
        .unwrap_or_default()
}
