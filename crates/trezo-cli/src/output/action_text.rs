use std::io;

use serde_json::Value;

use super::format::key_value_rows;

pub fn render_session(command: &str, data: &Value) -> io::Result<String> {
    let message = required_message(data)?;
    let username = data.get("username").and_then(Value::as_str).unwrap_or("");
    let role = data.get("role").and_then(Value::as_str).unwrap_or("");

    match command {
        "logout" => Ok(message.to_string()),
        "login" | "whoami" => {
            let mut entries = vec![("User:", username.to_string())];
            if !role.is_empty() {
                entries.push(("Role:", role.to_string()));
            }

            let mut lines = vec![message.to_string(), String::new()];
            lines.extend(key_value_rows(&entries, 2));
            Ok(lines.join("\n"))
        }
        _ => Err(io::Error::other(format!(
            "unsupported session renderer command `{command}`"
        ))),
    }
}

pub fn render_delete(data: &Value) -> io::Result<String> {
    let message = required_message(data)?;
    let filename = data.get("filename").and_then(Value::as_str).unwrap_or("?");

    Ok([
        message.to_string(),
        String::new(),
        format!("  File:  {filename}"),
    ]
    .join("\n"))
}

pub fn render_password_change(data: &Value) -> io::Result<String> {
    Ok(required_message(data)?.to_string())
}

fn required_message(data: &Value) -> io::Result<&str> {
    data.get("message")
        .and_then(Value::as_str)
        .ok_or_else(|| io::Error::other("output requires message"))
}
