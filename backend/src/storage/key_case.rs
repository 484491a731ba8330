//! Key casing adapter between backend rows and the typed model.
//!
//! The hosted database returns `snake_case` columns while the model uses
//! `camelCase` fields. Only the keys of top-level objects are rewritten;
//! nested values are left alone.

use serde_json::{Map, Value};

/// `category_id` -> `categoryId`
pub fn to_camel_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut chars = key.chars().peekable();
    while let Some(c) = chars.next() {
        match chars.peek() {
            Some(next) if c == '_' && next.is_ascii_lowercase() => {
                out.push(next.to_ascii_uppercase());
                chars.next();
            }
            _ => out.push(c),
        }
    }
    out
}

/// `yearMonth` -> `year_month`
pub fn to_snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Rewrite object keys to camelCase. Arrays are rewritten element-wise.
pub fn camelize_keys(value: Value) -> Value {
    rename_keys(value, to_camel_case)
}

/// Rewrite object keys to snake_case. Arrays are rewritten element-wise.
pub fn snakeize_keys(value: Value) -> Value {
    rename_keys(value, to_snake_case)
}

fn rename_keys(value: Value, rename: fn(&str) -> String) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (rename(&key), value))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(|item| rename_keys(item, rename)).collect()),
        other => other,
    }
}
