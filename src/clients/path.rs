//! URL template resolution.
//!
//! Call URLs may contain `{name}` placeholders. [`resolve_url`] fills them
//! from the call's URL params.
//!
//! # Resolution Rules
//!
//! - For each param with a non-null value, the first occurrence of
//!   `{key}` is replaced with the value's string form
//! - Params whose key does not appear in the template are ignored
//! - Placeholders without a matching param are left verbatim
//!
//! # Example
//!
//! ```rust
//! use rest_service::clients::resolve_url;
//! use serde_json::json;
//!
//! let params = vec![("id".to_string(), json!(1))];
//! assert_eq!(resolve_url("/test/with/{id}", Some(params.as_slice())), "/test/with/1");
//! assert_eq!(resolve_url("/test/without/Params", None), "/test/without/Params");
//! ```

use serde_json::Value;

/// Returns the string form of a param value, or `None` for null.
///
/// Strings are used without quotes. Numbers and booleans use their JSON
/// text. Arrays and objects are rendered as compact JSON.
#[must_use]
pub fn param_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Builds a URL from a template by substituting placeholder values.
///
/// # Arguments
///
/// * `template` - The URL template with `{name}` placeholders
/// * `url_params` - Placeholder values, applied in order
#[must_use]
pub fn resolve_url(template: &str, url_params: Option<&[(String, Value)]>) -> String {
    let mut result = template.to_string();

    for (key, value) in url_params.unwrap_or_default() {
        let Some(value) = param_to_string(value) else {
            continue;
        };
        let placeholder = format!("{{{key}}}");
        result = result.replacen(&placeholder, &value, 1);
    }

    result
}
