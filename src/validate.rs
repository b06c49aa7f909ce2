use serde_json::Value;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidateError {
    #[error("A url field with a text value is required")]
    NotText,
    #[error("Invalid URL. Must be an absolute http:// or https:// address")]
    Malformed,
}

/// Validate the raw JSON value submitted as `url`.
///
/// Accepts exactly the strings that parse as an absolute URL with scheme
/// `http` or `https`, query strings included.
pub fn video_url(value: Option<&Value>) -> Result<&str, ValidateError> {
    let url = match value {
        Some(Value::String(s)) => s.as_str(),
        _ => return Err(ValidateError::NotText),
    };

    let parsed = Url::parse(url).map_err(|_| ValidateError::Malformed)?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ValidateError::Malformed);
    }

    Ok(url)
}
