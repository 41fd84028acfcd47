use crate::utils::error::{Result, ScaffoldError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field: &str, value: impl ToString, reason: impl Into<String>) -> ScaffoldError {
    ScaffoldError::InvalidConfigValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// Archives are only fetched over http(s).
pub fn validate_url(field: &str, raw: &str) -> Result<()> {
    if raw.is_empty() {
        return Err(invalid(field, raw, "an archive URL is required"));
    }

    let url = Url::parse(raw).map_err(|e| invalid(field, raw, format!("not a URL: {}", e)))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(invalid(
            field,
            raw,
            format!("archives are fetched over http or https, not {}", scheme),
        )),
    }
}

pub fn validate_path(field: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        Err(invalid(field, path, "a directory path is required"))
    } else if path.contains('\0') {
        Err(invalid(field, path.escape_default(), "path contains a NUL byte"))
    } else {
        Ok(())
    }
}

pub fn validate_non_empty_string(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field, value, "must not be blank"));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(invalid(field, value, format!("expected {}..={}", min, max)));
    }
    Ok(())
}
