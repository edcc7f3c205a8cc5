use crate::utils::error::{ImportError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ImportError::ConfigError {
            message: format!("{} cannot be empty", field_name),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ImportError::ConfigError {
                message: format!("{}: unsupported URL scheme '{}'", field_name, scheme),
            }),
        },
        Err(e) => Err(ImportError::ConfigError {
            message: format!("{}: invalid URL '{}': {}", field_name, url_str, e),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ImportError::ConfigError {
            message: format!("{} cannot be empty or whitespace-only", field_name),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("supabase_url", "https://example.supabase.co").is_ok());
        assert!(validate_url("supabase_url", "http://localhost:54321").is_ok());
        assert!(validate_url("supabase_url", "").is_err());
        assert!(validate_url("supabase_url", "not-a-url").is_err());
        assert!(validate_url("supabase_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("supabase_key", "abc123").is_ok());
        assert!(validate_non_empty_string("supabase_key", "   ").is_err());
        assert!(validate_non_empty_string("supabase_key", "").is_err());
    }
}
