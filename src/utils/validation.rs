use crate::utils::error::{FetchError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(FetchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| FetchError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_storage_account_name(field_name: &str, account_name: &str) -> Result<()> {
    validate_non_empty_string(field_name, account_name)?;

    // Azure storage account naming rules: 3-24 chars, lowercase letters and digits only.
    if account_name.len() < 3 || account_name.len() > 24 {
        return Err(FetchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: account_name.to_string(),
            reason: "Storage account name must be between 3 and 24 characters".to_string(),
        });
    }

    if !account_name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
    {
        return Err(FetchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: account_name.to_string(),
            reason: "Storage account name can only contain lowercase letters and numbers"
                .to_string(),
        });
    }

    Ok(())
}
