use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_required_field, validate_storage_account_name, Validate,
};
use clap::Parser;
use std::env;

#[derive(Debug, Clone, Parser)]
#[command(name = "diet-data-api")]
#[command(about = "HTTP endpoint serving the diet dataset from blob storage")]
pub struct ServerConfig {
    #[arg(long, default_value = "0.0.0.0")]
    pub bind: String,

    /// 7071 matches the local Functions-host convention the front-end expects.
    #[arg(long, default_value = "7071")]
    pub port: u16,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

/// Storage settings read from the environment once at startup. Missing values
/// are not an error here: the process must come up even when storage is
/// unconfigured, and the fetch route reports the problem per request.
#[derive(Debug, Clone, Default)]
pub struct StorageConfig {
    pub use_managed_identity: bool,
    pub storage_account_name: Option<String>,
    pub connection_string: Option<String>,
}

impl StorageConfig {
    pub fn from_env() -> Self {
        Self {
            use_managed_identity: env::var("USE_MANAGED_IDENTITY")
                .map(|v| v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            storage_account_name: env::var("STORAGE_ACCOUNT_NAME").ok(),
            connection_string: env::var("AZURE_STORAGE_CONNECTION_STRING").ok(),
        }
    }
}

impl Validate for StorageConfig {
    fn validate(&self) -> Result<()> {
        if self.use_managed_identity {
            let account =
                validate_required_field("STORAGE_ACCOUNT_NAME", &self.storage_account_name)?;
            validate_storage_account_name("STORAGE_ACCOUNT_NAME", account)?;
        } else {
            let conn_str = validate_required_field(
                "AZURE_STORAGE_CONNECTION_STRING",
                &self.connection_string,
            )?;
            validate_non_empty_string("AZURE_STORAGE_CONNECTION_STRING", conn_str)?;
        }
        Ok(())
    }
}
