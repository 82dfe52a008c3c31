use crate::config::StorageConfig;
use crate::domain::ports::BlobStorage;
use crate::utils::error::{FetchError, Result};
use crate::utils::validation::validate_storage_account_name;
use async_trait::async_trait;
use object_store::azure::MicrosoftAzureBuilder;
use object_store::path::Path;
use object_store::ObjectStore;
use std::sync::Arc;

/// Azure Blob Storage client scoped to one container.
///
/// Two authentication paths, mirroring the deployment options: a pre-shared
/// connection string, or the ambient managed-identity credential chain that
/// `object_store` falls back to when an account is configured without a key.
#[derive(Debug, Clone)]
pub struct AzureBlobStorage {
    store: Arc<dyn ObjectStore>,
    container: String,
}

impl AzureBlobStorage {
    /// Build a client from environment-derived settings. Construction never
    /// touches the network; credential problems surface on first download.
    pub fn connect(config: &StorageConfig, container: &str) -> Result<Self> {
        let mut builder = MicrosoftAzureBuilder::new().with_container_name(container);

        if config.use_managed_identity {
            let account = config
                .storage_account_name
                .as_deref()
                .filter(|a| !a.trim().is_empty())
                .ok_or_else(|| FetchError::ConfigError {
                    message: "STORAGE_ACCOUNT_NAME is required when USE_MANAGED_IDENTITY=true"
                        .to_string(),
                })?;
            validate_storage_account_name("STORAGE_ACCOUNT_NAME", account)?;
            builder = builder.with_account(account);
        } else {
            let raw = config
                .connection_string
                .as_deref()
                .filter(|c| !c.trim().is_empty())
                .ok_or_else(|| FetchError::ConfigError {
                    message: "AZURE_STORAGE_CONNECTION_STRING is not set".to_string(),
                })?;

            let conn = ConnectionString::parse(raw)?;
            let account = conn.account_name.ok_or_else(|| {
                FetchError::ConfigError {
                    message: "Connection string is missing AccountName".to_string(),
                }
            })?;
            builder = builder.with_account(&account);

            if let Some(key) = conn.account_key {
                builder = builder.with_access_key(&key);
            }
            if let Some(endpoint) = conn.blob_endpoint {
                // Azurite and other emulators publish plain-http endpoints.
                let allow_http = endpoint.starts_with("http://");
                builder = builder.with_endpoint(endpoint).with_allow_http(allow_http);
            } else if let Some(suffix) = conn.endpoint_suffix {
                builder = builder.with_endpoint(format!("https://{}.blob.{}", account, suffix));
            }
        }

        let store = builder.build().map_err(|e| FetchError::ConfigError {
            message: format!("Failed to initialize blob storage client: {}", e),
        })?;

        Ok(Self {
            store: Arc::new(store),
            container: container.to_string(),
        })
    }

    pub fn container(&self) -> &str {
        &self.container
    }
}

#[async_trait]
impl BlobStorage for AzureBlobStorage {
    async fn download(&self, name: &str) -> Result<Vec<u8>> {
        let path = Path::from(name);
        let result = self.store.get(&path).await?;
        let bytes = result.bytes().await?;
        Ok(bytes.to_vec())
    }
}

/// Parsed `Key=Value;...` Azure connection string. Only the fields the blob
/// client needs are retained; the rest (protocol, queue/table endpoints) are
/// ignored.
#[derive(Debug, Default, PartialEq, Eq)]
struct ConnectionString {
    account_name: Option<String>,
    account_key: Option<String>,
    blob_endpoint: Option<String>,
    endpoint_suffix: Option<String>,
}

impl ConnectionString {
    fn parse(raw: &str) -> Result<Self> {
        let mut parsed = Self::default();

        for pair in raw.split(';').filter(|p| !p.trim().is_empty()) {
            // Account keys are base64 and may end in '='; split on the first only.
            let (key, value) = pair.split_once('=').ok_or_else(|| {
                FetchError::InvalidConfigValueError {
                    field: "AZURE_STORAGE_CONNECTION_STRING".to_string(),
                    value: pair.to_string(),
                    reason: "Expected a Key=Value segment".to_string(),
                }
            })?;

            match key.trim() {
                "AccountName" => parsed.account_name = Some(value.to_string()),
                "AccountKey" => parsed.account_key = Some(value.to_string()),
                "BlobEndpoint" => parsed.blob_endpoint = Some(value.to_string()),
                "EndpointSuffix" => parsed.endpoint_suffix = Some(value.to_string()),
                _ => {}
            }
        }

        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AZURITE_CONN: &str = "DefaultEndpointsProtocol=http;AccountName=devstoreaccount1;\
        AccountKey=Eby8vdM02xNOcqFlqUwJPLlmEtlCDXJ1OUzFT50uSRZ6IFsuFq2UVErCz4I6tq/K1SZFPTOtr/KBHBeksoGMGw==;\
        BlobEndpoint=http://127.0.0.1:10000/devstoreaccount1;";

    #[test]
    fn test_parse_connection_string() {
        let conn = ConnectionString::parse(AZURITE_CONN).unwrap();
        assert_eq!(conn.account_name.as_deref(), Some("devstoreaccount1"));
        assert!(conn.account_key.unwrap().ends_with("=="));
        assert_eq!(
            conn.blob_endpoint.as_deref(),
            Some("http://127.0.0.1:10000/devstoreaccount1")
        );
        assert_eq!(conn.endpoint_suffix, None);
    }

    #[test]
    fn test_parse_connection_string_rejects_bare_segment() {
        assert!(ConnectionString::parse("AccountName").is_err());
    }

    #[test]
    fn test_parse_connection_string_ignores_unknown_keys() {
        let conn =
            ConnectionString::parse("AccountName=acct;QueueEndpoint=http://example").unwrap();
        assert_eq!(conn.account_name.as_deref(), Some("acct"));
        assert_eq!(conn.blob_endpoint, None);
    }

    #[test]
    fn test_connect_with_connection_string() {
        let config = StorageConfig {
            use_managed_identity: false,
            storage_account_name: None,
            connection_string: Some(AZURITE_CONN.to_string()),
        };
        let storage = AzureBlobStorage::connect(&config, "diet-data").unwrap();
        assert_eq!(storage.container(), "diet-data");
    }

    #[test]
    fn test_connect_without_credentials_is_unavailable() {
        let err = AzureBlobStorage::connect(&StorageConfig::default(), "diet-data").unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_connect_managed_identity_requires_account() {
        let config = StorageConfig {
            use_managed_identity: true,
            storage_account_name: None,
            connection_string: None,
        };
        let err = AzureBlobStorage::connect(&config, "diet-data").unwrap_err();
        assert!(err.is_configuration());

        let config = StorageConfig {
            use_managed_identity: true,
            storage_account_name: Some("dietdata".to_string()),
            connection_string: None,
        };
        assert!(AzureBlobStorage::connect(&config, "diet-data").is_ok());
    }
}
