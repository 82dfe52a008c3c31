pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use app::routes::{router, AppState};
pub use config::{ServerConfig, StorageConfig};
pub use core::resolver::BlobClientResolver;
pub use domain::model::DatasetRow;
pub use domain::ports::BlobStorage;
pub use utils::error::{FetchError, Result};
