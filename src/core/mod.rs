pub mod dataset;
pub mod resolver;

pub use crate::domain::model::DatasetRow;
pub use crate::domain::ports::BlobStorage;
pub use crate::utils::error::Result;
