pub mod fetcher;
pub mod locator;
pub mod step;

pub use crate::domain::model::{ApiCollection, ApiDescriptor, LookupKey};
pub use crate::domain::ports::{ApiCatalog, InputSource, OutputSink};
pub use crate::utils::error::Result;
