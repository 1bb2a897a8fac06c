use crate::domain::model::ApiCollection;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;

/// Where step inputs come from. `None` means the input is unset or blank.
pub trait InputSource {
    fn input(&self, name: &str) -> Option<String>;
}

/// Where step outputs and the failure message go.
pub trait OutputSink {
    fn set_output(&mut self, name: &str, value: &serde_json::Value) -> Result<()>;
    fn set_failed(&mut self, message: &str) -> Result<()>;
}

/// Read access to the gateway's API inventory.
#[async_trait]
pub trait ApiCatalog: Send + Sync {
    async fn fetch_all(&self) -> Result<ApiCollection>;
}

impl InputSource for HashMap<String, String> {
    fn input(&self, name: &str) -> Option<String> {
        self.get(name)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }
}
