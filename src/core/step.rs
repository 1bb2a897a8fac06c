use crate::config::StepConfig;
use crate::core::fetcher::GatewayClient;
use crate::core::locator::find_api;
use crate::core::{ApiCatalog, ApiDescriptor, InputSource, LookupKey, OutputSink};
use crate::utils::error::{Result, StepError};
use serde_json::Value;

pub const OUTPUT_API_ID: &str = "api-id";
pub const OUTPUT_API_NAME: &str = "api-name";
pub const OUTPUT_API_VERSION: &str = "api-version";
pub const OUTPUT_API_TYPE: &str = "api-type";
pub const OUTPUT_API_IS_ACTIVE: &str = "api-is-active";

/// The five values the step publishes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StepOutputs {
    pub api_id: String,
    pub api_name: String,
    pub api_version: String,
    pub api_type: String,
    pub api_is_active: bool,
}

impl StepOutputs {
    /// Published when nothing matched and the step is told not to fail.
    pub fn not_found() -> Self {
        Self::default()
    }

    pub fn publish<O: OutputSink>(&self, sink: &mut O) -> Result<()> {
        sink.set_output(OUTPUT_API_ID, &Value::from(self.api_id.as_str()))?;
        sink.set_output(OUTPUT_API_NAME, &Value::from(self.api_name.as_str()))?;
        sink.set_output(OUTPUT_API_VERSION, &Value::from(self.api_version.as_str()))?;
        sink.set_output(OUTPUT_API_TYPE, &Value::from(self.api_type.as_str()))?;
        sink.set_output(OUTPUT_API_IS_ACTIVE, &Value::Bool(self.api_is_active))?;
        Ok(())
    }
}

impl From<&ApiDescriptor> for StepOutputs {
    fn from(api: &ApiDescriptor) -> Self {
        Self {
            api_id: api.id.clone(),
            api_name: api.api_name.clone(),
            api_version: api.api_version.clone(),
            api_type: api.api_type.clone(),
            api_is_active: api.is_active,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Succeeded,
    Failed,
}

impl StepStatus {
    pub fn exit_code(self) -> i32 {
        match self {
            StepStatus::Succeeded => 0,
            StepStatus::Failed => 1,
        }
    }
}

pub struct FindApiStep<C: ApiCatalog> {
    catalog: C,
    lookup: LookupKey,
    fail_if_not_found: bool,
}

impl<C: ApiCatalog> FindApiStep<C> {
    pub fn new(catalog: C, lookup: LookupKey, fail_if_not_found: bool) -> Self {
        Self {
            catalog,
            lookup,
            fail_if_not_found,
        }
    }

    pub async fn execute(&self) -> Result<StepOutputs> {
        tracing::info!(
            "🚀 Looking up API project {} with version {}",
            self.lookup.name,
            self.lookup.version
        );

        let collection = self.catalog.fetch_all().await?;

        match find_api(&collection, &self.lookup) {
            Some(api) => {
                tracing::info!("✅ Found API project {} ({})", api.api_name, api.id);
                Ok(StepOutputs::from(api))
            }
            None if self.fail_if_not_found => Err(StepError::ApiNotFound {
                name: self.lookup.name.clone(),
                version: self.lookup.version.clone(),
            }),
            None => {
                tracing::warn!(
                    "API project {} with version {} not found, publishing empty outputs",
                    self.lookup.name,
                    self.lookup.version
                );
                Ok(StepOutputs::not_found())
            }
        }
    }
}

/// Runs one step against the gateway named in `inputs`. Every error ends up
/// as a `set_failed` call on `sink` and a failed status.
pub async fn run_action<I: InputSource, O: OutputSink>(inputs: &I, sink: &mut O) -> StepStatus {
    let result = match StepConfig::from_inputs(inputs) {
        Ok(config) => {
            tracing::debug!("Gateway: {:?}", config.gateway);
            let step = FindApiStep::new(
                GatewayClient::new(config.gateway),
                config.lookup,
                config.fail_if_not_found,
            );
            step.execute().await
        }
        Err(e) => Err(e),
    };

    conclude(result, sink)
}

pub fn conclude<O: OutputSink>(result: Result<StepOutputs>, sink: &mut O) -> StepStatus {
    let error = match result.and_then(|outputs| outputs.publish(sink)) {
        Ok(()) => return StepStatus::Succeeded,
        Err(e) => e,
    };

    tracing::error!("❌ Step failed: {}", error);
    tracing::error!("💡 Suggestion: {}", error.recovery_suggestion());

    if let Err(report_error) = sink.set_failed(&error.to_string()) {
        tracing::error!("Could not report failure to the runner: {}", report_error);
    }
    StepStatus::Failed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ApiCollection;
    use crate::domain::model::ApiWrapper;

    struct StaticCatalog(Option<ApiCollection>);

    #[async_trait::async_trait]
    impl ApiCatalog for StaticCatalog {
        async fn fetch_all(&self) -> Result<ApiCollection> {
            self.0.clone().ok_or(StepError::GatewayQuery)
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        outputs: Vec<(String, Value)>,
        failure: Option<String>,
    }

    impl OutputSink for RecordingSink {
        fn set_output(&mut self, name: &str, value: &Value) -> Result<()> {
            self.outputs.push((name.to_string(), value.clone()));
            Ok(())
        }

        fn set_failed(&mut self, message: &str) -> Result<()> {
            self.failure = Some(message.to_string());
            Ok(())
        }
    }

    fn petstore() -> ApiCollection {
        ApiCollection {
            api_response: vec![ApiWrapper {
                api: ApiDescriptor {
                    id: "e6536d45-4bb2-45b8-9a38-21976e924741".to_string(),
                    api_name: "Swagger Petstore".to_string(),
                    api_version: "1.0.6".to_string(),
                    api_type: "REST".to_string(),
                    is_active: true,
                },
            }],
        }
    }

    #[tokio::test]
    async fn test_execute_found() {
        let step = FindApiStep::new(
            StaticCatalog(Some(petstore())),
            LookupKey::new("Swagger Petstore", "1.0.6"),
            true,
        );

        let outputs = step.execute().await.unwrap();
        assert_eq!(outputs.api_id, "e6536d45-4bb2-45b8-9a38-21976e924741");
        assert_eq!(outputs.api_type, "REST");
        assert!(outputs.api_is_active);
    }

    #[tokio::test]
    async fn test_execute_not_found_with_fail_flag() {
        let step = FindApiStep::new(
            StaticCatalog(Some(petstore())),
            LookupKey::new("Swagger Petstore", "1.0.7"),
            true,
        );

        let err = step.execute().await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "API project Swagger Petstore with version 1.0.7 not found!"
        );
    }

    #[tokio::test]
    async fn test_execute_not_found_without_fail_flag() {
        let step = FindApiStep::new(
            StaticCatalog(Some(petstore())),
            LookupKey::new("Swagger Petstore", "1.0.7"),
            false,
        );

        assert_eq!(step.execute().await.unwrap(), StepOutputs::not_found());
    }

    #[test]
    fn test_publish_writes_five_outputs_in_order() {
        let mut sink = RecordingSink::default();
        StepOutputs::not_found().publish(&mut sink).unwrap();

        let names: Vec<&str> = sink.outputs.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(
            names,
            vec!["api-id", "api-name", "api-version", "api-type", "api-is-active"]
        );
        assert_eq!(sink.outputs[0].1, Value::from(""));
        assert_eq!(sink.outputs[4].1, Value::Bool(false));
    }

    #[test]
    fn test_conclude_reports_fetch_failure() {
        let mut sink = RecordingSink::default();
        let status = conclude(Err(StepError::GatewayQuery), &mut sink);

        assert_eq!(status, StepStatus::Failed);
        assert_eq!(status.exit_code(), 1);
        assert_eq!(sink.failure.as_deref(), Some("Failed to query API Gateway"));
        assert!(sink.outputs.is_empty());
    }

    #[tokio::test]
    async fn test_run_action_reports_missing_input() {
        let inputs = std::collections::HashMap::from([(
            "apigw-url".to_string(),
            "https://localhost:5555".to_string(),
        )]);
        let mut sink = RecordingSink::default();

        let status = run_action(&inputs, &mut sink).await;

        assert_eq!(status, StepStatus::Failed);
        assert_eq!(
            sink.failure.as_deref(),
            Some("Input required and not supplied: api-name")
        );
    }
}
