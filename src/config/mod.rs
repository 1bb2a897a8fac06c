pub mod actions;
#[cfg(feature = "cli")]
pub mod cli;

use crate::domain::model::LookupKey;
use crate::domain::ports::InputSource;
use crate::utils::error::{Result, StepError};
use crate::utils::validation::{parse_flag, validate_url, Validate};
use std::fmt;

pub const INPUT_APIGW_URL: &str = "apigw-url";
pub const INPUT_APIGW_USER: &str = "apigw-user";
pub const INPUT_APIGW_PASSWORD: &str = "apigw-password";
pub const INPUT_API_NAME: &str = "api-name";
pub const INPUT_API_VERSION: &str = "api-version";
pub const INPUT_FAIL_IF_NOT_FOUND: &str = "fail-if-not-found";

/// Connection settings for the API Gateway management endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub url: String,
    pub username: String,
    pub password: String,
}

impl GatewayConfig {
    pub fn new(url: &str, username: &str, password: &str) -> Self {
        Self {
            url: url.to_string(),
            username: username.to_string(),
            password: password.to_string(),
        }
    }
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct StepConfig {
    pub gateway: GatewayConfig,
    pub lookup: LookupKey,
    pub fail_if_not_found: bool,
}

impl StepConfig {
    pub fn from_inputs<I: InputSource>(inputs: &I) -> Result<Self> {
        let config = Self {
            gateway: GatewayConfig {
                url: required(inputs, INPUT_APIGW_URL)?,
                username: inputs.input(INPUT_APIGW_USER).unwrap_or_default(),
                password: inputs.input(INPUT_APIGW_PASSWORD).unwrap_or_default(),
            },
            lookup: LookupKey::new(
                required(inputs, INPUT_API_NAME)?,
                required(inputs, INPUT_API_VERSION)?,
            ),
            fail_if_not_found: parse_flag(inputs.input(INPUT_FAIL_IF_NOT_FOUND).as_deref()),
        };

        config.validate()?;
        Ok(config)
    }
}

impl Validate for StepConfig {
    fn validate(&self) -> Result<()> {
        validate_url(INPUT_APIGW_URL, &self.gateway.url)?;

        tracing::debug!("✅ Step configuration validation passed");
        Ok(())
    }
}

fn required<I: InputSource>(inputs: &I, name: &str) -> Result<String> {
    inputs.input(name).ok_or_else(|| StepError::MissingInput {
        field: name.to_string(),
    })
}
