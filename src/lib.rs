pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::{CliConfig, LayeredInputs};

pub use crate::config::actions::{ActionsEnv, ActionsOutput};
pub use crate::config::{GatewayConfig, StepConfig};
pub use crate::core::{
    fetcher::GatewayClient,
    locator::find_api,
    step::{run_action, FindApiStep, StepOutputs, StepStatus},
};
pub use crate::domain::model::{ApiCollection, ApiDescriptor, ApiWrapper, LookupKey};
pub use crate::utils::error::{Result, StepError};
