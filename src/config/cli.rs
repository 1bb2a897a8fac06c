use crate::config::{
    INPUT_APIGW_PASSWORD, INPUT_APIGW_URL, INPUT_APIGW_USER, INPUT_API_NAME, INPUT_API_VERSION,
    INPUT_FAIL_IF_NOT_FOUND,
};
use crate::domain::ports::InputSource;
use clap::Parser;

/// Command line overrides for running the step outside a runner. Any flag left
/// out falls back to the `INPUT_*` environment variables.
#[derive(Clone, Default, Parser)]
#[command(name = "apigw-find-api")]
#[command(about = "Look up an API project on webMethods API Gateway by name and version")]
pub struct CliConfig {
    #[arg(long = "apigw-url")]
    pub apigw_url: Option<String>,

    #[arg(long = "apigw-user")]
    pub apigw_user: Option<String>,

    #[arg(long = "apigw-password", help = "Prefer INPUT_APIGW-PASSWORD over this flag")]
    pub apigw_password: Option<String>,

    #[arg(long = "api-name")]
    pub api_name: Option<String>,

    #[arg(long = "api-version")]
    pub api_version: Option<String>,

    #[arg(long = "fail-if-not-found")]
    pub fail_if_not_found: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl CliConfig {
    fn flag_value(&self, name: &str) -> Option<&str> {
        match name {
            INPUT_APIGW_URL => self.apigw_url.as_deref(),
            INPUT_APIGW_USER => self.apigw_user.as_deref(),
            INPUT_APIGW_PASSWORD => self.apigw_password.as_deref(),
            INPUT_API_NAME => self.api_name.as_deref(),
            INPUT_API_VERSION => self.api_version.as_deref(),
            INPUT_FAIL_IF_NOT_FOUND => self.fail_if_not_found.as_deref(),
            _ => None,
        }
    }
}

pub struct LayeredInputs<'a, F: InputSource> {
    cli: &'a CliConfig,
    fallback: F,
}

impl<'a, F: InputSource> LayeredInputs<'a, F> {
    pub fn new(cli: &'a CliConfig, fallback: F) -> Self {
        Self { cli, fallback }
    }
}

impl<F: InputSource> InputSource for LayeredInputs<'_, F> {
    fn input(&self, name: &str) -> Option<String> {
        self.cli
            .flag_value(name)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .or_else(|| self.fallback.input(name))
    }
}
