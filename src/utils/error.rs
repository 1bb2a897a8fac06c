use thiserror::Error;

#[derive(Error, Debug)]
pub enum StepError {
    #[error("Failed to query API Gateway")]
    GatewayQuery,

    #[error("API project {name} with version {version} not found!")]
    ApiNotFound { name: String, version: String },

    #[error("Input required and not supplied: {field}")]
    MissingInput { field: String },

    #[error("Invalid value for input {field} ({value}): {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Output error: {message}")]
    OutputError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl StepError {
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            StepError::GatewayQuery => {
                "Check that apigw-url is reachable from the runner and the credentials are valid"
            }
            StepError::ApiNotFound { .. } => {
                "Verify the API name and version, or set fail-if-not-found to false"
            }
            StepError::MissingInput { .. } | StepError::InvalidInput { .. } => {
                "Check the step's `with:` inputs in the workflow file"
            }
            StepError::OutputError { .. } | StepError::IoError(_) => {
                "Check that GITHUB_OUTPUT points to a writable file"
            }
            StepError::SerializationError(_) => "Report this as a bug",
        }
    }
}

pub type Result<T> = std::result::Result<T, StepError>;
