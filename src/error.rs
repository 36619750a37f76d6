use std::process::ExitStatus;
use thiserror::Error;

/// Every way a run can end early. Each kind maps to a fixed process exit code.
#[derive(Error, Debug)]
pub enum LifetimeError {
    #[error("\"{device}\" does not seem to be a drive!")]
    NotBlockDevice { device: String },

    #[error("\"{tool}\" is either not installed or not in PATH!")]
    ToolNotFound { tool: String },

    #[error("failed to run \"{tool}\": {source}")]
    Spawn {
        tool:   String,
        #[source]
        source: std::io::Error,
    },

    #[error("smartctl exited with {status}\n{output}")]
    ReportFailed { status: ExitStatus, output: String },

    #[error("This tool is only compatible with Samsung SSDs! (model: \"{model}\")")]
    UnsupportedVendor { model: String },

    #[error("smartctl report has no usable \"{field}\" line")]
    MissingAttribute { field: &'static str },

    #[error("invalid configuration: {0:#}")]
    Config(#[from] anyhow::Error),

    #[error("could not encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl LifetimeError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotBlockDevice { .. }    => 2,
            Self::ToolNotFound { .. }      => 3,
            Self::Spawn { .. }             => 3,
            Self::ReportFailed { .. }      => 3,
            Self::UnsupportedVendor { .. } => 4,
            Self::MissingAttribute { .. }  => 1,
            Self::Config(_)                => 1,
            Self::Json(_)                  => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, LifetimeError>;
