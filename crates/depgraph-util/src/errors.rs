use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all depgraph operations.
#[derive(Debug, Error, Diagnostic)]
pub enum DepgraphError {
    /// A resolution report or config file could not be read or parsed.
    #[error("Report error: {message}")]
    #[diagnostic(help("Check that the report was produced by a compatible resolver"))]
    Report { message: String },

    /// The requested configuration is not part of the resolution report.
    #[error("Configuration '{configuration}' not found among [{}]", available.join(", "))]
    #[diagnostic(help("Convert one of the configurations the report was resolved for"))]
    MissingConfiguration {
        configuration: String,
        available: Vec<String>,
    },

    /// The report is internally inconsistent (unknown configuration on a node,
    /// self-extending configuration, dangling caller).
    #[error("Inconsistent report at {module} ({configuration}): {message}")]
    Structural {
        module: String,
        configuration: String,
        message: String,
    },

    /// A caller chain leads back to a node that is still being converted.
    #[error("Cyclic caller chain through {module} ({configuration})")]
    CyclicCallers {
        module: String,
        configuration: String,
    },
}

/// Convenience alias for `miette::Result<T>`.
pub type DepgraphResult<T> = miette::Result<T>;
