//! Error types emitted by the cardmap CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use cardmap_core::ScreenError;
use thiserror::Error;

/// Errors emitted by the cardmap CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Long flag name of the missing option.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// The region bounds do not describe a valid WGS84 rectangle.
    #[error("invalid search region: {reason}")]
    InvalidRegion {
        /// Which bound check failed.
        reason: &'static str,
    },
    /// The log filter could not be parsed.
    #[error("invalid log filter: {0}")]
    LogFilter(#[from] tracing_subscriber::filter::ParseError),
    /// Opening the gazetteer file failed.
    #[error("failed to open gazetteer at {path:?}: {source}")]
    OpenGazetteer {
        /// Gazetteer path as configured.
        path: Utf8PathBuf,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },
    /// Gazetteer JSON could not be decoded.
    #[error("failed to parse gazetteer JSON at {path:?}: {source}")]
    ParseGazetteer {
        /// Gazetteer path as configured.
        path: Utf8PathBuf,
        /// Underlying failure.
        #[source]
        source: serde_json::Error,
    },
    /// The async runtime could not be started.
    #[error("failed to start runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// Reading terminal input failed.
    #[error("failed to read input: {0}")]
    ReadInput(#[source] std::io::Error),
    /// Writing terminal output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
    /// The screen hit a fatal error.
    #[error(transparent)]
    Screen(#[from] ScreenError),
}
