//! Terminal front-end for the card map.
//!
//! Reads query edits and commands from standard input, searches a JSON
//! gazetteer and prints the map pins and carousel cards as they change.
#![forbid(unsafe_code)]

mod console;
mod error;
mod gazetteer;
mod input;
mod session;

pub use error::CliError;
pub use gazetteer::Gazetteer;

use std::time::Duration;

use camino::Utf8PathBuf;
use cardmap_core::ScreenConfig;
use clap::Parser;
use geo::{Coord, Rect};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

const ARG_GAZETTEER: &str = "gazetteer";
const ARG_DEBOUNCE_MS: &str = "debounce-ms";
const ARG_INITIAL_SEARCH: &str = "initial-search";
const ARG_MIN_LON: &str = "min-lon";
const ARG_MIN_LAT: &str = "min-lat";
const ARG_MAX_LON: &str = "max-lon";
const ARG_MAX_LAT: &str = "max-lat";
const ARG_LOG_LEVEL: &str = "log-level";
const ENV_GAZETTEER: &str = "CARDMAP_GAZETTEER";

const DEFAULT_LOG_LEVEL: &str = "info";
const MAX_LONGITUDE: f64 = 180.0;
const MAX_LATITUDE: f64 = 90.0;

/// Run the cardmap CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns a [`CliError`] when configuration, gazetteer loading, terminal IO
/// or the screen itself fails.
pub fn run() -> Result<(), CliError> {
    let args = CliArgs::try_parse().map_err(CliError::ArgumentParsing)?;
    let config = args.into_config()?;
    init_logging(&config.log_filter)?;
    let gazetteer = Gazetteer::load(&config.gazetteer)?;
    log::info!(
        "searching {} places from {}",
        gazetteer.places().len(),
        config.gazetteer
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .map_err(CliError::Runtime)?;
    let input = tokio::io::BufReader::new(tokio::io::stdin());
    let output = std::io::stdout().lock();
    runtime.block_on(session::run_session(&config, gazetteer, input, output))
}

fn init_logging(level: &str) -> Result<(), CliError> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;
    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_err()
    {
        log::debug!("a global logger is already installed");
    }
    Ok(())
}

/// Command-line arguments, merged with `CARDMAP_*` environment variables and
/// configuration files.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "cardmap",
    about = "Search a gazetteer and browse the results as map pins and cards",
    long_about = "Each line read from standard input replaces the search \
                  text. Lines starting with ':' are commands: ':select N', \
                  ':keyboard show H', ':keyboard hide' and ':quit'.",
    version
)]
#[ortho_config(prefix = "CARDMAP")]
pub struct CliArgs {
    /// Path to a JSON array of places.
    #[arg(long = ARG_GAZETTEER, value_name = "path")]
    #[serde(default)]
    pub gazetteer: Option<Utf8PathBuf>,
    /// Quiet period after an edit before searching, in milliseconds.
    #[arg(long = ARG_DEBOUNCE_MS, value_name = "ms")]
    #[serde(default)]
    pub debounce_ms: Option<u64>,
    /// Search for the empty query on start-up.
    #[arg(long = ARG_INITIAL_SEARCH, value_name = "bool")]
    #[serde(default)]
    pub initial_search: Option<bool>,
    /// Western edge of the visible region.
    #[arg(long = ARG_MIN_LON, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub min_lon: Option<f64>,
    /// Southern edge of the visible region.
    #[arg(long = ARG_MIN_LAT, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub min_lat: Option<f64>,
    /// Eastern edge of the visible region.
    #[arg(long = ARG_MAX_LON, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub max_lon: Option<f64>,
    /// Northern edge of the visible region.
    #[arg(long = ARG_MAX_LAT, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub max_lat: Option<f64>,
    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long = ARG_LOG_LEVEL, value_name = "filter")]
    #[serde(default)]
    pub log_level: Option<String>,
}

impl CliArgs {
    fn into_config(self) -> Result<CliConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        CliConfig::try_from(merged)
    }
}

/// Resolved CLI configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CliConfig {
    /// Gazetteer file to search.
    pub gazetteer: Utf8PathBuf,
    /// Initial visible map region.
    pub region: Rect<f64>,
    /// Screen behaviour.
    pub screen: ScreenConfig,
    /// Log filter used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl TryFrom<CliArgs> for CliConfig {
    type Error = CliError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let gazetteer = args.gazetteer.ok_or(CliError::MissingArgument {
            field: ARG_GAZETTEER,
            env: ENV_GAZETTEER,
        })?;
        let region = region_from_bounds(
            Coord {
                x: args.min_lon.unwrap_or(-MAX_LONGITUDE),
                y: args.min_lat.unwrap_or(-MAX_LATITUDE),
            },
            Coord {
                x: args.max_lon.unwrap_or(MAX_LONGITUDE),
                y: args.max_lat.unwrap_or(MAX_LATITUDE),
            },
        )?;

        let mut screen = ScreenConfig::default();
        if let Some(millis) = args.debounce_ms {
            screen = screen.with_debounce(Duration::from_millis(millis));
        }
        if let Some(initial_search) = args.initial_search {
            screen = screen.with_search_on_load(initial_search);
        }

        Ok(Self {
            gazetteer,
            region,
            screen,
            log_filter: args
                .log_level
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_owned()),
        })
    }
}

fn region_from_bounds(min: Coord<f64>, max: Coord<f64>) -> Result<Rect<f64>, CliError> {
    let longitudes = -MAX_LONGITUDE..=MAX_LONGITUDE;
    let latitudes = -MAX_LATITUDE..=MAX_LATITUDE;
    if !longitudes.contains(&min.x) || !longitudes.contains(&max.x) {
        return Err(CliError::InvalidRegion {
            reason: "longitudes must lie within [-180, 180]",
        });
    }
    if !latitudes.contains(&min.y) || !latitudes.contains(&max.y) {
        return Err(CliError::InvalidRegion {
            reason: "latitudes must lie within [-90, 90]",
        });
    }
    if min.x >= max.x || min.y >= max.y {
        return Err(CliError::InvalidRegion {
            reason: "minimum bounds must lie below maximum bounds",
        });
    }
    Ok(Rect::new(min, max))
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<CliConfig, CliError> {
    let merged = CliArgs::merge_from_layers(layers).map_err(CliError::from)?;
    CliConfig::try_from(merged)
}

#[cfg(test)]
mod tests;
