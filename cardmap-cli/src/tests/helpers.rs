//! Test helpers for writing gazetteers and running sessions.

use super::*;
use cardmap_core::Place;
use cardmap_core::test_support::sample_places;
use tempfile::TempDir;

/// Temporary directory holding a gazetteer file.
pub(super) struct GazetteerFile {
    _dir: TempDir,
    path: Utf8PathBuf,
}

impl GazetteerFile {
    /// Write `places` as a JSON gazetteer.
    pub(super) fn with_places(places: &[Place]) -> Self {
        let contents = serde_json::to_vec(places).expect("serialise places");
        Self::with_contents(&contents)
    }

    /// Write the Springfield sample places.
    pub(super) fn sample() -> Self {
        Self::with_places(&sample_places())
    }

    /// Write raw `contents`.
    pub(super) fn with_contents(contents: &[u8]) -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        let path = root.join("places.json");
        std::fs::write(&path, contents).expect("write gazetteer");
        Self { _dir: dir, path }
    }

    pub(super) fn path(&self) -> &Utf8PathBuf {
        &self.path
    }
}

/// Configuration searching every place, without an initial search.
pub(super) fn quiet_config() -> CliConfig {
    CliConfig {
        gazetteer: Utf8PathBuf::from("places.json"),
        region: Rect::new(
            Coord {
                x: -MAX_LONGITUDE,
                y: -MAX_LATITUDE,
            },
            Coord {
                x: MAX_LONGITUDE,
                y: MAX_LATITUDE,
            },
        ),
        screen: ScreenConfig::default().with_search_on_load(false),
        log_filter: DEFAULT_LOG_LEVEL.to_owned(),
    }
}

/// Run a session over `script` and return everything it printed.
pub(super) async fn transcript(config: &CliConfig, script: &str) -> Result<String, CliError> {
    let mut output = Vec::new();
    session::run_session(
        config,
        Gazetteer::from_places(sample_places()),
        script.as_bytes(),
        &mut output,
    )
    .await?;
    Ok(String::from_utf8(output).expect("utf-8 output"))
}
