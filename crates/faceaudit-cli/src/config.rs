use anyhow::{Context, Result};
use faceaudit_library::viewer::DEFAULT_VIEWER;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_REVIEW_LIMIT: usize = 9;
const DEFAULT_FACE_SHEET_LIMIT: usize = 9;
const DEFAULT_THUMBNAIL_SIZE: u32 = 400;
const DEFAULT_MARKER_WIDTH: u32 = 20;

/// CLI configuration: optional TOML file, then `FACEAUDIT_*` environment
/// variables on top.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// JSON snapshot of the photo library.
    pub library_path: PathBuf,
    /// Number of people offered for review.
    pub review_limit: usize,
    /// Number of faces rendered for a single person.
    pub face_sheet_limit: usize,
    /// Rendered previews fit in a square of this side (0 = full size).
    pub thumbnail_size: u32,
    /// Marker ring thickness in source pixels.
    pub marker_width: u32,
    /// External viewer program and leading arguments.
    pub viewer: String,
    pub viewer_args: Vec<String>,
}

/// Keys accepted in the TOML file. All optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    library: Option<PathBuf>,
    review_limit: Option<usize>,
    face_sheet_limit: Option<usize>,
    thumbnail_size: Option<u32>,
    marker_width: Option<u32>,
    viewer: Option<String>,
    viewer_args: Option<Vec<String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            library_path: data_dir().join("library.json"),
            review_limit: DEFAULT_REVIEW_LIMIT,
            face_sheet_limit: DEFAULT_FACE_SHEET_LIMIT,
            thumbnail_size: DEFAULT_THUMBNAIL_SIZE,
            marker_width: DEFAULT_MARKER_WIDTH,
            viewer: DEFAULT_VIEWER.to_string(),
            viewer_args: Vec::new(),
        }
    }
}

impl Config {
    /// Load the config file named by `FACEAUDIT_CONFIG` (or the default
    /// location), then apply environment overrides.
    pub fn load() -> Result<Self> {
        let path = std::env::var("FACEAUDIT_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| config_dir().join("config.toml"));
        let mut cfg = Self::from_file(&path)?;
        cfg.apply_env();
        Ok(cfg)
    }

    /// Defaults overlaid with the TOML file at `path`, if it exists.
    pub fn from_file(path: &Path) -> Result<Self> {
        let mut cfg = Self::default();
        if !path.exists() {
            return Ok(cfg);
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config at {}", path.display()))?;
        let file: FileConfig =
            toml::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config file");

        if let Some(v) = file.library {
            cfg.library_path = v;
        }
        if let Some(v) = file.review_limit {
            cfg.review_limit = v;
        }
        if let Some(v) = file.face_sheet_limit {
            cfg.face_sheet_limit = v;
        }
        if let Some(v) = file.thumbnail_size {
            cfg.thumbnail_size = v;
        }
        if let Some(v) = file.marker_width {
            cfg.marker_width = v;
        }
        if let Some(v) = file.viewer {
            cfg.viewer = v;
        }
        if let Some(v) = file.viewer_args {
            cfg.viewer_args = v;
        }
        Ok(cfg)
    }

    fn apply_env(&mut self) {
        if let Ok(v) = std::env::var("FACEAUDIT_LIBRARY") {
            self.library_path = PathBuf::from(v);
        }
        self.review_limit = env_parse("FACEAUDIT_REVIEW_LIMIT", self.review_limit);
        self.face_sheet_limit = env_parse("FACEAUDIT_FACE_SHEET_LIMIT", self.face_sheet_limit);
        self.thumbnail_size = env_parse("FACEAUDIT_THUMBNAIL_SIZE", self.thumbnail_size);
        self.marker_width = env_parse("FACEAUDIT_MARKER_WIDTH", self.marker_width);
        if let Ok(v) = std::env::var("FACEAUDIT_VIEWER") {
            self.viewer = v;
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn home_dir() -> PathBuf {
    PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string()))
}

fn config_dir() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
        .join("faceaudit")
}

fn data_dir() -> PathBuf {
    std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/share"))
        .join("faceaudit")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, TempDir};

    fn write_config(contents: &str) -> (TempDir, PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let cfg = Config::from_file(Path::new("/nonexistent/faceaudit/config.toml")).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.review_limit, 9);
        assert_eq!(cfg.thumbnail_size, 400);
        assert_eq!(cfg.marker_width, 20);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let (_dir, path) = write_config(
            r#"
library = "/photos/export.json"
review_limit = 4
viewer = "automator"
viewer_args = ["-i"]
"#,
        );
        let cfg = Config::from_file(&path).unwrap();
        assert_eq!(cfg.library_path, PathBuf::from("/photos/export.json"));
        assert_eq!(cfg.review_limit, 4);
        assert_eq!(cfg.face_sheet_limit, 9);
        assert_eq!(cfg.viewer, "automator");
        assert_eq!(cfg.viewer_args, vec!["-i".to_string()]);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let (_dir, path) = write_config("review_limit = \"nine\"\n");
        assert!(Config::from_file(&path).is_err());
    }

    #[test]
    fn test_unknown_key_is_error() {
        let (_dir, path) = write_config("camera = \"/dev/video0\"\n");
        assert!(Config::from_file(&path).is_err());
    }

    #[test]
    fn test_env_parse_falls_back_on_garbage() {
        std::env::set_var("FACEAUDIT_TEST_GARBAGE_LIMIT", "lots");
        assert_eq!(env_parse("FACEAUDIT_TEST_GARBAGE_LIMIT", 9usize), 9);
        std::env::set_var("FACEAUDIT_TEST_GARBAGE_LIMIT", "12");
        assert_eq!(env_parse("FACEAUDIT_TEST_GARBAGE_LIMIT", 9usize), 12);
        std::env::remove_var("FACEAUDIT_TEST_GARBAGE_LIMIT");
    }
}
