use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPathError {
    MissingHomeDirectory,
}

const APP_DIR: &str = "quadcrop";
const APP_CONFIG_FILE: &str = "config.json";

const DEFAULT_INSET_RATIO: f64 = 0.1;
const DEFAULT_HANDLE_HIT_SIZE: f64 = 64.0;
const DEFAULT_OUTLINE_LINE_WIDTH: f64 = 2.0;
const DEFAULT_OUTLINE_DASH: [f64; 2] = [4.0, 4.0];
const DEFAULT_MASK_OPACITY: f64 = 0.5;

/// Dashed stroke used for the crop outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineStyle {
    #[serde(default = "default_line_width")]
    pub line_width: f64,
    #[serde(default = "default_dash_pattern")]
    pub dash_pattern: Vec<f64>,
}

impl Default for OutlineStyle {
    fn default() -> Self {
        Self {
            line_width: DEFAULT_OUTLINE_LINE_WIDTH,
            dash_pattern: DEFAULT_OUTLINE_DASH.to_vec(),
        }
    }
}

fn default_line_width() -> f64 {
    DEFAULT_OUTLINE_LINE_WIDTH
}

fn default_dash_pattern() -> Vec<f64> {
    DEFAULT_OUTLINE_DASH.to_vec()
}

fn default_inset_ratio() -> f64 {
    DEFAULT_INSET_RATIO
}

fn default_handle_hit_size() -> f64 {
    DEFAULT_HANDLE_HIT_SIZE
}

fn default_mask_opacity() -> f64 {
    DEFAULT_MASK_OPACITY
}

/// Cropper settings from `config.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropperConfig {
    /// Handle inset from the image frame edges, as a fraction of the
    /// container width.
    #[serde(default = "default_inset_ratio")]
    pub default_inset_ratio: f64,
    /// Side of the square touch area around each handle center.
    #[serde(default = "default_handle_hit_size")]
    pub handle_hit_size: f64,
    #[serde(default)]
    pub outline: OutlineStyle,
    #[serde(default = "default_mask_opacity")]
    pub mask_opacity: f64,
}

impl Default for CropperConfig {
    fn default() -> Self {
        Self {
            default_inset_ratio: DEFAULT_INSET_RATIO,
            handle_hit_size: DEFAULT_HANDLE_HIT_SIZE,
            outline: OutlineStyle::default(),
            mask_opacity: DEFAULT_MASK_OPACITY,
        }
    }
}

impl CropperConfig {
    /// Replaces unusable values with defaults.
    pub fn sanitized(mut self) -> Self {
        self.default_inset_ratio = if self.default_inset_ratio.is_finite() {
            self.default_inset_ratio.clamp(0.0, 0.5)
        } else {
            DEFAULT_INSET_RATIO
        };
        if !(self.handle_hit_size.is_finite() && self.handle_hit_size > 0.0) {
            self.handle_hit_size = DEFAULT_HANDLE_HIT_SIZE;
        }
        if !(self.outline.line_width.is_finite() && self.outline.line_width > 0.0) {
            self.outline.line_width = DEFAULT_OUTLINE_LINE_WIDTH;
        }
        if self
            .outline
            .dash_pattern
            .iter()
            .any(|segment| !(segment.is_finite() && *segment >= 0.0))
        {
            self.outline.dash_pattern = DEFAULT_OUTLINE_DASH.to_vec();
        }
        self.mask_opacity = if self.mask_opacity.is_finite() {
            self.mask_opacity.clamp(0.0, 1.0)
        } else {
            DEFAULT_MASK_OPACITY
        };
        self
    }
}

pub fn load_config() -> CropperConfig {
    let (xdg_config_home, home) = config_env_dirs();
    load_config_with(xdg_config_home.as_deref(), home.as_deref())
}

fn load_config_with(xdg_config_home: Option<&Path>, home: Option<&Path>) -> CropperConfig {
    let path = match app_config_path(APP_DIR, APP_CONFIG_FILE, xdg_config_home, home) {
        Ok(p) => p,
        Err(_) => return CropperConfig::default(),
    };
    if !path.exists() {
        return CropperConfig::default();
    }
    match std::fs::read_to_string(&path) {
        Ok(contents) => parse_config(&contents).unwrap_or_else(|err| {
            tracing::warn!(?err, ?path, "failed to parse config.json; using defaults");
            CropperConfig::default()
        }),
        Err(err) => {
            tracing::warn!(?err, ?path, "failed to read config.json; using defaults");
            CropperConfig::default()
        }
    }
}

fn parse_config(contents: &str) -> Result<CropperConfig, serde_json::Error> {
    serde_json::from_str::<CropperConfig>(contents).map(CropperConfig::sanitized)
}

pub(crate) fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

pub(crate) fn app_config_path(
    app_dir: &str,
    file_name: &str,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    let mut path = config_root(xdg_config_home, home)?;
    path.push(app_dir);
    path.push(file_name);
    Ok(path)
}

fn config_root(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    if let Some(xdg) = xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        return Ok(xdg.to_path_buf());
    }

    let home = home.ok_or(ConfigPathError::MissingHomeDirectory)?;
    Ok(home.join(".config"))
}
