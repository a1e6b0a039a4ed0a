use std::fs;
use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use serde::{Deserialize, Serialize};

use crate::detection::domain::detection_config::DetectionConfig;
use crate::features::domain::feature_config::FeatureConfig;
use crate::shared::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_CANONICAL_SIZE};
use crate::shared::error::AnalysisError;

/// Which buffer the normalizer keeps as the display sample.
///
/// The grayscale derivative used for feature extraction is produced either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    Color,
    Grayscale,
}

impl ColorMode {
    pub fn channels(self) -> u8 {
        match self {
            ColorMode::Color => 3,
            ColorMode::Grayscale => 1,
        }
    }
}

/// Resampling filter used to stretch crops to the canonical resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl Interpolation {
    pub const ALL: &'static [Interpolation] = &[
        Interpolation::Nearest,
        Interpolation::Triangle,
        Interpolation::CatmullRom,
        Interpolation::Gaussian,
        Interpolation::Lanczos3,
    ];

    pub fn filter_type(self) -> FilterType {
        match self {
            Interpolation::Nearest => FilterType::Nearest,
            Interpolation::Triangle => FilterType::Triangle,
            Interpolation::CatmullRom => FilterType::CatmullRom,
            Interpolation::Gaussian => FilterType::Gaussian,
            Interpolation::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

impl std::fmt::Display for Interpolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Interpolation::Nearest => "nearest",
            Interpolation::Triangle => "triangle",
            Interpolation::CatmullRom => "catmull_rom",
            Interpolation::Gaussian => "gaussian",
            Interpolation::Lanczos3 => "lanczos3",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for Interpolation {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Interpolation::ALL
            .iter()
            .copied()
            .find(|i| i.to_string() == s)
            .ok_or_else(|| AnalysisError::Config(format!("unknown interpolation '{s}'")))
    }
}

/// Run-scoped configuration. Fixed for the whole batch once validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub canonical_width: u32,
    pub canonical_height: u32,
    pub color_mode: ColorMode,
    pub interpolation: Interpolation,
    pub features: FeatureConfig,
    pub detection: DetectionConfig,
    pub workers: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            canonical_width: DEFAULT_CANONICAL_SIZE,
            canonical_height: DEFAULT_CANONICAL_SIZE,
            color_mode: ColorMode::Color,
            interpolation: Interpolation::Lanczos3,
            features: FeatureConfig::default(),
            detection: DetectionConfig::default(),
            workers: default_workers(),
        }
    }
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

impl AnalysisConfig {
    /// Platform config file location, e.g. `~/.config/average-face/config.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Reads a JSON config file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, AnalysisError> {
        let json = fs::read_to_string(path).map_err(|source| AnalysisError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json)
            .map_err(|e| AnalysisError::Config(format!("{}: {e}", path.display())))
    }

    /// Loads the config from [`Self::default_path`] if present, else defaults.
    pub fn load_default() -> Result<Self, AnalysisError> {
        match Self::default_path() {
            Some(path) if path.exists() => {
                log::debug!("Loading config from {}", path.display());
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.canonical_width < 3 || self.canonical_height < 3 {
            return Err(AnalysisError::Config(format!(
                "canonical resolution must be at least 3x3, got {}x{}",
                self.canonical_width, self.canonical_height
            )));
        }
        if self.workers == 0 {
            return Err(AnalysisError::Config("workers must be at least 1".into()));
        }
        self.detection.validate()?;
        self.features
            .validate(self.canonical_width as usize, self.canonical_height as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_defaults_are_valid() {
        let config = AnalysisConfig::default();
        assert_eq!(config.canonical_width, 128);
        assert_eq!(config.canonical_height, 128);
        assert!(config.workers >= 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let config: AnalysisConfig =
            serde_json::from_str(r#"{"canonical_width": 64, "canonical_height": 64}"#).unwrap();
        assert_eq!(config.canonical_width, 64);
        assert_eq!(config.interpolation, Interpolation::Lanczos3);
        assert_eq!(config.features, FeatureConfig::default());
    }

    #[test]
    fn test_load_roundtrips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = AnalysisConfig {
            color_mode: ColorMode::Grayscale,
            interpolation: Interpolation::Triangle,
            ..AnalysisConfig::default()
        };
        fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
        assert_eq!(AnalysisConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = AnalysisConfig::load(Path::new("/nonexistent/config.json")).unwrap_err();
        assert!(matches!(err, AnalysisError::Io { .. }));
    }

    #[test]
    fn test_load_malformed_json_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        let err = AnalysisConfig::load(&path).unwrap_err();
        assert!(matches!(err, AnalysisError::Config(_)));
    }

    #[rstest]
    #[case::tiny_width(AnalysisConfig { canonical_width: 2, ..AnalysisConfig::default() })]
    #[case::no_workers(AnalysisConfig { workers: 0, ..AnalysisConfig::default() })]
    #[case::cell_not_dividing(AnalysisConfig { canonical_width: 100, ..AnalysisConfig::default() })]
    fn test_invalid_configs_rejected(#[case] config: AnalysisConfig) {
        assert!(matches!(config.validate(), Err(AnalysisError::Config(_))));
    }

    #[rstest]
    #[case("nearest", Interpolation::Nearest)]
    #[case("catmull_rom", Interpolation::CatmullRom)]
    #[case("lanczos3", Interpolation::Lanczos3)]
    fn test_interpolation_parses(#[case] name: &str, #[case] expected: Interpolation) {
        assert_eq!(name.parse::<Interpolation>().unwrap(), expected);
    }

    #[test]
    fn test_unknown_interpolation_rejected() {
        assert!("bicubic".parse::<Interpolation>().is_err());
    }

    #[test]
    fn test_color_mode_channels() {
        assert_eq!(ColorMode::Color.channels(), 3);
        assert_eq!(ColorMode::Grayscale.channels(), 1);
    }
}
