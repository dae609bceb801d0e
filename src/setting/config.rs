use std::{
    fs,
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use crate::{error::Error, result::Result};

const CONFIG_FILE_NAME: &str = "config.json";

#[derive(serde::Deserialize, serde::Serialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    pub camera: CameraConfig,
    pub model: ModelConfig,
    pub volume: VolumeConfig,
    pub display: DisplayConfig,
}

#[derive(serde::Deserialize, serde::Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReadFailure {
    #[default]
    Terminate,
    Skip,
}

#[derive(serde::Deserialize, serde::Serialize, Clone, Debug, PartialEq)]
pub struct CameraConfig {
    pub index: i32,
    pub on_read_failure: ReadFailure,
}

#[derive(serde::Deserialize, serde::Serialize, Clone, Debug, PartialEq)]
pub struct ModelConfig {
    pub path: PathBuf,
    pub cuda: bool,
    pub intra_threads: usize,
    pub presence_threshold: f32,
    pub presence_is_logit: bool,
    pub hand_number: usize,
    pub draw_skeleton: bool,
}

#[derive(serde::Deserialize, serde::Serialize, Clone, Debug, PartialEq)]
pub struct VolumeConfig {
    pub level_domain: [f32; 2],
    pub level_range: [f32; 2],
    pub bar_domain: [f32; 2],
    pub bar_range: [f32; 2],
    pub percent_range: [f32; 2],
    pub use_device_range: bool,
    pub actuation_interval_ms: u64,
}

#[derive(serde::Deserialize, serde::Serialize, Clone, Debug, PartialEq)]
pub struct DisplayConfig {
    pub window_name: String,
    pub exit_key: i32,
    pub poll_delay_ms: i32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            index: 0,
            on_read_failure: ReadFailure::Terminate,
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("models").join("hand_landmark.onnx"),
            cuda: false,
            intra_threads: 4,
            presence_threshold: 0.5,
            presence_is_logit: false,
            hand_number: 0,
            draw_skeleton: true,
        }
    }
}

impl Default for VolumeConfig {
    fn default() -> Self {
        Self {
            level_domain: [50., 250.],
            level_range: [-65.25, 0.],
            bar_domain: [50., 300.],
            bar_range: [400., 150.],
            percent_range: [0., 100.],
            use_device_range: false,
            actuation_interval_ms: 0,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            window_name: "Volume".into(),
            exit_key: 27,
            poll_delay_ms: 1,
        }
    }
}

impl Config {
    /// Reads `config.json` from `dir`, writing defaults when it is missing or unreadable.
    pub fn get_from(dir: &Path) -> Result<Config> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        let config_str = match fs::read_to_string(&config_path) {
            Ok(config) => config,
            Err(err) => {
                if err.kind() == ErrorKind::NotFound {
                    tracing::info!(path = %config_path.display(), "Creating default config file");
                    return Self::upsert_new(config_path);
                }
                tracing::warn!(error = %err, "Failed to read config file, using defaults");
                return Ok(Self::default());
            }
        };

        match Self::parse(&config_str) {
            Ok(cfg) => Ok(cfg),
            Err(err) => {
                tracing::warn!(error = %err, "Invalid config file, rewriting defaults");
                Self::upsert_new(config_path)
            }
        }
    }

    pub fn parse(config_str: &str) -> Result<Config> {
        config::Config::builder()
            .add_source(config::File::from_str(config_str, config::FileFormat::Json))
            .build()
            .map_err(Error::ConfigError)?
            .try_deserialize::<Config>()
            .map_err(Error::ConfigError)
    }

    fn upsert_new(config_path: PathBuf) -> Result<Config> {
        let config = Self::default();
        Self::upsert_config_file(config_path, &config)?;
        Ok(config)
    }

    fn upsert_config_file(config_path: PathBuf, config: &Config) -> Result<()> {
        fs::File::create(config_path)
            .map_err(Error::as_unknown_error)?
            .write_all(
                serde_json::to_string_pretty(config)
                    .map_err(Error::as_unknown_error)?
                    .as_bytes(),
            )
            .map_err(Error::as_unknown_error)
    }
}

#[cfg(test)]
mod test {
    use super::{Config, ReadFailure};

    fn temp_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "gesture_volume_{}_{}",
            name,
            rand::random::<u32>()
        ));
        std::fs::create_dir_all(&dir).expect("Failed to create temp dir");
        dir
    }

    #[test]
    fn defaults_match_original_constants() {
        let config = Config::default();
        assert_eq!(config.camera.index, 0);
        assert_eq!(config.camera.on_read_failure, ReadFailure::Terminate);
        assert!(!config.model.presence_is_logit);
        assert_eq!(config.volume.level_domain, [50., 250.]);
        assert_eq!(config.volume.level_range, [-65.25, 0.]);
        assert_eq!(config.volume.bar_domain, [50., 300.]);
        assert_eq!(config.volume.bar_range, [400., 150.]);
        assert_eq!(config.volume.percent_range, [0., 100.]);
        assert_eq!(config.display.window_name, "Volume");
        assert_eq!(config.display.exit_key, 27);
        assert_eq!(config.display.poll_delay_ms, 1);
    }

    #[test]
    fn creates_default_file_when_missing() {
        let dir = temp_dir("missing");
        let config = Config::get_from(&dir).expect("Failed to get config");
        assert_eq!(config, Config::default());
        assert!(dir.join("config.json").exists());

        let reread = Config::get_from(&dir).expect("Failed to reread config");
        assert_eq!(reread, config);
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn rewrites_defaults_when_file_is_invalid() {
        let dir = temp_dir("invalid");
        std::fs::write(dir.join("config.json"), "{ not json").expect("Failed to write");
        let config = Config::get_from(&dir).expect("Failed to get config");
        assert_eq!(config, Config::default());
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn parses_custom_values() {
        let mut custom = Config::default();
        custom.camera.on_read_failure = ReadFailure::Skip;
        custom.model.hand_number = 1;
        custom.model.presence_is_logit = true;
        custom.volume.actuation_interval_ms = 100;
        let json = serde_json::to_string(&custom).expect("Failed to serialize");

        let parsed = Config::parse(&json).expect("Failed to parse");
        assert_eq!(parsed.camera.on_read_failure, ReadFailure::Skip);
        assert_eq!(parsed.model.hand_number, 1);
        assert!(parsed.model.presence_is_logit);
        assert_eq!(parsed.volume.actuation_interval_ms, 100);
    }
}
