use std::path::PathBuf;

pub use self::config::{
    CameraConfig, Config, DisplayConfig, ModelConfig, ReadFailure, VolumeConfig,
};

use crate::{error::Error, result::Result};

pub mod config;

#[derive(Default, Debug, Clone)]
pub struct Setting {
    pub config: Config,
    pub base_dir: PathBuf,
}

impl Setting {
    pub fn get() -> Result<Self> {
        let base_dir = std::env::current_dir().map_err(Error::as_unknown_error)?;
        Ok(Self {
            config: Config::get_from(&base_dir)?,
            base_dir,
        })
    }

    /// Model path, resolved against the working directory when relative.
    pub fn model_path(&self) -> PathBuf {
        if self.config.model.path.is_absolute() {
            return self.config.model.path.clone();
        }
        self.base_dir.join(&self.config.model.path)
    }
}

#[cfg(test)]
mod test {
    use super::Setting;

    #[test]
    fn resolves_relative_model_path_against_base_dir() {
        let setting = Setting {
            base_dir: "/opt/app".into(),
            ..Default::default()
        };
        assert_eq!(
            setting.model_path(),
            std::path::PathBuf::from("/opt/app/models/hand_landmark.onnx")
        );
    }
}
