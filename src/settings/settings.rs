// Copyright 2023 The Grim Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use lazy_static::lazy_static;
use log::warn;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::settings::KeyboardConfig;

lazy_static! {
    /// Static settings state to be accessible globally.
    static ref SETTINGS_STATE: Arc<Settings> = Arc::new(Settings::init());
}

/// Main application directory name.
const MAIN_DIR_NAME: &'static str = ".softboard";

/// Configuration loading and saving error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error at {0}: {1}")]
    Io(String, std::io::Error),
    #[error("Parse error at {0}: {1}")]
    Parse(String, String),
    #[error("Serialization error: {0}")]
    Serialize(String),
    #[error("Invalid interval: {0}")]
    InvalidInterval(String),
}

/// Contains initialized configurations.
pub struct Settings {
    /// Software keyboard configuration.
    keyboard_config: Arc<RwLock<KeyboardConfig>>,
}

impl Settings {
    /// Initialize settings with keyboard config.
    fn init() -> Self {
        let path = Settings::get_config_path(KeyboardConfig::FILE_NAME, None);
        let keyboard_config = Self::init_config::<KeyboardConfig>(path);
        Self {
            keyboard_config: Arc::new(RwLock::new(keyboard_config)),
        }
    }

    /// Initialize configuration from provided file path or set [`Default`] if file not exists
    /// or can not be parsed.
    pub fn init_config<T: Default + Serialize + DeserializeOwned>(path: PathBuf) -> T {
        match Self::read_from_file::<T>(path.clone()) {
            Ok(config) => config,
            Err(e) => {
                if path.exists() {
                    warn!("{}, using default config", e);
                }
                let default_config = T::default();
                if let Err(e) = Settings::write_to_file(&default_config, path) {
                    warn!("{}", e);
                }
                default_config
            }
        }
    }

    /// Get keyboard configuration to read values.
    pub fn keyboard_config_to_read() -> RwLockReadGuard<'static, KeyboardConfig> {
        SETTINGS_STATE.keyboard_config.read()
    }

    /// Get keyboard configuration to update values.
    pub fn keyboard_config_to_update() -> RwLockWriteGuard<'static, KeyboardConfig> {
        SETTINGS_STATE.keyboard_config.write()
    }

    /// Get base directory path for configuration.
    pub fn get_base_path(sub_dir: Option<String>) -> PathBuf {
        let mut path = dirs::home_dir().unwrap_or_default();
        path.push(MAIN_DIR_NAME);
        if let Some(sub_dir) = sub_dir {
            path.push(sub_dir);
        }
        // Create if the default path doesn't exist.
        if !path.exists() {
            let _ = fs::create_dir_all(path.clone());
        }
        path
    }

    /// Get configuration file path from provided name and sub-directory if needed.
    pub fn get_config_path(config_name: &str, sub_dir: Option<String>) -> PathBuf {
        let mut settings_path = Self::get_base_path(sub_dir);
        settings_path.push(config_name);
        settings_path
    }

    /// Read configuration from the file.
    pub fn read_from_file<T: DeserializeOwned>(config_path: PathBuf) -> Result<T, ConfigError> {
        let path = config_path.to_string_lossy().to_string();
        let file_content = fs::read_to_string(&config_path)
            .map_err(|e| ConfigError::Io(path.clone(), e))?;
        toml::from_str::<T>(file_content.as_str())
            .map_err(|e| ConfigError::Parse(path, format!("{}", e)))
    }

    /// Write configuration to the file.
    pub fn write_to_file<T: Serialize>(config: &T, path: PathBuf) -> Result<(), ConfigError> {
        let conf_out = toml::to_string(config)
            .map_err(|e| ConfigError::Serialize(format!("{}", e)))?;
        let p = path.to_string_lossy().to_string();
        let mut file = File::create(&path).map_err(|e| ConfigError::Io(p.clone(), e))?;
        file.write_all(conf_out.as_bytes()).map_err(|e| ConfigError::Io(p, e))
    }
}
