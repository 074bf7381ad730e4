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

use std::time::Duration;

use serde_derive::{Deserialize, Serialize};

use crate::settings::{ConfigError, Settings};

/// Software keyboard timings configuration, stored at toml file.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct KeyboardConfig {
    /// Window to press shift second time to enable caps lock in milliseconds.
    shift_toggle_interval: u64,
    /// Interval between deletions at auto-delete mode in milliseconds.
    backspace_delete_interval: u64,
    /// Backspace hold time to start auto-delete mode in milliseconds.
    backspace_auto_delete_mode_interval: u64,
    /// Key hold time to show key menu in milliseconds.
    key_menu_open_time_interval: u64,
}

const DEFAULT_SHIFT_TOGGLE_INTERVAL: u64 = 500;
const DEFAULT_BACKSPACE_DELETE_INTERVAL: u64 = 100;
const DEFAULT_BACKSPACE_AUTO_DELETE_MODE_INTERVAL: u64 = 500;
const DEFAULT_KEY_MENU_OPEN_TIME_INTERVAL: u64 = 1000;

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            shift_toggle_interval: DEFAULT_SHIFT_TOGGLE_INTERVAL,
            backspace_delete_interval: DEFAULT_BACKSPACE_DELETE_INTERVAL,
            backspace_auto_delete_mode_interval: DEFAULT_BACKSPACE_AUTO_DELETE_MODE_INTERVAL,
            key_menu_open_time_interval: DEFAULT_KEY_MENU_OPEN_TIME_INTERVAL,
        }
    }
}

impl KeyboardConfig {
    /// Keyboard configuration file name.
    pub const FILE_NAME: &'static str = "keyboard.toml";

    /// Create configuration from provided intervals.
    pub fn new(shift_toggle: Duration,
               backspace_delete: Duration,
               backspace_auto_delete_mode: Duration,
               key_menu_open_time: Duration) -> Self {
        Self {
            shift_toggle_interval: millis(shift_toggle),
            backspace_delete_interval: millis(backspace_delete),
            backspace_auto_delete_mode_interval: millis(backspace_auto_delete_mode),
            key_menu_open_time_interval: millis(key_menu_open_time),
        }
    }

    /// Check intervals to be usable by timers.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backspace_delete_interval == 0 {
            return Err(ConfigError::InvalidInterval("backspace_delete_interval".to_string()));
        }
        Ok(())
    }

    /// Save configuration to the file.
    pub fn save(&self) -> Result<(), ConfigError> {
        Settings::write_to_file(self, Settings::get_config_path(Self::FILE_NAME, None))
    }

    pub fn shift_toggle_interval(&self) -> Duration {
        Duration::from_millis(self.shift_toggle_interval)
    }

    pub fn backspace_delete_interval(&self) -> Duration {
        Duration::from_millis(self.backspace_delete_interval)
    }

    pub fn backspace_auto_delete_mode_interval(&self) -> Duration {
        Duration::from_millis(self.backspace_auto_delete_mode_interval)
    }

    pub fn key_menu_open_time_interval(&self) -> Duration {
        Duration::from_millis(self.key_menu_open_time_interval)
    }

    pub fn set_shift_toggle_interval(&mut self, d: Duration) {
        self.shift_toggle_interval = millis(d);
    }

    pub fn set_key_menu_open_time_interval(&mut self, d: Duration) {
        self.key_menu_open_time_interval = millis(d);
    }

    /// Save shift double-tap window.
    pub fn save_shift_toggle_interval(d: Duration) -> Result<(), ConfigError> {
        let mut w_config = Settings::keyboard_config_to_update();
        w_config.set_shift_toggle_interval(d);
        w_config.save()
    }

    /// Save key menu long-press delay.
    pub fn save_key_menu_open_time_interval(d: Duration) -> Result<(), ConfigError> {
        let mut w_config = Settings::keyboard_config_to_update();
        w_config.set_key_menu_open_time_interval(d);
        w_config.save()
    }
}

/// Largest interval in milliseconds which can be stored as toml integer.
const MAX_MILLIS: u64 = i64::MAX as u64;

/// Convert duration to stored milliseconds, saturating at [`MAX_MILLIS`].
fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX).min(MAX_MILLIS)
}
