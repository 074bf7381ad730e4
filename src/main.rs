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

#![windows_subsystem = "windows"]

pub fn main() {
    #[allow(dead_code)]
    #[cfg(not(target_os = "android"))]
    real_main();
}

#[allow(dead_code)]
#[cfg(not(target_os = "android"))]
fn real_main() {
    #[cfg(debug_assertions)]
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    use softboard::{KeyboardConfig, Settings};

    let config = Settings::keyboard_config_to_read().clone();
    let config = match config.validate() {
        Ok(_) => config,
        Err(e) => {
            log::warn!("{}, using default keyboard config", e);
            KeyboardConfig::default()
        }
    };

    let viewport = egui::ViewportBuilder::default()
        .with_min_inner_size([320.0, 480.0])
        .with_inner_size([420.0, 640.0]);
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    match softboard::start(options, config) {
        Ok(_) => {}
        Err(e) => {
            panic!("{}", e);
        }
    }
}
