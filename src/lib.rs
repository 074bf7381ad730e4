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

pub use settings::{ConfigError, KeyboardConfig, Settings};

mod settings;
pub mod keyboard;
pub mod gui;

/// Entry point to start ui with [`eframe`].
#[cfg(not(target_os = "android"))]
pub fn start(options: eframe::NativeOptions, config: KeyboardConfig) -> eframe::Result<()> {
    eframe::run_native("Softboard", options, Box::new(|cc| {
        setup_visuals(&cc.egui_ctx);
        Ok(Box::new(gui::App::new(config)))
    }))
}

/// Setup application [`egui::Style`] and [`egui::Visuals`].
pub fn setup_visuals(ctx: &egui::Context) {
    ctx.set_visuals(egui::Visuals::light());
    let mut style = (*ctx.style()).clone();
    // Setup selection.
    style.interaction.selectable_labels = false;
    // Disable spacing between items.
    style.spacing.item_spacing = egui::vec2(0.0, 0.0);
    ctx.set_style(style);
}
