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

use egui::{Context, RichText, Slider};
use log::{info, warn};

use crate::gui::views::KeyboardContent;
use crate::gui::Colors;
use crate::keyboard::{KeyboardController, KeyboardEvents};
use crate::settings::KeyboardConfig;

/// Demo application with a text line entered from software keyboard.
pub struct App {
    /// Keyboard interaction controller.
    controller: KeyboardController<KeyboardEvents>,
    /// Keyboard content.
    keyboard: KeyboardContent,
    /// Current input.
    input: String,
    /// Lines submitted with Enter.
    lines: Vec<String>,
}

impl App {
    pub fn new(config: KeyboardConfig) -> Self {
        Self {
            controller: KeyboardController::new(config, KeyboardEvents::default()),
            keyboard: KeyboardContent::default(),
            input: String::new(),
            lines: vec![],
        }
    }

    /// Apply keyboard events to the input.
    fn on_input(&mut self) {
        let enter = self.controller.delegate_mut().apply(&mut self.input);
        if enter {
            let line = std::mem::take(&mut self.input);
            info!("entered: {}", line);
            self.lines.push(line);
            self.controller.reset();
        }
    }

    /// Draw timings setup, changes are applied to the keyboard and saved.
    fn timings_ui(&mut self, ui: &mut egui::Ui) {
        let config = self.controller.config();
        let mut shift = config.shift_toggle_interval().as_secs_f64();
        let mut menu = config.key_menu_open_time_interval().as_secs_f64();
        ui.collapsing("Timings", |ui| {
            let shift_slider = Slider::new(&mut shift, 0.1..=2.0).text("Shift double tap, s");
            if ui.add(shift_slider).changed() {
                let d = Duration::from_secs_f64(shift);
                let mut config = self.controller.config().clone();
                config.set_shift_toggle_interval(d);
                self.controller.set_config(config);
                if let Err(e) = KeyboardConfig::save_shift_toggle_interval(d) {
                    warn!("{}", e);
                }
            }
            let menu_slider = Slider::new(&mut menu, 0.2..=3.0).text("Key menu delay, s");
            if ui.add(menu_slider).changed() {
                let d = Duration::from_secs_f64(menu);
                let mut config = self.controller.config().clone();
                config.set_key_menu_open_time_interval(d);
                self.controller.set_config(config);
                if let Err(e) = KeyboardConfig::save_key_menu_open_time_interval(d) {
                    warn!("{}", e);
                }
            }
        });
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &Context, _: &mut eframe::Frame) {
        egui::TopBottomPanel::bottom("soft_keyboard_panel")
            .resizable(false)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    self.keyboard.ui(ui, &mut self.controller);
                });
            });
        self.on_input();

        egui::CentralPanel::default().show(ctx, |ui| {
            for line in &self.lines {
                ui.label(RichText::new(line).size(16.0).color(Colors::INACTIVE_TEXT));
            }
            ui.add_space(8.0);
            ui.label(RichText::new(format!("{}|", self.input)).size(22.0).color(Colors::TEXT));
            ui.add_space(8.0);
            ui.label(RichText::new(format!("{:?}", self.controller.state()))
                .size(14.0)
                .color(Colors::INACTIVE_TEXT));
            ui.add_space(8.0);
            self.timings_ui(ui);
        });
    }
}
