// Copyright 2025 The Grim Developers
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

use egui::Rect;

use crate::keyboard::menu::KeyMenu;
use crate::keyboard::types::KeyIdentifier;

/// Pressable keyboard key.
#[derive(Clone, Debug)]
pub struct Key {
    /// Label to draw.
    pub label: String,
    /// Text to enter on press.
    pub text: Option<String>,
    /// Special key role.
    pub identifier: Option<KeyIdentifier>,
    /// Show enlarged preview on press.
    pub popup: bool,
    /// Long-press menu.
    pub menu: Option<KeyMenu>,
    /// Width relative to ordinary key, `0.0` to take remaining row space.
    pub width: f32,
    /// Frame at the surface, set on layout.
    pub frame: Rect,
}

impl Key {
    /// Create character key entering its label.
    pub fn character(s: &str) -> Self {
        Self {
            label: s.to_string(),
            text: Some(s.to_string()),
            identifier: None,
            popup: true,
            menu: None,
            width: 1.0,
            frame: Rect::NOTHING,
        }
    }

    /// Create special key.
    pub fn special(label: &str, identifier: KeyIdentifier, width: f32) -> Self {
        Self {
            label: label.to_string(),
            text: None,
            identifier: Some(identifier),
            popup: false,
            menu: None,
            width,
            frame: Rect::NOTHING,
        }
    }

    /// Attach long-press menu.
    pub fn menu(mut self, menu: KeyMenu) -> Self {
        self.menu = Some(menu);
        self
    }

    /// Setup popup preview.
    pub fn popup(mut self, popup: bool) -> Self {
        self.popup = popup;
        self
    }
}
