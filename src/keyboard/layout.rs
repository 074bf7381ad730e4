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

use egui::{Pos2, Rect, Vec2};

use crate::keyboard::key::Key;
use crate::keyboard::menu::KeyMenu;
use crate::keyboard::types::{KeyId, KeyIdentifier, KeyboardLayoutState, ShiftState};

pub const SHIFT_OFF: &str = "⇧";
pub const SHIFT_ONCE: &str = "⬆";
pub const SHIFT_ON: &str = "⇪";
pub const BACKSPACE: &str = "⌫";
pub const KEY_RETURN: &str = "⏎";
pub const GLOBE: &str = "🌐";

/// Keys of a single layout state which can be attached to the keyboard.
pub struct KeyboardSurface {
    /// Layout state this surface is shown at.
    state: KeyboardLayoutState,
    /// Rows of keys.
    rows: Vec<Vec<Key>>,
    /// Flag to accept key presses.
    typing_enabled: bool,
    /// Flag to check if surface is the current event source.
    attached: bool,
    /// Area occupied by keys.
    bounds: Rect,
}

impl KeyboardSurface {
    /// Create surface with static keys for provided layout state.
    pub fn new(state: KeyboardLayoutState) -> Self {
        Self::from_rows(state, layout_rows(state))
    }

    /// Create surface from provided keys.
    pub fn from_rows(state: KeyboardLayoutState, rows: Vec<Vec<Key>>) -> Self {
        Self {
            state,
            rows,
            typing_enabled: true,
            attached: false,
            bounds: Rect::NOTHING,
        }
    }

    pub fn state(&self) -> KeyboardLayoutState {
        self.state
    }

    pub fn rows(&self) -> &Vec<Vec<Key>> {
        &self.rows
    }

    pub fn key(&self, id: KeyId) -> Option<&Key> {
        self.rows.get(id.row).and_then(|r| r.get(id.column))
    }

    pub fn key_mut(&mut self, id: KeyId) -> Option<&mut Key> {
        self.rows.get_mut(id.row).and_then(|r| r.get_mut(id.column))
    }

    /// Find key with provided identifier.
    pub fn find(&self, identifier: KeyIdentifier) -> Option<KeyId> {
        self.key_ids().into_iter().find(|id| {
            self.key(*id).and_then(|k| k.identifier) == Some(identifier)
        })
    }

    /// Find key with provided label.
    pub fn find_label(&self, label: &str) -> Option<KeyId> {
        self.key_ids().into_iter().find(|id| {
            self.key(*id).map(|k| k.label.as_str()) == Some(label)
        })
    }

    /// Get all key positions.
    pub fn key_ids(&self) -> Vec<KeyId> {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            (0..row.len()).map(move |c| KeyId::new(r, c))
        }).collect()
    }

    /// Find key under provided position.
    pub fn key_at(&self, pos: Pos2) -> Option<KeyId> {
        self.key_ids().into_iter().find(|id| {
            self.key(*id).map(|k| k.frame.contains(pos)).unwrap_or(false)
        })
    }

    pub fn typing_enabled(&self) -> bool {
        self.typing_enabled
    }

    pub fn set_typing_enabled(&mut self, enabled: bool) {
        self.typing_enabled = enabled;
    }

    pub fn attached(&self) -> bool {
        self.attached
    }

    pub(crate) fn attach(&mut self) {
        self.attached = true;
    }

    /// Stop being an event source.
    pub(crate) fn detach(&mut self) {
        self.attached = false;
        self.typing_enabled = true;
    }

    /// Area occupied by keys after [`KeyboardSurface::arrange`].
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Setup key frames inside provided area.
    pub fn arrange(&mut self, rect: Rect) {
        self.bounds = rect;
        if self.rows.is_empty() {
            return;
        }
        // Widest row without stretched keys defines key width.
        let widest = self.rows
            .iter()
            .map(|row| row.iter().map(|k| k.width).sum::<f32>())
            .fold(0.0, f32::max)
            .max(1.0);
        let unit = rect.width() / widest;
        let row_height = rect.height() / self.rows.len() as f32;
        for (r, row) in self.rows.iter_mut().enumerate() {
            let fixed = row.iter().map(|k| k.width).sum::<f32>() * unit;
            let stretched = row.iter().filter(|k| k.width == 0.0).count();
            let stretch_width = if stretched == 0 {
                0.0
            } else {
                (rect.width() - fixed).max(0.0) / stretched as f32
            };
            let mut x = if stretched == 0 {
                rect.min.x + (rect.width() - fixed) / 2.0
            } else {
                rect.min.x
            };
            let y = rect.min.y + row_height * r as f32;
            for key in row.iter_mut() {
                let w = if key.width == 0.0 { stretch_width } else { key.width * unit };
                key.frame = Rect::from_min_size(Pos2::new(x, y), Vec2::new(w, row_height));
                x += w;
            }
        }
    }
}

/// Create character keys from labels.
fn characters(labels: &[&str], uppercase: bool) -> Vec<Key> {
    labels.iter().map(|l| {
        let s = if uppercase { l.to_uppercase() } else { l.to_string() };
        let mut key = Key::character(&s);
        if let Some(accents) = accents(l) {
            let accents: Vec<String> = accents.iter().map(|a| {
                if uppercase { a.to_uppercase() } else { a.to_string() }
            }).collect();
            let labels: Vec<&str> = accents.iter().map(|a| a.as_str()).collect();
            key = key.menu(KeyMenu::from_labels(&labels));
        }
        key
    }).collect()
}

/// Get accented alternatives of a letter.
fn accents(letter: &str) -> Option<&'static [&'static str]> {
    match letter {
        "a" => Some(&["à", "á", "â", "ä"][..]),
        "e" => Some(&["è", "é", "ê", "ë"][..]),
        "i" => Some(&["ì", "í", "î", "ï"][..]),
        "o" => Some(&["ò", "ó", "ô", "ö"][..]),
        "u" => Some(&["ù", "ú", "û", "ü"][..]),
        "c" => Some(&["ç", "ć", "č"][..]),
        "n" => Some(&["ñ", "ń"][..]),
        "$" => Some(&["€", "£", "¥", "¢"][..]),
        _ => None
    }
}

/// Bottom row shared by all layouts.
fn bottom_row(switch_label: &str, switch: KeyIdentifier) -> Vec<Key> {
    vec![
        Key::special(switch_label, switch, 1.5),
        Key::special(GLOBE, KeyIdentifier::Globe, 1.0),
        Key::special(" ", KeyIdentifier::Space, 0.0),
        Key::special(KEY_RETURN, KeyIdentifier::Return, 2.0),
    ]
}

/// Get static keys for provided layout state.
pub fn layout_rows(state: KeyboardLayoutState) -> Vec<Vec<Key>> {
    match state {
        KeyboardLayoutState::Letters(shift) => {
            let uppercase = state.uppercase();
            let shift_key = match shift {
                ShiftState::Off => Key::special(SHIFT_OFF, KeyIdentifier::ShiftOff, 1.5),
                ShiftState::Once => Key::special(SHIFT_ONCE, KeyIdentifier::ShiftOnce, 1.5),
                ShiftState::On => Key::special(SHIFT_ON, KeyIdentifier::ShiftOn, 1.5),
            };
            let mut row_3 = vec![shift_key];
            row_3.extend(characters(&["z", "x", "c", "v", "b", "n", "m"], uppercase));
            row_3.push(Key::special(BACKSPACE, KeyIdentifier::Backspace, 1.5));
            vec![
                characters(&["q", "w", "e", "r", "t", "y", "u", "i", "o", "p"], uppercase),
                characters(&["a", "s", "d", "f", "g", "h", "j", "k", "l"], uppercase),
                row_3,
                bottom_row("123", KeyIdentifier::Numbers),
            ]
        }
        KeyboardLayoutState::Numbers => {
            let mut row_3 = vec![Key::special("#+=", KeyIdentifier::Symbols, 1.5)];
            row_3.extend(characters(&[".", ",", "?", "!", "'"], false));
            row_3.push(Key::special(BACKSPACE, KeyIdentifier::Backspace, 1.5));
            vec![
                characters(&["1", "2", "3", "4", "5", "6", "7", "8", "9", "0"], false),
                characters(&["-", "/", ":", ";", "(", ")", "$", "&", "@", "\""], false),
                row_3,
                bottom_row("ABC", KeyIdentifier::Letters),
            ]
        }
        KeyboardLayoutState::Symbols => {
            let mut row_3 = vec![Key::special("123", KeyIdentifier::Numbers, 1.5)];
            // Menu is shown right on press without preview.
            row_3.push(Key::character(".")
                .popup(false)
                .menu(KeyMenu::from_labels(&[".", "…", "·"])));
            row_3.extend(characters(&[",", "?", "!", "'"], false));
            row_3.push(Key::special(BACKSPACE, KeyIdentifier::Backspace, 1.5));
            vec![
                characters(&["[", "]", "{", "}", "#", "%", "^", "*", "+", "="], false),
                characters(&["_", "\\", "|", "~", "<", ">", "№", "√", "π", "•"], false),
                row_3,
                bottom_row("ABC", KeyIdentifier::Letters),
            ]
        }
    }
}
