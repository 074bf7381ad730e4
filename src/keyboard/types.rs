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

use egui::Pos2;

/// Shift sub-state of letters layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShiftState {
    /// Uppercase for the next character only.
    Once,
    /// Lowercase.
    Off,
    /// Caps lock.
    On,
}

/// Software keyboard layout state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyboardLayoutState {
    Letters(ShiftState),
    Numbers,
    Symbols,
}

impl Default for KeyboardLayoutState {
    fn default() -> Self {
        KeyboardLayoutState::Letters(ShiftState::Once)
    }
}

impl KeyboardLayoutState {
    /// All layout states, every one of them has its own surface.
    pub const ALL: [KeyboardLayoutState; 5] = [
        KeyboardLayoutState::Letters(ShiftState::Once),
        KeyboardLayoutState::Letters(ShiftState::Off),
        KeyboardLayoutState::Letters(ShiftState::On),
        KeyboardLayoutState::Numbers,
        KeyboardLayoutState::Symbols,
    ];

    /// Check if letters are entered in uppercase.
    pub fn uppercase(&self) -> bool {
        matches!(self, KeyboardLayoutState::Letters(ShiftState::Once)
            | KeyboardLayoutState::Letters(ShiftState::On))
    }
}

/// Role of a special key, ordinary character keys have no identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyIdentifier {
    Backspace,
    Space,
    Globe,
    Return,
    Letters,
    Numbers,
    Symbols,
    ShiftOff,
    ShiftOnce,
    ShiftOn,
}

/// Key position at the surface: row and column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyId {
    pub row: usize,
    pub column: usize,
}

impl KeyId {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// Event produced by the layout surface.
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceEvent {
    KeyPressStart(KeyId),
    KeyPressEnd(KeyId),
    TouchesBegin(Vec<Pos2>),
    TouchesMove(Vec<Pos2>),
    TouchesEnd(Option<Vec<Pos2>>),
    TouchesCancel(Option<Vec<Pos2>>),
}

/// Software keyboard input event for the host.
#[derive(Clone, Debug, PartialEq)]
pub enum KeyboardEvent {
    TEXT(String), CLEAR, SPACE, GLOBE, ENTER
}
