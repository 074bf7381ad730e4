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

use std::fmt;
use std::sync::Arc;

use egui::{Pos2, Rect, Vec2};

/// Action of key menu item.
#[derive(Clone)]
pub enum MenuAction {
    /// Enter provided text.
    Text(String),
    /// Run custom callback.
    Custom(Arc<dyn Fn() + Send + Sync>),
}

impl fmt::Debug for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuAction::Text(t) => write!(f, "Text({:?})", t),
            MenuAction::Custom(_) => write!(f, "Custom"),
        }
    }
}

/// Key menu item.
#[derive(Clone, Debug)]
pub struct KeyMenuItem {
    pub label: String,
    pub action: MenuAction,
}

impl KeyMenuItem {
    /// Create item entering its label.
    pub fn text(label: &str) -> Self {
        Self { label: label.to_string(), action: MenuAction::Text(label.to_string()) }
    }

    pub fn custom(label: &str, cb: impl Fn() + Send + Sync + 'static) -> Self {
        Self { label: label.to_string(), action: MenuAction::Custom(Arc::new(cb)) }
    }
}

/// Result of key menu commit.
#[derive(Clone, Debug)]
pub enum MenuCommit {
    /// Item was selected, menu should be closed.
    Selected(MenuAction),
    /// Nothing was selected at release.
    NoSelection,
}

/// Long-press menu of alternative key values.
#[derive(Clone, Debug)]
pub struct KeyMenu {
    items: Vec<KeyMenuItem>,
    selected: Option<usize>,
}

impl KeyMenu {
    pub fn new(items: Vec<KeyMenuItem>) -> Self {
        Self { items, selected: None }
    }

    /// Create menu from labels entering their text.
    pub fn from_labels(labels: &[&str]) -> Self {
        Self::new(labels.iter().map(|l| KeyMenuItem::text(l)).collect())
    }

    pub fn items(&self) -> &Vec<KeyMenuItem> {
        &self.items
    }

    /// Get selected item index.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Clear selection.
    pub fn reset(&mut self) {
        self.selected = None;
    }

    /// Calculate menu frame placed above provided key frame with items of key width,
    /// not going beyond left and right bounds.
    pub fn frame_above(&self, key_frame: Rect, bounds: Rect) -> Rect {
        let size = Vec2::new(key_frame.width() * self.items.len() as f32, key_frame.height());
        let mut min_x = key_frame.center().x - size.x / 2.0;
        if min_x + size.x > bounds.max.x {
            min_x = bounds.max.x - size.x;
        }
        min_x = min_x.max(bounds.min.x);
        Rect::from_min_size(Pos2::new(min_x, key_frame.min.y - size.y), size)
    }

    /// Get item frame inside menu container frame.
    pub fn item_frame(&self, index: usize, container: Rect) -> Rect {
        let width = container.width() / self.items.len().max(1) as f32;
        let min = Pos2::new(container.min.x + width * index as f32, container.min.y);
        Rect::from_min_size(min, Vec2::new(width, container.height()))
    }

    /// Update selected item from pointer position inside menu container frame.
    pub fn update_selection(&mut self, pointer: Pos2, container: Rect) -> Option<usize> {
        self.selected = if self.items.is_empty() || !container.contains(pointer) {
            None
        } else {
            let width = container.width() / self.items.len() as f32;
            let index = ((pointer.x - container.min.x) / width).floor() as usize;
            Some(index.min(self.items.len() - 1))
        };
        self.selected
    }

    /// Consume selection, returning selected item action.
    pub fn commit(&mut self) -> MenuCommit {
        match self.selected.take().and_then(|i| self.items.get(i)) {
            Some(item) => MenuCommit::Selected(item.action.clone()),
            None => MenuCommit::NoSelection,
        }
    }
}
