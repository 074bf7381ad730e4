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

use std::collections::VecDeque;

use crate::keyboard::key::Key;
use crate::keyboard::types::KeyboardEvent;

/// Host notifications of software keyboard, all handlers are optional.
pub trait KeyboardDelegate {
    fn key_pressed(&mut self, _key: &Key) {}
    fn key_text(&mut self, _text: &str) {}
    fn space_pressed(&mut self) {}
    fn backspace_pressed(&mut self) {}
    fn globe_pressed(&mut self) {}
    fn return_pressed(&mut self) {}
}

/// No host is listening.
impl KeyboardDelegate for () {}

/// Input events queue to consume from the host on every frame.
#[derive(Default)]
pub struct KeyboardEvents {
    events: VecDeque<KeyboardEvent>,
}

impl KeyboardEvents {
    /// Take oldest input event.
    pub fn consume_event(&mut self) -> Option<KeyboardEvent> {
        self.events.pop_front()
    }

    /// Apply pending input events to provided text, returns `true` if Enter was pressed.
    pub fn apply(&mut self, value: &mut String) -> bool {
        let mut enter = false;
        while let Some(event) = self.consume_event() {
            match event {
                KeyboardEvent::TEXT(t) => value.push_str(t.as_str()),
                KeyboardEvent::CLEAR => {
                    value.pop();
                }
                KeyboardEvent::SPACE => value.push(' '),
                KeyboardEvent::ENTER => enter = true,
                KeyboardEvent::GLOBE => {}
            }
        }
        enter
    }
}

impl KeyboardDelegate for KeyboardEvents {
    fn key_text(&mut self, text: &str) {
        self.events.push_back(KeyboardEvent::TEXT(text.to_string()));
    }

    fn space_pressed(&mut self) {
        self.events.push_back(KeyboardEvent::SPACE);
    }

    fn backspace_pressed(&mut self) {
        self.events.push_back(KeyboardEvent::CLEAR);
    }

    fn globe_pressed(&mut self) {
        self.events.push_back(KeyboardEvent::GLOBE);
    }

    fn return_pressed(&mut self) {
        self.events.push_back(KeyboardEvent::ENTER);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_applied_to_text() {
        let mut events = KeyboardEvents::default();
        events.key_text("Hi");
        events.space_pressed();
        events.key_text("x");
        events.backspace_pressed();
        events.key_text("yo");
        let mut value = String::new();
        assert!(!events.apply(&mut value));
        assert_eq!(value, "Hi yo");
        events.return_pressed();
        assert!(events.apply(&mut value));
        assert!(events.consume_event().is_none());
    }
}
