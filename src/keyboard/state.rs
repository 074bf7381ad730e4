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

use crate::keyboard::types::{KeyIdentifier, KeyboardLayoutState, ShiftState};

/// What to do with shift double-tap timer after transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShiftTimerAction {
    Keep,
    Start,
    Cancel,
}

/// Result of layout state transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub state: KeyboardLayoutState,
    pub shift_timer: ShiftTimerAction,
}

impl Transition {
    fn to(state: KeyboardLayoutState) -> Self {
        Self { state, shift_timer: ShiftTimerAction::Keep }
    }

    fn with_timer(state: KeyboardLayoutState, shift_timer: ShiftTimerAction) -> Self {
        Self { state, shift_timer }
    }
}

/// Get next layout state after key press, `None` identifier means ordinary key.
pub fn next(state: KeyboardLayoutState,
            identifier: Option<KeyIdentifier>,
            shift_timer_running: bool) -> Transition {
    use KeyboardLayoutState::*;
    let Some(identifier) = identifier else {
        // Shift is consumed by one character.
        return if state == Letters(ShiftState::Once) {
            Transition::to(Letters(ShiftState::Off))
        } else {
            Transition::to(state)
        };
    };
    match identifier {
        KeyIdentifier::Letters => Transition::to(Letters(ShiftState::Off)),
        KeyIdentifier::Numbers => Transition::to(Numbers),
        KeyIdentifier::Symbols => Transition::to(Symbols),
        KeyIdentifier::ShiftOff => if shift_timer_running {
            Transition::with_timer(Letters(ShiftState::On), ShiftTimerAction::Cancel)
        } else {
            Transition::with_timer(Letters(ShiftState::Once), ShiftTimerAction::Start)
        },
        KeyIdentifier::ShiftOnce => if shift_timer_running {
            Transition::with_timer(Letters(ShiftState::On), ShiftTimerAction::Cancel)
        } else {
            Transition::with_timer(Letters(ShiftState::Off), ShiftTimerAction::Start)
        },
        KeyIdentifier::ShiftOn => if shift_timer_running {
            Transition::to(state)
        } else {
            Transition::to(Letters(ShiftState::Off))
        },
        KeyIdentifier::Backspace
        | KeyIdentifier::Space
        | KeyIdentifier::Globe
        | KeyIdentifier::Return => Transition::to(state),
    }
}
