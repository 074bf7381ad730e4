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

use std::time::Instant;

use egui::{Pos2, Rect};
use log::{debug, trace};

use crate::keyboard::delegate::KeyboardDelegate;
use crate::keyboard::layout::KeyboardSurface;
use crate::keyboard::menu::{MenuAction, MenuCommit};
use crate::keyboard::state::{self, ShiftTimerAction};
use crate::keyboard::timer::{TimerRole, TimerService};
use crate::keyboard::types::{KeyId, KeyIdentifier, KeyboardLayoutState, ShiftState, SurfaceEvent};
use crate::settings::KeyboardConfig;

/// Timers superseded by a new press or release.
const PRESS_TIMERS: [TimerRole; 3] = [
    TimerRole::BackspaceEscalate,
    TimerRole::BackspaceRepeat,
    TimerRole::KeyMenuOpen,
];

/// Software keyboard interaction controller, owns layout surfaces and drives timers,
/// layout state and key menus from surface events.
pub struct KeyboardController<D: KeyboardDelegate = ()> {
    /// Timings configuration.
    config: KeyboardConfig,
    /// Current layout state.
    state: KeyboardLayoutState,
    /// Surfaces for every layout state.
    surfaces: Vec<KeyboardSurface>,
    /// Scheduled timers.
    timers: TimerService,
    /// Host notifications receiver.
    delegate: D,

    /// Key with visible popup.
    popup_key: Option<KeyId>,
    /// Key with visible menu.
    menu_key: Option<KeyId>,
    /// Key waiting for long-press menu.
    pending_menu_key: Option<KeyId>,
    /// Key which press opened the menu, its press end is not typed.
    menu_press_key: Option<KeyId>,
    /// Flag to dismiss menu on next release without selection.
    key_menu_locked: bool,
    /// Last touch location.
    last_touch: Option<Pos2>,
}

impl<D: KeyboardDelegate> KeyboardController<D> {
    pub fn new(config: KeyboardConfig, delegate: D) -> Self {
        let state = KeyboardLayoutState::default();
        let surfaces = KeyboardLayoutState::ALL
            .iter()
            .map(|s| KeyboardSurface::new(*s))
            .collect();
        Self::with_surfaces(config, delegate, state, surfaces)
    }

    /// Create controller with provided surfaces, one for every layout state.
    pub fn with_surfaces(config: KeyboardConfig,
                         delegate: D,
                         state: KeyboardLayoutState,
                         mut surfaces: Vec<KeyboardSurface>) -> Self {
        // Every state needs a surface to attach.
        for s in KeyboardLayoutState::ALL {
            if !surfaces.iter().any(|surface| surface.state() == s) {
                surfaces.push(KeyboardSurface::from_rows(s, vec![]));
            }
        }
        for s in surfaces.iter_mut() {
            if s.state() == state {
                s.attach();
            } else {
                s.detach();
            }
        }
        Self {
            config,
            state,
            surfaces,
            timers: TimerService::default(),
            delegate,
            popup_key: None,
            menu_key: None,
            pending_menu_key: None,
            menu_press_key: None,
            key_menu_locked: false,
            last_touch: None,
        }
    }

    pub fn state(&self) -> KeyboardLayoutState {
        self.state
    }

    pub fn config(&self) -> &KeyboardConfig {
        &self.config
    }

    /// Change timings, applied to timers scheduled after the call.
    pub fn set_config(&mut self, config: KeyboardConfig) {
        self.config = config;
    }

    pub fn delegate(&self) -> &D {
        &self.delegate
    }

    pub fn delegate_mut(&mut self) -> &mut D {
        &mut self.delegate
    }

    pub fn timers(&self) -> &TimerService {
        &self.timers
    }

    /// Get attached surface.
    pub fn surface(&self) -> &KeyboardSurface {
        let state = self.state;
        self.surfaces.iter().find(|s| s.state() == state).unwrap_or(&self.surfaces[0])
    }

    /// Get attached surface to arrange its keys.
    pub fn surface_mut(&mut self) -> &mut KeyboardSurface {
        let state = self.state;
        let index = self.surfaces.iter().position(|s| s.state() == state).unwrap_or(0);
        &mut self.surfaces[index]
    }

    pub fn surfaces(&self) -> &Vec<KeyboardSurface> {
        &self.surfaces
    }

    /// Get key with visible popup.
    pub fn popup_key(&self) -> Option<KeyId> {
        self.popup_key
    }

    /// Get key with visible menu.
    pub fn menu_key(&self) -> Option<KeyId> {
        self.menu_key
    }

    pub fn key_menu_locked(&self) -> bool {
        self.key_menu_locked
    }

    /// Get frame of visible key menu.
    pub fn menu_frame(&self) -> Option<Rect> {
        let key = self.surface().key(self.menu_key?)?;
        let menu = key.menu.as_ref()?;
        Some(menu.frame_above(key.frame, self.menu_bounds()))
    }

    /// Area to keep key menu inside.
    fn menu_bounds(&self) -> Rect {
        let bounds = self.surface().bounds();
        if bounds.is_positive() {
            bounds
        } else {
            Rect::EVERYTHING
        }
    }

    /// Time when next timer should fire.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Handle event from surface of provided layout state, events of detached surfaces are
    /// dropped.
    pub fn handle_from(&mut self, source: KeyboardLayoutState, event: SurfaceEvent, now: Instant) {
        if source != self.state {
            debug!("drop {:?} from detached {:?} surface", event, source);
            return;
        }
        self.handle(event, now);
    }

    /// Handle event from attached surface.
    pub fn handle(&mut self, event: SurfaceEvent, now: Instant) {
        // Timers due before the event fire first.
        self.pump(now);
        match event {
            SurfaceEvent::KeyPressStart(id) => self.on_press_start(id, now),
            SurfaceEvent::KeyPressEnd(id) => self.on_press_end(id, now),
            SurfaceEvent::TouchesBegin(locations) | SurfaceEvent::TouchesMove(locations) => {
                self.on_touches(&locations);
            }
            SurfaceEvent::TouchesEnd(locations) => {
                self.on_touches_finish(locations.as_deref(), false, now);
            }
            SurfaceEvent::TouchesCancel(locations) => {
                self.on_touches_finish(locations.as_deref(), true, now);
            }
        }
    }

    /// Fire timers which are due at provided time.
    pub fn pump(&mut self, now: Instant) {
        while let Some((role, at)) = self.timers.pop_due(now) {
            self.on_timer(role, at);
        }
    }

    /// Reset to initial layout state.
    pub fn reset(&mut self) {
        self.timers.cancel_all(&TimerRole::ALL);
        self.pending_menu_key = None;
        self.menu_press_key = None;
        self.popup_key = None;
        self.key_menu_locked = false;
        self.last_touch = None;
        self.hide_menu();
        self.set_state(KeyboardLayoutState::default());
    }

    fn on_timer(&mut self, role: TimerRole, at: Instant) {
        trace!("{:?} fired", role);
        match role {
            TimerRole::BackspaceEscalate => {
                let interval = self.config.backspace_delete_interval();
                self.timers.schedule_repeating(TimerRole::BackspaceRepeat, interval, at);
            }
            TimerRole::BackspaceRepeat => self.delegate.backspace_pressed(),
            // Expiry only closes double-tap window.
            TimerRole::ShiftToggle => {}
            TimerRole::KeyMenuOpen => {
                if let Some(id) = self.pending_menu_key.take() {
                    self.show_menu(id);
                }
            }
        }
    }

    fn on_press_start(&mut self, id: KeyId, now: Instant) {
        if !self.surface().typing_enabled() {
            trace!("typing disabled, ignore press of {:?}", id);
            return;
        }
        self.timers.cancel_all(&PRESS_TIMERS);
        self.pending_menu_key = None;
        self.menu_press_key = None;

        let Some(key) = self.surface().key(id) else {
            return;
        };
        let backspace = key.identifier == Some(KeyIdentifier::Backspace);
        let popup = key.popup;
        let menu = key.menu.is_some();

        if backspace {
            let delay = self.config.backspace_auto_delete_mode_interval();
            self.timers.schedule_once(TimerRole::BackspaceEscalate, delay, now);
        }
        if popup {
            self.popup_key = Some(id);
            if menu {
                self.pending_menu_key = Some(id);
                let delay = self.config.key_menu_open_time_interval();
                self.timers.schedule_once(TimerRole::KeyMenuOpen, delay, now);
            }
        } else if menu {
            self.key_menu_locked = false;
            self.show_menu(id);
        }
    }

    fn on_press_end(&mut self, id: KeyId, now: Instant) {
        self.timers.cancel_all(&PRESS_TIMERS);
        self.pending_menu_key = None;
        self.popup_key = None;
        if self.menu_press_key == Some(id) {
            self.menu_press_key = None;
            return;
        }
        if !self.surface().typing_enabled() {
            trace!("typing disabled, ignore release of {:?}", id);
            return;
        }
        let Some(key) = self.surface().key(id).cloned() else {
            return;
        };
        self.delegate.key_pressed(&key);
        if let Some(text) = &key.text {
            self.enter_text(text, now);
            return;
        }
        match key.identifier {
            Some(KeyIdentifier::Backspace) => self.delegate.backspace_pressed(),
            Some(KeyIdentifier::Space) => self.delegate.space_pressed(),
            Some(KeyIdentifier::Globe) => self.delegate.globe_pressed(),
            Some(KeyIdentifier::Return) => self.delegate.return_pressed(),
            Some(identifier) => self.apply_transition(Some(identifier), now),
            None => {}
        }
    }

    fn on_touches(&mut self, locations: &[Pos2]) {
        if let Some(pos) = locations.last() {
            self.last_touch = Some(*pos);
            self.update_menu_selection(*pos);
        }
    }

    fn on_touches_finish(&mut self, locations: Option<&[Pos2]>, cancelled: bool, now: Instant) {
        self.timers.cancel_all(&PRESS_TIMERS);
        self.pending_menu_key = None;
        self.popup_key = None;
        // Gesture is over, next one starts without location.
        let last_touch = self.last_touch.take();
        let Some(menu_id) = self.menu_key else {
            return;
        };
        if let Some(pos) = locations.and_then(|l| l.last()).cloned().or(last_touch) {
            self.update_menu_selection(pos);
        }
        let commit = self.surface_mut()
            .key_mut(menu_id)
            .and_then(|k| k.menu.as_mut())
            .map(|m| m.commit())
            .unwrap_or(MenuCommit::NoSelection);
        match commit {
            MenuCommit::Selected(action) => {
                self.key_menu_locked = false;
                self.hide_menu();
                self.perform(action, now);
            }
            MenuCommit::NoSelection => {
                if self.key_menu_locked {
                    self.key_menu_locked = false;
                    self.hide_menu();
                    if cancelled {
                        self.surface_mut().set_typing_enabled(true);
                    }
                } else {
                    // Keep menu open until next release.
                    self.key_menu_locked = true;
                    self.sync_typing();
                }
            }
        }
    }

    /// Run key menu item action.
    fn perform(&mut self, action: MenuAction, now: Instant) {
        match action {
            MenuAction::Text(text) => self.enter_text(&text, now),
            MenuAction::Custom(cb) => cb(),
        }
    }

    /// Notify text input and consume single shift.
    fn enter_text(&mut self, text: &str, now: Instant) {
        self.delegate.key_text(text);
        if self.state == KeyboardLayoutState::Letters(ShiftState::Once) {
            self.apply_transition(None, now);
        }
    }

    fn apply_transition(&mut self, identifier: Option<KeyIdentifier>, now: Instant) {
        let running = self.timers.is_scheduled(TimerRole::ShiftToggle);
        let t = state::next(self.state, identifier, running);
        match t.shift_timer {
            ShiftTimerAction::Start => {
                let window = self.config.shift_toggle_interval();
                self.timers.schedule_once(TimerRole::ShiftToggle, window, now);
            }
            ShiftTimerAction::Cancel => self.timers.cancel(TimerRole::ShiftToggle),
            ShiftTimerAction::Keep => {}
        }
        self.set_state(t.state);
    }

    /// Change layout state, swapping attached surface.
    fn set_state(&mut self, state: KeyboardLayoutState) {
        if state == self.state {
            return;
        }
        debug!("layout state {:?} -> {:?}", self.state, state);
        self.timers.cancel(TimerRole::KeyMenuOpen);
        self.pending_menu_key = None;
        self.popup_key = None;
        self.key_menu_locked = false;
        self.hide_menu();
        self.surface_mut().detach();
        self.state = state;
        self.surface_mut().attach();
        self.sync_typing();
    }

    fn show_menu(&mut self, id: KeyId) {
        if self.surface().key(id).and_then(|k| k.menu.as_ref()).is_none() {
            return;
        }
        if self.menu_key.is_some_and(|k| k != id) {
            self.hide_menu();
        }
        debug!("show key menu of {:?}", id);
        self.popup_key = None;
        self.menu_key = Some(id);
        self.menu_press_key = Some(id);
        self.sync_typing();
    }

    fn hide_menu(&mut self) {
        if let Some(id) = self.menu_key.take() {
            debug!("hide key menu of {:?}", id);
            if let Some(menu) = self.surface_mut().key_mut(id).and_then(|k| k.menu.as_mut()) {
                menu.reset();
            }
        }
        self.sync_typing();
    }

    fn update_menu_selection(&mut self, pos: Pos2) {
        let Some(id) = self.menu_key else {
            return;
        };
        let bounds = self.menu_bounds();
        if let Some(key) = self.surface_mut().key_mut(id) {
            let frame = key.frame;
            if let Some(menu) = key.menu.as_mut() {
                let container = menu.frame_above(frame, bounds);
                menu.update_selection(pos, container);
            }
        }
    }

    /// Disable typing while key menu is shown or locked.
    fn sync_typing(&mut self) {
        let enabled = self.menu_key.is_none() && !self.key_menu_locked;
        self.surface_mut().set_typing_enabled(enabled);
    }
}
