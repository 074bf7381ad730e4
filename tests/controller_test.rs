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

use std::time::{Duration, Instant};

use egui::{Pos2, Rect, Vec2};
use softboard::keyboard::{Key, KeyId, KeyIdentifier, KeyboardController, KeyboardDelegate,
                          KeyboardLayoutState, ShiftState, SurfaceEvent};
use softboard::keyboard::timer::TimerRole;
use softboard::KeyboardConfig;

#[derive(Default)]
struct Recorder {
    events: Vec<String>,
}

impl Recorder {
    fn count(&self, name: &str) -> usize {
        self.events.iter().filter(|e| e.as_str() == name).count()
    }

    fn texts(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|e| e.strip_prefix("text:").map(|t| t.to_string()))
            .collect()
    }
}

impl KeyboardDelegate for Recorder {
    fn key_pressed(&mut self, key: &Key) {
        self.events.push(format!("key:{}", key.label));
    }

    fn key_text(&mut self, text: &str) {
        self.events.push(format!("text:{}", text));
    }

    fn space_pressed(&mut self) {
        self.events.push("space".to_string());
    }

    fn backspace_pressed(&mut self) {
        self.events.push("backspace".to_string());
    }

    fn globe_pressed(&mut self) {
        self.events.push("globe".to_string());
    }

    fn return_pressed(&mut self) {
        self.events.push("return".to_string());
    }
}

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn keyboard() -> KeyboardController<Recorder> {
    let mut c = KeyboardController::new(KeyboardConfig::default(), Recorder::default());
    arrange(&mut c);
    c
}

fn arrange(c: &mut KeyboardController<Recorder>) {
    let rect = Rect::from_min_size(Pos2::new(0.0, 200.0), Vec2::new(400.0, 200.0));
    c.surface_mut().arrange(rect);
}

fn label(c: &KeyboardController<Recorder>, label: &str) -> KeyId {
    c.surface().find_label(label).unwrap()
}

fn special(c: &KeyboardController<Recorder>, id: KeyIdentifier) -> KeyId {
    c.surface().find(id).unwrap()
}

fn tap(c: &mut KeyboardController<Recorder>, id: KeyId, at: Instant) {
    c.handle(SurfaceEvent::KeyPressStart(id), at);
    c.handle(SurfaceEvent::KeyPressEnd(id), at);
    arrange(c);
}

fn key_center(c: &KeyboardController<Recorder>, id: KeyId) -> Pos2 {
    c.surface().key(id).unwrap().frame.center()
}

/// Center of menu item of visible key menu.
fn menu_item(c: &KeyboardController<Recorder>, index: usize) -> Pos2 {
    let frame = c.menu_frame().unwrap();
    let menu = c.surface().key(c.menu_key().unwrap()).unwrap().menu.as_ref().unwrap();
    menu.item_frame(index, frame).center()
}

fn attached(c: &KeyboardController<Recorder>) -> Vec<KeyboardLayoutState> {
    c.surfaces().iter().filter(|s| s.attached()).map(|s| s.state()).collect()
}

#[test]
fn starts_with_single_shift() {
    let c = keyboard();
    assert_eq!(c.state(), KeyboardLayoutState::Letters(ShiftState::Once));
    assert_eq!(attached(&c), vec![KeyboardLayoutState::Letters(ShiftState::Once)]);
    assert!(c.surface().typing_enabled());
}

#[test]
fn character_consumes_single_shift() {
    let t = Instant::now();
    let mut c = keyboard();
    let q = label(&c, "Q");
    tap(&mut c, q, t);
    assert_eq!(c.delegate().events, vec!["key:Q", "text:Q"]);
    assert_eq!(c.state(), KeyboardLayoutState::Letters(ShiftState::Off));
    assert_eq!(attached(&c), vec![KeyboardLayoutState::Letters(ShiftState::Off)]);

    let w = label(&c, "w");
    tap(&mut c, w, t + ms(100));
    assert_eq!(c.delegate().texts(), vec!["Q", "w"]);
    assert_eq!(c.state(), KeyboardLayoutState::Letters(ShiftState::Off));
}

#[test]
fn shift_double_tap_enables_caps_lock() {
    let t = Instant::now();
    let mut c = keyboard();
    let q = label(&c, "Q");
    tap(&mut c, q, t);

    let shift = special(&c, KeyIdentifier::ShiftOff);
    tap(&mut c, shift, t + ms(1000));
    assert_eq!(c.state(), KeyboardLayoutState::Letters(ShiftState::Once));
    assert!(c.timers().is_scheduled(TimerRole::ShiftToggle));

    let shift = special(&c, KeyIdentifier::ShiftOnce);
    tap(&mut c, shift, t + ms(1300));
    assert_eq!(c.state(), KeyboardLayoutState::Letters(ShiftState::On));
    assert!(!c.timers().is_scheduled(TimerRole::ShiftToggle));

    // Caps lock stays after typing.
    let a = label(&c, "A");
    tap(&mut c, a, t + ms(2000));
    assert_eq!(c.state(), KeyboardLayoutState::Letters(ShiftState::On));

    let shift = special(&c, KeyIdentifier::ShiftOn);
    tap(&mut c, shift, t + ms(2500));
    assert_eq!(c.state(), KeyboardLayoutState::Letters(ShiftState::Off));
}

#[test]
fn shift_taps_outside_window_do_not_lock() {
    let t = Instant::now();
    let mut c = keyboard();
    let q = label(&c, "Q");
    tap(&mut c, q, t);

    let shift = special(&c, KeyIdentifier::ShiftOff);
    tap(&mut c, shift, t + ms(100));
    assert_eq!(c.state(), KeyboardLayoutState::Letters(ShiftState::Once));

    c.pump(t + ms(700));
    assert!(!c.timers().is_scheduled(TimerRole::ShiftToggle));

    let shift = special(&c, KeyIdentifier::ShiftOnce);
    tap(&mut c, shift, t + ms(800));
    assert_eq!(c.state(), KeyboardLayoutState::Letters(ShiftState::Off));
    assert!(c.timers().is_scheduled(TimerRole::ShiftToggle));
}

#[test]
fn typing_keeps_shift_double_tap_window() {
    let t = Instant::now();
    let mut c = keyboard();
    let q = label(&c, "Q");
    tap(&mut c, q, t);

    let shift = special(&c, KeyIdentifier::ShiftOff);
    tap(&mut c, shift, t + ms(1000));
    assert_eq!(c.state(), KeyboardLayoutState::Letters(ShiftState::Once));
    let a = label(&c, "A");
    tap(&mut c, a, t + ms(1100));
    assert_eq!(c.state(), KeyboardLayoutState::Letters(ShiftState::Off));
    assert!(c.timers().is_scheduled(TimerRole::ShiftToggle));

    let shift = special(&c, KeyIdentifier::ShiftOff);
    tap(&mut c, shift, t + ms(1200));
    assert_eq!(c.state(), KeyboardLayoutState::Letters(ShiftState::On));
    assert_eq!(c.delegate().texts(), vec!["Q", "A"]);
}

#[test]
fn layouts_return_to_lowercase_letters() {
    let t = Instant::now();
    let mut c = keyboard();
    let numbers = special(&c, KeyIdentifier::Numbers);
    tap(&mut c, numbers, t);
    assert_eq!(c.state(), KeyboardLayoutState::Numbers);
    let symbols = special(&c, KeyIdentifier::Symbols);
    tap(&mut c, symbols, t + ms(100));
    assert_eq!(c.state(), KeyboardLayoutState::Symbols);
    let letters = special(&c, KeyIdentifier::Letters);
    tap(&mut c, letters, t + ms(200));
    assert_eq!(c.state(), KeyboardLayoutState::Letters(ShiftState::Off));
    assert_eq!(attached(&c), vec![KeyboardLayoutState::Letters(ShiftState::Off)]);
}

#[test]
fn action_keys_only_notify() {
    let t = Instant::now();
    let mut c = keyboard();
    for (id, name) in [(KeyIdentifier::Space, "space"),
                       (KeyIdentifier::Globe, "globe"),
                       (KeyIdentifier::Return, "return")] {
        let key = special(&c, id);
        tap(&mut c, key, t);
        assert_eq!(c.delegate().count(name), 1);
    }
    assert_eq!(c.state(), KeyboardLayoutState::Letters(ShiftState::Once));
    assert!(c.delegate().texts().is_empty());
}

#[test]
fn backspace_hold_repeats_until_release() {
    let t = Instant::now();
    let mut c = keyboard();
    let backspace = special(&c, KeyIdentifier::Backspace);
    c.handle(SurfaceEvent::KeyPressStart(backspace), t);
    c.pump(t + ms(499));
    assert_eq!(c.delegate().count("backspace"), 0);
    c.pump(t + ms(500));
    assert_eq!(c.delegate().count("backspace"), 0);
    assert!(c.timers().is_scheduled(TimerRole::BackspaceRepeat));
    c.pump(t + ms(600));
    assert_eq!(c.delegate().count("backspace"), 1);
    c.pump(t + ms(850));
    assert_eq!(c.delegate().count("backspace"), 3);

    c.handle(SurfaceEvent::KeyPressEnd(backspace), t + ms(850));
    assert_eq!(c.delegate().count("backspace"), 4);
    assert!(c.timers().scheduled().is_empty());
    c.pump(t + ms(5000));
    assert_eq!(c.delegate().count("backspace"), 4);
}

#[test]
fn backspace_tap_deletes_once() {
    let t = Instant::now();
    let mut c = keyboard();
    let backspace = special(&c, KeyIdentifier::Backspace);
    c.handle(SurfaceEvent::KeyPressStart(backspace), t);
    c.handle(SurfaceEvent::KeyPressEnd(backspace), t + ms(80));
    c.pump(t + ms(2000));
    assert_eq!(c.delegate().count("backspace"), 1);
}

#[test]
fn backspace_release_outside_key_stops_repeat() {
    let t = Instant::now();
    let mut c = keyboard();
    let backspace = special(&c, KeyIdentifier::Backspace);
    c.handle(SurfaceEvent::TouchesBegin(vec![key_center(&c, backspace)]), t);
    c.handle(SurfaceEvent::KeyPressStart(backspace), t);
    c.pump(t + ms(700));
    assert_eq!(c.delegate().count("backspace"), 2);
    c.handle(SurfaceEvent::TouchesEnd(Some(vec![Pos2::new(10.0, 10.0)])), t + ms(720));
    c.pump(t + ms(2000));
    assert_eq!(c.delegate().count("backspace"), 2);
}

#[test]
fn new_press_supersedes_pending_timers() {
    let t = Instant::now();
    let mut c = keyboard();
    let backspace = special(&c, KeyIdentifier::Backspace);
    c.handle(SurfaceEvent::KeyPressStart(backspace), t);
    let e = label(&c, "E");
    c.handle(SurfaceEvent::KeyPressStart(e), t + ms(100));
    assert!(!c.timers().is_scheduled(TimerRole::BackspaceEscalate));
    assert!(c.timers().is_scheduled(TimerRole::KeyMenuOpen));
    c.pump(t + ms(900));
    assert_eq!(c.delegate().count("backspace"), 0);
}

#[test]
fn long_press_opens_menu_and_commits_selection() {
    let t = Instant::now();
    let mut c = keyboard();
    let e = label(&c, "E");
    c.handle(SurfaceEvent::TouchesBegin(vec![key_center(&c, e)]), t);
    c.handle(SurfaceEvent::KeyPressStart(e), t);
    assert_eq!(c.popup_key(), Some(e));
    c.pump(t + ms(999));
    assert_eq!(c.menu_key(), None);
    c.pump(t + ms(1000));
    assert_eq!(c.menu_key(), Some(e));
    assert_eq!(c.popup_key(), None);
    assert!(!c.surface().typing_enabled());

    let item = menu_item(&c, 1);
    c.handle(SurfaceEvent::TouchesMove(vec![item]), t + ms(1100));
    c.handle(SurfaceEvent::KeyPressEnd(e), t + ms(1200));
    c.handle(SurfaceEvent::TouchesEnd(Some(vec![item])), t + ms(1200));

    assert_eq!(c.delegate().texts(), vec!["É"]);
    assert_eq!(c.delegate().count("key:E"), 0);
    assert_eq!(c.menu_key(), None);
    assert!(!c.key_menu_locked());
    assert_eq!(c.state(), KeyboardLayoutState::Letters(ShiftState::Off));
    assert!(c.surface().typing_enabled());
}

#[test]
fn finished_gesture_location_is_not_reused() {
    let t = Instant::now();
    let mut c = keyboard();
    let e = label(&c, "E");
    c.handle(SurfaceEvent::TouchesBegin(vec![key_center(&c, e)]), t);
    c.handle(SurfaceEvent::KeyPressStart(e), t);
    c.pump(t + ms(1000));
    let item = menu_item(&c, 1);
    c.handle(SurfaceEvent::TouchesMove(vec![item]), t + ms(1100));
    c.handle(SurfaceEvent::TouchesEnd(Some(vec![item])), t + ms(1200));
    assert_eq!(c.delegate().texts(), vec!["É"]);
    arrange(&mut c);

    // Release without location selects nothing.
    let e = label(&c, "e");
    c.handle(SurfaceEvent::KeyPressStart(e), t + ms(2000));
    c.pump(t + ms(3000));
    assert_eq!(c.menu_key(), Some(e));
    c.handle(SurfaceEvent::TouchesEnd(None), t + ms(3100));
    assert_eq!(c.delegate().texts(), vec!["É"]);
    assert_eq!(c.menu_key(), Some(e));
    assert!(c.key_menu_locked());
}

#[test]
fn updated_config_applies_to_next_press() {
    let t = Instant::now();
    let mut c = keyboard();
    let mut config = c.config().clone();
    config.set_key_menu_open_time_interval(ms(200));
    c.set_config(config);
    assert_eq!(c.config().key_menu_open_time_interval(), ms(200));

    let e = label(&c, "E");
    c.handle(SurfaceEvent::KeyPressStart(e), t);
    c.pump(t + ms(199));
    assert_eq!(c.menu_key(), None);
    c.pump(t + ms(200));
    assert_eq!(c.menu_key(), Some(e));
}

#[test]
fn short_tap_does_not_open_menu() {
    let t = Instant::now();
    let mut c = keyboard();
    let e = label(&c, "E");
    c.handle(SurfaceEvent::KeyPressStart(e), t);
    c.handle(SurfaceEvent::KeyPressEnd(e), t + ms(200));
    c.handle(SurfaceEvent::TouchesEnd(None), t + ms(200));
    c.pump(t + ms(1500));
    assert_eq!(c.menu_key(), None);
    assert_eq!(c.popup_key(), None);
    assert_eq!(c.delegate().texts(), vec!["E"]);
}

/// Switch to symbols layout and press key with menu without popup.
fn open_symbols_menu(c: &mut KeyboardController<Recorder>, t: Instant) -> KeyId {
    let numbers = special(c, KeyIdentifier::Numbers);
    tap(c, numbers, t);
    let symbols = special(c, KeyIdentifier::Symbols);
    tap(c, symbols, t);
    let dot = label(c, ".");
    c.handle(SurfaceEvent::TouchesBegin(vec![key_center(c, dot)]), t);
    c.handle(SurfaceEvent::KeyPressStart(dot), t);
    c.handle(SurfaceEvent::KeyPressEnd(dot), t + ms(50));
    dot
}

#[test]
fn menu_without_popup_opens_on_press() {
    let t = Instant::now();
    let mut c = keyboard();
    let dot = open_symbols_menu(&mut c, t);
    assert_eq!(c.menu_key(), Some(dot));
    assert!(!c.key_menu_locked());
    assert!(!c.surface().typing_enabled());
    assert!(c.delegate().texts().is_empty());
}

#[test]
fn empty_releases_lock_then_dismiss_menu() {
    let t = Instant::now();
    let mut c = keyboard();
    let dot = open_symbols_menu(&mut c, t);
    let at_key = key_center(&c, dot);

    c.handle(SurfaceEvent::TouchesEnd(Some(vec![at_key])), t + ms(60));
    assert_eq!(c.menu_key(), Some(dot));
    assert!(c.key_menu_locked());
    assert!(!c.surface().typing_enabled());

    // Presses are not typed while menu is locked.
    let comma = label(&c, ",");
    c.handle(SurfaceEvent::TouchesBegin(vec![key_center(&c, comma)]), t + ms(200));
    c.handle(SurfaceEvent::KeyPressStart(comma), t + ms(200));
    c.handle(SurfaceEvent::KeyPressEnd(comma), t + ms(250));
    assert!(c.delegate().texts().is_empty());
    assert_eq!(c.delegate().count("key:,"), 0);

    c.handle(SurfaceEvent::TouchesEnd(Some(vec![key_center(&c, comma)])), t + ms(250));
    assert_eq!(c.menu_key(), None);
    assert!(!c.key_menu_locked());
    assert!(c.surface().typing_enabled());
    assert!(c.delegate().texts().is_empty());
}

#[test]
fn selection_commits_regardless_of_lock() {
    let t = Instant::now();
    let mut c = keyboard();
    let dot = open_symbols_menu(&mut c, t);
    let at_key = key_center(&c, dot);
    c.handle(SurfaceEvent::TouchesEnd(Some(vec![at_key])), t + ms(60));
    assert!(c.key_menu_locked());

    let item = menu_item(&c, 2);
    c.handle(SurfaceEvent::TouchesBegin(vec![item]), t + ms(300));
    c.handle(SurfaceEvent::TouchesEnd(Some(vec![item])), t + ms(350));
    assert_eq!(c.delegate().texts(), vec!["·"]);
    assert_eq!(c.menu_key(), None);
    assert!(!c.key_menu_locked());
    assert!(c.surface().typing_enabled());

    // Selection is consumed by commit.
    c.handle(SurfaceEvent::TouchesEnd(Some(vec![item])), t + ms(400));
    assert_eq!(c.delegate().texts(), vec!["·"]);
}

#[test]
fn cancel_of_locked_menu_enables_typing() {
    let t = Instant::now();
    let mut c = keyboard();
    let dot = open_symbols_menu(&mut c, t);
    c.handle(SurfaceEvent::TouchesCancel(None), t + ms(60));
    assert_eq!(c.menu_key(), Some(dot));
    assert!(c.key_menu_locked());
    c.handle(SurfaceEvent::TouchesCancel(None), t + ms(100));
    assert_eq!(c.menu_key(), None);
    assert!(!c.key_menu_locked());
    assert!(c.surface().typing_enabled());
}

#[test]
fn detached_surface_events_are_dropped() {
    let t = Instant::now();
    let mut c = keyboard();
    let q = label(&c, "Q");
    let source = KeyboardLayoutState::Letters(ShiftState::Off);
    c.handle_from(source, SurfaceEvent::KeyPressStart(q), t);
    c.handle_from(source, SurfaceEvent::KeyPressEnd(q), t);
    assert!(c.delegate().events.is_empty());
    c.handle_from(c.state(), SurfaceEvent::KeyPressEnd(q), t);
    assert_eq!(c.delegate().texts(), vec!["Q"]);
}

#[test]
fn reset_returns_to_initial_state() {
    let t = Instant::now();
    let mut c = keyboard();
    open_symbols_menu(&mut c, t);
    c.reset();
    assert_eq!(c.state(), KeyboardLayoutState::Letters(ShiftState::Once));
    assert_eq!(c.menu_key(), None);
    assert!(c.timers().scheduled().is_empty());
    assert_eq!(attached(&c), vec![KeyboardLayoutState::Letters(ShiftState::Once)]);
    assert!(c.surface().typing_enabled());
}
