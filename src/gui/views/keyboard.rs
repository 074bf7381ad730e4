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

use egui::{vec2, Align2, Color32, FontId, Id, LayerId, Order, Pos2, Rect, Sense};

use crate::gui::Colors;
use crate::keyboard::{Key, KeyId, KeyIdentifier, KeyboardController, KeyboardDelegate,
                      KeyboardLayoutState, ShiftState, SurfaceEvent};

/// Software keyboard content, translates pointer input into surface events.
#[derive(Default)]
pub struct KeyboardContent {
    /// Pressed key with layout state it was pressed at.
    pressed: Option<(KeyboardLayoutState, KeyId)>,
    /// Flag to check if touch started at keyboard.
    touching: bool,
    /// Last pointer position while touching.
    last_pos: Option<Pos2>,
}

impl KeyboardContent {
    /// Maximum keyboard content width.
    const MAX_WIDTH: f32 = 600.0;
    /// Height of keys row.
    const ROW_HEIGHT: f32 = 52.0;
    /// Space around key.
    const KEY_MARGIN: f32 = 3.0;
    /// Label font size.
    const FONT_SIZE: f32 = 18.0;

    /// Draw keyboard content.
    pub fn ui<D: KeyboardDelegate>(&mut self,
                                   ui: &mut egui::Ui,
                                   controller: &mut KeyboardController<D>) {
        let now = Instant::now();
        controller.pump(now);

        // Setup key frames.
        let rows = controller.surface().rows().len().max(1) as f32;
        let width = f32::min(ui.available_width(), Self::MAX_WIDTH);
        let (rect, _) = ui.allocate_exact_size(vec2(width, rows * Self::ROW_HEIGHT),
                                               Sense::click_and_drag());
        controller.surface_mut().arrange(rect);

        self.on_pointer(ui, controller, now);
        self.draw(ui, controller);

        // Repaint to fire pending timers.
        if let Some(deadline) = controller.next_deadline() {
            ui.ctx().request_repaint_after(deadline.saturating_duration_since(now));
        }
    }

    /// Handle pointer input.
    fn on_pointer<D: KeyboardDelegate>(&mut self,
                                       ui: &egui::Ui,
                                       controller: &mut KeyboardController<D>,
                                       now: Instant) {
        let (pressed, released, down, pos) = ui.input(|i| {
            (i.pointer.primary_pressed(),
             i.pointer.primary_released(),
             i.pointer.primary_down(),
             i.pointer.interact_pos())
        });

        if pressed {
            if let Some(pos) = pos {
                let at_menu = controller.menu_frame().map(|r| r.contains(pos)).unwrap_or(false);
                if at_menu || controller.surface().bounds().contains(pos) {
                    self.touching = true;
                    self.last_pos = Some(pos);
                    let source = controller.state();
                    controller.handle_from(source, SurfaceEvent::TouchesBegin(vec![pos]), now);
                    if !at_menu {
                        if let Some(id) = controller.surface().key_at(pos) {
                            self.pressed = Some((source, id));
                            controller.handle_from(source, SurfaceEvent::KeyPressStart(id), now);
                        }
                    }
                }
            }
        } else if self.touching && down {
            match pos {
                Some(pos) if self.last_pos != Some(pos) => {
                    self.last_pos = Some(pos);
                    let source = controller.state();
                    controller.handle_from(source, SurfaceEvent::TouchesMove(vec![pos]), now);
                }
                None => {
                    // Pointer is gone.
                    self.touching = false;
                    self.pressed = None;
                    let source = controller.state();
                    controller.handle_from(source, SurfaceEvent::TouchesCancel(None), now);
                }
                _ => {}
            }
        }

        if released && self.touching {
            self.touching = false;
            let pos = pos.or(self.last_pos);
            // Press ends only inside pressed key.
            if let Some((source, id)) = self.pressed.take() {
                let inside = match (pos, controller.surface().key(id)) {
                    (Some(p), Some(key)) => key.frame.contains(p),
                    _ => false
                };
                if inside {
                    controller.handle_from(source, SurfaceEvent::KeyPressEnd(id), now);
                }
            }
            let source = controller.state();
            controller.handle_from(source, SurfaceEvent::TouchesEnd(pos.map(|p| vec![p])), now);
        }
    }

    /// Draw keys, popup and key menu.
    fn draw<D: KeyboardDelegate>(&self, ui: &egui::Ui, controller: &KeyboardController<D>) {
        let surface = controller.surface();
        let painter = ui.painter();
        painter.rect_filled(surface.bounds(), 0.0, Colors::FILL);

        let typing = surface.typing_enabled();
        for id in surface.key_ids() {
            let Some(key) = surface.key(id) else {
                continue;
            };
            let pressed = self.pressed.map(|(_, p)| p == id).unwrap_or(false);
            let bg = if pressed {
                Colors::FILL_DARK
            } else if key.identifier.is_some() {
                Colors::FILL_LITE
            } else {
                Colors::BUTTON
            };
            let color = if typing {
                Self::label_color(key, controller.state())
            } else {
                Colors::INACTIVE_TEXT
            };
            let rect = key.frame.shrink(Self::KEY_MARGIN);
            painter.rect_filled(rect, 6.0, bg);
            painter.text(rect.center(),
                         Align2::CENTER_CENTER,
                         &key.label,
                         FontId::proportional(Self::FONT_SIZE),
                         color);
        }

        let fg = ui.ctx().layer_painter(LayerId::new(Order::Foreground, Id::new("keyboard_popups")));

        // Draw enlarged key preview.
        if let Some(key) = controller.popup_key().and_then(|id| surface.key(id)) {
            let size = vec2(key.frame.width() * 1.4, key.frame.height() * 1.2);
            let center = key.frame.center() - vec2(0.0, key.frame.height());
            let rect = Rect::from_center_size(center, size);
            fg.rect_filled(rect.expand(2.0), 8.0, Colors::SEMI_TRANSPARENT);
            fg.rect_filled(rect, 8.0, Colors::WHITE);
            fg.text(rect.center(),
                    Align2::CENTER_CENTER,
                    &key.label,
                    FontId::proportional(Self::FONT_SIZE * 1.5),
                    Colors::TEXT_BUTTON);
        }

        // Draw key menu.
        let menu = controller.menu_key()
            .and_then(|id| surface.key(id))
            .and_then(|k| k.menu.as_ref());
        if let (Some(menu), Some(frame)) = (menu, controller.menu_frame()) {
            fg.rect_filled(frame.expand(2.0), 8.0, Colors::SEMI_TRANSPARENT);
            fg.rect_filled(frame, 8.0, Colors::WHITE);
            for (index, item) in menu.items().iter().enumerate() {
                let rect = menu.item_frame(index, frame).shrink(Self::KEY_MARGIN);
                if menu.selected() == Some(index) {
                    fg.rect_filled(rect, 6.0, Colors::GOLD);
                }
                fg.text(rect.center(),
                        Align2::CENTER_CENTER,
                        &item.label,
                        FontId::proportional(Self::FONT_SIZE),
                        Colors::TEXT_BUTTON);
            }
        }
    }

    /// Get key label color.
    fn label_color(key: &Key, state: KeyboardLayoutState) -> Color32 {
        match key.identifier {
            Some(KeyIdentifier::Backspace) => Colors::RED,
            Some(KeyIdentifier::Return) => Colors::GREEN,
            Some(KeyIdentifier::ShiftOnce) | Some(KeyIdentifier::ShiftOn) => {
                if state == KeyboardLayoutState::Letters(ShiftState::On) {
                    Colors::YELLOW_DARK
                } else {
                    Colors::TEXT
                }
            }
            _ => Colors::TEXT_BUTTON
        }
    }
}
