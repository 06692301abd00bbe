use std::time::Duration;

use tracing::debug;

use super::applet::Applet;
use super::input::{KeyPad, KeyPadEvent, LogicalKey};
use super::layout::{device_to_keypad, keypad_rect, Vec2};
use super::screen::Screen;

#[derive(Debug, Default)]
pub struct Device {
    screen: Screen,
    keypad: KeyPad,
    press_in_progress: bool,
}

impl Device {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn keypad(&self) -> &KeyPad {
        &self.keypad
    }

    pub fn start(&mut self, applet: &mut dyn Applet) {
        applet.start(&mut self.screen);
    }

    pub fn update(&mut self, dt: Duration, applet: &mut dyn Applet) {
        applet.update(dt, &mut self.screen);
    }

    pub fn press_start(&mut self, point: Vec2) -> bool {
        if !keypad_rect().contains(point) {
            return false;
        }
        self.keypad.press_start(device_to_keypad(point));
        self.press_in_progress = true;
        true
    }

    pub fn press_end(&mut self, point: Vec2, applet: &mut dyn Applet) {
        if !self.press_in_progress {
            return;
        }
        self.press_in_progress = false;
        let KeyPadEvent::KeyReleased(key) = self.keypad.press_end(device_to_keypad(point));
        applet.key_pressed(key, &mut self.screen);
    }

    pub fn inject_key(&mut self, key: LogicalKey, applet: &mut dyn Applet) {
        debug!(key = ?key, "device_key_injected");
        self.keypad.force_highlight(key);
        applet.key_pressed(key, &mut self.screen);
    }

    pub fn request_cue(&mut self, applet: &mut dyn Applet) {
        applet.cue_requested(&mut self.keypad, &mut self.screen);
    }
}
