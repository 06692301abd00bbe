use std::time::Duration;

use super::input::{KeyPad, LogicalKey};
use super::screen::Screen;

pub trait Applet {
    fn start(&mut self, screen: &mut Screen);
    fn key_pressed(&mut self, key: LogicalKey, screen: &mut Screen);
    fn update(&mut self, dt: Duration, screen: &mut Screen);
    fn cue_requested(&mut self, _keypad: &mut KeyPad, _screen: &mut Screen) {}
    fn debug_title(&self) -> Option<String> {
        None
    }
}
