use serde::{Deserialize, Serialize};
use tracing::debug;

use super::layout::{Rect, Vec2};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicalKey {
    Unknown,
    ArrowUp,
    ArrowDown,
    Ok,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
}

impl LogicalKey {
    pub const MAPPED: [LogicalKey; 9] = [
        LogicalKey::ArrowUp,
        LogicalKey::ArrowDown,
        LogicalKey::Ok,
        LogicalKey::Num1,
        LogicalKey::Num2,
        LogicalKey::Num3,
        LogicalKey::Num4,
        LogicalKey::Num5,
        LogicalKey::Num6,
    ];

    pub fn caption(self) -> &'static str {
        match self {
            LogicalKey::Unknown => "",
            LogicalKey::ArrowUp => "^",
            LogicalKey::ArrowDown => "v",
            LogicalKey::Ok => "OK",
            LogicalKey::Num1 => "1",
            LogicalKey::Num2 => "2",
            LogicalKey::Num3 => "3",
            LogicalKey::Num4 => "4",
            LogicalKey::Num5 => "5",
            LogicalKey::Num6 => "6",
        }
    }
}

pub fn hit_region(key: LogicalKey) -> Option<Rect> {
    let rect = match key {
        LogicalKey::Unknown => return None,
        LogicalKey::ArrowUp => Rect::new(65.0, 99.0, 72.0, 17.0),
        LogicalKey::ArrowDown => Rect::new(65.0, 141.0, 72.0, 17.0),
        LogicalKey::Ok => Rect::new(80.0, 115.0, 40.0, 28.0),
        LogicalKey::Num1 => Rect::new(15.0, 189.0, 51.0, 31.0),
        LogicalKey::Num2 => Rect::new(75.0, 197.0, 51.0, 22.0),
        LogicalKey::Num3 => Rect::new(133.0, 189.0, 51.0, 31.0),
        LogicalKey::Num4 => Rect::new(15.0, 216.0, 51.0, 32.0),
        LogicalKey::Num5 => Rect::new(75.0, 221.0, 51.0, 27.0),
        LogicalKey::Num6 => Rect::new(133.0, 216.0, 51.0, 32.0),
    };
    Some(rect)
}

pub fn highlight_vertices(key: LogicalKey) -> &'static [Vec2] {
    const fn v(x: f32, y: f32) -> Vec2 {
        Vec2::new(x, y)
    }
    const ARROW_UP: [Vec2; 4] = [v(62.0, 99.0), v(81.0, 117.0), v(117.0, 117.0), v(139.0, 99.0)];
    const ARROW_DOWN: [Vec2; 4] = [
        v(81.0, 139.0),
        v(62.0, 155.0),
        v(139.0, 155.0),
        v(117.0, 139.0),
    ];
    const OK: [Vec2; 4] = [v(82.0, 116.0), v(82.0, 139.0), v(117.0, 139.0), v(117.0, 116.0)];
    const NUM1: [Vec2; 4] = [v(18.0, 183.0), v(18.0, 205.0), v(65.0, 216.0), v(65.0, 195.0)];
    const NUM2: [Vec2; 4] = [v(75.0, 197.0), v(75.0, 216.0), v(126.0, 216.0), v(126.0, 197.0)];
    const NUM3: [Vec2; 4] = [
        v(135.0, 195.0),
        v(135.0, 216.0),
        v(186.0, 205.0),
        v(186.0, 185.0),
    ];
    const NUM4: [Vec2; 4] = [v(14.0, 211.0), v(18.0, 236.0), v(64.0, 246.0), v(64.0, 221.0)];
    const NUM5: [Vec2; 4] = [v(75.0, 222.0), v(75.0, 246.0), v(125.0, 246.0), v(125.0, 222.0)];
    const NUM6: [Vec2; 4] = [
        v(135.0, 221.0),
        v(135.0, 246.0),
        v(186.0, 238.0),
        v(184.0, 210.0),
    ];

    match key {
        LogicalKey::Unknown => &[],
        LogicalKey::ArrowUp => &ARROW_UP,
        LogicalKey::ArrowDown => &ARROW_DOWN,
        LogicalKey::Ok => &OK,
        LogicalKey::Num1 => &NUM1,
        LogicalKey::Num2 => &NUM2,
        LogicalKey::Num3 => &NUM3,
        LogicalKey::Num4 => &NUM4,
        LogicalKey::Num5 => &NUM5,
        LogicalKey::Num6 => &NUM6,
    }
}

pub fn resolve_key(point: Vec2) -> LogicalKey {
    LogicalKey::MAPPED
        .into_iter()
        .find(|key| hit_region(*key).is_some_and(|rect| rect.contains(point)))
        .unwrap_or(LogicalKey::Unknown)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPadEvent {
    KeyReleased(LogicalKey),
}

#[derive(Debug, Clone, Default)]
pub struct KeyPad {
    current_key: Option<LogicalKey>,
    highlight: Option<LogicalKey>,
}

impl KeyPad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press_start(&mut self, point: Vec2) {
        let key = resolve_key(point);
        self.current_key = Some(key);
        self.set_highlight(key);
    }

    pub fn press_end(&mut self, point: Vec2) -> KeyPadEvent {
        let key = resolve_key(point);
        self.current_key = Some(key);
        debug!(key = ?key, x = point.x, y = point.y, "keypad_key_released");
        KeyPadEvent::KeyReleased(key)
    }

    pub fn force_highlight(&mut self, key: LogicalKey) {
        self.set_highlight(key);
    }

    pub fn current_key(&self) -> Option<LogicalKey> {
        self.current_key
    }

    pub fn highlighted_key(&self) -> Option<LogicalKey> {
        self.highlight
    }

    pub fn highlight_polygon(&self) -> &'static [Vec2] {
        self.highlight.map(highlight_vertices).unwrap_or(&[])
    }

    fn set_highlight(&mut self, key: LogicalKey) {
        self.highlight = (key != LogicalKey::Unknown).then_some(key);
    }
}
