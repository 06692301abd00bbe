pub const DEVICE_WIDTH: f32 = 199.0;
pub const DEVICE_TOP_HEIGHT: f32 = 292.0;
pub const DEVICE_BOTTOM_HEIGHT: f32 = 352.0;
pub const DEVICE_HEIGHT: f32 = DEVICE_TOP_HEIGHT + DEVICE_BOTTOM_HEIGHT;

pub const SCREEN_WIDTH: f32 = 128.0;
pub const SCREEN_HEIGHT: f32 = 146.0;
pub const SCREEN_ORIGIN: Vec2 = Vec2 { x: 36.0, y: 81.0 };

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }

    pub fn max_x(&self) -> f32 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f32 {
        self.y + self.height
    }
}

pub fn screen_rect() -> Rect {
    Rect::new(SCREEN_ORIGIN.x, SCREEN_ORIGIN.y, SCREEN_WIDTH, SCREEN_HEIGHT)
}

pub fn keypad_rect() -> Rect {
    Rect::new(0.0, DEVICE_TOP_HEIGHT, DEVICE_WIDTH, DEVICE_BOTTOM_HEIGHT)
}

pub fn device_to_keypad(point: Vec2) -> Vec2 {
    Vec2 {
        x: point.x,
        y: point.y - DEVICE_TOP_HEIGHT,
    }
}

pub fn keypad_to_device(point: Vec2) -> Vec2 {
    Vec2 {
        x: point.x,
        y: point.y + DEVICE_TOP_HEIGHT,
    }
}

pub fn screen_to_device(point: Vec2) -> Vec2 {
    Vec2 {
        x: point.x + SCREEN_ORIGIN.x,
        y: point.y + SCREEN_ORIGIN.y,
    }
}
