mod applet;
mod device;
mod input;
mod layout;
mod loop_runner;
mod menu;
mod rendering;
mod scheduler;
mod screen;

pub use applet::Applet;
pub use device::Device;
pub use input::{hit_region, highlight_vertices, resolve_key, KeyPad, KeyPadEvent, LogicalKey};
pub use layout::{
    device_to_keypad, keypad_rect, keypad_to_device, screen_rect, screen_to_device, Rect, Vec2,
    DEVICE_BOTTOM_HEIGHT, DEVICE_HEIGHT, DEVICE_TOP_HEIGHT, DEVICE_WIDTH, SCREEN_HEIGHT,
    SCREEN_ORIGIN, SCREEN_WIDTH,
};
pub use loop_runner::{run_app, AppError, LoopConfig};
pub use menu::{MenuEvent, MenuWidget, MENU_ROW_HEIGHT};
pub use rendering::Renderer;
pub use scheduler::Scheduler;
pub use screen::{DrawCommand, PlacedMenu, Screen};
