use std::path::PathBuf;
use std::sync::Arc;

use pixels::{Error, Pixels, SurfaceTexture};
use winit::dpi::PhysicalPosition;
use winit::window::Window;

use crate::app::device::Device;
use crate::app::input::{hit_region, LogicalKey};
use crate::app::layout::{
    screen_rect, screen_to_device, Rect, Vec2, DEVICE_HEIGHT, DEVICE_TOP_HEIGHT, DEVICE_WIDTH,
    SCREEN_HEIGHT, SCREEN_ORIGIN, SCREEN_WIDTH,
};
use crate::app::menu::MENU_ROW_HEIGHT;
use crate::app::screen::{DrawCommand, PlacedMenu, Screen};

use super::font::{text_width, wrap_text, GLYPH_HEIGHT, LINE_ADVANCE};
use super::raster::{Canvas, ClipRect};
use super::sprites::SpriteCache;

const CLEAR_COLOR: [u8; 4] = [18, 20, 26, 255];
const BODY_COLOR: [u8; 4] = [52, 56, 66, 255];
const BODY_EDGE_COLOR: [u8; 4] = [84, 90, 104, 255];
const BEZEL_COLOR: [u8; 4] = [14, 15, 18, 255];
const SCREEN_COLOR: [u8; 4] = [232, 236, 222, 255];
const INK_COLOR: [u8; 4] = [16, 16, 16, 255];
const TEXT_BOX_COLOR: [u8; 4] = [250, 250, 250, 255];
const KEY_COLOR: [u8; 4] = [70, 74, 86, 255];
const KEY_EDGE_COLOR: [u8; 4] = [140, 146, 160, 255];
const KEY_CAPTION_COLOR: [u8; 4] = [230, 232, 238, 255];
const MENU_PANEL_COLOR: [u8; 4] = [196, 198, 204, 255];
const MENU_BAND_COLOR: [u8; 4] = [40, 90, 220, 255];
const HIGHLIGHT_COLOR: [u8; 4] = [255, 230, 0, 128];
const PLACEHOLDER_COLOR: [u8; 4] = [220, 60, 200, 255];
const PLACEHOLDER_SIZE: i32 = 10;
const BEZEL_MARGIN: i32 = 4;

const DEVICE_TOP_SPRITE: &str = "cell_top";
const DEVICE_BOTTOM_SPRITE: &str = "cell_bottom";

pub struct Renderer {
    pixels: Pixels<'static>,
    sprites: SpriteCache,
}

impl Renderer {
    pub fn new(window: Arc<Window>, sprite_dir: PathBuf) -> Result<Self, Error> {
        let size = window.inner_size();
        let surface = SurfaceTexture::new(size.width, size.height, window);
        let pixels = Pixels::new(DEVICE_WIDTH as u32, DEVICE_HEIGHT as u32, surface)?;
        Ok(Self {
            pixels,
            sprites: SpriteCache::new(sprite_dir),
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), Error> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels.resize_surface(width, height)?;
        Ok(())
    }

    pub fn window_to_device(&self, position: PhysicalPosition<f64>) -> Vec2 {
        match self
            .pixels
            .window_pos_to_pixel((position.x as f32, position.y as f32))
        {
            Ok((x, y)) => Vec2::new(x as f32, y as f32),
            Err(outside) => clamp_to_device(outside),
        }
    }

    pub fn render_device(&mut self, device: &Device) -> Result<(), Error> {
        let frame = self.pixels.frame_mut();
        let mut canvas = Canvas::new(frame, DEVICE_WIDTH as u32, DEVICE_HEIGHT as u32);
        paint_device(&mut canvas, device, &mut self.sprites);
        self.pixels.render()
    }
}

pub(crate) fn paint_device(canvas: &mut Canvas<'_>, device: &Device, sprites: &mut SpriteCache) {
    canvas.fill(CLEAR_COLOR);
    paint_device_top(canvas, sprites);
    paint_screen(canvas, device.screen(), sprites);
    paint_keypad(canvas, sprites);

    let polygon = device.keypad().highlight_polygon();
    canvas.fill_polygon(polygon, Vec2::new(0.0, DEVICE_TOP_HEIGHT), HIGHLIGHT_COLOR);
}

fn paint_device_top(canvas: &mut Canvas<'_>, sprites: &mut SpriteCache) {
    if let Some(sprite) = sprites.get_optional(DEVICE_TOP_SPRITE) {
        canvas.blit_rgba(0, 0, sprite.width, sprite.height, &sprite.rgba);
        return;
    }
    let width = canvas.width() as i32;
    canvas.fill_rect(0, 0, width, DEVICE_TOP_HEIGHT as i32, BODY_COLOR);
    canvas.rect_outline(0, 0, width, DEVICE_TOP_HEIGHT as i32, BODY_EDGE_COLOR);
    canvas.fill_rect(
        SCREEN_ORIGIN.x as i32 - BEZEL_MARGIN,
        SCREEN_ORIGIN.y as i32 - BEZEL_MARGIN,
        SCREEN_WIDTH as i32 + BEZEL_MARGIN * 2,
        SCREEN_HEIGHT as i32 + BEZEL_MARGIN * 2,
        BEZEL_COLOR,
    );
}

fn paint_keypad(canvas: &mut Canvas<'_>, sprites: &mut SpriteCache) {
    let top = DEVICE_TOP_HEIGHT as i32;
    if let Some(sprite) = sprites.get_optional(DEVICE_BOTTOM_SPRITE) {
        canvas.blit_rgba(0, top, sprite.width, sprite.height, &sprite.rgba);
        return;
    }
    let width = canvas.width() as i32;
    let height = canvas.height() as i32 - top;
    canvas.fill_rect(0, top, width, height, BODY_COLOR);
    canvas.rect_outline(0, top, width, height, BODY_EDGE_COLOR);

    for key in LogicalKey::MAPPED {
        let Some(region) = hit_region(key) else {
            continue;
        };
        let (x, y, w, h) = rect_px(region, 0.0, DEVICE_TOP_HEIGHT);
        canvas.fill_rect(x, y, w, h, KEY_COLOR);
        canvas.rect_outline(x, y, w, h, KEY_EDGE_COLOR);
        let caption = key.caption();
        let caption_x = x + (w - text_width(caption)) / 2;
        let caption_y = y + (h - GLYPH_HEIGHT) / 2;
        canvas.draw_text(caption_x, caption_y, caption, KEY_CAPTION_COLOR);
    }
}

fn paint_screen(canvas: &mut Canvas<'_>, screen: &Screen, sprites: &mut SpriteCache) {
    let (x, y, w, h) = rect_px(screen_rect(), 0.0, 0.0);
    canvas.set_clip(ClipRect::new(x, y, w, h));
    canvas.fill_rect(x, y, w, h, SCREEN_COLOR);

    for command in screen.display_list() {
        paint_command(canvas, command, sprites);
    }
    if let Some(menu) = screen.placed_menu() {
        paint_menu(canvas, menu);
    }
    canvas.reset_clip();
}

fn paint_command(canvas: &mut Canvas<'_>, command: &DrawCommand, sprites: &mut SpriteCache) {
    match command {
        DrawCommand::Image { key, position } => {
            let (x, y) = screen_px(*position);
            match sprites.get(key) {
                Some(sprite) => canvas.blit_rgba(x, y, sprite.width, sprite.height, &sprite.rgba),
                None => {
                    canvas.fill_rect(x, y, PLACEHOLDER_SIZE, PLACEHOLDER_SIZE, PLACEHOLDER_COLOR);
                }
            }
        }
        DrawCommand::TextBox { text, position } => {
            let (x, y) = screen_px(*position);
            let box_width = (SCREEN_WIDTH - position.x * 2.0).max(0.0) as i32;
            let lines = wrap_text(text, box_width - 2);
            let box_height = lines.len() as i32 * LINE_ADVANCE + 2;
            canvas.fill_rect(x, y, box_width, box_height, TEXT_BOX_COLOR);
            for (index, line) in lines.iter().enumerate() {
                canvas.draw_text(x + 1, y + 2 + index as i32 * LINE_ADVANCE, line, INK_COLOR);
            }
        }
        DrawCommand::BoldLabel { text, position } => {
            let (x, y) = screen_px(*position);
            canvas.draw_text(x, y, text, INK_COLOR);
            canvas.draw_text(x + 1, y, text, INK_COLOR);
        }
        DrawCommand::Label { text, position } => {
            let (x, y) = screen_px(*position);
            canvas.draw_text(x, y, text, INK_COLOR);
        }
    }
}

fn paint_menu(canvas: &mut Canvas<'_>, menu: &PlacedMenu) {
    let (left, top) = screen_px(Vec2::new(0.0, menu.y));
    let panel_height = (SCREEN_HEIGHT - menu.y).max(0.0) as i32;
    canvas.fill_rect(left, top, SCREEN_WIDTH as i32, panel_height, MENU_PANEL_COLOR);

    let row_height = MENU_ROW_HEIGHT as i32;
    let title = menu.widget.title();
    // Title is bold: second pass one unit to the right.
    draw_centered_row(canvas, left, top, title, INK_COLOR);
    canvas.draw_text(
        left + (SCREEN_WIDTH as i32 - text_width(title)) / 2 + 1,
        top + (row_height - GLYPH_HEIGHT) / 2,
        title,
        INK_COLOR,
    );
    for (index, item) in menu.widget.items().iter().enumerate() {
        let row_top = top + (index as i32 + 1) * row_height;
        draw_centered_row(canvas, left, row_top, item, INK_COLOR);
    }

    let (x, y, w, h) = rect_px(menu.widget.highlight_band(), SCREEN_ORIGIN.x, SCREEN_ORIGIN.y + menu.y);
    canvas.rect_outline(x, y, w, h, MENU_BAND_COLOR);
}

fn draw_centered_row(canvas: &mut Canvas<'_>, left: i32, row_top: i32, text: &str, color: [u8; 4]) {
    let x = left + (SCREEN_WIDTH as i32 - text_width(text)) / 2;
    let y = row_top + (MENU_ROW_HEIGHT as i32 - GLYPH_HEIGHT) / 2;
    canvas.draw_text(x, y, text, color);
}

fn screen_px(position: Vec2) -> (i32, i32) {
    let device = screen_to_device(position);
    (device.x.round() as i32, device.y.round() as i32)
}

// Off-buffer window positions come back unclamped; pin them to the device edge.
fn clamp_to_device((x, y): (isize, isize)) -> Vec2 {
    Vec2::new(
        x.clamp(0, DEVICE_WIDTH as isize - 1) as f32,
        y.clamp(0, DEVICE_HEIGHT as isize - 1) as f32,
    )
}

fn rect_px(rect: Rect, offset_x: f32, offset_y: f32) -> (i32, i32, i32, i32) {
    (
        (rect.x + offset_x).round() as i32,
        (rect.y + offset_y).round() as i32,
        rect.width.round() as i32,
        rect.height.round() as i32,
    )
}
