use super::font::{glyph_bits, glyph_pixel_set, GLYPH_ADVANCE, GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::app::layout::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ClipRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl ClipRect {
    pub(crate) fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            right: left + width,
            bottom: top + height,
        }
    }

    fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }

    fn intersect(&self, other: ClipRect) -> ClipRect {
        ClipRect {
            left: self.left.max(other.left),
            top: self.top.max(other.top),
            right: self.right.min(other.right),
            bottom: self.bottom.min(other.bottom),
        }
    }
}

pub(crate) struct Canvas<'a> {
    frame: &'a mut [u8],
    width: u32,
    height: u32,
    clip: ClipRect,
}

impl<'a> Canvas<'a> {
    pub(crate) fn new(frame: &'a mut [u8], width: u32, height: u32) -> Self {
        Self {
            frame,
            width,
            height,
            clip: ClipRect::new(0, 0, width as i32, height as i32),
        }
    }

    pub(crate) fn width(&self) -> u32 {
        self.width
    }

    pub(crate) fn height(&self) -> u32 {
        self.height
    }

    pub(crate) fn set_clip(&mut self, clip: ClipRect) {
        self.clip = clip.intersect(ClipRect::new(0, 0, self.width as i32, self.height as i32));
    }

    pub(crate) fn reset_clip(&mut self) {
        self.clip = ClipRect::new(0, 0, self.width as i32, self.height as i32);
    }

    pub(crate) fn fill(&mut self, color: [u8; 4]) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&color);
        }
    }

    #[cfg(test)]
    pub(crate) fn pixel(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        let offset = self.byte_offset(x, y)?;
        let mut out = [0u8; 4];
        out.copy_from_slice(&self.frame[offset..offset + 4]);
        Some(out)
    }

    pub(crate) fn write_pixel(&mut self, x: i32, y: i32, color: [u8; 4]) {
        if !self.clip.contains(x, y) {
            return;
        }
        if let Some(offset) = self.byte_offset(x, y) {
            self.frame[offset..offset + 4].copy_from_slice(&color);
        }
    }

    pub(crate) fn blend_pixel(&mut self, x: i32, y: i32, color: [u8; 4]) {
        if !self.clip.contains(x, y) {
            return;
        }
        let Some(offset) = self.byte_offset(x, y) else {
            return;
        };
        let alpha = color[3] as u32;
        let inverse = 255 - alpha;
        for channel in 0..3 {
            let dst = self.frame[offset + channel] as u32;
            let src = color[channel] as u32;
            self.frame[offset + channel] = ((src * alpha + dst * inverse + 127) / 255) as u8;
        }
        self.frame[offset + 3] = 255;
    }

    pub(crate) fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: [u8; 4]) {
        let area = ClipRect::new(x, y, width, height).intersect(self.clip);
        for py in area.top..area.bottom {
            for px in area.left..area.right {
                self.write_pixel(px, py, color);
            }
        }
    }

    pub(crate) fn rect_outline(&mut self, x: i32, y: i32, width: i32, height: i32, color: [u8; 4]) {
        if width <= 1 || height <= 1 {
            return;
        }
        self.fill_rect(x, y, width, 1, color);
        self.fill_rect(x, y + height - 1, width, 1, color);
        self.fill_rect(x, y, 1, height, color);
        self.fill_rect(x + width - 1, y, 1, height, color);
    }

    pub(crate) fn fill_polygon(&mut self, vertices: &[Vec2], offset: Vec2, color: [u8; 4]) {
        if vertices.len() < 3 {
            return;
        }
        let points: Vec<Vec2> = vertices
            .iter()
            .map(|vertex| Vec2::new(vertex.x + offset.x, vertex.y + offset.y))
            .collect();
        let min_x = points.iter().map(|p| p.x).fold(f32::INFINITY, f32::min).floor() as i32;
        let max_x = points.iter().map(|p| p.x).fold(f32::NEG_INFINITY, f32::max).ceil() as i32;
        let min_y = points.iter().map(|p| p.y).fold(f32::INFINITY, f32::min).floor() as i32;
        let max_y = points.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max).ceil() as i32;

        for py in min_y..max_y {
            for px in min_x..max_x {
                let sample = Vec2::new(px as f32 + 0.5, py as f32 + 0.5);
                if point_in_polygon(&points, sample) {
                    self.blend_pixel(px, py, color);
                }
            }
        }
    }

    pub(crate) fn blit_rgba(&mut self, x: i32, y: i32, image_width: u32, image_height: u32, rgba: &[u8]) {
        if rgba.len() < image_width as usize * image_height as usize * 4 {
            return;
        }
        for row in 0..image_height as i32 {
            for col in 0..image_width as i32 {
                let src = (row as usize * image_width as usize + col as usize) * 4;
                let texel = [rgba[src], rgba[src + 1], rgba[src + 2], rgba[src + 3]];
                match texel[3] {
                    0 => {}
                    255 => self.write_pixel(x + col, y + row, texel),
                    _ => self.blend_pixel(x + col, y + row, texel),
                }
            }
        }
    }

    pub(crate) fn draw_text(&mut self, x: i32, y: i32, text: &str, color: [u8; 4]) {
        let mut pen_x = x;
        for ch in text.chars() {
            let bits = glyph_bits(ch);
            for row in 0..GLYPH_HEIGHT {
                for col in 0..GLYPH_WIDTH {
                    if glyph_pixel_set(bits, col, row) {
                        self.write_pixel(pen_x + col, y + row, color);
                    }
                }
            }
            pen_x += GLYPH_ADVANCE;
        }
    }

    fn byte_offset(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        (offset + 4 <= self.frame.len()).then_some(offset)
    }
}

fn point_in_polygon(points: &[Vec2], sample: Vec2) -> bool {
    let mut inside = false;
    let mut previous = points[points.len() - 1];
    for &current in points {
        let crosses = (current.y > sample.y) != (previous.y > sample.y);
        if crosses {
            let x_at_y = (previous.x - current.x) * (sample.y - current.y)
                / (previous.y - current.y)
                + current.x;
            if sample.x < x_at_y {
                inside = !inside;
            }
        }
        previous = current;
    }
    inside
}
