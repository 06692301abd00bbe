use tracing::debug;

use super::layout::{Rect, SCREEN_WIDTH};

pub const MENU_ROW_HEIGHT: f32 = 14.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEvent {
    ItemSelected(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuWidget {
    title: String,
    items: Vec<String>,
    current_index: usize,
    active: bool,
}

impl MenuWidget {
    pub fn new(title: impl Into<String>, items: Vec<String>) -> Option<Self> {
        if items.is_empty() {
            return None;
        }
        Some(Self {
            title: title.into(),
            items,
            current_index: 0,
            active: false,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_item(&self) -> &str {
        &self.items[self.current_index]
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn move_next(&mut self) {
        self.current_index = (self.current_index + 1).min(self.items.len() - 1);
        debug!(index = self.current_index, "menu_cursor_moved");
    }

    pub fn move_previous(&mut self) {
        self.current_index = self.current_index.saturating_sub(1);
        debug!(index = self.current_index, "menu_cursor_moved");
    }

    pub fn commit(&self) -> MenuEvent {
        MenuEvent::ItemSelected(self.current_item().to_string())
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn highlight_band(&self) -> Rect {
        Rect::new(
            0.0,
            (self.current_index + 1) as f32 * MENU_ROW_HEIGHT,
            SCREEN_WIDTH,
            MENU_ROW_HEIGHT,
        )
    }
}
