use super::layout::Vec2;
use super::menu::MenuWidget;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Image { key: String, position: Vec2 },
    TextBox { text: String, position: Vec2 },
    BoldLabel { text: String, position: Vec2 },
    Label { text: String, position: Vec2 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedMenu {
    pub y: f32,
    pub widget: MenuWidget,
}

#[derive(Debug, Clone, Default)]
pub struct Screen {
    stage: Vec<DrawCommand>,
    commands: Vec<DrawCommand>,
    menu: Option<PlacedMenu>,
}

impl Screen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.stage.clear();
        self.commands.clear();
        self.menu = None;
    }

    pub fn draw_image(&mut self, key: &str, x: f32, y: f32) {
        self.push(DrawCommand::Image {
            key: key.to_string(),
            position: Vec2::new(x, y),
        });
    }

    // The stage paints under every other command. Setting it replaces the
    // previous stage instead of stacking on top of it.
    pub fn set_stage<K: Into<String>>(&mut self, images: impl IntoIterator<Item = (K, f32, f32)>) {
        self.stage.clear();
        self.stage.extend(images.into_iter().map(|(key, x, y)| DrawCommand::Image {
            key: key.into(),
            position: Vec2::new(x, y),
        }));
    }

    pub fn draw_text(&mut self, text: &str, x: f32, y: f32) {
        self.push(DrawCommand::TextBox {
            text: text.to_string(),
            position: Vec2::new(x, y),
        });
    }

    pub fn draw_bold_label(&mut self, text: &str, x: f32, y: f32) {
        self.push(DrawCommand::BoldLabel {
            text: text.to_string(),
            position: Vec2::new(x, y),
        });
    }

    pub fn draw_label(&mut self, text: &str, x: f32, y: f32) {
        self.push(DrawCommand::Label {
            text: text.to_string(),
            position: Vec2::new(x, y),
        });
    }

    pub fn draw_menu(&mut self, title: &str, items: Vec<String>, y: f32) -> Option<&mut MenuWidget> {
        let widget = MenuWidget::new(title, items)?;
        let placed = self.menu.insert(PlacedMenu { y, widget });
        Some(&mut placed.widget)
    }

    pub fn menu(&self) -> Option<&MenuWidget> {
        self.menu.as_ref().map(|placed| &placed.widget)
    }

    pub fn menu_mut(&mut self) -> Option<&mut MenuWidget> {
        self.menu.as_mut().map(|placed| &mut placed.widget)
    }

    pub fn placed_menu(&self) -> Option<&PlacedMenu> {
        self.menu.as_ref()
    }

    pub fn stage(&self) -> &[DrawCommand] {
        &self.stage
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn display_list(&self) -> impl Iterator<Item = &DrawCommand> {
        self.stage.iter().chain(&self.commands)
    }

    pub fn image_keys(&self) -> impl Iterator<Item = &str> {
        self.display_list().filter_map(|command| match command {
            DrawCommand::Image { key, .. } => Some(key.as_str()),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.display_list().filter_map(|command| match command {
            DrawCommand::TextBox { text, .. }
            | DrawCommand::BoldLabel { text, .. }
            | DrawCommand::Label { text, .. } => Some(text.as_str()),
            DrawCommand::Image { .. } => None,
        })
    }

    fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}
