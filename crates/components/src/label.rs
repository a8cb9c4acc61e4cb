//! Label component for displaying text

use embedded_graphics::{
    mono_font::MonoTextStyle,
    pixelcolor::Rgb565,
    prelude::*,
    text::{Baseline, Text},
};

use crate::{text_width, truncated, UI_FONT};

/// Maximum number of characters a label keeps (a full 240 px row).
pub const LABEL_CAPACITY: usize = 30;

/// Bounded label text
pub type LabelText = heapless::String<LABEL_CAPACITY>;

/// Label component for single-line text display
pub struct Label {
    text: LabelText,
    position: Point,
    color: Rgb565,
    background: Option<Rgb565>,
}

impl Label {
    /// Create a new label with the given text, top-left anchored at `position`
    pub fn new(text: &str, position: Point) -> Self {
        Self {
            text: truncated(text),
            position,
            color: Rgb565::WHITE,
            background: None,
        }
    }

    /// Set text color
    pub fn color(mut self, color: Rgb565) -> Self {
        self.color = color;
        self
    }

    /// Fill behind the glyphs (needed when the label is redrawn in place)
    pub fn background(mut self, background: Rgb565) -> Self {
        self.background = Some(background);
        self
    }

    /// Replace the text
    pub fn set(&mut self, text: &str) {
        self.text = truncated(text);
    }

    /// Current text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Move the label
    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    /// Top-left anchor
    pub fn position(&self) -> Point {
        self.position
    }

    /// Get text dimensions
    pub fn dimensions(&self) -> Size {
        Size::new(text_width(&self.text), UI_FONT.character_size.height)
    }

    /// Render label to display
    pub fn render<D>(&self, display: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let mut text_style = MonoTextStyle::new(UI_FONT, self.color);
        text_style.background_color = self.background;
        Text::with_baseline(&self.text, self.position, text_style, Baseline::Top).draw(display)?;
        Ok(())
    }
}
