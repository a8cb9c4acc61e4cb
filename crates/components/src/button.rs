//! Button component

use embedded_graphics::{
    mono_font::MonoTextStyle,
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};

use crate::{truncated, Focusable, UI_FONT};

/// Maximum number of characters a button label keeps.
pub const BUTTON_TEXT_CAPACITY: usize = 24;

/// Bounded button label
pub type ButtonText = heapless::String<BUTTON_TEXT_CAPACITY>;

/// Button style presets
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ButtonStyle {
    /// Fill behind the label
    pub background: Rgb565,
    /// Label color
    pub foreground: Rgb565,
    /// One-pixel outline, if any
    pub border: Option<Rgb565>,
    /// Fill while the button holds focus
    pub focus_background: Rgb565,
    /// Label color while the button holds focus
    pub focus_foreground: Rgb565,
    /// Text color while the button refuses focus
    pub disabled_foreground: Rgb565,
}

impl ButtonStyle {
    /// Dialog button (outlined, inverted when focused)
    pub fn primary() -> Self {
        Self {
            background: Rgb565::BLACK,
            foreground: Rgb565::WHITE,
            border: Some(Rgb565::WHITE),
            focus_background: Rgb565::WHITE,
            focus_foreground: Rgb565::BLACK,
            disabled_foreground: Rgb565::new(12, 24, 12),
        }
    }

    /// Status bar button (no border, blends with the bar)
    pub fn bar() -> Self {
        Self {
            background: Rgb565::new(6, 12, 6),
            foreground: Rgb565::WHITE,
            border: None,
            focus_background: Rgb565::WHITE,
            focus_foreground: Rgb565::BLACK,
            disabled_foreground: Rgb565::new(14, 28, 14),
        }
    }
}

/// Focusable text button
pub struct Button {
    text: ButtonText,
    rect: Rectangle,
    style: ButtonStyle,
    focusable: bool,
    focused: bool,
}

impl Button {
    /// Create a new button with the given label occupying `rect`
    pub fn new(text: &str, rect: Rectangle) -> Self {
        Self {
            text: truncated(text),
            rect,
            style: ButtonStyle::primary(),
            focusable: true,
            focused: false,
        }
    }

    /// Set button style
    pub fn style(mut self, style: ButtonStyle) -> Self {
        self.style = style;
        self
    }

    /// Replace the label
    pub fn set_text(&mut self, text: &str) {
        self.text = truncated(text);
    }

    /// Current label
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Allow or refuse focus. Refusing drops focus the button holds.
    pub fn set_focusable(&mut self, focusable: bool) {
        self.focusable = focusable;
        if !focusable {
            self.focused = false;
        }
    }

    /// Move the button
    pub fn set_bounds(&mut self, rect: Rectangle) {
        self.rect = rect;
    }

    /// Render button to display
    pub fn render<D>(&self, display: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let (background, foreground) = if self.focused {
            (self.style.focus_background, self.style.focus_foreground)
        } else if self.focusable {
            (self.style.background, self.style.foreground)
        } else {
            (self.style.background, self.style.disabled_foreground)
        };

        self.rect
            .into_styled(PrimitiveStyle::with_fill(background))
            .draw(display)?;
        if let Some(border) = self.style.border {
            self.rect
                .into_styled(PrimitiveStyle::with_stroke(border, 1))
                .draw(display)?;
        }

        let text_style = MonoTextStyle::new(UI_FONT, foreground);
        let layout = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Middle)
            .build();
        Text::with_text_style(&self.text, self.rect.center(), text_style, layout).draw(display)?;

        Ok(())
    }
}

impl Focusable for Button {
    fn is_focusable(&self) -> bool {
        self.focusable
    }

    fn set_focused(&mut self, focused: bool) -> bool {
        if focused && !self.focusable {
            return false;
        }
        self.focused = focused;
        true
    }

    fn has_focus(&self) -> bool {
        self.focused
    }
}
