//! Built-in modal message dialog.

use alloc::string::String;

use components::prelude::*;
use components::text_width;
use embedded_graphics::{pixelcolor::Rgb565, prelude::*, primitives::Rectangle};
use platform::config::{LINE_HEIGHT, MODAL_MESSAGE_ROW, SCREEN_WIDTH};
use platform::{Button as Key, InputEvent};

use crate::painter::Painter;
use crate::view::{Command, View};

const DISMISS_SIZE: Size = Size::new(80, 24);
const DISMISS_Y: i32 = (13 * LINE_HEIGHT) as i32;
const MESSAGE_Y: i32 = (MODAL_MESSAGE_ROW * LINE_HEIGHT) as i32;

/// A centered single-line message with one `OK` button that dismisses it.
///
/// The dialog takes every key press while it is on top; only `Select`
/// (on the pre-focused `OK`) does anything.
pub struct ModalMessageView {
    title: String,
    message: Label,
    dismiss: Button,
}

impl ModalMessageView {
    /// Create a dialog with status bar `title` and body `message`.
    pub fn new(title: &str, message: &str) -> Self {
        let mut view = Self {
            title: title.into(),
            message: Label::new(message, Point::zero()),
            dismiss: Button::new("OK", Rectangle::zero()),
        };
        view.layout(SCREEN_WIDTH);
        view.dismiss.set_focused(true);
        view
    }

    /// Body text (truncated to one screen row).
    pub fn message(&self) -> &str {
        self.message.text()
    }

    /// Top-left of the message text in view coordinates.
    pub fn message_position(&self) -> Point {
        self.message.position()
    }

    /// Whether the `OK` button holds focus.
    pub fn dismiss_has_focus(&self) -> bool {
        self.dismiss.has_focus()
    }

    fn layout(&mut self, width: u32) {
        let message_width = text_width(self.message.text()).min(width);
        self.message.set_position(Point::new(
            (width.saturating_sub(message_width) / 2) as i32,
            MESSAGE_Y,
        ));
        self.dismiss.set_bounds(Rectangle::new(
            Point::new((width.saturating_sub(DISMISS_SIZE.width) / 2) as i32, DISMISS_Y),
            DISMISS_SIZE,
        ));
    }
}

impl View for ModalMessageView {
    fn title(&self) -> &str {
        &self.title
    }

    fn set_parent_rect(&mut self, rect: Rectangle) {
        self.layout(rect.size.width);
    }

    fn render(&self, painter: &mut Painter<'_>) {
        painter.clear_to(Rgb565::BLACK);
        let _ = self.message.render(painter);
        let _ = self.dismiss.render(painter);
    }

    fn focus(&mut self) {
        self.dismiss.set_focused(true);
    }

    fn on_event(&mut self, event: InputEvent) -> Command {
        match event.button() {
            Some(Key::Select) if self.dismiss.has_focus() => Command::Pop,
            _ => Command::Consumed,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::painter::Surface;
    use platform::mocks::MockDisplay;

    #[test]
    fn test_message_is_centered_on_row_seven() {
        let view = ModalMessageView::new("Error", "Disk full");
        // 9 glyphs * 8 px = 72 px, (240 - 72) / 2 = 84
        assert_eq!(view.message_position(), Point::new(84, 112));
    }

    #[test]
    fn test_overlong_message_starts_at_left_edge() {
        let view = ModalMessageView::new("Error", "This message is much too long for the screen");
        assert_eq!(view.message_position().x, 0);
    }

    #[test]
    fn test_dismiss_focused_on_construction() {
        let view = ModalMessageView::new("Error", "Disk full");
        assert!(view.dismiss_has_focus());
        assert_eq!(view.title(), "Error");
    }

    #[test]
    fn test_select_dismisses_and_other_keys_are_swallowed() {
        let mut view = ModalMessageView::new("Error", "Disk full");
        assert!(matches!(
            view.on_event(InputEvent::ButtonPress(Key::Select)),
            Command::Pop
        ));
        assert!(matches!(
            view.on_event(InputEvent::ButtonPress(Key::Up)),
            Command::Consumed
        ));
        assert!(matches!(
            view.on_event(InputEvent::RotaryIncrement(1)),
            Command::Consumed
        ));
    }

    #[test]
    fn test_renders_message_and_button() {
        let mut display = MockDisplay::new(240, 304);
        let mut surface = Surface::new(&mut display);
        let view = ModalMessageView::new("Error", "Disk full");
        view.render(&mut Painter::new(&mut surface));
        let row_has_text = (84..156).any(|x| display.pixel_at(x, 118) == Some(Rgb565::WHITE));
        assert!(row_has_text);
        // Focused OK button is filled white.
        assert_eq!(display.pixel_at(81, 209), Some(Rgb565::WHITE));
    }
}
