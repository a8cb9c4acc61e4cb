//! Small stock views shared by every menu tree.

use components::prelude::*;
use components::text_width;
use embedded_graphics::{pixelcolor::Rgb565, prelude::*, primitives::Rectangle};
use platform::config::{LINE_HEIGHT, SCREEN_WIDTH};
use platform::{Button as Key, InputEvent, SystemMessage};

use crate::painter::Painter;
use crate::view::{Command, View};

const DIALOG_BUTTON: Size = Size::new(80, 24);
const BUTTON_Y: i32 = (13 * LINE_HEIGHT) as i32;
const CENTER_BUTTON_X: i32 = ((SCREEN_WIDTH - DIALOG_BUTTON.width) / 2) as i32;
const PLACEHOLDER_Y: i32 = (4 * LINE_HEIGHT) as i32;

fn centered_x(text: &str, width: u32) -> i32 {
    (width.saturating_sub(text_width(text)) / 2) as i32
}

fn button_rect(x: i32) -> Rectangle {
    Rectangle::new(Point::new(x, BUTTON_Y), DIALOG_BUTTON)
}

/// Placeholder for features that are not there yet; `OK` pops it.
pub struct NotImplementedView {
    text: Label,
    done: Button,
}

impl NotImplementedView {
    /// Message shown by the placeholder.
    pub const MESSAGE: &'static str = "Not Yet Implemented";

    /// Create the placeholder with `OK` focused.
    pub fn new() -> Self {
        let mut done = Button::new("OK", button_rect(CENTER_BUTTON_X));
        done.set_focused(true);
        Self {
            text: Label::new(
                Self::MESSAGE,
                Point::new(centered_x(Self::MESSAGE, SCREEN_WIDTH), PLACEHOLDER_Y),
            ),
            done,
        }
    }
}

impl Default for NotImplementedView {
    fn default() -> Self {
        Self::new()
    }
}

impl View for NotImplementedView {
    fn render(&self, painter: &mut Painter<'_>) {
        painter.clear_to(Rgb565::BLACK);
        let _ = self.text.render(painter);
        let _ = self.done.render(painter);
    }

    fn focus(&mut self) {
        self.done.set_focused(true);
    }

    fn on_event(&mut self, event: InputEvent) -> Command {
        match event {
            InputEvent::ButtonPress(Key::Select) => Command::Pop,
            _ => Command::Ignored,
        }
    }
}

/// Which answer of [`FirmwareHandoffView`] holds focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    /// Hand off to the stock firmware
    Yes,
    /// Go back
    No,
}

/// Confirmation before stopping and handing the device to the stock firmware.
///
/// `Yes` posts [`SystemMessage::RequestStop`]; `No` pops. `No` is focused by
/// default so a stray `Select` never leaves the application.
pub struct FirmwareHandoffView {
    lines: [Label; 4],
    yes: Button,
    no: Button,
}

impl FirmwareHandoffView {
    const TEXT: [&'static str; 4] = [
        "Run the stock firmware?",
        "RadioDeck will stop and",
        "hand the device over.",
        "Power cycle to return.",
    ];

    /// Create the confirmation with `No` focused.
    pub fn new() -> Self {
        let line = |row: u32| {
            let text = Self::TEXT.get(row as usize).copied().unwrap_or("");
            let y = row.saturating_add(3).saturating_mul(LINE_HEIGHT);
            Label::new(text, Point::new(centered_x(text, SCREEN_WIDTH), y as i32))
        };
        let mut view = Self {
            lines: [line(0), line(1), line(2), line(3)],
            yes: Button::new("Yes", button_rect(32)),
            no: Button::new("No", button_rect(128)),
        };
        view.select(Answer::No);
        view
    }

    /// The focused answer.
    pub fn answer(&self) -> Answer {
        if self.yes.has_focus() {
            Answer::Yes
        } else {
            Answer::No
        }
    }

    fn select(&mut self, answer: Answer) {
        self.yes.set_focused(answer == Answer::Yes);
        self.no.set_focused(answer == Answer::No);
    }
}

impl Default for FirmwareHandoffView {
    fn default() -> Self {
        Self::new()
    }
}

impl View for FirmwareHandoffView {
    fn title(&self) -> &str {
        "Stock Firmware"
    }

    fn render(&self, painter: &mut Painter<'_>) {
        painter.clear_to(Rgb565::BLACK);
        for line in &self.lines {
            let _ = line.render(painter);
        }
        let _ = self.yes.render(painter);
        let _ = self.no.render(painter);
    }

    fn focus(&mut self) {
        self.select(Answer::No);
    }

    fn on_event(&mut self, event: InputEvent) -> Command {
        match event {
            InputEvent::ButtonPress(Key::Left) => {
                self.select(Answer::Yes);
                Command::Consumed
            }
            InputEvent::ButtonPress(Key::Right) => {
                self.select(Answer::No);
                Command::Consumed
            }
            InputEvent::ButtonPress(Key::Select) => match self.answer() {
                Answer::Yes => {
                    tracing::info!("handing off to stock firmware");
                    Command::Send(SystemMessage::RequestStop)
                }
                Answer::No => Command::Pop,
            },
            _ => Command::Ignored,
        }
    }
}
