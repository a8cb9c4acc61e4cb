//! Vertical list menu whose entries open new views.

use alloc::boxed::Box;
use alloc::vec::Vec;

use components::prelude::*;
use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
};
use platform::{Button as Key, InputEvent};

use crate::painter::Painter;
use crate::view::{Command, View};

/// Height of one menu row in pixels.
pub const MENU_ROW_HEIGHT: u32 = 24;
const TEXT_INSET: i32 = 8;
const TEXT_DROP: i32 = 5;

/// One menu entry: a label and the constructor of the view it opens.
#[derive(Clone, Copy)]
pub struct MenuItem {
    /// Row text
    pub label: &'static str,
    /// Builds the view pushed when the entry is selected
    pub open: fn() -> Box<dyn View>,
}

impl MenuItem {
    /// Entry labelled `label` opening `open()`.
    pub const fn new(label: &'static str, open: fn() -> Box<dyn View>) -> Self {
        Self { label, open }
    }
}

impl core::fmt::Debug for MenuItem {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MenuItem").field("label", &self.label).finish()
    }
}

/// A titled list of [`MenuItem`]s with one highlighted row.
///
/// `Up` on the first row is left unhandled so the owner can move focus to the
/// status bar. `Left` pops the menu.
pub struct MenuView {
    title: &'static str,
    items: Vec<MenuItem>,
    highlighted: usize,
    focused: bool,
    width: u32,
}

impl MenuView {
    /// Create a menu titled `title`.
    pub fn new(title: &'static str, items: Vec<MenuItem>) -> Self {
        Self {
            title,
            items,
            highlighted: 0,
            focused: false,
            width: platform::config::SCREEN_WIDTH,
        }
    }

    /// Index of the highlighted row.
    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    /// The entries, top to bottom.
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    fn move_by(&mut self, delta: i32) -> Command {
        let last = self.items.len().saturating_sub(1);
        let steps = usize::try_from(delta.unsigned_abs()).unwrap_or(usize::MAX);
        let target = if delta < 0 {
            self.highlighted.saturating_sub(steps)
        } else {
            self.highlighted.saturating_add(steps).min(last)
        };
        self.highlighted = target;
        Command::Consumed
    }

    fn open_highlighted(&self) -> Command {
        match self.items.get(self.highlighted) {
            Some(item) => {
                tracing::debug!(entry = item.label, menu = self.title, "open");
                Command::Push((item.open)())
            }
            None => Command::Ignored,
        }
    }
}

impl View for MenuView {
    fn title(&self) -> &str {
        self.title
    }

    fn set_parent_rect(&mut self, rect: Rectangle) {
        self.width = rect.size.width;
    }

    fn render(&self, painter: &mut Painter<'_>) {
        painter.clear_to(Rgb565::BLACK);
        let tops = (0..).step_by(MENU_ROW_HEIGHT as usize);
        for ((index, item), top) in self.items.iter().enumerate().zip(tops) {
            let row = Rectangle::new(Point::new(0, top), Size::new(self.width, MENU_ROW_HEIGHT));
            let selected = self.focused && index == self.highlighted;
            let foreground = if selected {
                let _ = row
                    .into_styled(PrimitiveStyle::with_fill(Rgb565::WHITE))
                    .draw(painter);
                Rgb565::BLACK
            } else {
                Rgb565::WHITE
            };
            let _ = Label::new(item.label, Point::new(TEXT_INSET, top.saturating_add(TEXT_DROP)))
                .color(foreground)
                .render(painter);
        }
    }

    fn focus(&mut self) {
        self.focused = true;
    }

    fn on_hide(&mut self) {
        self.focused = false;
    }

    fn on_event(&mut self, event: InputEvent) -> Command {
        match event {
            InputEvent::RotaryIncrement(delta) => self.move_by(delta),
            InputEvent::ButtonPress(Key::Up) if self.highlighted == 0 => Command::Ignored,
            InputEvent::ButtonPress(Key::Up) => self.move_by(-1),
            InputEvent::ButtonPress(Key::Down) => self.move_by(1),
            InputEvent::ButtonPress(Key::Select) => self.open_highlighted(),
            InputEvent::ButtonPress(Key::Left) => Command::Pop,
            _ => Command::Ignored,
        }
    }
}
