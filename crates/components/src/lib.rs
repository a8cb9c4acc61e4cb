//! UI Components
//!
//! Widget primitives composed by views and the status bar.
//!
//! # Components
//!
//! - `Button` - Focusable text button with enabled/disabled states
//! - `ImageButton` - Focusable icon button (camera, sleep)
//! - `Label` - Static text display
//!
//! All components draw with the fixed 8-pixel UI font, so text width is
//! always `chars * GLYPH_WIDTH`.
//!
//! # Example
//!
//! ```no_run
//! use components::prelude::*;
//! use embedded_graphics::{prelude::*, primitives::Rectangle};
//!
//! let mut button = Button::new("OK", Rectangle::new(Point::new(88, 200), Size::new(64, 24)));
//! button.set_focused(true);
//! ```

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![deny(clippy::expect_used)]
// Widget coordinates are screen-sized (at most 320 px), so u32 <-> i32 casts
// cannot wrap.
#![allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]

pub mod button;
pub mod icon;
pub mod label;

use embedded_graphics::mono_font::{ascii::FONT_8X13, MonoFont};

/// The fixed UI font (8 pixels per glyph).
pub const UI_FONT: &MonoFont<'static> = &FONT_8X13;

/// Something that can hold the single input focus.
pub trait Focusable {
    /// Whether the widget currently accepts focus.
    fn is_focusable(&self) -> bool;

    /// Give or take focus. Returns `false` if focus was refused.
    fn set_focused(&mut self, focused: bool) -> bool;

    /// Whether the widget holds focus.
    fn has_focus(&self) -> bool;
}

/// Copy as much of `text` as fits into a bounded string.
pub fn truncated<const N: usize>(text: &str) -> heapless::String<N> {
    let mut out = heapless::String::new();
    for c in text.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

/// Pixel width of `text` in the UI font.
pub fn text_width(text: &str) -> u32 {
    u32::try_from(text.chars().count())
        .unwrap_or(u32::MAX)
        .saturating_mul(platform::config::GLYPH_WIDTH)
}

pub mod prelude {
    //! Glob-importable component types.
    pub use crate::button::*;
    pub use crate::icon::*;
    pub use crate::label::*;
    pub use crate::Focusable;
}
