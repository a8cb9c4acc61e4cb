//! Fixed two-region screen layout: status bar on top, navigation area below.

use embedded_graphics::{prelude::*, primitives::Rectangle};
use platform::config::{SCREEN_HEIGHT, SCREEN_WIDTH, STATUS_BAR_HEIGHT};

/// Screen split used by [`SystemView`](crate::SystemView).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Whole screen
    pub screen: Rectangle,
    /// Status bar strip
    pub status_bar: Rectangle,
    /// Area given to the active view
    pub navigation: Rectangle,
}

impl Layout {
    /// Split a screen of `size` into status bar and navigation area.
    pub fn for_screen(size: Size) -> Self {
        let bar_height = STATUS_BAR_HEIGHT.min(size.height);
        Self {
            screen: Rectangle::new(Point::zero(), size),
            status_bar: Rectangle::new(Point::zero(), Size::new(size.width, bar_height)),
            navigation: Rectangle::new(
                Point::new(0, bar_height as i32),
                Size::new(size.width, size.height.saturating_sub(bar_height)),
            ),
        }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::for_screen(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT))
    }
}

/// Smallest rectangle covering both `a` and `b`.
pub fn union(a: Rectangle, b: Rectangle) -> Rectangle {
    let (Some(a_end), Some(b_end)) = (a.bottom_right(), b.bottom_right()) else {
        return if a.is_zero_sized() { b } else { a };
    };
    Rectangle::with_corners(
        a.top_left.component_min(b.top_left),
        a_end.component_max(b_end),
    )
}
