//! Icon button component

use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{Circle, Line, PrimitiveStyle, Rectangle},
};

use crate::button::ButtonStyle;
use crate::Focusable;

/// Icon types
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum IconType {
    /// Camera body with lens, the screenshot trigger
    Camera,
    /// Crescent moon, the sleep trigger
    Sleep,
    /// Memory card outline, the storage presence indicator
    SdCard,
}

const SD_CARD_SIZE: Size = Size::new(10, 12);

/// Button showing an icon instead of text.
///
/// An inactive button draws its icon in the style's disabled color; an
/// inactive [`IconType::SdCard`] is also struck through.
pub struct ImageButton {
    icon: IconType,
    rect: Rectangle,
    style: ButtonStyle,
    focusable: bool,
    active: bool,
    focused: bool,
}

impl ImageButton {
    /// Create a new icon button occupying `rect`
    pub fn new(icon: IconType, rect: Rectangle) -> Self {
        Self {
            icon,
            rect,
            style: ButtonStyle::bar(),
            focusable: true,
            active: true,
            focused: false,
        }
    }

    /// Display-only variant that never takes focus
    pub fn indicator(mut self) -> Self {
        self.focusable = false;
        self.focused = false;
        self
    }

    /// Show the icon normally or dimmed
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Whether the icon is drawn in its normal color
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Render icon button to display
    pub fn render<D>(&self, display: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let (background, foreground) = if self.focused {
            (self.style.focus_background, self.style.focus_foreground)
        } else if self.active {
            (self.style.background, self.style.foreground)
        } else {
            (self.style.background, self.style.disabled_foreground)
        };
        self.rect
            .into_styled(PrimitiveStyle::with_fill(background))
            .draw(display)?;

        match self.icon {
            IconType::Camera => self.render_camera(display, foreground),
            IconType::Sleep => self.render_sleep(display, foreground, background),
            IconType::SdCard => self.render_sd_card(display, foreground),
        }
    }

    #[allow(clippy::arithmetic_side_effects)] // Offsets of a few px inside the control
    fn render_camera<D>(&self, display: &mut D, color: Rgb565) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        // Body
        let body = Rectangle::with_center(self.rect.center(), Size::new(12, 8));
        body.into_styled(PrimitiveStyle::with_stroke(color, 1))
            .draw(display)?;

        // Lens
        Circle::with_center(self.rect.center(), 5)
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(display)?;

        // Viewfinder bump
        Rectangle::new(body.top_left + Point::new(2, -2), Size::new(4, 2))
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(display)?;

        Ok(())
    }

    #[allow(clippy::arithmetic_side_effects)] // Offsets of a few px inside the control
    fn render_sleep<D>(&self, display: &mut D, color: Rgb565, background: Rgb565) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        // Full disc with an offset disc cut out of it
        let center = self.rect.center();
        Circle::with_center(center, 11)
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(display)?;
        Circle::with_center(center + Point::new(3, -2), 9)
            .into_styled(PrimitiveStyle::with_fill(background))
            .draw(display)?;

        Ok(())
    }

    #[allow(clippy::arithmetic_side_effects)] // Offsets of a few px inside the control
    fn render_sd_card<D>(&self, display: &mut D, color: Rgb565) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let card = Rectangle::with_center(self.rect.center(), SD_CARD_SIZE);
        card.into_styled(PrimitiveStyle::with_stroke(color, 1))
            .draw(display)?;

        // Contacts along the top edge
        for x in [2, 4, 6] {
            let top = card.top_left + Point::new(x, 2);
            Line::new(top, top + Point::new(0, 2))
                .into_styled(PrimitiveStyle::with_stroke(color, 1))
                .draw(display)?;
        }

        if !self.active {
            if let Some(corner) = card.bottom_right() {
                Line::new(card.top_left, corner)
                    .into_styled(PrimitiveStyle::with_stroke(color, 1))
                    .draw(display)?;
            }
        }

        Ok(())
    }
}

impl Focusable for ImageButton {
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

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use platform::mocks::MockDisplay;

    #[test]
    fn test_icons_render_inside_bounds() {
        for icon in [IconType::Camera, IconType::Sleep, IconType::SdCard] {
            let mut display = MockDisplay::new(40, 20);
            let button = ImageButton::new(icon, Rectangle::new(Point::new(8, 0), Size::new(16, 16)));
            button.render(&mut display).unwrap();
            assert!(display.pixels_drawn() > 0);
            // Nothing outside the button's column range is touched.
            assert_eq!(display.pixel_at(0, 8), Some(Rgb565::BLACK));
            assert_eq!(display.pixel_at(30, 8), Some(Rgb565::BLACK));
        }
    }

    #[test]
    fn test_image_button_focusable_by_default() {
        let mut button = ImageButton::new(IconType::Sleep, Rectangle::zero());
        assert!(button.set_focused(true));
        assert!(button.has_focus());
    }

    #[test]
    fn test_indicator_refuses_focus() {
        let mut indicator = ImageButton::new(IconType::SdCard, Rectangle::zero()).indicator();
        assert!(!indicator.is_focusable());
        assert!(!indicator.set_focused(true));
        assert!(!indicator.has_focus());
    }

    fn count(display: &MockDisplay, color: Rgb565) -> usize {
        (0..24)
            .flat_map(|x| (0..16).map(move |y| (x, y)))
            .filter(|&(x, y)| display.pixel_at(x, y) == Some(color))
            .count()
    }

    #[test]
    fn test_inactive_sd_card_is_dimmed_and_struck_through() {
        let rect = Rectangle::new(Point::zero(), Size::new(24, 16));
        let style = ButtonStyle::bar();
        let mut indicator = ImageButton::new(IconType::SdCard, rect).indicator();

        let mut present = MockDisplay::new(24, 16);
        indicator.render(&mut present).unwrap();
        let drawn = count(&present, style.foreground);
        assert!(drawn > 0);
        assert_eq!(count(&present, style.disabled_foreground), 0);

        indicator.set_active(false);
        assert!(!indicator.is_active());
        let mut absent = MockDisplay::new(24, 16);
        indicator.render(&mut absent).unwrap();
        assert_eq!(count(&absent, style.foreground), 0);
        // The strike-through adds pixels on top of the dimmed outline.
        assert!(count(&absent, style.disabled_foreground) > drawn);
    }
}
