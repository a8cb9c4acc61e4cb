//! Object-safe drawing surface for views.
//!
//! `DrawTarget` is generic over its pixel iterator and cannot be used as a
//! trait object, but the navigation stack holds `Box<dyn View>`. Views therefore
//! draw into a [`Painter`], which forwards pixels to a `&mut dyn Canvas` after
//! translating them from view-local coordinates and clipping them to the
//! view's rectangle.

use core::convert::Infallible;

use embedded_graphics::{pixelcolor::Rgb565, prelude::*, primitives::Rectangle};

/// Type-erased pixel sink.
pub trait Canvas {
    /// Size of the whole surface.
    fn size(&self) -> Size;

    /// Write every pixel of `pixels` (already in surface coordinates).
    fn draw_pixels(&mut self, pixels: &mut dyn Iterator<Item = Pixel<Rgb565>>);
}

/// [`Canvas`] over any RGB565 `DrawTarget`, remembering whether a write failed.
pub struct Surface<'a, D> {
    target: &'a mut D,
    failed: bool,
}

impl<'a, D: DrawTarget<Color = Rgb565>> Surface<'a, D> {
    /// Wrap `target`.
    pub fn new(target: &'a mut D) -> Self {
        Self {
            target,
            failed: false,
        }
    }

    /// Whether any write to the target returned an error.
    pub fn failed(&self) -> bool {
        self.failed
    }
}

impl<D: DrawTarget<Color = Rgb565>> Canvas for Surface<'_, D> {
    fn size(&self) -> Size {
        self.target.bounding_box().size
    }

    fn draw_pixels(&mut self, pixels: &mut dyn Iterator<Item = Pixel<Rgb565>>) {
        if self.target.draw_iter(pixels).is_err() {
            self.failed = true;
        }
    }
}

/// Clipped, origin-translated `DrawTarget` handed to views.
pub struct Painter<'a> {
    canvas: &'a mut dyn Canvas,
    area: Rectangle,
}

impl<'a> Painter<'a> {
    /// Painter covering the whole canvas.
    pub fn new(canvas: &'a mut dyn Canvas) -> Self {
        let area = Rectangle::new(Point::zero(), canvas.size());
        Self { canvas, area }
    }

    /// Painter for `rect`, given in this painter's local coordinates.
    ///
    /// The child is clipped to this painter's area.
    pub fn child(&mut self, rect: Rectangle) -> Painter<'_> {
        let area = rect
            .translate(self.area.top_left)
            .intersection(&self.area);
        Painter {
            canvas: &mut *self.canvas,
            area,
        }
    }

    /// The area this painter covers, in canvas coordinates.
    pub fn area(&self) -> Rectangle {
        self.area
    }

    /// Fill the whole area with `color`.
    pub fn clear_to(&mut self, color: Rgb565) {
        let local = self.bounding_box();
        let _ = self.fill_solid(&local, color);
    }
}

impl Dimensions for Painter<'_> {
    fn bounding_box(&self) -> Rectangle {
        Rectangle::new(Point::zero(), self.area.size)
    }
}

impl DrawTarget for Painter<'_> {
    type Color = Rgb565;
    type Error = Infallible;

    #[allow(clippy::arithmetic_side_effects)] // Painter areas lie on the screen; translated points fit i32
    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let area = self.area;
        let mut visible = pixels
            .into_iter()
            .map(|Pixel(point, color)| Pixel(point + area.top_left, color))
            .filter(|Pixel(point, _)| area.contains(*point));
        self.canvas.draw_pixels(&mut visible);
        Ok(())
    }
}
