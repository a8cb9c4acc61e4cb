//! Mock implementations for testing
//!
//! This module provides mock implementations of all platform traits
//! for use in unit and integration tests.

#![cfg(any(test, feature = "std"))]

use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::rc::Rc;
use std::string::{String, ToString};
use std::vec::Vec;

use crate::display::check_readback;
use crate::storage::candidate_names;
use crate::*;
use embedded_graphics::{
    pixelcolor::{Rgb565, Rgb888},
    prelude::*,
    primitives::Rectangle,
};

/// Mock display implementation backed by an in-memory RGB565 framebuffer
pub struct MockDisplay {
    width: u32,
    height: u32,
    framebuffer: Vec<Rgb565>,
    pixels_drawn: usize,
    fail_readback: bool,
}

impl MockDisplay {
    /// Create new mock display filled with black
    pub fn new(width: u32, height: u32) -> Self {
        let len = usize::try_from(u64::from(width).saturating_mul(u64::from(height))).unwrap_or(0);
        Self {
            width,
            height,
            framebuffer: vec![Rgb565::BLACK; len],
            pixels_drawn: 0,
            fail_readback: false,
        }
    }

    /// Number of in-bounds pixels written since creation
    pub fn pixels_drawn(&self) -> usize {
        self.pixels_drawn
    }

    /// Color at `(x, y)`, or `None` if out of bounds
    pub fn pixel_at(&self, x: u32, y: u32) -> Option<Rgb565> {
        self.index(Point::new(i32::try_from(x).ok()?, i32::try_from(y).ok()?))
            .and_then(|i| self.framebuffer.get(i).copied())
    }

    /// Make every subsequent read-back fail with [`DisplayError::Communication`]
    pub fn fail_readback(&mut self, fail: bool) {
        self.fail_readback = fail;
    }

    fn index(&self, p: Point) -> Option<usize> {
        let x = u32::try_from(p.x).ok()?;
        let y = u32::try_from(p.y).ok()?;
        if x >= self.width || y >= self.height {
            return None;
        }
        let row_start = u64::from(y).checked_mul(u64::from(self.width))?;
        usize::try_from(row_start.checked_add(u64::from(x))?).ok()
    }
}

impl DrawTarget for MockDisplay {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some(slot) = self.index(point).and_then(|i| self.framebuffer.get_mut(i)) {
                *slot = color;
                self.pixels_drawn = self.pixels_drawn.saturating_add(1);
            }
        }
        Ok(())
    }
}

impl OriginDimensions for MockDisplay {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl FrameReadback for MockDisplay {
    type Error = DisplayError;

    fn read_pixels(&mut self, area: Rectangle, out: &mut [Rgb888]) -> Result<(), Self::Error> {
        if self.fail_readback {
            return Err(DisplayError::Communication);
        }
        check_readback(self.size(), area, out.len())?;
        for (slot, point) in out.iter_mut().zip(area.points()) {
            let color = self
                .index(point)
                .and_then(|i| self.framebuffer.get(i).copied())
                .ok_or(DisplayError::OutOfBounds)?;
            *slot = Rgb888::from(color);
        }
        Ok(())
    }
}

/// Mock input device
pub struct MockInput {
    events: VecDeque<InputEvent>,
}

impl MockInput {
    /// Create new mock input
    pub fn new() -> Self {
        Self {
            events: VecDeque::new(),
        }
    }

    /// Queue a press of each key in order
    pub fn press_all(&mut self, buttons: &[Button]) {
        self.events
            .extend(buttons.iter().map(|&b| InputEvent::ButtonPress(b)));
    }
}

impl Default for MockInput {
    fn default() -> Self {
        Self::new()
    }
}

impl InputDevice for MockInput {
    fn poll_event(&mut self) -> Option<InputEvent> {
        self.events.pop_front()
    }
}

/// Mock dispatcher recording every message it receives
#[derive(Debug, Default, Clone)]
pub struct MockDispatcher {
    sent: Vec<SystemMessage>,
}

impl MockDispatcher {
    /// Create new mock dispatcher
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages received so far, oldest first
    pub fn sent(&self) -> &[SystemMessage] {
        &self.sent
    }
}

impl MessageDispatcher for MockDispatcher {
    fn send(&mut self, message: SystemMessage) {
        self.sent.push(message);
    }
}

/// Error returned by [`MockStorage`] and [`MockImageWriter`] when told to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockStorageError {
    /// File creation refused
    Create,
    /// Scanline write refused
    Write,
}

/// An image recorded by [`MockStorage`]
#[derive(Debug, Clone, PartialEq)]
pub struct MockImage {
    /// File name the image was created under
    pub name: String,
    /// Declared image size
    pub size: Size,
    /// Scanlines written so far
    pub rows: Vec<Vec<Rgb888>>,
    /// Whether [`ImageWriter::finish`] was called
    pub finished: bool,
}

/// Mock screenshot storage
///
/// Keeps a set of existing names; created images are shared with their writers
/// so tests can inspect what was written after the writer is consumed.
/// Starts with the card present.
#[derive(Debug)]
pub struct MockStorage {
    existing: HashSet<String>,
    images: Rc<RefCell<Vec<MockImage>>>,
    present: bool,
    fail_create: bool,
    fail_write: bool,
}

impl MockStorage {
    /// Create an empty mock storage
    pub fn new() -> Self {
        Self {
            existing: HashSet::new(),
            images: Rc::default(),
            present: true,
            fail_create: false,
            fail_write: false,
        }
    }

    /// Insert or remove the simulated card
    pub fn set_present(&mut self, present: bool) {
        self.present = present;
    }

    /// Mark `name` as already present
    pub fn add_existing(&mut self, name: &str) {
        self.existing.insert(name.to_string());
    }

    /// Refuse every subsequent file creation
    pub fn fail_create(&mut self, fail: bool) {
        self.fail_create = fail;
    }

    /// Refuse every subsequent scanline write
    pub fn fail_write(&mut self, fail: bool) {
        self.fail_write = fail;
    }

    /// Snapshot of the images created so far
    pub fn images(&self) -> Vec<MockImage> {
        self.images.borrow().clone()
    }

    fn is_taken(&self, name: &str) -> bool {
        self.existing.contains(name) || self.images.borrow().iter().any(|i| i.name == name)
    }
}

impl Default for MockStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenshotStorage for MockStorage {
    type Error = MockStorageError;
    type Writer = MockImageWriter;

    fn status(&self) -> StorageStatus {
        if self.present {
            StorageStatus::Present
        } else {
            StorageStatus::Absent
        }
    }

    fn next_free_name(&mut self, pattern: &str, extension: &str) -> Option<FileName> {
        if !self.present {
            return None;
        }
        candidate_names(pattern, extension).find(|name| !self.is_taken(name))
    }

    fn create_image(&mut self, name: &str, size: Size) -> Result<Self::Writer, Self::Error> {
        if self.fail_create || !self.present {
            return Err(MockStorageError::Create);
        }
        let mut images = self.images.borrow_mut();
        let index = images.len();
        images.push(MockImage {
            name: name.to_string(),
            size,
            rows: Vec::new(),
            finished: false,
        });
        Ok(MockImageWriter {
            images: Rc::clone(&self.images),
            index,
            fail_write: self.fail_write,
        })
    }
}

/// Writer handed out by [`MockStorage`]
#[derive(Debug)]
pub struct MockImageWriter {
    images: Rc<RefCell<Vec<MockImage>>>,
    index: usize,
    fail_write: bool,
}

impl ImageWriter for MockImageWriter {
    type Error = MockStorageError;

    fn write_scanline(&mut self, row: &[Rgb888]) -> Result<(), Self::Error> {
        if self.fail_write {
            return Err(MockStorageError::Write);
        }
        if let Some(image) = self.images.borrow_mut().get_mut(self.index) {
            image.rows.push(row.to_vec());
        }
        Ok(())
    }

    fn finish(self) -> Result<(), Self::Error> {
        if let Some(image) = self.images.borrow_mut().get_mut(self.index) {
            image.finished = true;
        }
        Ok(())
    }
}
