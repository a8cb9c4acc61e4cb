//! Status bar: back control, active view title, storage indicator, camera
//! and sleep triggers.

use alloc::vec;

use components::prelude::*;
use embedded_graphics::{
    pixelcolor::{Rgb565, Rgb888},
    prelude::*,
    primitives::Rectangle,
};
use platform::config::{APP_NAME, SCREENSHOT_EXTENSION, SCREENSHOT_PATTERN};
use platform::{
    Button as Key, FileName, FrameReadback, ImageWriter, InputEvent, MessageDispatcher,
    ScreenshotStorage, StorageStatus, SystemMessage,
};

use crate::painter::Painter;

/// Back label while there is somewhere to go back to.
pub const BACK_TEXT_ENABLED: &str = " < ";
/// Back label at the root of the stack.
pub const BACK_TEXT_DISABLED: &str = " * ";

const CONTROL_WIDTH: u32 = 24;
const SLEEP_OFFSET: u32 = CONTROL_WIDTH;
const CAMERA_OFFSET: u32 = 2 * CONTROL_WIDTH;
const STORAGE_OFFSET: u32 = 3 * CONTROL_WIDTH;
const TITLE_X: i32 = 26;
const BAR_BACKGROUND: Rgb565 = Rgb565::new(6, 12, 6);

/// Focusable controls of the status bar, in left-to-right order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusControl {
    /// Pops the active view
    Back,
    /// Saves a screenshot
    Camera,
    /// Puts the display to sleep
    Sleep,
}

const CONTROLS: [StatusControl; 3] = [StatusControl::Back, StatusControl::Camera, StatusControl::Sleep];

/// What the owner must do after the status bar handled an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusResponse {
    /// The bar does not hold focus; route the event elsewhere.
    Ignored,
    /// Handled inside the bar.
    Consumed,
    /// The back control was activated.
    Back,
    /// The camera was activated; the owner has the display and storage.
    Capture,
    /// Focus should go back to the active view.
    ReturnFocus,
}

/// Why a screenshot was abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureError {
    /// Every name matching the pattern is taken
    NoFreeName,
    /// The image file could not be created
    Create,
    /// Reading pixels back from the display failed
    Readback,
    /// Writing a scanline failed
    Write,
    /// Closing the image failed
    Finish,
}

impl core::fmt::Display for CaptureError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NoFreeName => write!(f, "no free screenshot name"),
            Self::Create => write!(f, "cannot create screenshot file"),
            Self::Readback => write!(f, "display read-back failed"),
            Self::Write => write!(f, "scanline write failed"),
            Self::Finish => write!(f, "cannot finish screenshot file"),
        }
    }
}

/// Copy the whole display, top row first, into the next free screenshot file.
pub fn capture_screenshot<F, S>(display: &mut F, storage: &mut S) -> Result<FileName, CaptureError>
where
    F: FrameReadback,
    S: ScreenshotStorage,
{
    let name = storage
        .next_free_name(SCREENSHOT_PATTERN, SCREENSHOT_EXTENSION)
        .ok_or(CaptureError::NoFreeName)?;

    let size = display.size();
    let mut writer = storage.create_image(&name, size).map_err(|error| {
        tracing::debug!(?error, file = %name.as_str(), "create failed");
        CaptureError::Create
    })?;

    let mut row = vec![Rgb888::BLACK; size.width as usize];
    for y in 0..size.height {
        let line = Rectangle::new(Point::new(0, y as i32), Size::new(size.width, 1));
        display.read_pixels(line, &mut row).map_err(|error| {
            tracing::debug!(?error, y, "read-back failed");
            CaptureError::Readback
        })?;
        writer.write_scanline(&row).map_err(|error| {
            tracing::debug!(?error, y, "scanline write failed");
            CaptureError::Write
        })?;
    }
    writer.finish().map_err(|error| {
        tracing::debug!(?error, "finish failed");
        CaptureError::Finish
    })?;

    Ok(name)
}

/// Persistent header above the navigation area.
///
/// System messages (sleep) go out through the injected dispatcher `M`.
pub struct StatusBar<M> {
    rect: Rectangle,
    back: Button,
    title: Label,
    storage: ImageButton,
    camera: ImageButton,
    sleep: ImageButton,
    focused: Option<StatusControl>,
    dispatcher: M,
    dirty: bool,
}

impl<M: MessageDispatcher> StatusBar<M> {
    /// Create a status bar occupying `rect` (screen coordinates).
    ///
    /// Starts at the root: back disabled, default title, storage present.
    pub fn new(rect: Rectangle, dispatcher: M) -> Self {
        let width = rect.size.width;
        let height = rect.size.height;
        let control = |x: u32| Rectangle::new(Point::new(x as i32, 0), Size::new(CONTROL_WIDTH, height));

        let mut bar = Self {
            rect,
            back: Button::new(BACK_TEXT_ENABLED, control(0)).style(ButtonStyle::bar()),
            title: Label::new(APP_NAME, Point::new(TITLE_X, 1)).background(BAR_BACKGROUND),
            storage: ImageButton::new(IconType::SdCard, control(width.saturating_sub(STORAGE_OFFSET)))
                .indicator(),
            camera: ImageButton::new(IconType::Camera, control(width.saturating_sub(CAMERA_OFFSET))),
            sleep: ImageButton::new(IconType::Sleep, control(width.saturating_sub(SLEEP_OFFSET))),
            focused: None,
            dispatcher,
            dirty: true,
        };
        bar.set_back_enabled(false);
        bar
    }

    /// Enable or disable the back control.
    ///
    /// A disabled back control shows [`BACK_TEXT_DISABLED`] and refuses focus.
    pub fn set_back_enabled(&mut self, enabled: bool) {
        self.back.set_text(if enabled { BACK_TEXT_ENABLED } else { BACK_TEXT_DISABLED });
        self.back.set_focusable(enabled);
        if !enabled && self.focused == Some(StatusControl::Back) {
            self.set_focus(Some(StatusControl::Camera));
        }
        self.dirty = true;
    }

    /// Whether the back control is interactive.
    pub fn is_back_enabled(&self) -> bool {
        self.back.is_focusable()
    }

    /// Current back control label.
    pub fn back_text(&self) -> &str {
        self.back.text()
    }

    /// Show `text`, or [`APP_NAME`] when `text` is empty.
    pub fn set_title(&mut self, text: &str) {
        self.title.set(if text.is_empty() { APP_NAME } else { text });
        self.dirty = true;
    }

    /// Displayed title.
    pub fn title(&self) -> &str {
        self.title.text()
    }

    /// Show whether the screenshot medium is available.
    pub fn set_storage_status(&mut self, status: StorageStatus) {
        if self.storage.is_active() != status.is_present() {
            tracing::debug!(storage = status.as_str(), "storage indicator");
            self.storage.set_active(status.is_present());
            self.dirty = true;
        }
    }

    /// State shown by the storage indicator.
    pub fn storage_status(&self) -> StorageStatus {
        if self.storage.is_active() {
            StorageStatus::Present
        } else {
            StorageStatus::Absent
        }
    }

    /// Take input focus, landing on the first focusable control.
    pub fn focus(&mut self) {
        let first = CONTROLS.into_iter().find(|&c| self.is_focusable(c));
        self.set_focus(first);
    }

    /// Give up input focus.
    pub fn blur(&mut self) {
        self.set_focus(None);
    }

    /// Whether any control holds focus.
    pub fn has_focus(&self) -> bool {
        self.focused.is_some()
    }

    /// The focused control.
    pub fn focused(&self) -> Option<StatusControl> {
        self.focused
    }

    /// Sleep trigger: ask the system to blank the display.
    pub fn sleep(&mut self) {
        tracing::debug!("display sleep requested");
        self.dispatcher.send(SystemMessage::DisplaySleep);
    }

    /// Post `message` through the injected dispatcher.
    pub fn send(&mut self, message: SystemMessage) {
        self.dispatcher.send(message);
    }

    /// The injected dispatcher.
    pub fn dispatcher(&self) -> &M {
        &self.dispatcher
    }

    /// Camera trigger: save a screenshot, abandoning it quietly on failure.
    pub fn on_camera<F, S>(&mut self, display: &mut F, storage: &mut S) -> Option<FileName>
    where
        F: FrameReadback,
        S: ScreenshotStorage,
    {
        match capture_screenshot(display, storage) {
            Ok(name) => {
                tracing::info!(file = %name.as_str(), "screenshot saved");
                Some(name)
            }
            Err(error) => {
                tracing::warn!(%error, "screenshot abandoned");
                None
            }
        }
    }

    /// React to input while the bar holds focus.
    pub fn on_event(&mut self, event: InputEvent) -> StatusResponse {
        let Some(current) = self.focused else {
            return StatusResponse::Ignored;
        };

        match event {
            InputEvent::RotaryIncrement(steps) if steps > 0 => self.step_focus(true),
            InputEvent::RotaryIncrement(steps) if steps < 0 => self.step_focus(false),
            InputEvent::RotaryIncrement(_) => StatusResponse::Consumed,
            InputEvent::ButtonPress(key) | InputEvent::ButtonLongPress(key) => match key {
                Key::Left => self.step_focus(false),
                Key::Right => self.step_focus(true),
                Key::Down => StatusResponse::ReturnFocus,
                Key::Up => StatusResponse::Consumed,
                Key::Select => match current {
                    StatusControl::Back => StatusResponse::Back,
                    StatusControl::Camera => StatusResponse::Capture,
                    StatusControl::Sleep => {
                        self.sleep();
                        StatusResponse::Consumed
                    }
                },
            },
        }
    }

    /// Area occupied by the bar, in screen coordinates.
    pub fn rect(&self) -> Rectangle {
        self.rect
    }

    /// Region needing a redraw since the last call.
    pub fn take_dirty(&mut self) -> Option<Rectangle> {
        core::mem::take(&mut self.dirty).then_some(self.rect)
    }

    /// Draw the bar into `painter`, which covers [`StatusBar::rect`].
    pub fn render(&self, painter: &mut Painter<'_>) {
        painter.clear_to(BAR_BACKGROUND);
        let _ = self.title.render(painter);
        let _ = self.back.render(painter);
        let _ = self.storage.render(painter);
        let _ = self.camera.render(painter);
        let _ = self.sleep.render(painter);
    }

    fn is_focusable(&self, control: StatusControl) -> bool {
        match control {
            StatusControl::Back => self.back.is_focusable(),
            StatusControl::Camera => self.camera.is_focusable(),
            StatusControl::Sleep => self.sleep.is_focusable(),
        }
    }

    fn step_focus(&mut self, forward: bool) -> StatusResponse {
        let Some(current) = self.focused else {
            return StatusResponse::Ignored;
        };
        let start = CONTROLS.iter().position(|&c| c == current).unwrap_or(0);
        // One lap from the current control; going back, the last focusable one wins.
        let ring = CONTROLS.iter().cycle().skip(start);
        let next = if forward {
            ring.skip(1).take(CONTROLS.len()).copied().find(|&c| self.is_focusable(c))
        } else {
            ring.take(CONTROLS.len()).copied().filter(|&c| self.is_focusable(c)).last()
        };
        if let Some(next) = next {
            self.set_focus(Some(next));
        }
        StatusResponse::Consumed
    }

    fn set_focus(&mut self, control: Option<StatusControl>) {
        self.back.set_focused(control == Some(StatusControl::Back));
        self.camera.set_focused(control == Some(StatusControl::Camera));
        self.sleep.set_focused(control == Some(StatusControl::Sleep));
        self.focused = control.filter(|&c| self.is_focusable(c));
        self.dirty = true;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::painter::Surface;
    use platform::mocks::{MockDisplay, MockDispatcher, MockStorage};

    fn bar() -> StatusBar<MockDispatcher> {
        StatusBar::new(
            Rectangle::new(Point::zero(), Size::new(240, 16)),
            MockDispatcher::new(),
        )
    }

    fn press(key: Key) -> InputEvent {
        InputEvent::ButtonPress(key)
    }

    #[test]
    fn test_starts_at_root_state() {
        let bar = bar();
        assert!(!bar.is_back_enabled());
        assert_eq!(bar.back_text(), BACK_TEXT_DISABLED);
        assert_eq!(bar.title(), APP_NAME);
        assert!(!bar.has_focus());
    }

    #[test]
    fn test_back_enabled_toggles_text_and_focusability() {
        let mut bar = bar();
        bar.set_back_enabled(true);
        assert!(bar.is_back_enabled());
        assert_eq!(bar.back_text(), BACK_TEXT_ENABLED);
        bar.set_back_enabled(false);
        assert!(!bar.is_back_enabled());
        assert_eq!(bar.back_text(), BACK_TEXT_DISABLED);
    }

    #[test]
    fn test_empty_title_shows_default() {
        let mut bar = bar();
        bar.set_title("Receiver");
        assert_eq!(bar.title(), "Receiver");
        bar.set_title("");
        assert_eq!(bar.title(), APP_NAME);
    }

    #[test]
    fn test_focus_skips_disabled_back() {
        let mut bar = bar();
        bar.focus();
        assert_eq!(bar.focused(), Some(StatusControl::Camera));
        assert_eq!(bar.on_event(press(Key::Right)), StatusResponse::Consumed);
        assert_eq!(bar.focused(), Some(StatusControl::Sleep));
        bar.on_event(press(Key::Right));
        assert_eq!(bar.focused(), Some(StatusControl::Camera));
    }

    #[test]
    fn test_focus_cycles_through_enabled_back() {
        let mut bar = bar();
        bar.set_back_enabled(true);
        bar.focus();
        assert_eq!(bar.focused(), Some(StatusControl::Back));
        bar.on_event(press(Key::Left));
        assert_eq!(bar.focused(), Some(StatusControl::Sleep));
        bar.on_event(InputEvent::RotaryIncrement(1));
        assert_eq!(bar.focused(), Some(StatusControl::Back));
    }

    #[test]
    fn test_disabling_focused_back_moves_focus() {
        let mut bar = bar();
        bar.set_back_enabled(true);
        bar.focus();
        bar.set_back_enabled(false);
        assert_eq!(bar.focused(), Some(StatusControl::Camera));
    }

    #[test]
    fn test_select_maps_to_responses() {
        let mut bar = bar();
        bar.set_back_enabled(true);
        bar.focus();
        assert_eq!(bar.on_event(press(Key::Select)), StatusResponse::Back);
        bar.on_event(press(Key::Right));
        assert_eq!(bar.on_event(press(Key::Select)), StatusResponse::Capture);
        bar.on_event(press(Key::Right));
        assert_eq!(bar.on_event(press(Key::Select)), StatusResponse::Consumed);
        assert_eq!(bar.dispatcher().sent(), &[SystemMessage::DisplaySleep]);
    }

    #[test]
    fn test_down_returns_focus_and_unfocused_bar_ignores_input() {
        let mut bar = bar();
        assert_eq!(bar.on_event(press(Key::Select)), StatusResponse::Ignored);
        bar.focus();
        assert_eq!(bar.on_event(press(Key::Down)), StatusResponse::ReturnFocus);
        bar.blur();
        assert!(!bar.has_focus());
    }

    #[test]
    fn test_storage_indicator_follows_status() {
        let mut bar = bar();
        assert_eq!(bar.storage_status(), StorageStatus::Present);
        bar.take_dirty();

        bar.set_storage_status(StorageStatus::Absent);
        assert_eq!(bar.storage_status(), StorageStatus::Absent);
        assert!(bar.take_dirty().is_some());

        // An unchanged status does not trigger a redraw.
        bar.set_storage_status(StorageStatus::Absent);
        assert!(bar.take_dirty().is_none());

        bar.set_storage_status(StorageStatus::Present);
        assert_eq!(bar.storage_status(), StorageStatus::Present);
    }

    #[test]
    fn test_focus_never_lands_on_storage_indicator() {
        let mut bar = bar();
        bar.set_back_enabled(true);
        bar.focus();
        for _ in 0..6 {
            bar.on_event(press(Key::Right));
            assert!(bar.focused().is_some());
        }
        assert_eq!(bar.focused(), Some(StatusControl::Back));
    }

    #[test]
    fn test_take_dirty_reports_once() {
        let mut bar = bar();
        assert!(bar.take_dirty().is_some());
        assert!(bar.take_dirty().is_none());
        bar.set_title("Audio");
        assert_eq!(bar.take_dirty(), Some(bar.rect()));
    }

    #[test]
    fn test_capture_writes_every_row() {
        let mut display = MockDisplay::new(8, 4);
        let mut storage = MockStorage::new();
        let name = capture_screenshot(&mut display, &mut storage).unwrap();
        assert_eq!(name.as_str(), "SCR_0000.PNG");
        let images = storage.images();
        assert_eq!(images[0].size, Size::new(8, 4));
        assert_eq!(images[0].rows.len(), 4);
        assert_eq!(images[0].rows[0].len(), 8);
        assert!(images[0].finished);
    }

    #[test]
    fn test_capture_failures_are_classified() {
        let mut display = MockDisplay::new(8, 4);
        let mut storage = MockStorage::new();
        storage.fail_create(true);
        assert_eq!(capture_screenshot(&mut display, &mut storage), Err(CaptureError::Create));

        let mut storage = MockStorage::new();
        display.fail_readback(true);
        assert_eq!(capture_screenshot(&mut display, &mut storage), Err(CaptureError::Readback));
        assert!(!storage.images()[0].finished);
    }

    #[test]
    fn test_camera_trigger_swallows_errors() {
        let mut bar = bar();
        let mut display = MockDisplay::new(8, 4);
        let mut storage = MockStorage::new();
        storage.fail_write(true);
        assert!(bar.on_camera(&mut display, &mut storage).is_none());
        storage.fail_write(false);
        let saved = bar.on_camera(&mut display, &mut storage).unwrap();
        // The abandoned file still holds its name.
        assert_eq!(saved.as_str(), "SCR_0001.PNG");
    }

    #[test]
    fn test_render_fills_bar() {
        let mut display = MockDisplay::new(240, 16);
        let mut surface = Surface::new(&mut display);
        bar().render(&mut Painter::new(&mut surface));
        assert_eq!(display.pixel_at(120, 15), Some(BAR_BACKGROUND));
    }
}
