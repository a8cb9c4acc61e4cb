//! Composition root: status bar above, navigation stack below.

use alloc::boxed::Box;

use embedded_graphics::{pixelcolor::Rgb565, prelude::*, primitives::Rectangle};
use platform::config::{APP_NAME, APP_VERSION};
use platform::{Button as Key, FileName, FrameReadback, InputEvent, MessageDispatcher, ScreenshotStorage};

use crate::layout::{union, Layout};
use crate::navigation::{Navigator, Outcome};
use crate::painter::{Painter, Surface};
use crate::status_bar::{StatusBar, StatusResponse};
use crate::view::{View, ViewId};

/// Which half of the screen receives input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusRegion {
    /// The active view
    View,
    /// The status bar controls
    StatusBar,
}

/// Drawing the shell failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderError {
    /// The draw target rejected a write
    Draw,
}

impl core::fmt::Display for RenderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Draw => write!(f, "draw target rejected a write"),
        }
    }
}

/// The application shell.
///
/// Owns the [`StatusBar`] and the [`Navigator`] and keeps the bar's back
/// control and title in step with every navigation transition. The root view
/// given to [`SystemView::new`] can never be popped.
pub struct SystemView<M, S> {
    layout: Layout,
    status: StatusBar<M>,
    navigation: Navigator,
    storage: S,
    focus: FocusRegion,
}

impl<M, S> SystemView<M, S>
where
    M: MessageDispatcher,
    S: ScreenshotStorage,
{
    /// Build the shell and seed the stack with `root`.
    pub fn new(layout: Layout, dispatcher: M, storage: S, root: Box<dyn View>) -> Self {
        tracing::info!(app = APP_NAME, version = APP_VERSION, "starting UI shell");
        let mut system = Self {
            layout,
            status: StatusBar::new(layout.status_bar, dispatcher),
            navigation: Navigator::with_root(layout.navigation, root),
            storage,
            focus: FocusRegion::View,
        };
        system.sync_status();
        system.refresh_storage();
        system
    }

    /// Push `view` and bring the status bar up to date.
    pub fn push(&mut self, view: Box<dyn View>) -> ViewId {
        let id = self.navigation.push(view);
        self.sync_status();
        id
    }

    /// Box `view` and [`push`](Self::push) it.
    pub fn push_view<V: View + 'static>(&mut self, view: V) -> ViewId {
        self.push(Box::new(view))
    }

    /// Pop the active view (no-op at the root).
    pub fn pop(&mut self) {
        self.navigation.pop();
        self.sync_status();
    }

    /// Show a modal message unless one is already up.
    pub fn display_modal(&mut self, title: &str, message: &str) -> Option<ViewId> {
        let id = self.navigation.display_modal(title, message);
        self.sync_status();
        id
    }

    /// Route one input event to whichever region holds focus.
    ///
    /// `display` is only read when the camera control is activated.
    pub fn handle_event<F: FrameReadback>(&mut self, event: InputEvent, display: &mut F) {
        match self.focus {
            FocusRegion::View => match self.navigation.handle_event(event) {
                Outcome::Ignored if event == InputEvent::ButtonPress(Key::Up) => {
                    self.focus_status_bar();
                }
                Outcome::Message(message) => self.status.send(message),
                Outcome::Ignored | Outcome::Handled => {}
            },
            FocusRegion::StatusBar => match self.status.on_event(event) {
                StatusResponse::Back => self.navigation.pop(),
                StatusResponse::Capture => {
                    self.status.on_camera(display, &mut self.storage);
                }
                StatusResponse::ReturnFocus | StatusResponse::Ignored => self.focus_view(),
                StatusResponse::Consumed => {}
            },
        }
        self.sync_status();
        self.refresh_storage();
    }

    /// Poll the storage and update the status bar indicator.
    ///
    /// Also runs after every input event; call it from the main loop to pick
    /// up card changes while no key is pressed.
    pub fn refresh_storage(&mut self) {
        self.status.set_storage_status(self.storage.status());
    }

    /// Save a screenshot of `display`; `None` when it was abandoned.
    pub fn capture_screenshot<F: FrameReadback>(&mut self, display: &mut F) -> Option<FileName> {
        self.status.on_camera(display, &mut self.storage)
    }

    /// Draw the status bar, then the active view.
    pub fn render<D>(&self, display: &mut D) -> Result<(), RenderError>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let mut surface = Surface::new(display);
        {
            let mut painter = Painter::new(&mut surface);
            self.status.render(&mut painter.child(self.layout.status_bar));
            self.navigation
                .render(&mut painter.child(self.navigation.rect()));
        }
        if surface.failed() {
            Err(RenderError::Draw)
        } else {
            Ok(())
        }
    }

    /// Region needing a redraw since the last call, in screen coordinates.
    pub fn take_dirty(&mut self) -> Option<Rectangle> {
        match (self.status.take_dirty(), self.navigation.take_dirty()) {
            (Some(a), Some(b)) => Some(union(a, b)),
            (a, b) => a.or(b),
        }
    }

    /// Screen split in use.
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// The navigation stack.
    pub fn navigation(&self) -> &Navigator {
        &self.navigation
    }

    /// The status bar.
    pub fn status_bar(&self) -> &StatusBar<M> {
        &self.status
    }

    /// The screenshot storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// The screenshot storage, mutably (remounting, card swaps).
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Which region receives input.
    pub fn focus_region(&self) -> FocusRegion {
        self.focus
    }

    fn focus_status_bar(&mut self) {
        self.status.focus();
        if self.status.has_focus() {
            self.focus = FocusRegion::StatusBar;
        }
    }

    fn focus_view(&mut self) {
        self.status.blur();
        self.navigation.focus();
        self.focus = FocusRegion::View;
    }

    /// Apply every pending navigation transition to the status bar.
    fn sync_status(&mut self) {
        while let Some(change) = self.navigation.next_change() {
            self.status.set_back_enabled(!self.navigation.is_top());
            let title = self
                .navigation
                .view(change.view)
                .map(|view| view.title())
                .unwrap_or_default();
            self.status.set_title(title);
            tracing::debug!(
                view = %change.view,
                depth = change.depth,
                title = self.status.title(),
                "view changed"
            );
            self.focus_view();
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::painter::Painter;
    use platform::mocks::{MockDispatcher, MockDisplay, MockStorage};
    use platform::{StorageStatus, SystemMessage};

    struct Blank(&'static str);

    impl View for Blank {
        fn title(&self) -> &str {
            self.0
        }
        fn render(&self, painter: &mut Painter<'_>) {
            painter.clear_to(Rgb565::BLUE);
        }
        fn on_event(&mut self, event: InputEvent) -> crate::Command {
            match event.button() {
                Some(Key::Select) => crate::Command::Send(SystemMessage::RequestStop),
                _ => crate::Command::Ignored,
            }
        }
    }

    fn system() -> SystemView<MockDispatcher, MockStorage> {
        SystemView::new(
            Layout::default(),
            MockDispatcher::new(),
            MockStorage::new(),
            Box::new(Blank("")),
        )
    }

    fn press(key: Key) -> InputEvent {
        InputEvent::ButtonPress(key)
    }

    #[test]
    fn test_seeded_root_sets_status() {
        let system = system();
        assert!(!system.status_bar().is_back_enabled());
        assert_eq!(system.status_bar().title(), APP_NAME);
        assert_eq!(system.focus_region(), FocusRegion::View);
    }

    #[test]
    fn test_push_and_pop_track_status() {
        let mut system = system();
        system.push_view(Blank("Receiver"));
        assert!(system.status_bar().is_back_enabled());
        assert_eq!(system.status_bar().title(), "Receiver");
        system.pop();
        assert!(!system.status_bar().is_back_enabled());
        assert_eq!(system.status_bar().title(), APP_NAME);
    }

    #[test]
    fn test_up_moves_focus_to_status_bar_and_down_returns() {
        let mut system = system();
        let mut display = MockDisplay::new(240, 320);
        system.handle_event(press(Key::Up), &mut display);
        assert_eq!(system.focus_region(), FocusRegion::StatusBar);
        system.handle_event(press(Key::Down), &mut display);
        assert_eq!(system.focus_region(), FocusRegion::View);
    }

    #[test]
    fn test_long_press_up_stays_in_view() {
        let mut system = system();
        let mut display = MockDisplay::new(240, 320);
        system.handle_event(InputEvent::ButtonLongPress(Key::Up), &mut display);
        assert_eq!(system.focus_region(), FocusRegion::View);
        assert!(!system.status_bar().has_focus());
    }

    #[test]
    fn test_storage_indicator_tracks_card() {
        let mut system = system();
        let mut display = MockDisplay::new(240, 320);
        assert_eq!(system.status_bar().storage_status(), StorageStatus::Present);

        system.storage_mut().set_present(false);
        system.refresh_storage();
        assert_eq!(system.status_bar().storage_status(), StorageStatus::Absent);

        system.storage_mut().set_present(true);
        system.handle_event(press(Key::Down), &mut display);
        assert_eq!(system.status_bar().storage_status(), StorageStatus::Present);
    }

    #[test]
    fn test_view_messages_go_through_dispatcher() {
        let mut system = system();
        let mut display = MockDisplay::new(240, 320);
        system.handle_event(press(Key::Select), &mut display);
        assert_eq!(
            system.status_bar().dispatcher().sent(),
            &[SystemMessage::RequestStop]
        );
    }

    #[test]
    fn test_render_draws_both_regions() {
        let system = system();
        let mut display = MockDisplay::new(240, 320);
        system.render(&mut display).unwrap();
        assert_eq!(display.pixel_at(120, 200), Some(Rgb565::BLUE));
        assert_ne!(display.pixel_at(120, 15), Some(Rgb565::BLUE));
    }

    #[test]
    fn test_take_dirty_covers_both_regions_after_start() {
        let mut system = system();
        assert_eq!(
            system.take_dirty(),
            Some(Rectangle::new(Point::zero(), Size::new(240, 320)))
        );
        assert_eq!(system.take_dirty(), None);
    }
}
