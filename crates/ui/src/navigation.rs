//! Navigation stack. Owns every open view; the top one is the only view
//! attached to the display and holding input focus.
//!
//! The root entry is permanent: popping a stack of depth 1 is a no-op, so the
//! stack never empties once seeded. Transitions always detach the old top
//! before attaching the new one, and each transition queues exactly one
//! [`ViewChanged`] notification for the composition root.
//!
//! Modal dialogs are ordinary entries. The navigator only remembers which
//! entry (if any) is the modal, by [`ViewId`], to drop duplicate requests.

use alloc::boxed::Box;
use alloc::vec::Vec;

use embedded_graphics::{prelude::*, primitives::Rectangle};
use heapless::Deque;
use platform::config::NAV_EVENT_CAPACITY;
use platform::{InputEvent, SystemMessage};

use crate::layout::union;
use crate::modal::ModalMessageView;
use crate::painter::Painter;
use crate::view::{Command, View, ViewId};

/// Notification queued after every push or pop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewChanged {
    /// The view that became the top of the stack
    pub view: ViewId,
    /// Stack depth after the transition
    pub depth: usize,
}

/// Result of routing a command or event through the navigator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing happened; the event may be routed elsewhere.
    Ignored,
    /// The event was handled.
    Handled,
    /// The view asked for a system message to be posted.
    Message(SystemMessage),
}

struct Entry {
    id: ViewId,
    view: Box<dyn View>,
}

/// Stack of owned views.
pub struct Navigator {
    stack: Vec<Entry>,
    rect: Rectangle,
    next_id: u32,
    modal: Option<ViewId>,
    attached: Option<ViewId>,
    dirty: Option<Rectangle>,
    changes: Deque<ViewChanged, NAV_EVENT_CAPACITY>,
}

impl Navigator {
    /// Create an empty navigator occupying `rect` (screen coordinates).
    ///
    /// The stack is empty until the first push; use [`Navigator::with_root`]
    /// to seed it in one step.
    pub fn new(rect: Rectangle) -> Self {
        Self {
            stack: Vec::new(),
            rect,
            next_id: 0,
            modal: None,
            attached: None,
            dirty: None,
            changes: Deque::new(),
        }
    }

    /// Create a navigator whose permanent root is `root`.
    pub fn with_root(rect: Rectangle, root: Box<dyn View>) -> Self {
        let mut nav = Self::new(rect);
        nav.push(root);
        nav
    }

    /// Take ownership of `view` and make it the active view.
    ///
    /// Returns a non-owning handle to the pushed view.
    pub fn push(&mut self, view: Box<dyn View>) -> ViewId {
        self.free_view();

        let id = ViewId(self.next_id);
        self.next_id = self.next_id.checked_add(1).unwrap_or_else(|| {
            tracing::warn!(view = %id, "view handles exhausted, last handle repeats");
            u32::MAX
        });
        self.stack.push(Entry { id, view });
        tracing::debug!(view = %id, depth = self.stack.len(), "push");

        self.update_view();
        id
    }

    /// Box `view` and [`push`](Self::push) it.
    pub fn push_view<V: View + 'static>(&mut self, view: V) -> ViewId {
        self.push(Box::new(view))
    }

    /// Destroy the active view and return to the one beneath it.
    ///
    /// Popping the remembered modal clears the modal marker. The root view is
    /// never popped.
    pub fn pop(&mut self) {
        if self.modal.is_some() && self.modal == self.current_id() {
            self.modal = None;
        }

        if self.stack.len() > 1 {
            self.free_view();
            if let Some(entry) = self.stack.pop() {
                tracing::debug!(view = %entry.id, depth = self.stack.len(), "pop");
            }
            self.update_view();
        } else {
            tracing::trace!("pop ignored at root");
        }
    }

    /// Whether only the root view remains (so [`pop`](Self::pop) is a no-op).
    pub fn is_top(&self) -> bool {
        self.stack.len() == 1
    }

    /// Number of views on the stack.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Push a [`ModalMessageView`] unless a modal is already showing.
    ///
    /// Returns the dialog's handle, or `None` when the request was dropped.
    pub fn display_modal(&mut self, title: &str, message: &str) -> Option<ViewId> {
        if let Some(existing) = self.modal {
            tracing::debug!(modal = %existing, title, "modal already showing, request dropped");
            return None;
        }
        let id = self.push_view(ModalMessageView::new(title, message));
        self.modal = Some(id);
        Some(id)
    }

    /// The remembered modal, if one is showing.
    pub fn modal(&self) -> Option<ViewId> {
        self.modal
    }

    /// The active view.
    pub fn current_view(&self) -> Option<&dyn View> {
        self.stack.last().map(|entry| entry.view.as_ref())
    }

    /// The active view, mutably.
    pub fn current_view_mut(&mut self) -> Option<&mut (dyn View + 'static)> {
        self.stack.last_mut().map(|entry| entry.view.as_mut())
    }

    /// Handle of the active view.
    pub fn current_id(&self) -> Option<ViewId> {
        self.stack.last().map(|entry| entry.id)
    }

    /// The view behind `id`, if it is still on the stack.
    pub fn view(&self, id: ViewId) -> Option<&dyn View> {
        self.stack
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.view.as_ref())
    }

    /// Whether `id` is still on the stack.
    pub fn contains(&self, id: ViewId) -> bool {
        self.stack.iter().any(|entry| entry.id == id)
    }

    /// Handle of the view currently attached to the display.
    pub fn attached(&self) -> Option<ViewId> {
        self.attached
    }

    /// Give input focus to the active view's preferred child.
    pub fn focus(&mut self) {
        if let Some(view) = self.current_view_mut() {
            view.focus();
        }
    }

    /// Route `event` to the active view and apply what it asks for.
    pub fn handle_event(&mut self, event: InputEvent) -> Outcome {
        let command = match self.current_view_mut() {
            Some(view) => view.on_event(event),
            None => Command::Ignored,
        };
        self.apply(command)
    }

    /// Apply a command issued by the active view.
    ///
    /// `Send` is not the navigator's business; it comes back as
    /// [`Outcome::Message`] for the owner to dispatch.
    pub fn apply(&mut self, command: Command) -> Outcome {
        match command {
            Command::Ignored => Outcome::Ignored,
            Command::Consumed => {
                self.set_dirty();
                Outcome::Handled
            }
            Command::Push(view) => {
                self.push(view);
                Outcome::Handled
            }
            Command::Pop => {
                self.pop();
                Outcome::Handled
            }
            Command::Modal { title, message } => {
                self.display_modal(&title, &message);
                Outcome::Handled
            }
            Command::Send(message) => Outcome::Message(message),
        }
    }

    /// Next undelivered transition notification, oldest first.
    pub fn next_change(&mut self) -> Option<ViewChanged> {
        self.changes.pop_front()
    }

    /// Region needing a redraw since the last call, in screen coordinates.
    pub fn take_dirty(&mut self) -> Option<Rectangle> {
        self.dirty.take()
    }

    /// Area occupied by the navigator, in screen coordinates.
    pub fn rect(&self) -> Rectangle {
        self.rect
    }

    /// Draw the active view. Dormant views beneath it are never drawn.
    pub fn render(&self, painter: &mut Painter<'_>) {
        if let Some(view) = self.current_view() {
            view.render(painter);
        }
    }

    /// Mark the whole navigation area for redraw.
    pub fn set_dirty(&mut self) {
        self.dirty = Some(match self.dirty {
            Some(dirty) => union(dirty, self.rect),
            None => self.rect,
        });
    }

    fn free_view(&mut self) {
        if let Some(entry) = self.stack.last_mut() {
            entry.view.on_hide();
        }
        self.attached = None;
    }

    fn update_view(&mut self) {
        let local = Rectangle::new(Point::zero(), self.rect.size);
        let Some(entry) = self.stack.last_mut() else {
            return;
        };
        entry.view.set_parent_rect(local);
        entry.view.on_show();
        let id = entry.id;
        self.attached = Some(id);

        self.focus();
        self.set_dirty();

        let change = ViewChanged {
            view: id,
            depth: self.stack.len(),
        };
        if self.changes.is_full() {
            self.changes.pop_front();
        }
        // Cannot fail: a slot was freed above.
        let _ = self.changes.push_back(change);
    }
}

impl Drop for Navigator {
    fn drop(&mut self) {
        self.free_view();
        // Views go top-down, the reverse of construction order.
        while self.stack.pop().is_some() {}
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use core::cell::RefCell;
    use platform::Button;

    /// Shared record of lifecycle calls made on probe views.
    type Log = Rc<RefCell<Vec<(&'static str, &'static str)>>>;

    struct Probe {
        name: &'static str,
        log: Log,
    }

    impl Probe {
        fn boxed(name: &'static str, log: &Log) -> Box<dyn View> {
            Box::new(Self {
                name,
                log: Rc::clone(log),
            })
        }
    }

    impl View for Probe {
        fn title(&self) -> &str {
            self.name
        }
        fn render(&self, _painter: &mut Painter<'_>) {}
        fn focus(&mut self) {
            self.log.borrow_mut().push((self.name, "focus"));
        }
        fn on_show(&mut self) {
            self.log.borrow_mut().push((self.name, "show"));
        }
        fn on_hide(&mut self) {
            self.log.borrow_mut().push((self.name, "hide"));
        }
        fn on_event(&mut self, event: InputEvent) -> Command {
            match event {
                InputEvent::ButtonPress(Button::Left) => Command::Pop,
                InputEvent::ButtonPress(Button::Select) => Command::modal("Error", "Disk full"),
                _ => Command::Ignored,
            }
        }
    }

    impl Drop for Probe {
        fn drop(&mut self) {
            self.log.borrow_mut().push((self.name, "drop"));
        }
    }

    fn area() -> Rectangle {
        Rectangle::new(Point::new(0, 16), Size::new(240, 304))
    }

    fn seeded(log: &Log) -> Navigator {
        let mut nav = Navigator::with_root(area(), Probe::boxed("root", log));
        while nav.next_change().is_some() {}
        log.borrow_mut().clear();
        nav
    }

    #[test]
    fn test_root_is_top() {
        let log = Log::default();
        let nav = seeded(&log);
        assert!(nav.is_top());
        assert_eq!(nav.depth(), 1);
        assert_eq!(nav.current_view().unwrap().title(), "root");
    }

    #[test]
    fn test_pop_at_root_is_noop() {
        let log = Log::default();
        let mut nav = seeded(&log);
        let root = nav.current_id();
        nav.pop();
        assert_eq!(nav.depth(), 1);
        assert_eq!(nav.current_id(), root);
        assert!(nav.next_change().is_none());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_push_notifies_once_with_new_top() {
        let log = Log::default();
        let mut nav = seeded(&log);
        let id = nav.push(Probe::boxed("child", &log));
        assert_eq!(nav.current_id(), Some(id));
        assert!(!nav.is_top());
        assert_eq!(nav.next_change(), Some(ViewChanged { view: id, depth: 2 }));
        assert_eq!(nav.next_change(), None);
    }

    #[test]
    fn test_push_detaches_before_attaching() {
        let log = Log::default();
        let mut nav = seeded(&log);
        let id = nav.push(Probe::boxed("child", &log));
        assert_eq!(
            *log.borrow(),
            [("root", "hide"), ("child", "show"), ("child", "focus")]
        );
        assert_eq!(nav.attached(), Some(id));
    }

    #[test]
    fn test_pop_destroys_top_and_refocuses_previous() {
        let log = Log::default();
        let mut nav = seeded(&log);
        let root = nav.current_id().unwrap();
        let child = nav.push(Probe::boxed("child", &log));
        log.borrow_mut().clear();
        nav.pop();
        assert_eq!(
            *log.borrow(),
            [
                ("child", "hide"),
                ("child", "drop"),
                ("root", "show"),
                ("root", "focus")
            ]
        );
        assert!(!nav.contains(child));
        assert!(nav.view(child).is_none());
        assert_eq!(nav.current_id(), Some(root));
    }

    #[test]
    fn test_display_modal_is_deduplicated() {
        let log = Log::default();
        let mut nav = seeded(&log);
        let first = nav.display_modal("Error", "Disk full");
        let second = nav.display_modal("Error", "Disk full");
        assert!(first.is_some());
        assert!(second.is_none());
        assert_eq!(nav.depth(), 2);
        assert_eq!(nav.modal(), first);
        assert_eq!(nav.current_view().unwrap().title(), "Error");
    }

    #[test]
    fn test_popping_modal_clears_marker() {
        let log = Log::default();
        let mut nav = seeded(&log);
        nav.display_modal("Error", "Disk full");
        nav.pop();
        assert_eq!(nav.modal(), None);
        assert!(nav.display_modal("Error", "Disk full").is_some());
        assert_eq!(nav.depth(), 2);
    }

    #[test]
    fn test_modal_marker_survives_pushes_above_it() {
        let log = Log::default();
        let mut nav = seeded(&log);
        let modal = nav.display_modal("Error", "Disk full");
        nav.push(Probe::boxed("above", &log));
        nav.pop();
        assert_eq!(nav.modal(), modal);
        assert!(nav.display_modal("Again", "ignored").is_none());
    }

    #[test]
    fn test_commands_from_view_are_applied() {
        let log = Log::default();
        let mut nav = seeded(&log);
        nav.push(Probe::boxed("child", &log));
        assert_eq!(
            nav.handle_event(InputEvent::ButtonPress(Button::Down)),
            Outcome::Ignored
        );
        assert_eq!(
            nav.handle_event(InputEvent::ButtonPress(Button::Select)),
            Outcome::Handled
        );
        assert!(nav.modal().is_some());
        assert_eq!(nav.depth(), 3);
        assert_eq!(
            nav.apply(Command::Send(SystemMessage::RequestStop)),
            Outcome::Message(SystemMessage::RequestStop)
        );
    }

    #[test]
    fn test_transitions_mark_navigation_area_dirty() {
        let log = Log::default();
        let mut nav = seeded(&log);
        let _ = nav.take_dirty();
        nav.push(Probe::boxed("child", &log));
        assert_eq!(nav.take_dirty(), Some(area()));
        assert_eq!(nav.take_dirty(), None);
    }

    #[test]
    fn test_drop_destroys_every_view() {
        let log = Log::default();
        let mut nav = seeded(&log);
        nav.push(Probe::boxed("child", &log));
        log.borrow_mut().clear();
        drop(nav);
        assert_eq!(
            *log.borrow(),
            [("child", "hide"), ("child", "drop"), ("root", "drop")]
        );
    }

    #[test]
    fn test_view_handles_saturate_instead_of_wrapping() {
        let log = Log::default();
        let mut nav = seeded(&log);
        let root = nav.current_id().unwrap();
        nav.next_id = u32::MAX.saturating_sub(1);
        let a = nav.push(Probe::boxed("a", &log));
        let b = nav.push(Probe::boxed("b", &log));
        let c = nav.push(Probe::boxed("c", &log));
        assert_eq!(a.raw(), u32::MAX.saturating_sub(1));
        assert_eq!(b.raw(), u32::MAX);
        assert_eq!(c.raw(), u32::MAX);
        assert_ne!(c, root);
        assert_eq!(nav.depth(), 4);
    }

    #[test]
    fn test_empty_navigator_has_no_current_view() {
        let mut nav = Navigator::new(area());
        assert!(nav.current_view().is_none());
        assert!(!nav.is_top());
        nav.pop();
        nav.focus();
        assert_eq!(nav.depth(), 0);
    }
}
