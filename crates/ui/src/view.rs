//! The contract every screen implements.

use alloc::boxed::Box;
use alloc::string::String;

use embedded_graphics::primitives::Rectangle;
use platform::{InputEvent, SystemMessage};

use crate::painter::Painter;

/// Identity of a view while it lives on the navigation stack.
///
/// A [`Navigator`](crate::Navigator) hands out increasing handles, so a stale
/// handle simply stops resolving once its view is popped. The counter
/// saturates: after `u32::MAX` pushes every new view gets `u32::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub(crate) u32);

impl ViewId {
    /// Raw handle value.
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl core::fmt::Display for ViewId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "view#{}", self.0)
    }
}

/// One full-screen navigable unit of UI.
///
/// Views draw in local coordinates: `(0, 0)` is the top-left corner of the
/// rectangle last passed to [`View::set_parent_rect`].
pub trait View {
    /// Title for the status bar. Empty means "use the application name".
    fn title(&self) -> &str {
        ""
    }

    /// Called with the view's rectangle every time it is attached.
    fn set_parent_rect(&mut self, _rect: Rectangle) {}

    /// Draw the view.
    fn render(&self, painter: &mut Painter<'_>);

    /// Move input focus to the preferred child (usually the default action).
    fn focus(&mut self) {}

    /// React to an input event while this view holds focus.
    fn on_event(&mut self, _event: InputEvent) -> Command {
        Command::Ignored
    }

    /// The view became the top of the stack.
    fn on_show(&mut self) {}

    /// The view stopped being the top of the stack (covered or popped).
    fn on_hide(&mut self) {}
}

/// What a view asks of its owner in response to an event.
pub enum Command {
    /// Event not used; the owner may route it elsewhere.
    Ignored,
    /// Event used; the view's own state changed and it needs a redraw.
    Consumed,
    /// Push a new view on top of this one.
    Push(Box<dyn View>),
    /// Pop the current view.
    Pop,
    /// Show a modal message unless one is already showing.
    Modal {
        /// Status bar title while the dialog is up
        title: String,
        /// Single-line message
        message: String,
    },
    /// Post a system message through the injected dispatcher.
    Send(SystemMessage),
}

impl Command {
    /// Convenience constructor for [`Command::Modal`].
    pub fn modal(title: &str, message: &str) -> Self {
        Self::Modal {
            title: title.into(),
            message: message.into(),
        }
    }
}

impl core::fmt::Debug for Command {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Ignored => f.write_str("Ignored"),
            Self::Consumed => f.write_str("Consumed"),
            Self::Push(view) => write!(f, "Push({})", view.title()),
            Self::Pop => f.write_str("Pop"),
            Self::Modal { title, message } => write!(f, "Modal({title}: {message})"),
            Self::Send(message) => write!(f, "Send({})", message.as_str()),
        }
    }
}
