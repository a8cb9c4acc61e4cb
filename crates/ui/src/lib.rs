//! Application UI shell: view navigation stack, status bar and modal dialogs.
//!
//! The shell owns every screen through a [`Navigator`]: exactly one view (the
//! top of the stack) is attached to the display and holds input focus.
//! [`SystemView`] is the composition root that places the [`StatusBar`] above
//! the navigator and keeps it in sync with the active view.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ < │ Title         │ cam │ zz │  StatusBar   (16 px)
//! ├──────────────────────────────┤
//! │                              │
//! │      top of Navigator        │  active View (rest of screen)
//! │                              │
//! └──────────────────────────────┘
//! ```
//!
//! This crate is `no_std` + `alloc`: views are heap-allocated trait objects.

#![cfg_attr(not(test), no_std)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![deny(clippy::expect_used)]
// Screen coordinates are at most 320 px, so u32 <-> i32 casts cannot wrap.
#![allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]

extern crate alloc;

pub mod layout;
pub mod menu;
pub mod modal;
pub mod navigation;
pub mod painter;
pub mod status_bar;
pub mod system_view;
pub mod view;
pub mod views;

pub use layout::Layout;
pub use menu::{MenuItem, MenuView};
pub use modal::ModalMessageView;
pub use navigation::{Navigator, Outcome, ViewChanged};
pub use painter::{Canvas, Painter, Surface};
pub use status_bar::{capture_screenshot, CaptureError, StatusBar, StatusControl, StatusResponse};
pub use system_view::{FocusRegion, RenderError, SystemView};
pub use view::{Command, View, ViewId};
pub use views::{FirmwareHandoffView, NotImplementedView};
