//! Application configuration and constants
//!
//! This module defines central configuration values used across the UI shell.
//! All branding, screen geometry and file naming should reference these
//! constants rather than hardcoding values.

/// The application name, shown in the status bar when a view has no title.
pub const APP_NAME: &str = "RadioDeck";

/// Application version (synchronized with Cargo.toml)
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// LCD width in pixels (portrait orientation).
pub const SCREEN_WIDTH: u32 = 240;

/// LCD height in pixels (portrait orientation).
pub const SCREEN_HEIGHT: u32 = 320;

/// Height of the status bar strip at the top of the screen.
pub const STATUS_BAR_HEIGHT: u32 = 16;

/// Advance width of one glyph of the fixed UI font.
pub const GLYPH_WIDTH: u32 = 8;

/// Height of one text row of the fixed UI font.
pub const LINE_HEIGHT: u32 = 16;

/// Text row used for the centered message of a modal dialog.
pub const MODAL_MESSAGE_ROW: u32 = 7;

/// Screenshot file stem pattern; every `?` is replaced by a decimal digit.
pub const SCREENSHOT_PATTERN: &str = "SCR_????";

/// Extension given to screenshot files.
pub const SCREENSHOT_EXTENSION: &str = "PNG";

/// Maximum number of undelivered view-changed notifications kept by the navigator.
pub const NAV_EVENT_CAPACITY: usize = 8;
