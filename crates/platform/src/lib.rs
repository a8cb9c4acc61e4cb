//! Hardware Abstraction Layer (HAL) for the RadioDeck handheld
//!
//! This crate provides trait-based abstractions for the services the UI shell
//! depends on, enabling development and testing without physical hardware.
//!
//! # Architecture Layers
//!
//! ```text
//! Application views (receiver, capture, setup, ...)
//!         ↓
//! UI shell (ui crate - navigation stack, status bar)
//!         ↓
//! Platform HAL (this crate - trait abstractions)
//!         ↓
//! LCD controller, SD card, event dispatcher
//! ```
//!
//! # Abstractions
//!
//! - [`FrameReadback`] - Pixel read-back from the LCD framebuffer
//! - [`InputDevice`] - Directional keys, select and rotary encoder
//! - [`MessageDispatcher`] - Fire-and-forget system messages (sleep, stop)
//! - [`ScreenshotStorage`] / [`ImageWriter`] - Screenshot file allocation and encoding
//!
//! # Features
//!
//! - `std`: Local filesystem storage and mock implementations
//! - `defmt`: Enable defmt logging derives

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![allow(clippy::must_use_candidate)] // accessors; callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod display;
pub mod input;
pub mod messaging;
pub mod storage;

#[cfg(feature = "std")]
pub mod storage_local;

#[cfg(any(test, feature = "std"))]
pub mod mocks;

// Re-export main high-level traits
pub use display::{DisplayError, FrameReadback};
pub use input::{Button, InputDevice, InputEvent};
pub use messaging::{MessageDispatcher, SystemMessage};
pub use storage::{FileName, ImageWriter, ScreenshotStorage, StorageStatus};
