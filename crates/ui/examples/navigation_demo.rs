//! Headless walk through a small menu tree.
//!
//! Scripts key presses into the shell, renders every frame into an in-memory
//! display and saves one screenshot as a PNG into a temporary directory.
//!
//! ```text
//! RUST_LOG=ui=debug cargo run -p ui --example navigation_demo
//! ```

use platform::mocks::{MockDispatcher, MockDisplay, MockInput};
use platform::storage_local::LocalScreenshotStorage;
use platform::{Button, InputDevice};
use tracing_subscriber::EnvFilter;
use ui::{FirmwareHandoffView, Layout, MenuItem, MenuView, NotImplementedView, SystemView, View};

fn audio() -> Box<dyn View> {
    Box::new(NotImplementedView::new())
}

fn receiver() -> Box<dyn View> {
    Box::new(MenuView::new(
        "Receiver",
        vec![MenuItem::new("Audio", audio), MenuItem::new("Transponders", audio)],
    ))
}

fn firmware() -> Box<dyn View> {
    Box::new(FirmwareHandoffView::new())
}

fn system_menu() -> Box<dyn View> {
    Box::new(MenuView::new(
        "",
        vec![
            MenuItem::new("Receiver", receiver),
            MenuItem::new("Capture", audio),
            MenuItem::new("Stock firmware", firmware),
        ],
    ))
}

type Shell = SystemView<MockDispatcher, LocalScreenshotStorage>;

fn redraw(system: &Shell, display: &mut MockDisplay) -> Result<(), String> {
    system.render(display).map_err(|error| error.to_string())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let dir = tempfile::tempdir()?;
    let layout = Layout::default();
    let mut display = MockDisplay::new(layout.screen.size.width, layout.screen.size.height);
    let mut system = SystemView::new(
        layout,
        MockDispatcher::new(),
        LocalScreenshotStorage::new(dir.path()),
        system_menu(),
    );
    redraw(&system, &mut display)?;

    // Receiver > Audio, dismiss, back out, then a modal on top of the root.
    let mut input = MockInput::new();
    input.press_all(&[Button::Select, Button::Select, Button::Select, Button::Left]);
    while let Some(event) = input.poll_event() {
        system.handle_event(event, &mut display);
        if let Some(dirty) = system.take_dirty() {
            tracing::info!(?dirty, title = system.status_bar().title(), "redraw");
            redraw(&system, &mut display)?;
        }
    }
    system.display_modal("Error", "Disk full");
    redraw(&system, &mut display)?;

    match system.capture_screenshot(&mut display) {
        Some(name) => tracing::info!(path = %dir.path().join(name.as_str()).display(), "saved"),
        None => tracing::warn!("screenshot abandoned"),
    }
    tracing::info!(
        depth = system.navigation().depth(),
        messages = system.status_bar().dispatcher().sent().len(),
        storage = system.status_bar().storage_status().as_str(),
        "done"
    );
    Ok(())
}
