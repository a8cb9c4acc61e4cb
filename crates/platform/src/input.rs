//! Input device abstraction

/// Input device trait for the directional keys and encoder
pub trait InputDevice {
    /// Poll for event (non-blocking)
    fn poll_event(&mut self) -> Option<InputEvent>;
}

/// Input events from keys and the rotary encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// Key pressed
    ButtonPress(Button),
    /// Key held for extended period
    ButtonLongPress(Button),
    /// Rotary encoder increment (positive = clockwise)
    RotaryIncrement(i32),
}

/// Physical keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Up key
    Up,
    /// Down key
    Down,
    /// Left key (also "back" inside menus)
    Left,
    /// Right key
    Right,
    /// Center select/OK key
    Select,
}

impl InputEvent {
    /// The key behind a press or long-press, if any.
    pub fn button(self) -> Option<Button> {
        match self {
            Self::ButtonPress(b) | Self::ButtonLongPress(b) => Some(b),
            Self::RotaryIncrement(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_reports_its_button() {
        assert_eq!(
            InputEvent::ButtonPress(Button::Select).button(),
            Some(Button::Select)
        );
        assert_eq!(
            InputEvent::ButtonLongPress(Button::Left).button(),
            Some(Button::Left)
        );
    }

    #[test]
    fn test_encoder_has_no_button() {
        assert_eq!(InputEvent::RotaryIncrement(-2).button(), None);
    }
}
