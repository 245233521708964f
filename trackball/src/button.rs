//! Ball click edge detection

/// Button state code reported by the sensor while the ball is pressed
pub const BUTTON_STATE_PRESSED: u8 = 0x80;
/// Button state code reported by the sensor once the ball is released
pub const BUTTON_STATE_RELEASED: u8 = 0x01;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEdge {
    Press,
    Release,
}

/// Turns the raw button state codes into single press/release edges.
///
/// Repeated identical codes don't trigger again, a press is reported once until a release
/// has been reported, and vice versa. Any other code is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonEdgeDetector {
    press_sent: bool,
    release_sent: bool,
}

impl ButtonEdgeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, state: u8) -> Option<ButtonEdge> {
        if state == BUTTON_STATE_PRESSED && !self.press_sent {
            self.press_sent = true;
            self.release_sent = false;
            Some(ButtonEdge::Press)
        } else if state == BUTTON_STATE_RELEASED && !self.release_sent {
            self.press_sent = false;
            self.release_sent = true;
            Some(ButtonEdge::Release)
        } else {
            None
        }
    }
}
