use embedded_hal::digital::{Error as _, StatefulOutputPin};

use crate::power::{PowerRail, PowerRailError};

/// Power rail switched by a GPIO output.
///
/// It wraps the low-active and high-active pins, the rail is enabled while the pin is active.
pub struct GpioPowerRail<P: StatefulOutputPin> {
    pin: P,
    low_active: bool,
}

impl<P: StatefulOutputPin> GpioPowerRail<P> {
    /// Create a new GpioPowerRail instance
    pub fn new(pin: P, low_active: bool) -> Self {
        Self { pin, low_active }
    }

    /// Release the pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: StatefulOutputPin> PowerRail for GpioPowerRail<P> {
    fn is_enabled(&mut self) -> Result<bool, PowerRailError> {
        let active = if self.low_active {
            self.pin.is_set_low()
        } else {
            self.pin.is_set_high()
        };
        active.map_err(|e| PowerRailError::Pin(e.kind()))
    }

    fn enable(&mut self) -> Result<(), PowerRailError> {
        let res = if self.low_active {
            self.pin.set_low()
        } else {
            self.pin.set_high()
        };
        res.map_err(|e| PowerRailError::Pin(e.kind()))
    }

    fn disable(&mut self) -> Result<(), PowerRailError> {
        let res = if self.low_active {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        res.map_err(|e| PowerRailError::Pin(e.kind()))
    }
}
