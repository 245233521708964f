//! Keyboard state events

use postcard::experimental::max_size::MaxSize;
use serde::{Deserialize, Serialize};

/// A layer was activated or deactivated
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, MaxSize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LayerChangeEvent {
    pub layer: u8,
    pub active: bool,
}

impl LayerChangeEvent {
    pub fn activated(layer: u8) -> Self {
        Self { layer, active: true }
    }

    pub fn deactivated(layer: u8) -> Self {
        Self { layer, active: false }
    }
}

/// Any key of the keyboard was pressed or released
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, MaxSize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyActivityEvent {
    pub pressed: bool,
}

/// Request to the keymap to return to the default layer
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, MaxSize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DefaultLayerRequest;
