//! Exposed channels which can be used to connect the trackball engine to the keyboard

use embassy_sync::channel::Channel;
use embassy_sync::pubsub::PubSubChannel;
pub use embassy_sync::{blocking_mutex, channel, pubsub, signal};
use usbd_hid::descriptor::MouseReport;

use crate::RawMutex;
use crate::event::{DefaultLayerRequest, KeyActivityEvent, LayerChangeEvent};

pub const LAYER_CHANGE_CHANNEL_SIZE: usize = 4;
pub const LAYER_CHANGE_SUBS: usize = 2;
pub const LAYER_CHANGE_PUBS: usize = 1;
pub const KEY_ACTIVITY_CHANNEL_SIZE: usize = 8;
pub const KEY_ACTIVITY_SUBS: usize = 2;
pub const KEY_ACTIVITY_PUBS: usize = 1;
pub const DEFAULT_LAYER_CHANNEL_SIZE: usize = 1;
pub const MOUSE_REPORT_CHANNEL_SIZE: usize = 8;

/// Layer activation/deactivation, published by the keymap
pub static LAYER_CHANGE_CHANNEL: PubSubChannel<
    RawMutex,
    LayerChangeEvent,
    LAYER_CHANGE_CHANNEL_SIZE,
    LAYER_CHANGE_SUBS,
    LAYER_CHANGE_PUBS,
> = PubSubChannel::new();
/// Key press/release of any key, published by the keyboard
pub static KEY_ACTIVITY_CHANNEL: PubSubChannel<
    RawMutex,
    KeyActivityEvent,
    KEY_ACTIVITY_CHANNEL_SIZE,
    KEY_ACTIVITY_SUBS,
    KEY_ACTIVITY_PUBS,
> = PubSubChannel::new();
/// Default layer requests from the idle timer to the keymap
pub static DEFAULT_LAYER_CHANNEL: Channel<RawMutex, DefaultLayerRequest, DEFAULT_LAYER_CHANNEL_SIZE> = Channel::new();
/// Channel for mouse reports from the trackball to the hid writer
pub static MOUSE_REPORT_CHANNEL: Channel<RawMutex, MouseReport, MOUSE_REPORT_CHANNEL_SIZE> = Channel::new();
