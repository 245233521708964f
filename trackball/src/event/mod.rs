//! Event system of the trackball engine
//!
//! This module provides:
//! - Keyboard state events the engine reacts to (layer changes, key activity)
//! - The default layer request the engine emits after an idle period
//! - Publisher/subscriber traits, implemented for the embassy-sync channels, so that
//!   every consumer receives its event source as an explicit constructor argument

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel;
use embassy_sync::pubsub::{ImmediatePublisher, Subscriber};

mod keyboard_state;

pub use keyboard_state::{DefaultLayerRequest, KeyActivityEvent, LayerChangeEvent};

/// Trait for event publishers
///
/// Publishing must not block, it's called from timer expiry and other non-blocking contexts.
pub trait EventPublisher<T> {
    fn publish(&self, message: T);
}

/// Trait for event subscribers
pub trait EventSubscriber<T> {
    async fn next_event(&mut self) -> T;
}

// Implementations for embassy-sync PubSubChannel
impl<'a, M: RawMutex, T: Clone, const CAP: usize, const SUBS: usize, const PUBS: usize> EventPublisher<T>
    for ImmediatePublisher<'a, M, T, CAP, SUBS, PUBS>
{
    fn publish(&self, message: T) {
        self.publish_immediate(message);
    }
}

impl<'a, M: RawMutex, T: Clone, const CAP: usize, const SUBS: usize, const PUBS: usize> EventSubscriber<T>
    for Subscriber<'a, M, T, CAP, SUBS, PUBS>
{
    async fn next_event(&mut self) -> T {
        self.next_message_pure().await
    }
}

// Implementation for embassy-sync Channel
impl<'a, M: RawMutex, T, const N: usize> EventPublisher<T> for channel::Sender<'a, M, T, N> {
    fn publish(&self, message: T) {
        if self.try_send(message).is_err() {
            error!("Send event to Channel error, channel is full");
        }
    }
}

impl<'a, M: RawMutex, T, const N: usize> EventSubscriber<T> for channel::Receiver<'a, M, T, N> {
    async fn next_event(&mut self) -> T {
        self.receive().await
    }
}
