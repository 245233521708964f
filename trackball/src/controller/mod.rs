//! Controller module of the trackball engine
//!
//! This module defines the `Controller` trait and its variations for different modes of execution.
//! A controller owns the subscriber of the events it reacts to, the subscriber is handed over
//! when the controller is constructed.
//!
//! # Usage
//!
//! ```rust,ignore
//! use rmk_trackball::channel::LAYER_CHANGE_CHANNEL;
//! use rmk_trackball::controller::{Controller, EventController};
//!
//! struct MyController<S: EventSubscriber<LayerChangeEvent>> {
//!     sub: S,
//! }
//!
//! impl<S: EventSubscriber<LayerChangeEvent>> Controller for MyController<S> {
//!     type Event = LayerChangeEvent;
//!     type Subscriber = S;
//!
//!     fn subscriber(&mut self) -> &mut S {
//!         &mut self.sub
//!     }
//!
//!     async fn process_event(&mut self, event: LayerChangeEvent) {
//!         // handle event
//!     }
//! }
//!
//! let mut c = MyController { sub: LAYER_CHANGE_CHANNEL.subscriber().unwrap() };
//! c.event_loop().await;
//! ```

use crate::event::EventSubscriber;

/// This trait provides the interface for components reacting to events.
pub trait Controller {
    /// Type of the received events.
    type Event;

    /// Subscriber the events are received from
    type Subscriber: EventSubscriber<Self::Event>;

    /// The event subscriber owned by the controller
    fn subscriber(&mut self) -> &mut Self::Subscriber;

    /// Process the received event
    async fn process_event(&mut self, event: Self::Event);
}

/// The trait for event-driven controllers.
///
/// This trait is automatically implemented for all types that implement `Controller`.
/// It provides a default `event_loop()` implementation that continuously waits for
/// events and processes them one at a time.
pub trait EventController: Controller {
    /// Event loop that continuously processes incoming events
    async fn event_loop(&mut self) -> ! {
        loop {
            let event = self.subscriber().next_event().await;
            self.process_event(event).await;
        }
    }
}

// Auto impl `EventController` trait for all `Controller`
impl<T: Controller> EventController for T {}
