//! Idle timer which returns the keyboard to its default layer
//!
//! Pointer reports and key activity rearm the timer. Once it expires, a single
//! [`DefaultLayerRequest`] is published and the timer stays disarmed until the next activity.

use embassy_futures::select::{Either3, select3};
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Instant, Timer};

use crate::RawMutex;
use crate::config::TrackballConfig;
use crate::event::{DefaultLayerRequest, EventPublisher, EventSubscriber, KeyActivityEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum IdleCommand {
    Rearm,
    Disarm,
}

pub struct IdleTimer {
    /// `None` when idle detection is disabled
    timeout: Option<Duration>,
    command: Signal<RawMutex, IdleCommand>,
}

impl IdleTimer {
    pub const fn new(timeout: Option<Duration>) -> Self {
        Self {
            timeout,
            command: Signal::new(),
        }
    }

    pub fn from_config(config: &TrackballConfig) -> Self {
        Self::new(config.idle_timeout())
    }

    pub fn is_enabled(&self) -> bool {
        self.timeout.is_some()
    }

    /// Restart the countdown with the full timeout. Never blocks.
    pub fn rearm(&self) {
        if self.is_enabled() {
            self.command.signal(IdleCommand::Rearm);
        }
    }

    /// Cancel a pending countdown. Never blocks.
    pub fn disarm(&self) {
        if self.is_enabled() {
            self.command.signal(IdleCommand::Disarm);
        }
    }

    async fn expiry(deadline: Option<Instant>) {
        match deadline {
            Some(deadline) => Timer::at(deadline).await,
            None => core::future::pending().await,
        }
    }

    /// Run the timer.
    ///
    /// Key activity is read from `key_activity`, expiries are published to `default_layer`.
    pub async fn run<K, P>(&self, mut key_activity: K, default_layer: P) -> !
    where
        K: EventSubscriber<KeyActivityEvent>,
        P: EventPublisher<DefaultLayerRequest>,
    {
        let Some(timeout) = self.timeout else {
            // Disabled, keep draining key activity
            loop {
                key_activity.next_event().await;
            }
        };

        let mut deadline = None;
        loop {
            let event = select3(
                Self::expiry(deadline),
                self.command.wait(),
                key_activity.next_event(),
            )
            .await;

            match event {
                Either3::First(_) => {
                    info!("Trackball idle for {}ms, requesting default layer", timeout.as_millis());
                    default_layer.publish(DefaultLayerRequest);
                    deadline = None;
                }
                Either3::Second(IdleCommand::Rearm) | Either3::Third(_) => {
                    deadline = Some(Instant::now() + timeout);
                }
                Either3::Second(IdleCommand::Disarm) => {
                    debug!("Idle timer disarmed");
                    deadline = None;
                }
            }
        }
    }
}
