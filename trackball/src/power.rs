//! Power gating of the trackball, driven by a keymap layer
//!
//! When a power layer is configured, the sensor is only powered and sampled while that
//! layer is active. Activating powers the rail first and resumes sampling after a grace
//! period. Deactivating pauses sampling first and cuts the rail after the grace period,
//! so the sensor is never read while unpowered.

use embassy_time::Timer;

use crate::config::{GRACE_PERIOD, TrackballConfig};
use crate::controller::{Controller, EventController};
use crate::event::{EventSubscriber, LayerChangeEvent};
use crate::idle::IdleTimer;
use crate::polling::LoopControl;

/// Errors of power rails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerRailError {
    /// The output pin controlling the rail failed
    Pin(embedded_hal::digital::ErrorKind),
    /// The rail isn't ready to be switched
    NotReady,
}

/// A switchable supply of the sensor
pub trait PowerRail {
    fn is_enabled(&mut self) -> Result<bool, PowerRailError>;
    fn enable(&mut self) -> Result<(), PowerRailError>;
    fn disable(&mut self) -> Result<(), PowerRailError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerState {
    Active,
    Suspended,
}

/// Follows the power layer and switches the sampling loop, the idle timer and the rail.
pub struct PowerLifecycleController<'a, R: PowerRail, S: EventSubscriber<LayerChangeEvent>> {
    power_layer: Option<u8>,
    state: PowerState,
    rail: Option<R>,
    control: &'a LoopControl,
    idle: &'a IdleTimer,
    sub: S,
}

impl<'a, R: PowerRail, S: EventSubscriber<LayerChangeEvent>> PowerLifecycleController<'a, R, S> {
    pub fn new(config: &TrackballConfig, rail: Option<R>, control: &'a LoopControl, idle: &'a IdleTimer, sub: S) -> Self {
        let power_layer = config.power_layer();
        Self {
            power_layer,
            state: if power_layer.is_some() {
                PowerState::Suspended
            } else {
                PowerState::Active
            },
            rail,
            control,
            idle,
            sub,
        }
    }

    pub fn state(&self) -> PowerState {
        self.state
    }

    pub fn power_layer(&self) -> Option<u8> {
        self.power_layer
    }

    pub fn rail(&self) -> Option<&R> {
        self.rail.as_ref()
    }

    /// Startup sequence.
    ///
    /// With power gating, sampling is paused and the rail is switched off after the
    /// grace period. Without it, the rail is switched on, and sampling resumes once the
    /// sensor had time to power up. The idle timer stays disarmed until the first activity.
    pub async fn init(&mut self) {
        match self.power_layer {
            Some(layer) => {
                info!("Trackball powered by layer {}", layer);
                self.control.pause();
                Timer::after(GRACE_PERIOD).await;
                self.switch_rail(false);
            }
            None => {
                info!("Trackball power gating disabled");
                if self.switch_rail(true) {
                    Timer::after(GRACE_PERIOD).await;
                }
                self.control.resume();
            }
        }
    }

    /// Run the startup sequence, then follow the layer changes forever
    pub async fn run(&mut self) -> ! {
        self.init().await;
        self.event_loop().await
    }

    async fn activate(&mut self) {
        info!("Trackball power layer activated");
        self.switch_rail(true);
        Timer::after(GRACE_PERIOD).await;
        self.control.resume();
        self.idle.rearm();
        self.state = PowerState::Active;
    }

    async fn suspend(&mut self) {
        info!("Trackball power layer deactivated");
        self.control.pause();
        Timer::after(GRACE_PERIOD).await;
        self.idle.disarm();
        self.switch_rail(false);
        self.state = PowerState::Suspended;
    }

    /// Switch the rail unless it's already in the requested state.
    ///
    /// Returns whether the rail was switched. Failures are logged only.
    fn switch_rail(&mut self, on: bool) -> bool {
        let Some(rail) = self.rail.as_mut() else {
            warn!("Trackball power rail not controlled");
            return false;
        };

        match rail.is_enabled() {
            Ok(enabled) if enabled == on => return false,
            Ok(_) => {}
            Err(e) => warn!("Unable to read trackball power rail state: {:?}", e),
        }

        debug!("Switching trackball power rail, on: {}", on);
        let res = if on { rail.enable() } else { rail.disable() };
        if let Err(e) = res {
            error!("Failed to switch trackball power rail, on: {}, error: {:?}", on, e);
        }
        true
    }
}

impl<'a, R: PowerRail, S: EventSubscriber<LayerChangeEvent>> Controller for PowerLifecycleController<'a, R, S> {
    type Event = LayerChangeEvent;
    type Subscriber = S;

    fn subscriber(&mut self) -> &mut S {
        &mut self.sub
    }

    async fn process_event(&mut self, event: LayerChangeEvent) {
        if self.power_layer != Some(event.layer) {
            return;
        }
        match (event.active, self.state) {
            (true, PowerState::Suspended) => self.activate().await,
            (false, PowerState::Active) => self.suspend().await,
            _ => debug!("Trackball already {:?}, ignoring {:?}", self.state, event),
        }
    }
}
