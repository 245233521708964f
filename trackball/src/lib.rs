//! Pointer engine of a PIM447 style trackball
//!
//! The engine samples relative motion from a [`SampleSource`], accelerates and smooths it,
//! and sends it as mouse movement or scroll to a [`ReportSink`]. Optionally, the sensor is
//! only powered while a keymap layer is active, and an idle timeout returns the keyboard to
//! its default layer.
//!
//! ## Feature flags
#![doc = document_features::document_features!()]
#![cfg_attr(not(test), no_std)]
#![allow(async_fn_in_trait)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod button;
pub mod channel;
pub mod config;
pub mod controller;
pub mod dispatcher;
pub mod driver;
pub mod event;
pub mod idle;
pub mod mode;
pub mod motion;
pub mod polling;
pub mod power;
pub mod report;
pub mod sensor;

use embassy_futures::join::join3;

pub use config::{AxisConfig, ConfigError, Norm, TrackballConfig};
pub use driver::gpio::GpioPowerRail;
pub use event::{DefaultLayerRequest, EventPublisher, EventSubscriber, KeyActivityEvent, LayerChangeEvent};
pub use idle::IdleTimer;
pub use mode::{Mode, ModeCommand, ModeHandle};
pub use polling::{LoopControl, PollingLoop};
pub use power::{PowerLifecycleController, PowerRail, PowerRailError, PowerState};
pub use report::{HidMouseSink, ReportSink};
pub use sensor::{Sample, SampleError, SampleSource};

pub type RawMutex = embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

/// Run the trackball engine: the polling loop, the idle timer and the power lifecycle.
///
/// `mode` is set to the configured initial mode first. This function only returns if `config`
/// is invalid. When the sensor fails, polling stops for good but the power rail keeps following
/// the power layer.
#[allow(clippy::too_many_arguments)]
pub async fn run_trackball<S, R, P, L, K, D>(
    config: &TrackballConfig,
    mode: &ModeHandle,
    source: S,
    sink: R,
    rail: Option<P>,
    layer_events: L,
    key_activity: K,
    default_layer: D,
) -> Result<(), ConfigError>
where
    S: SampleSource,
    R: ReportSink,
    P: PowerRail,
    L: EventSubscriber<LayerChangeEvent>,
    K: EventSubscriber<KeyActivityEvent>,
    D: EventPublisher<DefaultLayerRequest>,
{
    if let Err(e) = config.validate() {
        error!("Invalid trackball config: {:?}", e);
        return Err(e);
    }

    mode.set_mode(config.mode.into());

    // Sampling starts once the power lifecycle has set up the rail
    let control = LoopControl::paused();
    let idle = IdleTimer::from_config(config);
    let mut polling = PollingLoop::new(config, source, sink, mode, &control, &idle);
    let mut power = PowerLifecycleController::new(config, rail, &control, &idle, layer_events);

    let polling_fut = async {
        polling.run().await;
        core::future::pending::<()>().await
    };
    join3(polling_fut, idle.run(key_activity, default_layer), power.run()).await;
    Ok(())
}
