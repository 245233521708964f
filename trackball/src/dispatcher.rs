//! Routing of the sampled motion to pointer movement or scrolling

use crate::config::TrackballConfig;
use crate::mode::{Mode, ModeHandle};
use crate::motion::{InertiaAccumulator, MotionState, MotionTransformer};
use crate::report::{ReportChannel, ReportSink};

/// What a dispatch wrote into the sink
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Dispatch {
    /// A report has to be sent this cycle
    pub report: bool,
    /// Channel to reset once the report is sent
    pub clear: Option<ReportChannel>,
}

/// Reads the current mode and turns raw deltas into movement or scroll updates.
///
/// Owns the carried motion used by acceleration and inertia.
pub struct ModeDispatcher<'a> {
    mode: &'a ModeHandle,
    transformer: MotionTransformer,
    inertia: InertiaAccumulator,
    move_factors: (i32, i32),
    scroll_divisors: (i32, i32),
    motion: MotionState,
}

impl<'a> ModeDispatcher<'a> {
    pub fn new(config: &TrackballConfig, mode: &'a ModeHandle) -> Self {
        Self {
            mode,
            transformer: MotionTransformer::from_config(config),
            inertia: InertiaAccumulator::from_config(config),
            move_factors: config.move_factors(),
            scroll_divisors: config.scroll_divisors(),
            motion: MotionState::default(),
        }
    }

    /// Motion carried to the next cycle
    pub fn motion(&self) -> MotionState {
        self.motion
    }

    pub fn dispatch<R: ReportSink>(&mut self, dx: i32, dy: i32, sink: &mut R) -> Dispatch {
        match self.mode.mode() {
            Mode::Move => self.dispatch_move(dx, dy, sink),
            Mode::Scroll => self.dispatch_scroll(dx, dy, sink),
        }
    }

    fn dispatch_move<R: ReportSink>(&mut self, dx: i32, dy: i32, sink: &mut R) -> Dispatch {
        let (factor_x, factor_y) = self.move_factors;
        let MotionState { stored_dx, stored_dy } = self.motion;

        // Both axes are accelerated against the motion carried before this cycle
        let add_dx = self
            .transformer
            .accelerate(stored_dx, stored_dy, dx.saturating_mul(factor_x));
        let add_dy = self
            .transformer
            .accelerate(stored_dx, stored_dy, dy.saturating_mul(factor_y));
        self.motion.accumulate(add_dx, add_dy);

        match self.inertia.split(&mut self.motion) {
            Some((send_dx, send_dy)) => {
                trace!("Trackball move: {}, {}, carried: {:?}", send_dx, send_dy, self.motion);
                sink.set_movement(send_dx, send_dy);
                Dispatch {
                    report: true,
                    clear: Some(ReportChannel::Movement),
                }
            }
            None => Dispatch::default(),
        }
    }

    fn dispatch_scroll<R: ReportSink>(&mut self, dx: i32, dy: i32, sink: &mut R) -> Dispatch {
        let (divisor_x, divisor_y) = self.scroll_divisors;
        sink.set_scroll(dx.saturating_div(divisor_x), dy.saturating_div(divisor_y));

        // Scroll mode reports every cycle and resets the movement channel, not the scroll one
        Dispatch {
            report: true,
            clear: Some(ReportChannel::Movement),
        }
    }
}
