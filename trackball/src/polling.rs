//! The periodic sampling loop of the trackball

use core::sync::atomic::{AtomicBool, Ordering};

use embassy_sync::signal::Signal;
use embassy_time::{Duration, Timer};

use crate::RawMutex;
use crate::button::{ButtonEdge, ButtonEdgeDetector};
use crate::config::TrackballConfig;
use crate::dispatcher::ModeDispatcher;
use crate::idle::IdleTimer;
use crate::mode::ModeHandle;
use crate::report::ReportSink;
use crate::sensor::{SampleError, SampleSource};

/// Pause/resume handle of the [`PollingLoop`].
///
/// The loop checks it at the top of every iteration, so a pause takes effect once the
/// cycle in progress has finished.
pub struct LoopControl {
    paused: AtomicBool,
    stopped: AtomicBool,
    resume: Signal<RawMutex, ()>,
}

impl Default for LoopControl {
    fn default() -> Self {
        Self::new()
    }
}

impl LoopControl {
    /// A running loop
    pub const fn new() -> Self {
        Self {
            paused: AtomicBool::new(false),
            stopped: AtomicBool::new(false),
            resume: Signal::new(),
        }
    }

    /// A loop which waits for [`LoopControl::resume`] before its first sample
    pub const fn paused() -> Self {
        Self {
            paused: AtomicBool::new(true),
            stopped: AtomicBool::new(false),
            resume: Signal::new(),
        }
    }

    pub fn pause(&self) {
        self.paused.store(true, Ordering::Release);
    }

    pub fn resume(&self) {
        if self.is_stopped() {
            warn!("Trackball polling has stopped, resume ignored");
            return;
        }
        self.paused.store(false, Ordering::Release);
        self.resume.signal(());
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Acquire)
    }

    /// The loop terminated after a sample error and won't run again
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }

    async fn wait_resumed(&self) {
        while self.is_paused() {
            self.resume.wait().await;
        }
    }

    fn stop(&self) {
        self.stopped.store(true, Ordering::Release);
    }
}

/// Samples the sensor periodically and turns the samples into mouse reports.
pub struct PollingLoop<'a, S: SampleSource, R: ReportSink> {
    source: S,
    sink: R,
    dispatcher: ModeDispatcher<'a>,
    buttons: ButtonEdgeDetector,
    button: u8,
    swap_axes: bool,
    poll_interval: Duration,
    control: &'a LoopControl,
    idle: &'a IdleTimer,
}

impl<'a, S: SampleSource, R: ReportSink> PollingLoop<'a, S, R> {
    pub fn new(
        config: &TrackballConfig,
        source: S,
        sink: R,
        mode: &'a ModeHandle,
        control: &'a LoopControl,
        idle: &'a IdleTimer,
    ) -> Self {
        Self {
            source,
            sink,
            dispatcher: ModeDispatcher::new(config, mode),
            buttons: ButtonEdgeDetector::new(),
            button: config.button,
            swap_axes: config.swap_axes,
            poll_interval: config.poll_interval(),
            control,
            idle,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn sink(&self) -> &R {
        &self.sink
    }

    pub fn dispatcher(&self) -> &ModeDispatcher<'a> {
        &self.dispatcher
    }

    /// Run the loop until a sample can't be read.
    ///
    /// A sample error is terminal: it's logged, returned, and the loop never samples again.
    pub async fn run(&mut self) -> SampleError {
        info!("Trackball polling every {}ms", self.poll_interval.as_millis());
        loop {
            if self.control.is_paused() {
                debug!("Trackball polling paused");
                self.control.wait_resumed().await;
                debug!("Trackball polling resumed");
            }

            if let Err(e) = self.poll_once().await {
                error!("Failed to read trackball sample: {:?}, polling stopped", e);
                self.control.stop();
                return e;
            }

            Timer::after(self.poll_interval).await;
        }
    }

    /// One sampling cycle. Returns whether a report was sent.
    pub async fn poll_once(&mut self) -> Result<bool, SampleError> {
        let sample = self.source.fetch().await?;

        let (mut dx, mut dy) = (sample.dx, sample.dy);
        if self.swap_axes && (dx != 0 || dy != 0) {
            core::mem::swap(&mut dx, &mut dy);
        }

        let mut dispatch = self.dispatcher.dispatch(dx, dy, &mut self.sink);

        match self.buttons.update(sample.button_state) {
            Some(ButtonEdge::Press) => {
                debug!("Trackball button {} pressed", self.button);
                self.sink.press_button(self.button);
                dispatch.report = true;
            }
            Some(ButtonEdge::Release) => {
                debug!("Trackball button {} released", self.button);
                self.sink.release_button(self.button);
                dispatch.report = true;
            }
            None => {}
        }

        if dispatch.report {
            self.sink.flush().await;
            if let Some(channel) = dispatch.clear {
                self.sink.clear(channel);
            }
            self.idle.rearm();
        }

        Ok(dispatch.report)
    }
}
