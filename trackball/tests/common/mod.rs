#![allow(dead_code)]

use core::future::Future;
use core::pin::pin;
use core::task::{Context, Poll, Waker};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use embassy_time::{Duration, Instant, MockDriver};
use rmk_trackball::power::{PowerRail, PowerRailError};
use rmk_trackball::report::ReportSink;
use rmk_trackball::sensor::{Sample, SampleError, SampleSource};

// Init logger for tests
#[ctor::ctor]
pub fn init_log() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

/// Poll `fut`, advancing the mock clock by 1ms whenever it's pending.
///
/// Returns `None` if it didn't finish within `limit` of mocked time.
pub fn run_for<F: Future>(limit: Duration, fut: F) -> Option<F::Output> {
    let mut fut = pin!(fut);
    let mut cx = Context::from_waker(Waker::noop());
    let deadline = Instant::now() + limit;
    loop {
        if let Poll::Ready(output) = fut.as_mut().poll(&mut cx) {
            return Some(output);
        }
        if Instant::now() >= deadline {
            return None;
        }
        MockDriver::get().advance(Duration::from_millis(1));
    }
}

/// Run a test future to completion on the mock clock
pub fn test_block_on<F: Future>(fut: F) -> F::Output {
    match run_for(Duration::from_secs(30), fut) {
        Some(output) => output,
        None => panic!("Test timeout reached"),
    }
}

/// Milliseconds since the mock clock started
pub fn now_ms() -> u64 {
    Instant::now().as_millis()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    Fetch,
    Movement(i32, i32),
    Scroll(i32, i32),
    Press(u8),
    Release(u8),
    Flush,
    RailOn,
    RailOff,
}

/// Time ordered record of everything the fakes saw
#[derive(Clone, Default)]
pub struct Log(Rc<RefCell<Vec<(u64, Entry)>>>);

impl Log {
    pub fn push(&self, entry: Entry) {
        self.0.borrow_mut().push((now_ms(), entry));
    }

    pub fn entries(&self) -> Vec<Entry> {
        self.0.borrow().iter().map(|(_, e)| *e).collect()
    }

    pub fn count(&self, entry: Entry) -> usize {
        self.0.borrow().iter().filter(|(_, e)| *e == entry).count()
    }

    pub fn first_time(&self, entry: Entry) -> Option<u64> {
        self.0.borrow().iter().find(|(_, e)| *e == entry).map(|(t, _)| *t)
    }

    pub fn last_time(&self, entry: Entry) -> Option<u64> {
        self.0.borrow().iter().rev().find(|(_, e)| *e == entry).map(|(t, _)| *t)
    }
}

/// Sensor replaying scripted samples, then reporting no motion
pub struct FakeSource {
    samples: VecDeque<Result<Sample, SampleError>>,
    log: Log,
}

impl FakeSource {
    pub fn new(log: &Log, samples: &[Result<Sample, SampleError>]) -> Self {
        Self {
            samples: samples.iter().copied().collect(),
            log: log.clone(),
        }
    }
}

impl SampleSource for FakeSource {
    async fn fetch(&mut self) -> Result<Sample, SampleError> {
        self.log.push(Entry::Fetch);
        self.samples.pop_front().unwrap_or(Ok(Sample::default()))
    }
}

pub fn motion(dx: i32, dy: i32) -> Result<Sample, SampleError> {
    Ok(Sample {
        dx,
        dy,
        button_state: 0,
    })
}

pub fn button(button_state: u8) -> Result<Sample, SampleError> {
    Ok(Sample {
        dx: 0,
        dy: 0,
        button_state,
    })
}

pub struct RecordingSink {
    log: Log,
}

impl RecordingSink {
    pub fn new(log: &Log) -> Self {
        Self { log: log.clone() }
    }
}

impl ReportSink for RecordingSink {
    fn set_movement(&mut self, dx: i32, dy: i32) {
        self.log.push(Entry::Movement(dx, dy));
    }

    fn set_scroll(&mut self, dx: i32, dy: i32) {
        self.log.push(Entry::Scroll(dx, dy));
    }

    fn press_button(&mut self, button: u8) {
        self.log.push(Entry::Press(button));
    }

    fn release_button(&mut self, button: u8) {
        self.log.push(Entry::Release(button));
    }

    async fn flush(&mut self) {
        self.log.push(Entry::Flush);
    }
}

pub struct FakeRail {
    enabled: bool,
    failing: bool,
    log: Log,
}

impl FakeRail {
    pub fn new(log: &Log, enabled: bool) -> Self {
        Self {
            enabled,
            failing: false,
            log: log.clone(),
        }
    }

    /// A rail which can't be switched
    pub fn failing(log: &Log, enabled: bool) -> Self {
        Self {
            enabled,
            failing: true,
            log: log.clone(),
        }
    }
}

impl PowerRail for FakeRail {
    fn is_enabled(&mut self) -> Result<bool, PowerRailError> {
        Ok(self.enabled)
    }

    fn enable(&mut self) -> Result<(), PowerRailError> {
        if self.failing {
            return Err(PowerRailError::NotReady);
        }
        self.enabled = true;
        self.log.push(Entry::RailOn);
        Ok(())
    }

    fn disable(&mut self) -> Result<(), PowerRailError> {
        if self.failing {
            return Err(PowerRailError::NotReady);
        }
        self.enabled = false;
        self.log.push(Entry::RailOff);
        Ok(())
    }
}
