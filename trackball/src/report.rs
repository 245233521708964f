//! Mouse report assembly
//!
//! The polling loop writes movement, scroll and button updates into a [`ReportSink`]
//! and flushes it once per cycle. Values written with `set_*` stay in the sink after a
//! flush, the caller has to reset them explicitly.

use embassy_sync::channel::Sender;
use usbd_hid::descriptor::MouseReport;

use crate::RawMutex;

/// Part of the report which has to be reset after a flush
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReportChannel {
    Movement,
    Scroll,
}

/// Destination of the mouse updates, eg. the HID report of the keyboard.
pub trait ReportSink {
    fn set_movement(&mut self, dx: i32, dy: i32);
    fn set_scroll(&mut self, dx: i32, dy: i32);
    fn press_button(&mut self, button: u8);
    fn release_button(&mut self, button: u8);
    /// Send the current report to the host
    async fn flush(&mut self);

    /// Reset one channel of the report to zero
    fn clear(&mut self, channel: ReportChannel) {
        match channel {
            ReportChannel::Movement => self.set_movement(0, 0),
            ReportChannel::Scroll => self.set_scroll(0, 0),
        }
    }
}

fn clamp_i8(v: i32) -> i8 {
    v.clamp(i8::MIN as i32, i8::MAX as i32) as i8
}

fn button_mask(button: u8) -> u8 {
    1u8.checked_shl(button as u32).unwrap_or(0)
}

/// [`ReportSink`] which keeps a HID [`MouseReport`] and sends it to a channel on flush.
pub struct HidMouseSink<'a, const N: usize> {
    report: MouseReport,
    sender: Sender<'a, RawMutex, MouseReport, N>,
}

impl<'a, const N: usize> HidMouseSink<'a, N> {
    pub fn new(sender: Sender<'a, RawMutex, MouseReport, N>) -> Self {
        Self {
            report: MouseReport {
                buttons: 0,
                x: 0,
                y: 0,
                wheel: 0,
                pan: 0,
            },
            sender,
        }
    }

    /// The report as it would be sent now
    pub fn report(&self) -> MouseReport {
        self.report
    }
}

impl<const N: usize> ReportSink for HidMouseSink<'_, N> {
    fn set_movement(&mut self, dx: i32, dy: i32) {
        self.report.x = clamp_i8(dx);
        self.report.y = clamp_i8(dy);
    }

    fn set_scroll(&mut self, dx: i32, dy: i32) {
        self.report.pan = clamp_i8(dx);
        self.report.wheel = clamp_i8(dy);
    }

    /// Buttons past the 8 bit mask are ignored
    fn press_button(&mut self, button: u8) {
        self.report.buttons |= button_mask(button);
    }

    fn release_button(&mut self, button: u8) {
        self.report.buttons &= !button_mask(button);
    }

    async fn flush(&mut self) {
        self.sender.send(self.report).await;
    }
}

#[cfg(test)]
mod tests {
    use embassy_futures::block_on;
    use embassy_sync::channel::Channel;

    use super::*;

    #[test]
    fn test_hid_sink_clamps_and_keeps_values() {
        let channel: Channel<RawMutex, MouseReport, 4> = Channel::new();
        let mut sink = HidMouseSink::new(channel.sender());

        sink.set_movement(300, -300);
        sink.set_scroll(-2, 5);
        sink.press_button(1);
        block_on(sink.flush());

        let report = channel.try_receive().unwrap();
        assert_eq!((report.x, report.y), (127, -128));
        assert_eq!((report.pan, report.wheel), (-2, 5));
        assert_eq!(report.buttons, 0b10);

        // Flushing doesn't reset anything
        let kept = sink.report();
        assert_eq!((kept.x, kept.y, kept.pan, kept.wheel), (127, -128, -2, 5));
    }

    #[test]
    fn test_hid_sink_clear_and_release() {
        let channel: Channel<RawMutex, MouseReport, 4> = Channel::new();
        let mut sink = HidMouseSink::new(channel.sender());

        sink.set_movement(3, 4);
        sink.set_scroll(1, 1);
        sink.press_button(0);
        sink.press_button(2);

        sink.clear(ReportChannel::Movement);
        let report = sink.report();
        assert_eq!((report.x, report.y), (0, 0));
        assert_eq!((report.pan, report.wheel), (1, 1));

        sink.clear(ReportChannel::Scroll);
        sink.release_button(0);
        let report = sink.report();
        assert_eq!((report.pan, report.wheel), (0, 0));
        assert_eq!(report.buttons, 0b100);
    }

    #[test]
    fn test_hid_sink_ignores_out_of_range_buttons() {
        let channel: Channel<RawMutex, MouseReport, 4> = Channel::new();
        let mut sink = HidMouseSink::new(channel.sender());

        sink.press_button(7);
        sink.press_button(8);
        sink.press_button(u8::MAX);
        assert_eq!(sink.report().buttons, 0b1000_0000);

        sink.release_button(8);
        assert_eq!(sink.report().buttons, 0b1000_0000);
        sink.release_button(7);
        assert_eq!(sink.report().buttons, 0);
    }
}
