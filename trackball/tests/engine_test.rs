pub mod common;

use embassy_futures::select::select;
use embassy_time::{Duration, Timer};
use rmk_trackball::channel::{
    DEFAULT_LAYER_CHANNEL, KEY_ACTIVITY_CHANNEL, LAYER_CHANGE_CHANNEL, MOUSE_REPORT_CHANNEL,
};
use rmk_trackball::{
    ConfigError, DefaultLayerRequest, HidMouseSink, LayerChangeEvent, Mode, ModeHandle, TrackballConfig,
    run_trackball,
};
use rusty_fork::rusty_fork_test;

use crate::common::{Entry, FakeRail, FakeSource, Log, RecordingSink, button, motion, test_block_on};

rusty_fork_test! {
    #[test]
    fn test_invalid_config_is_rejected() {
        let log = Log::default();
        let mut config = TrackballConfig::default();
        config.x.scroll_divisor = 0;
        let mode = ModeHandle::new(Mode::Move);

        let res = test_block_on(run_trackball(
            &config,
            &mode,
            FakeSource::new(&log, &[]),
            RecordingSink::new(&log),
            None::<FakeRail>,
            LAYER_CHANGE_CHANNEL.subscriber().unwrap(),
            KEY_ACTIVITY_CHANNEL.subscriber().unwrap(),
            DEFAULT_LAYER_CHANNEL.sender(),
        ));

        assert_eq!(res, Err(ConfigError::ZeroScrollDivisor));
        assert!(log.entries().is_empty());
    }

    #[test]
    fn test_initial_mode_from_config() {
        let log = Log::default();
        let config = TrackballConfig {
            mode: Mode::Scroll,
            ..Default::default()
        };
        let mode = ModeHandle::new(Mode::Move);

        let engine = run_trackball(
            &config,
            &mode,
            FakeSource::new(&log, &[motion(6, 6)]),
            RecordingSink::new(&log),
            None::<FakeRail>,
            LAYER_CHANGE_CHANNEL.subscriber().unwrap(),
            KEY_ACTIVITY_CHANNEL.subscriber().unwrap(),
            DEFAULT_LAYER_CHANNEL.sender(),
        );
        test_block_on(select(engine, Timer::after(Duration::from_millis(50))));

        assert_eq!(mode.mode(), Mode::Scroll);
        assert_eq!(log.entries()[..4], [Entry::Fetch, Entry::Scroll(3, -3), Entry::Flush, Entry::Movement(0, 0)]);
    }

    #[test]
    fn test_hid_reports_through_default_channels() {
        let log = Log::default();
        let mut config = TrackballConfig {
            power_layer: 2,
            idle_timeout_secs: 1,
            ..Default::default()
        };
        config.x.move_inertia = 0;
        config.y.move_inertia = 0;
        let mode = ModeHandle::new(Mode::Move);
        let layers = LAYER_CHANGE_CHANNEL.immediate_publisher();

        let engine = run_trackball(
            &config,
            &mode,
            FakeSource::new(&log, &[motion(5, 0), button(0x80), button(0x01)]),
            HidMouseSink::new(MOUSE_REPORT_CHANNEL.sender()),
            Some(FakeRail::new(&log, false)),
            LAYER_CHANGE_CHANNEL.subscriber().unwrap(),
            KEY_ACTIVITY_CHANNEL.subscriber().unwrap(),
            DEFAULT_LAYER_CHANNEL.sender(),
        );
        let script = async {
            layers.publish_immediate(LayerChangeEvent::activated(2));

            // 5 * 20 = 100 from rest is accelerated to 10
            let report = MOUSE_REPORT_CHANNEL.receive().await;
            assert_eq!((report.x, report.y, report.buttons), (10, 0, 0));
            let report = MOUSE_REPORT_CHANNEL.receive().await;
            assert_eq!((report.x, report.y, report.buttons), (0, 0, 0b1));
            let report = MOUSE_REPORT_CHANNEL.receive().await;
            assert_eq!((report.x, report.y, report.buttons), (0, 0, 0));

            assert_eq!(DEFAULT_LAYER_CHANNEL.receive().await, DefaultLayerRequest);
            assert!(MOUSE_REPORT_CHANNEL.try_receive().is_err());
        };

        test_block_on(select(engine, script));
        assert_eq!(log.count(Entry::RailOn), 1);
    }
}
