use landing_wasm::accordion::Accordion;
use landing_wasm::carousel::{Carousel, Swipe, SwipeDirection, Transition};
use landing_wasm::config::{Config, TypingConfig, WaveformConfig};
use landing_wasm::error::SetupError;
use landing_wasm::lightbox::Lightbox;
use landing_wasm::nav::active_section;
use landing_wasm::platform::is_windows;

#[test]
fn carousel_go_to_clamps_any_index() {
    let mut carousel = Carousel::new(4);
    assert_eq!(carousel.total(), 4);
    for index in -10..10 {
        let t = carousel.go_to(index);
        assert_eq!(t.current, index.clamp(0, 3) as usize, "index {index}");
        assert_eq!(carousel.current(), t.current);
    }
    assert_eq!(carousel.go_to(isize::MAX).current, 3);
    assert_eq!(carousel.go_to(isize::MIN).current, 0);
}

#[test]
fn empty_carousel_stays_at_zero() {
    let mut carousel = Carousel::new(0);
    assert_eq!(carousel.go_to(5).current, 0);
    assert_eq!(carousel.advance().current, 0);
    assert_eq!(carousel.back().current, 0);
}

#[test]
fn carousel_advance_and_back_wrap() {
    let mut carousel = Carousel::new(3);
    let steps: Vec<usize> = (0..4).map(|_| carousel.advance().current).collect();
    assert_eq!(steps, vec![1, 2, 0, 1]);
    assert_eq!(carousel.back(), Transition { previous: 1, current: 0 });
    assert_eq!(carousel.back(), Transition { previous: 0, current: 2 });
    assert!(!carousel.go_to(2).changed());
}

#[test]
fn swipe_classifies_horizontal_gestures() {
    let mut swipe = Swipe::default();
    swipe.begin(200.0, 100.0);
    assert_eq!(swipe.end(120.0, 110.0, 50.0), Some(SwipeDirection::Next));

    swipe.begin(100.0, 100.0);
    assert_eq!(swipe.end(180.0, 90.0, 50.0), Some(SwipeDirection::Previous));

    // Too short.
    swipe.begin(100.0, 100.0);
    assert_eq!(swipe.end(130.0, 100.0, 50.0), None);

    // Mostly vertical scroll.
    swipe.begin(100.0, 100.0);
    assert_eq!(swipe.end(40.0, 300.0, 50.0), None);

    // End without a start.
    assert_eq!(swipe.end(0.0, 0.0, 50.0), None);

    swipe.begin(300.0, 0.0);
    swipe.cancel();
    assert_eq!(swipe.end(0.0, 0.0, 50.0), None);
}

#[test]
fn lightbox_opens_clamped_and_wraps() {
    let mut lb = Lightbox::new(3);
    assert!(!lb.is_open());
    assert_eq!(lb.next(), None);
    assert_eq!(lb.open(9), Some(2));
    assert_eq!(lb.next(), Some(0));
    assert_eq!(lb.previous(), Some(2));
    lb.close();
    assert_eq!(lb.current(), None);

    assert_eq!(Lightbox::new(0).open(0), None);
}

#[test]
fn lightbox_keys_only_apply_while_open() {
    let mut lb = Lightbox::new(2);
    assert!(!lb.handle_key("Escape"));
    lb.open(0);
    assert!(lb.handle_key("ArrowRight"));
    assert_eq!(lb.current(), Some(1));
    assert!(lb.handle_key("ArrowLeft"));
    assert_eq!(lb.current(), Some(0));
    assert!(!lb.handle_key("a"));
    assert!(lb.handle_key("Escape"));
    assert!(!lb.is_open());
}

#[test]
fn accordion_keeps_one_item_open() {
    let mut faq = Accordion::new();
    assert_eq!(faq.toggle(1), Some(1));
    assert_eq!(faq.toggle(2), Some(2));
    assert_eq!(faq.toggle(2), None);
    assert_eq!(faq.open_item(), None);
    assert_eq!(faq.toggle(0), Some(0));
}

#[test]
fn nav_tracks_last_reached_section() {
    let sections = [("intro", 0.0), ("setup", 500.0), ("faq", 1200.0)];
    assert_eq!(active_section(&sections, 0.0), Some("intro"));
    assert_eq!(active_section(&sections, 399.0), Some("intro"));
    assert_eq!(active_section(&sections, 400.0), Some("setup"));
    assert_eq!(active_section(&sections, 5000.0), Some("faq"));

    let later = [("a", 300.0)];
    assert_eq!(active_section(&later, 0.0), None);
    assert_eq!(active_section(&[], 10.0), None);
}

#[test]
fn windows_detection_checks_every_source() {
    assert!(is_windows("Windows", "", ""));
    assert!(is_windows("", "Win32", ""));
    assert!(is_windows("", "", "Mozilla/5.0 (Windows NT 10.0; Win64; x64)"));
    assert!(!is_windows("macOS", "MacIntel", "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_0)"));
    assert!(!is_windows("", "Linux x86_64", "Mozilla/5.0 (X11; Linux x86_64)"));
}

#[test]
fn partial_config_keeps_defaults() {
    let cfg = Config::from_json(r#"{ "typing": { "char_delay_ms": 20.0 }, "debug": true }"#)
        .expect("config should parse");
    assert!(cfg.debug);
    assert_eq!(cfg.typing.char_delay_ms, 20.0);
    assert_eq!(cfg.typing.blink_ms, TypingConfig::default().blink_ms);
    assert_eq!(cfg.waveform, WaveformConfig::default());
}

#[test]
fn empty_config_object_is_default() {
    assert_eq!(Config::from_json("{}").expect("config should parse"), Config::default());
}

#[test]
fn invalid_config_is_reported() {
    let err = Config::from_json("{ not json").expect_err("should fail");
    assert!(matches!(err, SetupError::Config(_)));
    assert!(err.to_string().starts_with("invalid config"));
}

#[test]
fn config_rejects_values_that_stall_animation() {
    for json in [
        r#"{"waveform":{"sample_step":0}}"#,
        r#"{"waveform":{"sample_step":-1.5}}"#,
        r#"{"waveform":{"sparkle_life":0}}"#,
        r#"{"waveform":{"layers":1000}}"#,
        r#"{"typing":{"char_delay_ms":0}}"#,
        r#"{"typing":{"blink_ms":-5}}"#,
        r#"{"carousel":{"interval_ms":0}}"#,
    ] {
        let err = Config::from_json(json).expect_err(json);
        assert!(matches!(err, SetupError::Config(_)), "{json}: {err}");
    }
    assert!(Config::default().validate().is_ok());
    assert!(Config::from_json(r#"{"waveform":{"layers":8,"sample_step":3}}"#).is_ok());
}

#[test]
fn default_waveform_config_matches_page() {
    let cfg = WaveformConfig::default();
    assert_eq!(cfg.accent, [196, 138, 63]);
    assert_eq!(cfg.sample_step, 1.5);
    assert_eq!(cfg.time_step, 0.018);
    assert_eq!(cfg.layers, 3);
    assert_eq!(cfg.sparkle_life, 60);
}
