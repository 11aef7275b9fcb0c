//! Integration tests for tessera-core.
//!
//! These tests exercise the public API end-to-end.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tessera_core::{
    ChipTheme, Color, Constraints, CustomEvent, Event, EventTarget, Key, Point, Rect, Size,
    ThemeError,
};

// =============================================================================
// Event Dispatch Tests
// =============================================================================

#[test]
fn test_dispatch_reaches_only_matching_listeners() {
    let removes = Arc::new(AtomicUsize::new(0));
    let others = Arc::new(AtomicUsize::new(0));
    let mut target = EventTarget::new();

    let r = Arc::clone(&removes);
    target.add_listener("remove", move |_| {
        r.fetch_add(1, Ordering::SeqCst);
    });
    let o = Arc::clone(&others);
    target.add_listener("select", move |_| {
        o.fetch_add(1, Ordering::SeqCst);
    });

    let mut event = CustomEvent::new("remove").cancelable(true);
    assert!(target.dispatch(&mut event));

    assert_eq!(removes.load(Ordering::SeqCst), 1);
    assert_eq!(others.load(Ordering::SeqCst), 0);
}

#[test]
fn test_dispatch_with_no_listeners_is_not_prevented() {
    let mut target = EventTarget::new();
    let mut event = CustomEvent::new("remove").cancelable(true);
    assert!(target.dispatch(&mut event));
    assert!(!event.default_prevented());
    assert_eq!(target.dispatch_count(), 1);
}

#[test]
fn test_prevent_default_only_on_cancelable() {
    let mut target = EventTarget::new();
    target.add_listener("remove", CustomEvent::prevent_default);

    let mut cancelable = CustomEvent::new("remove").cancelable(true);
    assert!(!target.dispatch(&mut cancelable));
    assert!(cancelable.default_prevented());

    let mut plain = CustomEvent::new("remove");
    assert!(target.dispatch(&mut plain));
    assert!(!plain.default_prevented());
}

#[test]
fn test_timestamps_increase_per_dispatch() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut target = EventTarget::new();
    let s = Arc::clone(&seen);
    target.add_listener("remove", move |event| {
        s.lock().unwrap().push(event.timestamp());
    });

    for _ in 0..3 {
        target.dispatch(&mut CustomEvent::new("remove"));
    }

    assert_eq!(*seen.lock().unwrap(), vec![1, 2, 3]);
}

#[test]
fn test_removed_listener_is_not_called() {
    let hits = Arc::new(AtomicUsize::new(0));
    let mut target = EventTarget::new();
    let h = Arc::clone(&hits);
    let id = target.add_listener("remove", move |_| {
        h.fetch_add(1, Ordering::SeqCst);
    });

    assert!(target.remove_listener(id));
    assert!(!target.remove_listener(id));
    target.dispatch(&mut CustomEvent::new("remove"));

    assert_eq!(hits.load(Ordering::SeqCst), 0);
    assert!(target.is_empty());
}

// =============================================================================
// Theme Tests
// =============================================================================

#[test]
fn test_theme_from_file() {
    let dir = std::env::temp_dir().join(format!("tessera-theme-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("chip.toml");
    std::fs::write(
        &path,
        r##"
background = "#202020"
text = "#FAFAFA"
font_size = 15.0
remove_glyph = "x"
"##,
    )
    .unwrap();

    let theme = ChipTheme::from_toml_file(&path).unwrap();
    assert_eq!(theme.background, Color::from_hex("#202020").unwrap());
    assert_eq!(theme.font_size, 15.0);
    assert_eq!(theme.remove_glyph, "x");
    assert_eq!(theme.padding, ChipTheme::light().padding);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_theme_errors_are_distinguishable() {
    assert!(matches!(
        ChipTheme::from_toml_str("text = \"#GGGGGG\""),
        Err(ThemeError::Parse(_))
    ));
    assert!(matches!(
        ChipTheme::from_toml_str("padding = -1.0"),
        Err(ThemeError::InvalidValue {
            field: "padding",
            ..
        })
    ));
    assert!(matches!(
        ChipTheme::from_toml_file(std::path::Path::new("/definitely/not/here.toml")),
        Err(ThemeError::Io(_))
    ));
}

#[test]
fn test_builtin_themes_are_readable() {
    for theme in [ChipTheme::light(), ChipTheme::dark()] {
        assert!(theme.validate().is_ok());
        assert!(theme.text.contrast_ratio(&theme.background) >= 4.5);
    }
}

// =============================================================================
// Geometry / Event Tests
// =============================================================================

#[test]
fn test_constraints_and_rect_center() {
    let size = Constraints::loose(Size::new(100.0, 50.0)).constrain(Size::new(300.0, 20.0));
    assert_eq!(size, Size::new(100.0, 20.0));

    let rect = Rect::new(10.0, 10.0, size.width, size.height);
    assert_eq!(rect.center(), Point::new(60.0, 20.0));
    assert!(rect.contains_point(&rect.center()));
}

#[test]
fn test_event_helpers() {
    assert!(Event::KeyDown { key: Key::Enter }.is_keyboard());
    assert!(Event::FocusIn.position().is_none());
    assert_eq!(
        Event::MouseMove {
            position: Point::new(1.0, 2.0)
        }
        .position(),
        Some(Point::new(1.0, 2.0))
    );
}
