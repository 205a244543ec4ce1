use std::cell::RefCell;
use std::rc::Rc;

use super::*;

#[test]
fn test_buffer_keeps_order() {
    let sink = WarningSink::buffer();
    sink.warn("first");
    sink.warn("second");
    assert_eq!(sink.captured(), vec!["first", "second"]);
}

#[test]
fn test_buffer_take_clears() {
    let buffer = BufferWarnings::new();
    buffer.push("one");
    assert!(!buffer.is_empty());
    assert_eq!(buffer.take(), vec!["one"]);
    assert!(buffer.is_empty());
}

#[test]
fn test_callback_receives_text() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = {
        let seen = Rc::clone(&seen);
        WarningSink::callback(move |msg| seen.borrow_mut().push(msg.to_owned()))
    };
    sink.warn("matrix mismatch");
    assert_eq!(*seen.borrow(), vec!["matrix mismatch".to_owned()]);
    assert!(sink.captured().is_empty());
}

#[test]
fn test_silent_and_log_capture_nothing() {
    crate::init_tracing();
    let silent = WarningSink::Silent;
    silent.warn("dropped");
    assert!(silent.captured().is_empty());

    let log = WarningSink::default();
    log.warn("logged");
    assert!(log.captured().is_empty());
    assert_eq!(format!("{log:?}"), "Log");
}

#[test]
fn test_take_captured_drains_buffer() {
    let sink = WarningSink::buffer();
    sink.warn("once");
    assert_eq!(sink.take_captured(), vec!["once"]);
    assert!(sink.captured().is_empty());
    assert!(WarningSink::Silent.take_captured().is_empty());
}
