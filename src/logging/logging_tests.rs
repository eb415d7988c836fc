//! Tests for the events the engine emits.

use crate::layout::LayoutEngine;
use crate::model::{LayoutConfig, Padding, SavedState, Viewport};
use crate::sim::{MemoryHost, ViewId};
use std::io::Write;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

/// In-memory writer shared between the subscriber and the test.
#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for SharedBuffer {
    type Writer = SharedBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` with a thread-local subscriber at `level` and return everything it logged.
fn capture(level: &str, f: impl FnOnce()) -> String {
    let buffer = SharedBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(level))
        .with_writer(buffer.clone())
        .with_ansi(false)
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    buffer.contents()
}

fn engine(items: usize) -> (LayoutEngine<ViewId>, MemoryHost) {
    let mut engine = LayoutEngine::new(LayoutConfig::new(&[3]).unwrap());
    engine.on_viewport_changed(Viewport::new(300, 500, Padding::default()));
    engine.on_item_count_changed(items);
    (engine, MemoryHost::new())
}

#[test]
fn out_of_range_anchor_reset_is_a_warning() {
    let (mut engine, mut host) = engine(30);
    engine.restore_state(SavedState::new(500, 0));

    let logs = capture("warn", || engine.layout(&mut host).unwrap());

    assert!(logs.contains("WARN"), "got: {logs}");
    assert!(logs.contains("Anchor position out of range"), "got: {logs}");
    assert_eq!(engine.anchor_state().position, 0);
}

#[test]
fn reconfiguration_is_logged_at_info() {
    let (mut engine, _host) = engine(30);

    let logs = capture("info", || engine.set_column_counts(&[3, 2]).unwrap());

    assert!(logs.contains("Column counts changed"), "got: {logs}");
}

#[test]
fn layout_pass_is_logged_at_debug_only() {
    let (mut engine, mut host) = engine(30);

    let quiet = capture("info", || engine.layout(&mut host).unwrap());
    assert!(!quiet.contains("Layout pass"), "got: {quiet}");

    engine.on_item_count_changed(31);
    let verbose = capture("debug", || engine.layout(&mut host).unwrap());
    assert!(verbose.contains("Layout pass"), "got: {verbose}");
    assert!(verbose.contains("item_count=31"), "got: {verbose}");
}

#[test]
fn fill_and_scroll_are_traced() {
    let (mut engine, mut host) = engine(300);
    engine.layout(&mut host).unwrap();

    let logs = capture("trace", || {
        engine.scroll_by(150, &mut host);
    });

    assert!(logs.contains("Fill pass"), "got: {logs}");
    assert!(logs.contains("consumed=150"), "got: {logs}");
}
