//! In-memory event capture for logging assertions
//!
//! The capture layer is installed as the global subscriber once per test
//! binary. Tests run in parallel against the same buffer, so lookups are
//! always narrowed by op and, for comparison runs, by module name.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use apidiff_core_types::schema::{FIELD_COMPONENT, FIELD_EVENT, FIELD_MODULE, FIELD_OP};

/// One recorded event, every field rendered to a string
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub component: Option<String>,
    pub op: Option<String>,
    pub event: Option<String>,
    pub fields: HashMap<String, String>,
}

impl CapturedEvent {
    /// Field value by name, if recorded
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    fn is(&self, op: &str, event: &str) -> bool {
        self.op.as_deref() == Some(op) && self.event.as_deref() == Some(event)
    }
}

/// Strings are kept verbatim, numbers and bools via their `Display`, and
/// everything else through `Debug`.
#[derive(Default)]
struct FieldRecorder(HashMap<String, String>);

impl FieldRecorder {
    fn put(&mut self, field: &Field, value: String) {
        self.0.insert(field.name().to_string(), value);
    }
}

impl Visit for FieldRecorder {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.put(field, format!("{:?}", value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.put(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.put(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.put(field, value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.put(field, value.to_string());
    }
}

type EventLog = Arc<Mutex<Vec<CapturedEvent>>>;

struct CaptureLayer {
    log: EventLog,
}

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut recorder = FieldRecorder::default();
        event.record(&mut recorder);
        let fields = recorder.0;

        let captured = CapturedEvent {
            level: *event.metadata().level(),
            component: fields.get(FIELD_COMPONENT).cloned(),
            op: fields.get(FIELD_OP).cloned(),
            event: fields.get(FIELD_EVENT).cloned(),
            fields,
        };

        if let Ok(mut log) = self.log.lock() {
            log.push(captured);
        }
    }
}

/// Shared handle onto the captured events
#[derive(Clone)]
pub struct TestCapture {
    log: EventLog,
}

impl TestCapture {
    /// Snapshot of every captured event, in emission order
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.log.lock().map(|log| log.clone()).unwrap_or_default()
    }

    /// Events for one operation, in emission order
    pub fn events_for_op(&self, op: &str) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.op.as_deref() == Some(op))
            .collect()
    }

    /// Events for one operation run against `module`
    pub fn events_for_module(&self, op: &str, module: &str) -> Vec<CapturedEvent> {
        self.events_for_op(op)
            .into_iter()
            .filter(|e| e.field(FIELD_MODULE) == Some(module))
            .collect()
    }

    /// First `event` emitted for `op`
    ///
    /// # Panics
    ///
    /// Panics if no such event was captured.
    pub fn expect_event(&self, op: &str, event: &str) -> CapturedEvent {
        let events = self.events();
        let total = events.len();
        events
            .into_iter()
            .find(|e| e.is(op, event))
            .unwrap_or_else(|| {
                panic!(
                    "no op={} event={} among {} captured events",
                    op, event, total
                )
            })
    }
}

static CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the capture layer (first call only) and return the shared handle
///
/// # Example
///
/// ```
/// use apidiff_core::logging_facility::test_capture::init_test_capture;
/// use apidiff_core::log_op_start;
///
/// let capture = init_test_capture();
/// log_op_start!("doc_example_op");
/// let start = capture.expect_event("doc_example_op", "start");
/// assert_eq!(start.op.as_deref(), Some("doc_example_op"));
/// ```
pub fn init_test_capture() -> TestCapture {
    CAPTURE
        .get_or_init(|| {
            let log = EventLog::default();
            let layer = CaptureLayer { log: log.clone() };
            // Another subscriber may already be global; the handle then stays empty
            let _ = tracing_subscriber::registry().with(layer).try_init();
            TestCapture { log }
        })
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(op: &str, event: &str, module: Option<&str>) -> CapturedEvent {
        let mut fields = HashMap::new();
        if let Some(module) = module {
            fields.insert(FIELD_MODULE.to_string(), module.to_string());
        }
        CapturedEvent {
            level: Level::INFO,
            component: Some("apidiff_core::diff::engine".to_string()),
            op: Some(op.to_string()),
            event: Some(event.to_string()),
            fields,
        }
    }

    fn capture_with(events: Vec<CapturedEvent>) -> TestCapture {
        TestCapture {
            log: Arc::new(Mutex::new(events)),
        }
    }

    #[test]
    fn test_field_lookup() {
        let captured = event("compare_modules", "start", Some("SwiftUI"));
        assert_eq!(captured.field("module"), Some("SwiftUI"));
        assert_eq!(captured.field("missing"), None);
    }

    #[test]
    fn test_module_filter_narrows_op_filter() {
        let capture = capture_with(vec![
            event("compare_modules", "start", Some("A")),
            event("compare_modules", "start", Some("B")),
            event("other", "start", Some("A")),
        ]);

        assert_eq!(capture.events_for_op("compare_modules").len(), 2);
        assert_eq!(capture.events_for_module("compare_modules", "A").len(), 1);
        assert!(capture.events_for_module("compare_modules", "C").is_empty());
    }

    #[test]
    fn test_expect_event_finds_first_match() {
        let capture = capture_with(vec![
            event("compare_modules", "start", Some("A")),
            event("compare_modules", "end", Some("A")),
        ]);
        let end = capture.expect_event("compare_modules", "end");
        assert_eq!(end.event.as_deref(), Some("end"));
    }

    #[test]
    #[should_panic(expected = "no op=compare_modules event=end_error")]
    fn test_expect_event_panics_when_absent() {
        capture_with(Vec::new()).expect_event("compare_modules", "end_error");
    }
}
