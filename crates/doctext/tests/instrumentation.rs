//! Log events emitted while classifying and dispatching.

use doctext::{ClassificationHint, ExtractionConfig, FormatTag, classify, extract_bytes};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};
use tracing::Subscriber;
use tracing::field::{Field, Visit};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};

type Fields = HashMap<String, String>;

/// Records the fields of every event it sees.
struct EventCollector {
    events: Arc<Mutex<Vec<Fields>>>,
}

struct FieldVisitor<'a>(&'a mut Fields);

impl Visit for FieldVisitor<'_> {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{:?}", value));
    }
}

impl<S: Subscriber> Layer<S> for EventCollector {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = Fields::new();
        event.record(&mut FieldVisitor(&mut fields));
        self.events.lock().unwrap().push(fields);
    }
}

fn collect() -> (Arc<Mutex<Vec<Fields>>>, tracing::subscriber::DefaultGuard) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry().with(EventCollector {
        events: Arc::clone(&events),
    });
    (events, tracing::subscriber::set_default(subscriber))
}

fn find<'a>(events: &'a [Fields], message: &str) -> Option<&'a Fields> {
    events
        .iter()
        .find(|fields| fields.get("message").map(String::as_str) == Some(message))
}

#[test]
fn test_filename_decision_is_logged() {
    let (events, _guard) = collect();

    let format = classify(
        &ClassificationHint::new(b"%PDF-1.7 body")
            .with_media_type(Some("application/pdf"))
            .with_filename(Some("notes.csv")),
    );
    assert_eq!(format, FormatTag::Csv);

    let events = events.lock().unwrap();
    let decision = find(&events, "Classified upload").expect("classification event");
    assert_eq!(decision["rule"], "filename");
    assert_eq!(decision["format"], "csv");
    assert_eq!(decision["filename"], "notes.csv");
}

#[test]
fn test_sniff_decision_names_the_signature() {
    let (events, _guard) = collect();

    assert_eq!(classify(&ClassificationHint::new(b"%PDF-1.4 stream")), FormatTag::Pdf);

    let events = events.lock().unwrap();
    let decision = find(&events, "Classified upload").expect("classification event");
    assert_eq!(decision["rule"], "sniff");
    assert_eq!(decision["format"], "pdf");
    assert!(decision.contains_key("sniff_rule"));
}

#[test]
fn test_unclassifiable_upload_is_logged() {
    let (events, _guard) = collect();

    assert_eq!(classify(&ClassificationHint::new(b"plain words")), FormatTag::Unknown);

    let events = events.lock().unwrap();
    let decision = find(&events, "Could not classify upload").expect("fallthrough event");
    assert_eq!(decision["rule"], "none");
    assert_eq!(decision["len"], "11");
}

#[tokio::test]
async fn test_dispatch_logs_selected_extractor() {
    let (events, _guard) = collect();

    let result = extract_bytes(b"a,b\n1,2", None, None, &ExtractionConfig::default())
        .await
        .unwrap();
    assert_eq!(result.content, "a,b\n1,2");

    let events = events.lock().unwrap();
    let dispatch = find(&events, "Dispatching extraction").expect("dispatch event");
    assert_eq!(dispatch["format"], "csv");
    assert_eq!(dispatch["extractor"], "csv-extractor");
    assert_eq!(dispatch["size_bytes"], "7");
}
