//! Shared test utilities used across gradeband crates.

pub mod tracing {
    //! Capture layer for asserting spans and events in tests.
    use std::collections::HashMap;
    use std::fmt;
    use std::sync::{Arc, Mutex, PoisonError};

    use tracing::field::{Field, Visit};
    use tracing::span::{Attributes, Id, Record};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::Layer;
    use tracing_subscriber::layer::Context;
    use tracing_subscriber::registry::LookupSpan;

    /// Layer that keeps every closed span and every event it observes.
    ///
    /// Clones share storage, so a test can install one clone in a subscriber
    /// and query the other afterwards.
    ///
    /// # Examples
    /// ```
    /// use gradeband_test_support::tracing::CaptureLayer;
    /// use tracing_subscriber::layer::SubscriberExt;
    ///
    /// let layer = CaptureLayer::default();
    /// let subscriber = tracing_subscriber::registry().with(layer.clone());
    /// tracing::subscriber::with_default(subscriber, || {
    ///     let _span = tracing::info_span!("core.demo", rows = 3).entered();
    ///     tracing::warn!(dropped = 1, "lost a row");
    /// });
    /// assert_eq!(layer.span("core.demo").as_ref().and_then(|s| s.field("rows")), Some("3"));
    /// assert_eq!(layer.events_at(tracing::Level::WARN).len(), 1);
    /// ```
    #[derive(Clone, Default)]
    pub struct CaptureLayer {
        store: Arc<Mutex<Store>>,
    }

    #[derive(Default)]
    struct Store {
        spans: Vec<CapturedSpan>,
        events: Vec<CapturedEvent>,
    }

    impl CaptureLayer {
        fn with_store<T>(&self, read: impl FnOnce(&mut Store) -> T) -> T {
            let mut store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
            read(&mut store)
        }

        /// Returns the closed spans in completion order.
        #[must_use]
        pub fn spans(&self) -> Vec<CapturedSpan> {
            self.with_store(|store| store.spans.clone())
        }

        /// Returns the first closed span called `name`.
        #[must_use]
        pub fn span(&self, name: &str) -> Option<CapturedSpan> {
            self.with_store(|store| store.spans.iter().find(|span| span.name == name).cloned())
        }

        /// Returns the events in emission order.
        #[must_use]
        pub fn events(&self) -> Vec<CapturedEvent> {
            self.with_store(|store| store.events.clone())
        }

        /// Returns the events emitted at `level`.
        #[must_use]
        pub fn events_at(&self, level: Level) -> Vec<CapturedEvent> {
            self.with_store(|store| {
                store
                    .events
                    .iter()
                    .filter(|event| event.level == level)
                    .cloned()
                    .collect()
            })
        }
    }

    /// A closed span and the fields recorded on it.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct CapturedSpan {
        /// Span name.
        pub name: String,
        /// Fields rendered as strings; string values are unquoted.
        pub fields: HashMap<String, String>,
    }

    impl CapturedSpan {
        /// Returns the rendered value of `field`.
        #[must_use]
        pub fn field(&self, field: &str) -> Option<&str> {
            self.fields.get(field).map(String::as_str)
        }
    }

    /// An emitted event.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct CapturedEvent {
        /// Event level.
        pub level: Level,
        /// Fields rendered as strings, including `message`.
        pub fields: HashMap<String, String>,
    }

    impl CapturedEvent {
        /// Returns the rendered value of `field`.
        #[must_use]
        pub fn field(&self, field: &str) -> Option<&str> {
            self.fields.get(field).map(String::as_str)
        }

        /// Returns the event message.
        #[must_use]
        pub fn message(&self) -> Option<&str> {
            self.field("message")
        }
    }

    struct PendingSpan(CapturedSpan);

    impl<S> Layer<S> for CaptureLayer
    where
        S: Subscriber + for<'span> LookupSpan<'span>,
    {
        fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
            let Some(span) = ctx.span(id) else {
                return;
            };
            let mut fields = HashMap::new();
            attrs.record(&mut Fields(&mut fields));
            span.extensions_mut().insert(PendingSpan(CapturedSpan {
                name: attrs.metadata().name().to_owned(),
                fields,
            }));
        }

        fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
            let Some(span) = ctx.span(id) else {
                return;
            };
            if let Some(PendingSpan(pending)) = span.extensions_mut().get_mut::<PendingSpan>() {
                values.record(&mut Fields(&mut pending.fields));
            }
        }

        fn on_close(&self, id: Id, ctx: Context<'_, S>) {
            let Some(span) = ctx.span(&id) else {
                return;
            };
            if let Some(PendingSpan(closed)) = span.extensions_mut().remove::<PendingSpan>() {
                self.with_store(|store| store.spans.push(closed));
            }
        }

        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut fields = HashMap::new();
            event.record(&mut Fields(&mut fields));
            let captured = CapturedEvent {
                level: *event.metadata().level(),
                fields,
            };
            self.with_store(|store| store.events.push(captured));
        }
    }

    struct Fields<'a>(&'a mut HashMap<String, String>);

    impl Visit for Fields<'_> {
        fn record_str(&mut self, field: &Field, value: &str) {
            self.0.insert(field.name().to_owned(), value.to_owned());
        }

        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            self.0.insert(field.name().to_owned(), format!("{value:?}"));
        }
    }
}

pub mod fixtures {
    //! Student-record fixtures shared by integration tests.

    /// Header row of the student CSV format.
    pub const CSV_HEADER: &str = "Student ID,Year of Study,GPA";

    /// Four records exercising two bands under boundaries `{0.0, 1.0}`.
    pub const TWO_BAND_ROWS: [(&str, u32, f64); 4] = [
        ("S1", 1, 0.0),
        ("S2", 2, 0.5),
        ("S3", 1, 1.0),
        ("S4", 3, 1.5),
    ];

    /// A spread of records covering every default band.
    pub const COHORT_ROWS: [(&str, u32, f64); 8] = [
        ("A01", 1, 3.4),
        ("A02", 2, 2.1),
        ("A03", 4, 0.8),
        ("A04", 3, 3.0),
        ("A05", 2, 1.0),
        ("A06", 1, 3.9),
        ("A07", 4, 2.0),
        ("A08", 3, 1.6),
    ];

    /// Renders `rows` as a CSV document with the standard header.
    ///
    /// # Examples
    /// ```
    /// use gradeband_test_support::fixtures::csv_document;
    ///
    /// let csv = csv_document(&[("S1", 2, 3.25)]);
    /// assert_eq!(csv, "Student ID,Year of Study,GPA\nS1,2,3.25\n");
    /// ```
    #[must_use]
    pub fn csv_document(rows: &[(&str, u32, f64)]) -> String {
        let mut document = format!("{CSV_HEADER}\n");
        for (id, year, gpa) in rows {
            document.push_str(&format!("{id},{year},{gpa}\n"));
        }
        document
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use tracing::Level;
    use tracing_subscriber::layer::SubscriberExt;

    use super::fixtures::{COHORT_ROWS, CSV_HEADER, TWO_BAND_ROWS, csv_document};
    use super::tracing::CaptureLayer;

    #[rstest]
    #[case::header_only(&[], 1)]
    #[case::two_bands(&TWO_BAND_ROWS, 5)]
    #[case::cohort(&COHORT_ROWS, 9)]
    fn csv_document_writes_header_then_rows(
        #[case] rows: &[(&str, u32, f64)],
        #[case] expected_lines: usize,
    ) {
        let document = csv_document(rows);
        assert_eq!(document.lines().next(), Some(CSV_HEADER));
        assert_eq!(document.lines().count(), expected_lines);
        assert!(document.ends_with('\n'));
    }

    #[rstest]
    fn late_recorded_span_fields_are_captured() {
        let layer = CaptureLayer::default();
        let subscriber = tracing_subscriber::registry().with(layer.clone());
        tracing::subscriber::with_default(subscriber, || {
            let span = tracing::info_span!("core.demo", rows = tracing::field::Empty);
            span.record("rows", 3_u64);
        });

        let span = layer.span("core.demo").expect("span closed inside the subscriber");
        assert_eq!(span.field("rows"), Some("3"));
        assert_eq!(layer.spans().len(), 1);
    }

    #[rstest]
    fn events_are_filtered_by_level() {
        let layer = CaptureLayer::default();
        let subscriber = tracing_subscriber::registry().with(layer.clone());
        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(id = "S1", "record dropped");
            tracing::info!("banding completed");
        });

        let warnings = layer.events_at(Level::WARN);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].field("id"), Some("S1"));
        assert_eq!(warnings[0].message(), Some("record dropped"));
        assert_eq!(layer.events().len(), 2);
    }
}
