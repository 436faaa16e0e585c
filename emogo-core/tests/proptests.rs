//! Projection properties over arbitrary stored documents.

use emogo_core::{Entry, ExportView, INTERNAL_ID_FIELD};
use proptest::prelude::*;
use proptest::test_runner::Config;
use serde_json::{json, Value};

fn arb_entry() -> impl Strategy<Value = Entry> {
    (
        proptest::option::of(any::<i64>()),
        -90.0f64..90.0,
        -180.0f64..180.0,
        1i64..=5,
        proptest::option::of("[a-z0-9_/\\.]{1,24}"),
        "[0-9T:\\-Z]{1,24}",
    )
        .prop_map(|(id, latitude, longitude, mood, photo_uri, timestamp)| Entry {
            id,
            latitude,
            longitude,
            mood,
            photo_uri,
            timestamp,
        })
}

proptest! {
    #![proptest_config(Config::with_cases(128))]
    #[test]
    fn projections_keep_exactly_the_view_columns(
        entry in arb_entry(),
        internal_id in "[0-9a-f]{24}",
        extra in proptest::option::of("[a-z]{1,8}"),
    ) {
        let mut stored = entry.into_document().expect("entry document");
        stored.insert(INTERNAL_ID_FIELD.to_string(), json!(internal_id));

        for view in ExportView::ALL {
            let projected = view.projection().apply(stored.clone());
            let keys: Vec<&str> = projected.keys().map(String::as_str).collect();
            prop_assert_eq!(keys, view.columns().to_vec());
            prop_assert!(!projected.contains_key(INTERNAL_ID_FIELD));
        }

        // fields outside the schema only survive the exclusion projection
        if let Some(extra) = extra {
            stored.insert(format!("x_{extra}"), Value::Bool(true));
            for view in [ExportView::Vlogs, ExportView::Sentiments, ExportView::Gps] {
                let projected = view.projection().apply(stored.clone());
                prop_assert_eq!(projected.len(), view.columns().len());
            }
        }
    }

    #[test]
    fn projected_values_are_verbatim(entry in arb_entry()) {
        let stored = entry.into_document().expect("entry document");
        for view in ExportView::ALL {
            let projected = view.projection().apply(stored.clone());
            for (key, value) in &projected {
                prop_assert_eq!(Some(value), stored.get(key));
            }
        }
    }
}
