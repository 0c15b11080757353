// src/tests/router_tests/retrieval_tests.rs
use crate::domain::StoredListing;
use crate::errors::ServerError;
use crate::responses::error_to_response;
use crate::router::handle;
use crate::tests::utils::{body_json, body_string, get, post, test_state, RecordingForwarder};
use serde_json::json;
use std::sync::Arc;

#[test]
fn empty_store_returns_empty_array() {
    let state = test_state(Arc::new(RecordingForwarder::default()), false);

    let mut resp = handle(get("/get"), &state).expect("Handler failed");

    assert_eq!(resp.status(), 200);
    assert_eq!(body_json(&mut resp), json!([]));
}

#[test]
fn stored_listing_is_flattened() {
    let state = test_state(Arc::new(RecordingForwarder::default()), false);
    state.store.append(StoredListing::new(
        json!({
            "URL": "http://x/for-lease/7",
            "Name": "Tower",
            "Photo": "tower.jpg",
            "KeyBoldMap": {"Foo": "Bar"}
        })
        .to_string(),
    ));

    let mut resp = handle(get("/get"), &state).expect("Handler failed");

    assert_eq!(resp.status(), 200);
    let listings = body_json(&mut resp);
    assert_eq!(
        listings,
        json!([{
            "URL": "http://x/for-lease/7",
            "Name": "Tower",
            "Photo": "tower.jpg",
            "Foo": "Bar"
        }])
    );
    assert!(listings[0].get("KeyBoldMap").is_none());
}

#[test]
fn nested_values_overwrite_top_level_keys() {
    let state = test_state(Arc::new(RecordingForwarder::default()), false);
    state.store.append(StoredListing::new(
        r#"{"URL":"u","Name":"outer","Photo":"p","KeyBoldMap":{"Photo":"inner"}}"#,
    ));

    let mut resp = handle(get("/get"), &state).expect("Handler failed");

    assert_eq!(body_json(&mut resp)[0]["Photo"], "inner");
}

#[test]
fn response_is_pretty_printed_and_repeatable() {
    let state = test_state(Arc::new(RecordingForwarder::default()), false);
    state
        .store
        .append(StoredListing::new(r#"{"URL":"a","KeyBoldMap":{"Size":"10"}}"#));
    state
        .store
        .append(StoredListing::new(r#"{"URL":"b","KeyBoldMap":{}}"#));

    let first = body_string(&mut handle(get("/get"), &state).expect("Handler failed"));
    let second = body_string(&mut handle(get("/get"), &state).expect("Handler failed"));

    assert_eq!(first, second);
    assert!(first.starts_with("[\n    {\n        \"Name\": null,"));

    let parsed: serde_json::Value = serde_json::from_str(&first).unwrap();
    assert_eq!(parsed[0]["URL"], "a");
    assert_eq!(parsed[1]["URL"], "b");
}

#[test]
fn response_uses_four_space_indent() {
    let state = test_state(Arc::new(RecordingForwarder::default()), false);
    state
        .store
        .append(StoredListing::new(r#"{"URL":"a","KeyBoldMap":{"Size":"10"}}"#));

    let body = body_string(&mut handle(get("/get"), &state).expect("Handler failed"));

    assert_eq!(
        body,
        "[\n    {\n        \"Name\": null,\n        \"Photo\": null,\n        \"Size\": \"10\",\n        \"URL\": \"a\"\n    }\n]"
    );
}

#[test]
fn empty_store_body_is_bare_brackets() {
    let state = test_state(Arc::new(RecordingForwarder::default()), false);

    let body = body_string(&mut handle(get("/get"), &state).expect("Handler failed"));

    assert_eq!(body, "[]");
}

#[test]
fn one_corrupt_entry_fails_the_whole_request() {
    let state = test_state(Arc::new(RecordingForwarder::default()), false);
    state
        .store
        .append(StoredListing::new(r#"{"URL":"a","KeyBoldMap":{}}"#));
    state.store.append(StoredListing::new("{corrupt"));

    let err = match handle(get("/get"), &state) {
        Err(err) => err,
        Ok(resp) => panic!("corrupt entry should fail, got status {}", resp.status()),
    };
    assert!(matches!(err, ServerError::Internal(_)));

    let mut resp = error_to_response(err);
    assert_eq!(resp.status(), 500);
    assert_eq!(
        body_json(&mut resp),
        json!({"error": "Error unmarshaling data"})
    );
}

#[test]
fn ingested_listing_is_returned_when_storage_is_enabled() {
    let state = test_state(Arc::new(RecordingForwarder::default()), true);
    let payload = json!({
        "URL": "http://x/for-sale/3",
        "Name": "Depot",
        "Photo": "d.png",
        "KeyBoldMap": {"Asking Price": "$2M"}
    });

    handle(post("/data", &payload.to_string()), &state).expect("Handler failed");
    let mut resp = handle(get("/get"), &state).expect("Handler failed");

    assert_eq!(
        body_json(&mut resp),
        json!([{
            "URL": "http://x/for-sale/3",
            "Name": "Depot",
            "Photo": "d.png",
            "Asking Price": "$2M"
        }])
    );
}
