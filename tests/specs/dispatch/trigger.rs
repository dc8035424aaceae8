//! Trigger specs
//!
//! Verify listener invocation order, failure isolation and result logging.

use crate::prelude::*;
use std::io::Write;
use std::sync::{Arc, Mutex};

#[test]
fn trigger_with_no_listeners_leaves_no_log() {
    let scene = Scene::new();

    scene.trigger("order.created", json!({"id": 7})).is_empty();

    assert!(!scene.path("event.log").exists());
}

#[test]
fn order_created_logs_success_and_failure() {
    let scene = Scene::new();
    scene
        .on(
            "order.created",
            logged(HandlerRef::direct(|_, _| Ok(json!("ok")))),
        )
        .on(
            "order.created",
            ListenerBundle::new(FakeListener::failing(42, "bad").handler()).with_log(false),
        );

    let log = scene.trigger("order.created", json!({"id": 7}));

    log.batch_count(1).has(
        r#"[{"event_name":"order.created","data":{"id":7},"listenerIndex":0,"isAsync":false,"result":"ok"},{"event_name":"order.created","data":{"id":7},"listenerIndex":1,"isAsync":false,"error":{"code":42,"message":"bad"}}]"#,
    );
    assert!(log.text.ends_with("]\n\n"));
}

#[test]
fn listeners_run_in_registration_order() {
    let scene = Scene::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    for label in ["first", "second", "third"] {
        let seen = Arc::clone(&seen);
        scene.on(
            "e",
            ListenerDeclaration::func(move |_, _| {
                seen.lock().unwrap().push(label);
                Ok(json!(label))
            }),
        );
    }

    scene.trigger("e", json!(null));

    assert_eq!(*seen.lock().unwrap(), vec!["first", "second", "third"]);
}

#[test]
fn failing_listener_does_not_stop_the_rest() {
    let scene = Scene::new();
    let later = FakeListener::returning(json!("later"));
    scene
        .on("e", FakeListener::failing(5737, "Test Exception").handler())
        .on("e", FakeListener::panicking("boom").handler())
        .on("e", logged(later.handler()));

    let log = scene.trigger("e", json!(["testEventName1", 123, false]));

    assert_eq!(later.call_count(), 1);
    let batch = log.last();
    assert_eq!(batch.len(), 3);
    assert_eq!(batch[0].error_record().unwrap().code, 5737);
    assert_eq!(batch[1].error_record().unwrap().code, 0);
    assert_eq!(batch[2].result_value(), Some(&json!("later")));
}

#[test]
fn type_reference_is_constructed_and_invoked() {
    let scene = Scene::new();
    scene.on("e", logged(HandlerRef::of_type::<EchoListener>()));

    let data = json!(["text", 123321]);
    let log = scene.trigger("e", data.clone());

    assert_eq!(
        log.last()[0].result_value(),
        Some(&json!(EchoListener::render(&data)))
    );
}

#[test]
fn construction_failure_entry_omits_is_async() {
    let scene = Scene::new();
    scene.on("e", ListenerDeclaration::of_type::<FailingConstruction>());

    scene
        .trigger("e", json!({}))
        .batch_count(1)
        .has(r#""listenerIndex":0,"error":{"code":5731"#)
        .lacks("isAsync");
}

#[test]
fn panicking_constructor_does_not_escape_trigger() {
    let scene = Scene::new();
    let later = FakeListener::returning(json!("later"));
    scene
        .on("e", ListenerDeclaration::of_type::<PanickingConstruction>())
        .on("e", logged(later.handler()));

    scene
        .trigger("e", json!({}))
        .batch_count(1)
        .has(r#""listenerIndex":0,"error":{"code":5731"#)
        .has("constructor blew up")
        .has(r#""listenerIndex":1,"isAsync":false,"result":"later""#);

    assert_eq!(later.call_count(), 1);
}

#[test]
fn listener_output_never_reaches_the_log() {
    let scene = Scene::new();
    scene.on(
        "e",
        logged(HandlerRef::direct(|_, out: &mut Output| {
            writeln!(out, "noisy listener").unwrap();
            Ok(json!("quiet"))
        })),
    );

    scene.trigger("e", json!({})).has(r#""result":"quiet""#).lacks("noisy");
}

#[test]
fn cleared_event_no_longer_dispatches() {
    let scene = Scene::new();
    let fake = FakeListener::returning(json!(1));
    scene.on("e", logged(fake.handler()));
    scene.dispatcher.clear_listeners_for_event("e");

    scene.trigger("e", json!({})).is_empty();

    assert_eq!(fake.call_count(), 0);
    assert!(scene.dispatcher.event_names().is_empty());
}
