//! Async listener specs
//!
//! Verify deferred and queued handling of listeners declared async.

use crate::prelude::*;

#[test]
fn deferred_async_listener_logs_empty_result() {
    let scene = Scene::new();
    let fake = FakeListener::returning(json!("never"));
    scene.on("event_1", logged(fake.handler()).with_async(true));

    scene
        .trigger("event_1", json!(["testEventName1", 123, false]))
        .has(r#""isAsync":true,"result":"""#);

    assert_eq!(fake.call_count(), 0);
}

#[test]
fn queued_async_listener_logs_ticket_and_runs_later() {
    let (scene, mut worker) = Scene::queued();
    let fake = FakeListener::returning(json!("done"));
    scene.on("e", logged(fake.handler()).with_async(true));

    scene
        .trigger("e", json!({"id": 1}))
        .has(r#""isAsync":true,"result":"e#0/1""#);
    assert_eq!(fake.call_count(), 0);

    let reports = worker.run_pending();

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].ticket, "e#0/1");
    assert_eq!(reports[0].outcome, Ok(json!("done")));
    assert_eq!(fake.call_count(), 1);
}

#[test]
fn async_failure_is_not_in_the_trigger_batch() {
    let (scene, mut worker) = Scene::queued();
    scene.on(
        "e",
        ListenerBundle::new(FakeListener::failing(7, "later failure").handler()).with_async(true),
    );

    scene.trigger("e", json!({})).is_empty();

    let reports = worker.run_pending();
    assert!(reports[0].outcome.is_err());
    scene.log().is_empty();
}

#[tokio::test]
async fn worker_drains_queue_in_background() {
    let (scene, worker) = Scene::queued();
    let fake = FakeListener::returning(json!("ok"));
    scene.on("e", ListenerBundle::new(fake.handler()).with_async(true));
    let handle = tokio::spawn(worker.run());

    scene.trigger("e", json!(1));
    scene.trigger("e", json!(2));
    drop(scene);

    assert_eq!(handle.await.unwrap(), 2);
    assert_eq!(fake.call_count(), 2);
}
