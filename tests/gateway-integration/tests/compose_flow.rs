use serde_json::json;

use storecast_common::compose::ComposeAction;
use storecast_common::error::ValidationError;
use storecast_common::message::MESSAGES_TABLE;
use storecast_common::store::{StoreCode, StoreStatus, STORES_TABLE};
use storecast_common::targeting::{DuplicatePolicy, TargetingConfig, TargetingMode};
use storecast_common::compose::ComposeState;
use storecast_gateway::memory::Write;
use storecast_gateway::{ops, SubmitError};
use storecast_gateway_integration::harness::TestHarness;
use storecast_gateway_integration::make_store;

fn inserted_stores(h: &TestHarness) -> Vec<serde_json::Value> {
    h.gateway
        .writes()
        .into_iter()
        .filter_map(|w| match w {
            Write::Insert { table, record } if table == MESSAGES_TABLE => {
                Some(record["list_of_stores"].clone())
            }
            _ => None,
        })
        .collect()
}

/// "Send to all" copies the directory as it was when pressed; a store that
/// shows up later is not targeted.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn send_to_all_is_a_snapshot() {
    let h = TestHarness::setup().await;
    let draft = h
        .draft("Holiday hours", "Closing at 3pm on Friday")
        .apply(ComposeAction::SendToAll);
    assert_eq!(draft.mode(), TargetingMode::All);

    h.gateway
        .seed(
            STORES_TABLE,
            &[make_store("ST005", "Airport", None, StoreStatus::Active)],
        )
        .unwrap();
    let refreshed = ops::fetch_active_stores(&h.gateway, h.session()).await.unwrap();
    assert_eq!(refreshed.len(), 4);

    ops::submit_message(&h.gateway, h.context.current(), &draft)
        .await
        .unwrap();
    // Directory order is by name: Central Plaza, Harbour Road, Lakeside.
    assert_eq!(inserted_stores(&h), vec![json!(["ST001", "ST003", "ST002"])]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn empty_selection_makes_no_write() {
    let h = TestHarness::setup().await;
    let draft = h.draft("Subject", "Body").apply(ComposeAction::EnterList);

    let err = ops::submit_message(&h.gateway, h.context.current(), &draft)
        .await
        .unwrap_err();
    assert!(matches!(err, SubmitError::Invalid(ValidationError::NoTargets)));
    assert_eq!(err.notice(), "Please select at least one store");
    assert!(h.gateway.writes().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn blank_subject_is_checked_before_targets() {
    let h = TestHarness::setup().await;
    let draft = h.draft("   ", "Body");

    let err = ops::submit_message(&h.gateway, h.context.current(), &draft)
        .await
        .unwrap_err();
    assert_eq!(err.notice(), "Please fill in both subject and message");
    assert!(h.gateway.writes().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn signed_out_submit_is_refused() {
    let h = TestHarness::setup().await;
    let draft = h.draft("Subject", "Body").apply(ComposeAction::SendToAll);

    let err = ops::submit_message(&h.gateway, None, &draft).await.unwrap_err();
    assert_eq!(err.notice(), "User not authenticated");
    assert!(h.gateway.writes().is_empty());
}

/// A failed insert leaves everything typed in place; a retry goes through.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn failure_preserves_the_draft() {
    let h = TestHarness::setup().await;
    let draft = h
        .draft("Stock count", "Count the freezers tonight")
        .apply(ComposeAction::EnterList)
        .apply(ComposeAction::Toggle(StoreCode::from("ST002")))
        .apply(ComposeAction::SubmitStarted);

    h.gateway.fail_next(1);
    let err = ops::submit_message(&h.gateway, h.context.current(), &draft)
        .await
        .unwrap_err();
    assert_eq!(err.notice(), "Failed to create message");

    let draft = draft.apply(ComposeAction::SubmitFailed);
    assert!(!draft.submitting);
    assert_eq!(draft.title, "Stock count");
    assert_eq!(draft.targeting().selected(), &[StoreCode::from("ST002")]);

    ops::submit_message(&h.gateway, h.context.current(), &draft)
        .await
        .unwrap();
    assert_eq!(h.gateway.rows(MESSAGES_TABLE).len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn success_resets_the_form_but_keeps_the_directory() {
    let h = TestHarness::setup().await;
    let draft = h
        .draft("Subject", "Body")
        .apply(ComposeAction::EnterManual)
        .apply(ComposeAction::SetManualInput("ST010".into()))
        .apply(ComposeAction::AddManualCodes);

    ops::submit_message(&h.gateway, h.context.current(), &draft)
        .await
        .unwrap();
    let draft = draft.apply(ComposeAction::SubmitSucceeded);

    assert!(draft.title.is_empty());
    assert!(draft.body.is_empty());
    assert_eq!(draft.mode(), TargetingMode::None);
    assert!(draft.targeting().is_empty());
    assert_eq!(draft.directory().len(), 3);
}

/// Unknown codes typed by hand are sent as typed.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn manual_codes_are_not_checked_against_directory() {
    let h = TestHarness::setup().await;
    let draft = h
        .draft("Subject", "Body")
        .apply(ComposeAction::EnterManual)
        .apply(ComposeAction::SetManualInput(" ZZ999 ,, ST001 ,ZZ999".into()))
        .apply(ComposeAction::AddManualCodes);

    ops::submit_message(&h.gateway, h.context.current(), &draft)
        .await
        .unwrap();
    assert_eq!(inserted_stores(&h), vec![json!(["ZZ999", "ST001"])]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn keep_policy_sends_duplicates() {
    let h = TestHarness::setup().await;
    let config = TargetingConfig {
        manual_duplicates: DuplicatePolicy::Keep,
    };
    let draft = ComposeState::new(config)
        .apply(ComposeAction::SetTitle("Subject".into()))
        .apply(ComposeAction::SetBody("Body".into()))
        .apply(ComposeAction::EnterManual)
        .apply(ComposeAction::SetManualInput("ST001, ST001".into()))
        .apply(ComposeAction::AddManualCodes);

    ops::submit_message(&h.gateway, h.context.current(), &draft)
        .await
        .unwrap();
    assert_eq!(inserted_stores(&h), vec![json!(["ST001", "ST001"])]);
}

/// Removing a chip after "send to all" keeps the mode and drops only that store.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn chip_removal_after_send_to_all() {
    let h = TestHarness::setup().await;
    let draft = h
        .draft("Subject", "Body")
        .apply(ComposeAction::SendToAll)
        .apply(ComposeAction::Remove(StoreCode::from("ST003")));
    assert_eq!(draft.mode(), TargetingMode::All);

    ops::submit_message(&h.gateway, h.context.current(), &draft)
        .await
        .unwrap();
    assert_eq!(inserted_stores(&h), vec![json!(["ST001", "ST002"])]);
}
