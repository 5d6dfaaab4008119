use storecast_common::generation::Generation;
use storecast_common::message::MessageId;
use storecast_common::message_list::{MessageListAction, MessageListState};
use storecast_gateway::ops;
use storecast_gateway_integration::harness::TestHarness;

async fn reload(h: &TestHarness, state: MessageListState) -> MessageListState {
    let state = state.apply(MessageListAction::LoadStarted);
    let page = ops::load_message_page(&h.gateway, h.session(), state.pager())
        .await
        .unwrap();
    state.apply(MessageListAction::Loaded {
        total_count: page.total_count,
        messages: page.messages,
    })
}

fn ids(state: &MessageListState) -> Vec<&str> {
    state.messages().iter().map(|m| m.id.0.as_str()).collect()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn twenty_five_rows_make_three_pages() {
    let h = TestHarness::setup().await;
    h.seed_messages(25);

    let state = reload(&h, MessageListState::new()).await;
    assert_eq!(state.page_label(), "Page 1 of 3");
    assert_eq!(state.messages().len(), 10);
    assert_eq!(state.messages()[0].id, MessageId("msg-000".into()));
    assert!(!state.pager().has_previous());

    let state = reload(&h, state.apply(MessageListAction::NextPage)).await;
    let state = reload(&h, state.apply(MessageListAction::NextPage)).await;
    assert_eq!(state.page_label(), "Page 3 of 3");
    assert_eq!(ids(&state), vec!["msg-020", "msg-021", "msg-022", "msg-023", "msg-024"]);
    assert!(!state.pager().has_next());

    // Next on the last page goes nowhere.
    let state = state.apply(MessageListAction::NextPage);
    assert_eq!(state.pager().page(), 3);
}

/// Deleting the only row on the last page reloads the same page number,
/// which is now past the end: empty table, Next disabled, Previous enabled.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn deleting_last_row_on_last_page() {
    let h = TestHarness::setup().await;
    h.seed_messages(21);

    let state = reload(&h, MessageListState::new()).await;
    let state = reload(&h, state.apply(MessageListAction::NextPage)).await;
    let state = reload(&h, state.apply(MessageListAction::NextPage)).await;
    assert_eq!(ids(&state), vec!["msg-020"]);

    let target = MessageId("msg-020".into());
    let state = state.apply(MessageListAction::DeleteStarted(target.clone()));
    assert!(state.is_deleting(&target));
    ops::delete_message(&h.gateway, h.session(), &target)
        .await
        .unwrap();
    let state = reload(&h, state.apply(MessageListAction::Deleted(target.clone()))).await;

    assert!(!state.is_deleting(&target));
    assert_eq!(state.pager().page(), 3);
    assert_eq!(state.pager().total_count(), 20);
    assert!(state.messages().is_empty());
    assert_eq!(state.page_label(), "Page 3 of 2");
    assert!(!state.pager().has_next());
    assert!(state.pager().has_previous());

    let state = reload(&h, state.apply(MessageListAction::PreviousPage)).await;
    assert_eq!(state.messages().len(), 10);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn failed_delete_keeps_rows() {
    let h = TestHarness::setup().await;
    h.seed_messages(3);

    let state = reload(&h, MessageListState::new()).await;
    let target = MessageId("msg-001".into());
    let state = state.apply(MessageListAction::DeleteStarted(target.clone()));

    h.gateway.fail_next(1);
    assert!(ops::delete_message(&h.gateway, h.session(), &target)
        .await
        .is_err());
    let state = state.apply(MessageListAction::DeleteFailed(target.clone()));
    assert!(!state.is_deleting(&target));
    assert_eq!(state.messages().len(), 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn failed_load_keeps_previous_rows() {
    let h = TestHarness::setup().await;
    h.seed_messages(4);

    let state = reload(&h, MessageListState::new()).await;
    let state = state.apply(MessageListAction::LoadStarted);
    h.gateway.fail_next(1);
    assert!(ops::load_message_page(&h.gateway, h.session(), state.pager())
        .await
        .is_err());
    let state = state.apply(MessageListAction::LoadFailed);
    assert!(!state.is_loading());
    assert_eq!(state.messages().len(), 4);
}

/// Only the most recent of two overlapping loads may land on screen.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn superseded_load_is_discarded() {
    let h = TestHarness::setup().await;
    h.seed_messages(15);
    let generation = Generation::new();
    let state = reload(&h, MessageListState::new()).await;

    let first = generation.advance();
    let page_one = state.pager();
    let state = state.apply(MessageListAction::NextPage);
    let second = generation.advance();
    let page_two = state.pager();

    let (stale, fresh) = futures::join!(
        ops::load_message_page(&h.gateway, h.session(), page_one),
        ops::load_message_page(&h.gateway, h.session(), page_two),
    );

    let mut state = state;
    for (ticket, result) in [(first, stale), (second, fresh)] {
        if !generation.is_current(ticket) {
            continue;
        }
        let page = result.unwrap();
        state = state.apply(MessageListAction::Loaded {
            total_count: page.total_count,
            messages: page.messages,
        });
    }
    assert_eq!(state.pager().page(), 2);
    assert_eq!(ids(&state), vec!["msg-010", "msg-011", "msg-012", "msg-013", "msg-014"]);
}
