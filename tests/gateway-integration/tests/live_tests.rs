#![cfg(feature = "live-tests")]

//! Round trips against a real data service.
//!
//! Needs STORECAST_GATEWAY_URL, STORECAST_ANON_KEY, STORECAST_TEST_EMAIL and
//! STORECAST_TEST_PASSWORD. The operator account must be allowed to insert
//! and delete its own messages.

use anyhow::Context;

use storecast_common::compose::{ComposeAction, ComposeState};
use storecast_common::identity::Credentials;
use storecast_common::message::MessageId;
use storecast_common::pager::Pager;
use storecast_gateway::config::{targeting_from_env, GatewayConfig};
use storecast_gateway::{ops, RestGateway};
use storecast_gateway_integration::init_tracing;

fn credentials() -> anyhow::Result<Credentials> {
    Ok(Credentials {
        email: std::env::var("STORECAST_TEST_EMAIL").context("STORECAST_TEST_EMAIL")?,
        password: std::env::var("STORECAST_TEST_PASSWORD").context("STORECAST_TEST_PASSWORD")?,
    })
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn create_list_delete_round_trip() -> anyhow::Result<()> {
    init_tracing();
    let gw = RestGateway::new(GatewayConfig::from_env()?);
    let session = ops::sign_in(&gw, &credentials()?).await?;

    let directory = ops::fetch_active_stores(&gw, &session).await?;
    anyhow::ensure!(!directory.is_empty(), "no active stores to target");

    let title = format!("live test {}", chrono::Utc::now().timestamp_millis());
    let draft = ComposeState::new(targeting_from_env()?)
        .apply(ComposeAction::DirectoryLoaded(directory))
        .apply(ComposeAction::SetTitle(title.clone()))
        .apply(ComposeAction::SetBody("created by the live test suite".into()))
        .apply(ComposeAction::SendToAll);
    ops::submit_message(&gw, Some(&session), &draft).await?;

    let page = ops::load_message_page(&gw, &session, Pager::default()).await?;
    let created = page
        .messages
        .iter()
        .find(|m| m.title == title)
        .context("new message is not on the first page")?;
    let id: MessageId = created.id.clone();

    ops::delete_message(&gw, &session, &id).await?;
    let after = ops::load_message_page(&gw, &session, Pager::default()).await?;
    anyhow::ensure!(after.messages.iter().all(|m| m.id != id), "message survived delete");
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn count_matches_pages() -> anyhow::Result<()> {
    init_tracing();
    let gw = RestGateway::new(GatewayConfig::from_env()?);
    let session = ops::sign_in(&gw, &credentials()?).await?;

    let first = ops::load_message_page(&gw, &session, Pager::default()).await?;
    let pager = Pager::default().with_total(first.total_count);
    let expected = first.total_count.min(pager.page_size()) as usize;
    anyhow::ensure!(first.messages.len() == expected, "first page has {} rows", first.messages.len());
    Ok(())
}
