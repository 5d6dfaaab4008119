//! Screen-level operations over a [`Gateway`].
//!
//! Each function is one user action: it issues the calls the action needs,
//! logs failures, and hands typed results back to the screen.

use storecast_common::compose::ComposeState;
use storecast_common::error::ValidationError;
use storecast_common::identity::{
    Credentials, Registration, Session, SessionContext, UserProfile, PROFILES_TABLE,
};
use storecast_common::message::{Message, MessageId, MESSAGES_TABLE, MESSAGE_CREATED_COLUMN};
use storecast_common::pager::Pager;
use storecast_common::store::{Store, StoreDirectory, StoreStatus, STORES_TABLE};

use crate::error::{GatewayError, SubmitError};
use crate::query::TableQuery;
use crate::remote::Gateway;

/// One page of the message list plus the total it was cut from.
#[derive(Debug, Clone, PartialEq)]
pub struct MessagePage {
    pub total_count: u64,
    pub messages: Vec<Message>,
}

/// Active stores, sorted by name.
pub async fn fetch_active_stores<G: Gateway>(
    gateway: &G,
    session: &Session,
) -> Result<StoreDirectory, GatewayError> {
    let query = TableQuery::from(STORES_TABLE)
        .eq("status", StoreStatus::Active.as_str())
        .order("name", true);
    let stores: Vec<Store> = gateway.select(session, &query).await.inspect_err(|e| {
        tracing::error!("Error fetching stores: {e}");
    })?;
    Ok(StoreDirectory::new(stores))
}

/// Count all messages, then fetch the window for `pager`'s page, newest first.
///
/// The two reads are not atomic: a write landing between them can make the
/// count and the rows disagree until the next load.
pub async fn load_message_page<G: Gateway>(
    gateway: &G,
    session: &Session,
    pager: Pager,
) -> Result<MessagePage, GatewayError> {
    let all = TableQuery::from(MESSAGES_TABLE);
    let total_count = gateway.count(session, &all).await.inspect_err(|e| {
        tracing::error!("Error counting messages: {e}");
    })?;

    let window = all
        .order(MESSAGE_CREATED_COLUMN, false)
        .range(pager.range());
    let messages = gateway.select(session, &window).await.inspect_err(|e| {
        tracing::error!("Error fetching messages: {e}");
    })?;

    Ok(MessagePage {
        total_count,
        messages,
    })
}

/// Validate the draft and insert it. Nothing is sent if validation fails.
pub async fn submit_message<G: Gateway>(
    gateway: &G,
    session: Option<&Session>,
    draft: &ComposeState,
) -> Result<(), SubmitError> {
    let payload = draft.prepare(session)?;
    let session = session.ok_or(ValidationError::NotAuthenticated)?;
    gateway
        .insert(session, MESSAGES_TABLE, &payload)
        .await
        .inspect_err(|e| tracing::error!("Error creating message: {e}"))?;
    tracing::info!(stores = payload.list_of_stores.len(), "message created");
    Ok(())
}

pub async fn delete_message<G: Gateway>(
    gateway: &G,
    session: &Session,
    id: &MessageId,
) -> Result<(), GatewayError> {
    gateway
        .delete(session, MESSAGES_TABLE, &id.0)
        .await
        .inspect_err(|e| tracing::error!("Error deleting message {id}: {e}"))?;
    tracing::info!(%id, "message deleted");
    Ok(())
}

/// Profile row for the session's user, if one exists.
pub async fn fetch_profile<G: Gateway>(
    gateway: &G,
    session: &Session,
) -> Result<Option<UserProfile>, GatewayError> {
    let query = TableQuery::from(PROFILES_TABLE).eq("id", &session.user_id.0);
    let mut rows: Vec<UserProfile> = gateway.select(session, &query).await?;
    Ok(if rows.is_empty() {
        None
    } else {
        Some(rows.swap_remove(0))
    })
}

/// Password sign-in followed by the profile lookup.
///
/// A failed profile read does not fail the sign-in; the header falls back to
/// a generic name.
pub async fn sign_in<G: Gateway>(
    gateway: &G,
    credentials: &Credentials,
) -> Result<Session, GatewayError> {
    let session = gateway
        .sign_in(credentials)
        .await
        .inspect_err(|e| tracing::error!("Error signing in: {e}"))?;
    let profile = match fetch_profile(gateway, &session).await {
        Ok(profile) => profile,
        Err(e) => {
            tracing::error!("Error fetching profile: {e}");
            None
        }
    };
    tracing::info!(user = %session.user_id, "signed in");
    Ok(session.with_profile(profile))
}

/// Create an account and its profile row.
///
/// Returns `None` when the backend wants the email address confirmed before
/// it hands out a session; the profile row is then left for the first sign-in.
pub async fn register<G: Gateway>(
    gateway: &G,
    registration: &Registration,
) -> Result<Option<Session>, GatewayError> {
    let outcome = gateway
        .sign_up(registration)
        .await
        .inspect_err(|e| tracing::error!("Error registering: {e}"))?;
    let Some(session) = outcome.session else {
        tracing::info!(user = %outcome.user_id, "registered, awaiting confirmation");
        return Ok(None);
    };

    let profile = UserProfile {
        id: session.user_id.clone(),
        full_name: registration.full_name.trim().to_string(),
        email: registration.email.clone(),
        created_at: chrono::Utc::now(),
    };
    // Some backends already wrote this row from the sign-up metadata.
    gateway
        .upsert(&session, PROFILES_TABLE, &profile)
        .await
        .inspect_err(|e| tracing::error!("Error creating profile: {e}"))?;
    tracing::info!(user = %session.user_id, "registered");
    Ok(Some(session.with_profile(Some(profile))))
}

/// Clear the local session and revoke it remotely.
///
/// The local session is dropped even if the remote call fails.
pub async fn sign_out<G: Gateway>(gateway: &G, context: &mut SessionContext) {
    let Some(session) = context.sign_out() else {
        return;
    };
    match gateway.sign_out(&session).await {
        Ok(()) => tracing::info!(user = %session.user_id, "signed out"),
        Err(e) => tracing::error!("Error signing out: {e}"),
    }
}

/// Re-validate a persisted session and refresh its profile.
pub async fn restore_session<G: Gateway>(
    gateway: &G,
    session: Session,
) -> Result<Session, GatewayError> {
    let user_id = gateway.current_user(&session).await?;
    if user_id != session.user_id {
        return Err(GatewayError::Decode(format!(
            "token belongs to {user_id}, expected {}",
            session.user_id
        )));
    }
    let profile = fetch_profile(gateway, &session).await?;
    Ok(session.with_profile(profile))
}
