use serde::de::DeserializeOwned;
use serde::Serialize;

use storecast_common::identity::{Credentials, Registration, Session, UserId};

use crate::error::GatewayError;
use crate::query::TableQuery;

/// Result of a sign-up. Backends that require email confirmation return no
/// session until the address is confirmed.
#[derive(Debug, Clone, PartialEq)]
pub struct SignUp {
    pub user_id: UserId,
    pub session: Option<Session>,
}

/// Generic query/command surface of the hosted data service.
///
/// Every table call carries the operator's [`Session`] so the backend can
/// apply its row-level policies. Futures are not required to be `Send`: the
/// console runs on a single-threaded browser executor.
#[allow(async_fn_in_trait)]
pub trait Gateway {
    async fn select<T: DeserializeOwned>(
        &self,
        session: &Session,
        query: &TableQuery,
    ) -> Result<Vec<T>, GatewayError>;

    /// Exact number of rows matching the query's filters.
    async fn count(&self, session: &Session, query: &TableQuery) -> Result<u64, GatewayError>;

    async fn insert<T: Serialize>(
        &self,
        session: &Session,
        table: &str,
        record: &T,
    ) -> Result<(), GatewayError>;

    /// Insert, or replace the row that already has the record's `id`.
    async fn upsert<T: Serialize>(
        &self,
        session: &Session,
        table: &str,
        record: &T,
    ) -> Result<(), GatewayError>;

    async fn delete(&self, session: &Session, table: &str, id: &str) -> Result<(), GatewayError>;

    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, GatewayError>;

    async fn sign_up(&self, registration: &Registration) -> Result<SignUp, GatewayError>;

    async fn sign_out(&self, session: &Session) -> Result<(), GatewayError>;

    /// Identity behind the session's access token.
    async fn current_user(&self, session: &Session) -> Result<UserId, GatewayError>;
}
