//! In-process stand-in for the hosted data service.
//!
//! Used by the test suites and by offline front-end builds. Rows are kept as
//! JSON objects per table; filters, ordering and windows behave like the
//! real service for the shapes the console issues. Failures can be injected
//! to exercise error paths, and every write is recorded.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use storecast_common::identity::{
    Credentials, Registration, Session, UserId, UserProfile, PROFILES_TABLE,
};
use storecast_common::message::{MESSAGES_TABLE, MESSAGE_CREATED_COLUMN};

use crate::error::GatewayError;
use crate::query::TableQuery;
use crate::remote::{Gateway, SignUp};

/// A write the gateway accepted.
#[derive(Debug, Clone, PartialEq)]
pub enum Write {
    Insert { table: String, record: Value },
    Upsert { table: String, record: Value },
    Delete { table: String, id: String },
}

#[derive(Debug, Clone)]
struct Account {
    id: UserId,
    email: String,
    password: String,
}

#[derive(Debug, Default)]
struct Inner {
    tables: BTreeMap<String, Vec<Value>>,
    accounts: Vec<Account>,
    tokens: BTreeMap<String, UserId>,
    writes: Vec<Write>,
    next_id: u64,
    /// Number of upcoming calls that fail with `Unavailable`.
    failures: u32,
    require_confirmation: bool,
    profiles_on_sign_up: bool,
    epoch: Option<DateTime<Utc>>,
}

impl Inner {
    fn fail_if_scheduled(&mut self) -> Result<(), GatewayError> {
        if self.failures > 0 {
            self.failures -= 1;
            return Err(GatewayError::Unavailable);
        }
        Ok(())
    }

    fn authorize(&self, session: &Session) -> Result<&UserId, GatewayError> {
        self.tokens
            .get(&session.access_token)
            .ok_or_else(|| GatewayError::Rejected {
                status: 401,
                url: "memory://".into(),
                body: "invalid token".into(),
            })
    }

    fn mint_id(&mut self) -> String {
        self.next_id += 1;
        format!("00000000-0000-4000-8000-{:012x}", self.next_id)
    }

    /// Strictly increasing creation stamps so newest-first order is stable.
    fn stamp(&mut self) -> DateTime<Utc> {
        let epoch = *self.epoch.get_or_insert_with(Utc::now);
        epoch + Duration::milliseconds(self.next_id as i64)
    }

    fn issue_session(&mut self, account: &Account) -> Session {
        let token = format!("memory-token-{}", self.mint_id());
        self.tokens.insert(token.clone(), account.id.clone());
        Session {
            user_id: account.id.clone(),
            email: Some(account.email.clone()),
            access_token: token,
            profile: None,
        }
    }

    /// Store one record, filling in the id and creation stamp when absent.
    ///
    /// A record whose id is already taken is replaced when `replace` is set
    /// and refused with a 409 otherwise.
    fn put(&mut self, table: &str, record: Value, replace: bool) -> Result<Value, GatewayError> {
        let mut fields: Map<String, Value> = match record {
            Value::Object(fields) => fields,
            other => {
                return Err(GatewayError::Decode(format!(
                    "write to {table} expects an object, got {other}"
                )))
            }
        };
        if !fields.contains_key("id") {
            let id = self.mint_id();
            fields.insert("id".into(), Value::String(id));
        }
        if table == MESSAGES_TABLE && !fields.contains_key(MESSAGE_CREATED_COLUMN) {
            let stamp = self.stamp();
            fields.insert(MESSAGE_CREATED_COLUMN.into(), serde_json::to_value(stamp)?);
        }

        let record = Value::Object(fields);
        let id = field_text(&record, "id");
        let rows = self.tables.entry(table.to_string()).or_default();
        match rows.iter_mut().find(|row| field_text(row, "id") == id) {
            Some(existing) if replace => *existing = record.clone(),
            Some(_) => {
                return Err(GatewayError::Rejected {
                    status: 409,
                    url: format!("memory://{table}"),
                    body: "duplicate key value violates unique constraint".into(),
                })
            }
            None => rows.push(record.clone()),
        }
        Ok(record)
    }

    fn matching(&self, query: &TableQuery) -> Vec<Value> {
        let rows = self.tables.get(query.table()).cloned().unwrap_or_default();
        rows.into_iter()
            .filter(|row| {
                query
                    .filters()
                    .iter()
                    .all(|(column, value)| field_text(row, column).as_deref() == Some(value.as_str()))
            })
            .collect()
    }
}

fn field_text(row: &Value, column: &str) -> Option<String> {
    match row.get(column)? {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// Timestamps compare as instants (their text form varies in precision),
/// everything else as text.
fn compare_field(a: &Value, b: &Value, column: &str) -> Ordering {
    let (a, b) = (field_text(a, column), field_text(b, column));
    let instant = |v: &Option<String>| {
        v.as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
    };
    match (instant(&a), instant(&b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        _ => a.cmp(&b),
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemoryGateway {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Put rows straight into a table, bypassing authorization and the write log.
    pub fn seed<T: Serialize>(&self, table: &str, rows: &[T]) -> Result<(), GatewayError> {
        let values = rows
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        self.lock()
            .tables
            .entry(table.to_string())
            .or_default()
            .extend(values);
        Ok(())
    }

    /// Create an account that can sign in with the password grant.
    pub fn add_account(&self, email: &str, password: &str) -> UserId {
        let mut inner = self.lock();
        let id = UserId(inner.mint_id());
        inner.accounts.push(Account {
            id: id.clone(),
            email: email.to_string(),
            password: password.to_string(),
        });
        id
    }

    /// Make the next `count` calls fail as if the service were unreachable.
    pub fn fail_next(&self, count: u32) {
        self.lock().failures = count;
    }

    /// Sign-ups return no session until confirmed, like a backend with
    /// email confirmation switched on.
    pub fn require_confirmation(&self, on: bool) {
        self.lock().require_confirmation = on;
    }

    /// Sign-ups write their own `user_profiles` row from the sign-up
    /// metadata, like a backend with a profile trigger on new users.
    pub fn create_profiles_on_sign_up(&self, on: bool) {
        self.lock().profiles_on_sign_up = on;
    }

    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.lock().tables.get(table).cloned().unwrap_or_default()
    }

    pub fn writes(&self) -> Vec<Write> {
        self.lock().writes.clone()
    }
}

/// Clones share their rows, so equality is identity of the shared store.
impl PartialEq for MemoryGateway {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Gateway for MemoryGateway {
    async fn select<T: DeserializeOwned>(
        &self,
        session: &Session,
        query: &TableQuery,
    ) -> Result<Vec<T>, GatewayError> {
        let mut inner = self.lock();
        inner.fail_if_scheduled()?;
        inner.authorize(session)?;
        let mut rows = inner.matching(query);
        drop(inner);

        if let Some(order) = query.ordering() {
            rows.sort_by(|a, b| {
                let ordering = compare_field(a, b, &order.column);
                if order.ascending {
                    ordering
                } else {
                    ordering.reverse()
                }
            });
        }
        if let Some(range) = query.row_range() {
            let from = usize::try_from(range.from).unwrap_or(usize::MAX);
            let width = usize::try_from(range.width()).unwrap_or(usize::MAX);
            rows = rows.into_iter().skip(from).take(width).collect();
        }

        rows.into_iter()
            .map(|row| serde_json::from_value(row).map_err(GatewayError::from))
            .collect()
    }

    async fn count(&self, session: &Session, query: &TableQuery) -> Result<u64, GatewayError> {
        let mut inner = self.lock();
        inner.fail_if_scheduled()?;
        inner.authorize(session)?;
        Ok(inner.matching(query).len() as u64)
    }

    async fn insert<T: Serialize>(
        &self,
        session: &Session,
        table: &str,
        record: &T,
    ) -> Result<(), GatewayError> {
        let value = serde_json::to_value(record)?;
        let mut inner = self.lock();
        inner.fail_if_scheduled()?;
        inner.authorize(session)?;
        let record = inner.put(table, value, false)?;
        inner.writes.push(Write::Insert {
            table: table.to_string(),
            record,
        });
        Ok(())
    }

    async fn upsert<T: Serialize>(
        &self,
        session: &Session,
        table: &str,
        record: &T,
    ) -> Result<(), GatewayError> {
        let value = serde_json::to_value(record)?;
        let mut inner = self.lock();
        inner.fail_if_scheduled()?;
        inner.authorize(session)?;
        let record = inner.put(table, value, true)?;
        inner.writes.push(Write::Upsert {
            table: table.to_string(),
            record,
        });
        Ok(())
    }

    async fn delete(&self, session: &Session, table: &str, id: &str) -> Result<(), GatewayError> {
        let mut inner = self.lock();
        inner.fail_if_scheduled()?;
        inner.authorize(session)?;
        if let Some(rows) = inner.tables.get_mut(table) {
            rows.retain(|row| field_text(row, "id").as_deref() != Some(id));
        }
        inner.writes.push(Write::Delete {
            table: table.to_string(),
            id: id.to_string(),
        });
        Ok(())
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, GatewayError> {
        let mut inner = self.lock();
        inner.fail_if_scheduled()?;
        let account = inner
            .accounts
            .iter()
            .find(|a| a.email == credentials.email && a.password == credentials.password)
            .cloned()
            .ok_or(GatewayError::InvalidCredentials)?;
        Ok(inner.issue_session(&account))
    }

    async fn sign_up(&self, registration: &Registration) -> Result<SignUp, GatewayError> {
        let mut inner = self.lock();
        inner.fail_if_scheduled()?;
        if inner.accounts.iter().any(|a| a.email == registration.email) {
            return Err(GatewayError::Rejected {
                status: 422,
                url: "memory://auth/signup".into(),
                body: "user already registered".into(),
            });
        }
        let account = Account {
            id: UserId(inner.mint_id()),
            email: registration.email.clone(),
            password: registration.password.clone(),
        };
        inner.accounts.push(account.clone());
        if inner.profiles_on_sign_up {
            let profile = serde_json::to_value(UserProfile {
                id: account.id.clone(),
                full_name: registration.full_name.clone(),
                email: registration.email.clone(),
                created_at: Utc::now(),
            })?;
            inner.put(PROFILES_TABLE, profile, false)?;
        }
        let session = if inner.require_confirmation {
            None
        } else {
            Some(inner.issue_session(&account))
        };
        Ok(SignUp {
            user_id: account.id,
            session,
        })
    }

    async fn sign_out(&self, session: &Session) -> Result<(), GatewayError> {
        let mut inner = self.lock();
        inner.fail_if_scheduled()?;
        inner.tokens.remove(&session.access_token);
        Ok(())
    }

    async fn current_user(&self, session: &Session) -> Result<UserId, GatewayError> {
        let mut inner = self.lock();
        inner.fail_if_scheduled()?;
        inner.authorize(session).cloned()
    }
}
