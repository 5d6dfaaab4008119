//! HTTP client for the hosted data service.
//!
//! Tables are served PostgREST-style under `/rest/v1/<table>`; identity
//! lives under `/auth/v1`. Every request carries the anon key as `apikey`,
//! and table calls add the operator's access token as a bearer token.

use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use storecast_common::identity::{Credentials, Registration, Session, UserId};

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::query::{parse_content_range_total, TableQuery};
use crate::remote::{Gateway, SignUp};

// ─── Request/Response types ──────────────────────────────────────────────────

#[derive(Serialize)]
struct SignUpRequest<'a> {
    email: &'a str,
    password: &'a str,
    data: SignUpMetadata<'a>,
}

#[derive(Serialize)]
struct SignUpMetadata<'a> {
    full_name: &'a str,
}

#[derive(Clone, Debug, Deserialize)]
struct AuthUser {
    id: String,
    email: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: AuthUser,
}

/// Sign-up answers with a full token response when confirmation is off, or
/// with the bare user object when it is on.
#[derive(Clone, Debug, Deserialize)]
struct SignUpResponse {
    access_token: Option<String>,
    user: Option<AuthUser>,
    id: Option<String>,
    email: Option<String>,
}

impl TokenResponse {
    fn into_session(self) -> Session {
        Session {
            user_id: UserId(self.user.id),
            email: self.user.email,
            access_token: self.access_token,
            profile: None,
        }
    }
}

// ─── Client ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct RestGateway {
    config: GatewayConfig,
    http: reqwest::Client,
}

impl RestGateway {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.config.base_url, table)
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.config.base_url, path)
    }

    fn public(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.header("apikey", &self.config.anon_key)
    }

    fn authorized(&self, builder: RequestBuilder, session: &Session) -> RequestBuilder {
        self.public(builder).bearer_auth(&session.access_token)
    }
}

/// Two clients are interchangeable when they talk to the same service.
impl PartialEq for RestGateway {
    fn eq(&self, other: &Self) -> bool {
        self.config == other.config
    }
}

/// Turn a non-2xx answer into [`GatewayError::Rejected`].
async fn check(response: Response) -> Result<Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let url = response.url().to_string();
    let body = response.text().await.unwrap_or_default();
    Err(GatewayError::Rejected {
        status: status.as_u16(),
        url,
        body,
    })
}

impl Gateway for RestGateway {
    async fn select<T: DeserializeOwned>(
        &self,
        session: &Session,
        query: &TableQuery,
    ) -> Result<Vec<T>, GatewayError> {
        let url = self.table_url(query.table());
        tracing::debug!(%url, params = ?query.to_params(), "select");
        let request = self.http.get(&url).query(&query.to_params());
        let response = check(self.authorized(request, session).send().await?).await?;
        Ok(response.json::<Vec<T>>().await?)
    }

    async fn count(&self, session: &Session, query: &TableQuery) -> Result<u64, GatewayError> {
        let url = self.table_url(query.table());
        let request = self
            .http
            .head(&url)
            .query(&query.for_count().to_params())
            .header("Prefer", "count=exact");
        let response = check(self.authorized(request, session).send().await?).await?;
        response
            .headers()
            .get("content-range")
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range_total)
            .ok_or_else(|| GatewayError::Decode(format!("no usable Content-Range from {url}")))
    }

    async fn insert<T: Serialize>(
        &self,
        session: &Session,
        table: &str,
        record: &T,
    ) -> Result<(), GatewayError> {
        let request = self
            .http
            .post(self.table_url(table))
            .header("Prefer", "return=minimal")
            .json(record);
        check(self.authorized(request, session).send().await?).await?;
        Ok(())
    }

    async fn upsert<T: Serialize>(
        &self,
        session: &Session,
        table: &str,
        record: &T,
    ) -> Result<(), GatewayError> {
        let request = self
            .http
            .post(self.table_url(table))
            .query(&[("on_conflict", "id")])
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(record);
        check(self.authorized(request, session).send().await?).await?;
        Ok(())
    }

    async fn delete(&self, session: &Session, table: &str, id: &str) -> Result<(), GatewayError> {
        let request = self
            .http
            .delete(self.table_url(table))
            .query(&[("id", format!("eq.{id}"))]);
        check(self.authorized(request, session).send().await?).await?;
        Ok(())
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, GatewayError> {
        let request = self
            .http
            .post(self.auth_url("token"))
            .query(&[("grant_type", "password")])
            .json(credentials);
        let response = self.public(request).send().await?;
        if response.status().as_u16() == 400 {
            return Err(GatewayError::InvalidCredentials);
        }
        let token: TokenResponse = check(response).await?.json().await?;
        Ok(token.into_session())
    }

    async fn sign_up(&self, registration: &Registration) -> Result<SignUp, GatewayError> {
        let body = SignUpRequest {
            email: &registration.email,
            password: &registration.password,
            data: SignUpMetadata {
                full_name: &registration.full_name,
            },
        };
        let request = self.http.post(self.auth_url("signup")).json(&body);
        let reply: SignUpResponse = check(self.public(request).send().await?).await?.json().await?;

        match reply {
            SignUpResponse {
                access_token: Some(access_token),
                user: Some(user),
                ..
            } => {
                let session = TokenResponse { access_token, user }.into_session();
                Ok(SignUp {
                    user_id: session.user_id.clone(),
                    session: Some(session),
                })
            }
            SignUpResponse {
                user: Some(AuthUser { id, .. }),
                ..
            }
            | SignUpResponse { id: Some(id), .. } => Ok(SignUp {
                user_id: UserId(id),
                session: None,
            }),
            SignUpResponse { email, .. } => Err(GatewayError::Decode(format!(
                "sign-up reply without a user id (email {email:?})"
            ))),
        }
    }

    async fn sign_out(&self, session: &Session) -> Result<(), GatewayError> {
        let request = self.http.post(self.auth_url("logout"));
        check(self.authorized(request, session).send().await?).await?;
        Ok(())
    }

    async fn current_user(&self, session: &Session) -> Result<UserId, GatewayError> {
        let request = self.http.get(self.auth_url("user"));
        let user: AuthUser = check(self.authorized(request, session).send().await?)
            .await?
            .json()
            .await?;
        Ok(UserId(user.id))
    }
}
