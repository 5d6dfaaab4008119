//! The gateway the console talks to, shared through context.
//!
//! Normal builds use the hosted service configured at compile time through
//! `STORECAST_GATEWAY_URL` and `STORECAST_ANON_KEY`. With the
//! `example-data` feature the console runs against a seeded in-memory
//! gateway instead (sign in as `demo@storecast.test` / `demo-pass`).

use dioxus::prelude::*;

use storecast_common::targeting::TargetingConfig;
use storecast_gateway::config;

#[cfg(not(feature = "example-data"))]
pub type AppGateway = storecast_gateway::RestGateway;

#[cfg(feature = "example-data")]
pub type AppGateway = storecast_gateway::MemoryGateway;

#[cfg(not(feature = "example-data"))]
pub fn connect() -> Result<AppGateway, String> {
    let config = config::GatewayConfig::from_build_env().map_err(|e| e.to_string())?;
    tracing::info!(url = %config.base_url, "using hosted gateway");
    Ok(storecast_gateway::RestGateway::new(config))
}

#[cfg(feature = "example-data")]
pub fn connect() -> Result<AppGateway, String> {
    tracing::info!("using in-memory gateway with example data");
    example_data::seeded().map_err(|e| e.to_string())
}

pub fn use_gateway() -> AppGateway {
    use_context::<AppGateway>()
}

/// Manual-entry duplicate handling baked in at build time.
pub fn targeting_config() -> TargetingConfig {
    config::targeting_from_build_env().unwrap_or_else(|e| {
        tracing::warn!("Ignoring targeting config: {e}");
        TargetingConfig::default()
    })
}

// ─── Example data ────────────────────────────────────────────────────────────

#[cfg(feature = "example-data")]
mod example_data {
    use chrono::{Duration, Utc};

    use storecast_common::identity::{UserProfile, PROFILES_TABLE};
    use storecast_common::message::{Message, MessageId, MESSAGES_TABLE};
    use storecast_common::store::{Store, StoreCode, StoreStatus, STORES_TABLE};
    use storecast_gateway::{GatewayError, MemoryGateway};

    const STORES: &[(&str, &str, Option<&str>, StoreStatus)] = &[
        ("ST001", "Central Plaza", Some("City"), StoreStatus::Active),
        ("ST002", "Lakeside", Some("West"), StoreStatus::Active),
        ("ST003", "Harbour Road", Some("North"), StoreStatus::Active),
        ("ST004", "Old Mill", None, StoreStatus::Inactive),
        ("ST005", "Airport Terminal", Some("East"), StoreStatus::Active),
        ("ST006", "Riverside Mall", Some("South"), StoreStatus::Active),
    ];

    pub fn seeded() -> Result<MemoryGateway, GatewayError> {
        let gateway = MemoryGateway::new();
        let now = Utc::now();

        let stores: Vec<Store> = STORES
            .iter()
            .map(|&(code, name, area, status)| Store {
                id: format!("store-{}", code.to_lowercase()),
                code: StoreCode::from(code),
                name: name.to_string(),
                area: area.map(str::to_string),
                status,
                postcode: None,
                created_at: now,
            })
            .collect();
        gateway.seed(STORES_TABLE, &stores)?;

        let operator = gateway.add_account("demo@storecast.test", "demo-pass");
        gateway.seed(
            PROFILES_TABLE,
            &[UserProfile {
                id: operator.clone(),
                full_name: "Demo Operator".into(),
                email: "demo@storecast.test".into(),
                created_at: now,
            }],
        )?;

        let messages: Vec<Message> = (1..=12)
            .map(|n| Message {
                id: MessageId(format!("5e1d0c2a-0000-4000-8000-{n:012}")),
                title: format!("Weekly update #{n}"),
                body: format!("Store notes for week {n}: check the rota and the delivery board."),
                list_of_stores: vec![StoreCode::from("ST001"), StoreCode::from("ST002")],
                user_id: operator.clone(),
                date_created: now - Duration::days(i64::from(n)),
            })
            .collect();
        gateway.seed(MESSAGES_TABLE, &messages)?;

        Ok(gateway)
    }
}
