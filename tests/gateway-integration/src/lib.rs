use std::sync::Once;

use chrono::{DateTime, Duration, Utc};

use storecast_common::identity::UserId;
use storecast_common::message::{Message, MessageId};
use storecast_common::store::{Store, StoreCode, StoreStatus};

pub mod harness;

static TRACING: Once = Once::new();

/// Install a test subscriber once per process; `RUST_LOG` controls verbosity.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// A store row with a fixed creation time.
pub fn make_store(code: &str, name: &str, area: Option<&str>, status: StoreStatus) -> Store {
    Store {
        id: format!("store-{}", code.to_lowercase()),
        code: StoreCode::from(code),
        name: name.to_string(),
        area: area.map(str::to_string),
        status,
        postcode: None,
        created_at: fixed_epoch(),
    }
}

/// `count` message rows, the first one newest, one minute apart.
pub fn make_messages(count: u32, author: &UserId) -> Vec<Message> {
    (0..count)
        .map(|n| Message {
            id: MessageId(format!("msg-{n:03}")),
            title: format!("Notice {n}"),
            body: format!("Body of notice {n}"),
            list_of_stores: vec![StoreCode::from("ST001")],
            user_id: author.clone(),
            date_created: fixed_epoch() - Duration::minutes(i64::from(n)),
        })
        .collect()
}

pub fn fixed_epoch() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-06-01T09:00:00Z")
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_default()
}
