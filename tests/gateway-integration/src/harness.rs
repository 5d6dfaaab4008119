//! Shared setup for the flow tests: an in-process data service seeded with
//! a small store directory and one signed-in operator.

use storecast_common::compose::{ComposeAction, ComposeState};
use storecast_common::identity::{Credentials, Session, SessionContext};
use storecast_common::message::MESSAGES_TABLE;
use storecast_common::store::{StoreDirectory, StoreStatus, STORES_TABLE};
use storecast_common::targeting::TargetingConfig;
use storecast_gateway::{ops, MemoryGateway};

use crate::{init_tracing, make_messages, make_store};

pub const OPERATOR_EMAIL: &str = "operator@example.com";
pub const OPERATOR_PASSWORD: &str = "correct horse";

pub struct TestHarness {
    pub gateway: MemoryGateway,
    pub context: SessionContext,
    pub directory: StoreDirectory,
}

impl TestHarness {
    /// Four stores (three active) and a signed-in operator.
    pub async fn setup() -> Self {
        init_tracing();
        let gateway = MemoryGateway::new();
        gateway
            .seed(
                STORES_TABLE,
                &[
                    make_store("ST003", "Harbour Road", Some("North"), StoreStatus::Active),
                    make_store("ST001", "Central Plaza", Some("City"), StoreStatus::Active),
                    make_store("ST004", "Old Mill", None, StoreStatus::Inactive),
                    make_store("ST002", "Lakeside", Some("West"), StoreStatus::Active),
                ],
            )
            .expect("seed stores");
        gateway.add_account(OPERATOR_EMAIL, OPERATOR_PASSWORD);

        let session = ops::sign_in(
            &gateway,
            &Credentials {
                email: OPERATOR_EMAIL.into(),
                password: OPERATOR_PASSWORD.into(),
            },
        )
        .await
        .expect("operator sign-in");
        let directory = ops::fetch_active_stores(&gateway, &session)
            .await
            .expect("load directory");

        Self {
            gateway,
            context: SessionContext::restored(Some(session)),
            directory,
        }
    }

    pub fn session(&self) -> &Session {
        self.context.current().expect("harness operator is signed in")
    }

    /// Put `count` messages in the table, newest first.
    pub fn seed_messages(&self, count: u32) {
        let author = self.session().user_id.clone();
        self.gateway
            .seed(MESSAGES_TABLE, &make_messages(count, &author))
            .expect("seed messages");
    }

    /// A compose screen with the directory loaded and both text fields filled.
    pub fn draft(&self, title: &str, body: &str) -> ComposeState {
        ComposeState::new(TargetingConfig::default())
            .apply(ComposeAction::DirectoryLoaded(self.directory.clone()))
            .apply(ComposeAction::SetTitle(title.into()))
            .apply(ComposeAction::SetBody(body.into()))
    }
}
