use storecast_common::access::{gate, GateDecision, Screen};
use storecast_common::identity::{Credentials, Registration, SessionContext, PROFILES_TABLE};
use storecast_gateway::error::{REGISTER_FAILED_NOTICE, SIGN_IN_FAILED_NOTICE};
use storecast_gateway::{ops, GatewayError, MemoryGateway};
use storecast_gateway_integration::harness::{TestHarness, OPERATOR_EMAIL};
use storecast_gateway_integration::init_tracing;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn signing_out_locks_protected_screens() {
    let mut h = TestHarness::setup().await;
    assert_eq!(
        gate(Screen::Messages, h.context.current()),
        GateDecision::Render(Screen::Messages)
    );
    assert_eq!(
        gate(Screen::Login, h.context.current()),
        GateDecision::Redirect(Screen::Messages)
    );

    let session = h.context.current().cloned().unwrap();
    ops::sign_out(&h.gateway, &mut h.context).await;
    assert!(!h.context.is_authenticated());
    assert_eq!(
        gate(Screen::CreateMessage, h.context.current()),
        GateDecision::Redirect(Screen::Login)
    );

    // The old token no longer works either.
    let err = ops::load_message_page(&h.gateway, &session, Default::default())
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Rejected { status: 401, .. }));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn wrong_password_keeps_operator_out() {
    let h = TestHarness::setup().await;
    let err = ops::sign_in(
        &h.gateway,
        &Credentials {
            email: OPERATOR_EMAIL.into(),
            password: "wrong".into(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, GatewayError::InvalidCredentials));
    assert_eq!(SIGN_IN_FAILED_NOTICE, "Invalid email or password");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn register_creates_profile_and_signs_in() {
    init_tracing();
    let gw = MemoryGateway::new();
    let registration = Registration {
        full_name: "  Dana Reyes ".into(),
        email: "dana@example.com".into(),
        password: "pw".into(),
    };

    let session = ops::register(&gw, &registration).await.unwrap().unwrap();
    assert_eq!(session.display_name(), "Dana Reyes");
    assert_eq!(gw.rows(PROFILES_TABLE).len(), 1);

    let mut context = SessionContext::new();
    context.sign_in(session);
    assert_eq!(
        gate(Screen::Register, context.current()),
        GateDecision::Redirect(Screen::Messages)
    );

    // Same address again is refused.
    assert!(ops::register(&gw, &registration).await.is_err());
    assert_eq!(REGISTER_FAILED_NOTICE, "Failed to create account");
}

/// A backend that files the profile itself at sign-up must not turn a
/// successful registration into a failure.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn register_succeeds_when_backend_already_wrote_profile() {
    init_tracing();
    let gw = MemoryGateway::new();
    gw.create_profiles_on_sign_up(true);
    let registration = Registration {
        full_name: "Lee Park".into(),
        email: "lee@example.com".into(),
        password: "pw".into(),
    };

    let session = ops::register(&gw, &registration).await.unwrap().unwrap();
    assert_eq!(session.display_name(), "Lee Park");
    let profiles = gw.rows(PROFILES_TABLE);
    assert_eq!(profiles.len(), 1);
    assert_eq!(profiles[0]["id"], session.user_id.0.as_str());
    assert_eq!(profiles[0]["full_name"], "Lee Park");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn confirmation_required_returns_no_session() {
    init_tracing();
    let gw = MemoryGateway::new();
    gw.require_confirmation(true);
    let outcome = ops::register(
        &gw,
        &Registration {
            full_name: "Sam".into(),
            email: "sam@example.com".into(),
            password: "pw".into(),
        },
    )
    .await
    .unwrap();
    assert!(outcome.is_none());
    assert!(gw.rows(PROFILES_TABLE).is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn restored_session_picks_up_profile_name() {
    let h = TestHarness::setup().await;
    let session = h.session().clone();
    assert_eq!(session.display_name(), "User");

    h.gateway
        .seed(
            PROFILES_TABLE,
            &[storecast_common::identity::UserProfile {
                id: session.user_id.clone(),
                full_name: "Operator One".into(),
                email: OPERATOR_EMAIL.into(),
                created_at: chrono::Utc::now(),
            }],
        )
        .unwrap();
    let restored = ops::restore_session(&h.gateway, session).await.unwrap();
    assert_eq!(restored.display_name(), "Operator One");
}
