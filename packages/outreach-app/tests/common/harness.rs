//! Test harness wiring every stage to in-memory fakes.

use outreach_app::store::ClientSession;
use outreach_app::{AppContext, HistoryNavigator, Route};
use outreach_client::AccessToken;
use std::sync::Arc;
use test_context::AsyncTestContext;

use super::{FakeApi, RecordingComposer, FAKE_TOKEN};

/// A client with a memory store, a fake backend, a recording navigator and a
/// recording mail composer.
///
/// ```ignore
/// #[test_context(TestApp)]
/// #[tokio::test]
/// async fn my_test(app: &TestApp) {
///     app.api.set_extraction(fixtures::sample_extraction());
///     // ... drive a stage through app.ctx
/// }
/// ```
pub struct TestApp {
    pub ctx: AppContext,
    pub session: ClientSession,
    pub api: Arc<FakeApi>,
    pub navigator: Arc<HistoryNavigator>,
    pub composer: Arc<RecordingComposer>,
}

impl AsyncTestContext for TestApp {
    async fn setup() -> Self {
        Self::signed_in()
    }

    async fn teardown(self) {}
}

impl TestApp {
    /// Fresh client with nothing stored.
    pub fn signed_out() -> Self {
        // Run tests with: RUST_LOG=outreach_app=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let session = ClientSession::in_memory();
        let api = Arc::new(FakeApi::new());
        let navigator = Arc::new(HistoryNavigator::new());
        let composer = Arc::new(RecordingComposer::default());
        let ctx = AppContext::new(
            session.clone(),
            api.clone(),
            navigator.clone(),
            composer.clone(),
        );

        Self {
            ctx,
            session,
            api,
            navigator,
            composer,
        }
    }

    /// Fresh client holding a credential token.
    pub fn signed_in() -> Self {
        let app = Self::signed_out();
        app.session
            .set_access_token(&AccessToken::new(FAKE_TOKEN))
            .expect("memory store write");
        app
    }

    pub fn current_route(&self) -> Option<Route> {
        self.navigator.current()
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.access_token().is_some()
    }
}
