use crate::common::{resolve_image_url, ApiClient};
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::notify::{LogNotifier, Notifier};
use crate::session::{FileSessionStore, Session, SessionStore};
use crate::store::{AppState, RequestStatus, Resource, Store};
use std::future::Future;
use std::sync::Arc;

/// Entry point for every operation. The operation groups live in
/// `AuthApi`, `PostApi`, `CommentApi` and `ProfileApi`.
pub struct SocialClient {
    config: ClientConfig,
    api: ApiClient,
    session: Arc<dyn SessionStore>,
    notifier: Arc<dyn Notifier>,
    store: Store,
}

impl SocialClient {
    /// Client with a file-backed session and log notifications.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let session = Arc::new(FileSessionStore::new(config.session_file.clone()));
        Self::with_parts(config, session, Arc::new(LogNotifier))
    }

    pub fn with_parts(
        config: ClientConfig,
        session: Arc<dyn SessionStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        let api = ApiClient::new(&config)?;

        let stored = session.load().unwrap_or_else(|e| {
            log::warn!("session - ignoring unreadable session: {e}");
            Session::default()
        });
        let store = Store::default();
        store.with_state(|state| state.set_token(stored.token));

        Ok(SocialClient {
            config,
            api,
            session,
            notifier,
            store,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn state(&self) -> AppState {
        self.store.snapshot()
    }

    pub fn status(&self, resource: Resource) -> RequestStatus {
        self.store.status(resource)
    }

    pub fn image_url(&self, photo: Option<&str>) -> Option<String> {
        resolve_image_url(self.api.base_url(), photo)
    }

    pub(crate) fn api(&self) -> &ApiClient {
        &self.api
    }

    pub(crate) fn session_store(&self) -> &dyn SessionStore {
        self.session.as_ref()
    }

    pub(crate) fn token(&self) -> Result<String> {
        self.optional_token()
            .ok_or(ClientError::AuthenticationRequired)
    }

    pub(crate) fn optional_token(&self) -> Option<String> {
        self.store
            .with_state(|state| state.auth.token.clone())
            .filter(|token| !token.is_empty())
    }

    pub(crate) fn update_session(&self, f: impl FnOnce(&mut Session)) -> Result<()> {
        let mut session = self.session.load().unwrap_or_default();
        f(&mut session);
        self.session.save(&session)
    }

    pub(crate) fn notify_success(&self, message: &str) {
        self.notifier.success(message);
    }

    /// Runs one operation against a store resource: loading while it runs,
    /// then success or the error message, which is also notified.
    pub(crate) async fn track<T, F>(&self, resource: Resource, operation: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        self.store.with_state(|state| state.begin(resource));

        match operation.await {
            Ok(value) => {
                self.store.with_state(|state| state.succeed(resource));
                Ok(value)
            }
            Err(error) => {
                let message = error.to_string();
                log::debug!("{resource} - failed: {message}");
                self.store
                    .with_state(|state| state.fail(resource, message.clone()));
                self.notifier.error(&message);
                Err(error)
            }
        }
    }
}
