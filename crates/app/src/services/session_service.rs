//! Session service: sign in, sign out, and who is signed in.
//!
//! The service owns the in-memory [`Session`] and mirrors it into a
//! [`KeyValueStore`] under the `authToken` and `user` keys so it survives a
//! restart. It is built once at startup with [`SessionService::restore`] and
//! handed to whatever renders the console.

use std::sync::Arc;

use fleetdash_domain::credentials::LoginCredentials;
use fleetdash_domain::error::{AuthError, FleetDashError};
use fleetdash_domain::payload::LoginGrant;
use fleetdash_domain::route::{Method, Route};
use fleetdash_domain::session::{AUTH_TOKEN_KEY, Credential, Session, USER_KEY, UserProfile};

use crate::dispatcher::MockDispatcher;
use crate::ports::{Backend, KeyValueStore, NetworkConditions};

/// Application service for the single console session.
pub struct SessionService<S, B, N> {
    store: S,
    dispatcher: Arc<MockDispatcher<B, N>>,
    session: Session,
}

impl<S, B, N> SessionService<S, B, N>
where
    S: KeyValueStore,
    B: Backend,
    N: NetworkConditions,
{
    /// Rebuild the session from whatever the store holds.
    ///
    /// A blank or missing `authToken` yields an anonymous session; an
    /// unreadable `user` entry is ignored.
    ///
    /// # Errors
    ///
    /// Returns a storage error when the store cannot be read.
    pub async fn restore(
        store: S,
        dispatcher: Arc<MockDispatcher<B, N>>,
    ) -> Result<Self, FleetDashError> {
        let credential = store
            .get(AUTH_TOKEN_KEY)
            .await?
            .and_then(|token| Credential::new(token).ok());
        let profile = match credential {
            Some(_) => read_profile(&store).await?,
            None => None,
        };

        tracing::debug!(
            authenticated = credential.is_some(),
            "session restored from store"
        );

        Ok(Self {
            store,
            dispatcher,
            session: Session::restored(credential, profile),
        })
    }

    /// Sign in through the login endpoint and persist the result.
    ///
    /// On failure nothing is cleared: a previous session stays as it was.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::LoginFailed`] wrapping the dispatcher error, or a
    /// storage error if the session could not be persisted.
    pub async fn login(
        &mut self,
        credentials: &LoginCredentials,
    ) -> Result<UserProfile, FleetDashError> {
        let body = serde_json::json!({
            "email": credentials.email,
            "password": credentials.password,
        });

        let grant = self
            .dispatcher
            .request(&Route::Login.path(), Method::Create, Some(body))
            .await
            .and_then(|payload| LoginGrant::try_from(payload).map_err(FleetDashError::from))
            .map_err(|err| {
                tracing::warn!(email = %credentials.email, error = %err, "login failed");
                AuthError::LoginFailed(Box::new(err))
            })?;

        let user_json = serde_json::to_string(&grant.user)
            .map_err(|err| FleetDashError::Storage(Box::new(err)))?;
        // The token is written last: a stored token always has its profile.
        self.store.set(USER_KEY, &user_json).await?;
        if let Err(err) = self.store.set(AUTH_TOKEN_KEY, grant.token.as_str()).await {
            self.rollback_profile().await;
            return Err(err);
        }

        tracing::info!(user = %grant.user.email, "signed in");
        self.session = Session::signed_in(grant.token, grant.user.clone());
        Ok(grant.user)
    }

    /// Forget the session in memory and in the store. Never fails.
    pub async fn logout(&mut self) {
        self.session.clear();
        for key in [AUTH_TOKEN_KEY, USER_KEY] {
            if let Err(err) = self.store.remove(key).await {
                tracing::warn!(key, error = %err, "failed to clear session key");
            }
        }
        tracing::info!("signed out");
    }

    /// Whether a user is signed in.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.session.is_authenticated()
            && self
                .session
                .credential()
                .is_some_and(|cred| !cred.as_str().is_empty())
    }

    /// The cached profile from the store, if any.
    ///
    /// Read failures and unparsable entries are logged and reported as absent.
    pub async fn current_user(&self) -> Option<UserProfile> {
        match read_profile(&self.store).await {
            Ok(profile) => profile,
            Err(err) => {
                tracing::warn!(error = %err, "failed to read cached user");
                None
            }
        }
    }

    /// Put the cached profile back in line with the session still in memory.
    async fn rollback_profile(&self) {
        let restored = match self.session.profile() {
            Some(profile) => match serde_json::to_string(profile) {
                Ok(json) => self.store.set(USER_KEY, &json).await,
                Err(err) => Err(FleetDashError::Storage(Box::new(err))),
            },
            None => self.store.remove(USER_KEY).await,
        };
        if let Err(err) = restored {
            tracing::warn!(error = %err, "failed to roll back cached user");
        }
    }

    /// The in-memory session.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The dispatcher used for every request.
    #[must_use]
    pub fn dispatcher(&self) -> &MockDispatcher<B, N> {
        &self.dispatcher
    }
}

async fn read_profile(store: &impl KeyValueStore) -> Result<Option<UserProfile>, FleetDashError> {
    let Some(raw) = store.get(USER_KEY).await? else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(profile) => Ok(Some(profile)),
        Err(err) => {
            tracing::warn!(error = %err, "ignoring unreadable cached user");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv_store::InMemoryStore;
    use crate::network::FixedNetwork;
    use fleetdash_domain::id::UserId;
    use fleetdash_domain::payload::Payload;
    use std::future::Future;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Issues a new token per login, like the real catalog.
    #[derive(Default)]
    struct TokenBackend {
        issued: AtomicU32,
    }

    impl Backend for TokenBackend {
        fn respond(
            &self,
            route: Route,
            method: Method,
            _body: Option<&serde_json::Value>,
        ) -> Result<Payload, FleetDashError> {
            assert_eq!(route, Route::Login);
            if method != Method::Create {
                return Err(AuthError::MethodNotAllowed { method }.into());
            }
            let n = self.issued.fetch_add(1, Ordering::SeqCst);
            Ok(Payload::Login(LoginGrant {
                token: Credential::new(format!("token-{n}")).unwrap(),
                user: admin(),
            }))
        }
    }

    /// Store whose writes and removals always fail.
    #[derive(Default)]
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(
            &self,
            _key: &str,
        ) -> impl Future<Output = Result<Option<String>, FleetDashError>> + Send {
            async { Ok(None) }
        }

        fn set(
            &self,
            _key: &str,
            _value: &str,
        ) -> impl Future<Output = Result<(), FleetDashError>> + Send {
            async { Err(FleetDashError::Storage("read-only".into())) }
        }

        fn remove(&self, _key: &str) -> impl Future<Output = Result<(), FleetDashError>> + Send {
            async { Err(FleetDashError::Storage("read-only".into())) }
        }
    }

    /// Store that rejects writes to one key and forwards everything else.
    struct KeyFaultStore {
        inner: Arc<InMemoryStore>,
        rejected: &'static str,
    }

    impl KeyValueStore for KeyFaultStore {
        fn get(
            &self,
            key: &str,
        ) -> impl Future<Output = Result<Option<String>, FleetDashError>> + Send {
            self.inner.get(key)
        }

        fn set(
            &self,
            key: &str,
            value: &str,
        ) -> impl Future<Output = Result<(), FleetDashError>> + Send {
            async move {
                if key == self.rejected {
                    return Err(FleetDashError::Storage("rejected".into()));
                }
                self.inner.set(key, value).await
            }
        }

        fn remove(&self, key: &str) -> impl Future<Output = Result<(), FleetDashError>> + Send {
            self.inner.remove(key)
        }
    }

    fn admin() -> UserProfile {
        UserProfile {
            id: UserId::new(1),
            email: "admin@cloudsystems.com".to_string(),
            name: "Cloud Administrator".to_string(),
            role: "admin".to_string(),
        }
    }

    fn credentials() -> LoginCredentials {
        LoginCredentials::new("admin@cloudsystems.com", "password123")
    }

    type Service<S> = SessionService<S, TokenBackend, FixedNetwork>;

    async fn make_service_with<S: KeyValueStore>(store: S, network: FixedNetwork) -> Service<S> {
        let dispatcher = Arc::new(MockDispatcher::new(TokenBackend::default(), network));
        SessionService::restore(store, dispatcher).await.unwrap()
    }

    async fn make_service() -> Service<Arc<InMemoryStore>> {
        make_service_with(Arc::new(InMemoryStore::new()), FixedNetwork::reliable()).await
    }

    #[tokio::test]
    async fn should_start_signed_out_with_empty_store() {
        let svc = make_service().await;
        assert!(!svc.is_logged_in());
        assert!(svc.current_user().await.is_none());
    }

    #[tokio::test]
    async fn should_sign_in_and_persist_session() {
        let store = Arc::new(InMemoryStore::new());
        let mut svc = make_service_with(Arc::clone(&store), FixedNetwork::reliable()).await;

        let profile = svc.login(&credentials()).await.unwrap();

        assert_eq!(profile, admin());
        assert!(svc.is_logged_in());
        assert_eq!(svc.current_user().await, Some(admin()));
        assert_eq!(
            store.get(AUTH_TOKEN_KEY).await.unwrap().as_deref(),
            Some("token-0")
        );
        let raw_user = store.get(USER_KEY).await.unwrap().unwrap();
        let cached: UserProfile = serde_json::from_str(&raw_user).unwrap();
        assert_eq!(cached, admin());
    }

    #[tokio::test]
    async fn should_stay_signed_out_when_dispatcher_fails() {
        let store = Arc::new(InMemoryStore::new());
        let mut svc = make_service_with(Arc::clone(&store), FixedNetwork::failing()).await;

        let err = svc.login(&credentials()).await.unwrap_err();

        assert!(matches!(err, FleetDashError::Auth(AuthError::LoginFailed(_))));
        assert_eq!(err.user_message(), "Invalid credentials or server error");
        assert!(!svc.is_logged_in());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn should_keep_previous_session_when_login_fails() {
        let store = Arc::new(InMemoryStore::new());
        store.set(AUTH_TOKEN_KEY, "old-token").await.unwrap();
        let mut svc = make_service_with(Arc::clone(&store), FixedNetwork::failing()).await;
        assert!(svc.is_logged_in());

        assert!(svc.login(&credentials()).await.is_err());

        assert!(svc.is_logged_in());
        assert_eq!(
            store.get(AUTH_TOKEN_KEY).await.unwrap().as_deref(),
            Some("old-token")
        );
    }

    #[tokio::test]
    async fn should_mint_distinct_credentials_per_login() {
        let mut svc = make_service().await;
        svc.login(&credentials()).await.unwrap();
        let first = svc.session().credential().cloned().unwrap();
        svc.login(&credentials()).await.unwrap();
        let second = svc.session().credential().cloned().unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn should_clear_everything_on_logout() {
        let store = Arc::new(InMemoryStore::new());
        let mut svc = make_service_with(Arc::clone(&store), FixedNetwork::reliable()).await;
        svc.login(&credentials()).await.unwrap();

        svc.logout().await;

        assert!(!svc.is_logged_in());
        assert!(svc.current_user().await.is_none());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn should_logout_cleanly_without_prior_login() {
        let mut svc = make_service().await;
        svc.logout().await;
        assert!(!svc.is_logged_in());
        assert!(svc.current_user().await.is_none());
    }

    #[tokio::test]
    async fn should_logout_even_when_store_rejects_removal() {
        let mut svc = make_service_with(BrokenStore, FixedNetwork::reliable()).await;
        svc.logout().await;
        assert!(!svc.is_logged_in());
    }

    #[tokio::test]
    async fn should_not_sign_in_when_session_cannot_be_persisted() {
        let mut svc = make_service_with(BrokenStore, FixedNetwork::reliable()).await;
        let err = svc.login(&credentials()).await.unwrap_err();
        assert!(matches!(err, FleetDashError::Storage(_)));
        assert!(!svc.is_logged_in());
    }

    #[tokio::test]
    async fn should_not_persist_token_when_profile_write_fails() {
        let inner = Arc::new(InMemoryStore::new());
        let store = KeyFaultStore {
            inner: Arc::clone(&inner),
            rejected: USER_KEY,
        };
        let mut svc = make_service_with(store, FixedNetwork::reliable()).await;

        let err = svc.login(&credentials()).await.unwrap_err();
        assert!(matches!(err, FleetDashError::Storage(_)));
        assert!(!svc.is_logged_in());

        assert_eq!(inner.get(AUTH_TOKEN_KEY).await.unwrap(), None);
        let restarted = make_service_with(Arc::clone(&inner), FixedNetwork::reliable()).await;
        assert!(!restarted.is_logged_in());
    }

    #[tokio::test]
    async fn should_drop_cached_profile_when_token_write_fails() {
        let inner = Arc::new(InMemoryStore::new());
        let store = KeyFaultStore {
            inner: Arc::clone(&inner),
            rejected: AUTH_TOKEN_KEY,
        };
        let mut svc = make_service_with(store, FixedNetwork::reliable()).await;

        assert!(svc.login(&credentials()).await.is_err());

        assert!(inner.is_empty());
        let restarted = make_service_with(Arc::clone(&inner), FixedNetwork::reliable()).await;
        assert!(!restarted.is_logged_in());
        assert!(restarted.current_user().await.is_none());
    }

    #[tokio::test]
    async fn should_keep_previous_profile_when_token_rewrite_fails() {
        let inner = Arc::new(InMemoryStore::new());
        {
            let mut svc = make_service_with(Arc::clone(&inner), FixedNetwork::reliable()).await;
            svc.login(&credentials()).await.unwrap();
        }
        let store = KeyFaultStore {
            inner: Arc::clone(&inner),
            rejected: AUTH_TOKEN_KEY,
        };
        let mut svc = make_service_with(store, FixedNetwork::reliable()).await;

        assert!(svc.login(&credentials()).await.is_err());

        assert!(svc.is_logged_in());
        assert_eq!(svc.current_user().await, Some(admin()));
        assert_eq!(
            inner.get(AUTH_TOKEN_KEY).await.unwrap().as_deref(),
            Some("token-0")
        );
    }

    #[tokio::test]
    async fn should_restore_session_from_store() {
        let store = Arc::new(InMemoryStore::new());
        {
            let mut svc = make_service_with(Arc::clone(&store), FixedNetwork::reliable()).await;
            svc.login(&credentials()).await.unwrap();
        }

        let svc = make_service_with(Arc::clone(&store), FixedNetwork::reliable()).await;
        assert!(svc.is_logged_in());
        assert_eq!(svc.session().profile(), Some(&admin()));
    }

    #[tokio::test]
    async fn should_ignore_blank_stored_token() {
        let store = Arc::new(InMemoryStore::new());
        store.set(AUTH_TOKEN_KEY, "").await.unwrap();
        let svc = make_service_with(store, FixedNetwork::reliable()).await;
        assert!(!svc.is_logged_in());
    }

    #[tokio::test]
    async fn should_report_absent_user_when_cached_json_is_corrupt() {
        let store = Arc::new(InMemoryStore::new());
        store.set(USER_KEY, "{not json").await.unwrap();
        let svc = make_service_with(store, FixedNetwork::reliable()).await;
        assert!(svc.current_user().await.is_none());
    }
}
