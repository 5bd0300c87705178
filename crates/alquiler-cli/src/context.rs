//! Wiring from configuration to the identity, transport, and booking
//! workflow used by the commands.

use std::sync::Arc;

use alquiler_auth::{TokenSession, TokenStore};
use alquiler_booking::{
    BookingSession, ReservationGateway, ReservationListState, ReservationSubmitter,
};
use alquiler_client::{ApiClient, AuthApi, HttpReservationGateway};
use alquiler_core::config::AppConfig;
use alquiler_core::error::AppError;
use alquiler_core::traits::IdentityProvider;

/// Everything a command needs to talk to the backend.
#[derive(Debug)]
pub struct ClientContext {
    /// Loaded configuration.
    pub config: AppConfig,
    /// Current bearer token and its claims.
    pub identity: Arc<TokenSession>,
    /// Where the token is kept between runs.
    pub store: TokenStore,
    /// HTTP client bound to the identity.
    pub api: ApiClient,
}

impl ClientContext {
    /// Build the context. A token in the configuration wins over the
    /// saved one.
    pub async fn new(config: &AppConfig) -> Result<Self, AppError> {
        let identity = Arc::new(TokenSession::new(&config.auth));
        let store = TokenStore::new(&config.auth.token_file);

        if !identity.is_authenticated() {
            if let Some(token) = store.load().await? {
                tracing::debug!(path = %store.path().display(), "Using saved bearer token");
                identity.set_token(&token);
            }
        }

        let api = ApiClient::new(&config.api, identity.clone())?;

        Ok(Self {
            config: config.clone(),
            identity,
            store,
            api,
        })
    }

    /// Login endpoint.
    pub fn auth_api(&self) -> AuthApi {
        AuthApi::new(self.api.clone())
    }

    /// Reservation endpoints.
    pub fn gateway(&self) -> Arc<dyn ReservationGateway> {
        Arc::new(HttpReservationGateway::new(self.api.clone()))
    }

    /// A booking session over the HTTP gateway.
    pub fn booking_session(&self) -> BookingSession {
        let gateway = self.gateway();
        let booking = &self.config.booking;
        let list = Arc::new(ReservationListState::new(gateway.clone(), booking));
        let submitter = Arc::new(ReservationSubmitter::new(
            gateway,
            self.identity.clone(),
            booking,
        ));
        BookingSession::new(list, submitter, booking)
    }

    /// Fail early when no token is available.
    pub fn require_login(&self) -> Result<(), AppError> {
        if self.identity.bearer_token().is_none() {
            return Err(AppError::authentication(
                "Not logged in. Run `alquiler login` or set ALQUILER__AUTH__TOKEN",
            ));
        }
        Ok(())
    }
}
