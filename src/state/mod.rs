mod selection;
mod toast;

pub(crate) use selection::{can_add_memo, owning_category, Selection};
pub(crate) use toast::Toaster;

use crate::api::ApiClient;
use crate::config::EnvConfig;
use crate::query::QueryClient;
use crate::session::Session;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub config: EnvConfig,
    pub session: Session,
    pub selection: Selection,
    pub toaster: Toaster,

    /// Request cache shared by every view. Read errors land in `toaster`.
    pub query_client: QueryClient,
}

impl AppState {
    pub fn new(config: EnvConfig) -> Self {
        let toaster = Toaster::new();
        let query_client = QueryClient::new(Arc::new(move |message: &str| toaster.show(message)));

        Self {
            config,
            session: Session::new(),
            selection: Selection::new(),
            toaster,
            query_client,
        }
    }

    /// A client carrying the current session token.
    pub fn api_client(&self) -> ApiClient {
        ApiClient::new(
            self.config.api_url.clone(),
            self.session.access_token_untracked(),
        )
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(EnvConfig::new())
    }
}

#[derive(Clone)]
pub(crate) struct AppContext(pub AppState);
