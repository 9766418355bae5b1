use crate::api::ApiClient;
use crate::config::EnvConfig;
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub(crate) struct AppState {
    pub api_client: RwSignal<ApiClient>,
}

impl AppState {
    pub fn new(config: &EnvConfig) -> Self {
        Self {
            api_client: RwSignal::new(ApiClient::from_config(config)),
        }
    }
}

#[derive(Clone, Copy)]
pub(crate) struct AppContext(pub AppState);
