//! Service providers for the UI layer
//!
//! The composition root builds one [`Services`] bundle and hands it to Dioxus
//! as context. Components reach services through the `use_*` hooks below and
//! never touch infrastructure adapter types.

use dioxus::prelude::*;
use std::sync::Arc;

use crate::application::api::Api;
use crate::application::auth::AuthSession;
use crate::application::query::QueryClient;
use crate::application::services::{QuestService, ServerService};
use crate::state::Platform;

#[derive(Clone)]
pub struct Services {
    pub quests: Arc<QuestService>,
    pub server: Arc<ServerService>,
    pub auth: AuthSession,
    /// Tile server of the live map, linked from the dashboard
    pub map_url: String,
}

impl Services {
    pub fn new(api: Api, platform: &Platform, auth: AuthSession, map_url: String) -> Self {
        let queries = QueryClient::new(platform.time());
        Self {
            quests: Arc::new(QuestService::new(api.clone(), queries.clone())),
            server: Arc::new(ServerService::new(api, queries, platform.sleep())),
            auth,
            map_url,
        }
    }
}

pub fn use_quest_service() -> Arc<QuestService> {
    use_context::<Services>().quests
}

pub fn use_server_service() -> Arc<ServerService> {
    use_context::<Services>().server
}

pub fn use_auth_session() -> AuthSession {
    use_context::<Services>().auth
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::auth::{AuthConfig, AuthState};
    use crate::infrastructure::platform::mock::create_mock_platform;
    use crate::ports::outbound::MockRawApiPort;
    use mockall::predicate::*;
    use serde_json::json;

    #[tokio::test]
    async fn services_share_one_query_cache() {
        let mut raw = MockRawApiPort::new();
        raw.expect_get_json()
            .with(eq("/server/status"))
            .times(1)
            .returning(|_| Ok(json!({"online": true, "players_online": 1, "max_players": 10})));

        let platform = create_mock_platform();
        let auth = AuthSession::restore(AuthConfig::default(), platform.storage());
        let services = Services::new(
            Api::new(Arc::new(raw)),
            &platform,
            auth,
            "http://map.local".to_string(),
        );

        // The mock clock never moves, so the second read is served from cache.
        let first = services.server.status().await.unwrap();
        let second = services.clone().server.status().await.unwrap();
        assert_eq!(first, second);
        assert_eq!(services.map_url, "http://map.local");
        assert_eq!(services.auth.state(), AuthState::SignedOut);
    }
}
