//! Server Service - Live server dashboards
//!
//! One-shot reads plus polling streams for the status, player list,
//! backup and playtime panels. Each resource has its own refetch policy.

use std::sync::Arc;

use futures_util::stream::Stream;
use serde::{de::DeserializeOwned, Serialize};

use crate::application::api::Api;
use crate::application::dto::{Backup, PlayersOnline, PlaytimeEntry, ServerStatus};
use crate::application::query::{QueryClient, QueryKey, QueryState, RefetchPolicy};
use crate::application::ServiceError;
use crate::ports::outbound::{ApiPort, SleepProvider};

/// A polled server resource: cache key, endpoint and policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerResource {
    pub key: &'static str,
    pub path: &'static str,
    pub policy: RefetchPolicy,
}

impl ServerResource {
    pub const STATUS: Self = Self {
        key: "server/status",
        path: "/server/status",
        policy: RefetchPolicy::SERVER_STATUS,
    };

    pub const PLAYERS: Self = Self {
        key: "server/players",
        path: "/server/players",
        policy: RefetchPolicy::PLAYERS_ONLINE,
    };

    pub const BACKUPS: Self = Self {
        key: "server/backups",
        path: "/server/backups",
        policy: RefetchPolicy::BACKUPS,
    };

    pub const PLAYTIME: Self = Self {
        key: "server/playtime",
        path: "/server/playtime",
        policy: RefetchPolicy::PLAYTIME,
    };
}

#[derive(Clone)]
pub struct ServerService {
    api: Api,
    queries: QueryClient,
    sleep: Arc<dyn SleepProvider>,
}

impl ServerService {
    pub fn new(api: Api, queries: QueryClient, sleep: Arc<dyn SleepProvider>) -> Self {
        Self {
            api,
            queries,
            sleep,
        }
    }

    async fn read<T>(&self, resource: ServerResource) -> Result<T, ServiceError>
    where
        T: Serialize + DeserializeOwned + Send + 'static,
    {
        let api = self.api.clone();
        self.queries
            .fetch(
                &QueryKey::new(resource.key),
                resource.policy,
                move || async move { api.get::<T>(resource.path).await.map_err(ServiceError::from) },
            )
            .await
    }

    pub async fn status(&self) -> Result<ServerStatus, ServiceError> {
        self.read(ServerResource::STATUS).await
    }

    pub async fn players_online(&self) -> Result<PlayersOnline, ServiceError> {
        self.read(ServerResource::PLAYERS).await
    }

    pub async fn backups(&self) -> Result<Vec<Backup>, ServiceError> {
        self.read(ServerResource::BACKUPS).await
    }

    pub async fn playtime(&self) -> Result<Vec<PlaytimeEntry>, ServiceError> {
        self.read(ServerResource::PLAYTIME).await
    }

    /// Poll a resource at its refetch interval until the stream is dropped.
    pub fn watch<T>(&self, resource: ServerResource) -> impl Stream<Item = QueryState<T>>
    where
        T: Serialize + DeserializeOwned + Clone + Send + 'static,
    {
        let api = self.api.clone();
        self.queries.watch(
            QueryKey::new(resource.key),
            resource.policy,
            self.sleep.clone(),
            move || {
                let api = api.clone();
                async move { api.get::<T>(resource.path).await.map_err(ServiceError::from) }
            },
        )
    }

    pub fn watch_status(&self) -> impl Stream<Item = QueryState<ServerStatus>> {
        self.watch(ServerResource::STATUS)
    }

    pub fn watch_players(&self) -> impl Stream<Item = QueryState<PlayersOnline>> {
        self.watch(ServerResource::PLAYERS)
    }

    pub fn watch_backups(&self) -> impl Stream<Item = QueryState<Vec<Backup>>> {
        self.watch(ServerResource::BACKUPS)
    }

    pub fn watch_playtime(&self) -> impl Stream<Item = QueryState<Vec<PlaytimeEntry>>> {
        self.watch(ServerResource::PLAYTIME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::platform::mock::{InstantSleepProvider, ManualTimeProvider};
    use crate::ports::outbound::{ApiError, MockRawApiPort};
    use futures_util::StreamExt;
    use mockall::predicate::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn service(raw: MockRawApiPort, time: Arc<ManualTimeProvider>) -> ServerService {
        let sleep = Arc::new(InstantSleepProvider::advancing(time.clone()));
        ServerService::new(Api::new(Arc::new(raw)), QueryClient::new(time), sleep)
    }

    #[tokio::test]
    async fn status_reads_endpoint() {
        let mut raw = MockRawApiPort::new();
        raw.expect_get_json()
            .with(eq("/server/status"))
            .returning(|_| Ok(json!({"online": true, "players_online": 3, "max_players": 20})));

        let status = service(raw, Arc::new(ManualTimeProvider::new(0)))
            .status()
            .await
            .unwrap();
        assert_eq!(status.occupancy(), "3 / 20");
    }

    #[tokio::test]
    async fn players_refetch_every_second() {
        let seen = Arc::new(AtomicU32::new(0));
        let counter = seen.clone();
        let mut raw = MockRawApiPort::new();
        raw.expect_get_json()
            .with(eq("/server/players"))
            .returning(move |_| {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                let players: Vec<_> = (0..n)
                    .map(|i| json!({"uuid": uuid::Uuid::nil(), "name": format!("p{i}")}))
                    .collect();
                Ok(json!({ "players": players }))
            });
        let time = Arc::new(ManualTimeProvider::new(0));
        let service = service(raw, time.clone());

        let counts: Vec<usize> = service
            .watch_players()
            .take(3)
            .map(|state| state.data.map(|d| d.players.len()).unwrap_or_default())
            .collect()
            .await;

        assert_eq!(counts, [0, 1, 2]);
        assert_eq!(time.now(), 2_000);
    }

    #[tokio::test]
    async fn failed_poll_keeps_last_data() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let mut raw = MockRawApiPort::new();
        raw.expect_get_json().returning(move |_| {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Ok(json!({"online": true}))
            } else {
                Err(ApiError::RequestFailed("connection reset".to_string()))
            }
        });
        let service = service(raw, Arc::new(ManualTimeProvider::new(0)));

        let states: Vec<QueryState<ServerStatus>> =
            service.watch_status().take(2).collect().await;

        assert!(states[1].error.is_some());
        assert_eq!(states[1].data.as_ref().map(|s| s.online), Some(true));
    }
}
