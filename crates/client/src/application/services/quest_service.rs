//! Quest Service - Application service for quest records
//!
//! Reads go through the shared [`QueryClient`] so list and detail views reuse
//! each other's requests. Every write invalidates the `quests` keys.

use blockhaven_domain::QuestWire;

use crate::application::api::Api;
use crate::application::query::{QueryClient, QueryKey, RefetchPolicy};
use crate::application::ServiceError;
use crate::ports::outbound::ApiPort;

const QUESTS_PREFIX: &str = "quests";

fn list_key() -> QueryKey {
    QueryKey::new(QUESTS_PREFIX)
}

fn quest_key(id: &str) -> QueryKey {
    QueryKey::new(format!("{QUESTS_PREFIX}/{id}"))
}

fn quest_path(id: &str) -> String {
    format!("/quests/{id}")
}

/// Quest service for listing, loading and saving quests
#[derive(Clone)]
pub struct QuestService {
    api: Api,
    queries: QueryClient,
}

impl QuestService {
    pub fn new(api: Api, queries: QueryClient) -> Self {
        Self { api, queries }
    }

    /// List all quests
    pub async fn list_quests(&self) -> Result<Vec<QuestWire>, ServiceError> {
        let api = self.api.clone();
        self.queries
            .fetch(&list_key(), RefetchPolicy::ON_DEMAND, move || async move {
                api.get::<Vec<QuestWire>>("/quests")
                    .await
                    .map_err(ServiceError::from)
            })
            .await
    }

    /// Load one quest, `None` if the server does not know the id
    pub async fn get_quest(&self, id: &str) -> Result<Option<QuestWire>, ServiceError> {
        let api = self.api.clone();
        let path = quest_path(id);
        self.queries
            .fetch(&quest_key(id), RefetchPolicy::ON_DEMAND, move || async move {
                api.get_optional::<QuestWire>(&path)
                    .await
                    .map_err(ServiceError::from)
            })
            .await
    }

    /// Create a quest and return it with its server-assigned id
    pub async fn create_quest(&self, quest: &QuestWire) -> Result<QuestWire, ServiceError> {
        let created: QuestWire = self.api.post("/quests", quest).await?;
        tracing::info!(quest_id = ?created.id, title = %created.title, "Quest created");
        self.queries.invalidate_prefix(QUESTS_PREFIX);
        Ok(created)
    }

    /// Replace an existing quest
    pub async fn update_quest(
        &self,
        id: &str,
        quest: &QuestWire,
    ) -> Result<QuestWire, ServiceError> {
        let updated: QuestWire = self.api.put(&quest_path(id), quest).await?;
        tracing::info!(quest_id = %id, "Quest updated");
        self.queries.invalidate_prefix(QUESTS_PREFIX);
        Ok(updated)
    }

    /// Create or update depending on whether the quest already has an id
    pub async fn save_quest(&self, quest: &QuestWire) -> Result<QuestWire, ServiceError> {
        match quest.id.as_deref() {
            Some(id) => self.update_quest(id, quest).await,
            None => self.create_quest(quest).await,
        }
    }

    /// Delete a quest
    pub async fn delete_quest(&self, id: &str) -> Result<(), ServiceError> {
        self.api.delete(&quest_path(id)).await?;
        tracing::info!(quest_id = %id, "Quest deleted");
        self.queries.invalidate_prefix(QUESTS_PREFIX);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::platform::mock::ManualTimeProvider;
    use crate::ports::outbound::{ApiError, MockRawApiPort};
    use mockall::predicate::*;
    use serde_json::json;
    use std::sync::Arc;

    fn service(raw: MockRawApiPort) -> QuestService {
        let time = Arc::new(ManualTimeProvider::new(0));
        QuestService::new(Api::new(Arc::new(raw)), QueryClient::new(time))
    }

    fn q1() -> serde_json::Value {
        json!({
            "id": "q1",
            "title": "Diamond Rush",
            "type": "daily",
            "description": "",
            "start_time": "2024-06-01T00:00:00Z",
            "end_time": "2024-06-02T00:00:00Z",
            "tags": [],
            "objectives": []
        })
    }

    #[tokio::test]
    async fn list_is_cached_between_views() {
        let mut raw = MockRawApiPort::new();
        raw.expect_get_json()
            .with(eq("/quests"))
            .times(1)
            .returning(|_| Ok(json!([q1()])));
        let service = service(raw);

        let first = service.list_quests().await.unwrap();
        let second = service.list_quests().await.unwrap();

        assert_eq!(first.len(), 1);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn unknown_quest_is_none() {
        let mut raw = MockRawApiPort::new();
        raw.expect_get_optional_json()
            .with(eq("/quests/q9"))
            .returning(|_| Ok(None));

        let quest = service(raw).get_quest("q9").await.unwrap();
        assert!(quest.is_none());
    }

    #[tokio::test]
    async fn save_without_id_posts() {
        let mut raw = MockRawApiPort::new();
        raw.expect_post_json()
            .withf(|path, body| path == "/quests" && body.get("id").is_none())
            .times(1)
            .returning(|_, _| Ok(q1()));

        let draft = QuestWire {
            title: "Diamond Rush".to_string(),
            ..QuestWire::default()
        };
        let saved = service(raw).save_quest(&draft).await.unwrap();
        assert_eq!(saved.id.as_deref(), Some("q1"));
    }

    #[tokio::test]
    async fn save_with_id_puts_and_invalidates() {
        let mut raw = MockRawApiPort::new();
        raw.expect_get_json()
            .with(eq("/quests"))
            .times(2)
            .returning(|_| Ok(json!([q1()])));
        raw.expect_put_json()
            .withf(|path, _| path == "/quests/q1")
            .times(1)
            .returning(|_, body| Ok(body.clone()));
        let service = service(raw);

        let mut quest = service.list_quests().await.unwrap().remove(0);
        quest.title = "Emerald Rush".to_string();
        let saved = service.save_quest(&quest).await.unwrap();
        service.list_quests().await.unwrap();

        assert_eq!(saved.title, "Emerald Rush");
    }

    #[tokio::test]
    async fn rejected_write_surfaces_error() {
        let mut raw = MockRawApiPort::new();
        raw.expect_delete()
            .with(eq("/quests/q1"))
            .returning(|_| Err(ApiError::Unauthorized));

        let err = service(raw).delete_quest("q1").await.unwrap_err();
        assert!(err.is_unauthorized());
    }
}
