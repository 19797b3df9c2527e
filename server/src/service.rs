use std::sync::Arc;

use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::{
    clock::Clock,
    error::ServiceError,
    item::Item,
    store::ItemStore,
    validation::{validate_create, validate_update},
};

/// The four item operations. Holds no state of its own beyond its handles.
#[derive(Clone)]
pub struct ItemService {
    store: Arc<dyn ItemStore>,
    clock: Arc<dyn Clock>,
}

impl ItemService {
    pub fn new(store: Arc<dyn ItemStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub async fn list(&self) -> Result<Vec<Item>, ServiceError> {
        Ok(self.store.find_all().await?)
    }

    pub async fn create(&self, body: &Value) -> Result<Item, ServiceError> {
        let new_item = validate_create(body)?;
        let item = self.store.insert(Item::new(new_item.name, self.clock.now())).await?;
        debug!(id = %item.id, "Created item");
        Ok(item)
    }

    pub async fn update(&self, id: &str, body: &Value) -> Result<Item, ServiceError> {
        let update = validate_update(body)?;
        let id = parse_id(id)?;
        let item = self
            .store
            .update_bought(id, update.bought, self.clock.now())
            .await?
            .ok_or(ServiceError::NotFound)?;
        debug!(%id, bought = item.bought, "Updated item");
        Ok(item)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let id = parse_id(id)?;
        self.store.delete(id).await?.ok_or(ServiceError::NotFound)?;
        debug!(%id, "Deleted item");
        Ok(())
    }
}

/// A malformed id cannot name a stored item.
fn parse_id(id: &str) -> Result<Uuid, ServiceError> {
    Uuid::parse_str(id).map_err(|_| ServiceError::NotFound)
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use serde_json::json;

    use super::*;
    use crate::{
        clock::SteppingClock,
        store::MemoryStore,
        validation::Violation,
    };

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    fn service() -> ItemService {
        ItemService::new(
            Arc::new(MemoryStore::new()),
            Arc::new(SteppingClock::new(start(), Duration::seconds(1))),
        )
    }

    fn violation(err: ServiceError) -> Violation {
        match err {
            ServiceError::Validation(violations) => violations.as_slice()[0],
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_persists_trimmed_unbought_item() {
        let service = service();
        let item = service.create(&json!({ "name": "  Milk  " })).await.unwrap();
        assert_eq!(item.name, "Milk");
        assert!(!item.bought);
        assert_eq!(item.created_at, start());
        assert_eq!(item.updated_at, start());
        assert_eq!(service.list().await.unwrap(), vec![item]);
    }

    #[tokio::test]
    async fn rejected_creates_persist_nothing() {
        let service = service();
        let long = "x".repeat(101);
        let cases = [
            (json!({ "name": "" }), Violation::NameEmpty),
            (json!({ "name": "   " }), Violation::NameEmpty),
            (json!({ "name": long }), Violation::NameTooLong),
            (json!({ "name": 7 }), Violation::NameMissing),
            (json!({}), Violation::NameMissing),
        ];
        for (body, expected) in cases {
            let err = service.create(&body).await.unwrap_err();
            assert_eq!(violation(err), expected, "{body}");
        }
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_puts_newest_first() {
        let service = service();
        let first = service.create(&json!({ "name": "first" })).await.unwrap();
        let second = service.create(&json!({ "name": "second" })).await.unwrap();
        let ids: Vec<Uuid> = service.list().await.unwrap().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn update_reads_clock_once_and_keeps_created_at() {
        let service = service();
        let item = service.create(&json!({ "name": "Eggs" })).await.unwrap();
        let updated = service
            .update(&item.id.to_string(), &json!({ "bought": true }))
            .await
            .unwrap();
        assert!(updated.bought);
        assert_eq!(updated.created_at, start());
        assert_eq!(updated.updated_at, start() + Duration::seconds(1));
        assert_eq!(updated.name, "Eggs");
    }

    #[tokio::test]
    async fn update_validates_before_lookup() {
        let service = service();
        let item = service.create(&json!({ "name": "Eggs" })).await.unwrap();

        let err = service
            .update(&item.id.to_string(), &json!({ "bought": "yes" }))
            .await
            .unwrap_err();
        assert_eq!(violation(err), Violation::BoughtNotBoolean);
        assert_eq!(service.list().await.unwrap(), vec![item]);

        let err = service.update("missing", &json!({ "bought": 0 })).await.unwrap_err();
        assert_eq!(violation(err), Violation::BoughtNotBoolean);
    }

    #[tokio::test]
    async fn unknown_and_malformed_ids_are_not_found() {
        let service = service();
        let unknown = Uuid::new_v4().to_string();
        for id in [unknown.as_str(), "not-a-uuid"] {
            let err = service.update(id, &json!({ "bought": true })).await.unwrap_err();
            assert!(matches!(err, ServiceError::NotFound), "{id}");
            let err = service.delete(id).await.unwrap_err();
            assert!(matches!(err, ServiceError::NotFound), "{id}");
        }
    }

    #[tokio::test]
    async fn second_delete_is_not_found() {
        let service = service();
        let item = service.create(&json!({ "name": "Bread" })).await.unwrap();
        let id = item.id.to_string();
        service.delete(&id).await.unwrap();
        assert!(matches!(service.delete(&id).await.unwrap_err(), ServiceError::NotFound));
        assert!(service.list().await.unwrap().is_empty());
    }
}
