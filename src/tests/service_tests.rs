#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use chrono::{TimeZone, Utc};

    use crate::service::{ItemService, Items, ServiceError};
    use crate::store::StoreError;
    use crate::tests::InMemoryRepository;
    use crate::types::{ItemKind, ItemPayload, ValidationError};

    fn payload(kind: &str, amount: f64, category: &str) -> ItemPayload {
        ItemPayload {
            kind: kind.to_string(),
            amount,
            category: category.to_string(),
            date: Some(Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()),
        }
    }

    fn service() -> (Items, Arc<InMemoryRepository>) {
        let repo = Arc::new(InMemoryRepository::default());
        (Items::new(repo.clone()), repo)
    }

    #[tokio::test]
    async fn test_create_stamps_timestamps_and_id() {
        let (svc, _) = service();
        let before = Utc::now();
        let item = svc.create_item(payload("income", 1000.0, "Salary")).await.unwrap();
        assert_eq!(item.id, 1);
        assert_eq!(item.kind, ItemKind::Income);
        assert_eq!(item.created_at, item.updated_at);
        assert!(item.created_at >= before);
    }

    #[tokio::test]
    async fn test_invalid_create_never_reaches_store() {
        let (svc, repo) = service();
        let err = svc.create_item(payload("income", -1.0, "Salary")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ValidationError::NegativeAmount)));
        assert_eq!(err.to_string(), "amount cannot be negative");
        assert_eq!(repo.call_count(), 0);
    }

    #[tokio::test]
    async fn test_round_trip_through_store() {
        let (svc, _) = service();
        let created = svc.create_item(payload("expense", 42.5, "Food")).await.unwrap();
        let fetched = svc.get_item(created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_update_keeps_id_and_created_at() {
        let (svc, _) = service();
        let created = svc.create_item(payload("income", 1000.0, "Salary")).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;

        let updated = svc.update_item(created.id, payload("income", 1500.0, "Salary + Bonus")).await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
        assert_eq!(updated.amount, 1500.0);
        assert_eq!(updated.category, "Salary + Bonus");
    }

    #[tokio::test]
    async fn test_invalid_update_never_reaches_store() {
        let (svc, repo) = service();
        let created = svc.create_item(payload("income", 10.0, "Gift")).await.unwrap();
        let calls = repo.call_count();
        let err = svc.update_item(created.id, payload("income", 10.0, "")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ValidationError::MissingCategory)));
        assert_eq!(repo.call_count(), calls);
    }

    #[tokio::test]
    async fn test_not_found_passes_through_untranslated() {
        let (svc, _) = service();
        assert!(matches!(svc.get_item(99).await, Err(ServiceError::Store(StoreError::NotFound))));
        assert!(matches!(
            svc.update_item(99, payload("expense", 1.0, "Misc")).await,
            Err(ServiceError::Store(StoreError::NotFound))
        ));
        assert!(matches!(svc.delete_item(99).await, Err(ServiceError::Store(StoreError::NotFound))));
    }

    #[tokio::test]
    async fn test_delete_is_terminal() {
        let (svc, _) = service();
        let created = svc.create_item(payload("expense", 5.0, "Coffee")).await.unwrap();
        svc.delete_item(created.id).await.unwrap();
        assert!(matches!(svc.get_item(created.id).await, Err(ServiceError::Store(StoreError::NotFound))));
    }

    #[tokio::test]
    async fn test_analytics_delegates_to_store() {
        let (svc, _) = service();
        for amount in [10.0, 20.0, 30.0] {
            svc.create_item(payload("expense", amount, "Food")).await.unwrap();
        }
        let from = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 6, 30, 0, 0, 0).unwrap();
        let a = svc.get_analytics(from, to).await.unwrap();
        assert_eq!(a.count, 3);
        assert_eq!(a.sum, 60.0);
        assert_eq!(a.median, 20.0);
    }
}
