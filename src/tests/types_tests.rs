#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use crate::types::{Analytics, Item, ItemKind, ItemPayload, ValidationError};

    fn valid_payload() -> ItemPayload {
        ItemPayload {
            kind: "income".to_string(),
            amount: 1000.0,
            category: "Salary".to_string(),
            date: Some(Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap()),
        }
    }

    #[test]
    fn test_valid_item_passes() {
        assert_eq!(valid_payload().validate(), Ok(()));
        let expense = ItemPayload { kind: "expense".to_string(), amount: 0.0, ..valid_payload() };
        assert_eq!(expense.validate(), Ok(()));
    }

    #[test]
    fn test_negative_amount_rejected() {
        for amount in [-0.01, -1.0, -1_000_000.0] {
            let p = ItemPayload { amount, ..valid_payload() };
            let err = p.validate().unwrap_err();
            assert_eq!(err, ValidationError::NegativeAmount);
            assert_eq!(err.to_string(), "amount cannot be negative");
        }
    }

    #[test]
    fn test_unknown_type_rejected() {
        for kind in ["", "Income", "transfer", "expenses"] {
            let p = ItemPayload { kind: kind.to_string(), ..valid_payload() };
            let err = p.validate().unwrap_err();
            assert_eq!(err.to_string(), "type must be 'income' or 'expense'");
        }
    }

    #[test]
    fn test_empty_category_rejected() {
        let p = ItemPayload { category: String::new(), ..valid_payload() };
        assert_eq!(p.validate().unwrap_err().to_string(), "category is required");
    }

    #[test]
    fn test_missing_date_rejected() {
        let p = ItemPayload { date: None, ..valid_payload() };
        assert_eq!(p.validate().unwrap_err().to_string(), "date is required");

        // The zero instant counts as unset, too
        let zero: ItemPayload = serde_json::from_str(
            r#"{"type":"income","amount":1,"category":"x","date":"0001-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(zero.validate(), Err(ValidationError::MissingDate));
        assert!(zero.into_draft().is_err());

        let just_after = ItemPayload { date: Some(Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 1).unwrap()), ..valid_payload() };
        assert_eq!(just_after.validate(), Ok(()));
    }

    #[test]
    fn test_first_failing_rule_wins() {
        let everything_wrong = ItemPayload { kind: "x".into(), amount: -5.0, category: String::new(), date: None };
        assert_eq!(everything_wrong.validate(), Err(ValidationError::NegativeAmount));

        let bad_type_and_category = ItemPayload { kind: "x".into(), category: String::new(), ..valid_payload() };
        assert_eq!(bad_type_and_category.validate(), Err(ValidationError::InvalidKind));

        let no_category_no_date = ItemPayload { category: String::new(), date: None, ..valid_payload() };
        assert_eq!(no_category_no_date.validate(), Err(ValidationError::MissingCategory));
    }

    #[test]
    fn test_into_draft_parses_kind() {
        let draft = valid_payload().into_draft().unwrap();
        assert_eq!(draft.kind, ItemKind::Income);
        assert_eq!(draft.category, "Salary");
        assert!(ItemPayload { date: None, ..valid_payload() }.into_draft().is_err());
    }

    #[test]
    fn test_payload_decodes_with_missing_fields() {
        let p: ItemPayload = serde_json::from_str(r#"{"category": "Food"}"#).unwrap();
        assert_eq!(p.kind, "");
        assert_eq!(p.amount, 0.0);
        assert!(p.date.is_none());
        assert_eq!(p.validate(), Err(ValidationError::InvalidKind));
    }

    #[test]
    fn test_payload_ignores_server_fields() {
        let p: ItemPayload = serde_json::from_str(
            r#"{"id": 7, "type": "expense", "amount": 12.5, "category": "Food",
                "date": "2024-01-02T03:04:05+01:00", "created_at": "2020-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(p.kind, "expense");
        assert_eq!(p.date, Some(Utc.with_ymd_and_hms(2024, 1, 2, 2, 4, 5).unwrap()));
    }

    #[test]
    fn test_item_json_shape() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let item = Item {
            id: 3,
            kind: ItemKind::Expense,
            amount: 9.99,
            category: "Books".into(),
            date: ts,
            created_at: ts,
            updated_at: ts,
        };
        let v = serde_json::to_value(&item).unwrap();
        assert_eq!(v["id"], 3);
        assert_eq!(v["type"], "expense");
        assert_eq!(v["category"], "Books");
        assert_eq!(v["date"], "2024-01-01T00:00:00Z");
        assert!(v.get("kind").is_none());
    }

    #[test]
    fn test_analytics_json_shape() {
        let v = serde_json::to_value(Analytics::default()).unwrap();
        assert_eq!(v["sum"], 0.0);
        assert_eq!(v["avg"], 0.0);
        assert_eq!(v["count"], 0);
        assert_eq!(v["median"], 0.0);
        assert_eq!(v["percentile_90"], 0.0);
    }
}
