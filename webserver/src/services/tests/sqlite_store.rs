//! Tests for the SqliteLeadStore service

use super::fixtures::*;
use crate::error::WebServerError;
use crate::services::SqliteLeadStore;
use crate::traits::LeadStore;
use shared::{LeadPatch, LeadStatus, NewLead, SharedError, Transition};

mod crud_tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_assigns_id_and_timestamps() {
        let store = create_test_store();
        let lead = store
            .insert(NewLead::new("Ada").with_email("ada@example.com").with_source("website"))
            .await
            .unwrap();

        assert!(lead.id > 0);
        assert_eq!(lead.status, LeadStatus::New);
        assert_eq!(lead.score, 0);
        assert_eq!(lead.source.as_deref(), Some("website"));
        assert_eq!(lead.created_at, lead.updated_at);
    }

    #[tokio::test]
    async fn test_insert_rejects_invalid_lead() {
        let store = create_test_store();

        let result = store.insert(NewLead::new("")).await;
        assert!(matches!(result, Err(WebServerError::Validation(SharedError::NameRequired))));

        let result = store.insert(NewLead::new("Bob").with_score(101)).await;
        assert!(matches!(
            result,
            Err(WebServerError::Validation(SharedError::ScoreOutOfRange { .. }))
        ));
        assert!(store.list(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_missing_lead() {
        let store = create_test_store();
        assert!(store.get(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_is_newest_first_and_filters() {
        let store = create_test_store();
        let first = store.insert(create_test_lead("First", LeadStatus::New, 10)).await.unwrap();
        let second = store.insert(create_test_lead("Second", LeadStatus::Lost, 10)).await.unwrap();
        let third = store.insert(create_test_lead("Third", LeadStatus::New, 10)).await.unwrap();

        let all: Vec<i64> = store.list(None).await.unwrap().iter().map(|l| l.id).collect();
        assert_eq!(all, vec![third.id, second.id, first.id]);

        let new_only: Vec<i64> = store
            .list(Some(LeadStatus::New))
            .await
            .unwrap()
            .iter()
            .map(|l| l.id)
            .collect();
        assert_eq!(new_only, vec![third.id, first.id]);

        assert!(store.list(Some(LeadStatus::Qualified)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_only_touches_patched_fields() {
        let store = create_test_store();
        let lead = store
            .insert(NewLead::new("Ada").with_email("ada@example.com").with_score(20))
            .await
            .unwrap();

        let patch = LeadPatch {
            status: Some(LeadStatus::Lost),
            score: Some(55),
            ..Default::default()
        };
        let updated = store.update(lead.id, patch).await.unwrap().unwrap();

        assert_eq!(updated.name, "Ada");
        assert_eq!(updated.email.as_deref(), Some("ada@example.com"));
        assert_eq!(updated.status, LeadStatus::Lost);
        assert_eq!(updated.score, 55);
        assert_eq!(updated.created_at, lead.created_at);
    }

    #[tokio::test]
    async fn test_update_missing_and_invalid() {
        let store = create_test_store();
        assert!(store.update(9, LeadPatch::default()).await.unwrap().is_none());

        let lead = store.insert(NewLead::new("Ada")).await.unwrap();
        let patch = LeadPatch {
            score: Some(-3),
            ..Default::default()
        };
        assert!(matches!(
            store.update(lead.id, patch).await,
            Err(WebServerError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_is_permanent() {
        let store = create_test_store();
        let lead = store.insert(NewLead::new("Ada")).await.unwrap();

        assert!(store.delete(lead.id).await.unwrap());
        assert!(store.get(lead.id).await.unwrap().is_none());
        assert!(!store.delete(lead.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_file_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("crm.db");

        let id = {
            let store = SqliteLeadStore::open(&path).unwrap();
            store.insert(NewLead::new("Persisted").with_score(70)).await.unwrap().id
        };

        let reopened = SqliteLeadStore::open(&path).unwrap();
        let lead = reopened.get(id).await.unwrap().unwrap();
        assert_eq!(lead.name, "Persisted");
        assert_eq!(lead.score, 70);
    }
}

mod aggregate_tests {
    use super::*;

    #[tokio::test]
    async fn test_status_counts_are_zero_filled() {
        let (store, _) = create_seeded_store().await;
        let counts = store.status_counts().await.unwrap();

        assert_eq!(counts.new, 3);
        assert_eq!(counts.contacted, 1);
        assert_eq!(counts.qualified, 1);
        assert_eq!(counts.converted, 1);
        assert_eq!(counts.lost, 1);
        assert_eq!(counts.total(), 7);

        let empty = create_test_store().status_counts().await.unwrap();
        assert_eq!(empty.total(), 0);
    }

    #[tokio::test]
    async fn test_top_by_score() {
        let (store, _) = create_seeded_store().await;
        let top = store.top_by_score(3).await.unwrap();
        let scores: Vec<i64> = top.iter().map(|l| l.score).collect();
        assert_eq!(scores, vec![99, 95, 95]);
    }

    #[tokio::test]
    async fn test_active_leads_exclude_terminal() {
        let (store, ids) = create_seeded_store().await;
        let active: Vec<i64> = store.active_leads().await.unwrap().iter().map(|l| l.id).collect();
        assert_eq!(active, ids[..5].to_vec());
    }
}

mod automation_tests {
    use super::*;

    #[tokio::test]
    async fn test_apply_persists_transitions() {
        let (store, ids) = create_seeded_store().await;
        let transitions = store.apply_automation().await.unwrap();

        assert_eq!(
            transitions,
            vec![
                Transition { id: ids[0], from: LeadStatus::Contacted, to: LeadStatus::Converted, score: 95 },
                Transition { id: ids[1], from: LeadStatus::New, to: LeadStatus::Qualified, score: 85 },
                Transition { id: ids[3], from: LeadStatus::New, to: LeadStatus::Contacted, score: 30 },
            ]
        );

        let status_of = |lead: Option<shared::Lead>| lead.map(|l| l.status);
        assert_eq!(status_of(store.get(ids[0]).await.unwrap()), Some(LeadStatus::Converted));
        assert_eq!(status_of(store.get(ids[1]).await.unwrap()), Some(LeadStatus::Qualified));
        assert_eq!(status_of(store.get(ids[2]).await.unwrap()), Some(LeadStatus::Qualified));
        assert_eq!(status_of(store.get(ids[3]).await.unwrap()), Some(LeadStatus::Contacted));
        assert_eq!(status_of(store.get(ids[4]).await.unwrap()), Some(LeadStatus::New));
        assert_eq!(status_of(store.get(ids[5]).await.unwrap()), Some(LeadStatus::Converted));
        assert_eq!(status_of(store.get(ids[6]).await.unwrap()), Some(LeadStatus::Lost));
    }

    #[tokio::test]
    async fn test_second_apply_only_sees_remaining_changes() {
        let (store, ids) = create_seeded_store().await;
        store.apply_automation().await.unwrap();

        // contacted lead with no qualifying score stays put
        let transitions = store.apply_automation().await.unwrap();
        assert!(transitions.is_empty());
        assert_eq!(store.get(ids[3]).await.unwrap().unwrap().status, LeadStatus::Contacted);
    }

    #[tokio::test]
    async fn test_apply_on_empty_store() {
        let store = create_test_store();
        assert!(store.apply_automation().await.unwrap().is_empty());
    }
}
