//! Integration tests for loading the experiences page.

mod common;

use std::time::Duration;

use common::{academic_record, professional_record, project_record, MockApi};
use expforms::{ApiError, Config, ExperienceBoard, ExperienceCategory, FormsError, RecordId, Topic};

fn fast_config(retries: u32) -> Config {
    Config {
        list_retries: retries,
        retry_backoff: Duration::ZERO,
        ..Default::default()
    }
}

// ============================================================================
// Grouping
// ============================================================================

#[tokio::test]
async fn test_groups_by_category_in_server_order() {
    let api = MockApi::with_records(vec![
        project_record("p1", "First project"),
        professional_record("w1", "First job"),
        project_record("p2", "Second project"),
        academic_record("a1", "Degree"),
        professional_record("w2", "Second job"),
    ]);

    let board = ExperienceBoard::load(&api, &fast_config(0)).await.unwrap();
    assert_eq!(board.len(), 5);
    assert_eq!(board.skipped(), 0);

    let projects: Vec<_> = board
        .section(ExperienceCategory::Project)
        .iter()
        .map(|e| e.id().as_str())
        .collect();
    assert_eq!(projects, vec!["p1", "p2"]);

    let jobs: Vec<_> = board
        .section(ExperienceCategory::Professional)
        .iter()
        .map(|e| e.id().as_str())
        .collect();
    assert_eq!(jobs, vec!["w1", "w2"]);

    assert_eq!(board.section(ExperienceCategory::Academic).len(), 1);
    assert!(board.iter().all(|e| !e.is_editing()));
}

#[test]
fn test_unreadable_records_are_skipped() {
    let mut duplicated = project_record("p3", "Duplicated topics");
    duplicated.topics.push(Topic {
        category: "rust".into(),
        description: None,
    });

    let board = ExperienceBoard::from_records(vec![
        project_record("p1", "Fine"),
        duplicated,
    ]);
    assert_eq!(board.len(), 1);
    assert_eq!(board.skipped(), 1);
    assert!(board.get(&RecordId::new("p3")).is_none());
}

#[test]
fn test_get_mut_unknown_is_not_found() {
    let mut board = ExperienceBoard::from_records(vec![project_record("p1", "Fine")]);
    assert!(board.get_mut(&RecordId::new("p1")).is_ok());
    let err = board.get_mut(&RecordId::new("nope")).unwrap_err();
    assert!(err.is_not_found());
}

// ============================================================================
// Retries
// ============================================================================

#[tokio::test]
async fn test_listing_retried_until_success() {
    let api = MockApi::with_records(vec![project_record("p1", "Fine")]);
    api.fail_list([ApiError::network(), ApiError::from_status(502, None)]);

    let board = ExperienceBoard::load(&api, &fast_config(3)).await.unwrap();
    assert_eq!(board.len(), 1);
    assert_eq!(api.list_calls(), 3);
}

#[tokio::test]
async fn test_listing_gives_up_after_retries() {
    let api = MockApi::new();
    api.fail_list((0..5).map(|_| ApiError::network()));

    let err = ExperienceBoard::load(&api, &fast_config(2)).await.unwrap_err();
    match err {
        FormsError::Api(api_err) => assert!(api_err.is_network()),
        other => panic!("expected API error, got {:?}", other),
    }
    assert_eq!(api.list_calls(), 3);
}

#[tokio::test]
async fn test_unauthorized_not_retried() {
    let api = MockApi::new();
    api.fail_list([ApiError::new("Unauthorized", 401)]);

    let err = ExperienceBoard::load(&api, &fast_config(3)).await.unwrap_err();
    assert!(err.is_api());
    assert_eq!(api.list_calls(), 1);
}

#[tokio::test]
async fn test_invalid_config_rejected_before_listing() {
    let api = MockApi::new();
    let config = Config {
        list_retries: 99,
        ..Default::default()
    };
    let err = ExperienceBoard::load(&api, &config).await.unwrap_err();
    assert!(err.is_validation());
    assert_eq!(api.list_calls(), 0);
}
