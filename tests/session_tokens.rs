//! 桌台会话令牌集成测试
//!
//! 覆盖签发、重发 (旧令牌作废)、停用与会话解析。外部可见的失败只有
//! 一种 "invalid session"，这里走内部错误类型验证细分行为。

use std::sync::{Arc, Mutex};

use menux_server::db::DbService;
use menux_server::db::models::RestaurantCreate;
use menux_server::db::repository::{QrCodeRepository, RestaurantRepository};
use menux_server::qrcode::{CandidateProducer, SessionError, SessionValidator};
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const BASE_URL: &str = "http://localhost:3000/menu";

async fn setup() -> (Surreal<Db>, RecordId) {
    let db = DbService::new_in_memory().await.unwrap().db;
    let restaurant = RestaurantRepository::new(db.clone())
        .create(RestaurantCreate {
            name: "Golden Dragon".into(),
            description: None,
            address: None,
            phone: None,
            email: None,
        })
        .await
        .unwrap()
        .id
        .unwrap();
    (db, restaurant)
}

#[tokio::test]
async fn issue_then_resolve_round_trip() {
    let (db, restaurant) = setup().await;
    let validator = SessionValidator::new(db, BASE_URL);

    let qr = validator.issue(&restaurant, "12").await.unwrap();
    assert!(qr.is_active);
    assert!(qr.code.contains("-12-"), "code was {}", qr.code);
    // Prefix comes from the restaurant name, alphanumeric uppercase
    assert!(qr.code.starts_with("GOLDENDRAG-"), "code was {}", qr.code);

    let ctx = validator.resolve(&qr.code).await.unwrap();
    assert_eq!(ctx.restaurant_name, "Golden Dragon");
    assert_eq!(ctx.table_label, "12");
    assert!(ctx.menu_url.starts_with(BASE_URL));
    assert!(ctx.menu_url.ends_with("?table=12"));
}

#[tokio::test]
async fn issue_rejects_when_table_already_has_active_token() {
    let (db, restaurant) = setup().await;
    let validator = SessionValidator::new(db, BASE_URL);

    validator.issue(&restaurant, "7").await.unwrap();
    let err = validator.issue(&restaurant, "7").await.unwrap_err();
    assert!(matches!(err, SessionError::AlreadyIssued(_)));

    // A different table is unaffected
    validator.issue(&restaurant, "8").await.unwrap();
}

#[tokio::test]
async fn issue_rejects_unknown_restaurant() {
    let (db, _) = setup().await;
    let validator = SessionValidator::new(db, BASE_URL);

    let ghost: RecordId = "restaurant:ghost".parse().unwrap();
    let err = validator.issue(&ghost, "1").await.unwrap_err();
    assert!(matches!(err, SessionError::RestaurantNotFound(_)));
}

#[tokio::test]
async fn regenerate_supersedes_previous_token() {
    let (db, restaurant) = setup().await;
    let validator = SessionValidator::new(db.clone(), BASE_URL);

    let first = validator.issue(&restaurant, "3").await.unwrap();
    let second = validator.regenerate(&restaurant, "3").await.unwrap();
    let third = validator.regenerate(&restaurant, "3").await.unwrap();

    assert_ne!(first.code, second.code);
    assert_ne!(second.code, third.code);

    // Only the newest token resolves
    assert!(matches!(
        validator.resolve(&first.code).await.unwrap_err(),
        SessionError::Inactive
    ));
    assert!(matches!(
        validator.resolve(&second.code).await.unwrap_err(),
        SessionError::Inactive
    ));
    validator.resolve(&third.code).await.unwrap();

    // History is kept, exactly one token active
    let all = validator.list(&restaurant, false).await.unwrap();
    assert_eq!(all.len(), 3);
    let active = validator.list(&restaurant, true).await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].code, third.code);
}

#[tokio::test]
async fn regenerate_works_without_existing_token() {
    let (db, restaurant) = setup().await;
    let validator = SessionValidator::new(db, BASE_URL);

    // No token to supersede: regenerate degenerates into a plain issue
    let qr = validator.regenerate(&restaurant, "15").await.unwrap();
    validator.resolve(&qr.code).await.unwrap();
}

#[tokio::test]
async fn unknown_token_reports_not_found() {
    let (db, _) = setup().await;
    let validator = SessionValidator::new(db, BASE_URL);

    let err = validator.resolve("NOSUCH-1-0000").await.unwrap_err();
    assert!(matches!(err, SessionError::NotFound));
}

#[tokio::test]
async fn manual_deactivation_is_one_way() {
    let (db, restaurant) = setup().await;
    let validator = SessionValidator::new(db, BASE_URL);

    let qr = validator.issue(&restaurant, "5").await.unwrap();
    let id = qr.id.unwrap().to_string();

    let deactivated = validator.deactivate(&id).await.unwrap();
    assert!(!deactivated.is_active);
    assert!(matches!(
        validator.resolve(&qr.code).await.unwrap_err(),
        SessionError::Inactive
    ));
}

#[tokio::test]
async fn restaurant_deactivation_invalidates_all_sessions() {
    let (db, restaurant) = setup().await;
    let validator = SessionValidator::new(db.clone(), BASE_URL);
    let restaurants = RestaurantRepository::new(db.clone());

    let qr_a = validator.issue(&restaurant, "1").await.unwrap();
    let qr_b = validator.issue(&restaurant, "2").await.unwrap();

    restaurants.set_active(&restaurant, false).await.unwrap();

    // Tokens themselves stay active records, resolution fails anyway
    let codes = QrCodeRepository::new(db);
    assert!(codes.find_by_code(&qr_a.code).await.unwrap().unwrap().is_active);

    for code in [&qr_a.code, &qr_b.code] {
        assert!(matches!(
            validator.resolve(code).await.unwrap_err(),
            SessionError::Inactive
        ));
    }

    // Reactivation restores resolution
    restaurants.set_active(&restaurant, true).await.unwrap();
    validator.resolve(&qr_a.code).await.unwrap();
}

/// Always yields the same candidate
struct PinnedGenerator(String);

impl CandidateProducer for PinnedGenerator {
    fn candidate(&self, _restaurant_name: &str, _table_label: &str) -> String {
        self.0.clone()
    }
}

/// Yields a fixed sequence of candidates, then panics
struct SequenceGenerator(Mutex<Vec<String>>);

impl SequenceGenerator {
    fn new(candidates: &[&str]) -> Self {
        // Reversed so pop() hands them out in declaration order
        Self(Mutex::new(
            candidates.iter().rev().map(|c| c.to_string()).collect(),
        ))
    }
}

impl CandidateProducer for SequenceGenerator {
    fn candidate(&self, _restaurant_name: &str, _table_label: &str) -> String {
        self.0.lock().unwrap().pop().expect("candidates exhausted")
    }
}

#[tokio::test]
async fn pinned_generator_exhausts_after_bounded_retries() {
    let (db, restaurant) = setup().await;
    let validator = SessionValidator::with_generator(
        db,
        BASE_URL,
        Arc::new(PinnedGenerator("STUCK-1-0000".into())),
    );

    // First mint takes the only candidate the producer will ever emit
    let qr = validator.issue(&restaurant, "1").await.unwrap();
    assert_eq!(qr.code, "STUCK-1-0000");

    // Every retry collides with it; the bounded loop gives up
    let err = validator.issue(&restaurant, "2").await.unwrap_err();
    assert!(
        matches!(err, SessionError::GenerationExhausted { attempts: 8 }),
        "got {err:?}"
    );
}

#[tokio::test]
async fn colliding_candidate_is_retried_with_a_fresh_one() {
    let (db, restaurant) = setup().await;

    // Occupy the first candidate the producer will emit
    use menux_server::db::models::QrCodeCreate;
    QrCodeRepository::new(db.clone())
        .create(QrCodeCreate {
            code: "DUP-9-0000".into(),
            restaurant: restaurant.clone(),
            table_label: "9".into(),
        })
        .await
        .unwrap();

    let validator = SessionValidator::with_generator(
        db,
        BASE_URL,
        Arc::new(SequenceGenerator::new(&["DUP-9-0000", "FRESH-2-0000"])),
    );

    // First draw collides, the retry lands on the fresh candidate
    let qr = validator.issue(&restaurant, "2").await.unwrap();
    assert_eq!(qr.code, "FRESH-2-0000");
    validator.resolve("FRESH-2-0000").await.unwrap();
}

#[tokio::test]
async fn duplicate_code_insert_is_rejected_by_unique_index() {
    let (db, restaurant) = setup().await;
    let codes = QrCodeRepository::new(db);

    use menux_server::db::models::QrCodeCreate;
    use menux_server::db::repository::RepoError;

    codes
        .create(QrCodeCreate {
            code: "DUP-1-42".into(),
            restaurant: restaurant.clone(),
            table_label: "1".into(),
        })
        .await
        .unwrap();

    let err = codes
        .create(QrCodeCreate {
            code: "DUP-1-42".into(),
            restaurant,
            table_label: "2".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)));
}
