//! Concurrent reserve requests for one unit: exactly one wins.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use shelf_api::{router, AppState};
use shelf_core::ReservationStore;
use shelf_db::{Database, DbConfig};

const CONTENDERS: usize = 50;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_reserve_has_single_winner() {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let inventory = ReservationStore::with_demo_inventory();
    let app = router(AppState::new(db, inventory.clone()));

    let handles: Vec<_> = (0..CONTENDERS)
        .map(|_| {
            let app = app.clone();
            tokio::spawn(async move {
                let request = Request::builder()
                    .uri("/api/v1/reserve?id=2")
                    .body(Body::empty())
                    .unwrap();
                app.oneshot(request).await.unwrap().status()
            })
        })
        .collect();

    let mut ok = 0;
    let mut conflict = 0;
    for handle in handles {
        match handle.await.unwrap() {
            StatusCode::OK => ok += 1,
            StatusCode::CONFLICT => conflict += 1,
            other => panic!("unexpected status {other}"),
        }
    }

    assert_eq!(ok, 1);
    assert_eq!(conflict, CONTENDERS - 1);

    let unit = inventory.get("2").unwrap();
    assert!(unit.reserved);
    assert_eq!(unit.stock, 5);
    // Other units untouched
    assert!(!inventory.get("1").unwrap().reserved);
    assert!(!inventory.get("3").unwrap().reserved);
}
