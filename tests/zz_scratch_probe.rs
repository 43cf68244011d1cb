//! TEMPORARY build-validation probe — deleted before commit.

use surrealdb::Surreal;
use surrealdb::engine::local::RocksDb;

#[tokio::test]
async fn probe_lock_release_timing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("database");
    let path = path.to_string_lossy().to_string();

    {
        let db = Surreal::new::<RocksDb>(path.as_str()).await.unwrap();
        db.use_ns("menux").use_db("menux").await.unwrap();
        db.query(
            "
        DEFINE TABLE IF NOT EXISTS restaurant SCHEMALESS;
        DEFINE TABLE IF NOT EXISTS menu_item SCHEMALESS;
        DEFINE TABLE IF NOT EXISTS qr_code SCHEMALESS;
        DEFINE TABLE IF NOT EXISTS orders SCHEMALESS;
        DEFINE TABLE IF NOT EXISTS feedback SCHEMALESS;
    ",
        )
        .await
        .unwrap();
    }

    let start = std::time::Instant::now();
    for attempt in 0..300u32 {
        match Surreal::new::<RocksDb>(path.as_str()).await {
            Ok(_) => {
                println!(
                    "reopen succeeded on attempt {attempt} after {:?}",
                    start.elapsed()
                );
                return;
            }
            Err(e) => {
                if attempt % 50 == 0 {
                    println!("attempt {attempt} ({:?}): {e}", start.elapsed());
                }
                tokio::time::sleep(std::time::Duration::from_millis(100)).await;
            }
        }
    }
    panic!("lock never released after {:?}", start.elapsed());
}
