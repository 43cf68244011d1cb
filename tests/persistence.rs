//! 磁盘持久化测试
//!
//! 验证 RocksDB 后端的数据在重开后仍在，以及 schema 定义可重复执行。

use menux_server::db::DbService;
use menux_server::db::models::RestaurantCreate;
use menux_server::db::repository::RestaurantRepository;

#[tokio::test]
async fn data_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("database");
    let path = path.to_string_lossy();

    let id = {
        let service = DbService::new(&path).await.unwrap();
        RestaurantRepository::new(service.db)
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
            .unwrap()
    };

    // Reopen: schema statements run again (idempotent), data is still there
    let service = DbService::new(&path).await.unwrap();
    let restaurant = RestaurantRepository::new(service.db)
        .find_by_id(&id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(restaurant.name, "Golden Dragon");
    assert!(restaurant.is_active);
}
