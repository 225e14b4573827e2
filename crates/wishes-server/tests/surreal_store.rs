//! SurrealStore against the embedded in-memory engine.

use wishes_core::{NewWish, WishStatus};
use wishes_server::{
    config::DbConfig, db::Db, Health, ServiceError, StoreError, SurrealStore, WishService,
    WishStore,
};

async fn mem_store() -> SurrealStore {
    let config = DbConfig {
        url: "mem://".into(),
        namespace: "wishes".into(),
        database: "test".into(),
        username: None,
        password: None,
    };
    let db = Db::connect(&config).await.unwrap();
    db.apply_schema().await.unwrap();
    SurrealStore::new(db)
}

#[tokio::test]
async fn schema_is_idempotent() {
    let config = DbConfig {
        url: "mem://".into(),
        namespace: "wishes".into(),
        database: "test".into(),
        username: None,
        password: None,
    };
    let db = Db::connect(&config).await.unwrap();
    db.apply_schema().await.unwrap();
    db.apply_schema().await.unwrap();
}

#[tokio::test]
async fn submit_list_and_reject_duplicate() {
    let svc = WishService::new(mem_store().await);
    assert!(svc.list_all().await.unwrap().is_empty());

    let created = svc.submit(NewWish::new("Alice", "A bicycle")).await.unwrap();

    let err = svc
        .submit(NewWish::new("Alice", "A bicycle"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Save(StoreError::Duplicate(_))));

    svc.submit(NewWish::new("alice", "A kite")).await.unwrap();

    let all = svc.list_all().await.unwrap();
    assert_eq!(all.len(), 2);
    let alice = all.iter().find(|r| r.name == "Alice").unwrap();
    assert_eq!(alice, &created);
    assert_eq!(alice.status, WishStatus::INITIAL);
}

#[tokio::test]
async fn embedded_store_is_healthy() {
    let store = mem_store().await;
    assert!(store.ping().await.is_ok());
    assert_eq!(WishService::new(store).health_check().await, Health::Ok);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_same_name_submissions_yield_one_winner() {
    let svc = WishService::new(mem_store().await);

    let mut handles = Vec::new();
    for i in 0..16 {
        let svc = svc.clone();
        handles.push(tokio::spawn(async move {
            svc.submit(NewWish::new("Alice", format!("wish {i}"))).await
        }));
    }

    let mut ok = 0;
    for h in handles {
        match h.await.unwrap() {
            Ok(_) => ok += 1,
            Err(e) => assert!(matches!(e, ServiceError::Save(_))),
        }
    }
    assert_eq!(ok, 1);

    let all = svc.list_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "Alice");
}
