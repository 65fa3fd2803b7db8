//! Record Store contract tests, straight against `PizzaStore`.

use pizzaapp::schema::{NewPizza, PizzaPatch};
use pizzaapp::{connect, AppError, PizzaStore};

async fn memory_store() -> PizzaStore {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");
    let store = PizzaStore::new(pool);
    store.init_schema().await.expect("schema");
    store
}

fn draft(name: &str, price: f64) -> NewPizza {
    NewPizza {
        name: name.into(),
        price,
    }
}

#[tokio::test]
async fn create_assigns_id_and_timestamps() {
    let store = memory_store().await;
    let pizza = store.create(&draft("test-pizza", 22.83)).await.unwrap();
    assert!(pizza.id > 0);
    assert_eq!(pizza.name, "test-pizza");
    assert_eq!(pizza.price, 22.83);
    assert_eq!(pizza.created_at, pizza.modified_at);
}

#[tokio::test]
async fn duplicate_name_is_a_conflict() {
    let store = memory_store().await;
    store.create(&draft("test-pizza", 22.83)).await.unwrap();
    let err = store.create(&draft("test-pizza", 9.99)).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let rows = store.list_all().await.unwrap();
    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn list_all_preserves_insertion_order() {
    let store = memory_store().await;
    store.create(&draft("test-pizza", 22.83)).await.unwrap();
    store.create(&draft("next-test-pizza", 29.99)).await.unwrap();

    let names: Vec<_> = store
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["test-pizza", "next-test-pizza"]);
}

#[tokio::test]
async fn get_by_id_returns_none_for_missing_row() {
    let store = memory_store().await;
    assert!(store.get_by_id(1).await.unwrap().is_none());
}

#[tokio::test]
async fn update_overwrites_only_given_fields() {
    let store = memory_store().await;
    let pizza = store.create(&draft("test-pizza", 22.83)).await.unwrap();

    let patch = PizzaPatch {
        name: None,
        price: Some(25.12),
    };
    let updated = store.update(&pizza, &patch).await.unwrap();
    assert_eq!(updated.name, "test-pizza");
    assert_eq!(updated.price, 25.12);
    assert_eq!(updated.created_at, pizza.created_at);
    assert!(updated.modified_at > pizza.modified_at);
}

#[tokio::test]
async fn update_to_taken_name_is_a_conflict() {
    let store = memory_store().await;
    let first = store.create(&draft("test-pizza", 22.83)).await.unwrap();
    store.create(&draft("next-test-pizza", 29.99)).await.unwrap();

    let patch = PizzaPatch {
        name: Some("next-test-pizza".into()),
        price: None,
    };
    let err = store.update(&first, &patch).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn delete_removes_the_row() {
    let store = memory_store().await;
    let pizza = store.create(&draft("test-pizza", 22.83)).await.unwrap();
    store.delete(&pizza).await.unwrap();
    assert!(store.get_by_id(pizza.id).await.unwrap().is_none());
}

#[tokio::test]
async fn racing_creates_with_same_name_leave_one_winner() {
    let file = tempfile::NamedTempFile::new().expect("temp db");
    let url = format!("sqlite://{}", file.path().display());
    let pool = connect(&url).await.expect("pool");
    let store = PizzaStore::new(pool);
    store.init_schema().await.unwrap();

    let draft_a = draft("test-pizza", 22.83);
    let draft_b = draft("test-pizza", 29.99);
    let (a, b) = tokio::join!(
        store.create(&draft_a),
        store.create(&draft_b)
    );
    let winners = [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count();
    assert_eq!(winners, 1);
    let loser = if a.is_err() {
        a.unwrap_err()
    } else {
        b.unwrap_err()
    };
    assert!(matches!(loser, AppError::Conflict(_)));
    assert_eq!(store.list_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn rows_survive_reopening_the_database_file() {
    let file = tempfile::NamedTempFile::new().expect("temp db");
    let url = format!("sqlite://{}", file.path().display());

    {
        let pool = connect(&url).await.expect("pool");
        let store = PizzaStore::new(pool.clone());
        store.init_schema().await.unwrap();
        store.create(&draft("test-pizza", 22.83)).await.unwrap();
        pool.close().await;
    }

    let pool = connect(&url).await.expect("pool");
    let store = PizzaStore::new(pool);
    let rows = store.list_all().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "test-pizza");
}
