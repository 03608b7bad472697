//! Schema checks against a live PostgreSQL (`DATABASE_URL`).

use sqlx::PgPool;

#[sqlx::test(migrations = "./migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    restau_db::health_check(&pool).await.unwrap();

    let tables = [
        "users",
        "products",
        "menus",
        "menu_items",
        "commandes",
        "commande_menus",
        "commande_products",
    ];

    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_status_check_constraint(pool: PgPool) {
    let result = sqlx::query("INSERT INTO commandes (status, price) VALUES ('shipped', 1)")
        .execute(&pool)
        .await;
    assert!(result.is_err(), "unknown status must be rejected");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_updated_at_trigger(pool: PgPool) {
    let (id, created): (i64, chrono::DateTime<chrono::Utc>) = sqlx::query_as(
        "INSERT INTO commandes (price, updated_at) VALUES (1, NOW() - INTERVAL '1 hour')
         RETURNING id, updated_at",
    )
    .fetch_one(&pool)
    .await
    .unwrap();

    let (updated,): (chrono::DateTime<chrono::Utc>,) =
        sqlx::query_as("UPDATE commandes SET status = 'ready' WHERE id = $1 RETURNING updated_at")
            .bind(id)
            .fetch_one(&pool)
            .await
            .unwrap();

    assert!(updated > created);
}
