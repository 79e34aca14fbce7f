use sqlx::PgPool;

const TABLES: &[(&str, &str)] = &[
    (
        "buyers",
        "CREATE TABLE IF NOT EXISTS buyers (
            id BIGSERIAL PRIMARY KEY,
            email TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            password TEXT NOT NULL,
            sending_address TEXT NOT NULL
        )",
    ),
    (
        "sellers",
        "CREATE TABLE IF NOT EXISTS sellers (
            id BIGSERIAL PRIMARY KEY,
            email TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            password TEXT NOT NULL,
            pickup_address TEXT NOT NULL
        )",
    ),
    (
        "products",
        "CREATE TABLE IF NOT EXISTS products (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            price NUMERIC NOT NULL CHECK (price >= 0),
            seller_id BIGINT NOT NULL
        )",
    ),
    (
        "orders",
        "CREATE TABLE IF NOT EXISTS orders (
            id BIGSERIAL PRIMARY KEY,
            buyer_id BIGINT NOT NULL,
            seller_id BIGINT NOT NULL,
            delivery_source_address TEXT NOT NULL,
            delivery_destination_address TEXT NOT NULL,
            total_quantity BIGINT NOT NULL,
            total_price NUMERIC NOT NULL,
            status SMALLINT NOT NULL DEFAULT 0,
            order_date TIMESTAMPTZ(0) NOT NULL
        )",
    ),
    (
        "order_details",
        "CREATE TABLE IF NOT EXISTS order_details (
            id BIGSERIAL PRIMARY KEY,
            order_id BIGINT NOT NULL REFERENCES orders (id) ON DELETE CASCADE,
            product_id BIGINT NOT NULL,
            quantity BIGINT NOT NULL CHECK (quantity > 0),
            unit_price NUMERIC NOT NULL
        )",
    ),
];

const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS orders_buyer_id_idx ON orders (buyer_id)",
    "CREATE INDEX IF NOT EXISTS orders_seller_id_idx ON orders (seller_id)",
    "CREATE INDEX IF NOT EXISTS order_details_order_id_idx ON order_details (order_id)",
];

/// Create every table the service uses if it is missing. Safe to run on
/// each start.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    for (table, ddl) in TABLES {
        sqlx::query(*ddl).execute(pool).await?;
        tracing::debug!(table = *table, "Table ready");
    }
    for ddl in INDEXES {
        sqlx::query(*ddl).execute(pool).await?;
    }

    tracing::info!("✅ Database schema ready");
    Ok(())
}
