use sqlx::SqlitePool;

use crate::auth::password;
use crate::store::users::ADMIN_ROLE_ID;

/// Username of the account seeded on first start.
pub const ADMIN_USERNAME: &str = "admin";

const TABLES: &[(&str, &str)] = &[
    (
        "roles",
        r#"CREATE TABLE IF NOT EXISTS roles (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE
        )"#,
    ),
    (
        "users",
        r#"CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE CHECK (length(username) <= 255),
            email TEXT NOT NULL UNIQUE CHECK (length(email) <= 255),
            password TEXT NOT NULL,
            role_id INTEGER NOT NULL DEFAULT 2 REFERENCES roles(id),
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%SZ','now'))
        )"#,
    ),
    (
        "products",
        r#"CREATE TABLE IF NOT EXISTS products (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL CHECK (length(name) <= 255),
            description TEXT NOT NULL DEFAULT '',
            price REAL NOT NULL DEFAULT 0,
            image TEXT NOT NULL DEFAULT ''
        )"#,
    ),
    (
        "services",
        r#"CREATE TABLE IF NOT EXISTS services (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL CHECK (length(title) <= 255),
            description TEXT NOT NULL DEFAULT '',
            image TEXT NOT NULL DEFAULT ''
        )"#,
    ),
    (
        "about",
        r#"CREATE TABLE IF NOT EXISTS about (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            slot INTEGER NOT NULL DEFAULT 1 UNIQUE CHECK (slot = 1),
            title TEXT NOT NULL DEFAULT '',
            content TEXT NOT NULL DEFAULT '',
            image TEXT NOT NULL DEFAULT ''
        )"#,
    ),
    (
        "contact",
        r#"CREATE TABLE IF NOT EXISTS contact (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            slot INTEGER NOT NULL DEFAULT 1 UNIQUE CHECK (slot = 1),
            title TEXT NOT NULL DEFAULT '',
            phone TEXT NOT NULL DEFAULT '',
            email TEXT NOT NULL DEFAULT '',
            address TEXT NOT NULL DEFAULT '',
            latitude REAL NULL,
            longitude REAL NULL,
            weekday_hours TEXT NULL,
            saturday_hours TEXT NULL,
            sunday_hours TEXT NULL
        )"#,
    ),
    (
        "hero",
        r#"CREATE TABLE IF NOT EXISTS hero (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            slot INTEGER NOT NULL DEFAULT 1 UNIQUE CHECK (slot = 1),
            subheading TEXT NOT NULL DEFAULT '',
            heading TEXT NOT NULL DEFAULT '',
            button_text TEXT NOT NULL DEFAULT '',
            background_image TEXT NOT NULL DEFAULT ''
        )"#,
    ),
    (
        "footer",
        r#"CREATE TABLE IF NOT EXISTS footer (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            slot INTEGER NOT NULL DEFAULT 1 UNIQUE CHECK (slot = 1),
            copyright TEXT NOT NULL DEFAULT '',
            social_links TEXT NOT NULL DEFAULT '{}',
            links TEXT NOT NULL DEFAULT '{}'
        )"#,
    ),
];

/// Creates the schema and seeds roles plus the `admin` account.
///
/// Safe to run on every start. Any error here must abort startup.
pub async fn init_db(pool: &SqlitePool, admin_password: &str) -> anyhow::Result<()> {
    // Pragmas for better durability/performance
    if let Err(e) = sqlx::query("PRAGMA journal_mode=WAL;").execute(pool).await {
        tracing::warn!("Failed to set WAL journal mode: {}", e);
    }
    if let Err(e) = sqlx::query("PRAGMA synchronous=NORMAL;").execute(pool).await {
        tracing::warn!("Failed to set synchronous mode: {}", e);
    }
    // users.role_id depends on it - fail if this doesn't work
    sqlx::query("PRAGMA foreign_keys=ON;").execute(pool).await?;

    for &(name, ddl) in TABLES {
        sqlx::query(ddl)
            .execute(pool)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create table {}: {}", name, e))?;
    }

    sqlx::query("INSERT OR IGNORE INTO roles (id, name) VALUES (1, 'admin'), (2, 'editor')")
        .execute(pool)
        .await?;

    seed_admin(pool, admin_password).await
}

async fn seed_admin(pool: &SqlitePool, admin_password: &str) -> anyhow::Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = ?")
        .bind(ADMIN_USERNAME)
        .fetch_one(pool)
        .await?;
    if count > 0 {
        tracing::debug!("admin account present, skipping seed");
        return Ok(());
    }

    let hash = password::hash_password_blocking(admin_password.to_string())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to hash admin password: {}", e))?;
    // Another instance may have seeded in the meantime
    sqlx::query("INSERT OR IGNORE INTO users (username, email, password, role_id) VALUES (?, ?, ?, ?)")
        .bind(ADMIN_USERNAME)
        .bind("admin@localhost")
        .bind(hash)
        .bind(ADMIN_ROLE_ID)
        .execute(pool)
        .await?;
    tracing::info!("Seeded default '{}' account; change its password", ADMIN_USERNAME);
    Ok(())
}
