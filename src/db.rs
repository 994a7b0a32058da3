use sqlx::SqlitePool;

pub async fn init_db(pool: &SqlitePool) -> anyhow::Result<()> {
    // Pragmas for better durability/performance
    if let Err(e) = sqlx::query("PRAGMA journal_mode=WAL;").execute(pool).await {
        tracing::warn!("Failed to set WAL journal mode: {}", e);
    }
    if let Err(e) = sqlx::query("PRAGMA synchronous=NORMAL;").execute(pool).await {
        tracing::warn!("Failed to set synchronous mode: {}", e);
    }
    // Foreign keys are critical - fail if this doesn't work
    sqlx::query("PRAGMA foreign_keys=ON;").execute(pool).await?;

    if let Err(e) = sqlx::query("PRAGMA busy_timeout=10000;").execute(pool).await {
        tracing::warn!("Failed to set busy_timeout: {}", e);
    }

    // files table: the reorderable catalog of media records.
    // created_at is RFC3339 UTC with millisecond precision, so lexicographic
    // comparison matches chronological order.
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS files (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            video_link TEXT NULL,
            mp3_link TEXT NULL,
            text_link TEXT NULL,
            sort_order INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        )"#,
    )
    .execute(pool)
    .await?;

    // users table for username/password login
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            username TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            created_at TEXT NOT NULL
        )"#,
    )
    .execute(pool)
    .await?;

    // Additive migration: databases created before manual ordering existed
    // lack the sort_order column.
    let query = "ALTER TABLE files ADD COLUMN sort_order INTEGER NOT NULL DEFAULT 0";
    if let Err(e) = sqlx::query(query).execute(pool).await {
        // Check if it's a benign "column already exists" error
        match &e {
            sqlx::Error::Database(db_err) => {
                let msg = db_err.message().to_lowercase();
                if !msg.contains("duplicate") && !msg.contains("already exists") {
                    tracing::error!("Failed to add sort_order column to files: {}", e);
                    return Err(anyhow::anyhow!("Migration failed: {}", e));
                }
            }
            _ => {
                tracing::error!("Unexpected error adding sort_order to files: {}", e);
                return Err(anyhow::anyhow!("Migration failed: {}", e));
            }
        }
    }

    let indexes = [
        (
            "idx_files_sort_created",
            "CREATE INDEX IF NOT EXISTS idx_files_sort_created ON files(sort_order ASC, created_at DESC)",
        ),
        ("idx_files_created", "CREATE INDEX IF NOT EXISTS idx_files_created ON files(created_at DESC)"),
        ("idx_users_username", "CREATE UNIQUE INDEX IF NOT EXISTS idx_users_username ON users(username)"),
    ];

    for (name, query) in indexes {
        if let Err(e) = sqlx::query(query).execute(pool).await {
            // Check if it's a "already exists" error
            match &e {
                sqlx::Error::Database(db_err) => {
                    let msg = db_err.message().to_lowercase();
                    if msg.contains("already exists") || msg.contains("duplicate") {
                        tracing::debug!("Index {} already exists, skipping", name);
                    } else {
                        tracing::warn!("Failed to create index {}: {}", name, e);
                    }
                }
                _ => {
                    tracing::warn!("Failed to create index {}: {}", name, e);
                }
            }
        }
    }

    Ok(())
}
