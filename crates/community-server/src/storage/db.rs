//! SQLite database layer (embedded, no external dependencies)

use anyhow::{Context, Result as AnyResult};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use community_core::ports::{CatalogStore, CommentStore, PostStore};
use community_core::{
    Comment, CommentUpdate, CommunityError, NewComment, NewPost, Post, PostUpdate, Result,
};
use serde_json::{Map, Value};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Column, Row, SqlitePool, TypeInfo, ValueRef};
use std::str::FromStr;

/// Fixed query behind the raw catalog endpoint.
const CATALOG_QUERY: &str = "SELECT * FROM sqlite_master LIMIT 10";

const SEED_POSTS: [(&str, &str); 3] = [
    ("Post The First", "Content for the first post"),
    ("Post The Second", "Content for the Second post"),
    ("Post The Third", "Content for the third post"),
];

/// (index into SEED_POSTS, content)
const SEED_COMMENTS: [(usize, &str); 4] = [
    (0, "Comment for the first post"),
    (1, "Comment for the second post"),
    (1, "Another comment for the second post"),
    (0, "Another comment for the first post"),
];

fn db_err(e: sqlx::Error) -> CommunityError {
    CommunityError::Database(e.to_string())
}

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn new(database_url: &str, max_connections: u32) -> AnyResult<Self> {
        tracing::info!("Opening SQLite database at: {}", database_url);

        let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");

        if !in_memory {
            let path = database_url
                .trim_start_matches("sqlite://")
                .trim_start_matches("sqlite:");
            let path = path.split('?').next().unwrap_or(path);
            if let Some(parent) = std::path::Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent).await.with_context(|| {
                        format!("Failed to create database directory: {}", parent.display())
                    })?;
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("Invalid database URL: {}", database_url))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);

        // Every connection to ":memory:" opens its own empty database, so an
        // in-memory store is pinned to one long-lived connection.
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to connect to SQLite database at: {}", database_url))?;

        tracing::info!("SQLite connection established");

        Ok(Self { pool })
    }

    /// Drop and recreate both tables, then insert the sample rows.
    ///
    /// Destroys whatever the database held before.
    pub async fn initialize(&self) -> Result<()> {
        self.reset_schema().await?;
        self.seed().await
    }

    async fn reset_schema(&self) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        sqlx::query("DROP TABLE IF EXISTS comment")
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;
        sqlx::query("DROP TABLE IF EXISTS post")
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;

        sqlx::query(
            r#"
            CREATE TABLE post (
                id INTEGER PRIMARY KEY,
                title TEXT NOT NULL,
                content TEXT NOT NULL
            )
            "#,
        )
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;

        sqlx::query(
            r#"
            CREATE TABLE comment (
                id INTEGER PRIMARY KEY,
                post_id INTEGER NOT NULL REFERENCES post(id),
                content TEXT NOT NULL
            )
            "#,
        )
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;

        tx.commit().await.map_err(db_err)
    }

    async fn seed(&self) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        let mut post_ids = Vec::with_capacity(SEED_POSTS.len());
        for (title, content) in SEED_POSTS {
            let id: i64 =
                sqlx::query_scalar("INSERT INTO post (title, content) VALUES (?1, ?2) RETURNING id")
                    .bind(title)
                    .bind(content)
                    .fetch_one(&mut *tx)
                    .await
                    .map_err(db_err)?;
            post_ids.push(id);
        }

        for (post, content) in SEED_COMMENTS {
            sqlx::query("INSERT INTO comment (post_id, content) VALUES (?1, ?2)")
                .bind(post_ids[post])
                .bind(content)
                .execute(&mut *tx)
                .await
                .map_err(db_err)?;
        }

        tx.commit().await.map_err(db_err)?;

        tracing::info!(
            "Seeded {} posts and {} comments",
            SEED_POSTS.len(),
            SEED_COMMENTS.len()
        );
        Ok(())
    }
}

#[async_trait]
impl PostStore for Database {
    async fn list_posts(&self) -> Result<Vec<Post>> {
        let rows: Vec<PostRow> = sqlx::query_as("SELECT id, title, content FROM post")
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>> {
        let row: Option<PostRow> =
            sqlx::query_as("SELECT id, title, content FROM post WHERE id = ?1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_err)?;

        Ok(row.map(|r| r.into()))
    }

    async fn create_post(&self, post: &NewPost) -> Result<Post> {
        let row: PostRow = sqlx::query_as(
            r#"
            INSERT INTO post (id, title, content)
            VALUES (?1, ?2, ?3)
            RETURNING id, title, content
            "#,
        )
        .bind(post.id)
        .bind(&post.title)
        .bind(&post.content)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(row.into())
    }

    async fn update_post(&self, id: i64, update: &PostUpdate) -> Result<Option<Post>> {
        let row: Option<PostRow> = sqlx::query_as(
            r#"
            UPDATE post
            SET title = COALESCE(?1, title), content = COALESCE(?2, content)
            WHERE id = ?3
            RETURNING id, title, content
            "#,
        )
        .bind(update.title.as_deref())
        .bind(update.content.as_deref())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(row.map(|r| r.into()))
    }

    async fn delete_post(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM post WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(CommunityError::PostNotFound(id));
        }
        Ok(())
    }
}

#[async_trait]
impl CommentStore for Database {
    async fn list_comments(&self) -> Result<Vec<Comment>> {
        let rows: Vec<CommentRow> = sqlx::query_as("SELECT id, post_id, content FROM comment")
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn list_comments_by_post(&self, post_id: i64) -> Result<Vec<Comment>> {
        let rows: Vec<CommentRow> =
            sqlx::query_as("SELECT id, post_id, content FROM comment WHERE post_id = ?1")
                .bind(post_id)
                .fetch_all(&self.pool)
                .await
                .map_err(db_err)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn get_comment(&self, id: i64) -> Result<Option<Comment>> {
        let row: Option<CommentRow> =
            sqlx::query_as("SELECT id, post_id, content FROM comment WHERE id = ?1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_err)?;

        Ok(row.map(|r| r.into()))
    }

    async fn create_comment(&self, comment: &NewComment) -> Result<Comment> {
        let row: CommentRow = sqlx::query_as(
            r#"
            INSERT INTO comment (id, post_id, content)
            VALUES (?1, ?2, ?3)
            RETURNING id, post_id, content
            "#,
        )
        .bind(comment.id)
        .bind(comment.post_id)
        .bind(&comment.content)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(row.into())
    }

    async fn update_comment(&self, id: i64, update: &CommentUpdate) -> Result<Option<Comment>> {
        let row: Option<CommentRow> = sqlx::query_as(
            r#"
            UPDATE comment SET content = COALESCE(?1, content)
            WHERE id = ?2
            RETURNING id, post_id, content
            "#,
        )
        .bind(update.content.as_deref())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(row.map(|r| r.into()))
    }

    async fn delete_comment(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM comment WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(CommunityError::CommentNotFound(id));
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogStore for Database {
    async fn catalog_rows(&self) -> Result<Vec<Map<String, Value>>> {
        let rows = sqlx::query(CATALOG_QUERY)
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;

        rows.iter().map(row_to_json).collect()
    }
}

/// Convert an untyped row into a JSON object keyed by column name, using
/// each value's storage class.
fn row_to_json(row: &SqliteRow) -> Result<Map<String, Value>> {
    let mut object = Map::new();

    for column in row.columns() {
        let idx = column.ordinal();
        let raw = row.try_get_raw(idx).map_err(db_err)?;

        let value = if raw.is_null() {
            Value::Null
        } else {
            match raw.type_info().name() {
                "INTEGER" => Value::from(row.try_get::<i64, _>(idx).map_err(db_err)?),
                "REAL" => Value::from(row.try_get::<f64, _>(idx).map_err(db_err)?),
                "BLOB" => {
                    let bytes: Vec<u8> = row.try_get(idx).map_err(db_err)?;
                    Value::String(STANDARD.encode(bytes))
                }
                _ => Value::String(row.try_get::<String, _>(idx).map_err(db_err)?),
            }
        };

        object.insert(column.name().to_string(), value);
    }

    Ok(object)
}

// Helper structs for sqlx query_as
#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    title: String,
    content: String,
}

impl From<PostRow> for Post {
    fn from(r: PostRow) -> Self {
        Post {
            id: r.id,
            title: r.title,
            content: r.content,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: i64,
    post_id: i64,
    content: String,
}

impl From<CommentRow> for Comment {
    fn from(r: CommentRow) -> Self {
        Comment {
            id: r.id,
            post_id: r.post_id,
            content: r.content,
        }
    }
}
