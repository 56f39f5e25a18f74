use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use rusqlite_migration::{Migrations, M};

use crate::app::{Result, TouchlineError};
use crate::domain::Article;
use crate::store::Store;

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.run_migrations()?;
        Ok(store)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.run_migrations()?;
        Ok(store)
    }

    fn run_migrations(&self) -> Result<()> {
        let migrations = Migrations::new(vec![M::up(include_str!(
            "../../migrations/001-initial/up.sql"
        ))]);

        let mut conn = self.lock()?;
        migrations
            .to_latest(&mut conn)
            .map_err(|_| TouchlineError::Database(rusqlite::Error::InvalidQuery))?;

        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| {
            TouchlineError::Database(rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error::new(1),
                Some(e.to_string()),
            ))
        })
    }

    fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| s.parse::<DateTime<Utc>>().ok())
    }

    fn row_to_article(row: &Row<'_>) -> rusqlite::Result<Article> {
        Ok(Article {
            id: row.get(0)?,
            club_name: row.get(1)?,
            club_website_url: row.get(2)?,
            article_url: row.get(3)?,
            title: row.get(4)?,
            subtitle: row.get(5)?,
            body_text: row.get(6)?,
            gallery_image_urls: row.get(7)?,
            video_url: row.get(8)?,
            taxonomies: row.get(9)?,
            teaser_text: row.get(10)?,
            thumbnail_url: row.get(11)?,
            publish_date: row.get(12)?,
            is_published: row.get::<_, i64>(13)? != 0,
            created_at: row
                .get::<_, String>(14)
                .ok()
                .and_then(|s| Self::parse_datetime(&s))
                .unwrap_or_else(Utc::now),
        })
    }
}

const ARTICLE_COLUMNS: &str = "article_id, club_name, club_website_url, article_url, title, \
     subtitle, body_text, gallery_image_urls, video_url, taxonomies, teaser_text, \
     thumbnail_image_url, publish_date, is_published, create_at";

#[async_trait]
impl Store for SqliteStore {
    async fn find_by_id(&self, id: &str) -> Result<Article> {
        let conn = self.lock()?;

        let result = conn
            .query_row(
                &format!("SELECT {ARTICLE_COLUMNS} FROM articles WHERE article_id = ?1"),
                params![id],
                Self::row_to_article,
            )
            .optional()?;

        result.ok_or_else(|| TouchlineError::NotFound(id.to_string()))
    }

    async fn save(&self, article: &Article) -> Result<()> {
        let conn = self.lock()?;

        conn.execute(
            &format!(
                "INSERT INTO articles ({ARTICLE_COLUMNS})
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)"
            ),
            params![
                article.id,
                article.club_name,
                article.club_website_url,
                article.article_url,
                article.title,
                article.subtitle,
                article.body_text,
                article.gallery_image_urls,
                article.video_url,
                article.taxonomies,
                article.teaser_text,
                article.thumbnail_url,
                article.publish_date,
                article.is_published as i64,
                article.created_at.to_rfc3339(),
            ],
        )?;

        Ok(())
    }

    async fn list(&self) -> Result<Vec<Article>> {
        let conn = self.lock()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles ORDER BY publish_date DESC, article_id"
        ))?;

        let articles = stmt
            .query_map([], Self::row_to_article)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(articles)
    }
}
