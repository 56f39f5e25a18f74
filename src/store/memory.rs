use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::app::{Result, TouchlineError};
use crate::domain::Article;
use crate::store::Store;

/// HashMap-backed store. Used by tests as a stand-in for the SQLite
/// backend; last write wins, no uniqueness enforcement.
#[derive(Default)]
pub struct MemoryStore {
    articles: RwLock<HashMap<String, Article>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.articles.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.articles.read().await.is_empty()
    }

    pub async fn contains(&self, id: &str) -> bool {
        self.articles.read().await.contains_key(id)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_by_id(&self, id: &str) -> Result<Article> {
        self.articles
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| TouchlineError::NotFound(id.to_string()))
    }

    async fn save(&self, article: &Article) -> Result<()> {
        self.articles
            .write()
            .await
            .insert(article.id.clone(), article.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Article>> {
        let mut articles: Vec<Article> = self.articles.read().await.values().cloned().collect();
        articles.sort_by(|a, b| b.publish_date.cmp(&a.publish_date));
        Ok(articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn article(id: &str) -> Article {
        Article {
            id: id.into(),
            club_name: String::new(),
            club_website_url: String::new(),
            article_url: String::new(),
            title: String::new(),
            subtitle: String::new(),
            body_text: String::new(),
            gallery_image_urls: String::new(),
            video_url: String::new(),
            taxonomies: String::new(),
            teaser_text: String::new(),
            thumbnail_url: String::new(),
            publish_date: String::new(),
            is_published: false,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_save_and_find() {
        let store = MemoryStore::new();
        store.save(&article("641745")).await.unwrap();

        assert!(store.contains("641745").await);
        assert_eq!(store.find_by_id("641745").await.unwrap().id, "641745");
    }

    #[tokio::test]
    async fn test_find_missing_is_not_found() {
        let store = MemoryStore::new();
        let err = store.find_by_id("641745").await.unwrap_err();
        assert!(matches!(err, TouchlineError::NotFound(_)));
    }
}
