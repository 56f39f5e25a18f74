use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::app::TouchlineError;
use crate::domain::Article;
use crate::server::AppState;

/// API representation of a persisted article.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiArticle {
    pub news_id: String,
    pub club_name: String,
    pub club_website_url: String,
    pub article_url: String,
    pub title: String,
    pub subtitle: String,
    pub body_text: String,
    pub gallery_image_urls: String,
    pub video_url: String,
    pub taxonomies: String,
    pub teaser_text: String,
    pub thumbnail_image_url: String,
    pub publish_date: String,
    pub is_published: bool,
    pub create_at: DateTime<Utc>,
}

impl From<Article> for ApiArticle {
    fn from(article: Article) -> Self {
        Self {
            news_id: article.id,
            club_name: article.club_name,
            club_website_url: article.club_website_url,
            article_url: article.article_url,
            title: article.title,
            subtitle: article.subtitle,
            body_text: article.body_text,
            gallery_image_urls: article.gallery_image_urls,
            video_url: article.video_url,
            taxonomies: article.taxonomies,
            teaser_text: article.teaser_text,
            thumbnail_image_url: article.thumbnail_url,
            publish_date: article.publish_date,
            is_published: article.is_published,
            create_at: article.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

pub async fn list_articles(State(state): State<AppState>) -> Response {
    match state.store.list().await {
        Ok(articles) => {
            let body: Vec<ApiArticle> = articles.into_iter().map(ApiArticle::from).collect();
            Json(body).into_response()
        }
        Err(e) => {
            error!(error = %e, "failed to list articles");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn get_article(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.store.find_by_id(&id).await {
        Ok(article) => Json(ApiArticle::from(article)).into_response(),
        Err(TouchlineError::NotFound(_)) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            error!(id = %id, error = %e, "failed to get article");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    use crate::server::create_app;
    use crate::store::{MemoryStore, Store};

    fn article(id: &str) -> Article {
        Article {
            id: id.into(),
            club_name: "Brentford".into(),
            club_website_url: "https://www.brentfordfc.com".into(),
            article_url: String::new(),
            title: format!("Article {id}"),
            subtitle: String::new(),
            body_text: "[]".into(),
            gallery_image_urls: String::new(),
            video_url: String::new(),
            taxonomies: String::new(),
            teaser_text: String::new(),
            thumbnail_url: String::new(),
            publish_date: "2022-06-15 08:00:00".into(),
            is_published: true,
            created_at: Utc::now(),
        }
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = create_app(AppState::new(Arc::new(MemoryStore::new())));
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_list_articles() {
        let store = Arc::new(MemoryStore::new());
        store.save(&article("641745")).await.unwrap();
        store.save(&article("641838")).await.unwrap();

        let app = create_app(AppState::new(store));
        let response = app
            .oneshot(Request::get("/articles").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_get_article() {
        let store = Arc::new(MemoryStore::new());
        store.save(&article("641745")).await.unwrap();

        let app = create_app(AppState::new(store));
        let response = app
            .oneshot(Request::get("/articles/641745").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["news_id"], "641745");
        assert_eq!(body["title"], "Article 641745");
    }

    #[tokio::test]
    async fn test_get_missing_article_is_404() {
        let app = create_app(AppState::new(Arc::new(MemoryStore::new())));
        let response = app
            .oneshot(Request::get("/articles/999999").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
