//! Wire schemas for the club feed documents.
//!
//! Two documents share a header: the listing (`NewListInformation`) and
//! the per-article detail (`NewsArticleInformation`). Field names match
//! the feed exactly; everything is optional on the wire, so every field
//! defaults. The `IsPublished` flag arrives as the literals
//! "True"/"False" and is normalized here.

use serde::Deserialize;

use crate::domain::{ArticleDetail, ItemStub, Link, Paragraph};

#[derive(Debug, Deserialize)]
pub(crate) struct NewsListDocument {
    #[serde(rename = "ClubName", default)]
    pub club_name: String,
    #[serde(rename = "ClubWebsiteURL", default)]
    pub club_website_url: String,
    #[serde(rename = "NewsletterNewsItems", default)]
    pub items: NewsletterNewsItems,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct NewsletterNewsItems {
    #[serde(rename = "NewsletterNewsItem", default)]
    pub items: Vec<NewsletterNewsItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NewsletterNewsItem {
    #[serde(rename = "NewsArticleID", default)]
    pub news_article_id: String,
    #[serde(rename = "ArticleURL", default)]
    pub article_url: String,
    #[serde(rename = "PublishDate", default)]
    pub publish_date: String,
    #[serde(rename = "Taxonomies", default)]
    pub taxonomies: String,
    #[serde(rename = "TeaserText", default)]
    pub teaser_text: String,
    #[serde(rename = "ThumbnailImageURL", default)]
    pub thumbnail_image_url: String,
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "OptaMatchId", default)]
    pub opta_match_id: String,
    #[serde(rename = "LastUpdateDate", default)]
    pub last_update_date: String,
    #[serde(rename = "IsPublished", default)]
    pub is_published: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NewsArticleDocument {
    #[serde(rename = "ClubName", default)]
    pub club_name: String,
    #[serde(rename = "ClubWebsiteURL", default)]
    pub club_website_url: String,
    #[serde(rename = "NewsArticle", default)]
    pub article: NewsArticle,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct NewsArticle {
    #[serde(rename = "NewsArticleID", default)]
    pub news_article_id: String,
    #[serde(rename = "ArticleURL", default)]
    pub article_url: String,
    #[serde(rename = "PublishDate", default)]
    pub publish_date: String,
    #[serde(rename = "Taxonomies", default)]
    pub taxonomies: String,
    #[serde(rename = "TeaserText", default)]
    pub teaser_text: String,
    #[serde(rename = "Subtitle", default)]
    pub subtitle: String,
    #[serde(rename = "ThumbnailImageURL", default)]
    pub thumbnail_image_url: String,
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "BodyText", default)]
    pub body_text: BodyText,
    #[serde(rename = "GalleryImageURLs", default)]
    pub gallery_image_urls: String,
    #[serde(rename = "VideoURL", default)]
    pub video_url: String,
    #[serde(rename = "OptaMatchId", default)]
    pub opta_match_id: String,
    #[serde(rename = "LastUpdateDate", default)]
    pub last_update_date: String,
    #[serde(rename = "IsPublished", default)]
    pub is_published: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct BodyText {
    #[serde(rename = "p", default)]
    pub paragraphs: Vec<BodyParagraph>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct BodyParagraph {
    #[serde(rename = "$text", default)]
    pub text: String,
    #[serde(rename = "a", default)]
    pub anchor: Option<BodyAnchor>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BodyAnchor {
    #[serde(rename = "@href", default)]
    pub href: String,
    #[serde(rename = "$text", default)]
    pub text: String,
}

/// The feed encodes booleans as "True"/"False"; anything unparsable
/// counts as unpublished.
pub(crate) fn parse_published(raw: &str) -> bool {
    matches!(raw.trim(), "1" | "t" | "T" | "true" | "True" | "TRUE")
}

impl From<NewsletterNewsItem> for ItemStub {
    fn from(item: NewsletterNewsItem) -> Self {
        let is_published = parse_published(&item.is_published);
        Self {
            id: item.news_article_id,
            article_url: item.article_url,
            publish_date: item.publish_date,
            taxonomies: item.taxonomies,
            teaser_text: item.teaser_text,
            thumbnail_url: item.thumbnail_image_url,
            title: item.title,
            opta_match_id: item.opta_match_id,
            last_update_date: item.last_update_date,
            is_published,
        }
    }
}

impl From<NewsArticleDocument> for ArticleDetail {
    fn from(doc: NewsArticleDocument) -> Self {
        let article = doc.article;
        let is_published = parse_published(&article.is_published);

        let body = article
            .body_text
            .paragraphs
            .into_iter()
            .map(|p| Paragraph {
                text: p.text,
                link: p.anchor.map(|a| Link {
                    href: a.href,
                    text: a.text,
                }),
            })
            .collect();

        Self {
            id: article.news_article_id,
            club_name: doc.club_name,
            club_website_url: doc.club_website_url,
            article_url: article.article_url,
            title: article.title,
            subtitle: article.subtitle,
            body,
            gallery_image_urls: article.gallery_image_urls,
            video_url: article.video_url,
            taxonomies: article.taxonomies,
            teaser_text: article.teaser_text,
            thumbnail_url: article.thumbnail_image_url,
            publish_date: article.publish_date,
            is_published,
        }
    }
}
