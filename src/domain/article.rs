use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fully fetched article as parsed from the per-item detail document.
/// Consumed immediately by the persist stage; the structured body is
/// flattened to an opaque JSON string on conversion to [`Article`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleDetail {
    pub id: String,
    pub club_name: String,
    pub club_website_url: String,
    pub article_url: String,
    pub title: String,
    pub subtitle: String,
    pub body: Vec<Paragraph>,
    pub gallery_image_urls: String,
    pub video_url: String,
    pub taxonomies: String,
    pub teaser_text: String,
    pub thumbnail_url: String,
    pub publish_date: String,
    pub is_published: bool,
}

/// One body paragraph, possibly carrying a hyperlink.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<Link>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
    pub text: String,
}

impl ArticleDetail {
    /// Convert into the persisted record, stamping the creation time.
    /// A body that fails to serialize is stored as an empty string.
    pub fn into_article(self) -> Article {
        let body_text = serde_json::to_string(&self.body).unwrap_or_default();

        Article {
            id: self.id,
            club_name: self.club_name,
            club_website_url: self.club_website_url,
            article_url: self.article_url,
            title: self.title,
            subtitle: self.subtitle,
            body_text,
            gallery_image_urls: self.gallery_image_urls,
            video_url: self.video_url,
            taxonomies: self.taxonomies,
            teaser_text: self.teaser_text,
            thumbnail_url: self.thumbnail_url,
            publish_date: self.publish_date,
            is_published: self.is_published,
            created_at: Utc::now(),
        }
    }
}

/// The persisted article record. At most one exists per `id`; records
/// are created once and never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
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
    pub thumbnail_url: String,
    pub publish_date: String,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail() -> ArticleDetail {
        ArticleDetail {
            id: "641745".into(),
            club_name: "Brentford".into(),
            club_website_url: "https://www.brentfordfc.com".into(),
            article_url: "https://www.brentfordfc.com/news/example".into(),
            title: "Fourth-highest league finish".into(),
            subtitle: "A season in review".into(),
            body: vec![
                Paragraph {
                    text: "A memorable campaign.".into(),
                    link: None,
                },
                Paragraph {
                    text: "Full table:".into(),
                    link: Some(Link {
                        href: "https://example.com/table".into(),
                        text: "league table".into(),
                    }),
                },
            ],
            gallery_image_urls: String::new(),
            video_url: String::new(),
            taxonomies: "History".into(),
            teaser_text: String::new(),
            thumbnail_url: String::new(),
            publish_date: "2022-06-15 08:00:00".into(),
            is_published: true,
        }
    }

    #[test]
    fn test_into_article_serializes_body() {
        let article = detail().into_article();

        assert_eq!(article.id, "641745");
        let body: Vec<Paragraph> = serde_json::from_str(&article.body_text).unwrap();
        assert_eq!(body.len(), 2);
        assert_eq!(body[1].link.as_ref().unwrap().text, "league table");
    }

    #[test]
    fn test_into_article_empty_body() {
        let mut d = detail();
        d.body.clear();
        let article = d.into_article();
        assert_eq!(article.body_text, "[]");
    }

    #[test]
    fn test_paragraph_without_link_omits_field() {
        let p = Paragraph {
            text: "plain".into(),
            link: None,
        };
        let json = serde_json::to_string(&p).unwrap();
        assert!(!json.contains("link"));
    }
}
