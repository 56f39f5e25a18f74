//! Fetching and parsing of the club's news feed documents.

mod schema;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::app::{Result, TouchlineError};
use crate::client::Client;
use crate::domain::{ArticleDetail, FeedListing, ItemStub};

/// Retrieve and parse the top-level listing. Any failure here aborts
/// the whole sync cycle; there is no retry at this layer.
pub async fn fetch_listing(
    client: &dyn Client,
    token: &CancellationToken,
    url: &str,
) -> Result<FeedListing> {
    let body = client.get(token, url).await?;
    debug!(url, bytes = body.len(), "fetched news listing");
    parse_listing(&body)
}

/// Parse a `NewListInformation` document into the club header and its
/// ordered item stubs.
pub fn parse_listing(body: &[u8]) -> Result<FeedListing> {
    let text = std::str::from_utf8(body).map_err(|e| TouchlineError::Parse(e.to_string()))?;
    let doc: schema::NewsListDocument =
        quick_xml::de::from_str(text).map_err(|e| TouchlineError::Parse(e.to_string()))?;

    Ok(FeedListing {
        club_name: doc.club_name,
        club_website_url: doc.club_website_url,
        items: doc.items.items.into_iter().map(ItemStub::from).collect(),
    })
}

/// Parse a `NewsArticleInformation` document into a full article.
pub fn parse_detail(body: &[u8]) -> Result<ArticleDetail> {
    let text = std::str::from_utf8(body).map_err(|e| TouchlineError::Parse(e.to_string()))?;
    let doc: schema::NewsArticleDocument =
        quick_xml::de::from_str(text).map_err(|e| TouchlineError::Parse(e.to_string()))?;

    Ok(ArticleDetail::from(doc))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING_SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<NewListInformation>
  <ClubName>Brentford</ClubName>
  <ClubWebsiteURL>https://www.brentfordfc.com</ClubWebsiteURL>
  <NewsletterNewsItems>
    <NewsletterNewsItem>
      <ArticleURL>https://www.brentfordfc.com/news/2022/june/fourth-highest-league-finish/</ArticleURL>
      <NewsArticleID>641745</NewsArticleID>
      <PublishDate>2022-06-15 08:00:00</PublishDate>
      <Taxonomies>History</Taxonomies>
      <TeaserText></TeaserText>
      <ThumbnailImageURL>https://www.brentfordfc.com/api/image/feedassets/thumb.jpg</ThumbnailImageURL>
      <Title>2021/22 - Brentford's fourth-highest league finish</Title>
      <OptaMatchId></OptaMatchId>
      <LastUpdateDate>2022-06-15 08:00:21</LastUpdateDate>
      <IsPublished>True</IsPublished>
    </NewsletterNewsItem>
    <NewsletterNewsItem>
      <ArticleURL>https://www.brentfordfc.com/news/2022/june/season-ticket-update/</ArticleURL>
      <NewsArticleID>641838</NewsArticleID>
      <PublishDate>2022-06-16 09:30:00</PublishDate>
      <Taxonomies>Ticket News</Taxonomies>
      <TeaserText>Season tickets on sale now</TeaserText>
      <ThumbnailImageURL/>
      <Title>Season ticket update</Title>
      <OptaMatchId/>
      <LastUpdateDate>2022-06-16 09:31:02</LastUpdateDate>
      <IsPublished>False</IsPublished>
    </NewsletterNewsItem>
  </NewsletterNewsItems>
</NewListInformation>"#;

    const DETAIL_SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<NewsArticleInformation>
  <ClubName>Brentford</ClubName>
  <ClubWebsiteURL>https://www.brentfordfc.com</ClubWebsiteURL>
  <NewsArticle>
    <ArticleURL>https://www.brentfordfc.com/news/2022/june/fourth-highest-league-finish/</ArticleURL>
    <NewsArticleID>641745</NewsArticleID>
    <PublishDate>2022-06-15 08:00:00</PublishDate>
    <Taxonomies>History</Taxonomies>
    <TeaserText/>
    <Subtitle>A season in review</Subtitle>
    <ThumbnailImageURL/>
    <Title>2021/22 - Brentford's fourth-highest league finish</Title>
    <BodyText>
      <p>The Bees finished 13th in their first Premier League season.</p>
      <p><a href="https://www.brentfordfc.com/tickets">Renew your season ticket</a></p>
    </BodyText>
    <GalleryImageURLs/>
    <VideoURL>https://www.brentfordfc.com/video/review</VideoURL>
    <OptaMatchId/>
    <LastUpdateDate>2022-06-15 08:00:21</LastUpdateDate>
    <IsPublished>True</IsPublished>
  </NewsArticle>
</NewsArticleInformation>"#;

    #[test]
    fn test_parse_listing() {
        let listing = parse_listing(LISTING_SAMPLE.as_bytes()).unwrap();

        assert_eq!(listing.club_name, "Brentford");
        assert_eq!(listing.club_website_url, "https://www.brentfordfc.com");
        assert_eq!(listing.items.len(), 2);

        let first = &listing.items[0];
        assert_eq!(first.id, "641745");
        assert_eq!(first.taxonomies, "History");
        assert_eq!(first.publish_date, "2022-06-15 08:00:00");
        assert!(first.is_published);

        let second = &listing.items[1];
        assert_eq!(second.id, "641838");
        assert_eq!(second.teaser_text, "Season tickets on sale now");
        assert!(!second.is_published);
    }

    #[test]
    fn test_parse_listing_preserves_order() {
        let listing = parse_listing(LISTING_SAMPLE.as_bytes()).unwrap();
        let ids: Vec<&str> = listing.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["641745", "641838"]);
    }

    #[test]
    fn test_parse_listing_malformed() {
        let err = parse_listing(b"<>").unwrap_err();
        assert!(matches!(err, TouchlineError::Parse(_)));
    }

    #[test]
    fn test_parse_listing_empty_items() {
        let body = r#"<NewListInformation>
  <ClubName>Brentford</ClubName>
  <ClubWebsiteURL>https://www.brentfordfc.com</ClubWebsiteURL>
</NewListInformation>"#;
        let listing = parse_listing(body.as_bytes()).unwrap();
        assert!(listing.items.is_empty());
    }

    #[test]
    fn test_parse_detail() {
        let detail = parse_detail(DETAIL_SAMPLE.as_bytes()).unwrap();

        assert_eq!(detail.id, "641745");
        assert_eq!(detail.club_name, "Brentford");
        assert_eq!(detail.subtitle, "A season in review");
        assert_eq!(detail.video_url, "https://www.brentfordfc.com/video/review");
        assert!(detail.is_published);

        assert_eq!(detail.body.len(), 2);
        assert_eq!(
            detail.body[0].text,
            "The Bees finished 13th in their first Premier League season."
        );
        let link = detail.body[1].link.as_ref().unwrap();
        assert_eq!(link.href, "https://www.brentfordfc.com/tickets");
        assert_eq!(link.text, "Renew your season ticket");
    }

    #[test]
    fn test_parse_detail_malformed() {
        let err = parse_detail(b"not xml at all").unwrap_err();
        assert!(matches!(err, TouchlineError::Parse(_)));
    }

    #[test]
    fn test_parse_detail_invalid_utf8() {
        let err = parse_detail(&[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(matches!(err, TouchlineError::Parse(_)));
    }
}
