use serde::{Deserialize, Serialize};

/// One parsed news listing: the club header plus the item stubs it
/// enumerates, in document order. Lives for a single sync cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedListing {
    pub club_name: String,
    pub club_website_url: String,
    pub items: Vec<ItemStub>,
}

/// Lightweight reference to an article as listed in the feed. The `id`
/// is the idempotency key for the whole pipeline; dates stay in the
/// feed's own string format until persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStub {
    pub id: String,
    pub article_url: String,
    pub publish_date: String,
    pub taxonomies: String,
    pub teaser_text: String,
    pub thumbnail_url: String,
    pub title: String,
    pub opta_match_id: String,
    pub last_update_date: String,
    pub is_published: bool,
}

impl ItemStub {
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "(Untitled)"
        } else {
            &self.title
        }
    }
}
