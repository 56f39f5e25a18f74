pub mod article;
pub mod feed;

pub use article::{Article, ArticleDetail, Link, Paragraph};
pub use feed::{FeedListing, ItemStub};
