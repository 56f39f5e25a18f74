pub mod memory;
pub mod sqlite;

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::Article;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Storage contract for persisted articles. `find_by_id` returns
/// [`TouchlineError::NotFound`](crate::app::TouchlineError::NotFound)
/// when no record exists, the only lookup outcome that authorizes an
/// insert.
#[async_trait]
pub trait Store: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Article>;
    async fn save(&self, article: &Article) -> Result<()>;
    async fn list(&self) -> Result<Vec<Article>>;
}
