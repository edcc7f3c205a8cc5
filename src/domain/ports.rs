use crate::domain::model::NormalizedRecord;
use crate::utils::error::Result;
use async_trait::async_trait;

/// The remote tabular store, reduced to its only observable contract:
/// one insert call per record, success or error.
#[async_trait]
pub trait SongSink: Send + Sync {
    async fn insert(&self, table: &str, record: &NormalizedRecord) -> Result<()>;
}
