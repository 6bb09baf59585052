use async_trait::async_trait;

use super::error::Result;
use super::response::RestResponse;

/// Issues GET requests against the Reddit API on behalf of the paginators.
///
/// `path` is relative to the API root (e.g. `/r/rust/hot`) and `query` holds
/// the already-encoded-by-name parameters. Implementations must hand back a
/// fully read [`RestResponse`].
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<RestResponse>;
}
