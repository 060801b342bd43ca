use crate::domain::model::ReservationRequest;
use crate::utils::error::Result;
use async_trait::async_trait;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Client-local key-value storage holding serialized strings, like a
/// browser's `localStorage`.
pub trait Storage: Send + Sync {
    fn get_item(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>>> + Send;
    fn set_item(
        &self,
        key: &str,
        value: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn start_hour(&self) -> u32;
    fn end_hour(&self) -> u32;
    fn phone_min_digits(&self) -> usize;
    fn phone_max_digits(&self) -> usize;
    fn submission_endpoint(&self) -> &str;
    fn storage_entry(&self) -> &str;

    fn submission_timeout_seconds(&self) -> u64 {
        DEFAULT_TIMEOUT_SECONDS
    }
}

#[async_trait]
pub trait Submitter: Send + Sync {
    /// POSTs the request and returns the decoded JSON response body.
    async fn submit(&self, request: &ReservationRequest) -> Result<serde_json::Value>;
}
