use async_trait::async_trait;
use serde_json::Value;

use super::profile_models::{ApiError, BanOutcome, BanRequest, UserLookup, UserRecord};

/// Every call the bot makes against the remote profile / anti-cheat service.
///
/// Each method maps to exactly one HTTP request. Implementations must not retry,
/// batch or cache; the remote service owns the data.
#[async_trait]
pub trait ProfileApi: Send + Sync {
    /// `GET /eac/` with only the token.
    async fn get_all_users(&self) -> Result<Value, ApiError>;

    /// `GET /userInfo?uID=..`
    async fn get_user_by_id(&self, user_id: u64) -> Result<UserLookup, ApiError>;

    /// `POST /userInfo/{id}`, returns the created record from `data`.
    async fn create_user_by_id(
        &self,
        data: &UserRecord,
        user_id: u64,
    ) -> Result<UserRecord, ApiError>;

    /// `POST /userInfo`, returns the stored record from `data`.
    async fn update_user_by_id(&self, data: &UserRecord) -> Result<UserRecord, ApiError>;

    /// `DELETE /userInfo/{id}`
    async fn delete_user_by_id(&self, user_id: u64) -> Result<Value, ApiError>;

    /// `GET /eac/?friendcode=..`
    async fn get_user_by_friend_code(&self, friend_code: &str) -> Result<Value, ApiError>;

    /// `GET /eac/?hashPUID=..`
    async fn get_user_by_hash_puid(&self, hash_puid: &str) -> Result<Value, ApiError>;

    /// `POST /eac/ban`
    async fn ban(&self, data: &BanRequest) -> Result<BanOutcome, ApiError>;

    /// `DELETE /eac/ban`
    async fn unban(&self, data: &BanRequest) -> Result<Value, ApiError>;
}
