// In-memory stand-in for the remote profile service.
//
// It answers with the same envelopes the real service uses (the not-found
// sentinel, `data` wrappers, `{ success, error }` ban replies) so the core can
// be exercised end to end without a network.

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::{json, Value};

use crate::core::profiles::profile_models::{unwrap_data, NOT_FOUND_SENTINEL};
use crate::core::profiles::{ApiError, BanOutcome, BanRequest, ProfileApi, UserLookup, UserRecord};

#[derive(Default)]
pub struct InMemoryProfileApi {
    /// userID -> record
    users: DashMap<String, UserRecord>,
    /// hashpuid (or friend code when no hash was given) -> ban entry
    bans: DashMap<String, BanRequest>,
}

impl InMemoryProfileApi {
    pub fn new() -> Self {
        Self::default()
    }

    fn ban_key(data: &BanRequest) -> Option<String> {
        data.hashpuid
            .clone()
            .or_else(|| data.friendcode.clone())
            .filter(|key| !key.is_empty())
    }

    fn bans_where(&self, predicate: impl Fn(&BanRequest) -> bool) -> Value {
        let matches: Vec<Value> = self
            .bans
            .iter()
            .filter(|entry| predicate(entry.value()))
            .map(|entry| json!(entry.value()))
            .collect();
        json!({ "error": false, "result": matches })
    }

    fn store(&self, data: &UserRecord) -> Value {
        self.users.insert(data.user_id.clone(), data.clone());
        json!({ "success": true, "data": data })
    }
}

#[async_trait]
impl ProfileApi for InMemoryProfileApi {
    async fn get_all_users(&self) -> Result<Value, ApiError> {
        Ok(self.bans_where(|_| true))
    }

    async fn get_user_by_id(&self, user_id: u64) -> Result<UserLookup, ApiError> {
        let body = match self.users.get(&user_id.to_string()) {
            Some(record) => json!(record.value()),
            None => json!({ "error": true, "result": NOT_FOUND_SENTINEL }),
        };
        UserLookup::from_response(body)
    }

    async fn create_user_by_id(
        &self,
        data: &UserRecord,
        user_id: u64,
    ) -> Result<UserRecord, ApiError> {
        let record = UserRecord {
            user_id: user_id.to_string(),
            ..data.clone()
        };
        unwrap_data(self.store(&record))
    }

    async fn update_user_by_id(&self, data: &UserRecord) -> Result<UserRecord, ApiError> {
        unwrap_data(self.store(data))
    }

    async fn delete_user_by_id(&self, user_id: u64) -> Result<Value, ApiError> {
        Ok(match self.users.remove(&user_id.to_string()) {
            Some(_) => json!({ "success": true }),
            None => json!({ "error": true, "result": NOT_FOUND_SENTINEL }),
        })
    }

    async fn get_user_by_friend_code(&self, friend_code: &str) -> Result<Value, ApiError> {
        Ok(self.bans_where(|ban| ban.friendcode.as_deref() == Some(friend_code)))
    }

    async fn get_user_by_hash_puid(&self, hash_puid: &str) -> Result<Value, ApiError> {
        Ok(self.bans_where(|ban| ban.hashpuid.as_deref() == Some(hash_puid)))
    }

    async fn ban(&self, data: &BanRequest) -> Result<BanOutcome, ApiError> {
        let Some(key) = Self::ban_key(data) else {
            return Ok(BanOutcome {
                success: false,
                error: Some("A friend code or hashPUID is required".to_string()),
            });
        };

        if self.bans.contains_key(&key) {
            return Ok(BanOutcome {
                success: false,
                error: Some("Player is already banned".to_string()),
            });
        }

        self.bans.insert(key, data.clone());
        Ok(BanOutcome {
            success: true,
            error: None,
        })
    }

    async fn unban(&self, data: &BanRequest) -> Result<Value, ApiError> {
        let removed = Self::ban_key(data)
            .and_then(|key| self.bans.remove(&key))
            .is_some();
        Ok(json!({ "success": removed }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::profiles::ProfileService;

    fn ban_for(hash: &str, code: &str) -> BanRequest {
        BanRequest {
            name: Some("Impostor".to_string()),
            reason: Some("Speed hacks".to_string()),
            friendcode: Some(code.to_string()),
            hashpuid: Some(hash.to_string()),
        }
    }

    #[tokio::test]
    async fn update_is_visible_to_the_next_lookup() {
        let service = ProfileService::new(InMemoryProfileApi::new());

        let created = service.load_or_create(77).await.unwrap();
        assert!(created.admire_opt_in);

        let toggled = service.toggle_admire(&created).await.unwrap();
        assert!(!toggled.admire_opt_in);

        match service.api().get_user_by_id(77).await.unwrap() {
            UserLookup::Found(record) => assert_eq!(record, toggled),
            other => panic!("expected a stored record, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn unknown_user_reports_sentinel() {
        let api = InMemoryProfileApi::new();
        assert_eq!(api.get_user_by_id(1).await.unwrap(), UserLookup::NotFound);
    }

    #[tokio::test]
    async fn delete_removes_the_record() {
        let api = InMemoryProfileApi::new();
        api.create_user_by_id(&UserRecord::new_default(5), 5)
            .await
            .unwrap();

        let reply = api.delete_user_by_id(5).await.unwrap();
        assert_eq!(reply["success"], true);
        assert_eq!(api.get_user_by_id(5).await.unwrap(), UserLookup::NotFound);
    }

    #[tokio::test]
    async fn ban_lifecycle() {
        let api = InMemoryProfileApi::new();

        let outcome = api.ban(&ban_for("hash-1", "red#0001")).await.unwrap();
        assert!(outcome.success);

        let again = api.ban(&ban_for("hash-1", "red#0001")).await.unwrap();
        assert!(!again.success);
        assert!(again.error.is_some());

        let by_code = api.get_user_by_friend_code("red#0001").await.unwrap();
        assert_eq!(by_code["result"].as_array().unwrap().len(), 1);
        let by_hash = api.get_user_by_hash_puid("hash-1").await.unwrap();
        assert_eq!(by_hash["result"][0]["name"], "Impostor");

        let reply = api.unban(&ban_for("hash-1", "red#0001")).await.unwrap();
        assert_eq!(reply["success"], true);
        let all = api.get_all_users().await.unwrap();
        assert!(all["result"].as_array().unwrap().is_empty());
    }
}
