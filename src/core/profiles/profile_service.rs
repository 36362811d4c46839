// Orchestration over the profile API.
//
// Like the rest of `core`, nothing in here knows about Discord. Commands hand
// in plain user ids and get plain records back.

use thiserror::Error;

use super::profile_api::ProfileApi;
use super::profile_models::{ApiError, UserLookup, UserRecord};

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Profile service reported an error: {0}")]
    Remote(String),
}

pub struct ProfileService<A: ProfileApi> {
    api: A,
}

impl<A: ProfileApi> ProfileService<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// Raw access for the developer commands, which map 1:1 onto API calls.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Fetch a user's record, creating a default one when the service has none.
    pub async fn load_or_create(&self, user_id: u64) -> Result<UserRecord, ProfileError> {
        match self.api.get_user_by_id(user_id).await? {
            UserLookup::Found(record) => Ok(record),
            UserLookup::NotFound => {
                tracing::info!(user_id, "No profile on record, creating one");
                let record = self
                    .api
                    .create_user_by_id(&UserRecord::new_default(user_id), user_id)
                    .await?;
                Ok(record)
            }
            UserLookup::Failed(message) => Err(ProfileError::Remote(message)),
        }
    }

    /// Flip `admireOptIn` and persist it. Returns what the service stored.
    pub async fn toggle_admire(&self, current: &UserRecord) -> Result<UserRecord, ProfileError> {
        let updated = UserRecord {
            admire_opt_in: !current.admire_opt_in,
            ..current.clone()
        };
        let stored = self.api.update_user_by_id(&updated).await?;
        tracing::debug!(
            user_id = %stored.user_id,
            admire_opt_in = stored.admire_opt_in,
            "Admire opt-in toggled"
        );
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::profiles::profile_models::{BanOutcome, BanRequest};
    use async_trait::async_trait;
    use serde_json::Value;
    use std::sync::Mutex;

    /// Answers lookups with a fixed response and records create/update calls.
    struct ScriptedApi {
        lookup: UserLookup,
        creates: Mutex<Vec<(UserRecord, u64)>>,
        updates: Mutex<Vec<UserRecord>>,
    }

    impl ScriptedApi {
        fn answering(lookup: UserLookup) -> Self {
            Self {
                lookup,
                creates: Mutex::new(Vec::new()),
                updates: Mutex::new(Vec::new()),
            }
        }
    }

    fn unused() -> ApiError {
        ApiError::InvalidUrl("scripted api does not serve this call".to_string())
    }

    #[async_trait]
    impl ProfileApi for ScriptedApi {
        async fn get_all_users(&self) -> Result<Value, ApiError> {
            Err(unused())
        }

        async fn get_user_by_id(&self, _: u64) -> Result<UserLookup, ApiError> {
            Ok(self.lookup.clone())
        }

        async fn create_user_by_id(
            &self,
            data: &UserRecord,
            user_id: u64,
        ) -> Result<UserRecord, ApiError> {
            self.creates.lock().unwrap().push((data.clone(), user_id));
            Ok(UserRecord {
                friendcode: Some("created".to_string()),
                ..data.clone()
            })
        }

        async fn update_user_by_id(&self, data: &UserRecord) -> Result<UserRecord, ApiError> {
            self.updates.lock().unwrap().push(data.clone());
            Ok(data.clone())
        }

        async fn delete_user_by_id(&self, _: u64) -> Result<Value, ApiError> {
            Err(unused())
        }

        async fn get_user_by_friend_code(&self, _: &str) -> Result<Value, ApiError> {
            Err(unused())
        }

        async fn get_user_by_hash_puid(&self, _: &str) -> Result<Value, ApiError> {
            Err(unused())
        }

        async fn ban(&self, _: &BanRequest) -> Result<BanOutcome, ApiError> {
            Err(unused())
        }

        async fn unban(&self, _: &BanRequest) -> Result<Value, ApiError> {
            Err(unused())
        }
    }

    #[tokio::test]
    async fn not_found_creates_exactly_once_and_uses_created_record() {
        let service = ProfileService::new(ScriptedApi::answering(UserLookup::NotFound));

        let record = service.load_or_create(555).await.unwrap();

        let creates = service.api().creates.lock().unwrap().clone();
        assert_eq!(creates.len(), 1);
        assert_eq!(creates[0].0, UserRecord::new_default(555));
        assert_eq!(creates[0].1, 555);
        assert!(creates[0].0.admire_opt_in);
        // The created record (not the not-found payload) is what comes back.
        assert_eq!(record.friendcode.as_deref(), Some("created"));
    }

    #[tokio::test]
    async fn found_record_is_returned_without_create() {
        let existing = UserRecord {
            user_id: "9".to_string(),
            friendcode: None,
            admire_opt_in: false,
        };
        let service = ProfileService::new(ScriptedApi::answering(UserLookup::Found(
            existing.clone(),
        )));

        assert_eq!(service.load_or_create(9).await.unwrap(), existing);
        assert!(service.api().creates.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn remote_failure_is_reported() {
        let service = ProfileService::new(ScriptedApi::answering(UserLookup::Failed(
            "Invalid token".to_string(),
        )));

        let err = service.load_or_create(1).await.unwrap_err();
        assert!(matches!(err, ProfileError::Remote(ref m) if m == "Invalid token"));
        assert!(service.api().creates.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn toggle_sends_flipped_flag() {
        let service = ProfileService::new(ScriptedApi::answering(UserLookup::NotFound));
        let current = UserRecord::new_default(3);

        let stored = service.toggle_admire(&current).await.unwrap();

        assert!(!stored.admire_opt_in);
        let updates = service.api().updates.lock().unwrap().clone();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].user_id, "3");
        assert!(!updates[0].admire_opt_in);
    }
}
