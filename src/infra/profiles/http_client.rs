use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::Serialize;
use serde_json::Value;

use crate::core::profiles::profile_models::unwrap_data;
use crate::core::profiles::{ApiError, BanOutcome, BanRequest, ProfileApi, UserLookup, UserRecord};

/// Where the profile service lives and how to authenticate against it.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub token: String,
}

/// HTTP implementation of `ProfileApi`. One request per call, no retries.
pub struct ProfileApiClient {
    client: Client,
    base_url: String,
    token: String,
}

impl ProfileApiClient {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        // Validate once up front so a typo in the env fails at startup.
        Url::parse(&config.base_url).map_err(|e| ApiError::InvalidUrl(e.to_string()))?;

        let client = Client::builder()
            .user_agent("ProfileBot/1.0")
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| ApiError::InvalidUrl(e.to_string()))
    }

    /// Request with the token and any identifying parameters in the query string.
    fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<RequestBuilder, ApiError> {
        let url = self.endpoint(path)?;
        Ok(self
            .client
            .request(method, url)
            .query(&[("token", self.token.as_str())])
            .query(query))
    }

    /// Same as `request`, with `body` sent as JSON.
    fn json_request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<RequestBuilder, ApiError> {
        Ok(self.request(method, path, &[])?.json(body))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status();

        tracing::debug!(
            url = %response.url().path(),
            status = status.as_u16(),
            "Profile API responded"
        );

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl ProfileApi for ProfileApiClient {
    async fn get_all_users(&self) -> Result<Value, ApiError> {
        self.send(self.request(Method::GET, "/eac/", &[])?).await
    }

    async fn get_user_by_id(&self, user_id: u64) -> Result<UserLookup, ApiError> {
        let id = user_id.to_string();
        let body = self
            .send(self.request(Method::GET, "/userInfo", &[("uID", &id)])?)
            .await?;
        UserLookup::from_response(body)
    }

    async fn create_user_by_id(
        &self,
        data: &UserRecord,
        user_id: u64,
    ) -> Result<UserRecord, ApiError> {
        let path = format!("/userInfo/{}", user_id);
        let body = self
            .send(self.json_request(Method::POST, &path, data)?)
            .await?;
        unwrap_data(body)
    }

    async fn update_user_by_id(&self, data: &UserRecord) -> Result<UserRecord, ApiError> {
        let body = self
            .send(self.json_request(Method::POST, "/userInfo", data)?)
            .await?;
        unwrap_data(body)
    }

    async fn delete_user_by_id(&self, user_id: u64) -> Result<Value, ApiError> {
        let path = format!("/userInfo/{}", user_id);
        self.send(self.request(Method::DELETE, &path, &[])?).await
    }

    async fn get_user_by_friend_code(&self, friend_code: &str) -> Result<Value, ApiError> {
        self.send(self.request(Method::GET, "/eac/", &[("friendcode", friend_code)])?)
            .await
    }

    async fn get_user_by_hash_puid(&self, hash_puid: &str) -> Result<Value, ApiError> {
        self.send(self.request(Method::GET, "/eac/", &[("hashPUID", hash_puid)])?)
            .await
    }

    async fn ban(&self, data: &BanRequest) -> Result<BanOutcome, ApiError> {
        let body = self
            .send(self.json_request(Method::POST, "/eac/ban", data)?)
            .await?;
        Ok(serde_json::from_value(body)?)
    }

    async fn unban(&self, data: &BanRequest) -> Result<Value, ApiError> {
        self.send(self.json_request(Method::DELETE, "/eac/ban", data)?)
            .await
    }
}
