// Domain models for the remote profile / anti-cheat API.
//
// The remote service answers with loosely shaped JSON: an `error` flag that is
// sometimes present, a `result` field that is either a status string or the
// payload itself, and booleans stored as 0/1. Everything here turns those
// envelopes into explicit Rust types so the renderer never has to guess.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Literal the remote service puts in `result` when a user id is unknown.
pub const NOT_FOUND_SENTINEL: &str = "No user found with that ID";

/// A user's profile as stored by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "userID", with = "snowflake")]
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friendcode: Option<String>,
    #[serde(rename = "admireOptIn", default, with = "opt_in_flag")]
    pub admire_opt_in: bool,
}

impl UserRecord {
    /// Record sent when a profile is created for the first time.
    pub fn new_default(user_id: u64) -> Self {
        Self {
            user_id: user_id.to_string(),
            friendcode: None,
            admire_opt_in: true,
        }
    }

    /// Friend code with empty strings treated as unset.
    pub fn friend_code(&self) -> Option<&str> {
        self.friendcode.as_deref().filter(|code| !code.trim().is_empty())
    }
}

/// Tagged result of a user lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserLookup {
    Found(UserRecord),
    NotFound,
    Failed(String),
}

impl UserLookup {
    /// Classify a raw `GET /userInfo` body.
    ///
    /// The not-found sentinel wins over the error flag, since the service sets
    /// both on a miss in some versions.
    pub fn from_response(body: Value) -> Result<Self, ApiError> {
        if body.get("result").and_then(Value::as_str) == Some(NOT_FOUND_SENTINEL) {
            return Ok(UserLookup::NotFound);
        }

        if body.get("error").is_some_and(is_truthy) {
            let message = body
                .get("result")
                .and_then(Value::as_str)
                .or_else(|| body.get("message").and_then(Value::as_str))
                .unwrap_or("Unknown error")
                .to_string();
            return Ok(UserLookup::Failed(message));
        }

        let wrapped = body.get("result").filter(|inner| inner.is_object()).cloned();
        let record = serde_json::from_value(wrapped.unwrap_or(body))?;
        Ok(UserLookup::Found(record))
    }
}

/// Pull the `data` member out of a create/update envelope.
pub fn unwrap_data(body: Value) -> Result<UserRecord, ApiError> {
    match body {
        Value::Object(mut map) => match map.remove("data") {
            Some(data) if !data.is_null() => Ok(serde_json::from_value(data)?),
            _ => Err(ApiError::MissingData),
        },
        _ => Err(ApiError::MissingData),
    }
}

/// Payload for the ban and unban endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BanRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friendcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hashpuid: Option<String>,
}

/// Reply of `POST /eac/ban`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BanOutcome {
    #[serde(default)]
    pub success: bool,
    #[serde(default, deserialize_with = "loose_message")]
    pub error: Option<String>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Profile API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Could not decode profile API response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Profile API response had no data field")]
    MissingData,

    #[error("Invalid profile API url: {0}")]
    InvalidUrl(String),
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

// `error` is a string on failure, but some deployments send `false` on success.
fn loose_message<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(other) if is_truthy(&other) => Some(other.to_string()),
        _ => None,
    })
}

mod opt_in_flag {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Wire {
        Bool(bool),
        Int(i64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(match Option::<Wire>::deserialize(deserializer)? {
            Some(Wire::Bool(b)) => b,
            Some(Wire::Int(n)) => n != 0,
            Some(Wire::Text(s)) => matches!(s.as_str(), "1" | "true"),
            None => false,
        })
    }
}

mod snowflake {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Wire {
        Text(String),
        Int(u64),
    }

    pub fn serialize<S: Serializer>(value: &str, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(match Wire::deserialize(deserializer)? {
            Wire::Text(s) => s,
            Wire::Int(n) => n.to_string(),
        })
    }
}
