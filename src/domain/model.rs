use crate::utils::error::{ConsoleError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// One entry of the registry's `/services` list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// Normalized base URL of a resolved service, without trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEndpoint {
    base_url: String,
}

impl ResolvedEndpoint {
    pub fn new(url: &str) -> Self {
        Self {
            base_url: url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins a path (expected to start with `/`) onto the base URL.
    pub fn join(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(ResolvedEndpoint),
    NotFound,
}

impl Resolution {
    pub fn endpoint(&self) -> Option<&ResolvedEndpoint> {
        match self {
            Resolution::Found(endpoint) => Some(endpoint),
            Resolution::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found(_))
    }

    /// Empty string when the service is unknown.
    pub fn into_url(self) -> String {
        match self {
            Resolution::Found(endpoint) => endpoint.base_url,
            Resolution::NotFound => String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: i64,
    pub username: String,
    #[serde(default, deserialize_with = "optional_scalar_string")]
    pub telegram_chat_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceAssignment {
    pub device_id: String,
    #[serde(default, deserialize_with = "scalar_string_or_default")]
    pub device_label: String,
}

/// Strings pass through, numbers and booleans are stringified, anything else
/// (null, arrays, objects) counts as absent.
fn scalar_to_string(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn optional_scalar_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(scalar_to_string)
}

fn scalar_string_or_default<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    optional_scalar_string(deserializer).map(Option::unwrap_or_default)
}

/// Device as listed by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub device_id: String,
    pub device_label: String,
}

/// User identifier accepted by the user catalogue.
///
/// Strings are coerced the way an integer cast would: optional sign and the
/// leading digits are taken, anything else yields 0. Out-of-range values
/// saturate at `i64::MAX` / `i64::MIN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl UserId {
    pub fn value(self) -> i64 {
        self.0
    }

    fn coerce(raw: &str) -> i64 {
        let trimmed = raw.trim_start();
        let (negative, digits) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };
        let end = digits
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(digits.len());
        let digits = &digits[..end];
        if digits.is_empty() {
            return 0;
        }

        // only digits remain, so a parse failure means overflow
        let signed = if negative {
            format!("-{}", digits)
        } else {
            digits.to_string()
        };
        signed.parse::<i64>().unwrap_or(if negative { i64::MIN } else { i64::MAX })
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        UserId(value)
    }
}

impl From<i32> for UserId {
    fn from(value: i32) -> Self {
        UserId(i64::from(value))
    }
}

impl From<u32> for UserId {
    fn from(value: u32) -> Self {
        UserId(i64::from(value))
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        UserId(Self::coerce(value))
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        UserId::from(value.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            other => Err(ConsoleError::UnsupportedMethod {
                method: other.to_string(),
            }),
        }
    }
}

/// Decoded downstream reply together with its HTTP status.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

impl ApiResponse {
    pub fn new(status: u16, body: serde_json::Value) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Keeps a 2xx reply, turns anything else into a `Status` error carrying
    /// the downstream `message` field when there is one.
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            return Ok(self);
        }
        let message = self
            .body
            .get("message")
            .and_then(|v| v.as_str())
            .unwrap_or("request failed")
            .to_string();
        Err(ConsoleError::Status {
            status: self.status,
            message,
        })
    }

    pub fn into_success(self) -> Result<serde_json::Value> {
        self.error_for_status().map(|response| response.body)
    }

    /// Decodes the array stored under `key`. A missing or non-array field
    /// yields an empty list; entries that do not decode as `T` are skipped.
    pub fn list_field<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let Some(items) = self.body.get(key).and_then(|v| v.as_array()) else {
            return Vec::new();
        };

        items
            .iter()
            .filter_map(|item| match serde_json::from_value::<T>(item.clone()) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!("Skipping malformed '{}' entry: {}", key, e);
                    None
                }
            })
            .collect()
    }
}
