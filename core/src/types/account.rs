//! Per-user schemas: profile, quota, visible catalogue, API keys and login.

use serde::{Deserialize, Serialize};

use crate::field::Field;
use crate::record::{impl_record, Overflow};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct UserProfileResponse {
    #[serde(flatten)]
    pub additional_properties: Overflow,
    pub id: String,
    pub email: String,
    pub tier: String,
    pub monthly_quota_usd: f64,
    pub current_usage_usd: f64,
    pub is_free_tier: bool,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub name: Field<Option<String>>,
}

/// Spend against the personal quota and the organisation pool, in USD.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct QuotaStatusResponse {
    #[serde(flatten)]
    pub additional_properties: Overflow,
    pub personal_quota: f64,
    pub personal_used: f64,
    pub personal_remaining: f64,
    pub personal_percentage: i64,
    pub org_quota_available: f64,
    pub org_percentage: i64,
    pub total_available: f64,
}

impl QuotaStatusResponse {
    pub fn is_exhausted(&self) -> bool {
        self.total_available <= 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct ProviderInfo {
    #[serde(flatten)]
    pub additional_properties: Overflow,
    pub id: String,
    pub name: String,
    pub provider_type: String,
    pub has_api_key: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct ModelInfo {
    #[serde(flatten)]
    pub additional_properties: Overflow,
    pub id: String,
    pub name: String,
    pub modality: String,
    pub tier: String,
    pub worker_type: String,
    pub provider: String,
    pub health_status: String,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub last_error: Field<Option<String>>,
}

/// An API key as listed. The secret itself is only returned once, by
/// `CreateApiKeyResponse`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct ApiKeyInfo {
    #[serde(flatten)]
    pub additional_properties: Overflow,
    pub id: String,
    pub name: String,
    pub prefix: String,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub expires_at: Field<Option<String>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub last_used_at: Field<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct CreateApiKeyRequest {
    #[serde(flatten)]
    pub additional_properties: Overflow,
    pub name: String,
    /// Lifetime of the key. Absent means it never expires.
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub expires_in_days: Field<i64>,
}

impl CreateApiKeyRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            additional_properties: Overflow::new(),
            name: name.into(),
            expires_in_days: Field::Absent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct CreateApiKeyResponse {
    #[serde(flatten)]
    pub additional_properties: Overflow,
    pub id: String,
    pub prefix: String,
    pub name: String,
    pub raw_key: String,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub expires_at: Field<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct LoginReq {
    #[serde(flatten)]
    pub additional_properties: Overflow,
    pub email: String,
    pub password: String,
}

impl LoginReq {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            additional_properties: Overflow::new(),
            email: email.into(),
            password: password.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct RegisterReq {
    #[serde(flatten)]
    pub additional_properties: Overflow,
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub name: Field<String>,
}

impl RegisterReq {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            additional_properties: Overflow::new(),
            email: email.into(),
            password: password.into(),
            name: Field::Absent,
        }
    }
}

impl_record!(
    UserProfileResponse,
    QuotaStatusResponse,
    ProviderInfo,
    ModelInfo,
    ApiKeyInfo,
    CreateApiKeyRequest,
    CreateApiKeyResponse,
    LoginReq,
    RegisterReq,
);
