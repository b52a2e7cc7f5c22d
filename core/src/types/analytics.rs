//! Analytics schemas.

use serde::{Deserialize, Serialize};

use crate::field::Field;
use crate::record::{impl_record, Overflow};

/// One routed request as recorded by the gateway.
///
/// Token counts and cost stay null for requests that failed before a model
/// answered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct RequestLog {
    #[serde(flatten)]
    pub additional_properties: Overflow,
    pub id: String,
    pub service_name: String,
    pub model_id: String,
    pub provider_type: String,
    pub latency_ms: i64,
    pub status: String,
    pub created_at: String,
    pub failover_count: i64,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub tokens_prompt: Field<Option<i64>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub tokens_completion: Field<Option<i64>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub tokens_total: Field<Option<i64>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub cost_usd: Field<Option<f64>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub error_message: Field<Option<String>>,
}

impl RequestLog {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// One bucket of the request time series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct TimeSeriesPoint {
    #[serde(flatten)]
    pub additional_properties: Overflow,
    pub timestamp: String,
    pub request_count: i64,
    pub error_count: i64,
    pub avg_latency_ms: f64,
    pub total_cost_usd: f64,
    pub total_tokens: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct TopModel {
    #[serde(flatten)]
    pub additional_properties: Overflow,
    pub model_id: String,
    pub model_name: String,
    pub request_count: i64,
    pub total_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct AnalyticsSummary {
    #[serde(flatten)]
    pub additional_properties: Overflow,
    pub total_requests: i64,
    pub successful_requests: i64,
    pub failed_requests: i64,
    pub total_cost_usd: f64,
    pub total_tokens: i64,
    pub avg_latency_ms: f64,
}

impl AnalyticsSummary {
    /// Fraction of successful requests, `None` before the first request.
    pub fn success_rate(&self) -> Option<f64> {
        (self.total_requests > 0).then(|| self.successful_requests as f64 / self.total_requests as f64)
    }
}

impl_record!(RequestLog, TimeSeriesPoint, TopModel, AnalyticsSummary);
