//! Provider, model and service catalogue schemas.
//!
//! Records the gateway returns use `Field<Option<T>>` for their optional
//! fields since the gateway writes unset columns as null. Create and update
//! bodies use plain `Field<T>`: a partial update only carries the keys being
//! changed.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::enums::{Modality, PoolType, ServiceType};
use crate::field::Field;
use crate::record::{impl_record, Overflow};

/// A provider as stored, including its API key when the caller may see it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct Provider {
    #[serde(flatten)]
    pub additional_properties: Overflow,
    pub id: String,
    pub name: String,
    pub provider_type: String,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub api_endpoint: Field<Option<String>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub api_version: Field<Option<String>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub api_key: Field<Option<String>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub description: Field<Option<String>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub created_at: Field<Option<i64>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub icon_url: Field<Option<String>>,
}

/// A provider as listed: the key itself is replaced by `has_api_key`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct ProviderResponse {
    #[serde(flatten)]
    pub additional_properties: Overflow,
    pub id: String,
    pub name: String,
    pub provider_type: String,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub api_endpoint: Field<Option<String>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub api_version: Field<Option<String>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub description: Field<Option<String>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub created_at: Field<Option<i64>>,
    pub has_api_key: bool,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub icon_url: Field<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct CreateProvider {
    #[serde(flatten)]
    pub additional_properties: Overflow,
    pub name: String,
    pub provider_type: String,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub api_endpoint: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub api_version: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub api_key: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub description: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub icon_url: Field<String>,
}

impl CreateProvider {
    pub fn new(name: impl Into<String>, provider_type: impl Into<String>) -> Self {
        Self {
            additional_properties: Overflow::new(),
            name: name.into(),
            provider_type: provider_type.into(),
            api_endpoint: Field::Absent,
            api_version: Field::Absent,
            api_key: Field::Absent,
            description: Field::Absent,
            icon_url: Field::Absent,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct UpdateProvider {
    #[serde(flatten)]
    pub additional_properties: Overflow,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub name: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub provider_type: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub api_endpoint: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub api_version: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub api_key: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub description: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub icon_url: Field<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct Model {
    #[serde(flatten)]
    pub additional_properties: Overflow,
    pub id: String,
    pub name: String,
    pub provider: String,
    pub modality: String,
    pub tier: String,
    pub avg_latency_ms: i64,
    pub avg_ttft_ms: i64,
    pub max_tps: i64,
    pub tier_required: String,
    pub worker_type: String,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub description: Field<Option<String>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub cost_per_1k_tokens: Field<Option<f64>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub cost_per_1k_input_tokens: Field<Option<f64>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub cost_per_1k_output_tokens: Field<Option<f64>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub api_endpoint: Field<Option<String>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub api_version: Field<Option<String>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub api_key: Field<Option<String>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub created_at: Field<Option<i64>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub created_by: Field<Option<String>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub user_id: Field<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct CreateModel {
    #[serde(flatten)]
    pub additional_properties: Overflow,
    pub name: String,
    pub provider: String,
    pub modality: String,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub description: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub cost_per_1k_tokens: Field<f64>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub cost_per_1k_input_tokens: Field<f64>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub cost_per_1k_output_tokens: Field<f64>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub tier: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub api_endpoint: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub api_version: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub api_key: Field<String>,
}

impl CreateModel {
    pub fn new(name: impl Into<String>, provider: impl Into<String>, modality: Modality) -> Self {
        Self {
            additional_properties: Overflow::new(),
            name: name.into(),
            provider: provider.into(),
            modality: modality.as_str().to_string(),
            description: Field::Absent,
            cost_per_1k_tokens: Field::Absent,
            cost_per_1k_input_tokens: Field::Absent,
            cost_per_1k_output_tokens: Field::Absent,
            tier: Field::Absent,
            api_endpoint: Field::Absent,
            api_version: Field::Absent,
            api_key: Field::Absent,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct UpdateModel {
    #[serde(flatten)]
    pub additional_properties: Overflow,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub name: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub provider: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub modality: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub description: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub cost_per_1k_tokens: Field<f64>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub cost_per_1k_input_tokens: Field<f64>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub cost_per_1k_output_tokens: Field<f64>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub tier: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub api_endpoint: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub api_version: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub api_key: Field<String>,
}

/// A routed service: either a pool of interchangeable models or an agentic
/// planner with tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct Service {
    #[serde(flatten)]
    pub additional_properties: Overflow,
    pub name: String,
    pub service_type: ServiceType,
    pub strategy: String,
    pub input_modalities: Vec<Modality>,
    pub output_modalities: Vec<Modality>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub description: Field<Option<String>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub guardrails: Field<Option<String>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub created_at: Field<Option<i64>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub pool_type: Field<Option<PoolType>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub planner_model_id: Field<Option<String>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub system_prompt: Field<Option<String>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub max_iterations: Field<Option<i64>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub user_id: Field<Option<String>>,
}

impl Service {
    pub fn is_pool(&self) -> bool {
        self.service_type == ServiceType::Pool
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct CreateService {
    #[serde(flatten)]
    pub additional_properties: Overflow,
    pub name: String,
    pub service_type: String,
    pub guardrails: Vec<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub description: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub strategy: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub planner_model_id: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub system_prompt: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub max_iterations: Field<i64>,
}

impl CreateService {
    pub fn new(name: impl Into<String>, service_type: ServiceType) -> Self {
        Self {
            additional_properties: Overflow::new(),
            name: name.into(),
            service_type: service_type.as_str().to_string(),
            guardrails: Vec::new(),
            description: Field::Absent,
            strategy: Field::Absent,
            planner_model_id: Field::Absent,
            system_prompt: Field::Absent,
            max_iterations: Field::Absent,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct UpdateService {
    #[serde(flatten)]
    pub additional_properties: Overflow,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub service_type: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub description: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub strategy: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub guardrails: Field<Vec<String>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub pool_type: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub planner_model_id: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub system_prompt: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub max_iterations: Field<i64>,
}

/// A model as assigned to a service, with its live health.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct ServiceModelInfo {
    #[serde(flatten)]
    pub additional_properties: Overflow,
    pub model_id: String,
    pub model_name: String,
    pub position: i64,
    pub provider_id: String,
    pub modality: String,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub weight: Field<Option<i64>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub is_healthy: Field<Option<bool>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub health_status: Field<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct ServiceWithModels {
    #[serde(flatten)]
    pub additional_properties: Overflow,
    pub service: Service,
    pub models: Vec<ServiceModelInfo>,
}

impl ServiceWithModels {
    /// Assigned models reported healthy, in position order.
    pub fn healthy_models(&self) -> Vec<&ServiceModelInfo> {
        let mut healthy: Vec<_> = self
            .models
            .iter()
            .filter(|model| model.is_healthy.get() == Some(&Some(true)))
            .collect();
        healthy.sort_by_key(|model| model.position);
        healthy
    }
}

/// Body of `POST /services/{name}/models`.
///
/// The `rtcros_*` fields are the sections of the prompt template applied to
/// this model: role, task, context, reasoning, output and stop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct AssignModel {
    #[serde(flatten)]
    pub additional_properties: Overflow,
    pub model_id: String,
    pub modality: String,
    pub position: i64,
    pub weight: i64,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub rtcros_role: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub rtcros_task: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub rtcros_context: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub rtcros_reasoning: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub rtcros_output: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub rtcros_stop: Field<String>,
}

impl AssignModel {
    pub fn new(model_id: impl Into<String>, modality: Modality, position: i64, weight: i64) -> Self {
        Self {
            additional_properties: Overflow::new(),
            model_id: model_id.into(),
            modality: modality.as_str().to_string(),
            position,
            weight,
            rtcros_role: Field::Absent,
            rtcros_task: Field::Absent,
            rtcros_context: Field::Absent,
            rtcros_reasoning: Field::Absent,
            rtcros_output: Field::Absent,
            rtcros_stop: Field::Absent,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct UpdateModelAssignment {
    #[serde(flatten)]
    pub additional_properties: Overflow,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub position: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub weight: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub rtcros_role: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub rtcros_task: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub rtcros_context: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub rtcros_reasoning: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub rtcros_output: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub rtcros_stop: Field<String>,
}

/// A tool made available to an agentic service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct CreateTool {
    #[serde(flatten)]
    pub additional_properties: Overflow,
    pub name: String,
    pub description: String,
    pub tool_type: String,
    pub target_id: String,
    pub position: i64,
    /// Free-form JSON schema of the tool arguments.
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub parameters_schema: Field<Value>,
}

impl CreateTool {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        tool_type: impl Into<String>,
        target_id: impl Into<String>,
        position: i64,
    ) -> Self {
        Self {
            additional_properties: Overflow::new(),
            name: name.into(),
            description: description.into(),
            tool_type: tool_type.into(),
            target_id: target_id.into(),
            position,
            parameters_schema: Field::Absent,
        }
    }
}

/// A tool as listed for a service. `parameters_schema` is null when the
/// stored schema is missing or not valid JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct ServiceTool {
    #[serde(flatten)]
    pub additional_properties: Overflow,
    pub id: String,
    pub name: String,
    pub description: String,
    pub tool_type: String,
    pub target_id: String,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub parameters_schema: Field<Value>,
    pub position: i64,
}

/// Prompt template sections of one assignment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct RtcrosPrompt {
    #[serde(flatten)]
    pub additional_properties: Overflow,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub role: Field<Option<String>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub task: Field<Option<String>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub context: Field<Option<String>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub reasoning: Field<Option<String>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub output: Field<Option<String>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub stop: Field<Option<String>>,
}

/// One entry of `GET /services/{name}/models`, in position order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct AssignedModel {
    #[serde(flatten)]
    pub additional_properties: Overflow,
    pub model_id: String,
    pub model_name: String,
    pub modality: String,
    pub position: i64,
    pub weight: i64,
    pub is_healthy: bool,
    pub health_status: String,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub last_error: Field<Option<String>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub rtcros: Field<RtcrosPrompt>,
}

/// One entry of `GET /models`. The key is reported masked, never in full.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct ModelListing {
    #[serde(flatten)]
    pub additional_properties: Overflow,
    pub id: String,
    pub name: String,
    pub provider: String,
    pub modality: String,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub description: Field<Option<String>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub api_endpoint: Field<Option<String>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub api_version: Field<Option<String>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub api_key_masked: Field<Option<String>>,
    pub has_api_key: bool,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub created_at: Field<Option<i64>>,
    pub is_healthy: bool,
    pub health_status: String,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub last_error: Field<Option<String>>,
}

/// The whole routing graph in one payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct TopologyResponse {
    #[serde(flatten)]
    pub additional_properties: Overflow,
    pub providers: Vec<ProviderResponse>,
    pub services: Vec<ServiceWithModels>,
    pub models: Vec<Model>,
}

impl TopologyResponse {
    pub fn service(&self, name: &str) -> Option<&ServiceWithModels> {
        self.services.iter().find(|entry| entry.service.name == name)
    }
}

impl_record!(
    Provider,
    ProviderResponse,
    CreateProvider,
    UpdateProvider,
    Model,
    CreateModel,
    UpdateModel,
    Service,
    CreateService,
    UpdateService,
    ServiceModelInfo,
    ServiceWithModels,
    AssignModel,
    UpdateModelAssignment,
    CreateTool,
    ServiceTool,
    RtcrosPrompt,
    AssignedModel,
    ModelListing,
    TopologyResponse,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;
    use serde_json::json;

    fn service_json() -> Value {
        json!({
            "name": "openai-gpt-4",
            "service_type": "Pool",
            "strategy": "LeastLatency",
            "input_modalities": ["Text", "Image"],
            "output_modalities": ["Text"],
            "description": null,
            "pool_type": "MultiModality",
            "created_at": 1714550400
        })
    }

    fn model_json() -> Value {
        json!({
            "id": "gpt-4o",
            "name": "GPT-4o",
            "provider": "openai",
            "modality": "Text",
            "tier": "premium",
            "avg_latency_ms": 420,
            "avg_ttft_ms": 180,
            "max_tps": 90,
            "tier_required": "free",
            "worker_type": "api",
            "cost_per_1k_input_tokens": 0.005,
            "cost_per_1k_output_tokens": 0.015,
            "api_key": null
        })
    }

    #[test]
    fn stale_overflow_key_is_not_written_twice() {
        let mut update = UpdateProvider {
            name: Field::Present("real".to_string()),
            ..Default::default()
        };
        update
            .additional_properties_mut()
            .insert("name".to_string(), json!("stale"));

        assert_eq!(serde_json::to_string(&update).unwrap(), r#"{"name":"real"}"#);
        let nested = serde_json::to_string(&json!({"update": update})).unwrap();
        assert_eq!(nested, r#"{"update":{"name":"real"}}"#);
    }

    #[test]
    fn service_decodes_enums_and_nulls() {
        let service = Service::from_value(service_json()).unwrap();
        assert!(service.is_pool());
        assert_eq!(service.input_modalities, vec![Modality::Text, Modality::Image]);
        assert_eq!(service.pool_type, Field::Present(Some(PoolType::MultiModality)));
        assert!(service.description.is_null());
        assert!(service.system_prompt.is_absent());
        assert_eq!(Value::Object(service.encode().unwrap()), service_json());
    }

    #[test]
    fn unknown_modality_names_the_schema() {
        let mut source = service_json();
        source["output_modalities"] = json!(["Text", "Hologram"]);
        let err = Service::from_value(source).unwrap_err();
        assert_eq!(err.schema(), "Service");
        assert!(err.message().contains("Hologram"), "{err}");
    }

    #[test]
    fn model_round_trip() {
        let model = Model::from_value(model_json()).unwrap();
        assert_eq!(model.cost_per_1k_input_tokens, Field::Present(Some(0.005)));
        assert!(model.cost_per_1k_tokens.is_absent());
        assert!(model.api_key.is_null());
        assert_eq!(Value::Object(model.encode().unwrap()), model_json());
    }

    #[test]
    fn partial_updates_only_carry_changed_keys() {
        let update = UpdateModelAssignment {
            weight: Field::Present(5),
            ..Default::default()
        };
        assert_eq!(Value::Object(update.encode().unwrap()), json!({"weight": 5}));

        let update = UpdateService {
            guardrails: Field::Present(vec!["pii".to_string()]),
            max_iterations: Field::Present(3),
            ..Default::default()
        };
        assert_eq!(
            Value::Object(update.encode().unwrap()),
            json!({"guardrails": ["pii"], "max_iterations": 3})
        );
        assert!(UpdateProvider::default().encode().unwrap().is_empty());
    }

    #[test]
    fn create_bodies_from_constructors() {
        let provider = CreateProvider {
            api_key: Field::Present("sk-test".to_string()),
            ..CreateProvider::new("OpenAI", "openai")
        };
        assert_eq!(
            Value::Object(provider.encode().unwrap()),
            json!({"name": "OpenAI", "provider_type": "openai", "api_key": "sk-test"})
        );

        let model = CreateModel::new("gpt-4o", "openai", Modality::Text);
        assert_eq!(model.encode().unwrap()["modality"], json!("Text"));

        let service = CreateService::new("agent", ServiceType::Agentic);
        assert_eq!(
            Value::Object(service.encode().unwrap()),
            json!({"name": "agent", "service_type": "Agentic", "guardrails": []})
        );

        let assign = AssignModel {
            rtcros_role: Field::Present("You are terse.".to_string()),
            ..AssignModel::new("gpt-4o", Modality::Text, 0, 10)
        };
        assert_eq!(
            Value::Object(assign.encode().unwrap()),
            json!({"model_id": "gpt-4o", "modality": "Text", "position": 0, "weight": 10, "rtcros_role": "You are terse."})
        );
    }

    #[test]
    fn tool_schema_is_free_form() {
        let tool = CreateTool {
            parameters_schema: Field::Present(json!({"type": "object", "properties": {"q": {"type": "string"}}})),
            ..CreateTool::new("search", "web search", "service", "search-svc", 1)
        };
        let decoded = CreateTool::decode(tool.encode().unwrap()).unwrap();
        assert_eq!(decoded, tool);
        assert!(CreateTool::new("a", "b", "c", "d", 0).encode().unwrap().get("parameters_schema").is_none());
    }

    #[test]
    fn topology_nests_every_group() {
        let topology = TopologyResponse::from_value(json!({
            "providers": [{"id": "p1", "name": "OpenAI", "provider_type": "openai", "has_api_key": true}],
            "services": [{
                "service": service_json(),
                "models": [
                    {"model_id": "b", "model_name": "B", "position": 2, "provider_id": "p1", "modality": "Text", "is_healthy": true},
                    {"model_id": "a", "model_name": "A", "position": 1, "provider_id": "p1", "modality": "Text", "is_healthy": true},
                    {"model_id": "c", "model_name": "C", "position": 0, "provider_id": "p1", "modality": "Text", "is_healthy": false}
                ]
            }],
            "models": [model_json()]
        }))
        .unwrap();
        assert!(topology.providers[0].has_api_key);
        let pool = topology.service("openai-gpt-4").unwrap();
        let healthy: Vec<_> = pool.healthy_models().iter().map(|m| m.model_id.as_str()).collect();
        assert_eq!(healthy, vec!["a", "b"]);
        assert!(topology.service("missing").is_none());
        assert_eq!(topology.models[0].max_tps, 90);
    }
}
