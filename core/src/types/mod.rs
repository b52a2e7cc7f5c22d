//! Wire schemas of the gateway API.
//!
//! # Design
//! One struct per schema. Required fields are plain types, optional fields
//! are `Field<T>` (or `Field<Option<T>>` where the gateway may send an
//! explicit null) and every struct carries the unknown keys it received in
//! `additional_properties`. That field is declared first so named fields
//! win when both carry the same key; see `record` for the codec.

mod account;
mod analytics;
mod catalog;
mod chat;
mod enums;

pub use account::{
    ApiKeyInfo, CreateApiKeyRequest, CreateApiKeyResponse, LoginReq, ModelInfo, ProviderInfo,
    QuotaStatusResponse, RegisterReq, UserProfileResponse,
};
pub use analytics::{AnalyticsSummary, RequestLog, TimeSeriesPoint, TopModel};
pub use catalog::{
    AssignModel, AssignedModel, CreateModel, CreateProvider, CreateService, CreateTool, Model,
    ModelListing, Provider, ProviderResponse, RtcrosPrompt, Service, ServiceModelInfo, ServiceTool,
    ServiceWithModels, TopologyResponse, UpdateModel, UpdateModelAssignment, UpdateProvider,
    UpdateService,
};
pub use chat::{
    ActualRouting, ChatChoice, ChatMessage, ChatParams, RequestedRouting, ResponseFormat, RoutingMetadata,
    TokenUsage, UnifiedChatRequest, UnifiedChatResponse,
};
pub use enums::{Modality, PoolType, RoutingStrategy, ServiceType};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;
    use serde_json::{json, Value};

    /// Decode `source` plus one unknown key, then check that encoding gives
    /// the same object back and that decoding the encoding gives the same
    /// record, through both `Record` and plain serde.
    fn assert_round_trip<R: Record + PartialEq + std::fmt::Debug>(mut source: Value) {
        source
            .as_object_mut()
            .unwrap()
            .insert("x_extra".to_string(), json!({"kept": [1, 2.5, null]}));

        let record = R::from_value(source.clone()).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(record.additional_keys(), vec!["x_extra"], "{}", R::SCHEMA);

        let encoded = record.encode().unwrap();
        assert_eq!(Value::Object(encoded.clone()), source, "{}", R::SCHEMA);
        assert_eq!(R::decode(encoded).unwrap(), record, "{}", R::SCHEMA);

        let bytes = serde_json::to_vec(&record).unwrap();
        assert_eq!(serde_json::from_slice::<R>(&bytes).unwrap(), record, "{}", R::SCHEMA);
    }

    /// Add `extra` to a copy of `base`.
    fn with(base: &Value, extra: Value) -> Value {
        let mut merged = base.clone();
        let object = merged.as_object_mut().unwrap();
        for (key, value) in extra.as_object().unwrap() {
            object.insert(key.clone(), value.clone());
        }
        merged
    }

    macro_rules! round_trips {
        ($($name:ident: $ty:ty => [$($form:expr),+ $(,)?];)+) => {
            $(
                #[test]
                fn $name() {
                    $(assert_round_trip::<$ty>($form);)+
                }
            )+
        };
    }

    fn profile() -> Value {
        json!({"id": "u1", "email": "ada@example.com", "tier": "free", "monthly_quota_usd": 5.5,
               "current_usage_usd": 0.25, "is_free_tier": true})
    }

    fn model_info_min() -> Value {
        json!({"id": "m1", "name": "GPT-4o", "modality": "Text", "tier": "standard", "worker_type": "api",
               "provider": "openai", "health_status": "healthy"})
    }

    fn api_key_min() -> Value {
        json!({"id": "k1", "name": "ci", "prefix": "mawi_ab", "created_at": "2024-01-01T00:00:00Z"})
    }

    fn api_key_created() -> Value {
        json!({"id": "k1", "prefix": "mawi_ab", "name": "ci", "raw_key": "mawi_abcdef",
               "created_at": "2024-01-01T00:00:00Z"})
    }

    fn request_log_min() -> Value {
        json!({"id": "l1", "service_name": "svc", "model_id": "gpt-4o", "provider_type": "openai",
               "latency_ms": 120, "status": "success", "created_at": "2024-01-01T00:00:00Z", "failover_count": 0})
    }

    fn provider() -> Value {
        json!({"id": "p1", "name": "OpenAI", "provider_type": "openai"})
    }

    fn provider_optionals() -> Value {
        json!({"api_endpoint": "https://api.openai.com", "api_version": "v1", "description": "hosted",
               "created_at": 1700000000, "icon_url": "https://cdn/openai.png"})
    }

    fn provider_nulls() -> Value {
        json!({"api_endpoint": null, "api_version": null, "description": null, "created_at": null, "icon_url": null})
    }

    fn public_provider() -> Value {
        with(&provider(), json!({"has_api_key": true}))
    }

    fn model() -> Value {
        json!({"id": "gpt-4o", "name": "GPT-4o", "provider": "p1", "modality": "Text", "tier": "standard",
               "avg_latency_ms": 420, "avg_ttft_ms": 180, "max_tps": 90, "tier_required": "free",
               "worker_type": "api"})
    }

    fn model_optionals() -> Value {
        json!({"description": "flagship", "cost_per_1k_tokens": 0.005, "cost_per_1k_input_tokens": 0.0025,
               "cost_per_1k_output_tokens": 0.01, "api_endpoint": "https://api.openai.com", "api_version": "v1",
               "api_key": "sk-1", "created_at": 1700000000, "created_by": "admin", "user_id": "u1"})
    }

    fn model_edits() -> Value {
        json!({"name": "claude", "provider": "p2", "modality": "Text", "description": "fast",
               "cost_per_1k_tokens": 0.002, "cost_per_1k_input_tokens": 0.001, "cost_per_1k_output_tokens": 0.004,
               "tier": "premium", "api_endpoint": "https://api.anthropic.com", "api_version": "2023-06-01",
               "api_key": "sk-2"})
    }

    fn service() -> Value {
        json!({"name": "pool", "service_type": "Pool", "strategy": "Health", "input_modalities": ["Text"],
               "output_modalities": ["Text", "Image"]})
    }

    fn service_full() -> Value {
        with(
            &service(),
            json!({"description": "main pool", "guardrails": "pii", "created_at": 1700000000,
                   "pool_type": "MultiModality", "planner_model_id": "gpt-4o", "system_prompt": "be brief",
                   "max_iterations": 4, "user_id": "u1"}),
        )
    }

    fn service_model() -> Value {
        json!({"model_id": "gpt-4o", "model_name": "GPT-4o", "position": 0, "provider_id": "p1", "modality": "Text"})
    }

    fn service_model_full() -> Value {
        with(&service_model(), json!({"weight": 3, "is_healthy": true, "health_status": "healthy"}))
    }

    fn rtcros() -> Value {
        json!({"rtcros_role": "editor", "rtcros_task": "summarise", "rtcros_context": "news",
               "rtcros_reasoning": "short", "rtcros_output": "bullets", "rtcros_stop": "END"})
    }

    fn tool() -> Value {
        json!({"name": "search", "description": "web search", "tool_type": "service", "target_id": "pool",
               "position": 0})
    }

    fn listing() -> Value {
        json!({"id": "gpt-4o", "name": "GPT-4o", "provider": "p1", "modality": "Text", "has_api_key": false,
               "is_healthy": true, "health_status": "healthy"})
    }

    fn assigned() -> Value {
        json!({"model_id": "gpt-4o", "model_name": "GPT-4o", "modality": "Text", "position": 0, "weight": 1,
               "is_healthy": false, "health_status": "warning"})
    }

    fn listed_tool() -> Value {
        with(&tool(), json!({"id": "t1"}))
    }

    fn message() -> Value {
        json!({"role": "user", "content": "hi"})
    }

    fn completion() -> Value {
        json!({"id": "c1", "object": "chat.completion", "created": 1700000000, "model": "gpt-4o",
               "choices": [{"index": 0, "message": {"role": "assistant", "content": "hello"}}]})
    }

    fn routing() -> Value {
        json!({
            "requested_routing": {"service": "pool", "model_override": "gpt-4o", "routing_strategy": "LeastCost"},
            "actual_routing": {"provider": "openai", "model": "gpt-4o", "fallback_used": true}
        })
    }

    round_trips! {
        user_profile_response: UserProfileResponse => [
            profile(),
            with(&profile(), json!({"name": "Ada"})),
            with(&profile(), json!({"name": null})),
        ];
        quota_status_response: QuotaStatusResponse => [
            json!({"personal_quota": 5.5, "personal_used": 1.25, "personal_remaining": 4.25, "personal_percentage": 22,
                   "org_quota_available": 0.5, "org_percentage": 0, "total_available": 4.75}),
        ];
        provider_info: ProviderInfo => [
            json!({"id": "p1", "name": "OpenAI", "provider_type": "openai", "has_api_key": false}),
        ];
        model_info: ModelInfo => [
            model_info_min(),
            with(&model_info_min(), json!({"last_error": "timeout"})),
            with(&model_info_min(), json!({"last_error": null})),
        ];
        api_key_info: ApiKeyInfo => [
            api_key_min(),
            with(&api_key_min(), json!({"expires_at": "2025-01-01T00:00:00Z", "last_used_at": "2024-06-01T00:00:00Z"})),
            with(&api_key_min(), json!({"expires_at": null, "last_used_at": null})),
        ];
        create_api_key_request: CreateApiKeyRequest => [
            json!({"name": "ci"}),
            json!({"name": "ci", "expires_in_days": 30}),
        ];
        create_api_key_response: CreateApiKeyResponse => [
            api_key_created(),
            with(&api_key_created(), json!({"expires_at": "2025-01-01T00:00:00Z"})),
            with(&api_key_created(), json!({"expires_at": null})),
        ];
        login_req: LoginReq => [
            json!({"email": "ada@example.com", "password": "pw"}),
        ];
        register_req: RegisterReq => [
            json!({"email": "ada@example.com", "password": "pw"}),
            json!({"email": "ada@example.com", "password": "pw", "name": "Ada"}),
        ];
        request_log: RequestLog => [
            request_log_min(),
            with(&request_log_min(), json!({"tokens_prompt": 3, "tokens_completion": 5, "tokens_total": 8,
                                         "cost_usd": 0.0021, "error_message": "upstream timeout"})),
            with(&request_log_min(), json!({"tokens_prompt": null, "tokens_completion": null, "tokens_total": null,
                                         "cost_usd": null, "error_message": null})),
        ];
        time_series_point: TimeSeriesPoint => [
            json!({"timestamp": "2024-01-01T00:00:00Z", "request_count": 4, "error_count": 1,
                   "avg_latency_ms": 120.5, "total_cost_usd": 0.75, "total_tokens": 900}),
        ];
        top_model: TopModel => [
            json!({"model_id": "gpt-4o", "model_name": "GPT-4o", "request_count": 4, "total_cost": 1.5}),
        ];
        analytics_summary: AnalyticsSummary => [
            json!({"total_requests": 4, "successful_requests": 3, "failed_requests": 1, "total_cost_usd": 2.5,
                   "total_tokens": 900, "avg_latency_ms": 310.5}),
        ];
        provider_record: Provider => [
            provider(),
            with(&with(&provider(), provider_optionals()), json!({"api_key": "sk-1"})),
            with(&with(&provider(), provider_nulls()), json!({"api_key": null})),
        ];
        provider_response: ProviderResponse => [
            public_provider(),
            with(&public_provider(), provider_optionals()),
            with(&public_provider(), provider_nulls()),
        ];
        create_provider: CreateProvider => [
            json!({"name": "OpenAI", "provider_type": "openai"}),
            json!({"name": "OpenAI", "provider_type": "openai", "api_endpoint": "https://api.openai.com",
                   "api_version": "v1", "api_key": "sk-1", "description": "hosted", "icon_url": "https://cdn/o.png"}),
        ];
        update_provider: UpdateProvider => [
            json!({}),
            json!({"name": "OpenAI", "provider_type": "openai", "api_endpoint": "https://api.openai.com",
                   "api_version": "v1", "api_key": "sk-1", "description": "hosted", "icon_url": "https://cdn/o.png"}),
        ];
        model_record: Model => [
            model(),
            with(&model(), model_optionals()),
        ];
        create_model: CreateModel => [
            json!({"name": "claude", "provider": "p2", "modality": "Text"}),
            model_edits(),
        ];
        update_model: UpdateModel => [
            json!({}),
            model_edits(),
        ];
        service_record: Service => [
            service(),
            service_full(),
            with(&service(), json!({"description": null, "guardrails": null, "created_at": null, "pool_type": null,
                                     "planner_model_id": null, "system_prompt": null, "max_iterations": null,
                                     "user_id": null})),
        ];
        create_service: CreateService => [
            json!({"name": "agent", "service_type": "Agentic", "guardrails": []}),
            json!({"name": "agent", "service_type": "Agentic", "guardrails": ["pii", "toxicity"],
                   "description": "planner", "strategy": "Health", "planner_model_id": "gpt-4o",
                   "system_prompt": "plan first", "max_iterations": 6}),
        ];
        update_service: UpdateService => [
            json!({}),
            json!({"service_type": "Pool", "description": "d", "strategy": "LeastCost", "guardrails": ["pii"],
                   "pool_type": "SingleModality", "planner_model_id": "gpt-4o", "system_prompt": "s",
                   "max_iterations": 2}),
        ];
        service_model_info: ServiceModelInfo => [
            service_model(),
            service_model_full(),
            with(&service_model(), json!({"weight": null, "is_healthy": null, "health_status": null})),
        ];
        service_with_models: ServiceWithModels => [
            json!({"service": service(), "models": []}),
            json!({"service": service_full(), "models": [service_model_full(), service_model()]}),
        ];
        assign_model: AssignModel => [
            json!({"model_id": "gpt-4o", "modality": "Text", "position": 1, "weight": 2}),
            with(&json!({"model_id": "gpt-4o", "modality": "Text", "position": 1, "weight": 2}), rtcros()),
        ];
        update_model_assignment: UpdateModelAssignment => [
            json!({}),
            with(&json!({"position": 2, "weight": 5}), rtcros()),
        ];
        create_tool: CreateTool => [
            tool(),
            with(&tool(), json!({"parameters_schema": {"type": "object", "properties": {"q": {"type": "string"}}}})),
            with(&tool(), json!({"parameters_schema": null})),
        ];
        service_tool: ServiceTool => [
            listed_tool(),
            with(&listed_tool(), json!({"parameters_schema": {"type": "object"}})),
            with(&listed_tool(), json!({"parameters_schema": null})),
        ];
        rtcros_prompt: RtcrosPrompt => [
            json!({}),
            json!({"role": "editor", "task": "summarise", "context": "news", "reasoning": "short",
                   "output": "bullets", "stop": "END"}),
            json!({"role": null, "task": null, "context": null, "reasoning": null, "output": null, "stop": null}),
        ];
        assigned_model: AssignedModel => [
            assigned(),
            with(&assigned(), json!({"last_error": "429 Rate Limited",
                                      "rtcros": {"role": "editor", "task": null, "stop": "END"}})),
            with(&assigned(), json!({"last_error": null, "rtcros": {}})),
        ];
        model_listing: ModelListing => [
            listing(),
            with(&listing(), json!({"description": "flagship", "api_endpoint": "https://api.openai.com",
                                     "api_version": "v1", "api_key_masked": "sk-...abcd",
                                     "created_at": 1700000000, "last_error": "timeout"})),
            with(&listing(), json!({"description": null, "api_endpoint": null, "api_version": null,
                                     "api_key_masked": null, "created_at": null, "last_error": null})),
        ];
        topology_response: TopologyResponse => [
            json!({"providers": [], "services": [], "models": []}),
            json!({"providers": [public_provider()],
                   "services": [{"service": service(), "models": [service_model()]}],
                   "models": [model()]}),
        ];
        chat_message: ChatMessage => [
            message(),
        ];
        chat_params: ChatParams => [
            json!({}),
            json!({"temperature": 0.5, "max_tokens": 256}),
        ];
        response_format: ResponseFormat => [
            json!({"type": "json_object"}),
        ];
        unified_chat_request: UnifiedChatRequest => [
            json!({"service": "pool", "messages": [message()]}),
            json!({"service": "pool", "messages": [message()], "params": {"temperature": 0.5, "max_tokens": 256},
                   "stream": false, "model": "gpt-4o", "routing_strategy": "WeightedRandom",
                   "response_format": {"type": "text"}}),
        ];
        chat_choice: ChatChoice => [
            json!({"index": 0, "message": message()}),
            json!({"index": 0, "message": message(), "finish_reason": "stop"}),
            json!({"index": 0, "message": message(), "finish_reason": null}),
        ];
        token_usage: TokenUsage => [
            json!({"prompt_tokens": 3, "completion_tokens": 5, "total_tokens": 8}),
        ];
        requested_routing: RequestedRouting => [
            json!({"service": "pool"}),
            routing()["requested_routing"].clone(),
            json!({"service": "pool", "model_override": null, "routing_strategy": null}),
        ];
        actual_routing: ActualRouting => [
            routing()["actual_routing"].clone(),
        ];
        routing_metadata: RoutingMetadata => [
            routing(),
        ];
        unified_chat_response: UnifiedChatResponse => [
            completion(),
            with(&completion(), json!({"usage": {"prompt_tokens": 3, "completion_tokens": 5, "total_tokens": 8},
                                        "routing_metadata": routing()})),
        ];
    }
}
