//! In-memory mock of the MaWi gateway API, mounted under `/v1`.
//!
//! Routing is trivial: a chat completion is answered by the first model
//! assigned to the service and echoes the last message back. Every
//! completion is recorded and feeds the analytics endpoints. Only the
//! chat endpoint checks for an `Authorization` header; `/auth/me` resolves
//! the `session_token` cookie handed out by login and registration.

use std::{
    collections::BTreeMap,
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Provider {
    pub id: String,
    pub name: String,
    pub provider_type: String,
    pub api_endpoint: Option<String>,
    pub api_version: Option<String>,
    pub api_key: Option<String>,
    pub description: Option<String>,
    pub created_at: Option<i64>,
    pub icon_url: Option<String>,
}

impl Provider {
    /// Listing view: the key is replaced by `has_api_key`.
    fn public(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "provider_type": self.provider_type,
            "api_endpoint": self.api_endpoint,
            "api_version": self.api_version,
            "description": self.description,
            "created_at": self.created_at,
            "has_api_key": self.api_key.as_deref().is_some_and(|key| !key.is_empty()),
            "icon_url": self.icon_url,
        })
    }
}

#[derive(Deserialize)]
pub struct CreateProvider {
    pub name: String,
    pub provider_type: String,
    pub api_endpoint: Option<String>,
    pub api_version: Option<String>,
    pub api_key: Option<String>,
    pub description: Option<String>,
    pub icon_url: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateProvider {
    pub name: Option<String>,
    pub provider_type: Option<String>,
    pub api_endpoint: Option<String>,
    pub api_version: Option<String>,
    pub api_key: Option<String>,
    pub description: Option<String>,
    pub icon_url: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Model {
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
    pub description: Option<String>,
    pub cost_per_1k_tokens: Option<f64>,
    pub cost_per_1k_input_tokens: Option<f64>,
    pub cost_per_1k_output_tokens: Option<f64>,
    pub api_endpoint: Option<String>,
    pub api_version: Option<String>,
    pub api_key: Option<String>,
    pub created_at: Option<i64>,
}

#[derive(Deserialize)]
pub struct CreateModel {
    pub name: String,
    pub provider: String,
    pub modality: String,
    pub description: Option<String>,
    pub cost_per_1k_tokens: Option<f64>,
    pub cost_per_1k_input_tokens: Option<f64>,
    pub cost_per_1k_output_tokens: Option<f64>,
    pub tier: Option<String>,
    pub api_endpoint: Option<String>,
    pub api_version: Option<String>,
    pub api_key: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateModel {
    pub name: Option<String>,
    pub description: Option<String>,
    pub cost_per_1k_tokens: Option<f64>,
    pub tier: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    pub service_type: String,
    pub strategy: String,
    pub input_modalities: Vec<String>,
    pub output_modalities: Vec<String>,
    pub description: Option<String>,
    pub guardrails: Option<String>,
    pub pool_type: Option<String>,
    pub max_iterations: Option<i64>,
    pub created_at: Option<i64>,
}

#[derive(Deserialize)]
pub struct CreateService {
    pub name: String,
    pub service_type: String,
    #[serde(default)]
    pub guardrails: Vec<String>,
    pub description: Option<String>,
    pub strategy: Option<String>,
    pub max_iterations: Option<i64>,
}

#[derive(Deserialize)]
pub struct UpdateService {
    pub description: Option<String>,
    pub strategy: Option<String>,
    pub guardrails: Option<Vec<String>>,
    pub pool_type: Option<String>,
    pub max_iterations: Option<i64>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Assignment {
    pub model_id: String,
    pub modality: String,
    pub position: i64,
    pub weight: i64,
    #[serde(default)]
    pub rtcros_role: Option<String>,
    #[serde(default)]
    pub rtcros_task: Option<String>,
    #[serde(default)]
    pub rtcros_context: Option<String>,
    #[serde(default)]
    pub rtcros_reasoning: Option<String>,
    #[serde(default)]
    pub rtcros_output: Option<String>,
    #[serde(default)]
    pub rtcros_stop: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateAssignment {
    pub position: Option<i64>,
    pub weight: Option<i64>,
}

#[derive(Deserialize)]
pub struct CreateTool {
    pub name: String,
    pub description: String,
    pub tool_type: String,
    pub target_id: String,
    pub position: i64,
    pub parameters_schema: Option<Value>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tool {
    pub id: String,
    pub name: String,
    pub description: String,
    pub tool_type: String,
    pub target_id: String,
    pub parameters_schema: Option<Value>,
    pub position: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RequestLog {
    pub id: String,
    pub service_name: String,
    pub model_id: String,
    pub provider_type: String,
    pub latency_ms: i64,
    pub status: String,
    pub created_at: String,
    pub failover_count: i64,
    pub tokens_prompt: Option<i64>,
    pub tokens_completion: Option<i64>,
    pub tokens_total: Option<i64>,
    pub cost_usd: Option<f64>,
    pub error_message: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiKey {
    pub id: String,
    pub name: String,
    pub prefix: String,
    pub created_at: String,
    pub expires_at: Option<String>,
    pub last_used_at: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateApiKey {
    pub name: String,
    pub expires_in_days: Option<i64>,
}

#[derive(Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
}

#[derive(Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Deserialize)]
pub struct ChatRequest {
    pub service: String,
    pub messages: Vec<ChatMessage>,
    pub model: Option<String>,
    pub routing_strategy: Option<String>,
}

#[derive(Deserialize)]
pub struct LimitParams {
    pub limit: Option<usize>,
}

#[derive(Deserialize)]
pub struct RangeParams {
    pub range: Option<String>,
}

/// Everything the mock gateway knows.
#[derive(Debug, Default)]
pub struct Gateway {
    pub providers: BTreeMap<String, Provider>,
    pub models: BTreeMap<String, Model>,
    pub services: BTreeMap<String, Service>,
    pub assignments: BTreeMap<String, Vec<Assignment>>,
    pub tools: BTreeMap<String, Vec<Tool>>,
    pub logs: Vec<RequestLog>,
    pub api_keys: Vec<ApiKey>,
    /// Session token to the user object it was issued for.
    pub sessions: BTreeMap<String, Value>,
}

impl Gateway {
    /// One provider, one text model and the `openai-gpt-4` pool serving it.
    pub fn seeded() -> Self {
        let mut gateway = Gateway::default();
        gateway.providers.insert(
            "p-openai".to_string(),
            Provider {
                id: "p-openai".to_string(),
                name: "OpenAI".to_string(),
                provider_type: "openai".to_string(),
                api_endpoint: Some("https://api.openai.com/v1".to_string()),
                api_version: None,
                api_key: Some("sk-mock".to_string()),
                description: None,
                created_at: Some(1_714_550_400),
                icon_url: None,
            },
        );
        gateway.models.insert(
            "gpt-4o".to_string(),
            Model {
                id: "gpt-4o".to_string(),
                name: "GPT-4o".to_string(),
                provider: "p-openai".to_string(),
                modality: "Text".to_string(),
                tier: "premium".to_string(),
                avg_latency_ms: 420,
                avg_ttft_ms: 180,
                max_tps: 90,
                tier_required: "free".to_string(),
                worker_type: "api".to_string(),
                description: None,
                cost_per_1k_tokens: None,
                cost_per_1k_input_tokens: Some(0.005),
                cost_per_1k_output_tokens: Some(0.015),
                api_endpoint: None,
                api_version: None,
                api_key: None,
                created_at: Some(1_714_550_400),
            },
        );
        gateway.services.insert(
            "openai-gpt-4".to_string(),
            Service {
                name: "openai-gpt-4".to_string(),
                service_type: "Pool".to_string(),
                strategy: "LeastLatency".to_string(),
                input_modalities: vec!["Text".to_string()],
                output_modalities: vec!["Text".to_string()],
                description: Some("General purpose chat".to_string()),
                guardrails: None,
                pool_type: Some("SingleModality".to_string()),
                max_iterations: None,
                created_at: Some(1_714_550_400),
            },
        );
        gateway.assignments.insert(
            "openai-gpt-4".to_string(),
            vec![Assignment {
                model_id: "gpt-4o".to_string(),
                modality: "Text".to_string(),
                position: 0,
                weight: 1,
                ..Assignment::default()
            }],
        );
        gateway
    }

    fn service_models(&self, name: &str) -> Vec<Value> {
        let mut assigned = self.assignments.get(name).cloned().unwrap_or_default();
        assigned.sort_by_key(|a| a.position);
        assigned
            .iter()
            .map(|a| {
                let model = self.models.get(&a.model_id);
                json!({
                    "model_id": a.model_id,
                    "model_name": model.map(|m| m.name.clone()).unwrap_or_else(|| a.model_id.clone()),
                    "position": a.position,
                    "provider_id": model.map(|m| m.provider.clone()).unwrap_or_default(),
                    "modality": a.modality,
                    "weight": a.weight,
                    "is_healthy": model.is_some(),
                    "health_status": if model.is_some() { "healthy" } else { "unknown" },
                })
            })
            .collect()
    }

    /// The `GET /services/{name}/models` view: weights, prompt sections and
    /// health, in position order.
    fn assigned_models(&self, name: &str) -> Vec<Value> {
        let mut assigned = self.assignments.get(name).cloned().unwrap_or_default();
        assigned.sort_by_key(|a| a.position);
        assigned
            .iter()
            .filter_map(|a| {
                let model = self.models.get(&a.model_id)?;
                Some(json!({
                    "model_id": a.model_id,
                    "model_name": model.name,
                    "modality": a.modality,
                    "position": a.position,
                    "weight": a.weight,
                    "is_healthy": true,
                    "health_status": "healthy",
                    "last_error": null,
                    "rtcros": {
                        "role": a.rtcros_role,
                        "task": a.rtcros_task,
                        "context": a.rtcros_context,
                        "reasoning": a.rtcros_reasoning,
                        "output": a.rtcros_output,
                        "stop": a.rtcros_stop,
                    },
                }))
            })
            .collect()
    }
}

impl Model {
    /// Listing view: only the last four characters of the key are shown.
    fn listing(&self) -> Value {
        let masked = self
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .map(|key| {
                let tail = key.char_indices().rev().nth(3).map_or(key, |(at, _)| &key[at..]);
                format!("****{tail}")
            });
        json!({
            "id": self.id,
            "name": self.name,
            "provider": self.provider,
            "modality": self.modality,
            "description": self.description,
            "api_endpoint": self.api_endpoint,
            "api_version": self.api_version,
            "api_key_masked": masked,
            "has_api_key": masked.is_some(),
            "created_at": self.created_at,
            "is_healthy": true,
            "health_status": "healthy",
            "last_error": null,
        })
    }
}

pub type Db = Arc<RwLock<Gateway>>;

pub fn app() -> Router {
    app_with(Gateway::seeded())
}

pub fn app_with(gateway: Gateway) -> Router {
    let db: Db = Arc::new(RwLock::new(gateway));
    let v1 = Router::new()
        .route("/chat/completions", post(chat_completions))
        .route("/analytics/requests", get(list_request_logs))
        .route("/analytics/time-series", get(time_series))
        .route("/analytics/summary", get(summary))
        .route("/analytics/top-models", get(top_models))
        .route("/services", get(list_services).post(create_service))
        .route(
            "/services/{name}",
            get(get_service).put(update_service).delete(delete_service),
        )
        .route("/services/{name}/models", get(list_assigned_models).post(assign_model))
        .route(
            "/services/{name}/models/{model_id}",
            put(update_assignment).delete(remove_assignment),
        )
        .route("/services/{name}/tools", get(list_tools).post(add_tool))
        .route("/services/{name}/tools/{tool_id}", delete(delete_tool))
        .route("/providers", get(list_providers).post(create_provider))
        .route(
            "/providers/{id}",
            get(get_provider).put(update_provider).delete(delete_provider),
        )
        .route("/models", get(list_models).post(create_model))
        .route("/models/{id}", get(get_model).put(update_model).delete(delete_model))
        .route("/topology", get(topology))
        .route("/user/me", get(user_profile))
        .route("/user/quota", get(user_quota))
        .route("/user/providers", get(user_providers))
        .route("/user/models", get(user_models))
        .route("/user/api-keys", get(list_api_keys).post(create_api_key))
        .route("/user/api-keys/{id}", delete(revoke_api_key))
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(current_session))
        .with_state(db);
    Router::new().nest("/v1", v1)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}

/// The gateway answers errors with a bare JSON string.
fn message(status: StatusCode, text: impl Into<String>) -> Response {
    (status, Json(Value::String(text.into()))).into_response()
}

fn not_found(what: &str, key: &str) -> Response {
    message(StatusCode::NOT_FOUND, format!("{what} not found: {key}"))
}

fn service_json(service: &Service) -> Value {
    serde_json::to_value(service).unwrap_or(Value::Null)
}

// --- chat ---

async fn chat_completions(State(db): State<Db>, headers: HeaderMap, Json(input): Json<ChatRequest>) -> Response {
    if !headers.contains_key(header::AUTHORIZATION) {
        return message(StatusCode::UNAUTHORIZED, "Missing API key");
    }
    let mut gateway = db.write().await;
    let routed = match &input.model {
        Some(model) => gateway.models.get(model).cloned(),
        None => gateway
            .service_models(&input.service)
            .first()
            .and_then(|m| m["model_id"].as_str().map(str::to_string))
            .and_then(|id| gateway.models.get(&id).cloned()),
    };
    let model = match (gateway.services.contains_key(&input.service), routed) {
        (true, Some(model)) => model,
        (false, _) => return message(StatusCode::INTERNAL_SERVER_ERROR, format!("Service not found: {}", input.service)),
        (true, None) => return message(StatusCode::INTERNAL_SERVER_ERROR, "No healthy model available"),
    };
    let provider_type = gateway
        .providers
        .get(&model.provider)
        .map(|p| p.provider_type.clone())
        .unwrap_or_else(|| model.provider.clone());

    let prompt = input.messages.last().map(|m| m.content.as_str()).unwrap_or_default();
    let prompt_tokens = input.messages.iter().map(|m| m.content.split_whitespace().count() as i64).sum::<i64>();
    let completion_tokens = prompt.split_whitespace().count() as i64 + 1;
    let total_tokens = prompt_tokens + completion_tokens;
    let cost = total_tokens as f64 / 1000.0 * model.cost_per_1k_input_tokens.unwrap_or(0.0);

    let id = format!("chatcmpl-{}", Uuid::new_v4().simple());
    gateway.logs.push(RequestLog {
        id: id.clone(),
        service_name: input.service.clone(),
        model_id: model.id.clone(),
        provider_type: provider_type.clone(),
        latency_ms: model.avg_latency_ms,
        status: "success".to_string(),
        created_at: now().to_string(),
        failover_count: 0,
        tokens_prompt: Some(prompt_tokens),
        tokens_completion: Some(completion_tokens),
        tokens_total: Some(total_tokens),
        cost_usd: Some(cost),
        error_message: None,
    });
    tracing::debug!(service = %input.service, model = %model.id, "completion routed");

    let roles: Vec<&str> = input.messages.iter().map(|m| m.role.as_str()).collect();
    let body = json!({
        "id": id,
        "object": "chat.completion",
        "created": now(),
        "model": model.id,
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": format!("echo: {prompt}")},
            "finish_reason": "stop",
        }],
        "usage": {
            "prompt_tokens": prompt_tokens,
            "completion_tokens": completion_tokens,
            "total_tokens": total_tokens,
        },
        "routing_metadata": {
            "requested_routing": {
                "service": input.service,
                "model_override": input.model,
                "routing_strategy": input.routing_strategy,
            },
            "actual_routing": {"provider": provider_type, "model": model.id, "fallback_used": false},
        },
        "x_roles": roles,
    });
    Json(body).into_response()
}

// --- analytics ---

async fn list_request_logs(State(db): State<Db>, Query(params): Query<LimitParams>) -> Json<Vec<RequestLog>> {
    let gateway = db.read().await;
    let limit = params.limit.unwrap_or(50);
    Json(gateway.logs.iter().rev().take(limit).cloned().collect())
}

async fn time_series(State(db): State<Db>, Query(params): Query<RangeParams>) -> Json<Vec<Value>> {
    let gateway = db.read().await;
    if gateway.logs.is_empty() {
        return Json(Vec::new());
    }
    let count = gateway.logs.len() as i64;
    let errors = gateway.logs.iter().filter(|l| l.status != "success").count() as i64;
    let latency = gateway.logs.iter().map(|l| l.latency_ms as f64).sum::<f64>() / count as f64;
    Json(vec![json!({
        "timestamp": now().to_string(),
        "request_count": count,
        "error_count": errors,
        "avg_latency_ms": latency,
        "total_cost_usd": gateway.logs.iter().filter_map(|l| l.cost_usd).sum::<f64>(),
        "total_tokens": gateway.logs.iter().filter_map(|l| l.tokens_total).sum::<i64>(),
        "range": params.range.unwrap_or_else(|| "24h".to_string()),
    })])
}

async fn summary(State(db): State<Db>) -> Json<Value> {
    let gateway = db.read().await;
    let total = gateway.logs.len() as i64;
    let ok = gateway.logs.iter().filter(|l| l.status == "success").count() as i64;
    let latency = if total == 0 {
        0.0
    } else {
        gateway.logs.iter().map(|l| l.latency_ms as f64).sum::<f64>() / total as f64
    };
    Json(json!({
        "total_requests": total,
        "successful_requests": ok,
        "failed_requests": total - ok,
        "total_cost_usd": gateway.logs.iter().filter_map(|l| l.cost_usd).sum::<f64>(),
        "total_tokens": gateway.logs.iter().filter_map(|l| l.tokens_total).sum::<i64>(),
        "avg_latency_ms": latency,
    }))
}

async fn top_models(State(db): State<Db>) -> Json<Vec<Value>> {
    let gateway = db.read().await;
    let mut counts: BTreeMap<&str, (i64, f64)> = BTreeMap::new();
    for log in &gateway.logs {
        let entry = counts.entry(log.model_id.as_str()).or_default();
        entry.0 += 1;
        entry.1 += log.cost_usd.unwrap_or(0.0);
    }
    let mut ranked: Vec<_> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1 .0.cmp(&a.1 .0));
    Json(
        ranked
            .into_iter()
            .map(|(id, (count, cost))| {
                json!({
                    "model_id": id,
                    "model_name": gateway.models.get(id).map(|m| m.name.as_str()).unwrap_or(id),
                    "request_count": count,
                    "total_cost": cost,
                })
            })
            .collect(),
    )
}

// --- services ---

async fn list_services(State(db): State<Db>) -> Json<Vec<Service>> {
    let gateway = db.read().await;
    Json(gateway.services.values().cloned().collect())
}

async fn get_service(State(db): State<Db>, Path(name): Path<String>) -> Response {
    let gateway = db.read().await;
    match gateway.services.get(&name) {
        Some(service) => Json(service.clone()).into_response(),
        None => not_found("Service", &name),
    }
}

async fn create_service(State(db): State<Db>, Json(input): Json<CreateService>) -> Response {
    let mut gateway = db.write().await;
    if gateway.services.contains_key(&input.name) {
        return message(StatusCode::CONFLICT, format!("Service already exists: {}", input.name));
    }
    let service = Service {
        name: input.name.clone(),
        service_type: input.service_type,
        strategy: input.strategy.unwrap_or_else(|| "None".to_string()),
        input_modalities: vec!["Text".to_string()],
        output_modalities: vec!["Text".to_string()],
        description: input.description,
        guardrails: (!input.guardrails.is_empty()).then(|| input.guardrails.join(",")),
        pool_type: None,
        max_iterations: input.max_iterations,
        created_at: Some(now()),
    };
    gateway.services.insert(input.name, service.clone());
    Json(service).into_response()
}

async fn update_service(State(db): State<Db>, Path(name): Path<String>, Json(input): Json<UpdateService>) -> Response {
    let mut gateway = db.write().await;
    let Some(service) = gateway.services.get_mut(&name) else {
        return not_found("Service", &name);
    };
    if let Some(description) = input.description {
        service.description = Some(description);
    }
    if let Some(strategy) = input.strategy {
        service.strategy = strategy;
    }
    if let Some(guardrails) = input.guardrails {
        service.guardrails = Some(guardrails.join(","));
    }
    if let Some(pool_type) = input.pool_type {
        service.pool_type = Some(pool_type);
    }
    if let Some(max_iterations) = input.max_iterations {
        service.max_iterations = Some(max_iterations);
    }
    Json(service.clone()).into_response()
}

async fn delete_service(State(db): State<Db>, Path(name): Path<String>) -> Response {
    let mut gateway = db.write().await;
    if gateway.services.remove(&name).is_none() {
        return not_found("Service", &name);
    }
    gateway.assignments.remove(&name);
    gateway.tools.remove(&name);
    message(StatusCode::OK, "Service deleted")
}

async fn assign_model(State(db): State<Db>, Path(name): Path<String>, Json(input): Json<Assignment>) -> Response {
    let mut gateway = db.write().await;
    if !gateway.services.contains_key(&name) {
        return not_found("Service", &name);
    }
    if !gateway.models.contains_key(&input.model_id) {
        return not_found("Model", &input.model_id);
    }
    let assigned = gateway.assignments.entry(name).or_default();
    assigned.retain(|a| a.model_id != input.model_id);
    assigned.push(input);
    message(StatusCode::OK, "Model assigned")
}

async fn update_assignment(
    State(db): State<Db>,
    Path((name, model_id)): Path<(String, String)>,
    Json(input): Json<UpdateAssignment>,
) -> Response {
    let mut gateway = db.write().await;
    let Some(assignment) = gateway
        .assignments
        .get_mut(&name)
        .and_then(|assigned| assigned.iter_mut().find(|a| a.model_id == model_id))
    else {
        return not_found("Assignment", &format!("{name}/{model_id}"));
    };
    if let Some(position) = input.position {
        assignment.position = position;
    }
    if let Some(weight) = input.weight {
        assignment.weight = weight;
    }
    message(StatusCode::OK, "Assignment updated")
}

async fn remove_assignment(State(db): State<Db>, Path((name, model_id)): Path<(String, String)>) -> Response {
    let mut gateway = db.write().await;
    let Some(assigned) = gateway.assignments.get_mut(&name) else {
        return not_found("Service", &name);
    };
    let before = assigned.len();
    assigned.retain(|a| a.model_id != model_id);
    if assigned.len() == before {
        return not_found("Assignment", &format!("{name}/{model_id}"));
    }
    message(StatusCode::OK, "Model removed from service")
}

async fn list_assigned_models(State(db): State<Db>, Path(name): Path<String>) -> Json<Vec<Value>> {
    Json(db.read().await.assigned_models(&name))
}

async fn add_tool(State(db): State<Db>, Path(name): Path<String>, Json(input): Json<CreateTool>) -> Response {
    let mut gateway = db.write().await;
    if !gateway.services.contains_key(&name) {
        return not_found("Service", &name);
    }
    let tool = Tool {
        id: Uuid::new_v4().to_string(),
        name: input.name,
        description: input.description,
        tool_type: input.tool_type,
        target_id: input.target_id,
        parameters_schema: input.parameters_schema,
        position: input.position,
    };
    gateway.tools.entry(name).or_default().push(tool);
    message(StatusCode::OK, "Tool added")
}

async fn list_tools(State(db): State<Db>, Path(name): Path<String>) -> Json<Vec<Tool>> {
    let gateway = db.read().await;
    let mut tools = gateway.tools.get(&name).cloned().unwrap_or_default();
    tools.sort_by_key(|tool| tool.position);
    Json(tools)
}

async fn delete_tool(State(db): State<Db>, Path((name, tool_id)): Path<(String, String)>) -> Response {
    let mut gateway = db.write().await;
    let removed = gateway.tools.get_mut(&name).is_some_and(|tools| {
        let before = tools.len();
        tools.retain(|tool| tool.id != tool_id);
        tools.len() != before
    });
    if !removed {
        return message(
            StatusCode::NOT_FOUND,
            format!("Tool '{tool_id}' not found for service '{name}'"),
        );
    }
    message(StatusCode::OK, "Tool deleted")
}

// --- providers ---

async fn list_providers(State(db): State<Db>) -> Json<Vec<Value>> {
    let gateway = db.read().await;
    Json(gateway.providers.values().map(Provider::public).collect())
}

async fn get_provider(State(db): State<Db>, Path(id): Path<String>) -> Response {
    let gateway = db.read().await;
    match gateway.providers.get(&id) {
        Some(provider) => Json(provider.public()).into_response(),
        None => not_found("Provider", &id),
    }
}

async fn create_provider(State(db): State<Db>, Json(input): Json<CreateProvider>) -> Json<Provider> {
    let provider = Provider {
        id: Uuid::new_v4().to_string(),
        name: input.name,
        provider_type: input.provider_type,
        api_endpoint: input.api_endpoint,
        api_version: input.api_version,
        api_key: input.api_key,
        description: input.description,
        created_at: Some(now()),
        icon_url: input.icon_url,
    };
    db.write().await.providers.insert(provider.id.clone(), provider.clone());
    Json(provider)
}

async fn update_provider(State(db): State<Db>, Path(id): Path<String>, Json(input): Json<UpdateProvider>) -> Response {
    let mut gateway = db.write().await;
    let Some(provider) = gateway.providers.get_mut(&id) else {
        return not_found("Provider", &id);
    };
    if let Some(name) = input.name {
        provider.name = name;
    }
    if let Some(provider_type) = input.provider_type {
        provider.provider_type = provider_type;
    }
    provider.api_endpoint = input.api_endpoint.or(provider.api_endpoint.take());
    provider.api_version = input.api_version.or(provider.api_version.take());
    provider.api_key = input.api_key.or(provider.api_key.take());
    provider.description = input.description.or(provider.description.take());
    provider.icon_url = input.icon_url.or(provider.icon_url.take());
    Json(provider.clone()).into_response()
}

async fn delete_provider(State(db): State<Db>, Path(id): Path<String>) -> Response {
    let mut gateway = db.write().await;
    match gateway.providers.remove(&id) {
        Some(_) => message(StatusCode::OK, "Provider deleted"),
        None => not_found("Provider", &id),
    }
}

// --- models ---

async fn list_models(State(db): State<Db>) -> Json<Vec<Value>> {
    let gateway = db.read().await;
    let mut models: Vec<&Model> = gateway.models.values().collect();
    models.sort_by(|a, b| a.name.cmp(&b.name));
    Json(models.into_iter().map(Model::listing).collect())
}

async fn create_model(State(db): State<Db>, Json(input): Json<CreateModel>) -> Json<Model> {
    let model = Model {
        id: Uuid::new_v4().to_string(),
        name: input.name,
        provider: input.provider,
        modality: input.modality,
        tier: input.tier.unwrap_or_else(|| "free".to_string()),
        avg_latency_ms: 0,
        avg_ttft_ms: 0,
        max_tps: 0,
        tier_required: "free".to_string(),
        worker_type: "api".to_string(),
        description: input.description,
        cost_per_1k_tokens: input.cost_per_1k_tokens,
        cost_per_1k_input_tokens: input.cost_per_1k_input_tokens,
        cost_per_1k_output_tokens: input.cost_per_1k_output_tokens,
        api_endpoint: input.api_endpoint,
        api_version: input.api_version,
        api_key: input.api_key,
        created_at: Some(now()),
    };
    db.write().await.models.insert(model.id.clone(), model.clone());
    Json(model)
}

async fn get_model(State(db): State<Db>, Path(id): Path<String>) -> Response {
    let gateway = db.read().await;
    match gateway.models.get(&id) {
        Some(model) => Json(model.clone()).into_response(),
        None => not_found("Model", &id),
    }
}

async fn update_model(State(db): State<Db>, Path(id): Path<String>, Json(input): Json<UpdateModel>) -> Response {
    let mut gateway = db.write().await;
    let Some(model) = gateway.models.get_mut(&id) else {
        return not_found("Model", &id);
    };
    if let Some(name) = input.name {
        model.name = name;
    }
    if let Some(tier) = input.tier {
        model.tier = tier;
    }
    model.description = input.description.or(model.description.take());
    model.cost_per_1k_tokens = input.cost_per_1k_tokens.or(model.cost_per_1k_tokens);
    Json(model.clone()).into_response()
}

async fn delete_model(State(db): State<Db>, Path(id): Path<String>) -> Response {
    let mut gateway = db.write().await;
    match gateway.models.remove(&id) {
        Some(_) => message(StatusCode::OK, "Model deleted"),
        None => not_found("Model", &id),
    }
}

async fn topology(State(db): State<Db>) -> Json<Value> {
    let gateway = db.read().await;
    let services: Vec<Value> = gateway
        .services
        .values()
        .map(|service| json!({"service": service_json(service), "models": gateway.service_models(&service.name)}))
        .collect();
    Json(json!({
        "providers": gateway.providers.values().map(Provider::public).collect::<Vec<_>>(),
        "services": services,
        "models": gateway.models.values().collect::<Vec<_>>(),
    }))
}

// --- user ---

async fn user_profile() -> Json<Value> {
    Json(json!({
        "id": "u-mock",
        "email": "dev@mawi.local",
        "name": null,
        "tier": "free",
        "monthly_quota_usd": 5.0,
        "current_usage_usd": 0.0,
        "is_free_tier": true,
    }))
}

async fn user_quota(State(db): State<Db>) -> Json<Value> {
    let gateway = db.read().await;
    let used: f64 = gateway.logs.iter().filter_map(|l| l.cost_usd).sum();
    let quota = 5.0;
    Json(json!({
        "personal_quota": quota,
        "personal_used": used,
        "personal_remaining": (quota - used).max(0.0),
        "personal_percentage": ((used / quota) * 100.0).round() as i64,
        "org_quota_available": 0.0,
        "org_percentage": 0,
        "total_available": (quota - used).max(0.0),
    }))
}

async fn user_providers(State(db): State<Db>) -> Json<Vec<Value>> {
    let gateway = db.read().await;
    Json(
        gateway
            .providers
            .values()
            .map(|p| {
                json!({
                    "id": p.id,
                    "name": p.name,
                    "provider_type": p.provider_type,
                    "has_api_key": p.api_key.is_some(),
                })
            })
            .collect(),
    )
}

async fn user_models(State(db): State<Db>) -> Json<Vec<Value>> {
    let gateway = db.read().await;
    Json(
        gateway
            .models
            .values()
            .map(|m| {
                json!({
                    "id": m.id,
                    "name": m.name,
                    "modality": m.modality,
                    "tier": m.tier,
                    "worker_type": m.worker_type,
                    "provider": m.provider,
                    "health_status": "healthy",
                })
            })
            .collect(),
    )
}

async fn list_api_keys(State(db): State<Db>) -> Json<Vec<ApiKey>> {
    Json(db.read().await.api_keys.clone())
}

async fn create_api_key(State(db): State<Db>, Json(input): Json<CreateApiKey>) -> Json<Value> {
    let secret = Uuid::new_v4().simple().to_string();
    let prefix = format!("mw_{}", &secret[..8]);
    let key = ApiKey {
        id: Uuid::new_v4().to_string(),
        name: input.name,
        prefix: prefix.clone(),
        created_at: now().to_string(),
        expires_at: input.expires_in_days.map(|days| (now() + days * 86_400).to_string()),
        last_used_at: None,
    };
    db.write().await.api_keys.push(key.clone());
    Json(json!({
        "id": key.id,
        "prefix": prefix,
        "name": key.name,
        "raw_key": format!("{prefix}{}", &secret[8..]),
        "created_at": key.created_at,
        "expires_at": key.expires_at,
    }))
}

async fn revoke_api_key(State(db): State<Db>, Path(id): Path<String>) -> Json<bool> {
    let mut gateway = db.write().await;
    let before = gateway.api_keys.len();
    gateway.api_keys.retain(|key| key.id != id);
    Json(gateway.api_keys.len() != before)
}

// --- auth ---

/// The `session_token` cookie of a request, if any.
fn session_cookie(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, token)| *name == "session_token" && !token.is_empty())
        .map(|(_, token)| token)
}

async fn session(db: &Db, credentials: Credentials) -> Response {
    if credentials.password.is_empty() {
        return message(StatusCode::UNAUTHORIZED, "Invalid credentials");
    }
    let token = Uuid::new_v4().simple().to_string();
    let user = json!({
        "id": "u-mock",
        "email": credentials.email,
        "name": credentials.name,
        "tier": "free",
        "monthly_quota_usd": 5.0,
        "current_usage_usd": 0.0,
        "quota_remaining_usd": 5.0,
        "is_free_tier": true,
        "organization_id": null,
    });
    db.write().await.sessions.insert(token.clone(), user.clone());
    let body = json!({"user": user});
    (
        [(header::SET_COOKIE, format!("session_token={token}; Path=/; HttpOnly"))],
        Json(body),
    )
        .into_response()
}

async fn login(State(db): State<Db>, Json(input): Json<Credentials>) -> Response {
    session(&db, input).await
}

async fn register(State(db): State<Db>, Json(input): Json<Credentials>) -> Response {
    session(&db, input).await
}

async fn current_session(State(db): State<Db>, headers: HeaderMap) -> Response {
    let Some(token) = session_cookie(&headers) else {
        return (StatusCode::UNAUTHORIZED, "Not authenticated").into_response();
    };
    match db.read().await.sessions.get(token) {
        Some(user) => Json(json!({"user": user})).into_response(),
        None => (StatusCode::UNAUTHORIZED, "Session expired").into_response(),
    }
}

async fn logout(State(db): State<Db>, headers: HeaderMap) -> Response {
    if let Some(token) = session_cookie(&headers) {
        db.write().await.sessions.remove(token);
    }
    (
        [(header::SET_COOKIE, "session_token=; Path=/; HttpOnly; Max-Age=0")],
        Json("Logged out successfully"),
    )
        .into_response()
}
