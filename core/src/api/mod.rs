//! One endpoint type per gateway operation.
//!
//! # Design
//! An endpoint value holds the parameters of one call: path parameters as
//! `String` fields, optional query parameters as `Field<T>` and the body
//! record when the operation takes one. Its `Endpoint` impl carries the
//! static descriptor and the mapping from decoded bodies to `Output`.
//!
//! ```ignore
//! let client = BlockingClient::blocking(ClientConfig::from_env()?);
//! let logs = client.call(&ListRequestLogs::new().limit(10))?;
//! ```

pub mod analytics;
pub mod auth;
pub mod chat;
pub mod models;
pub mod providers;
pub mod services;
pub mod system;
pub mod user;

pub use analytics::{GetAnalyticsSummary, GetTimeSeries, ListRequestLogs, ListTopModels};
pub use auth::{session_token, GetSession, Login, Logout, Register, SessionBody, SessionOutcome};
pub use chat::{ChatCompletionOutcome, CompletionBody, CreateChatCompletion};
pub use models::{CreateModel, DeleteModel, GetModel, ListModels, UpdateModel};
pub use providers::{CreateProvider, DeleteProvider, GetProvider, ListProviders, UpdateProvider};
pub use services::{
    AddServiceTool, AssignModelToService, CreateService, DeleteService, DeleteServiceTool, GetService,
    ListServiceModels, ListServiceTools, ListServices, RemoveModelAssignment, UpdateModelAssignment,
    UpdateService,
};
pub use system::GetTopology;
pub use user::{CreateApiKey, GetQuotaStatus, GetUserProfile, ListApiKeys, ListUserModels, ListUserProviders, RevokeApiKey};
