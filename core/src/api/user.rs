//! Endpoints scoped to the authenticated user.

use crate::endpoint::{DecodeAs, Endpoint, EndpointDescriptor, ResponseBody};
use crate::error::SchemaError;
use crate::http::HttpMethod;
use crate::record::{JsonObject, Record};
use crate::types::{
    ApiKeyInfo, CreateApiKeyRequest, CreateApiKeyResponse, ModelInfo, ProviderInfo, QuotaStatusResponse,
    UserProfileResponse,
};

/// `GET /user/me`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GetUserProfile;

impl Endpoint for GetUserProfile {
    type Output = UserProfileResponse;

    const DESCRIPTOR: EndpointDescriptor = EndpointDescriptor {
        name: "get_user_profile",
        method: HttpMethod::Get,
        path: "/user/me",
        body_schema: None,
        responses: &[(200, DecodeAs::record::<UserProfileResponse>())],
    };

    fn decode(_status: u16, body: ResponseBody) -> Result<UserProfileResponse, SchemaError> {
        body.record()
    }
}

/// `GET /user/quota`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GetQuotaStatus;

impl Endpoint for GetQuotaStatus {
    type Output = QuotaStatusResponse;

    const DESCRIPTOR: EndpointDescriptor = EndpointDescriptor {
        name: "get_quota_status",
        method: HttpMethod::Get,
        path: "/user/quota",
        body_schema: None,
        responses: &[(200, DecodeAs::record::<QuotaStatusResponse>())],
    };

    fn decode(_status: u16, body: ResponseBody) -> Result<QuotaStatusResponse, SchemaError> {
        body.record()
    }
}

/// `GET /user/providers`: providers visible to the user.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ListUserProviders;

impl Endpoint for ListUserProviders {
    type Output = Vec<ProviderInfo>;

    const DESCRIPTOR: EndpointDescriptor = EndpointDescriptor {
        name: "list_user_providers",
        method: HttpMethod::Get,
        path: "/user/providers",
        body_schema: None,
        responses: &[(200, DecodeAs::records::<ProviderInfo>())],
    };

    fn decode(_status: u16, body: ResponseBody) -> Result<Vec<ProviderInfo>, SchemaError> {
        body.records()
    }
}

/// `GET /user/models`: models visible to the user, with health.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ListUserModels;

impl Endpoint for ListUserModels {
    type Output = Vec<ModelInfo>;

    const DESCRIPTOR: EndpointDescriptor = EndpointDescriptor {
        name: "list_user_models",
        method: HttpMethod::Get,
        path: "/user/models",
        body_schema: None,
        responses: &[(200, DecodeAs::records::<ModelInfo>())],
    };

    fn decode(_status: u16, body: ResponseBody) -> Result<Vec<ModelInfo>, SchemaError> {
        body.records()
    }
}

/// `GET /user/api-keys`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ListApiKeys;

impl Endpoint for ListApiKeys {
    type Output = Vec<ApiKeyInfo>;

    const DESCRIPTOR: EndpointDescriptor = EndpointDescriptor {
        name: "list_api_keys",
        method: HttpMethod::Get,
        path: "/user/api-keys",
        body_schema: None,
        responses: &[(200, DecodeAs::records::<ApiKeyInfo>())],
    };

    fn decode(_status: u16, body: ResponseBody) -> Result<Vec<ApiKeyInfo>, SchemaError> {
        body.records()
    }
}

/// `POST /user/api-keys`. The response is the only place the full key is
/// ever returned.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateApiKey {
    pub request: CreateApiKeyRequest,
}

impl CreateApiKey {
    pub fn new(request: CreateApiKeyRequest) -> Self {
        Self { request }
    }
}

impl Endpoint for CreateApiKey {
    type Output = CreateApiKeyResponse;

    const DESCRIPTOR: EndpointDescriptor = EndpointDescriptor {
        name: "create_api_key",
        method: HttpMethod::Post,
        path: "/user/api-keys",
        body_schema: Some(CreateApiKeyRequest::SCHEMA),
        responses: &[(200, DecodeAs::record::<CreateApiKeyResponse>())],
    };

    fn body(&self) -> Result<Option<JsonObject>, SchemaError> {
        self.request.encode().map(Some)
    }

    fn decode(_status: u16, body: ResponseBody) -> Result<CreateApiKeyResponse, SchemaError> {
        body.record()
    }
}

/// `DELETE /user/api-keys/{id}`. Yields whether a key was revoked.
#[derive(Debug, Clone, PartialEq)]
pub struct RevokeApiKey {
    pub id: String,
}

impl RevokeApiKey {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl Endpoint for RevokeApiKey {
    type Output = bool;

    const DESCRIPTOR: EndpointDescriptor = EndpointDescriptor {
        name: "revoke_api_key",
        method: HttpMethod::Delete,
        path: "/user/api-keys/{id}",
        body_schema: None,
        responses: &[(200, DecodeAs::Schema("bool"))],
    };

    fn path_params(&self) -> Vec<(&'static str, String)> {
        vec![("id", self.id.clone())]
    }

    fn decode(_status: u16, body: ResponseBody) -> Result<bool, SchemaError> {
        body.value("bool")
    }
}
