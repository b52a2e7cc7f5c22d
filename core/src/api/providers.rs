use crate::endpoint::{DecodeAs, Endpoint, EndpointDescriptor, ResponseBody};
use crate::error::SchemaError;
use crate::http::HttpMethod;
use crate::record::{JsonObject, Record};
use crate::types::{self, Provider, ProviderResponse};

/// `GET /providers`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ListProviders;

impl Endpoint for ListProviders {
    type Output = Vec<ProviderResponse>;

    const DESCRIPTOR: EndpointDescriptor = EndpointDescriptor {
        name: "list_providers",
        method: HttpMethod::Get,
        path: "/providers",
        body_schema: None,
        responses: &[(200, DecodeAs::records::<ProviderResponse>())],
    };

    fn decode(_status: u16, body: ResponseBody) -> Result<Vec<ProviderResponse>, SchemaError> {
        body.records()
    }
}

/// `GET /providers/{id}`
#[derive(Debug, Clone, PartialEq)]
pub struct GetProvider {
    pub id: String,
}

impl GetProvider {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl Endpoint for GetProvider {
    type Output = ProviderResponse;

    const DESCRIPTOR: EndpointDescriptor = EndpointDescriptor {
        name: "get_provider",
        method: HttpMethod::Get,
        path: "/providers/{id}",
        body_schema: None,
        responses: &[(200, DecodeAs::record::<ProviderResponse>())],
    };

    fn path_params(&self) -> Vec<(&'static str, String)> {
        vec![("id", self.id.clone())]
    }

    fn decode(_status: u16, body: ResponseBody) -> Result<ProviderResponse, SchemaError> {
        body.record()
    }
}

/// `POST /providers`
#[derive(Debug, Clone, PartialEq)]
pub struct CreateProvider {
    pub provider: types::CreateProvider,
}

impl CreateProvider {
    pub fn new(provider: types::CreateProvider) -> Self {
        Self { provider }
    }
}

impl Endpoint for CreateProvider {
    type Output = Provider;

    const DESCRIPTOR: EndpointDescriptor = EndpointDescriptor {
        name: "create_provider",
        method: HttpMethod::Post,
        path: "/providers",
        body_schema: Some(types::CreateProvider::SCHEMA),
        responses: &[(200, DecodeAs::record::<Provider>())],
    };

    fn body(&self) -> Result<Option<JsonObject>, SchemaError> {
        self.provider.encode().map(Some)
    }

    fn decode(_status: u16, body: ResponseBody) -> Result<Provider, SchemaError> {
        body.record()
    }
}

/// `PUT /providers/{id}`
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateProvider {
    pub id: String,
    pub update: types::UpdateProvider,
}

impl UpdateProvider {
    pub fn new(id: impl Into<String>, update: types::UpdateProvider) -> Self {
        Self { id: id.into(), update }
    }
}

impl Endpoint for UpdateProvider {
    type Output = Provider;

    const DESCRIPTOR: EndpointDescriptor = EndpointDescriptor {
        name: "update_provider",
        method: HttpMethod::Put,
        path: "/providers/{id}",
        body_schema: Some(types::UpdateProvider::SCHEMA),
        responses: &[(200, DecodeAs::record::<Provider>())],
    };

    fn path_params(&self) -> Vec<(&'static str, String)> {
        vec![("id", self.id.clone())]
    }

    fn body(&self) -> Result<Option<JsonObject>, SchemaError> {
        self.update.encode().map(Some)
    }

    fn decode(_status: u16, body: ResponseBody) -> Result<Provider, SchemaError> {
        body.record()
    }
}

/// `DELETE /providers/{id}`
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteProvider {
    pub id: String,
}

impl DeleteProvider {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl Endpoint for DeleteProvider {
    type Output = String;

    const DESCRIPTOR: EndpointDescriptor = EndpointDescriptor {
        name: "delete_provider",
        method: HttpMethod::Delete,
        path: "/providers/{id}",
        body_schema: None,
        responses: &[(200, DecodeAs::OpaqueString)],
    };

    fn path_params(&self) -> Vec<(&'static str, String)> {
        vec![("id", self.id.clone())]
    }

    fn decode(_status: u16, body: ResponseBody) -> Result<String, SchemaError> {
        body.text()
    }
}
