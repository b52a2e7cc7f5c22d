use crate::endpoint::{DecodeAs, Endpoint, EndpointDescriptor, ResponseBody};
use crate::error::SchemaError;
use crate::http::HttpMethod;
use crate::record::{JsonObject, Record};
use crate::types::{self, Model, ModelListing};

/// `GET /models`: every model with its masked key and live health.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ListModels;

impl Endpoint for ListModels {
    type Output = Vec<ModelListing>;

    const DESCRIPTOR: EndpointDescriptor = EndpointDescriptor {
        name: "list_models",
        method: HttpMethod::Get,
        path: "/models",
        body_schema: None,
        responses: &[(200, DecodeAs::records::<ModelListing>())],
    };

    fn decode(_status: u16, body: ResponseBody) -> Result<Vec<ModelListing>, SchemaError> {
        body.records()
    }
}

/// `GET /models/{id}`
#[derive(Debug, Clone, PartialEq)]
pub struct GetModel {
    pub id: String,
}

impl GetModel {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl Endpoint for GetModel {
    type Output = Model;

    const DESCRIPTOR: EndpointDescriptor = EndpointDescriptor {
        name: "get_model",
        method: HttpMethod::Get,
        path: "/models/{id}",
        body_schema: None,
        responses: &[(200, DecodeAs::record::<Model>())],
    };

    fn path_params(&self) -> Vec<(&'static str, String)> {
        vec![("id", self.id.clone())]
    }

    fn decode(_status: u16, body: ResponseBody) -> Result<Model, SchemaError> {
        body.record()
    }
}

/// `POST /models`
#[derive(Debug, Clone, PartialEq)]
pub struct CreateModel {
    pub model: types::CreateModel,
}

impl CreateModel {
    pub fn new(model: types::CreateModel) -> Self {
        Self { model }
    }
}

impl Endpoint for CreateModel {
    type Output = Model;

    const DESCRIPTOR: EndpointDescriptor = EndpointDescriptor {
        name: "create_model",
        method: HttpMethod::Post,
        path: "/models",
        body_schema: Some(types::CreateModel::SCHEMA),
        responses: &[(200, DecodeAs::record::<Model>())],
    };

    fn body(&self) -> Result<Option<JsonObject>, SchemaError> {
        self.model.encode().map(Some)
    }

    fn decode(_status: u16, body: ResponseBody) -> Result<Model, SchemaError> {
        body.record()
    }
}

/// `PUT /models/{id}`
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateModel {
    pub id: String,
    pub update: types::UpdateModel,
}

impl UpdateModel {
    pub fn new(id: impl Into<String>, update: types::UpdateModel) -> Self {
        Self { id: id.into(), update }
    }
}

impl Endpoint for UpdateModel {
    type Output = Model;

    const DESCRIPTOR: EndpointDescriptor = EndpointDescriptor {
        name: "update_model",
        method: HttpMethod::Put,
        path: "/models/{id}",
        body_schema: Some(types::UpdateModel::SCHEMA),
        responses: &[(200, DecodeAs::record::<Model>())],
    };

    fn path_params(&self) -> Vec<(&'static str, String)> {
        vec![("id", self.id.clone())]
    }

    fn body(&self) -> Result<Option<JsonObject>, SchemaError> {
        self.update.encode().map(Some)
    }

    fn decode(_status: u16, body: ResponseBody) -> Result<Model, SchemaError> {
        body.record()
    }
}

/// `DELETE /models/{id}`
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteModel {
    pub id: String,
}

impl DeleteModel {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl Endpoint for DeleteModel {
    type Output = String;

    const DESCRIPTOR: EndpointDescriptor = EndpointDescriptor {
        name: "delete_model",
        method: HttpMethod::Delete,
        path: "/models/{id}",
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
