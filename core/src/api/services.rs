//! Service management and model assignment.

use crate::endpoint::{DecodeAs, Endpoint, EndpointDescriptor, ResponseBody};
use crate::error::SchemaError;
use crate::http::HttpMethod;
use crate::record::{JsonObject, Record};
use crate::types::{self, AssignModel, AssignedModel, CreateTool, Service, ServiceTool};

/// `GET /services`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ListServices;

impl Endpoint for ListServices {
    type Output = Vec<Service>;

    const DESCRIPTOR: EndpointDescriptor = EndpointDescriptor {
        name: "list_services",
        method: HttpMethod::Get,
        path: "/services",
        body_schema: None,
        responses: &[(200, DecodeAs::records::<Service>())],
    };

    fn decode(_status: u16, body: ResponseBody) -> Result<Vec<Service>, SchemaError> {
        body.records()
    }
}

/// `GET /services/{name}`
#[derive(Debug, Clone, PartialEq)]
pub struct GetService {
    pub name: String,
}

impl GetService {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Endpoint for GetService {
    type Output = Service;

    const DESCRIPTOR: EndpointDescriptor = EndpointDescriptor {
        name: "get_service",
        method: HttpMethod::Get,
        path: "/services/{name}",
        body_schema: None,
        responses: &[(200, DecodeAs::record::<Service>())],
    };

    fn path_params(&self) -> Vec<(&'static str, String)> {
        vec![("name", self.name.clone())]
    }

    fn decode(_status: u16, body: ResponseBody) -> Result<Service, SchemaError> {
        body.record()
    }
}

/// `POST /services`
#[derive(Debug, Clone, PartialEq)]
pub struct CreateService {
    pub service: types::CreateService,
}

impl CreateService {
    pub fn new(service: types::CreateService) -> Self {
        Self { service }
    }
}

impl Endpoint for CreateService {
    type Output = Service;

    const DESCRIPTOR: EndpointDescriptor = EndpointDescriptor {
        name: "create_service",
        method: HttpMethod::Post,
        path: "/services",
        body_schema: Some(types::CreateService::SCHEMA),
        responses: &[(200, DecodeAs::record::<Service>())],
    };

    fn body(&self) -> Result<Option<JsonObject>, SchemaError> {
        self.service.encode().map(Some)
    }

    fn decode(_status: u16, body: ResponseBody) -> Result<Service, SchemaError> {
        body.record()
    }
}

/// `PUT /services/{name}`
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateService {
    pub name: String,
    pub update: types::UpdateService,
}

impl UpdateService {
    pub fn new(name: impl Into<String>, update: types::UpdateService) -> Self {
        Self {
            name: name.into(),
            update,
        }
    }
}

impl Endpoint for UpdateService {
    type Output = Service;

    const DESCRIPTOR: EndpointDescriptor = EndpointDescriptor {
        name: "update_service",
        method: HttpMethod::Put,
        path: "/services/{name}",
        body_schema: Some(types::UpdateService::SCHEMA),
        responses: &[(200, DecodeAs::record::<Service>())],
    };

    fn path_params(&self) -> Vec<(&'static str, String)> {
        vec![("name", self.name.clone())]
    }

    fn body(&self) -> Result<Option<JsonObject>, SchemaError> {
        self.update.encode().map(Some)
    }

    fn decode(_status: u16, body: ResponseBody) -> Result<Service, SchemaError> {
        body.record()
    }
}

/// `DELETE /services/{name}`
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteService {
    pub name: String,
}

impl DeleteService {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Endpoint for DeleteService {
    type Output = String;

    const DESCRIPTOR: EndpointDescriptor = EndpointDescriptor {
        name: "delete_service",
        method: HttpMethod::Delete,
        path: "/services/{name}",
        body_schema: None,
        responses: &[(200, DecodeAs::OpaqueString)],
    };

    fn path_params(&self) -> Vec<(&'static str, String)> {
        vec![("name", self.name.clone())]
    }

    fn decode(_status: u16, body: ResponseBody) -> Result<String, SchemaError> {
        body.text()
    }
}

/// `POST /services/{name}/tools`: attach a tool to an agentic service.
#[derive(Debug, Clone, PartialEq)]
pub struct AddServiceTool {
    pub name: String,
    pub tool: CreateTool,
}

impl AddServiceTool {
    pub fn new(name: impl Into<String>, tool: CreateTool) -> Self {
        Self {
            name: name.into(),
            tool,
        }
    }
}

impl Endpoint for AddServiceTool {
    type Output = String;

    const DESCRIPTOR: EndpointDescriptor = EndpointDescriptor {
        name: "add_service_tool",
        method: HttpMethod::Post,
        path: "/services/{name}/tools",
        body_schema: Some(CreateTool::SCHEMA),
        responses: &[(200, DecodeAs::OpaqueString)],
    };

    fn path_params(&self) -> Vec<(&'static str, String)> {
        vec![("name", self.name.clone())]
    }

    fn body(&self) -> Result<Option<JsonObject>, SchemaError> {
        self.tool.encode().map(Some)
    }

    fn decode(_status: u16, body: ResponseBody) -> Result<String, SchemaError> {
        body.text()
    }
}

/// `GET /services/{name}/tools`, in position order.
#[derive(Debug, Clone, PartialEq)]
pub struct ListServiceTools {
    pub name: String,
}

impl ListServiceTools {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Endpoint for ListServiceTools {
    type Output = Vec<ServiceTool>;

    const DESCRIPTOR: EndpointDescriptor = EndpointDescriptor {
        name: "list_service_tools",
        method: HttpMethod::Get,
        path: "/services/{name}/tools",
        body_schema: None,
        responses: &[(200, DecodeAs::records::<ServiceTool>())],
    };

    fn path_params(&self) -> Vec<(&'static str, String)> {
        vec![("name", self.name.clone())]
    }

    fn decode(_status: u16, body: ResponseBody) -> Result<Vec<ServiceTool>, SchemaError> {
        body.records()
    }
}

/// `DELETE /services/{name}/tools/{tool_id}`
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteServiceTool {
    pub name: String,
    pub tool_id: String,
}

impl DeleteServiceTool {
    pub fn new(name: impl Into<String>, tool_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tool_id: tool_id.into(),
        }
    }
}

impl Endpoint for DeleteServiceTool {
    type Output = String;

    const DESCRIPTOR: EndpointDescriptor = EndpointDescriptor {
        name: "delete_service_tool",
        method: HttpMethod::Delete,
        path: "/services/{name}/tools/{tool_id}",
        body_schema: None,
        responses: &[(200, DecodeAs::OpaqueString)],
    };

    fn path_params(&self) -> Vec<(&'static str, String)> {
        vec![("name", self.name.clone()), ("tool_id", self.tool_id.clone())]
    }

    fn decode(_status: u16, body: ResponseBody) -> Result<String, SchemaError> {
        body.text()
    }
}

/// `GET /services/{name}/models`: the pool with weights, prompt sections
/// and health.
#[derive(Debug, Clone, PartialEq)]
pub struct ListServiceModels {
    pub name: String,
}

impl ListServiceModels {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Endpoint for ListServiceModels {
    type Output = Vec<AssignedModel>;

    const DESCRIPTOR: EndpointDescriptor = EndpointDescriptor {
        name: "list_service_models",
        method: HttpMethod::Get,
        path: "/services/{name}/models",
        body_schema: None,
        responses: &[(200, DecodeAs::records::<AssignedModel>())],
    };

    fn path_params(&self) -> Vec<(&'static str, String)> {
        vec![("name", self.name.clone())]
    }

    fn decode(_status: u16, body: ResponseBody) -> Result<Vec<AssignedModel>, SchemaError> {
        body.records()
    }
}

/// `POST /services/{name}/models`: add a model to a service's pool.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignModelToService {
    pub name: String,
    pub assignment: AssignModel,
}

impl AssignModelToService {
    pub fn new(name: impl Into<String>, assignment: AssignModel) -> Self {
        Self {
            name: name.into(),
            assignment,
        }
    }
}

impl Endpoint for AssignModelToService {
    type Output = String;

    const DESCRIPTOR: EndpointDescriptor = EndpointDescriptor {
        name: "assign_model_to_service",
        method: HttpMethod::Post,
        path: "/services/{name}/models",
        body_schema: Some(AssignModel::SCHEMA),
        responses: &[(200, DecodeAs::OpaqueString)],
    };

    fn path_params(&self) -> Vec<(&'static str, String)> {
        vec![("name", self.name.clone())]
    }

    fn body(&self) -> Result<Option<JsonObject>, SchemaError> {
        self.assignment.encode().map(Some)
    }

    fn decode(_status: u16, body: ResponseBody) -> Result<String, SchemaError> {
        body.text()
    }
}

/// `PUT /services/{name}/models/{model_id}`: change position, weight or
/// prompt sections of an assigned model.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateModelAssignment {
    pub name: String,
    pub model_id: String,
    pub update: types::UpdateModelAssignment,
}

impl UpdateModelAssignment {
    pub fn new(
        name: impl Into<String>,
        model_id: impl Into<String>,
        update: types::UpdateModelAssignment,
    ) -> Self {
        Self {
            name: name.into(),
            model_id: model_id.into(),
            update,
        }
    }
}

impl Endpoint for UpdateModelAssignment {
    type Output = String;

    const DESCRIPTOR: EndpointDescriptor = EndpointDescriptor {
        name: "update_model_assignment",
        method: HttpMethod::Put,
        path: "/services/{name}/models/{model_id}",
        body_schema: Some(types::UpdateModelAssignment::SCHEMA),
        responses: &[(200, DecodeAs::OpaqueString)],
    };

    fn path_params(&self) -> Vec<(&'static str, String)> {
        vec![("name", self.name.clone()), ("model_id", self.model_id.clone())]
    }

    fn body(&self) -> Result<Option<JsonObject>, SchemaError> {
        self.update.encode().map(Some)
    }

    fn decode(_status: u16, body: ResponseBody) -> Result<String, SchemaError> {
        body.text()
    }
}

/// `DELETE /services/{name}/models/{model_id}`
#[derive(Debug, Clone, PartialEq)]
pub struct RemoveModelAssignment {
    pub name: String,
    pub model_id: String,
}

impl RemoveModelAssignment {
    pub fn new(name: impl Into<String>, model_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model_id: model_id.into(),
        }
    }
}

impl Endpoint for RemoveModelAssignment {
    type Output = String;

    const DESCRIPTOR: EndpointDescriptor = EndpointDescriptor {
        name: "remove_model_assignment",
        method: HttpMethod::Delete,
        path: "/services/{name}/models/{model_id}",
        body_schema: None,
        responses: &[(200, DecodeAs::OpaqueString)],
    };

    fn path_params(&self) -> Vec<(&'static str, String)> {
        vec![("name", self.name.clone()), ("model_id", self.model_id.clone())]
    }

    fn decode(_status: u16, body: ResponseBody) -> Result<String, SchemaError> {
        body.text()
    }
}
