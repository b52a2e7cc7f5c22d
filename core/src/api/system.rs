use crate::endpoint::{DecodeAs, Endpoint, EndpointDescriptor, ResponseBody};
use crate::error::SchemaError;
use crate::http::HttpMethod;
use crate::types::TopologyResponse;

/// `GET /topology`: providers, services and models in one call.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GetTopology;

impl Endpoint for GetTopology {
    type Output = TopologyResponse;

    const DESCRIPTOR: EndpointDescriptor = EndpointDescriptor {
        name: "get_topology",
        method: HttpMethod::Get,
        path: "/topology",
        body_schema: None,
        responses: &[(200, DecodeAs::record::<TopologyResponse>())],
    };

    fn decode(_status: u16, body: ResponseBody) -> Result<TopologyResponse, SchemaError> {
        body.record()
    }
}
