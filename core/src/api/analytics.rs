use crate::endpoint::{DecodeAs, Endpoint, EndpointDescriptor, Query, ResponseBody};
use crate::error::SchemaError;
use crate::field::Field;
use crate::http::HttpMethod;
use crate::types::{AnalyticsSummary, RequestLog, TimeSeriesPoint, TopModel};

/// `GET /analytics/requests`: most recent request logs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListRequestLogs {
    /// Maximum number of logs. The gateway picks a default when absent.
    pub limit: Field<i64>,
}

impl ListRequestLogs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Field::Present(limit);
        self
    }
}

impl Endpoint for ListRequestLogs {
    type Output = Vec<RequestLog>;

    const DESCRIPTOR: EndpointDescriptor = EndpointDescriptor {
        name: "list_request_logs",
        method: HttpMethod::Get,
        path: "/analytics/requests",
        body_schema: None,
        responses: &[(200, DecodeAs::records::<RequestLog>())],
    };

    fn query(&self) -> Query {
        Query::new().param("limit", &self.limit)
    }

    fn decode(_status: u16, body: ResponseBody) -> Result<Vec<RequestLog>, SchemaError> {
        body.records()
    }
}

/// `GET /analytics/time-series`: request buckets over a time range.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetTimeSeries {
    /// Window such as `"24h"` or `"7d"`.
    pub range: Field<String>,
}

impl GetTimeSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn range(mut self, range: impl Into<String>) -> Self {
        self.range = Field::Present(range.into());
        self
    }
}

impl Endpoint for GetTimeSeries {
    type Output = Vec<TimeSeriesPoint>;

    const DESCRIPTOR: EndpointDescriptor = EndpointDescriptor {
        name: "get_time_series",
        method: HttpMethod::Get,
        path: "/analytics/time-series",
        body_schema: None,
        responses: &[(200, DecodeAs::records::<TimeSeriesPoint>())],
    };

    fn query(&self) -> Query {
        Query::new().param("range", &self.range)
    }

    fn decode(_status: u16, body: ResponseBody) -> Result<Vec<TimeSeriesPoint>, SchemaError> {
        body.records()
    }
}

/// `GET /analytics/summary`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GetAnalyticsSummary;

impl Endpoint for GetAnalyticsSummary {
    type Output = AnalyticsSummary;

    const DESCRIPTOR: EndpointDescriptor = EndpointDescriptor {
        name: "get_analytics_summary",
        method: HttpMethod::Get,
        path: "/analytics/summary",
        body_schema: None,
        responses: &[(200, DecodeAs::record::<AnalyticsSummary>())],
    };

    fn decode(_status: u16, body: ResponseBody) -> Result<AnalyticsSummary, SchemaError> {
        body.record()
    }
}

/// `GET /analytics/top-models`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ListTopModels;

impl Endpoint for ListTopModels {
    type Output = Vec<TopModel>;

    const DESCRIPTOR: EndpointDescriptor = EndpointDescriptor {
        name: "list_top_models",
        method: HttpMethod::Get,
        path: "/analytics/top-models",
        body_schema: None,
        responses: &[(200, DecodeAs::records::<TopModel>())],
    };

    fn decode(_status: u16, body: ResponseBody) -> Result<Vec<TopModel>, SchemaError> {
        body.records()
    }
}
