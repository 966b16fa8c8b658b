use rmcp::{
    handler::server::{wrapper::Parameters, ServerHandler, tool::ToolRouter},
    model::{CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
    ErrorData as McpError,
};
use std::sync::Arc;

use crate::client::PfdsClient;
use crate::error::FreeboardError;
use crate::formatters::format_storm_event;
use crate::models::GetStormEventRequest;

/// MCP service exposing storm event lookups as a tool
#[derive(Clone)]
pub struct StormEvents {
    client: Arc<PfdsClient>,
    tool_router: ToolRouter<Self>,
}

impl StormEvents {
    pub fn new(client: PfdsClient) -> Self {
        Self {
            client: Arc::new(client),
            tool_router: Self::tool_router(),
        }
    }
}

fn to_mcp_error(err: FreeboardError) -> McpError {
    if err.is_input_error() {
        McpError::invalid_params(err.to_string(), None)
    } else {
        McpError::internal_error(format!("Failed to fetch storm event: {}", err), None)
    }
}

#[tool_handler]
impl ServerHandler for StormEvents {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(
                "Looks up design storm precipitation depths from NOAA's Precipitation \
                Frequency Data Server, for sizing the freeboard of secondary containment berms."
                    .to_string(),
            ),
        }
    }
}

#[tool_router]
impl StormEvents {
    /// Gets the precipitation depth of a design storm at a location
    #[tool(description = "Get the precipitation depth of a design storm at a US location from NOAA Atlas 14. Provide latitude and longitude (e.g., latitude: 39.0, longitude: -77.0). Optional: ari (recurrence interval, e.g. '25-yr' default, '100-yr'), duration (e.g. '24-hr' default, '6-hr', '7-day'), statistic ('estimate' default, 'upper', 'lower'), units ('inch' default, 'mm'), series ('pds' default, 'ams').")]
    async fn get_storm_event(
        &self,
        Parameters(request): Parameters<GetStormEventRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(
            "Getting storm event for coordinates: {}, {}",
            request.latitude,
            request.longitude
        );

        let (location, query) = request.validate().map_err(to_mcp_error)?;

        let result = self
            .client
            .fetch(&location, &query)
            .await
            .map_err(to_mcp_error)?;

        Ok(CallToolResult::success(vec![Content::text(
            format_storm_event(&result),
        )]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FetcherConfig;
    use crate::models::{Ari, StormDuration};
    use crate::parser::sample_body;
    use rmcp::model::ErrorCode;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request(latitude: f64, longitude: f64) -> GetStormEventRequest {
        GetStormEventRequest {
            latitude,
            longitude,
            ari: Some(Ari::Year100),
            duration: Some(StormDuration::Hr24),
            statistic: None,
            units: None,
            series: None,
        }
    }

    async fn service_with(body: ResponseTemplate, expected_calls: u64) -> (MockServer, StormEvents) {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(body)
            .expect(expected_calls)
            .mount(&mock_server)
            .await;

        let client = PfdsClient::new(FetcherConfig::with_base_url(mock_server.uri())).unwrap();
        (mock_server, StormEvents::new(client))
    }

    #[tokio::test]
    async fn test_get_storm_event() {
        let (_server, service) =
            service_with(ResponseTemplate::new(200).set_body_string(sample_body()), 1).await;

        let result = service
            .get_storm_event(Parameters(request(39.0, -77.0)))
            .await
            .unwrap();

        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("Storm Event: 12.1 inch"));
    }

    #[tokio::test]
    async fn test_invalid_location_skips_request() {
        let (_server, service) =
            service_with(ResponseTemplate::new(200).set_body_string(sample_body()), 0).await;

        let err = service
            .get_storm_event(Parameters(request(999.0, -77.0)))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_server_failure_is_internal_error() {
        let (_server, service) = service_with(ResponseTemplate::new(500), 1).await;

        let err = service
            .get_storm_event(Parameters(request(39.0, -77.0)))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
    }

    #[test]
    fn test_server_info() {
        let client = PfdsClient::new(FetcherConfig::default()).unwrap();
        let info = StormEvents::new(client).get_info();
        assert_eq!(info.server_info.name, "freeboard");
        assert!(info.capabilities.tools.is_some());
    }
}
