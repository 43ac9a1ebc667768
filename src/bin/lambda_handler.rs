//! AWS Lambda handler for running revenue forecasts
//!
//! Accepts forecast parameters as a JSON body behind API Gateway and returns
//! the forecast report (records, summary and chart series) as JSON.
//! Every request builds its own parameter set; nothing is shared between requests.

use aws_lambda_events::event::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use aws_lambda_events::encodings::Body;
use http::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use http::Method;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use revenue_forecast::{ForecastEngine, ForecastParameters, ForecastReport};
use serde_json::json;

fn cors_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("access-control-allow-origin", HeaderValue::from_static("*"));
    headers.insert("access-control-allow-methods", HeaderValue::from_static("POST, OPTIONS"));
    headers.insert("access-control-allow-headers", HeaderValue::from_static("Content-Type"));
    headers
}

fn response(status: i64, body: Option<String>) -> ApiGatewayProxyResponse {
    let mut headers = cors_headers();
    if body.is_some() {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }
    ApiGatewayProxyResponse {
        status_code: status,
        headers,
        body: body.map(Body::Text),
        ..Default::default()
    }
}

fn error_response(status: i64, message: &str) -> ApiGatewayProxyResponse {
    response(status, Some(json!({ "error": message }).to_string()))
}

/// Parse the request body; absent fields keep their defaults
fn parse_parameters(body: Option<&str>) -> Result<ForecastParameters, serde_json::Error> {
    match body {
        Some(text) if !text.trim().is_empty() => serde_json::from_str(text),
        _ => Ok(ForecastParameters::default()),
    }
}

/// Run one forecast request end to end
fn forecast(body: Option<&str>) -> ApiGatewayProxyResponse {
    let params = match parse_parameters(body) {
        Ok(p) => p,
        Err(e) => return error_response(400, &format!("Invalid JSON: {}", e)),
    };

    if let Err(e) = params.validate() {
        return error_response(400, &e.to_string());
    }

    let result = match ForecastEngine::new(params.clone()).project_checked() {
        Ok(r) => r,
        Err(e) => return error_response(422, &e.to_string()),
    };
    log::info!("Forecast request served: {} years", result.len());

    match ForecastReport::new(params, result).to_json() {
        Ok(text) => response(200, Some(text)),
        Err(e) => error_response(500, &format!("Failed to encode report: {}", e)),
    }
}

/// Lambda handler function
async fn handler(event: LambdaEvent<ApiGatewayProxyRequest>) -> Result<ApiGatewayProxyResponse, Error> {
    let request = event.payload;

    // Handle CORS preflight
    if request.http_method == Method::OPTIONS {
        return Ok(response(200, None));
    }

    Ok(forecast(request.body.as_deref()))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
