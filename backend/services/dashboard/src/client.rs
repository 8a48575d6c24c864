use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use wellbeing_common::models::{BurnoutAlert, LiveCounts, WorkLocationImpact};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone)]
pub struct DashboardClientConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl DashboardClientConfig {
    pub fn from_env() -> Self {
        let base_url = std::env::var("API_BASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let timeout_secs = std::env::var("DASHBOARD_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .filter(|&t| t > 0)
            .unwrap_or(10);

        Self {
            base_url,
            timeout_secs,
        }
    }
}

#[derive(Clone)]
pub struct DashboardClient {
    client: Client,
    config: DashboardClientConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum DashboardClientError {
    #[error("HTTP {status}: {body}")]
    Http { status: StatusCode, body: String },

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected payload: {0}")]
    Decode(String),
}

impl DashboardClient {
    pub fn new(config: DashboardClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.config.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub async fn fetch_stats(&self) -> Result<LiveCounts, DashboardClientError> {
        let body = self.get_json("/api/stats", &[]).await?;
        decode(body)
    }

    pub async fn fetch_alerts(&self) -> Result<Vec<BurnoutAlert>, DashboardClientError> {
        let body = self.get_json("/api/alerts", &[]).await?;
        decode_list(body)
    }

    pub async fn fetch_work_location_impact(
        &self,
    ) -> Result<Vec<WorkLocationImpact>, DashboardClientError> {
        let body = self.get_json("/api/work-location-impact", &[]).await?;
        decode_list(body)
    }

    pub async fn fetch_access_impact(
        &self,
        location: Option<&str>,
    ) -> Result<WorkLocationImpact, DashboardClientError> {
        let query: Vec<(&str, &str)> = location.map(|l| ("location", l)).into_iter().collect();
        let body = self.get_json("/api/access-impact", &query).await?;
        decode(body)
    }

    async fn get_json(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Value, DashboardClientError> {
        let url = format!("{}{}", self.config.base_url, path);
        tracing::debug!(%url, "fetching");

        let response = self.client.get(&url).query(query).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DashboardClientError::Http { status, body });
        }

        Ok(response.json::<Value>().await?)
    }
}

fn decode<T: DeserializeOwned>(body: Value) -> Result<T, DashboardClientError> {
    serde_json::from_value(body).map_err(|e| DashboardClientError::Decode(e.to_string()))
}

fn decode_list<T: DeserializeOwned>(body: Value) -> Result<Vec<T>, DashboardClientError> {
    match body {
        Value::Array(items) => items.into_iter().map(decode).collect(),
        other => Err(DashboardClientError::Decode(format!(
            "Expected array but got: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config() -> DashboardClientConfig {
        DashboardClientConfig {
            base_url: "http://localhost".to_string(),
            timeout_secs: 5,
        }
    }

    async fn client_for(server: &MockServer) -> DashboardClient {
        DashboardClient::new(test_config())
            .unwrap()
            .with_base_url(&server.uri())
    }

    #[tokio::test]
    async fn fetch_stats_fills_missing_counts_with_zero() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/stats"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "_id": "live_counts",
                "stress_high": 20,
                "stress_low": 50,
                "work_remote": 650
            })))
            .mount(&server)
            .await;

        let counts = client_for(&server).await.fetch_stats().await.unwrap();
        assert_eq!(counts.stress_high, 20);
        assert_eq!(counts.stress_medium, 0);
        assert_eq!(counts.work_remote, 650);
        assert_eq!(counts.last_updated, None);
    }

    #[tokio::test]
    async fn fetch_alerts_decodes_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/alerts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"department": "Engineering", "avgStress": 2.8, "employeeCount": 14,
                 "recommendation": "Reduce sprint load"},
                {"department": "Finance", "avgStress": "2.4", "employeeCount": "9",
                 "recommendation": "Rebalance quarter-end work"}
            ])))
            .mount(&server)
            .await;

        let alerts = client_for(&server).await.fetch_alerts().await.unwrap();
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].department, "Engineering");
        assert_eq!(alerts[1].employee_count, 9);
    }

    #[tokio::test]
    async fn non_array_alerts_payload_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/alerts"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"error": "oops"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).await.fetch_alerts().await.unwrap_err();
        match err {
            DashboardClientError::Decode(msg) => assert!(msg.starts_with("Expected array")),
            other => panic!("expected Decode, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn server_error_maps_to_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/stats"))
            .respond_with(
                ResponseTemplate::new(500).set_body_string(r#"{"error":"DB not initialized"}"#),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).await.fetch_stats().await.unwrap_err();
        match err {
            DashboardClientError::Http { status, body } => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                assert!(body.contains("DB not initialized"));
            }
            other => panic!("expected Http, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn access_impact_passes_location_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/access-impact"))
            .and(query_param("location", "Hybrid"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "workLocation": "Hybrid",
                "totalEmployees": 80,
                "avgStress": 2.1,
                "overallWellbeing": 4.1,
                "remoteEffectiveness": 3.5
            })))
            .expect(1)
            .mount(&server)
            .await;

        let row = client_for(&server)
            .await
            .fetch_access_impact(Some("Hybrid"))
            .await
            .unwrap();
        assert_eq!(row.work_location, "Hybrid");
        assert_eq!(row.total_employees, 80.0);
    }

    #[tokio::test]
    async fn work_location_rows_coerce_numeric_strings() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/work-location-impact"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"workLocation": "Remote", "totalEmployees": "120", "avgStress": 2.3}
            ])))
            .mount(&server)
            .await;

        let rows = client_for(&server)
            .await
            .fetch_work_location_impact()
            .await
            .unwrap();
        assert_eq!(rows[0].total_employees, 120.0);
        assert!(rows[0].overall_wellbeing.is_nan());
    }

    #[tokio::test]
    async fn slow_server_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/stats"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({}))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let client = DashboardClient::new(DashboardClientConfig {
            base_url: server.uri(),
            timeout_secs: 1,
        })
        .unwrap();

        let err = client.fetch_stats().await.unwrap_err();
        assert!(matches!(err, DashboardClientError::Request(ref e) if e.is_timeout()));
    }

    #[test]
    fn zero_timeout_falls_back_to_default() {
        std::env::set_var("DASHBOARD_TIMEOUT_SECS", "0");
        let zero = DashboardClientConfig::from_env();
        std::env::set_var("DASHBOARD_TIMEOUT_SECS", " 3 ");
        let three = DashboardClientConfig::from_env();
        std::env::remove_var("DASHBOARD_TIMEOUT_SECS");

        assert_eq!(zero.timeout_secs, 10);
        assert_eq!(three.timeout_secs, 3);
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = DashboardClient::new(test_config())
            .unwrap()
            .with_base_url("http://127.0.0.1:5000/");
        assert_eq!(client.base_url(), "http://127.0.0.1:5000");
    }
}
