//! 代码助手 API 客户端

use reqwest::{Client, Response};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, info};

use super::endpoints::{self, build_endpoint, fix_base_url};
use crate::config::AppConfig;
use crate::error::{extract_server_error, ClientError, ClientResult};
use crate::models::{ComplexityRequest, ExamplesRequest, ExplainRequest};
use crate::utils::request_logger::RequestLogger;

/// 请求 ID 头
pub const REQUEST_ID_HEADER: &str = "X-Request-ID";

/// 一次成功的 API 响应
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

/// 代码助手 API 客户端
///
/// 只负责发送请求和解析响应，不持有任何表单状态。
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// 创建新的客户端
    pub fn new(base_url: impl Into<String>, connect_timeout: Duration) -> ClientResult<Self> {
        let base_url = fix_base_url(&base_url.into());
        if base_url.is_empty() {
            return Err(ClientError::Config("API base URL is required".to_string()));
        }

        // 不设整体超时，在途请求一直等到服务端返回
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .pool_max_idle_per_host(5)
            .build()?;

        Ok(Self { client, base_url })
    }

    /// 根据配置创建客户端
    pub fn from_config(config: &AppConfig) -> ClientResult<Self> {
        Self::new(
            &config.api_base_url,
            Duration::from_secs(config.connect_timeout_secs),
        )
    }

    /// 规范化后的基础 URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 端点的完整 URL
    pub fn endpoint_url(&self, path: &str) -> String {
        build_endpoint(&self.base_url, path)
    }

    /// 以 JSON 形式 POST 请求体
    pub async fn post_json<T>(&self, path: &str, body: &T, request_id: &str) -> ClientResult<ApiResponse>
    where
        T: Serialize + ?Sized,
    {
        let url = self.endpoint_url(path);
        debug!(
            "POST {} request_id={} body={}",
            url,
            request_id,
            serde_json::to_string(body)
                .map(|s| RequestLogger::truncate(&s, 1000))
                .unwrap_or_default()
        );

        let response = self
            .client
            .post(&url)
            .header(REQUEST_ID_HEADER, request_id)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                error!("POST {} failed: request_id={}, error={}", url, request_id, e);
                ClientError::Http(e)
            })?;

        Self::handle_response(&url, request_id, response).await
    }

    /// GET 请求
    pub async fn get_json(&self, path: &str, request_id: &str) -> ClientResult<ApiResponse> {
        let url = self.endpoint_url(path);
        debug!("GET {} request_id={}", url, request_id);

        let response = self
            .client
            .get(&url)
            .header(REQUEST_ID_HEADER, request_id)
            .send()
            .await?;

        Self::handle_response(&url, request_id, response).await
    }

    /// 解析响应：非 JSON 的响应体按字符串保存，非 2xx 转为 API 错误
    async fn handle_response(url: &str, request_id: &str, response: Response) -> ClientResult<ApiResponse> {
        let status = response.status();
        let text = response.text().await?;
        let body = serde_json::from_str::<Value>(&text).unwrap_or(Value::String(text));

        if status.is_success() {
            info!("{} -> {} (request_id={})", url, status.as_u16(), request_id);
            return Ok(ApiResponse {
                status: status.as_u16(),
                body,
            });
        }

        let message = extract_server_error(&body);
        error!(
            "API error: url={}, status={}, request_id={}, error={}",
            url,
            status.as_u16(),
            request_id,
            message.as_deref().unwrap_or("<none>")
        );
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
            body: Some(body),
        })
    }

    /// 健康检查
    pub async fn health(&self) -> ClientResult<Value> {
        let request_id = RequestLogger::generate_request_id();
        Ok(self.get_json(endpoints::HEALTH, &request_id).await?.body)
    }

    /// 代码复杂度分析
    pub async fn analyze_complexity(&self, request: &ComplexityRequest) -> ClientResult<Value> {
        let request_id = RequestLogger::generate_request_id();
        Ok(self.post_json(endpoints::COMPLEXITY, request, &request_id).await?.body)
    }

    /// 获取代码示例
    pub async fn code_examples(&self, request: &ExamplesRequest) -> ClientResult<Value> {
        let request_id = RequestLogger::generate_request_id();
        Ok(self.post_json(endpoints::EXAMPLES, request, &request_id).await?.body)
    }

    /// 讲解编程概念
    pub async fn explain_concept(&self, request: &ExplainRequest) -> ClientResult<Value> {
        let request_id = RequestLogger::generate_request_id();
        Ok(self.post_json(endpoints::EXPLAIN, request, &request_id).await?.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{spawn_mock_api, Recorded};
    use axum::{
        http::{HeaderMap, StatusCode},
        routing::{get, post},
        Json, Router,
    };
    use serde_json::json;

    #[test]
    fn test_empty_base_url_rejected() {
        let err = ApiClient::new("  ", Duration::from_secs(1)).err().unwrap();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn test_endpoint_url() {
        let client = ApiClient::new("http://localhost:5000/api/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000/api");
        assert_eq!(
            client.endpoint_url(endpoints::SOLVE),
            "http://localhost:5000/api/problem-solving/solve"
        );
    }

    #[tokio::test]
    async fn test_health() {
        let router = Router::new().route(
            "/api/health",
            get(|| async { Json(json!({"status": "ok", "message": "服务正常运行"})) }),
        );
        let base_url = spawn_mock_api(router).await;
        let client = ApiClient::new(base_url, Duration::from_secs(5)).unwrap();

        let body = client.health().await.unwrap();
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_request_id_header_is_sent() {
        let seen = Recorded::default();
        let recorder = seen.clone();
        let router = Router::new().route(
            "/api/problem-solving/explain",
            post(move |headers: HeaderMap, Json(body): Json<Value>| {
                let recorder = recorder.clone();
                async move {
                    let id = headers
                        .get(REQUEST_ID_HEADER)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    recorder.push(json!({"id": id, "body": body}));
                    Json(json!({"explanation": "..."}))
                }
            }),
        );
        let base_url = spawn_mock_api(router).await;
        let client = ApiClient::new(base_url, Duration::from_secs(5)).unwrap();

        let request = ExplainRequest {
            concept: "closure".to_string(),
            language: "rust".to_string(),
            detail_level: "basic".to_string(),
        };
        client.explain_concept(&request).await.unwrap();

        let calls = seen.take();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0]["id"].as_str().unwrap().len(), 8);
        assert_eq!(
            calls[0]["body"],
            json!({"concept": "closure", "language": "rust", "detail_level": "basic"})
        );
    }

    #[tokio::test]
    async fn test_non_json_success_body_kept_as_string() {
        let router = Router::new().route(
            "/api/code-suggestion/examples",
            post(|| async { "plain answer" }),
        );
        let base_url = spawn_mock_api(router).await;
        let client = ApiClient::new(base_url, Duration::from_secs(5)).unwrap();

        let request = ExamplesRequest {
            concept: "iterator".to_string(),
            language: "python".to_string(),
            context: String::new(),
        };
        let body = client.code_examples(&request).await.unwrap();
        assert_eq!(body, Value::String("plain answer".to_string()));
    }

    #[tokio::test]
    async fn test_error_status_extracts_server_message() {
        let router = Router::new().route(
            "/api/code-analysis/complexity",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"error": "代码内容不能为空"})),
                )
            }),
        );
        let base_url = spawn_mock_api(router).await;
        let client = ApiClient::new(base_url, Duration::from_secs(5)).unwrap();

        let request = ComplexityRequest {
            code: String::new(),
            language: "python".to_string(),
        };
        let err = client.analyze_complexity(&request).await.unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.display_message(), "代码内容不能为空");
    }

    #[tokio::test]
    async fn test_error_without_json_body_uses_fallback() {
        let router = Router::new().route(
            "/api/code-analysis/complexity",
            post(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
        );
        let base_url = spawn_mock_api(router).await;
        let client = ApiClient::new(base_url, Duration::from_secs(5)).unwrap();

        let request = ComplexityRequest {
            code: "x = 1".to_string(),
            language: "python".to_string(),
        };
        let err = client.analyze_complexity(&request).await.unwrap_err();
        assert_eq!(err.status(), Some(502));
        assert_eq!(err.display_message(), crate::error::FALLBACK_ERROR_MESSAGE);
    }
}
