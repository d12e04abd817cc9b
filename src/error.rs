//! 统一错误处理模块
//!
//! 定义客户端错误类型，并提供面向用户的错误消息提取。

use serde_json::Value;
use thiserror::Error;

use crate::models::FormKind;

/// 请求失败且服务端未给出 `error` 字段时的兜底提示
pub const FALLBACK_ERROR_MESSAGE: &str = "请求失败，请稍后再试";

/// 客户端错误枚举
#[derive(Error, Debug)]
pub enum ClientError {
    /// 必填字段为空，未发起网络请求
    #[error("{message}")]
    Validation { form: FormKind, message: String },

    /// API 返回非 2xx 状态
    #[error("API 错误 ({status}): {}", .message.as_deref().unwrap_or("<none>"))]
    Api {
        status: u16,
        /// 服务端 `error` 字段（若存在）
        message: Option<String>,
        /// 原始响应体
        body: Option<Value>,
    },

    /// HTTP 传输错误
    #[error("HTTP 请求失败: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON 序列化错误
    #[error("JSON 解析失败: {0}")]
    Json(#[from] serde_json::Error),

    /// 配置相关错误
    #[error("配置错误: {0}")]
    Config(String),
}

impl ClientError {
    /// 面向用户的错误消息
    ///
    /// 优先使用服务端提供的 `error` 字段，否则返回兜底提示。
    /// 校验错误直接返回校验提示。
    pub fn display_message(&self) -> String {
        match self {
            ClientError::Validation { message, .. } => message.clone(),
            ClientError::Api {
                message: Some(msg), ..
            } => msg.clone(),
            _ => FALLBACK_ERROR_MESSAGE.to_string(),
        }
    }

    /// HTTP 状态码（仅 API 错误有）
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// 错误类型名，用于请求日志
    pub fn kind_name(&self) -> &'static str {
        match self {
            ClientError::Validation { .. } => "validation",
            ClientError::Api { .. } => "api",
            ClientError::Http(_) => "http",
            ClientError::Json(_) => "json",
            ClientError::Config(_) => "config",
        }
    }
}

/// 从响应体中提取服务端的 `error` 字段
///
/// 字段缺失或为假值（null、空字符串、false、0）时返回 `None`；
/// 其余非字符串值按 JSON 文本返回。
pub fn extract_server_error(body: &Value) -> Option<String> {
    match body.get("error")? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

/// 便捷类型别名
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_server_error() {
        assert_eq!(
            extract_server_error(&json!({"error": "rate limited"})),
            Some("rate limited".to_string())
        );
        assert_eq!(extract_server_error(&json!({"error": ""})), None);
        assert_eq!(extract_server_error(&json!({"error": null})), None);
        assert_eq!(extract_server_error(&json!({"message": "x"})), None);
        assert_eq!(extract_server_error(&json!({"error": 0})), None);
        assert_eq!(extract_server_error(&json!({"error": false})), None);
        assert_eq!(extract_server_error(&json!({"error": 429})), Some("429".to_string()));
        assert_eq!(extract_server_error(&json!("plain text")), None);
        assert_eq!(
            extract_server_error(&json!({"error": {"code": 1}})),
            Some(r#"{"code":1}"#.to_string())
        );
    }

    #[test]
    fn test_display_message_prefers_server_error() {
        let err = ClientError::Api {
            status: 500,
            message: Some("rate limited".to_string()),
            body: None,
        };
        assert_eq!(err.display_message(), "rate limited");
        assert_eq!(err.status(), Some(500));

        let err = ClientError::Api {
            status: 502,
            message: None,
            body: None,
        };
        assert_eq!(err.display_message(), FALLBACK_ERROR_MESSAGE);
    }

    #[test]
    fn test_api_error_to_string() {
        let err = ClientError::Api {
            status: 500,
            message: Some("rate limited".to_string()),
            body: None,
        };
        assert_eq!(err.to_string(), "API 错误 (500): rate limited");

        let err = ClientError::Api {
            status: 502,
            message: None,
            body: Some(json!("upstream down")),
        };
        assert_eq!(err.to_string(), "API 错误 (502): <none>");
    }

    #[test]
    fn test_display_message_for_validation() {
        let err = ClientError::Validation {
            form: FormKind::DirectQuestion,
            message: "请输入您的问题".to_string(),
        };
        assert_eq!(err.display_message(), "请输入您的问题");
        assert_eq!(err.kind_name(), "validation");
        assert_eq!(err.status(), None);
    }
}
