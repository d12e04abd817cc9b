//! 结果槽载荷

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// 一次成功请求的响应
///
/// `body` 原样保存服务端响应体，其结构由远端 API 决定。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultPayload {
    /// 原始响应体
    pub body: Value,
    /// HTTP 状态码
    pub status: u16,
    /// 请求 ID
    pub request_id: String,
    /// 接收时间
    pub received_at: DateTime<Utc>,
}

impl ResultPayload {
    pub fn new(body: Value, status: u16, request_id: impl Into<String>) -> Self {
        Self {
            body,
            status,
            request_id: request_id.into(),
            received_at: Utc::now(),
        }
    }
}
