//! API 客户端模块
//!
//! 封装对远端代码助手服务的 HTTP 调用。

mod client;
pub mod endpoints;

pub use client::{ApiClient, ApiResponse, REQUEST_ID_HEADER};
