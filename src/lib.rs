//! AI Code Assistant - Rust 客户端
//!
//! 收集用户输入（源代码、问题描述、自由提问），提交给远端代码助手 API，
//! 并以表单为单位维护加载状态、结果和错误。

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

#[cfg(test)]
mod test_support;

pub use api::ApiClient;
pub use config::AppConfig;
pub use error::{ClientError, ClientResult};
pub use models::{FieldEdit, FormKind, FormStatus, Notice, NoticeKind, StateEvent};
pub use services::FormController;
pub use state::ControllerState;
