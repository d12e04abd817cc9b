//! 数据模型模块
//!
//! 表单种类、请求载荷、字段编辑意图与状态事件。

mod events;
mod form;
mod intent;
mod requests;
mod result;

pub use events::{Notice, NoticeKind, StateEvent};
pub use form::{FormKind, FormStatus};
pub use intent::FieldEdit;
pub use requests::*;
pub use result::ResultPayload;
