//! 状态事件定义
//!
//! 控制器通过广播通道把状态变更和提示推送给视图层。

use serde::Serialize;
use std::fmt;

use super::form::{FormKind, FormStatus};

/// 提示类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    /// 必填字段为空
    Validation,
    /// 请求失败
    Request,
}

/// 需要用户确认的阻塞式提示
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub form: FormKind,
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn validation(form: FormKind, message: impl Into<String>) -> Self {
        Self {
            form,
            kind: NoticeKind::Validation,
            message: message.into(),
        }
    }

    pub fn request(form: FormKind, message: impl Into<String>) -> Self {
        Self {
            form,
            kind: NoticeKind::Request,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.form, self.message)
    }
}

/// 状态事件
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StateEvent {
    /// 某个表单的状态发生变化，视图应重新读取快照
    Changed { form: FormKind, status: FormStatus },
    /// 阻塞式提示
    Notice(Notice),
}

impl StateEvent {
    /// 事件所属的表单
    pub fn form(&self) -> FormKind {
        match self {
            StateEvent::Changed { form, .. } => *form,
            StateEvent::Notice(notice) => notice.form,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_form_routes_notices() {
        let changed = StateEvent::Changed {
            form: FormKind::Suggestion,
            status: FormStatus::Loading,
        };
        assert_eq!(changed.form(), FormKind::Suggestion);

        let notice = StateEvent::Notice(Notice::validation(FormKind::Problem, "请描述您的问题"));
        assert_eq!(notice.form(), FormKind::Problem);
        assert_eq!(
            notice,
            StateEvent::Notice(Notice {
                form: FormKind::Problem,
                kind: NoticeKind::Validation,
                message: "请描述您的问题".to_string(),
            })
        );
    }
}
