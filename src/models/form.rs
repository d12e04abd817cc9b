//! 表单种类与表单状态

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::api::endpoints;

/// 四种相互独立的表单
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormKind {
    /// 代码分析
    Analysis,
    /// 代码建议
    Suggestion,
    /// 问题解决
    Problem,
    /// 直接提问
    DirectQuestion,
}

impl FormKind {
    /// 全部表单
    pub const ALL: [FormKind; 4] = [
        FormKind::Analysis,
        FormKind::Suggestion,
        FormKind::Problem,
        FormKind::DirectQuestion,
    ];

    /// 表单标识
    pub fn as_str(self) -> &'static str {
        match self {
            FormKind::Analysis => "analysis",
            FormKind::Suggestion => "suggestion",
            FormKind::Problem => "problem",
            FormKind::DirectQuestion => "directQuestion",
        }
    }

    /// 请求路径（相对于基础 URL）
    pub fn endpoint(self) -> &'static str {
        match self {
            FormKind::Analysis => endpoints::ANALYZE,
            FormKind::Suggestion => endpoints::SUGGEST,
            FormKind::Problem => endpoints::SOLVE,
            FormKind::DirectQuestion => endpoints::ASK,
        }
    }

    /// 结果槽名称
    pub fn result_slot(self) -> &'static str {
        match self {
            FormKind::Analysis => "analysis",
            FormKind::Suggestion => "suggestion",
            FormKind::Problem => "solution",
            FormKind::DirectQuestion => "directQuestion",
        }
    }

    /// 必填字段名
    pub fn required_field(self) -> &'static str {
        match self {
            FormKind::Analysis | FormKind::Suggestion => "code",
            FormKind::Problem => "problem_description",
            FormKind::DirectQuestion => "question",
        }
    }

    /// 必填字段为空时的提示
    pub fn validation_notice(self) -> &'static str {
        match self {
            FormKind::Analysis | FormKind::Suggestion => "请输入代码",
            FormKind::Problem => "请描述您的问题",
            FormKind::DirectQuestion => "请输入您的问题",
        }
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 单个表单的状态机状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormStatus {
    Idle,
    Loading,
    Succeeded,
    Failed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        assert_eq!(FormKind::Analysis.endpoint(), "/code-analysis/analyze");
        assert_eq!(FormKind::Suggestion.endpoint(), "/code-suggestion/suggest");
        assert_eq!(FormKind::Problem.endpoint(), "/problem-solving/solve");
        assert_eq!(FormKind::DirectQuestion.endpoint(), "/direct-question/ask");
    }

    #[test]
    fn test_problem_form_uses_solution_slot() {
        assert_eq!(FormKind::Problem.result_slot(), "solution");
        assert_eq!(FormKind::Problem.required_field(), "problem_description");
    }
}
