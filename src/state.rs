//! 控制器状态管理
//!
//! 定义四个表单各自的请求数据、加载标志、结果槽和错误槽。

use serde::Serialize;

use crate::models::{
    AnalysisRequest, FormKind, FormStatus, ProblemRequest, QuestionRequest, ResultPayload,
    SuggestionRequest,
};

/// 单个表单的状态
#[derive(Debug, Clone, Default, Serialize)]
pub struct FormState<R> {
    /// 当前表单数据
    pub request: R,
    /// 是否有请求在途
    pub loading: bool,
    /// 最近一次成功的响应
    pub result: Option<ResultPayload>,
    /// 最近一次失败的提示
    pub error: Option<String>,
}

impl<R: Default> FormState<R> {
    /// 提交开始：置加载标志，清空错误与旧结果
    pub(crate) fn begin(&mut self) {
        self.loading = true;
        self.error = None;
        self.result = None;
    }

    /// 请求成功
    pub(crate) fn succeed(&mut self, payload: ResultPayload) {
        self.result = Some(payload);
        self.error = None;
        self.loading = false;
    }

    /// 请求失败，结果槽保持不动
    pub(crate) fn fail(&mut self, message: String) {
        self.error = Some(message);
        self.loading = false;
    }

    /// 清除表单：数据恢复默认值，清空结果和错误，加载标志不动
    pub(crate) fn clear(&mut self) {
        self.request = R::default();
        self.result = None;
        self.error = None;
    }
}

/// 与请求类型无关的表单视图
pub trait FormView {
    fn loading(&self) -> bool;
    fn result(&self) -> Option<&ResultPayload>;
    fn error(&self) -> Option<&str>;
    fn status(&self) -> FormStatus;
}

impl<R: Serialize> FormView for FormState<R> {
    fn loading(&self) -> bool {
        self.loading
    }

    fn result(&self) -> Option<&ResultPayload> {
        self.result.as_ref()
    }

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn status(&self) -> FormStatus {
        if self.loading {
            FormStatus::Loading
        } else if self.error.is_some() {
            FormStatus::Failed
        } else if self.result.is_some() {
            FormStatus::Succeeded
        } else {
            FormStatus::Idle
        }
    }
}

/// 控制器全部状态
///
/// 四个表单彼此独立，互不加锁等待。
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControllerState {
    pub analysis: FormState<AnalysisRequest>,
    pub suggestion: FormState<SuggestionRequest>,
    pub problem: FormState<ProblemRequest>,
    pub direct_question: FormState<QuestionRequest>,
}

impl ControllerState {
    /// 创建带默认值的状态
    pub fn new() -> Self {
        Self::default()
    }

    /// 按表单取视图
    pub fn form(&self, kind: FormKind) -> &dyn FormView {
        match kind {
            FormKind::Analysis => &self.analysis,
            FormKind::Suggestion => &self.suggestion,
            FormKind::Problem => &self.problem,
            FormKind::DirectQuestion => &self.direct_question,
        }
    }

    pub fn loading(&self, kind: FormKind) -> bool {
        self.form(kind).loading()
    }

    pub fn result(&self, kind: FormKind) -> Option<&ResultPayload> {
        self.form(kind).result()
    }

    pub fn error(&self, kind: FormKind) -> Option<&str> {
        self.form(kind).error()
    }

    pub fn status(&self, kind: FormKind) -> FormStatus {
        self.form(kind).status()
    }

    /// 清除指定表单
    pub(crate) fn clear(&mut self, kind: FormKind) {
        match kind {
            FormKind::Analysis => self.analysis.clear(),
            FormKind::Suggestion => self.suggestion.clear(),
            FormKind::Problem => self.problem.clear(),
            FormKind::DirectQuestion => self.direct_question.clear(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_initial_state_is_idle() {
        let state = ControllerState::new();
        for kind in FormKind::ALL {
            assert_eq!(state.status(kind), FormStatus::Idle);
            assert!(!state.loading(kind));
            assert!(state.result(kind).is_none());
            assert!(state.error(kind).is_none());
        }
    }

    #[test]
    fn test_lifecycle_transitions() {
        let mut state = ControllerState::new();
        state.analysis.begin();
        assert_eq!(state.status(FormKind::Analysis), FormStatus::Loading);

        state.analysis.succeed(ResultPayload::new(json!({"result": "ok"}), 200, "abcd1234"));
        assert_eq!(state.status(FormKind::Analysis), FormStatus::Succeeded);

        state.analysis.begin();
        assert!(state.result(FormKind::Analysis).is_none());
        state.analysis.fail("boom".to_string());
        assert_eq!(state.status(FormKind::Analysis), FormStatus::Failed);
        assert_eq!(state.error(FormKind::Analysis), Some("boom"));
        assert!(state.result(FormKind::Analysis).is_none());
    }

    #[test]
    fn test_clear_keeps_loading_flag() {
        let mut state = ControllerState::new();
        state.suggestion.request.code = "x = 1".to_string();
        state.suggestion.begin();

        state.clear(FormKind::Suggestion);
        assert!(state.loading(FormKind::Suggestion));
        assert_eq!(state.suggestion.request, SuggestionRequest::default());
    }
}
