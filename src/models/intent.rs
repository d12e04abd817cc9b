//! 字段编辑意图
//!
//! 表单字段只能通过意图对象修改，控制器应用意图后向订阅者广播变更。

use super::form::FormKind;
use crate::state::ControllerState;

/// 单个字段的编辑
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEdit {
    AnalysisCode(String),
    AnalysisLanguage(String),
    AnalysisContext(String),
    SuggestionCode(String),
    SuggestionLanguage(String),
    SuggestionImprovementType(String),
    ProblemDescription(String),
    ProblemCodeContext(String),
    ProblemLanguage(String),
    ProblemUseQianwen(bool),
    Question(String),
}

impl FieldEdit {
    /// 编辑所属的表单
    pub fn form(&self) -> FormKind {
        match self {
            FieldEdit::AnalysisCode(_)
            | FieldEdit::AnalysisLanguage(_)
            | FieldEdit::AnalysisContext(_) => FormKind::Analysis,
            FieldEdit::SuggestionCode(_)
            | FieldEdit::SuggestionLanguage(_)
            | FieldEdit::SuggestionImprovementType(_) => FormKind::Suggestion,
            FieldEdit::ProblemDescription(_)
            | FieldEdit::ProblemCodeContext(_)
            | FieldEdit::ProblemLanguage(_)
            | FieldEdit::ProblemUseQianwen(_) => FormKind::Problem,
            FieldEdit::Question(_) => FormKind::DirectQuestion,
        }
    }

    /// 将编辑写入状态
    pub fn apply(self, state: &mut ControllerState) {
        match self {
            FieldEdit::AnalysisCode(v) => state.analysis.request.code = v,
            FieldEdit::AnalysisLanguage(v) => state.analysis.request.language = v,
            FieldEdit::AnalysisContext(v) => state.analysis.request.context = v,
            FieldEdit::SuggestionCode(v) => state.suggestion.request.code = v,
            FieldEdit::SuggestionLanguage(v) => state.suggestion.request.language = v,
            FieldEdit::SuggestionImprovementType(v) => {
                state.suggestion.request.improvement_type = v
            }
            FieldEdit::ProblemDescription(v) => state.problem.request.problem_description = v,
            FieldEdit::ProblemCodeContext(v) => state.problem.request.code_context = v,
            FieldEdit::ProblemLanguage(v) => state.problem.request.language = v,
            FieldEdit::ProblemUseQianwen(v) => state.problem.request.use_qianwen = v,
            FieldEdit::Question(v) => state.direct_question.request.question = v,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnalysisRequest, QuestionRequest};

    #[test]
    fn test_apply_touches_only_its_form() {
        let mut state = ControllerState::default();
        let edit = FieldEdit::ProblemUseQianwen(true);
        assert_eq!(edit.form(), FormKind::Problem);
        edit.apply(&mut state);

        assert!(state.problem.request.use_qianwen);
        assert_eq!(state.analysis.request, AnalysisRequest::default());
        assert_eq!(state.direct_question.request, QuestionRequest::default());
    }
}
