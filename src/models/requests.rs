//! 请求载荷定义
//!
//! 四个表单的请求体，以及辅助端点（复杂度、示例、概念解释）的请求体。

use serde::{Deserialize, Serialize};

use super::form::FormKind;
use crate::state::{ControllerState, FormState};

/// 默认语言
pub const DEFAULT_LANGUAGE: &str = "python";

/// 默认改进类型
pub const DEFAULT_IMPROVEMENT_TYPE: &str = "general";

/// 服务端支持的改进类型
pub const IMPROVEMENT_TYPES: &[&str] = &["general", "performance", "readability", "security"];

/// 默认讲解深度
pub const DEFAULT_DETAIL_LEVEL: &str = "medium";

/// 服务端支持的讲解深度
pub const DETAIL_LEVELS: &[&str] = &["basic", "medium", "advanced"];

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_improvement_type() -> String {
    DEFAULT_IMPROVEMENT_TYPE.to_string()
}

fn default_detail_level() -> String {
    DEFAULT_DETAIL_LEVEL.to_string()
}

/// 可提交的表单请求
///
/// 把端点、必填字段和结果槽选择器收拢为一个 trait，
/// 控制器只需一个泛型提交流程即可服务全部四个表单。
pub trait FormRequest: Serialize + Default + Clone + Send + Sync + 'static {
    /// 对应的表单
    const KIND: FormKind;

    /// 必填字段的当前值
    fn required_value(&self) -> &str;

    /// 从控制器状态中选出本表单
    fn slot(state: &ControllerState) -> &FormState<Self>;

    /// 从控制器状态中选出本表单（可变）
    fn slot_mut(state: &mut ControllerState) -> &mut FormState<Self>;
}

/// 代码分析请求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub code: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub context: String,
}

impl Default for AnalysisRequest {
    fn default() -> Self {
        Self {
            code: String::new(),
            language: default_language(),
            context: String::new(),
        }
    }
}

impl FormRequest for AnalysisRequest {
    const KIND: FormKind = FormKind::Analysis;

    fn required_value(&self) -> &str {
        &self.code
    }

    fn slot(state: &ControllerState) -> &FormState<Self> {
        &state.analysis
    }

    fn slot_mut(state: &mut ControllerState) -> &mut FormState<Self> {
        &mut state.analysis
    }
}

/// 代码建议请求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionRequest {
    pub code: String,
    #[serde(default = "default_language")]
    pub language: String,
    /// general, performance, readability, security
    #[serde(default = "default_improvement_type")]
    pub improvement_type: String,
}

impl Default for SuggestionRequest {
    fn default() -> Self {
        Self {
            code: String::new(),
            language: default_language(),
            improvement_type: default_improvement_type(),
        }
    }
}

impl FormRequest for SuggestionRequest {
    const KIND: FormKind = FormKind::Suggestion;

    fn required_value(&self) -> &str {
        &self.code
    }

    fn slot(state: &ControllerState) -> &FormState<Self> {
        &state.suggestion
    }

    fn slot_mut(state: &mut ControllerState) -> &mut FormState<Self> {
        &mut state.suggestion
    }
}

/// 问题解决请求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemRequest {
    pub problem_description: String,
    #[serde(default)]
    pub code_context: String,
    #[serde(default = "default_language")]
    pub language: String,
    /// 是否改用千问模型求解
    #[serde(default)]
    pub use_qianwen: bool,
}

impl Default for ProblemRequest {
    fn default() -> Self {
        Self {
            problem_description: String::new(),
            code_context: String::new(),
            language: default_language(),
            use_qianwen: false,
        }
    }
}

impl FormRequest for ProblemRequest {
    const KIND: FormKind = FormKind::Problem;

    fn required_value(&self) -> &str {
        &self.problem_description
    }

    fn slot(state: &ControllerState) -> &FormState<Self> {
        &state.problem
    }

    fn slot_mut(state: &mut ControllerState) -> &mut FormState<Self> {
        &mut state.problem
    }
}

/// 直接提问请求
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRequest {
    pub question: String,
}

impl FormRequest for QuestionRequest {
    const KIND: FormKind = FormKind::DirectQuestion;

    fn required_value(&self) -> &str {
        &self.question
    }

    fn slot(state: &ControllerState) -> &FormState<Self> {
        &state.direct_question
    }

    fn slot_mut(state: &mut ControllerState) -> &mut FormState<Self> {
        &mut state.direct_question
    }
}

/// 复杂度分析请求
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplexityRequest {
    pub code: String,
    pub language: String,
}

/// 代码示例请求
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExamplesRequest {
    pub concept: String,
    pub language: String,
    pub context: String,
}

/// 概念讲解请求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplainRequest {
    pub concept: String,
    #[serde(default = "default_language")]
    pub language: String,
    /// basic, medium, advanced
    #[serde(default = "default_detail_level")]
    pub detail_level: String,
}
