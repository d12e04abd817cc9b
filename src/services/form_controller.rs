//! 表单控制器
//!
//! 持有全部表单状态，负责校验、提交、清除，并把状态变更广播给视图层。
//! 四个表单共用同一个泛型提交流程。

use parking_lot::RwLock;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::broadcast;
use tracing::{error, info, warn};

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::error::{ClientError, ClientResult};
use crate::models::{
    AnalysisRequest, FieldEdit, FormKind, FormRequest, Notice, ProblemRequest, QuestionRequest,
    ResultPayload, StateEvent, SuggestionRequest,
};
use crate::state::ControllerState;
use crate::utils::request_logger::RequestLogger;

/// 事件通道容量
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// 表单控制器
///
/// 可廉价克隆，克隆体共享同一份状态和事件通道。
#[derive(Clone)]
pub struct FormController {
    client: ApiClient,
    state: Arc<RwLock<ControllerState>>,
    events: broadcast::Sender<StateEvent>,
    request_logger: Option<Arc<RequestLogger>>,
}

impl FormController {
    /// 创建新的控制器，表单数据取默认值
    pub fn new(client: ApiClient) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            client,
            state: Arc::new(RwLock::new(ControllerState::new())),
            events,
            request_logger: None,
        }
    }

    /// 根据配置创建控制器
    pub fn from_config(config: &AppConfig) -> ClientResult<Self> {
        let client = ApiClient::from_config(config)?;
        info!("Using code assistant API at {}", client.base_url());
        let mut controller = Self::new(client);
        if let Some(dir) = &config.request_log_dir {
            controller = controller.with_request_logger(RequestLogger::new(dir));
        }
        Ok(controller)
    }

    /// 启用请求日志
    pub fn with_request_logger(mut self, logger: RequestLogger) -> Self {
        self.request_logger = Some(Arc::new(logger));
        self
    }

    /// 底层 API 客户端
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// 订阅状态事件
    pub fn subscribe(&self) -> broadcast::Receiver<StateEvent> {
        self.events.subscribe()
    }

    /// 当前状态快照
    pub fn snapshot(&self) -> ControllerState {
        self.state.read().clone()
    }

    /// 应用字段编辑
    pub fn apply_edit(&self, edit: FieldEdit) {
        let form = edit.form();
        edit.apply(&mut self.state.write());
        self.publish_change(form);
    }

    /// 提交表单
    pub async fn submit(&self, kind: FormKind) -> ClientResult<ResultPayload> {
        match kind {
            FormKind::Analysis => self.submit_form::<AnalysisRequest>().await,
            FormKind::Suggestion => self.submit_form::<SuggestionRequest>().await,
            FormKind::Problem => self.submit_form::<ProblemRequest>().await,
            FormKind::DirectQuestion => self.submit_form::<QuestionRequest>().await,
        }
    }

    /// 清除表单：恢复默认数据并清空结果槽与错误槽
    ///
    /// 不触碰加载标志，在途请求返回后仍会写入结果槽。
    pub fn clear_form(&self, kind: FormKind) {
        self.state.write().clear(kind);
        info!("Cleared form: {}", kind);
        self.publish_change(kind);
    }

    /// 泛型提交流程
    async fn submit_form<R: FormRequest>(&self) -> ClientResult<ResultPayload> {
        let kind = R::KIND;

        // 校验并进入加载状态，锁不跨越 await
        let request = {
            let mut state = self.state.write();
            let slot = R::slot_mut(&mut state);
            if slot.request.required_value().is_empty() {
                None
            } else {
                slot.begin();
                Some(slot.request.clone())
            }
        };

        let Some(request) = request else {
            let message = kind.validation_notice();
            warn!("Form {} rejected: required field '{}' is empty", kind, kind.required_field());
            self.notify(Notice::validation(kind, message));
            return Err(ClientError::Validation {
                form: kind,
                message: message.to_string(),
            });
        };
        self.publish_change(kind);

        let request_id = RequestLogger::generate_request_id();
        let start_time = Instant::now();
        info!("Submitting form {}: request_id={}", kind, request_id);

        let log_entry = self.request_logger.as_ref().map(|logger| {
            let body = serde_json::to_value(&request).unwrap_or(Value::Null);
            logger.log_request(&request_id, kind, &self.client.endpoint_url(kind.endpoint()), &body)
        });

        let outcome = self.client.post_json(kind.endpoint(), &request, &request_id).await;

        match outcome {
            Ok(response) => {
                let payload = ResultPayload::new(response.body, response.status, &request_id);
                R::slot_mut(&mut self.state.write()).succeed(payload.clone());
                info!(
                    "Form {} completed: slot={}, request_id={}, elapsed={}ms",
                    kind,
                    kind.result_slot(),
                    request_id,
                    start_time.elapsed().as_millis()
                );
                if let (Some(logger), Some(entry)) = (&self.request_logger, log_entry) {
                    logger.log_success(entry, start_time, payload.status, &payload.body);
                }
                self.publish_change(kind);
                Ok(payload)
            }
            Err(e) => {
                let message = e.display_message();
                error!("Form {} failed: request_id={}, error={}", kind, request_id, e);
                R::slot_mut(&mut self.state.write()).fail(message.clone());
                if let (Some(logger), Some(entry)) = (&self.request_logger, log_entry) {
                    logger.log_error(entry, start_time, &e);
                }
                self.publish_change(kind);
                self.notify(Notice::request(kind, message));
                Err(e)
            }
        }
    }

    /// 广播状态变更
    fn publish_change(&self, form: FormKind) {
        let status = self.state.read().status(form);
        // 没有订阅者时发送失败，可以忽略
        let _ = self.events.send(StateEvent::Changed { form, status });
    }

    /// 广播阻塞式提示
    fn notify(&self, notice: Notice) {
        let _ = self.events.send(StateEvent::Notice(notice));
    }
}
