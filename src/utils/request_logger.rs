//! 表单请求日志记录器
//!
//! 记录每次表单提交到 JSONL 文件，便于调试和分析。

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::time::Instant;
use tracing::warn;
use uuid::Uuid;

use crate::error::ClientError;
use crate::models::FormKind;

/// 请求日志条目
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// 请求 ID
    pub request_id: String,
    /// 时间戳
    pub timestamp: DateTime<Utc>,
    /// 表单
    pub form: FormKind,
    /// 端点 URL
    pub endpoint: String,
    /// 请求体预览
    pub request_preview: String,
    /// 状态
    pub status: String,
    /// 持续时间（毫秒）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    /// HTTP 状态码
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// 响应预览
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_preview: Option<String>,
    /// 错误类型
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// 错误信息
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// 请求日志记录器
pub struct RequestLogger {
    log_path: PathBuf,
    max_entries: usize,
    file: Mutex<Option<File>>,
}

impl RequestLogger {
    /// 创建新的日志记录器
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        let log_dir = log_dir.into();

        // 确保目录存在
        if let Err(e) = fs::create_dir_all(&log_dir) {
            warn!("Failed to create request log dir {}: {}", log_dir.display(), e);
        }

        Self {
            log_path: log_dir.join("form_requests.jsonl"),
            max_entries: 1000,
            file: Mutex::new(None),
        }
    }

    /// 设置保留的最大条目数
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries;
        self
    }

    /// 生成请求 ID
    pub fn generate_request_id() -> String {
        Uuid::new_v4().simple().to_string()[..8].to_string()
    }

    /// 按字符截断字符串
    pub fn truncate(s: &str, max_chars: usize) -> String {
        match s.char_indices().nth(max_chars) {
            Some((idx, _)) => format!("{}...", &s[..idx]),
            None => s.to_string(),
        }
    }

    /// 记录请求开始
    pub fn log_request(
        &self,
        request_id: &str,
        form: FormKind,
        endpoint: &str,
        body: &Value,
    ) -> LogEntry {
        LogEntry {
            request_id: request_id.to_string(),
            timestamp: Utc::now(),
            form,
            endpoint: endpoint.to_string(),
            request_preview: Self::truncate(&body.to_string(), 200),
            status: "pending".to_string(),
            duration_ms: None,
            status_code: None,
            response_preview: None,
            error_type: None,
            error_message: None,
        }
    }

    /// 记录成功
    pub fn log_success(&self, mut entry: LogEntry, start_time: Instant, status_code: u16, body: &Value) {
        entry.status = "success".to_string();
        entry.duration_ms = Some(start_time.elapsed().as_millis() as u64);
        entry.status_code = Some(status_code);
        entry.response_preview = Some(Self::truncate(&body.to_string(), 300));
        self.write_entry(&entry);
    }

    /// 记录错误
    pub fn log_error(&self, mut entry: LogEntry, start_time: Instant, error: &ClientError) {
        entry.status = "error".to_string();
        entry.duration_ms = Some(start_time.elapsed().as_millis() as u64);
        entry.status_code = error.status();
        entry.error_type = Some(error.kind_name().to_string());
        entry.error_message = Some(Self::truncate(&error.to_string(), 500));
        self.write_entry(&entry);
    }

    /// 读取全部日志条目
    pub fn read_entries(&self) -> Vec<LogEntry> {
        let Ok(file) = File::open(&self.log_path) else {
            return Vec::new();
        };
        BufReader::new(file)
            .lines()
            .map_while(Result::ok)
            .filter_map(|line| serde_json::from_str(&line).ok())
            .collect()
    }

    /// 写入日志条目
    fn write_entry(&self, entry: &LogEntry) {
        let mut file_guard = self.file.lock();

        // 懒加载文件
        if file_guard.is_none() {
            match OpenOptions::new().create(true).append(true).open(&self.log_path) {
                Ok(f) => *file_guard = Some(f),
                Err(e) => warn!("Failed to open request log {}: {}", self.log_path.display(), e),
            }
        }

        if let Some(file) = file_guard.as_mut() {
            if let Ok(json) = serde_json::to_string(entry) {
                let _ = writeln!(file, "{}", json);
                let _ = file.flush();
            }
        }

        self.cleanup_if_needed(&mut file_guard);
    }

    /// 清理旧日志，只保留最近的 max_entries 条
    fn cleanup_if_needed(&self, file_guard: &mut Option<File>) {
        let Ok(file) = File::open(&self.log_path) else {
            return;
        };
        let lines: Vec<String> = BufReader::new(file).lines().map_while(Result::ok).collect();
        if lines.len() <= self.max_entries {
            return;
        }

        let keep_lines = &lines[lines.len() - self.max_entries..];
        if let Ok(mut file) = File::create(&self.log_path) {
            for line in keep_lines {
                let _ = writeln!(file, "{}", line);
            }
        }
        // 文件已被重写，下次写入时重新打开
        *file_guard = None;
    }
}
