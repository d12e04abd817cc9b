//! 测试辅助：进程内模拟 API 服务

use axum::Router;
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;

/// 在随机端口启动模拟服务，返回形如 `http://127.0.0.1:port/api` 的基础 URL
pub async fn spawn_mock_api(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/api", addr)
}

/// 记录模拟服务收到的请求体
#[derive(Clone, Default)]
pub struct Recorded(Arc<Mutex<Vec<Value>>>);

impl Recorded {
    pub fn push(&self, value: Value) {
        self.0.lock().push(value);
    }

    pub fn len(&self) -> usize {
        self.0.lock().len()
    }

    pub fn take(&self) -> Vec<Value> {
        std::mem::take(&mut *self.0.lock())
    }
}
