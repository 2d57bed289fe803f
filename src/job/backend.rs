use std::future::Future;

use serde_json::Value;

use crate::Result;
use crate::http::SubmitRequest;

/// 任务需要服务端提供的两个调用
///
/// 实现方返回原始 JSON 响应体。解码、重定向检测和状态变更
/// 由 [`JobTracker`](crate::job::JobTracker) 负责
pub trait StatsBackend {
    fn submit(&self, request: &SubmitRequest) -> impl Future<Output = Result<Value>> + Send;

    fn poll(&self, request_id: &str) -> impl Future<Output = Result<Value>> + Send;
}
