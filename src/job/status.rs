use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::http::PollData;

/// 被跟踪任务所处的生命周期阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum JobState {
    Idle,
    Submitting,
    Polling,
    Completed,
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            JobState::Idle => "idle",
            JobState::Submitting => "submitting",
            JobState::Polling => "polling",
            JobState::Completed => "completed",
        };
        write!(f, "{label}")
    }
}

/// 服务端任务最近一次已知的状态
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobStatus {
    pub request_id: String,
    pub is_completed: bool,
    /// 服务端返回的汇总值，首次轮询前为 `Null`
    pub total: Value,
    /// 服务端渲染的表格，原样透传
    pub table_markup: String,
}

impl JobStatus {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            is_completed: false,
            total: Value::Null,
            table_markup: String::new(),
        }
    }

    pub fn apply(&mut self, data: PollData) {
        self.is_completed = data.is_completed;
        self.total = data.total;
        self.table_markup = data.table_data;
    }

    pub fn status_line(&self) -> &'static str {
        if self.is_completed {
            "COMPLETED"
        } else {
            "RUNNING"
        }
    }

    /// 展示给用户的总数，字符串去掉引号
    pub fn total_display(&self) -> String {
        match &self.total {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    pub fn summary_line(&self) -> String {
        self.summary_with(self.status_line())
    }

    /// 汇总行，状态部分由调用方渲染
    pub fn summary_with(&self, status: impl fmt::Display) -> String {
        format!("TOTAL : {}  STATUS : {}", self.total_display(), status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_status_is_running() {
        let status = JobStatus::new("abc");
        assert!(!status.is_completed);
        assert_eq!(status.status_line(), "RUNNING");
        assert_eq!(status.summary_line(), "TOTAL : null  STATUS : RUNNING");
    }

    #[test]
    fn test_apply_reflects_latest_response() {
        let mut status = JobStatus::new("abc");
        status.apply(PollData {
            table_data: "<table/>".to_string(),
            total: json!(12),
            is_completed: true,
        });
        assert_eq!(status.status_line(), "COMPLETED");
        assert_eq!(status.summary_line(), "TOTAL : 12  STATUS : COMPLETED");
        assert_eq!(status.table_markup, "<table/>");
    }

    #[test]
    fn test_total_display_strips_string_quotes() {
        let mut status = JobStatus::new("abc");
        status.total = json!("40 / 50");
        assert_eq!(status.total_display(), "40 / 50");
    }
}
