use thiserror::Error;

/// 调用本身失败时展示给用户的提示
pub const GENERIC_FAILURE_MESSAGE: &str =
    "Something went wrong. Please check the logs for error details.";

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Backend(String),

    #[error("HTTP 请求失败: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("JSON 解析错误: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL 解析错误: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("配置错误: {0}")]
    Config(String),

    #[error("Job still running after {0} polls")]
    PollLimit(u32),

    #[error("{0}")]
    Other(String),
}

impl StatsError {
    pub fn validation(message: impl Into<String>) -> Self {
        StatsError::Validation(message.into())
    }

    /// 面向最终用户的文本。调用本身的失败统一为通用提示，细节写入日志
    pub fn user_message(&self) -> String {
        match self {
            StatsError::Validation(msg) | StatsError::Backend(msg) => msg.clone(),
            StatsError::Transport(_) | StatsError::Json(_) => {
                GENERIC_FAILURE_MESSAGE.to_string()
            }
            other => other.to_string(),
        }
    }

    /// 在发起网络请求之前产生的错误返回 true
    pub fn is_validation(&self) -> bool {
        matches!(self, StatsError::Validation(_))
    }
}

impl From<anyhow::Error> for StatsError {
    fn from(err: anyhow::Error) -> Self {
        StatsError::Other(err.to_string())
    }
}

impl From<toml::de::Error> for StatsError {
    fn from(err: toml::de::Error) -> Self {
        StatsError::Config(err.to_string())
    }
}

/// statspost crate 的 Result 类型
pub type Result<T> = std::result::Result<T, StatsError>;
