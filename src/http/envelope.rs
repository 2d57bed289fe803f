use serde_json::Value;

/// 会话失效时服务端返回的 `error` 代码
pub const REDIRECT_MARKER: &str = "authentication_needed";

pub const DEFAULT_FAILURE_MESSAGE: &str = "An error occurred";

/// 标准响应包装：`{ success, message?, error?, data? }`
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    /// 需要登录，不再读取响应体的其他内容
    Redirect { uri: Option<String> },
    /// `success` 为 false 或缺失
    Failure(String),
    Success {
        message: Option<String>,
        /// `data` 对象；旧版响应把字段放在顶层时为整个响应体
        data: Value,
    },
}

impl Envelope {
    pub fn from_value(value: Value) -> Self {
        if value.get("error").and_then(Value::as_str) == Some(REDIRECT_MARKER) {
            let uri = value
                .pointer("/data/redirect_uri")
                .and_then(Value::as_str)
                .map(str::to_string);
            return Envelope::Redirect { uri };
        }

        let success = value
            .get("success")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        if !success {
            let message = Self::text_field(&value, "message")
                .or_else(|| Self::text_field(&value, "error"))
                .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string());
            return Envelope::Failure(message);
        }

        let message = Self::text_field(&value, "message");
        let data = match value.get("data") {
            Some(data) if !data.is_null() => data.clone(),
            _ => value.clone(),
        };

        Envelope::Success { message, data }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, Envelope::Redirect { .. })
    }

    fn text_field(value: &Value, key: &str) -> Option<String> {
        value
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }
}
