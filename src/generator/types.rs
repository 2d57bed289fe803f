use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::parser::{self, BlockMode, ParsedBlock};
use crate::{Result, StatsError};

/// 用户填写的原始任务表单
///
/// 三个文本块原样保存，生成配置时才解析
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkForm {
    pub is_test: bool,
    pub skip_first_request_data_row: bool,
    pub disable_parallel_calls: bool,
    pub url: String,
    pub method: String,
    pub headers: String,
    pub params: String,
    pub json_body: String,
    pub request_batch_size: String,
    pub request_batch_interval: String,
    pub response: String,
    pub placeholder_handler: String,
}

impl BenchmarkForm {
    /// 从 TOML 文件加载表单
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            StatsError::Config(format!(
                "Failed to read form file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// 已校验的配置，可直接序列化
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkConfig {
    pub is_test: bool,
    pub skip_first_request_data_row: bool,
    pub disable_parallel_calls: bool,
    pub url: String,
    pub method: String,
    pub json_body: String,
    pub request_batch_size: String,
    pub request_batch_interval: String,
    pub placeholder_handler: String,
    pub headers: ParsedBlock,
    pub params: ParsedBlock,
    /// 不会为空
    pub response: ParsedBlock,
}

impl TryFrom<&BenchmarkForm> for BenchmarkConfig {
    type Error = StatsError;

    fn try_from(form: &BenchmarkForm) -> Result<Self> {
        let headers = parser::parse_block(&form.headers, BlockMode::Request)?;
        let params = parser::parse_block(&form.params, BlockMode::Request)?;
        let response = parser::parse_block(&form.response, BlockMode::Response)?;

        tracing::debug!(
            headers = headers.len(),
            params = params.len(),
            response = response.len(),
            "Parsed form blocks"
        );

        Ok(Self {
            is_test: form.is_test,
            skip_first_request_data_row: form.skip_first_request_data_row,
            disable_parallel_calls: form.disable_parallel_calls,
            url: form.url.clone(),
            method: form.method.clone(),
            json_body: form.json_body.clone(),
            request_batch_size: form.request_batch_size.clone(),
            request_batch_interval: form.request_batch_interval.clone(),
            placeholder_handler: form.placeholder_handler.clone(),
            headers,
            params,
            response,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_form_from_toml() {
        let content = r#"
is_test = true
url = "https://api.example.com/orders"
method = "POST"
headers = """
Authorization: Bearer xyz
X-Id: 42
"""
response = "status: 200"
"#;
        let form = BenchmarkForm::from_toml(content).unwrap();
        assert!(form.is_test);
        assert!(!form.disable_parallel_calls);
        assert_eq!(form.method, "POST");
        assert_eq!(form.headers, "Authorization: Bearer xyz\nX-Id: 42\n");
        assert_eq!(form.params, "");
    }

    #[test]
    fn test_form_load_from_path() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"url = \"http://localhost\"\nresponse = \"ok: yes\"\n")
            .unwrap();
        temp_file.flush().unwrap();

        let form = BenchmarkForm::load_from_path(temp_file.path()).unwrap();
        assert_eq!(form.url, "http://localhost");
    }

    #[test]
    fn test_form_missing_file() {
        let err = BenchmarkForm::load_from_path("/nonexistent/form.toml").unwrap_err();
        assert!(matches!(err, StatsError::Config(_)));
    }

    #[test]
    fn test_config_from_form() {
        let form = BenchmarkForm {
            headers: "Accept: */*\nContent-Length: 10".to_string(),
            params: "page: 1".to_string(),
            response: "{token}: abc".to_string(),
            ..Default::default()
        };
        let config = BenchmarkConfig::try_from(&form).unwrap();
        assert_eq!(config.headers.len(), 1);
        assert_eq!(config.params.len(), 1);
        assert!(config.response.entries()[0].is_placeholder);
    }

    #[test]
    fn test_config_requires_response_headers() {
        let form = BenchmarkForm {
            headers: "Accept: */*".to_string(),
            ..Default::default()
        };
        let err = BenchmarkConfig::try_from(&form).unwrap_err();
        assert!(err.is_validation());
    }
}
