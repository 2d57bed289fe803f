use std::fs;
use std::path::Path;

use reqwest::multipart::{Form, Part};

use crate::{Result, StatsError};

pub const MISSING_REQUEST_DATA_MESSAGE: &str =
    "Please upload request data file or enter request data text";
pub const MISSING_CONFIGURATION_MESSAGE: &str = "Please enter valid xml configuration";

/// 内存中的上传文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self { file_name, bytes })
    }
}

/// 任务配置的来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationSource {
    /// 由表单生成的文档
    Inline(String),
    /// 手写的配置文件，原样上传
    File(Upload),
}

impl ConfigurationSource {
    fn is_empty(&self) -> bool {
        match self {
            ConfigurationSource::Inline(xml) => xml.trim().is_empty(),
            ConfigurationSource::File(upload) => upload.bytes.is_empty(),
        }
    }
}

/// 提交任务所需的全部内容
///
/// 请求数据可以是 CSV 文件、内联文本或两者兼有，
/// 两者都存在时服务端优先使用文本
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitRequest {
    pub configuration: Option<ConfigurationSource>,
    pub data_file: Option<Upload>,
    pub data_text: Option<String>,
}

impl SubmitRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_configuration(mut self, xml: impl Into<String>) -> Self {
        self.configuration = Some(ConfigurationSource::Inline(xml.into()));
        self
    }

    pub fn with_configuration_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        self.configuration = Some(ConfigurationSource::File(Upload::read(path)?));
        Ok(self)
    }

    pub fn with_data_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        self.data_file = Some(Upload::read(path)?);
        Ok(self)
    }

    pub fn with_data_upload(mut self, upload: Upload) -> Self {
        self.data_file = Some(upload);
        self
    }

    pub fn with_data_text(mut self, text: impl Into<String>) -> Self {
        self.data_text = Some(text.into());
        self
    }

    /// 本地前置校验，在发送任何请求之前执行
    pub fn validate(&self) -> Result<()> {
        let has_file = self.data_file.as_ref().is_some_and(|f| !f.bytes.is_empty());
        let has_text = self.data_text.as_ref().is_some_and(|t| !t.is_empty());
        if !has_file && !has_text {
            return Err(StatsError::validation(MISSING_REQUEST_DATA_MESSAGE));
        }

        match &self.configuration {
            Some(source) if !source.is_empty() => Ok(()),
            _ => Err(StatsError::validation(MISSING_CONFIGURATION_MESSAGE)),
        }
    }

    /// 按提交接口要求的格式构建 multipart 请求体
    pub fn to_form(&self) -> Result<Form> {
        let mut form = Form::new();

        match &self.configuration {
            Some(ConfigurationSource::Inline(xml)) => {
                form = form.text("configuration", xml.clone());
            }
            Some(ConfigurationSource::File(upload)) => {
                let part = Part::bytes(upload.bytes.clone())
                    .file_name(upload.file_name.clone())
                    .mime_str("text/xml")?;
                form = form.part("configuration_file", part);
            }
            None => {}
        }

        if let Some(upload) = &self.data_file {
            let part = Part::bytes(upload.bytes.clone())
                .file_name(upload.file_name.clone())
                .mime_str("text/csv")?;
            form = form.part("request_data", part);
        }

        // 只要存在文本部分服务端就会使用它，即使为空
        if let Some(text) = self.data_text.as_ref().filter(|t| !t.is_empty()) {
            form = form.text("request_data_text", text.clone());
        }

        Ok(form)
    }
}
