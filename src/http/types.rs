use std::fmt;

use serde::{Deserialize, Serialize};

pub const SUBMIT_PATH: &str = "/api/v1/stats";
pub const POLL_PATH: &str = "/api/v1/csv/parse";
pub const UPLOADS_PATH: &str = "/uploads";

/// 提交成功时的数据
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SubmitData {
    pub request_id: String,
}

/// 轮询成功时的数据，缺失字段使用默认值
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PollData {
    /// 服务端渲染的表格，原样透传
    pub table_data: String,
    /// 服务端返回的汇总值
    pub total: serde_json::Value,
    pub is_completed: bool,
}

/// 服务端为每个任务生成的文件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    /// 所有原始响应，任务运行时持续追加
    RawResponse,
    /// 汇总结果，任务完成后才完整
    Results,
}

impl Artifact {
    pub fn file_name(&self, request_id: &str) -> String {
        match self {
            Artifact::RawResponse => format!("RawResponse_{}.txt", request_id),
            Artifact::Results => format!("{}.csv", request_id),
        }
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Artifact::RawResponse => write!(f, "raw response"),
            Artifact::Results => write!(f, "results"),
        }
    }
}

/// 绑定到某个任务的产物
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactRef {
    pub artifact: Artifact,
    pub request_id: String,
}

impl ArtifactRef {
    pub fn file_name(&self) -> String {
        self.artifact.file_name(&self.request_id)
    }

    /// 相对于服务端根路径的地址
    pub fn path(&self) -> String {
        format!("{}/{}", UPLOADS_PATH, self.file_name())
    }
}
