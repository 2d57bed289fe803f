use std::path::{Path, PathBuf};
use std::time::Duration;

use serde_json::Value;
use tokio::fs;

use crate::Result;
use crate::http::request::SubmitRequest;
use crate::http::types::{ArtifactRef, POLL_PATH, SUBMIT_PATH};
use crate::job::StatsBackend;
use crate::settings::ServerSettings;

/// 统计服务的 HTTP 客户端
#[derive(Clone)]
pub struct Client {
    inner: reqwest::Client,
    base_url: url::Url,
}

impl Client {
    pub fn new(settings: &ServerSettings) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;
        Ok(Self {
            inner,
            base_url: url::Url::parse(&settings.base_url)?,
        })
    }

    pub fn base_url(&self) -> &url::Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<url::Url> {
        Ok(self.base_url.join(path)?)
    }

    pub fn artifact_url(&self, artifact: &ArtifactRef) -> Result<url::Url> {
        self.endpoint(&artifact.path())
    }

    /// 提交任务，返回未解码的响应体
    pub async fn submit_job(&self, request: &SubmitRequest) -> Result<Value> {
        let url = self.endpoint(SUBMIT_PATH)?;
        tracing::debug!(%url, "Submitting stats job");

        let response = self
            .inner
            .post(url)
            .multipart(request.to_form()?)
            .send()
            .await?;

        tracing::debug!(status = response.status().as_u16(), "Submit response");
        Ok(response.json().await?)
    }

    /// 查询任务当前状态，返回未解码的响应体
    pub async fn poll_job(&self, request_id: &str) -> Result<Value> {
        let mut url = self.endpoint(POLL_PATH)?;
        url.query_pairs_mut().append_pair("stats_id", request_id);
        tracing::debug!(%url, "Polling stats job");

        let response = self.inner.post(url).send().await?;
        Ok(response.json().await?)
    }

    /// 下载产物到 `output_dir`，保留服务端文件名
    pub async fn download(&self, artifact: &ArtifactRef, output_dir: &Path) -> Result<PathBuf> {
        let url = self.artifact_url(artifact)?;
        tracing::info!(%url, "Downloading {}", artifact.artifact);

        let bytes = self
            .inner
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        fs::create_dir_all(output_dir).await?;
        let target = output_dir.join(artifact.file_name());
        fs::write(&target, &bytes).await?;

        tracing::debug!(path = %target.display(), bytes = bytes.len(), "Artifact saved");
        Ok(target)
    }
}

impl StatsBackend for Client {
    async fn submit(&self, request: &SubmitRequest) -> Result<Value> {
        self.submit_job(request).await
    }

    async fn poll(&self, request_id: &str) -> Result<Value> {
        self.poll_job(request_id).await
    }
}
