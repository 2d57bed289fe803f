use crate::http::{Artifact, ArtifactRef, Envelope, PollData, SubmitData, SubmitRequest};
use crate::job::backend::StatsBackend;
use crate::job::status::{JobState, JobStatus};
use crate::{Result, StatsError};

pub const INVALID_REQUEST_ID_MESSAGE: &str = "Please enter a valid Request Id";
pub const NOT_COMPLETED_MESSAGE: &str = "Stats not completed yet";

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Submitted {
        request_id: String,
        message: Option<String>,
    },
    /// 需要登录，任务未提交
    Redirect(Option<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    Updated(JobStatus),
    /// 需要登录，跟踪状态不变
    Redirect(Option<String>),
}

/// 跟踪单个任务从提交到完成
///
/// 轮询由外部驱动：每次调用 [`JobTracker::poll`] 即一次轮询。
/// 调用失败时保持原有状态
pub struct JobTracker<B> {
    backend: B,
    state: JobState,
    status: Option<JobStatus>,
}

impl<B: StatsBackend> JobTracker<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: JobState::Idle,
            status: None,
        }
    }

    /// 跟踪在别处提交的任务
    pub fn attach(&mut self, request_id: &str) -> Result<()> {
        let request_id = Self::valid_request_id(Some(request_id))?;
        self.status = Some(JobStatus::new(request_id));
        self.state = JobState::Polling;
        Ok(())
    }

    pub async fn submit(&mut self, request: &SubmitRequest) -> Result<SubmitOutcome> {
        request.validate()?;

        let prior = self.state;
        self.state = JobState::Submitting;

        let result = self.send_submit(request).await;
        match &result {
            Ok(SubmitOutcome::Submitted { request_id, .. }) => {
                tracing::info!(request_id = %request_id, "Stats job submitted");
                self.status = Some(JobStatus::new(request_id.clone()));
                self.state = JobState::Polling;
            }
            Ok(SubmitOutcome::Redirect(_)) => self.state = prior,
            Err(e) => {
                tracing::warn!(error = %e, "Stats job submission refused");
                self.state = prior;
            }
        }
        result
    }

    async fn send_submit(&self, request: &SubmitRequest) -> Result<SubmitOutcome> {
        let body = self.backend.submit(request).await?;

        match Envelope::from_value(body) {
            Envelope::Redirect { uri } => Ok(SubmitOutcome::Redirect(uri)),
            Envelope::Failure(message) => Err(StatsError::Backend(message)),
            Envelope::Success { message, data } => {
                let data: SubmitData = serde_json::from_value(data)?;
                if data.request_id.trim().is_empty() {
                    return Err(StatsError::Backend(
                        "Server did not return a request id".to_string(),
                    ));
                }
                Ok(SubmitOutcome::Submitted {
                    request_id: data.request_id,
                    message,
                })
            }
        }
    }

    /// 对被跟踪任务发起一次状态请求
    ///
    /// 每次调用都会校验 request id。已完成的任务可以继续轮询，结果不变
    pub async fn poll(&mut self) -> Result<PollOutcome> {
        let request_id =
            Self::valid_request_id(self.status.as_ref().map(|s| s.request_id.as_str()))?
                .to_string();

        let body = self.backend.poll(&request_id).await?;

        let data = match Envelope::from_value(body) {
            Envelope::Redirect { uri } => return Ok(PollOutcome::Redirect(uri)),
            Envelope::Failure(message) => return Err(StatsError::Backend(message)),
            Envelope::Success { data, .. } => data,
        };
        let data: PollData = serde_json::from_value(data)?;

        let status = self
            .status
            .get_or_insert_with(|| JobStatus::new(request_id.clone()));
        status.apply(data);

        self.state = if status.is_completed {
            JobState::Completed
        } else {
            JobState::Polling
        };

        tracing::debug!(
            request_id = %request_id,
            status = status.status_line(),
            total = %status.total_display(),
            "Polled stats job"
        );
        Ok(PollOutcome::Updated(status.clone()))
    }

    /// 结果文件，任务完成前拒绝下载
    pub fn results_artifact(&self) -> Result<ArtifactRef> {
        let request_id = self.request_id_for_download()?;
        if !self.is_completed() {
            return Err(StatsError::validation(NOT_COMPLETED_MESSAGE));
        }
        Ok(ArtifactRef {
            artifact: Artifact::Results,
            request_id,
        })
    }

    /// 原始响应文件，任务存在即可下载
    pub fn raw_response_artifact(&self) -> Result<ArtifactRef> {
        Ok(ArtifactRef {
            artifact: Artifact::RawResponse,
            request_id: self.request_id_for_download()?,
        })
    }

    fn request_id_for_download(&self) -> Result<String> {
        Self::valid_request_id(self.request_id()).map(str::to_string)
    }

    fn valid_request_id(request_id: Option<&str>) -> Result<&str> {
        match request_id.map(str::trim) {
            Some(id) if !id.is_empty() => Ok(id),
            _ => Err(StatsError::validation(INVALID_REQUEST_ID_MESSAGE)),
        }
    }

    pub fn state(&self) -> JobState {
        self.state
    }

    pub fn status(&self) -> Option<&JobStatus> {
        self.status.as_ref()
    }

    pub fn request_id(&self) -> Option<&str> {
        self.status.as_ref().map(|s| s.request_id.as_str())
    }

    pub fn is_completed(&self) -> bool {
        self.status.as_ref().is_some_and(|s| s.is_completed)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}
