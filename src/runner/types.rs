use crate::job::JobStatus;

/// 轮询循环的结束方式
#[derive(Debug, Clone, PartialEq)]
pub enum WatchOutcome {
    Completed {
        status: JobStatus,
        attempts: u32,
    },
    /// 服务器要求重新登录，轮询已停止
    Redirect(Option<String>),
}

impl WatchOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, WatchOutcome::Completed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_completed() {
        let completed = WatchOutcome::Completed {
            status: JobStatus::new("abc"),
            attempts: 1,
        };
        assert!(completed.is_completed());
        assert!(!WatchOutcome::Redirect(None).is_completed());
    }
}
