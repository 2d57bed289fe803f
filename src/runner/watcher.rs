use std::time::Duration;

use crate::job::{JobTracker, PollOutcome, StatsBackend};
use crate::runner::reporter::StatusReporter;
use crate::runner::types::WatchOutcome;
use crate::settings::PollSettings;
use crate::{Result, StatsError};

/// 定时轮询被跟踪的任务直到完成
///
/// 单次轮询失败只报告，下一次照常进行。
/// 登录重定向、本地校验错误或达到次数上限时提前结束循环
#[derive(Debug, Clone)]
pub struct Watcher {
    interval: Duration,
    max_interval: Duration,
    max_attempts: Option<u32>,
    backoff: bool,
}

impl Watcher {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            max_interval: interval,
            max_attempts: None,
            backoff: false,
        }
    }

    pub fn from_settings(settings: &PollSettings) -> Self {
        Self {
            interval: settings.interval(),
            max_interval: settings.max_interval(),
            max_attempts: settings.max_attempts(),
            backoff: settings.backoff,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    pub fn with_backoff(mut self, max_interval: Duration) -> Self {
        self.backoff = true;
        self.max_interval = max_interval.max(self.interval);
        self
    }

    pub async fn watch<B: StatsBackend>(
        &self,
        tracker: &mut JobTracker<B>,
        reporter: &StatusReporter,
    ) -> Result<WatchOutcome> {
        let mut attempts = 0;
        let mut delay = self.interval;

        loop {
            attempts += 1;

            match tracker.poll().await {
                Ok(PollOutcome::Updated(status)) => {
                    reporter.print_tick(attempts, &status);
                    if status.is_completed {
                        tracing::info!(request_id = %status.request_id, attempts, "Stats job completed");
                        return Ok(WatchOutcome::Completed { status, attempts });
                    }
                }
                Ok(PollOutcome::Redirect(uri)) => {
                    tracing::warn!("Redirect requested, stopping poll loop");
                    return Ok(WatchOutcome::Redirect(uri));
                }
                Err(e) if e.is_validation() => return Err(e),
                Err(e) => {
                    tracing::error!(attempt = attempts, error = ?e, "Poll failed");
                    reporter.print_error(&e);
                }
            }

            if self.max_attempts.is_some_and(|max| attempts >= max) {
                return Err(StatsError::PollLimit(attempts));
            }

            tokio::time::sleep(delay).await;
            delay = self.next_delay(delay);
        }
    }

    fn next_delay(&self, current: Duration) -> Duration {
        if self.backoff {
            current.saturating_mul(2).min(self.max_interval)
        } else {
            self.interval
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_interval() {
        let watcher = Watcher::new(Duration::from_millis(100));
        assert_eq!(
            watcher.next_delay(Duration::from_millis(100)),
            Duration::from_millis(100)
        );
    }

    #[test]
    fn test_backoff_doubles_up_to_cap() {
        let watcher =
            Watcher::new(Duration::from_millis(100)).with_backoff(Duration::from_millis(350));
        let mut delay = Duration::from_millis(100);
        let mut seen = Vec::new();
        for _ in 0..4 {
            delay = watcher.next_delay(delay);
            seen.push(delay.as_millis());
        }
        assert_eq!(seen, vec![200, 350, 350, 350]);
    }

    #[test]
    fn test_from_settings() {
        let settings = PollSettings {
            interval_ms: 10,
            max_attempts: 3,
            backoff: true,
            max_interval_ms: 40,
        };
        let watcher = Watcher::from_settings(&settings);
        assert_eq!(watcher.max_attempts, Some(3));
        assert_eq!(watcher.next_delay(Duration::from_millis(30)), Duration::from_millis(40));
    }
}
