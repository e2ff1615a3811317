//! Submit-and-poll image generation.

use super::RunwayClient;
use crate::{MIN_POLL_INTERVAL_MS, RetryPolicy, TaleweaverConfig};
use async_trait::async_trait;
use std::time::Duration;
use taleweaver_core::{GenerationTask, ReferenceImage, TaskStatus};
use taleweaver_error::{ProviderError, ProviderErrorKind, ProviderResult};
use taleweaver_interface::ImageGenerator;
use tracing::{debug, error, info, instrument};

/// Image generator talking to the provider directly.
///
/// One call submits a task, then sleeps `poll_interval` before every status
/// check until the task reaches a terminal state or `max_wait` elapses.
/// Submission and every status check are retried under the retry policy.
#[derive(Debug, Clone)]
pub struct TaskImageGenerator {
    client: RunwayClient,
    retry: RetryPolicy,
    poll_interval: Duration,
    max_wait: Duration,
}

impl TaskImageGenerator {
    /// Create a generator.
    ///
    /// `poll_interval` is raised to [`MIN_POLL_INTERVAL_MS`] if shorter.
    pub fn new(client: RunwayClient, retry: RetryPolicy, poll_interval: Duration, max_wait: Duration) -> Self {
        Self {
            client,
            retry,
            poll_interval: poll_interval.max(Duration::from_millis(MIN_POLL_INTERVAL_MS)),
            max_wait,
        }
    }

    /// Delay before each status check.
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Build a generator from configuration, reading the secret from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderErrorKind::MissingCredential`] if the secret is not set.
    pub fn from_config(config: &TaleweaverConfig) -> ProviderResult<Self> {
        let client = RunwayClient::from_env(&config.provider)?;
        Ok(Self::new(
            client,
            config.retry.policy(),
            config.provider.poll_interval(),
            config.provider.max_wait(),
        ))
    }

    #[instrument(skip(self))]
    async fn wait_for_completion(&self, task_id: &str) -> ProviderResult<GenerationTask> {
        let mut checks = 0usize;
        loop {
            tokio::time::sleep(self.poll_interval).await;
            checks += 1;

            let task = self
                .retry
                .run("get_task", || self.client.get_task(task_id))
                .await?;

            if task.status().is_terminal() {
                debug!(checks, status = %task.status(), "Task reached terminal state");
                return Ok(task);
            }
        }
    }

    fn outcome(task: GenerationTask) -> ProviderResult<String> {
        match task.status() {
            TaskStatus::Succeeded => task
                .first_output()
                .map(str::to_string)
                .ok_or_else(|| ProviderError::new(ProviderErrorKind::EmptyOutput)),
            TaskStatus::Cancelled => Err(ProviderError::new(ProviderErrorKind::GenerationFailed(
                "Task was cancelled".to_string(),
            ))),
            _ => Err(ProviderError::new(ProviderErrorKind::GenerationFailed(
                task.failure()
                    .clone()
                    .unwrap_or_else(|| "Task failed".to_string()),
            ))),
        }
    }
}

#[async_trait]
impl ImageGenerator for TaskImageGenerator {
    #[instrument(skip(self, prompt, reference), fields(provider = "runway"))]
    async fn generate_image(&self, prompt: &str, reference: &ReferenceImage) -> ProviderResult<String> {
        let task_id = self
            .retry
            .run("create_task", || self.client.create_task(prompt, reference))
            .await?;

        let task = tokio::time::timeout(self.max_wait, self.wait_for_completion(&task_id))
            .await
            .map_err(|_| {
                error!(task_id = %task_id, max_wait_secs = self.max_wait.as_secs(), "Task did not finish in time");
                ProviderError::new(ProviderErrorKind::Timeout(self.max_wait.as_secs()))
            })??;

        let result = Self::outcome(task);
        match &result {
            Ok(url) => info!(task_id = %task_id, url = %url, "Image generated"),
            Err(e) => error!(task_id = %task_id, error = %e, "Image generation failed"),
        }
        result
    }

    fn provider_name(&self) -> &'static str {
        "runway"
    }
}
