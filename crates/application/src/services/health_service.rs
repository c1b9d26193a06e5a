//! Health aggregation service
//!
//! Checks the completion API, the local transcriber and the scratch store
//! under a shared timeout and reports each one individually.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::{debug, instrument, warn};

use crate::ports::{AudioStorePort, InferencePort, SpeechPort};

/// Default timeout for each health check in seconds
const DEFAULT_HEALTH_CHECK_TIMEOUT_SECS: u64 = 5;

/// Status of an individual dependency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceHealth {
    /// Whether the dependency is usable
    pub healthy: bool,
    /// Optional additional information (e.g., model name)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    /// Response time in milliseconds (if check was performed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
    /// Error message if unhealthy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServiceHealth {
    /// Create a healthy status
    #[must_use]
    pub const fn healthy() -> Self {
        Self {
            healthy: true,
            info: None,
            response_time_ms: None,
            error: None,
        }
    }

    /// Create an unhealthy status
    #[must_use]
    pub fn unhealthy(error: impl Into<String>) -> Self {
        Self {
            healthy: false,
            info: None,
            response_time_ms: None,
            error: Some(error.into()),
        }
    }

    /// Create an unhealthy status due to timeout
    #[must_use]
    pub fn timeout() -> Self {
        Self::unhealthy("Health check timed out")
    }

    /// Attach additional info
    #[must_use]
    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.info = Some(info.into());
        self
    }

    /// Add response time to the status
    #[must_use]
    pub const fn with_response_time(mut self, ms: u64) -> Self {
        self.response_time_ms = Some(ms);
        self
    }
}

/// Readiness report for all dependencies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    /// True when every dependency is healthy
    pub healthy: bool,
    /// Individual statuses keyed by dependency name
    pub services: BTreeMap<String, ServiceHealth>,
    /// Timestamp of the check
    pub checked_at: chrono::DateTime<chrono::Utc>,
}

impl HealthReport {
    /// Create a new health report
    #[must_use]
    pub fn new(services: BTreeMap<String, ServiceHealth>) -> Self {
        let healthy = services.values().all(|s| s.healthy);
        Self {
            healthy,
            services,
            checked_at: chrono::Utc::now(),
        }
    }

    /// Get status of a specific dependency
    #[must_use]
    pub fn service_status(&self, name: &str) -> Option<&ServiceHealth> {
        self.services.get(name)
    }
}

/// Service for aggregating readiness checks
pub struct HealthService {
    inference: Arc<dyn InferencePort>,
    speech: Arc<dyn SpeechPort>,
    store: Arc<dyn AudioStorePort>,
    check_timeout: Duration,
}

impl std::fmt::Debug for HealthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthService")
            .field("check_timeout", &self.check_timeout)
            .finish_non_exhaustive()
    }
}

impl HealthService {
    /// Create a health service
    #[must_use]
    pub fn new(
        inference: Arc<dyn InferencePort>,
        speech: Arc<dyn SpeechPort>,
        store: Arc<dyn AudioStorePort>,
    ) -> Self {
        Self {
            inference,
            speech,
            store,
            check_timeout: Duration::from_secs(DEFAULT_HEALTH_CHECK_TIMEOUT_SECS),
        }
    }

    /// Override the per-check timeout
    #[must_use]
    pub const fn with_timeout(mut self, check_timeout: Duration) -> Self {
        self.check_timeout = check_timeout;
        self
    }

    /// Check every dependency concurrently
    #[instrument(skip(self))]
    pub async fn check_all(&self) -> HealthReport {
        let (inference, transcriber, scratch) = tokio::join!(
            self.check_inference(),
            self.check_transcriber(),
            self.check_scratch()
        );

        let mut services = BTreeMap::new();
        services.insert("inference".to_string(), inference);
        services.insert("transcriber".to_string(), transcriber);
        services.insert("scratch".to_string(), scratch);
        HealthReport::new(services)
    }

    /// Check the completion API
    pub async fn check_inference(&self) -> ServiceHealth {
        let status = self
            .timed("inference", self.inference.is_healthy(), "Completion API unreachable")
            .await;
        if status.healthy {
            status.with_info(self.inference.current_model())
        } else {
            status
        }
    }

    /// Check that the local transcriber is installed
    pub async fn check_transcriber(&self) -> ServiceHealth {
        self.timed(
            "transcriber",
            self.speech.is_transcriber_available(),
            "Transcriber not installed",
        )
        .await
    }

    /// Check that the scratch directory accepts writes
    pub async fn check_scratch(&self) -> ServiceHealth {
        self.timed("scratch", self.store.is_writable(), "Scratch directory not writable")
            .await
    }

    async fn timed(
        &self,
        name: &str,
        check: impl Future<Output = bool>,
        failure: &str,
    ) -> ServiceHealth {
        let start = Instant::now();

        let Ok(ok) = timeout(self.check_timeout, check).await else {
            warn!(service = name, "Health check timed out");
            return ServiceHealth::timeout();
        };

        #[allow(clippy::cast_possible_truncation)]
        let response_time = start.elapsed().as_millis() as u64;
        if ok {
            debug!(service = name, response_time_ms = response_time, "Healthy");
            ServiceHealth::healthy().with_response_time(response_time)
        } else {
            warn!(service = name, response_time_ms = response_time, "Unhealthy");
            ServiceHealth::unhealthy(failure).with_response_time(response_time)
        }
    }
}
