//! Payment confirmation polling.
//!
//! After a checkout the provider settles asynchronously; we poll its status
//! endpoint at a fixed interval until a terminal state appears or the
//! bounded duration elapses. Fixed interval, no backoff.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

use crate::config::PaymentsConfig;

/// Terminal outcome of a payment poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentOutcome {
    /// Provider reported the payment as settled.
    Paid,
    /// Provider reported the payment as failed.
    Failed,
    /// No terminal state within the bounded duration; caller may retry.
    TimedOut,
}

/// Status body returned by the provider.
#[derive(Debug, Deserialize)]
struct ProviderStatus {
    status: String,
}

/// Polls the payment provider for confirmation.
pub struct PaymentPoller {
    config: PaymentsConfig,
    client: Client,
}

impl PaymentPoller {
    /// Create a poller from configuration.
    pub fn new(config: PaymentsConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    /// Upper bound on status requests: ceil(max_duration / interval).
    pub fn max_attempts(&self) -> u64 {
        let interval = self.config.poll_interval_secs.max(1);
        self.config.poll_max_duration_secs.div_ceil(interval).max(1)
    }

    /// Poll the provider until the payment reaches a terminal state or the
    /// attempt budget is exhausted.
    pub async fn poll(&self, payment_id: &str) -> PaymentOutcome {
        let interval = Duration::from_secs(self.config.poll_interval_secs.max(1));
        let max_attempts = self.max_attempts();

        for attempt in 1..=max_attempts {
            match self.fetch_status(payment_id).await {
                Ok(status) => match status.as_str() {
                    "paid" => {
                        info!(payment_id = %payment_id, attempt, "Payment confirmed");
                        return PaymentOutcome::Paid;
                    }
                    "failed" => {
                        info!(payment_id = %payment_id, attempt, "Payment failed");
                        return PaymentOutcome::Failed;
                    }
                    other => {
                        info!(payment_id = %payment_id, attempt, status = %other, "Payment pending");
                    }
                },
                Err(e) => {
                    // Transient provider errors count against the budget
                    warn!(payment_id = %payment_id, attempt, error = %e, "Payment status request failed");
                }
            }

            if attempt < max_attempts {
                tokio::time::sleep(interval).await;
            }
        }

        warn!(
            payment_id = %payment_id,
            max_attempts,
            "Payment confirmation timed out"
        );
        PaymentOutcome::TimedOut
    }

    async fn fetch_status(&self, payment_id: &str) -> Result<String, reqwest::Error> {
        let url = format!(
            "{}/payments/{}",
            self.config.provider_url.trim_end_matches('/'),
            payment_id
        );

        let status: ProviderStatus = self.client.get(&url).send().await?.json().await?;
        Ok(status.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(interval: u64, max_duration: u64) -> PaymentsConfig {
        PaymentsConfig {
            provider_url: "http://localhost:9".to_string(),
            poll_interval_secs: interval,
            poll_max_duration_secs: max_duration,
            request_timeout_secs: 1,
        }
    }

    #[test]
    fn test_max_attempts_exact_division() {
        let poller = PaymentPoller::new(config(3, 60)).unwrap();
        assert_eq!(poller.max_attempts(), 20);
    }

    #[test]
    fn test_max_attempts_rounds_up() {
        let poller = PaymentPoller::new(config(7, 60)).unwrap();
        assert_eq!(poller.max_attempts(), 9);
    }

    #[test]
    fn test_max_attempts_at_least_one() {
        let poller = PaymentPoller::new(config(10, 0)).unwrap();
        assert_eq!(poller.max_attempts(), 1);
    }

    #[test]
    fn test_payment_outcome_serialization() {
        assert_eq!(
            serde_json::to_string(&PaymentOutcome::TimedOut).unwrap(),
            "\"timed_out\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentOutcome::Paid).unwrap(),
            "\"paid\""
        );
    }

    #[tokio::test]
    async fn test_unreachable_provider_times_out() {
        // One attempt against a closed port exhausts the budget
        let poller = PaymentPoller::new(config(1, 1)).unwrap();
        let outcome = poller.poll("pay_123").await;
        assert_eq!(outcome, PaymentOutcome::TimedOut);
    }
}
