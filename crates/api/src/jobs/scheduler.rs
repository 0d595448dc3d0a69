//! Periodic background job runner.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinSet;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

/// A recurring background task.
#[async_trait::async_trait]
pub trait Job: Send + Sync + 'static {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Time between runs.
    fn interval(&self) -> Duration;

    /// One run of the job. Errors are logged; the schedule keeps going.
    async fn run(&self) -> anyhow::Result<()>;
}

/// Owns the spawned job loops and their stop signal.
pub struct JobScheduler {
    jobs: Vec<Arc<dyn Job>>,
    stop: watch::Sender<bool>,
    tasks: JoinSet<()>,
}

impl JobScheduler {
    pub fn new() -> Self {
        let (stop, _) = watch::channel(false);
        Self {
            jobs: Vec::new(),
            stop,
            tasks: JoinSet::new(),
        }
    }

    pub fn register<J: Job>(&mut self, job: J) {
        self.jobs.push(Arc::new(job));
    }

    /// Spawn one loop per registered job. The first run happens one full
    /// interval after start, not immediately.
    pub fn start(&mut self) {
        info!(jobs = self.jobs.len(), "Starting background jobs");

        for job in self.jobs.drain(..) {
            let mut stop = self.stop.subscribe();

            self.tasks.spawn(async move {
                let every = job.interval();
                let mut ticker = tokio::time::interval(every);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
                // interval() fires immediately; swallow that first tick
                ticker.tick().await;

                info!(job = job.name(), every = ?every, "Background job armed");

                loop {
                    tokio::select! {
                        _ = stop.changed() => break,
                        _ = ticker.tick() => {
                            let started = tokio::time::Instant::now();
                            match job.run().await {
                                Ok(()) => info!(
                                    job = job.name(),
                                    elapsed_ms = started.elapsed().as_millis() as u64,
                                    "Background job run finished"
                                ),
                                Err(e) => error!(
                                    job = job.name(),
                                    elapsed_ms = started.elapsed().as_millis() as u64,
                                    error = %e,
                                    "Background job run failed"
                                ),
                            }
                        }
                    }
                }

                info!(job = job.name(), "Background job stopped");
            });
        }
    }

    /// Signal all job loops to stop after their current run.
    pub fn shutdown(&self) {
        let _ = self.stop.send(true);
    }

    /// Wait for the job loops to drain, up to `timeout`.
    pub async fn wait_for_shutdown(mut self, timeout: Duration) {
        let drain = async {
            while let Some(joined) = self.tasks.join_next().await {
                if let Err(e) = joined {
                    warn!(error = %e, "Background job task ended abnormally");
                }
            }
        };

        if tokio::time::timeout(timeout, drain).await.is_err() {
            warn!(?timeout, "Background jobs did not stop in time");
        }
    }
}

impl Default for JobScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingJob {
        runs: Arc<AtomicUsize>,
        fail: bool,
    }

    #[async_trait::async_trait]
    impl Job for CountingJob {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn interval(&self) -> Duration {
            Duration::from_millis(50)
        }

        async fn run(&self) -> anyhow::Result<()> {
            self.runs.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                anyhow::bail!("simulated failure");
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_job_runs_on_schedule_and_stops() {
        let runs = Arc::new(AtomicUsize::new(0));
        let mut scheduler = JobScheduler::new();
        scheduler.register(CountingJob {
            runs: runs.clone(),
            fail: false,
        });

        scheduler.start();
        tokio::time::sleep(Duration::from_millis(180)).await;
        scheduler.shutdown();
        scheduler.wait_for_shutdown(Duration::from_secs(1)).await;

        let total = runs.load(Ordering::SeqCst);
        assert!(total >= 2, "expected at least two runs, got {}", total);

        // No further runs after shutdown
        tokio::time::sleep(Duration::from_millis(120)).await;
        assert_eq!(runs.load(Ordering::SeqCst), total);
    }

    #[tokio::test]
    async fn test_failing_job_keeps_its_schedule() {
        let runs = Arc::new(AtomicUsize::new(0));
        let mut scheduler = JobScheduler::new();
        scheduler.register(CountingJob {
            runs: runs.clone(),
            fail: true,
        });

        scheduler.start();
        tokio::time::sleep(Duration::from_millis(180)).await;
        scheduler.shutdown();
        scheduler.wait_for_shutdown(Duration::from_secs(1)).await;

        assert!(runs.load(Ordering::SeqCst) >= 2);
    }

    #[tokio::test]
    async fn test_shutdown_before_first_tick() {
        let runs = Arc::new(AtomicUsize::new(0));
        let mut scheduler = JobScheduler::new();
        scheduler.register(CountingJob {
            runs: runs.clone(),
            fail: false,
        });

        scheduler.start();
        scheduler.shutdown();
        scheduler.wait_for_shutdown(Duration::from_secs(1)).await;

        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }
}
