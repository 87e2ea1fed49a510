use crate::core::deadline::Deadline;
use crate::domain::model::{Cep, NormalizedAddress};
use crate::domain::ports::SourceAdapter;
use crate::utils::error::{CepError, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Runs every adapter concurrently against one shared deadline and keeps the
/// first address that arrives.
///
/// Which adapter wins is decided by wall-clock order alone. When two adapters
/// finish within the same scheduling window, or a result lands exactly as the
/// deadline fires, the pick between them is arbitrary.
pub struct RaceCoordinator {
    adapters: Vec<Arc<dyn SourceAdapter>>,
    timeout: Duration,
}

impl RaceCoordinator {
    pub fn new(adapters: Vec<Arc<dyn SourceAdapter>>, timeout: Duration) -> Self {
        Self { adapters, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn adapter_count(&self) -> usize {
        self.adapters.len()
    }

    /// Spawns one task per adapter and returns the pending race.
    pub fn launch(&self, cep: &Cep) -> Race {
        let deadline = Deadline::after(self.timeout);

        // One slot per adapter, so a publish after the race is decided never waits.
        let (tx, receiver) = mpsc::channel(self.adapters.len().max(1));

        tracing::debug!(
            cep = %cep,
            adapters = self.adapters.len(),
            timeout_ms = self.timeout.as_millis() as u64,
            "Launching provider race"
        );

        let handles = self
            .adapters
            .iter()
            .map(|adapter| {
                tokio::spawn(run_adapter(
                    Arc::clone(adapter),
                    cep.clone(),
                    deadline,
                    tx.clone(),
                ))
            })
            .collect();

        Race {
            receiver,
            deadline,
            timeout: self.timeout,
            handles,
        }
    }

    pub async fn race(&self, cep: &Cep) -> Result<NormalizedAddress> {
        self.launch(cep).first().await
    }
}

/// How one adapter task ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterOutcome {
    /// Address written into the result buffer.
    Published,
    /// Address produced after the race was dropped.
    RaceClosed,
    /// Address dropped because the buffer had no free slot.
    BufferFull,
    /// Lookup failed or hit the deadline.
    Failed,
}

/// A launched race. Losing tasks are never cancelled; they finish on their own
/// or stop at the deadline.
pub struct Race {
    receiver: mpsc::Receiver<NormalizedAddress>,
    deadline: Deadline,
    timeout: Duration,
    handles: Vec<JoinHandle<AdapterOutcome>>,
}

impl Race {
    /// Waits for the first published address or the deadline.
    ///
    /// Adapters that fail publish nothing, so a race where every adapter fails
    /// early still ends in a timeout once the deadline passes.
    pub async fn first(&mut self) -> Result<NormalizedAddress> {
        tokio::select! {
            Some(address) = self.receiver.recv() => {
                tracing::info!(source = %address.source_name, "Provider won the race");
                Ok(address)
            }
            _ = self.deadline.expired() => {
                tracing::warn!(
                    timeout_ms = self.timeout.as_millis() as u64,
                    "No provider responded before the deadline"
                );
                Err(CepError::Timeout {
                    timeout_ms: self.timeout.as_millis(),
                })
            }
        }
    }

    pub fn into_handles(self) -> Vec<JoinHandle<AdapterOutcome>> {
        self.handles
    }
}

async fn run_adapter(
    adapter: Arc<dyn SourceAdapter>,
    cep: Cep,
    deadline: Deadline,
    tx: mpsc::Sender<NormalizedAddress>,
) -> AdapterOutcome {
    let started = Instant::now();
    let source = adapter.name().to_string();

    let outcome = deadline
        .run(adapter.lookup(&cep, deadline))
        .await
        .and_then(|result| result);

    let elapsed_ms = started.elapsed().as_millis() as u64;

    match outcome {
        Ok(address) => match tx.try_send(address) {
            Ok(()) => {
                tracing::debug!(source = %source, elapsed_ms, "Published provider result");
                AdapterOutcome::Published
            }
            Err(TrySendError::Closed(_)) => {
                tracing::debug!(source = %source, elapsed_ms, "Race already decided, result dropped");
                AdapterOutcome::RaceClosed
            }
            Err(TrySendError::Full(_)) => {
                tracing::warn!(source = %source, "Result channel full, result dropped");
                AdapterOutcome::BufferFull
            }
        },
        Err(error) => {
            tracing::debug!(source = %source, elapsed_ms, error = %error, "Provider lookup failed");
            AdapterOutcome::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::SourceError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeAdapter {
        name: &'static str,
        delay: Duration,
        succeed: bool,
        calls: Arc<AtomicUsize>,
    }

    impl FakeAdapter {
        fn new(name: &'static str, delay_ms: u64, succeed: bool) -> Self {
            Self {
                name,
                delay: Duration::from_millis(delay_ms),
                succeed,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    #[async_trait]
    impl SourceAdapter for FakeAdapter {
        fn name(&self) -> &str {
            self.name
        }

        // Deliberately ignores the deadline; the coordinator must bound it anyway.
        async fn lookup(
            &self,
            cep: &Cep,
            _deadline: Deadline,
        ) -> std::result::Result<NormalizedAddress, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;

            if !self.succeed {
                return Err(SourceError::NotFound);
            }

            Ok(NormalizedAddress {
                postal_code: cep.to_string(),
                street: "Rua X".to_string(),
                district: String::new(),
                city: "São Paulo".to_string(),
                state: "SP".to_string(),
                source_name: self.name.to_string(),
            })
        }
    }

    fn coordinator(adapters: Vec<FakeAdapter>, timeout_ms: u64) -> RaceCoordinator {
        let adapters = adapters
            .into_iter()
            .map(|a| Arc::new(a) as Arc<dyn SourceAdapter>)
            .collect();
        RaceCoordinator::new(adapters, Duration::from_millis(timeout_ms))
    }

    #[tokio::test]
    async fn test_faster_adapter_wins() {
        let coordinator = coordinator(
            vec![
                FakeAdapter::new("ServiceA", 100, true),
                FakeAdapter::new("ServiceB", 400, true),
            ],
            1000,
        );

        let address = coordinator.race(&Cep::from("01153000")).await.unwrap();

        assert_eq!(address.source_name, "ServiceA");
        assert_eq!(address.postal_code, "01153000");
        assert_eq!(address.street, "Rua X");
        assert_eq!(address.city, "São Paulo");
        assert_eq!(address.state, "SP");
    }

    #[tokio::test]
    async fn test_slower_adapter_wins_when_faster_fails() {
        let coordinator = coordinator(
            vec![
                FakeAdapter::new("ServiceA", 10, false),
                FakeAdapter::new("ServiceB", 80, true),
            ],
            1000,
        );

        let address = coordinator.race(&Cep::from("01153000")).await.unwrap();

        assert_eq!(address.source_name, "ServiceB");
    }

    #[tokio::test]
    async fn test_timeout_when_no_adapter_responds() {
        let coordinator = coordinator(
            vec![
                FakeAdapter::new("ServiceA", 5_000, true),
                FakeAdapter::new("ServiceB", 5_000, true),
            ],
            100,
        );

        let started = Instant::now();
        let result = coordinator.race(&Cep::from("01153000")).await;

        assert!(matches!(result, Err(CepError::Timeout { timeout_ms: 100 })));
        assert!(started.elapsed() >= Duration::from_millis(100));
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_all_failures_still_wait_for_deadline() {
        let coordinator = coordinator(
            vec![
                FakeAdapter::new("ServiceA", 0, false),
                FakeAdapter::new("ServiceB", 0, false),
            ],
            150,
        );

        let started = Instant::now();
        let result = coordinator.race(&Cep::from("00000000")).await;

        assert!(matches!(result, Err(CepError::Timeout { .. })));
        assert!(started.elapsed() >= Duration::from_millis(150));
    }

    #[tokio::test]
    async fn test_simultaneous_success_yields_single_winner() {
        let coordinator = coordinator(
            vec![
                FakeAdapter::new("ServiceA", 0, true),
                FakeAdapter::new("ServiceB", 0, true),
            ],
            1000,
        );

        let mut race = coordinator.launch(&Cep::from("01153000"));
        let address = race.first().await.unwrap();

        assert!(address.source_name == "ServiceA" || address.source_name == "ServiceB");
    }

    #[tokio::test]
    async fn test_losers_never_block_after_race_is_decided() {
        let a = FakeAdapter::new("ServiceA", 0, true);
        let b = FakeAdapter::new("ServiceB", 20, true);
        let calls = vec![Arc::clone(&a.calls), Arc::clone(&b.calls)];
        let coordinator = coordinator(vec![a, b], 1000);

        let mut race = coordinator.launch(&Cep::from("01153000"));
        race.first().await.unwrap();

        // The receiver is still alive here, so the loser's write lands in the buffer.
        let handles = std::mem::take(&mut race.handles);
        for handle in handles {
            let outcome = tokio::time::timeout(Duration::from_millis(500), handle)
                .await
                .expect("adapter task hung after the race was decided")
                .unwrap();
            assert_eq!(outcome, AdapterOutcome::Published);
        }

        for count in calls {
            assert_eq!(count.load(Ordering::SeqCst), 1);
        }

        let loser = race.receiver.try_recv().unwrap();
        assert_eq!(loser.source_name, "ServiceB");
    }

    #[tokio::test]
    async fn test_buffer_holds_every_adapter_result() {
        let coordinator = coordinator(
            vec![
                FakeAdapter::new("ServiceA", 0, true),
                FakeAdapter::new("ServiceB", 0, true),
                FakeAdapter::new("ServiceC", 0, true),
            ],
            1000,
        );

        let mut race = coordinator.launch(&Cep::from("01153000"));

        // Let every adapter publish before anything is read.
        let handles = std::mem::take(&mut race.handles);
        for handle in handles {
            let outcome = tokio::time::timeout(Duration::from_millis(500), handle)
                .await
                .expect("adapter task blocked on publish")
                .unwrap();
            assert_ne!(outcome, AdapterOutcome::BufferFull);
            assert_eq!(outcome, AdapterOutcome::Published);
        }

        let winner = race.first().await.unwrap();
        let mut sources = vec![winner.source_name];
        while let Ok(address) = race.receiver.try_recv() {
            sources.push(address.source_name);
        }
        sources.sort();

        assert_eq!(sources, vec!["ServiceA", "ServiceB", "ServiceC"]);
    }

    #[tokio::test]
    async fn test_huge_timeout_does_not_panic() {
        let coordinator = RaceCoordinator::new(
            vec![Arc::new(FakeAdapter::new("ServiceA", 0, true)) as Arc<dyn SourceAdapter>],
            Duration::from_secs(u64::MAX),
        );

        let address = coordinator.race(&Cep::from("01153000")).await.unwrap();

        assert_eq!(address.source_name, "ServiceA");
    }

    #[tokio::test]
    async fn test_adapter_ignoring_deadline_is_cut_off() {
        let coordinator = coordinator(vec![FakeAdapter::new("ServiceA", 10_000, true)], 50);

        let mut race = coordinator.launch(&Cep::from("01153000"));
        assert!(race.first().await.is_err());

        for handle in race.into_handles() {
            let outcome = tokio::time::timeout(Duration::from_millis(500), handle)
                .await
                .expect("adapter outlived the deadline")
                .unwrap();
            assert_eq!(outcome, AdapterOutcome::Failed);
        }
    }

    #[tokio::test]
    async fn test_empty_adapter_list_times_out() {
        let coordinator = coordinator(vec![], 30);

        assert_eq!(coordinator.adapter_count(), 0);
        let result = coordinator.race(&Cep::from("01153000")).await;

        assert!(matches!(result, Err(CepError::Timeout { .. })));
    }
}
