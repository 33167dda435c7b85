use std::{sync::Arc, time::Duration};

use thiserror::Error;
use tokio::{
    sync::{oneshot, RwLock},
    task::{JoinError, JoinHandle},
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, error, warn};

use crate::{
    network::{Network, TickError},
    util::logging::Logger,
};

/// The engine behind a lock. A tick holds the write half for its whole
/// duration, so readers see either the state before it or after it.
pub type SharedNetwork<L> = Arc<RwLock<Network<L>>>;

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

#[must_use]
pub fn shared<L>(network: Network<L>) -> SharedNetwork<L> {
    Arc::new(RwLock::new(network))
}

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("the tick interval must be greater than zero")]
    ZeroInterval,
    #[error("the scheduler is not running")]
    NotRunning,
    #[error("the clock stopped on a topology error: {0}")]
    Tick(#[from] TickError),
    #[error("the clock task failed: {0}")]
    Join(#[from] JoinError),
}

struct Running {
    stop: oneshot::Sender<()>,
    task: JoinHandle<Result<u64, TickError>>,
}

/// Fires one tick per `interval` on a tokio task until stopped.
pub struct Scheduler<L> {
    network: SharedNetwork<L>,
    interval: Duration,
    running: Option<Running>,
}

impl<L> Scheduler<L>
where
    L: Logger + Send + Sync + 'static,
{
    pub fn new(network: SharedNetwork<L>, interval: Duration) -> Result<Scheduler<L>, SchedulerError> {
        if interval.is_zero() {
            return Err(SchedulerError::ZeroInterval);
        }
        Ok(Scheduler {
            network,
            interval,
            running: None,
        })
    }

    #[must_use]
    pub const fn network(&self) -> &SharedNetwork<L> {
        &self.network
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
            .as_ref()
            .is_some_and(|running| !running.task.is_finished())
    }

    /// Spawns the clock task. The first tick fires one interval from now.
    /// Returns `false` if the clock was already started.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) -> bool {
        if self.running.is_some() {
            return false;
        }
        let (stop, stopped) = oneshot::channel();
        let task = tokio::spawn(run_clock(self.network.clone(), self.interval, stopped));
        self.running = Some(Running { stop, task });
        true
    }

    /// Stops the clock and waits for it. Returns how many ticks it ran, or
    /// the error that halted it early.
    pub async fn stop(&mut self) -> Result<u64, SchedulerError> {
        let Running { stop, task } = self.running.take().ok_or(SchedulerError::NotRunning)?;
        // The task may already have exited on an error.
        let _ = stop.send(());
        Ok(task.await??)
    }
}

async fn run_clock<L>(
    network: SharedNetwork<L>,
    period: Duration,
    mut stopped: oneshot::Receiver<()>,
) -> Result<u64, TickError>
where
    L: Logger,
{
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut ticks = 0;
    loop {
        tokio::select! {
            _ = &mut stopped => break,
            _ = interval.tick() => {
                let mut network = network.write().await;
                match network.tick() {
                    Ok(report) => {
                        ticks += 1;
                        if report.dropped > 0 {
                            warn!(tick = network.ticks(), dropped = report.dropped, "Queues full, dropping packets");
                        }
                        debug!(tick = network.ticks(), ?report, "Tick complete");
                    }
                    Err(e) => {
                        error!(error = %e, "Topology integrity violation, stopping the clock");
                        return Err(e);
                    }
                }
            }
        }
    }
    Ok(ticks)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::{
        network::{config::NetworkConfig, Network},
        util::{logging::NothingLogger, rand::Rng},
    };

    use super::{shared, Scheduler, SchedulerError, DEFAULT_TICK_INTERVAL};

    fn scheduler() -> Scheduler<NothingLogger> {
        let network =
            Network::new(&NetworkConfig::default(), Rng::from_seed(0), NothingLogger).unwrap();
        Scheduler::new(shared(network), DEFAULT_TICK_INTERVAL).unwrap()
    }

    #[test]
    fn zero_interval_is_rejected() {
        let network =
            Network::new(&NetworkConfig::default(), Rng::from_seed(0), NothingLogger).unwrap();
        assert!(matches!(
            Scheduler::new(shared(network), Duration::ZERO),
            Err(SchedulerError::ZeroInterval)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_interval() {
        let mut scheduler = scheduler();
        assert!(scheduler.start());
        assert!(!scheduler.start());

        tokio::time::sleep(Duration::from_millis(3500)).await;
        assert!(scheduler.is_running());
        assert_eq!(scheduler.network().read().await.ticks(), 3);

        assert_eq!(scheduler.stop().await.unwrap(), 3);
        assert!(!scheduler.is_running());

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(scheduler.network().read().await.ticks(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_happens_before_first_interval() {
        let mut scheduler = scheduler();
        scheduler.start();
        tokio::time::sleep(Duration::from_millis(999)).await;
        let stats = scheduler.network().read().await.stats();
        assert!(stats.nodes.iter().all(|node| node.packets_generated == 0));
        assert_eq!(scheduler.stop().await.unwrap(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn readers_see_whole_ticks() {
        let mut scheduler = scheduler();
        scheduler.start();
        for _ in 0..10 {
            tokio::time::sleep(Duration::from_millis(250)).await;
            let network = scheduler.network().read().await;
            let stats = network.stats();
            let ticks = network.ticks();
            assert!(stats
                .nodes
                .iter()
                .all(|node| node.packets_generated == ticks));
        }
        scheduler.stop().await.unwrap();
    }

    #[tokio::test]
    async fn stop_without_start() {
        let mut scheduler = scheduler();
        assert!(matches!(
            scheduler.stop().await,
            Err(SchedulerError::NotRunning)
        ));
    }
}
