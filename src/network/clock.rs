use crate::util::logging::Logger;

use super::{Network, TickError, TickReport};

impl<L> Network<L>
where
    L: Logger,
{
    pub fn reset_link_loads(&mut self) {
        for link in &mut self.links {
            link.reset();
        }
    }

    /// One simulation step: reset link loads, generate traffic, route. The
    /// order matters, since loads must only count this tick's admissions.
    pub fn tick(&mut self) -> Result<TickReport, TickError> {
        self.reset_link_loads();
        let mut report = self.generate_traffic();
        report += self.route_packets()?;
        self.ticks += 1;
        log!(
            self.logger,
            "tick = {}: generated {}, dropped {}, routed {}, held {}",
            self.ticks,
            report.generated,
            report.dropped,
            report.routed,
            report.held
        );
        Ok(report)
    }

    /// Runs `ticks` ticks back to back and sums their reports.
    pub fn run_for(&mut self, ticks: u64) -> Result<TickReport, TickError> {
        let mut total = TickReport::default();
        for _ in 0..ticks {
            total += self.tick()?;
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{
        network::{config::NetworkConfig, fixtures, Network},
        util::{
            logging::{MemoryLogger, NothingLogger},
            rand::Rng,
        },
    };

    fn queued<L>(network: &Network<L>) -> u64 {
        network.nodes().iter().map(|node| node.queue_len() as u64).sum()
    }

    fn total_load<L>(network: &Network<L>) -> u64 {
        network.links().iter().map(|link| u64::from(link.load())).sum()
    }

    #[test]
    fn reset_zeroes_every_link() {
        let mut network = fixtures::reference(0);
        network.run_for(5).unwrap();
        assert!(total_load(&network) > 0);
        network.reset_link_loads();
        assert!(network.links().iter().all(|link| link.load() == 0));
    }

    #[test]
    fn invariants_hold_every_tick() {
        let mut network = fixtures::reference(1234);
        for _ in 0..200 {
            let queued_before = queued(&network);
            let report = network.tick().unwrap();

            for link in network.links() {
                assert!(link.load() <= link.capacity());
            }
            for node in network.nodes() {
                assert!(node.queue_len() <= network.max_queue_size());
            }
            assert_eq!(report.routed, total_load(&network));
            assert_eq!(report.generated + report.dropped, 5);
            assert_eq!(queued_before + report.generated - report.routed, queued(&network));
        }
        assert_eq!(network.ticks(), 200);
    }

    #[test]
    fn load_only_counts_the_current_tick() {
        let mut network = fixtures::reference(9);
        for _ in 0..20 {
            let report = network.tick().unwrap();
            assert_eq!(total_load(&network), report.routed);
        }
    }

    #[test]
    fn generated_counter_matches_reports() {
        let mut network = fixtures::reference(77);
        let total = network.run_for(100).unwrap();
        let counted: u64 = network
            .nodes()
            .iter()
            .map(|node| node.packets_generated())
            .sum();
        assert_eq!(total.generated, counted);
    }

    #[test]
    fn tight_links_fill_queues() {
        let mut config = fixtures::two_nodes(0);
        config.max_queue_size = 3;
        let mut network = Network::new(&config, Rng::from_seed(0), NothingLogger).unwrap();
        let total = network.run_for(5).unwrap();
        assert_eq!(total.generated, 6);
        assert_eq!(total.dropped, 4);
        assert_eq!(total.routed, 0);
        assert_eq!(total.held, 10);
        for node in network.nodes() {
            assert_eq!(node.queue_len(), 3);
            assert_eq!(node.packets_generated(), 3);
        }
    }

    #[test]
    fn steady_state_with_spare_capacity() {
        let config = fixtures::two_nodes(1);
        let mut network = Network::new(&config, Rng::from_seed(0), NothingLogger).unwrap();
        let total = network.run_for(10).unwrap();
        assert_eq!(total.generated, 20);
        assert_eq!(total.routed, 20);
        assert_eq!(queued(&network), 0);
        assert!(network.links().iter().all(|link| link.load() == 1));
    }

    #[test]
    fn runs_are_reproducible() {
        let run = |seed| {
            let mut network = Network::new(
                &NetworkConfig::default(),
                Rng::from_seed(seed),
                MemoryLogger::default(),
            )
            .unwrap();
            let report = network.run_for(60).unwrap();
            (report, network.stats(), network.logger().lines.clone())
        };
        assert_eq!(run(42), run(42));
    }
}
