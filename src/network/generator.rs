use crate::util::logging::Logger;

use super::{Network, TickReport};

impl<L> Network<L>
where
    L: Logger,
{
    /// Offers every node one new packet, addressed to a uniformly random
    /// other node. A full queue discards the packet.
    pub fn generate_traffic(&mut self) -> TickReport {
        let mut report = TickReport::default();
        let node_count = self.nodes.len();
        for origin in 0..node_count {
            let destination = self.rng.index_excluding(node_count, origin);
            if self.push_packet(origin, destination).is_ok() {
                report.generated += 1;
            } else {
                report.dropped += 1;
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{
        network::{config::NetworkConfig, fixtures, Network, TickReport},
        util::{logging::MemoryLogger, rand::Rng},
    };

    #[test]
    fn one_packet_per_node() {
        let mut network = fixtures::reference(7);
        let report = network.generate_traffic();
        assert_eq!(
            report,
            TickReport {
                generated: 5,
                ..TickReport::default()
            }
        );
        for (origin, node) in network.nodes().iter().enumerate() {
            assert_eq!(node.queue_len(), 1);
            assert_eq!(node.packets_generated(), 1);
            assert_ne!(node.head().unwrap().destination, origin);
        }
        assert!(network.links().iter().all(|link| link.load() == 0));
    }

    #[test]
    fn destinations_never_self_and_cover_all_others() {
        let mut network = fixtures::reference(11);
        let mut seen = vec![vec![false; 5]; 5];
        for _ in 0..40 {
            network.generate_traffic();
        }
        for (origin, node) in network.nodes().iter().enumerate() {
            for packet in node.queued() {
                assert_ne!(packet.destination, origin);
                seen[origin][packet.destination] = true;
            }
            let reached = seen[origin].iter().filter(|x| **x).count();
            assert_eq!(reached, 4);
        }
    }

    #[test]
    fn full_queue_drops_and_keeps_counter() {
        let mut network = fixtures::reference(3);
        for _ in 0..50 {
            network.generate_traffic();
        }
        let report = network.generate_traffic();
        assert_eq!(report.generated, 0);
        assert_eq!(report.dropped, 5);
        for node in network.nodes() {
            assert_eq!(node.queue_len(), 50);
            assert_eq!(node.packets_generated(), 50);
        }
        assert_eq!(
            network
                .logger()
                .lines
                .iter()
                .filter(|line| line.starts_with("Queue full at node"))
                .count(),
            5
        );
    }

    #[test]
    fn same_seed_same_traffic() {
        let destinations = |seed| {
            let mut network = Network::new(
                &NetworkConfig::default(),
                Rng::from_seed(seed),
                MemoryLogger::default(),
            )
            .unwrap();
            for _ in 0..10 {
                network.generate_traffic();
            }
            network
                .nodes()
                .iter()
                .map(|node| node.queued().map(|p| p.destination).collect::<Vec<_>>())
                .collect::<Vec<_>>()
        };
        assert_eq!(destinations(5), destinations(5));
    }
}
