use derive_more::{Add, AddAssign};
use serde::Serialize;
use tabled::Tabled;
use thiserror::Error;

use crate::util::{logging::Logger, rand::Rng};

use self::{
    config::NetworkConfig,
    link::Link,
    node::{Node, QueueFull},
    packet::{Packet, PacketId},
    routing::{NodeIndex, Topology, TopologyError},
};

pub mod clock;
pub mod config;
pub mod generator;
pub mod link;
pub mod node;
pub mod packet;
pub mod router;
pub mod routing;

/// The routing table named a route or hop that the topology does not have.
/// Fatal: the tick is abandoned where it stood.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TickError {
    #[error("no route from {origin} to {destination}")]
    RouteNotFound { origin: String, destination: String },
    #[error("no link from {from} to {to}")]
    MissingLink { from: String, to: String },
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EnqueueError {
    #[error("queue is full")]
    QueueFull,
    #[error("no node with index {0}")]
    UnknownNode(NodeIndex),
    #[error("node {0} cannot send a packet to itself")]
    AddressedToSelf(NodeIndex),
}

impl From<QueueFull> for EnqueueError {
    fn from(_: QueueFull) -> EnqueueError {
        EnqueueError::QueueFull
    }
}

/// What happened during one or more ticks.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Add, AddAssign, Serialize, Tabled)]
pub struct TickReport {
    /// Packets that made it into a queue.
    pub generated: u64,
    /// Packets discarded because their node's queue was full.
    pub dropped: u64,
    /// Packets admitted onto a link.
    pub routed: u64,
    /// Head packets left queued because their link was at capacity.
    pub held: u64,
}

/// The simulation engine. Owns every node and link, the static topology and
/// the random source; all tick operations are methods on it.
#[derive(Debug)]
pub struct Network<L> {
    topology: Topology,
    max_queue_size: usize,
    nodes: Vec<Node>,
    links: Vec<Link>,
    rng: Rng,
    next_packet_id: u64,
    ticks: u64,
    logger: L,
}

impl<L> Network<L>
where
    L: Logger,
{
    pub fn new(config: &NetworkConfig, rng: Rng, logger: L) -> Result<Network<L>, TopologyError> {
        let topology = Topology::new(config)?;
        let links = config
            .links
            .iter()
            .map(|link| {
                let endpoint = |id: &str| {
                    topology
                        .node_index(id)
                        .ok_or_else(|| TopologyError::UnknownNode(id.to_owned()))
                };
                Ok(Link::new(
                    endpoint(link.from.as_str())?,
                    endpoint(link.to.as_str())?,
                    link.capacity,
                ))
            })
            .collect::<Result<Vec<_>, TopologyError>>()?;
        Ok(Network {
            nodes: vec![Node::new(); topology.node_count()],
            topology,
            max_queue_size: config.max_queue_size,
            links,
            rng,
            next_packet_id: 0,
            ticks: 0,
            logger,
        })
    }

    /// Puts a packet for `destination` at the back of `origin`'s queue, exactly
    /// as the traffic generator would.
    pub fn enqueue(
        &mut self,
        origin: NodeIndex,
        destination: NodeIndex,
    ) -> Result<PacketId, EnqueueError> {
        let node_count = self.nodes.len();
        if let Some(&node) = [origin, destination].iter().find(|&&n| n >= node_count) {
            return Err(EnqueueError::UnknownNode(node));
        }
        if origin == destination {
            return Err(EnqueueError::AddressedToSelf(origin));
        }
        Ok(self.push_packet(origin, destination)?)
    }

    /// Callers guarantee both indices are in range and distinct.
    fn push_packet(
        &mut self,
        origin: NodeIndex,
        destination: NodeIndex,
    ) -> Result<PacketId, QueueFull> {
        let id = PacketId(self.next_packet_id);
        self.next_packet_id += 1;
        let packet = Packet { id, destination };
        match self.nodes[origin].try_enqueue(packet, self.max_queue_size) {
            Ok(()) => Ok(id),
            Err(QueueFull) => {
                log!(
                    self.logger,
                    "Queue full at node {}. Dropping packet {}.",
                    self.topology.node_id(origin),
                    id
                );
                Err(QueueFull)
            }
        }
    }
}

impl<L> Network<L> {
    #[must_use]
    pub const fn topology(&self) -> &Topology {
        &self.topology
    }

    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[must_use]
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    #[must_use]
    pub const fn max_queue_size(&self) -> usize {
        self.max_queue_size
    }

    /// Completed ticks since construction.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    #[must_use]
    pub const fn logger(&self) -> &L {
        &self.logger
    }
}
