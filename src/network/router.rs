use crate::util::logging::Logger;

use super::{link::LinkAtCapacity, Network, TickError, TickReport};

impl<L> Network<L>
where
    L: Logger,
{
    /// Tries to move the head packet of every node onto the first link of its
    /// route. Only the head is looked at; a packet whose link is at capacity
    /// stays where it is and blocks its queue until a later tick.
    pub fn route_packets(&mut self) -> Result<TickReport, TickError> {
        let mut report = TickReport::default();
        for (node_index, node) in self.nodes.iter_mut().enumerate() {
            let Some(&packet) = node.head() else {
                continue;
            };
            let path = self.topology.lookup(node_index, packet.destination)?;
            let next_hop = path[1];
            let link_index =
                self.topology
                    .find_link(node_index, next_hop)
                    .ok_or_else(|| TickError::MissingLink {
                        from: self.topology.node_id(node_index).to_owned(),
                        to: self.topology.node_id(next_hop).to_owned(),
                    })?;
            match self.links[link_index].try_admit() {
                Ok(()) => {
                    node.pop_head();
                    report.routed += 1;
                    log!(
                        self.logger,
                        "Packet {} routed from {} to {}.",
                        packet.id,
                        self.topology.node_id(node_index),
                        self.topology.node_id(next_hop)
                    );
                }
                Err(LinkAtCapacity) => {
                    report.held += 1;
                    log!(
                        self.logger,
                        "Link from {} to {} is at capacity. Packet {} queued.",
                        self.topology.node_id(node_index),
                        self.topology.node_id(next_hop),
                        packet.id
                    );
                }
            }
        }
        Ok(report)
    }
}
