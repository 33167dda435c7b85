//! Read-only snapshots of the live network state.
//!
//! The JSON form of [`NetworkStats`] is what `GET /network-stats` returns:
//! `nodes` and `links` in the order they were configured, with camelCase keys.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};
use tabled::{settings::Style, Table, Tabled};

use crate::network::Network;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Tabled)]
#[serde(rename_all = "camelCase")]
pub struct NodeStats {
    pub id: String,
    #[tabled(rename = "packets generated")]
    pub packets_generated: u64,
    #[tabled(rename = "queue length")]
    pub queue_length: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Tabled)]
#[serde(rename_all = "camelCase")]
pub struct LinkStats {
    pub from: String,
    pub to: String,
    pub load: u32,
    pub capacity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkStats {
    pub nodes: Vec<NodeStats>,
    pub links: Vec<LinkStats>,
}

impl<L> Network<L> {
    #[must_use]
    pub fn stats(&self) -> NetworkStats {
        let topology = self.topology();
        NetworkStats {
            nodes: self
                .nodes()
                .iter()
                .enumerate()
                .map(|(index, node)| NodeStats {
                    id: topology.node_id(index).to_owned(),
                    packets_generated: node.packets_generated(),
                    queue_length: node.queue_len(),
                })
                .collect(),
            links: self
                .links()
                .iter()
                .map(|link| LinkStats {
                    from: topology.node_id(link.from()).to_owned(),
                    to: topology.node_id(link.to()).to_owned(),
                    load: link.load(),
                    capacity: link.capacity(),
                })
                .collect(),
        }
    }
}

impl Display for NetworkStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", Table::new(&self.nodes).with(Style::rounded()))?;
        write!(f, "{}", Table::new(&self.links).with(Style::rounded()))
    }
}
