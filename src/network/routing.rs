use rustc_hash::FxHashMap;
use thiserror::Error;

use super::{config::NetworkConfig, TickError};

pub type NodeIndex = usize;
pub type LinkIndex = usize;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TopologyError {
    #[error("a network needs at least two nodes, found {0}")]
    TooFewNodes(usize),
    #[error("node {0} is defined more than once")]
    DuplicateNode(String),
    #[error("unknown node {0}")]
    UnknownNode(String),
    #[error("link {0}->{0} loops back to its own node")]
    SelfLoop(String),
    #[error("link {from}->{to} is defined more than once")]
    DuplicateLink { from: String, to: String },
    #[error("no route from {origin} to {destination}")]
    MissingRoute { origin: String, destination: String },
    #[error("route {origin}->{destination} must run from {origin} to {destination} over at least one link")]
    MalformedPath { origin: String, destination: String },
    #[error("route {origin}->{destination} hops {from}->{to}, which is not a link")]
    HopWithoutLink {
        origin: String,
        destination: String,
        from: String,
        to: String,
    },
}

/// The static part of the network: node names, which directed links exist,
/// and the precomputed path between every ordered pair of distinct nodes.
///
/// A `Topology` only exists if every path is backed by links, so lookups at
/// tick time are integrity checks rather than expected failures.
#[derive(Debug, Clone)]
pub struct Topology {
    node_ids: Vec<String>,
    node_index: FxHashMap<String, NodeIndex>,
    link_index: FxHashMap<(NodeIndex, NodeIndex), LinkIndex>,
    routes: FxHashMap<(NodeIndex, NodeIndex), Vec<NodeIndex>>,
}

impl Topology {
    pub fn new(config: &NetworkConfig) -> Result<Topology, TopologyError> {
        if config.nodes.len() < 2 {
            return Err(TopologyError::TooFewNodes(config.nodes.len()));
        }

        let mut node_index = FxHashMap::default();
        for (index, id) in config.nodes.iter().enumerate() {
            if node_index.insert(id.clone(), index).is_some() {
                return Err(TopologyError::DuplicateNode(id.clone()));
            }
        }
        let resolve = |id: &str| {
            node_index
                .get(id)
                .copied()
                .ok_or_else(|| TopologyError::UnknownNode(id.to_owned()))
        };

        let mut link_index = FxHashMap::default();
        for (index, link) in config.links.iter().enumerate() {
            let key = (resolve(link.from.as_str())?, resolve(link.to.as_str())?);
            if key.0 == key.1 {
                return Err(TopologyError::SelfLoop(link.from.clone()));
            }
            if link_index.insert(key, index).is_some() {
                return Err(TopologyError::DuplicateLink {
                    from: link.from.clone(),
                    to: link.to.clone(),
                });
            }
        }

        let mut routes = FxHashMap::default();
        for (origin_id, table) in &config.routes {
            let origin = resolve(origin_id.as_str())?;
            for (destination_id, path_ids) in table {
                let destination = resolve(destination_id.as_str())?;
                let path = path_ids
                    .iter()
                    .map(|id| resolve(id.as_str()))
                    .collect::<Result<Vec<_>, _>>()?;
                if origin == destination
                    || path.len() < 2
                    || path.first() != Some(&origin)
                    || path.last() != Some(&destination)
                {
                    return Err(TopologyError::MalformedPath {
                        origin: origin_id.clone(),
                        destination: destination_id.clone(),
                    });
                }
                if let Some(hop) = path
                    .windows(2)
                    .find(|hop| !link_index.contains_key(&(hop[0], hop[1])))
                {
                    return Err(TopologyError::HopWithoutLink {
                        origin: origin_id.clone(),
                        destination: destination_id.clone(),
                        from: config.nodes[hop[0]].clone(),
                        to: config.nodes[hop[1]].clone(),
                    });
                }
                routes.insert((origin, destination), path);
            }
        }

        for origin in 0..config.nodes.len() {
            for destination in 0..config.nodes.len() {
                if origin != destination && !routes.contains_key(&(origin, destination)) {
                    return Err(TopologyError::MissingRoute {
                        origin: config.nodes[origin].clone(),
                        destination: config.nodes[destination].clone(),
                    });
                }
            }
        }

        Ok(Topology {
            node_ids: config.nodes.clone(),
            node_index,
            link_index,
            routes,
        })
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.node_ids.len()
    }

    #[must_use]
    pub fn node_id(&self, node: NodeIndex) -> &str {
        &self.node_ids[node]
    }

    #[must_use]
    pub fn node_index(&self, id: &str) -> Option<NodeIndex> {
        self.node_index.get(id).copied()
    }

    /// The full path from `origin` to `destination`, both included.
    pub fn lookup(
        &self,
        origin: NodeIndex,
        destination: NodeIndex,
    ) -> Result<&[NodeIndex], TickError> {
        self.routes
            .get(&(origin, destination))
            .map(Vec::as_slice)
            .ok_or_else(|| TickError::RouteNotFound {
                origin: self.node_id(origin).to_owned(),
                destination: self.node_id(destination).to_owned(),
            })
    }

    #[must_use]
    pub fn find_link(&self, from: NodeIndex, to: NodeIndex) -> Option<LinkIndex> {
        self.link_index.get(&(from, to)).copied()
    }
}
