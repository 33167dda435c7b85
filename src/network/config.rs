use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_QUEUE_SIZE: usize = 50;

const fn default_max_queue_size() -> usize {
    DEFAULT_MAX_QUEUE_SIZE
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LinkConfig {
    pub from: String,
    pub to: String,
    /// Packets per tick.
    pub capacity: u32,
}

impl LinkConfig {
    #[must_use]
    pub fn new(from: &str, to: &str, capacity: u32) -> LinkConfig {
        LinkConfig {
            from: from.to_owned(),
            to: to.to_owned(),
            capacity,
        }
    }
}

/// Static description of the simulated network.
///
/// `routes[origin][destination]` is the full path, both ends included. Nodes
/// and links keep the order they are listed in, which is also the order used
/// when ticking and when reporting stats.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    #[serde(default = "default_max_queue_size")]
    pub max_queue_size: usize,
    pub nodes: Vec<String>,
    pub links: Vec<LinkConfig>,
    pub routes: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

impl Default for NetworkConfig {
    /// Five nodes, A to E, over six edges: A-B 100, A-C 80, B-D 70, C-D 90,
    /// C-E 100, D-E 60 (packets per tick).
    ///
    /// The routing table travels every edge in both directions (B->A, E->C,
    /// ...), and each hop must be a link, so every edge is a pair of links
    /// with the same capacity. That makes 12 links, not the 6 one-way links
    /// older versions of this table listed: the six forward links come first
    /// in their old order, followed by the six reverse links. Consumers of the
    /// `links` array in `/network-stats` or of `gen-config` output will see all
    /// twelve.
    fn default() -> NetworkConfig {
        let edges = [
            ("A", "B", 100),
            ("A", "C", 80),
            ("B", "D", 70),
            ("C", "D", 90),
            ("C", "E", 100),
            ("D", "E", 60),
        ];
        let links: Vec<LinkConfig> = edges
            .iter()
            .map(|&(from, to, capacity)| LinkConfig::new(from, to, capacity))
            .chain(
                edges
                    .iter()
                    .map(|&(from, to, capacity)| LinkConfig::new(to, from, capacity)),
            )
            .collect();

        let routes: BTreeMap<String, BTreeMap<String, Vec<String>>> = [
            ("A", [("B", "AB"), ("C", "AC"), ("D", "ABD"), ("E", "ACE")]),
            ("B", [("A", "BA"), ("C", "BAC"), ("D", "BD"), ("E", "BDE")]),
            ("C", [("A", "CA"), ("B", "CAB"), ("D", "CD"), ("E", "CE")]),
            ("D", [("A", "DBA"), ("B", "DB"), ("C", "DC"), ("E", "DE")]),
            ("E", [("A", "ECA"), ("B", "EDB"), ("C", "EC"), ("D", "ED")]),
        ]
        .into_iter()
        .map(|(origin, table)| {
            let table: BTreeMap<String, Vec<String>> = table
                .into_iter()
                .map(|(destination, path)| {
                    (
                        destination.to_owned(),
                        path.chars().map(String::from).collect(),
                    )
                })
                .collect();
            (origin.to_owned(), table)
        })
        .collect();

        NetworkConfig {
            max_queue_size: DEFAULT_MAX_QUEUE_SIZE,
            nodes: ["A", "B", "C", "D", "E"].map(String::from).to_vec(),
            links,
            routes,
        }
    }
}
