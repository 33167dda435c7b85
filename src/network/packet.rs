use derive_more::Display;
use serde::Serialize;

use super::routing::NodeIndex;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PacketId(pub(super) u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Packet {
    pub id: PacketId,
    pub destination: NodeIndex,
}
