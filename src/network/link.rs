use super::routing::NodeIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkAtCapacity;

/// A directed link and the number of packets it has accepted this tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    from: NodeIndex,
    to: NodeIndex,
    capacity: u32,
    load: u32,
}

impl Link {
    #[must_use]
    pub const fn new(from: NodeIndex, to: NodeIndex, capacity: u32) -> Link {
        Link {
            from,
            to,
            capacity,
            load: 0,
        }
    }

    #[must_use]
    pub const fn from(&self) -> NodeIndex {
        self.from
    }

    #[must_use]
    pub const fn to(&self) -> NodeIndex {
        self.to
    }

    #[must_use]
    pub const fn capacity(&self) -> u32 {
        self.capacity
    }

    #[must_use]
    pub const fn load(&self) -> u32 {
        self.load
    }

    pub fn try_admit(&mut self) -> Result<(), LinkAtCapacity> {
        if self.load >= self.capacity {
            return Err(LinkAtCapacity);
        }
        self.load += 1;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.load = 0;
    }
}
