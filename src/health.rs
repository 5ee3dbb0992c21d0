//! Health pool shared by the walker and companion.
use serde::Serialize;

/// Hit points left in a run. The run is over once they reach zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Health {
    current: u32,
    max: u32,
}

impl Health {
    /// A full pool of `max` points.
    #[must_use]
    pub const fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    /// Points left.
    #[must_use]
    pub const fn current(&self) -> u32 {
        self.current
    }

    /// Points a full pool holds.
    #[must_use]
    pub const fn max(&self) -> u32 {
        self.max
    }

    /// Removes `amount` points, stopping at zero.
    pub fn decrement(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    /// Removes every remaining point.
    pub fn drain(&mut self) {
        self.current = 0;
    }

    /// Refills the pool.
    pub fn restore(&mut self) {
        self.current = self.max;
    }

    /// Whether no points are left.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.current == 0
    }
}
