//! Per-unit compilation state.

/// State scoped to one unit: its display identifier and heading counter.
///
/// A fresh context is created for every unit, so units can be compiled
/// independently and in parallel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitContext {
    unit: String,
    heading_counter: u32,
}

impl UnitContext {
    /// Creates a context with the heading counter at 1.
    pub fn new(unit: impl Into<String>) -> Self {
        Self {
            unit: unit.into(),
            heading_counter: 1,
        }
    }

    /// Display identifier of the unit.
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Value the next major heading will receive.
    pub fn heading_counter(&self) -> u32 {
        self.heading_counter
    }

    /// Takes the counter for a major heading and advances it.
    pub fn next_major(&mut self) -> u32 {
        let value = self.heading_counter;
        self.heading_counter += 1;
        value
    }
}
