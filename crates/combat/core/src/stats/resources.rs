//! Resource meters (HP / MP).
//!
//! Current values are floating-point and clamped into `[0, max]` by
//! every mutation; the maximum never changes mid-encounter.

/// A clamped resource pool.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    current: f64,
    max: f64,
}

impl ResourceMeter {
    /// A full meter with the given maximum.
    pub fn full(max: f64) -> Self {
        let max = max.max(0.0);
        Self { current: max, max }
    }

    /// A meter with an explicit current value, clamped into range.
    pub fn with_current(current: f64, max: f64) -> Self {
        let max = max.max(0.0);
        Self {
            current: current.clamp(0.0, max),
            max,
        }
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn is_empty(&self) -> bool {
        self.current <= 0.0
    }

    /// Fraction of the pool remaining, in [0, 1].
    pub fn ratio(&self) -> f64 {
        if self.max <= 0.0 {
            0.0
        } else {
            self.current / self.max
        }
    }

    /// Subtracts damage. A negative amount heals (unclamped armor can
    /// invert damage sign); either way the result stays in `[0, max]`.
    pub fn damage(&mut self, amount: f64) {
        self.current = (self.current - amount).clamp(0.0, self.max);
    }

    /// Adds a restorative amount, capped at max.
    pub fn restore(&mut self, amount: f64) {
        self.current = (self.current + amount).clamp(0.0, self.max);
    }

    /// Spends from the pool; fails without mutation if short.
    pub fn spend(&mut self, amount: f64) -> bool {
        if amount > self.current {
            return false;
        }
        self.current -= amount;
        true
    }
}
