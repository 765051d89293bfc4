//! Ordered threshold tables shared by the numeric factors.

/// Inclusive lower bound mapped to a point contribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tier<T> {
    pub lower_bound: T,
    pub points: u16,
}

/// Tiers listed from the highest bound to the lowest, plus the points awarded
/// when no tier matches.
#[derive(Debug, Clone, Copy)]
pub struct TierTable<T: 'static> {
    tiers: &'static [Tier<T>],
    floor: u16,
}

impl<T: PartialOrd + Copy + 'static> TierTable<T> {
    pub const fn new(tiers: &'static [Tier<T>], floor: u16) -> Self {
        Self { tiers, floor }
    }

    /// First tier (in declaration order) whose bound is `<= value`. Values that
    /// compare unordered, such as NaN, fall through to the floor.
    pub fn points_for(&self, value: T) -> u16 {
        self.tiers
            .iter()
            .find(|tier| value >= tier.lower_bound)
            .map(|tier| tier.points)
            .unwrap_or(self.floor)
    }

    pub fn tiers(&self) -> &'static [Tier<T>] {
        self.tiers
    }

    pub fn floor(&self) -> u16 {
        self.floor
    }

    /// Largest contribution the table can produce.
    pub fn cap(&self) -> u16 {
        self.tiers
            .iter()
            .map(|tier| tier.points)
            .fold(self.floor, u16::max)
    }
}
