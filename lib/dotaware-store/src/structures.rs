//! Tower and barracks state bitmasks.
//!
//! Bit `i` set means structure `i` is still standing. When a match carries
//! no state at all every structure is assumed standing.

pub const TOWER_COUNT: usize = 11;
pub const BARRACKS_COUNT: usize = 6;

/// Tower names in bit order.
pub const TOWER_NAMES: [&str; TOWER_COUNT] = [
    "Top Tier 1",
    "Top Tier 2",
    "Top Tier 3",
    "Middle Tier 1",
    "Middle Tier 2",
    "Middle Tier 3",
    "Bottom Tier 1",
    "Bottom Tier 2",
    "Bottom Tier 3",
    "Ancient Top",
    "Ancient Bottom",
];

/// Barracks names in bit order.
pub const BARRACKS_NAMES: [&str; BARRACKS_COUNT] = [
    "Top Melee",
    "Top Ranged",
    "Middle Melee",
    "Middle Ranged",
    "Bottom Melee",
    "Bottom Ranged",
];

const TOWER_MASK: u16 = (1 << TOWER_COUNT) - 1;
const BARRACKS_MASK: u8 = (1 << BARRACKS_COUNT) - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TowerState(u16);

impl TowerState {
    pub const ALL_STANDING: Self = Self(TOWER_MASK);

    pub fn new(bits: u16) -> Self {
        Self(bits & TOWER_MASK)
    }

    pub fn bits(self) -> u16 {
        self.0
    }

    pub fn is_standing(self, index: usize) -> bool {
        index < TOWER_COUNT && self.0 & (1 << index) != 0
    }

    pub fn standing(self) -> usize {
        self.0.count_ones() as usize
    }
}

impl Default for TowerState {
    fn default() -> Self {
        Self::ALL_STANDING
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BarracksState(u8);

impl BarracksState {
    pub const ALL_STANDING: Self = Self(BARRACKS_MASK);

    pub fn new(bits: u8) -> Self {
        Self(bits & BARRACKS_MASK)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn is_standing(self, index: usize) -> bool {
        index < BARRACKS_COUNT && self.0 & (1 << index) != 0
    }

    pub fn standing(self) -> usize {
        self.0.count_ones() as usize
    }
}

impl Default for BarracksState {
    fn default() -> Self {
        Self::ALL_STANDING
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_all_standing() {
        assert_eq!(TowerState::default().bits(), 0b111_1111_1111);
        assert_eq!(BarracksState::default().bits(), 0b11_1111);
        assert!((0..TOWER_COUNT).all(|i| TowerState::default().is_standing(i)));
    }

    #[test]
    fn test_bits_beyond_width_are_masked() {
        let towers = TowerState::new(u16::MAX);
        assert_eq!(towers, TowerState::ALL_STANDING);
        assert!(!towers.is_standing(TOWER_COUNT));
        assert_eq!(BarracksState::new(0b1100_0001).bits(), 0b1);
    }

    #[test]
    fn test_destroyed_towers() {
        // Top tier 1 and mid tier 1 down
        let towers = TowerState::new(TOWER_MASK & !0b1001);
        assert!(!towers.is_standing(0));
        assert!(towers.is_standing(1));
        assert!(!towers.is_standing(3));
        assert_eq!(towers.standing(), 9);
    }
}
