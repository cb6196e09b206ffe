//! Player hunger state

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::{HUNGRY_THRESHOLD, WEAK_THRESHOLD};

/// Hunger state levels
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
)]
#[repr(u8)]
pub enum HungerState {
    /// Normal state
    #[default]
    Normal = 0,

    /// Getting hungry
    Hungry = 1,

    /// Weak from hunger
    Weak = 2,

    /// Dead from starvation
    Starved = 3,
}

impl HungerState {
    /// Calculate hunger state from nutrition value
    pub fn from_nutrition(nutrition: i32) -> Self {
        if nutrition >= HUNGRY_THRESHOLD {
            HungerState::Normal
        } else if nutrition >= WEAK_THRESHOLD {
            HungerState::Hungry
        } else if nutrition > 0 {
            HungerState::Weak
        } else {
            HungerState::Starved
        }
    }

    /// Position on the hunger scale, 0 for `Normal`
    pub const fn index(&self) -> i32 {
        *self as i32
    }

    /// Status-line label; empty when not hungry
    pub const fn label(&self) -> &'static str {
        match self {
            HungerState::Normal => "",
            HungerState::Hungry => "Hungry",
            HungerState::Weak => "Weak",
            HungerState::Starved => "Starved",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_from_nutrition() {
        assert_eq!(HungerState::from_nutrition(1300), HungerState::Normal);
        assert_eq!(HungerState::from_nutrition(300), HungerState::Normal);
        assert_eq!(HungerState::from_nutrition(299), HungerState::Hungry);
        assert_eq!(HungerState::from_nutrition(150), HungerState::Hungry);
        assert_eq!(HungerState::from_nutrition(1), HungerState::Weak);
        assert_eq!(HungerState::from_nutrition(0), HungerState::Starved);
        assert_eq!(HungerState::from_nutrition(-4), HungerState::Starved);
    }

    #[test]
    fn test_indices_are_ordered() {
        let indices: Vec<i32> = HungerState::iter().map(|h| h.index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }
}
