//! Player status and the flags selecting which stats are observed

use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::HungerState;
use crate::{EXP_LEVELS, MAX_ARMOR, MAX_DUNGEON_LEVEL, MAX_HP, MAX_PLAYER_LEVEL, MAX_STRENGTH};

bitflags! {
    /// Stats exposed as status channels
    ///
    /// Bit order is channel order.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct StatusFlag: u32 {
        const DUNGEON_LEVEL = 0b0_0000_0001;
        const HP_CURRENT = 0b0_0000_0010;
        const HP_MAX = 0b0_0000_0100;
        const STR_CURRENT = 0b0_0000_1000;
        const STR_MAX = 0b0_0001_0000;
        const DEFENSE = 0b0_0010_0000;
        const PLAYER_LEVEL = 0b0_0100_0000;
        const EXP = 0b0_1000_0000;
        const HUNGER = 0b1_0000_0000;
        const FULL = 0b1_1111_1111;
    }
}

impl StatusFlag {
    pub const EMPTY: StatusFlag = StatusFlag::empty();

    /// Single-bit flags in channel order
    pub const ORDERED: [StatusFlag; 9] = [
        StatusFlag::DUNGEON_LEVEL,
        StatusFlag::HP_CURRENT,
        StatusFlag::HP_MAX,
        StatusFlag::STR_CURRENT,
        StatusFlag::STR_MAX,
        StatusFlag::DEFENSE,
        StatusFlag::PLAYER_LEVEL,
        StatusFlag::EXP,
        StatusFlag::HUNGER,
    ];

    /// Number of status channels these flags select
    ///
    /// Bits above the ninth are ignored.
    pub const fn count_one(&self) -> usize {
        (self.bits() & StatusFlag::FULL.bits()).count_ones() as usize
    }

    /// Selected single-bit flags in channel order
    pub fn selected(&self) -> impl Iterator<Item = StatusFlag> + '_ {
        StatusFlag::ORDERED
            .into_iter()
            .filter(move |f| self.contains(*f))
    }
}

impl Default for StatusFlag {
    fn default() -> Self {
        StatusFlag::FULL
    }
}

impl Serialize for StatusFlag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for StatusFlag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u32::deserialize(deserializer)?;
        Ok(StatusFlag::from_bits_truncate(bits))
    }
}

/// Everything shown on the status line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub dungeon_level: u32,
    pub hp_current: i32,
    pub hp_max: i32,
    pub str_current: i32,
    pub str_max: i32,
    pub defense: i32,
    pub player_level: u32,
    pub exp: u32,
    pub hunger: HungerState,
    pub gold: u32,
}

impl Status {
    /// Raw values of every stat in channel order
    fn values(&self) -> [i32; 9] {
        [
            self.dungeon_level as i32,
            self.hp_current,
            self.hp_max,
            self.str_current,
            self.str_max,
            self.defense,
            self.player_level as i32,
            self.exp as i32,
            self.hunger.index(),
        ]
    }

    /// Denominators scaling each stat into `[0, 1]`
    fn scales(&self) -> [f32; 9] {
        [
            MAX_DUNGEON_LEVEL as f32,
            self.hp_max.max(1) as f32,
            MAX_HP as f32,
            MAX_STRENGTH as f32,
            MAX_STRENGTH as f32,
            MAX_ARMOR as f32,
            MAX_PLAYER_LEVEL as f32,
            EXP_LEVELS[EXP_LEVELS.len() - 1] as f32,
            HungerState::Starved.index() as f32,
        ]
    }

    /// Raw value of a single stat
    ///
    /// `flag` must be one bit; anything else reads as 0.
    pub fn value(&self, flag: StatusFlag) -> i32 {
        match StatusFlag::ORDERED.iter().position(|f| *f == flag) {
            Some(i) => self.values()[i],
            None => 0,
        }
    }

    /// Single stat scaled into `[0, 1]`
    pub fn normalized(&self, flag: StatusFlag) -> f32 {
        match StatusFlag::ORDERED.iter().position(|f| *f == flag) {
            Some(i) => (self.values()[i] as f32 / self.scales()[i]).clamp(0.0, 1.0),
            None => 0.0,
        }
    }

    /// Raw values of the selected stats in channel order
    pub fn to_vec(&self, flags: StatusFlag) -> Vec<i32> {
        flags.selected().map(|f| self.value(f)).collect()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Level:{} Gold:{} Hp:{}({}) Str:{}({}) Arm:{} Exp:{}/{} {}",
            self.dungeon_level,
            self.gold,
            self.hp_current,
            self.hp_max,
            self.str_current,
            self.str_max,
            self.defense,
            self.player_level,
            self.exp,
            self.hunger.label()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_one() {
        assert_eq!(StatusFlag::FULL.count_one(), 9);
        assert_eq!(StatusFlag::EMPTY.count_one(), 0);
        let flags = StatusFlag::DUNGEON_LEVEL | StatusFlag::HUNGER;
        assert_eq!(flags.count_one(), 2);
        // stray high bits are not channels
        let stray = StatusFlag::from_bits_retain(0xFFFF_0001);
        assert_eq!(stray.count_one(), 1);
    }

    #[test]
    fn test_ordered_covers_full() {
        let all = StatusFlag::ORDERED
            .iter()
            .fold(StatusFlag::EMPTY, |acc, f| acc | *f);
        assert_eq!(all, StatusFlag::FULL);
        assert_eq!(StatusFlag::FULL.selected().count(), 9);
    }

    #[test]
    fn test_to_vec_keeps_bit_order() {
        let status = Status {
            dungeon_level: 3,
            hp_current: 7,
            hp_max: 12,
            hunger: HungerState::Weak,
            ..Status::default()
        };
        let flags = StatusFlag::HUNGER | StatusFlag::DUNGEON_LEVEL | StatusFlag::HP_MAX;
        assert_eq!(status.to_vec(flags), vec![3, 12, 2]);
        assert!(status.to_vec(StatusFlag::EMPTY).is_empty());
    }

    #[test]
    fn test_normalized_is_clamped() {
        let status = Status {
            hp_current: 20,
            hp_max: 10,
            str_current: 16,
            ..Status::default()
        };
        assert_eq!(status.normalized(StatusFlag::HP_CURRENT), 1.0);
        assert!((status.normalized(StatusFlag::STR_CURRENT) - 16.0 / 31.0).abs() < 1e-6);
        assert_eq!(status.normalized(StatusFlag::FULL), 0.0);
    }

    #[test]
    fn test_flag_serde() {
        let flags = StatusFlag::HP_CURRENT | StatusFlag::EXP;
        let json = serde_json::to_string(&flags).unwrap();
        assert_eq!(json, "130");
        let back: StatusFlag = serde_json::from_str(&json).unwrap();
        assert_eq!(back, flags);
    }

    #[test]
    fn test_display() {
        let status = Status {
            dungeon_level: 1,
            hp_current: 12,
            hp_max: 12,
            str_current: 16,
            str_max: 16,
            defense: 4,
            player_level: 1,
            ..Status::default()
        };
        assert_eq!(
            status.to_string(),
            "Level:1 Gold:0 Hp:12(12) Str:16(16) Arm:4 Exp:1/0 "
        );
    }
}
