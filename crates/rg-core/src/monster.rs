//! Enemies
//!
//! The 26 builtin enemies are named by their screen letter. None of them are
//! placed unless the game config lists them.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::action::can_step;
use crate::dungeon::Level;
use crate::player::Player;
use crate::rng::GameRng;

/// Builtin enemy types, in letter order
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum EnemyKind {
    Aquator = 0,
    Bat,
    Centaur,
    Dragon,
    Emu,
    VenusFlytrap,
    Griffin,
    Hobgoblin,
    IceMonster,
    Jabberwock,
    Kestrel,
    Leprechaun,
    Medusa,
    Nymph,
    Orc,
    Phantom,
    Quagga,
    Rattlesnake,
    Snake,
    Troll,
    BlackUnicorn,
    Vampire,
    Wraith,
    Xeroc,
    Yeti,
    Zombie,
}

/// Fixed combat stats of an enemy type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyStats {
    /// Hit dice; hp is `level`d8
    pub level: u32,
    /// Armor class, lower is better
    pub armor: i32,
    /// Damage as (dice, sides); (0, 0) never hurts
    pub damage: (u32, u32),
    /// Experience for a kill
    pub exp: u32,
}

const fn enemy_stats(level: u32, armor: i32, damage: (u32, u32), exp: u32) -> EnemyStats {
    EnemyStats {
        level,
        armor,
        damage,
        exp,
    }
}

impl EnemyKind {
    /// Screen letter, `A` to `Z`
    pub const fn letter(&self) -> char {
        (b'A' + *self as u8) as char
    }

    pub fn from_letter(c: char) -> Option<Self> {
        EnemyKind::iter().find(|k| k.letter() == c)
    }

    pub const fn stats(&self) -> EnemyStats {
        match self {
            EnemyKind::Aquator => enemy_stats(5, 2, (0, 0), 20),
            EnemyKind::Bat => enemy_stats(1, 3, (1, 2), 1),
            EnemyKind::Centaur => enemy_stats(4, 4, (1, 5), 17),
            EnemyKind::Dragon => enemy_stats(10, -1, (3, 10), 5000),
            EnemyKind::Emu => enemy_stats(1, 7, (1, 2), 2),
            EnemyKind::VenusFlytrap => enemy_stats(8, 3, (2, 4), 80),
            EnemyKind::Griffin => enemy_stats(13, 2, (3, 5), 2000),
            EnemyKind::Hobgoblin => enemy_stats(1, 5, (1, 8), 3),
            EnemyKind::IceMonster => enemy_stats(1, 9, (0, 0), 5),
            EnemyKind::Jabberwock => enemy_stats(15, 6, (2, 12), 3000),
            EnemyKind::Kestrel => enemy_stats(1, 7, (1, 4), 1),
            EnemyKind::Leprechaun => enemy_stats(3, 8, (1, 1), 10),
            EnemyKind::Medusa => enemy_stats(8, 2, (3, 4), 200),
            EnemyKind::Nymph => enemy_stats(3, 9, (0, 0), 37),
            EnemyKind::Orc => enemy_stats(1, 6, (1, 8), 5),
            EnemyKind::Phantom => enemy_stats(8, 3, (4, 4), 120),
            EnemyKind::Quagga => enemy_stats(3, 3, (1, 5), 15),
            EnemyKind::Rattlesnake => enemy_stats(2, 3, (1, 6), 9),
            EnemyKind::Snake => enemy_stats(1, 5, (1, 3), 2),
            EnemyKind::Troll => enemy_stats(6, 4, (2, 6), 120),
            EnemyKind::BlackUnicorn => enemy_stats(7, -2, (2, 9), 190),
            EnemyKind::Vampire => enemy_stats(8, 1, (1, 10), 350),
            EnemyKind::Wraith => enemy_stats(5, 4, (1, 6), 55),
            EnemyKind::Xeroc => enemy_stats(7, 7, (4, 4), 100),
            EnemyKind::Yeti => enemy_stats(4, 6, (1, 6), 50),
            EnemyKind::Zombie => enemy_stats(2, 8, (1, 8), 6),
        }
    }
}

/// An enemy on the level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub x: usize,
    pub y: usize,
    pub hp: i32,
    /// Asleep until it first sees the player
    pub awake: bool,
}

impl Enemy {
    /// Roll a fresh enemy of `kind` at (x, y)
    pub fn new(kind: EnemyKind, x: usize, y: usize, rng: &mut GameRng) -> Self {
        let hp = rng.dice(kind.stats().level, 8).max(1) as i32;
        Self {
            kind,
            x,
            y,
            hp,
            awake: false,
        }
    }
}

/// To-hit roll: d20 plus bonus against `20 - attacker level - target armor`
pub fn swing(rng: &mut GameRng, attacker_level: i32, target_armor: i32, bonus: i32) -> bool {
    let need = 20 - attacker_level - target_armor;
    rng.rnd(20) as i32 + bonus >= need
}

/// Let every enemy on the level act once
///
/// Sleeping enemies wake when they can see the player. Awake enemies next
/// to the player attack, the others step towards the player.
pub fn enemies_act(level: &mut Level, player: &mut Player, rng: &mut GameRng) {
    let target = (player.x, player.y);
    for i in 0..level.enemies.len() {
        let (ex, ey) = (level.enemies[i].x, level.enemies[i].y);
        if !level.enemies[i].awake {
            if level.can_see(target.0, target.1, ex, ey) {
                level.enemies[i].awake = true;
            }
            continue;
        }

        if ex.abs_diff(target.0) <= 1 && ey.abs_diff(target.1) <= 1 {
            let stats = level.enemies[i].kind.stats();
            if stats.damage.0 > 0
                && swing(rng, stats.level as i32, player.armor_class(), 0)
            {
                let damage = rng.dice(stats.damage.0, stats.damage.1) as i32;
                player.hp -= damage;
            }
            if player.is_dead() {
                return;
            }
            continue;
        }

        if let Some(next) = step_towards(level, (ex, ey), target) {
            level.enemies[i].x = next.0;
            level.enemies[i].y = next.1;
        }
    }
}

/// Neighbour of `from` that gets closest to `to`, if any is open
fn step_towards(
    level: &Level,
    from: (usize, usize),
    to: (usize, usize),
) -> Option<(usize, usize)> {
    let distance = |p: (usize, usize)| p.0.abs_diff(to.0).max(p.1.abs_diff(to.1));
    level
        .neighbours(from.0, from.1)
        .into_iter()
        .filter(|&p| p != to && distance(p) < distance(from))
        .filter(|&p| can_step(level, from, p) && level.enemy_at(p.0, p.1).is_none())
        .min_by_key(|&p| distance(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters() {
        assert_eq!(EnemyKind::Aquator.letter(), 'A');
        assert_eq!(EnemyKind::Zombie.letter(), 'Z');
        assert_eq!(EnemyKind::iter().count(), 26);
        for kind in EnemyKind::iter() {
            assert_eq!(EnemyKind::from_letter(kind.letter()), Some(kind));
        }
        assert_eq!(EnemyKind::from_letter('a'), None);
    }

    #[test]
    fn test_new_enemy_hp() {
        let mut rng = GameRng::new(1);
        for _ in 0..50 {
            let bat = Enemy::new(EnemyKind::Bat, 1, 1, &mut rng);
            assert!((1..=8).contains(&bat.hp));
            assert!(!bat.awake);
        }
    }

    #[test]
    fn test_swing_always_hits_when_easy() {
        let mut rng = GameRng::new(1);
        for _ in 0..50 {
            assert!(swing(&mut rng, 20, 10, 0));
            assert!(!swing(&mut rng, 0, -10, 0));
        }
    }
}
