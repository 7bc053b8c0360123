//! Persistent progression over the profile store: unlocked levels, per-level
//! best scores and stars, and the player-tunable settings. Values are plain
//! strings / JSON maps; malformed stored data degrades to defaults with a
//! warning, never an error.

use std::collections::BTreeMap;

use crate::api::store::ProfileStore;
use crate::systems::physics::Movement;

const KEY_MAX_LEVEL: &str = "skyline_max_level";
const KEY_LEVEL_SCORES: &str = "skyline_level_scores";
const KEY_LEVEL_STARS: &str = "skyline_level_stars";
const KEY_SPEED: &str = "skyline_speed";
const KEY_JUMP: &str = "skyline_jump";
const KEY_MUSIC: &str = "skyline_music";
const KEY_SFX: &str = "skyline_sfx";

/// Highest unlocked level, 1 if never stored.
pub fn max_unlocked(store: &impl ProfileStore) -> u32 {
    store
        .get(KEY_MAX_LEVEL)
        .and_then(|v| v.parse().ok())
        .unwrap_or(1)
}

pub fn set_max_unlocked(store: &mut impl ProfileStore, level: u32) {
    store.set(KEY_MAX_LEVEL, &level.to_string());
}

fn load_map(store: &impl ProfileStore, key: &str) -> BTreeMap<u32, u32> {
    match store.get(key) {
        None => BTreeMap::new(),
        Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            log::warn!("discarding malformed stored map {}: {}", key, e);
            BTreeMap::new()
        }),
    }
}

fn save_map(store: &mut impl ProfileStore, key: &str, map: &BTreeMap<u32, u32>) {
    match serde_json::to_string(map) {
        Ok(json) => store.set(key, &json),
        Err(e) => log::warn!("failed to serialize {}: {}", key, e),
    }
}

/// Best score per level.
pub fn level_scores(store: &impl ProfileStore) -> BTreeMap<u32, u32> {
    load_map(store, KEY_LEVEL_SCORES)
}

/// Record a level score; keeps the stored value unless strictly improved.
/// Returns whether the store changed.
pub fn record_level_score(store: &mut impl ProfileStore, level: u32, score: u32) -> bool {
    let mut scores = level_scores(store);
    let improved = scores.get(&level).map_or(true, |&best| score > best);
    if improved {
        scores.insert(level, score);
        save_map(store, KEY_LEVEL_SCORES, &scores);
    }
    improved
}

/// Best star rating per level (1..=3).
pub fn level_stars(store: &impl ProfileStore) -> BTreeMap<u32, u32> {
    load_map(store, KEY_LEVEL_STARS)
}

pub fn record_level_stars(store: &mut impl ProfileStore, level: u32, stars: u8) -> bool {
    let mut all = level_stars(store);
    let improved = all.get(&level).map_or(true, |&best| stars as u32 > best);
    if improved {
        all.insert(level, stars as u32);
        save_map(store, KEY_LEVEL_STARS, &all);
    }
    improved
}

/// Cumulative total: sum of per-level bests. This is what the leaderboard
/// ranks on.
pub fn total_score(store: &impl ProfileStore) -> u32 {
    level_scores(store).values().sum()
}

/// Player-tunable settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub speed: f32,
    pub jump_force: f32,
    pub music_enabled: bool,
    pub sfx_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        let m = Movement::default();
        Self {
            speed: m.speed,
            jump_force: m.jump_force,
            music_enabled: true,
            sfx_enabled: true,
        }
    }
}

impl Settings {
    pub fn load(store: &impl ProfileStore) -> Self {
        let defaults = Self::default();
        Self {
            speed: store
                .get(KEY_SPEED)
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.speed),
            jump_force: store
                .get(KEY_JUMP)
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.jump_force),
            music_enabled: store.get(KEY_MUSIC).map_or(true, |v| v != "false"),
            sfx_enabled: store.get(KEY_SFX).map_or(true, |v| v != "false"),
        }
    }

    pub fn save(&self, store: &mut impl ProfileStore) {
        store.set(KEY_SPEED, &self.speed.to_string());
        store.set(KEY_JUMP, &self.jump_force.to_string());
        store.set(KEY_MUSIC, if self.music_enabled { "true" } else { "false" });
        store.set(KEY_SFX, if self.sfx_enabled { "true" } else { "false" });
    }

    pub fn movement(&self) -> Movement {
        Movement {
            speed: self.speed,
            jump_force: self.jump_force,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::store::MemoryStore;

    #[test]
    fn unlocked_defaults_to_one() {
        let store = MemoryStore::new();
        assert_eq!(max_unlocked(&store), 1);
    }

    #[test]
    fn unlock_round_trips() {
        let mut store = MemoryStore::new();
        set_max_unlocked(&mut store, 4);
        assert_eq!(max_unlocked(&store), 4);
    }

    #[test]
    fn score_only_overwrites_when_strictly_better() {
        let mut store = MemoryStore::new();
        assert!(record_level_score(&mut store, 2, 300));
        assert!(!record_level_score(&mut store, 2, 300));
        assert!(!record_level_score(&mut store, 2, 100));
        assert!(record_level_score(&mut store, 2, 500));
        assert_eq!(level_scores(&store).get(&2), Some(&500));
    }

    #[test]
    fn total_sums_per_level_bests() {
        let mut store = MemoryStore::new();
        record_level_score(&mut store, 1, 500);
        record_level_score(&mut store, 2, 300);
        record_level_score(&mut store, 3, 500);
        assert_eq!(total_score(&store), 1300);
    }

    #[test]
    fn malformed_stored_map_degrades_to_empty() {
        let mut store = MemoryStore::new();
        store.set(KEY_LEVEL_SCORES, "not json {");
        assert!(level_scores(&store).is_empty());
        assert_eq!(total_score(&store), 0);
    }

    #[test]
    fn stars_keep_best() {
        let mut store = MemoryStore::new();
        record_level_stars(&mut store, 1, 2);
        record_level_stars(&mut store, 1, 1);
        assert_eq!(level_stars(&store).get(&1), Some(&2));
        record_level_stars(&mut store, 1, 3);
        assert_eq!(level_stars(&store).get(&1), Some(&3));
    }

    #[test]
    fn settings_round_trip_and_default() {
        let mut store = MemoryStore::new();
        assert_eq!(Settings::load(&store), Settings::default());

        let custom = Settings {
            speed: 10.0,
            jump_force: 25.0,
            music_enabled: false,
            sfx_enabled: true,
        };
        custom.save(&mut store);
        assert_eq!(Settings::load(&store), custom);
    }
}
