//! Archetype data loading from RON files.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use super::error::ConfigError;
use crate::combat::ActorTuning;
use crate::core::GameState;

/// Directory scanned for `*.ron` archetype definitions.
pub const ARCHETYPE_DIR: &str = "assets/data/enemies";

/// Archetypes compiled into the binary, used when no data directory exists.
const BUILTIN_ARCHETYPES: &[(&str, &str)] = &[
    ("charger", include_str!("../../assets/data/enemies/charger.ron")),
    ("brute", include_str!("../../assets/data/enemies/brute.ron")),
    ("warden", include_str!("../../assets/data/enemies/warden.ron")),
    ("scuttler", include_str!("../../assets/data/enemies/scuttler.ron")),
    ("drifter", include_str!("../../assets/data/enemies/drifter.ron")),
];

fn default_turn_cooldown() -> f32 {
    0.35
}

fn default_death_duration() -> f32 {
    0.6
}

fn default_ground_probe() -> (f32, f32) {
    (6.0, 10.0)
}

/// Lunge tuning shared by chargers, brutes and the boss.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct ChargeConfig {
    /// Horizontal distance at which a charge may start.
    pub range: f32,
    pub windup: f32,
    pub speed: f32,
    pub duration: f32,
    pub cooldown: f32,
}

/// Hop sequence tuning for the boss and scuttlers.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct JumpConfig {
    pub hops: u32,
    pub jump_velocity: f32,
    pub horizontal_speed: f32,
    /// Pause on the ground between hops.
    pub hop_delay: f32,
    /// Camera shake intensity on each landing; zero disables the shake.
    #[serde(default)]
    pub landing_shake: f32,
}

/// Aimed projectile tuning for the boss.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct RangedConfig {
    pub windup: f32,
    pub projectile_speed: f32,
    pub projectile_damage: i32,
    pub recovery: f32,
}

/// One entry of a boss attack cycle.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum BossMove {
    Jump,
    Ranged,
    Charge,
}

/// Which attack behavior an archetype runs, with its tuning.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub enum BehaviorConfig {
    Charger {
        charge: ChargeConfig,
    },
    Brute {
        charge: ChargeConfig,
        /// Opacity while slowed by a hazard zone.
        slowed_opacity: f32,
    },
    Boss {
        pattern: Vec<BossMove>,
        charge: ChargeConfig,
        jump: JumpConfig,
        ranged: RangedConfig,
        /// Pause between two moves of the cycle.
        cooldown: f32,
    },
    Scuttler {
        jump: JumpConfig,
        range: f32,
        cooldown: f32,
    },
    /// Never aggroes; still takes damage.
    Passive,
}

/// Immutable per-archetype combat configuration.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct CombatConfig {
    pub name: String,
    pub max_hp: i32,
    pub contact_damage: i32,
    pub patrol_speed: f32,
    pub aggro_speed: f32,
    pub aggro_radius: f32,
    pub deaggro_radius: f32,
    pub hit_stun: f32,
    pub invulnerability: f32,
    pub hurt_flash: f32,
    /// Knockback (x, y); x is mirrored away from the attacker.
    pub knockback: (f32, f32),
    /// Inclusive coin drop range (min, max).
    pub loot: (u32, u32),
    /// Bounding box (width, height).
    pub size: (f32, f32),
    #[serde(default = "default_turn_cooldown")]
    pub turn_cooldown: f32,
    /// Length of the shrink/fade sequence before removal.
    #[serde(default = "default_death_duration")]
    pub death_duration: f32,
    /// Edge probe (width, depth) cast ahead of and below the feet.
    #[serde(default = "default_ground_probe")]
    pub ground_probe: (f32, f32),
    pub behavior: BehaviorConfig,
}

impl CombatConfig {
    /// Parse and validate a RON definition. `origin` names the source in errors.
    pub fn from_ron(origin: &str, contents: &str) -> Result<Self, ConfigError> {
        let config: CombatConfig =
            ron::from_str(contents).map_err(|e| ConfigError::ParseError {
                path: origin.to_string(),
                details: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.size.0, self.size.1)
    }

    pub fn knockback(&self) -> Vec2 {
        Vec2::new(self.knockback.0, self.knockback.1)
    }

    pub fn ground_probe(&self) -> Vec2 {
        Vec2::new(self.ground_probe.0, self.ground_probe.1)
    }

    pub fn actor_tuning(&self) -> ActorTuning {
        ActorTuning {
            hit_stun: self.hit_stun,
            invulnerability: self.invulnerability,
            hurt_flash: self.hurt_flash,
            knockback: self.knockback(),
        }
    }

    /// Reject configurations that would produce undefined runtime behavior.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let name = self.name.as_str();

        require(name, "max_hp", self.max_hp as f32, self.max_hp > 0, "must be positive")?;
        require(
            name,
            "contact_damage",
            self.contact_damage as f32,
            self.contact_damage >= 0,
            "must not be negative",
        )?;
        non_negative(name, "patrol_speed", self.patrol_speed)?;
        non_negative(name, "aggro_speed", self.aggro_speed)?;
        non_negative(name, "aggro_radius", self.aggro_radius)?;
        non_negative(name, "hit_stun", self.hit_stun)?;
        non_negative(name, "invulnerability", self.invulnerability)?;
        non_negative(name, "hurt_flash", self.hurt_flash)?;
        non_negative(name, "turn_cooldown", self.turn_cooldown)?;
        positive(name, "death_duration", self.death_duration)?;
        positive(name, "size.width", self.size.0)?;
        positive(name, "size.height", self.size.1)?;
        positive(name, "ground_probe.width", self.ground_probe.0)?;
        positive(name, "ground_probe.depth", self.ground_probe.1)?;
        require(
            name,
            "deaggro_radius",
            self.deaggro_radius,
            self.deaggro_radius.is_finite(),
            "must be finite",
        )?;

        if self.deaggro_radius <= self.aggro_radius {
            return Err(ConfigError::RadiusOrder {
                archetype: name.to_string(),
                aggro: self.aggro_radius,
                deaggro: self.deaggro_radius,
            });
        }

        if self.loot.0 > self.loot.1 {
            return Err(ConfigError::EmptyLootRange {
                archetype: name.to_string(),
                min: self.loot.0,
                max: self.loot.1,
            });
        }

        match &self.behavior {
            BehaviorConfig::Charger { charge } => validate_charge(name, charge),
            BehaviorConfig::Brute {
                charge,
                slowed_opacity,
            } => {
                validate_charge(name, charge)?;
                require(
                    name,
                    "slowed_opacity",
                    *slowed_opacity,
                    (0.0..=1.0).contains(slowed_opacity),
                    "must be within 0..=1",
                )
            }
            BehaviorConfig::Boss {
                pattern,
                charge,
                jump,
                ranged,
                cooldown,
            } => {
                if pattern.is_empty() {
                    return Err(ConfigError::EmptyPattern {
                        archetype: name.to_string(),
                    });
                }
                validate_charge(name, charge)?;
                validate_jump(name, jump)?;
                non_negative(name, "ranged.windup", ranged.windup)?;
                positive(name, "ranged.projectile_speed", ranged.projectile_speed)?;
                require(
                    name,
                    "ranged.projectile_damage",
                    ranged.projectile_damage as f32,
                    ranged.projectile_damage >= 0,
                    "must not be negative",
                )?;
                non_negative(name, "ranged.recovery", ranged.recovery)?;
                non_negative(name, "cooldown", *cooldown)
            }
            BehaviorConfig::Scuttler {
                jump,
                range,
                cooldown,
            } => {
                validate_jump(name, jump)?;
                non_negative(name, "range", *range)?;
                non_negative(name, "cooldown", *cooldown)
            }
            BehaviorConfig::Passive => Ok(()),
        }
    }
}

fn validate_charge(name: &str, charge: &ChargeConfig) -> Result<(), ConfigError> {
    non_negative(name, "charge.range", charge.range)?;
    non_negative(name, "charge.windup", charge.windup)?;
    non_negative(name, "charge.speed", charge.speed)?;
    positive(name, "charge.duration", charge.duration)?;
    non_negative(name, "charge.cooldown", charge.cooldown)
}

fn validate_jump(name: &str, jump: &JumpConfig) -> Result<(), ConfigError> {
    require(name, "jump.hops", jump.hops as f32, jump.hops > 0, "must be positive")?;
    positive(name, "jump.jump_velocity", jump.jump_velocity)?;
    non_negative(name, "jump.horizontal_speed", jump.horizontal_speed)?;
    non_negative(name, "jump.hop_delay", jump.hop_delay)?;
    non_negative(name, "jump.landing_shake", jump.landing_shake)
}

fn require(
    archetype: &str,
    field: &'static str,
    value: f32,
    ok: bool,
    requirement: &'static str,
) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            archetype: archetype.to_string(),
            field,
            requirement,
            value,
        })
    }
}

fn non_negative(archetype: &str, field: &'static str, value: f32) -> Result<(), ConfigError> {
    require(archetype, field, value, value >= 0.0, "must not be negative")
}

fn positive(archetype: &str, field: &'static str, value: f32) -> Result<(), ConfigError> {
    require(archetype, field, value, value > 0.0, "must be positive")
}

/// Resource holding all loaded, validated archetypes.
#[derive(Resource, Default)]
pub struct ArchetypeRegistry {
    pub definitions: HashMap<String, Arc<CombatConfig>>,
}

impl ArchetypeRegistry {
    /// Get an archetype by type name (the RON file stem).
    pub fn get(&self, archetype: &str) -> Option<&Arc<CombatConfig>> {
        self.definitions.get(archetype)
    }

    pub fn require(&self, archetype: &str) -> Result<Arc<CombatConfig>, ConfigError> {
        self.get(archetype)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownArchetype(archetype.to_string()))
    }

    pub fn insert(&mut self, archetype: impl Into<String>, config: CombatConfig) {
        self.definitions.insert(archetype.into(), Arc::new(config));
    }

    /// Archetypes bundled with the crate.
    pub fn builtin() -> Result<Self, ConfigError> {
        let mut registry = Self::default();
        for (archetype, contents) in BUILTIN_ARCHETYPES {
            registry.insert(*archetype, CombatConfig::from_ron(archetype, contents)?);
        }
        Ok(registry)
    }

    /// Load every `*.ron` file in `dir`. Files that fail to read, parse or
    /// validate are logged and skipped.
    pub fn load_dir(dir: &Path) -> Result<Self, ConfigError> {
        if !dir.exists() {
            return Err(ConfigError::FileNotFound(dir.display().to_string()));
        }

        let entries = fs::read_dir(dir).map_err(|e| ConfigError::ReadError {
            path: dir.display().to_string(),
            details: e.to_string(),
        })?;

        let mut registry = Self::default();
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.extension().is_some_and(|ext| ext == "ron") {
                continue;
            }

            let archetype = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("unknown")
                .to_string();

            let loaded = fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError {
                    path: path.display().to_string(),
                    details: e.to_string(),
                })
                .and_then(|contents| {
                    CombatConfig::from_ron(&path.display().to_string(), &contents)
                });

            match loaded {
                Ok(config) => {
                    info!("Loaded archetype: {} ({})", config.name, archetype);
                    registry.insert(archetype, config);
                }
                Err(e) => error!("Rejected archetype {:?}: {}", path, e),
            }
        }

        Ok(registry)
    }
}

/// Fill the registry from disk (or the built-in set) and enter gameplay.
pub fn load_archetypes(
    mut registry: ResMut<ArchetypeRegistry>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let loaded = match ArchetypeRegistry::load_dir(Path::new(ARCHETYPE_DIR)) {
        Ok(loaded) if !loaded.definitions.is_empty() => Ok(loaded),
        Ok(_) => {
            warn!("No archetypes in {}, using built-in set", ARCHETYPE_DIR);
            ArchetypeRegistry::builtin()
        }
        Err(e) => {
            warn!("{}; using built-in archetypes", e);
            ArchetypeRegistry::builtin()
        }
    };

    match loaded {
        Ok(loaded) => {
            *registry = loaded;
            info!("Loaded {} archetypes", registry.definitions.len());
        }
        Err(e) => error!("Built-in archetypes are invalid: {}", e),
    }

    next_state.set(GameState::InGame);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_archetypes_parse_and_validate() {
        let registry = ArchetypeRegistry::builtin().expect("bundled data is valid");
        assert_eq!(registry.definitions.len(), BUILTIN_ARCHETYPES.len());
        for config in registry.definitions.values() {
            assert!(config.deaggro_radius > config.aggro_radius, "{}", config.name);
        }
    }

    #[test]
    fn unknown_archetype_is_reported() {
        let registry = ArchetypeRegistry::default();
        assert_eq!(
            registry.require("ghost"),
            Err(ConfigError::UnknownArchetype("ghost".to_string()))
        );
    }

    #[test]
    fn malformed_ron_is_a_parse_error() {
        let result = CombatConfig::from_ron("broken.ron", "(name: \"x\",");
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn inverted_radii_are_rejected() {
        let mut config = crate::testing::charger_config();
        config.deaggro_radius = config.aggro_radius;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::RadiusOrder { .. })
        ));
    }

    #[test]
    fn non_finite_deaggro_radius_is_rejected() {
        for radius in [f32::NAN, f32::INFINITY] {
            let mut config = crate::testing::charger_config();
            config.deaggro_radius = radius;
            assert!(matches!(
                config.validate(),
                Err(ConfigError::OutOfRange { field: "deaggro_radius", .. })
            ));
        }
    }

    #[test]
    fn inverted_loot_range_is_rejected() {
        let mut config = crate::testing::charger_config();
        config.loot = (3, 1);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyLootRange { min: 3, max: 1, .. })
        ));
    }

    #[test]
    fn non_positive_hit_points_are_rejected() {
        let mut config = crate::testing::charger_config();
        config.max_hp = -2;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange { field: "max_hp", .. })
        ));
    }

    #[test]
    fn empty_boss_pattern_is_rejected() {
        let mut config = crate::testing::boss_config();
        if let BehaviorConfig::Boss { pattern, .. } = &mut config.behavior {
            pattern.clear();
        }
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyPattern { .. })
        ));
    }

    #[test]
    fn zero_loot_range_is_allowed() {
        let mut config = crate::testing::charger_config();
        config.loot = (0, 0);
        assert!(config.validate().is_ok());
    }
}
