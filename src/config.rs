//! Session configuration.
//!
//! A session starts from a variant preset, optionally overridden by a JSON file
//! and then by command-line flags. Values are fixed once the session starts.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, ensure, Context, Result};
use clap::ValueEnum;
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::camera::{Camera, CameraPose, Projection};
use crate::cli::Cli;
use crate::core::{Boundary, KeyMap, MovementConfig, Session};

/// Demo flavour, selecting the key table and defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// Pointer-locked mouse look inside a walled room
    #[default]
    PointerLook,
    /// Keyboard only; arrow keys look around
    KeyLook,
}

/// Initial camera placement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StartPose {
    pub position: Vec3,
    #[serde(default)]
    pub yaw: f32,
    #[serde(default)]
    pub pitch: f32,
}

impl From<StartPose> for CameraPose {
    fn from(start: StartPose) -> Self {
        CameraPose::new(start.position, start.yaw, start.pitch)
    }
}

/// A model file to load and where to place it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSpec {
    pub path: PathBuf,
    #[serde(default)]
    pub position: Vec3,
}

/// Every per-session constant; any subset may come from a file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub variant: Variant,
    pub speed: f32,
    pub rotation_speed: f32,
    pub look_sensitivity: f32,
    pub normalize_diagonal: bool,
    pub boundary: Option<Boundary>,
    pub key_map: Option<KeyMap>,
    pub start: StartPose,
    pub projection: Projection,
    pub max_frame_delta: Option<f32>,
    pub pointer_lock: bool,
    pub models: Vec<ModelSpec>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::preset(Variant::default())
    }
}

impl SessionConfig {
    pub fn preset(variant: Variant) -> Self {
        match variant {
            Variant::PointerLook => Self {
                variant,
                speed: 3.0,
                rotation_speed: 1.5,
                look_sensitivity: 0.002,
                normalize_diagonal: false,
                boundary: Some(Boundary::new(-10.0, 10.0, -5.0, 5.0)),
                key_map: None,
                start: StartPose {
                    position: Vec3::new(0.0, 1.6, 0.0),
                    yaw: 0.0,
                    pitch: 0.0,
                },
                projection: Projection::new(75.0, 0.1, 100.0),
                max_frame_delta: None,
                pointer_lock: true,
                models: Vec::new(),
            },
            Variant::KeyLook => Self {
                variant,
                speed: 3.0,
                rotation_speed: 1.5,
                look_sensitivity: 0.002,
                normalize_diagonal: false,
                boundary: None,
                key_map: None,
                start: StartPose {
                    position: Vec3::new(0.0, 0.0, 2.0),
                    yaw: 0.0,
                    pitch: 0.0,
                },
                projection: Projection::new(75.0, 0.1, 1000.0),
                max_frame_delta: None,
                pointer_lock: false,
                models: vec![ModelSpec {
                    path: PathBuf::from("assets/scene.gltf"),
                    position: Vec3::new(0.0, 1.05, -1.0),
                }],
            },
        }
    }

    /// Parse a JSON document. Fields not present fall back to the preset of the
    /// document's `variant` (or the default variant).
    pub fn from_json(text: &str) -> Result<Self> {
        let raw: serde_json::Value =
            serde_json::from_str(text).context("Config is not valid JSON")?;
        let variant = match raw.get("variant") {
            Some(v) => Variant::deserialize(v).context("Unknown variant")?,
            None => Variant::default(),
        };

        let mut merged = serde_json::to_value(Self::preset(variant))?;
        merge_json(&mut merged, raw);
        let config: Self = serde_json::from_value(merged).context("Invalid config field")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("Failed to load config: {}", path.display()))
    }

    /// Resolve preset, file and flags, in increasing priority
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::preset(cli.variant.unwrap_or_default()),
        };
        if let Some(variant) = cli.variant {
            if config.variant != variant {
                bail!(
                    "--variant {:?} conflicts with config variant {:?}; set the variant in one place",
                    variant,
                    config.variant
                );
            }
        }
        if let Some(max) = cli.max_frame_delta {
            config.max_frame_delta = Some(max);
        }
        if cli.normalize_diagonal {
            config.normalize_diagonal = true;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("speed", self.speed),
            ("rotation_speed", self.rotation_speed),
            ("look_sensitivity", self.look_sensitivity),
        ] {
            ensure!(
                value.is_finite() && value >= 0.0,
                "{} must be a non-negative number, got {}",
                name,
                value
            );
        }

        if let Some(b) = &self.boundary {
            ensure!(
                [b.min_x, b.max_x, b.min_z, b.max_z].iter().all(|v| v.is_finite()),
                "boundary values must be finite"
            );
            ensure!(b.min_x <= b.max_x, "boundary min_x {} > max_x {}", b.min_x, b.max_x);
            ensure!(b.min_z <= b.max_z, "boundary min_z {} > max_z {}", b.min_z, b.max_z);
        }

        let p = &self.projection;
        ensure!(
            p.fov_y_degrees > 0.0 && p.fov_y_degrees < 180.0,
            "fov_y_degrees must be in (0, 180), got {}",
            p.fov_y_degrees
        );
        ensure!(p.near > 0.0, "projection near must be positive, got {}", p.near);
        ensure!(p.far > p.near, "projection far {} must exceed near {}", p.far, p.near);

        if let Some(max) = self.max_frame_delta {
            ensure!(
                max.is_finite() && max >= 0.0,
                "max_frame_delta must be a non-negative number, got {}",
                max
            );
        }

        if !self.start.position.is_finite() || !self.start.yaw.is_finite() {
            bail!("start pose must be finite");
        }
        Ok(())
    }

    /// Key table in effect: the explicit override or the variant's preset
    pub fn key_map(&self) -> KeyMap {
        match (&self.key_map, self.variant) {
            (Some(map), _) => map.clone(),
            (None, Variant::PointerLook) => KeyMap::pointer_look(),
            (None, Variant::KeyLook) => KeyMap::key_look(),
        }
    }

    pub fn movement(&self) -> MovementConfig {
        MovementConfig {
            speed: self.speed,
            look_sensitivity: self.look_sensitivity,
            rotation_speed: self.rotation_speed,
            normalize_diagonal: self.normalize_diagonal,
        }
    }

    pub fn session(&self) -> Session {
        Session::new(
            Camera::new(self.start.into(), self.projection),
            self.movement(),
            self.boundary,
        )
    }
}

/// Overlay `patch` onto `base`, recursing into objects
fn merge_json(base: &mut serde_json::Value, patch: serde_json::Value) {
    match (base, patch) {
        (serde_json::Value::Object(base), serde_json::Value::Object(patch)) => {
            for (key, value) in patch {
                match base.get_mut(&key) {
                    Some(slot) if slot.is_object() && value.is_object() => merge_json(slot, value),
                    _ => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, patch) => *base = patch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Intent, Key};

    #[test]
    fn test_pointer_look_preset_matches_room() {
        let config = SessionConfig::preset(Variant::PointerLook);
        assert_eq!(config.boundary, Some(Boundary::new(-10.0, 10.0, -5.0, 5.0)));
        assert_eq!(config.start.position, Vec3::new(0.0, 1.6, 0.0));
        assert!(config.pointer_lock);
        assert_eq!(config.key_map().intent(Key::ArrowUp), Some(Intent::MoveForward));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_key_look_preset_binds_arrows_to_look() {
        let config = SessionConfig::preset(Variant::KeyLook);
        assert_eq!(config.boundary, None);
        assert_eq!(config.key_map().intent(Key::ArrowUp), Some(Intent::LookUp));
        assert!(!config.pointer_lock);
        assert_eq!(config.start.position, Vec3::new(0.0, 0.0, 2.0));
    }

    #[test]
    fn test_partial_json_overrides_preset() {
        let config = SessionConfig::from_json(
            r#"{ "variant": "key-look", "speed": 5.0, "projection": { "far": 50.0 } }"#,
        )
        .unwrap();
        assert_eq!(config.variant, Variant::KeyLook);
        assert_eq!(config.speed, 5.0);
        assert_eq!(config.projection.far, 50.0);
        assert_eq!(config.projection.near, 0.1);
        assert_eq!(config.boundary, None);
    }

    #[test]
    fn test_null_boundary_removes_it() {
        let config = SessionConfig::from_json(r#"{ "boundary": null }"#).unwrap();
        assert_eq!(config.variant, Variant::PointerLook);
        assert_eq!(config.boundary, None);
    }

    #[test]
    fn test_custom_key_map() {
        let config = SessionConfig::from_json(
            r#"{ "key_map": { "KeyE": "MoveForward", "KeyD": "MoveBackward" } }"#,
        )
        .unwrap();
        let map = config.key_map();
        assert_eq!(map.intent(Key::KeyE), Some(Intent::MoveForward));
        assert_eq!(map.intent(Key::KeyW), None);
    }

    #[test]
    fn test_inverted_boundary_rejected() {
        let err = SessionConfig::from_json(
            r#"{ "boundary": { "min_x": 5.0, "max_x": -5.0, "min_z": 0.0, "max_z": 1.0 } }"#,
        )
        .unwrap_err();
        assert!(format!("{:#}", err).contains("min_x"));
    }

    #[test]
    fn test_bad_values_rejected() {
        assert!(SessionConfig::from_json(r#"{ "speed": -1.0 }"#).is_err());
        assert!(SessionConfig::from_json(r#"{ "projection": { "near": 0.0 } }"#).is_err());
        assert!(SessionConfig::from_json(r#"{ "max_frame_delta": -0.1 }"#).is_err());
        assert!(SessionConfig::from_json(r#"{ "variant": "orbit" }"#).is_err());
        assert!(SessionConfig::from_json("not json").is_err());
    }

    #[test]
    fn test_session_uses_start_pose() {
        let session = SessionConfig::preset(Variant::PointerLook).session();
        assert_eq!(session.pose().position, Vec3::new(0.0, 1.6, 0.0));
        assert_eq!(session.movement.speed, 3.0);
    }
}
