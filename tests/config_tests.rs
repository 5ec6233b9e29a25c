use glam::Vec3;
use scene_walker::cli::Cli;
use scene_walker::config::{SessionConfig, Variant};
use scene_walker::core::{Boundary, Intent, Key};
use std::fs;
use std::path::PathBuf;

fn write_config(name: &str, body: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("scene-walker-config-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    path
}

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn test_load_file_with_boundary_and_models() {
        let path = write_config(
            "room.json",
            r#"{
                "variant": "pointer-look",
                "speed": 4.5,
                "boundary": { "min_x": -2.0, "max_x": 2.0, "min_z": -1.0, "max_z": 1.0 },
                "start": { "position": [0.0, 1.7, 0.5], "yaw": 0.25 },
                "models": [ { "path": "models/statue.glb", "position": [0.0, 0.0, -3.0] } ]
            }"#,
        );
        let config = SessionConfig::load(&path).unwrap();

        assert_eq!(config.speed, 4.5);
        assert_eq!(config.boundary, Some(Boundary::new(-2.0, 2.0, -1.0, 1.0)));
        assert_eq!(config.start.position, Vec3::new(0.0, 1.7, 0.5));
        assert_eq!(config.start.pitch, 0.0);
        assert_eq!(config.models.len(), 1);
        assert_eq!(config.models[0].position, Vec3::new(0.0, 0.0, -3.0));

        let session = config.session();
        assert_eq!(session.pose().yaw, 0.25);
        assert_eq!(session.movement.speed, 4.5);
    }

    #[test]
    fn test_missing_file_error_names_path() {
        let err = SessionConfig::load(&PathBuf::from("/nonexistent/walk.json")).unwrap_err();
        assert!(format!("{:#}", err).contains("walk.json"));
    }

    #[test]
    fn test_cli_flags_override_file() {
        let path = write_config("override.json", r#"{ "variant": "key-look", "max_frame_delta": 0.5 }"#);
        let cli = Cli {
            config: Some(path),
            max_frame_delta: Some(0.0667),
            normalize_diagonal: true,
            ..Cli::default()
        };
        let config = SessionConfig::from_cli(&cli).unwrap();

        assert_eq!(config.variant, Variant::KeyLook);
        assert_eq!(config.max_frame_delta, Some(0.0667));
        assert!(config.normalize_diagonal);
        assert!(config.movement().normalize_diagonal);
        assert_eq!(config.key_map().intent(Key::ArrowLeft), Some(Intent::LookLeft));
    }

    #[test]
    fn test_cli_variant_without_file_uses_preset() {
        let cli = Cli {
            variant: Some(Variant::KeyLook),
            ..Cli::default()
        };
        let config = SessionConfig::from_cli(&cli).unwrap();
        assert_eq!(config, SessionConfig::preset(Variant::KeyLook));
    }

    #[test]
    fn test_cli_variant_conflicting_with_file_rejected() {
        let path = write_config("conflict.json", r#"{ "variant": "pointer-look", "speed": 2.0 }"#);
        let cli = Cli {
            config: Some(path.clone()),
            variant: Some(Variant::KeyLook),
            ..Cli::default()
        };
        let err = SessionConfig::from_cli(&cli).unwrap_err();
        assert!(format!("{:#}", err).contains("conflicts"));

        // Agreeing with the file is fine
        let cli = Cli {
            config: Some(path),
            variant: Some(Variant::PointerLook),
            ..Cli::default()
        };
        let config = SessionConfig::from_cli(&cli).unwrap();
        assert!(config.pointer_lock);
        assert_eq!(config.speed, 2.0);
    }

    #[test]
    fn test_negative_cli_frame_cap_rejected() {
        let cli = Cli {
            max_frame_delta: Some(-1.0),
            ..Cli::default()
        };
        assert!(SessionConfig::from_cli(&cli).is_err());
    }
}
