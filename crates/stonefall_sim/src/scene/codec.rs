//! Scene save-file layout.
//!
//! ```text
//! i32   level number        (1 or 2, read first and dispatched on)
//! f32   game time
//! u8    auto-saved flag
//! 4×u8  background RGBA
//! u64   warrior count, then 32-byte warrior records
//! u64   rock count, then 29-byte rock records      (level 2 only)
//! ```

use stonefall_assets::SpriteStore;
use stonefall_core::{read_sequence, write_sequence, ByteReader, ByteWriter, PoolHandle};

use super::{Level1, Level2, LevelState, Scene};
use crate::entities::Rock;
use crate::error::{SimError, SimResult};
use crate::render::Color;
use crate::services::Services;

pub(super) fn encode(
    number: i32,
    state: &LevelState,
    rocks: Option<&[PoolHandle<Rock>]>,
    services: &Services,
) -> SimResult<Vec<u8>> {
    let mut out = ByteWriter::new();
    out.write_i32(number);
    out.write_f32(state.game_time);
    out.write_bool(state.auto_saved);
    out.write_pod(&state.background);
    write_sequence::<_, SpriteStore>(&mut out, &services.warriors, &state.warriors)?;
    if let Some(rocks) = rocks {
        write_sequence::<_, SpriteStore>(&mut out, &services.rocks, rocks)?;
    }
    Ok(out.into_bytes())
}

impl Scene {
    /// Encodes the scene as a save file.
    ///
    /// # Errors
    ///
    /// Returns an error if a held handle no longer resolves.
    pub fn to_bytes(&self, services: &Services) -> SimResult<Vec<u8>> {
        match self {
            Self::Level1(level) => level.to_bytes(services),
            Self::Level2(level) => level.to_bytes(services),
        }
    }

    /// Rebuilds a scene from a save file, drawing fresh entities from the
    /// pools. On failure every entity acquired so far is released.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnknownScene`] for an unknown level number, or the
    /// record error for truncated or out-of-range data.
    pub fn from_bytes(bytes: &[u8], services: &mut Services) -> SimResult<Self> {
        let mut input = ByteReader::new(bytes);
        let number = input.read_i32()?;
        if number != Level1::NUMBER && number != Level2::NUMBER {
            return Err(SimError::UnknownScene(number));
        }

        let game_time = input.read_f32()?;
        let auto_saved = input.read_bool()?;
        let background: Color = input.read_pod()?;
        let warriors = read_sequence(&mut input, &mut services.warriors, &mut services.sprites)?;
        let mut state = LevelState {
            game_time,
            auto_saved,
            background,
            warriors,
        };

        if number == Level1::NUMBER {
            return Ok(Self::Level1(Level1::from_state(state)));
        }

        match read_sequence(&mut input, &mut services.rocks, &mut services.sprites) {
            Ok(rocks) => Ok(Self::Level2(Level2::from_parts(state, rocks))),
            Err(err) => {
                state.release_warriors(&mut services.warriors);
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::entities::LifeState;
    use stonefall_core::CoreError;

    fn services() -> Services {
        Services::new(SimConfig {
            seed: Some(11),
            arena_bytes: 4096,
            asset_root: std::env::temp_dir().join("stonefall-codec-tests-missing"),
            ..SimConfig::default()
        })
    }

    #[test]
    fn test_level1_header_layout() {
        let mut services = services();
        let scene = Scene::start(&mut services);
        let bytes = scene.to_bytes(&services).unwrap();

        assert_eq!(&bytes[0..4], &1i32.to_le_bytes());
        assert_eq!(&bytes[4..8], &0.0f32.to_le_bytes());
        assert_eq!(bytes[8], 0);
        assert_eq!(&bytes[9..13], &[128, 128, 128, 255]);
        assert_eq!(&bytes[13..21], &10u64.to_le_bytes());
        assert_eq!(bytes.len(), 21 + 10 * 32);
    }

    #[test]
    fn test_level2_round_trip() {
        let mut services = services();
        let mut scene = Scene::start(&mut services);
        scene.update(0.5, &mut services);
        assert!(scene.transition(&mut services));
        scene.update(0.25, &mut services);

        let bytes = scene.to_bytes(&services).unwrap();
        let restored = Scene::from_bytes(&bytes, &mut services).unwrap();

        assert_eq!(restored.level_number(), 2);
        assert_eq!(restored.game_time().to_bits(), scene.game_time().to_bits());
        assert_eq!(restored.background(), scene.background());
        assert_eq!(restored.warriors().len(), scene.warriors().len());
        assert_eq!(restored.rocks().len(), scene.rocks().len());

        for (&a, &b) in scene.warriors().iter().zip(restored.warriors()) {
            assert_ne!(a, b);
            let (a, b) = (services.warriors.get(a).unwrap(), services.warriors.get(b).unwrap());
            assert_eq!(a.x().to_bits(), b.x().to_bits());
            assert_eq!(a.y().to_bits(), b.y().to_bits());
            assert_eq!(a.frame(), b.frame());
            assert_eq!(a.state(), b.state());
        }
        for (&a, &b) in scene.rocks().iter().zip(restored.rocks()) {
            let (a, b) = (services.rocks.get(a).unwrap(), services.rocks.get(b).unwrap());
            assert_eq!(a.y().to_bits(), b.y().to_bits());
            assert_eq!(a.is_active(), b.is_active());
        }
        // Re-encoding the restored scene gives identical bytes.
        assert_eq!(restored.to_bytes(&services).unwrap(), bytes);
    }

    #[test]
    fn test_unknown_level_rejected() {
        let mut services = services();
        let mut bytes = Scene::start(&mut services).to_bytes(&services).unwrap();
        bytes[0..4].copy_from_slice(&9i32.to_le_bytes());

        let in_use = services.warriors.in_use();
        let err = Scene::from_bytes(&bytes, &mut services).unwrap_err();
        assert!(matches!(err, SimError::UnknownScene(9)));
        assert_eq!(services.warriors.in_use(), in_use);
    }

    #[test]
    fn test_truncated_rocks_release_warriors() {
        let mut services = services();
        let mut scene = Scene::start(&mut services);
        scene.transition(&mut services);
        let bytes = scene.to_bytes(&services).unwrap();

        let in_use = services.warriors.in_use();
        let rocks_in_use = services.rocks.in_use();
        let err = Scene::from_bytes(&bytes[..bytes.len() - 3], &mut services).unwrap_err();

        assert!(matches!(err, SimError::Core(CoreError::UnexpectedEof { .. })));
        assert_eq!(services.warriors.in_use(), in_use);
        assert_eq!(services.rocks.in_use(), rocks_in_use);
    }

    #[test]
    fn test_bad_lifecycle_code_rejected() {
        let mut services = services();
        let mut bytes = Scene::start(&mut services).to_bytes(&services).unwrap();
        // Lifecycle code of the third warrior record.
        let at = 21 + 2 * 32 + 28;
        bytes[at..at + 4].copy_from_slice(&5i32.to_le_bytes());

        let in_use = services.warriors.in_use();
        let err = Scene::from_bytes(&bytes, &mut services).unwrap_err();
        assert!(matches!(
            err,
            SimError::Core(CoreError::InvalidValue {
                field: "lifecycle_state",
                value: 5
            })
        ));
        assert_eq!(services.warriors.in_use(), in_use);
        assert_eq!(LifeState::from_code(1).unwrap(), LifeState::Dying);
    }
}
