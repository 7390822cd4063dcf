//! # Placeholder Textures
//!
//! Procedural sprite sheets so the game runs without art assets:
//!
//! | Sheet               | Size    | Frames | Shape                  |
//! |---------------------|---------|--------|------------------------|
//! | `warrior_run.tga`   | 384×64  | 6      | centred square, warm   |
//! | `warrior_death.tga` | 512×64  | 8      | centred square, fading |
//! | `rock.tga`          | 256×64  | 4      | disc, grey-brown       |

use std::path::{Path, PathBuf};

use stonefall_assets::{file_io, tga, AssetResult};
use stonefall_sim::constants::{ROCK_SPRITE, WARRIOR_DEATH_SPRITE, WARRIOR_RUN_SPRITE};

const FRAME: u16 = 64;

const RUN_PALETTE: [[u8; 3]; 6] = [
    [255, 100, 100],
    [255, 150, 100],
    [255, 200, 100],
    [200, 255, 100],
    [150, 255, 100],
    [100, 255, 100],
];

const ROCK_PALETTE: [[u8; 3]; 4] = [
    [128, 128, 100],
    [140, 140, 110],
    [150, 150, 120],
    [160, 160, 130],
];

/// Builds a `frames`-wide 24-bit sheet; `paint` gets `(frame, x, y)` in frame
/// space and returns the pixel's RGB, or `None` for black.
fn sheet(frames: u16, paint: impl Fn(usize, u16, u16) -> Option<[u8; 3]>) -> AssetResult<Vec<u8>> {
    let width = FRAME * frames;
    let mut pixels = Vec::with_capacity(usize::from(width) * usize::from(FRAME) * 3);
    for y in 0..FRAME {
        for x in 0..width {
            let rgb = paint(usize::from(x / FRAME), x % FRAME, y).unwrap_or([0, 0, 0]);
            pixels.extend_from_slice(&rgb);
        }
    }
    Ok(tga::encode(width, FRAME, 24, &pixels)?)
}

fn in_square(x: u16, y: u16) -> bool {
    (17..48).contains(&x) && (17..48).contains(&y)
}

/// Run cycle: one colour per frame.
///
/// # Errors
///
/// Only if the encoder rejects the generated buffer.
pub fn warrior_run_sheet() -> AssetResult<Vec<u8>> {
    sheet(6, |frame, x, y| in_square(x, y).then(|| RUN_PALETTE[frame % RUN_PALETTE.len()]))
}

/// Death cycle: red fading towards grey.
///
/// # Errors
///
/// Only if the encoder rejects the generated buffer.
pub fn warrior_death_sheet() -> AssetResult<Vec<u8>> {
    sheet(8, |frame, x, y| {
        let intensity = 255u8.saturating_sub((frame * 30).min(255) as u8);
        let shade = intensity.saturating_sub(100);
        in_square(x, y).then_some([intensity, shade, shade])
    })
}

/// Rock: a disc of radius 20 in each frame.
///
/// # Errors
///
/// Only if the encoder rejects the generated buffer.
pub fn rock_sheet() -> AssetResult<Vec<u8>> {
    sheet(4, |frame, x, y| {
        let (dx, dy) = (i32::from(x) - 32, i32::from(y) - 32);
        (dx * dx + dy * dy < 400).then(|| ROCK_PALETTE[frame % ROCK_PALETTE.len()])
    })
}

/// Writes all three sheets under `root` at their asset paths.
///
/// # Errors
///
/// Returns the first write failure.
pub fn write_placeholder_textures(root: &Path) -> AssetResult<Vec<PathBuf>> {
    let sheets = [
        (WARRIOR_RUN_SPRITE, warrior_run_sheet()?),
        (WARRIOR_DEATH_SPRITE, warrior_death_sheet()?),
        (ROCK_SPRITE, rock_sheet()?),
    ];

    let mut written = Vec::with_capacity(sheets.len());
    for (relative, bytes) in sheets {
        let path = root.join(relative);
        file_io::write_file(&path, &bytes)?;
        tracing::info!("Created {} ({} bytes)", path.display(), bytes.len());
        written.push(path);
    }
    Ok(written)
}
