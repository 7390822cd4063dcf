//! Writes the placeholder sprite sheets under `<dir>/Assets/Textures/`.
//!
//! ```bash
//! ./gen_textures            # into the working directory
//! ./gen_textures assets/    # into assets/
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use stonefall::write_placeholder_textures;

fn main() -> ExitCode {
    tracing_subscriber::fmt().init();

    let root = std::env::args_os().nth(1).map_or_else(|| PathBuf::from("."), PathBuf::from);
    match write_placeholder_textures(&root) {
        Ok(written) => {
            tracing::info!("Wrote {} textures under {}", written.len(), root.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!("Texture generation failed: {}", err);
            ExitCode::FAILURE
        }
    }
}
