use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::session::Rendered;

/// Écrit le PNG tramé et, si présente, la grille ASCII.
///
/// La grille va dans `ascii_out` ou, à défaut, sur la sortie standard.
///
/// # Errors
/// Returns an error if any output cannot be written.
pub fn write_outputs(rendered: &Rendered, png: &Path, ascii_out: Option<&Path>) -> Result<()> {
    ink_source::image::save_png(&rendered.frame, png)?;

    let Some(grid) = rendered.ascii.as_ref() else {
        return Ok(());
    };
    let text = grid.to_string();
    match ascii_out {
        Some(path) => {
            std::fs::write(path, &text)
                .with_context(|| format!("Impossible d'écrire {}", path.display()))?;
            log::info!("ASCII écrit : {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .and_then(|()| stdout.flush())
                .context("Écriture ASCII sur stdout")?;
        }
    }
    Ok(())
}
