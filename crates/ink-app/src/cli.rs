use std::path::PathBuf;

use clap::Parser;
use ink_core::config::{DitherMode, RenderConfig};

/// inkdither : tramage monochrome et projection ASCII.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Image source (PNG, JPEG, BMP, GIF).
    #[arg(long)]
    pub image: PathBuf,

    /// Fichier de configuration TOML. Défaut : config/default.toml.
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// PNG de sortie. Défaut : <image>_dither.png à côté de la source.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Fichier texte pour la grille ASCII. Défaut : sortie standard.
    #[arg(long)]
    pub ascii_out: Option<PathBuf>,

    /// Mode de seuil : bayer, random, atkinson, floyd.
    #[arg(long)]
    pub mode: Option<DitherMode>,

    /// Colonne cible normalisée [0.0, 1.0].
    #[arg(long)]
    pub direction: Option<f32>,

    /// Exposant d'atténuation (≥ 0).
    #[arg(long)]
    pub falloff: Option<f32>,

    /// Multiplicateur du seuil (≥ 0).
    #[arg(long)]
    pub strength: Option<f32>,

    /// Inverser la règle de décision.
    #[arg(long, default_value_t = false)]
    pub invert: bool,

    /// Déclencher N fois le décalage de matrice (X+1, Y+2, modulo 4).
    #[arg(long, default_value_t = 0)]
    pub shift: u32,

    /// Activer la projection ASCII.
    #[arg(long, default_value_t = false)]
    pub ascii: bool,

    /// Graine du seuil stochastique (reproductible).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Rester actif et re-tramer à chaque modification de la config.
    #[arg(long, default_value_t = false)]
    pub watch: bool,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Apply command-line overrides on top of a loaded config.
    pub fn apply_overrides(&self, config: &mut RenderConfig) {
        let dither = &mut config.dither;
        if let Some(mode) = self.mode {
            dither.mode = mode;
        }
        if let Some(v) = self.direction {
            dither.direction = v;
        }
        if let Some(v) = self.falloff {
            dither.falloff = v;
        }
        if let Some(v) = self.strength {
            dither.strength = v;
        }
        if self.invert {
            dither.invert = true;
        }
        for _ in 0..self.shift % 4 {
            dither.advance_shift();
        }
        if self.ascii {
            dither.ascii_enabled = true;
        }
        config.clamp_all();
    }

    /// `--watch` needs an existing config file to watch.
    ///
    /// Checked before any output is written.
    ///
    /// # Errors
    /// Returns an error if `--watch` is set and the config file is missing.
    pub fn validate_watch(&self) -> anyhow::Result<()> {
        if self.watch && !self.config.exists() {
            anyhow::bail!(
                "--watch requiert un fichier de config existant : {}",
                self.config.display()
            );
        }
        Ok(())
    }

    /// Resolve the PNG output path.
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        if let Some(ref path) = self.output {
            return path.clone();
        }
        let stem = self
            .image
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("image");
        self.image.with_file_name(format!("{stem}_dither.png"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["inkdither"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn mode_names_are_accepted() {
        let cli = parse(&["--image", "a.png", "--mode", "floyd"]);
        assert_eq!(cli.mode, Some(DitherMode::LuminanceThreshold));
        assert!(Cli::try_parse_from(["inkdither", "--image", "a.png", "--mode", "sierra"]).is_err());
    }

    #[test]
    fn overrides_replace_file_values() {
        let cli = parse(&[
            "--image",
            "a.png",
            "--direction",
            "0.25",
            "--strength",
            "1",
            "--shift",
            "2",
            "--invert",
            "--ascii",
        ]);
        let mut config = RenderConfig::default();
        cli.apply_overrides(&mut config);
        assert!((config.dither.direction - 0.25).abs() < f32::EPSILON);
        assert!((config.dither.strength - 1.0).abs() < f32::EPSILON);
        assert_eq!((config.dither.shift_x, config.dither.shift_y), (2, 0));
        assert!(config.dither.invert);
        assert!(config.dither.ascii_enabled);
        assert!((config.dither.falloff - 1.5).abs() < f32::EPSILON);
    }

    #[test]
    fn out_of_range_direction_is_clamped() {
        let cli = parse(&["--image", "a.png", "--direction", "3"]);
        let mut config = RenderConfig::default();
        cli.apply_overrides(&mut config);
        assert!((config.dither.direction - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn watch_without_config_is_rejected_up_front() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        let missing = missing.to_str().unwrap();

        let cli = parse(&["--image", "a.png", "--config", missing, "--watch"]);
        assert!(cli.validate_watch().is_err());

        let cli = parse(&["--image", "a.png", "--config", missing]);
        assert!(cli.validate_watch().is_ok());

        let present = dir.path().join("present.toml");
        std::fs::write(&present, "").unwrap();
        let cli = parse(&["--image", "a.png", "--config", present.to_str().unwrap(), "--watch"]);
        assert!(cli.validate_watch().is_ok());
    }

    #[test]
    fn default_output_sits_next_to_input() {
        let cli = parse(&["--image", "shots/cat.jpg"]);
        assert_eq!(cli.output_path(), PathBuf::from("shots/cat_dither.png"));
        let cli = parse(&["--image", "cat.jpg", "-o", "out.png"]);
        assert_eq!(cli.output_path(), PathBuf::from("out.png"));
    }
}
