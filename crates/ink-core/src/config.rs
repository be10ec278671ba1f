use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::charset::GLYPH_RAMP;
use crate::error::CoreError;

/// Valeur initiale de `strength`, héritée de l'outil d'origine.
pub const DEFAULT_STRENGTH: f32 = 1.8;
/// Taille de la matrice ordonnée : les décalages bouclent modulo 4.
pub const SHIFT_PERIOD: u8 = 4;

/// Threshold variant used by the dither pass.
///
/// External names: `bayer`, `random`, and `atkinson` / `floyd` /
/// `luminance` which all select the self-threshold behavior. The TOML
/// file and the CLI share the same parser (case-insensitive, with the
/// `ordered` / `stochastic` synonyms).
///
/// # Example
/// ```
/// use ink_core::config::DitherMode;
/// let mode: DitherMode = "floyd".parse().unwrap();
/// assert_eq!(mode, DitherMode::LuminanceThreshold);
/// ```
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(try_from = "String", into = "String")]
pub enum DitherMode {
    /// 4×4 Bayer matrix, level / 16.
    #[default]
    OrderedMatrix,
    /// Fresh uniform draw in [0, 1) per pixel.
    Stochastic,
    /// The pixel's own luminance. Stands in for the reserved
    /// error-diffusion names; no error is propagated.
    LuminanceThreshold,
}

impl TryFrom<String> for DitherMode {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DitherMode> for String {
    fn from(mode: DitherMode) -> Self {
        mode.to_string()
    }
}

impl FromStr for DitherMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bayer" | "ordered" => Ok(Self::OrderedMatrix),
            "random" | "stochastic" => Ok(Self::Stochastic),
            "atkinson" | "floyd" | "luminance" => Ok(Self::LuminanceThreshold),
            _ => Err(CoreError::UnknownMode { name: s.to_string() }),
        }
    }
}

impl fmt::Display for DitherMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::OrderedMatrix => "bayer",
            Self::Stochastic => "random",
            Self::LuminanceThreshold => "luminance",
        };
        f.write_str(name)
    }
}

/// Paramètres d'une passe de tramage. Lus une fois par passe, jamais
/// relus en cours de boucle.
///
/// # Example
/// ```
/// use ink_core::config::{DitherConfig, DitherMode};
/// let config = DitherConfig::default();
/// assert_eq!(config.mode, DitherMode::OrderedMatrix);
/// assert!((config.strength - 1.8).abs() < f32::EPSILON);
/// ```
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct DitherConfig {
    /// Threshold variant.
    pub mode: DitherMode,
    /// Colonne cible normalisée [0.0, 1.0] (0 = bord gauche, 1 = bord droit).
    pub direction: f32,
    /// Exposant d'atténuation ≥ 0. 0 = pas d'atténuation.
    pub falloff: f32,
    /// Multiplicateur du seuil ≥ 0.
    pub strength: f32,
    /// Inverse la règle de décision (encre si lum > seuil).
    pub invert: bool,
    /// Décalage horizontal de la matrice [0, 3].
    pub shift_x: u8,
    /// Décalage vertical de la matrice [0, 3].
    pub shift_y: u8,
    /// Active la projection ASCII après le tramage.
    pub ascii_enabled: bool,
}

impl Default for DitherConfig {
    fn default() -> Self {
        Self {
            mode: DitherMode::OrderedMatrix,
            direction: 1.0,
            falloff: 1.5,
            strength: DEFAULT_STRENGTH,
            invert: false,
            shift_x: 0,
            shift_y: 0,
            ascii_enabled: false,
        }
    }
}

impl DitherConfig {
    /// Déclencheur "shift" : X avance de 1, Y de 2, modulo 4.
    ///
    /// # Example
    /// ```
    /// use ink_core::config::DitherConfig;
    /// let mut config = DitherConfig::default();
    /// config.advance_shift();
    /// assert_eq!((config.shift_x, config.shift_y), (1, 2));
    /// config.advance_shift();
    /// assert_eq!((config.shift_x, config.shift_y), (2, 0));
    /// ```
    pub fn advance_shift(&mut self) {
        self.shift_x = (self.shift_x + 1) % SHIFT_PERIOD;
        self.shift_y = (self.shift_y + 2) % SHIFT_PERIOD;
    }

    /// Clamp all numeric fields to their valid ranges.
    ///
    /// `direction` outside [0, 1] would drive the falloff base negative,
    /// where a fractional exponent yields NaN. Non-finite values reset to
    /// their defaults.
    pub fn clamp_all(&mut self) {
        let defaults = Self::default();
        self.direction = finite_or(self.direction, defaults.direction).clamp(0.0, 1.0);
        self.falloff = finite_or(self.falloff, defaults.falloff).max(0.0);
        self.strength = finite_or(self.strength, defaults.strength).max(0.0);
        self.shift_x %= SHIFT_PERIOD;
        self.shift_y %= SHIFT_PERIOD;
    }
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() { value } else { fallback }
}

/// Constantes de la projection ASCII.
///
/// # Example
/// ```
/// use ink_core::config::AsciiConfig;
/// let ascii = AsciiConfig::default();
/// assert_eq!((ascii.step_x, ascii.step_y), (6, 8));
/// ```
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct AsciiConfig {
    /// Pas horizontal de la grille, en pixels.
    pub step_x: u32,
    /// Pas vertical de la grille, en pixels.
    pub step_y: u32,
    /// Rampe de glyphes, du plus clair au plus dense.
    pub ramp: String,
}

impl Default for AsciiConfig {
    fn default() -> Self {
        Self {
            step_x: 6,
            step_y: 8,
            ramp: GLYPH_RAMP.to_string(),
        }
    }
}

impl AsciiConfig {
    /// Steps of zero would never advance; ramps need two glyphs.
    pub fn clamp_all(&mut self) {
        self.step_x = self.step_x.max(1);
        self.step_y = self.step_y.max(1);
        if self.ramp.chars().count() < 2 {
            self.ramp = GLYPH_RAMP.to_string();
        }
    }
}

/// Configuration complète : tramage + projection ASCII.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct RenderConfig {
    /// Dither pass parameters.
    pub dither: DitherConfig,
    /// ASCII projector constants.
    pub ascii: AsciiConfig,
}

impl RenderConfig {
    /// Clamp every section.
    pub fn clamp_all(&mut self) {
        self.dither.clamp_all();
        self.ascii.clamp_all();
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    dither: Option<DitherSection>,
    ascii: Option<AsciiSection>,
}

/// Dither section of the TOML config, all fields optional for partial override.
#[derive(Deserialize)]
struct DitherSection {
    mode: Option<DitherMode>,
    direction: Option<f32>,
    falloff: Option<f32>,
    strength: Option<f32>,
    invert: Option<bool>,
    shift_x: Option<u8>,
    shift_y: Option<u8>,
    ascii_enabled: Option<bool>,
}

/// ASCII section of the TOML config, all fields optional.
#[derive(Deserialize)]
struct AsciiSection {
    step_x: Option<u32>,
    step_y: Option<u32>,
    ramp: Option<String>,
}

/// Parse du TOML et fusion avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the content is not valid TOML for this schema.
///
/// # Example
/// ```
/// use ink_core::config::{parse_config, DitherMode};
/// let config = parse_config("[dither]\nmode = \"random\"\n").unwrap();
/// assert_eq!(config.dither.mode, DitherMode::Stochastic);
/// assert!((config.dither.falloff - 1.5).abs() < f32::EPSILON);
/// ```
pub fn parse_config(content: &str) -> Result<RenderConfig> {
    let file: ConfigFile = toml::from_str(content).context("Erreur de parsing TOML")?;
    let mut config = RenderConfig::default();

    if let Some(d) = file.dither {
        let c = &mut config.dither;
        if let Some(v) = d.mode {
            c.mode = v;
        }
        if let Some(v) = d.direction {
            c.direction = v;
        }
        if let Some(v) = d.falloff {
            c.falloff = v;
        }
        if let Some(v) = d.strength {
            c.strength = v;
        }
        if let Some(v) = d.invert {
            c.invert = v;
        }
        if let Some(v) = d.shift_x {
            c.shift_x = v;
        }
        if let Some(v) = d.shift_y {
            c.shift_y = v;
        }
        if let Some(v) = d.ascii_enabled {
            c.ascii_enabled = v;
        }
    }

    if let Some(a) = file.ascii {
        if let Some(v) = a.step_x {
            config.ascii.step_x = v;
        }
        if let Some(v) = a.step_y {
            config.ascii.step_y = v;
        }
        if let Some(v) = a.ramp {
            config.ascii.ramp = v;
        }
    }

    config.clamp_all();
    Ok(config)
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use ink_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<RenderConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Config invalide : {}", path.display()))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn shift_trigger_cycles_with_period_four() {
        let mut config = DitherConfig::default();
        let mut seen = Vec::new();
        for _ in 0..4 {
            config.advance_shift();
            seen.push((config.shift_x, config.shift_y));
        }
        assert_eq!(seen, vec![(1, 2), (2, 0), (3, 2), (0, 0)]);
    }

    #[test]
    fn clamp_guards_negative_falloff_base() {
        let mut config = DitherConfig {
            direction: 1.7,
            falloff: -2.0,
            strength: f32::NAN,
            shift_x: 6,
            shift_y: 9,
            ..DitherConfig::default()
        };
        config.clamp_all();
        assert!((config.direction - 1.0).abs() < f32::EPSILON);
        assert!(config.falloff.abs() < f32::EPSILON);
        assert!((config.strength - DEFAULT_STRENGTH).abs() < f32::EPSILON);
        assert_eq!((config.shift_x, config.shift_y), (2, 1));
    }

    #[test]
    fn mode_names_parse() {
        assert_eq!("bayer".parse::<DitherMode>(), Ok(DitherMode::OrderedMatrix));
        assert_eq!("RANDOM".parse::<DitherMode>(), Ok(DitherMode::Stochastic));
        assert_eq!(
            "atkinson".parse::<DitherMode>(),
            Ok(DitherMode::LuminanceThreshold)
        );
        assert_eq!(
            "sierra".parse::<DitherMode>(),
            Err(CoreError::UnknownMode {
                name: "sierra".into()
            })
        );
    }

    #[test]
    fn partial_toml_overrides_defaults() {
        let config = parse_config(
            "[dither]\nmode = \"atkinson\"\ninvert = true\n\n[ascii]\nstep_x = 0\nramp = \"x\"\n",
        )
        .unwrap();
        assert_eq!(config.dither.mode, DitherMode::LuminanceThreshold);
        assert!(config.dither.invert);
        assert!((config.dither.direction - 1.0).abs() < f32::EPSILON);
        assert_eq!(config.ascii.step_x, 1);
        assert_eq!(config.ascii.step_y, 8);
        assert_eq!(config.ascii.ramp, GLYPH_RAMP);
    }

    #[test]
    fn empty_file_yields_defaults() {
        assert_eq!(parse_config("").unwrap(), RenderConfig::default());
    }

    #[test]
    fn file_and_cli_accept_the_same_mode_names() {
        for name in ["bayer", "Ordered", "RANDOM", "stochastic", "Floyd", "luminance"] {
            let from_file = parse_config(&format!("[dither]\nmode = \"{name}\"\n"))
                .unwrap()
                .dither
                .mode;
            assert_eq!(Ok(from_file), name.parse::<DitherMode>(), "{name}");
        }
    }

    #[test]
    fn mode_serializes_to_its_canonical_name() {
        let text = toml::to_string(&RenderConfig::default()).unwrap();
        assert!(text.contains("mode = \"bayer\""), "{text}");
        assert_eq!(parse_config(&text).unwrap(), RenderConfig::default());
    }

    #[test]
    fn unknown_mode_in_file_is_an_error() {
        assert!(parse_config("[dither]\nmode = \"sierra\"\n").is_err());
    }

    #[test]
    fn load_config_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[dither]\nfalloff = 0.0\nshift_x = 3").unwrap();
        let config = load_config(file.path()).unwrap();
        assert!(config.dither.falloff.abs() < f32::EPSILON);
        assert_eq!(config.dither.shift_x, 3);
    }

    #[test]
    fn load_config_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(&dir.path().join("absent.toml")).is_err());
    }
}
