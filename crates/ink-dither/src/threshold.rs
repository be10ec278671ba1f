//! Fonctions de seuil : matrice ordonnée, tirage stochastique, auto-seuil.

use ink_core::config::{DitherConfig, DitherMode};
use ink_core::traits::RandomSource;

/// Matrice de Bayer 4x4. Normalisée sur 16 niveaux (0-15).
pub const BAYER_4X4: [[u8; 4]; 4] = [[0, 8, 2, 10], [12, 4, 14, 6], [3, 11, 1, 9], [15, 7, 13, 5]];

/// Seuil ordonné au point (x, y) décalé de (shift_x, shift_y).
///
/// Le repliement est un vrai modulo : des coordonnées négatives
/// reviennent dans [0, 3] au lieu de produire un reste négatif.
///
/// # Example
/// ```
/// use ink_dither::threshold::bayer_threshold;
/// assert_eq!(bayer_threshold(0, 0, 0, 0), 0.0);
/// assert_eq!(bayer_threshold(1, 0, 0, 0), 0.5);
/// assert_eq!(bayer_threshold(-1, 0, 0, 0), bayer_threshold(3, 0, 0, 0));
/// ```
#[inline(always)]
#[must_use]
pub fn bayer_threshold(x: i64, y: i64, shift_x: u8, shift_y: u8) -> f32 {
    let bx = (x + i64::from(shift_x)).rem_euclid(4) as usize;
    let by = (y + i64::from(shift_y)).rem_euclid(4) as usize;
    f32::from(BAYER_4X4[by][bx]) / 16.0
}

/// Sélection du seuil par pixel pour une passe.
///
/// Le mode et les décalages sont figés à la construction ; seul le
/// générateur avance d'un pixel à l'autre.
///
/// # Example
/// ```
/// use ink_core::config::{DitherConfig, DitherMode};
/// use ink_dither::threshold::ThresholdProvider;
///
/// let config = DitherConfig { mode: DitherMode::LuminanceThreshold, ..DitherConfig::default() };
/// let mut provider = ThresholdProvider::new(&config, fastrand::Rng::with_seed(1));
/// assert_eq!(provider.threshold(3, 7, 0.25), 0.25);
/// ```
pub struct ThresholdProvider<R> {
    mode: DitherMode,
    shift_x: u8,
    shift_y: u8,
    rng: R,
}

impl<R: RandomSource> ThresholdProvider<R> {
    /// Snapshot the threshold-related fields of `config`.
    #[must_use]
    pub fn new(config: &DitherConfig, rng: R) -> Self {
        Self {
            mode: config.mode,
            shift_x: config.shift_x,
            shift_y: config.shift_y,
            rng,
        }
    }

    /// Seuil du pixel (x, y) de luminance `lum`, dans [0, 1).
    ///
    /// `LuminanceThreshold` renvoie `lum` tel quel : aucune erreur n'est
    /// diffusée vers les voisins.
    #[inline(always)]
    pub fn threshold(&mut self, x: u32, y: u32, lum: f32) -> f32 {
        match self.mode {
            DitherMode::OrderedMatrix => {
                bayer_threshold(i64::from(x), i64::from(y), self.shift_x, self.shift_y)
            }
            DitherMode::Stochastic => self.rng.next_unit(),
            DitherMode::LuminanceThreshold => lum,
        }
    }
}
