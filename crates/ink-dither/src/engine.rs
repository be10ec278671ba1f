use ink_core::config::DitherConfig;
use ink_core::frame::FrameBuffer;
use ink_core::traits::RandomSource;

use crate::falloff;
use crate::luminance::luminance;
use crate::threshold::ThresholdProvider;

/// Alpha d'un pixel encre.
pub const INK: u8 = 255;

/// Bilan d'une passe de tramage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PassStats {
    /// Pixels classés encre.
    pub ink: usize,
    /// Pixels opaques classés fond.
    pub background: usize,
    /// Pixels transparents laissés intacts.
    pub skipped: usize,
}

/// Moteur de tramage binaire.
///
/// Orchestration luminance → atténuation → seuil → décision, sur place.
/// Le générateur aléatoire est injecté pour rendre le mode stochastique
/// reproductible en test.
///
/// # Example
/// ```
/// use ink_core::config::DitherConfig;
/// use ink_core::frame::FrameBuffer;
/// use ink_dither::engine::DitherEngine;
///
/// let mut engine = DitherEngine::seeded(1);
/// let mut frame = FrameBuffer::filled(8, 8, [0, 0, 0, 255]);
/// let config = DitherConfig { direction: 0.0, falloff: 0.0, ..DitherConfig::default() };
/// engine.process(&mut frame, &config);
/// // Noir pur : lum = 0 < seuil partout sauf sur le niveau 0 de la matrice.
/// assert_eq!(frame.ink_count(), 60);
/// ```
pub struct DitherEngine<R = fastrand::Rng> {
    rng: R,
}

impl DitherEngine<fastrand::Rng> {
    /// Engine seeded from platform entropy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    /// Engine with a deterministic stochastic threshold.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Default for DitherEngine<fastrand::Rng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RandomSource> DitherEngine<R> {
    /// Engine drawing stochastic thresholds from `rng`.
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Trame `frame` sur place.
    ///
    /// Les pixels d'alpha 0 ne sont pas touchés. Les autres deviennent
    /// RGB = 0 et A = 255 (encre) ou 0 (fond). Un buffer d'aire nulle
    /// est un no-op.
    pub fn process(&mut self, frame: &mut FrameBuffer, config: &DitherConfig) -> PassStats {
        let mut stats = PassStats::default();
        if frame.is_empty() {
            return stats;
        }

        let width = frame.width;
        let strength = config.strength;
        let invert = config.invert;

        // L'atténuation ne dépend que de la colonne.
        let weights: Vec<f32> = (0..width)
            .map(|x| falloff::weight(x, width, config.direction, config.falloff))
            .collect();
        let mut thresholds = ThresholdProvider::new(config, &mut self.rng);

        for (i, px) in frame.data.chunks_exact_mut(4).enumerate() {
            if px[3] == 0 {
                stats.skipped += 1;
                continue;
            }
            let x = (i % width as usize) as u32;
            let y = (i / width as usize) as u32;

            let lum = luminance(px[0], px[1], px[2]);
            let fall = weights[x as usize];
            let threshold = thresholds.threshold(x, y, lum);
            let cutoff = threshold * fall * strength;

            let ink = if invert { lum > cutoff } else { lum < cutoff };

            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            px[3] = if ink { INK } else { 0 };

            if ink {
                stats.ink += 1;
            } else {
                stats.background += 1;
            }
        }

        log::debug!(
            "Passe {} {}×{} : {} encre, {} fond, {} transparents",
            config.mode,
            frame.width,
            frame.height,
            stats.ink,
            stats.background,
            stats.skipped
        );
        stats
    }

    /// Trame une copie de `source`, qui reste intacte.
    ///
    /// Chaque changement de paramètre doit repartir des pixels décodés,
    /// jamais du résultat binaire précédent.
    #[must_use]
    pub fn render(&mut self, source: &FrameBuffer, config: &DitherConfig) -> FrameBuffer {
        let mut out = source.clone();
        self.process(&mut out, config);
        out
    }
}
