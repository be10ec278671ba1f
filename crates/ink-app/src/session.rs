use std::sync::Arc;

use ink_core::config::{DitherMode, RenderConfig};
use ink_core::frame::{AsciiGrid, FrameBuffer};
use ink_core::traits::{RandomSource, Source};
use ink_dither::engine::PassStats;
use ink_dither::{AsciiProjector, DitherEngine};

/// Résultat d'un rendu complet.
#[derive(Clone, Debug)]
pub struct Rendered {
    /// Numéro du rendu, croissant. Un rendu plus ancien est périmé.
    pub generation: u64,
    /// Buffer tramé (alpha = décision d'encre).
    pub frame: FrameBuffer,
    /// Grille ASCII, si la projection est active.
    pub ascii: Option<AsciiGrid>,
    /// Bilan de la passe.
    pub stats: PassStats,
}

/// État courant des réglages, tenu par l'appelant entre deux rendus.
///
/// Chaque action re-trame depuis l'image décodée intacte : un résultat
/// binaire n'est jamais re-tramé, la quantification ne se cumule pas.
///
/// # Example
/// ```
/// use ink_app::session::Session;
/// use ink_core::config::RenderConfig;
/// use ink_core::frame::FrameBuffer;
/// use ink_dither::DitherEngine;
/// use ink_source::image::ImageSource;
///
/// let source = ImageSource::from_frame(FrameBuffer::filled(8, 8, [128, 128, 128, 255]));
/// let mut session = Session::new(&source, RenderConfig::default(), DitherEngine::seeded(1));
/// let first = session.render();
/// let shifted = session.shift();
/// assert!(shifted.generation > first.generation);
/// ```
pub struct Session<R = fastrand::Rng> {
    source: Arc<FrameBuffer>,
    config: RenderConfig,
    engine: DitherEngine<R>,
    generation: u64,
}

impl<R: RandomSource> Session<R> {
    /// Start a session on `source` with an initial config.
    pub fn new(source: &dyn Source, mut config: RenderConfig, engine: DitherEngine<R>) -> Self {
        config.clamp_all();
        Self {
            source: source.frame(),
            config,
            engine,
            generation: 0,
        }
    }

    /// Current settings.
    #[must_use]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Generation of the last render (0 before the first one).
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Trame l'image intacte avec les réglages courants.
    pub fn render(&mut self) -> Rendered {
        self.generation += 1;
        let dither = &self.config.dither;
        let mut frame = (*self.source).clone();
        let stats = self.engine.process(&mut frame, dither);
        let ascii = dither
            .ascii_enabled
            .then(|| AsciiProjector::new(&self.config.ascii).project(&frame));
        log::info!(
            "Rendu #{} : mode {}, shift ({}, {}), {} pixels encre",
            self.generation,
            dither.mode,
            dither.shift_x,
            dither.shift_y,
            stats.ink
        );
        Rendered {
            generation: self.generation,
            frame,
            ascii,
            stats,
        }
    }

    /// Nouvelle image : remplace la source et re-trame.
    pub fn load_source(&mut self, source: &dyn Source) -> Rendered {
        self.source = source.frame();
        self.render()
    }

    /// Select the threshold variant.
    pub fn set_mode(&mut self, mode: DitherMode) -> Rendered {
        self.config.dither.mode = mode;
        self.render()
    }

    /// Bascule l'inversion.
    pub fn toggle_invert(&mut self) -> Rendered {
        self.config.dither.invert = !self.config.dither.invert;
        self.render()
    }

    /// Déclencheur "shift" : X+1, Y+2, modulo 4.
    pub fn shift(&mut self) -> Rendered {
        self.config.dither.advance_shift();
        self.render()
    }

    /// Colonne cible, ramenée dans [0, 1].
    pub fn set_direction(&mut self, direction: f32) -> Rendered {
        self.config.dither.direction = direction;
        self.config.dither.clamp_all();
        self.render()
    }

    /// Exposant d'atténuation, borné à ≥ 0.
    pub fn set_falloff(&mut self, falloff: f32) -> Rendered {
        self.config.dither.falloff = falloff;
        self.config.dither.clamp_all();
        self.render()
    }

    /// Multiplicateur du seuil, borné à ≥ 0.
    pub fn set_strength(&mut self, strength: f32) -> Rendered {
        self.config.dither.strength = strength;
        self.config.dither.clamp_all();
        self.render()
    }

    /// Bascule la projection ASCII.
    pub fn toggle_ascii(&mut self) -> Rendered {
        self.config.dither.ascii_enabled = !self.config.dither.ascii_enabled;
        self.render()
    }

    /// Remplace tous les réglages (rechargement de config).
    pub fn replace_config(&mut self, mut config: RenderConfig) -> Rendered {
        config.clamp_all();
        self.config = config;
        self.render()
    }
}
