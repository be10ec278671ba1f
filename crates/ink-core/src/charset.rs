/// 10 caractères, rampe du plus clair (" ") au plus dense ("@").
pub const GLYPH_RAMP: &str = " .:-=+*#%@";

/// Lookup table mapping intensity [0..255] → glyph.
///
/// Index is `floor(v / 255 * (len - 1))`, pre-computed at construction
/// so the projector pays O(1) per cell.
///
/// # Example
/// ```
/// use ink_core::charset::GlyphRamp;
/// let ramp = GlyphRamp::new(" .:#@");
/// assert_eq!(ramp.map(0), ' ');
/// assert_eq!(ramp.map(255), '@');
/// ```
#[derive(Clone, Debug)]
pub struct GlyphRamp {
    lut: [char; 256],
    len: usize,
}

impl GlyphRamp {
    /// Build a ramp from glyphs ordered sparsest→densest.
    ///
    /// Ramps with fewer than 2 glyphs fall back to [`GLYPH_RAMP`].
    #[must_use]
    pub fn new(glyphs: &str) -> Self {
        let chars: Vec<char> = glyphs.chars().collect();
        if chars.len() < 2 {
            log::warn!("Rampe de glyphes trop courte ({glyphs:?}), rampe par défaut");
            return Self::new(GLYPH_RAMP);
        }
        let len = chars.len();
        let mut lut = [' '; 256];
        for (i, slot) in lut.iter_mut().enumerate() {
            *slot = chars[i * (len - 1) / 255];
        }
        Self { lut, len }
    }

    /// Map an intensity [0..255] to a glyph.
    ///
    /// # Example
    /// ```
    /// use ink_core::charset::GlyphRamp;
    /// let ramp = GlyphRamp::default();
    /// assert_eq!(ramp.map(128), '=');
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn map(&self, value: u8) -> char {
        self.lut[value as usize]
    }

    /// Number of distinct glyphs in the ramp.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false: a ramp holds at least two glyphs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for GlyphRamp {
    fn default() -> Self {
        Self::new(GLYPH_RAMP)
    }
}
