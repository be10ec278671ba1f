use crate::error::CoreError;

/// Buffer de pixels RGBA, row-major, 4 bytes par pixel.
///
/// Produit une fois par l'image décodée puis muté sur place par le moteur
/// de tramage. Après traitement, l'alpha porte la décision : 255 = encre,
/// 0 = fond, RGB forcé à 0.
///
/// # Example
/// ```
/// use ink_core::frame::FrameBuffer;
/// let fb = FrameBuffer::new(10, 10);
/// assert_eq!(fb.data.len(), 400);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    /// Pixels RGBA, row-major, 4 bytes par pixel.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl FrameBuffer {
    /// Crée un buffer transparent aux dimensions données.
    ///
    /// # Example
    /// ```
    /// use ink_core::frame::FrameBuffer;
    /// let fb = FrameBuffer::new(100, 50);
    /// assert_eq!(fb.width, 100);
    /// assert_eq!(fb.data.len(), 100 * 50 * 4);
    /// ```
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; width as usize * height as usize * 4],
            width,
            height,
        }
    }

    /// Wrap decoded RGBA bytes, checking they match the dimensions.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDimensions`] if `width * height * 4`
    /// overflows, [`CoreError::BufferSize`] if `data.len()` differs from it.
    ///
    /// # Example
    /// ```
    /// use ink_core::frame::FrameBuffer;
    /// assert!(FrameBuffer::from_raw(2, 2, vec![0; 16]).is_ok());
    /// assert!(FrameBuffer::from_raw(2, 2, vec![0; 15]).is_err());
    /// ```
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, CoreError> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or(CoreError::InvalidDimensions { width, height })?;
        if data.len() != expected {
            return Err(CoreError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Buffer uniforme, pratique pour les tests et les démos.
    ///
    /// # Example
    /// ```
    /// use ink_core::frame::FrameBuffer;
    /// let fb = FrameBuffer::filled(3, 2, [10, 20, 30, 255]);
    /// assert_eq!(fb.pixel(2, 1), (10, 20, 30, 255));
    /// ```
    #[must_use]
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let mut fb = Self::new(width, height);
        for px in fb.data.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
        fb
    }

    /// True when the buffer holds no pixel at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Accès au pixel (x, y) → (r, g, b, a).
    ///
    /// Out-of-range coordinates read as fully transparent black.
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8, u8) {
        if x >= self.width || y >= self.height {
            return (0, 0, 0, 0);
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        (
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        )
    }

    /// Écrit le pixel (x, y). Ignoré hors limites.
    #[inline(always)]
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        self.data[idx..idx + 4].copy_from_slice(&rgba);
    }

    /// Nombre de pixels encre (alpha = 255) dans un buffer traité.
    ///
    /// # Example
    /// ```
    /// use ink_core::frame::FrameBuffer;
    /// let fb = FrameBuffer::filled(2, 2, [0, 0, 0, 255]);
    /// assert_eq!(fb.ink_count(), 4);
    /// ```
    #[must_use]
    pub fn ink_count(&self) -> usize {
        self.data.chunks_exact(4).filter(|px| px[3] == 255).count()
    }
}

/// Grille de glyphes produite par la projection ASCII.
///
/// # Example
/// ```
/// use ink_core::frame::AsciiGrid;
/// let mut grid = AsciiGrid::new(4, 2);
/// grid.set(1, 0, '@');
/// assert_eq!(grid.get(1, 0), '@');
/// assert_eq!(grid.to_string(), " @  \n    \n");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AsciiGrid {
    /// Flat array of glyphs, row-major.
    pub cells: Vec<char>,
    /// Width in characters.
    pub width: u32,
    /// Height in characters.
    pub height: u32,
}

impl AsciiGrid {
    /// Crée une grille remplie d'espaces.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            cells: vec![' '; width as usize * height as usize],
            width,
            height,
        }
    }

    /// Set the glyph at column `x`, row `y`.
    #[inline(always)]
    pub fn set(&mut self, x: u32, y: u32, ch: char) {
        self.cells[y as usize * self.width as usize + x as usize] = ch;
    }

    /// Get the glyph at column `x`, row `y`.
    #[inline(always)]
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> char {
        self.cells[y as usize * self.width as usize + x as usize]
    }

    /// Iterate `(col, row, glyph)` triples in row-major order.
    ///
    /// # Example
    /// ```
    /// use ink_core::frame::AsciiGrid;
    /// let grid = AsciiGrid::new(3, 2);
    /// assert_eq!(grid.glyphs().count(), 6);
    /// ```
    pub fn glyphs(&self) -> impl Iterator<Item = (u32, u32, char)> + '_ {
        let width = self.width.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &ch)| ((i as u32) % width, (i as u32) / width, ch))
    }
}

impl std::fmt::Display for AsciiGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.width == 0 {
            return Ok(());
        }
        for row in self.cells.chunks(self.width as usize) {
            for ch in row {
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
