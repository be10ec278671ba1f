use ink_core::charset::GlyphRamp;
use ink_core::config::AsciiConfig;
use ink_core::frame::{AsciiGrid, FrameBuffer};

/// Projection d'un buffer tramé sur une grille de glyphes grossière.
///
/// Une cellule = un seul pixel échantillonné (coin haut-gauche), pas de
/// moyenne. L'intensité lue est le canal R, ramené dans [0, 1] puis
/// indexé par `floor(lum * (len - 1))` dans la rampe.
///
/// # Example
/// ```
/// use ink_core::frame::FrameBuffer;
/// use ink_dither::ascii::AsciiProjector;
///
/// let projector = AsciiProjector::default();
/// let grid = projector.project(&FrameBuffer::filled(13, 9, [255, 0, 0, 255]));
/// assert_eq!((grid.width, grid.height), (3, 2));
/// assert!(grid.cells.iter().all(|&c| c == '@'));
/// ```
pub struct AsciiProjector {
    step_x: u32,
    step_y: u32,
    ramp: GlyphRamp,
}

impl AsciiProjector {
    /// Build a projector from its constants.
    #[must_use]
    pub fn new(config: &AsciiConfig) -> Self {
        Self {
            step_x: config.step_x.max(1),
            step_y: config.step_y.max(1),
            ramp: GlyphRamp::new(&config.ramp),
        }
    }

    /// Grid dimensions for a `width`×`height` buffer: ⌈w/step_x⌉ × ⌈h/step_y⌉.
    #[must_use]
    pub fn grid_size(&self, width: u32, height: u32) -> (u32, u32) {
        (width.div_ceil(self.step_x), height.div_ceil(self.step_y))
    }

    /// Pixel origin of cell (`col`, `row`), where its glyph is drawn.
    #[must_use]
    pub fn cell_origin(&self, col: u32, row: u32) -> (u32, u32) {
        (col * self.step_x, row * self.step_y)
    }

    /// Projette `frame` dans une nouvelle grille.
    #[must_use]
    pub fn project(&self, frame: &FrameBuffer) -> AsciiGrid {
        let (cols, rows) = self.grid_size(frame.width, frame.height);
        let mut grid = AsciiGrid::new(cols, rows);
        for row in 0..rows {
            for col in 0..cols {
                let (x, y) = self.cell_origin(col, row);
                let (r, _, _, _) = frame.pixel(x, y);
                grid.set(col, row, self.ramp.map(r));
            }
        }
        log::debug!(
            "Projection ASCII {}×{} → {cols}×{rows} cellules",
            frame.width,
            frame.height
        );
        grid
    }
}

impl Default for AsciiProjector {
    fn default() -> Self {
        Self::new(&AsciiConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyph_count_is_ceil_product() {
        let projector = AsciiProjector::default();
        for (w, h) in [(1, 1), (6, 8), (7, 9), (12, 16), (100, 33)] {
            let grid = projector.project(&FrameBuffer::new(w, h));
            let expected = w.div_ceil(6) * h.div_ceil(8);
            assert_eq!(grid.glyphs().count(), expected as usize, "{w}×{h}");
        }
    }

    #[test]
    fn extremes_map_to_ramp_ends() {
        let projector = AsciiProjector::default();
        let dark = projector.project(&FrameBuffer::filled(6, 8, [0, 0, 0, 255]));
        let lit = projector.project(&FrameBuffer::filled(6, 8, [255, 0, 0, 0]));
        assert_eq!(dark.get(0, 0), ' ');
        assert_eq!(lit.get(0, 0), '@');
    }

    #[test]
    fn samples_only_the_top_left_pixel_of_each_cell() {
        let mut frame = FrameBuffer::new(12, 8);
        // Tout allumé sauf les coins d'origine des cellules.
        for y in 0..8 {
            for x in 0..12 {
                frame.set_pixel(x, y, [255, 255, 255, 255]);
            }
        }
        frame.set_pixel(0, 0, [0, 0, 0, 255]);
        frame.set_pixel(6, 0, [128, 0, 0, 255]);

        let grid = AsciiProjector::default().project(&frame);
        assert_eq!(grid.get(0, 0), ' ');
        assert_eq!(grid.get(1, 0), '=');
    }

    #[test]
    fn strides_follow_configured_steps() {
        let projector = AsciiProjector::new(&AsciiConfig {
            step_x: 2,
            step_y: 3,
            ramp: " #".into(),
        });
        let mut frame = FrameBuffer::new(4, 6);
        frame.set_pixel(2, 3, [255, 0, 0, 255]);
        let grid = projector.project(&frame);
        assert_eq!((grid.width, grid.height), (2, 2));
        assert_eq!(grid.to_string(), "  \n #\n");
        assert_eq!(projector.cell_origin(1, 1), (2, 3));
    }

    #[test]
    fn dithered_output_projects_blank() {
        // Après tramage le canal R vaut toujours 0.
        let frame = FrameBuffer::filled(12, 16, [0, 0, 0, 255]);
        let grid = AsciiProjector::default().project(&frame);
        assert!(grid.cells.iter().all(|&c| c == ' '));
    }
}
