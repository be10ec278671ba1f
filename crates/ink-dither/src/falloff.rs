//! Atténuation directionnelle par colonne.

/// Poids d'une colonne selon sa distance horizontale à la cible.
///
/// `dir = 1 - |direction - x / width|`, `weight = dir ^ falloff`.
/// `direction` est ramené dans [0, 1] et la base est bornée à 0 : une
/// base négative sous un exposant fractionnaire donnerait NaN et
/// polluerait la décision d'encre. Une largeur nulle donne un poids de 1.
///
/// # Example
/// ```
/// use ink_dither::falloff::weight;
/// assert_eq!(weight(5, 10, 0.5, 2.0), 1.0);
/// assert_eq!(weight(3, 10, 0.0, 0.0), 1.0);
/// assert!(weight(0, 10, 1.0, 1.5) < weight(9, 10, 1.0, 1.5));
/// ```
#[inline(always)]
#[must_use]
pub fn weight(x: u32, width: u32, direction: f32, falloff: f32) -> f32 {
    if width == 0 {
        return 1.0;
    }
    let direction = direction.clamp(0.0, 1.0);
    let dir = 1.0 - (direction - x as f32 / width as f32).abs();
    dir.max(0.0).powf(falloff)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_falloff_is_flat() {
        for x in 0..16 {
            assert!((weight(x, 16, 0.0, 0.0) - 1.0).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn symmetric_around_target_column() {
        let width = 8;
        for k in 1..4 {
            let left = weight(4 - k, width, 0.5, 2.0);
            let right = weight(4 + k, width, 0.5, 2.0);
            assert!((left - right).abs() < 1e-6, "k={k}: {left} vs {right}");
        }
    }

    #[test]
    fn strictly_decreasing_with_distance() {
        let width = 8;
        let mut prev = weight(4, width, 0.5, 2.0);
        for k in 1..=4 {
            let w = weight(4 - k, width, 0.5, 2.0);
            assert!(w < prev, "k={k}: {w} !< {prev}");
            prev = w;
        }
    }

    #[test]
    fn linear_falloff_matches_formula() {
        let w = weight(3, 10, 1.0, 1.0);
        assert!((w - 0.3).abs() < 1e-6);
    }

    #[test]
    fn out_of_range_direction_never_yields_nan() {
        for x in 0..10 {
            assert!(weight(x, 10, -3.0, 1.5).is_finite());
            assert!(weight(x, 10, 4.0, 0.5).is_finite());
        }
    }

    #[test]
    fn zero_width_is_neutral() {
        assert!((weight(0, 0, 0.5, 3.0) - 1.0).abs() < f32::EPSILON);
    }
}
