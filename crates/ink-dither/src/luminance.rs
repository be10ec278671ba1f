//! Extraction de luminance, pondérations BT.601.

/// Intensité normalisée [0.0, 1.0] d'un pixel RGB.
///
/// `(0.299 r + 0.587 g + 0.114 b) / 255`. Ces poids sont fixes : les
/// sorties de référence en dépendent.
///
/// # Example
/// ```
/// use ink_dither::luminance::luminance;
/// assert_eq!(luminance(0, 0, 0), 0.0);
/// assert!((luminance(255, 255, 255) - 1.0).abs() < 1e-6);
/// ```
#[inline(always)]
#[must_use]
pub fn luminance(r: u8, g: u8, b: u8) -> f32 {
    (0.299 * f32::from(r) + 0.587 * f32::from(g) + 0.114 * f32::from(b)) / 255.0
}
