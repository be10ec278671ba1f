use std::sync::Arc;

use crate::frame::FrameBuffer;

/// Fournit l'image décodée, intacte, au pipeline.
///
/// Chaque rendu repart de cette frame : le résultat tramé précédent n'est
/// jamais réinjecté.
///
/// # Example
/// ```
/// use ink_core::traits::Source;
/// use ink_core::frame::FrameBuffer;
/// use std::sync::Arc;
///
/// struct Blank(Arc<FrameBuffer>);
/// impl Source for Blank {
///     fn frame(&self) -> Arc<FrameBuffer> { Arc::clone(&self.0) }
/// }
/// let src = Blank(Arc::new(FrameBuffer::new(4, 3)));
/// assert_eq!(src.frame().width, 4);
/// ```
pub trait Source: Send {
    /// Pristine decoded pixels.
    fn frame(&self) -> Arc<FrameBuffer>;
}

/// Source de nombres uniformes pour le seuil stochastique.
///
/// Injectable : la production tire son entropie de la plateforme, les
/// tests fournissent un générateur graine.
///
/// # Example
/// ```
/// use ink_core::traits::RandomSource;
/// let mut rng = fastrand::Rng::with_seed(7);
/// let v = rng.next_unit();
/// assert!((0.0..1.0).contains(&v));
/// ```
pub trait RandomSource {
    /// Uniform draw in [0, 1).
    fn next_unit(&mut self) -> f32;
}

impl RandomSource for fastrand::Rng {
    #[inline(always)]
    fn next_unit(&mut self) -> f32 {
        self.f32()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    #[inline(always)]
    fn next_unit(&mut self) -> f32 {
        (**self).next_unit()
    }
}
