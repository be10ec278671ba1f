use thiserror::Error;

/// Errors originating from the core module.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CoreError {
    /// Width × height × 4 does not fit in memory addressing.
    #[error("Dimensions invalides : {width}×{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Raw pixel data does not match the announced dimensions.
    #[error("Taille de buffer incohérente : {actual} octets, {expected} attendus")]
    BufferSize {
        /// Byte count implied by width × height × 4.
        expected: usize,
        /// Byte count actually supplied.
        actual: usize,
    },

    /// Dither mode name not recognized.
    #[error("Mode de tramage inconnu : {name}")]
    UnknownMode {
        /// The rejected name.
        name: String,
    },
}
