use std::io;

/// Errors from region accessors that need a non-empty region.
#[derive(Clone, Debug, thiserror::Error, PartialEq)]
pub enum RegionError {
    /// The region has no fill triangles to sample from.
    #[error("the region is empty")]
    EmptyRegion,
}

/// Errors while decoding a serialized region.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error(transparent)]
    Io(#[from] io::Error),
    /// A length prefix exceeds the sanity bound for a single stream.
    #[error("length prefix {0} exceeds the decoder limit")]
    LengthOutOfRange(u32),
    /// A boolean byte was neither 0 nor 1.
    #[error("invalid edge-flag byte {0:#x}")]
    InvalidFlag(u8),
}
