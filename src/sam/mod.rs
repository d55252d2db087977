//! Unaligned SAM text generation.
//!
//! Every input record becomes exactly one line with the eleven mandatory
//! fields; mapping fields are fixed to their "unmapped" values and TLEN
//! carries the sequence length.

mod emitter;
mod header;
mod identifier;

pub use emitter::{
    write_placeholder_quality, write_sam_record, SamEmitter, PLACEHOLDER_QUALITY_CHAR,
};
pub use header::{SamHeader, DEFAULT_HEADER};
pub use identifier::{IdentifierPolicy, NameTransform};
