//! Timestamp ↔ storage-fragment codec.
//!
//! The conversion boundary between an application-level timestamp and
//! the flat fragment a document store persists:
//!
//! - [`StampEncoder`] writes a [`StampFragment`] before a value leaves
//!   the application layer.
//! - [`StampDecoder`] reads stored values back as a [`Stamp`] when they
//!   re-enter it.
//! - [`evolve`] shapes query-side operands so predicates compare against
//!   the `time` sub-field the encoder writes.

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod evolve;
pub mod fragment;
pub mod normalize;
pub mod value;

pub use decoder::StampDecoder;
pub use encoder::StampEncoder;
pub use error::StampError;
pub use evolve::evolve;
pub use fragment::StampFragment;
pub use normalize::normalized_time;
pub use value::{QueryValue, Stamp, TimeLike};
