//! Timezone-preserving time codec for document stores.
//!
//! A document store keeps a timestamp as a bare instant; everything else
//! about it (the zone it was written in, its local calendar rendering) is
//! gone by the time a query runs. This crate converts a timezone-aware
//! timestamp into a flat composite fragment that carries that metadata
//! along — the instant, a zone-independent wall-clock sort key, the local
//! calendar fields, the zone name, and its numeric offset — and converts
//! stored fragments back.
//!
//! Three operations make up the whole surface:
//!
//! - [`StampEncoder::mongoize`]: timestamp-like value → [`StampFragment`]
//! - [`StampDecoder::demongoize`]: stored value → [`Stamp`]
//! - [`evolve`]: query-side operand → storage-comparable value
//!
//! All three are pure functions of their input plus a caller-supplied
//! [`CodecConfig`]; there is no ambient state.
//!
//! # Example
//!
//! ```
//! use metastamp::{CodecConfig, StampDecoder, StampEncoder, TimeLike, Zone};
//!
//! let config = CodecConfig::in_zone(Zone::named("America/New_York").unwrap());
//!
//! let encoder = StampEncoder::new(config);
//! let fragment = encoder
//!     .mongoize(Some(&TimeLike::from("2024-03-10T06:30:00Z")))
//!     .unwrap()
//!     .unwrap();
//! assert_eq!((fragment.hour, fragment.min), (1, 30));
//! assert_eq!(fragment.offset, -18000);
//! assert_eq!(fragment.zone, "America/New_York");
//!
//! let decoder = StampDecoder::new(config);
//! let stamp = decoder.demongoize(&fragment.to_document()).unwrap().unwrap();
//! assert_eq!(stamp.instant, fragment.time);
//! ```

pub mod config;
pub mod ejson;
pub mod stamp;
pub mod value;
pub mod zone;

pub use config::CodecConfig;
pub use ejson::{from_ejson, to_ejson, EjsonError, EjsonMode};
pub use stamp::{
    evolve, normalized_time, QueryValue, Stamp, StampDecoder, StampEncoder, StampError,
    StampFragment, TimeLike,
};
pub use value::{Document, FieldValue};
pub use zone::Zone;
