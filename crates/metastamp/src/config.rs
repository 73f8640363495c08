//! Codec configuration.
//!
//! The original host kept these two knobs as process-wide globals; here
//! they travel as an explicit value so every call is a pure function of
//! its arguments.

use crate::zone::Zone;

/// Configuration threaded into every encode/decode/evolve call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Zone used to derive the local calendar fields at encode time, to
    /// read wall-clock inputs, and as the display zone for legacy stored
    /// values.
    pub default_zone: Zone,
    /// Whether stored instants are kept UTC-normalized. With an
    /// epoch-relative wire type this cannot change which instant is
    /// stored; the decoder honors it as a local re-expression step.
    pub store_as_utc: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        CodecConfig {
            default_zone: Zone::utc(),
            store_as_utc: true,
        }
    }
}

impl CodecConfig {
    /// Configuration displaying in `default_zone`, storing UTC.
    pub fn in_zone(default_zone: Zone) -> Self {
        CodecConfig {
            default_zone,
            store_as_utc: true,
        }
    }
}
