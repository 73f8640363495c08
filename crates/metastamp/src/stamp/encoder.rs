//! Encoder: application timestamp → storage fragment.

use crate::config::CodecConfig;
use crate::value::FieldValue;

use super::error::StampError;
use super::fragment::StampFragment;
use super::value::TimeLike;

/// Encodes timestamps into the composite form the store persists.
///
/// Carries the configuration the original host kept as process-wide
/// globals; construct one wherever a field is about to be written.
#[derive(Debug, Clone, Copy)]
pub struct StampEncoder {
    pub config: CodecConfig,
}

impl StampEncoder {
    pub fn new(config: CodecConfig) -> StampEncoder {
        StampEncoder { config }
    }

    /// Turn a timestamp-like value into its storage fragment.
    ///
    /// Absent input is a first-class "no value" result, never an error.
    /// An input that cannot be coerced to an absolute instant is a
    /// [`StampError::ConversionFailed`].
    ///
    /// # Example
    ///
    /// ```
    /// use metastamp::{CodecConfig, StampEncoder, TimeLike, Zone};
    ///
    /// let encoder = StampEncoder::new(CodecConfig::in_zone(
    ///     Zone::named("America/New_York").unwrap(),
    /// ));
    /// let fragment = encoder
    ///     .mongoize(Some(&TimeLike::from("2024-03-10T06:30:00Z")))
    ///     .unwrap()
    ///     .unwrap();
    /// assert_eq!((fragment.year, fragment.month, fragment.day), (2024, 3, 10));
    /// assert_eq!((fragment.hour, fragment.min, fragment.sec), (1, 30, 0));
    /// assert_eq!(fragment.wday, 0);
    /// assert_eq!(fragment.offset, -18000);
    /// assert!(encoder.mongoize(None).unwrap().is_none());
    /// ```
    pub fn mongoize(&self, value: Option<&TimeLike>) -> Result<Option<StampFragment>, StampError> {
        let value = match value {
            Some(value) => value,
            None => return Ok(None),
        };
        let instant = value.coerce(&self.config.default_zone)?;
        Ok(Some(StampFragment::build(
            instant,
            &self.config.default_zone,
        )))
    }

    /// [`mongoize`](StampEncoder::mongoize), rendered straight to the
    /// persisted document form.
    pub fn mongoize_to_document(
        &self,
        value: Option<&TimeLike>,
    ) -> Result<Option<FieldValue>, StampError> {
        Ok(self.mongoize(value)?.map(|fragment| fragment.to_document()))
    }
}
