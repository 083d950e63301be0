//! Authentication scheme selection.
//!
//! Three incompatible schemes have been used for notifications. None of them
//! carries a version tag, so the scheme is inferred from the payload's shape:
//!
//! | `signature` | `transaction` | Scheme |
//! |-------------|---------------|--------|
//! | present | absent | [`SchemeTag::LegacyV1`] |
//! | present | present | [`SchemeTag::LegacyV2`] |
//! | absent | any | [`SchemeTag::Mac`] |

use std::fmt;

use crate::notification::{CanonicalPayload, SIGNATURE_FIELD};

/// Payload field whose presence distinguishes legacy V2 from V1.
const TRANSACTION_FIELD: &str = "transaction";

/// One of the gateway's notification authentication schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemeTag {
    /// `paymentId`, `amount`, `status` concatenation, code in `signature`.
    LegacyV1,
    /// `amount`, `currency`, `reference`, `transaction`, `status` concatenation,
    /// code in `signature`.
    LegacyV2,
    /// Whole JSON text, code in the sibling `mac` field.
    Mac,
}

impl SchemeTag {
    /// Infer the scheme from the payload's fields.
    ///
    /// # Examples
    ///
    /// ```
    /// use makecommerce_auth::{CanonicalPayload, SchemeTag};
    ///
    /// let payload = CanonicalPayload::from_json(r#"{"status":"COMPLETED"}"#).unwrap();
    /// assert_eq!(SchemeTag::select(&payload), SchemeTag::Mac);
    /// ```
    #[must_use]
    pub fn select(payload: &CanonicalPayload) -> Self {
        match (
            payload.contains(SIGNATURE_FIELD),
            payload.contains(TRANSACTION_FIELD),
        ) {
            (true, false) => Self::LegacyV1,
            (true, true) => Self::LegacyV2,
            (false, _) => Self::Mac,
        }
    }

    /// Whether this is one of the deprecated signature schemes.
    #[must_use]
    pub fn is_legacy(self) -> bool {
        matches!(self, Self::LegacyV1 | Self::LegacyV2)
    }

    /// Stable name for logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LegacyV1 => "LEGACY_V1",
            Self::LegacyV2 => "LEGACY_V2",
            Self::Mac => "MAC",
        }
    }
}

impl fmt::Display for SchemeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
