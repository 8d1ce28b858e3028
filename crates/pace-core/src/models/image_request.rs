use serde::{Deserialize, Serialize};

use crate::catalog::{Period, Resolution};

/// A validated request for one archive browse image.
///
/// `month` and `day` keep the two-character strings the caller supplied;
/// they are emitted into URLs verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRequest {
    pub product: String,
    pub year: i16,
    pub month: String,
    pub day: Option<String>,
    #[serde(default)]
    pub resolution: Resolution,
    pub period: Period,
}
