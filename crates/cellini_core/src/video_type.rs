//! Video type classification.

use serde::{Deserialize, Serialize};

/// The two commercial formats the pipeline can produce.
///
/// The video type steers every stage: concept direction, camera and lighting
/// rules, prompt vocabulary, and the movement amplitude sent to the
/// generation service.
///
/// # Examples
///
/// ```
/// use cellini_core::VideoType;
/// use std::str::FromStr;
///
/// assert_eq!(format!("{}", VideoType::Ecommerce), "ecommerce");
/// assert_eq!(VideoType::from_str("ugc").unwrap(), VideoType::Ugc);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum VideoType {
    /// Premium studio-grade advertisement video
    Ecommerce,
    /// Natural, casual, social-media-style video
    Ugc,
}
