use base64::Engine;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use crate::error::{SieveError, SieveResult};

/// Strictly increasing, duplicate-free sequence of primes.
///
/// Only the extractor and the bound estimator construct one; callers get a
/// read-only view through [`Deref`] to `[u64]`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrimeList(Vec<u64>);

impl PrimeList {
    pub(crate) fn from_ascending(primes: Vec<u64>) -> Self {
        debug_assert!(primes.windows(2).all(|w| w[0] < w[1]));
        Self(primes)
    }

    /// The empty list.
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<u64> {
        self.0
    }

    /// Keep only the first `n` primes.
    pub fn take(mut self, n: usize) -> Self {
        self.0.truncate(n);
        self
    }
}

impl Deref for PrimeList {
    type Target = [u64];

    fn deref(&self) -> &[u64] {
        &self.0
    }
}

impl IntoIterator for PrimeList {
    type Item = u64;
    type IntoIter = std::vec::IntoIter<u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PrimeList {
    type Item = &'a u64;
    type IntoIter = std::slice::Iter<'a, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Output format requested from the visualization renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualizationFormat {
    /// Glyph grid, one glyph per sieve index.
    Text,
    /// PNG bytes encoded as standard base64.
    #[serde(rename = "base64")]
    Base64Image,
    /// Raw PNG bytes.
    #[serde(rename = "binary")]
    BinaryImage,
}

impl VisualizationFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Base64Image => "base64",
            Self::BinaryImage => "binary",
        }
    }
}

impl fmt::Display for VisualizationFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VisualizationFormat {
    type Err = SieveError;

    fn from_str(s: &str) -> SieveResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "base64" | "base64image" => Ok(Self::Base64Image),
            "binary" | "binaryimage" => Ok(Self::BinaryImage),
            _ => Err(SieveError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// A square sieve raster encoded as PNG.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedImage {
    bytes: Vec<u8>,
    side: u32,
}

impl RenderedImage {
    pub(crate) fn new(bytes: Vec<u8>, side: u32) -> Self {
        Self { bytes, side }
    }

    /// Width and height of the raster in pixels.
    pub fn side(&self) -> u32 {
        self.side
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn content_type(&self) -> &'static str {
        "image/png"
    }

    /// Standard (padded) base64 of the PNG bytes.
    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.bytes)
    }

    /// BLAKE3 digest of the PNG bytes, hex encoded.
    pub fn digest(&self) -> String {
        blake3::hash(&self.bytes).to_hex().to_string()
    }
}

/// Result of a render call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Visualization {
    Text(String),
    Base64(String),
    Binary(RenderedImage),
}

impl Visualization {
    pub fn format(&self) -> VisualizationFormat {
        match self {
            Self::Text(_) => VisualizationFormat::Text,
            Self::Base64(_) => VisualizationFormat::Base64Image,
            Self::Binary(_) => VisualizationFormat::BinaryImage,
        }
    }

    /// The textual payload, for `Text` and `Base64`.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) | Self::Base64(s) => Some(s),
            Self::Binary(_) => None,
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Text(s) | Self::Base64(s) => s.into_bytes(),
            Self::Binary(image) => image.into_bytes(),
        }
    }
}

/// Resource limits for the engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SieveConfig {
    /// Largest limit any sieve may be built for.
    #[serde(default = "default_max_limit")]
    pub max_limit: u64,
    /// Multiplier applied to the limit when a counted query comes up short.
    #[serde(default = "default_growth_factor")]
    pub growth_factor: f64,
    /// Maximum number of widening rounds for a counted query.
    #[serde(default = "default_max_growth_rounds")]
    pub max_growth_rounds: u32,
}

impl Default for SieveConfig {
    fn default() -> Self {
        Self {
            max_limit: default_max_limit(),
            growth_factor: default_growth_factor(),
            max_growth_rounds: default_max_growth_rounds(),
        }
    }
}

impl SieveConfig {
    /// Preset for interactive callers: sieves of at most one million entries.
    pub fn small() -> Self {
        Self {
            max_limit: 1_000_000,
            ..Self::default()
        }
    }

    pub fn with_max_limit(mut self, max_limit: u64) -> Self {
        self.max_limit = max_limit;
        self
    }

    pub fn validate(&self) -> SieveResult<()> {
        if self.max_limit == 0 {
            return Err(SieveError::InvalidArgument(
                "max_limit must be positive".into(),
            ));
        }
        if !(self.growth_factor > 1.0 && self.growth_factor.is_finite()) {
            return Err(SieveError::InvalidArgument(format!(
                "growth_factor must be a finite value > 1.0, got {}",
                self.growth_factor
            )));
        }
        if self.max_growth_rounds == 0 {
            return Err(SieveError::InvalidArgument(
                "max_growth_rounds must be positive".into(),
            ));
        }
        Ok(())
    }
}

fn default_max_limit() -> u64 {
    50_000_000
}

fn default_growth_factor() -> f64 {
    1.5
}

fn default_max_growth_rounds() -> u32 {
    32
}
