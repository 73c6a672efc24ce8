//! Engine configuration and category display metadata.
//!
//! `EngineConfig` is immutable once built: every field is validated by
//! [`EngineConfig::new`] (and by deserialization, which routes through it).

use alloc::borrow::Cow;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::CoreError;
use crate::ids::Category;

/// Category count of the observed quiz (index 0 reserved/unused there).
pub const DEFAULT_CATEGORY_COUNT: u8 = 7;
/// Radix of the observed lookup table keys (three octal digits).
pub const DEFAULT_RADIX: u16 = 8;
/// Tier depth the tie-break cascade needs: tiers 0..=3 are read.
pub const MIN_TIER_DEPTH: usize = 4;
pub const DEFAULT_LABEL_SEPARATOR: &str = "-";

/// Largest radix whose digits still fit a `Category`.
const MAX_RADIX: u16 = 256;

#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct EngineConfig {
    category_count: u8,
    radix: u16,
    tier_depth: usize,
    label_separator: String,
}

impl EngineConfig {
    /// Domains:
    /// - `category_count` in `1..=radix`
    /// - `radix` in `2..=256`
    /// - `tier_depth >= 4`
    pub fn new(
        category_count: u8,
        radix: u16,
        tier_depth: usize,
        label_separator: impl Into<String>,
    ) -> Result<Self, CoreError> {
        if !(2..=MAX_RADIX).contains(&radix) {
            return Err(CoreError::DomainOutOfRange("radix"));
        }
        if category_count == 0 || u16::from(category_count) > radix {
            return Err(CoreError::DomainOutOfRange("category_count"));
        }
        if tier_depth < MIN_TIER_DEPTH {
            return Err(CoreError::DomainOutOfRange("tier_depth"));
        }
        Ok(Self {
            category_count,
            radix,
            tier_depth,
            label_separator: label_separator.into(),
        })
    }

    pub fn category_count(&self) -> u8 { self.category_count }
    pub fn radix(&self) -> u16 { self.radix }
    pub fn tier_depth(&self) -> usize { self.tier_depth }
    pub fn label_separator(&self) -> &str { &self.label_separator }

    /// Map a raw index into the configured domain.
    pub fn category(&self, raw: u32) -> Result<Category, CoreError> {
        if raw < u32::from(self.category_count) {
            // category_count <= u8::MAX, so raw fits.
            Ok(Category::new(raw as u8))
        } else {
            Err(CoreError::InvalidCategory { category: raw, category_count: self.category_count })
        }
    }

    /// All categories in index order.
    pub fn categories(&self) -> impl Iterator<Item = Category> {
        (0..self.category_count).map(Category::new)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            category_count: DEFAULT_CATEGORY_COUNT,
            radix: DEFAULT_RADIX,
            tier_depth: MIN_TIER_DEPTH,
            label_separator: DEFAULT_LABEL_SEPARATOR.to_string(),
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for EngineConfig {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        use serde::de::Error as DeError;

        fn default_category_count() -> u8 { DEFAULT_CATEGORY_COUNT }
        fn default_radix() -> u16 { DEFAULT_RADIX }
        fn default_tier_depth() -> usize { MIN_TIER_DEPTH }
        fn default_separator() -> String { DEFAULT_LABEL_SEPARATOR.to_string() }

        #[derive(Deserialize)]
        #[serde(deny_unknown_fields)]
        struct Raw {
            #[serde(default = "default_category_count")]
            category_count: u8,
            #[serde(default = "default_radix")]
            radix: u16,
            #[serde(default = "default_tier_depth")]
            tier_depth: usize,
            #[serde(default = "default_separator")]
            label_separator: String,
        }

        let raw = Raw::deserialize(d)?;
        EngineConfig::new(raw.category_count, raw.radix, raw.tier_depth, raw.label_separator)
            .map_err(DeError::custom)
    }
}

/// Short display identifiers per category (index = category), e.g. initials.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CategoryLabels(Vec<String>);

impl CategoryLabels {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(labels.into_iter().map(Into::into).collect())
    }

    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Display identifier for `c`; falls back to the category number.
    pub fn label(&self, c: Category) -> Cow<'_, str> {
        match self.0.get(c.index()) {
            Some(s) => Cow::Borrowed(s.as_str()),
            None => Cow::Owned(c.to_string()),
        }
    }

    /// Join the identifiers of `cats` with `sep`, in the given order.
    pub fn join(&self, cats: &[Category], sep: &str) -> String {
        let mut out = String::new();
        for (i, &c) in cats.iter().enumerate() {
            if i > 0 {
                out.push_str(sep);
            }
            out.push_str(&self.label(c));
        }
        out
    }
}
