//! qz_core: Core types, domains, and engine configuration.
//!
//! This crate is **I/O-free**. It defines the stable types used across the
//! engine (`qz_algo`, `qz_pipeline`, `qz_io`, `qz_cli`).
//!
//! - Category and preference-code newtypes (`Category`, `PreferenceCode`)
//! - Answer / result-record entities and the lookup-table shape
//! - `EngineConfig` (category count, radix, tier depth, label separator)
//! - `CategoryLabels` (display identifiers used to build rank labels)
//!
//! Serialization derives are gated behind the `serde` feature.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod errors {
    use core::fmt;

    /// Minimal error set for core-domain validation.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub enum CoreError {
        /// An answer (or code digit) names a category outside `0..category_count`.
        InvalidCategory { category: u32, category_count: u8 },
        /// A raw code value is not below `radix³`.
        CodeOutOfRange { value: u32, radix: u16 },
        /// A configuration value is outside its allowed domain.
        DomainOutOfRange(&'static str),
    }

    impl fmt::Display for CoreError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                CoreError::InvalidCategory { category, category_count } => {
                    write!(f, "invalid category {category} (expected 0..{category_count})")
                }
                CoreError::CodeOutOfRange { value, radix } => {
                    write!(f, "preference code {value} out of range for radix {radix}")
                }
                CoreError::DomainOutOfRange(k) => write!(f, "domain out of range: {k}"),
            }
        }
    }

    #[cfg(feature = "std")]
    impl std::error::Error for CoreError {}
}

pub mod ids {
    //! Category and preference-code newtypes.

    use crate::errors::CoreError;
    use core::fmt;

    #[cfg(feature = "serde")]
    use serde::{Deserialize, Serialize};

    /// One of the fixed preference dimensions being scored.
    ///
    /// The newtype itself carries no bound; the configured domain is checked
    /// by [`crate::variables::EngineConfig::category`] and by the accumulator.
    #[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct Category(u8);

    impl Category {
        pub const fn new(index: u8) -> Self { Self(index) }
        pub const fn index(self) -> usize { self.0 as usize }
        pub const fn get(self) -> u8 { self.0 }
    }

    impl From<u8> for Category {
        fn from(v: u8) -> Self { Self(v) }
    }

    impl fmt::Display for Category {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
    }

    /// An ordered (first, second, third) preference guess packed as a
    /// base-`radix` numeral, first preference most significant.
    #[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct PreferenceCode(u32);

    impl PreferenceCode {
        /// `first*B² + second*B + third`. Every digit must be `< radix`.
        pub fn encode(triple: [Category; 3], radix: u16) -> Result<Self, CoreError> {
            let b = u32::from(radix);
            for c in triple {
                if u32::from(c.get()) >= b {
                    return Err(CoreError::DomainOutOfRange("code digit >= radix"));
                }
            }
            let [first, second, third] = triple.map(|c| u32::from(c.get()));
            Ok(Self(first * b * b + second * b + third))
        }

        /// Accept a raw value (e.g. a lookup-table key); must be `< radix³`.
        pub fn from_value(value: u32, radix: u16) -> Result<Self, CoreError> {
            let b = u64::from(radix);
            if u64::from(value) < b * b * b {
                Ok(Self(value))
            } else {
                Err(CoreError::CodeOutOfRange { value, radix })
            }
        }

        pub const fn value(self) -> u32 { self.0 }

        /// Split back into (first, second, third).
        ///
        /// Returns `None` if a digit does not fit a `Category` (radix > 256).
        pub fn digits(self, radix: u16) -> Option<[Category; 3]> {
            let b = u32::from(radix);
            if b == 0 { return None; }
            let third = self.0 % b;
            let second = (self.0 / b) % b;
            let first = self.0 / (b * b);
            let cat = |d: u32| u8::try_from(d).ok().map(Category::new);
            Some([cat(first)?, cat(second)?, cat(third)?])
        }
    }

    impl fmt::Display for PreferenceCode {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
    }
}

pub mod entities;
pub mod variables;

pub use entities::{Answer, ResultRecord, ResultTable};
pub use errors::CoreError;
pub use ids::{Category, PreferenceCode};
pub use variables::{CategoryLabels, EngineConfig};
