//! Key Quantizer Module
//!
//! Derives a cache key from a context descriptor. Continuous quantities are
//! replaced by band labels so that similar contexts share one cache slot.

use std::borrow::Cow;
use std::fmt;

use crate::context::ContextDescriptor;

// == Public Constants ==
/// Separator between key components
pub const KEY_DELIMITER: char = '|';

/// Income band boundaries
pub const INCOME_BANDS: BandTable = BandTable::new(30_000.0, 75_000.0, 150_000.0);

/// Expense band boundaries
pub const EXPENSE_BANDS: BandTable = BandTable::new(20_000.0, 50_000.0, 100_000.0);

/// Savings band boundaries
pub const SAVINGS_BANDS: BandTable = BandTable::new(5_000.0, 25_000.0, 100_000.0);

// == Band ==
/// Discrete label a continuous quantity is mapped into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Band {
    /// Zero, unset, or unclassifiable
    None,
    Low,
    Mid,
    High,
    VeryHigh,
}

impl Band {
    pub fn label(&self) -> &'static str {
        match self {
            Band::None => "none",
            Band::Low => "low",
            Band::Mid => "mid",
            Band::High => "high",
            Band::VeryHigh => "very_high",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// == Band Table ==
/// Lower bounds of the `Mid`, `High` and `VeryHigh` bands.
///
/// Anything strictly positive below `mid` is `Low`. A value exactly on a
/// bound belongs to the higher band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandTable {
    mid: f64,
    high: f64,
    very_high: f64,
}

impl BandTable {
    pub const fn new(mid: f64, high: f64, very_high: f64) -> Self {
        Self {
            mid,
            high,
            very_high,
        }
    }

    // == Classify ==
    /// Maps a quantity into its band.
    ///
    /// Missing, zero, negative and non-finite values fall back to `Band::None`.
    pub fn classify(&self, value: Option<f64>) -> Band {
        let value = match value {
            Some(v) if v.is_finite() && v > 0.0 => v,
            _ => return Band::None,
        };

        if value >= self.very_high {
            Band::VeryHigh
        } else if value >= self.high {
            Band::High
        } else if value >= self.mid {
            Band::Mid
        } else {
            Band::Low
        }
    }
}

// == Cache Key ==
/// Deterministic key identifying one cache slot.
///
/// The leading component is always the (escaped) user identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the leading user component, still escaped.
    pub fn user_component(&self) -> &str {
        self.0
            .split_once(KEY_DELIMITER)
            .map(|(user, _)| user)
            .unwrap_or(self.0.as_str())
    }

    /// True if this key belongs to `user_id` (unescaped).
    pub fn belongs_to(&self, user_id: &str) -> bool {
        self.user_component() == encode_component(user_id)
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for CacheKey {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for CacheKey {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// == Encode Component ==
/// Escapes `%` and the key delimiter in free-text components.
pub fn encode_component(raw: &str) -> Cow<'_, str> {
    if raw.contains(['%', KEY_DELIMITER]) {
        Cow::Owned(raw.replace('%', "%25").replace(KEY_DELIMITER, "%7C"))
    } else {
        Cow::Borrowed(raw)
    }
}

// == Cache Key Derivation ==
/// Builds the cache key for a context descriptor.
///
/// Layout:
/// `{user}|inc:{band}|exp:{band}|sav:{band}|goals:{n}|lang:{lang}|premium:{bool}|level:{level}`
pub fn cache_key(ctx: &ContextDescriptor) -> CacheKey {
    let d = KEY_DELIMITER;
    CacheKey(format!(
        "{user}{d}inc:{inc}{d}exp:{exp}{d}sav:{sav}{d}goals:{goals}{d}lang:{lang}{d}premium:{premium}{d}level:{level}",
        user = encode_component(&ctx.user_id),
        inc = INCOME_BANDS.classify(ctx.income),
        exp = EXPENSE_BANDS.classify(ctx.expenses),
        sav = SAVINGS_BANDS.classify(ctx.savings),
        goals = ctx.active_goals,
        lang = encode_component(&ctx.language),
        premium = ctx.premium,
        level = ctx.experience,
    ))
}
