//! Context Descriptor Module
//!
//! The snapshot of a user's financial situation that drives context assembly.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

// == Experience Level ==
/// Self-reported financial experience of the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl ExperienceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Beginner => "beginner",
            ExperienceLevel::Intermediate => "intermediate",
            ExperienceLevel::Advanced => "advanced",
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Context Descriptor ==
/// Caller-supplied context for one cache lookup.
///
/// Continuous quantities are optional; a missing value is treated the same
/// as zero when the key is derived. Values that are not numbers (or numeric
/// strings) deserialize as missing rather than failing the whole descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextDescriptor {
    /// Owner of the context, always the leading key component
    pub user_id: String,
    /// Annual income
    #[serde(default, deserialize_with = "deserialize_lenient_amount")]
    pub income: Option<f64>,
    /// Annual expenses
    #[serde(default, deserialize_with = "deserialize_lenient_amount")]
    pub expenses: Option<f64>,
    /// Total savings
    #[serde(default, deserialize_with = "deserialize_lenient_amount")]
    pub savings: Option<f64>,
    /// Number of active savings goals
    #[serde(default)]
    pub active_goals: u32,
    /// Interface language code, e.g. "en" or "pt-BR"
    #[serde(default = "default_language")]
    pub language: String,
    /// Premium feature flag
    #[serde(default)]
    pub premium: bool,
    #[serde(default)]
    pub experience: ExperienceLevel,
}

// == Lenient Amount ==
/// Reads a number, a numeric string or null. Anything else becomes None.
fn deserialize_lenient_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};

    struct LenientAmount;

    impl<'de> Visitor<'de> for LenientAmount {
        type Value = Option<f64>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an optional number or numeric string")
        }

        fn visit_none<E: de::Error>(self) -> Result<Option<f64>, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Option<f64>, E> {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Option<f64>, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(LenientAmount)
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Option<f64>, E> {
            Ok(Some(value as f64))
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Option<f64>, E> {
            Ok(Some(value as f64))
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<Option<f64>, E> {
            Ok(Some(value))
        }

        fn visit_bool<E: de::Error>(self, _: bool) -> Result<Option<f64>, E> {
            Ok(None)
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Option<f64>, E> {
            Ok(value.trim().parse::<f64>().ok())
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Option<f64>, A::Error>
        where
            A: SeqAccess<'de>,
        {
            while seq.next_element::<IgnoredAny>()?.is_some() {}
            Ok(None)
        }

        fn visit_map<A>(self, mut map: A) -> Result<Option<f64>, A::Error>
        where
            A: MapAccess<'de>,
        {
            while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
            Ok(None)
        }
    }

    deserializer.deserialize_option(LenientAmount)
}

fn default_language() -> String {
    "en".to_string()
}

impl ContextDescriptor {
    /// Creates a descriptor for `user_id` with every other field at its default.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            income: None,
            expenses: None,
            savings: None,
            active_goals: 0,
            language: default_language(),
            premium: false,
            experience: ExperienceLevel::default(),
        }
    }

    pub fn with_income(mut self, income: f64) -> Self {
        self.income = Some(income);
        self
    }

    pub fn with_expenses(mut self, expenses: f64) -> Self {
        self.expenses = Some(expenses);
        self
    }

    pub fn with_savings(mut self, savings: f64) -> Self {
        self.savings = Some(savings);
        self
    }

    pub fn with_active_goals(mut self, active_goals: u32) -> Self {
        self.active_goals = active_goals;
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_premium(mut self, premium: bool) -> Self {
        self.premium = premium;
        self
    }

    pub fn with_experience(mut self, experience: ExperienceLevel) -> Self {
        self.experience = experience;
        self
    }
}
