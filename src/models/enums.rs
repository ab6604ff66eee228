//! Shared domain enums

use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, Postgres};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// Audience
// ---------------------------------------------------------------------------

/// Target readership of a book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Audience {
    Children,
    YoungAdult,
    Adult,
    All,
}

impl Audience {
    /// Every selectable value, in display order
    pub const VALUES: [Audience; 4] = [
        Audience::Children,
        Audience::YoungAdult,
        Audience::Adult,
        Audience::All,
    ];

    /// Stored/submitted identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Audience::Children => "children",
            Audience::YoungAdult => "young_adult",
            Audience::Adult => "adult",
            Audience::All => "all",
        }
    }

    /// Exact match against the submitted identifiers
    pub fn from_identifier(value: &str) -> Option<Audience> {
        Self::VALUES.into_iter().find(|a| a.as_str() == value)
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Audience::Children => "Children",
            Audience::YoungAdult => "Young Adult",
            Audience::Adult => "Adult",
            Audience::All => "All",
        }
    }

    /// Choices for a select field
    pub fn choices() -> Vec<AudienceChoice> {
        Self::VALUES
            .iter()
            .map(|a| AudienceChoice {
                value: *a,
                label: a.label().to_string(),
            })
            .collect()
    }
}

/// One option of the audience select field
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AudienceChoice {
    pub value: Audience,
    pub label: String,
}

impl std::fmt::Display for Audience {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for Audience {
    type Err = String;

    /// Accepts the identifier in any case, with `_`, `-` or a space between words
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| if c == '-' || c == ' ' { '_' } else { c.to_ascii_lowercase() })
            .collect();

        match normalized.as_str() {
            "children" => Ok(Audience::Children),
            "young_adult" => Ok(Audience::YoungAdult),
            "adult" => Ok(Audience::Adult),
            "all" => Ok(Audience::All),
            _ => Err(format!("Invalid audience: {}", s)),
        }
    }
}

// SQLx conversion for Audience (stored as TEXT)
impl sqlx::Type<Postgres> for Audience {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<Postgres>>::compatible(ty)
    }
}

impl<'r> Decode<'r, Postgres> for Audience {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for Audience {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <&str as Encode<Postgres>>::encode(self.as_str(), buf)
    }
}
