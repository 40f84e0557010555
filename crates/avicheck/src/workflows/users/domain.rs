use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier shared by every account kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u32);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// WGS84 coordinates in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Postal location. Coordinates are optional because most producers only
/// register a city and state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub state: String,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<GeoPoint>,
}

impl Address {
    pub fn new(state: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            city: city.into(),
            postal_code: None,
            coordinates: None,
        }
    }

    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.coordinates = Some(GeoPoint {
            latitude,
            longitude,
        });
        self
    }

    pub fn same_city(&self, other: &Address) -> bool {
        self.matches(&other.city, &other.state)
    }

    /// Case-insensitive city + state comparison.
    pub fn matches(&self, city: &str, state: &str) -> bool {
        eq_ignore_case(&self.city, city) && eq_ignore_case(&self.state, state)
    }
}

/// Trimmed comparison folding Unicode case, so "UBERLÂNDIA" equals "Uberlândia".
pub fn eq_ignore_case(left: &str, right: &str) -> bool {
    left.trim()
        .chars()
        .flat_map(char::to_lowercase)
        .eq(right.trim().chars().flat_map(char::to_lowercase))
}

/// Attributes every account carries regardless of role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub full_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VeterinarianProfile {
    /// Professional council registration (CRMV).
    pub registration: String,
    /// Free text; specialties are inferred from it.
    #[serde(default)]
    pub bio: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum UserRole {
    Producer,
    Veterinarian(VeterinarianProfile),
    Administrator,
}

impl UserRole {
    pub const fn label(&self) -> &'static str {
        match self {
            UserRole::Producer => "producer",
            UserRole::Veterinarian(_) => "veterinarian",
            UserRole::Administrator => "administrator",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    pub profile: UserProfile,
    pub role: UserRole,
}

impl UserAccount {
    pub fn id(&self) -> UserId {
        self.profile.id
    }

    pub fn is_producer(&self) -> bool {
        matches!(self.role, UserRole::Producer)
    }

    pub fn veterinarian(&self) -> Option<&VeterinarianProfile> {
        match &self.role {
            UserRole::Veterinarian(profile) => Some(profile),
            _ => None,
        }
    }
}
