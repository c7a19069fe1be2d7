use serde::{Deserialize, Serialize};

/// Canonical personal attributes a profile can provide to autofill.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ProfileAttribute {
    FullName,
    Email,
    PhoneNumber,
    IdNumber,
    Address,
    DateOfBirth,
    Gender,
    Nationality,
    Occupation,
}

/// A user's canonical personal record, owned by the external profile store.
///
/// The core only reads profiles; every attribute is optional because users
/// fill them in over time (absence = not yet provided).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    pub owner_id: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub id_number: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub occupation: Option<String>,
}

impl UserProfile {
    pub fn new(owner_id: impl Into<String>) -> Self {
        Self {
            owner_id: owner_id.into(),
            ..Self::default()
        }
    }

    /// Returns the attribute's value, treating empty strings as absent.
    pub fn attribute(&self, attribute: ProfileAttribute) -> Option<&str> {
        let value = match attribute {
            ProfileAttribute::FullName => &self.full_name,
            ProfileAttribute::Email => &self.email,
            ProfileAttribute::PhoneNumber => &self.phone_number,
            ProfileAttribute::IdNumber => &self.id_number,
            ProfileAttribute::Address => &self.address,
            ProfileAttribute::DateOfBirth => &self.date_of_birth,
            ProfileAttribute::Gender => &self.gender,
            ProfileAttribute::Nationality => &self.nationality,
            ProfileAttribute::Occupation => &self.occupation,
        };
        value.as_deref().filter(|v| !v.trim().is_empty())
    }
}
