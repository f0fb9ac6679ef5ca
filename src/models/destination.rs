use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

pub const MAX_NAME_LEN: usize = 200;
pub const MAX_COUNTRY_LEN: usize = 100;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
    #[serde(rename = "Year-round")]
    YearRound,
}

impl Season {
    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Autumn => "Autumn",
            Season::Winter => "Winter",
            Season::YearRound => "Year-round",
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Destination {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub country: String,
    pub description: String,
    pub avg_budget: u32,
    pub best_season: Season,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl std::fmt::Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.name, self.country)
    }
}

/// Fields accepted when creating or editing a destination.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DestinationInput {
    pub name: String,
    pub country: String,
    pub description: String,
    pub avg_budget: u32,
    pub best_season: Season,
}

impl DestinationInput {
    pub fn validate(&self) -> Result<(), String> {
        let name = self.name.trim();
        if name.is_empty() || name.chars().count() > MAX_NAME_LEN {
            return Err(format!("Name must be between 1 and {} characters.", MAX_NAME_LEN));
        }
        let country = self.country.trim();
        if country.is_empty() || country.chars().count() > MAX_COUNTRY_LEN {
            return Err(format!(
                "Country must be between 1 and {} characters.",
                MAX_COUNTRY_LEN
            ));
        }
        if self.avg_budget == 0 {
            return Err("Average budget must be a positive amount.".to_string());
        }
        Ok(())
    }
}
