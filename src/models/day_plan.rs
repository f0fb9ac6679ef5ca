use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DayPlan {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub itinerary_id: ObjectId,
    pub day_number: u32,
    pub plan: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DayPlanInput {
    pub day_number: u32,
    pub plan: String,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct NextDay {
    pub next_day: Option<u32>,
    pub fully_planned: bool,
}

impl From<Option<u32>> for NextDay {
    fn from(next_day: Option<u32>) -> Self {
        Self {
            next_day,
            fully_planned: next_day.is_none(),
        }
    }
}
