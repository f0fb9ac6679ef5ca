use mongodb::bson::oid::ObjectId;

use crate::error::AppError;

pub mod admin;
pub mod ai;
pub mod day_plan;
pub mod destination;
pub mod health;
pub mod itinerary;
pub mod weather;

pub(crate) fn parse_id(raw: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw).map_err(|_| AppError::Validation("Invalid ID".to_string()))
}
