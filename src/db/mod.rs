use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use thiserror::Error;

use crate::models::{day_plan::DayPlan, destination::Destination, itinerary::Itinerary};

pub mod memory;
pub mod mongo;
pub mod seed;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),
}

/// Liveness of the backing store, reported by the health endpoint.
#[async_trait]
pub trait StoreHealth: Send + Sync {
    async fn ping(&self) -> Result<(), StoreError>;

    fn backend(&self) -> &'static str;
}

#[async_trait]
pub trait DestinationRepository: Send + Sync {
    /// Destinations ordered by name. `search` is a case-insensitive name prefix;
    /// a `limit` of 0 means no limit, as in MongoDB.
    async fn list(
        &self,
        search: Option<&str>,
        limit: Option<u16>,
    ) -> Result<Vec<Destination>, StoreError>;

    async fn get(&self, id: ObjectId) -> Result<Option<Destination>, StoreError>;

    async fn find_by_name(
        &self,
        name: &str,
        country: &str,
    ) -> Result<Option<Destination>, StoreError>;

    /// Fails with `Conflict` when (name, country) is taken.
    async fn create(&self, destination: Destination) -> Result<Destination, StoreError>;

    async fn update(&self, destination: &Destination) -> Result<bool, StoreError>;

    /// Removes the destination together with every itinerary that references
    /// it and those itineraries' day plans.
    async fn delete(&self, id: ObjectId) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait ItineraryRepository: Send + Sync {
    /// The user's itineraries, newest first.
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Itinerary>, StoreError>;

    async fn get(&self, id: ObjectId) -> Result<Option<Itinerary>, StoreError>;

    async fn create(&self, itinerary: Itinerary) -> Result<Itinerary, StoreError>;

    async fn update(&self, itinerary: &Itinerary) -> Result<bool, StoreError>;

    /// Removes the itinerary and all of its day plans.
    async fn delete(&self, id: ObjectId) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait DayPlanRepository: Send + Sync {
    /// Plans of one itinerary ordered by day number.
    async fn list_for_itinerary(&self, itinerary_id: ObjectId) -> Result<Vec<DayPlan>, StoreError>;

    async fn get(&self, id: ObjectId) -> Result<Option<DayPlan>, StoreError>;

    /// Fails with `Conflict` when the itinerary already has a plan for that day.
    async fn create(&self, day_plan: DayPlan) -> Result<DayPlan, StoreError>;

    /// Same uniqueness rule as `create`, ignoring the plan being edited.
    async fn update(&self, day_plan: &DayPlan) -> Result<bool, StoreError>;

    async fn delete(&self, id: ObjectId) -> Result<bool, StoreError>;
}

pub(crate) fn duplicate_day_message(day_number: u32) -> String {
    format!("Day {} already has a plan in this itinerary.", day_number)
}

pub(crate) fn duplicate_destination_message(name: &str, country: &str) -> String {
    format!("Destination {}, {} already exists.", name, country)
}
