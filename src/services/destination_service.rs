use std::sync::Arc;

use chrono::Utc;
use mongodb::bson::oid::ObjectId;

use crate::db::DestinationRepository;
use crate::error::AppError;
use crate::models::destination::{Destination, DestinationInput};

#[derive(Clone)]
pub struct DestinationService {
    destinations: Arc<dyn DestinationRepository>,
}

impl DestinationService {
    pub fn new(destinations: Arc<dyn DestinationRepository>) -> Self {
        Self { destinations }
    }

    pub async fn list(
        &self,
        search: Option<&str>,
        limit: Option<u16>,
    ) -> Result<Vec<Destination>, AppError> {
        Ok(self.destinations.list(search, limit).await?)
    }

    pub async fn get(&self, id: ObjectId) -> Result<Destination, AppError> {
        self.destinations
            .get(id)
            .await?
            .ok_or(AppError::NotFound("Destination"))
    }

    pub async fn create(&self, input: DestinationInput) -> Result<Destination, AppError> {
        input.validate().map_err(AppError::Validation)?;

        let now = Utc::now();
        let destination = self
            .destinations
            .create(Destination {
                id: None,
                name: input.name.trim().to_string(),
                country: input.country.trim().to_string(),
                description: input.description,
                avg_budget: input.avg_budget,
                best_season: input.best_season,
                created_at: Some(now),
                updated_at: Some(now),
            })
            .await?;
        log::info!("Created destination {}", destination);
        Ok(destination)
    }

    pub async fn update(
        &self,
        id: ObjectId,
        input: DestinationInput,
    ) -> Result<Destination, AppError> {
        input.validate().map_err(AppError::Validation)?;

        let mut destination = self.get(id).await?;
        destination.name = input.name.trim().to_string();
        destination.country = input.country.trim().to_string();
        destination.description = input.description;
        destination.avg_budget = input.avg_budget;
        destination.best_season = input.best_season;
        destination.updated_at = Some(Utc::now());

        if !self.destinations.update(&destination).await? {
            return Err(AppError::NotFound("Destination"));
        }
        Ok(destination)
    }

    /// Removes the destination and every itinerary planned for it.
    pub async fn delete(&self, id: ObjectId) -> Result<(), AppError> {
        if !self.destinations.delete(id).await? {
            return Err(AppError::NotFound("Destination"));
        }
        log::info!("Deleted destination {}", id);
        Ok(())
    }
}
