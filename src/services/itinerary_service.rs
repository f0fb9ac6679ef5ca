use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use mongodb::bson::oid::ObjectId;

use crate::db::{DayPlanRepository, DestinationRepository, ItineraryRepository};
use crate::error::AppError;
use crate::models::{
    day_plan::{DayPlan, DayPlanInput, NextDay},
    itinerary::{
        end_date, Itinerary, ItineraryDetail, ItineraryInput, ItinerarySummary, MAX_TITLE_LEN,
    },
};

/// Rejects day numbers outside `1..=days`.
pub fn validate_day_number(day_number: u32, days: u32) -> Result<(), AppError> {
    if day_number == 0 {
        return Err(AppError::Validation(
            "Day number must be at least 1.".to_string(),
        ));
    }
    if day_number > days {
        return Err(AppError::Validation(format!(
            "Day number cannot exceed {} days.",
            days
        )));
    }
    Ok(())
}

/// First day in `1..=days` without a plan, or `None` once every day is
/// planned.
pub fn next_open_day(days: u32, used: impl IntoIterator<Item = u32>) -> Option<u32> {
    let used: Vec<u32> = used.into_iter().collect();
    (1..=days).find(|day| !used.contains(day))
}

fn validate_plan_text(plan: &str) -> Result<(), AppError> {
    if plan.trim().is_empty() {
        return Err(AppError::Validation("Plan must not be empty.".to_string()));
    }
    Ok(())
}

fn validate_itinerary_input(input: &ItineraryInput) -> Result<ObjectId, AppError> {
    let title = input.title.trim();
    if title.is_empty() || title.chars().count() > MAX_TITLE_LEN {
        return Err(AppError::Validation(format!(
            "Title must be between 1 and {} characters.",
            MAX_TITLE_LEN
        )));
    }
    if input.days == 0 {
        return Err(AppError::Validation(
            "A trip must last at least 1 day.".to_string(),
        ));
    }
    if end_date(input.start_date, input.days).is_none() {
        return Err(AppError::Validation(
            "The trip would end past the last supported date.".to_string(),
        ));
    }
    ObjectId::parse_str(&input.destination)
        .map_err(|_| AppError::Validation("Select a valid destination.".to_string()))
}

/// Ownership-checked access to itineraries and their day plans. Records owned
/// by another user are reported as missing.
#[derive(Clone)]
pub struct ItineraryService {
    destinations: Arc<dyn DestinationRepository>,
    itineraries: Arc<dyn ItineraryRepository>,
    day_plans: Arc<dyn DayPlanRepository>,
}

impl ItineraryService {
    pub fn new(
        destinations: Arc<dyn DestinationRepository>,
        itineraries: Arc<dyn ItineraryRepository>,
        day_plans: Arc<dyn DayPlanRepository>,
    ) -> Self {
        Self {
            destinations,
            itineraries,
            day_plans,
        }
    }

    pub async fn list(&self, user_id: &str) -> Result<Vec<ItinerarySummary>, AppError> {
        let itineraries = self.itineraries.list_for_user(user_id).await?;

        let mut names: HashMap<ObjectId, String> = HashMap::new();
        let mut summaries = Vec::with_capacity(itineraries.len());
        for itinerary in itineraries {
            let destination_name = match names.get(&itinerary.destination_id) {
                Some(name) => name.clone(),
                None => {
                    let name = self.destination_name(itinerary.destination_id).await?;
                    names.insert(itinerary.destination_id, name.clone());
                    name
                }
            };
            summaries.push(ItinerarySummary {
                end_date: itinerary.end_date(),
                destination_name,
                itinerary,
            });
        }
        Ok(summaries)
    }

    pub async fn create(
        &self,
        user_id: &str,
        input: ItineraryInput,
    ) -> Result<Itinerary, AppError> {
        let destination_id = self.checked_destination(&input).await?;

        let now = Utc::now();
        let itinerary = self
            .itineraries
            .create(Itinerary {
                id: None,
                user_id: user_id.to_string(),
                destination_id,
                title: input.title.trim().to_string(),
                start_date: input.start_date,
                days: input.days,
                created_at: Some(now),
                updated_at: Some(now),
            })
            .await?;

        log::info!("User {} created itinerary {:?}", user_id, itinerary.id);
        Ok(itinerary)
    }

    pub async fn detail(&self, user_id: &str, id: ObjectId) -> Result<ItineraryDetail, AppError> {
        let itinerary = self.owned(user_id, id).await?;
        let day_plans = self.day_plans.list_for_itinerary(id).await?;
        let destination_name = self.destination_name(itinerary.destination_id).await?;

        Ok(ItineraryDetail {
            end_date: itinerary.end_date(),
            destination_name,
            day_plans,
            itinerary,
        })
    }

    /// Applies an edit. Shrinking `days` below an already planned day is
    /// rejected so every plan stays inside the trip.
    pub async fn update(
        &self,
        user_id: &str,
        id: ObjectId,
        input: ItineraryInput,
    ) -> Result<Itinerary, AppError> {
        let mut itinerary = self.owned(user_id, id).await?;
        let destination_id = self.checked_destination(&input).await?;

        let latest_planned = self
            .day_plans
            .list_for_itinerary(id)
            .await?
            .iter()
            .map(|plan| plan.day_number)
            .max();
        if let Some(day) = latest_planned {
            if day > input.days {
                return Err(AppError::Validation(format!(
                    "Day {} already has a plan; the trip must last at least {} days.",
                    day, day
                )));
            }
        }

        itinerary.destination_id = destination_id;
        itinerary.title = input.title.trim().to_string();
        itinerary.start_date = input.start_date;
        itinerary.days = input.days;
        itinerary.updated_at = Some(Utc::now());

        if !self.itineraries.update(&itinerary).await? {
            return Err(AppError::NotFound("Itinerary"));
        }
        Ok(itinerary)
    }

    /// Deletes the itinerary with all of its day plans.
    pub async fn delete(&self, user_id: &str, id: ObjectId) -> Result<(), AppError> {
        self.owned(user_id, id).await?;
        if !self.itineraries.delete(id).await? {
            return Err(AppError::NotFound("Itinerary"));
        }
        log::info!("User {} deleted itinerary {}", user_id, id);
        Ok(())
    }

    pub async fn next_day(&self, user_id: &str, itinerary_id: ObjectId) -> Result<NextDay, AppError> {
        let itinerary = self.owned(user_id, itinerary_id).await?;
        let plans = self.day_plans.list_for_itinerary(itinerary_id).await?;
        Ok(next_open_day(itinerary.days, plans.iter().map(|plan| plan.day_number)).into())
    }

    pub async fn add_day_plan(
        &self,
        user_id: &str,
        itinerary_id: ObjectId,
        input: DayPlanInput,
    ) -> Result<DayPlan, AppError> {
        let itinerary = self.owned(user_id, itinerary_id).await?;
        validate_day_number(input.day_number, itinerary.days)?;
        validate_plan_text(&input.plan)?;

        let now = Utc::now();
        let day_plan = self
            .day_plans
            .create(DayPlan {
                id: None,
                itinerary_id,
                day_number: input.day_number,
                plan: input.plan,
                created_at: Some(now),
                updated_at: Some(now),
            })
            .await?;
        Ok(day_plan)
    }

    pub async fn update_day_plan(
        &self,
        user_id: &str,
        id: ObjectId,
        input: DayPlanInput,
    ) -> Result<DayPlan, AppError> {
        let (mut day_plan, itinerary) = self.owned_day_plan(user_id, id).await?;
        validate_day_number(input.day_number, itinerary.days)?;
        validate_plan_text(&input.plan)?;

        day_plan.day_number = input.day_number;
        day_plan.plan = input.plan;
        day_plan.updated_at = Some(Utc::now());

        if !self.day_plans.update(&day_plan).await? {
            return Err(AppError::NotFound("Day plan"));
        }
        Ok(day_plan)
    }

    pub async fn delete_day_plan(&self, user_id: &str, id: ObjectId) -> Result<(), AppError> {
        self.owned_day_plan(user_id, id).await?;
        if !self.day_plans.delete(id).await? {
            return Err(AppError::NotFound("Day plan"));
        }
        Ok(())
    }

    async fn owned(&self, user_id: &str, id: ObjectId) -> Result<Itinerary, AppError> {
        match self.itineraries.get(id).await? {
            Some(itinerary) if itinerary.user_id == user_id => Ok(itinerary),
            Some(_) => {
                log::warn!("User {} denied access to itinerary {}", user_id, id);
                Err(AppError::NotFound("Itinerary"))
            }
            None => Err(AppError::NotFound("Itinerary")),
        }
    }

    async fn owned_day_plan(
        &self,
        user_id: &str,
        id: ObjectId,
    ) -> Result<(DayPlan, Itinerary), AppError> {
        let day_plan = self
            .day_plans
            .get(id)
            .await?
            .ok_or(AppError::NotFound("Day plan"))?;
        let itinerary = self
            .owned(user_id, day_plan.itinerary_id)
            .await
            .map_err(|err| match err {
                AppError::NotFound(_) => AppError::NotFound("Day plan"),
                other => other,
            })?;
        Ok((day_plan, itinerary))
    }

    async fn checked_destination(&self, input: &ItineraryInput) -> Result<ObjectId, AppError> {
        let destination_id = validate_itinerary_input(input)?;
        if self.destinations.get(destination_id).await?.is_none() {
            return Err(AppError::Validation(
                "Select a valid destination.".to_string(),
            ));
        }
        Ok(destination_id)
    }

    async fn destination_name(&self, id: ObjectId) -> Result<String, AppError> {
        Ok(self
            .destinations
            .get(id)
            .await?
            .map(|destination| destination.name)
            .unwrap_or_default())
    }
}
