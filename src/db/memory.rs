use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::db::{
    duplicate_day_message, duplicate_destination_message, DayPlanRepository,
    DestinationRepository, ItineraryRepository, StoreError, StoreHealth,
};
use crate::models::{day_plan::DayPlan, destination::Destination, itinerary::Itinerary};

#[derive(Default)]
struct Tables {
    destinations: Vec<Destination>,
    itineraries: Vec<Itinerary>,
    day_plans: Vec<DayPlan>,
}

impl Tables {
    fn drop_itinerary(&mut self, id: ObjectId) -> bool {
        self.day_plans.retain(|plan| plan.itinerary_id != id);
        let before = self.itineraries.len();
        self.itineraries.retain(|itinerary| itinerary.id != Some(id));
        self.itineraries.len() != before
    }
}

/// Process-local store with the same constraints as the MongoDB one. Used by
/// the test suite and for running the API without a database.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl StoreHealth for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[async_trait]
impl DestinationRepository for MemoryStore {
    async fn list(
        &self,
        search: Option<&str>,
        limit: Option<u16>,
    ) -> Result<Vec<Destination>, StoreError> {
        let prefix = search.map(str::to_lowercase).unwrap_or_default();
        let mut destinations: Vec<Destination> = self
            .tables()
            .destinations
            .iter()
            .filter(|d| d.name.to_lowercase().starts_with(&prefix))
            .cloned()
            .collect();
        destinations.sort_by(|a, b| a.name.cmp(&b.name));
        if let Some(limit) = limit.filter(|limit| *limit > 0) {
            destinations.truncate(usize::from(limit));
        }
        Ok(destinations)
    }

    async fn get(&self, id: ObjectId) -> Result<Option<Destination>, StoreError> {
        Ok(self
            .tables()
            .destinations
            .iter()
            .find(|d| d.id == Some(id))
            .cloned())
    }

    async fn find_by_name(
        &self,
        name: &str,
        country: &str,
    ) -> Result<Option<Destination>, StoreError> {
        Ok(self
            .tables()
            .destinations
            .iter()
            .find(|d| d.name == name && d.country == country)
            .cloned())
    }

    async fn create(&self, mut destination: Destination) -> Result<Destination, StoreError> {
        let mut tables = self.tables();
        if tables
            .destinations
            .iter()
            .any(|d| d.name == destination.name && d.country == destination.country)
        {
            return Err(StoreError::Conflict(duplicate_destination_message(
                &destination.name,
                &destination.country,
            )));
        }
        destination.id = Some(ObjectId::new());
        tables.destinations.push(destination.clone());
        Ok(destination)
    }

    async fn update(&self, destination: &Destination) -> Result<bool, StoreError> {
        let mut tables = self.tables();
        if tables.destinations.iter().any(|d| {
            d.id != destination.id && d.name == destination.name && d.country == destination.country
        }) {
            return Err(StoreError::Conflict(duplicate_destination_message(
                &destination.name,
                &destination.country,
            )));
        }
        match tables
            .destinations
            .iter_mut()
            .find(|d| d.id.is_some() && d.id == destination.id)
        {
            Some(existing) => {
                *existing = destination.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, StoreError> {
        let mut tables = self.tables();
        let orphaned: Vec<ObjectId> = tables
            .itineraries
            .iter()
            .filter(|itinerary| itinerary.destination_id == id)
            .filter_map(|itinerary| itinerary.id)
            .collect();
        for itinerary_id in orphaned {
            tables.drop_itinerary(itinerary_id);
        }

        let before = tables.destinations.len();
        tables.destinations.retain(|d| d.id != Some(id));
        Ok(tables.destinations.len() != before)
    }
}

#[async_trait]
impl ItineraryRepository for MemoryStore {
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Itinerary>, StoreError> {
        let tables = self.tables();
        // Insertion order is creation order, so reversing yields newest first.
        Ok(tables
            .itineraries
            .iter()
            .rev()
            .filter(|itinerary| itinerary.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn get(&self, id: ObjectId) -> Result<Option<Itinerary>, StoreError> {
        Ok(self
            .tables()
            .itineraries
            .iter()
            .find(|itinerary| itinerary.id == Some(id))
            .cloned())
    }

    async fn create(&self, mut itinerary: Itinerary) -> Result<Itinerary, StoreError> {
        itinerary.id = Some(ObjectId::new());
        self.tables().itineraries.push(itinerary.clone());
        Ok(itinerary)
    }

    async fn update(&self, itinerary: &Itinerary) -> Result<bool, StoreError> {
        let mut tables = self.tables();
        match tables
            .itineraries
            .iter_mut()
            .find(|existing| existing.id.is_some() && existing.id == itinerary.id)
        {
            Some(existing) => {
                *existing = itinerary.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, StoreError> {
        Ok(self.tables().drop_itinerary(id))
    }
}

#[async_trait]
impl DayPlanRepository for MemoryStore {
    async fn list_for_itinerary(&self, itinerary_id: ObjectId) -> Result<Vec<DayPlan>, StoreError> {
        let mut plans: Vec<DayPlan> = self
            .tables()
            .day_plans
            .iter()
            .filter(|plan| plan.itinerary_id == itinerary_id)
            .cloned()
            .collect();
        plans.sort_by_key(|plan| plan.day_number);
        Ok(plans)
    }

    async fn get(&self, id: ObjectId) -> Result<Option<DayPlan>, StoreError> {
        Ok(self
            .tables()
            .day_plans
            .iter()
            .find(|plan| plan.id == Some(id))
            .cloned())
    }

    async fn create(&self, mut day_plan: DayPlan) -> Result<DayPlan, StoreError> {
        let mut tables = self.tables();
        if tables.day_plans.iter().any(|plan| {
            plan.itinerary_id == day_plan.itinerary_id && plan.day_number == day_plan.day_number
        }) {
            return Err(StoreError::Conflict(duplicate_day_message(day_plan.day_number)));
        }
        day_plan.id = Some(ObjectId::new());
        tables.day_plans.push(day_plan.clone());
        Ok(day_plan)
    }

    async fn update(&self, day_plan: &DayPlan) -> Result<bool, StoreError> {
        let mut tables = self.tables();
        if tables.day_plans.iter().any(|plan| {
            plan.id != day_plan.id
                && plan.itinerary_id == day_plan.itinerary_id
                && plan.day_number == day_plan.day_number
        }) {
            return Err(StoreError::Conflict(duplicate_day_message(day_plan.day_number)));
        }
        match tables
            .day_plans
            .iter_mut()
            .find(|plan| plan.id.is_some() && plan.id == day_plan.id)
        {
            Some(existing) => {
                *existing = day_plan.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, StoreError> {
        let mut tables = self.tables();
        let before = tables.day_plans.len();
        tables.day_plans.retain(|plan| plan.id != Some(id));
        Ok(tables.day_plans.len() != before)
    }
}
