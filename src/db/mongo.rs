use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    error::{ErrorKind, WriteFailure},
    options::{ClientOptions, IndexOptions, ServerApi, ServerApiVersion},
    Client, Collection, Database, IndexModel,
};
use std::time::Duration;

use crate::db::{
    duplicate_day_message, duplicate_destination_message, DayPlanRepository,
    DestinationRepository, ItineraryRepository, StoreError, StoreHealth,
};
use crate::models::{day_plan::DayPlan, destination::Destination, itinerary::Itinerary};

const DESTINATIONS: &str = "destinations";
const ITINERARIES: &str = "itineraries";
const DAY_PLANS: &str = "day_plans";
const DUPLICATE_KEY: i32 = 11000;

pub async fn create_mongo_client(uri: &str) -> Result<Client, mongodb::error::Error> {
    log::info!("Connecting to MongoDB");

    let mut client_options = ClientOptions::parse(uri).await?;

    client_options.connect_timeout = Some(Duration::from_secs(10));
    client_options.server_selection_timeout = Some(Duration::from_secs(10));
    client_options.max_pool_size = Some(10);
    client_options.min_pool_size = Some(1);

    let server_api = ServerApi::builder().version(ServerApiVersion::V1).build();
    client_options.server_api = Some(server_api);

    Client::with_options(client_options)
}

#[derive(Clone)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    pub fn new(client: &Client, database: &str) -> Self {
        Self {
            db: client.database(database),
        }
    }

    /// Creates the unique indexes that back the (name, country) and
    /// (itinerary, day_number) constraints.
    pub async fn ensure_indexes(&self) -> Result<(), StoreError> {
        let unique = IndexOptions::builder().unique(true).build();

        self.destinations()
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "name": 1, "country": 1 })
                    .options(unique.clone())
                    .build(),
            )
            .await?;

        self.day_plans()
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "itinerary_id": 1, "day_number": 1 })
                    .options(unique)
                    .build(),
            )
            .await?;

        self.itineraries()
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "user_id": 1, "created_at": -1 })
                    .build(),
            )
            .await?;

        log::info!("MongoDB indexes ensured");
        Ok(())
    }

    fn destinations(&self) -> Collection<Destination> {
        self.db.collection(DESTINATIONS)
    }

    fn itineraries(&self) -> Collection<Itinerary> {
        self.db.collection(ITINERARIES)
    }

    fn day_plans(&self) -> Collection<DayPlan> {
        self.db.collection(DAY_PLANS)
    }
}

#[async_trait]
impl StoreHealth for MongoStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "mongodb"
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == DUPLICATE_KEY,
        ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY,
        _ => false,
    }
}

fn map_write_error(err: mongodb::error::Error, conflict: impl FnOnce() -> String) -> StoreError {
    if is_duplicate_key(&err) {
        StoreError::Conflict(conflict())
    } else {
        StoreError::Mongo(err)
    }
}

/// Case-insensitive anchored match on `name`; an empty search matches all.
fn name_prefix_filter(search: Option<&str>) -> Document {
    match search {
        Some(search_text) if !search_text.is_empty() => doc! {
            "name": {
                "$regex": format!("^{}", regex::escape(search_text)),
                "$options": "i"
            }
        },
        _ => doc! {},
    }
}

fn inserted_id(result: &mongodb::results::InsertOneResult) -> ObjectId {
    result.inserted_id.as_object_id().unwrap_or_default()
}

#[async_trait]
impl DestinationRepository for MongoStore {
    async fn list(
        &self,
        search: Option<&str>,
        limit: Option<u16>,
    ) -> Result<Vec<Destination>, StoreError> {
        let collection = self.destinations();
        let mut find = collection
            .find(name_prefix_filter(search))
            .sort(doc! { "name": 1 });
        if let Some(limit) = limit.filter(|limit| *limit > 0) {
            find = find.limit(i64::from(limit));
        }
        let cursor = find.await?;
        Ok(cursor.try_collect().await?)
    }

    async fn get(&self, id: ObjectId) -> Result<Option<Destination>, StoreError> {
        Ok(self.destinations().find_one(doc! { "_id": id }).await?)
    }

    async fn find_by_name(
        &self,
        name: &str,
        country: &str,
    ) -> Result<Option<Destination>, StoreError> {
        Ok(self
            .destinations()
            .find_one(doc! { "name": name, "country": country })
            .await?)
    }

    async fn create(&self, mut destination: Destination) -> Result<Destination, StoreError> {
        destination.id = None;
        let result = self
            .destinations()
            .insert_one(&destination)
            .await
            .map_err(|e| {
                map_write_error(e, || {
                    duplicate_destination_message(&destination.name, &destination.country)
                })
            })?;
        destination.id = Some(inserted_id(&result));
        Ok(destination)
    }

    async fn update(&self, destination: &Destination) -> Result<bool, StoreError> {
        let Some(id) = destination.id else {
            return Ok(false);
        };
        let result = self
            .destinations()
            .replace_one(doc! { "_id": id }, destination)
            .await
            .map_err(|e| {
                map_write_error(e, || {
                    duplicate_destination_message(&destination.name, &destination.country)
                })
            })?;
        Ok(result.matched_count > 0)
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, StoreError> {
        let itinerary_ids: Vec<ObjectId> = self
            .itineraries()
            .find(doc! { "destination_id": id })
            .await?
            .try_collect::<Vec<Itinerary>>()
            .await?
            .into_iter()
            .filter_map(|itinerary| itinerary.id)
            .collect();

        if !itinerary_ids.is_empty() {
            self.day_plans()
                .delete_many(doc! { "itinerary_id": { "$in": itinerary_ids } })
                .await?;
            self.itineraries()
                .delete_many(doc! { "destination_id": id })
                .await?;
        }

        let result = self.destinations().delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}

#[async_trait]
impl ItineraryRepository for MongoStore {
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Itinerary>, StoreError> {
        let cursor = self
            .itineraries()
            .find(doc! { "user_id": user_id })
            .sort(doc! { "created_at": -1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn get(&self, id: ObjectId) -> Result<Option<Itinerary>, StoreError> {
        Ok(self.itineraries().find_one(doc! { "_id": id }).await?)
    }

    async fn create(&self, mut itinerary: Itinerary) -> Result<Itinerary, StoreError> {
        itinerary.id = None;
        let result = self.itineraries().insert_one(&itinerary).await?;
        itinerary.id = Some(inserted_id(&result));
        Ok(itinerary)
    }

    async fn update(&self, itinerary: &Itinerary) -> Result<bool, StoreError> {
        let Some(id) = itinerary.id else {
            return Ok(false);
        };
        let result = self
            .itineraries()
            .replace_one(doc! { "_id": id }, itinerary)
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, StoreError> {
        let removed = self
            .day_plans()
            .delete_many(doc! { "itinerary_id": id })
            .await?;
        log::debug!(
            "Removed {} day plans of itinerary {}",
            removed.deleted_count,
            id
        );

        let result = self.itineraries().delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}

#[async_trait]
impl DayPlanRepository for MongoStore {
    async fn list_for_itinerary(&self, itinerary_id: ObjectId) -> Result<Vec<DayPlan>, StoreError> {
        let cursor = self
            .day_plans()
            .find(doc! { "itinerary_id": itinerary_id })
            .sort(doc! { "day_number": 1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn get(&self, id: ObjectId) -> Result<Option<DayPlan>, StoreError> {
        Ok(self.day_plans().find_one(doc! { "_id": id }).await?)
    }

    async fn create(&self, mut day_plan: DayPlan) -> Result<DayPlan, StoreError> {
        day_plan.id = None;
        let day_number = day_plan.day_number;
        let result = self
            .day_plans()
            .insert_one(&day_plan)
            .await
            .map_err(|e| map_write_error(e, || duplicate_day_message(day_number)))?;
        day_plan.id = Some(inserted_id(&result));
        Ok(day_plan)
    }

    async fn update(&self, day_plan: &DayPlan) -> Result<bool, StoreError> {
        let Some(id) = day_plan.id else {
            return Ok(false);
        };
        let result = self
            .day_plans()
            .replace_one(doc! { "_id": id }, day_plan)
            .await
            .map_err(|e| map_write_error(e, || duplicate_day_message(day_plan.day_number)))?;
        Ok(result.matched_count > 0)
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, StoreError> {
        let result = self.day_plans().delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}
