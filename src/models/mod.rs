pub mod ai;
pub mod day_plan;
pub mod destination;
pub mod itinerary;
pub mod weather;
