pub mod ai_assistant_service;
pub mod destination_service;
pub mod itinerary_service;
pub mod weather_service;
