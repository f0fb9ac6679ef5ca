use chrono::Utc;

use crate::db::{DestinationRepository, StoreError};
use crate::models::destination::{Destination, DestinationInput, Season};

fn sample(
    name: &str,
    country: &str,
    description: &str,
    avg_budget: u32,
    best_season: Season,
) -> DestinationInput {
    DestinationInput {
        name: name.to_string(),
        country: country.to_string(),
        description: description.to_string(),
        avg_budget,
        best_season,
    }
}

/// Starter catalogue. Budgets are in INR.
pub fn sample_destinations() -> Vec<DestinationInput> {
    vec![
        sample(
            "Paris",
            "France",
            "The City of Light, famous for its art, fashion, gastronomy, and culture. Visit the Eiffel Tower, Louvre Museum, Notre-Dame Cathedral, and enjoy French cuisine at charming cafes.",
            150000,
            Season::Spring,
        ),
        sample(
            "Tokyo",
            "Japan",
            "A vibrant metropolis blending ultra-modern with traditional. Experience bustling shopping districts, historic temples, delicious sushi, and cherry blossoms in spring.",
            180000,
            Season::Spring,
        ),
        sample(
            "Goa",
            "India",
            "India's beach paradise with Portuguese heritage. Beautiful beaches, water sports, nightlife, historic churches, and fresh seafood. Perfect for both relaxation and adventure.",
            40000,
            Season::Winter,
        ),
        sample(
            "Dubai",
            "UAE",
            "A futuristic city in the desert. Visit the Burj Khalifa, luxurious malls, man-made islands, desert safaris, and experience world-class hospitality.",
            100000,
            Season::Winter,
        ),
        sample(
            "Bali",
            "Indonesia",
            "The Island of Gods, known for its forested volcanic mountains, iconic rice paddies, beaches, and coral reefs. Rich culture, ancient temples, and yoga retreats.",
            70000,
            Season::Summer,
        ),
        sample(
            "New York",
            "USA",
            "The city that never sleeps. Iconic landmarks like Statue of Liberty, Times Square, Central Park, Broadway shows, world-class museums, and diverse cuisine.",
            200000,
            Season::Autumn,
        ),
        sample(
            "Kerala",
            "India",
            "God's Own Country with serene backwaters, lush green landscapes, Ayurvedic treatments, wildlife sanctuaries, and beautiful beaches. Experience houseboat cruises and spice plantations.",
            50000,
            Season::Winter,
        ),
        sample(
            "Singapore",
            "Singapore",
            "A modern city-state with stunning architecture, Gardens by the Bay, Marina Bay Sands, diverse food scene, shopping, and efficient public transport.",
            120000,
            Season::YearRound,
        ),
        sample(
            "Maldives",
            "Maldives",
            "Tropical paradise with crystal-clear waters, white sandy beaches, luxury resorts, underwater restaurants, and world-class diving and snorkeling.",
            250000,
            Season::Winter,
        ),
        sample(
            "Jaipur",
            "India",
            "The Pink City of India, rich in history and culture. Visit magnificent forts and palaces like Amber Fort, City Palace, Hawa Mahal, and experience authentic Rajasthani cuisine.",
            35000,
            Season::Winter,
        ),
    ]
}

/// Inserts every sample destination that is not already present and returns
/// how many were created.
pub async fn populate(store: &dyn DestinationRepository) -> Result<usize, StoreError> {
    let mut created = 0;

    for input in sample_destinations() {
        if store.find_by_name(&input.name, &input.country).await?.is_some() {
            log::info!("Already exists: {}, {}", input.name, input.country);
            continue;
        }

        let now = Utc::now();
        let destination = store
            .create(Destination {
                id: None,
                name: input.name,
                country: input.country,
                description: input.description,
                avg_budget: input.avg_budget,
                best_season: input.best_season,
                created_at: Some(now),
                updated_at: Some(now),
            })
            .await?;
        log::info!("Created: {}", destination);
        created += 1;
    }

    Ok(created)
}
