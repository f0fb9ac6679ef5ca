use chrono::{DateTime, Days, NaiveDate, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::models::day_plan::DayPlan;

pub const MAX_TITLE_LEN: usize = 200;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Itinerary {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: String,
    pub destination_id: ObjectId,
    pub title: String,
    pub start_date: NaiveDate,
    pub days: u32,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Itinerary {
    /// `None` only for a trip whose last day is past the calendar range, which
    /// validation never stores.
    pub fn end_date(&self) -> Option<NaiveDate> {
        end_date(self.start_date, self.days)
    }
}

/// Last calendar day of a trip: `start + (days - 1)`, or `None` when that day
/// cannot be represented. A zero-day trip ends on its start date.
pub fn end_date(start: NaiveDate, days: u32) -> Option<NaiveDate> {
    let span = u64::from(days.saturating_sub(1));
    start.checked_add_days(Days::new(span))
}

/// Body of an itinerary create or edit request.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ItineraryInput {
    pub destination: String,
    pub title: String,
    pub start_date: NaiveDate,
    pub days: u32,
}

#[derive(Debug, Serialize, Clone)]
pub struct ItinerarySummary {
    #[serde(flatten)]
    pub itinerary: Itinerary,
    pub destination_name: String,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Clone)]
pub struct ItineraryDetail {
    #[serde(flatten)]
    pub itinerary: Itinerary,
    pub destination_name: String,
    pub end_date: Option<NaiveDate>,
    pub day_plans: Vec<DayPlan>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn single_day_trip_ends_on_start() {
        assert_eq!(end_date(date(2026, 3, 14), 1), Some(date(2026, 3, 14)));
    }

    #[test]
    fn end_date_crosses_month_and_leap_day() {
        assert_eq!(end_date(date(2028, 2, 27), 4), Some(date(2028, 3, 1)));
        assert_eq!(end_date(date(2026, 12, 30), 5), Some(date(2027, 1, 3)));
    }

    #[test]
    fn end_date_is_stable() {
        let start = date(2026, 7, 1);
        assert_eq!(end_date(start, 10), end_date(start, 10));
        assert_eq!(end_date(start, 10), Some(date(2026, 7, 10)));
    }

    #[test]
    fn end_date_past_calendar_range_is_none() {
        assert_eq!(end_date(date(2026, 7, 1), u32::MAX), None);
        assert_eq!(end_date(NaiveDate::MAX, 2), None);
        assert_eq!(end_date(NaiveDate::MAX, 1), Some(NaiveDate::MAX));
    }
}
