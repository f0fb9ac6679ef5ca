use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// A payload returned by one assistant operation. `FIELD` names the key that
/// carries the generated text, and is emitted as `null` on failure.
pub trait AiPayload: Serialize {
    const FIELD: &'static str;
}

/// Tagged outcome of an assistant call. Callers branch on `success` instead of
/// handling errors.
#[derive(Debug, Clone, PartialEq)]
pub enum AiResult<T> {
    Success(T),
    Failure { error: String },
}

impl<T> AiResult<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, AiResult::Success(_))
    }

    pub fn payload(&self) -> Option<&T> {
        match self {
            AiResult::Success(payload) => Some(payload),
            AiResult::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            AiResult::Success(_) => None,
            AiResult::Failure { error } => Some(error),
        }
    }
}

impl<T: AiPayload> Serialize for AiResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AiResult::Success(payload) => {
                #[derive(Serialize)]
                struct Wire<'a, P> {
                    success: bool,
                    #[serde(flatten)]
                    payload: &'a P,
                }
                Wire {
                    success: true,
                    payload,
                }
                .serialize(serializer)
            }
            AiResult::Failure { error } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("success", &false)?;
                map.serialize_entry("error", error)?;
                map.serialize_entry(T::FIELD, &Option::<String>::None)?;
                map.end()
            }
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Recommendations {
    pub recommendations: String,
    pub query: String,
}

impl AiPayload for Recommendations {
    const FIELD: &'static str = "recommendations";
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ItineraryDraft {
    pub itinerary: String,
    pub destination: String,
    pub days: u32,
}

impl AiPayload for ItineraryDraft {
    const FIELD: &'static str = "itinerary";
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct EnhancedDescription {
    pub enhanced_description: String,
}

impl AiPayload for EnhancedDescription {
    const FIELD: &'static str = "enhanced_description";
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct TravelTips {
    pub tips: String,
    pub destination: String,
}

impl AiPayload for TravelTips {
    const FIELD: &'static str = "tips";
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct TravelAnswer {
    pub answer: String,
    pub question: String,
}

impl AiPayload for TravelAnswer {
    const FIELD: &'static str = "answer";
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct AiStatus {
    pub available: bool,
    pub models: Vec<String>,
    pub message: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AssistantAction {
    #[default]
    Recommend,
    Question,
}

#[derive(Debug, Deserialize)]
pub struct AssistantRequest {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub action: AssistantAction,
    #[serde(default)]
    pub context: Option<String>,
}

/// Planner form fields arrive as text; `days` is parsed by the handler.
#[derive(Debug, Deserialize)]
pub struct PlannerRequest {
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub days: String,
    #[serde(default)]
    pub interests: String,
}

#[derive(Debug, Deserialize)]
pub struct EnhanceRequest {
    pub destination_name: String,
    pub description: String,
}
