use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AiConfig;
use crate::models::ai::{
    AiResult, AiStatus, EnhancedDescription, ItineraryDraft, Recommendations, TravelAnswer,
    TravelTips,
};

pub const TEMPERATURE: f32 = 0.7;
pub const RECOMMENDATION_TOKENS: u32 = 1024;
pub const ITINERARY_TOKENS: u32 = 2048;
pub const DESCRIPTION_TOKENS: u32 = 512;
pub const TIPS_TOKENS: u32 = 1024;
pub const ANSWER_TOKENS: u32 = 1024;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("Groq API key not configured")]
    NotConfigured,

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// A hosted chat-completion endpoint.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Returns the generated text of the first choice.
    async fn complete(&self, request: ChatRequest) -> Result<String, AiError>;
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

/// Groq's OpenAI-compatible `/chat/completions` API.
pub struct GroqChatClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl GroqChatClient {
    pub fn new(config: &AiConfig) -> Result<Self, AiError> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ChatCompletion for GroqChatClient {
    async fn complete(&self, request: ChatRequest) -> Result<String, AiError> {
        let api_key = self.api_key.as_deref().ok_or(AiError::NotConfigured)?;
        log::debug!(
            "Requesting chat completion: model={}, max_tokens={}",
            request.model,
            request.max_tokens
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: CompletionResponse = response
            .json()
            .await
            .map_err(|e| AiError::InvalidResponse(e.to_string()))?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AiError::InvalidResponse("response has no message content".to_string()))
    }
}

pub fn recommendations_prompt(user_query: &str) -> String {
    format!(
        "You are a travel expert assistant. A user wants travel recommendations.

User Query: {user_query}

Based on this query, suggest 3-5 travel destinations with brief descriptions. Format your response as:

DESTINATION: [Name, Country]
REASON: [Why this destination fits their query]
BEST_TIME: [Best season to visit]
BUDGET: [Rough budget range in INR]

Keep each recommendation concise and focused."
    )
}

pub fn itinerary_prompt(destination: &str, days: u32, interests: &str) -> String {
    format!(
        "You are a travel planning expert. Create a detailed {days}-day itinerary for {destination}.

User Interests: {interests}

Create a day-by-day plan with:
- Morning, afternoon, and evening activities
- Must-visit attractions
- Local food recommendations
- Travel tips

Format as:
DAY 1:
Morning: [Activity]
Afternoon: [Activity]
Evening: [Activity]

DAY 2:
[Continue...]

Be specific and practical."
    )
}

pub fn description_prompt(destination_name: &str, current_description: &str) -> String {
    format!(
        "You are a travel writer. Enhance this destination description with interesting facts and tips.

Destination: {destination_name}
Current Description: {current_description}

Add 2-3 unique insights or travel tips that tourists should know. Keep it under 100 words."
    )
}

pub fn tips_prompt(destination: &str, season: &str) -> String {
    format!(
        "You are a travel advisor. Provide 5 practical travel tips for visiting {destination} during {season}.

Include tips about:
- What to pack
- Local customs
- Safety considerations
- Money-saving advice
- Must-try experiences

Keep each tip brief and actionable."
    )
}

pub fn question_prompt(question: &str, context: Option<&str>) -> String {
    let context_text = match context {
        Some(context) if !context.is_empty() => format!("\nContext: {}", context),
        _ => String::new(),
    };
    format!(
        "You are a helpful travel assistant. Answer this travel question clearly and concisely.

Question: {question}{context_text}

Provide a helpful, accurate response in 2-3 paragraphs."
    )
}

/// Travel assistant operations over a chat-completion backend. No operation
/// returns an error: failures become `AiResult::Failure`.
#[derive(Clone)]
pub struct TravelAssistant {
    chat: Arc<dyn ChatCompletion>,
    model: String,
    configured: bool,
}

impl TravelAssistant {
    pub fn new(chat: Arc<dyn ChatCompletion>, config: &AiConfig) -> Self {
        Self {
            chat,
            model: config.model.clone(),
            configured: config.api_key.is_some(),
        }
    }

    pub fn from_config(config: &AiConfig) -> Result<Self, AiError> {
        let chat = GroqChatClient::new(config)?;
        Ok(Self::new(Arc::new(chat), config))
    }

    /// Reports whether a credential is configured. Makes no network call.
    pub fn status(&self) -> AiStatus {
        if self.configured {
            AiStatus {
                available: true,
                models: vec![self.model.clone()],
                message: "Groq API is configured".to_string(),
            }
        } else {
            AiStatus {
                available: false,
                models: Vec::new(),
                message: "Groq API key not configured".to_string(),
            }
        }
    }

    pub async fn recommend_destinations(&self, user_query: &str) -> AiResult<Recommendations> {
        self.run(recommendations_prompt(user_query), RECOMMENDATION_TOKENS, |text| {
            Recommendations {
                recommendations: text,
                query: user_query.to_string(),
            }
        })
        .await
    }

    pub async fn generate_itinerary(
        &self,
        destination: &str,
        days: u32,
        interests: &str,
    ) -> AiResult<ItineraryDraft> {
        self.run(
            itinerary_prompt(destination, days, interests),
            ITINERARY_TOKENS,
            |text| ItineraryDraft {
                itinerary: text,
                destination: destination.to_string(),
                days,
            },
        )
        .await
    }

    pub async fn enhance_description(
        &self,
        destination_name: &str,
        current_description: &str,
    ) -> AiResult<EnhancedDescription> {
        self.run(
            description_prompt(destination_name, current_description),
            DESCRIPTION_TOKENS,
            |text| EnhancedDescription {
                enhanced_description: text,
            },
        )
        .await
    }

    pub async fn travel_tips(&self, destination: &str, season: &str) -> AiResult<TravelTips> {
        self.run(tips_prompt(destination, season), TIPS_TOKENS, |text| TravelTips {
            tips: text,
            destination: destination.to_string(),
        })
        .await
    }

    pub async fn answer_question(
        &self,
        question: &str,
        context: Option<&str>,
    ) -> AiResult<TravelAnswer> {
        self.run(question_prompt(question, context), ANSWER_TOKENS, |text| {
            TravelAnswer {
                answer: text,
                question: question.to_string(),
            }
        })
        .await
    }

    async fn run<T>(
        &self,
        prompt: String,
        max_tokens: u32,
        into_payload: impl FnOnce(String) -> T,
    ) -> AiResult<T> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt,
            }],
            temperature: TEMPERATURE,
            max_tokens,
        };

        match self.chat.complete(request).await {
            Ok(text) => AiResult::Success(into_payload(text)),
            Err(err) => {
                log::warn!("Chat completion failed: {}", err);
                AiResult::Failure {
                    error: format!("AI service error: {}", err),
                }
            }
        }
    }
}
