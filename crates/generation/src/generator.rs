//! The [`ContentGenerator`] port and its implementations.

use std::time::Duration;

use async_trait::async_trait;
use slidecraft_core::slide::SlideType;

use crate::client::ChatApi;
use crate::draft::{self, DraftSlide};
use crate::error::GenerationError;
use crate::prompt;

/// Input for drafting a whole deck.
#[derive(Debug, Clone)]
pub struct DeckRequest {
    pub title: String,
    pub prompt: String,
    pub description: Option<String>,
    pub slide_count: u32,
}

/// Input for drafting one slide inserted into an existing deck.
#[derive(Debug, Clone)]
pub struct SlideRequest {
    pub presentation_title: String,
    pub prompt: String,
    pub slide_type: SlideType,
    pub previous_title: Option<String>,
    pub next_title: Option<String>,
}

/// Input for rewriting an existing slide.
#[derive(Debug, Clone)]
pub struct RegenerateRequest {
    pub presentation_title: String,
    pub original: DraftSlide,
    pub context: Option<String>,
}

/// Produces draft slide content. Nothing here touches storage.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Draft a deck. Returns at least one slide.
    async fn generate_deck(&self, request: &DeckRequest) -> Result<Vec<DraftSlide>, GenerationError>;

    /// Draft a single slide of the requested type.
    async fn generate_slide(&self, request: &SlideRequest) -> Result<DraftSlide, GenerationError>;

    /// Draft a replacement for an existing slide.
    async fn regenerate_slide(
        &self,
        request: &RegenerateRequest,
    ) -> Result<DraftSlide, GenerationError>;
}

// ---------------------------------------------------------------------------
// LLM-backed generator
// ---------------------------------------------------------------------------

/// [`ContentGenerator`] backed by a chat-completions service.
pub struct LlmGenerator {
    api: ChatApi,
}

impl LlmGenerator {
    pub fn new(api: ChatApi) -> Self {
        Self { api }
    }

    /// Build the client and generator in one step.
    pub fn connect(
        api_url: String,
        api_key: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, GenerationError> {
        Ok(Self::new(ChatApi::new(api_url, api_key, model, 0.7, timeout)?))
    }
}

#[async_trait]
impl ContentGenerator for LlmGenerator {
    async fn generate_deck(&self, request: &DeckRequest) -> Result<Vec<DraftSlide>, GenerationError> {
        tracing::debug!(
            model = self.api.model(),
            slide_count = request.slide_count,
            "Generating deck"
        );
        let reply = self.api.complete(&prompt::deck_messages(request)).await?;
        let drafts = draft::parse_deck(&reply)?;

        if drafts.len() != request.slide_count as usize {
            tracing::warn!(
                requested = request.slide_count,
                received = drafts.len(),
                "Generated deck size differs from request"
            );
        }
        Ok(drafts)
    }

    async fn generate_slide(&self, request: &SlideRequest) -> Result<DraftSlide, GenerationError> {
        tracing::debug!(
            model = self.api.model(),
            slide_type = %request.slide_type,
            "Generating slide"
        );
        let reply = self.api.complete(&prompt::slide_messages(request)).await?;
        let mut slide = draft::parse_slide(&reply)?;
        // The caller picked the type; the model only fills in content.
        slide.slide_type = request.slide_type;
        Ok(slide)
    }

    async fn regenerate_slide(
        &self,
        request: &RegenerateRequest,
    ) -> Result<DraftSlide, GenerationError> {
        tracing::debug!(
            model = self.api.model(),
            original = %request.original.title,
            "Regenerating slide"
        );
        let reply = self.api.complete(&prompt::regenerate_messages(request)).await?;
        draft::parse_slide(&reply)
    }
}

// ---------------------------------------------------------------------------
// Canned generator
// ---------------------------------------------------------------------------

/// Deterministic [`ContentGenerator`] for tests and offline runs.
///
/// Decks are `slide_count` slides: a TITLE slide, CONTENT slides and a
/// closing CONCLUSION. A failing instance returns a 503 API error for every
/// call.
#[derive(Debug, Clone, Default)]
pub struct StaticGenerator {
    fail: bool,
}

impl StaticGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self { fail: true }
    }

    fn check(&self) -> Result<(), GenerationError> {
        if self.fail {
            return Err(GenerationError::Api {
                status: 503,
                body: "generation unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ContentGenerator for StaticGenerator {
    async fn generate_deck(&self, request: &DeckRequest) -> Result<Vec<DraftSlide>, GenerationError> {
        self.check()?;
        let count = request.slide_count.max(1);
        let drafts = (1..=count)
            .map(|n| {
                let slide_type = if n == 1 {
                    SlideType::Title
                } else if n == count {
                    SlideType::Conclusion
                } else {
                    SlideType::Content
                };
                let title = if n == 1 {
                    request.title.clone()
                } else {
                    format!("Slide {n}")
                };
                DraftSlide {
                    title,
                    content: format!("- {} (part {n})", request.prompt),
                    slide_type,
                    layout: None,
                }
            })
            .collect();
        Ok(drafts)
    }

    async fn generate_slide(&self, request: &SlideRequest) -> Result<DraftSlide, GenerationError> {
        self.check()?;
        Ok(DraftSlide {
            title: request.prompt.clone(),
            content: format!("- About {}", request.prompt),
            slide_type: request.slide_type,
            layout: None,
        })
    }

    async fn regenerate_slide(
        &self,
        request: &RegenerateRequest,
    ) -> Result<DraftSlide, GenerationError> {
        self.check()?;
        let original = &request.original;
        Ok(DraftSlide {
            title: format!("{} (revised)", original.title),
            content: match request.context.as_deref() {
                Some(context) => format!("{}\n- {context}", original.content),
                None => original.content.clone(),
            },
            slide_type: original.slide_type,
            layout: original.layout,
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn deck(count: u32) -> DeckRequest {
        DeckRequest {
            title: "Solar".to_string(),
            prompt: "panels".to_string(),
            description: None,
            slide_count: count,
        }
    }

    #[tokio::test]
    async fn static_deck_has_title_and_conclusion() {
        let drafts = StaticGenerator::new().generate_deck(&deck(4)).await.unwrap();
        assert_eq!(drafts.len(), 4);
        assert_eq!(drafts[0].title, "Solar");
        assert_eq!(drafts[0].slide_type, SlideType::Title);
        assert_eq!(drafts[1].slide_type, SlideType::Content);
        assert_eq!(drafts[3].slide_type, SlideType::Conclusion);
    }

    #[tokio::test]
    async fn static_deck_never_empty() {
        let drafts = StaticGenerator::new().generate_deck(&deck(0)).await.unwrap();
        assert_eq!(drafts.len(), 1);
    }

    #[tokio::test]
    async fn static_regenerate_keeps_type() {
        let request = RegenerateRequest {
            presentation_title: "Solar".to_string(),
            original: DraftSlide {
                title: "Costs".to_string(),
                content: "- Panels".to_string(),
                slide_type: SlideType::NextSteps,
                layout: None,
            },
            context: Some("cheaper".to_string()),
        };
        let draft = StaticGenerator::new().regenerate_slide(&request).await.unwrap();
        assert_eq!(draft.title, "Costs (revised)");
        assert_eq!(draft.content, "- Panels\n- cheaper");
        assert_eq!(draft.slide_type, SlideType::NextSteps);
    }

    #[tokio::test]
    async fn failing_generator_errors() {
        let generator = StaticGenerator::failing();
        assert_matches!(
            generator.generate_deck(&deck(3)).await,
            Err(GenerationError::Api { status: 503, .. })
        );
    }
}
