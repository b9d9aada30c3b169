//! Generation client.
//!
//! Turns a `SongRequest` into a `GeneratedSong` by building the prompt,
//! calling the injected `TextGenerator` and deriving a title from the output.
//! Every failure leaves this boundary as a `SurError`.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use super::generator::{EndpointError, SamplingConfig, TextGenerator};
use crate::error::{Result, SurError};
use crate::prompt::PromptBuilder;
use crate::song::{GeneratedSong, SongRequest};

static LEADING_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*#+").unwrap());
static TITLE_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^title\s*:").unwrap());

/// Derives a song title from the first line of generated text.
///
/// Strips leading markdown heading markers, `*` emphasis and a `Title:`
/// prefix. This is a heuristic: when the first line is empty after cleanup
/// the request topic is used instead.
pub fn extract_title(text: &str, topic: &str) -> String {
    let first_line = text.lines().next().unwrap_or_default();
    let without_heading = LEADING_HEADING.replace(first_line, "");
    let without_emphasis = without_heading.replace('*', "");
    let trimmed = without_emphasis.trim();
    let title = TITLE_PREFIX.replace(trimmed, "");
    let title = title.trim();

    if title.is_empty() {
        topic.trim().to_string()
    } else {
        title.to_string()
    }
}

/// Maps an endpoint failure to the user-facing error kind.
pub fn classify_failure(error: &EndpointError) -> SurError {
    if error.is_permission_denied() {
        SurError::auth()
    } else {
        SurError::generation_failed()
    }
}

/// Calls the text generator for song requests.
#[derive(Clone)]
pub struct GenerationClient {
    generator: Arc<dyn TextGenerator>,
    builder: PromptBuilder,
    sampling: SamplingConfig,
}

impl GenerationClient {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            builder: PromptBuilder::new(),
            sampling: SamplingConfig::default(),
        }
    }

    /// Overrides the sampling parameters.
    pub fn with_sampling(mut self, sampling: SamplingConfig) -> Self {
        self.sampling = sampling;
        self
    }

    pub fn sampling(&self) -> &SamplingConfig {
        &self.sampling
    }

    /// Generates one song.
    ///
    /// # Errors
    ///
    /// - `Validation` if the request is invalid (the generator is not called)
    /// - `Auth` if the endpoint rejects the credential
    /// - `NoContent` if the endpoint returns empty text
    /// - `GenerationFailed` for every other failure
    pub async fn generate(&self, request: &SongRequest) -> Result<GeneratedSong> {
        request.validate()?;

        let prompt = self.builder.build(request);
        tracing::debug!(
            model = self.generator.model_name(),
            template = prompt.template.heading,
            prompt_len = prompt.text.len(),
            "Sending generation request"
        );

        let text = self
            .generator
            .generate(&prompt.text, &self.sampling)
            .await
            .map_err(|err| {
                tracing::error!("Generation endpoint error: {}", err);
                classify_failure(&err)
            })?;

        if text.trim().is_empty() {
            tracing::warn!("Generation endpoint returned no content");
            return Err(SurError::NoContent);
        }

        let title = extract_title(&text, &request.topic);
        tracing::info!(title = %title, "Song generated");

        Ok(GeneratedSong::new(title, text, request.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::song::{Genre, Mood, SongLength};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockGenerator {
        response: std::result::Result<String, EndpointError>,
        prompts: Mutex<Vec<String>>,
    }

    impl MockGenerator {
        fn answering(text: &str) -> Self {
            Self {
                response: Ok(text.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn failing(err: EndpointError) -> Self {
            Self {
                response: Err(err),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl TextGenerator for MockGenerator {
        async fn generate(
            &self,
            prompt: &str,
            _config: &SamplingConfig,
        ) -> std::result::Result<String, EndpointError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.response.clone()
        }

        fn model_name(&self) -> &str {
            "mock"
        }
    }

    fn request() -> SongRequest {
        SongRequest::new("rain", Mood::Sad, Genre::Ollywood, SongLength::Short).unwrap()
    }

    #[test]
    fn test_extract_title_plain_first_line() {
        assert_eq!(extract_title("Barasha\n[Chorus]\n...", "rain"), "Barasha");
    }

    #[test]
    fn test_extract_title_strips_markdown_and_prefix() {
        assert_eq!(extract_title("## **Title:** Barasha\n", "rain"), "Barasha");
        assert_eq!(extract_title("# Barasha", "rain"), "Barasha");
        assert_eq!(extract_title("title: Barasha", "rain"), "Barasha");
        assert_eq!(extract_title("**Barasha**\r\n[Chorus]", "rain"), "Barasha");
    }

    #[test]
    fn test_extract_title_falls_back_to_topic() {
        assert_eq!(extract_title("\n[Chorus]\nline", "rain"), "rain");
        assert_eq!(extract_title("**Title:**", " rain "), "rain");
        assert_eq!(extract_title("", "rain"), "rain");
    }

    #[tokio::test]
    async fn test_generate_success() {
        let generator = Arc::new(MockGenerator::answering("Barasha\n[Chorus]\n..."));
        let client = GenerationClient::new(generator.clone());

        let song = client.generate(&request()).await.unwrap();

        assert_eq!(song.title, "Barasha");
        assert_eq!(song.lyrics, "Barasha\n[Chorus]\n...");
        assert_eq!(song.metadata, request());
        assert_eq!(generator.calls(), 1);
        assert!(generator.prompts.lock().unwrap()[0].contains("SHORT SONG STRUCTURE"));
    }

    #[tokio::test]
    async fn test_generate_empty_response_is_no_content() {
        let client = GenerationClient::new(Arc::new(MockGenerator::answering("  \n")));
        let err = client.generate(&request()).await.unwrap_err();
        assert_eq!(err, SurError::NoContent);
    }

    #[tokio::test]
    async fn test_generate_permission_failure_is_auth() {
        let client = GenerationClient::new(Arc::new(MockGenerator::failing(
            EndpointError::service(Some(403), "PERMISSION_DENIED: model access"),
        )));
        let err = client.generate(&request()).await.unwrap_err();
        assert!(err.is_auth());
    }

    #[tokio::test]
    async fn test_generate_other_failure_is_generic() {
        let client = GenerationClient::new(Arc::new(MockGenerator::failing(
            EndpointError::transport("connection reset"),
        )));
        let err = client.generate(&request()).await.unwrap_err();
        assert_eq!(err, SurError::generation_failed());
    }

    #[tokio::test]
    async fn test_invalid_request_never_reaches_generator() {
        let generator = Arc::new(MockGenerator::answering("Barasha"));
        let client = GenerationClient::new(generator.clone());
        let mut invalid = request();
        invalid.topic = "  ".to_string();

        let err = client.generate(&invalid).await.unwrap_err();

        assert!(err.is_validation());
        assert_eq!(generator.calls(), 0);
    }

    #[test]
    fn test_with_sampling_overrides_defaults() {
        let sampling = SamplingConfig {
            temperature: 0.2,
            top_k: 10,
            top_p: 0.5,
        };
        let client = GenerationClient::new(Arc::new(MockGenerator::answering("x")))
            .with_sampling(sampling);
        assert_eq!(client.sampling(), &sampling);
    }
}
