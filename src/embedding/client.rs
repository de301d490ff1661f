use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::TextEmbedder;
use super::error::EmbeddingError;
use crate::constants::{DEFAULT_EMBEDDING_DIM, EMBED_BATCH_WINDOW};

/// Configuration for [`HttpEmbedder`].
#[derive(Debug, Clone)]
pub struct EmbedderConfig {
    /// Base URL of the embedding service.
    pub base_url: String,
    /// Expected vector dimension.
    pub dimension: usize,
    /// Per-call timeout.
    pub timeout: Duration,
    /// Retry count for 5xx/transport errors.
    pub retries: usize,
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8001".to_string(),
            dimension: DEFAULT_EMBEDDING_DIM,
            timeout: Duration::from_secs(30),
            retries: 3,
        }
    }
}

impl EmbedderConfig {
    /// Creates a config for `base_url` with defaults for the rest.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug)]
/// Embedding client for the remote sentence-embedding service.
///
/// Speaks the JSON wire protocol: `POST /embed` for single texts,
/// `POST /embed/phrases` for batches (windowed internally), `GET /health`
/// for readiness. Transport and 5xx failures are retried with linear
/// backoff; 4xx responses surface immediately.
pub struct HttpEmbedder {
    client: reqwest::Client,
    config: EmbedderConfig,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct EmbedResponse {
    vector: Vec<f32>,
}

#[derive(Serialize)]
struct EmbedPhrasesRequest<'a> {
    phrases: &'a [String],
}

#[derive(Deserialize)]
struct EmbedPhrasesResponse {
    results: Vec<PhraseVector>,
}

#[derive(Deserialize)]
struct PhraseVector {
    phrase: String,
    vector: Vec<f32>,
}

impl HttpEmbedder {
    /// Creates a client from `config`.
    pub fn new(config: EmbedderConfig) -> Result<Self, EmbeddingError> {
        if config.base_url.trim().is_empty() {
            return Err(EmbeddingError::InvalidConfig {
                reason: "base_url must not be empty".to_string(),
            });
        }
        if config.dimension == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "dimension must be non-zero".to_string(),
            });
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| EmbeddingError::InvalidConfig {
                reason: e.to_string(),
            })?;

        Ok(Self { client, config })
    }

    /// Returns the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// POSTs `body` to `path`, retrying 5xx and transport errors.
    async fn post_with_retry<B, R>(&self, path: &str, body: &B) -> Result<R, EmbeddingError>
    where
        B: Serialize + Sync,
        R: for<'de> Deserialize<'de>,
    {
        let url = self.endpoint(path);
        let attempts = self.config.retries.max(1);
        let mut last_error = String::new();

        for attempt in 0..attempts {
            if attempt > 0 {
                debug!(url = %url, attempt = attempt + 1, "Retrying embedding request");
                tokio::time::sleep(Duration::from_millis(500 * attempt as u64)).await;
            }

            let response = match self.client.post(&url).json(body).send().await {
                Ok(resp) => resp,
                Err(e) => {
                    last_error = e.to_string();
                    continue;
                }
            };

            let status = response.status();
            if status.is_success() {
                return response.json::<R>().await.map_err(|e| {
                    EmbeddingError::InvalidResponse {
                        reason: e.to_string(),
                    }
                });
            }

            let detail = response.text().await.unwrap_or_default();
            if status.is_client_error() {
                return Err(EmbeddingError::Rejected {
                    status: status.as_u16(),
                    message: detail,
                });
            }

            last_error = format!("server error {}: {}", status.as_u16(), detail);
        }

        warn!(url = %url, attempts, error = %last_error, "Embedding request exhausted retries");
        Err(EmbeddingError::Unavailable {
            url,
            message: last_error,
        })
    }

    fn validate_vector(&self, vector: &[f32]) -> Result<(), EmbeddingError> {
        if vector.len() != self.config.dimension {
            return Err(EmbeddingError::InvalidDimension {
                expected: self.config.dimension,
                actual: vector.len(),
            });
        }
        Ok(())
    }
}

impl TextEmbedder for HttpEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let response: EmbedResponse = self
            .post_with_retry("/embed", &EmbedRequest { text })
            .await?;

        self.validate_vector(&response.vector)?;

        debug!(
            text_len = text.len(),
            dimension = response.vector.len(),
            "Embedded single text"
        );

        Ok(response.vector)
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let mut vectors = Vec::with_capacity(texts.len());

        for window in texts.chunks(EMBED_BATCH_WINDOW) {
            let response: EmbedPhrasesResponse = self
                .post_with_retry("/embed/phrases", &EmbedPhrasesRequest { phrases: window })
                .await?;

            if response.results.len() != window.len() {
                return Err(EmbeddingError::InvalidResponse {
                    reason: format!(
                        "expected {} results, got {}",
                        window.len(),
                        response.results.len()
                    ),
                });
            }

            // Results are index-aligned with the request; the echoed phrase
            // is a consistency check, not a lookup key.
            for (sent, result) in window.iter().zip(response.results.into_iter()) {
                if &result.phrase != sent {
                    return Err(EmbeddingError::InvalidResponse {
                        reason: format!(
                            "result misaligned: sent '{}', got '{}'",
                            sent, result.phrase
                        ),
                    });
                }
                self.validate_vector(&result.vector)?;
                vectors.push(result.vector);
            }
        }

        debug!(
            input_texts = texts.len(),
            output_vectors = vectors.len(),
            "Embedded batch"
        );

        Ok(vectors)
    }

    fn dimension(&self) -> usize {
        self.config.dimension
    }

    async fn health_check(&self) -> Result<(), EmbeddingError> {
        let url = self.endpoint("/health");
        let response =
            self.client
                .get(&url)
                .send()
                .await
                .map_err(|e| EmbeddingError::Unavailable {
                    url: url.clone(),
                    message: e.to_string(),
                })?;

        if !response.status().is_success() {
            return Err(EmbeddingError::Unavailable {
                url,
                message: format!("health check returned {}", response.status().as_u16()),
            });
        }

        Ok(())
    }
}
