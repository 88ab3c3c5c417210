//! Repository client for the remote quiz backend.
//!
//! Endpoints are resolved relative to `HttpConfig::base_url`:
//!
//! | operation                | request                              |
//! |--------------------------|--------------------------------------|
//! | `get_all_questions`      | `GET /questions`                     |
//! | `get_questions_by_topic` | `GET /questions?topic=<topic>`       |
//! | `get_question`           | `GET /questions/<index>`             |
//! | `get_question_by_text`   | `GET /questions/lookup?text=<text>`  |
//! | `get_results`            | `GET /results`                       |
//! | `submit_result`          | `POST /results`                      |

mod mapping;

use std::time::Duration;

use async_trait::async_trait;
use quiz_core::model::{NewResult, Question, QuizResult};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::repository::{QuestionRepository, ResultRepository, StorageError};
use mapping::{QuestionDto, ResultDto, SubmitResultRequest};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug)]
pub struct HttpConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl HttpConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[derive(Clone)]
pub struct HttpRepository {
    client: Client,
    config: HttpConfig,
}

impl HttpRepository {
    /// Build a client for `config`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the HTTP client cannot be constructed.
    pub fn new(config: HttpConfig) -> Result<Self, StorageError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(Self { client, config })
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, StorageError> {
        let response = send(request).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| StorageError::Serialization(e.to_string()))
    }

    async fn fetch_questions(&self, request: RequestBuilder) -> Result<Vec<Question>, StorageError> {
        let dtos: Vec<QuestionDto> = self.fetch(request).await?;
        let questions = dtos
            .into_iter()
            .map(QuestionDto::into_question)
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = questions.len(), "fetched questions");
        Ok(questions)
    }
}

async fn send(request: RequestBuilder) -> Result<Response, StorageError> {
    let response = request.send().await.map_err(|e| {
        warn!(error = %e, "backend request failed");
        StorageError::Connection(e.to_string())
    })?;

    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(StorageError::NotFound);
    }
    if status == StatusCode::CONFLICT {
        return Err(StorageError::Conflict);
    }
    if !status.is_success() {
        warn!(%status, "backend returned an error status");
        return Err(StorageError::Connection(format!("unexpected status {status}")));
    }
    Ok(response)
}

#[async_trait]
impl QuestionRepository for HttpRepository {
    async fn get_all_questions(&self) -> Result<Vec<Question>, StorageError> {
        let request = self.client.get(self.config.url("questions"));
        self.fetch_questions(request).await
    }

    async fn get_questions_by_topic(&self, topic: &str) -> Result<Vec<Question>, StorageError> {
        let request = self
            .client
            .get(self.config.url("questions"))
            .query(&[("topic", topic)]);
        self.fetch_questions(request).await
    }

    async fn get_question(&self, index: usize) -> Result<Question, StorageError> {
        let request = self.client.get(self.config.url(&format!("questions/{index}")));
        let dto: QuestionDto = self.fetch(request).await?;
        dto.into_question()
    }

    async fn get_question_by_text(&self, text: &str) -> Result<Question, StorageError> {
        let request = self
            .client
            .get(self.config.url("questions/lookup"))
            .query(&[("text", text)]);
        let dto: QuestionDto = self.fetch(request).await?;
        dto.into_question()
    }
}

#[async_trait]
impl ResultRepository for HttpRepository {
    async fn get_results(&self) -> Result<Vec<QuizResult>, StorageError> {
        let request = self.client.get(self.config.url("results"));
        let dtos: Vec<ResultDto> = self.fetch(request).await?;
        let results = dtos
            .into_iter()
            .map(ResultDto::into_result)
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = results.len(), "fetched results");
        Ok(results)
    }

    async fn submit_result(&self, result: &NewResult) -> Result<(), StorageError> {
        let body = SubmitResultRequest::from_new(result);
        let request = self.client.post(self.config.url("results")).json(&body);
        send(request).await?;
        debug!(topic = result.topic(), "submitted result");
        Ok(())
    }
}
