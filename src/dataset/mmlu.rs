//! Multiple-choice questions from the HuggingFace datasets server.
//!
//! Rows are fetched page by page from the `rows` API, using the subject name as
//! the dataset config. Only as many rows as the run needs are requested.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::error::DatasetError;
use crate::scoring::Letter;

/// Default dataset repository.
pub const DEFAULT_DATASET: &str = "cais/mmlu";

/// Base URL for HuggingFace datasets server rows API.
const HUGGINGFACE_ROWS_API: &str = "https://datasets-server.huggingface.co/rows";

/// Largest page the rows API serves.
const MAX_PAGE_SIZE: usize = 100;

const FETCH_TIMEOUT_SECS: u64 = 60;

/// A four-option question with its correct answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionItem {
    pub question: String,
    pub options: [String; 4],
    answer: Letter,
}

impl QuestionItem {
    /// Create a question; `answer` is the zero-based index of the correct option.
    ///
    /// # Errors
    ///
    /// Returns `DatasetError::InvalidItem` if `answer` is outside `0..=3`.
    pub fn new(
        question: impl Into<String>,
        options: [String; 4],
        answer: usize,
    ) -> Result<Self, DatasetError> {
        let answer = Letter::from_index(answer).ok_or_else(|| {
            DatasetError::InvalidItem(format!("answer index {} is outside 0..=3", answer))
        })?;
        Ok(Self {
            question: question.into(),
            options,
            answer,
        })
    }

    #[cfg(test)]
    fn answer_index(&self) -> usize {
        self.answer.index()
    }

    pub fn correct_letter(&self) -> Letter {
        self.answer
    }
}

#[derive(Debug, Deserialize)]
struct RowsResponse {
    rows: Vec<RowEnvelope>,
}

#[derive(Debug, Deserialize)]
struct RowEnvelope {
    row_idx: Option<u64>,
    row: MmluRow,
}

#[derive(Debug, Deserialize)]
struct MmluRow {
    question: String,
    choices: Vec<String>,
    answer: i64,
}

impl TryFrom<MmluRow> for QuestionItem {
    type Error = DatasetError;

    fn try_from(row: MmluRow) -> Result<Self, Self::Error> {
        let count = row.choices.len();
        let options: [String; 4] = row.choices.try_into().map_err(|_| {
            DatasetError::InvalidItem(format!("expected 4 choices, found {}", count))
        })?;
        let answer = usize::try_from(row.answer).map_err(|_| {
            DatasetError::InvalidItem(format!("answer index {} is negative", row.answer))
        })?;
        QuestionItem::new(row.question, options, answer)
    }
}

/// Parse one page of the rows API into questions.
pub fn parse_rows_page(body: &str) -> Result<Vec<QuestionItem>, DatasetError> {
    let page: RowsResponse = serde_json::from_str(body)
        .map_err(|e| DatasetError::ParseError(format!("Failed to parse rows page: {}", e)))?;

    page.rows
        .into_iter()
        .map(|envelope| {
            let idx = envelope.row_idx;
            QuestionItem::try_from(envelope.row).map_err(|e| match (e, idx) {
                (DatasetError::InvalidItem(reason), Some(idx)) => {
                    DatasetError::InvalidItem(format!("row {}: {}", idx, reason))
                }
                (e, _) => e,
            })
        })
        .collect()
}

/// Fetches question splits for a subject.
pub struct MmluSource {
    http_client: Client,
    dataset: String,
    rows_api: String,
}

impl MmluSource {
    /// Source for the default dataset.
    pub fn new() -> Result<Self, DatasetError> {
        Self::with_dataset(DEFAULT_DATASET)
    }

    pub fn with_dataset(dataset: impl Into<String>) -> Result<Self, DatasetError> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()
            .map_err(|e| DatasetError::HttpError(e.to_string()))?;

        Ok(Self {
            http_client,
            dataset: dataset.into(),
            rows_api: HUGGINGFACE_ROWS_API.to_string(),
        })
    }

    /// Point the source at a different rows API (used by tests and mirrors).
    pub fn with_rows_api(mut self, rows_api: impl Into<String>) -> Self {
        self.rows_api = rows_api.into();
        self
    }

    fn rows_url(&self, subject: &str, split: &str, offset: usize, length: usize) -> String {
        format!(
            "{}?dataset={}&config={}&split={}&offset={}&length={}",
            self.rows_api,
            urlencoding::encode(&self.dataset),
            urlencoding::encode(subject),
            urlencoding::encode(split),
            offset,
            length
        )
    }

    /// Fetch the first `count` questions of `split` in dataset order.
    ///
    /// Returns fewer than `count` items if the split is shorter.
    pub async fn fetch(
        &self,
        subject: &str,
        split: &str,
        count: usize,
    ) -> Result<Vec<QuestionItem>, DatasetError> {
        let mut items = Vec::with_capacity(count);

        while items.len() < count {
            let length = (count - items.len()).min(MAX_PAGE_SIZE);
            let url = self.rows_url(subject, split, items.len(), length);
            tracing::debug!(url = %url, "Fetching dataset rows");

            let response = self
                .http_client
                .get(&url)
                .header("Accept", "application/json")
                .send()
                .await
                .map_err(|e| DatasetError::HttpError(e.to_string()))?;

            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|e| DatasetError::HttpError(e.to_string()))?;
            if !status.is_success() {
                return Err(DatasetError::HttpError(format!(
                    "API returned status {}: {}",
                    status, body
                )));
            }

            let page = parse_rows_page(&body)?;
            let received = page.len();
            items.extend(page);
            if received < length {
                break;
            }
        }

        items.truncate(count);
        tracing::info!(
            dataset = %self.dataset,
            subject = subject,
            split = split,
            count = items.len(),
            "Loaded questions"
        );
        Ok(items)
    }
}
