use chrono::{DateTime, NaiveDate, Utc};
use quiz_core::model::{NewResult, Question, QuizResult};
use serde::{Deserialize, Serialize};

use crate::repository::StorageError;

const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// Wire shape of a question as served by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuestionDto {
    pub topic: String,
    pub text: String,
    pub answers: Vec<String>,
    #[serde(default)]
    pub explanation: String,
    pub correct_answer_index: usize,
}

impl QuestionDto {
    pub(crate) fn into_question(self) -> Result<Question, StorageError> {
        Question::new(
            self.topic,
            self.text,
            self.answers,
            self.explanation,
            self.correct_answer_index,
        )
        .map_err(|e| quiz_core::Error::from(e).into())
    }
}

/// Wire shape of a stored result. `date` is `YYYY-MM-DD`, `timestamp` is
/// nanoseconds since the Unix epoch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ResultDto {
    pub name: String,
    pub date: String,
    pub topic: String,
    pub score: u32,
    pub total: u32,
    pub percentage: f64,
    pub timestamp: i64,
}

impl ResultDto {
    pub(crate) fn into_result(self) -> Result<QuizResult, StorageError> {
        let date = parse_date(&self.date)?;
        let timestamp = timestamp_from_nanos(self.timestamp)?;
        QuizResult::from_persisted(
            self.name,
            date,
            self.topic,
            self.score,
            self.total,
            self.percentage,
            timestamp,
        )
        .map_err(|e| quiz_core::Error::from(e).into())
    }
}

/// Body of `POST /results`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubmitResultRequest<'a> {
    pub name: &'a str,
    pub date: String,
    pub topic: &'a str,
    pub score: u32,
    pub total: u32,
    pub percentage: f64,
}

impl<'a> SubmitResultRequest<'a> {
    pub(crate) fn from_new(result: &'a NewResult) -> Self {
        Self {
            name: result.name(),
            date: result.date().format("%Y-%m-%d").to_string(),
            topic: result.topic(),
            score: result.score(),
            total: result.total(),
            percentage: result.percentage(),
        }
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, StorageError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|e| StorageError::Serialization(format!("invalid date {raw:?}: {e}")))
}

pub(crate) fn timestamp_from_nanos(nanos: i64) -> Result<DateTime<Utc>, StorageError> {
    let secs = nanos.div_euclid(NANOS_PER_SECOND);
    let subsec = u32::try_from(nanos.rem_euclid(NANOS_PER_SECOND))
        .map_err(|e| StorageError::Serialization(e.to_string()))?;
    DateTime::<Utc>::from_timestamp(secs, subsec)
        .ok_or_else(|| StorageError::Serialization(format!("timestamp out of range: {nanos}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_camel_case_question() {
        let json = r#"{
            "topic": "Refleksologi Kaki",
            "text": "Titik apa?",
            "answers": ["A", "B", "C"],
            "explanation": "Kerana.",
            "correctAnswerIndex": 2
        }"#;
        let dto: QuestionDto = serde_json::from_str(json).unwrap();
        let question = dto.into_question().unwrap();
        assert_eq!(question.correct_answer(), "C");
    }

    #[test]
    fn invalid_question_is_a_serialization_error() {
        let json = r#"{"topic":"T","text":"Q","answers":["A","B"],"correctAnswerIndex":5}"#;
        let dto: QuestionDto = serde_json::from_str(json).unwrap();
        assert!(matches!(
            dto.into_question(),
            Err(StorageError::Serialization(_))
        ));
    }

    #[test]
    fn decodes_result_with_nanosecond_timestamp() {
        let json = r#"{
            "name": "Aminah",
            "date": "2024-02-29",
            "topic": "Kuiz Penuh",
            "score": 7,
            "total": 10,
            "percentage": 70,
            "timestamp": 1700000000123456789
        }"#;
        let dto: ResultDto = serde_json::from_str(json).unwrap();
        let result = dto.into_result().unwrap();
        assert_eq!(result.date(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(result.timestamp().timestamp(), 1_700_000_000);
        assert_eq!(result.timestamp().timestamp_subsec_nanos(), 123_456_789);
    }

    #[test]
    fn rejects_malformed_date() {
        let dto = ResultDto {
            name: "A".into(),
            date: "29/02/2024".into(),
            topic: "T".into(),
            score: 1,
            total: 2,
            percentage: 50.0,
            timestamp: 0,
        };
        assert!(matches!(dto.into_result(), Err(StorageError::Serialization(_))));
    }

    #[test]
    fn result_breaking_invariants_is_rejected() {
        let dto = ResultDto {
            name: "A".into(),
            date: "2024-02-29".into(),
            topic: "T".into(),
            score: 5,
            total: 4,
            percentage: 100.0,
            timestamp: 0,
        };
        match dto.into_result() {
            Err(StorageError::Serialization(message)) => {
                assert!(message.contains("invalid record"), "{message}");
                assert!(message.contains("exceeds total"), "{message}");
            }
            other => panic!("expected serialization error, got {other:?}"),
        }
    }

    #[test]
    fn submit_body_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let draft = NewResult::new(" Ali ", date, "Refleksologi Tangan", 3, 4, 75.0).unwrap();
        let body = serde_json::to_value(SubmitResultRequest::from_new(&draft)).unwrap();
        assert_eq!(body["name"], "Ali");
        assert_eq!(body["date"], "2024-01-05");
        assert_eq!(body["percentage"], 75.0);
    }

    #[test]
    fn negative_nanos_floor_to_previous_second() {
        let ts = timestamp_from_nanos(-1).unwrap();
        assert_eq!(ts.timestamp(), -1);
        assert_eq!(ts.timestamp_subsec_nanos(), 999_999_999);
    }
}
