use std::sync::Arc;

use chrono::NaiveDate;
use quiz_core::model::{NewResult, Question, QuizResult};
use storage::repository::{QuestionRepository, ResultRepository, StorageError};
use storage::{InMemoryRepository, Storage};

use crate::vm::SubmissionStatus;

use super::test_harness::{
    ViewKind, question, setup_view_harness, setup_view_harness_with_storage,
};

fn bank() -> Vec<quiz_core::model::Question> {
    vec![
        question("Refleksologi Telinga", "Cuping mewakili?", 1),
        question("Refleksologi Kaki", "Tumit mewakili?", 0),
        question("Refleksologi Kaki", "Ibu jari mewakili?", 1),
    ]
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_lists_topics_with_counts() {
    let mut harness = setup_view_harness(ViewKind::Home, bank());
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Kuiz Penuh"), "missing full quiz card in {html}");
    assert!(html.contains("3 soalan"), "missing total count in {html}");
    assert!(html.contains("2 soalan"), "missing topic count in {html}");
    let kaki = html.find("Refleksologi Kaki").expect("kaki topic");
    let telinga = html.find("Refleksologi Telinga").expect("telinga topic");
    assert!(kaki < telinga, "topics not sorted in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_starts_with_participant_form() {
    let mut harness = setup_view_harness(ViewKind::Quiz("Refleksologi Kaki".into()), bank());
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Maklumat Peserta"), "missing form in {html}");
    assert!(html.contains("Refleksologi Kaki"), "missing scope label in {html}");
    assert!(html.contains("14/11/2023"), "missing default date preview in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_empty_topic_shows_empty_state() {
    let mut harness = setup_view_harness(ViewKind::Quiz("Topik Tiada".into()), bank());
    harness.settle().await;
    let html = harness.render();

    assert!(
        html.contains("Tiada soalan dijumpai untuk topik ini."),
        "missing empty state in {html}"
    );
    assert!(!html.contains("Cuba Semula"), "empty topic offered a retry in {html}");
    let submitted = harness.storage.results.get_results().await.unwrap();
    assert!(submitted.is_empty());
}

struct FailingQuestions;

#[async_trait::async_trait]
impl QuestionRepository for FailingQuestions {
    async fn get_all_questions(&self) -> Result<Vec<Question>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn get_questions_by_topic(&self, _topic: &str) -> Result<Vec<Question>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn get_question(&self, _index: usize) -> Result<Question, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn get_question_by_text(&self, _text: &str) -> Result<Question, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_fetch_failure_offers_retry() {
    let storage = Storage {
        questions: Arc::new(FailingQuestions),
        results: Arc::new(InMemoryRepository::new()),
    };
    let mut harness =
        setup_view_harness_with_storage(ViewKind::Quiz("Refleksologi Kaki".into()), storage);
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Ralat semasa memuatkan data."), "missing error in {html}");
    assert!(html.contains("Cuba Semula"), "missing retry in {html}");
    assert!(html.contains("Kembali ke Laman Utama"), "missing home link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn summary_smoke_renders_score_and_breakdown() {
    let view = ViewKind::Summary {
        wrong: vec!["Tumit mewakili?".into()],
        status: SubmissionStatus::Sent,
    };
    let mut harness = setup_view_harness(view, bank());
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("67% Betul (2/3 soalan)"), "missing percentage in {html}");
    assert!(html.contains("Boleh Ditingkatkan"), "missing tier label in {html}");
    assert_eq!(html.matches("star-filled").count(), 1, "wrong star count in {html}");
    assert!(html.contains("Semakan Jawapan"), "missing breakdown in {html}");
    assert!(html.contains("Jawapan anda: Ibu jari"), "missing chosen answer in {html}");
    assert!(html.contains("Jawapan betul: Tumit"), "missing correct answer in {html}");
    assert_eq!(html.matches("Jawapan betul:").count(), 1, "extra corrections in {html}");
    assert!(
        html.contains("Keputusan anda telah disimpan."),
        "missing submission status in {html}"
    );
    assert!(!html.contains("Hantar Semula"), "unexpected resend in {html}");
    assert!(html.contains("Cuba Lagi"), "missing restart in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn summary_smoke_failed_submission_offers_resend() {
    let view = ViewKind::Summary {
        wrong: Vec::new(),
        status: SubmissionStatus::Failed,
    };
    let mut harness = setup_view_harness(view, bank());
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("100% Betul (3/3 soalan)"), "missing percentage in {html}");
    assert_eq!(html.matches("star-filled").count(), 3, "wrong star count in {html}");
    assert!(html.contains("Hantar Semula"), "missing resend in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn admin_view_smoke_renders_ranked_results() {
    let mut harness = setup_view_harness(ViewKind::Admin, bank());
    let date = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
    for (name, score) in [("Rahim", 2), ("Siti", 4), ("Kumar", 3)] {
        let result = NewResult::new(name, date, "Kuiz Penuh", score, 4, f64::from(score) * 25.0)
            .unwrap();
        harness
            .storage
            .results
            .submit_result(&result)
            .await
            .expect("submit result");
    }

    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Papan Kedudukan Peserta"), "missing title in {html}");
    assert!(html.contains("100%"), "missing top score in {html}");
    assert!(html.contains("75%"), "missing average in {html}");
    assert!(html.contains("20/05/2024"), "missing formatted date in {html}");
    let siti = html.find("Siti").expect("siti row");
    let kumar = html.find("Kumar").expect("kumar row");
    let rahim = html.find("Rahim").expect("rahim row");
    assert!(siti < kumar && kumar < rahim, "rows not ranked in {html}");
    assert!(html.contains("🏆"), "missing gold badge in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn admin_view_smoke_renders_empty_state() {
    let mut harness = setup_view_harness(ViewKind::Admin, bank());
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Tiada keputusan lagi"), "missing empty state in {html}");
}

struct FailingResults;

#[async_trait::async_trait]
impl ResultRepository for FailingResults {
    async fn get_results(&self) -> Result<Vec<QuizResult>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn submit_result(&self, _result: &NewResult) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn admin_view_smoke_renders_error_with_retry() {
    let questions = InMemoryRepository::new();
    let storage = Storage {
        questions: Arc::new(questions),
        results: Arc::new(FailingResults),
    };
    let mut harness = setup_view_harness_with_storage(ViewKind::Admin, storage);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Ralat semasa memuatkan data."), "missing error in {html}");
    assert!(html.contains("Cuba Semula"), "missing retry in {html}");
}
