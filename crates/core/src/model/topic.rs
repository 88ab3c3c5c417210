use std::collections::BTreeMap;
use std::fmt;

use crate::model::Question;

/// Label used for a quiz spanning every topic.
pub const FULL_QUIZ_LABEL: &str = "Kuiz Penuh";

/// Which slice of the question bank a quiz draws from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum TopicScope {
    #[default]
    All,
    Topic(String),
}

impl TopicScope {
    /// Parse a topic selector; a blank selector means the full quiz.
    #[must_use]
    pub fn from_selector(selector: Option<&str>) -> Self {
        match selector.map(str::trim) {
            Some(topic) if !topic.is_empty() => Self::Topic(topic.to_owned()),
            _ => Self::All,
        }
    }

    #[must_use]
    pub fn topic(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Topic(topic) => Some(topic),
        }
    }

    /// Label stored on submitted results and shown in quiz headers.
    #[must_use]
    pub fn label(&self) -> &str {
        self.topic().unwrap_or(FULL_QUIZ_LABEL)
    }
}

impl fmt::Display for TopicScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A topic with the number of questions filed under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicSummary {
    pub name: String,
    pub question_count: usize,
}

/// Distinct topics of a question bank, sorted by name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TopicCatalog {
    topics: Vec<TopicSummary>,
    total_questions: usize,
}

impl TopicCatalog {
    #[must_use]
    pub fn from_questions(questions: &[Question]) -> Self {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for question in questions {
            *counts.entry(question.topic()).or_default() += 1;
        }

        let topics = counts
            .into_iter()
            .map(|(name, question_count)| TopicSummary {
                name: name.to_owned(),
                question_count,
            })
            .collect();

        Self {
            topics,
            total_questions: questions.len(),
        }
    }

    #[must_use]
    pub fn topics(&self) -> &[TopicSummary] {
        &self.topics
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.total_questions
    }

    #[must_use]
    pub fn count_for(&self, topic: &str) -> usize {
        self.topics
            .iter()
            .find(|summary| summary.name == topic)
            .map_or(0, |summary| summary.question_count)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_questions == 0
    }
}
