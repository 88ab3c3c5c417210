use quiz_core::model::{FULL_QUIZ_LABEL, TopicCatalog};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TopicCardVm {
    pub name: String,
    pub count_label: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HomeVm {
    pub topics: Vec<TopicCardVm>,
    pub full_quiz_label: &'static str,
    pub full_quiz_count_label: String,
}

impl HomeVm {
    #[must_use]
    pub fn has_questions(&self) -> bool {
        !self.topics.is_empty()
    }
}

fn count_label(count: usize) -> String {
    format!("{count} soalan")
}

#[must_use]
pub fn map_home(catalog: &TopicCatalog) -> HomeVm {
    let topics = catalog
        .topics()
        .iter()
        .map(|topic| TopicCardVm {
            name: topic.name.clone(),
            count_label: count_label(topic.question_count),
        })
        .collect();
    HomeVm {
        topics,
        full_quiz_label: FULL_QUIZ_LABEL,
        full_quiz_count_label: count_label(catalog.total_questions()),
    }
}
