mod question;
mod result;
mod topic;

pub use question::{MIN_ANSWERS, Question, QuestionError};
pub use result::{NewResult, QuizResult, ResultError};
pub use topic::{FULL_QUIZ_LABEL, TopicCatalog, TopicScope, TopicSummary};
