mod leaderboard_vm;
mod quiz_vm;
mod summary_vm;
mod time_fmt;
mod topic_vm;

pub use leaderboard_vm::{
    LeaderboardRowVm, LeaderboardVm, PrintCardVm, StatsVm, map_leaderboard, print_date_label,
};
pub use quiz_vm::{
    Feedback, OptionState, OptionVm, QuestionCardVm, QuizIntent, QuizPhase, QuizVm,
    SubmissionJob, SubmissionStatus, option_label, start_guarded, start_quiz,
};
pub use summary_vm::{NO_ANSWER, ReviewLineVm, SummaryVm, map_summary};
pub use time_fmt::{EMPTY_DATE, display_date, format_date};
pub use topic_vm::{HomeVm, TopicCardVm, map_home};
