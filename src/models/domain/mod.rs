pub mod answer;
pub mod badge;
pub mod exercise;
pub mod lesson;
pub mod quiz;
pub mod quiz_result;
pub mod streak;
pub mod user;
pub mod user_badge;
pub mod user_progress;
pub use answer::{AnswerScalar, CorrectAnswer};
pub use badge::{Badge, BadgeCondition, BadgeRarity, ConditionType};
pub use exercise::Exercise;
pub use lesson::Lesson;
pub use quiz::Quiz;
pub use quiz_result::{GradedAnswer, QuizResult, TopicStat};
pub use streak::StreakState;
pub use user::User;
pub use user_badge::UserBadge;
pub use user_progress::{ProgressUpdate, UserProgress};
