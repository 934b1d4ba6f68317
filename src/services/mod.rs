pub mod answer_evaluator;
pub mod badge_evaluator;
pub mod badge_service;
pub mod progress_service;
pub mod quiz_grader;
pub mod streak_tracker;

pub use answer_evaluator::AnswerEvaluator;
pub use badge_evaluator::{AwardOutcome, BadgeEvaluatorService};
pub use badge_service::BadgeService;
pub use progress_service::{ProgressOutcome, ProgressService};
pub use quiz_grader::{QuizGrader, QuizGraderService, QuizSubmissionOutcome};
pub use streak_tracker::{StreakService, StreakTracker};
