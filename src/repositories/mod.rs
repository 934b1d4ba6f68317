pub mod badge_repository;
pub mod exercise_repository;
pub mod lesson_repository;
pub mod progress_repository;
pub mod quiz_repository;
pub mod quiz_result_repository;
pub mod user_badge_repository;
pub mod user_repository;

pub use badge_repository::{BadgeRepository, MongoBadgeRepository};
pub use exercise_repository::{ExerciseRepository, MongoExerciseRepository};
pub use lesson_repository::{LessonRepository, MongoLessonRepository};
pub use progress_repository::{MongoProgressRepository, ProgressRepository};
pub use quiz_repository::{MongoQuizRepository, QuizRepository};
pub use quiz_result_repository::{MongoQuizResultRepository, QuizResultRepository};
pub use user_badge_repository::{MongoUserBadgeRepository, UserBadgeRepository};
pub use user_repository::{MongoUserRepository, UserRepository};
