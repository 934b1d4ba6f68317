use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        BadgeRepository, ExerciseRepository, LessonRepository, MongoBadgeRepository,
        MongoExerciseRepository, MongoLessonRepository, MongoProgressRepository,
        MongoQuizRepository, MongoQuizResultRepository, MongoUserBadgeRepository,
        MongoUserRepository, ProgressRepository, QuizRepository, QuizResultRepository,
        UserBadgeRepository, UserRepository,
    },
    services::{
        BadgeEvaluatorService, BadgeService, ProgressService, QuizGraderService, StreakService,
    },
};

/// Every store the services read or write.
#[derive(Clone)]
pub struct Repositories {
    pub exercises: Arc<dyn ExerciseRepository>,
    pub lessons: Arc<dyn LessonRepository>,
    pub quizzes: Arc<dyn QuizRepository>,
    pub quiz_results: Arc<dyn QuizResultRepository>,
    pub progress: Arc<dyn ProgressRepository>,
    pub users: Arc<dyn UserRepository>,
    pub badges: Arc<dyn BadgeRepository>,
    pub user_badges: Arc<dyn UserBadgeRepository>,
}

impl Repositories {
    pub async fn mongo(db: &Database) -> AppResult<Self> {
        let exercises = MongoExerciseRepository::new(db);
        exercises.ensure_indexes().await?;
        let lessons = MongoLessonRepository::new(db);
        lessons.ensure_indexes().await?;
        let quizzes = MongoQuizRepository::new(db);
        quizzes.ensure_indexes().await?;
        let quiz_results = MongoQuizResultRepository::new(db);
        quiz_results.ensure_indexes().await?;
        let progress = MongoProgressRepository::new(db);
        progress.ensure_indexes().await?;
        let users = MongoUserRepository::new(db);
        users.ensure_indexes().await?;
        let badges = MongoBadgeRepository::new(db);
        badges.ensure_indexes().await?;
        let user_badges = MongoUserBadgeRepository::new(db);
        user_badges.ensure_indexes().await?;

        Ok(Self {
            exercises: Arc::new(exercises),
            lessons: Arc::new(lessons),
            quizzes: Arc::new(quizzes),
            quiz_results: Arc::new(quiz_results),
            progress: Arc::new(progress),
            users: Arc::new(users),
            badges: Arc::new(badges),
            user_badges: Arc::new(user_badges),
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub quiz_grader_service: Arc<QuizGraderService>,
    pub progress_service: Arc<ProgressService>,
    pub streak_service: Arc<StreakService>,
    pub badge_evaluator: Arc<BadgeEvaluatorService>,
    pub badge_service: Arc<BadgeService>,
    pub config: Arc<Config>,
    /// `None` when running on non-Mongo repositories.
    pub db: Option<Database>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;
        let repositories = Repositories::mongo(&db).await?;

        let mut state = Self::from_repositories(repositories, config);
        state.db = Some(db);
        Ok(state)
    }

    pub fn from_repositories(repositories: Repositories, config: Config) -> Self {
        let badge_evaluator = Arc::new(BadgeEvaluatorService::new(
            repositories.badges.clone(),
            repositories.user_badges.clone(),
            repositories.progress.clone(),
            repositories.quiz_results.clone(),
        ));
        let streak_service = Arc::new(StreakService::new(repositories.users.clone()));

        let progress_service = Arc::new(ProgressService::new(
            repositories.lessons.clone(),
            repositories.progress.clone(),
            streak_service.clone(),
            badge_evaluator.clone(),
        ));
        let quiz_grader_service = Arc::new(QuizGraderService::new(
            repositories.quizzes.clone(),
            repositories.exercises.clone(),
            repositories.lessons.clone(),
            repositories.quiz_results.clone(),
            badge_evaluator.clone(),
        ));
        let badge_service = Arc::new(BadgeService::new(repositories.badges.clone()));

        Self {
            quiz_grader_service,
            progress_service,
            streak_service,
            badge_evaluator,
            badge_service,
            config: Arc::new(config),
            db: None,
        }
    }
}
