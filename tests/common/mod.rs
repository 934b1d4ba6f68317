#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use lumen_server::{
    app_state::{AppState, Repositories},
    config::Config,
    errors::{AppError, AppResult},
    models::domain::{
        Badge, BadgeCondition, BadgeRarity, ConditionType, CorrectAnswer, Exercise, Lesson, Quiz,
        QuizResult, StreakState, User, UserBadge, UserProgress,
    },
    models::domain::exercise::{Difficulty, ExerciseType},
    repositories::{
        BadgeRepository, ExerciseRepository, LessonRepository, ProgressRepository,
        QuizRepository, QuizResultRepository, UserBadgeRepository, UserRepository,
    },
};

fn page<T: Clone>(items: &[T], offset: i64, limit: i64) -> Vec<T> {
    let start = offset.max(0) as usize;
    let end = (start + limit.max(0) as usize).min(items.len());

    if start >= items.len() {
        vec![]
    } else {
        items[start..end].to_vec()
    }
}

#[derive(Default)]
pub struct InMemoryExerciseRepository {
    exercises: Arc<RwLock<HashMap<String, Exercise>>>,
}

impl InMemoryExerciseRepository {
    pub async fn insert(&self, exercise: Exercise) {
        self.exercises
            .write()
            .await
            .insert(exercise.id.clone(), exercise);
    }
}

#[async_trait]
impl ExerciseRepository for InMemoryExerciseRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Exercise>> {
        Ok(self.exercises.read().await.get(id).cloned())
    }

    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<Exercise>> {
        let exercises = self.exercises.read().await;
        Ok(ids.iter().filter_map(|id| exercises.get(id).cloned()).collect())
    }
}

#[derive(Default)]
pub struct InMemoryLessonRepository {
    lessons: Arc<RwLock<HashMap<String, Lesson>>>,
}

impl InMemoryLessonRepository {
    pub async fn insert(&self, lesson: Lesson) {
        self.lessons.write().await.insert(lesson.id.clone(), lesson);
    }
}

#[async_trait]
impl LessonRepository for InMemoryLessonRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Lesson>> {
        Ok(self.lessons.read().await.get(id).cloned())
    }

    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<Lesson>> {
        let lessons = self.lessons.read().await;
        Ok(ids.iter().filter_map(|id| lessons.get(id).cloned()).collect())
    }
}

#[derive(Default)]
pub struct InMemoryQuizRepository {
    quizzes: Arc<RwLock<HashMap<String, Quiz>>>,
}

impl InMemoryQuizRepository {
    pub async fn insert(&self, quiz: Quiz) {
        self.quizzes.write().await.insert(quiz.id.clone(), quiz);
    }
}

#[async_trait]
impl QuizRepository for InMemoryQuizRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>> {
        Ok(self.quizzes.read().await.get(id).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryQuizResultRepository {
    results: Arc<RwLock<Vec<QuizResult>>>,
}

impl InMemoryQuizResultRepository {
    pub async fn count(&self) -> usize {
        self.results.read().await.len()
    }
}

#[async_trait]
impl QuizResultRepository for InMemoryQuizResultRepository {
    async fn create(&self, result: QuizResult) -> AppResult<QuizResult> {
        let mut results = self.results.write().await;
        if results.iter().any(|r| r.id == result.id) {
            return Err(AppError::AlreadyExists(format!(
                "Quiz result with id '{}' already exists",
                result.id
            )));
        }
        results.push(result.clone());
        Ok(result)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<QuizResult>> {
        let results = self.results.read().await;
        Ok(results.iter().find(|r| r.id == id).cloned())
    }

    async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<QuizResult>> {
        let results = self.results.read().await;
        Ok(results.iter().filter(|r| r.user_id == user_id).cloned().collect())
    }

    async fn get_user_results(
        &self,
        user_id: &str,
        quiz_id: Option<String>,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<QuizResult>, i64)> {
        let results = self.results.read().await;
        let mut items: Vec<QuizResult> = results
            .iter()
            .filter(|r| r.user_id == user_id)
            .filter(|r| quiz_id.as_deref().map_or(true, |q| r.quiz_id == q))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));

        let total = items.len() as i64;
        Ok((page(&items, offset, limit), total))
    }
}

/// Keyed by (user_id, lesson_id) to mirror the unique index.
#[derive(Default)]
pub struct InMemoryProgressRepository {
    records: Arc<RwLock<HashMap<(String, String), UserProgress>>>,
}

#[async_trait]
impl ProgressRepository for InMemoryProgressRepository {
    async fn find_by_user_and_lesson(
        &self,
        user_id: &str,
        lesson_id: &str,
    ) -> AppResult<Option<UserProgress>> {
        let records = self.records.read().await;
        Ok(records
            .get(&(user_id.to_string(), lesson_id.to_string()))
            .cloned())
    }

    async fn insert(&self, progress: UserProgress) -> AppResult<UserProgress> {
        let mut records = self.records.write().await;
        let key = (progress.user_id.clone(), progress.lesson_id.clone());

        if records.contains_key(&key) {
            return Err(AppError::AlreadyExists(format!(
                "Progress for user '{}' lesson '{}' already exists",
                progress.user_id, progress.lesson_id
            )));
        }

        records.insert(key, progress.clone());
        Ok(progress)
    }

    async fn update(&self, progress: UserProgress) -> AppResult<UserProgress> {
        let mut records = self.records.write().await;
        let key = (progress.user_id.clone(), progress.lesson_id.clone());

        match records.get(&key) {
            Some(existing) if existing.id == progress.id => {
                records.insert(key, progress.clone());
                Ok(progress)
            }
            _ => Err(AppError::NotFound(format!(
                "Progress with id '{}' not found",
                progress.id
            ))),
        }
    }

    async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<UserProgress>> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn count_completed(&self, user_id: &str) -> AppResult<i64> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .filter(|p| p.user_id == user_id && p.completed)
            .count() as i64)
    }

    async fn find_recent(&self, user_id: &str, limit: usize) -> AppResult<Vec<UserProgress>> {
        let mut items = self.find_by_user(user_id).await?;
        items.sort_by(|a, b| b.last_attempt_at.cmp(&a.last_attempt_at));
        items.truncate(limit);
        Ok(items)
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserRepository {
    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.id.clone(), user);
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn update_streak(&self, id: &str, streak: StreakState) -> AppResult<()> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound(format!("User with id '{}' not found", id)))?;
        user.streak = streak;
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryBadgeRepository {
    badges: Arc<RwLock<HashMap<String, Badge>>>,
}

#[async_trait]
impl BadgeRepository for InMemoryBadgeRepository {
    async fn find_active(&self) -> AppResult<Vec<Badge>> {
        let badges = self.badges.read().await;
        Ok(badges.values().filter(|b| b.is_active).cloned().collect())
    }

    async fn find_all(&self) -> AppResult<Vec<Badge>> {
        Ok(self.badges.read().await.values().cloned().collect())
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Badge>> {
        Ok(self.badges.read().await.get(id).cloned())
    }

    async fn create(&self, badge: Badge) -> AppResult<Badge> {
        let mut badges = self.badges.write().await;
        if badges.contains_key(&badge.id) {
            return Err(AppError::AlreadyExists(format!(
                "Badge with id '{}' already exists",
                badge.id
            )));
        }
        badges.insert(badge.id.clone(), badge.clone());
        Ok(badge)
    }

    async fn set_active(&self, id: &str, is_active: bool) -> AppResult<Badge> {
        let mut badges = self.badges.write().await;
        let badge = badges
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound(format!("Badge with id '{}' not found", id)))?;
        badge.is_active = is_active;
        Ok(badge.clone())
    }
}

/// Keyed by (user_id, badge_id) to mirror the unique index.
#[derive(Default)]
pub struct InMemoryUserBadgeRepository {
    awards: Arc<RwLock<HashMap<(String, String), UserBadge>>>,
}

impl InMemoryUserBadgeRepository {
    pub async fn count_for(&self, user_id: &str) -> usize {
        let awards = self.awards.read().await;
        awards.keys().filter(|(user, _)| user == user_id).count()
    }
}

#[async_trait]
impl UserBadgeRepository for InMemoryUserBadgeRepository {
    async fn create(&self, user_badge: UserBadge) -> AppResult<UserBadge> {
        let mut awards = self.awards.write().await;
        let key = (user_badge.user_id.clone(), user_badge.badge_id.clone());

        if awards.contains_key(&key) {
            return Err(AppError::AlreadyExists(format!(
                "Badge '{}' already awarded to user '{}'",
                user_badge.badge_id, user_badge.user_id
            )));
        }

        awards.insert(key, user_badge.clone());
        Ok(user_badge)
    }

    async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<UserBadge>> {
        let awards = self.awards.read().await;
        let mut items: Vec<UserBadge> = awards
            .values()
            .filter(|ub| ub.user_id == user_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.earned_at.cmp(&a.earned_at));
        Ok(items)
    }

    async fn find_badge_ids_by_user(&self, user_id: &str) -> AppResult<Vec<String>> {
        let awards = self.awards.read().await;
        Ok(awards
            .keys()
            .filter(|(user, _)| user == user_id)
            .map(|(_, badge)| badge.clone())
            .collect())
    }
}

/// In-memory stores with typed handles kept for seeding and inspection.
#[derive(Clone, Default)]
pub struct TestStores {
    pub exercises: Arc<InMemoryExerciseRepository>,
    pub lessons: Arc<InMemoryLessonRepository>,
    pub quizzes: Arc<InMemoryQuizRepository>,
    pub quiz_results: Arc<InMemoryQuizResultRepository>,
    pub progress: Arc<InMemoryProgressRepository>,
    pub users: Arc<InMemoryUserRepository>,
    pub badges: Arc<InMemoryBadgeRepository>,
    pub user_badges: Arc<InMemoryUserBadgeRepository>,
}

impl TestStores {
    pub fn repositories(&self) -> Repositories {
        Repositories {
            exercises: self.exercises.clone(),
            lessons: self.lessons.clone(),
            quizzes: self.quizzes.clone(),
            quiz_results: self.quiz_results.clone(),
            progress: self.progress.clone(),
            users: self.users.clone(),
            badges: self.badges.clone(),
            user_badges: self.user_badges.clone(),
        }
    }

    pub fn app_state(&self) -> AppState {
        AppState::from_repositories(self.repositories(), Config::test_config())
    }

    pub async fn seed_badge(&self, badge: Badge) -> Badge {
        self.badges
            .create(badge)
            .await
            .expect("seeding a badge should work")
    }
}

pub fn exercise(id: &str, lesson_id: &str, answer: CorrectAnswer, points: i32) -> Exercise {
    Exercise {
        id: id.to_string(),
        exercise_type: ExerciseType::FillBlank,
        question: format!("Question {}", id),
        options: Vec::new(),
        correct_answer: answer,
        explanation: None,
        hint: None,
        difficulty: Difficulty::Medium,
        points,
        lesson_id: lesson_id.to_string(),
        created_at: None,
    }
}

pub fn badge(name: &str, condition_type: ConditionType, value: f64) -> Badge {
    Badge::new(
        name,
        &format!("{} badge", name),
        "🏅",
        BadgeRarity::Common,
        BadgeCondition::new(condition_type, value),
    )
}

pub fn progress_at(user_id: &str, lesson_id: &str, at: DateTime<Utc>) -> UserProgress {
    let mut progress = UserProgress::first_attempt(user_id, lesson_id, &Default::default(), at);
    progress.completed = true;
    progress.completed_at = Some(at);
    progress
}
