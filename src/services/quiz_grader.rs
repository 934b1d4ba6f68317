use std::{
    collections::{BTreeMap, HashMap, HashSet},
    sync::Arc,
};

use chrono::{DateTime, Utc};
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Exercise, GradedAnswer, Lesson, Quiz, QuizResult, TopicStat},
        dto::{
            request::{SubmitQuizRequest, SubmittedAnswer},
            response::EarnedBadgeDto,
        },
    },
    repositories::{ExerciseRepository, LessonRepository, QuizRepository, QuizResultRepository},
    services::{answer_evaluator::AnswerEvaluator, badge_evaluator::BadgeEvaluatorService},
};

/// Pure scoring of one submission against the quiz's own exercises.
pub struct QuizGrader;

impl QuizGrader {
    /// Answers for exercises outside `exercises` are skipped and do not count
    /// towards any total. Only the first answer per exercise is graded.
    pub fn score_submission(
        quiz: &Quiz,
        exercises: &[Exercise],
        lessons: &[Lesson],
        answers: &[SubmittedAnswer],
        time_spent_seconds: i64,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> QuizResult {
        let exercise_map: HashMap<&str, &Exercise> =
            exercises.iter().map(|e| (e.id.as_str(), e)).collect();
        let topic_by_lesson: HashMap<&str, &str> = lessons
            .iter()
            .filter_map(|l| l.topic_id.as_deref().map(|topic| (l.id.as_str(), topic)))
            .collect();

        let mut earned = 0;
        let mut correct_answers = 0;
        let mut wrong_answers = 0;
        let mut graded = Vec::with_capacity(answers.len());
        let mut topics: BTreeMap<&str, (i32, i32)> = BTreeMap::new();
        let mut seen: HashSet<&str> = HashSet::new();

        for answer in answers {
            let Some(exercise) = exercise_map.get(answer.exercise_id.as_str()) else {
                log::debug!(
                    "Skipping answer for exercise '{}' not in quiz '{}'",
                    answer.exercise_id,
                    quiz.id
                );
                continue;
            };

            if !seen.insert(exercise.id.as_str()) {
                log::debug!(
                    "Skipping repeated answer for exercise '{}' in quiz '{}'",
                    exercise.id,
                    quiz.id
                );
                continue;
            }

            let is_correct =
                AnswerEvaluator::is_correct(&exercise.correct_answer, answer.user_answer.as_ref());
            let points = if is_correct { exercise.points } else { 0 };

            earned += points;
            if is_correct {
                correct_answers += 1;
            } else {
                wrong_answers += 1;
            }

            if let Some(topic) = topic_by_lesson.get(exercise.lesson_id.as_str()) {
                let entry = topics.entry(*topic).or_insert((0, 0));
                if is_correct {
                    entry.0 += 1;
                }
                entry.1 += 1;
            }

            graded.push(GradedAnswer {
                exercise_id: exercise.id.clone(),
                user_answer: answer.user_answer.clone().unwrap_or(serde_json::Value::Null),
                is_correct,
                points,
            });
        }

        QuizResult {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            quiz_id: quiz.id.clone(),
            score: earned,
            total_score: quiz.total_points,
            percentage: Self::percentage(earned, quiz.total_points),
            total_questions: correct_answers + wrong_answers,
            correct_answers,
            wrong_answers,
            time_spent_seconds,
            answers: graded,
            topic_stats: topics
                .into_iter()
                .map(|(topic_id, (correct, total))| TopicStat {
                    topic_id: topic_id.to_string(),
                    correct,
                    total,
                })
                .collect(),
            completed_at: now,
        }
    }

    /// Rounded share of `total`, within 0..=100. Zero when the quiz is worth
    /// no points.
    pub fn percentage(earned: i32, total: i32) -> i32 {
        if total <= 0 {
            return 0;
        }
        let ratio = earned as f64 / total as f64 * 100.0;
        (ratio.round() as i32).clamp(0, 100)
    }
}

#[derive(Debug, Clone)]
pub struct QuizSubmissionOutcome {
    pub result: QuizResult,
    pub new_badges: Vec<EarnedBadgeDto>,
}

pub struct QuizGraderService {
    quiz_repository: Arc<dyn QuizRepository>,
    exercise_repository: Arc<dyn ExerciseRepository>,
    lesson_repository: Arc<dyn LessonRepository>,
    quiz_result_repository: Arc<dyn QuizResultRepository>,
    badge_evaluator: Arc<BadgeEvaluatorService>,
}

impl QuizGraderService {
    pub fn new(
        quiz_repository: Arc<dyn QuizRepository>,
        exercise_repository: Arc<dyn ExerciseRepository>,
        lesson_repository: Arc<dyn LessonRepository>,
        quiz_result_repository: Arc<dyn QuizResultRepository>,
        badge_evaluator: Arc<BadgeEvaluatorService>,
    ) -> Self {
        Self {
            quiz_repository,
            exercise_repository,
            lesson_repository,
            quiz_result_repository,
            badge_evaluator,
        }
    }

    /// Grades and stores a submission. Every submission creates a new result.
    pub async fn grade(
        &self,
        quiz_id: &str,
        user_id: &str,
        request: &SubmitQuizRequest,
    ) -> AppResult<QuizResult> {
        let quiz = self
            .quiz_repository
            .find_by_id(quiz_id)
            .await?
            .filter(|quiz| quiz.is_active)
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", quiz_id)))?;

        request.validate()?;

        let exercises = self
            .exercise_repository
            .find_by_ids(&quiz.exercise_ids)
            .await?;

        let mut lesson_ids: Vec<String> = exercises.iter().map(|e| e.lesson_id.clone()).collect();
        lesson_ids.sort();
        lesson_ids.dedup();
        let lessons = self.lesson_repository.find_by_ids(&lesson_ids).await?;

        let result = QuizGrader::score_submission(
            &quiz,
            &exercises,
            &lessons,
            &request.answers,
            request.time_spent_seconds,
            user_id,
            Utc::now(),
        );

        let saved = self.quiz_result_repository.create(result).await?;
        log::info!(
            "User '{}' scored {}/{} ({}%) on quiz '{}'",
            user_id,
            saved.score,
            saved.total_score,
            saved.percentage,
            quiz_id
        );
        Ok(saved)
    }

    /// `grade` followed by badge evaluation. Badge failures are logged and
    /// leave the stored result untouched.
    pub async fn submit(
        &self,
        quiz_id: &str,
        user_id: &str,
        request: SubmitQuizRequest,
    ) -> AppResult<QuizSubmissionOutcome> {
        let result = self.grade(quiz_id, user_id, &request).await?;

        let new_badges = match self.badge_evaluator.evaluate(user_id).await {
            Ok(badges) => badges,
            Err(e) => {
                log::warn!("Failed to evaluate badges for user '{}': {}", user_id, e);
                Vec::new()
            }
        };

        Ok(QuizSubmissionOutcome { result, new_badges })
    }

    pub async fn get_result(&self, id: &str) -> AppResult<QuizResult> {
        self.quiz_result_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz result with id '{}' not found", id)))
    }

    pub async fn get_user_results(
        &self,
        user_id: &str,
        quiz_id: Option<String>,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<QuizResult>, i64)> {
        self.quiz_result_repository
            .get_user_results(user_id, quiz_id, offset, limit)
            .await
    }
}
