mod common;

use chrono::Duration;
use serde_json::json;

use common::{badge, exercise, TestStores};
use lumen_server::{
    errors::AppError,
    models::{
        domain::{AnswerScalar, ConditionType, CorrectAnswer, Lesson, Quiz, StreakState, User},
        dto::request::{ProgressUpdateRequest, SubmitQuizRequest, SubmittedAnswer},
    },
    repositories::{ProgressRepository, UserRepository},
    services::{AwardOutcome, StreakTracker},
};

fn submission(answers: Vec<(&str, serde_json::Value)>, seconds: i64) -> SubmitQuizRequest {
    SubmitQuizRequest {
        answers: answers
            .into_iter()
            .map(|(id, value)| SubmittedAnswer {
                exercise_id: id.to_string(),
                user_answer: Some(value),
            })
            .collect(),
        time_spent_seconds: seconds,
    }
}

fn completed() -> ProgressUpdateRequest {
    ProgressUpdateRequest {
        completed: Some(true),
        completion_percentage: Some(100),
        score: Some(10),
        time_spent_minutes: Some(15),
    }
}

async fn seed_quiz(stores: &TestStores, total_points: i32) -> Quiz {
    stores
        .lessons
        .insert(Lesson::new("l-geo", "Capitals", Some("geography")))
        .await;
    stores
        .lessons
        .insert(Lesson::new("l-math", "Numbers", Some("math")))
        .await;

    let exercises = vec![
        exercise("ex-capital", "l-geo", CorrectAnswer::from("Paris"), 2),
        exercise("ex-pi", "l-math", CorrectAnswer::Number(3.14159), 3),
        exercise(
            "ex-evens",
            "l-math",
            CorrectAnswer::Sequence(vec![
                AnswerScalar::Text("2".to_string()),
                AnswerScalar::Text("4".to_string()),
            ]),
            5,
        ),
    ];
    for ex in &exercises {
        stores.exercises.insert(ex.clone()).await;
    }

    let quiz = Quiz::new(
        "quiz-1",
        "Mixed bag",
        exercises.iter().map(|e| e.id.clone()).collect(),
        total_points,
    );
    stores.quizzes.insert(quiz.clone()).await;
    quiz
}

#[tokio::test]
async fn quiz_submission_is_graded_and_kept_per_attempt() {
    let stores = TestStores::default();
    let state = stores.app_state();
    seed_quiz(&stores, 10).await;

    let request = submission(
        vec![
            ("ex-capital", json!(" paris")),
            ("ex-pi", json!("3.14158")),
            ("ex-evens", json!(["2"])),
            ("ex-from-another-quiz", json!("Paris")),
        ],
        95,
    );

    let outcome = state
        .quiz_grader_service
        .submit("quiz-1", "u1", request.clone())
        .await
        .expect("submission should be graded");

    let result = outcome.result;
    assert_eq!(result.score, 5);
    assert_eq!(result.total_score, 10);
    assert_eq!(result.percentage, 50);
    assert_eq!(result.correct_answers, 2);
    assert_eq!(result.wrong_answers, 1);
    assert_eq!(result.total_questions, 3);
    assert_eq!(result.answers.len(), 3);
    assert!(outcome.new_badges.is_empty());

    let math = result
        .topic_stats
        .iter()
        .find(|t| t.topic_id == "math")
        .expect("math topic present");
    assert_eq!((math.correct, math.total), (1, 2));

    state
        .quiz_grader_service
        .submit("quiz-1", "u1", request)
        .await
        .expect("second attempt should be graded");
    assert_eq!(stores.quiz_results.count().await, 2);
}

#[tokio::test]
async fn quiz_worth_no_points_scores_zero_percent() {
    let stores = TestStores::default();
    let state = stores.app_state();
    seed_quiz(&stores, 0).await;

    let result = state
        .quiz_grader_service
        .grade("quiz-1", "u1", &submission(vec![("ex-capital", json!("Paris"))], 10))
        .await
        .expect("submission should be graded");

    assert_eq!(result.score, 2);
    assert_eq!(result.percentage, 0);
}

#[tokio::test]
async fn inactive_or_missing_quiz_is_not_found() {
    let stores = TestStores::default();
    let state = stores.app_state();
    let mut quiz = seed_quiz(&stores, 10).await;
    quiz.is_active = false;
    stores.quizzes.insert(quiz).await;

    let inactive = state
        .quiz_grader_service
        .grade("quiz-1", "u1", &submission(vec![], 10))
        .await;
    assert!(matches!(inactive, Err(AppError::NotFound(_))));

    let missing = state
        .quiz_grader_service
        .grade("no-such-quiz", "u1", &submission(vec![], 10))
        .await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
    assert_eq!(stores.quiz_results.count().await, 0);
}

#[tokio::test]
async fn negative_time_is_rejected_before_grading() {
    let stores = TestStores::default();
    let state = stores.app_state();
    seed_quiz(&stores, 10).await;

    let result = state
        .quiz_grader_service
        .grade("quiz-1", "u1", &submission(vec![("ex-pi", json!(3.14159))], -1))
        .await;

    assert!(matches!(result, Err(AppError::ValidationError(_))));
    assert_eq!(stores.quiz_results.count().await, 0);
}

#[tokio::test]
async fn progress_aggregates_attempts_and_keeps_completion() {
    let stores = TestStores::default();
    let state = stores.app_state();
    stores.users.insert(User::new("u1", "ada")).await;
    stores.lessons.insert(Lesson::new("l1", "Intro", None)).await;

    state
        .progress_service
        .record_attempt(
            "u1",
            "l1",
            ProgressUpdateRequest {
                completion_percentage: Some(140),
                score: Some(6),
                time_spent_minutes: Some(10),
                ..Default::default()
            },
        )
        .await
        .expect("first attempt");

    let second = state
        .progress_service
        .record_attempt("u1", "l1", completed())
        .await
        .expect("second attempt");
    let completed_at = second.progress.completed_at;
    assert!(completed_at.is_some());

    let third = state
        .progress_service
        .record_attempt(
            "u1",
            "l1",
            ProgressUpdateRequest {
                completed: Some(false),
                score: Some(3),
                time_spent_minutes: Some(5),
                ..Default::default()
            },
        )
        .await
        .expect("third attempt");

    let progress = third.progress;
    assert_eq!(progress.attempts, 3);
    assert_eq!(progress.best_score, 10);
    assert_eq!(progress.time_spent_minutes, 30);
    assert_eq!(progress.completion_percentage, 100);
    assert!(progress.completed);
    assert_eq!(progress.completed_at, completed_at);
}

#[tokio::test]
async fn unknown_lesson_leaves_no_progress() {
    let stores = TestStores::default();
    let state = stores.app_state();

    let result = state
        .progress_service
        .record_attempt("u1", "missing", completed())
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
    assert!(stores
        .progress
        .find_by_user("u1")
        .await
        .expect("list")
        .is_empty());
}

#[tokio::test]
async fn completing_lessons_moves_the_streak() {
    let stores = TestStores::default();
    let state = stores.app_state();
    let today = StreakTracker::today();

    stores.users.insert(User::new("fresh", "fresh")).await;
    let mut returning = User::new("returning", "returning");
    returning.streak = StreakState {
        current: 1,
        last_study_date: Some(today - Duration::days(1)),
    };
    stores.users.insert(returning).await;
    let mut lapsed = User::new("lapsed", "lapsed");
    lapsed.streak = StreakState {
        current: 6,
        last_study_date: Some(today - Duration::days(3)),
    };
    stores.users.insert(lapsed).await;

    stores.lessons.insert(Lesson::new("l1", "One", None)).await;
    stores.lessons.insert(Lesson::new("l2", "Two", None)).await;

    for user in ["fresh", "returning", "lapsed"] {
        state
            .progress_service
            .record_attempt(user, "l1", completed())
            .await
            .expect("completion recorded");
    }
    state
        .progress_service
        .record_attempt("fresh", "l2", completed())
        .await
        .expect("same-day completion recorded");

    let streak_of = |id: &'static str| {
        let users = stores.users.clone();
        async move {
            users
                .find_by_id(id)
                .await
                .expect("find")
                .expect("user exists")
                .streak
        }
    };

    let fresh = streak_of("fresh").await;
    assert_eq!(fresh.current, 1);
    assert_eq!(fresh.last_study_date, Some(today));
    assert_eq!(streak_of("returning").await.current, 2);
    assert_eq!(streak_of("lapsed").await.current, 1);
}

#[tokio::test]
async fn progress_survives_unknown_user_on_streak_update() {
    let stores = TestStores::default();
    let state = stores.app_state();
    stores.lessons.insert(Lesson::new("l1", "One", None)).await;

    let outcome = state
        .progress_service
        .record_attempt("not-a-user", "l1", completed())
        .await
        .expect("progress should still be written");

    assert!(outcome.progress.completed);
}

#[tokio::test]
async fn nine_of_ten_lessons_awards_badge_once() {
    let stores = TestStores::default();
    let state = stores.app_state();
    stores.users.insert(User::new("u1", "ada")).await;
    let nine = stores
        .seed_badge(badge("Nine Lives", ConditionType::LessonsCompleted, 9.0))
        .await;

    for i in 1..=10 {
        stores
            .lessons
            .insert(Lesson::new(&format!("l{}", i), "Lesson", None))
            .await;
    }

    let mut awarded = Vec::new();
    for i in 1..=9 {
        let outcome = state
            .progress_service
            .record_attempt("u1", &format!("l{}", i), completed())
            .await
            .expect("completion recorded");
        awarded.extend(outcome.new_badges);
    }

    assert_eq!(awarded.len(), 1);
    assert_eq!(awarded[0].id, nine.id);
    assert_eq!(awarded[0].metadata, json!({ "completed": 9 }));

    let rerun = state
        .badge_evaluator
        .evaluate("u1")
        .await
        .expect("evaluation should work");
    assert!(rerun.is_empty());
    assert_eq!(stores.user_badges.count_for("u1").await, 1);
}

#[tokio::test]
async fn evaluation_is_idempotent_and_awards_are_unique() {
    let stores = TestStores::default();
    let state = stores.app_state();
    let starter = stores
        .seed_badge(badge("Starter", ConditionType::ExercisesCompleted, 1.0))
        .await;

    stores
        .progress
        .insert(common::progress_at("u1", "l1", chrono::Utc::now()))
        .await
        .expect("seed progress");

    let first = state.badge_evaluator.evaluate("u1").await.expect("first run");
    assert_eq!(first.len(), 1);

    let second = state.badge_evaluator.evaluate("u1").await.expect("second run");
    assert!(second.is_empty());

    let again = state
        .badge_evaluator
        .award("u1", &starter, json!({}))
        .await
        .expect("duplicate award is not an error");
    assert_eq!(again, AwardOutcome::AlreadyAwarded);
    assert_eq!(stores.user_badges.count_for("u1").await, 1);
}

#[tokio::test]
async fn fast_high_score_earns_quiz_badge_on_submission() {
    let stores = TestStores::default();
    let state = stores.app_state();
    seed_quiz(&stores, 10).await;

    let mut speedy = badge("Speed Demon", ConditionType::QuizScore, 90.0);
    speedy.condition = speedy.condition.with_time_limit(2.0);
    let speedy = stores.seed_badge(speedy).await;

    let slow = submission(
        vec![
            ("ex-capital", json!("Paris")),
            ("ex-pi", json!(3.14159)),
            ("ex-evens", json!(["2", "4"])),
        ],
        600,
    );
    let outcome = state
        .quiz_grader_service
        .submit("quiz-1", "u1", slow.clone())
        .await
        .expect("slow submission graded");
    assert_eq!(outcome.result.percentage, 100);
    assert!(outcome.new_badges.is_empty());

    let fast = SubmitQuizRequest {
        time_spent_seconds: 90,
        ..slow
    };
    let outcome = state
        .quiz_grader_service
        .submit("quiz-1", "u1", fast)
        .await
        .expect("fast submission graded");

    assert_eq!(outcome.new_badges.len(), 1);
    assert_eq!(outcome.new_badges[0].id, speedy.id);
    assert_eq!(outcome.new_badges[0].metadata["qualifying_results"], 1);
    assert_eq!(outcome.new_badges[0].metadata["max_percentage"], 100);
}

#[tokio::test]
async fn streak_badges_share_one_recent_window() {
    let stores = TestStores::default();
    let state = stores.app_state();
    let pair = stores
        .seed_badge(badge("Two Days", ConditionType::Streak, 2.0))
        .await;
    stores
        .seed_badge(badge("Three Days", ConditionType::Streak, 3.0))
        .await;

    let noon_today = chrono::Local::now()
        .date_naive()
        .and_hms_opt(12, 0, 0)
        .expect("valid time")
        .and_local_timezone(chrono::Local)
        .earliest()
        .expect("noon exists locally")
        .with_timezone(&chrono::Utc);

    for (lesson_id, at) in [
        ("l1", noon_today),
        ("l2", noon_today - Duration::days(1)),
        ("l3", noon_today - Duration::days(1) - Duration::hours(1)),
    ] {
        stores
            .progress
            .insert(common::progress_at("u1", lesson_id, at))
            .await
            .expect("seed progress");
    }

    let awarded = state
        .badge_evaluator
        .evaluate("u1")
        .await
        .expect("evaluation should work");

    assert_eq!(awarded.len(), 1);
    assert_eq!(awarded[0].id, pair.id);
    assert_eq!(awarded[0].metadata, json!({ "distinct_days": 2 }));
    assert_eq!(stores.user_badges.count_for("u1").await, 1);
}
