use serde_json::Value;

use crate::models::domain::{AnswerScalar, CorrectAnswer};

/// Absolute tolerance for numeric answers.
pub const NUMERIC_TOLERANCE: f64 = 1e-4;

/// Decides whether a single submitted answer matches an exercise's reference
/// answer. Never fails: malformed or missing answers are simply incorrect.
pub struct AnswerEvaluator;

impl AnswerEvaluator {
    pub fn is_correct(correct: &CorrectAnswer, user_answer: Option<&Value>) -> bool {
        let Some(user_answer) = user_answer else {
            return false;
        };

        match correct {
            CorrectAnswer::Number(expected) => Self::numbers_match(*expected, user_answer),
            CorrectAnswer::Text(expected) => Self::texts_match(expected, user_answer),
            CorrectAnswer::Sequence(expected) => Self::sequences_match(expected, user_answer),
        }
    }

    fn sequences_match(expected: &[AnswerScalar], user_answer: &Value) -> bool {
        let Value::Array(given) = user_answer else {
            return false;
        };

        if given.len() != expected.len() {
            return false;
        }

        expected.iter().zip(given).all(|(position, value)| match position {
            AnswerScalar::Number(n) => Self::numbers_match(*n, value),
            AnswerScalar::Text(t) => Self::texts_match(t, value),
        })
    }

    fn numbers_match(expected: f64, user_answer: &Value) -> bool {
        // NaN never compares below the tolerance.
        (parse_number(user_answer) - expected).abs() < NUMERIC_TOLERANCE
    }

    fn texts_match(expected: &str, user_answer: &Value) -> bool {
        match render_text(user_answer) {
            Some(given) => normalize(expected) == normalize(&given),
            None => false,
        }
    }
}

/// Numeric reading of a submitted value. Anything that is not a number or a
/// numeric string reads as NaN.
pub fn parse_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                f64::NAN
            } else {
                trimmed.parse::<f64>().unwrap_or(f64::NAN)
            }
        }
        _ => f64::NAN,
    }
}

fn render_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}
