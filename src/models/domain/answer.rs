use serde::{Deserialize, Serialize};

/// Reference answer stored on an exercise.
///
/// Each case carries its own comparison rule, see
/// [`crate::services::answer_evaluator::AnswerEvaluator`].
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum CorrectAnswer {
    Number(f64),
    Text(String),
    Sequence(Vec<AnswerScalar>),
}

/// One position of a sequence answer.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum AnswerScalar {
    Number(f64),
    Text(String),
}

impl From<&str> for CorrectAnswer {
    fn from(value: &str) -> Self {
        CorrectAnswer::Text(value.to_string())
    }
}

impl From<f64> for CorrectAnswer {
    fn from(value: f64) -> Self {
        CorrectAnswer::Number(value)
    }
}
