use serde::{Deserialize, Serialize};

/// The part of a lesson this service reads: its identity and owning topic.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Lesson {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub topic_id: Option<String>,
}

impl Lesson {
    pub fn new(id: &str, title: &str, topic_id: Option<&str>) -> Self {
        Lesson {
            id: id.to_string(),
            title: title.to_string(),
            topic_id: topic_id.map(str::to_string),
        }
    }
}
