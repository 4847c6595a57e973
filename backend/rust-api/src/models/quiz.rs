use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

use super::question::{lenient_id, Question};

/// `quiz_category.type` value the client sends to play across all categories
pub const ALL_CATEGORIES_TYPE: &str = "click";

/// Selection domain for one quiz draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizScope {
    All,
    Category(i64),
}

/// Body of POST /quizzes; shape is checked in [`QuizRequest::parse`]
#[derive(Debug, Default, Deserialize)]
pub struct QuizRequest {
    #[serde(default)]
    pub previous_questions: Option<Value>,
    #[serde(default)]
    pub quiz_category: Option<Value>,
}

impl QuizRequest {
    pub fn parse(&self) -> Result<(QuizScope, HashSet<i64>), String> {
        let previous = match &self.previous_questions {
            Some(Value::Array(ids)) => ids
                .iter()
                .map(|id| lenient_id(id).ok_or_else(|| format!("Invalid question id: {}", id)))
                .collect::<Result<HashSet<_>, _>>()?,
            Some(_) => return Err("previous_questions must be an array".to_string()),
            None => return Err("Missing field: previous_questions".to_string()),
        };

        let category = match &self.quiz_category {
            Some(Value::Object(category)) => category,
            Some(_) => return Err("quiz_category must be an object".to_string()),
            None => return Err("Missing field: quiz_category".to_string()),
        };

        let kind = category
            .get("type")
            .ok_or("Missing field: quiz_category.type")?;

        let scope = if kind.as_str() == Some(ALL_CATEGORIES_TYPE) {
            QuizScope::All
        } else {
            let id = category
                .get("id")
                .ok_or("Missing field: quiz_category.id")?;
            QuizScope::Category(lenient_id(id).ok_or("quiz_category.id must be an integer")?)
        };

        Ok((scope, previous))
    }
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub success: bool,
    pub question: Option<Question>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(value: Value) -> QuizRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_parse_specific_category() {
        let (scope, previous) = request(json!({
            "previous_questions": [10, 11],
            "quiz_category": {"id": "1", "type": "Science"}
        }))
        .parse()
        .unwrap();

        assert_eq!(scope, QuizScope::Category(1));
        assert_eq!(previous, HashSet::from([10, 11]));
    }

    #[test]
    fn test_parse_all_categories_sentinel() {
        let (scope, previous) = request(json!({
            "previous_questions": [],
            "quiz_category": {"id": 0, "type": "click"}
        }))
        .parse()
        .unwrap();

        assert_eq!(scope, QuizScope::All);
        assert!(previous.is_empty());
    }

    #[test]
    fn test_parse_accepts_integral_floats() {
        let (scope, previous) = request(json!({
            "previous_questions": [3.0, 4],
            "quiz_category": {"id": 2.0, "type": "Art"}
        }))
        .parse()
        .unwrap();

        assert_eq!(scope, QuizScope::Category(2));
        assert_eq!(previous, HashSet::from([3, 4]));
    }

    #[test]
    fn test_sentinel_does_not_need_id() {
        let (scope, _) = request(json!({
            "previous_questions": [],
            "quiz_category": {"type": "click"}
        }))
        .parse()
        .unwrap();
        assert_eq!(scope, QuizScope::All);
    }

    #[test]
    fn test_parse_rejects_malformed_shapes() {
        let cases = [
            json!({}),
            json!({"previous_questions": [1]}),
            json!({"quiz_category": {"id": 1, "type": "Science"}}),
            json!({"previous_questions": 1, "quiz_category": {"id": 1, "type": "Science"}}),
            json!({"previous_questions": ["x"], "quiz_category": {"id": 1, "type": "Science"}}),
            json!({"previous_questions": [], "quiz_category": "Science"}),
            json!({"previous_questions": [], "quiz_category": {"id": 1}}),
            json!({"previous_questions": [], "quiz_category": {"type": "Science"}}),
            json!({"previous_questions": [], "quiz_category": {"id": "one", "type": "Science"}}),
        ];

        for case in cases {
            assert!(request(case.clone()).parse().is_err(), "accepted {case}");
        }
    }
}
