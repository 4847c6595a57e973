use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

/// Trivia question as exposed over the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    /// Category id (ref: categories)
    pub category: i64,
    pub difficulty: i64,
}

/// Validated input for inserting a question; the store assigns the id
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: i64,
    #[validate(range(min = 1, message = "Difficulty must be a positive integer"))]
    pub difficulty: i64,
}

impl NewQuestion {
    pub fn with_id(self, id: i64) -> Question {
        Question {
            id,
            question: self.question,
            answer: self.answer,
            category: self.category,
            difficulty: self.difficulty,
        }
    }
}

/// Body of POST /questions: either a new question or a `search` term
#[derive(Debug, Default, Deserialize)]
pub struct QuestionPayload {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub category: Option<Value>,
    #[serde(default)]
    pub difficulty: Option<Value>,
    #[serde(default)]
    pub search: Option<Value>,
}

/// Outcome of inspecting the `search` field of a payload
#[derive(Debug, PartialEq, Eq)]
pub enum SearchField<'a> {
    Absent,
    Term(&'a str),
    NotAString,
}

impl QuestionPayload {
    /// Null and empty strings count as "no search requested".
    pub fn search_term(&self) -> SearchField<'_> {
        match &self.search {
            None | Some(Value::Null) => SearchField::Absent,
            Some(Value::String(term)) if term.is_empty() => SearchField::Absent,
            Some(Value::String(term)) => SearchField::Term(term),
            Some(_) => SearchField::NotAString,
        }
    }

    /// Checks that all four fields are present and converts them.
    pub fn into_new_question(self) -> Result<NewQuestion, String> {
        let question = self.question.ok_or("Missing field: question")?;
        let answer = self.answer.ok_or("Missing field: answer")?;
        let category = self
            .category
            .as_ref()
            .filter(|v| !v.is_null())
            .ok_or("Missing field: category")?;
        let difficulty = self
            .difficulty
            .as_ref()
            .filter(|v| !v.is_null())
            .ok_or("Missing field: difficulty")?;

        let new_question = NewQuestion {
            question,
            answer,
            category: lenient_id(category).ok_or("category must be an integer id")?,
            difficulty: lenient_id(difficulty).ok_or("difficulty must be an integer")?,
        };
        new_question.validate().map_err(|e| e.to_string())?;

        Ok(new_question)
    }
}

/// Body of POST /search
#[derive(Debug, Default, Deserialize)]
pub struct SearchRequest {
    #[serde(default, rename = "searchTerm")]
    pub search_term: Option<Value>,
}

/// Reads an integer that may arrive as a JSON number (integral floats
/// included) or a numeric string.
pub fn lenient_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// `?page=N` query; anything that is not a number falls back to the first page
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    /// Numbers too large for `u32` saturate, so they still land past the last page.
    pub fn page(&self) -> u32 {
        let Some(raw) = self.page.as_deref() else {
            return 1;
        };
        let digits = raw.trim();
        let digits = digits.strip_prefix('+').unwrap_or(digits);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return 1;
        }
        digits.parse().unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> QuestionPayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_lenient_id() {
        assert_eq!(lenient_id(&json!(4)), Some(4));
        assert_eq!(lenient_id(&json!("4")), Some(4));
        assert_eq!(lenient_id(&json!(" 12 ")), Some(12));
        assert_eq!(lenient_id(&json!("four")), None);
        assert_eq!(lenient_id(&json!(1.5)), None);
        assert_eq!(lenient_id(&json!(1.0)), Some(1));
        assert_eq!(lenient_id(&json!(-3.0)), Some(-3));
        assert_eq!(lenient_id(&json!(null)), None);
    }

    #[test]
    fn test_page_query_defaults_to_first_page() {
        assert_eq!(PageQuery { page: None }.page(), 1);
        assert_eq!(PageQuery { page: Some("abc".into()) }.page(), 1);
        assert_eq!(PageQuery { page: Some("3".into()) }.page(), 3);
        assert_eq!(PageQuery { page: Some("0".into()) }.page(), 0);
        assert_eq!(PageQuery { page: Some("-2".into()) }.page(), 1);
    }

    #[test]
    fn test_page_query_saturates_large_numbers() {
        assert_eq!(
            PageQuery { page: Some("5000000000".into()) }.page(),
            u32::MAX
        );
        assert_eq!(
            PageQuery { page: Some("99999999999999999999999".into()) }.page(),
            u32::MAX
        );
    }

    #[test]
    fn test_search_term_classification() {
        assert_eq!(payload(json!({})).search_term(), SearchField::Absent);
        assert_eq!(payload(json!({"search": null})).search_term(), SearchField::Absent);
        assert_eq!(payload(json!({"search": ""})).search_term(), SearchField::Absent);
        assert_eq!(
            payload(json!({"search": "title"})).search_term(),
            SearchField::Term("title")
        );
        assert_eq!(
            payload(json!({"search": 22})).search_term(),
            SearchField::NotAString
        );
    }

    #[test]
    fn test_into_new_question_accepts_string_numbers() {
        let new_question = payload(json!({
            "question": "who am i?",
            "answer": "you are you",
            "difficulty": "5",
            "category": "4"
        }))
        .into_new_question()
        .unwrap();

        assert_eq!(new_question.category, 4);
        assert_eq!(new_question.difficulty, 5);
    }

    #[test]
    fn test_into_new_question_requires_every_field() {
        let complete = json!({
            "question": "q",
            "answer": "a",
            "category": 1,
            "difficulty": 1
        });
        for field in ["question", "answer", "category", "difficulty"] {
            let mut body = complete.clone();
            body[field] = Value::Null;
            let err = payload(body).into_new_question().unwrap_err();
            assert!(err.contains(field), "{field}: {err}");
        }
    }

    #[test]
    fn test_into_new_question_rejects_zero_difficulty() {
        let result = payload(json!({
            "question": "q",
            "answer": "a",
            "category": 1,
            "difficulty": 0
        }))
        .into_new_question();
        assert!(result.is_err());
    }
}
