use crate::models::question::Question;

/// Questions whose text contains `term`, ignoring case. Order is preserved.
///
/// An empty term matches everything; deciding whether a search was requested
/// at all is up to the caller.
pub fn search<'a>(term: &str, questions: &'a [Question]) -> Vec<&'a Question> {
    let needle = term.to_lowercase();
    questions
        .iter()
        .filter(|q| q.question.to_lowercase().contains(&needle))
        .collect()
}

/// Questions belonging to `category_id`. Order is preserved.
pub fn filter_by_category(category_id: i64, questions: &[Question]) -> Vec<&Question> {
    questions
        .iter()
        .filter(|q| q.category == category_id)
        .collect()
}
