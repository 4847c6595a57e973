use rand::seq::IndexedRandom;
use rand::Rng;
use std::collections::HashSet;

use super::question_filters::filter_by_category;
use crate::models::{question::Question, quiz::QuizScope};

/// Picks a uniformly random question from `pool` that is inside `scope` and
/// not in `previous`. `None` means every candidate has been served.
pub fn next_question<'a, R>(
    scope: QuizScope,
    previous: &HashSet<i64>,
    pool: &'a [Question],
    rng: &mut R,
) -> Option<&'a Question>
where
    R: Rng + ?Sized,
{
    let candidates: Vec<&Question> = match scope {
        QuizScope::All => pool.iter().collect(),
        QuizScope::Category(category_id) => filter_by_category(category_id, pool),
    };

    let unseen: Vec<&Question> = candidates
        .into_iter()
        .filter(|q| !previous.contains(&q.id))
        .collect();

    unseen.choose(rng).copied()
}
