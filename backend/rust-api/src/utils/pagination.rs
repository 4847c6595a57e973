/// Number of questions on one page
pub const QUESTIONS_PER_PAGE: usize = 10;

/// Returns the 1-based `page` of `items`, at most [`QUESTIONS_PER_PAGE`] long.
///
/// Out-of-range pages, and page 0, yield an empty slice.
pub fn paginate<T>(page: u32, items: &[T]) -> &[T] {
    if page == 0 {
        return &[];
    }
    let start = (page as usize - 1).saturating_mul(QUESTIONS_PER_PAGE);
    if start >= items.len() {
        return &[];
    }
    let end = (start + QUESTIONS_PER_PAGE).min(items.len());
    &items[start..end]
}
