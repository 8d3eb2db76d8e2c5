/// Number of questions per listing page.
pub const QUESTIONS_PER_PAGE: usize = 10;

/// Slice `items` to the 1-based `page` of `page_size` entries.
///
/// Returns an empty slice for page 0, a zero page size, or a page that starts
/// past the end.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }

    let Some(start) = (page - 1).checked_mul(page_size) else {
        return &[];
    };
    if start >= items.len() {
        return &[];
    }

    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}
