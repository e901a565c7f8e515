use std::cmp::Ordering;
use crate::models::ScoredCandidate;

/// Total order used for companion results.
///
/// Score descending, then rating descending, then id ascending, so equal
/// inputs always rank the same way regardless of storage order.
#[inline]
pub fn compare_candidates(a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
    b.compatibility_score
        .cmp(&a.compatibility_score)
        .then_with(|| {
            b.profile
                .clamped_rating()
                .total_cmp(&a.profile.clamped_rating())
        })
        .then_with(|| a.profile.id.cmp(&b.profile.id))
}

/// Sort scored candidates and cut out one page.
///
/// `page` is 1-based. Returns the page and the number of candidates that
/// were ranked.
pub fn rank(
    mut scored: Vec<ScoredCandidate>,
    page: usize,
    page_size: usize,
) -> (Vec<ScoredCandidate>, usize) {
    let total = scored.len();
    scored.sort_by(compare_candidates);

    let offset = page.saturating_sub(1).saturating_mul(page_size);
    let page = scored.into_iter().skip(offset).take(page_size).collect();

    (page, total)
}
