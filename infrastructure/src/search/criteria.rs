//! Predicates deciding whether a stored document satisfies a [`SearchRequest`].
//!
//! Every predicate takes the (optional) document field and the (optional)
//! request constraint. An absent or empty constraint always holds. A present
//! constraint never holds for an absent document field.

use application::SearchRequest;
use domain::{Document, Timestamp};
use tracing::trace;

fn is_unconstrained(values: Option<&[String]>) -> bool {
    values.is_none_or(<[String]>::is_empty)
}

/// True if any of `prefixes` is a prefix of `title`.
pub fn matches_title_prefixes(title: Option<&str>, prefixes: Option<&[String]>) -> bool {
    if is_unconstrained(prefixes) {
        return true;
    }
    match (title, prefixes) {
        (Some(title), Some(prefixes)) => prefixes
            .iter()
            .any(|prefix| title.starts_with(prefix.as_str())),
        _ => false,
    }
}

/// True if `content` contains every one of `fragments`.
pub fn matches_all_contents(content: Option<&str>, fragments: Option<&[String]>) -> bool {
    if is_unconstrained(fragments) {
        return true;
    }
    match (content, fragments) {
        (Some(content), Some(fragments)) => fragments
            .iter()
            .all(|fragment| content.contains(fragment.as_str())),
        _ => false,
    }
}

/// True if `author_id` is one of `author_ids`.
pub fn matches_author_ids(author_id: Option<&str>, author_ids: Option<&[String]>) -> bool {
    if is_unconstrained(author_ids) {
        return true;
    }
    match (author_id, author_ids) {
        (Some(author_id), Some(author_ids)) => author_ids.iter().any(|id| id == author_id),
        _ => false,
    }
}

/// True if `created` lies within `[from, to]`. Either bound may be open.
pub fn is_within_date_range(
    created: Option<Timestamp>,
    from: Option<Timestamp>,
    to: Option<Timestamp>,
) -> bool {
    let Some(created) = created else {
        return from.is_none() && to.is_none();
    };
    from.is_none_or(|from| created >= from) && to.is_none_or(|to| created <= to)
}

/// All four predicate groups must hold.
pub fn matches_search_request(doc: &Document, request: &SearchRequest) -> bool {
    if !matches_title_prefixes(doc.title.as_deref(), request.title_prefixes.as_deref()) {
        trace!(doc_id = ?doc.id, "Title prefix condition not met");
        return false;
    }
    if !matches_all_contents(doc.content.as_deref(), request.contains_contents.as_deref()) {
        trace!(doc_id = ?doc.id, "Content condition not met");
        return false;
    }
    if !matches_author_ids(doc.author_id(), request.author_ids.as_deref()) {
        trace!(doc_id = ?doc.id, "Author condition not met");
        return false;
    }
    if !is_within_date_range(doc.created, request.created_from, request.created_to) {
        trace!(doc_id = ?doc.id, "Date range condition not met");
        return false;
    }
    true
}
