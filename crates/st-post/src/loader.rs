//! Post page data loading.

use st_content::{
    ContentError, ContentSource, Document, DocumentQuery, OrderField, Ordering, Revision,
    SortDirection,
};
use tracing::{debug, info};

/// Everything a post page displays.
#[derive(Debug, Clone, PartialEq)]
pub struct PostPage {
    /// The post itself, at the requested revision.
    pub post: Document,
    /// Post published immediately before this one.
    pub previous: Option<Document>,
    /// Post published immediately after this one.
    pub next: Option<Document>,
    /// Whether the post was loaded from a draft revision.
    pub preview: bool,
}

/// Load a post and its chronological neighbors.
///
/// Returns `Ok(None)` when no post of `doc_type` has the given slug. The post
/// is read at `revision`; neighbors are always read from published content
/// so a draft never leaks into another post's navigation. The two neighbor
/// queries run in parallel.
///
/// # Errors
///
/// Returns [`ContentError`] if any content request fails.
pub fn load_post(
    source: &dyn ContentSource,
    doc_type: &str,
    slug: &str,
    revision: &Revision,
) -> Result<Option<PostPage>, ContentError> {
    let Some(post) = source.get_by_uid(doc_type, slug, revision)? else {
        info!(slug, "Post not found");
        return Ok(None);
    };

    let (previous, next) = rayon::join(
        || neighbor(source, doc_type, &post.id, SortDirection::Descending),
        || neighbor(source, doc_type, &post.id, SortDirection::Ascending),
    );
    let (previous, next) = (previous?, next?);

    debug!(
        slug,
        id = %post.id,
        previous = previous.as_ref().map(Document::slug),
        next = next.as_ref().map(Document::slug),
        "Loaded post"
    );

    Ok(Some(PostPage {
        post,
        previous,
        next,
        preview: revision.is_draft(),
    }))
}

/// First document after `cursor_id` in publication order.
///
/// Descending order yields the older neighbor, ascending the newer one.
fn neighbor(
    source: &dyn ContentSource,
    doc_type: &str,
    cursor_id: &str,
    direction: SortDirection,
) -> Result<Option<Document>, ContentError> {
    let ordering = Ordering {
        field: OrderField::FirstPublicationDate,
        direction,
    };
    let query = DocumentQuery::by_type(doc_type)
        .ordered_by(ordering)
        .page_size(1)
        .after(cursor_id)
        .revision(Revision::Published);
    Ok(source.query(&query)?.results.into_iter().next())
}
