//! Filter, sort, paginate
//!
//! The only entry point list views need: [`derive_view`] borrows the
//! collection and returns a [`Page`] of references into it.

use crate::filter::RecordFilter;
use crate::page::{paginate, Page, PageRequest};
use crate::resolve::Resolver;
use crate::sort::{sort_records, SortSpec, Sortable};

/// Records passing `filter`, in collection order
pub fn filter_records<'a, R, F>(records: &'a [R], filter: &F, resolver: &Resolver<'_>) -> Vec<&'a R>
where
    F: RecordFilter<R> + ?Sized,
{
    records
        .iter()
        .filter(|r| filter.matches(r, resolver))
        .collect()
}

/// Derive one page of a list view
///
/// Without a sort spec rows keep collection order.
pub fn derive_view<'a, R, F>(
    records: &'a [R],
    filter: &F,
    sort: Option<SortSpec<R::Column>>,
    request: PageRequest,
    resolver: &Resolver<'_>,
) -> Page<&'a R>
where
    R: Sortable,
    F: RecordFilter<R> + ?Sized,
{
    let mut rows = filter_records(records, filter, resolver);
    if let Some(spec) = sort {
        sort_records(&mut rows, spec);
    }
    tracing::trace!(
        total = records.len(),
        matched = rows.len(),
        page = request.page(),
        "derived view"
    );
    paginate(rows, request, records.len())
}
