//! List query state
//!
//! Provides [`ListQuery`], the parameters behind one list view. Changing the
//! filter or the sort sends the view back to page 1; paging never moves past
//! the last page.

use crate::filter::{AppointmentFilter, DoctorFilter, PatientFilter, RecordFilter};
use crate::page::{Page, PageRequest};
use crate::pipeline::derive_view;
use crate::resolve::Resolver;
use crate::sort::{AppointmentColumn, DoctorColumn, PatientColumn, SortSpec, Sortable};

/// Filter, sort and page position of a list view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery<F, C> {
    filter: F,
    sort: Option<SortSpec<C>>,
    page: usize,
    page_size: usize,
}

/// Patients list query
pub type PatientQuery = ListQuery<PatientFilter, PatientColumn>;
/// Doctors list query
pub type DoctorQuery = ListQuery<DoctorFilter, DoctorColumn>;
/// Appointments list query
pub type AppointmentQuery = ListQuery<AppointmentFilter, AppointmentColumn>;

impl<F, C: Copy + PartialEq> ListQuery<F, C> {
    /// Create new query on page 1
    #[must_use]
    pub fn new(filter: F, sort: Option<SortSpec<C>>, page_size: usize) -> Self {
        Self {
            filter,
            sort,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Current filter
    #[inline]
    #[must_use]
    pub fn filter(&self) -> &F {
        &self.filter
    }

    /// Replace the filter and return to page 1
    pub fn set_filter(&mut self, filter: F) {
        self.filter = filter;
        self.page = 1;
    }

    /// Edit the filter in place and return to page 1
    pub fn update_filter(&mut self, edit: impl FnOnce(&mut F)) {
        edit(&mut self.filter);
        self.page = 1;
    }

    /// Current sort
    #[inline]
    #[must_use]
    pub fn sort(&self) -> Option<SortSpec<C>> {
        self.sort
    }

    /// Column header click
    pub fn sort_by(&mut self, column: C) {
        self.sort = Some(SortSpec::select(self.sort, column));
        self.page = 1;
    }

    /// Set the sort outright
    pub fn set_sort(&mut self, sort: Option<SortSpec<C>>) {
        self.sort = sort;
        self.page = 1;
    }

    /// Current 1-based page
    #[inline]
    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    /// Rows per page
    #[inline]
    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Page request for the pipeline
    #[inline]
    #[must_use]
    pub fn request(&self) -> PageRequest {
        PageRequest::new(self.page, self.page_size)
    }

    /// Advance one page; false if already on the last
    pub fn next_page(&mut self, total_pages: usize) -> bool {
        if self.page < total_pages {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Go back one page; false if already on the first
    pub fn prev_page(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// Jump to `page` if it exists
    pub fn go_to(&mut self, page: usize, total_pages: usize) -> bool {
        if (1..=total_pages.max(1)).contains(&page) {
            self.page = page;
            true
        } else {
            false
        }
    }

    /// Derive the current page from `records`
    #[must_use]
    pub fn run<'a, R>(&self, records: &'a [R], resolver: &Resolver<'_>) -> Page<&'a R>
    where
        R: Sortable<Column = C>,
        F: RecordFilter<R>,
    {
        derive_view(records, &self.filter, self.sort, self.request(), resolver)
    }
}

impl PatientQuery {
    /// Default patients view: name ascending
    #[must_use]
    pub fn for_patients(page_size: usize) -> Self {
        Self::new(
            PatientFilter::default(),
            Some(SortSpec::ascending(PatientColumn::Name)),
            page_size,
        )
    }
}

impl DoctorQuery {
    /// Default doctors view: collection order, unpaginated unless sized
    #[must_use]
    pub fn for_doctors(page_size: Option<usize>) -> Self {
        Self::new(DoctorFilter::default(), None, page_size.unwrap_or(usize::MAX))
    }
}

impl AppointmentQuery {
    /// Default appointments view: collection order, unpaginated unless sized
    #[must_use]
    pub fn for_appointments(page_size: Option<usize>) -> Self {
        Self::new(AppointmentFilter::default(), None, page_size.unwrap_or(usize::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::SortDirection;
    use mc_model::Gender;

    #[test]
    fn filter_change_resets_page() {
        let mut q = PatientQuery::for_patients(10);
        assert!(q.next_page(3));
        assert!(q.next_page(3));
        assert_eq!(q.page(), 3);

        q.update_filter(|f| f.gender = Some(Gender::Male));
        assert_eq!(q.page(), 1);
    }

    #[test]
    fn sort_click_resets_page_and_toggles() {
        let mut q = PatientQuery::for_patients(10);
        q.next_page(2);
        q.sort_by(PatientColumn::Name);
        assert_eq!(q.page(), 1);
        assert_eq!(q.sort().unwrap().direction, SortDirection::Descending);
    }

    #[test]
    fn paging_stays_in_range() {
        let mut q = DoctorQuery::for_doctors(Some(5));
        assert!(!q.prev_page());
        assert!(q.next_page(2));
        assert!(!q.next_page(2));
        assert!(!q.go_to(3, 2));
        assert!(q.go_to(1, 2));
        assert_eq!(q.page(), 1);
    }

    #[test]
    fn unsized_views_use_one_page() {
        let q = AppointmentQuery::for_appointments(None);
        assert_eq!(q.request(), PageRequest::unbounded());
        assert!(q.sort().is_none());
    }
}
