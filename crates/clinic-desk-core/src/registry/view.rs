//! List page state: search criteria plus current page.

use tracing::debug;

use super::{FilterValue, Paginator, Query, Record, Registry, RegistryResult};

/// Placeholder shown when a list page has nothing to display.
pub const EMPTY_LIST_PLACEHOLDER: &str = "Aucun enregistrement trouvé";

/// Search, filter and pagination state of one list page.
///
/// Every change to the criteria or the page size sends the view back to page
/// 1, so a narrower result never lands on an out-of-range page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    query: Query,
    page: usize,
    paginator: Paginator,
}

/// Rendered page of a list.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage<'a, R> {
    pub records: Vec<&'a R>,
    /// Page served, after clamping
    pub page: usize,
    pub total_pages: usize,
    /// Matches across all pages
    pub total_matches: usize,
}

impl<R> ListPage<'_, R> {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Text to show instead of the table, if any.
    pub fn placeholder(&self) -> Option<&'static str> {
        self.is_empty().then_some(EMPTY_LIST_PLACEHOLDER)
    }
}

impl ListView {
    pub fn new(page_size: usize) -> RegistryResult<Self> {
        Ok(Self {
            query: Query::new(),
            page: 1,
            paginator: Paginator::new(page_size)?,
        })
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    /// Page last requested or moved to. It can run past the result after
    /// records are removed; [`ListView::refresh`] brings it back in range.
    pub fn current_page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.paginator.page_size()
    }

    /// Change the search text.
    pub fn search(&mut self, text: impl Into<String>) {
        self.query.set_text(text);
        self.reset_page();
    }

    /// Change one categorical filter.
    pub fn filter_by(&mut self, field: impl Into<String>, value: impl Into<FilterValue>) {
        self.query.set_filter(field, value);
        self.reset_page();
    }

    pub fn clear_filters(&mut self) {
        self.query.clear_filters();
        self.reset_page();
    }

    /// Change the page size.
    pub fn resize(&mut self, page_size: usize) -> RegistryResult<()> {
        self.paginator = Paginator::new(page_size)?;
        self.reset_page();
        Ok(())
    }

    /// Record a requested page without bounds; it is clamped on render.
    pub fn request_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Move to a page, clamped to the current result.
    pub fn go_to<R: Record>(&mut self, registry: &Registry<R>, page: usize) -> usize {
        let matches = registry.filter(&self.query).len();
        self.page = self.paginator.clamp(matches, page);
        self.page
    }

    pub fn next<R: Record>(&mut self, registry: &Registry<R>) -> usize {
        self.go_to(registry, self.page.saturating_add(1))
    }

    pub fn previous<R: Record>(&mut self, registry: &Registry<R>) -> usize {
        self.go_to(registry, self.page.saturating_sub(1))
    }

    /// Render and keep the served page, so the view follows a shrinking
    /// result.
    pub fn refresh<'a, R: Record>(&mut self, registry: &'a Registry<R>) -> ListPage<'a, R> {
        let page = self.render(registry);
        if page.page != self.page {
            debug!(from = self.page, to = page.page, "page clamped to result");
            self.page = page.page;
        }
        page
    }

    /// Filter the registry and slice out the current page.
    pub fn render<'a, R: Record>(&self, registry: &'a Registry<R>) -> ListPage<'a, R> {
        let matches = registry.filter(&self.query);
        let page = self.paginator.page(&matches, self.page);

        ListPage {
            records: page.items.to_vec(),
            page: page.number,
            total_pages: page.total_pages,
            total_matches: page.total_items,
        }
    }

    fn reset_page(&mut self) {
        if self.page != 1 {
            debug!(from = self.page, "criteria changed, back to first page");
        }
        self.page = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Patient, PatientStatus};

    fn registry(count: usize) -> Registry<Patient> {
        let mut registry = Registry::new();
        for i in 1..=count {
            let mut patient =
                Patient::new(format!("Nom{i:02}"), "Prénom".into(), format!("07{i:08}"));
            patient.id = i.to_string();
            if i % 2 == 0 {
                patient.status = PatientStatus::Inactive;
            }
            registry.insert(patient).unwrap();
        }
        registry
    }

    #[test]
    fn test_search_resets_page() {
        let registry = registry(12);
        let mut view = ListView::new(5).unwrap();
        assert_eq!(view.go_to(&registry, 3), 3);

        view.search("nom1");
        assert_eq!(view.current_page(), 1);

        let page = view.render(&registry);
        assert_eq!(page.total_matches, 3); // Nom10, Nom11, Nom12
        assert_eq!(page.page, 1);
    }

    #[test]
    fn test_filter_and_resize_reset_page() {
        let registry = registry(12);
        let mut view = ListView::new(2).unwrap();

        view.go_to(&registry, 4);
        view.filter_by("status", "inactive");
        assert_eq!(view.current_page(), 1);

        view.go_to(&registry, 2);
        view.resize(10).unwrap();
        assert_eq!(view.current_page(), 1);
        assert_eq!(view.page_size(), 10);
    }

    #[test]
    fn test_navigation_is_clamped() {
        let registry = registry(7);
        let mut view = ListView::new(5).unwrap();

        assert_eq!(view.previous(&registry), 1);
        assert_eq!(view.next(&registry), 2);
        assert_eq!(view.next(&registry), 2);

        let page = view.render(&registry);
        assert!(page.has_previous());
        assert!(!page.has_next());
        assert_eq!(page.records.len(), 2);
    }

    #[test]
    fn test_render_clamps_after_delete() {
        let mut registry = registry(6);
        let mut view = ListView::new(5).unwrap();
        view.go_to(&registry, 2);

        registry.request_delete("6").unwrap().confirm(&mut registry).unwrap();

        let page = view.render(&registry);
        assert_eq!(page.page, 1);
        assert_eq!(page.records.len(), 5);
        assert_eq!(view.current_page(), 2);

        let page = view.refresh(&registry);
        assert_eq!(page.page, 1);
        assert_eq!(view.current_page(), 1);
        assert!(!view.refresh(&registry).has_next());
    }

    #[test]
    fn test_empty_result_placeholder() {
        let registry = registry(3);
        let mut view = ListView::new(5).unwrap();
        view.search("introuvable");

        let page = view.render(&registry);
        assert!(page.is_empty());
        assert_eq!(page.placeholder(), Some(EMPTY_LIST_PLACEHOLDER));
        assert_eq!(page.total_pages, 0);
    }
}
