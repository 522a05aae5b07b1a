//! Publications listing: filter state, URL sync, and derivation.
//!
//! The full publication set lives in the controller for the life of the
//! listing page. Every state change writes the non-empty fields back to the
//! query string (no reload) and re-renders the list.

use url::form_urlencoded;

use crate::models::Publication;
use crate::page::{History, Page};
use crate::sections::publications::{render_filter_options, render_list, render_query_input};
use crate::sections::RenderContext;

pub const PARAM_QUERY: &str = "q";
pub const PARAM_YEAR: &str = "year";
pub const PARAM_TYPE: &str = "type";

/// Working filter state. Empty strings mean "unset".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub query: String,
    pub year: String,
    pub kind: String,
}

impl FilterState {
    /// Parse `q`, `year` and `type`; absent parameters are unset.
    pub fn from_query_string(query: &str) -> Self {
        let params: Vec<(String, String)> =
            form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
                .into_owned()
                .collect();
        // first occurrence wins, like URLSearchParams.get
        let get = |key: &str| {
            params
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
                .unwrap_or_default()
        };
        FilterState {
            query: get(PARAM_QUERY),
            year: get(PARAM_YEAR),
            kind: get(PARAM_TYPE),
        }
    }

    /// Serialize only the non-empty fields, without a leading `?`.
    pub fn to_query_string(&self) -> String {
        let mut ser = form_urlencoded::Serializer::new(String::new());
        if !self.query.is_empty() {
            ser.append_pair(PARAM_QUERY, &self.query);
        }
        if !self.year.is_empty() {
            ser.append_pair(PARAM_YEAR, &self.year);
        }
        if !self.kind.is_empty() {
            ser.append_pair(PARAM_TYPE, &self.kind);
        }
        ser.finish()
    }

    /// Query matches title or any author (case-insensitive substring);
    /// year and type must match exactly when set. All clauses are ANDed.
    pub fn matches(&self, p: &Publication) -> bool {
        let matches_query = self.query.is_empty() || {
            let q = self.query.to_lowercase();
            p.title.to_lowercase().contains(&q)
                || p.authors.iter().any(|a| a.to_lowercase().contains(&q))
        };
        let matches_year = self.year.is_empty() || p.year.to_string() == self.year;
        let matches_kind = self.kind.is_empty() || p.kind == self.kind;
        matches_query && matches_year && matches_kind
    }

    /// Matching subset, newest year first. The sort is stable so entries
    /// from the same year keep their source order.
    pub fn apply<'a>(&self, publications: &'a [Publication]) -> Vec<&'a Publication> {
        let mut visible: Vec<&Publication> =
            publications.iter().filter(|p| self.matches(p)).collect();
        visible.sort_by(|a, b| b.year.cmp(&a.year));
        visible
    }
}

pub struct PublicationsController {
    publications: Vec<Publication>,
    state: FilterState,
}

impl PublicationsController {
    pub fn new(publications: Vec<Publication>) -> Self {
        PublicationsController {
            publications,
            state: FilterState::default(),
        }
    }

    /// Initial load: URL → state, then fill the controls and render.
    pub fn init(&mut self, page: &mut Page, ctx: &RenderContext) {
        self.state = FilterState::from_query_string(page.query());
        self.render_controls(page);
        self.render(page, ctx);
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn visible(&self) -> Vec<&Publication> {
        self.state.apply(&self.publications)
    }

    pub fn set_query(&mut self, page: &mut Page, ctx: &RenderContext, query: &str) {
        self.state.query = query.to_string();
        self.changed(page, ctx);
    }

    pub fn set_year(&mut self, page: &mut Page, ctx: &RenderContext, year: &str) {
        self.state.year = year.to_string();
        self.changed(page, ctx);
    }

    pub fn set_type(&mut self, page: &mut Page, ctx: &RenderContext, kind: &str) {
        self.state.kind = kind.to_string();
        self.changed(page, ctx);
    }

    /// Replace the whole state at once (e.g. after debounced input).
    pub fn set_state(&mut self, page: &mut Page, ctx: &RenderContext, state: FilterState) {
        self.state = state;
        self.changed(page, ctx);
    }

    fn changed(&self, page: &mut Page, ctx: &RenderContext) {
        let path = page.path().to_string();
        self.sync_url(page, &path);
        self.render_controls(page);
        self.render(page, ctx);
    }

    /// State → controls: search box value and selected year/type.
    fn render_controls(&self, page: &mut Page) {
        render_query_input(page, &self.state.query);
        render_filter_options(page, &self.publications, &self.state.year, &self.state.kind);
    }

    /// State → URL via a non-reloading history update.
    pub fn sync_url<H: History + ?Sized>(&self, history: &mut H, path: &str) -> String {
        let qs = self.state.to_query_string();
        let url = if qs.is_empty() {
            path.to_string()
        } else {
            format!("{}?{}", path, qs)
        };
        history.replace_state(&url);
        url
    }

    fn render(&self, page: &mut Page, ctx: &RenderContext) {
        let visible = self.visible();
        render_list(page, ctx, &visible);
    }
}
