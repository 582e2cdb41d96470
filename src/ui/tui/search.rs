use crate::data::model::AppData;
use crate::search::engine::{highlight, search, HitKind};
use ratatui::style::Style;
use ratatui::text::Span;

/// Maximum number of results listed under the search box
pub const MAX_RESULTS_DISPLAYED: usize = 50;

/// A search hit detached from the data it was found in, so the dashboard can
/// reload without invalidating the result list.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub kind: HitKind,
    pub label: String,
    pub name: String,
    pub url: String,
    pub memo: String,
}

/// Search box state: the query being typed and its live results.
#[derive(Debug, Default)]
pub struct SearchState {
    pub query: String,
    pub editing: bool,
    pub results: Vec<ResultRow>,
    /// Number of hits before the list was cut to [`MAX_RESULTS_DISPLAYED`].
    pub total: usize,
    pub selected: usize,
}

impl SearchState {
    pub fn is_active(&self) -> bool {
        self.editing || !self.query.trim().is_empty()
    }

    /// Re-run the query against `data`, keeping the selection in range.
    pub fn refresh(&mut self, data: &AppData) {
        let hits = search(data, &self.query);
        self.total = hits.len();
        self.results = hits
            .into_iter()
            .take(MAX_RESULTS_DISPLAYED)
            .map(|hit| ResultRow {
                kind: hit.kind,
                label: hit.container_label.to_string(),
                name: hit.item.name.clone(),
                url: hit.item.url.clone(),
                memo: hit.item.memo.clone(),
            })
            .collect();
        self.selected = self.selected.min(self.results.len().saturating_sub(1));
    }

    pub fn push(&mut self, c: char, data: &AppData) {
        self.query.push(c);
        self.selected = 0;
        self.refresh(data);
    }

    pub fn pop(&mut self, data: &AppData) {
        self.query.pop();
        self.refresh(data);
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.results.clear();
        self.total = 0;
        self.selected = 0;
        self.editing = false;
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.results.len() {
            self.selected += 1;
        }
    }

    pub fn selected_url(&self) -> Option<&str> {
        self.results.get(self.selected).map(|r| r.url.as_str())
    }
}

/// Split `text` into spans with the first match of `query` in `accent`.
pub fn highlighted<'a>(text: &'a str, query: &str, base: Style, accent: Style) -> Vec<Span<'a>> {
    match highlight(text, query) {
        Some(h) => vec![
            Span::styled(h.before, base),
            Span::styled(h.matched, accent),
            Span::styled(h.after, base),
        ],
        None => vec![Span::styled(text, base)],
    }
}
