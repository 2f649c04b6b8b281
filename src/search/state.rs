//! Search query and hit navigation state.

use crate::document::Document;

use super::matcher::find_hits;

/// Query, committed hits, and the selected hit.
///
/// `generation` counts commits (and resets). A result computed for an older
/// generation is stale and must not be applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    query: String,
    hits: Vec<usize>,
    hit_index: usize,
    highlight: String,
    generation: u64,
    /// A commit is waiting for its hits
    pending: bool,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The in-progress or committed query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// 1-based line numbers of matching lines, ascending.
    pub fn hits(&self) -> &[usize] {
        &self.hits
    }

    /// Index into [`Self::hits`]; meaningful only when hits exist.
    pub const fn hit_index(&self) -> usize {
        self.hit_index
    }

    /// Line number of the selected hit.
    pub fn current_hit(&self) -> Option<usize> {
        self.hits.get(self.hit_index).copied()
    }

    /// Query whose occurrences are highlighted, empty when none.
    pub fn highlight(&self) -> &str {
        &self.highlight
    }

    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a committed query is still waiting for [`Self::with_hits`].
    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    /// Whether a result tagged with `generation` is still wanted.
    pub const fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Clear query, hits and highlighting, superseding any in-flight search.
    #[must_use]
    pub fn reset(self) -> Self {
        Self {
            generation: self.generation.wrapping_add(1),
            ..Self::default()
        }
    }

    /// Append a character to the query. Control characters are dropped.
    #[must_use]
    pub fn push_char(mut self, c: char) -> Self {
        if !c.is_control() {
            self.query.push(c);
        }
        self
    }

    /// Remove the last character of the query, if any.
    #[must_use]
    pub fn pop_char(mut self) -> Self {
        self.query.pop();
        self
    }

    /// Start committing the current query.
    ///
    /// Bumps the generation and drops the old hits. The returned
    /// [`Self::generation`] tags the search that should follow.
    #[must_use]
    pub fn begin_commit(mut self) -> Self {
        self.generation = self.generation.wrapping_add(1);
        self.hits.clear();
        self.hit_index = 0;
        self.highlight.clear();
        self.pending = true;
        self
    }

    /// Install freshly computed hits for the current query.
    #[must_use]
    pub fn with_hits(mut self, hits: Vec<usize>) -> Self {
        self.hits = hits;
        self.hit_index = 0;
        self.pending = false;
        self.highlight = if self.query.is_empty() {
            String::new()
        } else {
            self.query.clone()
        };
        self
    }

    /// Commit the query against `document` synchronously.
    #[must_use]
    pub fn commit(self, document: &Document) -> Self {
        let state = self.begin_commit();
        let hits = find_hits(document, &state.query);
        state.with_hits(hits)
    }

    /// Select the next hit, wrapping from last to first.
    #[must_use]
    pub fn next(mut self) -> Self {
        if !self.hits.is_empty() {
            self.hit_index = (self.hit_index + 1) % self.hits.len();
        }
        self
    }

    /// Select the previous hit, wrapping from first to last.
    #[must_use]
    pub fn previous(mut self) -> Self {
        if !self.hits.is_empty() {
            let len = self.hits.len();
            self.hit_index = (self.hit_index + len - 1) % len;
        }
        self
    }
}
