//! Find next / find previous / replace all.
//!
//! The controller keeps two cursors between invocations:
//!
//! - `forward_pos`: where the next forward search starts
//! - `reverse_pos`: the exclusive end of the next backward search
//!
//! A search that runs off the end (or the start) wraps once over the whole
//! document. A term that is not in the document at all leaves both cursors
//! where they were.

use quill_buffer::{FindFlags, SearchMatch, TextBuffer, TextSearchEngine};

/// The find bar's toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchOptions {
    pub case_sensitive: bool,
    pub whole_word: bool,
}

impl SearchOptions {
    pub fn new(case_sensitive: bool, whole_word: bool) -> Self {
        Self {
            case_sensitive,
            whole_word,
        }
    }

    /// Flags for one primitive search call in the given direction.
    pub fn flags(&self, reverse: bool) -> FindFlags {
        FindFlags::resolve(self.case_sensitive, self.whole_word, reverse)
    }
}

/// Result of a find next / find previous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Found between the cursor and the end (or start) of the document
    Found(SearchMatch),
    /// Found only after wrapping around
    Wrapped(SearchMatch),
    /// The term does not occur anywhere
    NotFound,
}

impl SearchOutcome {
    pub fn matched(&self) -> Option<SearchMatch> {
        match self {
            SearchOutcome::Found(m) | SearchOutcome::Wrapped(m) => Some(*m),
            SearchOutcome::NotFound => None,
        }
    }

    pub fn wrapped(&self) -> bool {
        matches!(self, SearchOutcome::Wrapped(_))
    }
}

/// Cursor state carried between searches.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchState {
    pub forward_pos: usize,
    pub reverse_pos: usize,
    /// Term of the most recent search
    pub last_term: String,
    /// Toggles of the most recent search
    pub last_options: SearchOptions,
}

/// Drives repeated searches over one document.
#[derive(Debug, Clone, Default)]
pub struct SearchController {
    state: SearchState,
}

impl SearchController {
    /// A controller for a document of `doc_len` chars.
    pub fn new(doc_len: usize) -> Self {
        let mut controller = Self::default();
        controller.reset(doc_len);
        controller
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Puts the cursors back at the document's ends. Called when the whole
    /// document is replaced.
    pub fn reset(&mut self, doc_len: usize) {
        self.state.forward_pos = 0;
        self.state.reverse_pos = doc_len;
    }

    /// Pulls the cursors inside a document that shrank.
    pub fn clamp(&mut self, doc_len: usize) {
        self.state.forward_pos = self.state.forward_pos.min(doc_len);
        self.state.reverse_pos = self.state.reverse_pos.min(doc_len);
    }

    /// Finds the next occurrence of `term` at or after `forward_pos`.
    ///
    /// On a hit the match becomes the reverse bound and the forward cursor
    /// moves past it.
    pub fn find_next<E>(&mut self, engine: &E, term: &str, options: SearchOptions) -> SearchOutcome
    where
        E: TextSearchEngine + ?Sized,
    {
        self.remember(term, options);
        if term.is_empty() {
            return SearchOutcome::NotFound;
        }

        let len = engine.search_len();
        self.clamp(len);
        let flags = options.flags(false);
        let term_len = term.chars().count();

        if let Some(start) = engine.find(term, self.state.forward_pos..len, flags) {
            self.advance_forward(start, term_len);
            return SearchOutcome::Found(SearchMatch::new(start, term_len));
        }

        // Already searched the whole document
        if self.state.forward_pos == 0 {
            tracing::debug!("No matches for {:?}", term);
            return SearchOutcome::NotFound;
        }

        tracing::debug!("Forward search for {:?} wrapped", term);
        match engine.find(term, 0..len, flags) {
            Some(start) => {
                self.advance_forward(start, term_len);
                SearchOutcome::Wrapped(SearchMatch::new(start, term_len))
            }
            None => SearchOutcome::NotFound,
        }
    }

    /// Finds the last occurrence of `term` ending at or before
    /// `reverse_pos`.
    ///
    /// On a hit the match becomes the new reverse bound and the forward
    /// cursor moves one char past the match.
    pub fn find_previous<E>(
        &mut self,
        engine: &E,
        term: &str,
        options: SearchOptions,
    ) -> SearchOutcome
    where
        E: TextSearchEngine + ?Sized,
    {
        self.remember(term, options);
        if term.is_empty() {
            return SearchOutcome::NotFound;
        }

        let len = engine.search_len();
        self.clamp(len);
        let flags = options.flags(true);
        let term_len = term.chars().count();

        if let Some(start) = engine.find(term, 0..self.state.reverse_pos, flags) {
            self.advance_backward(start, term_len, len);
            return SearchOutcome::Found(SearchMatch::new(start, term_len));
        }

        if self.state.reverse_pos == len {
            tracing::debug!("No matches for {:?}", term);
            return SearchOutcome::NotFound;
        }

        tracing::debug!("Backward search for {:?} wrapped", term);
        match engine.find(term, 0..len, flags) {
            Some(start) => {
                self.advance_backward(start, term_len, len);
                SearchOutcome::Wrapped(SearchMatch::new(start, term_len))
            }
            None => SearchOutcome::NotFound,
        }
    }

    /// Replaces every exact occurrence of `old` with `new`.
    ///
    /// Case and whole-word toggles do not apply here. The document changes
    /// wholesale, so the cursors are reset. Returns the replacement count.
    pub fn replace_all(&mut self, buffer: &mut TextBuffer, old: &str, new: &str) -> usize {
        let count = buffer.replace_all(old, new);
        if count > 0 {
            self.reset(buffer.len_chars());
        }
        tracing::info!("Replaced {} occurrence(s) of {:?}", count, old);
        count
    }

    fn remember(&mut self, term: &str, options: SearchOptions) {
        if self.state.last_term != term {
            self.state.last_term = term.to_string();
        }
        self.state.last_options = options;
    }

    fn advance_forward(&mut self, start: usize, term_len: usize) {
        self.state.reverse_pos = start;
        self.state.forward_pos = start + term_len;
    }

    fn advance_backward(&mut self, start: usize, term_len: usize, doc_len: usize) {
        self.state.reverse_pos = start;
        self.state.forward_pos = (start + term_len + 1).min(doc_len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ANY: SearchOptions = SearchOptions {
        case_sensitive: false,
        whole_word: false,
    };

    fn starts(outcomes: &[SearchOutcome]) -> Vec<Option<usize>> {
        outcomes.iter().map(|o| o.matched().map(|m| m.start)).collect()
    }

    #[test]
    fn test_find_next_visits_each_then_wraps() {
        let doc = TextBuffer::from("cat dog cat bird cat");
        let mut search = SearchController::new(doc.len_chars());

        let outcomes: Vec<_> = (0..4).map(|_| search.find_next(&doc, "cat", ANY)).collect();
        assert_eq!(starts(&outcomes), vec![Some(0), Some(8), Some(17), Some(0)]);
        assert!(!outcomes[2].wrapped());
        assert!(outcomes[3].wrapped());
    }

    #[test]
    fn test_find_next_updates_cursors() {
        let doc = TextBuffer::from("xx ab xx");
        let mut search = SearchController::new(doc.len_chars());

        search.find_next(&doc, "ab", ANY);
        assert_eq!(search.state().reverse_pos, 3);
        assert_eq!(search.state().forward_pos, 5);
        assert_eq!(search.state().last_term, "ab");
    }

    #[test]
    fn test_find_previous_visits_in_reverse_then_wraps() {
        let doc = TextBuffer::from("cat dog cat bird cat");
        let mut search = SearchController::new(doc.len_chars());

        let outcomes: Vec<_> = (0..4)
            .map(|_| search.find_previous(&doc, "cat", ANY))
            .collect();
        assert_eq!(starts(&outcomes), vec![Some(17), Some(8), Some(0), Some(17)]);
        assert!(outcomes[3].wrapped());
    }

    #[test]
    fn test_find_previous_moves_forward_cursor_past_match() {
        let doc = TextBuffer::from("ab ab ab");
        let mut search = SearchController::new(doc.len_chars());

        search.find_previous(&doc, "ab", ANY);
        assert_eq!(search.state().reverse_pos, 6);
        // Clamped to the document end
        assert_eq!(search.state().forward_pos, 8);

        search.find_previous(&doc, "ab", ANY);
        assert_eq!(search.state().forward_pos, 6);
    }

    #[test]
    fn test_direction_changes_step_from_current_match() {
        let doc = TextBuffer::from("a1 a2 a3 a4");
        let mut search = SearchController::new(doc.len_chars());

        assert_eq!(search.find_next(&doc, "a", ANY).matched().map(|m| m.start), Some(0));
        assert_eq!(search.find_next(&doc, "a", ANY).matched().map(|m| m.start), Some(3));
        assert_eq!(search.find_next(&doc, "a", ANY).matched().map(|m| m.start), Some(6));
        assert_eq!(search.find_previous(&doc, "a", ANY).matched().map(|m| m.start), Some(3));
        // Forward resumes one char past the previous match
        assert_eq!(search.state().forward_pos, 5);
        assert_eq!(search.find_next(&doc, "a", ANY).matched().map(|m| m.start), Some(6));
    }

    #[test]
    fn test_absent_term_leaves_cursors_alone() {
        let doc = TextBuffer::from("alpha beta");
        let mut search = SearchController::new(doc.len_chars());
        search.find_next(&doc, "beta", ANY);
        let before = (search.state().forward_pos, search.state().reverse_pos);

        assert_eq!(search.find_next(&doc, "gamma", ANY), SearchOutcome::NotFound);
        assert_eq!(search.find_previous(&doc, "gamma", ANY), SearchOutcome::NotFound);
        assert_eq!(
            (search.state().forward_pos, search.state().reverse_pos),
            before
        );
    }

    #[test]
    fn test_empty_term_never_matches() {
        let doc = TextBuffer::from("text");
        let mut search = SearchController::new(doc.len_chars());
        assert_eq!(search.find_next(&doc, "", ANY), SearchOutcome::NotFound);
        assert_eq!(search.state().forward_pos, 0);
    }

    #[test]
    fn test_toggles_reach_the_engine() {
        let doc = TextBuffer::from("Word word wordy");
        let mut search = SearchController::new(doc.len_chars());

        let exact = SearchOptions::new(true, false);
        assert_eq!(search.find_next(&doc, "word", exact).matched().map(|m| m.start), Some(5));

        let mut search = SearchController::new(doc.len_chars());
        let whole = SearchOptions::new(false, true);
        let hits: Vec<_> = (0..3)
            .map(|_| search.find_next(&doc, "word", whole).matched().map(|m| m.start))
            .collect();
        assert_eq!(hits, vec![Some(0), Some(5), Some(0)]);
        assert_eq!(search.state().last_options, whole);
    }

    #[test]
    fn test_cursors_clamped_after_document_shrinks() {
        let mut doc = TextBuffer::from("one two three two");
        let mut search = SearchController::new(doc.len_chars());
        search.find_next(&doc, "two", ANY);
        search.find_next(&doc, "two", ANY);
        assert_eq!(search.state().forward_pos, 17);

        doc.set_text("two");
        let outcome = search.find_next(&doc, "two", ANY);
        assert_eq!(outcome.matched().map(|m| m.start), Some(0));
        assert!(search.state().forward_pos <= doc.len_chars());
        assert!(search.state().reverse_pos <= doc.len_chars());
    }

    #[test]
    fn test_replace_all_ignores_toggles_and_resets() {
        let mut doc = TextBuffer::from("banana");
        let mut search = SearchController::new(doc.len_chars());
        search.find_next(&doc, "na", ANY);

        assert_eq!(search.replace_all(&mut doc, "a", "b"), 3);
        assert_eq!(doc.text(), "bbnbnb");
        assert_eq!(search.state().forward_pos, 0);
        assert_eq!(search.state().reverse_pos, 6);

        // Case-sensitive regardless of the find bar's toggles
        let mut doc = TextBuffer::from("Aa");
        assert_eq!(search.replace_all(&mut doc, "a", "x"), 1);
        assert_eq!(doc.text(), "Ax");
    }

    /// Documents made of filler and a non-self-overlapping term, with the
    /// term's expected start offsets.
    fn doc_with_occurrences() -> impl Strategy<Value = (String, Vec<usize>)> {
        prop::collection::vec(("[xy ]{0,6}", any::<bool>()), 1..12).prop_map(|parts| {
            let mut text = String::new();
            let mut offsets = Vec::new();
            for (filler, with_term) in parts {
                text.push_str(&filler);
                if with_term {
                    offsets.push(text.chars().count());
                    text.push_str("ab");
                }
            }
            (text, offsets)
        })
    }

    proptest! {
        #[test]
        fn prop_find_next_one_pass_then_wrap((text, offsets) in doc_with_occurrences()) {
            let doc = TextBuffer::from(text.as_str());
            let mut search = SearchController::new(doc.len_chars());

            for &expected in &offsets {
                let outcome = search.find_next(&doc, "ab", ANY);
                prop_assert_eq!(outcome, SearchOutcome::Found(SearchMatch::new(expected, 2)));
            }

            let outcome = search.find_next(&doc, "ab", ANY);
            match offsets.first() {
                Some(&first) => prop_assert_eq!(outcome.matched().map(|m| m.start), Some(first)),
                None => prop_assert_eq!(outcome, SearchOutcome::NotFound),
            }
        }

        #[test]
        fn prop_find_previous_reverse_pass_then_wrap((text, offsets) in doc_with_occurrences()) {
            let doc = TextBuffer::from(text.as_str());
            let mut search = SearchController::new(doc.len_chars());

            for &expected in offsets.iter().rev() {
                let outcome = search.find_previous(&doc, "ab", ANY);
                prop_assert_eq!(outcome, SearchOutcome::Found(SearchMatch::new(expected, 2)));
            }

            let outcome = search.find_previous(&doc, "ab", ANY);
            match offsets.last() {
                Some(&last) => prop_assert_eq!(outcome.matched().map(|m| m.start), Some(last)),
                None => prop_assert_eq!(outcome, SearchOutcome::NotFound),
            }
        }

        #[test]
        fn prop_cursors_stay_in_bounds(
            (text, _) in doc_with_occurrences(),
            steps in prop::collection::vec(any::<bool>(), 1..20),
        ) {
            let doc = TextBuffer::from(text.as_str());
            let mut search = SearchController::new(doc.len_chars());
            for forward in steps {
                if forward {
                    search.find_next(&doc, "ab", ANY);
                } else {
                    search.find_previous(&doc, "ab", ANY);
                }
                prop_assert!(search.state().forward_pos <= doc.len_chars());
                prop_assert!(search.state().reverse_pos <= doc.len_chars());
            }
        }
    }
}
