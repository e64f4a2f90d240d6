use regex::{Regex, RegexBuilder};

/// Matched byte ranges within one ingredient line, overlaps merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub spans: Vec<(usize, usize)>,
}

impl Annotation {
    /// True when no active term matched anywhere in the line.
    pub fn is_unmatched(&self) -> bool {
        self.spans.is_empty()
    }
}

/// Compiles the active search terms into per-term patterns and annotates
/// ingredient lines with the ranges a renderer should highlight.
///
/// A term matches where it appears as a whole word, case-insensitively:
/// `\b<term>\b` with the term escaped so free-text input is always matched
/// literally. Strict word boundaries on both sides, so "egg" matches the
/// token "egg" in "2 egg yolks" but not inside "eggs" or "eggplant".
///
/// Annotations are presentational only. The unmatched-ingredient count shown
/// per recipe comes from the engine and is never recomputed here.
pub struct Highlighter {
    patterns: Vec<Regex>,
}

impl Highlighter {
    pub fn new(terms: &[String]) -> Self {
        let patterns = terms
            .iter()
            .map(|term| {
                RegexBuilder::new(&format!(r"\b{}\b", regex::escape(term)))
                    .case_insensitive(true)
                    .build()
                    .expect("escaped term is a valid pattern")
            })
            .collect();

        Self { patterns }
    }

    pub fn annotate(&self, line: &str) -> Annotation {
        let mut spans: Vec<(usize, usize)> = Vec::new();
        for pattern in &self.patterns {
            for found in pattern.find_iter(line) {
                spans.push((found.start(), found.end()));
            }
        }
        spans.sort_unstable();

        // Union of ranges: terms may overlap each other or repeat.
        let mut merged: Vec<(usize, usize)> = Vec::new();
        for (start, end) in spans {
            match merged.last_mut() {
                Some(last) if start <= last.1 => last.1 = last.1.max(end),
                _ => merged.push((start, end)),
            }
        }

        Annotation { spans: merged }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn matches_case_insensitively() {
        let highlighter = Highlighter::new(&terms(&["Milk", "Vanilla"]));
        let annotation = highlighter.annotate("1 cup milk");

        assert_eq!(annotation.spans, vec![(6, 10)]);
        assert!(!annotation.is_unmatched());
    }

    #[test]
    fn unrelated_line_stays_unmatched() {
        let highlighter = Highlighter::new(&terms(&["Egg"]));
        let annotation = highlighter.annotate("2 cups flour");

        assert!(annotation.spans.is_empty());
        assert!(annotation.is_unmatched());
    }

    #[test]
    fn requires_word_boundaries_on_both_sides() {
        let highlighter = Highlighter::new(&terms(&["egg"]));

        assert!(!highlighter.annotate("2 egg yolks").is_unmatched());
        assert!(highlighter.annotate("3 eggs").is_unmatched());
        assert!(highlighter.annotate("1 eggplant, diced").is_unmatched());
    }

    #[test]
    fn every_term_is_matched_independently() {
        let highlighter = Highlighter::new(&terms(&["milk", "sugar"]));
        let annotation = highlighter.annotate("milk, sugar and a pinch of salt");

        assert_eq!(annotation.spans, vec![(0, 4), (6, 11)]);
    }

    #[test]
    fn overlapping_spans_merge_into_one() {
        let highlighter = Highlighter::new(&terms(&["ice cream", "cream"]));
        let annotation = highlighter.annotate("2 scoops ice cream");

        assert_eq!(annotation.spans, vec![(9, 18)]);
    }

    #[test]
    fn repeated_occurrences_all_highlight() {
        let highlighter = Highlighter::new(&terms(&["milk"]));
        let annotation = highlighter.annotate("milk or oat milk");

        assert_eq!(annotation.spans, vec![(0, 4), (12, 16)]);
    }

    #[test]
    fn metacharacters_in_terms_match_literally() {
        let highlighter = Highlighter::new(&terms(&["a+b", "(butter)"]));

        let annotation = highlighter.annotate("mix a+b now");
        assert_eq!(annotation.spans, vec![(4, 7)]);

        // Unescaped, "a+b" would match the run of a's here; the literal
        // term must not.
        assert!(highlighter.annotate("aab").is_unmatched());

        // A leading parenthesis never sits on a word boundary, so the term
        // cannot match, but building the pattern must not fail.
        assert!(highlighter.annotate("salted (butter) only").is_unmatched());
    }
}
