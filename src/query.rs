use urlencoding::encode;

/// Fixed result-page size, baked into every descriptor so its shape stays
/// stable for the lifetime of the session.
pub const PAGE_SIZE: u32 = 10;

/// Canonical encoding of one search request: the ingredient terms in entry
/// order, the 1-based page number, and the fixed page size.
///
/// The encoded form doubles as the outgoing query string and as the identity
/// key for request de-duplication, so it must be byte-stable: same terms in
/// the same order and the same page always encode identically. Term order is
/// significant to the remote ranking and is never normalized away.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryDescriptor {
    encoded: String,
}

impl QueryDescriptor {
    pub fn build(terms: &[String], page: u32) -> Self {
        debug_assert!(page >= 1, "page numbers are 1-based");

        let mut encoded = String::new();
        for term in terms {
            encoded.push_str("ingredient_search_terms=");
            encoded.push_str(&encode(term));
            encoded.push('&');
        }
        encoded.push_str(&format!("page_number={}&page_size={}", page, PAGE_SIZE));

        Self { encoded }
    }

    pub fn query_string(&self) -> &str {
        &self.encoded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_terms_and_page_encode_identically() {
        let terms = vec!["Milk".to_string(), "Vanilla".to_string()];
        assert_eq!(
            QueryDescriptor::build(&terms, 1),
            QueryDescriptor::build(&terms, 1)
        );
    }

    #[test]
    fn term_order_is_significant() {
        let a = vec!["Milk".to_string(), "Vanilla".to_string()];
        let b = vec!["Vanilla".to_string(), "Milk".to_string()];
        assert_ne!(QueryDescriptor::build(&a, 1), QueryDescriptor::build(&b, 1));
    }

    #[test]
    fn duplicate_terms_are_preserved() {
        let once = vec!["Milk".to_string()];
        let twice = vec!["Milk".to_string(), "Milk".to_string()];
        assert_ne!(
            QueryDescriptor::build(&once, 1),
            QueryDescriptor::build(&twice, 1)
        );
    }

    #[test]
    fn page_changes_leave_term_prefix_intact() {
        let terms = vec!["Yogurt".to_string(), "Sugar".to_string()];
        let p1 = QueryDescriptor::build(&terms, 1);
        let p2 = QueryDescriptor::build(&terms, 2);

        assert_ne!(p1, p2);

        let prefix = "ingredient_search_terms=Yogurt&ingredient_search_terms=Sugar&";
        assert!(p1.query_string().starts_with(prefix));
        assert!(p2.query_string().starts_with(prefix));
        assert!(p1.query_string().ends_with("page_number=1&page_size=10"));
        assert!(p2.query_string().ends_with("page_number=2&page_size=10"));
    }

    #[test]
    fn terms_are_percent_encoded() {
        let terms = vec!["soy sauce".to_string()];
        let descriptor = QueryDescriptor::build(&terms, 1);
        assert_eq!(
            descriptor.query_string(),
            "ingredient_search_terms=soy%20sauce&page_number=1&page_size=10"
        );
    }
}
