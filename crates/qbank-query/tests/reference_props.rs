//! Property tests for reference parsing and reading order.

use std::cmp::Ordering;

use proptest::prelude::*;
use qbank_query::{compare_reading_order, parse_reference};

proptest! {
    #[test]
    fn parsing_is_total(raw in ".*", source in ".*") {
        let parts = parse_reference(&raw, &source);
        prop_assert!(!parts.book.is_empty());
        prop_assert!(!parts.chapter.is_empty());
        prop_assert!(!parts.label.is_empty());
    }

    #[test]
    fn parsing_is_deterministic(raw in "[A-Za-z0-9_. ]{0,24}", source in "[A-Za-z .]{0,12}") {
        prop_assert_eq!(parse_reference(&raw, &source), parse_reference(&raw, &source));
    }

    #[test]
    fn numeric_labels_set_the_number(book in "[A-Z][a-z0-9]{0,5}", chapter in "[A-Z][a-z0-9]{0,5}", n in 0u32..100_000) {
        let parts = parse_reference(&format!("{book}_{chapter}_{n}"), "");
        prop_assert_eq!(parts.number, u64::from(n));
        prop_assert_eq!(parts.label, n.to_string());
    }

    #[test]
    fn reading_order_is_antisymmetric(a in "[A-Za-z0-9_]{0,16}", b in "[A-Za-z0-9_]{0,16}") {
        let a = parse_reference(&a, "bank.db");
        let b = parse_reference(&b, "bank.db");
        prop_assert_eq!(compare_reading_order(&a, &b), compare_reading_order(&b, &a).reverse());
        prop_assert_eq!(compare_reading_order(&a, &a), Ordering::Equal);
    }
}
