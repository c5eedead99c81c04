//! Property tests for grading.

use proptest::prelude::*;
use qbank_grade::{MatchConfiguration, Response, is_correct, link};
use qbank_model::{Question, QuestionDraft};

/// A matching question whose left group has `m` choices sharing identifier
/// `A` and whose right group has `n` choices sharing identifier `1`.
fn grouped_matching(m: usize, n: usize) -> Question {
    let left = ('A'..='D').take(m).enumerate();
    let right = ('M'..='P').take(n).enumerate();
    let draft = QuestionDraft::new("m", "(Matching) pair").with_answer("A,1");
    let draft = left.fold(draft, |draft, (i, key)| {
        draft.with_choice(key, format!("A. left {i}"))
    });
    right
        .fold(draft, |draft, (j, key)| {
            draft.with_choice(key, format!("1. right {j}"))
        })
        .build()
}

proptest! {
    #[test]
    fn links_form_full_product(m in 1usize..=4, n in 1usize..=4) {
        let config = MatchConfiguration::from_question(&grouped_matching(m, n));
        prop_assert!(config.is_valid);
        prop_assert_eq!(config.correct_links.len(), m * n);
        prop_assert_eq!(config.left_items.len(), m);
        prop_assert_eq!(config.right_choices.len(), n);
    }

    #[test]
    fn matching_grade_ignores_order(m in 1usize..=4, n in 1usize..=4, seed in any::<u64>()) {
        let question = grouped_matching(m, n);
        let config = MatchConfiguration::from_question(&question);
        let mut links: Vec<String> = config.correct_links.iter().cloned().collect();
        let len = links.len();
        links.rotate_left(usize::try_from(seed % len as u64).unwrap_or(0));
        prop_assert!(is_correct(&question, Some(&Response::Links(links.clone()))));

        links.pop();
        prop_assert!(!is_correct(&question, Some(&Response::Links(links))));
    }

    #[test]
    fn multi_select_grade_ignores_order(keys in proptest::sample::subsequence(vec!["A", "B", "C", "D"], 2..=4)) {
        let answer = keys.join(",");
        let question = ['A', 'B', 'C', 'D']
            .into_iter()
            .fold(QuestionDraft::new("q", "Pick").with_answer(answer), |draft, key| {
                draft.with_choice(key, format!("option {key}"))
            })
            .build();

        let mut reversed = keys.clone();
        reversed.reverse();
        prop_assert!(is_correct(&question, Some(&Response::keys(keys.clone()))));
        prop_assert!(is_correct(&question, Some(&Response::keys(reversed))));
        prop_assert!(!is_correct(&question, Some(&Response::keys(keys[..1].to_vec()))));
    }
}

#[test]
fn link_format_uses_separator() {
    assert_eq!(link("left", 'C'), "left||C");
}
