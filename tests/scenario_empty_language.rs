//! spec.md §8 scenario 1: empty input yields the empty language.

mod common;
use common::{language, materialized_state_count};
use fsa_builder::build;

#[test]
fn empty_input_yields_empty_language() {
    let automaton = build::<_, Vec<u8>>(Vec::new()).unwrap();
    assert!(language(&automaton).is_empty());
    assert!(!automaton.contains(b""));
    assert_eq!(materialized_state_count(&automaton), 0);
}
