use super::*;

fn rules() -> Vec<CompiledRule<u8>> {
    compile(&[
        Rule { pattern: r"because of", tag: 1, tier_rank: 0 },
        Rule { pattern: r"because", tag: 2, tier_rank: 0 },
    ])
}

#[test]
fn test_longest_match_wins() {
    let kept = scan("it happened because of the rules", &rules());
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].tag, 1);
}

#[test]
fn test_tier_breaks_equal_length() {
    let compiled = compile(&[
        Rule { pattern: r"victim", tag: 10, tier_rank: 1 },
        Rule { pattern: r"victim", tag: 20, tier_rank: 0 },
    ]);
    let kept = scan("jonas is a victim", &compiled);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].tag, 20);
}

#[test]
fn test_rule_order_breaks_remaining_ties() {
    let compiled = compile(&[
        Rule { pattern: r"victim", tag: 10, tier_rank: 0 },
        Rule { pattern: r"victim", tag: 20, tier_rank: 0 },
    ]);
    let kept = scan("jonas is a victim", &compiled);
    assert_eq!(kept[0].tag, 10);
}

#[test]
fn test_non_overlapping_matches_all_kept() {
    let kept = scan("because this happened because of that", &rules());
    assert_eq!(kept.len(), 2);
    assert_eq!(kept[0].tag, 2);
    assert_eq!(kept[1].tag, 1);
}

#[test]
fn test_scan_is_deterministic() {
    let compiled = rules();
    let a = scan("because of because", &compiled);
    let b = scan("because of because", &compiled);
    assert_eq!(a, b);
}

#[test]
fn test_phrase_rules_escape_and_bound() {
    let compiled = build_phrase_rules(&["on the other hand"], 7u8, 0);
    assert_eq!(scan("on the other hand, he stayed", &compiled).len(), 1);
    assert!(scan("another hand", &compiled).is_empty());
}

#[test]
fn test_count_matches_counts_occurrences() {
    let compiled = rules();
    assert_eq!(count_matches("because because because", &compiled), 3);
}
