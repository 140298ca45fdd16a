use super::*;

#[test]
fn test_split_sentences() {
    let s = split_sentences("First one. Second one! Third?  ");
    assert_eq!(s, vec!["First one", "Second one", "Third"]);
}

#[test]
fn test_split_sentences_empty() {
    assert!(split_sentences("").is_empty());
    assert!(split_sentences("   ").is_empty());
}

#[test]
fn test_word_count() {
    assert_eq!(word_count("Jonas is a victim."), 4);
    assert_eq!(word_count(""), 0);
}

#[test]
fn test_normalize_phrase() {
    assert_eq!(normalize_phrase("Jonas,  is A   victim!"), "jonas is a victim");
}

#[test]
fn test_duplicate_on_normalized_equality() {
    assert!(is_duplicate("Jonas is a victim.", "jonas is a victim"));
}

#[test]
fn test_duplicate_on_high_jaccard() {
    assert!(is_duplicate(
        "Jonas saved Gabriel from release",
        "Jonas saved Gabriel"
    ));
}

#[test]
fn test_distinct_claims_stay_distinct() {
    assert!(!is_duplicate(
        "The narrator creates suspense for the reader",
        "Jonas suffered through painful memories alone"
    ));
}

#[test]
fn test_mark_distinct_flags_first_of_each_group() {
    let texts = vec![
        "Jonas saved Gabriel from release",
        "Jonas saved Gabriel",
        "The community hides the truth",
    ];
    let flags = mark_distinct(&texts);
    assert_eq!(flags, vec![true, false, true]);
}

#[test]
fn test_evaluate_is_deterministic() {
    let registry = Registry::builtin();
    let response = RawResponse::from_text(
        "The narrator creates suspense and makes the reader question the rules. However the author suggests a dark secret.",
    );
    let a = evaluate(&response, RubricVariant::Component, &registry, None);
    let b = evaluate(&response, RubricVariant::Component, &registry, None);
    assert_eq!(a, b);
    assert_eq!(a.sm1.to_bits(), b.sm1.to_bits());
    assert_eq!(a.sm2.to_bits(), b.sm2.to_bits());
    assert_eq!(a.sm3.to_bits(), b.sm3.to_bits());
    assert_eq!(a.overall.to_bits(), b.overall.to_bits());
}

#[test]
fn test_evaluate_weights_hold_exactly() {
    let registry = Registry::builtin();
    for text in [
        "Jonas is a victim.",
        "The narrator creates suspense and makes the reader question the rules.",
        "",
    ] {
        let response = RawResponse::from_text(text);
        for variant in [RubricVariant::Component, RubricVariant::Argument] {
            let r = evaluate(&response, variant, &registry, None);
            let expected = crate::model::scores::weighted_overall(r.sm1, r.sm2, r.sm3);
            assert_eq!(r.overall.to_bits(), expected.to_bits());
            assert_eq!(r.total_points.to_bits(), (expected * 5.0).to_bits());
        }
    }
}

#[test]
fn test_ceiling_bounds_sm2_and_sm3() {
    let registry = Registry::builtin();
    let samples = [
        "Jonas is a victim.",
        "I strongly believe Jonas is more of a victim than a hero. Although he saved Gabriel when they escaped together, he suffered through hundreds of painful memories alone, because the community forced the burden onto one child.",
        "The narrator creates suspense. However the author suggests a dark secret. Therefore the reader keeps reading.",
        "word",
        "",
    ];
    for text in samples {
        let response = RawResponse::from_text(text);
        for variant in [RubricVariant::Component, RubricVariant::Argument] {
            let r = evaluate(&response, variant, &registry, None);
            assert!(r.sm2 <= r.ceiling, "sm2 {} > ceiling {} for {text:?}", r.sm2, r.ceiling);
            assert!(r.sm3 <= r.ceiling, "sm3 {} > ceiling {} for {text:?}", r.sm3, r.ceiling);
        }
    }
}

#[test]
fn test_concurrent_evaluations_agree() {
    let registry = Registry::builtin();
    let response = RawResponse::from_text("Jonas is a victim.");
    let baseline = evaluate(&response, RubricVariant::Argument, &registry, None);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let response = response.clone();
            std::thread::spawn(move || {
                let registry = Registry::builtin();
                evaluate(&response, RubricVariant::Argument, &registry, None)
            })
        })
        .collect();
    for handle in handles {
        let result = handle.join().expect("evaluation thread panicked");
        assert_eq!(result, baseline);
    }
}
