use super::*;

fn tables() -> &'static crate::taxonomy::GrammarTables {
    &crate::taxonomy::component::tables().grammar
}

#[test]
fn test_agreement_errors_counted() {
    let n = count_errors("He have a plan today. She were very sad there.", tables());
    assert_eq!(n, 2);
}

#[test]
fn test_clean_text_counts_zero() {
    let n = count_errors(
        "The narrator creates suspense for the reader in every chapter.",
        tables(),
    );
    assert_eq!(n, 0);
}

#[test]
fn test_transcription_artifacts_excluded() {
    // doubled word and n/a marker come from transcription, not the student
    let n = count_errors("The narrator narrator stays n/a limited in this chapter.", tables());
    assert_eq!(n, 0);
}

#[test]
fn test_unclear_marker_excluded() {
    let n = count_errors("The narrator stays [UNCLEAR] limited in this chapter.", tables());
    assert_eq!(n, 0);
}

#[test]
fn test_fragments_counted() {
    assert_eq!(count_errors("So cold.", tables()), 1);
    // allowlisted single-word replies are not fragments
    assert_eq!(count_errors("Yes.", tables()), 0);
}

#[test]
fn test_run_ons_weigh_half() {
    let long = (0..40)
        .map(|i| format!("token{i}"))
        .collect::<Vec<_>>()
        .join(" ");
    let one = count_errors(&format!("{long}."), tables());
    assert_eq!(one, 0);
    let two = count_errors(&format!("{long}. {long}."), tables());
    assert_eq!(two, 1);
}

#[test]
fn test_more_errors_never_decrease_count() {
    let base = count_errors("He have a plan for the day.", tables());
    let more = count_errors("He have a plan for the day. She were very sad there.", tables());
    assert!(more >= base);
}
