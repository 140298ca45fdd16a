use crate::pipeline::split_sentences;
use crate::taxonomy::GrammarTables;
use crate::taxonomy::matcher::count_matches;

/// Deterministic grammar-error count. Transcription artifacts are scrubbed
/// first so unreadable markers and doubled-word handwriting corrections never
/// reach the error rules; stylistic choices are not in the rule table at all.
pub fn count_errors(text: &str, tables: &GrammarTables) -> u32 {
    let scrubbed = scrub_artifacts(text, tables);
    let lower = scrubbed.to_lowercase();

    let mut errors: u32 = count_matches(&lower, &tables.error_rules);

    let mut run_ons: u32 = 0;
    for sentence in split_sentences(&scrubbed) {
        let words = sentence.split_whitespace().count();
        if words < tables.fragment_min_words
            && !tables
                .fragment_allow
                .contains(&sentence.to_lowercase().as_str())
        {
            errors += 1;
        }
        if words > tables.run_on_min_words
            && sentence.matches(',').count() <= tables.run_on_max_commas
        {
            run_ons += 1;
        }
    }

    // run-ons weigh half an error each
    errors + run_ons / 2
}

fn scrub_artifacts(text: &str, tables: &GrammarTables) -> String {
    let mut cleaned = text.to_string();
    for rule in &tables.artifact_rules {
        cleaned = rule.replace_all(&cleaned, " ").into_owned();
    }
    collapse_doubled_words(&cleaned)
}

/// "limited limited" style corrections collapse to a single word.
fn collapse_doubled_words(text: &str) -> String {
    let mut out: Vec<&str> = Vec::new();
    for token in text.split_whitespace() {
        let bare = token.trim_matches(|c: char| !c.is_alphanumeric());
        let prev_bare = out
            .last()
            .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()));
        if let Some(prev) = prev_bare {
            if !bare.is_empty() && prev.eq_ignore_ascii_case(bare) {
                continue;
            }
        }
        out.push(token);
    }
    out.join(" ")
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/grammar.rs"]
mod tests;
