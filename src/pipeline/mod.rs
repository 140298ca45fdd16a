pub mod grammar;
pub mod stage1_extract;
pub mod stage2_score;
pub mod stage3_feedback;

use std::collections::BTreeSet;

use crate::input::RawResponse;
use crate::input::kernel::DeviceKernel;
use crate::model::RubricVariant;
use crate::model::record::ComponentRecord;
use crate::model::scores::EvaluationResult;
use crate::taxonomy::{Registry, STOPWORDS};

/// Evaluate one response under one rubric variant. Pure: the result is a
/// total function of (response, tables, kernel); batches of calls may run
/// concurrently on shared tables.
pub fn evaluate(
    response: &RawResponse,
    variant: RubricVariant,
    registry: &Registry,
    kernel: Option<&DeviceKernel>,
) -> EvaluationResult {
    let record = match variant {
        RubricVariant::Component => ComponentRecord::Analytical(stage1_extract::extract_analytical(
            &response.text,
            registry.component(),
        )),
        RubricVariant::Argument => ComponentRecord::Argument(stage1_extract::extract_argument(
            &response.text,
            registry.argument(),
        )),
    };

    let scores = stage2_score::run_scores(&record);
    let feedback = stage3_feedback::generate_feedback(&record, &scores, &response.text, kernel);

    EvaluationResult {
        variant,
        sm1: scores.sm1.value,
        ceiling: scores.sm1.ceiling,
        sm2: scores.sm2,
        sm3: scores.sm3,
        overall: scores.overall,
        total_points: scores.total_points,
        layer: scores.layer,
        word_count: response.word_count,
        record,
        feedback,
    }
}

/// Sentence split on terminal punctuation runs; empty segments dropped.
pub fn split_sentences(text: &str) -> Vec<String> {
    text.split(|c| matches!(c, '.' | '!' | '?'))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn word_count(text: &str) -> u32 {
    text.split_whitespace().count() as u32
}

/// Normalized phrasing used by the distinctness rule: lowercase, punctuation
/// replaced by spaces, whitespace collapsed.
pub fn normalize_phrase(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch.is_alphanumeric() {
            out.extend(ch.to_lowercase());
        } else {
            out.push(' ');
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn content_words(text: &str) -> BTreeSet<String> {
    normalize_phrase(text)
        .split_whitespace()
        .filter(|w| !STOPWORDS.contains(w))
        .map(str::to_string)
        .collect()
}

/// Distinctness rule: two mentions are duplicates when their normalized
/// phrasings are equal or their content-word Jaccard similarity is >= 0.6.
/// The threshold is an explicit choice; see DESIGN.md.
pub fn is_duplicate(a: &str, b: &str) -> bool {
    let na = normalize_phrase(a);
    let nb = normalize_phrase(b);
    if na == nb {
        return true;
    }
    let wa = content_words(a);
    let wb = content_words(b);
    if wa.is_empty() || wb.is_empty() {
        return na == nb;
    }
    let inter = wa.intersection(&wb).count();
    let union = wa.union(&wb).count();
    (inter as f32 / union as f32) >= 0.6
}

/// Flags each text distinct iff it duplicates no earlier distinct text.
pub fn mark_distinct(texts: &[&str]) -> Vec<bool> {
    let mut flags = vec![false; texts.len()];
    let mut kept: Vec<usize> = Vec::new();
    for (i, text) in texts.iter().enumerate() {
        let dup = kept.iter().any(|&k| is_duplicate(texts[k], text));
        if !dup {
            flags[i] = true;
            kept.push(i);
        }
    }
    flags
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/helpers.rs"]
mod tests;
