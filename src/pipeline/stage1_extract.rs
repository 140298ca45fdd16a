use std::collections::BTreeSet;

use crate::model::record::{
    AnalyticalRecord, ArgumentRecord, CohesionProfile, ConnectorHit, DetailItem, DetailTier,
    EffectDimension, EvidenceItem, EvidenceTier, InsightItem, PositionSide, ReasoningChain,
    ReasoningType, StanceStrength, TaggedVerb, VerbTier,
};
use crate::pipeline::{grammar, mark_distinct, split_sentences};
use crate::taxonomy::argument::ArgumentTables;
use crate::taxonomy::component::ComponentTables;
use crate::taxonomy::matcher::{CompiledRule, scan};
use crate::taxonomy::{ConnectorTables, SupportMarkers};

/// Shared support-quality ladder: quotation, attribution, and counted context
/// elements drive the score. Variant-specific tier labels are applied by the
/// callers.
pub fn assess_support(text: &str, has_items: bool, markers: &SupportMarkers) -> f32 {
    if !has_items {
        return 2.0;
    }

    let lower = text.to_lowercase();
    let has_quote = markers.quote.is_match(text);
    let has_attribution = markers.attribution.is_match(text);

    if !has_quote {
        if markers.can_visualize(&lower) { 4.0 } else { 3.0 }
    } else if !has_attribution {
        4.0
    } else {
        // quote + attribution: 2-3 context elements step to 4.5/4.75,
        // all four reach the top of the ladder
        let context = markers.context_count(&lower);
        match context {
            0 | 1 => 4.0 + 0.25 * context as f32,
            2 | 3 => 4.25 + 0.25 * (context - 1) as f32,
            _ => 5.0,
        }
    }
}

fn extract_connectors(lower: &str, tables: &ConnectorTables) -> CohesionProfile {
    let mut profile = CohesionProfile::default();
    for m in scan(lower, &tables.rules) {
        let text = lower[m.start..m.end].to_string();
        profile.connector_types.insert(m.tag);
        profile.connectors.push(ConnectorHit { kind: m.tag, text });
    }
    profile
}

fn dimension_tags(sentence: &str, rules: &[CompiledRule<EffectDimension>]) -> Vec<EffectDimension> {
    let mut tags: Vec<EffectDimension> = rules
        .iter()
        .filter(|r| r.regex.is_match(sentence))
        .map(|r| r.tag)
        .collect();
    tags.sort();
    tags.dedup();
    tags
}

pub fn extract_analytical(text: &str, tables: &ComponentTables) -> AnalyticalRecord {
    if text.trim().is_empty() {
        return AnalyticalRecord::empty();
    }

    let lower = text.to_lowercase();
    let sentences = split_sentences(text);

    let topics = extract_topics(&lower, &sentences, tables);
    let verbs = extract_verbs(&lower, tables);
    let objects = extract_objects(&lower, &sentences, tables, &verbs);
    let details = extract_details(text, &lower, tables);
    let insights = extract_insights(&sentences, tables, &verbs);

    let detail_score = assess_support(text, !details.is_empty(), &tables.support);
    let detail_tier = component_detail_tier(detail_score, !details.is_empty());
    let details = details
        .into_iter()
        .map(|(text, quoted)| DetailItem {
            tier: if quoted {
                detail_tier.max(DetailTier::Specific)
            } else {
                DetailTier::Vague
            },
            text,
        })
        .collect();

    let distinct_insights = insights.iter().filter(|i| i.distinct).count() as u32;
    let dimension_coverage: BTreeSet<EffectDimension> = insights
        .iter()
        .filter(|i| i.distinct)
        .flat_map(|i| i.dimensions.iter().copied())
        .collect();

    let mut cohesion = extract_connectors(&lower, &tables.connectors);
    cohesion.grammar_errors = grammar::count_errors(text, &tables.grammar);

    AnalyticalRecord {
        topics,
        verbs,
        objects,
        details,
        detail_tier,
        detail_score,
        insights,
        distinct_insights,
        dimension_coverage,
        cohesion,
    }
}

fn component_detail_tier(score: f32, has_items: bool) -> DetailTier {
    if !has_items {
        DetailTier::Missing
    } else if score >= 4.5 {
        DetailTier::Precise
    } else if score >= 4.0 {
        DetailTier::Specific
    } else {
        DetailTier::Vague
    }
}

fn extract_topics(lower: &str, sentences: &[String], tables: &ComponentTables) -> Vec<String> {
    let mut topics: BTreeSet<String> = BTreeSet::new();

    for topic in tables.topics {
        if lower.contains(topic) {
            topics.insert((*topic).to_string());
        }
    }

    // Capitalized words are likely character or author names.
    const SKIP: &[&str] = &["the", "this", "that", "chapter", "in", "and", "for"];
    for sentence in sentences {
        for word in sentence.split_whitespace() {
            let bare = word.trim_matches(|c: char| !c.is_alphanumeric());
            if bare.len() > 2
                && bare.chars().next().is_some_and(|c| c.is_uppercase())
                && !SKIP.contains(&bare.to_lowercase().as_str())
            {
                topics.insert(bare.to_string());
            }
        }
    }

    topics.into_iter().collect()
}

fn extract_verbs(lower: &str, tables: &ComponentTables) -> Vec<TaggedVerb> {
    let mut seen: BTreeSet<(String, VerbTier)> = BTreeSet::new();
    let mut verbs = Vec::new();
    for m in scan(lower, &tables.verbs) {
        let text = lower[m.start..m.end].to_string();
        if seen.insert((text.clone(), m.tag)) {
            verbs.push(TaggedVerb { text, tier: m.tag });
        }
    }
    verbs.sort_by(|a, b| a.text.cmp(&b.text));
    verbs
}

fn extract_objects(
    lower: &str,
    sentences: &[String],
    tables: &ComponentTables,
    verbs: &[TaggedVerb],
) -> Vec<String> {
    let mut objects: BTreeSet<String> = BTreeSet::new();

    for rule in &tables.object_rules {
        for caps in rule.captures_iter(lower) {
            if let Some(m) = caps.get(1) {
                if m.as_str().len() > 3 {
                    objects.insert(m.as_str().to_string());
                }
            }
        }
    }

    // Nouns trailing an analytical verb are what the analysis acts on.
    for sentence in sentences {
        let sentence_lower = sentence.to_lowercase();
        for verb in verbs.iter().filter(|v| v.tier.analytical()) {
            if let Some(pos) = sentence_lower.find(&verb.text) {
                let tail = &sentence_lower[pos + verb.text.len()..];
                for word in tail.split_whitespace().take(5) {
                    let bare = word.trim_matches(|c: char| !c.is_alphanumeric());
                    if bare.len() > 3 && !crate::taxonomy::STOPWORDS.contains(&bare) {
                        objects.insert(bare.to_string());
                    }
                }
            }
        }
    }

    objects.into_iter().collect()
}

/// Returns (text, was_quoted) pairs.
fn extract_details(text: &str, lower: &str, tables: &ComponentTables) -> Vec<(String, bool)> {
    let mut details = Vec::new();

    for caps in tables.support.quote.captures_iter(text) {
        if let Some(q) = caps.get(1) {
            details.push((q.as_str().to_string(), true));
        }
    }

    for rule in &tables.detail_rules {
        for caps in rule.captures_iter(lower) {
            if let Some(m) = caps.get(1) {
                let phrase = m.as_str().trim().to_string();
                if !phrase.is_empty() {
                    details.push((phrase, false));
                }
            }
        }
    }

    details
}

fn extract_insights(
    sentences: &[String],
    tables: &ComponentTables,
    verbs: &[TaggedVerb],
) -> Vec<InsightItem> {
    let analytical: Vec<&str> = verbs
        .iter()
        .filter(|v| v.tier.analytical())
        .map(|v| v.text.as_str())
        .collect();

    let mut candidates: Vec<(String, Vec<EffectDimension>)> = Vec::new();
    for sentence in sentences {
        let sentence_lower = sentence.to_lowercase();
        let is_attempt = analytical
            .iter()
            .any(|v| sentence_lower.split_whitespace().any(|w| {
                w.trim_matches(|c: char| !c.is_alphanumeric()) == *v
            }));
        if is_attempt {
            let dims = dimension_tags(&sentence_lower, &tables.dimensions);
            candidates.push((sentence.clone(), dims));
        }
    }

    let texts: Vec<&str> = candidates.iter().map(|(t, _)| t.as_str()).collect();
    let flags = mark_distinct(&texts);

    candidates
        .into_iter()
        .zip(flags)
        .map(|((text, dimensions), distinct)| InsightItem {
            text,
            dimensions,
            distinct,
        })
        .collect()
}

pub fn extract_argument(text: &str, tables: &ArgumentTables) -> ArgumentRecord {
    if text.trim().is_empty() {
        return ArgumentRecord::empty();
    }

    let lower = text.to_lowercase();
    let sentences = split_sentences(text);

    let (position, position_label) = extract_position(&lower, tables);
    let strength = extract_strength(&lower, tables);
    let evidence = extract_evidence(text, &sentences, tables);
    let (chains, distinct_chains, type_coverage) = extract_reasoning(&sentences, tables);
    let counter_arguments = extract_counters(&sentences, tables);
    let synthesis = extract_synthesis(&sentences, tables);

    let support_score = assess_support(text, !evidence.is_empty(), &tables.support);
    let evidence_tier = argument_evidence_tier(support_score, &evidence);
    let evidence_score = argument_evidence_score(support_score, evidence_tier);

    let mut cohesion = extract_connectors(&lower, &tables.connectors);
    cohesion.grammar_errors = grammar::count_errors(text, &tables.grammar);

    ArgumentRecord {
        position,
        position_label,
        strength,
        evidence,
        evidence_tier,
        evidence_score,
        chains,
        distinct_chains,
        type_coverage,
        counter_arguments,
        synthesis,
        cohesion,
    }
}

fn extract_position(lower: &str, tables: &ArgumentTables) -> (PositionSide, String) {
    let a = tables.side_a.hits(lower);
    let b = tables.side_b.hits(lower);
    if a > b {
        (PositionSide::SideA, tables.side_a.label.to_string())
    } else if b > a {
        (PositionSide::SideB, tables.side_b.label.to_string())
    } else if a > 0 {
        (
            PositionSide::BothAcknowledged,
            format!("both {} and {}", tables.side_a.label, tables.side_b.label),
        )
    } else {
        (PositionSide::Unclear, "unclear".to_string())
    }
}

fn extract_strength(lower: &str, tables: &ArgumentTables) -> StanceStrength {
    tables
        .stances
        .iter()
        .filter(|r| r.regex.is_match(lower))
        .map(|r| r.tag)
        .max()
        .unwrap_or(StanceStrength::Missing)
}

fn extract_evidence(text: &str, sentences: &[String], tables: &ArgumentTables) -> Vec<EvidenceItem> {
    let mut evidence = Vec::new();
    let mut quoted: Vec<String> = Vec::new();

    for caps in tables.support.quote.captures_iter(text) {
        if let Some(q) = caps.get(1) {
            quoted.push(q.as_str().to_lowercase());
            evidence.push(EvidenceItem {
                text: q.as_str().to_string(),
                tier: EvidenceTier::Specific,
            });
        }
    }

    for sentence in sentences {
        let sentence_lower = sentence.to_lowercase();
        for m in scan(&sentence_lower, &tables.evidence) {
            let matched = sentence_lower[m.start..m.end].to_string();
            if matched.len() > 10 && !quoted.iter().any(|q| q.contains(&matched)) {
                evidence.push(EvidenceItem {
                    text: matched,
                    tier: m.tag,
                });
            }
        }
    }

    evidence
}

fn argument_evidence_tier(support_score: f32, items: &[EvidenceItem]) -> EvidenceTier {
    if items.is_empty() {
        return EvidenceTier::Missing;
    }
    if support_score >= 4.5 {
        EvidenceTier::Specific
    } else if support_score >= 4.0 {
        EvidenceTier::Paraphrased
    } else {
        // no quote anywhere: the best signal tier decides between
        // general reference and bare assertion
        let best = items.iter().map(|e| e.tier).max().unwrap_or(EvidenceTier::Missing);
        if best <= EvidenceTier::Assertion {
            EvidenceTier::Assertion
        } else {
            EvidenceTier::General
        }
    }
}

fn argument_evidence_score(support_score: f32, tier: EvidenceTier) -> f32 {
    match tier {
        EvidenceTier::Missing => 2.0,
        EvidenceTier::Assertion => 2.5,
        EvidenceTier::General => 3.0,
        EvidenceTier::Paraphrased | EvidenceTier::Specific => support_score,
    }
}

fn extract_reasoning(
    sentences: &[String],
    tables: &ArgumentTables,
) -> (Vec<ReasoningChain>, u32, BTreeSet<ReasoningType>) {
    // Per-sentence type sets first; a sentence may reason in several modes
    // but counts once toward distinctness.
    let mut tagged: Vec<(String, Vec<ReasoningType>)> = Vec::new();
    for sentence in sentences {
        let sentence_lower = sentence.to_lowercase();
        let mut kinds: Vec<ReasoningType> = tables
            .reasoning
            .iter()
            .filter(|r| r.regex.is_match(&sentence_lower))
            .map(|r| r.tag)
            .collect();
        kinds.sort();
        kinds.dedup();
        if !kinds.is_empty() {
            tagged.push((sentence.clone(), kinds));
        }
    }

    let texts: Vec<&str> = tagged.iter().map(|(t, _)| t.as_str()).collect();
    let flags = mark_distinct(&texts);

    let mut chains = Vec::new();
    let mut coverage: BTreeSet<ReasoningType> = BTreeSet::new();
    let mut distinct_chains = 0u32;
    for ((text, kinds), distinct) in tagged.into_iter().zip(flags) {
        if distinct {
            distinct_chains += 1;
            coverage.extend(kinds.iter().copied());
        }
        for kind in kinds {
            chains.push(ReasoningChain {
                text: text.clone(),
                kind,
                distinct,
            });
        }
    }

    (chains, distinct_chains, coverage)
}

fn extract_counters(sentences: &[String], tables: &ArgumentTables) -> Vec<String> {
    let mut counters = Vec::new();
    for sentence in sentences {
        let sentence_lower = sentence.to_lowercase();
        if tables.counters.iter().any(|r| r.is_match(&sentence_lower)) {
            counters.push(sentence.clone());
        }
    }
    counters
}

/// Synthesis lives in the closing sentences; the first of the final three
/// that carries a synthesis marker is taken.
fn extract_synthesis(sentences: &[String], tables: &ArgumentTables) -> Option<String> {
    let tail = if sentences.len() >= 3 {
        &sentences[sentences.len() - 3..]
    } else {
        sentences
    };
    for sentence in tail {
        let sentence_lower = sentence.to_lowercase();
        if tables.synthesis.iter().any(|r| r.is_match(&sentence_lower)) {
            return Some(sentence.clone());
        }
    }
    None
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_extract.rs"]
mod tests;
