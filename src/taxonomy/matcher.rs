use regex::Regex;

/// One taxonomy entry: a signal pattern plus the tag its match carries.
/// `tier_rank` orders tags for overlap resolution; 0 is the strongest tier.
#[derive(Debug, Clone, Copy)]
pub struct Rule<T: Copy> {
    pub pattern: &'static str,
    pub tag: T,
    pub tier_rank: u8,
}

#[derive(Debug)]
pub struct CompiledRule<T: Copy> {
    pub regex: Regex,
    pub tag: T,
    pub tier_rank: u8,
}

pub fn compile<T: Copy>(rules: &[Rule<T>]) -> Vec<CompiledRule<T>> {
    rules
        .iter()
        .map(|r| CompiledRule {
            regex: Regex::new(r.pattern).unwrap(),
            tag: r.tag,
            tier_rank: r.tier_rank,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpanMatch<T: Copy> {
    pub start: usize,
    pub end: usize,
    pub tag: T,
    pub tier_rank: u8,
    pub rule_index: usize,
}

/// Scan `text` with every rule and resolve overlapping spans with the fixed
/// tie-break order: longer match first, then stronger tier, then earlier rule
/// order. The order is part of the extraction contract; identical input always
/// yields the identical match set.
pub fn scan<T: Copy>(text: &str, rules: &[CompiledRule<T>]) -> Vec<SpanMatch<T>> {
    let mut all: Vec<SpanMatch<T>> = Vec::new();
    for (idx, rule) in rules.iter().enumerate() {
        for m in rule.regex.find_iter(text) {
            all.push(SpanMatch {
                start: m.start(),
                end: m.end(),
                tag: rule.tag,
                tier_rank: rule.tier_rank,
                rule_index: idx,
            });
        }
    }

    all.sort_by(|a, b| {
        a.start
            .cmp(&b.start)
            .then((b.end - b.start).cmp(&(a.end - a.start)))
            .then(a.tier_rank.cmp(&b.tier_rank))
            .then(a.rule_index.cmp(&b.rule_index))
    });

    let mut kept: Vec<SpanMatch<T>> = Vec::new();
    for cand in all {
        let overlaps = kept
            .iter()
            .any(|k| cand.start < k.end && k.start < cand.end);
        if !overlaps {
            kept.push(cand);
        }
    }
    kept
}

/// Total occurrence count across all rules, without overlap resolution.
/// Used where the taxonomy counts events (grammar errors), not spans.
pub fn count_matches<T: Copy>(text: &str, rules: &[CompiledRule<T>]) -> u32 {
    rules
        .iter()
        .map(|r| r.regex.find_iter(text).count() as u32)
        .sum()
}

/// Build compiled rules from literal phrases, escaping regex metacharacters
/// and anchoring on word boundaries.
pub fn build_phrase_rules<T: Copy>(phrases: &[&'static str], tag: T, tier_rank: u8) -> Vec<CompiledRule<T>> {
    phrases
        .iter()
        .map(|p| CompiledRule {
            regex: Regex::new(&format!(r"\b{}\b", regex::escape(p))).unwrap(),
            tag,
            tier_rank,
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/taxonomy/matcher.rs"]
mod tests;
