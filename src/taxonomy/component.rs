use std::sync::OnceLock;

use regex::Regex;

use crate::model::record::{EffectDimension, VerbTier};
use crate::taxonomy::matcher::{CompiledRule, Rule, build_phrase_rules, compile};
use crate::taxonomy::{
    ConnectorTables, GrammarTables, SupportMarkers, build_connector_tables, build_grammar_tables,
    build_support_markers,
};

const TIER1_VERBS: &[&str] = &[
    "creates",
    "reveals",
    "demonstrates",
    "challenges",
    "undermines",
    "exposes",
    "critiques",
    "interrogates",
    "disrupts",
    "subverts",
    "constructs",
    "deconstructs",
];

const TIER2_VERBS: &[&str] = &[
    "shows",
    "indicates",
    "suggests",
    "implies",
    "reflects",
    "illustrates",
    "represents",
    "conveys",
    "establishes",
    "develops",
    "presents",
    "depicts",
    "portrays",
    "allows",
    "enables",
    "helps",
    "hints",
    "prepares",
    "builds",
];

const TIER3_VERBS: &[&str] = &[
    "is", "are", "was", "were", "has", "have", "had", "uses", "employs", "does",
    "makes", "gets", "becomes", "seems", "appears", "looks", "leaves",
];

/// Insight-depth dimension signals. An insight sentence can touch any number
/// of dimensions; coverage is the set observed across distinct insights.
const READER_RESPONSE_SIGNALS: &[Rule<EffectDimension>] = &[
    Rule {
        pattern: r"makes?\s+(?:the\s+)?readers?\s+(?:feel|question|believe|understand|recognize|wonder)",
        tag: EffectDimension::ReaderResponse,
        tier_rank: 0,
    },
    Rule {
        pattern: r"(?:allows?|invites?|encourages?|forces?)\s+(?:the\s+)?readers?\s+to",
        tag: EffectDimension::ReaderResponse,
        tier_rank: 0,
    },
    Rule {
        pattern: r"creates?\s+(?:tension|suspense|mystery|interest)",
        tag: EffectDimension::ReaderResponse,
        tier_rank: 1,
    },
];

const MEANING_CREATION_SIGNALS: &[Rule<EffectDimension>] = &[
    Rule {
        pattern: r"reveal(?:s|ing)?\s+(?:how|that|why)",
        tag: EffectDimension::MeaningCreation,
        tier_rank: 0,
    },
    Rule {
        pattern: r"(?:shows?|demonstrat(?:es|ing))\s+(?:us\s+)?(?:how|that)",
        tag: EffectDimension::MeaningCreation,
        tier_rank: 0,
    },
    Rule {
        pattern: r"expos(?:es|ing)\s+(?:the\s+)?(?:system|pattern|contradiction|truth)",
        tag: EffectDimension::MeaningCreation,
        tier_rank: 0,
    },
    Rule {
        pattern: r"suggest(?:s|ing)\s+(?:how|that|why)",
        tag: EffectDimension::MeaningCreation,
        tier_rank: 1,
    },
];

const THEMATIC_IMPACT_SIGNALS: &[Rule<EffectDimension>] = &[
    Rule {
        pattern: r"reinforc(?:es|ing)\s+the\s+theme\s+of",
        tag: EffectDimension::ThematicImpact,
        tier_rank: 0,
    },
    Rule {
        pattern: r"reflect(?:s|ing)\s+(?:a\s+|the\s+)?concern\s+with",
        tag: EffectDimension::ThematicImpact,
        tier_rank: 0,
    },
    Rule {
        pattern: r"challeng(?:es|ing)\s+the\s+idea\s+that",
        tag: EffectDimension::ThematicImpact,
        tier_rank: 0,
    },
    Rule {
        pattern: r"\btheme\s+of\s+\w+",
        tag: EffectDimension::ThematicImpact,
        tier_rank: 1,
    },
];

const LITERARY_TOPICS: &[&str] = &[
    "narrator",
    "narration",
    "point of view",
    "pov",
    "perspective",
    "character",
    "protagonist",
    "author",
    "lowry",
    "fitzgerald",
    "tone",
    "theme",
    "conflict",
    "resolution",
    "setting",
    "metaphor",
    "symbolism",
    "irony",
    "foreshadowing",
    "imagery",
    "reliable narrator",
    "unreliable narrator",
    "third person",
    "first person",
];

const OBJECT_PATTERNS: &[&str] = &[
    r"(?:make|makes|create|creates|cause|causes)\s+(?:the\s+)?readers?\s+(\w+)",
    r"readers?\s+(?:to\s+)?(\w+)",
    r"(?:believe|question|understand|feel|think|realize)\s+(\w{4,})",
];

/// Contextual phrases that anchor a detail to a concrete textual moment.
const DETAIL_PATTERNS: &[&str] = &[
    r"when\s+([^,.]+)",
    r"through\s+([^,.]+)",
    r"by\s+([^,.]+)",
    r"with\s+([^,.]+)",
    r"since\s+([^,.]+)",
    r"after\s+([^,.]+)",
];

pub struct ComponentTables {
    pub verbs: Vec<CompiledRule<VerbTier>>,
    pub dimensions: Vec<CompiledRule<EffectDimension>>,
    pub topics: &'static [&'static str],
    pub object_rules: Vec<Regex>,
    pub detail_rules: Vec<Regex>,
    pub support: SupportMarkers,
    pub connectors: ConnectorTables,
    pub grammar: GrammarTables,
}

fn build() -> ComponentTables {
    let mut verbs = Vec::new();
    verbs.extend(build_phrase_rules(TIER1_VERBS, VerbTier::Critical, 0));
    verbs.extend(build_phrase_rules(TIER2_VERBS, VerbTier::Pattern, 1));
    verbs.extend(build_phrase_rules(TIER3_VERBS, VerbTier::Descriptive, 2));

    let mut dimensions = Vec::new();
    dimensions.extend(compile(READER_RESPONSE_SIGNALS));
    dimensions.extend(compile(MEANING_CREATION_SIGNALS));
    dimensions.extend(compile(THEMATIC_IMPACT_SIGNALS));

    ComponentTables {
        verbs,
        dimensions,
        topics: LITERARY_TOPICS,
        object_rules: OBJECT_PATTERNS
            .iter()
            .map(|p| Regex::new(p).unwrap())
            .collect(),
        detail_rules: DETAIL_PATTERNS
            .iter()
            .map(|p| Regex::new(p).unwrap())
            .collect(),
        support: build_support_markers(),
        connectors: build_connector_tables(),
        grammar: build_grammar_tables(),
    }
}

pub fn tables() -> &'static ComponentTables {
    static TABLES: OnceLock<ComponentTables> = OnceLock::new();
    TABLES.get_or_init(build)
}
