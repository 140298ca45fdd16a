pub mod argument;
pub mod component;
pub mod matcher;

use regex::Regex;
use thiserror::Error;

use crate::model::RubricVariant;
use crate::model::record::ConnectorType;
use crate::taxonomy::matcher::{CompiledRule, build_phrase_rules};

#[derive(Debug, Error)]
pub enum TaxonomyError {
    #[error("no taxonomy registered for rubric variant `{0}` (use component|argument)")]
    UnknownVariant(String),
}

/// Contextual elements that lift a quoted detail up the quality ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ContextElement {
    When,
    Why,
    How,
    Reveals,
}

/// Grammar-error families counted by the cohesion pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrammarErrorKind {
    Agreement,
    Tense,
    MissingWord,
    Malformed,
}

pub struct ConnectorTables {
    pub rules: Vec<CompiledRule<ConnectorType>>,
}

pub struct GrammarTables {
    pub error_rules: Vec<CompiledRule<GrammarErrorKind>>,
    pub artifact_rules: Vec<Regex>,
    pub fragment_min_words: usize,
    pub fragment_allow: &'static [&'static str],
    pub run_on_min_words: usize,
    pub run_on_max_commas: usize,
}

/// Markers of the shared detail/evidence quality ladder: quotation,
/// attribution, and the countable context elements.
pub struct SupportMarkers {
    pub quote: Regex,
    pub attribution: Regex,
    pub context_rules: Vec<CompiledRule<ContextElement>>,
    pub visual_rules: Vec<Regex>,
}

impl SupportMarkers {
    /// Number of distinct context-element kinds present in `text`.
    pub fn context_count(&self, text: &str) -> u32 {
        let mut kinds: Vec<ContextElement> = self
            .context_rules
            .iter()
            .filter(|r| r.regex.is_match(text))
            .map(|r| r.tag)
            .collect();
        kinds.sort();
        kinds.dedup();
        kinds.len() as u32
    }

    /// Concrete-moment check for unquoted descriptions: at least two sensory
    /// or action markers make a paraphrase specific rather than vague.
    pub fn can_visualize(&self, text: &str) -> bool {
        self.visual_rules.iter().filter(|r| r.is_match(text)).count() >= 2
    }
}

/// Resolves a rubric variant to its immutable table set. Tables are compiled
/// once per process and shared read-only; evaluation calls borrow them.
pub struct Registry {
    component: &'static component::ComponentTables,
    argument: &'static argument::ArgumentTables,
}

impl Registry {
    pub fn builtin() -> Registry {
        Registry {
            component: component::tables(),
            argument: argument::tables(),
        }
    }

    pub fn resolve(&self, name: &str) -> Result<RubricVariant, TaxonomyError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "component" | "tvode" => Ok(RubricVariant::Component),
            "argument" | "thesis" => Ok(RubricVariant::Argument),
            other => Err(TaxonomyError::UnknownVariant(other.to_string())),
        }
    }

    pub fn component(&self) -> &'static component::ComponentTables {
        self.component
    }

    pub fn argument(&self) -> &'static argument::ArgumentTables {
        self.argument
    }
}

pub const STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "of", "in", "on", "at", "to", "is",
    "are", "was", "were", "be", "been", "it", "this", "that", "these", "those",
    "he", "she", "they", "we", "his", "her", "their", "its", "for", "with",
    "as", "by", "from", "about", "more", "most", "very", "so", "not",
];

const CONNECTOR_ADDITION: &[&str] = &[
    "furthermore",
    "moreover",
    "additionally",
    "also",
    "in addition",
    "besides",
];
const CONNECTOR_CONTRAST: &[&str] = &[
    "however",
    "nevertheless",
    "whereas",
    "although",
    "yet",
    "but",
    "on the other hand",
    "conversely",
];
const CONNECTOR_CAUSE_EFFECT: &[&str] = &[
    "therefore",
    "thus",
    "consequently",
    "hence",
    "thereby",
    "as a result",
];
const CONNECTOR_ELABORATION: &[&str] = &["which", "whereby", "wherein", "through which", "by which"];
const CONNECTOR_EXEMPLIFICATION: &[&str] = &[
    "for example",
    "for instance",
    "specifically",
    "such as",
    "namely",
];
const CONNECTOR_SUMMARY: &[&str] = &[
    "overall",
    "in conclusion",
    "ultimately",
    "finally",
    "in summary",
];

pub fn build_connector_tables() -> ConnectorTables {
    let mut rules = Vec::new();
    rules.extend(build_phrase_rules(CONNECTOR_ADDITION, ConnectorType::Addition, 0));
    rules.extend(build_phrase_rules(CONNECTOR_CONTRAST, ConnectorType::Contrast, 0));
    rules.extend(build_phrase_rules(
        CONNECTOR_CAUSE_EFFECT,
        ConnectorType::CauseEffect,
        0,
    ));
    rules.extend(build_phrase_rules(
        CONNECTOR_ELABORATION,
        ConnectorType::Elaboration,
        0,
    ));
    rules.extend(build_phrase_rules(
        CONNECTOR_EXEMPLIFICATION,
        ConnectorType::Exemplification,
        0,
    ));
    rules.extend(build_phrase_rules(CONNECTOR_SUMMARY, ConnectorType::Summary, 0));
    ConnectorTables { rules }
}

const AGREEMENT_ERRORS: &[&str] = &[
    r"\b(?:description|narrator|character|theme|conflict|evidence)\s+are\b",
    r"\b(?:descriptions|narrators|characters|themes)\s+is\b",
    r"\b(?:he|she|it|this|that)\s+(?:have|are|were|leave|make)\b",
    r"\b(?:they|we|these|those)\s+(?:has|is|was|leaves|makes)\b",
    r"\bpoint of view[^.!?]*?\bleave\b",
];
const TENSE_ERRORS: &[&str] = &[
    r"\bmakes?\s+(?:the\s+)?readers?\s+had\b",
    r"\b(?:yesterday|before)\b[^.!?]*?\b(?:goes|makes|comes)\b",
];
const MISSING_WORD_ERRORS: &[&str] = &[
    r"\bmake\s+the\s+reader\s+to\s",
    r"\bmakes\s+reader\s",
    r"\bfeel\s+more\s+deep\s+in\b",
];
const MALFORMED_ERRORS: &[&str] = &[r"\bgonna\b", r"\bwanna\b", r"\bkinda\b", r"\bsorta\b"];

/// Transcription artifacts stripped before any error counting: unreadable
/// markers are not student errors. Doubled-word handwriting corrections are
/// collapsed separately in the grammar pass (regex has no backreferences).
const TRANSCRIPTION_ARTIFACTS: &[&str] = &[r"(?i)\[unclear\]", r"(?i)\bn/a\b"];

pub fn build_grammar_tables() -> GrammarTables {
    let mut error_rules = Vec::new();
    for p in AGREEMENT_ERRORS {
        error_rules.push(CompiledRule {
            regex: Regex::new(p).unwrap(),
            tag: GrammarErrorKind::Agreement,
            tier_rank: 0,
        });
    }
    for p in TENSE_ERRORS {
        error_rules.push(CompiledRule {
            regex: Regex::new(p).unwrap(),
            tag: GrammarErrorKind::Tense,
            tier_rank: 0,
        });
    }
    for p in MISSING_WORD_ERRORS {
        error_rules.push(CompiledRule {
            regex: Regex::new(p).unwrap(),
            tag: GrammarErrorKind::MissingWord,
            tier_rank: 0,
        });
    }
    for p in MALFORMED_ERRORS {
        error_rules.push(CompiledRule {
            regex: Regex::new(p).unwrap(),
            tag: GrammarErrorKind::Malformed,
            tier_rank: 0,
        });
    }
    GrammarTables {
        error_rules,
        artifact_rules: TRANSCRIPTION_ARTIFACTS
            .iter()
            .map(|p| Regex::new(p).unwrap())
            .collect(),
        fragment_min_words: 3,
        fragment_allow: &["yes", "no", "okay"],
        run_on_min_words: 35,
        run_on_max_commas: 1,
    }
}

const SUPPORT_WHEN: &[&str] = &[
    r"\b(?:when|after|before|during|while)\s+\w+",
    r"\b(?:in|at)\s+(?:chapter|page|the\s+beginning|the\s+end)",
];
const SUPPORT_WHY: &[&str] = &[
    r"\b(?:because|since|due\s+to|as\s+a\s+result)\b",
    r"\bin\s+order\s+to\s+\w+",
];
const SUPPORT_HOW: &[&str] = &[
    r"\b(?:by|through|via|using)\s+\w+",
    r"\b(?:with|without)\s+\w+",
];
const SUPPORT_REVEALS: &[&str] = &[
    r"\b(?:which|that|this)\s+(?:shows|reveals|demonstrates|suggests|indicates)\b",
    r"\b(?:revealing|showing|demonstrating)\s+(?:how|that|why)\b",
];
const VISUAL_MARKERS: &[&str] = &[
    r"\b(?:eyes|face|hands|voice|body|snow|air|cold|warm|light|dark)\b",
    r"\b(?:walked|ran|felt|saw|heard|touched|breathed|looked)\b",
    r"\b(?:slowly|quickly|suddenly|carefully|gently|sharply)\b",
];

pub fn build_support_markers() -> SupportMarkers {
    let mut context_rules = Vec::new();
    for (patterns, tag) in [
        (SUPPORT_WHEN, ContextElement::When),
        (SUPPORT_WHY, ContextElement::Why),
        (SUPPORT_HOW, ContextElement::How),
        (SUPPORT_REVEALS, ContextElement::Reveals),
    ] {
        for p in patterns {
            context_rules.push(CompiledRule {
                regex: Regex::new(p).unwrap(),
                tag,
                tier_rank: 0,
            });
        }
    }
    SupportMarkers {
        quote: Regex::new(r#""([^"]{4,})""#).unwrap(),
        attribution: Regex::new(r"(?i)(?:p\.|page)\s*\d+|chapter\s+\d+").unwrap(),
        context_rules,
        visual_rules: VISUAL_MARKERS.iter().map(|p| Regex::new(p).unwrap()).collect(),
    }
}
