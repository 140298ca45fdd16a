use std::sync::OnceLock;

use regex::Regex;

use crate::model::record::{EvidenceTier, ReasoningType, StanceStrength};
use crate::taxonomy::matcher::{CompiledRule, Rule, compile};
use crate::taxonomy::{
    ConnectorTables, GrammarTables, SupportMarkers, build_connector_tables, build_grammar_tables,
    build_support_markers,
};

const STANCE_SIGNALS: &[Rule<StanceStrength>] = &[
    Rule {
        pattern: r"(?:i\s+)?(?:strongly\s+)?believe\s+(?:that\s+)?",
        tag: StanceStrength::Strong,
        tier_rank: 0,
    },
    Rule {
        pattern: r"(?:i\s+am\s+|am\s+)?convinced\s+(?:that\s+)?",
        tag: StanceStrength::Strong,
        tier_rank: 0,
    },
    Rule {
        pattern: r"(?:it\s+is\s+)?(?:clear|evident|obvious)\s+that",
        tag: StanceStrength::Strong,
        tier_rank: 0,
    },
    Rule {
        pattern: r"without\s+(?:a\s+)?doubt",
        tag: StanceStrength::Strong,
        tier_rank: 0,
    },
    Rule {
        pattern: r"\b(?:definitely|clearly)\b",
        tag: StanceStrength::Strong,
        tier_rank: 0,
    },
    Rule {
        pattern: r"(?:i\s+)?(?:think|feel)\s+(?:that\s+)?",
        tag: StanceStrength::Moderate,
        tier_rank: 1,
    },
    Rule {
        pattern: r"(?:in\s+my\s+)?opinion",
        tag: StanceStrength::Moderate,
        tier_rank: 1,
    },
    Rule {
        pattern: r"(?:i\s+)?would\s+(?:say|argue)\s+(?:that\s+)?",
        tag: StanceStrength::Moderate,
        tier_rank: 1,
    },
    Rule {
        pattern: r"\b(?:to\s+me|personally)\b",
        tag: StanceStrength::Moderate,
        tier_rank: 1,
    },
    Rule {
        pattern: r"\b(?:maybe|perhaps)\b",
        tag: StanceStrength::Hedged,
        tier_rank: 2,
    },
    Rule {
        pattern: r"\b(?:might|could)\s+be\b",
        tag: StanceStrength::Hedged,
        tier_rank: 2,
    },
    Rule {
        pattern: r"\b(?:sort|kind)\s+of\b",
        tag: StanceStrength::Hedged,
        tier_rank: 2,
    },
    Rule {
        pattern: r"\bis\s+more\s+(?:of\s+)?a\b",
        tag: StanceStrength::Implicit,
        tier_rank: 3,
    },
    Rule {
        pattern: r"\bis\s+a\s+(?:hero|victim)\b",
        tag: StanceStrength::Implicit,
        tier_rank: 3,
    },
    Rule {
        pattern: r"\bmore\s+(?:of\s+a\s+)?(?:hero|victim)\s+than\b",
        tag: StanceStrength::Implicit,
        tier_rank: 3,
    },
    Rule {
        pattern: r"\b(?:rather\s+than|instead\s+of)\b",
        tag: StanceStrength::Implicit,
        tier_rank: 3,
    },
];

/// Evidence signals ordered strongest tier first; the quote marker in
/// `SupportMarkers` supplies the specific tier alongside these.
const EVIDENCE_SIGNALS: &[Rule<EvidenceTier>] = &[
    Rule {
        pattern: r"(?:when|where)\s+(?:jonas|he|she)\s+\w+",
        tag: EvidenceTier::Specific,
        tier_rank: 0,
    },
    Rule {
        pattern: r"(?:chapter|scene|part)\s+(?:where|when)",
        tag: EvidenceTier::Specific,
        tier_rank: 0,
    },
    Rule {
        pattern: r"(?:the\s+)?memory\s+of\s+\w+",
        tag: EvidenceTier::Specific,
        tier_rank: 0,
    },
    Rule {
        pattern: r"(?:the\s+)?moment\s+(?:when|where)",
        tag: EvidenceTier::Specific,
        tier_rank: 0,
    },
    Rule {
        pattern: r"(?:this\s+is\s+shown|shown)\s+when",
        tag: EvidenceTier::Paraphrased,
        tier_rank: 1,
    },
    Rule {
        pattern: r"(?:we\s+)?(?:see|saw)\s+(?:this|that)\s+when",
        tag: EvidenceTier::Paraphrased,
        tier_rank: 1,
    },
    Rule {
        pattern: r"for\s+(?:example|instance)",
        tag: EvidenceTier::Paraphrased,
        tier_rank: 1,
    },
    Rule {
        pattern: r"such\s+as\s+when",
        tag: EvidenceTier::Paraphrased,
        tier_rank: 1,
    },
    Rule {
        pattern: r"\bin\s+the\s+(?:book|story|novel|text)\b",
        tag: EvidenceTier::General,
        tier_rank: 2,
    },
    Rule {
        pattern: r"\bthroughout\s+the\s+(?:book|story)\b",
        tag: EvidenceTier::General,
        tier_rank: 2,
    },
    Rule {
        pattern: r"\b(?:he|she)\s+(?:tried|attempted|wanted)\s+to\b",
        tag: EvidenceTier::General,
        tier_rank: 2,
    },
    Rule {
        pattern: r"^(?:he|she|jonas|it)\s+(?:is|was)\s+\S.*",
        tag: EvidenceTier::Assertion,
        tier_rank: 3,
    },
    Rule {
        pattern: r"\bbecause\s+(?:he|she|it)\s+(?:is|was)\b[^,.]*",
        tag: EvidenceTier::Assertion,
        tier_rank: 3,
    },
];

const REASONING_SIGNALS: &[Rule<ReasoningType>] = &[
    Rule {
        pattern: r"\b(?:because|since|therefore|thus|consequently)\b",
        tag: ReasoningType::CauseEffect,
        tier_rank: 0,
    },
    Rule {
        pattern: r"\bas\s+a\s+result\b",
        tag: ReasoningType::CauseEffect,
        tier_rank: 0,
    },
    Rule {
        pattern: r"\b(?:which|this)\s+(?:means|shows|proves|demonstrates|causes|caused)\b",
        tag: ReasoningType::CauseEffect,
        tier_rank: 0,
    },
    Rule {
        pattern: r"\b(?:leads?|led)\s+to\b",
        tag: ReasoningType::CauseEffect,
        tier_rank: 0,
    },
    Rule {
        pattern: r"\b(?:more|less)\s+(?:of\s+a\s+)?\w+\s+than\b",
        tag: ReasoningType::Comparison,
        tier_rank: 1,
    },
    Rule {
        pattern: r"\b(?:rather\s+than|instead\s+of|unlike|compared\s+to|whereas)\b",
        tag: ReasoningType::Comparison,
        tier_rank: 1,
    },
    Rule {
        pattern: r"\bwhile\s+(?:he|she|jonas)\b",
        tag: ReasoningType::Comparison,
        tier_rank: 1,
    },
    Rule {
        pattern: r"\b(?:a\s+)?(?:hero|victim)\s+(?:is|means)\b",
        tag: ReasoningType::Definition,
        tier_rank: 2,
    },
    Rule {
        pattern: r"\bwhat\s+(?:it\s+)?means\s+to\s+be\b",
        tag: ReasoningType::Definition,
        tier_rank: 2,
    },
    Rule {
        pattern: r"\bby\s+definition\b",
        tag: ReasoningType::Definition,
        tier_rank: 2,
    },
    Rule {
        pattern: r"\b(?:furthermore|moreover|additionally)\b",
        tag: ReasoningType::Elaboration,
        tier_rank: 3,
    },
    Rule {
        pattern: r"\band\s+(?:he|she|this)\b",
        tag: ReasoningType::Elaboration,
        tier_rank: 3,
    },
];

const COUNTER_SIGNALS: &[&str] = &[
    r"\bon\s+(?:the\s+)?other\s+hand\b",
    r"\b(?:however|although|despite)\b",
    r"\beven\s+though\b",
    r"\bwhile\s+(?:it\s+is\s+)?true\s+that\b",
    r"\bsome\s+(?:might|may|could)\s+(?:say|argue)\b",
    r"\byou\s+(?:can|could)\s+(?:also\s+)?(?:say|argue|make\s+a\s+claim)\b",
    r"\b(?:he|she|jonas)\s+(?:is\s+)?also\s+(?:a\s+)?(?:hero|victim)\b",
    r"\b(?:he|she)\s+(?:can\s+)?be\s+seen\s+as\s+both\b",
];

const SYNTHESIS_SIGNALS: &[&str] = &[
    r"\btherefore\b[^.!?]*\b(?:more|is)\s+(?:a\s+)?(?:hero|victim)\b",
    r"\bin\s+conclusion\b",
    r"\b(?:overall|ultimately|finally)\b",
    r"\bso\s+(?:i\s+)?(?:strongly\s+)?believe\b",
    r"\bthis\s+(?:is\s+)?why\b",
    r"\b(?:has\s+)?(?:suffered|saved|helped)\s+more\s+than\b",
    r"\boutweighs?\b",
    r"\b(?:the\s+)?evidence\s+(?:shows|suggests|proves)\b",
    r"\bweighing\b",
];

const SIDE_A_LABEL: &str = "hero";
const SIDE_A_SIGNALS: &[&str] = &[
    r"(?:is|was)\s+(?:more\s+(?:of\s+)?)?a\s+hero",
    r"more\s+hero\s+than",
    r"hero\s+(?:rather|instead)",
    r"(?:believe|think|feel)[^.!?]*hero",
];

const SIDE_B_LABEL: &str = "victim";
const SIDE_B_SIGNALS: &[&str] = &[
    r"(?:is|was)\s+(?:more\s+(?:of\s+)?)?a\s+victim",
    r"more\s+victim\s+than",
    r"victim\s+(?:rather|instead)",
    r"(?:believe|think|feel)[^.!?]*victim",
];

pub struct SideDef {
    pub label: &'static str,
    pub rules: Vec<Regex>,
}

impl SideDef {
    pub fn hits(&self, text: &str) -> usize {
        self.rules.iter().filter(|r| r.is_match(text)).count()
    }
}

pub struct ArgumentTables {
    pub side_a: SideDef,
    pub side_b: SideDef,
    pub stances: Vec<CompiledRule<StanceStrength>>,
    pub evidence: Vec<CompiledRule<EvidenceTier>>,
    pub reasoning: Vec<CompiledRule<ReasoningType>>,
    pub counters: Vec<Regex>,
    pub synthesis: Vec<Regex>,
    pub support: SupportMarkers,
    pub connectors: ConnectorTables,
    pub grammar: GrammarTables,
}

fn compile_list(patterns: &[&str]) -> Vec<Regex> {
    patterns.iter().map(|p| Regex::new(p).unwrap()).collect()
}

fn build() -> ArgumentTables {
    ArgumentTables {
        side_a: SideDef {
            label: SIDE_A_LABEL,
            rules: compile_list(SIDE_A_SIGNALS),
        },
        side_b: SideDef {
            label: SIDE_B_LABEL,
            rules: compile_list(SIDE_B_SIGNALS),
        },
        stances: compile(STANCE_SIGNALS),
        evidence: compile(EVIDENCE_SIGNALS),
        reasoning: compile(REASONING_SIGNALS),
        counters: compile_list(COUNTER_SIGNALS),
        synthesis: compile_list(SYNTHESIS_SIGNALS),
        support: build_support_markers(),
        connectors: build_connector_tables(),
        grammar: build_grammar_tables(),
    }
}

pub fn tables() -> &'static ArgumentTables {
    static TABLES: OnceLock<ArgumentTables> = OnceLock::new();
    TABLES.get_or_init(build)
}
