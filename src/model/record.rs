use std::collections::BTreeSet;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerbTier {
    Descriptive,
    Pattern,
    Critical,
}

impl VerbTier {
    pub fn analytical(self) -> bool {
        matches!(self, VerbTier::Critical | VerbTier::Pattern)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailTier {
    Missing,
    Vague,
    Specific,
    Precise,
}

impl DetailTier {
    pub fn label(self) -> &'static str {
        match self {
            DetailTier::Missing => "missing",
            DetailTier::Vague => "vague",
            DetailTier::Specific => "specific",
            DetailTier::Precise => "precise",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectDimension {
    ReaderResponse,
    MeaningCreation,
    ThematicImpact,
}

impl EffectDimension {
    pub fn label(self) -> &'static str {
        match self {
            EffectDimension::ReaderResponse => "reader response",
            EffectDimension::MeaningCreation => "meaning creation",
            EffectDimension::ThematicImpact => "thematic impact",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectorType {
    Addition,
    Contrast,
    CauseEffect,
    Elaboration,
    Exemplification,
    Summary,
}

impl ConnectorType {
    pub fn label(self) -> &'static str {
        match self {
            ConnectorType::Addition => "addition",
            ConnectorType::Contrast => "contrast",
            ConnectorType::CauseEffect => "cause-effect",
            ConnectorType::Elaboration => "elaboration",
            ConnectorType::Exemplification => "exemplification",
            ConnectorType::Summary => "summary",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectorHit {
    pub kind: ConnectorType,
    pub text: String,
}

/// Cohesion signals shared by both rubric variants.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct CohesionProfile {
    pub connectors: Vec<ConnectorHit>,
    pub connector_types: BTreeSet<ConnectorType>,
    pub grammar_errors: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaggedVerb {
    pub text: String,
    pub tier: VerbTier,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailItem {
    pub text: String,
    pub tier: DetailTier,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightItem {
    pub text: String,
    pub dimensions: Vec<EffectDimension>,
    pub distinct: bool,
}

/// Extraction output for the component-based analytical rubric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticalRecord {
    pub topics: Vec<String>,
    pub verbs: Vec<TaggedVerb>,
    pub objects: Vec<String>,
    pub details: Vec<DetailItem>,
    pub detail_tier: DetailTier,
    pub detail_score: f32,
    pub insights: Vec<InsightItem>,
    pub distinct_insights: u32,
    pub dimension_coverage: BTreeSet<EffectDimension>,
    pub cohesion: CohesionProfile,
}

impl AnalyticalRecord {
    pub fn empty() -> Self {
        AnalyticalRecord {
            topics: Vec::new(),
            verbs: Vec::new(),
            objects: Vec::new(),
            details: Vec::new(),
            detail_tier: DetailTier::Missing,
            detail_score: 2.0,
            insights: Vec::new(),
            distinct_insights: 0,
            dimension_coverage: BTreeSet::new(),
            cohesion: CohesionProfile::default(),
        }
    }

    /// Count of the five required slots that hold any evidence.
    pub fn filled_slots(&self) -> u8 {
        let has_verb = self.verbs.iter().any(|v| v.tier.analytical());
        [
            !self.topics.is_empty(),
            has_verb,
            !self.objects.is_empty(),
            !self.details.is_empty(),
            !self.insights.is_empty(),
        ]
        .iter()
        .filter(|&&p| p)
        .count() as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionSide {
    Unclear,
    SideA,
    SideB,
    BothAcknowledged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StanceStrength {
    Missing,
    Implicit,
    Hedged,
    Moderate,
    Strong,
}

impl StanceStrength {
    pub fn label(self) -> &'static str {
        match self {
            StanceStrength::Missing => "missing",
            StanceStrength::Implicit => "implicit",
            StanceStrength::Hedged => "hedged",
            StanceStrength::Moderate => "moderate",
            StanceStrength::Strong => "strong",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceTier {
    Missing,
    Assertion,
    General,
    Paraphrased,
    Specific,
}

impl EvidenceTier {
    pub fn label(self) -> &'static str {
        match self {
            EvidenceTier::Missing => "missing",
            EvidenceTier::Assertion => "assertion",
            EvidenceTier::General => "general",
            EvidenceTier::Paraphrased => "paraphrased",
            EvidenceTier::Specific => "specific",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasoningType {
    Definition,
    Comparison,
    CauseEffect,
    Elaboration,
}

impl ReasoningType {
    pub fn label(self) -> &'static str {
        match self {
            ReasoningType::Definition => "definition",
            ReasoningType::Comparison => "comparison",
            ReasoningType::CauseEffect => "cause-effect",
            ReasoningType::Elaboration => "elaboration",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvidenceItem {
    pub text: String,
    pub tier: EvidenceTier,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReasoningChain {
    pub text: String,
    pub kind: ReasoningType,
    pub distinct: bool,
}

/// Extraction output for the argument-structure rubric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArgumentRecord {
    pub position: PositionSide,
    pub position_label: String,
    pub strength: StanceStrength,
    pub evidence: Vec<EvidenceItem>,
    pub evidence_tier: EvidenceTier,
    pub evidence_score: f32,
    pub chains: Vec<ReasoningChain>,
    pub distinct_chains: u32,
    pub type_coverage: BTreeSet<ReasoningType>,
    pub counter_arguments: Vec<String>,
    pub synthesis: Option<String>,
    pub cohesion: CohesionProfile,
}

impl ArgumentRecord {
    pub fn empty() -> Self {
        ArgumentRecord {
            position: PositionSide::Unclear,
            position_label: "unclear".to_string(),
            strength: StanceStrength::Missing,
            evidence: Vec::new(),
            evidence_tier: EvidenceTier::Missing,
            evidence_score: 2.0,
            chains: Vec::new(),
            distinct_chains: 0,
            type_coverage: BTreeSet::new(),
            counter_arguments: Vec::new(),
            synthesis: None,
            cohesion: CohesionProfile::default(),
        }
    }

    pub fn filled_slots(&self) -> u8 {
        [
            self.strength != StanceStrength::Missing,
            !self.evidence.is_empty(),
            !self.chains.is_empty(),
            !self.counter_arguments.is_empty(),
            self.synthesis.is_some(),
        ]
        .iter()
        .filter(|&&p| p)
        .count() as u8
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComponentRecord {
    Analytical(AnalyticalRecord),
    Argument(ArgumentRecord),
}

impl ComponentRecord {
    pub fn cohesion(&self) -> &CohesionProfile {
        match self {
            ComponentRecord::Analytical(r) => &r.cohesion,
            ComponentRecord::Argument(r) => &r.cohesion,
        }
    }

    pub fn filled_slots(&self) -> u8 {
        match self {
            ComponentRecord::Analytical(r) => r.filled_slots(),
            ComponentRecord::Argument(r) => r.filled_slots(),
        }
    }

    /// Best support-quality score reached (detail ladder / evidence ladder).
    pub fn quality_score(&self) -> f32 {
        match self {
            ComponentRecord::Analytical(r) => r.detail_score,
            ComponentRecord::Argument(r) => r.evidence_score,
        }
    }
}
