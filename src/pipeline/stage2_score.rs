use crate::model::layers::ArgumentLayer;
use crate::model::record::{ArgumentRecord, ComponentRecord, ReasoningType, StanceStrength};
use crate::model::scores::{CeilingedScore, weighted_overall};

/// One SM1 lookup row. Rows are evaluated top-down and the first row whose
/// thresholds are both met (>=) wins, so a record satisfying several rows
/// takes the most favorable one.
#[derive(Debug, Clone, Copy)]
pub struct Sm1Row {
    pub min_slots: u8,
    pub min_quality: f32,
    pub value: f32,
    pub ceiling: f32,
}

pub const COMPONENT_SM1: &[Sm1Row] = &[
    Sm1Row { min_slots: 5, min_quality: 5.0, value: 5.0, ceiling: 5.0 },
    Sm1Row { min_slots: 5, min_quality: 4.5, value: 4.5, ceiling: 4.5 },
    Sm1Row { min_slots: 5, min_quality: 4.0, value: 4.0, ceiling: 4.0 },
    Sm1Row { min_slots: 4, min_quality: 4.0, value: 3.5, ceiling: 4.0 },
    Sm1Row { min_slots: 4, min_quality: 0.0, value: 3.0, ceiling: 3.0 },
    Sm1Row { min_slots: 0, min_quality: 3.0, value: 3.0, ceiling: 3.0 },
    Sm1Row { min_slots: 3, min_quality: 0.0, value: 2.5, ceiling: 3.0 },
    Sm1Row { min_slots: 2, min_quality: 0.0, value: 2.0, ceiling: 2.5 },
    Sm1Row { min_slots: 0, min_quality: 0.0, value: 1.5, ceiling: 2.0 },
];

pub const ARGUMENT_SM1: &[Sm1Row] = &[
    Sm1Row { min_slots: 5, min_quality: 5.0, value: 5.0, ceiling: 5.0 },
    Sm1Row { min_slots: 5, min_quality: 4.5, value: 4.5, ceiling: 4.5 },
    Sm1Row { min_slots: 5, min_quality: 4.0, value: 4.0, ceiling: 4.0 },
    Sm1Row { min_slots: 4, min_quality: 4.0, value: 3.5, ceiling: 4.0 },
    Sm1Row { min_slots: 4, min_quality: 3.0, value: 3.0, ceiling: 3.0 },
    Sm1Row { min_slots: 3, min_quality: 2.5, value: 2.5, ceiling: 3.0 },
    Sm1Row { min_slots: 2, min_quality: 0.0, value: 2.0, ceiling: 2.5 },
    Sm1Row { min_slots: 0, min_quality: 0.0, value: 1.5, ceiling: 2.0 },
];

#[derive(Debug, Clone, Copy)]
pub struct Sm2Row {
    pub min_items: u32,
    pub min_coverage: u32,
    pub score: f32,
}

/// SM2 rows grouped by the ceiling that activates them. The same item count
/// maps to different scores under different ceilings; lookup is always
/// ceiling, then count, then coverage.
#[derive(Debug, Clone, Copy)]
pub struct Sm2Band {
    pub ceiling: f32,
    pub rows: &'static [Sm2Row],
}

pub const COMPONENT_SM2: &[Sm2Band] = &[
    Sm2Band {
        ceiling: 5.0,
        rows: &[
            Sm2Row { min_items: 3, min_coverage: 3, score: 5.0 },
            Sm2Row { min_items: 4, min_coverage: 2, score: 5.0 },
            Sm2Row { min_items: 3, min_coverage: 1, score: 4.5 },
            Sm2Row { min_items: 2, min_coverage: 1, score: 4.0 },
            Sm2Row { min_items: 1, min_coverage: 0, score: 3.0 },
            Sm2Row { min_items: 0, min_coverage: 0, score: 2.0 },
        ],
    },
    Sm2Band {
        ceiling: 4.5,
        rows: &[
            Sm2Row { min_items: 4, min_coverage: 2, score: 4.5 },
            Sm2Row { min_items: 3, min_coverage: 1, score: 4.0 },
            Sm2Row { min_items: 2, min_coverage: 1, score: 3.5 },
            Sm2Row { min_items: 1, min_coverage: 0, score: 3.0 },
            Sm2Row { min_items: 0, min_coverage: 0, score: 2.0 },
        ],
    },
    Sm2Band {
        ceiling: 4.0,
        rows: &[
            Sm2Row { min_items: 3, min_coverage: 2, score: 4.0 },
            Sm2Row { min_items: 2, min_coverage: 1, score: 3.5 },
            Sm2Row { min_items: 1, min_coverage: 0, score: 3.0 },
            Sm2Row { min_items: 0, min_coverage: 0, score: 2.0 },
        ],
    },
    Sm2Band {
        ceiling: 3.0,
        rows: &[
            Sm2Row { min_items: 3, min_coverage: 1, score: 3.0 },
            Sm2Row { min_items: 2, min_coverage: 1, score: 2.5 },
            Sm2Row { min_items: 1, min_coverage: 0, score: 2.0 },
            Sm2Row { min_items: 0, min_coverage: 0, score: 1.5 },
        ],
    },
    Sm2Band {
        ceiling: 2.5,
        rows: &[
            Sm2Row { min_items: 2, min_coverage: 1, score: 2.5 },
            Sm2Row { min_items: 1, min_coverage: 0, score: 2.0 },
            Sm2Row { min_items: 0, min_coverage: 0, score: 1.5 },
        ],
    },
    Sm2Band {
        ceiling: 2.0,
        rows: &[
            Sm2Row { min_items: 1, min_coverage: 0, score: 2.0 },
            Sm2Row { min_items: 0, min_coverage: 0, score: 1.5 },
        ],
    },
];

/// Argument variant: items are distinct reasoning chains, coverage is the
/// layer reached (the layer is itself a function of type coverage).
pub const ARGUMENT_SM2: &[Sm2Band] = &[
    Sm2Band {
        ceiling: 5.0,
        rows: &[
            Sm2Row { min_items: 2, min_coverage: 4, score: 5.0 },
            Sm2Row { min_items: 4, min_coverage: 3, score: 4.5 },
            Sm2Row { min_items: 0, min_coverage: 3, score: 4.0 },
            Sm2Row { min_items: 0, min_coverage: 2, score: 3.5 },
            Sm2Row { min_items: 0, min_coverage: 1, score: 2.5 },
            Sm2Row { min_items: 0, min_coverage: 0, score: 1.5 },
        ],
    },
    Sm2Band {
        ceiling: 4.5,
        rows: &[
            Sm2Row { min_items: 2, min_coverage: 4, score: 4.5 },
            Sm2Row { min_items: 0, min_coverage: 3, score: 4.0 },
            Sm2Row { min_items: 0, min_coverage: 2, score: 3.5 },
            Sm2Row { min_items: 0, min_coverage: 1, score: 2.5 },
            Sm2Row { min_items: 0, min_coverage: 0, score: 1.5 },
        ],
    },
    Sm2Band {
        ceiling: 4.0,
        rows: &[
            Sm2Row { min_items: 0, min_coverage: 3, score: 4.0 },
            Sm2Row { min_items: 0, min_coverage: 2, score: 3.5 },
            Sm2Row { min_items: 0, min_coverage: 1, score: 2.5 },
            Sm2Row { min_items: 0, min_coverage: 0, score: 1.5 },
        ],
    },
    Sm2Band {
        ceiling: 3.0,
        rows: &[
            Sm2Row { min_items: 0, min_coverage: 2, score: 3.0 },
            Sm2Row { min_items: 0, min_coverage: 1, score: 2.5 },
            Sm2Row { min_items: 0, min_coverage: 0, score: 1.5 },
        ],
    },
    Sm2Band {
        ceiling: 2.5,
        rows: &[
            Sm2Row { min_items: 0, min_coverage: 1, score: 2.5 },
            Sm2Row { min_items: 0, min_coverage: 0, score: 1.5 },
        ],
    },
    Sm2Band {
        ceiling: 2.0,
        rows: &[
            Sm2Row { min_items: 0, min_coverage: 1, score: 2.0 },
            Sm2Row { min_items: 0, min_coverage: 0, score: 1.5 },
        ],
    },
];

#[derive(Debug, Clone, Copy)]
pub struct Sm3Row {
    pub min_types: u32,
    pub base: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct Sm3Band {
    pub ceiling: f32,
    pub rows: &'static [Sm3Row],
}

/// Cohesion base eligibility, shared by both variants.
pub const SM3_BANDS: &[Sm3Band] = &[
    Sm3Band {
        ceiling: 5.0,
        rows: &[
            Sm3Row { min_types: 3, base: 5.0 },
            Sm3Row { min_types: 2, base: 4.5 },
            Sm3Row { min_types: 1, base: 3.5 },
            Sm3Row { min_types: 0, base: 3.0 },
        ],
    },
    Sm3Band {
        ceiling: 4.5,
        rows: &[
            Sm3Row { min_types: 3, base: 4.5 },
            Sm3Row { min_types: 2, base: 4.0 },
            Sm3Row { min_types: 1, base: 3.5 },
            Sm3Row { min_types: 0, base: 3.0 },
        ],
    },
    Sm3Band {
        ceiling: 4.0,
        rows: &[
            Sm3Row { min_types: 3, base: 4.0 },
            Sm3Row { min_types: 2, base: 3.5 },
            Sm3Row { min_types: 1, base: 3.0 },
            Sm3Row { min_types: 0, base: 2.5 },
        ],
    },
    Sm3Band {
        ceiling: 3.0,
        rows: &[
            Sm3Row { min_types: 2, base: 3.0 },
            Sm3Row { min_types: 1, base: 2.5 },
            Sm3Row { min_types: 0, base: 2.0 },
        ],
    },
    Sm3Band {
        ceiling: 2.5,
        rows: &[
            Sm3Row { min_types: 1, base: 2.5 },
            Sm3Row { min_types: 0, base: 2.0 },
        ],
    },
    Sm3Band {
        ceiling: 2.0,
        rows: &[
            Sm3Row { min_types: 1, base: 2.0 },
            Sm3Row { min_types: 0, base: 1.5 },
        ],
    },
];

#[derive(Debug, Clone, Copy)]
pub struct DeductionBand {
    pub min_errors: u32,
    pub deduction: f32,
}

/// Grammar-error deduction applied after the SM3 base lookup.
pub const GRAMMAR_DEDUCTIONS: &[DeductionBand] = &[
    DeductionBand { min_errors: 6, deduction: 1.5 },
    DeductionBand { min_errors: 4, deduction: 1.0 },
    DeductionBand { min_errors: 2, deduction: 0.5 },
    DeductionBand { min_errors: 0, deduction: 0.0 },
];

pub const SM3_FLOOR: f32 = 1.0;

#[derive(Debug, Clone)]
pub struct ScoreSet {
    pub sm1: CeilingedScore,
    pub sm2: f32,
    pub sm3: f32,
    pub overall: f32,
    pub total_points: f32,
    pub layer: Option<ArgumentLayer>,
}

pub fn run_scores(record: &ComponentRecord) -> ScoreSet {
    let (sm1_rows, sm2_bands) = match record {
        ComponentRecord::Analytical(_) => (COMPONENT_SM1, COMPONENT_SM2),
        ComponentRecord::Argument(_) => (ARGUMENT_SM1, ARGUMENT_SM2),
    };

    let sm1 = lookup_sm1(sm1_rows, record.filled_slots(), record.quality_score());

    let (items, coverage, layer) = match record {
        ComponentRecord::Analytical(r) => {
            (r.distinct_insights, r.dimension_coverage.len() as u32, None)
        }
        ComponentRecord::Argument(r) => {
            let layer = assess_layer(r);
            (r.distinct_chains, u32::from(layer.number()), Some(layer))
        }
    };

    let sm2 = lookup_sm2(sm2_bands, sm1.ceiling, items, coverage);

    let cohesion = record.cohesion();
    let sm3 = lookup_sm3(
        sm1.ceiling,
        cohesion.connector_types.len() as u32,
        cohesion.grammar_errors,
    );

    let overall = weighted_overall(sm1.value, sm2, sm3);
    ScoreSet {
        sm1,
        sm2,
        sm3,
        overall,
        total_points: overall * 5.0,
        layer,
    }
}

pub fn lookup_sm1(rows: &[Sm1Row], slots: u8, quality: f32) -> CeilingedScore {
    for row in rows {
        if slots >= row.min_slots && quality >= row.min_quality {
            return CeilingedScore {
                value: row.value,
                ceiling: row.ceiling,
            };
        }
    }
    // table ends with a catch-all; unreachable with the builtin rows
    CeilingedScore {
        value: 1.5,
        ceiling: 2.0,
    }
}

fn select_band<'b, B>(bands: &'b [B], ceiling: f32, band_ceiling: impl Fn(&B) -> f32) -> &'b B {
    for band in bands {
        if ceiling + 1e-6 >= band_ceiling(band) {
            return band;
        }
    }
    &bands[bands.len() - 1]
}

pub fn lookup_sm2(bands: &[Sm2Band], ceiling: f32, items: u32, coverage: u32) -> f32 {
    let band = select_band(bands, ceiling, |b| b.ceiling);
    for row in band.rows {
        if items >= row.min_items && coverage >= row.min_coverage {
            return row.score.min(ceiling);
        }
    }
    1.5f32.min(ceiling)
}

pub fn lookup_sm3(ceiling: f32, connector_types: u32, grammar_errors: u32) -> f32 {
    let band = select_band(SM3_BANDS, ceiling, |b| b.ceiling);
    let mut base = band
        .rows
        .iter()
        .find(|r| connector_types >= r.min_types)
        .map(|r| r.base)
        .unwrap_or(SM3_FLOOR);

    for d in GRAMMAR_DEDUCTIONS {
        if grammar_errors >= d.min_errors {
            base -= d.deduction;
            break;
        }
    }

    base.clamp(SM3_FLOOR, ceiling)
}

/// Layer transitions require every lower layer's condition plus the layer's
/// own signal, so the assignment is monotone in rule strength.
pub fn assess_layer(record: &ArgumentRecord) -> ArgumentLayer {
    let has_position = record.strength != StanceStrength::Missing;
    let has_comparison = record.type_coverage.contains(&ReasoningType::Comparison);
    let cause_effect_chains = record
        .chains
        .iter()
        .filter(|c| c.distinct && c.kind == ReasoningType::CauseEffect)
        .count();
    let has_counter = !record.counter_arguments.is_empty();
    let has_synthesis = record.synthesis.is_some();

    if !has_position {
        return ArgumentLayer::NoPosition;
    }
    if !has_comparison {
        return ArgumentLayer::Definition;
    }
    if cause_effect_chains < 2 {
        return ArgumentLayer::Comparison;
    }
    if !(has_counter && has_synthesis) {
        return ArgumentLayer::CauseEffect;
    }
    ArgumentLayer::ProblemSolution
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_score.rs"]
mod tests;
