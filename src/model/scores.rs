use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::RubricVariant;
use crate::model::layers::ArgumentLayer;
use crate::model::record::ComponentRecord;

pub const W_SM1: f32 = 0.40;
pub const W_SM2: f32 = 0.30;
pub const W_SM3: f32 = 0.30;

/// SM1 value plus the ceiling it imposes on SM2/SM3.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CeilingedScore {
    pub value: f32,
    pub ceiling: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationResult {
    pub variant: RubricVariant,
    pub sm1: f32,
    pub ceiling: f32,
    pub sm2: f32,
    pub sm3: f32,
    pub overall: f32,
    pub total_points: f32,
    pub layer: Option<ArgumentLayer>,
    pub word_count: u32,
    pub record: ComponentRecord,
    pub feedback: BTreeMap<String, String>,
}

impl EvaluationResult {
    pub fn layer_number(&self) -> Option<u8> {
        self.layer.map(ArgumentLayer::number)
    }

    pub fn layer_label(&self) -> Option<&'static str> {
        self.layer.map(ArgumentLayer::label)
    }

    /// Display score rounded half-up to one decimal; the matching total is
    /// derived from the rounded value so the two stay consistent on report
    /// cards (3.55 -> 3.6/5 -> 18.0/25).
    pub fn rounded_overall(&self) -> f32 {
        round_half_up_tenths(self.overall)
    }

    pub fn rounded_total(&self) -> f32 {
        self.rounded_overall() * 5.0
    }
}

pub fn weighted_overall(sm1: f32, sm2: f32, sm3: f32) -> f32 {
    W_SM1 * sm1 + W_SM2 * sm2 + W_SM3 * sm3
}

/// Round to one decimal, half away from zero. Goes through integer cents so
/// values sitting on a half boundary (3.55) do not drift on f32 representation.
pub fn round_half_up_tenths(v: f32) -> f32 {
    let cents = (v * 100.0).round() as i64;
    let tenths = (cents + 5).div_euclid(10);
    tenths as f32 / 10.0
}
