pub mod json;
pub mod text;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::input::RawResponse;
use crate::model::record::ComponentRecord;
use crate::model::scores::EvaluationResult;

/// Flat report document handed to the external reporting collaborator.
/// Every field is a scalar, a list of scalars, or a string map.
#[derive(Debug, Clone, Serialize)]
pub struct ReportDoc {
    pub tool: &'static str,
    pub version: &'static str,
    pub variant: &'static str,
    pub student_name: Option<String>,
    pub assignment: Option<String>,
    pub word_count: u32,

    pub sm1: f32,
    pub ceiling: f32,
    pub sm2: f32,
    pub sm3: f32,
    pub overall: f32,
    pub total_points: f32,
    pub rounded_overall: f32,
    pub rounded_total: f32,

    pub layer_number: Option<u8>,
    pub layer_label: Option<&'static str>,

    pub feedback: BTreeMap<String, String>,
    pub record: ComponentRecord,
}

pub fn build_report(result: &EvaluationResult, response: &RawResponse) -> ReportDoc {
    ReportDoc {
        tool: "rubricqc",
        version: env!("CARGO_PKG_VERSION"),
        variant: result.variant.name(),
        student_name: response.student_name.clone(),
        assignment: response.assignment.clone(),
        word_count: result.word_count,
        sm1: result.sm1,
        ceiling: result.ceiling,
        sm2: result.sm2,
        sm3: result.sm3,
        overall: result.overall,
        total_points: result.total_points,
        rounded_overall: result.rounded_overall(),
        rounded_total: result.rounded_total(),
        layer_number: result.layer_number(),
        layer_label: result.layer_label(),
        feedback: result.feedback.clone(),
        record: result.record.clone(),
    }
}
