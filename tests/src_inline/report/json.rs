use super::*;

use crate::input::RawResponse;
use crate::model::RubricVariant;
use crate::pipeline::evaluate;
use crate::report::build_report;
use crate::taxonomy::Registry;

fn doc_for(text: &str, variant: RubricVariant) -> ReportDoc {
    let registry = Registry::builtin();
    let mut response = RawResponse::from_text(text);
    response.student_name = Some("Coden".to_string());
    response.assignment = Some("Week 4".to_string());
    let result = evaluate(&response, variant, &registry, None);
    build_report(&result, &response)
}

#[test]
fn test_json_report_round_trips() {
    let doc = doc_for("Jonas is a victim.", RubricVariant::Argument);
    let rendered = render_report_json(&doc).unwrap();
    let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

    assert_eq!(value["tool"], "rubricqc");
    assert_eq!(value["variant"], "argument");
    assert_eq!(value["student_name"], "Coden");
    assert_eq!(value["sm1"], 2.0);
    assert_eq!(value["ceiling"], 2.5);
    assert_eq!(value["sm2"], 2.5);
    assert_eq!(value["layer_number"], 1);
    assert_eq!(value["layer_label"], "Definition");
    assert!(value["feedback"]["layer_guidance"].is_string());
}

#[test]
fn test_json_report_scores_are_scalars() {
    let doc = doc_for(
        "The narrator creates suspense and makes the reader question the rules.",
        RubricVariant::Component,
    );
    let rendered = render_report_json(&doc).unwrap();
    let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

    for key in [
        "sm1", "ceiling", "sm2", "sm3", "overall", "total_points",
        "rounded_overall", "rounded_total",
    ] {
        assert!(value[key].is_number(), "{key} is not a scalar");
    }
    assert!(value["layer_number"].is_null());
    assert_eq!(value["word_count"], 11);
}

#[test]
fn test_rounded_pair_consistent_on_report() {
    let doc = doc_for("Jonas is a victim.", RubricVariant::Argument);
    assert_eq!(doc.rounded_total, doc.rounded_overall * 5.0);
}

#[test]
fn test_text_report_card_sections() {
    let doc = doc_for("Jonas is a victim.", RubricVariant::Argument);
    let card = crate::report::text::render_report_card(&doc);
    assert!(card.contains("RUBRIC REPORT CARD"));
    assert!(card.contains("Student: Coden"));
    assert!(card.contains("Layer: 1 (Definition)"));
    assert!(card.contains("Next steps:"));
    assert!(card.contains("Layer guidance:"));
}
