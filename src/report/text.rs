use crate::report::ReportDoc;

pub fn render_report_card(doc: &ReportDoc) -> String {
    let mut out = String::new();
    let rule = "=====================================================\n";

    out.push_str(rule);
    out.push_str("RUBRIC REPORT CARD\n");
    out.push_str(rule);
    if let Some(student) = &doc.student_name {
        out.push_str(&format!("Student: {student}\n"));
    }
    if let Some(assignment) = &doc.assignment {
        out.push_str(&format!("Assignment: {assignment}\n"));
    }
    out.push_str(&format!("Rubric: {}\n", doc.variant));
    out.push_str(&format!(
        "Score: {:.1}/25 ({:.1}/5)\n",
        doc.rounded_total, doc.rounded_overall
    ));
    out.push_str(rule);

    out.push('\n');
    out.push_str("Sub-metrics:\n");
    out.push_str(&format!(
        "  SM1 ({}): {}/5 (ceiling {})\n",
        sm1_title(doc.variant),
        doc.sm1,
        doc.ceiling
    ));
    out.push_str(&format!("  SM2 ({}): {}/5\n", sm2_title(doc.variant), doc.sm2));
    out.push_str(&format!("  SM3 ({}): {}/5\n", sm3_title(doc.variant), doc.sm3));

    if let (Some(number), Some(label)) = (doc.layer_number, doc.layer_label) {
        out.push_str(&format!("  Layer: {number} ({label})\n"));
    }

    out.push('\n');
    out.push_str("Status:\n");
    for key in ["sm1", "sm2", "sm3"] {
        if let Some(line) = doc.feedback.get(key) {
            out.push_str(&format!("  {line}\n"));
        }
    }

    out.push('\n');
    out.push_str("Next steps:\n");
    for key in ["sm1_next", "sm2_next", "sm3_next"] {
        if let Some(line) = doc.feedback.get(key) {
            out.push_str(&format!("  {line}\n"));
        }
    }
    if let Some(line) = doc.feedback.get("layer_guidance") {
        out.push('\n');
        out.push_str(&format!("Layer guidance:\n  {line}\n"));
    }

    out.push_str(rule);
    out
}

fn sm1_title(variant: &str) -> &'static str {
    match variant {
        "argument" => "Position + Evidence",
        _ => "Component Presence",
    }
}

fn sm2_title(variant: &str) -> &'static str {
    match variant {
        "argument" => "Reasoning Depth",
        _ => "Density Performance",
    }
}

fn sm3_title(variant: &str) -> &'static str {
    match variant {
        "argument" => "Argument Coherence",
        _ => "Cohesion Performance",
    }
}
