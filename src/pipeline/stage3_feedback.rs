use std::collections::BTreeMap;

use crate::input::kernel::DeviceKernel;
use crate::model::layers::ArgumentLayer;
use crate::model::record::{
    AnalyticalRecord, ArgumentRecord, CohesionProfile, ComponentRecord, ConnectorType,
    EffectDimension, EvidenceTier, PositionSide, ReasoningType, StanceStrength, VerbTier,
};
use crate::pipeline::stage2_score::ScoreSet;

/// Layer-transition guidance, indexed by the current layer. One fixed
/// template per transition; the last entry is the terminal refinement line.
pub const LAYER_GUIDANCE: [&str; 5] = [
    "Start with a clear position: state which side you take and follow it with 'because...'.",
    "You state a position. To move from Definition to Comparison, show why your side outweighs the other: 'While he does X, he suffers MORE from Y, therefore...'.",
    "You distinguish between the alternatives. To move from Comparison to Cause-Effect, explain HOW the evidence creates meaning: 'Because he was forced to carry the memories alone, he experienced isolation, which caused...'.",
    "You show how evidence supports your position. To reach Problem-Solution, frame the PURPOSE: 'The text presents him this way in order to critique how the community sacrifices individuals.'.",
    "You frame purpose and function. To refine, make sure every cause-effect chain is anchored to a specific quoted moment.",
];

pub fn generate_feedback(
    record: &ComponentRecord,
    scores: &ScoreSet,
    text: &str,
    kernel: Option<&DeviceKernel>,
) -> BTreeMap<String, String> {
    match record {
        ComponentRecord::Analytical(r) => analytical_feedback(r, text, kernel),
        ComponentRecord::Argument(r) => argument_feedback(r, scores),
    }
}

fn cite(text: &str) -> String {
    let snippet: String = text.chars().take(60).collect();
    if text.chars().count() > 60 {
        format!("\"{snippet}...\"")
    } else {
        format!("\"{snippet}\"")
    }
}

fn analytical_feedback(
    record: &AnalyticalRecord,
    text: &str,
    kernel: Option<&DeviceKernel>,
) -> BTreeMap<String, String> {
    let mut fb = BTreeMap::new();
    let device = kernel.and_then(|k| k.identify(text, &record.topics));

    // SM1: component presence + detail quality
    let mut present = Vec::new();
    if !record.topics.is_empty() {
        present.push("Topic");
    }
    if record.verbs.iter().any(|v| v.tier.analytical()) {
        present.push("Verb");
    }
    if !record.objects.is_empty() {
        present.push("Object");
    }
    if !record.details.is_empty() {
        present.push("Detail");
    }
    if !record.insights.is_empty() {
        present.push("Insight");
    }

    let sm1 = if present.is_empty() {
        "No Topic, Verb, Object, Detail, or Insight components were found in your response."
            .to_string()
    } else {
        let example = record
            .topics
            .first()
            .map(String::as_str)
            .or_else(|| record.details.first().map(|d| d.text.as_str()))
            .map(cite)
            .unwrap_or_default();
        format!(
            "You have {} components present (e.g. {}). Your details are {} ({:.2}/5).",
            present.join(", "),
            example,
            record.detail_tier.label(),
            record.detail_score
        )
    };
    fb.insert("sm1".to_string(), sm1);

    let mut next = Vec::new();
    if record.detail_score < 4.0 {
        // below 4.0 the ladder guarantees no quotation was found
        let needs = [
            "add quotation marks around exact text",
            "add a chapter or page reference",
            "add 'which reveals...' to show significance",
        ];
        next.push(format!("Transform details by: {}", needs.join(", ")));
    } else if record.detail_score < 4.5 {
        next.push("Add a chapter or page reference and one more context element (when, why, or how) to reach precise details".to_string());
    }

    let tier3: Vec<&str> = record
        .verbs
        .iter()
        .filter(|v| v.tier == VerbTier::Descriptive)
        .map(|v| v.text.as_str())
        .collect();
    if !record.verbs.iter().any(|v| v.tier.analytical()) {
        if tier3.is_empty() {
            next.push("Use analytical verbs like reveals, creates, exposes, challenges".to_string());
        } else {
            next.push(format!(
                "Try analytical verbs (reveals, creates, exposes, challenges) instead of descriptive ones ({})",
                tier3.join(", ")
            ));
        }
    }
    if next.is_empty() {
        next.push("Continue developing specific textual details".to_string());
    }
    fb.insert("sm1_next".to_string(), format!("{}.", next.join(". ")));

    // SM2: density
    let sm2 = if record.distinct_insights == 0 {
        "No distinct analytical insights were found - no sentence connects a device to an effect."
            .to_string()
    } else {
        let dims: Vec<&str> = record
            .dimension_coverage
            .iter()
            .map(|d| d.label())
            .collect();
        let example = record
            .insights
            .iter()
            .find(|i| i.distinct)
            .map(|i| cite(&i.text))
            .unwrap_or_default();
        format!(
            "You make {} distinct analytical insight{} covering {} (e.g. {}).",
            record.distinct_insights,
            if record.distinct_insights == 1 { "" } else { "s" },
            if dims.is_empty() {
                "no depth dimension".to_string()
            } else {
                dims.join(", ")
            },
            example
        )
    };
    fb.insert("sm2".to_string(), sm2);

    let mut next = Vec::new();
    if record.distinct_insights < 3 {
        next.push(
            "Build more distinct insights - each detail should unlock a DIFFERENT analytical point"
                .to_string(),
        );
    }
    if !record.dimension_coverage.contains(&EffectDimension::MeaningCreation) {
        let device_name = device.map(|d| d.name.as_str()).unwrap_or("the device");
        next.push(format!(
            "Push toward meaning production: write '{device_name} reveals how...' or '{device_name} demonstrates that...'"
        ));
    }
    if let Some(d) = device {
        // kernel lookup miss falls back to a generic prompt
        match kernel.and_then(|k| k.lookup(&d.name)) {
            Some(function) => next.push(format!("Show how {} functions: {}", d.name, function)),
            None => next.push(format!("Show how {} functions in this passage", d.name)),
        }
    }
    if next.is_empty() {
        next.push("Build more distinct insights".to_string());
    }
    fb.insert("sm2_next".to_string(), format!("{}.", next.join(". ")));

    cohesion_feedback(&mut fb, &record.cohesion);
    fb
}

fn cohesion_feedback(fb: &mut BTreeMap<String, String>, cohesion: &CohesionProfile) {
    let variety = cohesion.connector_types.len();
    let total = cohesion.connectors.len();

    let sm3 = if variety > 0 {
        let mut parts = Vec::new();
        for kind in cohesion.connector_types.iter().take(4) {
            let examples: Vec<&str> = cohesion
                .connectors
                .iter()
                .filter(|c| c.kind == *kind)
                .map(|c| c.text.as_str())
                .take(3)
                .collect();
            parts.push(format!("{} ({})", kind.label(), examples.join(", ")));
        }
        format!(
            "You use {} connector{} across {} type{}: {}. Approximately {} grammar issue{} detected.",
            total,
            if total == 1 { "" } else { "s" },
            variety,
            if variety == 1 { "" } else { "s" },
            parts.join("; "),
            cohesion.grammar_errors,
            if cohesion.grammar_errors == 1 { "" } else { "s" },
        )
    } else {
        format!(
            "No connectors were found. Approximately {} grammar issue{} detected.",
            cohesion.grammar_errors,
            if cohesion.grammar_errors == 1 { "" } else { "s" },
        )
    };
    fb.insert("sm3".to_string(), sm3);

    let mut next = Vec::new();
    if variety < 3 {
        let mut missing = Vec::new();
        if !cohesion.connector_types.contains(&ConnectorType::Contrast) {
            missing.push("contrast (however, although, whereas)");
        }
        if !cohesion.connector_types.contains(&ConnectorType::CauseEffect) {
            missing.push("cause-effect (therefore, thus, consequently)");
        }
        if !cohesion.connector_types.contains(&ConnectorType::Elaboration) {
            missing.push("elaboration (which, whereby)");
        }
        if !missing.is_empty() {
            next.push(format!("Add connector variety: {}", missing[..missing.len().min(2)].join(", ")));
        }
    }
    if cohesion.grammar_errors >= 2 {
        next.push(
            "Reduce grammar issues below two, especially subject-verb agreement".to_string(),
        );
    } else if cohesion.grammar_errors > 0 {
        next.push("Minor grammar cleanup needed (check subject-verb agreement)".to_string());
    }
    if next.is_empty() {
        next.push("Good connector variety - keep the grammar clean".to_string());
    }
    fb.insert("sm3_next".to_string(), format!("{}.", next.join(". ")));
}

fn argument_feedback(record: &ArgumentRecord, scores: &ScoreSet) -> BTreeMap<String, String> {
    let mut fb = BTreeMap::new();

    // SM1: position + evidence
    let sm1 = if record.position == PositionSide::Unclear {
        "Your position is not clear. The reader cannot tell which side you take.".to_string()
    } else {
        let example = record
            .evidence
            .first()
            .map(|e| format!(" (e.g. {})", cite(&e.text)))
            .unwrap_or_default();
        format!(
            "You take a clear position: more {} than not. Your stance is {}. Your evidence is {}{}.",
            record.position_label,
            record.strength.label(),
            record.evidence_tier.label(),
            example
        )
    };
    fb.insert("sm1".to_string(), sm1);

    let mut next = Vec::new();
    match record.strength {
        StanceStrength::Missing => next.push(
            "State your position clearly early in your response: 'I believe ... because...'"
                .to_string(),
        ),
        StanceStrength::Hedged => next.push(
            "Strengthen your stance. Instead of 'maybe' or 'kind of', use 'I believe' or 'It is clear that...'"
                .to_string(),
        ),
        _ => {}
    }
    match record.evidence_tier {
        EvidenceTier::Missing | EvidenceTier::Assertion => next.push(
            "Add specific evidence. Name the exact scene or quote the text directly".to_string(),
        ),
        EvidenceTier::General => next.push(
            "Make your evidence more specific: name the moment instead of summarizing the whole story"
                .to_string(),
        ),
        EvidenceTier::Paraphrased => next.push(
            "Add a direct quote with its page reference to lift your evidence to specific"
                .to_string(),
        ),
        EvidenceTier::Specific => {}
    }
    if next.is_empty() {
        next.push("Good position clarity and evidence".to_string());
    }
    fb.insert("sm1_next".to_string(), format!("{}.", next.join(". ")));

    // SM2: reasoning depth
    let layer = scores.layer.unwrap_or(ArgumentLayer::NoPosition);
    let ce = record
        .chains
        .iter()
        .filter(|c| c.distinct && c.kind == ReasoningType::CauseEffect)
        .count();
    let comp = record
        .chains
        .iter()
        .filter(|c| c.distinct && c.kind == ReasoningType::Comparison)
        .count();
    fb.insert(
        "sm2".to_string(),
        format!(
            "Your argument reaches Layer {}: {}. You use {} cause-effect connection{} and {} comparison{}.",
            layer.number(),
            layer.label(),
            ce,
            if ce == 1 { "" } else { "s" },
            comp,
            if comp == 1 { "" } else { "s" },
        ),
    );
    fb.insert(
        "sm2_next".to_string(),
        LAYER_GUIDANCE[layer.number() as usize].to_string(),
    );
    fb.insert(
        "layer_guidance".to_string(),
        LAYER_GUIDANCE[layer.number() as usize].to_string(),
    );

    // SM3: coherence
    let mut sm3 = String::new();
    if let Some(counter) = record.counter_arguments.first() {
        sm3.push_str(&format!(
            "You acknowledge the other side ({}), which strengthens your argument. ",
            cite(counter)
        ));
    } else {
        sm3.push_str("You do not acknowledge counter-arguments. ");
    }
    if record.synthesis.is_some() {
        sm3.push_str("You close with a synthesis that ties the argument together.");
    } else {
        sm3.push_str("Your conclusion could be stronger.");
    }
    sm3.push_str(&format!(
        " Approximately {} grammar issue{} detected.",
        record.cohesion.grammar_errors,
        if record.cohesion.grammar_errors == 1 { "" } else { "s" },
    ));
    fb.insert("sm3".to_string(), sm3);

    let mut next = Vec::new();
    if record.counter_arguments.is_empty() {
        next.push(format!(
            "Acknowledge the other side: 'Although there are moments that suggest the opposite, the evidence for {} is stronger because...'",
            record.position_label
        ));
    }
    if record.synthesis.is_none() {
        next.push(
            "Add a closing synthesis that weighs the evidence: 'Therefore, when we weigh both sides, it becomes clear that...'"
                .to_string(),
        );
    }
    if record.cohesion.grammar_errors >= 2 {
        next.push("Reduce grammar issues below two".to_string());
    }
    if next.is_empty() {
        next.push("Good argument coherence".to_string());
    }
    fb.insert("sm3_next".to_string(), format!("{}.", next.join(". ")));

    fb
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_feedback.rs"]
mod tests;
