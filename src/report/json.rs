use crate::report::ReportDoc;

pub fn render_report_json(doc: &ReportDoc) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(doc)
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/json.rs"]
mod tests;
