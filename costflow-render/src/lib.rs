//! Rendering helpers for SankeyMATIC text and the formatted template file.

use chrono::NaiveDateTime;
use costflow_types::flow::FlowDiagram;
use thiserror::Error;

/// Template looked up in the working directory unless configured otherwise.
pub const TEMPLATE_FILE_NAME: &str = "sankeymatic_template.txt";

/// Line in the template after which the flows are inserted.
pub const FLOWS_MARKER: &str = "// === Nodes and Flows ===";

/// Replaced by the generation time, `%Y-%m-%d %H:%M:%S`.
pub const TIMESTAMP_PLACEHOLDER: &str = "%GENERATED DATETIME%";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("template has no '{marker}' section")]
    MarkerMissing { marker: &'static str },
}

/// One line per edge, blocks separated by a single empty line.
///
/// An empty block still contributes its separator, so the output always has the same shape.
pub fn render_flows(diagram: &FlowDiagram) -> String {
    let mut lines: Vec<String> = Vec::new();
    for (i, block) in diagram.blocks().iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.extend(block.iter().map(ToString::to_string));
    }
    lines.join("\n")
}

/// Fill the template: stamp the generation time, then insert `flows` after every marker.
pub fn splice_template(
    template: &str,
    flows: &str,
    generated_at: NaiveDateTime,
) -> Result<String, TemplateError> {
    let stamped = template.replace(TIMESTAMP_PLACEHOLDER, &display_timestamp(generated_at));
    if !stamped.contains(FLOWS_MARKER) {
        return Err(TemplateError::MarkerMissing {
            marker: FLOWS_MARKER,
        });
    }
    Ok(stamped.replace(FLOWS_MARKER, &format!("{FLOWS_MARKER}\n{flows}")))
}

/// `sankeymatic_<YYYYmmdd-HHMMSS>.txt`
pub fn formatted_file_name(generated_at: NaiveDateTime) -> String {
    format!("sankeymatic_{}.txt", generated_at.format("%Y%m%d-%H%M%S"))
}

fn display_timestamp(at: NaiveDateTime) -> String {
    at.format("%Y-%m-%d %H:%M:%S").to_string()
}
