//! The drawing-command wire format spoken by the AI collaborator.
//!
//! The model replies with a JSON array of command objects. Parsing is
//! lenient per item: a malformed command is logged and skipped so one bad
//! object never discards the rest of the batch.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use quillboard_core::ShapeKind;

/// One point of a path command.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CommandPoint {
    pub x: f64,
    pub y: f64,
}

/// A freehand stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathCommand {
    pub points: Vec<CommandPoint>,
    pub color: Option<String>,
    pub stroke_width: Option<f64>,
}

/// A block of text placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextCommand {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub color: Option<String>,
}

/// A flowchart shape, optionally labeled and filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowchartShapeCommand {
    pub x: f64,
    pub y: f64,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub shape_type: ShapeKind,
    pub text: Option<String>,
    pub fill_color: Option<String>,
}

/// A straight connector between two absolute points. The model speaks in
/// raw coordinates; attachment references are a manual-gesture concept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorCommand {
    pub start_x: f64,
    pub start_y: f64,
    pub end_x: f64,
    pub end_y: f64,
    pub color: Option<String>,
}

/// Which existing element a modify command is aimed at. Matching is
/// fuzzy: any subset of the fields may be present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetQuery {
    /// Exact element id; when present and valid it overrides everything.
    pub id: Option<String>,
    pub shape_type: Option<ShapeKind>,
    pub text_contains: Option<String>,
    pub color: Option<String>,
}

/// The changes a modify command requests. Absolute position wins over
/// deltas when both are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Modifications {
    pub new_x: Option<f64>,
    pub new_y: Option<f64>,
    pub delta_x: Option<f64>,
    pub delta_y: Option<f64>,
    pub new_width: Option<f64>,
    pub new_height: Option<f64>,
    pub new_text: Option<String>,
    pub new_fill_color: Option<String>,
    /// Select the element after modifying it.
    pub select: Option<bool>,
}

/// A single canvas operation requested by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum DrawingCommand {
    Path(PathCommand),
    Text(TextCommand),
    FlowchartShape(FlowchartShapeCommand),
    Connector(ConnectorCommand),
    ModifyElement {
        target: TargetQuery,
        modifications: Modifications,
    },
}

/// A full collaborator reply: prose analysis plus zero or more commands.
#[derive(Debug, Clone, Default)]
pub struct AssistResponse {
    pub analysis_text: Option<String>,
    pub commands: Vec<DrawingCommand>,
    pub error: Option<String>,
}

/// Parse a JSON array of commands, skipping items that fail to decode.
pub fn parse_commands(raw: &Value) -> Vec<DrawingCommand> {
    let Some(items) = raw.as_array() else {
        log::warn!("drawing commands payload is not an array, ignoring");
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match serde_json::from_value(item.clone()) {
            Ok(command) => Some(command),
            Err(err) => {
                log::warn!("skipping malformed drawing command: {err}");
                None
            }
        })
        .collect()
}

/// Parse the model's reply body. The expected shape is an object with
/// optional `analysis` and `commands` fields; a bare array is accepted as
/// commands-only for older replies.
pub fn parse_response(raw: &str) -> AssistResponse {
    let value: Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(err) => {
            return AssistResponse {
                error: Some(format!("unparseable model reply: {err}")),
                ..AssistResponse::default()
            };
        }
    };

    if value.is_array() {
        return AssistResponse {
            commands: parse_commands(&value),
            ..AssistResponse::default()
        };
    }

    let analysis_text = value
        .get("analysis")
        .and_then(Value::as_str)
        .map(str::to_string);
    let commands = value
        .get("commands")
        .map(parse_commands)
        .unwrap_or_default();
    AssistResponse {
        analysis_text,
        commands,
        error: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shape_command() {
        let raw = serde_json::json!([{
            "type": "flowchart-shape",
            "x": 10.0,
            "y": 20.0,
            "width": 150.0,
            "height": 80.0,
            "shapeType": "diamond",
            "text": "Decide",
            "fillColor": "#3B82F6"
        }]);
        let commands = parse_commands(&raw);
        assert_eq!(commands.len(), 1);
        match &commands[0] {
            DrawingCommand::FlowchartShape(cmd) => {
                assert_eq!(cmd.shape_type, ShapeKind::Diamond);
                assert_eq!(cmd.text.as_deref(), Some("Decide"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_item_skipped() {
        let raw = serde_json::json!([
            {"type": "connector", "startX": 0.0, "startY": 0.0, "endX": 10.0, "endY": 10.0},
            {"type": "flowchart-shape", "shapeType": "not-a-shape", "x": 0.0, "y": 0.0},
            {"type": "no-such-command"}
        ]);
        let commands = parse_commands(&raw);
        assert_eq!(commands.len(), 1);
        assert!(matches!(commands[0], DrawingCommand::Connector(_)));
    }

    #[test]
    fn test_parse_full_response() {
        let response = parse_response(
            r#"{"analysis": "Two boxes and an arrow.", "commands": [
                {"type": "text", "x": 5.0, "y": 5.0, "text": "hello"}
            ]}"#,
        );
        assert_eq!(response.analysis_text.as_deref(), Some("Two boxes and an arrow."));
        assert_eq!(response.commands.len(), 1);
        assert!(response.error.is_none());
    }

    #[test]
    fn test_bare_array_response() {
        let response = parse_response(r#"[{"type": "text", "x": 0.0, "y": 0.0, "text": "hi"}]"#);
        assert_eq!(response.commands.len(), 1);
        assert!(response.analysis_text.is_none());
    }

    #[test]
    fn test_unparseable_reply_reports_error() {
        let response = parse_response("I cannot draw that.");
        assert!(response.commands.is_empty());
        assert!(response.error.is_some());
    }
}
