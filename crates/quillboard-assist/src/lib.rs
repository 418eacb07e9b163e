//! Quillboard AI Collaborator
//!
//! The model-facing half of the whiteboard: prompt construction, the
//! drawing-command wire format, and applying parsed commands to the
//! element store. Transport (which model, which API) is behind the
//! [`AssistClient`] trait so the core never blocks on the network.

pub mod apply;
pub mod commands;
pub mod persona;

pub use apply::{apply_commands, apply_modifications, resolve_target};
pub use commands::{
    AssistResponse, DrawingCommand, FlowchartShapeCommand, Modifications, TargetQuery,
    parse_commands, parse_response,
};
pub use persona::Persona;

use quillboard_core::ElementStore;
use quillboard_core::elements::Element;
use quillboard_core::summary::SummaryRequester;

/// Canned description shown for connectors. They carry no summary state,
/// so no model round-trip is made for them.
pub const CONNECTOR_SUMMARY: &str = "This is a connector line.";

/// Full collaborator interface: summaries plus drawing requests.
pub trait AssistClient: SummaryRequester {
    /// Ask the model to draw. The current board is passed so the prompt
    /// can describe existing elements; the reply is delivered
    /// asynchronously as a raw string for [`parse_response`].
    fn request_drawing(&mut self, snapshot: &ElementStore, prompt: &str, persona: Persona);
}

/// The prompt used to summarize an element, or `None` for connectors
/// (use [`CONNECTOR_SUMMARY`] directly).
pub fn summary_prompt(element: &Element) -> Option<String> {
    let mut description = format!(
        "Describe this whiteboard element in one short sentence. Kind: {}.",
        element.kind_name()
    );
    match element {
        Element::Connector(_) => return None,
        Element::Shape(s) => {
            description.push_str(&format!(" Shape: {:?}.", s.kind));
            if !s.label.is_empty() {
                description.push_str(&format!(" Label: {:?}.", s.label));
            }
        }
        Element::Text(t) => {
            description.push_str(&format!(" Text: {:?}.", t.text));
        }
        Element::ContentBox(b) => {
            if let Some(filename) = &b.filename {
                description.push_str(&format!(" Filename: {filename:?}."));
            }
            if !b.body.is_empty() {
                description.push_str(&format!(" Content: {:?}.", b.body));
            }
        }
        Element::Emoji(e) => {
            description.push_str(&format!(" Glyph: {}.", e.glyph));
        }
        Element::Path(p) => {
            description.push_str(&format!(
                " A freehand stroke of {} points in color {}.",
                p.points.len(),
                p.color.to_hex()
            ));
        }
        Element::Image(i) => {
            if let Some(source) = &i.diagram_source {
                description.push_str(&format!(" Generated from diagram source: {source:?}."));
            } else {
                description.push_str(" A raster image.");
            }
        }
    }
    Some(description)
}

/// The prompt for a drawing request: persona style, then the user's ask.
pub fn drawing_prompt(persona: Persona, user_request: &str) -> String {
    format!(
        "{}\n\nReply with a JSON object: an \"analysis\" string and a \
         \"commands\" array of drawing commands.\n\nRequest: {user_request}",
        persona.style_instruction()
    )
}
