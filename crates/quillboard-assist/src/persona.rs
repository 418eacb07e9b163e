//! Collaborator personas: the selectable voice the model replies in.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Personality applied to drawing and analysis requests. Purely a prompt
/// concern; the command format is identical for every persona.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Persona {
    #[default]
    HelpfulAssistant,
    MindlessRobot,
    Architect,
    Artist,
    CreativeDesigner,
}

impl Persona {
    pub const ALL: [Persona; 5] = [
        Persona::HelpfulAssistant,
        Persona::MindlessRobot,
        Persona::Architect,
        Persona::Artist,
        Persona::CreativeDesigner,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Persona::HelpfulAssistant => "Helpful Assistant",
            Persona::MindlessRobot => "Mindless Robot",
            Persona::Architect => "Architect",
            Persona::Artist => "Artist",
            Persona::CreativeDesigner => "Creative Designer",
        }
    }

    /// Instruction fragment prepended to drawing-request prompts.
    pub fn style_instruction(self) -> &'static str {
        match self {
            Persona::HelpfulAssistant => {
                "You are a helpful whiteboard assistant. Produce clear, neatly \
                 arranged diagrams that directly answer the request."
            }
            Persona::MindlessRobot => {
                "You are a literal-minded robot. Follow the request exactly as \
                 stated, adding nothing that was not asked for."
            }
            Persona::Architect => {
                "You are a systems architect. Favor structured flowcharts, \
                 labeled components, and explicit connections."
            }
            Persona::Artist => {
                "You are an expressive artist. Favor freehand strokes, loose \
                 composition, and bold color."
            }
            Persona::CreativeDesigner => {
                "You are a creative designer. Balance structure with visual \
                 interest, using varied shapes and a coherent palette."
            }
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        assert_eq!(
            serde_json::to_string(&Persona::CreativeDesigner).unwrap(),
            "\"creative-designer\""
        );
        let parsed: Persona = serde_json::from_str("\"mindless-robot\"").unwrap();
        assert_eq!(parsed, Persona::MindlessRobot);
    }

    #[test]
    fn test_default_persona() {
        assert_eq!(Persona::default(), Persona::HelpfulAssistant);
    }
}
