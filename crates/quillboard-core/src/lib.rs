//! Quillboard Core Library
//!
//! Platform-agnostic data model and interaction logic for the Quillboard
//! collaborative whiteboard: elements, the view transform, the pointer
//! state machine, connector snapping, and session persistence.

pub mod camera;
pub mod elements;
pub mod geometry;
pub mod import;
pub mod interaction;
pub mod snap;
pub mod storage;
pub mod store;
pub mod summary;
pub mod tools;

pub use camera::Camera;
pub use elements::{Element, ElementId, SerializableColor, ShapeKind, SummaryState};
pub use geometry::{HandleKind, SummaryAction, TextMeasurer};
pub use interaction::{InteractionController, InteractionCtx, Mode, UiRequest};
pub use snap::{SnapTarget, find_snap_target};
pub use storage::{Session, StorageError};
pub use store::ElementStore;
pub use summary::{SummaryRequester, SummaryTicket, SummaryTracker};
pub use tools::{ToolKind, ToolPalette};
