/// Editor integration module
///
/// Handles editor detection and launching projects in the chosen editor.

pub mod editor_detector;
pub mod launcher;

pub use editor_detector::{Editor, EditorDetector, EditorKind};
pub use launcher::launch;
