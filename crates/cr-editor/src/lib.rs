//! `cr-editor` — turning pointer events into grid edits.
//!
//! | Module          | Contents                                                      |
//! |-----------------|---------------------------------------------------------------|
//! | [`viewport`]    | `EditorConfig`, `Viewport`: cell/corner addressing, `classify_pointer` |
//! | [`wall_tool`]   | `WallTool` — two-click wall placement and deletion            |
//! | [`cell_edit`]   | `CellEdit`, `apply_cell_edit` — persons, goals, groups        |
//! | [`error`]       | `EditError`, `EditResult<T>`                                  |
//!
//! Edits run only against a grid that is not being replayed.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                    |
//! |---------|-------------------------------------------|
//! | `serde` | `Serialize`/`Deserialize` on `EditorConfig` |

pub mod cell_edit;
pub mod error;
pub mod viewport;
pub mod wall_tool;


pub use cell_edit::{apply_cell_edit, apply_pointer_edit, CellEdit, EditOutcome};
pub use error::{EditError, EditResult};
pub use viewport::{corner_in_bounds, EditorConfig, PointerTarget, Viewport};
pub use wall_tool::{WallClick, WallMode, WallTool};
