/*!
 * # Editing Core Module
 *
 * Owns the block sequence a requirements document is assembled from.
 *
 * ## Architecture Overview
 *
 * ### 1. Single Source of Truth: `BlockModel`
 * - An ordered `Vec<Block>`; order is document order
 * - Each block has a unique id, an immutable type and content whose shape is fixed by
 *   the type's plugin
 *
 * ### 2. Command-Based Editing
 * - Every edit is a method on `BlockModel` and also a `Cmd` variant applied through
 *   `BlockModel::apply`, which returns a `Patch`
 * - Each operation validates first and mutates last, so a rejected edit changes nothing
 *
 * ### 3. Read API: Immutable Snapshots
 * - `snapshot()` copies the sequence at one version
 * - Export reads a snapshot, never the live model, so later edits cannot leak into an
 *   export in progress
 *
 * ## Module Structure
 *
 * - **`document`**: `BlockModel` and its operations
 * - **`commands`**: `Cmd` enum
 * - **`patch`**: edit result metadata
 * - **`snapshot`**: immutable `Snapshot`
 * - **`error`**: `EditError`
 */

pub mod commands;
pub mod document;
pub mod error;
pub mod patch;
pub mod snapshot;

pub use commands::Cmd;
pub use document::BlockModel;
pub use error::EditError;
pub use patch::Patch;
pub use snapshot::Snapshot;
