// NOTE: ackdev Architecture
//
// Why one document per session (not a document per view)?
// - Every view edits a scope of the same GeneratorConfig; a copy per view
//   would make a flag toggled in the field list invisible to the summary
// - Views keep scope keys (kind, field set, field name) and receive a
//   mutable borrow of their sub-record only for the duration of a dispatch
//
// Why deferred intents (not direct calls between views)?
// - A button only knows its id; the owning view decides what it means
// - The loop drains one pending intent per tick, so effects follow
//   arrival order and no two transitions interleave
//
// Why a single final write?
// - Aborting (dialog, ctrl+c, exhausted script) must leave the file on
//   disk untouched

mod args;
mod commands;
mod handlers;
pub mod logging;
pub mod tui;
pub mod types;

pub use args::{Cli, Commands, GenerateArgs};
pub use commands::run;
