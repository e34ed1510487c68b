//! jpu-core: path-addressed, copy-on-write updates for JSON documents
//!
//! The surface is small:
//! - `path`: lenient parser for `$["a"][0]`, `${["a"][0]}` and `$.a[0]` expressions
//! - `update`: set a value at a path, returning a new tree and leaving the input untouched
//! - `edit`: read at a path, editable-field views and shallow merges for partial edits
//! - `doc`: load, write and back up JSON documents
//!
pub mod doc;
pub mod edit;
pub mod error;
pub mod path;
pub mod update;

pub use doc::{backup_file, load_document, parse_document, render_document, write_document};
pub use edit::{
    editable_fields, fields_from_text, get, merge_at, merge_with_outcome, parse_field_text,
    shallow_merge,
};
pub use error::{DocError, DocResult};
pub use path::{Path, Seg, parse};
pub use update::{MAX_INDEX_GAP, Outcome, update, update_at, update_with_outcome};
