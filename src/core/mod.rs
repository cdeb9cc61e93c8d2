//! The headless engine of pantry: tokenizing Cooklang markup for highlighting,
//! extracting ingredient and cookware names, context-sensitive autocomplete,
//! the editing session that ties them together, and recipe library search.
//!
//! Nothing here touches the terminal; front ends drive it through
//! [`session::EditorSession`] and the pure functions of each module.

pub mod buffer;
pub mod completion;
pub mod input;
pub mod lexer;
pub mod library;
pub mod lookup;
pub mod names;
pub mod query;
pub mod search;
pub mod session;
pub mod utf8;
