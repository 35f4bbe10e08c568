//! `${name}` substitution for job and system text.
//!
//! Two strictness levels are offered:
//! - [`MacroResolver::resolve`] expands recursively and fails on anything it
//!   cannot resolve (unknown names, cycles, malformed delimiters);
//! - [`MacroResolver::replace_macros`] performs one non-recursive pass and
//!   leaves anything it cannot resolve verbatim.
mod error;
pub use error::MacroError;

mod resolver;
pub use resolver::{MacroResolver, replace_macros, resolve};

mod job;
pub use job::{job_macros, resolve_job_dirs};

use std::collections::BTreeMap;

/// Macro name to value text. Values may reference other names.
pub type Definitions = BTreeMap<String, String>;
