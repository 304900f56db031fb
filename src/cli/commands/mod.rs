//! CLI command implementations

pub mod analyze;
pub mod config;
pub mod detect;
pub mod record;

pub use analyze::execute as analyze;
pub use config::execute as config;
pub use detect::execute as detect;
pub use record::execute as record;

use crate::error::OutguardResult;
use crate::snapshot::TaskSnapshots;
use std::path::Path;
use tracing::debug;

/// Load the previous-execution document, if one was given
fn load_previous(path: Option<&Path>) -> OutguardResult<Option<TaskSnapshots>> {
    match path {
        Some(path) => TaskSnapshots::load(path).map(Some),
        None => {
            debug!("No previous execution given, treating as first run");
            Ok(None)
        }
    }
}

/// Display name for a task, taken from the first document that has one
fn task_label<'a>(documents: &[&'a TaskSnapshots]) -> &'a str {
    documents
        .iter()
        .find_map(|doc| doc.task.as_deref())
        .unwrap_or("task")
}
