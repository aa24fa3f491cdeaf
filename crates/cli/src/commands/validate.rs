//! Offline draft validation against the submit gate.

use std::error::Error;
use std::path::Path;

use tracing::{info, warn};

use super::draft;

/// Build the draft's editing state and report anything blocking submission.
///
/// # Errors
///
/// Returns an error if the draft cannot be built, or lists its blockers.
pub fn run(path: &Path) -> Result<(), Box<dyn Error>> {
    let draft = draft::load(path)?;
    let state = draft::build_state(&draft)?;

    let blockers = state.submit_blockers();
    if blockers.is_empty() {
        info!(
            mode = ?state.matrix.mode(),
            images = state.images.len(),
            rows = state.matrix.combinations().len(),
            "draft is ready to publish"
        );
        return Ok(());
    }

    for blocker in &blockers {
        warn!(?blocker, "submit blocker");
    }
    Err(format!("draft has {} submit blocker(s)", blockers.len()).into())
}
