//! A single routing run.

use crate::{StatusSource, write_artifact};
use routeplan_core::{RoutingArtifact, UsageSnapshot, plan};
use routeplan_error::RouteplanResult;
use routeplan_limits::{OpenAiTier, RateCeiling, RouteplanConfig};
use std::path::PathBuf;
use tracing::{info, instrument};

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    /// Where the artifact was written
    pub path: PathBuf,
    /// The artifact that was written
    pub artifact: RoutingArtifact,
}

/// Fetch, decide and write once.
///
/// The artifact path is resolved and the snapshot fetched and parsed before
/// anything touches the filesystem, so upstream or parse failures leave the
/// previous artifact in place.
///
/// # Errors
///
/// Returns an error if the path cannot be resolved, the source fails, the
/// snapshot is malformed or the write fails.
#[instrument(skip(config, source), fields(tier = config.openai_tier))]
pub fn run_once(
    config: &RouteplanConfig,
    source: &impl StatusSource,
    updated_at: i64,
) -> RouteplanResult<RunOutcome> {
    let path = config.output_path()?;

    let text = source.fetch()?;
    let snapshot = UsageSnapshot::parse(&text)?;
    let artifact = plan(&snapshot, config.openai_tier, updated_at);

    write_artifact(&path, &artifact)?;

    let flags = artifact.near_cap();
    let prefs = artifact.task_preferred();
    info!(
        path = %path.display(),
        openai_tier = OpenAiTier::resolve(config.openai_tier).name(),
        gemini_pro = flags.gemini_pro,
        gemini_flash = flags.gemini_flash,
        gemini3_pro = flags.gemini3_pro,
        gemini3_flash = flags.gemini3_flash,
        general_assistant = %prefs.general_assistant(),
        coding_normal = %prefs.coding_normal(),
        "Routing artifact updated"
    );

    Ok(RunOutcome { path, artifact })
}
