//! End-to-end decision over a parsed snapshot.

use crate::{NearCapFlags, RoutingArtifact, UsageSnapshot, VendorUsage, select};
use routeplan_limits::limits_for;
use tracing::{debug, instrument};

/// Compute the routing artifact for a snapshot.
///
/// `openai_tier` is recorded verbatim; the limit table falls back to Tier 1
/// for unknown values. `updated_at` is the decision time in Unix seconds.
#[instrument(skip(snapshot))]
pub fn plan(snapshot: &UsageSnapshot, openai_tier: i64, updated_at: i64) -> RoutingArtifact {
    let limits = limits_for(openai_tier);
    let usage = VendorUsage::from_snapshot(snapshot);
    let near_cap = NearCapFlags::evaluate(usage.google(), &limits);
    let prefs = select(&near_cap);

    debug!(?near_cap, ?prefs, "Routing decision made");

    RoutingArtifact::build(limits, openai_tier, near_cap, prefs, &usage, updated_at)
}
