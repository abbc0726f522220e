use tge_types::CostEstimate;

// ============================================================================
// COST MODEL
// ============================================================================
// Weights approximate the relative resource fees Soroban charges per
// footprint item. They only need to be stable and ordered so callers can
// compare operations and plan capacity; the network's own simulation stays
// authoritative for real fees.
// ============================================================================

pub const READ_WEIGHT: u64 = 1_000;
pub const WRITE_WEIGHT: u64 = 10_000;
pub const INVOKE_WEIGHT: u64 = 25_000;
pub const EVENT_WEIGHT: u64 = 2_000;

/// Price a footprint
pub fn price_footprint(reads: u32, writes: u32, invocations: u32, events: u32) -> CostEstimate {
    let total = reads as u64 * READ_WEIGHT
        + writes as u64 * WRITE_WEIGHT
        + invocations as u64 * INVOKE_WEIGHT
        + events as u64 * EVENT_WEIGHT;
    CostEstimate {
        reads,
        writes,
        invocations,
        events,
        total,
    }
}

/// Add a nested call's footprint to the caller's own
pub fn combine(outer: &CostEstimate, inner: &CostEstimate) -> CostEstimate {
    price_footprint(
        outer.reads + inner.reads,
        outer.writes + inner.writes,
        outer.invocations + inner.invocations,
        outer.events + inner.events,
    )
}
