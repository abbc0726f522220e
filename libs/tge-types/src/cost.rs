use soroban_sdk::contracttype;

/// Deterministic resource estimate for a mutating operation.
///
/// Every contract exposes `estimate_*` views that fill this in from the
/// current state without committing anything. `total` is the weighted sum
/// computed by `tge_math::price_footprint`.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CostEstimate {
    /// Ledger entries read
    pub reads: u32,
    /// Ledger entries written (including removals)
    pub writes: u32,
    /// Cross-contract invocations
    pub invocations: u32,
    /// Events published
    pub events: u32,
    /// Weighted cost units
    pub total: u64,
}
