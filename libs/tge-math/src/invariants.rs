// ============================================================================
// INVARIANTS MODULE
// ============================================================================
//
// Pure predicates expressing the properties every TGE contract must keep.
// Contracts call the ones that double as policy (the transfer lock); test
// suites assert the rest before and after each operation.
//
// INVARIANT CATEGORIES:
//
// 1. LOCK INVARIANTS
//    - A transfer passes the lock iff the lock is off or the source is exempt
//
// 2. CONSERVATION INVARIANTS
//    - Sum of balances equals total supply
//    - Supply only grows through minting
//
// 3. CAP INVARIANTS
//    - Participant count is monotonic and bounded
//    - Raised value is monotonic
//
// 4. SCHEDULE INVARIANTS
//    - Airdrop grants never increase over time
//    - The tier cursor never rewinds
//
// ============================================================================

use tge_types::Tier;

// ============================================================================
// LOCK INVARIANTS
// ============================================================================

/// Invariant: the global lock only admits exempt sources
///
/// Property:
///   permitted <=> !locked || source_exempt
///
/// The destination never takes part in the decision.
pub fn lock_permits(locked: bool, source_exempt: bool) -> bool {
    !locked || source_exempt
}

// ============================================================================
// CONSERVATION INVARIANTS
// ============================================================================

/// Invariant: balances account for the whole supply
///
/// Property:
///   sum(balances) == total_supply
pub fn supply_conserved(balances_sum: i128, total_supply: i128) -> bool {
    balances_sum == total_supply
}

/// Invariant: supply changes only by minted amounts
///
/// Property:
///   supply_after == supply_before + minted
pub fn supply_delta_matches_mint(supply_before: i128, supply_after: i128, minted: i128) -> bool {
    supply_before.checked_add(minted) == Some(supply_after)
}

// ============================================================================
// CAP INVARIANTS
// ============================================================================

/// Invariant: participant count is bounded and never decreases
///
/// Property:
///   count_before <= count_after <= max
pub fn participants_monotonic(count_before: u32, count_after: u32, max: u32) -> bool {
    count_before <= count_after && count_after <= max
}

/// Invariant: raised value never decreases
pub fn raised_monotonic(raised_before: i128, raised_after: i128) -> bool {
    raised_before <= raised_after
}

// ============================================================================
// SCHEDULE INVARIANTS
// ============================================================================

/// Invariant: granted amounts never increase from one claim to the next
///
/// Property:
///   grant_n <= grant_(n-1)
pub fn grant_non_increasing(previous: i128, next: i128) -> bool {
    next <= previous
}

/// Invariant: a tier never serves more claims than its capacity
pub fn tier_within_capacity(tier: &Tier) -> bool {
    tier.claimed <= tier.capacity
}

/// Invariant: the tier cursor only moves forward
pub fn cursor_monotonic(cursor_before: u32, cursor_after: u32) -> bool {
    cursor_before <= cursor_after
}
