use soroban_sdk::contracterror;

/// Error codes shared by every TGE contract.
///
/// All contracts use this one enum so a failure raised deep in a
/// cross-contract chain (sale -> pool -> token) reaches the outer caller
/// with the same code. Auth failures are signaled by the host (`require_auth`).
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
#[repr(u32)]
pub enum Error {
    /// Caller does not hold the role required by the operation.
    Permission = 1,
    /// Transfers are locked and the source address is not exempt.
    Locked = 2,
    /// Balance or allowance lower than the requested amount.
    InsufficientBalance = 3,
    /// Participant cap reached for a new participant.
    CapReached = 4,
    /// Contribution is below the configured minimum.
    BelowMinimum = 5,
    /// Sale is outside its time window or its cap is reached.
    SaleClosed = 6,
    /// Every airdrop tier is exhausted.
    CampaignClosed = 7,
    /// Product is outside its time window or deactivated.
    ProductClosed = 8,
    /// Address already claimed or purchased where only one is allowed.
    AlreadyClaimed = 9,
    /// Product allocation cannot cover the purchase.
    SoldOut = 10,
    /// A product with this name already exists.
    DuplicateName = 11,
    AlreadyInitialized = 12,
    NotInitialized = 13,
    /// Zero or negative amount, or an amount that converts to zero tokens.
    InvalidAmount = 14,
    /// Construction or setter parameters rejected.
    InvalidConfig = 15,
    ProductNotFound = 16,
    /// Integer overflow inside a formula.
    Overflow = 17,
}
