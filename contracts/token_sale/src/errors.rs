use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum SaleError {
    Unauthorized = 1,
    /// Empty address, zero limit or malformed configuration.
    InvalidArgument = 2,
    SaleNotActive = 3,
    SaleFinished = 4,
    BelowMinimum = 5,
    ComplianceRequired = 6,
    CapExceeded = 7,
    GasPriceTooHigh = 8,
    NotReady = 9,
    NotInitialized = 10,
    AlreadyInitialized = 11,
    SettlementInProgress = 12,
}
