use soroban_sdk::contracterror;

/// Oracle error codes. The numeric values are consumed by off-chain
/// integrations and must not be renumbered.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    Unauthorized = 100,
    /// Zero fee rate or zero observed fee.
    InvalidFee = 101,
    /// No snapshot recorded at the requested block height.
    InvalidBlock = 102,
    AlreadyInitialized = 103,
}

impl From<access_control::AccessError> for Error {
    fn from(_: access_control::AccessError) -> Self {
        Error::Unauthorized
    }
}
