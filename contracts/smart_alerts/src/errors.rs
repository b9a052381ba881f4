use soroban_sdk::contracterror;

/// Alert-registry error codes. Codes 300–305 are consumed by off-chain
/// integrations and must not be renumbered; 306–307 are additions for the
/// explicit-initialization and pause surfaces this port introduces.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    Unauthorized = 300,
    /// Missing record or ownership mismatch — deliberately not
    /// distinguished.
    AlertNotFound = 301,
    AlertLimitReached = 302,
    /// Target fee below the 100-unit minimum.
    InvalidThreshold = 303,
    /// Condition other than "above" / "below".
    InvalidAlertType = 304,
    AlertInactive = 305,
    AlreadyInitialized = 306,
    RegistryPaused = 307,
}

impl From<access_control::AccessError> for Error {
    fn from(_: access_control::AccessError) -> Self {
        Error::Unauthorized
    }
}
