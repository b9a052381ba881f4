use soroban_sdk::contracterror;

/// Template-registry error codes. Codes 200–203 are consumed by off-chain
/// integrations and must not be renumbered; 204 is an addition for the
/// explicit-initialization surface this port introduces.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    Unauthorized = 200,
    TemplateNotFound = 201,
    /// Size or gas argument of zero.
    InvalidGas = 202,
    TemplateExists = 203,
    AlreadyInitialized = 204,
}

impl From<access_control::AccessError> for Error {
    fn from(_: access_control::AccessError) -> Self {
        Error::Unauthorized
    }
}
