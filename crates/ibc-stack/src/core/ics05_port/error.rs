use displaydoc::Display;

use crate::core::error::ErrorKind;
use crate::core::ics24_host::identifier::PortId;

#[derive(Debug, Display)]
pub enum PortError {
    /// port `{port_id}` is unknown
    UnknownPort { port_id: PortId },
    /// port `{port_id}` is already bound
    PortAlreadyBound { port_id: PortId },
    /// capability does not own port `{port_id}`
    CapabilityMismatch { port_id: PortId },
}

impl PortError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownPort { .. } => ErrorKind::NotFound,
            Self::PortAlreadyBound { .. } => ErrorKind::AlreadyExists,
            Self::CapabilityMismatch { .. } => ErrorKind::Unauthorized,
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PortError {}
