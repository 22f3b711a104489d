use crate::core::ics24_host::identifier::PortId;

/// Proof of exclusive authority over a port.
///
/// A capability can only be obtained from [`bind_port`](super::handler::bind_port).
/// It cannot be cloned or constructed outside this crate, so holding one is
/// evidence that the holder (or whoever handed it over) performed the binding.
#[derive(Debug, PartialEq, Eq)]
pub struct PortCapability {
    port_id: PortId,
    index: u64,
}

impl PortCapability {
    pub(crate) fn new(port_id: PortId, index: u64) -> Self {
        Self { port_id, index }
    }

    pub fn port_id(&self) -> &PortId {
        &self.port_id
    }

    /// The unique index handed out when the port was bound.
    pub fn index(&self) -> u64 {
        self.index
    }
}
