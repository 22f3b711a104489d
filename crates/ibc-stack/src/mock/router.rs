use crate::prelude::*;

use crate::core::ics04_channel::packet::Packet;
use crate::core::ics05_port::capability::PortCapability;
use crate::core::ics24_host::identifier::PortId;
use crate::core::router::{Module, ModuleError, ModuleExtras, Router};
use crate::mock::context::MockContext;

/// Routes ports to the modules registered on a [`MockContext`].
#[derive(Debug, Default)]
pub struct MockRouter {
    /// Maps ports to the module that owns it
    routes: BTreeMap<PortId, Box<dyn Module<MockContext>>>,
}

impl MockRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `module` for the port its capability was bound to.
    pub fn add_route(&mut self, module: impl Module<MockContext> + 'static) -> Result<(), String> {
        let port_id = module.port_capability().port_id().clone();
        if self.routes.contains_key(&port_id) {
            return Err(format!("port {port_id} already routed"));
        }
        self.routes.insert(port_id, Box::new(module));
        Ok(())
    }
}

impl Router<MockContext> for MockRouter {
    fn get_route(&self, port_id: &PortId) -> Option<&dyn Module<MockContext>> {
        self.routes.get(port_id).map(Box::as_ref)
    }
}

/// A module which accepts every channel step and packet.
#[derive(Debug)]
pub struct DummyModule {
    port_capability: PortCapability,
}

impl DummyModule {
    pub fn new(port_capability: PortCapability) -> Self {
        Self { port_capability }
    }
}

impl<Ctx> Module<Ctx> for DummyModule {
    fn port_capability(&self) -> &PortCapability {
        &self.port_capability
    }

    fn on_recv_packet_validate(&self, _ctx: &Ctx, _packet: &Packet) -> Result<(), ModuleError> {
        Ok(())
    }

    fn on_recv_packet_execute(
        &self,
        _ctx: &mut Ctx,
        packet: &Packet,
    ) -> Result<ModuleExtras, ModuleError> {
        Ok(ModuleExtras {
            events: Vec::new(),
            log: vec![format!("dummy module received packet {}", packet.seq_on_a)],
        })
    }
}
