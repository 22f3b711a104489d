use crate::prelude::*;

use crate::core::ics05_port::capability::PortCapability;
use crate::core::ics05_port::error::PortError;
use crate::core::ics24_host::identifier::PortId;
use crate::core::ics24_host::path::PortPath;
use crate::core::{ContextError, ErrorKind, ExecutionContext};

/// Binds `port_id` and hands out the capability that owns it.
///
/// Fails with [`PortError::PortAlreadyBound`] if another capability already
/// owns the port.
pub fn bind_port<Ctx>(ctx: &mut Ctx, port_id: PortId) -> Result<PortCapability, ContextError>
where
    Ctx: ExecutionContext,
{
    let port_path = PortPath::new(&port_id);
    match ctx.port_capability_index(&port_path) {
        Ok(_) => return Err(PortError::PortAlreadyBound { port_id }.into()),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }

    let index = ctx.capability_counter()?;
    ctx.store_port_capability(&port_path, index)?;
    ctx.increase_capability_counter();

    ctx.log_message(format!("success: bound port {port_id} to capability {index}"));

    Ok(PortCapability::new(port_id, index))
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::core::ValidationContext;
    use crate::mock::context::MockContext;

    #[test]
    fn bind_port_once() {
        let mut ctx = MockContext::default();

        let first = bind_port(&mut ctx, "firstport".parse().unwrap()).unwrap();
        let second = bind_port(&mut ctx, "secondport".parse().unwrap()).unwrap();

        assert_ne!(first.index(), second.index());
        assert!(ctx.authenticate_port(&first, first.port_id()).is_ok());

        let err = bind_port(&mut ctx, "firstport".parse().unwrap()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
    }

    #[test]
    fn foreign_capability_is_unauthorized() {
        let mut ctx = MockContext::default();
        let first = bind_port(&mut ctx, "firstport".parse().unwrap()).unwrap();
        let second = bind_port(&mut ctx, "secondport".parse().unwrap()).unwrap();

        let err = ctx
            .authenticate_port(&second, first.port_id())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);

        let err = ctx
            .authenticate_port(&first, &"otherport".parse().unwrap())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn capability_from_another_host_is_unauthorized() {
        let mut ctx_a = MockContext::default();
        let mut ctx_b = MockContext::default();
        // Burn an index on chain B so the same port gets a different one.
        bind_port(&mut ctx_b, "otherport".parse().unwrap()).unwrap();
        let cap_b = bind_port(&mut ctx_b, "firstport".parse().unwrap()).unwrap();
        bind_port(&mut ctx_a, "firstport".parse().unwrap()).unwrap();

        let err = ctx_a.authenticate_port(&cap_b, cap_b.port_id()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
    }
}
