//! Protocol logic specific to ICS3 messages of type `MsgConnectionOpenInit`.

use crate::prelude::*;

use crate::core::ics03_connection::connection::{ConnectionEnd, State};
use crate::core::ics03_connection::error::ConnectionError;
use crate::core::ics03_connection::events::OpenInit;
use crate::core::ics03_connection::msgs::conn_open_init::MsgConnectionOpenInit;
use crate::core::ics24_host::path::ConnectionPath;
use crate::core::{ContextError, ExecutionContext, ValidationContext};
use crate::events::IbcEvent;

pub fn validate<Ctx>(ctx_a: &Ctx, msg: &MsgConnectionOpenInit) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    // An IBC client running on the local (host) chain should exist.
    ctx_a.client_state(&msg.client_id_on_a)?;

    if ctx_a.connection_end(&msg.conn_id_on_a).is_ok() {
        return Err(ConnectionError::ConnectionExistsAlready {
            connection_id: msg.conn_id_on_a.clone(),
        }
        .into());
    }

    let compatible_versions = ctx_a.get_compatible_versions();
    for version in msg.versions.iter() {
        version.verify_is_supported(&compatible_versions)?;
    }

    Ok(())
}

pub fn execute<Ctx>(ctx_a: &mut Ctx, msg: MsgConnectionOpenInit) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    let versions = if msg.versions.is_empty() {
        ctx_a.get_compatible_versions()
    } else {
        msg.versions
    };

    let conn_end_on_a = ConnectionEnd::new(
        State::Init,
        msg.client_id_on_a.clone(),
        msg.counterparty.clone(),
        versions,
    );

    ctx_a.store_connection(&ConnectionPath::new(&msg.conn_id_on_a), conn_end_on_a)?;

    ctx_a.emit_ibc_event(IbcEvent::OpenInitConnection(OpenInit::new(
        msg.conn_id_on_a.clone(),
        msg.client_id_on_a,
        msg.counterparty.connection_id().clone(),
        msg.counterparty.client_id().clone(),
    )));
    ctx_a.log_message(format!(
        "success: conn_open_init: generated new connection identifier: {}",
        msg.conn_id_on_a
    ));

    Ok(())
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use rstest::*;
    use test_log::test;

    use super::*;
    use crate::core::ics03_connection::connection::Counterparty;
    use crate::core::ics03_connection::version::{get_compatible_versions, Version};
    use crate::core::ics23_commitment::commitment::CommitmentPrefix;
    use crate::core::ics24_host::identifier::{ClientId, ConnectionId};
    use crate::mock::context::MockContext;
    use crate::mock::fixtures::dummy_signer;
    use crate::proto::connection::Version as RawVersion;
    use crate::{ErrorKind, Height};

    struct Fixture {
        ctx: MockContext,
        msg: MsgConnectionOpenInit,
    }

    #[fixture]
    fn fixture() -> Fixture {
        let client_id = ClientId::from_str("client-on-a").unwrap();
        let ctx = MockContext::default().with_client(&client_id, Height::new(0, 10).unwrap());
        let msg = MsgConnectionOpenInit {
            conn_id_on_a: ConnectionId::from_str("conn-on-a").unwrap(),
            client_id_on_a: client_id,
            counterparty: Counterparty::new(
                ClientId::from_str("client-on-b").unwrap(),
                ConnectionId::from_str("conn-on-b").unwrap(),
                CommitmentPrefix::try_from(b"ibc".to_vec()).unwrap(),
            ),
            versions: vec![],
            signer: dummy_signer(),
        };
        Fixture { ctx, msg }
    }

    #[rstest]
    fn conn_open_init_ok(fixture: Fixture) {
        let Fixture { mut ctx, msg } = fixture;

        validate(&ctx, &msg).unwrap();
        execute(&mut ctx, msg.clone()).unwrap();

        let conn_end = ctx.connection_end(&msg.conn_id_on_a).unwrap();
        assert_eq!(conn_end.state(), &State::Init);
        assert_eq!(conn_end.versions(), get_compatible_versions().as_slice());
        assert!(matches!(
            ctx.events.last(),
            Some(IbcEvent::OpenInitConnection(_))
        ));
        assert!(ctx.logs.iter().any(|l| l.starts_with("success:")));
    }

    #[rstest]
    fn conn_open_init_twice_fails(fixture: Fixture) {
        let Fixture { mut ctx, msg } = fixture;

        execute(&mut ctx, msg.clone()).unwrap();
        let err = validate(&ctx, &msg).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
    }

    #[rstest]
    fn conn_open_init_without_client_fails(fixture: Fixture) {
        let Fixture { ctx, mut msg } = fixture;
        msg.client_id_on_a = ClientId::from_str("unknown-client").unwrap();

        let err = validate(&ctx, &msg).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[rstest]
    fn conn_open_init_rejects_unsupported_version(fixture: Fixture) {
        let Fixture { ctx, mut msg } = fixture;
        msg.versions = vec![Version::try_from(RawVersion {
            identifier: "7".to_string(),
            features: vec!["ORDER_ORDERED".to_string()],
        })
        .unwrap()];

        assert!(validate(&ctx, &msg).is_err());
    }
}
