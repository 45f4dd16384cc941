//! Redirector component: hands clients the main server's address.
//!
//! Clients always connect to the redirector port first; the reply here is
//! what points them at the main gateway listener.

use std::net::Ipv4Addr;

use async_trait::async_trait;

use blazelink_core::registry::{commands, components};
use blazelink_core::{Group, Packet, Tdf, TdfBuilder, TdfValue};

use crate::config::GatewayConfig;
use crate::dispatch::CommandHandler;
use crate::error::Result;
use crate::session::SessionCtx;

/// `REDIRECTOR / GET_SERVER_INSTANCE`.
pub struct GetServerInstance {
    host: String,
    port: u16,
}

impl GetServerInstance {
    pub fn from_config(config: &GatewayConfig) -> Self {
        Self {
            host: config.external_host.clone(),
            port: config.ports.main,
        }
    }

    /// Numeric form of the host when it is a literal IPv4 address; zero
    /// otherwise, in which case the client falls back to `HOST`.
    fn host_as_u32(&self) -> u32 {
        self.host
            .parse::<Ipv4Addr>()
            .map(u32::from)
            .unwrap_or(0)
    }
}

#[async_trait]
impl CommandHandler for GetServerInstance {
    fn component(&self) -> u16 {
        components::REDIRECTOR
    }

    fn command(&self) -> u16 {
        commands::redirector::GET_SERVER_INSTANCE
    }

    async fn handle(&self, _ctx: &SessionCtx, request: &Packet) -> Result<Packet> {
        let address = Tdf::new(
            "VALU",
            TdfValue::Group(Group::new(vec![
                Tdf::new("HOST", TdfValue::Text(self.host.clone())),
                Tdf::new("IP", TdfValue::VarInt(self.host_as_u32().into())),
                Tdf::new("PORT", TdfValue::VarInt(self.port.into())),
            ])),
        );

        Ok(TdfBuilder::new()
            .union("ADDR", address)
            .number("SECU", 0u64)
            .number("XDNS", 0u64)
            .respond(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blazelink_core::{find, MessageKind};
    use bytes::Bytes;

    fn config(host: &str, port: u16) -> GatewayConfig {
        crate::config::load_from_str(&format!(
            "version: 1\nexternal_host: \"{host}\"\nports:\n  main: {port}\n"
        ))
        .unwrap()
    }

    fn request() -> Packet {
        Packet::new(
            components::REDIRECTOR,
            commands::redirector::GET_SERVER_INSTANCE,
            0,
            MessageKind::Incoming.raw(),
            1,
            Bytes::new(),
        )
    }

    fn ctx() -> SessionCtx {
        SessionCtx::new(([127, 0, 0, 1], 4000).into())
    }

    #[tokio::test]
    async fn redirects_to_configured_address() {
        let handler = GetServerInstance::from_config(&config("192.168.1.5", 14219));
        let reply = handler.handle(&ctx(), &request()).await.unwrap();
        assert_eq!(reply.kind(), Some(MessageKind::Response));

        let body = reply.decode_body().unwrap();
        let addr = find(&body, "ADDR").unwrap();
        let inner = match &addr.value {
            TdfValue::Union {
                value: Some(inner), ..
            } => inner,
            other => panic!("ADDR should be a present union, got {other:?}"),
        };

        let group = inner.value.as_group().unwrap();
        assert_eq!(
            group.find("HOST").and_then(|t| t.value.as_text()),
            Some("192.168.1.5")
        );
        assert_eq!(
            group.find("IP").and_then(|t| t.value.as_var_int()),
            Some(u64::from(u32::from(Ipv4Addr::new(192, 168, 1, 5))))
        );
        assert_eq!(
            group.find("PORT").and_then(|t| t.value.as_var_int()),
            Some(14219)
        );
    }

    #[tokio::test]
    async fn hostname_falls_back_to_zero_ip() {
        let handler = GetServerInstance::from_config(&config("play.example.net", 14219));
        let reply = handler.handle(&ctx(), &request()).await.unwrap();

        let body = reply.decode_body().unwrap();
        let addr = find(&body, "ADDR").unwrap();
        let TdfValue::Union {
            value: Some(inner), ..
        } = &addr.value
        else {
            panic!("ADDR should be a present union");
        };
        let group = inner.value.as_group().unwrap();
        assert_eq!(group.find("IP").and_then(|t| t.value.as_var_int()), Some(0));
    }
}
