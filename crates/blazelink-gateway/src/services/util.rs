//! Util component handlers: ping and the pre/post auth bootstrap replies
//! every client issues before doing anything else.

use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;

use blazelink_core::registry::{commands, components};
use blazelink_core::{ListValue, Packet, Tdf, TdfBuilder, TdfMap, TdfValue};

use crate::config::GatewayConfig;
use crate::dispatch::CommandHandler;
use crate::error::Result;
use crate::session::SessionCtx;

/// Seconds since the unix epoch, saturating at zero on a badly set clock.
fn server_time() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// `UTIL / PING`: answers with the server time. The client uses this as a
/// keepalive and clock reference.
pub struct Ping;

#[async_trait]
impl CommandHandler for Ping {
    fn component(&self) -> u16 {
        components::UTIL
    }

    fn command(&self) -> u16 {
        commands::util::PING
    }

    async fn handle(&self, _ctx: &SessionCtx, request: &Packet) -> Result<Packet> {
        Ok(TdfBuilder::new()
            .number("STIM", server_time())
            .respond(request))
    }
}

/// `UTIL / PRE_AUTH`: the first request on the main connection. The reply
/// names the server instance and the client config knobs; the component
/// id list tells the client which components this server speaks.
pub struct PreAuth;

#[async_trait]
impl CommandHandler for PreAuth {
    fn component(&self) -> u16 {
        components::UTIL
    }

    fn command(&self) -> u16 {
        commands::util::PRE_AUTH
    }

    async fn handle(&self, _ctx: &SessionCtx, request: &Packet) -> Result<Packet> {
        let cids: Vec<u64> = vec![
            components::AUTHENTICATION.into(),
            components::GAME_MANAGER.into(),
            components::REDIRECTOR.into(),
            components::STATS.into(),
            components::UTIL.into(),
            components::MESSAGING.into(),
            components::ASSOCIATION_LISTS.into(),
            components::GAME_REPORTING.into(),
            components::USER_SESSIONS.into(),
        ];

        let conf = TdfMap::try_from_pairs([
            ("pingPeriod", "15s"),
            ("voipHeadsetUpdateRate", "1000"),
            ("xlspConnectionIdleTimeout", "300"),
        ])?;

        Ok(TdfBuilder::new()
            .number("ANON", 0u64)
            .text("ASRC", "303107")
            .list("CIDS", ListValue::VarInt(cids))
            .group("CONF", vec![Tdf::new("CONF", TdfValue::Map(conf))])
            .text("INST", "masseffect-3-pc")
            .number("MINR", 0u64)
            .text("NASP", "cem_ea_id")
            .text("PLAT", "pc")
            .respond(request))
    }
}

/// `UTIL / POST_AUTH`: issued after login. Points the client's telemetry
/// and ticker sinks back at this server.
pub struct PostAuth {
    host: String,
    port: u16,
}

impl PostAuth {
    pub fn from_config(config: &GatewayConfig) -> Self {
        Self {
            host: config.external_host.clone(),
            port: config.ports.main,
        }
    }
}

#[async_trait]
impl CommandHandler for PostAuth {
    fn component(&self) -> u16 {
        components::UTIL
    }

    fn command(&self) -> u16 {
        commands::util::POST_AUTH
    }

    async fn handle(&self, _ctx: &SessionCtx, request: &Packet) -> Result<Packet> {
        Ok(TdfBuilder::new()
            .group(
                "PSS",
                vec![
                    Tdf::new("ADRS", TdfValue::Text(self.host.clone())),
                    Tdf::new("AMAX", TdfValue::VarInt(0)),
                    Tdf::new("OMAX", TdfValue::VarInt(0)),
                    Tdf::new("PJID", TdfValue::Text("303107".into())),
                ],
            )
            .group(
                "TELE",
                vec![
                    Tdf::new("ADRS", TdfValue::Text(self.host.clone())),
                    Tdf::new("ANON", TdfValue::VarInt(0)),
                    Tdf::new("DISA", TdfValue::Text(String::new())),
                    Tdf::new("PORT", TdfValue::VarInt(self.port.into())),
                ],
            )
            .group(
                "TICK",
                vec![
                    Tdf::new("ADRS", TdfValue::Text(self.host.clone())),
                    Tdf::new("PORT", TdfValue::VarInt(self.port.into())),
                ],
            )
            .respond(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blazelink_core::{find, MessageKind};
    use bytes::Bytes;

    fn request(command: u16) -> Packet {
        Packet::new(
            components::UTIL,
            command,
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
    async fn ping_reports_server_time() {
        let reply = Ping
            .handle(&ctx(), &request(commands::util::PING))
            .await
            .unwrap();
        assert_eq!(reply.kind(), Some(MessageKind::Response));

        let body = reply.decode_body().unwrap();
        let stim = find(&body, "STIM").and_then(|t| t.value.as_var_int());
        assert!(stim.is_some_and(|v| v > 0));
    }

    #[tokio::test]
    async fn pre_auth_lists_served_components() {
        let reply = PreAuth
            .handle(&ctx(), &request(commands::util::PRE_AUTH))
            .await
            .unwrap();
        let body = reply.decode_body().unwrap();

        let cids = find(&body, "CIDS").unwrap();
        match &cids.value {
            TdfValue::List(ListValue::VarInt(ids)) => {
                assert!(ids.contains(&u64::from(components::REDIRECTOR)));
                assert!(ids.contains(&u64::from(components::USER_SESSIONS)));
            }
            other => panic!("unexpected CIDS value {other:?}"),
        }
        assert!(find(&body, "CONF").is_some());
    }
}
