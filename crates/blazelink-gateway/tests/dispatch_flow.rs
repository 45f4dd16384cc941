#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

//! End-to-end flow without a socket: wire bytes through the codec, into
//! the dispatcher with the built-in services registered, and back out.

use bytes::{Bytes, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use blazelink_core::registry::{commands, components};
use blazelink_core::{find, MessageKind, Packet, TdfValue};
use blazelink_gateway::config;
use blazelink_gateway::dispatch::Dispatcher;
use blazelink_gateway::services;
use blazelink_gateway::session::SessionCtx;
use blazelink_gateway::transport::codec::PacketCodec;

fn dispatcher() -> Dispatcher {
    let cfg = config::load_from_str(
        "version: 1\nexternal_host: \"10.0.0.2\"\nports:\n  main: 14219\n",
    )
    .unwrap();
    let dispatcher = Dispatcher::new();
    services::register_all(&dispatcher, &cfg);
    dispatcher
}

fn ctx() -> SessionCtx {
    SessionCtx::new(([10, 0, 0, 9], 50000).into())
}

#[tokio::test]
async fn redirect_request_round_trips_through_codec() {
    let request = Packet::new(
        components::REDIRECTOR,
        commands::redirector::GET_SERVER_INSTANCE,
        0,
        MessageKind::Incoming.raw(),
        0x11,
        Bytes::new(),
    );

    // Client -> server leg.
    let mut codec = PacketCodec::new();
    let mut wire = BytesMut::new();
    codec.encode(request, &mut wire).unwrap();
    let inbound = codec.decode(&mut wire).unwrap().unwrap();

    let reply = dispatcher().dispatch(&ctx(), &inbound).await;
    assert_eq!(reply.kind(), Some(MessageKind::Response));
    assert_eq!(reply.id, 0x11);

    // Server -> client leg.
    let mut out = BytesMut::new();
    codec.encode(reply, &mut out).unwrap();
    let delivered = codec.decode(&mut out).unwrap().unwrap();

    let body = delivered.decode_body().unwrap();
    let addr = find(&body, "ADDR").unwrap();
    let TdfValue::Union {
        value: Some(inner), ..
    } = &addr.value
    else {
        panic!("ADDR should be a present union");
    };
    let group = inner.value.as_group().unwrap();
    assert_eq!(
        group.find("HOST").and_then(|t| t.value.as_text()),
        Some("10.0.0.2")
    );
    assert_eq!(
        group.find("PORT").and_then(|t| t.value.as_var_int()),
        Some(14219)
    );
}

#[tokio::test]
async fn unhandled_command_still_gets_a_reply() {
    let request = Packet::new(
        components::STATS,
        0x05,
        0,
        MessageKind::Incoming.raw(),
        0x22,
        Bytes::new(),
    );

    let reply = dispatcher().dispatch(&ctx(), &request).await;
    assert_eq!(reply.kind(), Some(MessageKind::Response));
    assert_eq!(reply.id, 0x22);
    assert!(reply.body.is_empty());
}
