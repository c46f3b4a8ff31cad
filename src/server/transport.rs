use std::net::SocketAddr;

use anyhow::Context;
use futures::StreamExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_util::codec::{Framed, LengthDelimitedCodec};
use tracing::{Instrument, info_span};

use crate::common::heartbeat::HeartbeatEvent;

/// Run the accept loop for the compute-node heartbeat ingress. Each agent
/// connection streams length-delimited JSON heartbeat events; decoded
/// events are forwarded into the single dispatcher channel.
pub async fn serve_heartbeats(
    listener: TcpListener,
    tx: mpsc::Sender<HeartbeatEvent>,
    max_frame_len: usize,
) -> anyhow::Result<()> {
    loop {
        let (stream, remote) = listener.accept().await?;
        let tx = tx.clone();
        tokio::spawn(async move {
            if let Err(e) = handle_agent(stream, remote, tx, max_frame_len).await {
                tracing::warn!(%remote, error = ?e, "heartbeat connection terminated with error");
            }
        });
    }
}

/// Handle a single agent connection.
async fn handle_agent(
    stream: TcpStream,
    remote: SocketAddr,
    tx: mpsc::Sender<HeartbeatEvent>,
    max_frame_len: usize,
) -> anyhow::Result<()> {
    // u32 BE length prefix framing.
    let mut builder = tokio_util::codec::length_delimited::Builder::new();
    builder.length_field_length(4);
    builder.max_frame_length(max_frame_len);
    let codec: LengthDelimitedCodec = builder.new_codec();

    let mut framed = Framed::new(stream, codec);

    let conn_span = info_span!("agent", remote = %remote);
    async move {
        while let Some(frame) = framed.next().await {
            let frame = frame.context("failed to read heartbeat frame")?;

            // A bad frame only costs us that frame, not the connection.
            let event: HeartbeatEvent = match serde_json::from_slice(&frame) {
                Ok(event) => event,
                Err(e) => {
                    tracing::warn!(%remote, error = ?e, "discarding undecodable heartbeat frame");
                    continue;
                }
            };

            tracing::debug!(
                %remote,
                server_uuid = %event.server_uuid,
                tuples = event.heartbeats.len(),
                "heartbeat received"
            );
            tx.send(event).await.context("heartbeat channel closed")?;
        }
        Ok::<(), anyhow::Error>(())
    }
    .instrument(conn_span)
    .await?;

    Ok(())
}
