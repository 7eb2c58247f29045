use std::net::SocketAddr;
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, error, info, instrument, warn};

use crate::commands::CommandTable;
use crate::connection::Connection;
use crate::reply::{encode, encode_error};
use crate::request::Request;
use crate::store::Store;
use crate::Error;

/// Accepts clients on `listener` until the task is dropped, serving each one on its own task
/// against the shared `store`.
pub async fn run(listener: TcpListener, store: Store, max_frame_size: usize) -> Result<(), Error> {
    info!("Kache server listening on {}", listener.local_addr()?);

    loop {
        let (socket, client_address) = listener.accept().await?;
        let store = store.clone();
        info!("Accepted connection from {:?}", client_address);

        tokio::spawn(async move {
            if let Err(e) = handle_connection(socket, client_address, store, max_frame_size).await
            {
                error!("Connection error: {}", e);
            }
        });
    }
}

#[instrument(
    name = "connection",
    skip(stream, store, max_frame_size),
    fields(connection_id, client_address)
)]
async fn handle_connection(
    stream: TcpStream,
    client_address: SocketAddr,
    store: Store,
    max_frame_size: usize,
) -> Result<(), Error> {
    let mut conn = Connection::new(stream, client_address, max_frame_size);
    let table = CommandTable::builtin();

    tracing::Span::current()
        .record("connection_id", conn.id.to_string())
        .record("client_address", client_address.to_string());

    loop {
        let frame = match conn.read_frame().await {
            Ok(Some(frame)) => frame,
            Ok(None) => break,
            Err(e) => {
                // The stream cannot resync after a malformed frame, so report it and hang up.
                warn!("Failed to read frame: {}", e);
                conn.write_all(&encode_error(&e)).await?;
                return Err(e);
            }
        };

        let request = match Request::try_from(frame) {
            Ok(request) => request,
            Err(e) => {
                warn!("Invalid request: {}", e);
                conn.write_all(&encode_error(&e)).await?;
                continue;
            }
        };

        let res = match table.lookup(&request.name) {
            Ok(spec) => {
                debug!(
                    command = %request.name,
                    modifies_key_space = spec.modifies_key_space,
                    "Received request with {} argument(s)",
                    request.args.len()
                );
                (spec.handler)(&store, &request.args)
            }
            Err(e) => Err(e),
        };
        debug!("Sending response to client: {:?}", res);

        conn.write_all(&encode(&res)).await?;
    }

    info!("Connection closed");
    Ok(())
}
