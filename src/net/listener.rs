//! TCP listener binding.

use std::net::{SocketAddr, TcpListener};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ListenerError {
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// Bind a non-blocking listener on `address` (`host:port`).
///
/// The socket is bound before serving starts so that the actual local
/// address is known (port `0` picks a free port).
pub fn bind(address: &str) -> Result<(TcpListener, SocketAddr), ListenerError> {
    let bind_err = |source| ListenerError::Bind {
        address: address.to_string(),
        source,
    };

    let listener = TcpListener::bind(address).map_err(bind_err)?;
    listener.set_nonblocking(true).map_err(bind_err)?;
    let local_addr = listener.local_addr().map_err(bind_err)?;

    tracing::info!(address = %local_addr, "Listener bound");
    Ok((listener, local_addr))
}
