//! TCP listener for the controller.
//!
//! The controller serves exactly one worker: it binds, accepts a single
//! connection and drops the listener immediately so no second worker can
//! connect while the job is running.

use std::io;
use std::net::{Ipv4Addr, SocketAddr};

use tokio::io::BufReader;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpListener, TcpStream};
use tracing::{info, warn};

/// Binds the listening socket.
///
/// On a dual-stack host the unspecified IPv6 address `::` also accepts IPv4
/// clients.  If the host cannot open an IPv6 socket at all, `::` falls back
/// to `0.0.0.0` on the same port.
///
/// # Errors
///
/// Returns the underlying I/O error (address in use, permission denied, ...).
pub async fn bind(addr: SocketAddr) -> io::Result<TcpListener> {
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) if is_ipv6_any(addr) && !is_address_conflict(&e) => {
            warn!("cannot listen on {addr} ({e}), using IPv4 only");
            TcpListener::bind((Ipv4Addr::UNSPECIFIED, addr.port())).await?
        }
        Err(e) => return Err(e),
    };
    info!("listening on {}", listener.local_addr()?);
    Ok(listener)
}

fn is_ipv6_any(addr: SocketAddr) -> bool {
    addr.is_ipv6() && addr.ip().is_unspecified()
}

fn is_address_conflict(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::AddrInUse | io::ErrorKind::PermissionDenied
    )
}

/// Accepts one connection and closes the listener.
///
/// # Errors
///
/// Returns the I/O error raised by `accept`.
pub async fn accept_one(listener: TcpListener) -> io::Result<(TcpStream, SocketAddr)> {
    let (stream, peer) = listener.accept().await?;
    drop(listener);
    info!("worker connected from {peer}");
    Ok((stream, peer))
}

/// Splits a connected stream into a buffered reader and a writer.
pub fn split(stream: TcpStream) -> (BufReader<OwnedReadHalf>, OwnedWriteHalf) {
    let (read_half, write_half) = stream.into_split();
    (BufReader::new(read_half), write_half)
}
