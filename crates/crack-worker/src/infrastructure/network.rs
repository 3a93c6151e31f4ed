//! TCP connection to the controller.
//!
//! The worker connects exactly once.  There is no reconnect loop: a refused
//! or dropped connection ends the run.

use tokio::io::BufReader;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tracing::info;

/// Connects to `host:port`.  `host` may be a name or an IP literal.
///
/// # Errors
///
/// Returns the resolution or connection error.
pub async fn connect(host: &str, port: u16) -> std::io::Result<TcpStream> {
    let stream = TcpStream::connect((host, port)).await?;
    info!("connected to controller at {}", stream.peer_addr()?);
    Ok(stream)
}

/// Splits a connected stream into a buffered reader and a writer.
pub fn split(stream: TcpStream) -> (BufReader<OwnedReadHalf>, OwnedWriteHalf) {
    let (read_half, write_half) = stream.into_split();
    (BufReader::new(read_half), write_half)
}
