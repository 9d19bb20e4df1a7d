use socket2::{Domain, Protocol, Socket, Type};
use std::{
    io,
    net::{Ipv4Addr, Ipv6Addr, SocketAddr},
};
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Binds the HTTP listener.
///
/// `*` binds every interface, preferring an IPv6 dual-stack socket and
/// falling back to IPv4 when IPv6 is unavailable.
pub async fn create_listener(host: &str, port: u16) -> io::Result<(SocketAddr, TcpListener)> {
    if host == "*" {
        return bind_wildcard(port);
    }

    info!("Attempting to bind server to {}:{}...", host, port);
    let listener = TcpListener::bind((host, port)).await?;

    Ok((listener.local_addr()?, listener))
}

fn bind_wildcard(port: u16) -> io::Result<(SocketAddr, TcpListener)> {
    let ipv6_addr = SocketAddr::from((Ipv6Addr::UNSPECIFIED, port));
    info!(
        "Attempting to bind server to {}... (IPv6 + IPv4 dual-stack)",
        ipv6_addr
    );

    match bind_socket(ipv6_addr) {
        Ok(bound) => Ok(bound),
        Err(e) => {
            warn!("Failed to bind IPv6 listener: {}. Attempting IPv4 only.", e);

            let ipv4_addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));
            info!("Attempting to bind server to {}... (IPv4)", ipv4_addr);
            bind_socket(ipv4_addr)
        }
    }
}

fn bind_socket(addr: SocketAddr) -> io::Result<(SocketAddr, TcpListener)> {
    let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))?;

    if addr.is_ipv6() {
        // Some systems refuse dual-stack; IPv6 alone is still usable
        if let Err(e) = socket.set_only_v6(false) {
            warn!("Failed to enable dual-stack mode: {}. Continuing anyway.", e);
        }
    }

    socket.set_reuse_address(true)?;
    socket.bind(&addr.into())?;
    socket.listen(1024)?;
    socket.set_nonblocking(true)?;

    let listener = TcpListener::from_std(socket.into())?;
    Ok((listener.local_addr()?, listener))
}
