//! UDP stand-in for the infrared serial link
//!
//! Each datagram carries exactly one byte. The socket is non-blocking so
//! `byte_available` is a cheap poll, matching the one-byte-per-tick drain.

use std::io::{self, ErrorKind};
use std::net::{ToSocketAddrs, UdpSocket};

use super::SerialLink;

#[derive(Debug)]
pub struct UdpLink {
    socket: UdpSocket,
    /// Byte received by `byte_available` but not yet read
    peeked: Option<u8>,
}

impl UdpLink {
    /// Bind locally and send every byte to `peer`
    pub fn connect(bind: impl ToSocketAddrs, peer: impl ToSocketAddrs) -> io::Result<Self> {
        let socket = UdpSocket::bind(bind)?;
        socket.connect(peer)?;
        socket.set_nonblocking(true)?;
        log::info!(
            "Link bound to {} -> {}",
            socket.local_addr()?,
            socket.peer_addr()?
        );
        Ok(Self {
            socket,
            peeked: None,
        })
    }

    fn poll(&mut self) {
        if self.peeked.is_some() {
            return;
        }
        let mut buf = [0u8; 1];
        match self.socket.recv(&mut buf) {
            Ok(1) => self.peeked = Some(buf[0]),
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::WouldBlock => {}
            // Peer not started yet
            Err(e) if e.kind() == ErrorKind::ConnectionRefused => {
                log::trace!("Peer unreachable: {e}");
            }
            Err(e) => log::error!("Link receive failed: {e}"),
        }
    }
}

impl SerialLink for UdpLink {
    fn byte_available(&mut self) -> bool {
        self.poll();
        self.peeked.is_some()
    }

    fn read_byte(&mut self) -> u8 {
        self.poll();
        self.peeked.take().unwrap_or(0)
    }

    fn write_byte(&mut self, byte: u8) {
        if let Err(e) = self.socket.send(&[byte]) {
            log::error!("Link send of 0x{byte:02x} failed: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn wait_for_byte(link: &mut UdpLink) -> bool {
        let deadline = Instant::now() + Duration::from_secs(2);
        while Instant::now() < deadline {
            if link.byte_available() {
                return true;
            }
            std::thread::sleep(Duration::from_millis(1));
        }
        false
    }

    #[test]
    fn test_bytes_cross_one_per_read() {
        let a_sock = UdpSocket::bind("127.0.0.1:0").unwrap();
        let b_sock = UdpSocket::bind("127.0.0.1:0").unwrap();
        let a_addr = a_sock.local_addr().unwrap();
        let b_addr = b_sock.local_addr().unwrap();
        drop((a_sock, b_sock));

        let mut a = UdpLink::connect(a_addr, b_addr).unwrap();
        let mut b = UdpLink::connect(b_addr, a_addr).unwrap();
        assert!(!b.byte_available());

        a.write_byte(b'c');
        a.write_byte(b'w');
        assert!(wait_for_byte(&mut b));
        assert_eq!(b.read_byte(), b'c');
        assert!(wait_for_byte(&mut b));
        assert_eq!(b.read_byte(), b'w');
    }
}
