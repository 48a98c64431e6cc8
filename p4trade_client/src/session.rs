//! Raw-frame transport session.
//!
//! A `Session` owns a datalink channel bound to one named interface for the
//! process lifetime and exposes a single blocking `request` operation: send
//! one Ethernet frame, then wait for one matching response or a timeout.
//! There is no retry and no concurrent outstanding request; the channel's own
//! read timeout is used as a short poll tick so the wait can observe its
//! deadline.
use std::io::ErrorKind;
use std::time::{Duration, Instant};

use log::{debug, info};
use pnet::datalink::{self, Channel, Config, DataLinkReceiver, DataLinkSender};
use pnet::packet::ethernet::{EtherType, EthernetPacket, MutableEthernetPacket};
use pnet::packet::{MutablePacket, Packet};
use pnet::util::MacAddr;

use p4trade_common::net;
use p4trade_common::{Result, TradeError};

/// Poll tick for the receive side; bounds how late a timeout can fire.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Ethernet header size preceding the payload in every frame.
const ETHERNET_HEADER_LEN: usize = 14;

/// The fixed destination MAC as a `pnet` address value.
pub fn destination_mac() -> MacAddr {
    let [a, b, c, d, e, f] = net::DEST_MAC;
    MacAddr::new(a, b, c, d, e, f)
}

/// A raw datalink channel bound to one interface.
pub struct Session {
    local_mac: MacAddr,
    tx: Box<dyn DataLinkSender>,
    rx: Box<dyn DataLinkReceiver>,
}

impl Session {
    /// Binds a raw channel on the named interface.
    ///
    /// Fails with `InterfaceNotFound` when no interface carries that name and
    /// with `PermissionDenied` when the host refuses raw access to it.
    pub fn open(interface_name: &str) -> Result<Self> {
        let interface = datalink::interfaces()
            .into_iter()
            .find(|candidate| candidate.name == interface_name)
            .ok_or_else(|| TradeError::InterfaceNotFound(interface_name.to_string()))?;

        let config = Config {
            read_timeout: Some(POLL_INTERVAL),
            ..Config::default()
        };
        let (tx, rx) = match datalink::channel(&interface, config) {
            Ok(Channel::Ethernet(tx, rx)) => (tx, rx),
            Ok(_) => {
                return Err(TradeError::Transport(
                    "interface does not provide an Ethernet channel".to_string(),
                ));
            }
            Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                return Err(TradeError::PermissionDenied(interface_name.to_string()));
            }
            Err(e) => return Err(TradeError::Transport(e.to_string())),
        };

        let local_mac = interface.mac.unwrap_or(MacAddr::zero());
        info!("Raw session bound to {} ({})", interface.name, local_mac);
        Ok(Session { local_mac, tx, rx })
    }

    /// Sends one frame and waits for one matching response.
    ///
    /// The frame addresses `destination` with the given `ethertype` and
    /// carries `payload` verbatim. A captured frame matches when it arrives
    /// with the same ethertype, was not sent by this host, and its payload
    /// begins with the protocol magic; the first match is returned as
    /// `Some(payload)`. When `timeout` elapses without a match the call
    /// returns `Ok(None)` — no response is a normal outcome, not an error.
    /// Frames that fail envelope parsing are skipped and the wait continues.
    pub fn request(
        &mut self,
        payload: &[u8],
        destination: MacAddr,
        ethertype: EtherType,
        timeout: Duration,
    ) -> Result<Option<Vec<u8>>> {
        let mut buf = vec![0u8; ETHERNET_HEADER_LEN + payload.len()];
        {
            let mut frame = MutableEthernetPacket::new(&mut buf).ok_or_else(|| {
                TradeError::Transport("frame buffer too small for an Ethernet header".to_string())
            })?;
            frame.set_destination(destination);
            frame.set_source(self.local_mac);
            frame.set_ethertype(ethertype);
            frame.set_payload(payload);
        }

        match self.tx.send_to(&buf, None) {
            Some(Ok(())) => {}
            Some(Err(e)) => return Err(TradeError::Transport(e.to_string())),
            None => {
                return Err(TradeError::Transport(
                    "channel cannot transmit pre-addressed frames".to_string(),
                ));
            }
        }
        debug!(
            "sent {} payload bytes to {destination}, waiting up to {timeout:?}",
            payload.len()
        );

        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            match self.rx.next() {
                Ok(captured) => {
                    let Some(envelope) = EthernetPacket::new(captured) else {
                        debug!("skipping runt frame ({} bytes)", captured.len());
                        continue;
                    };
                    if envelope.get_ethertype() != ethertype
                        || envelope.get_source() == self.local_mac
                    {
                        continue;
                    }
                    let reply = envelope.payload();
                    if reply.len() >= net::MAGIC.len() && reply[..net::MAGIC.len()] == net::MAGIC {
                        debug!("matched response from {}", envelope.get_source());
                        return Ok(Some(reply.to_vec()));
                    }
                }
                Err(e)
                    if matches!(
                        e.kind(),
                        ErrorKind::TimedOut | ErrorKind::WouldBlock | ErrorKind::Interrupted
                    ) => {}
                Err(e) => return Err(TradeError::Transport(e.to_string())),
            }
        }
        Ok(None)
    }
}
