//! Growl network protocol module
//!
//! Packet codec plus a UDP notification center that talks to a remote
//! (or local) daemon.

pub mod packet;
mod udp;

pub use packet::{DecodedPacket, PacketCodec, PacketError, PacketType, GROWL_UDP_PORT};
pub use udp::UdpNotificationCenter;
