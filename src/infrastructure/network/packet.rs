//! Growl network packet codec
//!
//! Packet layout (all integers big-endian, strings UTF-8):
//!
//! ```text
//! registration: u8 version | u8 type | u16 app_len | u8 n_all | u8 n_default
//!               | app | (u16 len | name) * n_all | u8 index * n_default | digest
//! notification: u8 version | u8 type | u16 flags | u16 name_len | u16 title_len
//!               | u16 desc_len | u16 app_len | name | title | desc | app | digest
//! ```
//!
//! The digest covers everything before it followed by the password.

use bytes::{Buf, BufMut, Bytes, BytesMut};
use md5::Md5;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::warn;

use crate::domain::config::AuthMethod;
use crate::domain::notification::{GrowlMessage, NotificationRecord, Priority, RegistrationRecord};

pub const GROWL_PROTOCOL_VERSION: u8 = 1;

pub const GROWL_UDP_PORT: u16 = 9887;

const MD5_DIGEST_LEN: usize = 16;
const SHA256_DIGEST_LEN: usize = 32;
const FLAG_STICKY: u16 = 0x0001;
const FLAG_PRIORITY_NEGATIVE: u16 = 0x0008;

/// Errors while building or reading a packet
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PacketError {
    #[error("Too many notifications: {0} (at most 255 fit in a packet)")]
    TooManyNotifications(usize),

    #[error("Field '{field}' is {len} bytes long (at most 65535)")]
    FieldTooLong { field: &'static str, len: usize },

    #[error("Packet truncated")]
    Truncated,

    #[error("Unsupported protocol version {0}")]
    UnsupportedVersion(u8),

    #[error("Unknown packet type {0}")]
    UnknownType(u8),

    #[error("Packet digest does not match")]
    DigestMismatch,

    #[error("Packet field is not valid UTF-8")]
    InvalidUtf8,

    #[error("Default notification index {0} is out of range")]
    InvalidDefaultIndex(u8),

    #[error("Priority bits {0:#x} do not name a priority")]
    InvalidPriority(u16),
}

/// Packet type byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PacketType {
    Registration,
    Notification,
    RegistrationSha256,
    NotificationSha256,
    RegistrationNoAuth,
    NotificationNoAuth,
}

impl PacketType {
    pub const fn code(&self) -> u8 {
        match self {
            Self::Registration => 0,
            Self::Notification => 1,
            Self::RegistrationSha256 => 2,
            Self::NotificationSha256 => 3,
            Self::RegistrationNoAuth => 4,
            Self::NotificationNoAuth => 5,
        }
    }

    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Registration),
            1 => Some(Self::Notification),
            2 => Some(Self::RegistrationSha256),
            3 => Some(Self::NotificationSha256),
            4 => Some(Self::RegistrationNoAuth),
            5 => Some(Self::NotificationNoAuth),
            _ => None,
        }
    }

    pub const fn registration(auth: AuthMethod) -> Self {
        match auth {
            AuthMethod::Md5 => Self::Registration,
            AuthMethod::Sha256 => Self::RegistrationSha256,
            AuthMethod::None => Self::RegistrationNoAuth,
        }
    }

    pub const fn notification(auth: AuthMethod) -> Self {
        match auth {
            AuthMethod::Md5 => Self::Notification,
            AuthMethod::Sha256 => Self::NotificationSha256,
            AuthMethod::None => Self::NotificationNoAuth,
        }
    }

    pub const fn auth(&self) -> AuthMethod {
        match self {
            Self::Registration | Self::Notification => AuthMethod::Md5,
            Self::RegistrationSha256 | Self::NotificationSha256 => AuthMethod::Sha256,
            Self::RegistrationNoAuth | Self::NotificationNoAuth => AuthMethod::None,
        }
    }

    pub const fn is_registration(&self) -> bool {
        matches!(
            self,
            Self::Registration | Self::RegistrationSha256 | Self::RegistrationNoAuth
        )
    }
}

/// Encode priority and sticky into the notification flags word
pub fn notification_flags(priority: Priority, sticky: bool) -> u16 {
    let value = i16::from(priority.value());
    let mut flags = ((value & 0x07) as u16) << 1;
    if value < 0 {
        flags |= FLAG_PRIORITY_NEGATIVE;
    }
    if sticky {
        flags |= FLAG_STICKY;
    }
    flags
}

/// Split a notification flags word into priority and sticky
pub fn parse_flags(flags: u16) -> Result<(Priority, bool), PacketError> {
    let raw = ((flags >> 1) & 0x07) as i64;
    let value = if raw & 0x04 != 0 { raw - 8 } else { raw };
    let priority = Priority::from_value(value).ok_or(PacketError::InvalidPriority(flags))?;
    Ok((priority, flags & FLAG_STICKY != 0))
}

/// Contents of a decoded packet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedPacket {
    Registration {
        application_name: String,
        all_notifications: Vec<String>,
        default_notifications: Vec<String>,
    },
    Notification {
        application_name: String,
        name: String,
        title: String,
        description: String,
        priority: Priority,
        sticky: bool,
    },
}

/// Encodes and decodes packets for one authentication setup
#[derive(Debug, Clone)]
pub struct PacketCodec {
    auth: AuthMethod,
    password: Option<String>,
}

impl PacketCodec {
    pub fn new(auth: AuthMethod, password: Option<String>) -> Self {
        Self { auth, password }
    }

    pub fn auth(&self) -> AuthMethod {
        self.auth
    }

    /// Encode either kind of record. Icons are never sent over the network.
    pub fn encode(&self, message: &GrowlMessage) -> Result<Bytes, PacketError> {
        match message {
            GrowlMessage::Registration(r) => self.encode_registration(r),
            GrowlMessage::Notification(n) => self.encode_notification(n),
        }
    }

    pub fn encode_registration(&self, record: &RegistrationRecord) -> Result<Bytes, PacketError> {
        let all = &record.all_notifications;
        if all.len() > usize::from(u8::MAX) {
            return Err(PacketError::TooManyNotifications(all.len()));
        }

        let defaults: Vec<u8> = record
            .default_notifications
            .iter()
            .filter_map(|name| match all.iter().position(|n| n == name) {
                Some(idx) => Some(idx as u8),
                None => {
                    warn!(notification = %name, "Default notification is not registered, skipping");
                    None
                }
            })
            .collect();
        if defaults.len() > usize::from(u8::MAX) {
            return Err(PacketError::TooManyNotifications(defaults.len()));
        }

        let app = record.application_name.as_bytes();
        let mut buf = BytesMut::with_capacity(6 + app.len() + all.len() * 8 + defaults.len());
        buf.put_u8(GROWL_PROTOCOL_VERSION);
        buf.put_u8(PacketType::registration(self.auth).code());
        buf.put_u16(field_len("application", app)?);
        buf.put_u8(all.len() as u8);
        buf.put_u8(defaults.len() as u8);
        buf.put_slice(app);
        for name in all {
            let encoded = name.as_bytes();
            buf.put_u16(field_len("notification", encoded)?);
            buf.put_slice(encoded);
        }
        buf.put_slice(&defaults);

        Ok(self.seal(buf))
    }

    pub fn encode_notification(&self, record: &NotificationRecord) -> Result<Bytes, PacketError> {
        let name = record.name.as_bytes();
        let title = record.title.as_bytes();
        let description = record.description.as_bytes();
        let app = record.application_name.as_bytes();

        let mut buf = BytesMut::with_capacity(
            12 + name.len() + title.len() + description.len() + app.len(),
        );
        buf.put_u8(GROWL_PROTOCOL_VERSION);
        buf.put_u8(PacketType::notification(self.auth).code());
        buf.put_u16(notification_flags(
            record.priority_or_default(),
            record.is_sticky(),
        ));
        buf.put_u16(field_len("notification", name)?);
        buf.put_u16(field_len("title", title)?);
        buf.put_u16(field_len("description", description)?);
        buf.put_u16(field_len("application", app)?);
        buf.put_slice(name);
        buf.put_slice(title);
        buf.put_slice(description);
        buf.put_slice(app);

        Ok(self.seal(buf))
    }

    /// Decode a packet and verify its digest against this codec's password
    pub fn decode(&self, packet: &[u8]) -> Result<DecodedPacket, PacketError> {
        if packet.len() < 2 {
            return Err(PacketError::Truncated);
        }
        if packet[0] != GROWL_PROTOCOL_VERSION {
            return Err(PacketError::UnsupportedVersion(packet[0]));
        }
        let packet_type = PacketType::from_code(packet[1]).ok_or(PacketError::UnknownType(packet[1]))?;

        let digest_len = digest_len(packet_type.auth());
        if packet.len() < 2 + digest_len {
            return Err(PacketError::Truncated);
        }
        let (body, received) = packet.split_at(packet.len() - digest_len);
        let expected = digest(packet_type.auth(), body, self.password.as_deref());
        if expected != received {
            return Err(PacketError::DigestMismatch);
        }

        let mut cursor = &body[2..];
        if packet_type.is_registration() {
            decode_registration(&mut cursor)
        } else {
            decode_notification(&mut cursor)
        }
    }

    fn seal(&self, mut buf: BytesMut) -> Bytes {
        let checksum = digest(self.auth, &buf, self.password.as_deref());
        buf.put_slice(&checksum);
        buf.freeze()
    }
}

fn field_len(field: &'static str, data: &[u8]) -> Result<u16, PacketError> {
    u16::try_from(data.len()).map_err(|_| PacketError::FieldTooLong {
        field,
        len: data.len(),
    })
}

fn digest_len(auth: AuthMethod) -> usize {
    match auth {
        AuthMethod::Md5 => MD5_DIGEST_LEN,
        AuthMethod::Sha256 => SHA256_DIGEST_LEN,
        AuthMethod::None => 0,
    }
}

fn digest(auth: AuthMethod, body: &[u8], password: Option<&str>) -> Vec<u8> {
    let password = password.filter(|p| !p.is_empty()).unwrap_or_default();
    match auth {
        AuthMethod::Md5 => {
            let mut hasher = Md5::new();
            hasher.update(body);
            hasher.update(password.as_bytes());
            hasher.finalize().to_vec()
        }
        AuthMethod::Sha256 => {
            let mut hasher = Sha256::new();
            hasher.update(body);
            hasher.update(password.as_bytes());
            hasher.finalize().to_vec()
        }
        AuthMethod::None => Vec::new(),
    }
}

fn read_u8(cursor: &mut &[u8]) -> Result<u8, PacketError> {
    if cursor.remaining() < 1 {
        return Err(PacketError::Truncated);
    }
    Ok(cursor.get_u8())
}

fn read_u16(cursor: &mut &[u8]) -> Result<u16, PacketError> {
    if cursor.remaining() < 2 {
        return Err(PacketError::Truncated);
    }
    Ok(cursor.get_u16())
}

fn read_string(cursor: &mut &[u8], len: usize) -> Result<String, PacketError> {
    if cursor.remaining() < len {
        return Err(PacketError::Truncated);
    }
    let data: &[u8] = *cursor;
    let (head, tail) = data.split_at(len);
    let value = std::str::from_utf8(head).map_err(|_| PacketError::InvalidUtf8)?;
    *cursor = tail;
    Ok(value.to_string())
}

fn decode_registration(cursor: &mut &[u8]) -> Result<DecodedPacket, PacketError> {
    let app_len = read_u16(cursor)?;
    let n_all = read_u8(cursor)?;
    let n_default = read_u8(cursor)?;
    let application_name = read_string(cursor, usize::from(app_len))?;

    let mut all_notifications = Vec::with_capacity(usize::from(n_all));
    for _ in 0..n_all {
        let len = read_u16(cursor)?;
        all_notifications.push(read_string(cursor, usize::from(len))?);
    }

    let mut default_notifications = Vec::with_capacity(usize::from(n_default));
    for _ in 0..n_default {
        let idx = read_u8(cursor)?;
        let name = all_notifications
            .get(usize::from(idx))
            .ok_or(PacketError::InvalidDefaultIndex(idx))?;
        default_notifications.push(name.clone());
    }

    Ok(DecodedPacket::Registration {
        application_name,
        all_notifications,
        default_notifications,
    })
}

fn decode_notification(cursor: &mut &[u8]) -> Result<DecodedPacket, PacketError> {
    let flags = read_u16(cursor)?;
    let name_len = read_u16(cursor)?;
    let title_len = read_u16(cursor)?;
    let desc_len = read_u16(cursor)?;
    let app_len = read_u16(cursor)?;
    let (priority, sticky) = parse_flags(flags)?;

    Ok(DecodedPacket::Notification {
        name: read_string(cursor, usize::from(name_len))?,
        title: read_string(cursor, usize::from(title_len))?,
        description: read_string(cursor, usize::from(desc_len))?,
        application_name: read_string(cursor, usize::from(app_len))?,
        priority,
        sticky,
    })
}
