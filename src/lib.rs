//! Client for the Google Cast v2 protocol.
//!
//! A channel is one TLS connection to a receiver carrying length-prefixed
//! protobuf envelopes. Logical "virtual connections" to the platform and
//! to each launched application multiplex over it, and correlated
//! request/response pairs ride on per-channel monotonic request ids. The
//! [`Client`] facade exposes the receiver operations (status, launch,
//! stop, volume, app availability) and media operations (load, play,
//! pause, seek, status) as blocking calls; spontaneous receiver traffic
//! arrives on the [`Events`] stream.
//!
//! ```no_run
//! use std::net::SocketAddr;
//!
//! use cast_sender::{Client, Config, MediaInformation, LoadOptions};
//!
//! let addr: SocketAddr = "192.168.1.20:8009".parse().unwrap();
//! let (client, _events) = Client::connect_addr(addr, &Config::default()).unwrap();
//! let app = client.launch(cast_sender::DEFAULT_MEDIA_RECEIVER_APP_ID).unwrap();
//! let media = MediaInformation::buffered("http://192.168.1.2/track.mp3", "audio/mpeg");
//! let status = client.load(&app, media, LoadOptions::default()).unwrap();
//! client.pause(&app, status.media_session_id).unwrap();
//! ```

#[macro_use]
extern crate log;
#[macro_use]
extern crate nom;

use std::time::Duration;

use native_tls::TlsConnector;

mod channel;
mod client;
mod codec;
mod connection;
mod device;
mod error;
pub mod payload;
#[allow(clippy::all, clippy::pedantic)]
mod proto;

pub use crate::channel::{Channel, CloseReason, Event, Events, Transport, DEFAULT_RECEIVER_ID};
pub use crate::client::{Client, LoadOptions, DEFAULT_MEDIA_RECEIVER_APP_ID};
pub use crate::device::{
    Capabilities, Capability, CastDevice, DeviceType, ServiceRecord, DEFAULT_PORT, SERVICE_TYPE,
};
pub use crate::error::{Error, ReceiverErrorKind};
pub use crate::payload::connection::ConnectionType;
pub use crate::payload::media::{MediaInformation, MediaMetadata, MediaStatus, PlayerState};
pub use crate::payload::receiver::{Application, ReceiverStatus, Volume};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Channel tunables. `Default` matches what receivers expect from a
/// well-behaved sender.
#[derive(Clone)]
pub struct Config {
    /// Send a PING when nothing was written for this long.
    pub heartbeat_interval: Duration,
    /// Declare the channel dead when nothing was received for this long.
    pub liveness_timeout: Duration,
    /// Default deadline for correlated requests.
    pub request_timeout: Duration,
    /// `userAgent` advertised in CONNECT messages.
    pub user_agent: Option<String>,
    /// `connType` advertised in CONNECT messages.
    pub connection_type: Option<ConnectionType>,
    /// Capacity of the event queue. Events beyond it are dropped rather
    /// than stalling the reader.
    pub event_queue: usize,
    /// Connector override for callers that want to pin the receiver's
    /// certificate. The default accepts the self-signed identities cast
    /// devices present.
    pub tls: Option<TlsConnector>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            heartbeat_interval: Duration::from_secs(5),
            liveness_timeout: Duration::from_secs(30),
            request_timeout: Duration::from_secs(30),
            user_agent: Some(USER_AGENT.to_owned()),
            connection_type: Some(ConnectionType::Strong),
            event_queue: 64,
            tls: None,
        }
    }
}
