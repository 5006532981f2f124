//! The cast channel: one TLS transport multiplexing virtual connections.
//!
//! The transport sits behind a single mutex. A dedicated reader thread
//! polls it with a short read timeout and buffers partial frames, so the
//! lock is free for writers most of the time and framed bytes never
//! interleave. A second thread drives the heartbeat and the liveness
//! check. Correlated requests park on one-shot completion slots until the
//! reader delivers the matching response.

use std::collections::HashMap;
use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use bytes::BytesMut;
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TrySendError};
use native_tls::{HandshakeError, TlsConnector, TlsStream};
use rand::Rng;
use serde::Serialize;

use crate::codec::{CastMessageCodec, MessageBuilder};
use crate::connection::VirtualConnections;
use crate::error::{Error, ReceiverErrorKind};
use crate::payload::{self, connection, heartbeat, media, multizone, receiver};
use crate::proto;
use crate::Config;

/// Destination id of the platform receiver.
pub const DEFAULT_RECEIVER_ID: &str = "receiver-0";

/// How long a blocking read may park before the reader re-checks for
/// shutdown and lets writers at the stream.
const READ_POLL_TIMEOUT: Duration = Duration::from_millis(50);
const READ_CHUNK_SIZE: usize = 8 * 1024;

/// Byte stream a channel can run over. TLS against a live receiver, a
/// plain socket against a test peer.
pub trait Transport: Read + Write + Send {
    /// Bound the next blocking read so the stream mutex is released
    /// periodically.
    fn set_read_timeout(&mut self, timeout: Option<Duration>) -> io::Result<()>;
}

impl Transport for TcpStream {
    fn set_read_timeout(&mut self, timeout: Option<Duration>) -> io::Result<()> {
        TcpStream::set_read_timeout(self, timeout)
    }
}

impl Transport for TlsStream<TcpStream> {
    fn set_read_timeout(&mut self, timeout: Option<Duration>) -> io::Result<()> {
        self.get_ref().set_read_timeout(timeout)
    }
}

/// Spontaneous traffic surfaced to the application.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    ReceiverStatus(receiver::ReceiverStatus),
    MediaStatus(Vec<media::MediaStatus>),
    MultizoneStatus(multizone::MultizoneStatus),
    DeviceAdded(multizone::MultizoneDevice),
    DeviceUpdated(multizone::MultizoneDevice),
    DeviceRemoved(String),
    ReceiverError {
        kind: ReceiverErrorKind,
        reason: Option<String>,
    },
    Closed(CloseReason),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CloseReason {
    /// Closed locally.
    Shutdown,
    /// Nothing was received within the liveness timeout.
    Dead,
    /// The transport failed or hit EOF.
    Transport(String),
}

/// Stream of [`Event`]s for one channel. Reading from it never blocks the
/// channel; a full queue drops events instead.
pub type Events = Receiver<Event>;

struct PendingRequest {
    destination: String,
    slot: Sender<Result<payload::Response, Error>>,
}

struct Io {
    transport: Box<dyn Transport>,
    encoder: CastMessageCodec,
    write_buf: BytesMut,
    next_request_id: u64,
}

struct Shared {
    source_id: String,
    config: Config,
    io: Mutex<Io>,
    pending: Mutex<HashMap<u64, PendingRequest>>,
    connections: Mutex<VirtualConnections>,
    last_read: Mutex<Instant>,
    last_write: Mutex<Instant>,
    closed: AtomicBool,
    ticker: Mutex<()>,
    ticker_cvar: Condvar,
    events: Sender<Event>,
}

/// A live connection to one receiver. All methods are safe to call from
/// multiple threads.
pub struct Channel {
    shared: Arc<Shared>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Channel {
    /// Open a TLS connection to `addr` and start the channel. Receivers
    /// present self-signed certificates, so unless [`Config::tls`] supplies
    /// a pinning connector the peer is accepted without CA validation.
    pub fn connect(addr: SocketAddr, config: &Config) -> Result<(Channel, Events), Error> {
        let connector = match config.tls.clone() {
            Some(connector) => connector,
            None => TlsConnector::builder()
                .danger_accept_invalid_hostnames(true)
                .danger_accept_invalid_certs(true)
                .build()?,
        };
        let socket = TcpStream::connect(addr)?;
        info!("establishing TLS connection to {:?}", addr);
        let stream = connector
            .connect(&addr.ip().to_string(), socket)
            .map_err(|err| match err {
                HandshakeError::Failure(err) => Error::Tls(err),
                HandshakeError::WouldBlock(_) => Error::Transport(io::Error::new(
                    io::ErrorKind::WouldBlock,
                    "TLS handshake interrupted",
                )),
            })?;
        info!("TLS connection established");
        Channel::from_transport(stream, config)
    }

    /// Start a channel over an already established transport, spawning the
    /// reader and heartbeat threads. Returns the channel and its event
    /// stream.
    pub fn from_transport<T>(mut transport: T, config: &Config) -> Result<(Channel, Events), Error>
    where
        T: Transport + 'static,
    {
        transport.set_read_timeout(Some(READ_POLL_TIMEOUT))?;
        let (events, events_rx) = bounded(config.event_queue);
        let source_id = format!("sender-{:08x}", rand::thread_rng().gen::<u32>());
        debug!("starting channel with source id {}", source_id);
        let shared = Arc::new(Shared {
            source_id,
            config: config.clone(),
            io: Mutex::new(Io {
                transport: Box::new(transport),
                encoder: CastMessageCodec::default(),
                write_buf: BytesMut::new(),
                next_request_id: 1,
            }),
            pending: Mutex::new(HashMap::new()),
            connections: Mutex::new(VirtualConnections::default()),
            last_read: Mutex::new(Instant::now()),
            last_write: Mutex::new(Instant::now()),
            closed: AtomicBool::new(false),
            ticker: Mutex::new(()),
            ticker_cvar: Condvar::new(),
            events,
        });

        let reader = Arc::clone(&shared);
        thread::Builder::new()
            .name("cast-reader".to_owned())
            .spawn(move || read_loop(&reader))?;
        let keepalive = Arc::clone(&shared);
        thread::Builder::new()
            .name("cast-heartbeat".to_owned())
            .spawn(move || heartbeat_loop(&keepalive))?;

        Ok((Channel { shared }, events_rx))
    }

    /// The sender id this channel stamps on outbound envelopes.
    pub fn source_id(&self) -> &str {
        &self.shared.source_id
    }

    pub fn is_closed(&self) -> bool {
        self.shared.closed.load(Ordering::SeqCst)
    }

    /// Open the virtual connection to `destination` if it is not open yet.
    /// Must precede any non-connection traffic to that destination.
    pub fn ensure_connection(&self, destination: &str) -> Result<(), Error> {
        self.shared.ensure_connection(destination)
    }

    /// Close the virtual connection to `destination`. Idempotent.
    pub fn close_connection(&self, destination: &str) -> Result<(), Error> {
        self.shared.close_connection(destination)
    }

    /// Send a correlated request and wait for the matching response, up to
    /// the configured request timeout.
    pub fn request<R>(
        &self,
        namespace: &str,
        destination: &str,
        request: &R,
    ) -> Result<payload::Response, Error>
    where
        R: Serialize,
    {
        self.request_with_timeout(namespace, destination, request, self.shared.config.request_timeout)
    }

    pub fn request_with_timeout<R>(
        &self,
        namespace: &str,
        destination: &str,
        request: &R,
        timeout: Duration,
    ) -> Result<payload::Response, Error>
    where
        R: Serialize,
    {
        let (slot, completion) = bounded(1);
        let request_id = self
            .shared
            .write_request(namespace, destination, request, slot)?;
        match completion.recv_timeout(timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => {
                // Deregister; a late response for this id becomes an event.
                lock(&self.shared.pending).remove(&request_id);
                Err(Error::Timeout(timeout))
            }
            Err(RecvTimeoutError::Disconnected) => Err(Error::ConnectionClosed),
        }
    }

    /// Send a message that expects no response.
    pub fn send<R>(&self, namespace: &str, destination: &str, payload: &R) -> Result<(), Error>
    where
        R: Serialize,
    {
        if self.is_closed() {
            return Err(Error::ConnectionClosed);
        }
        let mut io = lock(&self.shared.io);
        self.shared
            .write_message(&mut io, namespace, destination, payload)
    }

    /// Close the channel: CLOSE every open virtual connection, fail all
    /// pending requests, stop both background threads.
    pub fn close(&self) {
        self.shared.shutdown();
    }
}

impl Drop for Channel {
    fn drop(&mut self) {
        self.close();
    }
}

impl Shared {
    fn ensure_connection(&self, destination: &str) -> Result<(), Error> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(Error::ConnectionClosed);
        }
        let mut io = lock(&self.io);
        let newly_open = lock(&self.connections).open(&self.source_id, destination);
        if newly_open {
            debug!("connecting to transport {}", destination);
            let request = connection::Request::connect(
                self.config.user_agent.clone(),
                self.config.connection_type,
            );
            self.write_message(&mut io, connection::NAMESPACE, destination, &request)?;
        }
        Ok(())
    }

    fn close_connection(&self, destination: &str) -> Result<(), Error> {
        if self.closed.load(Ordering::SeqCst) {
            return Ok(());
        }
        let mut io = lock(&self.io);
        if lock(&self.connections).close(&self.source_id, destination) {
            debug!("closing transport {}", destination);
            self.write_message(
                &mut io,
                connection::NAMESPACE,
                destination,
                &connection::Request::close(),
            )?;
        }
        Ok(())
    }

    /// Allocate the next request id and write a correlated request. The id
    /// is taken under the io lock, so ids observed on the wire are strictly
    /// increasing.
    fn write_request<R>(
        &self,
        namespace: &str,
        destination: &str,
        request: &R,
        slot: Sender<Result<payload::Response, Error>>,
    ) -> Result<u64, Error>
    where
        R: Serialize,
    {
        if self.closed.load(Ordering::SeqCst) {
            return Err(Error::ConnectionClosed);
        }
        let mut value = serde_json::to_value(request)?;
        if !value.is_object() {
            return Err(Error::protocol("request payload must be a JSON object"));
        }

        let mut io = lock(&self.io);
        let request_id = io.next_request_id;
        io.next_request_id += 1;
        if let Some(object) = value.as_object_mut() {
            object.insert("requestId".to_owned(), serde_json::Value::from(request_id));
        }
        let body = serde_json::to_string(&value)?;

        {
            let mut pending = lock(&self.pending);
            if self.closed.load(Ordering::SeqCst) {
                return Err(Error::ConnectionClosed);
            }
            pending.insert(
                request_id,
                PendingRequest {
                    destination: destination.to_owned(),
                    slot,
                },
            );
        }

        let message = MessageBuilder::default()
            .namespace(namespace)
            .source(&self.source_id)
            .destination(destination)
            .raw_payload(body)
            .into_message();
        if let Err(err) = self.write_frame(&mut io, &message) {
            lock(&self.pending).remove(&request_id);
            return Err(err);
        }
        trace!("sent request {} on {} to {}", request_id, namespace, destination);
        Ok(request_id)
    }

    fn write_message<R>(
        &self,
        io: &mut Io,
        namespace: &str,
        destination: &str,
        payload: &R,
    ) -> Result<(), Error>
    where
        R: Serialize,
    {
        let message = MessageBuilder::default()
            .namespace(namespace)
            .source(&self.source_id)
            .destination(destination)
            .payload(payload)?
            .into_message();
        self.write_frame(io, &message)
    }

    fn write_frame(&self, io: &mut Io, message: &proto::CastMessage) -> Result<(), Error> {
        if let Err(err) = try_write(io, message) {
            warn!("write failed: {}", err);
            self.fail(CloseReason::Transport(err.to_string()));
            return Err(Error::Transport(err));
        }
        *lock(&self.last_write) = Instant::now();
        Ok(())
    }

    fn pong(&self, destination: &str) -> Result<(), Error> {
        self.ensure_connection(destination)?;
        let mut io = lock(&self.io);
        self.write_message(&mut io, heartbeat::NAMESPACE, destination, &heartbeat::Request::Pong)
    }

    fn ping(&self) -> Result<(), Error> {
        self.ensure_connection(DEFAULT_RECEIVER_ID)?;
        let mut io = lock(&self.io);
        trace!("heartbeat sending PING");
        self.write_message(
            &mut io,
            heartbeat::NAMESPACE,
            DEFAULT_RECEIVER_ID,
            &heartbeat::Request::Ping,
        )
    }

    /// A receiver closed one virtual connection. Requests addressed to
    /// that transport fail; the channel itself stays up.
    fn on_close_received(&self, remote: &str) {
        warn!("virtual connection to {} closed by receiver", remote);
        lock(&self.connections).close(&self.source_id, remote);
        let mut pending = lock(&self.pending);
        let stale: Vec<u64> = pending
            .iter()
            .filter(|(_, entry)| entry.destination == remote)
            .map(|(id, _)| *id)
            .collect();
        for id in stale {
            if let Some(entry) = pending.remove(&id) {
                let _ = entry.slot.try_send(Err(Error::ConnectionClosed));
            }
        }
    }

    /// Graceful teardown: CLOSE every open key, then fail the channel.
    fn shutdown(&self) {
        if self.closed.load(Ordering::SeqCst) {
            return;
        }
        {
            let mut io = lock(&self.io);
            for (source, destination) in lock(&self.connections).drain() {
                let builder = MessageBuilder::default()
                    .namespace(connection::NAMESPACE)
                    .source(&source)
                    .destination(&destination)
                    .payload(&connection::Request::close());
                if let Ok(builder) = builder {
                    let _ = self.write_frame(&mut io, &builder.into_message());
                }
            }
        }
        self.fail(CloseReason::Shutdown);
    }

    /// Mark the channel closed exactly once: complete every pending
    /// request with `ConnectionClosed`, emit the close event, wake the
    /// heartbeat thread.
    fn fail(&self, reason: CloseReason) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        debug!("channel closed: {:?}", reason);
        let entries: Vec<PendingRequest> = {
            let mut pending = lock(&self.pending);
            pending.drain().map(|(_, entry)| entry).collect()
        };
        for entry in entries {
            let _ = entry.slot.try_send(Err(Error::ConnectionClosed));
        }
        if let Err(TrySendError::Full(event)) = self.events.try_send(Event::Closed(reason)) {
            warn!("event queue full; dropping {:?}", event);
        }
        let _guard = lock(&self.ticker);
        self.ticker_cvar.notify_all();
    }

    fn deliver_event(&self, response: payload::Response) {
        let event = match response.into_result() {
            Err(Error::Receiver { kind, reason, .. }) => Event::ReceiverError { kind, reason },
            Err(_) => return,
            Ok(payload::Response::Receiver(receiver::Response::ReceiverStatus {
                status, ..
            })) => Event::ReceiverStatus(status),
            Ok(payload::Response::Media(media::Response::MediaStatus { status, .. })) => {
                Event::MediaStatus(status)
            }
            Ok(payload::Response::Multizone(multizone::Response::MultizoneStatus {
                status,
                ..
            })) => Event::MultizoneStatus(status),
            Ok(payload::Response::Multizone(multizone::Response::DeviceAdded {
                device, ..
            })) => Event::DeviceAdded(device),
            Ok(payload::Response::Multizone(multizone::Response::DeviceUpdated {
                device, ..
            })) => Event::DeviceUpdated(device),
            Ok(payload::Response::Multizone(multizone::Response::DeviceRemoved {
                device_id,
                ..
            })) => Event::DeviceRemoved(device_id),
            Ok(payload::Response::Unknown { namespace, .. }) => {
                debug!("ignoring message on unknown channel {}", namespace);
                return;
            }
            Ok(_) => return,
        };
        match self.events.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => warn!("event queue full; dropping {:?}", event),
            Err(TrySendError::Disconnected(_)) => {}
        }
    }
}

fn try_write(io: &mut Io, message: &proto::CastMessage) -> io::Result<()> {
    let Io {
        ref mut transport,
        ref mut encoder,
        ref mut write_buf,
        ..
    } = *io;
    write_buf.clear();
    encoder.encode(message, write_buf)?;
    transport.write_all(&write_buf[..])?;
    transport.flush()
}

fn is_read_timeout(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
    )
}

fn read_loop(shared: &Arc<Shared>) {
    let mut decoder = CastMessageCodec::default();
    let mut buf = BytesMut::new();
    let mut chunk = [0_u8; READ_CHUNK_SIZE];
    loop {
        if shared.closed.load(Ordering::SeqCst) {
            return;
        }
        let read = {
            let mut io = lock(&shared.io);
            io.transport.read(&mut chunk)
        };
        let n = match read {
            Ok(0) => {
                let detail = if decoder.is_mid_frame(&buf) {
                    "EOF mid-frame"
                } else {
                    "EOF"
                };
                shared.fail(CloseReason::Transport(detail.to_owned()));
                return;
            }
            Ok(n) => n,
            Err(ref err) if is_read_timeout(err) => continue,
            Err(err) => {
                if !shared.closed.load(Ordering::SeqCst) {
                    shared.fail(CloseReason::Transport(err.to_string()));
                }
                return;
            }
        };
        buf.extend_from_slice(&chunk[..n]);
        loop {
            match decoder.decode(&mut buf) {
                Ok(Some(message)) => {
                    *lock(&shared.last_read) = Instant::now();
                    dispatch(shared, &message);
                }
                Ok(None) => break,
                Err(err) => {
                    shared.fail(CloseReason::Transport(err.to_string()));
                    return;
                }
            }
        }
    }
}

fn dispatch(shared: &Arc<Shared>, message: &proto::CastMessage) {
    if message.get_payload_type() == proto::CastMessage_PayloadType::BINARY {
        debug!(
            "ignoring binary payload on channel {}",
            message.get_namespace()
        );
        return;
    }
    let namespace = message.get_namespace();
    let response = match payload::Response::parse(namespace, message.get_payload_utf8()) {
        Ok(response) => response,
        Err(err) => {
            warn!("dropping malformed payload on {}: {}", namespace, err);
            return;
        }
    };
    match response {
        payload::Response::Heartbeat(heartbeat::Response::Ping) => {
            trace!("heartbeat got PING");
            if let Err(err) = shared.pong(message.get_source_id()) {
                warn!("failed to answer PING: {}", err);
            }
        }
        payload::Response::Heartbeat(_) => {
            trace!("heartbeat got PONG");
        }
        payload::Response::Connection(connection::Response::Close { .. }) => {
            shared.on_close_received(message.get_source_id());
        }
        payload::Response::Connection(_) => {}
        response => {
            let request_id = response.request_id();
            if request_id > 0 {
                if let Some(entry) = lock(&shared.pending).remove(&request_id) {
                    let _ = entry.slot.try_send(Ok(response));
                    return;
                }
            }
            shared.deliver_event(response);
        }
    }
}

fn heartbeat_loop(shared: &Arc<Shared>) {
    let interval = shared.config.heartbeat_interval;
    loop {
        {
            let guard = lock(&shared.ticker);
            let _ = shared.ticker_cvar.wait_timeout(guard, interval);
        }
        if shared.closed.load(Ordering::SeqCst) {
            return;
        }
        let idle_read = lock(&shared.last_read).elapsed();
        if idle_read >= shared.config.liveness_timeout {
            warn!(
                "nothing received in {:?}; closing channel as dead",
                idle_read
            );
            shared.fail(CloseReason::Dead);
            return;
        }
        let idle_write = lock(&shared.last_write).elapsed();
        if idle_write >= interval {
            if shared.ping().is_err() {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::thread;
    use std::time::{Duration, Instant};

    use bytes::BytesMut;

    use super::{Channel, CloseReason, Event, Events, DEFAULT_RECEIVER_ID};
    use crate::codec::{CastMessageCodec, MessageBuilder};
    use crate::error::Error;
    use crate::payload::{connection, heartbeat, receiver};
    use crate::proto;
    use crate::Config;

    /// In-process peer on the other end of a plain TCP stream.
    struct FakeReceiver {
        stream: TcpStream,
        decoder: CastMessageCodec,
        encoder: CastMessageCodec,
        buf: BytesMut,
    }

    impl FakeReceiver {
        fn new(stream: TcpStream) -> Self {
            FakeReceiver {
                stream,
                decoder: CastMessageCodec::default(),
                encoder: CastMessageCodec::default(),
                buf: BytesMut::new(),
            }
        }

        fn read_frame(&mut self) -> proto::CastMessage {
            loop {
                if let Some(message) = self.decoder.decode(&mut self.buf).unwrap() {
                    return message;
                }
                let mut chunk = [0_u8; 1024];
                let n = self.stream.read(&mut chunk).unwrap();
                assert!(n > 0, "sender closed the stream");
                self.buf.extend_from_slice(&chunk[..n]);
            }
        }

        fn try_read_frame(&mut self) -> Option<proto::CastMessage> {
            loop {
                if let Some(message) = self.decoder.decode(&mut self.buf).unwrap() {
                    return Some(message);
                }
                let mut chunk = [0_u8; 1024];
                match self.stream.read(&mut chunk) {
                    Ok(0) => return None,
                    Ok(n) => self.buf.extend_from_slice(&chunk[..n]),
                    Err(ref err) if super::is_read_timeout(err) => return None,
                    Err(err) => panic!("fake receiver read failed: {}", err),
                }
            }
        }

        fn write_json(&mut self, namespace: &str, destination: &str, payload: String) {
            let message = MessageBuilder::default()
                .namespace(namespace)
                .source(DEFAULT_RECEIVER_ID)
                .destination(destination)
                .raw_payload(payload)
                .into_message();
            let mut out = BytesMut::new();
            self.encoder.encode(&message, &mut out).unwrap();
            self.stream.write_all(&out).unwrap();
        }
    }

    fn config() -> Config {
        let mut config = Config::default();
        // Keep the background traffic quiet unless a test asks for it.
        config.heartbeat_interval = Duration::from_secs(60);
        config.liveness_timeout = Duration::from_secs(60);
        config.request_timeout = Duration::from_secs(2);
        config.event_queue = 16;
        config
    }

    fn pair(config: &Config) -> (Channel, Events, FakeReceiver) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let client = TcpStream::connect(addr).unwrap();
        let (server, _) = listener.accept().unwrap();
        let (channel, events) = Channel::from_transport(client, config).unwrap();
        (channel, events, FakeReceiver::new(server))
    }

    fn receiver_status_json(request_id: u64) -> String {
        format!(
            r#"{{"responseType":"RECEIVER_STATUS","requestId":{},"status":{{"volume":{{"level":0.5}}}}}}"#,
            request_id
        )
    }

    #[test]
    fn connect_precedes_traffic_and_request_ids_increase() {
        let config = config();
        let (channel, _events, mut server) = pair(&config);

        let worker = thread::spawn(move || {
            channel.ensure_connection(DEFAULT_RECEIVER_ID).unwrap();
            for _ in 0..2 {
                channel
                    .request(
                        receiver::NAMESPACE,
                        DEFAULT_RECEIVER_ID,
                        &receiver::Request::GetStatus,
                    )
                    .unwrap();
            }
            channel
        });

        let first = server.read_frame();
        assert_eq!(first.get_namespace(), connection::NAMESPACE);
        assert!(first.get_payload_utf8().contains("CONNECT"));
        let sender = first.get_source_id().to_owned();

        for expected_id in 1..=2_u64 {
            let frame = server.read_frame();
            assert_eq!(frame.get_namespace(), receiver::NAMESPACE);
            let body: serde_json::Value =
                serde_json::from_str(frame.get_payload_utf8()).unwrap();
            assert_eq!(body["type"], "GET_STATUS");
            assert_eq!(body["requestId"], expected_id);
            assert_eq!(frame.get_source_id(), sender);
            server.write_json(receiver::NAMESPACE, &sender, receiver_status_json(expected_id));
        }

        let channel = worker.join().unwrap();
        assert!(!channel.is_closed());
    }

    #[test]
    fn timeout_deregisters_and_late_response_becomes_event() {
        let mut config = config();
        config.request_timeout = Duration::from_millis(200);
        let (channel, events, mut server) = pair(&config);

        let worker = thread::spawn(move || {
            channel.ensure_connection(DEFAULT_RECEIVER_ID).unwrap();
            let result = channel.request(
                receiver::NAMESPACE,
                DEFAULT_RECEIVER_ID,
                &receiver::Request::GetStatus,
            );
            (channel, result)
        });

        let connect = server.read_frame();
        let sender = connect.get_source_id().to_owned();
        let request = server.read_frame();
        let body: serde_json::Value = serde_json::from_str(request.get_payload_utf8()).unwrap();
        assert_eq!(body["requestId"], 1);

        let (channel, result) = worker.join().unwrap();
        match result {
            Err(Error::Timeout(_)) => {}
            other => panic!("expected timeout, got {:?}", other),
        }

        // The deadline passed; the same response now surfaces as an event.
        server.write_json(receiver::NAMESPACE, &sender, receiver_status_json(1));
        match events.recv_timeout(Duration::from_secs(2)).unwrap() {
            Event::ReceiverStatus(status) => assert_eq!(status.volume.level, Some(0.5)),
            other => panic!("expected receiver status event, got {:?}", other),
        }
        assert!(!channel.is_closed());
    }

    #[test]
    fn duplicate_response_completes_the_request_once() {
        let config = config();
        let (channel, events, mut server) = pair(&config);

        let worker = thread::spawn(move || {
            channel.ensure_connection(DEFAULT_RECEIVER_ID).unwrap();
            let response = channel
                .request(
                    receiver::NAMESPACE,
                    DEFAULT_RECEIVER_ID,
                    &receiver::Request::GetStatus,
                )
                .unwrap();
            (channel, response)
        });

        let connect = server.read_frame();
        let sender = connect.get_source_id().to_owned();
        let _request = server.read_frame();
        server.write_json(receiver::NAMESPACE, &sender, receiver_status_json(1));
        server.write_json(receiver::NAMESPACE, &sender, receiver_status_json(1));

        let (_channel, _response) = worker.join().unwrap();
        // The second completion for id 1 had no pending entry left and was
        // delivered as a spontaneous event instead.
        match events.recv_timeout(Duration::from_secs(2)).unwrap() {
            Event::ReceiverStatus(_) => {}
            other => panic!("expected receiver status event, got {:?}", other),
        }
    }

    #[test]
    fn inbound_ping_is_answered_with_pong() {
        let config = config();
        let (channel, _events, mut server) = pair(&config);

        server.write_json(heartbeat::NAMESPACE, "*", r#"{"type":"PING"}"#.to_owned());

        let connect = server.read_frame();
        assert_eq!(connect.get_namespace(), connection::NAMESPACE);
        assert_eq!(connect.get_destination_id(), DEFAULT_RECEIVER_ID);
        let pong = server.read_frame();
        assert_eq!(pong.get_namespace(), heartbeat::NAMESPACE);
        assert!(pong.get_payload_utf8().contains("PONG"));
        assert_eq!(pong.get_destination_id(), DEFAULT_RECEIVER_ID);
        assert!(!channel.is_closed());
    }

    #[test]
    fn heartbeat_keeps_the_channel_alive() {
        let mut config = config();
        config.heartbeat_interval = Duration::from_millis(100);
        config.liveness_timeout = Duration::from_millis(600);
        let (channel, _events, mut server) = pair(&config);
        server
            .stream
            .set_read_timeout(Some(Duration::from_millis(50)))
            .unwrap();

        // Answer every PING with PONG for five heartbeat intervals or more.
        let deadline = Instant::now() + Duration::from_millis(800);
        let mut pings = 0;
        while Instant::now() < deadline {
            if let Some(frame) = server.try_read_frame() {
                if frame.get_namespace() == heartbeat::NAMESPACE
                    && frame.get_payload_utf8().contains("PING")
                {
                    pings += 1;
                    server.write_json(
                        heartbeat::NAMESPACE,
                        frame.get_source_id(),
                        r#"{"type":"PONG"}"#.to_owned(),
                    );
                }
            }
        }
        assert!(pings >= 3, "expected heartbeats, saw {}", pings);
        assert!(!channel.is_closed());
    }

    #[test]
    fn silent_peer_is_detected_as_dead() {
        let mut config = config();
        config.heartbeat_interval = Duration::from_millis(100);
        config.liveness_timeout = Duration::from_millis(300);
        let (channel, events, _server) = pair(&config);

        match events.recv_timeout(Duration::from_secs(3)).unwrap() {
            Event::Closed(CloseReason::Dead) => {}
            other => panic!("expected dead channel event, got {:?}", other),
        }
        assert!(channel.is_closed());
    }

    #[test]
    fn close_writes_close_frames_and_fails_pending() {
        let config = config();
        let (channel, events, mut server) = pair(&config);

        channel.ensure_connection(DEFAULT_RECEIVER_ID).unwrap();
        channel.close();
        assert!(channel.is_closed());

        let connect = server.read_frame();
        assert!(connect.get_payload_utf8().contains("CONNECT"));
        let close = server.read_frame();
        assert_eq!(close.get_namespace(), connection::NAMESPACE);
        assert!(close.get_payload_utf8().contains("CLOSE"));

        match events.recv_timeout(Duration::from_secs(1)).unwrap() {
            Event::Closed(CloseReason::Shutdown) => {}
            other => panic!("expected shutdown event, got {:?}", other),
        }

        match channel.request(
            receiver::NAMESPACE,
            DEFAULT_RECEIVER_ID,
            &receiver::Request::GetStatus,
        ) {
            Err(Error::ConnectionClosed) => {}
            other => panic!("expected connection closed, got {:?}", other),
        }
    }

    #[test]
    fn transport_eof_fails_the_channel() {
        let config = config();
        let (channel, events, server) = pair(&config);

        drop(server);
        match events.recv_timeout(Duration::from_secs(2)).unwrap() {
            Event::Closed(CloseReason::Transport(_)) => {}
            other => panic!("expected transport close event, got {:?}", other),
        }
        assert!(channel.is_closed());
    }
}
