//! High-level facade over a cast channel.
//!
//! Every method is stateless per call: ensure the right virtual
//! connection, send one request, decode the one response family it
//! expects. Session bookkeeping (which app, which media session) stays
//! with the caller, because receivers can change both behind our back.

use std::collections::BTreeMap;
use std::net::SocketAddr;

use serde_json::Value;

use crate::channel::{Channel, Events, DEFAULT_RECEIVER_ID};
use crate::device::CastDevice;
use crate::error::{Error, ReceiverErrorKind};
use crate::payload::{self, media, receiver};
use crate::Config;

/// App id of the default media receiver.
pub const DEFAULT_MEDIA_RECEIVER_APP_ID: &str = "CC1AD845";

/// Handle to one cast device.
pub struct Client {
    channel: Channel,
}

/// Optional knobs for [`Client::load`]. Unset fields stay off the wire.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoadOptions {
    pub autoplay: Option<bool>,
    pub current_time: Option<f64>,
    pub active_track_ids: Option<Vec<i64>>,
    pub credentials: Option<String>,
    pub playback_rate: Option<f64>,
    pub queue_data: Option<Value>,
    pub custom_data: Option<Value>,
}

impl Client {
    /// Connect to a discovered device.
    pub fn connect(device: &CastDevice, config: &Config) -> Result<(Client, Events), Error> {
        Client::connect_addr(device.addr(), config)
    }

    pub fn connect_addr(addr: SocketAddr, config: &Config) -> Result<(Client, Events), Error> {
        let (channel, events) = Channel::connect(addr, config)?;
        Ok((Client { channel }, events))
    }

    /// Wrap an already established channel, e.g. one running over a
    /// caller-provided transport.
    pub fn new(channel: Channel) -> Client {
        Client { channel }
    }

    pub fn channel(&self) -> &Channel {
        &self.channel
    }

    /// Current receiver status: volume, running applications, standby.
    pub fn status(&self) -> Result<receiver::ReceiverStatus, Error> {
        let response = self.receiver_request(&receiver::Request::GetStatus)?;
        expect_receiver_status(response)
    }

    /// Launch an application and return its entry from the refreshed
    /// receiver status.
    pub fn launch(&self, app_id: &str) -> Result<receiver::Application, Error> {
        let response = self.receiver_request(&receiver::Request::Launch {
            app_id: app_id.to_owned(),
        })?;
        let status = expect_receiver_status(response)?;
        status.application(app_id).cloned().ok_or(Error::Receiver {
            kind: ReceiverErrorKind::LaunchError,
            reason: Some("application missing from receiver status".to_owned()),
            detailed_error_code: None,
            item_id: None,
        })
    }

    /// Stop a running application session.
    pub fn stop(&self, app: &receiver::Application) -> Result<receiver::ReceiverStatus, Error> {
        let response = self.receiver_request(&receiver::Request::Stop {
            session_id: app.session_id.clone(),
        })?;
        expect_receiver_status(response)
    }

    /// Partial volume update; the receiver merges whatever fields are set.
    pub fn set_volume(&self, volume: receiver::Volume) -> Result<receiver::ReceiverStatus, Error> {
        let response = self.receiver_request(&receiver::Request::SetVolume { volume })?;
        expect_receiver_status(response)
    }

    /// Availability of each app id, as reported by the receiver.
    pub fn app_availability(&self, app_ids: &[&str]) -> Result<BTreeMap<String, String>, Error> {
        let request = receiver::Request::GetAppAvailability {
            app_id: app_ids.iter().map(|id| (*id).to_owned()).collect(),
        };
        match self.receiver_request(&request)? {
            payload::Response::Receiver(receiver::Response::AppAvailability {
                availability,
                ..
            }) => Ok(availability),
            other => Err(unexpected(other)),
        }
    }

    pub fn is_app_available(&self, app_id: &str) -> Result<bool, Error> {
        let availability = self.app_availability(&[app_id])?;
        Ok(availability
            .get(app_id)
            .map(|state| state == receiver::APP_AVAILABLE)
            .unwrap_or(false))
    }

    /// Load media into a launched application and return the first media
    /// status entry the receiver reports for it.
    pub fn load(
        &self,
        app: &receiver::Application,
        media: media::MediaInformation,
        options: LoadOptions,
    ) -> Result<media::MediaStatus, Error> {
        let request = media::Request::Load {
            session_id: app.session_id.clone(),
            media,
            autoplay: options.autoplay,
            current_time: options.current_time,
            active_track_ids: options.active_track_ids,
            credentials: options.credentials,
            playback_rate: options.playback_rate,
            queue_data: options.queue_data,
            custom_data: options.custom_data,
        };
        let response = self.media_request(app, &request)?;
        first_media_status(response)
    }

    pub fn play(
        &self,
        app: &receiver::Application,
        media_session_id: i64,
    ) -> Result<media::MediaStatus, Error> {
        let response = self.media_request(
            app,
            &media::Request::Play {
                media_session_id,
                custom_data: None,
            },
        )?;
        first_media_status(response)
    }

    pub fn pause(
        &self,
        app: &receiver::Application,
        media_session_id: i64,
    ) -> Result<media::MediaStatus, Error> {
        let response = self.media_request(
            app,
            &media::Request::Pause {
                media_session_id,
                custom_data: None,
            },
        )?;
        first_media_status(response)
    }

    /// Stop playback of a media session (distinct from [`Client::stop`],
    /// which stops the whole application).
    pub fn stop_media(
        &self,
        app: &receiver::Application,
        media_session_id: i64,
    ) -> Result<media::MediaStatus, Error> {
        let response = self.media_request(
            app,
            &media::Request::Stop {
                media_session_id,
                custom_data: None,
            },
        )?;
        first_media_status(response)
    }

    pub fn seek(
        &self,
        app: &receiver::Application,
        media_session_id: i64,
        current_time: Option<f64>,
        resume_state: Option<media::ResumeState>,
    ) -> Result<media::MediaStatus, Error> {
        let response = self.media_request(
            app,
            &media::Request::Seek {
                media_session_id,
                resume_state,
                current_time,
                custom_data: None,
            },
        )?;
        first_media_status(response)
    }

    /// Media status entries for the application, optionally narrowed to
    /// one media session.
    pub fn media_status(
        &self,
        app: &receiver::Application,
        media_session_id: Option<i64>,
    ) -> Result<Vec<media::MediaStatus>, Error> {
        match self.media_request(app, &media::Request::GetStatus { media_session_id })? {
            payload::Response::Media(media::Response::MediaStatus { status, .. }) => Ok(status),
            other => Err(unexpected(other)),
        }
    }

    /// The id of the application's active media session. Required by
    /// play/pause/seek; fails when nothing is loaded.
    pub fn active_media_session(&self, app: &receiver::Application) -> Result<i64, Error> {
        let status = self.media_status(app, None)?;
        status
            .first()
            .map(|entry| entry.media_session_id)
            .ok_or(Error::IllegalState("no active media session"))
    }

    /// Tear the channel down gracefully.
    pub fn close(self) {
        self.channel.close();
    }

    fn receiver_request(&self, request: &receiver::Request) -> Result<payload::Response, Error> {
        self.channel.ensure_connection(DEFAULT_RECEIVER_ID)?;
        self.channel
            .request(receiver::NAMESPACE, DEFAULT_RECEIVER_ID, request)?
            .into_result()
    }

    fn media_request(
        &self,
        app: &receiver::Application,
        request: &media::Request,
    ) -> Result<payload::Response, Error> {
        if app.transport_id.is_empty() {
            return Err(Error::IllegalState("application has no transport id"));
        }
        self.channel.ensure_connection(&app.transport_id)?;
        self.channel
            .request(media::NAMESPACE, &app.transport_id, request)?
            .into_result()
    }
}

fn expect_receiver_status(response: payload::Response) -> Result<receiver::ReceiverStatus, Error> {
    match response {
        payload::Response::Receiver(receiver::Response::ReceiverStatus { status, .. }) => {
            Ok(status)
        }
        other => Err(unexpected(other)),
    }
}

fn first_media_status(response: payload::Response) -> Result<media::MediaStatus, Error> {
    match response {
        payload::Response::Media(media::Response::MediaStatus { mut status, .. }) => {
            if status.is_empty() {
                Err(Error::protocol("media status response carried no entries"))
            } else {
                Ok(status.remove(0))
            }
        }
        other => Err(unexpected(other)),
    }
}

fn unexpected(response: payload::Response) -> Error {
    Error::protocol(format!("unexpected response: {:?}", response))
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::thread;
    use std::time::Duration;

    use bytes::BytesMut;

    use super::{Client, LoadOptions, DEFAULT_MEDIA_RECEIVER_APP_ID};
    use crate::channel::Channel;
    use crate::codec::{CastMessageCodec, MessageBuilder};
    use crate::error::{Error, ReceiverErrorKind};
    use crate::payload::{connection, media, receiver};
    use crate::proto;
    use crate::Config;

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

        fn reply(&mut self, namespace: &str, source: &str, destination: &str, payload: String) {
            let message = MessageBuilder::default()
                .namespace(namespace)
                .source(source)
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
        config.heartbeat_interval = Duration::from_secs(60);
        config.liveness_timeout = Duration::from_secs(60);
        config.request_timeout = Duration::from_secs(2);
        config
    }

    fn pair() -> (Client, FakeReceiver) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let socket = TcpStream::connect(addr).unwrap();
        let (server, _) = listener.accept().unwrap();
        let (channel, _events) = Channel::from_transport(socket, &config()).unwrap();
        (Client::new(channel), FakeReceiver::new(server))
    }

    fn launched_app_status(request_id: u64, app_id: &str) -> String {
        format!(
            concat!(
                r#"{{"responseType":"RECEIVER_STATUS","requestId":{},"status":{{"#,
                r#""applications":[{{"appId":"{}","sessionId":"s1","transportId":"web-55","#,
                r#""displayName":"Default Media Receiver","statusText":"Ready","#,
                r#""namespaces":[{{"name":"urn:x-cast:com.google.cast.media"}}]}}],"#,
                r#""volume":{{"level":1.0}}}}}}"#
            ),
            request_id, app_id
        )
    }

    #[test]
    fn launch_then_load_then_play() {
        let (client, mut server) = pair();

        let worker = thread::spawn(move || {
            let app = client.launch(DEFAULT_MEDIA_RECEIVER_APP_ID).unwrap();
            assert_eq!(app.transport_id, "web-55");
            let status = client
                .load(
                    &app,
                    media::MediaInformation::buffered("http://host/a.mp3", "audio/mpeg"),
                    LoadOptions {
                        autoplay: Some(true),
                        ..LoadOptions::default()
                    },
                )
                .unwrap();
            assert_eq!(status.media_session_id, 42);
            let status = client.play(&app, status.media_session_id).unwrap();
            assert_eq!(
                status.player_state,
                Some(media::PlayerState::Playing)
            );
            client
        });

        // Platform CONNECT, then LAUNCH.
        let connect = server.read_frame();
        assert_eq!(connect.get_namespace(), connection::NAMESPACE);
        assert_eq!(connect.get_destination_id(), "receiver-0");
        let sender = connect.get_source_id().to_owned();

        let launch = server.read_frame();
        let body: serde_json::Value = serde_json::from_str(launch.get_payload_utf8()).unwrap();
        assert_eq!(body["type"], "LAUNCH");
        assert_eq!(body["appId"], DEFAULT_MEDIA_RECEIVER_APP_ID);
        server.reply(
            receiver::NAMESPACE,
            "receiver-0",
            &sender,
            launched_app_status(1, DEFAULT_MEDIA_RECEIVER_APP_ID),
        );

        // App CONNECT, then LOAD on the app transport.
        let app_connect = server.read_frame();
        assert_eq!(app_connect.get_namespace(), connection::NAMESPACE);
        assert_eq!(app_connect.get_destination_id(), "web-55");

        let load = server.read_frame();
        assert_eq!(load.get_namespace(), media::NAMESPACE);
        assert_eq!(load.get_destination_id(), "web-55");
        let body: serde_json::Value = serde_json::from_str(load.get_payload_utf8()).unwrap();
        assert_eq!(body["type"], "LOAD");
        assert_eq!(body["sessionId"], "s1");
        assert_eq!(body["autoplay"], true);
        assert_eq!(body["requestId"], 2);
        server.reply(
            media::NAMESPACE,
            "web-55",
            &sender,
            r#"{"responseType":"MEDIA_STATUS","requestId":2,"status":{"mediaSessionId":42,"playerState":"BUFFERING","currentTime":0.0}}"#.to_owned(),
        );

        let play = server.read_frame();
        let body: serde_json::Value = serde_json::from_str(play.get_payload_utf8()).unwrap();
        assert_eq!(body["type"], "PLAY");
        assert_eq!(body["mediaSessionId"], 42);
        server.reply(
            media::NAMESPACE,
            "web-55",
            &sender,
            r#"{"responseType":"MEDIA_STATUS","requestId":3,"status":[{"mediaSessionId":42,"playerState":"PLAYING","currentTime":0.5}]}"#.to_owned(),
        );

        let client = worker.join().unwrap();
        drop(client);
    }

    #[test]
    fn launch_error_maps_to_receiver_error() {
        let (client, mut server) = pair();

        let worker = thread::spawn(move || client.launch("DEADBEEF"));

        let connect = server.read_frame();
        let sender = connect.get_source_id().to_owned();
        let _launch = server.read_frame();
        server.reply(
            receiver::NAMESPACE,
            "receiver-0",
            &sender,
            r#"{"responseType":"LAUNCH_ERROR","requestId":1,"reason":"NOT_FOUND"}"#.to_owned(),
        );

        match worker.join().unwrap() {
            Err(Error::Receiver {
                kind: ReceiverErrorKind::LaunchError,
                reason,
                ..
            }) => assert_eq!(reason.as_deref(), Some("NOT_FOUND")),
            other => panic!("expected launch error, got {:?}", other),
        }
    }

    #[test]
    fn app_availability_round_trips_the_map() {
        let (client, mut server) = pair();

        let worker = thread::spawn(move || client.is_app_available(DEFAULT_MEDIA_RECEIVER_APP_ID));

        let connect = server.read_frame();
        let sender = connect.get_source_id().to_owned();
        let request = server.read_frame();
        let body: serde_json::Value = serde_json::from_str(request.get_payload_utf8()).unwrap();
        assert_eq!(body["type"], "GET_APP_AVAILABILITY");
        server.reply(
            receiver::NAMESPACE,
            "receiver-0",
            &sender,
            format!(
                r#"{{"responseType":"GET_APP_AVAILABILITY","requestId":1,"availability":{{"{}":"APP_AVAILABLE"}}}}"#,
                DEFAULT_MEDIA_RECEIVER_APP_ID
            ),
        );

        assert!(worker.join().unwrap().unwrap());
    }
}
