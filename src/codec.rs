use std::convert::TryInto;
use std::io;

use byteorder::{BigEndian, ByteOrder};
use bytes::{BufMut, BytesMut};
use protobuf::Message;
use serde::Serialize;

use crate::proto;

/// Every frame starts with the body size as a big endian u32.
const HEADER_LENGTH: usize = 4;
/// Receivers cap envelopes at
/// [64KB](https://developers.google.com/cast/docs/reference/messages);
/// anything larger is a framing error.
const MAX_MESSAGE_LENGTH: usize = 64 << 10;

fn oversized(direction: &str, length: usize) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!(
            "{} frame of length {} exceeds the max message length of {}",
            direction, length, MAX_MESSAGE_LENGTH
        ),
    )
}

/// Length-prefixed protobuf framing.
///
/// The decoder carries the body length of a half-received frame across
/// calls, so input split at any byte boundary reassembles without losing
/// anything buffered in the `BytesMut`.
#[derive(Debug, Default)]
pub(crate) struct CastMessageCodec {
    /// Body size from the last header once it is known; the body bytes
    /// stay in the caller's buffer until all of them arrived.
    pending_body: Option<usize>,
    decoded_frames: u64,
    encoded_frames: u64,
}

impl CastMessageCodec {
    /// Serialize an envelope and append it, length-prefixed, to `dst`.
    pub fn encode(
        &mut self,
        message: &proto::CastMessage,
        dst: &mut BytesMut,
    ) -> Result<(), io::Error> {
        let buf = message
            .write_to_bytes()
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        if buf.len() > MAX_MESSAGE_LENGTH {
            return Err(oversized("encoded", buf.len()));
        }
        self.encoded_frames += 1;
        trace!(
            "framed message {} ({} bytes, namespace {})",
            self.encoded_frames,
            buf.len(),
            message.get_namespace()
        );

        let header = &mut [0; HEADER_LENGTH];
        let msg_size = buf
            .len()
            .try_into()
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        BigEndian::write_u32(header, msg_size);

        dst.reserve(HEADER_LENGTH + buf.len());
        dst.put_slice(header);
        dst.put_slice(&buf);
        Ok(())
    }

    /// Pull the next complete envelope out of `src`. Returns `Ok(None)`
    /// until enough bytes have accumulated; partial frames stay buffered.
    pub fn decode(&mut self, src: &mut BytesMut) -> Result<Option<proto::CastMessage>, io::Error> {
        let body_len = match self.pending_body {
            Some(length) => length,
            None => {
                if src.len() < HEADER_LENGTH {
                    return Ok(None);
                }
                let header = src.split_to(HEADER_LENGTH);
                let length = BigEndian::read_u32(&header) as usize;
                if length > MAX_MESSAGE_LENGTH {
                    return Err(oversized("decoded", length));
                }
                src.reserve(length);
                self.pending_body = Some(length);
                length
            }
        };
        if src.len() < body_len {
            return Ok(None);
        }
        self.pending_body = None;
        let body = src.split_to(body_len);
        let message = proto::CastMessage::parse_from_bytes(&body)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        self.decoded_frames += 1;
        trace!(
            "unframed message {} ({} bytes, namespace {})",
            self.decoded_frames,
            body_len,
            message.get_namespace()
        );
        Ok(Some(message))
    }

    /// True while a frame is only partially buffered. EOF in this state is
    /// a framing failure rather than a clean shutdown.
    pub fn is_mid_frame(&self, src: &BytesMut) -> bool {
        self.pending_body.is_some() || !src.is_empty()
    }
}

#[derive(Debug, Default)]
pub(crate) struct MessageBuilder<'a> {
    namespace: Option<&'a str>,
    source: Option<&'a str>,
    destination: Option<&'a str>,
    payload: Option<String>,
}

impl<'a> MessageBuilder<'a> {
    pub fn namespace(mut self, namespace: &'a str) -> Self {
        self.namespace = Some(namespace);
        self
    }

    pub fn source(mut self, source: &'a str) -> Self {
        self.source = Some(source);
        self
    }

    pub fn destination(mut self, destination: &'a str) -> Self {
        self.destination = Some(destination);
        self
    }

    pub fn payload<T: Serialize>(self, payload: &T) -> Result<Self, serde_json::Error> {
        let payload = serde_json::to_string(payload)?;
        Ok(self.raw_payload(payload))
    }

    pub fn raw_payload(mut self, payload: String) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn into_message(mut self) -> proto::CastMessage {
        let mut message = proto::CastMessage::new();
        message.set_protocol_version(proto::CastMessage_ProtocolVersion::CASTV2_1_0);
        if let Some(source) = self.source.take() {
            message.set_source_id(source.to_owned());
        }
        if let Some(destination) = self.destination.take() {
            message.set_destination_id(destination.to_owned());
        }
        if let Some(namespace) = self.namespace.take() {
            message.set_namespace(namespace.to_owned());
        }
        if let Some(payload) = self.payload.take() {
            message.set_payload_type(proto::CastMessage_PayloadType::STRING);
            message.set_payload_utf8(payload);
        }
        message
    }
}
