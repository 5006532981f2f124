//! Typed JSON payloads for the Cast namespaces.
//!
//! Outbound requests serialize with a `type` discriminator. Inbound
//! messages carry either `responseType` or `type` depending on the
//! receiver firmware, so response families dispatch by hand on whichever
//! is present and keep an `Unknown` catch-all that still exposes the
//! `requestId` for correlation.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, ReceiverErrorKind};

pub mod connection;
pub mod heartbeat;
pub mod media;
pub mod multizone;
pub mod receiver;

/// A parsed inbound payload, grouped by namespace family.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Connection(connection::Response),
    Heartbeat(heartbeat::Response),
    Receiver(receiver::Response),
    Media(media::Response),
    Multizone(multizone::Response),
    Unknown { namespace: String, payload: Value },
}

impl Response {
    /// Parse the JSON payload of an envelope received on `namespace`.
    pub fn parse(namespace: &str, payload: &str) -> Result<Response, serde_json::Error> {
        match namespace {
            connection::NAMESPACE => serde_json::from_str(payload).map(Response::Connection),
            heartbeat::NAMESPACE => serde_json::from_str(payload).map(Response::Heartbeat),
            receiver::NAMESPACE => serde_json::from_str(payload).map(Response::Receiver),
            media::NAMESPACE => serde_json::from_str(payload).map(Response::Media),
            multizone::NAMESPACE => serde_json::from_str(payload).map(Response::Multizone),
            _ => Ok(Response::Unknown {
                namespace: namespace.to_owned(),
                payload: serde_json::from_str(payload)?,
            }),
        }
    }

    /// The correlation id this message answers. `0` marks a spontaneous
    /// message from the receiver.
    pub fn request_id(&self) -> u64 {
        match self {
            Response::Connection(_) | Response::Heartbeat(_) => 0,
            Response::Receiver(response) => response.request_id(),
            Response::Media(response) => response.request_id(),
            Response::Multizone(response) => response.request_id(),
            Response::Unknown { payload, .. } => raw_request_id(payload),
        }
    }

    /// Turn receiver-signaled error responses into the error taxonomy,
    /// passing every other response through.
    pub fn into_result(self) -> Result<Response, Error> {
        let (kind, reason, detailed_error_code, item_id) = match self {
            Response::Receiver(receiver::Response::LaunchError { reason, .. }) => {
                (ReceiverErrorKind::LaunchError, reason, None, None)
            }
            Response::Receiver(receiver::Response::InvalidRequest { reason, .. }) => {
                (ReceiverErrorKind::InvalidRequest, reason, None, None)
            }
            Response::Media(media::Response::LoadCancelled { .. }) => {
                (ReceiverErrorKind::LoadCancelled, None, None, None)
            }
            Response::Media(media::Response::LoadFailed { .. }) => {
                (ReceiverErrorKind::LoadFailed, None, None, None)
            }
            Response::Media(media::Response::InvalidPlayerState { .. }) => {
                (ReceiverErrorKind::InvalidPlayerState, None, None, None)
            }
            Response::Media(media::Response::InvalidRequest { reason, .. }) => {
                (ReceiverErrorKind::InvalidRequest, reason, None, None)
            }
            Response::Media(media::Response::Error {
                reason,
                detailed_error_code,
                item_id,
                ..
            }) => (ReceiverErrorKind::Error, reason, detailed_error_code, item_id),
            other => return Ok(other),
        };
        Err(Error::Receiver {
            kind,
            reason,
            detailed_error_code,
            item_id,
        })
    }
}

/// The wire discriminator: receivers answer with `responseType`, older
/// firmware and fixtures use `type`.
pub(crate) fn discriminator(value: &Value) -> Option<&str> {
    value
        .get("responseType")
        .and_then(Value::as_str)
        .or_else(|| value.get("type").and_then(Value::as_str))
}

pub(crate) fn raw_request_id(value: &Value) -> u64 {
    value.get("requestId").and_then(Value::as_u64).unwrap_or(0)
}

/// Stamp the canonical `type` tag onto a serialized payload body.
pub(crate) fn tagged(tag: &str, mut value: Value) -> Value {
    if let Value::Object(ref mut object) = value {
        object.insert("type".to_owned(), Value::String(tag.to_owned()));
    }
    value
}

/// Name-coded enumerations parse totally: unknown names yield `None`,
/// never an error. Comparison is case-insensitive with underscores
/// preserved.
pub(crate) trait NamedEnum: Sized {
    fn parse_name(name: &str) -> Option<Self>;
}

pub(crate) fn lenient_enum<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: NamedEnum,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_str)
        .and_then(T::parse_name))
}

/// Correlation ids are absent, null, or zero on spontaneous messages, and
/// occasionally out of range on buggy firmware. All of those read as `0`.
pub(crate) fn lenient_request_id<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(Value::as_u64).unwrap_or(0))
}
