//! The receiver channel manages global receiver state: the active cast
//! app, app availability, and device volume.

use std::collections::BTreeMap;

use serde_derive::{Deserialize, Serialize};
use serde_json::Value;

use super::NamedEnum;

pub const NAMESPACE: &str = "urn:x-cast:com.google.cast.receiver";

const MESSAGE_TYPE_RECEIVER_STATUS: &str = "RECEIVER_STATUS";
const MESSAGE_TYPE_GET_APP_AVAILABILITY: &str = "GET_APP_AVAILABILITY";
const MESSAGE_TYPE_LAUNCH_ERROR: &str = "LAUNCH_ERROR";
const MESSAGE_TYPE_INVALID_REQUEST: &str = "INVALID_REQUEST";

/// Availability value the receiver reports for an installed app.
pub const APP_AVAILABLE: &str = "APP_AVAILABLE";

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Request {
    GetStatus,
    #[serde(rename_all = "camelCase")]
    Launch { app_id: String },
    #[serde(rename_all = "camelCase")]
    Stop { session_id: String },
    #[serde(rename_all = "camelCase")]
    SetVolume { volume: Volume },
    #[serde(rename_all = "camelCase")]
    GetAppAvailability { app_id: Vec<String> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    ReceiverStatus {
        request_id: u64,
        status: ReceiverStatus,
    },
    /// Availability is keyed by app id. Values are kept verbatim so states
    /// this client does not know about survive a round-trip.
    AppAvailability {
        request_id: u64,
        availability: BTreeMap<String, String>,
    },
    LaunchError {
        request_id: u64,
        reason: Option<String>,
    },
    InvalidRequest {
        request_id: u64,
        reason: Option<String>,
    },
    Unknown {
        request_id: u64,
        response_type: String,
        payload: Value,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
struct StatusPayload {
    #[serde(default, deserialize_with = "super::lenient_request_id")]
    request_id: u64,
    #[serde(default)]
    status: ReceiverStatus,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
struct AvailabilityPayload {
    #[serde(default, deserialize_with = "super::lenient_request_id")]
    request_id: u64,
    #[serde(default)]
    availability: BTreeMap<String, String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
struct ErrorPayload {
    #[serde(default, deserialize_with = "super::lenient_request_id")]
    request_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

impl Response {
    pub fn request_id(&self) -> u64 {
        match self {
            Response::ReceiverStatus { request_id, .. }
            | Response::AppAvailability { request_id, .. }
            | Response::LaunchError { request_id, .. }
            | Response::InvalidRequest { request_id, .. }
            | Response::Unknown { request_id, .. } => *request_id,
        }
    }

    fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        let tag = super::discriminator(&value).unwrap_or("").to_owned();
        let response = match tag.as_str() {
            MESSAGE_TYPE_RECEIVER_STATUS => {
                let payload: StatusPayload = serde_json::from_value(value)?;
                Response::ReceiverStatus {
                    request_id: payload.request_id,
                    status: payload.status,
                }
            }
            MESSAGE_TYPE_GET_APP_AVAILABILITY => {
                let payload: AvailabilityPayload = serde_json::from_value(value)?;
                Response::AppAvailability {
                    request_id: payload.request_id,
                    availability: payload.availability,
                }
            }
            MESSAGE_TYPE_LAUNCH_ERROR => {
                let payload: ErrorPayload = serde_json::from_value(value)?;
                Response::LaunchError {
                    request_id: payload.request_id,
                    reason: payload.reason,
                }
            }
            MESSAGE_TYPE_INVALID_REQUEST => {
                let payload: ErrorPayload = serde_json::from_value(value)?;
                Response::InvalidRequest {
                    request_id: payload.request_id,
                    reason: payload.reason,
                }
            }
            _ => Response::Unknown {
                request_id: super::raw_request_id(&value),
                response_type: tag,
                payload: value,
            },
        };
        Ok(response)
    }

    fn to_value(&self) -> Result<Value, serde_json::Error> {
        let value = match self {
            Response::ReceiverStatus { request_id, status } => super::tagged(
                MESSAGE_TYPE_RECEIVER_STATUS,
                serde_json::to_value(StatusPayload {
                    request_id: *request_id,
                    status: status.clone(),
                })?,
            ),
            Response::AppAvailability {
                request_id,
                availability,
            } => super::tagged(
                MESSAGE_TYPE_GET_APP_AVAILABILITY,
                serde_json::to_value(AvailabilityPayload {
                    request_id: *request_id,
                    availability: availability.clone(),
                })?,
            ),
            Response::LaunchError { request_id, reason } => super::tagged(
                MESSAGE_TYPE_LAUNCH_ERROR,
                serde_json::to_value(ErrorPayload {
                    request_id: *request_id,
                    reason: reason.clone(),
                })?,
            ),
            Response::InvalidRequest { request_id, reason } => super::tagged(
                MESSAGE_TYPE_INVALID_REQUEST,
                serde_json::to_value(ErrorPayload {
                    request_id: *request_id,
                    reason: reason.clone(),
                })?,
            ),
            Response::Unknown { payload, .. } => payload.clone(),
        };
        Ok(value)
    }
}

impl serde::Serialize for Response {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let value = self.to_value().map_err(serde::ser::Error::custom)?;
        serde::Serialize::serialize(&value, serializer)
    }
}

impl<'de> serde::Deserialize<'de> for Response {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = <Value as serde::Deserialize>::deserialize(deserializer)?;
        Response::from_value(value).map_err(serde::de::Error::custom)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReceiverStatus {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub applications: Vec<Application>,
    #[serde(default)]
    pub is_active_input: bool,
    #[serde(default)]
    pub is_stand_by: bool,
    #[serde(default)]
    pub volume: Volume,
}

impl ReceiverStatus {
    /// The running application entry for `app_id`, if any.
    pub fn application(&self, app_id: &str) -> Option<&Application> {
        self.applications.iter().find(|app| app.app_id == app_id)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub app_id: String,
    #[serde(default)]
    pub session_id: String,
    /// Name of the pipe to talk to the application.
    #[serde(default)]
    pub transport_id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub namespaces: Vec<Namespace>,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub status_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    #[serde(default)]
    pub is_idle_screen: bool,
    #[serde(default)]
    pub launched_from_cloud: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub universal_app_id: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Namespace {
    pub name: String,
}

/// Device volume. All fields are optional so a SET_VOLUME can carry a
/// partial update; the receiver merges whatever is present.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muted: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_interval: Option<f64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::lenient_enum"
    )]
    pub control_type: Option<VolumeControlType>,
}

impl Volume {
    pub fn level(level: f64) -> Self {
        Volume {
            level: Some(level),
            ..Volume::default()
        }
    }

    pub fn muted(muted: bool) -> Self {
        Volume {
            muted: Some(muted),
            ..Volume::default()
        }
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VolumeControlType {
    Attenuation,
    Master,
    Fixed,
}

impl NamedEnum for VolumeControlType {
    fn parse_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "ATTENUATION" => Some(VolumeControlType::Attenuation),
            "MASTER" => Some(VolumeControlType::Master),
            "FIXED" => Some(VolumeControlType::Fixed),
            _ => None,
        }
    }
}
