//! The multizone channel reports group members and their volumes.

use serde_derive::{Deserialize, Serialize};
use serde_json::Value;

use crate::payload::receiver::Volume;

pub const NAMESPACE: &str = "urn:x-cast:com.google.cast.multizone";

const MESSAGE_TYPE_MULTIZONE_STATUS: &str = "MULTIZONE_STATUS";
const MESSAGE_TYPE_DEVICE_ADDED: &str = "DEVICE_ADDED";
const MESSAGE_TYPE_DEVICE_UPDATED: &str = "DEVICE_UPDATED";
const MESSAGE_TYPE_DEVICE_REMOVED: &str = "DEVICE_REMOVED";

#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    MultizoneStatus {
        request_id: u64,
        status: MultizoneStatus,
    },
    DeviceAdded {
        request_id: u64,
        device: MultizoneDevice,
    },
    DeviceUpdated {
        request_id: u64,
        device: MultizoneDevice,
    },
    DeviceRemoved {
        request_id: u64,
        device_id: String,
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
    status: MultizoneStatus,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
struct DevicePayload {
    #[serde(default, deserialize_with = "super::lenient_request_id")]
    request_id: u64,
    device: MultizoneDevice,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
struct RemovedPayload {
    #[serde(default, deserialize_with = "super::lenient_request_id")]
    request_id: u64,
    device_id: String,
}

impl Response {
    pub fn request_id(&self) -> u64 {
        match self {
            Response::MultizoneStatus { request_id, .. }
            | Response::DeviceAdded { request_id, .. }
            | Response::DeviceUpdated { request_id, .. }
            | Response::DeviceRemoved { request_id, .. }
            | Response::Unknown { request_id, .. } => *request_id,
        }
    }

    fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        let tag = super::discriminator(&value).unwrap_or("").to_owned();
        let response = match tag.as_str() {
            MESSAGE_TYPE_MULTIZONE_STATUS => {
                let payload: StatusPayload = serde_json::from_value(value)?;
                Response::MultizoneStatus {
                    request_id: payload.request_id,
                    status: payload.status,
                }
            }
            MESSAGE_TYPE_DEVICE_ADDED => {
                let payload: DevicePayload = serde_json::from_value(value)?;
                Response::DeviceAdded {
                    request_id: payload.request_id,
                    device: payload.device,
                }
            }
            MESSAGE_TYPE_DEVICE_UPDATED => {
                let payload: DevicePayload = serde_json::from_value(value)?;
                Response::DeviceUpdated {
                    request_id: payload.request_id,
                    device: payload.device,
                }
            }
            MESSAGE_TYPE_DEVICE_REMOVED => {
                let payload: RemovedPayload = serde_json::from_value(value)?;
                Response::DeviceRemoved {
                    request_id: payload.request_id,
                    device_id: payload.device_id,
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
            Response::MultizoneStatus { request_id, status } => super::tagged(
                MESSAGE_TYPE_MULTIZONE_STATUS,
                serde_json::to_value(StatusPayload {
                    request_id: *request_id,
                    status: status.clone(),
                })?,
            ),
            Response::DeviceAdded { request_id, device } => super::tagged(
                MESSAGE_TYPE_DEVICE_ADDED,
                serde_json::to_value(DevicePayload {
                    request_id: *request_id,
                    device: device.clone(),
                })?,
            ),
            Response::DeviceUpdated { request_id, device } => super::tagged(
                MESSAGE_TYPE_DEVICE_UPDATED,
                serde_json::to_value(DevicePayload {
                    request_id: *request_id,
                    device: device.clone(),
                })?,
            ),
            Response::DeviceRemoved {
                request_id,
                device_id,
            } => super::tagged(
                MESSAGE_TYPE_DEVICE_REMOVED,
                serde_json::to_value(RemovedPayload {
                    request_id: *request_id,
                    device_id: device_id.clone(),
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
pub struct MultizoneStatus {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub devices: Vec<MultizoneDevice>,
    #[serde(default)]
    pub is_multichannel: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MultizoneDevice {
    #[serde(default)]
    pub device_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub capabilities: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<Volume>,
}
