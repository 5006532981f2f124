//! Cast device records, built from mDNS service discovery output.
//!
//! Discovery itself lives outside this crate. A `ServiceRecord` carries
//! what an mDNS responder yields for `_googlecast._tcp.local.`: host,
//! port, the raw TXT record, and any application URLs. Each TXT entry is
//! a `key=value` pair with device metadata; the relevant keys are:
//!
//! - `id` - unique id
//! - `fn` - friendly name
//! - `md` - model name
//! - `ca` - capabilities bitmask
//! - `rs` - receiver status text
//! - `ve` - protocol version

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use nom::types::CompleteStr;
use url::Url;

/// Google Cast multicast service identifier.
pub const SERVICE_TYPE: &str = "_googlecast._tcp.local.";
/// Port a cast receiver listens on unless the SRV record says otherwise.
pub const DEFAULT_PORT: u16 = 8009;

const TXT_UNIQUE_ID: &str = "id";
const TXT_FRIENDLY_NAME: &str = "fn";
const TXT_MODEL_NAME: &str = "md";
const TXT_CAPABILITIES: &str = "ca";
const TXT_STATUS: &str = "rs";
const TXT_PROTOCOL_VERSION: &str = "ve";

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

// Consumes the key and its `=`; whatever nom leaves unconsumed is the
// value, so values may themselves contain `=` signs.
named!(txt_key<CompleteStr, CompleteStr>,
    terminated!(take_while1!(is_key_char), char!('='))
);

/// Metadata looked up by key out of a `_googlecast._tcp` TXT record.
/// Keys match case-insensitively; entries that are not `key=value`
/// shaped are skipped.
#[derive(Debug, Default)]
struct TxtRecord {
    keys: HashMap<String, String>,
}

impl TxtRecord {
    fn parse(entries: &[String]) -> TxtRecord {
        let mut record = TxtRecord::default();
        for entry in entries {
            match txt_key(CompleteStr(entry.as_str())) {
                Ok((value, key)) => {
                    record
                        .keys
                        .insert(key.0.to_ascii_lowercase(), value.0.to_owned());
                }
                Err(_) => debug!("skipping malformed TXT entry {:?}", entry),
            }
        }
        record
    }

    fn take(&mut self, key: &str) -> Option<String> {
        self.keys.remove(key)
    }
}

/// What an mDNS responder hands over for one discovered receiver.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceRecord {
    pub host: IpAddr,
    pub port: u16,
    pub txt: Vec<String>,
    pub app_urls: Vec<Url>,
}

/// A discovered cast receiver, ready to open a channel against.
#[derive(Debug, Clone, PartialEq)]
pub struct CastDevice {
    pub address: IpAddr,
    pub port: u16,
    pub unique_id: Option<String>,
    pub friendly_name: Option<String>,
    pub model_name: Option<String>,
    pub capabilities: Capabilities,
    pub device_type: Option<DeviceType>,
    pub status_text: Option<String>,
    pub protocol_version: Option<String>,
    pub app_urls: Vec<Url>,
}

impl CastDevice {
    pub fn from_record(record: &ServiceRecord) -> CastDevice {
        let mut txt = TxtRecord::parse(&record.txt);
        let model_name = txt.take(TXT_MODEL_NAME);
        let capabilities = txt
            .take(TXT_CAPABILITIES)
            .and_then(|value| value.parse::<u32>().ok())
            .map(Capabilities)
            .unwrap_or_default();
        CastDevice {
            address: record.host,
            port: record.port,
            unique_id: txt.take(TXT_UNIQUE_ID),
            friendly_name: txt.take(TXT_FRIENDLY_NAME),
            device_type: model_name.as_deref().and_then(DeviceType::parse),
            model_name,
            capabilities,
            status_text: txt.take(TXT_STATUS),
            protocol_version: txt.take(TXT_PROTOCOL_VERSION),
            app_urls: record.app_urls.clone(),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.address, self.port)
    }

    /// Friendly name, falling back to the model name.
    pub fn display_name(&self) -> &str {
        self.friendly_name
            .as_deref()
            .or_else(|| self.model_name.as_deref())
            .unwrap_or("Cast device")
    }
}

/// Capability bitmask from the `ca` TXT key. Unknown bits are preserved
/// but ignored by [`Capabilities::decompose`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities(pub u32);

impl Capabilities {
    pub fn has(self, capability: Capability) -> bool {
        self.0 & capability.mask() != 0
    }

    pub fn decompose(self) -> Vec<Capability> {
        Capability::ALL
            .iter()
            .copied()
            .filter(|capability| self.has(*capability))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    VideoOut,
    VideoIn,
    AudioOut,
    AudioIn,
    DevMode,
    MultizoneGroup,
}

impl Capability {
    const ALL: [Capability; 6] = [
        Capability::VideoOut,
        Capability::VideoIn,
        Capability::AudioOut,
        Capability::AudioIn,
        Capability::DevMode,
        Capability::MultizoneGroup,
    ];

    pub fn mask(self) -> u32 {
        match self {
            Capability::VideoOut => 1,
            Capability::VideoIn => 1 << 1,
            Capability::AudioOut => 1 << 2,
            Capability::AudioIn => 1 << 3,
            Capability::DevMode => 1 << 4,
            Capability::MultizoneGroup => 1 << 5,
        }
    }
}

/// Device family, inferred from the `md` model name. Parsing is
/// case-insensitive and folds spaces to underscores, so `"Chromecast
/// Audio"` and `"CHROMECAST_AUDIO"` both match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceType {
    Chromecast,
    ChromecastAudio,
    ChromecastUltra,
    GoogleCastGroup,
    GoogleHome,
    GoogleHomeMini,
    GoogleNestHub,
    AndroidTv,
}

impl DeviceType {
    pub fn parse(name: &str) -> Option<DeviceType> {
        let name = name.trim().to_ascii_uppercase().replace(' ', "_");
        match name.as_str() {
            "CHROMECAST" => Some(DeviceType::Chromecast),
            "CHROMECAST_AUDIO" => Some(DeviceType::ChromecastAudio),
            "CHROMECAST_ULTRA" => Some(DeviceType::ChromecastUltra),
            "GOOGLE_CAST_GROUP" => Some(DeviceType::GoogleCastGroup),
            "GOOGLE_HOME" => Some(DeviceType::GoogleHome),
            "GOOGLE_HOME_MINI" => Some(DeviceType::GoogleHomeMini),
            "GOOGLE_NEST_HUB" => Some(DeviceType::GoogleNestHub),
            "ANDROID_TV" => Some(DeviceType::AndroidTv),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(txt: Vec<String>) -> ServiceRecord {
        ServiceRecord {
            host: "192.168.1.20".parse().unwrap(),
            port: DEFAULT_PORT,
            txt,
            app_urls: Vec::new(),
        }
    }

    #[test]
    fn txt_values_keep_everything_after_the_first_equals() {
        let device = CastDevice::from_record(&record(vec![
            "fn=Bob's TV = Den".to_owned(),
            "not a key value entry".to_owned(),
            "md=Chromecast".to_owned(),
        ]));
        assert_eq!(device.friendly_name.as_deref(), Some("Bob's TV = Den"));
        assert_eq!(device.device_type, Some(DeviceType::Chromecast));
        assert_eq!(device.unique_id, None);
    }

    #[test]
    fn txt_keys_match_case_insensitively() {
        let device = CastDevice::from_record(&record(vec!["FN=Kitchen display".to_owned()]));
        assert_eq!(device.friendly_name.as_deref(), Some("Kitchen display"));
    }

    #[test]
    fn device_from_record() {
        let mut full = record(vec![
            "id=a1b2c3".to_owned(),
            "fn=Living Room TV".to_owned(),
            "md=Chromecast Ultra".to_owned(),
            "ca=4101".to_owned(),
            "rs=Ready To Cast".to_owned(),
            "ve=05".to_owned(),
        ]);
        full.app_urls = vec![Url::parse("https://example.com/apps").unwrap()];
        let device = CastDevice::from_record(&full);
        assert_eq!(device.unique_id.as_deref(), Some("a1b2c3"));
        assert_eq!(device.display_name(), "Living Room TV");
        assert_eq!(device.device_type, Some(DeviceType::ChromecastUltra));
        assert!(device.capabilities.has(Capability::VideoOut));
        assert!(device.capabilities.has(Capability::AudioOut));
        assert!(!device.capabilities.has(Capability::AudioIn));
        assert_eq!(device.app_urls.len(), 1);
    }

    #[test]
    fn malformed_capabilities_default_to_empty() {
        let device = CastDevice::from_record(&record(vec!["ca=not-a-number".to_owned()]));
        assert_eq!(device.capabilities, Capabilities(0));
        assert!(device.capabilities.decompose().is_empty());
    }

    #[test]
    fn device_type_folds_spaces_and_case() {
        assert_eq!(
            DeviceType::parse("Chromecast Audio"),
            Some(DeviceType::ChromecastAudio)
        );
        assert_eq!(
            DeviceType::parse("google home mini"),
            Some(DeviceType::GoogleHomeMini)
        );
        assert_eq!(DeviceType::parse("Quantum Screen 9000"), None);
    }
}
