// GATT Server: Strip-Service mit Color / Pattern / Brightness
//
// Jede Characteristic hält einen 50-Byte Textpuffer (nullgepolstert).
// Nach einem Write steht dort das bereinigte Echo des Clients.

use esp_core::{
    Endpoint, INITIAL_BRIGHTNESS_VALUE, INITIAL_COLOR_VALUE, INITIAL_PATTERN_VALUE,
    PAYLOAD_CAPACITY,
};
use trouble_host::prelude::*;

use crate::config::STRIP_SERVICE_UUID;

/// Textpuffer einer Characteristic
pub type ValueBuffer = [u8; PAYLOAD_CAPACITY];

pub const STRIP_SERVICE: Uuid = Uuid::new_short(STRIP_SERVICE_UUID);
pub const COLOR_CHARACTERISTIC: Uuid = Uuid::new_short(Endpoint::Color.uuid());
pub const PATTERN_CHARACTERISTIC: Uuid = Uuid::new_short(Endpoint::Pattern.uuid());
pub const BRIGHTNESS_CHARACTERISTIC: Uuid = Uuid::new_short(Endpoint::Brightness.uuid());

#[gatt_server]
pub struct StripServer {
    pub strip_service: StripService,
}

#[gatt_service(uuid = STRIP_SERVICE)]
pub struct StripService {
    /// Grundfarbe als Hex-Text, z.B. "FF8800"
    #[descriptor(uuid = descriptors::CHARACTERISTIC_USER_DESCRIPTION, read, value = Endpoint::Color.description())]
    #[characteristic(uuid = COLOR_CHARACTERISTIC, read, write, notify, value = INITIAL_COLOR_VALUE)]
    pub color: ValueBuffer,

    /// Pattern-Index als Oktal-Text, z.B. "3"
    #[descriptor(uuid = descriptors::CHARACTERISTIC_USER_DESCRIPTION, read, value = Endpoint::Pattern.description())]
    #[characteristic(uuid = PATTERN_CHARACTERISTIC, read, write, notify, value = INITIAL_PATTERN_VALUE)]
    pub pattern: ValueBuffer,

    /// Helligkeit als Oktal-Text, z.B. "377"
    #[descriptor(uuid = descriptors::CHARACTERISTIC_USER_DESCRIPTION, read, value = Endpoint::Brightness.description())]
    #[characteristic(uuid = BRIGHTNESS_CHARACTERISTIC, read, write, notify, value = INITIAL_BRIGHTNESS_VALUE)]
    pub brightness: ValueBuffer,
}

impl StripServer<'_> {
    /// Characteristic für einen Endpoint
    pub fn characteristic(&self, endpoint: Endpoint) -> &Characteristic<ValueBuffer> {
        match endpoint {
            Endpoint::Color => &self.strip_service.color,
            Endpoint::Pattern => &self.strip_service.pattern,
            Endpoint::Brightness => &self.strip_service.brightness,
        }
    }

    /// Endpoint zu einem Attribut-Handle (None für Descriptoren etc.)
    pub fn endpoint_for(&self, handle: u16) -> Option<Endpoint> {
        [Endpoint::Color, Endpoint::Pattern, Endpoint::Brightness]
            .into_iter()
            .find(|endpoint| self.characteristic(*endpoint).handle == handle)
    }
}
