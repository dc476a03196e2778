// [libs/domain/models/src/address.rs]
/*!
 * =================================================================
 * APARATO: ADDRESS VALUE TYPE (V3.0 - SOBERANO)
 * CLASIFICACIÓN: DOMAIN LAYER (ESTRATO L2)
 * RESPONSABILIDAD: DIRECCIÓN BINARIA DE 25 BYTES CON SELLO VERIFICABLE
 * =================================================================
 */

use chronicler_core_hash::{encode_address, AddressFault, ADDRESS_SIZE_BYTES};
use std::fmt;

/// Dirección Bitcoin binaria: 1 byte de red + HASH160 + 4 de checksum.
///
/// Invariante del dominio: los bytes [21..25] son el prefijo de
/// `SHA256d(bytes[0..21])`. Toda dirección que ingresa por derivación
/// del motor de hashing ya lo cumple; las decodificadas desde ASCII lo
/// verifican en frontera.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Address(pub [u8; ADDRESS_SIZE_BYTES]);

impl Address {
    /// Dirección completamente nula; marca ranuras MultiSig vacantes.
    pub const ZERO: Address = Address([0u8; ADDRESS_SIZE_BYTES]);

    /// Vista cruda de los 25 bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; ADDRESS_SIZE_BYTES] {
        &self.0
    }

    /// Verdadero si la ranura está vacante.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; ADDRESS_SIZE_BYTES]
    }

    /// Forma ASCII Base58 de la dirección.
    #[must_use]
    pub fn to_ascii(&self) -> String {
        encode_address(&self.0)
    }

    /// Decodifica y valida una dirección desde su forma ASCII.
    ///
    /// # Errors:
    /// Propaga los fallos del codec (longitud, alfabeto, checksum).
    pub fn from_ascii(ascii_address: &str) -> Result<Self, AddressFault> {
        chronicler_core_hash::decode_address(ascii_address).map(Address)
    }
}

impl From<[u8; ADDRESS_SIZE_BYTES]> for Address {
    fn from(raw: [u8; ADDRESS_SIZE_BYTES]) -> Self {
        Address(raw)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.to_ascii())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "Address({})", self.to_ascii())
    }
}
