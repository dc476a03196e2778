// [libs/core/hash-engine/src/errors.rs]
// =================================================================
// APARATO: HASH ENGINE ERRORS
// RESPONSABILIDAD: CATÁLOGO DE FALLOS DE DERIVACIÓN Y DECODIFICACIÓN
// ESTADO: ELITE COMPLIANCE (FULL RUSTDOC)
// =================================================================

use thiserror::Error;

/// Define los fallos posibles al derivar o decodificar direcciones Bitcoin.
///
/// Este enum centraliza los rechazos del motor Base58Check y de las rutas
/// de derivación desde llaves públicas ECDSA, cubriendo desde alfabetos
/// ilegales hasta checksums corruptos.
#[derive(Error, Debug)]
pub enum AddressFault {
    /// El motor bs58 rechazó la cadena (alfabeto ilegal o desbordamiento).
    #[error("Error de decodificación Base58: {0}")]
    Base58(#[from] bs58::decode::Error),

    /// La carga decodificada no mide exactamente 25 bytes.
    ///
    /// Una dirección binaria Bitcoin Legacy es siempre:
    /// 1 byte de red + 20 bytes de HASH160 + 4 bytes de checksum.
    #[error("Longitud de dirección inválida: {0} bytes (se esperaban 25)")]
    InvalidLength(usize),

    /// Los 4 bytes finales no coinciden con SHA256d(prefijo + payload).
    #[error("Checksum Base58Check corrupto")]
    ChecksumMismatch,

    /// El primer byte de la llave pública no corresponde a su formato.
    ///
    /// Las llaves sin comprimir inician en 0x04; las comprimidas en
    /// 0x02 o 0x03.
    #[error("Prefijo de llave pública inválido: 0x{0:02x}")]
    InvalidKeyPrefix(u8),
}
