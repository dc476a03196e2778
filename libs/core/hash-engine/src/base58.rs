// [libs/core/hash-engine/src/base58.rs]
/*!
 * =================================================================
 * APARATO: BASE58CHECK CODEC (V4.1 - SOBERANO)
 * CLASIFICACIÓN: CORE MATH (ESTRATO L1)
 * RESPONSABILIDAD: CODIFICACIÓN Y VALIDACIÓN DE DIRECCIONES (ZERO-ALLOC DECODE)
 *
 * VISION HIPER-HOLÍSTICA:
 * El codec opera sobre la dirección binaria completa de 25 bytes
 * (versión + HASH160 + checksum). La verificación del checksum es
 * conjuntiva: los cuatro bytes deben coincidir con el doble SHA-256
 * del segmento [0..21] para que la decodificación sea aceptada.
 * =================================================================
 */

use crate::errors::AddressFault;
use crate::hashing::sha256d;
use tracing::debug;

/// Tamaño canónico de una dirección Bitcoin decodificada (25 bytes).
pub const ADDRESS_SIZE_BYTES: usize = 25;

/// Codifica una dirección binaria de 25 bytes a su forma ASCII Base58.
///
/// La dirección ya contiene su checksum en los bytes [21..25], por lo
/// que se emplea la codificación plana (sin `with_check`, que añadiría
/// un segundo checksum).
#[must_use]
pub fn encode_address(address: &[u8; ADDRESS_SIZE_BYTES]) -> String {
    bs58::encode(address).into_string()
}

/// Decodifica una cadena ASCII a la dirección binaria de 25 bytes.
///
/// # Errors:
/// - `AddressFault::Base58` ante un alfabeto ilegal.
/// - `AddressFault::InvalidLength` si el payload no mide 25 bytes.
/// - `AddressFault::ChecksumMismatch` si los 4 bytes finales no son
///   el prefijo de `SHA256d(bytes[0..21])`.
pub fn decode_address(ascii_address: &str) -> Result<[u8; ADDRESS_SIZE_BYTES], AddressFault> {
    let mut stack_decode_buffer = [0u8; ADDRESS_SIZE_BYTES];

    let bytes_written_count = bs58::decode(ascii_address.trim())
        .onto(&mut stack_decode_buffer)
        .map_err(|fault_metadata| {
            debug!(
                "Decoding bypassed for string [{}]: {:?}",
                ascii_address, fault_metadata
            );
            AddressFault::from(fault_metadata)
        })?;

    if bytes_written_count != ADDRESS_SIZE_BYTES {
        return Err(AddressFault::InvalidLength(bytes_written_count));
    }

    verify_checksum(&stack_decode_buffer)?;
    Ok(stack_decode_buffer)
}

/// Valida el sello de integridad de una dirección binaria ya decodificada.
pub fn verify_checksum(address: &[u8; ADDRESS_SIZE_BYTES]) -> Result<(), AddressFault> {
    let expected_checksum = sha256d(&address[0..21]);
    if address[21..25] == expected_checksum[0..4] {
        Ok(())
    } else {
        Err(AddressFault::ChecksumMismatch)
    }
}

/// Sella los bytes [21..25] con el checksum canónico del payload [0..21].
pub(crate) fn seal_checksum(address: &mut [u8; ADDRESS_SIZE_BYTES]) {
    let checksum = sha256d(&address[0..21]);
    address[21..25].copy_from_slice(&checksum[0..4]);
}
