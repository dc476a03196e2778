// [libs/core/hash-engine/src/address.rs]
/*!
 * =================================================================
 * APARATO: ADDRESS DERIVATION ENGINE (V5.0 - SOBERANO)
 * CLASIFICACIÓN: CORE MATH (ESTRATO L1)
 * RESPONSABILIDAD: TRANSFORMACIÓN DE LLAVES Y HASHES A DIRECCIONES (ZERO-ALLOC)
 *
 * VISION HIPER-HOLÍSTICA:
 * Implementa las cinco rutas de derivación que el clasificador de
 * scripts necesita: llave sin comprimir (0x04), llave comprimida
 * (0x02/0x03), llave comprimida truncada, HASH160 directo (P2PKH) y
 * HASH160 de script (P2SH). Toda la aritmética ocurre sobre buffers
 * del stack de 25 bytes.
 * =================================================================
 */

use crate::base58::{seal_checksum, ADDRESS_SIZE_BYTES};
use crate::errors::AddressFault;
use crate::hashing::hash160;

/// Prefijo de red para Bitcoin Mainnet (0x00 -> '1').
pub const MAINNET_VERSION_BYTE: u8 = 0x00;
/// Prefijo de red para direcciones Pay-to-Script-Hash (0x05 -> '3').
pub const SCRIPT_HASH_VERSION_BYTE: u8 = 0x05;

/// Longitudes canónicas del protocolo Bitcoin.
const UNCOMPRESSED_PUBKEY_SIZE: usize = 65;
const COMPRESSED_PUBKEY_SIZE: usize = 33;

/// Dirección sustituta para scripts cuyo formato de llave no se pudo
/// descifrar. Idéntica semántica a la llave ficticia del analizador
/// histórico: permanece estable para que los reportes sean comparables.
const DUMMY_KEY_ASCII: &str = "1BadkEyPaj5oW2Uw4nY5BkYbPRYyTyqs9A";
/// Dirección sustituta para scripts de desafío de longitud cero.
const ZERO_BYTE_ASCII: &str = "1zeroBTYRExUcufrTkwg27LsAvrhehtCJ";

/**
 * Deriva la dirección de una llave pública ECDSA sin comprimir (65 bytes).
 *
 * # Errors:
 * Retorna `AddressFault::InvalidKeyPrefix` si el primer byte no es 0x04.
 */
pub fn uncompressed_public_key_to_address(
    public_key: &[u8; UNCOMPRESSED_PUBKEY_SIZE],
) -> Result<[u8; ADDRESS_SIZE_BYTES], AddressFault> {
    if public_key[0] != 0x04 {
        return Err(AddressFault::InvalidKeyPrefix(public_key[0]));
    }
    Ok(ripemd160_to_address(&hash160(public_key)))
}

/**
 * Deriva la dirección de una llave pública ECDSA comprimida (33 bytes).
 *
 * # Errors:
 * Retorna `AddressFault::InvalidKeyPrefix` si el primer byte no es
 * 0x02 ni 0x03.
 */
pub fn compressed_public_key_to_address(
    public_key: &[u8; COMPRESSED_PUBKEY_SIZE],
) -> Result<[u8; ADDRESS_SIZE_BYTES], AddressFault> {
    if public_key[0] != 0x02 && public_key[0] != 0x03 {
        return Err(AddressFault::InvalidKeyPrefix(public_key[0]));
    }
    Ok(ripemd160_to_address(&hash160(public_key)))
}

/**
 * Deriva la dirección de una llave comprimida truncada (32 bytes de X).
 *
 * El script sólo conserva la coordenada X; se reconstruye el prefijo
 * de paridad 0x02 antes de aplicar la cadena de hashing estándar.
 */
#[must_use]
pub fn truncated_compressed_key_to_address(x_coordinate: &[u8; 32]) -> [u8; ADDRESS_SIZE_BYTES] {
    let mut stack_buffer = [0u8; COMPRESSED_PUBKEY_SIZE];
    stack_buffer[0] = 0x02;
    stack_buffer[1..33].copy_from_slice(x_coordinate);
    ripemd160_to_address(&hash160(&stack_buffer))
}

/**
 * Envuelve un HASH160 de 20 bytes como dirección Mainnet (P2PKH).
 */
#[must_use]
#[inline(always)]
pub fn ripemd160_to_address(key_hash: &[u8; 20]) -> [u8; ADDRESS_SIZE_BYTES] {
    wrap_hash_with_version(key_hash, MAINNET_VERSION_BYTE)
}

/**
 * Envuelve un HASH160 de 20 bytes como dirección de script (P2SH).
 */
#[must_use]
#[inline(always)]
pub fn ripemd160_to_script_address(script_hash: &[u8; 20]) -> [u8; ADDRESS_SIZE_BYTES] {
    wrap_hash_with_version(script_hash, SCRIPT_HASH_VERSION_BYTE)
}

/// Motor interno: prefijo de red + hash + sellado de checksum.
#[inline(always)]
fn wrap_hash_with_version(key_hash: &[u8; 20], version_byte: u8) -> [u8; ADDRESS_SIZE_BYTES] {
    let mut address = [0u8; ADDRESS_SIZE_BYTES];
    address[0] = version_byte;
    address[1..21].copy_from_slice(key_hash);
    seal_checksum(&mut address);
    address
}

/// Dirección sustituta binaria para llaves indescifrables.
///
/// # Errors:
/// Sólo puede fallar si la constante ASCII fuera corrompida en origen,
/// lo cual la matriz de certificación detecta de inmediato.
pub fn dummy_key_address() -> Result<[u8; ADDRESS_SIZE_BYTES], AddressFault> {
    placeholder_from_ascii(DUMMY_KEY_ASCII)
}

/// Dirección sustituta binaria para scripts de longitud cero.
pub fn zero_length_address() -> Result<[u8; ADDRESS_SIZE_BYTES], AddressFault> {
    placeholder_from_ascii(ZERO_BYTE_ASCII)
}

/// Decodifica una constante sustituta validando sólo la longitud y
/// resellando el checksum, de modo que el invariante de los bytes
/// [21..25] se cumpla aunque la cadena histórica careciera de sello.
fn placeholder_from_ascii(ascii_address: &str) -> Result<[u8; ADDRESS_SIZE_BYTES], AddressFault> {
    let mut stack_decode_buffer = [0u8; ADDRESS_SIZE_BYTES];
    let bytes_written_count = bs58::decode(ascii_address).onto(&mut stack_decode_buffer)?;
    if bytes_written_count != ADDRESS_SIZE_BYTES {
        return Err(AddressFault::InvalidLength(bytes_written_count));
    }
    seal_checksum(&mut stack_decode_buffer);
    Ok(stack_decode_buffer)
}
