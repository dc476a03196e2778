// [libs/core/hash-engine/src/hashing.rs]
/*!
 * =================================================================
 * APARATO: DIGEST ENGINE (V4.0 - BITCOIN STANDARD)
 * CLASIFICACIÓN: CORE MATH (ESTRATO L1)
 * RESPONSABILIDAD: HASHING CRIPTOGRÁFICO DETERMINISTA
 *
 * VISION HIPER-HOLÍSTICA:
 * Implementa las funciones de resumen (Digest) requeridas por el
 * protocolo Bitcoin. Utiliza implementaciones Rust puras para evitar
 * dependencias de C (OpenSSL) y facilitar la compilación cruzada.
 * =================================================================
 */

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// Realiza un SHA-256 simple sobre el buffer de entrada.
#[inline(always)]
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let mut output = [0u8; 32];
    output.copy_from_slice(&hasher.finalize());
    output
}

/// Realiza el doble SHA-256 canónico de Bitcoin.
/// Algoritmo: $SHA256(SHA256(data))$
///
/// Es la función que identifica bloques (sobre la cabecera de 80 bytes)
/// y transacciones (sobre su serialización cruda completa).
#[inline(always)]
pub fn sha256d(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// Realiza un HASH160 estándar de Bitcoin.
/// Algoritmo: $RIPEMD160(SHA256(data))$
///
/// Utilizado para generar el Identificador de Llave Pública (KeyID)
/// que forma parte de las direcciones P2PKH y P2SH.
#[inline(always)]
pub fn hash160(data: &[u8]) -> [u8; 20] {
    // Paso 1: SHA-256
    let sha_result = sha256(data);

    // Paso 2: RIPEMD-160
    let mut ripe_hasher = Ripemd160::new();
    ripe_hasher.update(sha_result);

    // Copia al buffer de salida sobre el stack
    let mut output = [0u8; 20];
    output.copy_from_slice(&ripe_hasher.finalize());
    output
}

/// RIPEMD-160 directo, sin el paso SHA-256 previo.
///
/// Requerido por la síntesis de la dirección compuesta MultiSig, que
/// resume la concatenación de las cinco ranuras de dirección.
#[inline(always)]
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    let mut ripe_hasher = Ripemd160::new();
    ripe_hasher.update(data);
    let mut output = [0u8; 20];
    output.copy_from_slice(&ripe_hasher.finalize());
    output
}

/// CRC-32 (IEEE) para el bucketing rápido de la tabla de deduplicación.
#[inline(always)]
pub fn crc32(data: &[u8]) -> u32 {
    crc32fast::hash(data)
}
