// [libs/core/hash-engine/src/lib.rs]
/*!
 * =================================================================
 * APARATO: HASH ENGINE HUB (V4.0 - SOBERANO)
 * CLASIFICACIÓN: CORE MATH (ESTRATO L1)
 * RESPONSABILIDAD: EXPOSICIÓN NOMINAL DE DIGESTOS Y DIRECCIONES
 *
 * VISION HIPER-HOLÍSTICA:
 * Concentra las primitivas de resumen (SHA-256d, HASH160, CRC-32) y
 * la derivación de direcciones Base58Check consumidas por el parser
 * de bloques, el clasificador de scripts y la tabla de deduplicación
 * de llaves públicas.
 * =================================================================
 */

pub mod address;
pub mod base58;
pub mod errors;
pub mod hashing;

pub use address::{
    compressed_public_key_to_address, dummy_key_address, ripemd160_to_address,
    ripemd160_to_script_address, truncated_compressed_key_to_address,
    uncompressed_public_key_to_address, zero_length_address, MAINNET_VERSION_BYTE,
    SCRIPT_HASH_VERSION_BYTE,
};
pub use base58::{decode_address, encode_address, verify_checksum, ADDRESS_SIZE_BYTES};
pub use errors::AddressFault;
pub use hashing::{crc32, hash160, sha256, sha256d};
