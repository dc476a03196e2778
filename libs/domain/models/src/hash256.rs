// [libs/domain/models/src/hash256.rs]
/*!
 * =================================================================
 * APARATO: HASH256 VALUE TYPE (V3.1 - SOBERANO)
 * CLASIFICACIÓN: DOMAIN LAYER (ESTRATO L2)
 * RESPONSABILIDAD: IDENTIDAD DE 256 BITS CON PLEGADO PARA TABLAS
 *
 * # Mathematical Proof (Fold Dispersion):
 * El plegado XOR de las ocho palabras de 32 bits preserva la entropía
 * uniforme de un digesto SHA-256, por lo que es apto como función de
 * dispersión para tablas de direccionamiento abierto.
 * =================================================================
 */

use std::fmt;

/// Identidad de 256 bits con semántica de valor.
///
/// Representa tanto hashes de bloque como hashes de transacción. La
/// igualdad es bit a bit; el plegado de 32 bits alimenta las tablas
/// hash del escáner y del indexador.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct Hash256(pub [u8; 32]);

impl Hash256 {
    /// Hash completamente nulo; identifica al padre del bloque génesis.
    pub const ZERO: Hash256 = Hash256([0u8; 32]);

    /// Construye la identidad desde una región prestada de 32 bytes.
    #[must_use]
    pub fn from_bytes(source: &[u8; 32]) -> Self {
        Hash256(*source)
    }

    /// Vista cruda de los 32 bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Plegado XOR de las ocho palabras de 32 bits.
    #[must_use]
    pub fn folded(&self) -> u32 {
        let mut accumulator = 0u32;
        for word_chunk in self.0.chunks_exact(4) {
            accumulator ^= u32::from_le_bytes([
                word_chunk[0],
                word_chunk[1],
                word_chunk[2],
                word_chunk[3],
            ]);
        }
        accumulator
    }

    /// Verdadero si la identidad es el hash nulo.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl std::hash::Hash for Hash256 {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_u32(self.folded());
    }
}

impl fmt::Display for Hash256 {
    /// Presentación en hexadecimal invertido, la convención visual de
    /// los exploradores de Bitcoin.
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0.iter().rev() {
            write!(formatter, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Hash256 {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "Hash256({})", self)
    }
}
