// [libs/core/byte-stream/src/reader.rs]
/*!
 * =================================================================
 * APARATO: LITTLE-ENDIAN READER (V3.2 - SOBERANO)
 * CLASIFICACIÓN: CORE INFRASTRUCTURE (ESTRATO L1)
 * RESPONSABILIDAD: DECODIFICACIÓN SECUENCIAL DEL FLUJO DE BLOQUES
 *
 * # Mathematical Proof (Bounded Consumption):
 * El cursor mantiene el invariante 'position <= region.len()' tras
 * toda operación. Una lectura que lo violaría retorna el fallo con
 * la posición y el ancho solicitados, sin avanzar el cursor.
 * =================================================================
 */

use byteorder::{ByteOrder, LittleEndian};
use thiserror::Error;

/// Fallos del cursor de lectura sobre la región contigua.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum StreamFault {
    /// La lectura solicitada excede el final de la región.
    #[error("Lectura fuera de límites: se pidieron {requested} bytes en la posición {position} de una región de {region_length}")]
    OutOfBounds {
        /// Posición del cursor al momento del fallo.
        position: usize,
        /// Ancho solicitado en bytes.
        requested: usize,
        /// Longitud total de la región.
        region_length: usize,
    },
}

/// Cursor de lectura Little-Endian sobre una región de bytes prestada.
///
/// La vida `'a` liga cada slice capturado (scripts, hashes) a la región
/// de origen: los campos "puntero" del modelo de datos nunca sobreviven
/// al buffer del bloque que los contiene.
pub struct ByteReader<'a> {
    region: &'a [u8],
    position: usize,
}

impl<'a> ByteReader<'a> {
    /// Construye un cursor al inicio de la región.
    #[must_use]
    pub fn new(region: &'a [u8]) -> Self {
        Self { region, position: 0 }
    }

    /// Posición actual del cursor, en bytes desde el inicio de la región.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Bytes aún disponibles por delante del cursor.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.region.len() - self.position
    }

    /// Sub-región consumida entre dos posiciones; el parser la usa para
    /// recuperar la serialización cruda de una transacción completa.
    pub fn slice_between(&self, start: usize, end: usize) -> Result<&'a [u8], StreamFault> {
        if start > end || end > self.region.len() {
            return Err(StreamFault::OutOfBounds {
                position: start,
                requested: end.saturating_sub(start),
                region_length: self.region.len(),
            });
        }
        Ok(&self.region[start..end])
    }

    #[inline(always)]
    fn take(&mut self, width: usize) -> Result<&'a [u8], StreamFault> {
        if self.position + width > self.region.len() {
            return Err(StreamFault::OutOfBounds {
                position: self.position,
                requested: width,
                region_length: self.region.len(),
            });
        }
        let captured = &self.region[self.position..self.position + width];
        self.position += width;
        Ok(captured)
    }

    /// Lee un byte del flujo.
    #[inline(always)]
    pub fn read_u8(&mut self) -> Result<u8, StreamFault> {
        Ok(self.take(1)?[0])
    }

    /// Lee dos bytes Little-Endian.
    #[inline(always)]
    pub fn read_u16(&mut self) -> Result<u16, StreamFault> {
        Ok(LittleEndian::read_u16(self.take(2)?))
    }

    /// Lee cuatro bytes Little-Endian.
    #[inline(always)]
    pub fn read_u32(&mut self) -> Result<u32, StreamFault> {
        Ok(LittleEndian::read_u32(self.take(4)?))
    }

    /// Lee ocho bytes Little-Endian.
    #[inline(always)]
    pub fn read_u64(&mut self) -> Result<u64, StreamFault> {
        Ok(LittleEndian::read_u64(self.take(8)?))
    }

    /// Lee el valor de un output (entero de 64 bits con signo en satoshis).
    #[inline(always)]
    pub fn read_i64(&mut self) -> Result<i64, StreamFault> {
        Ok(LittleEndian::read_i64(self.take(8)?))
    }

    /// Captura la referencia a un hash de 32 bytes y avanza el cursor.
    #[inline(always)]
    pub fn read_hash_ref(&mut self) -> Result<&'a [u8; 32], StreamFault> {
        let position = self.position;
        let captured = self.take(32)?;
        captured.try_into().map_err(|_| StreamFault::OutOfBounds {
            position,
            requested: 32,
            region_length: self.region.len(),
        })
    }

    /// Captura una sub-región arbitraria (scripts) y avanza el cursor.
    #[inline(always)]
    pub fn read_slice(&mut self, length: usize) -> Result<&'a [u8], StreamFault> {
        self.take(length)
    }

    /// Lee un entero de longitud variable del protocolo Bitcoin.
    ///
    /// Codificación: un byte < 0xFD es el valor mismo; 0xFD anuncia un
    /// u16; 0xFE un u32; 0xFF un u64. El resultado se ensancha a u64.
    pub fn read_varint(&mut self) -> Result<u64, StreamFault> {
        let discriminator = self.read_u8()?;
        match discriminator {
            0xFD => Ok(u64::from(self.read_u16()?)),
            0xFE => Ok(u64::from(self.read_u32()?)),
            0xFF => self.read_u64(),
            immediate => Ok(u64::from(immediate)),
        }
    }
}
