// [libs/infra/ledger/src/dedup.rs]
/*!
 * =================================================================
 * APARATO: ADDRESS INTERN TABLE (V5.0 - SOBERANO)
 * CLASIFICACIÓN: INFRA LAYER (ESTRATO L3)
 * RESPONSABILIDAD: DEDUPLICACIÓN DE DIRECCIONES E ÍNDICES SECUENCIALES
 *
 * VISION HIPER-HOLÍSTICA:
 * 1. CRC BUCKETING: La tabla hash dispersa por CRC-32 de los 25 bytes,
 *    la misma función de bucketing del analizador histórico.
 * 2. FLAT PERSISTENCE: Cada dirección primera-vista se anexa de
 *    inmediato a PublicKeys.bin; el orden de inserción ES el índice.
 * 3. CHECKPOINT: El slot de conteo de la cabecera se reescribe en cada
 *    checkpoint para que el estado en disco sea recuperable a mitad
 *    de corrida.
 * =================================================================
 */

use crate::errors::IndexFault;
use byteorder::{LittleEndian, WriteBytesExt};
use chronicler_domain_models::{Address, FILE_MAGIC};
use std::collections::HashMap;
use std::fs::File;
use std::hash::{BuildHasherDefault, Hasher};
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::Path;
use tracing::info;

/// Dispersor CRC-32 para el bucketing de direcciones.
///
/// Implementa `std::hash::Hasher` sobre crc32fast, de modo que la
/// tabla estándar disperse exactamente como la tabla histórica.
#[derive(Default)]
pub struct Crc32Hasher {
    state: crc32fast::Hasher,
}

impl Hasher for Crc32Hasher {
    fn finish(&self) -> u64 {
        u64::from(self.state.clone().finalize())
    }

    fn write(&mut self, bytes: &[u8]) {
        self.state.update(bytes);
    }
}

type Crc32State = BuildHasherDefault<Crc32Hasher>;

/// Tabla de deduplicación de direcciones con persistencia plana.
pub struct AddressInternTable {
    index_by_address: HashMap<Address, u32, Crc32State>,
    writer: BufWriter<File>,
    total_keys_seen: u64,
}

impl AddressInternTable {
    /// Crea PublicKeys.bin con su cabecera (magic + slot de conteo).
    ///
    /// # Errors:
    /// Propaga los fallos de creación o escritura del archivo.
    pub fn create(table_path: &Path) -> Result<Self, IndexFault> {
        let file_handle = File::create(table_path)?;
        let mut writer = BufWriter::new(file_handle);
        writer.write_all(&FILE_MAGIC)?;
        writer.write_u32::<LittleEndian>(0)?;
        writer.flush()?;

        Ok(Self {
            index_by_address: HashMap::default(),
            writer,
            total_keys_seen: 0,
        })
    }

    /**
     * Interna una dirección y retorna su índice secuencial.
     *
     * La primera aparición asigna el próximo índice y anexa los 25
     * bytes al archivo; las siguientes sólo resuelven el índice.
     */
    pub fn intern(&mut self, address: &Address) -> Result<u32, IndexFault> {
        self.total_keys_seen += 1;
        if let Some(existing_index) = self.index_by_address.get(address) {
            return Ok(*existing_index);
        }
        let assigned_index = self.index_by_address.len() as u32;
        self.index_by_address.insert(*address, assigned_index);
        self.writer.write_all(address.as_bytes())?;
        Ok(assigned_index)
    }

    /// Cantidad de direcciones únicas internadas.
    #[must_use]
    pub fn unique_count(&self) -> u32 {
        self.index_by_address.len() as u32
    }

    /// Total de direcciones observadas (incluidas repeticiones).
    #[must_use]
    pub fn total_keys_seen(&self) -> u64 {
        self.total_keys_seen
    }

    /// Reescribe el slot de conteo de la cabecera y retorna al final.
    ///
    /// # Errors:
    /// Propaga los fallos de E/S del rebobinado.
    pub fn checkpoint(&mut self) -> Result<(), IndexFault> {
        self.writer.flush()?;
        let file_handle = self.writer.get_mut();
        let tail_position = file_handle.stream_position()?;
        file_handle.seek(SeekFrom::Start(FILE_MAGIC.len() as u64))?;
        file_handle.write_u32::<LittleEndian>(self.index_by_address.len() as u32)?;
        file_handle.flush()?;
        file_handle.seek(SeekFrom::Start(tail_position))?;
        Ok(())
    }

    /// Sella el archivo con el conteo final y reporta las métricas.
    ///
    /// # Errors:
    /// Propaga los fallos del checkpoint de cierre.
    pub fn seal(mut self) -> Result<u32, IndexFault> {
        self.checkpoint()?;
        let unique_count = self.unique_count();
        info!(
            "Saving {} unique public keys from {} keys encountered; deduplicated a total of {}",
            unique_count,
            self.total_keys_seen,
            self.total_keys_seen - u64::from(unique_count)
        );
        Ok(unique_count)
    }
}
