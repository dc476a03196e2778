// [libs/infra/ledger/src/stream_view.rs]
#![allow(unsafe_code)] // Autorizado exclusivamente para el mapeo de memoria virtual (mmap)

/*!
 * =================================================================
 * APARATO: LEDGER STREAM VIEWS (V5.0 - SOBERANO)
 * CLASIFICACIÓN: INFRA LAYER (ESTRATO L3)
 * RESPONSABILIDAD: RELECTURA ZERO-COPY DE LOS ARCHIVOS DE LA PASADA 1
 *
 * VISION HIPER-HOLÍSTICA:
 * Las vistas re-resuelven el puntero base del mapa en cada apertura;
 * aguas abajo sólo circulan offsets enteros, nunca punteros vivos.
 * La pasada 2 y la analítica comparten estas mismas vistas.
 * =================================================================
 */

use crate::errors::IndexFault;
use byteorder::{ByteOrder, LittleEndian};
use chronicler_core_bytes::{ByteReader, StreamFault};
use chronicler_domain_models::{Address, PersistedTransaction, RecordFault, FILE_MAGIC};
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;
use tracing::info;

/// Bytes de cabecera comunes: magic de 16 + slot de conteo u32.
pub const STREAM_HEADER_SIZE: u64 = 20;

/// Mapea un archivo del ledger y valida su cabecera.
fn map_ledger_file(file_path: &Path) -> Result<(Mmap, u32), IndexFault> {
    let file_handle = File::open(file_path)?;
    let file_metadata = file_handle.metadata()?;
    if file_metadata.len() < STREAM_HEADER_SIZE {
        return Err(IndexFault::Record(RecordFault::BadMagic));
    }

    // SAFETY: El mapeo se realiza sobre un descriptor verificado,
    // abierto en modo lectura exclusiva. Se asume inmutabilidad del
    // archivo en disco durante el tiempo de ejecución.
    let map = unsafe { Mmap::map(&file_handle)? };

    if map[0..FILE_MAGIC.len()] != FILE_MAGIC {
        return Err(IndexFault::Record(RecordFault::BadMagic));
    }
    let declared_count = LittleEndian::read_u32(&map[FILE_MAGIC.len()..]);
    Ok((map, declared_count))
}

/// Vista mapeada de sólo lectura sobre TransactionFile.bin.
pub struct TransactionStreamView {
    map: Mmap,
    transaction_count: u32,
}

impl TransactionStreamView {
    /// Abre y valida el flujo plano de transacciones.
    ///
    /// # Errors:
    /// `RecordFault::BadMagic` ante una cabecera ajena o truncada.
    pub fn open(stream_path: &Path) -> Result<Self, IndexFault> {
        let (map, transaction_count) = map_ledger_file(stream_path)?;
        info!(
            "🚀 [STREAM_VIEW]: MMAP success over '{}'. {} transactions declared.",
            stream_path.display(),
            transaction_count
        );
        Ok(Self {
            map,
            transaction_count,
        })
    }

    /// Total de transacciones declarado en la cabecera.
    #[must_use]
    pub fn transaction_count(&self) -> u32 {
        self.transaction_count
    }

    /// Decodifica la transacción que comienza en el offset dado.
    ///
    /// # Errors:
    /// Propaga truncamientos como `RecordFault::Truncated`.
    pub fn read_at(&self, record_offset: u64) -> Result<PersistedTransaction, IndexFault> {
        let region =
            self.map
                .get(record_offset as usize..)
                .ok_or(IndexFault::Record(RecordFault::Truncated(
                    StreamFault::OutOfBounds {
                        position: record_offset as usize,
                        requested: 0,
                        region_length: self.map.len(),
                    },
                )))?;
        let mut reader = ByteReader::new(region);
        PersistedTransaction::read_from(&mut reader)
            .map_err(|stream_fault| IndexFault::Record(RecordFault::Truncated(stream_fault)))
    }

    /// Iterador secuencial sobre todos los registros del flujo.
    #[must_use]
    pub fn iter(&self) -> TransactionStreamIter<'_> {
        TransactionStreamIter {
            view: self,
            position: STREAM_HEADER_SIZE,
            remaining: self.transaction_count,
        }
    }
}

/// Iterador secuencial del flujo plano; entrega (offset, registro).
pub struct TransactionStreamIter<'a> {
    view: &'a TransactionStreamView,
    position: u64,
    remaining: u32,
}

impl Iterator for TransactionStreamIter<'_> {
    type Item = Result<(u64, PersistedTransaction), IndexFault>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let record_offset = self.position;
        match self.view.read_at(record_offset) {
            Ok(record) => {
                self.position += record.encoded_size() as u64;
                self.remaining -= 1;
                Some(Ok((record_offset, record)))
            }
            Err(read_fault) => {
                self.remaining = 0;
                Some(Err(read_fault))
            }
        }
    }
}

/// Vista mapeada de sólo lectura sobre PublicKeys.bin.
pub struct PublicKeyTableView {
    map: Mmap,
    address_count: u32,
}

impl PublicKeyTableView {
    /// Abre y valida la tabla plana de direcciones.
    ///
    /// # Errors:
    /// `RecordFault::BadMagic` ante una cabecera ajena o truncada.
    pub fn open(table_path: &Path) -> Result<Self, IndexFault> {
        let (map, address_count) = map_ledger_file(table_path)?;
        info!(
            "🚀 [KEY_TABLE]: MMAP success over '{}'. {} unique addresses declared.",
            table_path.display(),
            address_count
        );
        Ok(Self { map, address_count })
    }

    /// Total de direcciones únicas declarado en la cabecera.
    #[must_use]
    pub fn address_count(&self) -> u32 {
        self.address_count
    }

    /// Dirección de 25 bytes en el índice secuencial dado.
    #[must_use]
    pub fn address_at(&self, address_index: u32) -> Option<Address> {
        if address_index >= self.address_count {
            return None;
        }
        let record_start = STREAM_HEADER_SIZE as usize + address_index as usize * 25;
        let raw_address = self.map.get(record_start..record_start + 25)?;
        let mut address_bytes = [0u8; 25];
        address_bytes.copy_from_slice(raw_address);
        Some(Address(address_bytes))
    }
}
