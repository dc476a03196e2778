// [libs/infra/ledger/src/records_view.rs]
#![allow(unsafe_code)] // Autorizado exclusivamente para el mapeo de memoria virtual (mmap)

/*!
 * =================================================================
 * APARATO: ADDRESS RECORDS VIEW (V5.0 - SOBERANO)
 * CLASIFICACIÓN: INFRA LAYER (ESTRATO L3)
 * RESPONSABILIDAD: VISTA ZERO-COPY DE PublicKeyRecords.bin
 *
 * VISION HIPER-HOLÍSTICA:
 * La vista reconstruye la tabla de offsets en memoria al abrir y
 * resuelve cada registro por aritmética de offsets sobre la región
 * mapeada. El balance a un instante de corte se computa al vuelo
 * sumando los valores con signo de las entradas cronológicas.
 * =================================================================
 */

use crate::errors::IndexFault;
use byteorder::{ByteOrder, LittleEndian};
use chronicler_core_bytes::{ByteReader, StreamFault};
use chronicler_domain_models::{
    AddressRecordHeader, AddressTxEntry, RecordFault, ADDRESS_RECORD_HEADER_SIZE,
    ADDRESS_TX_ENTRY_SIZE, FILE_MAGIC,
};
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;
use tracing::info;

/// Vista mapeada de sólo lectura sobre PublicKeyRecords.bin.
pub struct PublicKeyRecordsView {
    map: Mmap,
    address_count: u32,
    record_offsets: Vec<u64>,
}

impl PublicKeyRecordsView {
    /// Abre el archivo de registros y reconstruye su tabla de offsets.
    ///
    /// # Errors:
    /// `RecordFault::BadMagic` ante una cabecera ajena o un archivo
    /// demasiado corto para su propia tabla.
    pub fn open(records_path: &Path) -> Result<Self, IndexFault> {
        let file_handle = File::open(records_path)?;
        let file_metadata = file_handle.metadata()?;
        if file_metadata.len() < 20 {
            return Err(IndexFault::Record(RecordFault::BadMagic));
        }

        // SAFETY: El mapeo se realiza sobre un descriptor verificado,
        // abierto en modo lectura exclusiva. Se asume inmutabilidad del
        // archivo en disco durante el tiempo de ejecución.
        let map = unsafe { Mmap::map(&file_handle)? };

        if map[0..FILE_MAGIC.len()] != FILE_MAGIC {
            return Err(IndexFault::Record(RecordFault::BadMagic));
        }
        let address_count = LittleEndian::read_u32(&map[FILE_MAGIC.len()..]);

        let table_start = 20usize;
        let table_end = table_start + address_count as usize * 8;
        if table_end > map.len() {
            return Err(IndexFault::Record(RecordFault::BadMagic));
        }
        let mut record_offsets = Vec::with_capacity(address_count as usize);
        for offset_index in 0..address_count as usize {
            record_offsets.push(LittleEndian::read_u64(
                &map[table_start + offset_index * 8..],
            ));
        }

        info!(
            "🚀 [RECORDS_VIEW]: MMAP success over '{}'. {} address records.",
            records_path.display(),
            address_count
        );

        Ok(Self {
            map,
            address_count,
            record_offsets,
        })
    }

    /// Total de registros por dirección.
    #[must_use]
    pub fn address_count(&self) -> u32 {
        self.address_count
    }

    /// Materializa la vista del registro en el índice dado.
    ///
    /// # Errors:
    /// Propaga truncamientos como `RecordFault::Truncated`.
    pub fn record(&self, address_index: u32) -> Result<AddressRecordView<'_>, IndexFault> {
        let record_offset = *self
            .record_offsets
            .get(address_index as usize)
            .ok_or(IndexFault::Record(RecordFault::BadMagic))? as usize;

        let header_region = self
            .map
            .get(record_offset..record_offset + ADDRESS_RECORD_HEADER_SIZE)
            .ok_or(IndexFault::Record(RecordFault::Truncated(
                StreamFault::OutOfBounds {
                    position: record_offset,
                    requested: ADDRESS_RECORD_HEADER_SIZE,
                    region_length: self.map.len(),
                },
            )))?;
        let mut header_reader = ByteReader::new(header_region);
        let header = AddressRecordHeader::read_from(&mut header_reader)
            .map_err(|stream_fault| IndexFault::Record(RecordFault::Truncated(stream_fault)))?;

        let entries_start = record_offset + ADDRESS_RECORD_HEADER_SIZE;
        let entries_end = entries_start + header.entry_count as usize * ADDRESS_TX_ENTRY_SIZE;
        let entries_region = self.map.get(entries_start..entries_end).ok_or(
            IndexFault::Record(RecordFault::Truncated(StreamFault::OutOfBounds {
                position: entries_start,
                requested: header.entry_count as usize * ADDRESS_TX_ENTRY_SIZE,
                region_length: self.map.len(),
            })),
        )?;

        Ok(AddressRecordView {
            header,
            entries_region,
        })
    }
}

/// Vista de un registro individual con sus entradas cronológicas.
pub struct AddressRecordView<'a> {
    /// Cabecera fija del registro.
    pub header: AddressRecordHeader,
    entries_region: &'a [u8],
}

impl AddressRecordView<'_> {
    /// Entrada cronológica en la posición dada.
    #[must_use]
    pub fn entry(&self, entry_index: u32) -> Option<AddressTxEntry> {
        let entry_start = entry_index as usize * ADDRESS_TX_ENTRY_SIZE;
        let entry_region = self
            .entries_region
            .get(entry_start..entry_start + ADDRESS_TX_ENTRY_SIZE)?;
        let mut entry_reader = ByteReader::new(entry_region);
        AddressTxEntry::read_from(&mut entry_reader).ok()
    }

    /// Iterador sobre todas las entradas en orden cronológico.
    pub fn entries(&self) -> impl Iterator<Item = AddressTxEntry> + '_ {
        (0..self.header.entry_count).filter_map(|entry_index| self.entry(entry_index))
    }

    /// Balance en satoshis al instante de corte dado (inclusive).
    ///
    /// Suma de valores con signo de las entradas con t <= corte.
    #[must_use]
    pub fn balance_at(&self, cutoff_timestamp: u32) -> i64 {
        self.entries()
            .filter(|entry| entry.timestamp <= cutoff_timestamp)
            .map(|entry| entry.signed_value())
            .sum()
    }

    /// Marca de tiempo de la última actividad registrada.
    #[must_use]
    pub fn last_activity(&self) -> Option<u32> {
        if self.header.entry_count == 0 {
            return None;
        }
        self.entry(self.header.entry_count - 1)
            .map(|entry| entry.timestamp)
    }
}
