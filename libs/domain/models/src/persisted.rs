// [libs/domain/models/src/persisted.rs]
/*!
 * =================================================================
 * APARATO: PERSISTED LEDGER RECORDS (V5.0 - SOBERANO)
 * CLASIFICACIÓN: DOMAIN LAYER (ESTRATO L2)
 * RESPONSABILIDAD: CODIFICACIÓN BINARIA CONGELADA DE LOS ARCHIVOS PROPIOS
 *
 * VISION HIPER-HOLÍSTICA:
 * 1. BINARY PARITY: Todo entero viaja en Little-Endian de ancho fijo;
 *    el formato queda congelado para que los análisis sean repetibles
 *    entre ejecuciones y arquitecturas.
 * 2. OFFSETS, NO PUNTEROS: la relación "transacción productora" se
 *    expresa como offset u64 dentro de TransactionFile.bin, portable a
 *    través de la frontera Pass1/Pass2 y de recargas de mmap.
 * =================================================================
 */

use crate::hash256::Hash256;
use crate::key_type::KeyType;
use byteorder::{LittleEndian, WriteBytesExt};
use chronicler_core_bytes::{ByteReader, StreamFault};
use std::io::{self, Write};
use thiserror::Error;

/// Sello mágico de 16 bytes (ASCII + NUL) de los tres archivos binarios.
pub const FILE_MAGIC: [u8; 16] = *b"0123456789ABCDE\0";

/// Tamaño en disco de un input persistido (8 + 4 + 8 + 4 + 4).
pub const PERSISTED_INPUT_SIZE: usize = 28;
/// Tamaño en disco de un output persistido (8 + 4 + 4 + 4).
pub const PERSISTED_OUTPUT_SIZE: usize = 20;
/// Tamaño en disco de la cabecera de un registro por dirección.
pub const ADDRESS_RECORD_HEADER_SIZE: usize = 32;
/// Tamaño en disco de una entrada cronológica por dirección.
pub const ADDRESS_TX_ENTRY_SIZE: usize = 32;

/// Fallos al leer los formatos binarios propios.
#[derive(Error, Debug)]
pub enum RecordFault {
    /// Fallo de E/S del sistema operativo.
    #[error("Error de I/O sobre el archivo del ledger: {0}")]
    Io(#[from] io::Error),

    /// La región mapeada terminó antes de completar el registro.
    #[error("Registro truncado: {0}")]
    Truncated(#[from] StreamFault),

    /// El sello mágico de 16 bytes no coincide.
    #[error("Sello mágico inválido en el archivo del ledger")]
    BadMagic,
}

/// Input persistido: referencia por offset a su transacción productora.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PersistedInput {
    /// Offset de la transacción productora dentro de TransactionFile.bin.
    /// Cero cuando la entrada es coinbase.
    pub producing_offset: u64,
    /// Índice del output gastado (0xFFFFFFFF en coinbase).
    pub output_index: u32,
    /// Valor resuelto del input en satoshis.
    pub value: u64,
    /// Longitud del script de respuesta original.
    pub script_length: u32,
    /// Marca de tiempo de la transacción productora.
    pub producing_timestamp: u32,
}

impl PersistedInput {
    /// Serializa el input al flujo de escritura.
    pub fn write_to<W: Write>(&self, sink: &mut W) -> io::Result<()> {
        sink.write_u64::<LittleEndian>(self.producing_offset)?;
        sink.write_u32::<LittleEndian>(self.output_index)?;
        sink.write_u64::<LittleEndian>(self.value)?;
        sink.write_u32::<LittleEndian>(self.script_length)?;
        sink.write_u32::<LittleEndian>(self.producing_timestamp)
    }

    /// Reconstruye el input desde una región mapeada.
    pub fn read_from(reader: &mut ByteReader<'_>) -> Result<Self, StreamFault> {
        Ok(Self {
            producing_offset: reader.read_u64()?,
            output_index: reader.read_u32()?,
            value: reader.read_u64()?,
            script_length: reader.read_u32()?,
            producing_timestamp: reader.read_u32()?,
        })
    }
}

/// Output persistido: valor + índice en la tabla de direcciones.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PersistedOutput {
    /// Valor del output en satoshis.
    pub value: u64,
    /// Índice secuencial de la dirección en PublicKeys.bin.
    pub address_index: u32,
    /// Forma de llave del output.
    pub key_type: KeyType,
    /// Longitud del script de desafío original.
    pub script_length: u32,
}

impl PersistedOutput {
    /// Serializa el output al flujo de escritura.
    pub fn write_to<W: Write>(&self, sink: &mut W) -> io::Result<()> {
        sink.write_u64::<LittleEndian>(self.value)?;
        sink.write_u32::<LittleEndian>(self.address_index)?;
        sink.write_u32::<LittleEndian>(self.key_type as u32)?;
        sink.write_u32::<LittleEndian>(self.script_length)
    }

    /// Reconstruye el output desde una región mapeada.
    pub fn read_from(reader: &mut ByteReader<'_>) -> Result<Self, StreamFault> {
        Ok(Self {
            value: reader.read_u64()?,
            address_index: reader.read_u32()?,
            key_type: KeyType::from_u32(reader.read_u32()?),
            script_length: reader.read_u32()?,
        })
    }
}

/// Transacción compacta tal como reside en TransactionFile.bin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersistedTransaction {
    /// Hash content-addressed de la transacción.
    pub transaction_hash: Hash256,
    /// Número de bloque canónico que la contiene.
    pub block_number: u32,
    /// Versión declarada de la transacción.
    pub version: u32,
    /// Marca de tiempo del bloque contenedor.
    pub timestamp: u32,
    /// Lock-time del protocolo.
    pub lock_time: u32,
    /// Longitud de la serialización cruda original.
    pub serialized_length: u32,
    /// Inputs con su valor ya resuelto.
    pub inputs: Vec<PersistedInput>,
    /// Outputs con su dirección ya internada.
    pub outputs: Vec<PersistedOutput>,
}

impl PersistedTransaction {
    /// Tamaño que el registro ocupará en disco.
    #[must_use]
    pub fn encoded_size(&self) -> usize {
        60 + self.inputs.len() * PERSISTED_INPUT_SIZE + self.outputs.len() * PERSISTED_OUTPUT_SIZE
    }

    /// Serializa el registro completo al flujo de escritura.
    pub fn write_to<W: Write>(&self, sink: &mut W) -> io::Result<()> {
        sink.write_all(self.transaction_hash.as_bytes())?;
        sink.write_u32::<LittleEndian>(self.block_number)?;
        sink.write_u32::<LittleEndian>(self.version)?;
        sink.write_u32::<LittleEndian>(self.timestamp)?;
        sink.write_u32::<LittleEndian>(self.lock_time)?;
        sink.write_u32::<LittleEndian>(self.serialized_length)?;
        sink.write_u32::<LittleEndian>(self.inputs.len() as u32)?;
        for input_record in &self.inputs {
            input_record.write_to(sink)?;
        }
        sink.write_u32::<LittleEndian>(self.outputs.len() as u32)?;
        for output_record in &self.outputs {
            output_record.write_to(sink)?;
        }
        Ok(())
    }

    /// Reconstruye el registro completo desde una región mapeada.
    pub fn read_from(reader: &mut ByteReader<'_>) -> Result<Self, StreamFault> {
        let transaction_hash = Hash256::from_bytes(reader.read_hash_ref()?);
        let block_number = reader.read_u32()?;
        let version = reader.read_u32()?;
        let timestamp = reader.read_u32()?;
        let lock_time = reader.read_u32()?;
        let serialized_length = reader.read_u32()?;

        let input_count = reader.read_u32()? as usize;
        let mut inputs = Vec::with_capacity(input_count);
        for _ in 0..input_count {
            inputs.push(PersistedInput::read_from(reader)?);
        }

        let output_count = reader.read_u32()? as usize;
        let mut outputs = Vec::with_capacity(output_count);
        for _ in 0..output_count {
            outputs.push(PersistedOutput::read_from(reader)?);
        }

        Ok(Self {
            transaction_hash,
            block_number,
            version,
            timestamp,
            lock_time,
            serialized_length,
            inputs,
            outputs,
        })
    }
}

/// Cabecera fija de un registro por dirección en PublicKeyRecords.bin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AddressRecordHeader {
    /// Forma de llave predominante de la dirección.
    pub key_type: KeyType,
    /// Índice secuencial de la dirección.
    pub index: u32,
    /// Cantidad de entradas cronológicas que siguen a la cabecera.
    pub entry_count: u32,
    /// Ranura reservada: días desde la última actividad.
    pub days_old: u32,
    /// Ranura reservada: balance cacheado.
    pub balance: u64,
    /// Ranura reservada: marca de tiempo del último envío.
    pub last_send: u32,
    /// Ranura reservada: marca de tiempo de la última recepción.
    pub last_receive: u32,
}

impl AddressRecordHeader {
    /// Serializa la cabecera al flujo de escritura.
    pub fn write_to<W: Write>(&self, sink: &mut W) -> io::Result<()> {
        sink.write_u32::<LittleEndian>(self.key_type as u32)?;
        sink.write_u32::<LittleEndian>(self.index)?;
        sink.write_u32::<LittleEndian>(self.entry_count)?;
        sink.write_u32::<LittleEndian>(self.days_old)?;
        sink.write_u64::<LittleEndian>(self.balance)?;
        sink.write_u32::<LittleEndian>(self.last_send)?;
        sink.write_u32::<LittleEndian>(self.last_receive)
    }

    /// Reconstruye la cabecera desde una región mapeada.
    pub fn read_from(reader: &mut ByteReader<'_>) -> Result<Self, StreamFault> {
        Ok(Self {
            key_type: KeyType::from_u32(reader.read_u32()?),
            index: reader.read_u32()?,
            entry_count: reader.read_u32()?,
            days_old: reader.read_u32()?,
            balance: reader.read_u64()?,
            last_send: reader.read_u32()?,
            last_receive: reader.read_u32()?,
        })
    }
}

/// Entrada cronológica de 32 bytes de un registro por dirección.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AddressTxEntry {
    /// Offset de la transacción dentro de TransactionFile.bin.
    pub transaction_offset: u64,
    /// Valor movido en satoshis (el signo lo porta el bit de gasto).
    pub value: u64,
    /// Marca de tiempo de la transacción.
    pub timestamp: u32,
    /// Bits de estado: gasto, coinbase, cambio.
    pub flags: u32,
    /// Ranura reservada para el balance acumulado cacheado.
    pub reserved_balance: u64,
}

impl AddressTxEntry {
    /// Bit 0: la entrada representa un gasto (resta del balance).
    pub const FLAG_SPEND: u32 = 1 << 0;
    /// Bit 1: la entrada proviene de un coinbase.
    pub const FLAG_COINBASE: u32 = 1 << 1;
    /// Bit 2: la entrada es cambio que retorna al emisor.
    pub const FLAG_CHANGE: u32 = 1 << 2;

    /// Verdadero si la entrada es un gasto.
    #[must_use]
    pub fn is_spend(&self) -> bool {
        self.flags & Self::FLAG_SPEND != 0
    }

    /// Verdadero si la entrada proviene de un coinbase.
    #[must_use]
    pub fn is_coinbase(&self) -> bool {
        self.flags & Self::FLAG_COINBASE != 0
    }

    /// Verdadero si la entrada es cambio.
    #[must_use]
    pub fn is_change(&self) -> bool {
        self.flags & Self::FLAG_CHANGE != 0
    }

    /// Aporte con signo de la entrada al balance de su dirección.
    #[must_use]
    pub fn signed_value(&self) -> i64 {
        if self.is_spend() {
            -(self.value as i64)
        } else {
            self.value as i64
        }
    }

    /// Serializa la entrada al flujo de escritura.
    pub fn write_to<W: Write>(&self, sink: &mut W) -> io::Result<()> {
        sink.write_u64::<LittleEndian>(self.transaction_offset)?;
        sink.write_u64::<LittleEndian>(self.value)?;
        sink.write_u32::<LittleEndian>(self.timestamp)?;
        sink.write_u32::<LittleEndian>(self.flags)?;
        sink.write_u64::<LittleEndian>(self.reserved_balance)
    }

    /// Reconstruye la entrada desde una región mapeada.
    pub fn read_from(reader: &mut ByteReader<'_>) -> Result<Self, StreamFault> {
        Ok(Self {
            transaction_offset: reader.read_u64()?,
            value: reader.read_u64()?,
            timestamp: reader.read_u32()?,
            flags: reader.read_u32()?,
            reserved_balance: reader.read_u64()?,
        })
    }
}
