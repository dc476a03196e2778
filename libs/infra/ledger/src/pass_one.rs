// [libs/infra/ledger/src/pass_one.rs]
/*!
 * =================================================================
 * APARATO: PASS-1 LEDGER INDEXER (V7.0 - SOBERANO)
 * CLASIFICACIÓN: INFRA LAYER (ESTRATO L3)
 * RESPONSABILIDAD: CRISTALIZACIÓN DEL FLUJO PLANO DE TRANSACCIONES
 *
 * VISION HIPER-HOLÍSTICA:
 * Por cada bloque canónico y cada transacción:
 * 1. Se resuelve el valor de cada input consumiendo su entrada UTXO
 *    (la referencia hash se traduce a offset vía el índice vivo).
 * 2. Cada dirección de output se interna en la tabla de deduplicación
 *    y su UTXO ingresa al mapa vivo.
 * 3. El registro compacto se anexa al flujo y el hash ingresa al
 *    índice; los duplicados históricos no sobreescriben.
 * 4. Cada 10.000 transacciones el slot de conteo de la cabecera se
 *    reescribe: el estado en disco es recuperable a mitad de corrida.
 * =================================================================
 */

use crate::dedup::AddressInternTable;
use crate::errors::IndexFault;
use crate::manifest_store::save_manifest;
use crate::stream_view::STREAM_HEADER_SIZE;
use crate::tx_index::{TransactionIndex, TransactionLocation};
use crate::utxo::UtxoLedger;
use crate::{LEDGER_MANIFEST_FILE_NAME, PUBLIC_KEYS_FILE_NAME, TRANSACTION_FILE_NAME};
use byteorder::{LittleEndian, WriteBytesExt};
use chronicler_core_hash::sha256;
use chronicler_domain_models::{
    Block, BlockInput, Hash256, LedgerManifest, PersistedInput, PersistedOutput,
    PersistedTransaction, FILE_MAGIC,
};
use std::fs::File;
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Cadencia del checkpoint en transacciones.
const CHECKPOINT_CADENCE: u32 = 10_000;

/// Motor de la pasada 1: escribe el flujo plano y mantiene el estado vivo.
pub struct LedgerIndexer {
    output_directory: PathBuf,
    stream_writer: BufWriter<File>,
    current_offset: u64,
    transaction_count: u32,
    block_count: u32,
    intern_table: AddressInternTable,
    transaction_index: TransactionIndex,
    utxo_ledger: UtxoLedger,
    last_checkpoint_count: u32,
}

impl LedgerIndexer {
    /// Crea los archivos de la pasada 1 con sus cabeceras reservadas.
    ///
    /// # Errors:
    /// Propaga los fallos de creación de TransactionFile.bin o
    /// PublicKeys.bin.
    pub fn create(output_directory: &Path) -> Result<Self, IndexFault> {
        let stream_path = output_directory.join(TRANSACTION_FILE_NAME);
        let file_handle = File::create(&stream_path)?;
        let mut stream_writer = BufWriter::new(file_handle);
        stream_writer.write_all(&FILE_MAGIC)?;
        stream_writer.write_u32::<LittleEndian>(0)?;
        stream_writer.flush()?;

        let intern_table =
            AddressInternTable::create(&output_directory.join(PUBLIC_KEYS_FILE_NAME))?;

        info!(
            "⚙️ [PASS1]: Ledger stream created at '{}'.",
            stream_path.display()
        );

        Ok(Self {
            output_directory: output_directory.to_path_buf(),
            stream_writer,
            current_offset: STREAM_HEADER_SIZE,
            transaction_count: 0,
            block_count: 0,
            intern_table,
            transaction_index: TransactionIndex::new(),
            utxo_ledger: UtxoLedger::new(),
            last_checkpoint_count: 0,
        })
    }

    /**
     * Ingesta un bloque canónico completo al flujo plano.
     *
     * # Errors:
     * - `IndexFault::MissingProducingTransaction` si un input no
     *   coinbase referencia un hash ausente del índice (fatal).
     * - `IndexFault::MissingUtxoEntry` si la entrada gastada no vive
     *   en el mapa (fatal: delata una pasada 1 inconsistente).
     */
    pub fn add_block(&mut self, block: &Block<'_>) -> Result<(), IndexFault> {
        for transaction in &block.transactions {
            let record_offset = self.current_offset;

            let mut persisted_inputs = Vec::with_capacity(transaction.inputs.len());
            for input in &transaction.inputs {
                persisted_inputs.push(self.resolve_input(input, block.block_index)?);
            }

            let mut persisted_outputs = Vec::with_capacity(transaction.outputs.len());
            for (output_index, output) in transaction.outputs.iter().enumerate() {
                let address_index = self.intern_table.intern(output.primary_address())?;
                self.utxo_ledger
                    .insert(record_offset, output_index as u32, output.value);
                persisted_outputs.push(PersistedOutput {
                    value: output.value,
                    address_index,
                    key_type: output.key_type,
                    script_length: output.challenge_script.len() as u32,
                });
            }

            let persisted = PersistedTransaction {
                transaction_hash: transaction.transaction_hash,
                block_number: block.block_index,
                version: transaction.version,
                timestamp: block.timestamp,
                lock_time: transaction.lock_time,
                serialized_length: transaction.serialized_length,
                inputs: persisted_inputs,
                outputs: persisted_outputs,
            };
            persisted.write_to(&mut self.stream_writer)?;
            self.current_offset += persisted.encoded_size() as u64;
            self.transaction_count += 1;

            self.transaction_index.insert(
                transaction.transaction_hash,
                TransactionLocation {
                    file_offset: record_offset,
                    timestamp: block.timestamp,
                },
            );
        }

        self.block_count += 1;
        if self.transaction_count - self.last_checkpoint_count >= CHECKPOINT_CADENCE {
            self.checkpoint()?;
        }
        Ok(())
    }

    /// Resuelve el valor y el origen de un input contra el estado vivo.
    fn resolve_input(
        &mut self,
        input: &BlockInput<'_>,
        block_index: u32,
    ) -> Result<PersistedInput, IndexFault> {
        if input.is_coinbase() {
            return Ok(PersistedInput {
                producing_offset: 0,
                output_index: BlockInput::COINBASE_SENTINEL,
                value: 0,
                script_length: input.response_script.len() as u32,
                producing_timestamp: 0,
            });
        }

        let producing_hash = Hash256::from_bytes(input.previous_transaction_hash);
        let producing_location = self.transaction_index.lookup(&producing_hash).ok_or(
            IndexFault::MissingProducingTransaction {
                transaction_hash: producing_hash,
                block_index,
            },
        )?;

        let resolved_value = self
            .utxo_ledger
            .consume(
                producing_location.file_offset,
                input.previous_output_index,
            )
            .ok_or(IndexFault::MissingUtxoEntry {
                producing_offset: producing_location.file_offset,
                output_index: input.previous_output_index,
            })?;

        Ok(PersistedInput {
            producing_offset: producing_location.file_offset,
            output_index: input.previous_output_index,
            value: resolved_value,
            script_length: input.response_script.len() as u32,
            producing_timestamp: producing_location.timestamp,
        })
    }

    /// Reescribe los slots de conteo y retorna el cursor al final.
    fn checkpoint(&mut self) -> Result<(), IndexFault> {
        self.stream_writer.flush()?;
        let file_handle = self.stream_writer.get_mut();
        file_handle.seek(SeekFrom::Start(FILE_MAGIC.len() as u64))?;
        file_handle.write_u32::<LittleEndian>(self.transaction_count)?;
        file_handle.flush()?;
        file_handle.seek(SeekFrom::Start(self.current_offset))?;

        self.intern_table.checkpoint()?;
        self.last_checkpoint_count = self.transaction_count;
        debug!(
            "💾 [CHECKPOINT]: {} transactions / {} unique addresses sealed.",
            self.transaction_count,
            self.intern_table.unique_count()
        );
        Ok(())
    }

    /// Total de transacciones cristalizadas hasta ahora.
    #[must_use]
    pub fn transaction_count(&self) -> u32 {
        self.transaction_count
    }

    /// Total de bloques ingeridos hasta ahora.
    #[must_use]
    pub fn block_count(&self) -> u32 {
        self.block_count
    }

    /// Vista del mapa UTXO vivo (auditoría de conservación).
    #[must_use]
    pub fn utxo_ledger(&self) -> &UtxoLedger {
        &self.utxo_ledger
    }

    /// Vista del índice de hashes (auditoría de duplicados).
    #[must_use]
    pub fn transaction_index(&self) -> &TransactionIndex {
        &self.transaction_index
    }

    /**
     * Sella la pasada 1: conteos finales, manifiesto y liberación.
     *
     * Los mapas vivos (UTXO e índice de hashes) se descartan aquí para
     * liberar memoria antes de que la pasada 2 reserve su arreglo de
     * registros por dirección.
     *
     * # Errors:
     * Propaga los fallos del checkpoint final o del manifiesto.
     */
    pub fn seal(mut self) -> Result<LedgerManifest, IndexFault> {
        self.checkpoint()?;
        info!(
            "Processed {} transactions across {} blocks.",
            self.transaction_count, self.block_count
        );

        let unique_address_count = self.intern_table.seal()?;

        let mut audit_payload = Vec::with_capacity(FILE_MAGIC.len() + 12);
        audit_payload.extend_from_slice(&FILE_MAGIC);
        audit_payload.extend_from_slice(&self.transaction_count.to_le_bytes());
        audit_payload.extend_from_slice(&unique_address_count.to_le_bytes());
        audit_payload.extend_from_slice(&self.block_count.to_le_bytes());
        let audit_token = hex::encode(sha256(&audit_payload));

        let manifest = LedgerManifest::new(
            self.transaction_count,
            unique_address_count,
            self.block_count,
            audit_token,
        );
        save_manifest(
            &self.output_directory.join(LEDGER_MANIFEST_FILE_NAME),
            &manifest,
        )?;
        Ok(manifest)
    }
}
