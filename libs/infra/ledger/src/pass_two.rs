// [libs/infra/ledger/src/pass_two.rs]
/*!
 * =================================================================
 * APARATO: PASS-2 ADDRESS RECORD BUILDER (V6.0 - SOBERANO)
 * CLASIFICACIÓN: INFRA LAYER (ESTRATO L3)
 * RESPONSABILIDAD: COLACIÓN CRONOLÓGICA POR DIRECCIÓN
 *
 * VISION HIPER-HOLÍSTICA:
 * La pasada 2 relee el flujo plano secuencialmente (mmap) y colaciona
 * cada movimiento contra su dirección: los gastos se identifican
 * releyendo la transacción productora de cada input; el cambio se
 * detecta cuando un output retorna a una dirección gastadora de la
 * misma transacción; el flag coinbase se consume una única vez.
 *
 * POLÍTICA DE FALLOS: esta pasada nunca aborta. Un registro ilegible
 * degrada a una traza de advertencia y la colación continúa, de modo
 * que entradas parciales sigan produciendo reportes utilizables.
 * =================================================================
 */

use crate::errors::IndexFault;
use crate::stream_view::{PublicKeyTableView, TransactionStreamView, STREAM_HEADER_SIZE};
use byteorder::{LittleEndian, WriteBytesExt};
use chronicler_domain_models::{
    AddressRecordHeader, AddressTxEntry, BlockInput, KeyType, FILE_MAGIC,
    ADDRESS_RECORD_HEADER_SIZE, ADDRESS_TX_ENTRY_SIZE,
};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{info, warn};

/// Borrador mutable de un registro por dirección durante la colación.
#[derive(Default)]
struct AddressDraft {
    key_type: KeyType,
    entries: Vec<AddressTxEntry>,
}

/**
 * Construye PublicKeyRecords.bin desde los archivos de la pasada 1.
 *
 * Retorna la cantidad de direcciones colacionadas. La corrida es
 * determinista: contra los mismos archivos de entrada produce bytes
 * idénticos, lo que el Proving Grounds certifica como idempotencia.
 *
 * # Errors:
 * Sólo los fallos de E/S sobre el archivo de salida son fatales.
 */
pub fn build_address_records(
    stream: &TransactionStreamView,
    key_table: &PublicKeyTableView,
    records_path: &Path,
) -> Result<u32, IndexFault> {
    let address_count = key_table.address_count();
    info!(
        "⚙️ [PASS2]: Collating {} transactions into {} address records.",
        stream.transaction_count(),
        address_count
    );

    let mut drafts: Vec<AddressDraft> = Vec::with_capacity(address_count as usize);
    drafts.resize_with(address_count as usize, AddressDraft::default);

    for stream_item in stream.iter() {
        let (record_offset, transaction) = match stream_item {
            Ok(decoded) => decoded,
            Err(stream_fault) => {
                warn!(
                    "Pass-2 stream truncated; collation continues with partial input: {}",
                    stream_fault
                );
                break;
            }
        };

        let mut coinbase_pending = transaction
            .inputs
            .iter()
            .any(|input| input.output_index == BlockInput::COINBASE_SENTINEL);

        // Direcciones gastadoras de esta transacción (para detectar cambio).
        let mut spender_address_indices: Vec<u32> = Vec::new();

        for input in &transaction.inputs {
            if input.output_index == BlockInput::COINBASE_SENTINEL {
                continue;
            }
            let producing = match stream.read_at(input.producing_offset) {
                Ok(decoded) => decoded,
                Err(read_fault) => {
                    warn!(
                        "Pass-2: unreadable producing transaction at offset {}: {}",
                        input.producing_offset, read_fault
                    );
                    continue;
                }
            };
            let Some(spent_output) = producing.outputs.get(input.output_index as usize) else {
                warn!(
                    "Pass-2: producing transaction at offset {} lacks output {}",
                    input.producing_offset, input.output_index
                );
                continue;
            };
            let Some(draft) = drafts.get_mut(spent_output.address_index as usize) else {
                warn!(
                    "Pass-2: spent output references unknown address index {}",
                    spent_output.address_index
                );
                continue;
            };
            spender_address_indices.push(spent_output.address_index);
            draft.entries.push(AddressTxEntry {
                transaction_offset: record_offset,
                value: input.value,
                timestamp: transaction.timestamp,
                flags: AddressTxEntry::FLAG_SPEND,
                reserved_balance: 0,
            });
        }

        for output in &transaction.outputs {
            let Some(draft) = drafts.get_mut(output.address_index as usize) else {
                warn!(
                    "Pass-2: output references unknown address index {}",
                    output.address_index
                );
                continue;
            };
            let mut flags = 0u32;
            if coinbase_pending {
                flags |= AddressTxEntry::FLAG_COINBASE;
                coinbase_pending = false;
            }
            if spender_address_indices.contains(&output.address_index) {
                flags |= AddressTxEntry::FLAG_CHANGE;
            }
            draft.key_type = output.key_type;
            draft.entries.push(AddressTxEntry {
                transaction_offset: record_offset,
                value: output.value,
                timestamp: transaction.timestamp,
                flags,
                reserved_balance: 0,
            });
        }
    }

    write_records_file(records_path, &drafts)?;
    info!(
        "✅ [PASS2]: {} address records crystallized at '{}'.",
        address_count,
        records_path.display()
    );
    Ok(address_count)
}

/// Cristaliza el archivo de registros con su tabla de offsets doble.
fn write_records_file(records_path: &Path, drafts: &[AddressDraft]) -> Result<(), IndexFault> {
    let file_handle = File::create(records_path)?;
    let mut sink = BufWriter::new(file_handle);

    sink.write_all(&FILE_MAGIC)?;
    sink.write_u32::<LittleEndian>(drafts.len() as u32)?;

    // Tabla de offsets absolutos, seguida de la región gemela reservada
    // para los punteros ordenados de la analítica.
    let pointer_region_size = drafts.len() as u64 * 8;
    let mut running_offset = STREAM_HEADER_SIZE + pointer_region_size * 2;
    for draft in drafts {
        sink.write_u64::<LittleEndian>(running_offset)?;
        running_offset += (ADDRESS_RECORD_HEADER_SIZE
            + draft.entries.len() * ADDRESS_TX_ENTRY_SIZE) as u64;
    }
    for _ in drafts {
        sink.write_u64::<LittleEndian>(0)?;
    }

    for (address_index, draft) in drafts.iter().enumerate() {
        let header = AddressRecordHeader {
            key_type: draft.key_type,
            index: address_index as u32,
            entry_count: draft.entries.len() as u32,
            days_old: 0,
            balance: 0,
            last_send: 0,
            last_receive: 0,
        };
        header.write_to(&mut sink)?;
        for entry in &draft.entries {
            entry.write_to(&mut sink)?;
        }
    }

    sink.flush()?;
    Ok(())
}
