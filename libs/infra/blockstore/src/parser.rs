// [libs/infra/blockstore/src/parser.rs]
/*!
 * =================================================================
 * APARATO: BLOCK & TRANSACTION PARSER (V7.0 - SOBERANO)
 * CLASIFICACIÓN: INFRA LAYER (ESTRATO L3)
 * RESPONSABILIDAD: DECODIFICACIÓN COMPLETA DE UN BLOQUE EN MEMORIA
 *
 * VISION HIPER-HOLÍSTICA:
 * 1. ZERO-COPY: Los scripts y hashes del modelo son slices prestados
 *    de la región del bloque; nada se duplica durante el parseo.
 * 2. CONTENT ADDRESSING: El hash de cada transacción es el doble
 *    SHA-256 de su serialización cruda exacta, delimitada por los
 *    offsets de inicio y fin del cursor.
 * 3. TECHOS DE SANIDAD: Conteos o scripts por encima de los límites
 *    razonables abortan la corrida completa; son síntomas de un
 *    bosque de bloques corrupto, no de un caso de borde.
 * =================================================================
 */

use crate::errors::ParseFault;
use chronicler_core_bytes::ByteReader;
use chronicler_core_hash::sha256d;
use chronicler_domain_classifier::{ScriptClassifier, ScriptLocation};
use chronicler_domain_models::{Block, BlockInput, BlockOutput, BlockTransaction, Hash256};
use tracing::warn;

/// Techo de transacciones por bloque.
const MAX_BLOCK_TRANSACTIONS: u64 = 32_768;
/// Techo de inputs por transacción.
const MAX_REASONABLE_INPUTS: u64 = 32_768;
/// Techo de outputs por transacción.
const MAX_REASONABLE_OUTPUTS: u64 = 32_768;
/// Techo duro de longitud de script (32 KiB).
const MAX_REASONABLE_SCRIPT_LENGTH: u64 = 32 * 1024;
/// Umbral de advertencia para scripts inusualmente grandes.
const UNUSUAL_SCRIPT_LENGTH: u64 = 8_192;
/// Bytes de la cabecera de bloque del protocolo.
const BLOCK_HEADER_SIZE: usize = 80;

/// Coordenadas físicas y lógicas del bloque bajo parseo.
#[derive(Clone, Copy, Debug)]
pub struct BlockParseContext {
    /// Posición del bloque en la cadena canónica.
    pub block_index: u32,
    /// Archivo blk de origen.
    pub file_index: u32,
    /// Offset del cuerpo del bloque dentro del archivo.
    pub file_offset: u64,
}

/**
 * Parsea un bloque completo desde su región contigua de bytes.
 *
 * La región comienza en la cabecera de 80 bytes y abarca la longitud
 * declarada en la trama. Cada output queda clasificado y con sus
 * direcciones derivadas antes de retornar.
 *
 * # Errors:
 * Propaga `ParseFault` ante truncamientos, conteos fuera de techo,
 * scripts desmedidos o transacciones sin inputs/outputs.
 */
pub fn parse_block<'a>(
    region: &'a [u8],
    context: &BlockParseContext,
    classifier: &ScriptClassifier,
) -> Result<Block<'a>, ParseFault> {
    let mut reader = ByteReader::new(region);
    let mut warning_flagged = false;

    let format_version = reader.read_u32()?;
    let previous_block_hash = reader.read_hash_ref()?;
    let merkle_root = reader.read_hash_ref()?;
    let timestamp = reader.read_u32()?;
    let bits = reader.read_u32()?;
    let nonce = reader.read_u32()?;

    let computed_block_hash = Hash256(sha256d(&region[0..BLOCK_HEADER_SIZE]));

    let transaction_count = reader.read_varint()?;
    if transaction_count >= MAX_BLOCK_TRANSACTIONS {
        return Err(ParseFault::UnreasonableCount {
            kind: "transacciones",
            declared: transaction_count,
            ceiling: MAX_BLOCK_TRANSACTIONS,
        });
    }

    let mut output_sum = 0u64;
    let mut transactions = Vec::with_capacity(transaction_count as usize);
    for transaction_index in 0..transaction_count as u32 {
        let transaction = parse_transaction(
            &mut reader,
            context,
            classifier,
            transaction_index,
            transaction_count as u32,
            &mut warning_flagged,
            &mut output_sum,
        )?;
        transactions.push(transaction);
    }

    Ok(Block {
        format_version,
        previous_block_hash,
        merkle_root,
        timestamp,
        bits,
        nonce,
        transactions,
        computed_block_hash,
        block_index: context.block_index,
        file_index: context.file_index,
        file_offset: context.file_offset,
        block_length: region.len() as u32,
        output_sum,
        next_block_hash: None,
        warning: warning_flagged,
    })
}

/// Parsea una transacción en la posición actual del cursor.
#[allow(clippy::too_many_arguments)]
fn parse_transaction<'a>(
    reader: &mut ByteReader<'a>,
    context: &BlockParseContext,
    classifier: &ScriptClassifier,
    transaction_index: u32,
    block_transaction_count: u32,
    warning_flagged: &mut bool,
    output_sum: &mut u64,
) -> Result<BlockTransaction<'a>, ParseFault> {
    let transaction_start = reader.position();

    let version = reader.read_u32()?;
    if version != 1 && version != 2 {
        *warning_flagged = true;
        warn!(
            "Encountered unusual and unexpected transaction version number of [{}] for transaction #{}",
            version, transaction_index
        );
    }

    let input_count = reader.read_varint()?;
    if input_count >= MAX_REASONABLE_INPUTS {
        return Err(ParseFault::UnreasonableCount {
            kind: "inputs",
            declared: input_count,
            ceiling: MAX_REASONABLE_INPUTS,
        });
    }
    // Una transacción sin inputs sólo es admisible como coinbase
    // singular de su bloque.
    if input_count == 0 && !(transaction_index == 0 && block_transaction_count == 1) {
        return Err(ParseFault::EmptyInputs {
            block_index: context.block_index,
            transaction_index,
        });
    }

    let mut inputs = Vec::with_capacity(input_count as usize);
    for _ in 0..input_count {
        inputs.push(parse_input(reader, context)?);
    }

    let output_count = reader.read_varint()?;
    if output_count >= MAX_REASONABLE_OUTPUTS {
        return Err(ParseFault::UnreasonableCount {
            kind: "outputs",
            declared: output_count,
            ceiling: MAX_REASONABLE_OUTPUTS,
        });
    }
    if output_count == 0 {
        return Err(ParseFault::EmptyOutputs {
            block_index: context.block_index,
            transaction_index,
        });
    }

    let mut outputs = Vec::with_capacity(output_count as usize);
    for output_index in 0..output_count as u32 {
        let mut output = parse_output(reader, context)?;
        let location = ScriptLocation {
            block_index: context.block_index,
            transaction_index,
            output_index,
        };
        *warning_flagged |= classifier.classify_output(&mut output, &location);
        *output_sum += output.value;
        outputs.push(output);
    }

    let lock_time = reader.read_u32()?;

    let transaction_end = reader.position();
    let raw_serialization = reader.slice_between(transaction_start, transaction_end)?;
    let transaction_hash = Hash256(sha256d(raw_serialization));

    Ok(BlockTransaction {
        transaction_hash,
        version,
        inputs,
        outputs,
        lock_time,
        serialized_length: (transaction_end - transaction_start) as u32,
        file_index: context.file_index,
        file_offset: context.file_offset + transaction_start as u64,
    })
}

/// Parsea un input en la posición actual del cursor.
fn parse_input<'a>(
    reader: &mut ByteReader<'a>,
    context: &BlockParseContext,
) -> Result<BlockInput<'a>, ParseFault> {
    let previous_transaction_hash = reader.read_hash_ref()?;
    let previous_output_index = reader.read_u32()?;

    let script_length = reader.read_varint()?;
    audit_script_length(script_length, "input", context)?;

    let response_script = reader.read_slice(script_length as usize)?;
    let sequence_number = reader.read_u32()?;

    Ok(BlockInput {
        previous_transaction_hash,
        previous_output_index,
        response_script,
        sequence_number,
    })
}

/// Parsea un output (aún sin clasificar) en la posición actual.
fn parse_output<'a>(
    reader: &mut ByteReader<'a>,
    context: &BlockParseContext,
) -> Result<BlockOutput<'a>, ParseFault> {
    let value = reader.read_i64()? as u64;

    let script_length = reader.read_varint()?;
    audit_script_length(script_length, "output", context)?;

    let challenge_script = reader.read_slice(script_length as usize)?;
    Ok(BlockOutput::new(value, challenge_script))
}

/// Techo duro de 32 KiB; advertencia a partir de 8 KiB.
fn audit_script_length(
    script_length: u64,
    script_kind: &str,
    context: &BlockParseContext,
) -> Result<(), ParseFault> {
    if script_length >= MAX_REASONABLE_SCRIPT_LENGTH {
        return Err(ParseFault::OutrageousScript {
            declared: script_length,
            ceiling: MAX_REASONABLE_SCRIPT_LENGTH,
        });
    }
    if script_length >= UNUSUAL_SCRIPT_LENGTH {
        warn!(
            "Block: {} : Unreasonably large {} script length of {} bytes.",
            context.block_index, script_kind, script_length
        );
    }
    Ok(())
}
