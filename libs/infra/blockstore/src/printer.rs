// [libs/infra/blockstore/src/printer.rs]
/*!
 * =================================================================
 * APARATO: BLOCK DIAGNOSTIC PRINTER (V2.0 - SOBERANO)
 * CLASIFICACIÓN: INFRA LAYER (ESTRATO L3)
 * RESPONSABILIDAD: VOLCADO LEGIBLE DE UN BLOQUE PARSEADO
 * =================================================================
 */

use chronicler_domain_models::Block;
use tracing::info;

/// Satoshis por BTC para la presentación decimal.
const ONE_BTC: f64 = 100_000_000.0;

/// Vuelca el contenido completo de un bloque parseado a la traza.
///
/// Herramienta de diagnóstico: muestra hashes en hexadecimal invertido
/// (la convención de los exploradores), los montos en BTC y la forma
/// de llave de cada output.
pub fn print_block(block: &Block<'_>) {
    info!("==========================================================================================");
    info!("Block #{}", block.block_index);
    info!("ComputedBlockHash: {}", block.computed_block_hash);
    if let Some(next_block_hash) = &block.next_block_hash {
        info!("NextBlockHash: {}", next_block_hash);
    }
    info!("Number of Transactions: {}", block.transactions.len());
    info!("Bits: {} Hex: {:08X}", block.bits, block.bits);
    info!(
        "Size: {:.3} KB or {} bytes.",
        f64::from(block.block_length) / 1024.0,
        block.block_length
    );
    info!("Version: {}", block.format_version);
    info!("Nonce: {}", block.nonce);
    info!("OutputSum: {:.8} BTC", block.output_sum as f64 / ONE_BTC);

    for (transaction_index, transaction) in block.transactions.iter().enumerate() {
        info!(
            "Transaction {} : {} inputs {} outputs. VersionNumber: {}",
            transaction_index,
            transaction.inputs.len(),
            transaction.outputs.len(),
            transaction.version
        );
        info!("TransactionHash: {}", transaction.transaction_hash);
        for (input_index, input) in transaction.inputs.iter().enumerate() {
            info!(
                "    Input {} : ResponseScriptLength: {} PreviousIndex: {}",
                input_index,
                input.response_script.len(),
                input.previous_output_index
            );
        }
        for (output_index, output) in transaction.outputs.iter().enumerate() {
            info!(
                "    Output: {} : {:.8} BTC : ChallengeScriptLength: {}",
                output_index,
                output.value as f64 / ONE_BTC,
                output.challenge_script.len()
            );
            info!(
                "    PublicKey: {} : {}",
                output.ascii_address,
                output.key_type.label()
            );
        }
    }
    info!("==========================================================================================");
}
