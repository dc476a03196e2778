// [libs/infra/ledger/src/errors.rs]
// =================================================================
// APARATO: LEDGER ERRORS
// RESPONSABILIDAD: CATÁLOGO DE FALLOS DEL INDEXADOR DE DOS PASADAS
// ESTADO: ELITE COMPLIANCE (FULL RUSTDOC)
// =================================================================

use chronicler_domain_models::{Hash256, RecordFault};
use thiserror::Error;

/// Fallos del indexador y de las vistas de los archivos propios.
///
/// La pasada 1 trata toda violación de invariante como fatal para que
/// el estado a medio escribir sea evidentemente incompleto; la pasada 2
/// y la analítica degradan a trazas y continúan.
#[derive(Error, Debug)]
pub enum IndexFault {
    /// Fallo de E/S del sistema operativo.
    #[error("Error de I/O sobre los archivos del ledger: {0}")]
    Io(#[from] std::io::Error),

    /// Registro binario malformado o truncado.
    #[error(transparent)]
    Record(#[from] RecordFault),

    /// Un input no-coinbase referencia una transacción desconocida.
    ///
    /// El flujo canónico garantiza que toda transacción productora
    /// precede a sus gastadoras; su ausencia delata un escaneo
    /// incompleto o un bosque de bloques corrupto.
    #[error("Transacción productora ausente en el índice: {transaction_hash} (bloque {block_index})")]
    MissingProducingTransaction {
        /// Hash referenciado por el input huérfano.
        transaction_hash: Hash256,
        /// Bloque canónico donde apareció el input.
        block_index: u32,
    },

    /// El mapa UTXO no contiene la entrada que un input consume.
    #[error("Entrada UTXO ausente: offset {producing_offset}, índice {output_index}")]
    MissingUtxoEntry {
        /// Offset de la transacción productora.
        producing_offset: u64,
        /// Índice del output gastado.
        output_index: u32,
    },

    /// El manifiesto JSON es ilegible o inconsistente.
    #[error("Manifiesto del ledger corrupto: {0}")]
    Manifest(#[from] serde_json::Error),
}
