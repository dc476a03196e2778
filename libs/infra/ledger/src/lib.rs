// [libs/infra/ledger/src/lib.rs]
/*!
 * =================================================================
 * APARATO: LEDGER INDEX HUB (V6.0 - SOBERANO)
 * CLASIFICACIÓN: INFRA LAYER (ESTRATO L3)
 * RESPONSABILIDAD: EXPOSICIÓN DE LAS DOS PASADAS DEL INDEXADOR
 *
 * VISION HIPER-HOLÍSTICA:
 * Pass 1 cristaliza el flujo plano TransactionFile.bin junto a la
 * tabla de direcciones PublicKeys.bin manteniendo el mapa UTXO vivo;
 * Pass 2 relee el flujo secuencialmente vía mmap y emite los registros
 * cronológicos por dirección en PublicKeyRecords.bin.
 * =================================================================
 */

pub mod dedup;
pub mod errors;
pub mod manifest_store;
pub mod pass_one;
pub mod pass_two;
pub mod records_view;
pub mod stream_view;
pub mod tx_index;
pub mod utxo;

pub use dedup::AddressInternTable;
pub use errors::IndexFault;
pub use manifest_store::{load_manifest, save_manifest};
pub use pass_one::LedgerIndexer;
pub use pass_two::build_address_records;
pub use records_view::{AddressRecordView, PublicKeyRecordsView};
pub use stream_view::{PublicKeyTableView, TransactionStreamView, STREAM_HEADER_SIZE};
pub use tx_index::{TransactionIndex, TransactionLocation};
pub use utxo::{UtxoKey, UtxoLedger};

/// Nombre del flujo plano de transacciones.
pub const TRANSACTION_FILE_NAME: &str = "TransactionFile.bin";
/// Nombre de la tabla plana de direcciones únicas.
pub const PUBLIC_KEYS_FILE_NAME: &str = "PublicKeys.bin";
/// Nombre del archivo de registros cronológicos por dirección.
pub const PUBLIC_KEY_RECORDS_FILE_NAME: &str = "PublicKeyRecords.bin";
/// Nombre del manifiesto JSON que sella la corrida.
pub const LEDGER_MANIFEST_FILE_NAME: &str = "ledger_manifest.json";
