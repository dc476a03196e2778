// [libs/domain/models/src/lib.rs]
/*!
 * =================================================================
 * APARATO: DOMAIN MODELS HUB (V3.0 - SOBERANO)
 * CLASIFICACIÓN: DOMAIN LAYER (ESTRATO L2)
 * RESPONSABILIDAD: SSoT DE TIPOS DEL ANALIZADOR DE CADENA
 * =================================================================
 */

pub mod address;
pub mod block;
pub mod hash256;
pub mod key_type;
pub mod manifest;
pub mod persisted;

pub use address::Address;
pub use block::{Block, BlockInput, BlockOutput, BlockTransaction, MAX_MULTISIG_KEYS};
pub use hash256::Hash256;
pub use key_type::KeyType;
pub use manifest::LedgerManifest;
pub use persisted::{
    AddressRecordHeader, AddressTxEntry, PersistedInput, PersistedOutput, PersistedTransaction,
    RecordFault, ADDRESS_RECORD_HEADER_SIZE, ADDRESS_TX_ENTRY_SIZE, FILE_MAGIC,
    PERSISTED_INPUT_SIZE, PERSISTED_OUTPUT_SIZE,
};
