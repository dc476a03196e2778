// [libs/infra/ledger/src/tx_index.rs]
/*!
 * =================================================================
 * APARATO: TRANSACTION HASH INDEX (V4.0 - SOBERANO)
 * CLASIFICACIÓN: INFRA LAYER (ESTRATO L3)
 * RESPONSABILIDAD: RESOLUCIÓN HASH -> (OFFSET, TIMESTAMP) EN PASADA 1
 *
 * VISION HIPER-HOLÍSTICA:
 * La cadena histórica contiene hashes de transacción duplicados
 * (los coinbase de los bloques 91722/91880 y 91812/91842). La regla
 * congelada es: la primera aparición gana, la segunda se registra en
 * la traza y NO sobreescribe el índice; el flujo plano conserva ambas
 * copias.
 * =================================================================
 */

use chronicler_domain_models::Hash256;
use std::collections::HashMap;
use tracing::warn;

/// Ubicación de una transacción dentro del flujo plano.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransactionLocation {
    /// Offset del registro en TransactionFile.bin.
    pub file_offset: u64,
    /// Marca de tiempo del bloque contenedor.
    pub timestamp: u32,
}

/// Índice en memoria de todas las transacciones cristalizadas.
#[derive(Default)]
pub struct TransactionIndex {
    locations: HashMap<Hash256, TransactionLocation>,
    duplicate_count: u32,
}

impl TransactionIndex {
    /// Construye un índice vacío.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /**
     * Registra una transacción recién cristalizada.
     *
     * Ante un hash duplicado conserva la primera aparición, emite
     * exactamente una línea de advertencia y retorna `false`.
     */
    pub fn insert(&mut self, transaction_hash: Hash256, location: TransactionLocation) -> bool {
        match self.locations.entry(transaction_hash) {
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(location);
                true
            }
            std::collections::hash_map::Entry::Occupied(existing) => {
                self.duplicate_count += 1;
                warn!(
                    "Duplicate transaction hash encountered: {} (first at offset {}, duplicate at offset {}); keeping the first.",
                    transaction_hash,
                    existing.get().file_offset,
                    location.file_offset
                );
                false
            }
        }
    }

    /// Resuelve la ubicación de la transacción productora de un input.
    #[must_use]
    pub fn lookup(&self, transaction_hash: &Hash256) -> Option<TransactionLocation> {
        self.locations.get(transaction_hash).copied()
    }

    /// Cantidad de hashes únicos registrados.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Verdadero si el índice está vacío.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Cantidad de duplicados detectados y omitidos.
    #[must_use]
    pub fn duplicate_count(&self) -> u32 {
        self.duplicate_count
    }
}
