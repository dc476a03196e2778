// [libs/domain/models/src/manifest.rs]
/*!
 * =================================================================
 * APARATO: LEDGER MANIFEST (V2.0 - SOBERANO)
 * CLASIFICACIÓN: DOMAIN LAYER (ESTRATO L2)
 * RESPONSABILIDAD: SELLO DE INTEGRIDAD DE LA CORRIDA PASS-1
 * =================================================================
 */

use serde::{Deserialize, Serialize};

/// Manifiesto JSON que sella una corrida completa del indexador.
///
/// El token de auditoría es el SHA-256 hex de las cabeceras de los dos
/// archivos de índice; permite detectar corridas truncadas o archivos
/// mezclados de corridas distintas antes de lanzar la analítica.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LedgerManifest {
    /// Total de transacciones cristalizadas en TransactionFile.bin.
    pub transaction_count: u32,
    /// Total de direcciones únicas en PublicKeys.bin.
    pub unique_address_count: u32,
    /// Total de bloques canónicos procesados.
    pub block_count: u32,
    /// SHA-256 hex sobre ambas cabeceras de índice.
    pub audit_token: String,
}

impl LedgerManifest {
    /// Construye el manifiesto de una corrida sellada.
    #[must_use]
    pub fn new(
        transaction_count: u32,
        unique_address_count: u32,
        block_count: u32,
        audit_token: String,
    ) -> Self {
        Self {
            transaction_count,
            unique_address_count,
            block_count,
            audit_token,
        }
    }
}
