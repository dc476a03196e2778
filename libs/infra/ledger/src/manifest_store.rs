// [libs/infra/ledger/src/manifest_store.rs]
/*!
 * =================================================================
 * APARATO: MANIFEST STORE (V2.0 - SOBERANO)
 * CLASIFICACIÓN: INFRA LAYER (ESTRATO L3)
 * RESPONSABILIDAD: PERSISTENCIA DEL SELLO DE CORRIDA (SSoT)
 * =================================================================
 */

use crate::errors::IndexFault;
use chronicler_domain_models::LedgerManifest;
use std::fs;
use std::path::Path;
use tracing::info;

/// Cristaliza el manifiesto JSON junto a los archivos binarios.
///
/// # Errors:
/// Propaga fallos de serialización o de escritura en disco.
pub fn save_manifest(manifest_path: &Path, manifest: &LedgerManifest) -> Result<(), IndexFault> {
    let serialized_manifest_json = serde_json::to_string_pretty(manifest)?;
    fs::write(manifest_path, serialized_manifest_json)?;
    info!(
        "✅ [MANIFEST]: Audit Token crystallized: {}",
        manifest.audit_token
    );
    Ok(())
}

/// Hidrata el manifiesto de una corrida previa.
///
/// # Errors:
/// Propaga fallos de lectura o un JSON malformado.
pub fn load_manifest(manifest_path: &Path) -> Result<LedgerManifest, IndexFault> {
    let raw_manifest = fs::read_to_string(manifest_path)?;
    Ok(serde_json::from_str(&raw_manifest)?)
}
