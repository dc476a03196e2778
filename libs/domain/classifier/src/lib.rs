// [libs/domain/classifier/src/lib.rs]
/*!
 * =================================================================
 * APARATO: SCRIPT CLASSIFIER HUB (V4.0 - SOBERANO)
 * CLASIFICACIÓN: DOMAIN LAYER (ESTRATO L2)
 * RESPONSABILIDAD: EXPOSICIÓN DEL MOTOR DE TAXONOMÍA DE OUTPUTS
 * =================================================================
 */

pub mod classify;
pub mod opcodes;

pub use classify::{ScriptClassifier, ScriptLocation};
