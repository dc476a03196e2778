// [apps/chain-chronicler/src/lib.rs]
/*!
 * =================================================================
 * APARATO: CHRONICLER LIBRARY SURFACE (V4.0 - SOBERANO)
 * CLASIFICACIÓN: APPLICATION LAYER (ESTRATO L6)
 * RESPONSABILIDAD: EXPOSICIÓN DEL DRIVER PARA EL PROVING GROUNDS
 * =================================================================
 */

pub mod driver;
pub mod format;

pub use driver::{execute_mission, MissionConfiguration};
pub use format::format_number;
