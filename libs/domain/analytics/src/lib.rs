// [libs/domain/analytics/src/lib.rs]
/*!
 * =================================================================
 * APARATO: ANALYTICS HUB (V5.0 - SOBERANO)
 * CLASIFICACIÓN: DOMAIN LAYER (ESTRATO L2)
 * RESPONSABILIDAD: EXPOSICIÓN DE LOS REPORTES DEL LEDGER
 * =================================================================
 */

pub mod daily_stats;
pub mod errors;
pub mod heap;
pub mod top_balances;

pub use daily_stats::{DailyStatisticsEngine, DailyStatsSummary};
pub use errors::ReportFault;
pub use heap::heap_sort_indices;
pub use top_balances::report_top_balances;

/// Satoshis por BTC.
pub const ONE_BTC: u64 = 100_000_000;
/// Umbral de polvo: outputs por debajo de 0.001 BTC.
pub const DUST_THRESHOLD: u64 = ONE_BTC / 1000;
/// Edad zombie: un UTXO dormido más de cuatro años antes de gastarse.
pub const ZOMBIE_AGE_SECONDS: u64 = 4 * 365 * 86_400;
/// Medianoche UTC del 3 de enero de 2009 (día del bloque génesis).
pub const GENESIS_DAY_EPOCH: u32 = 1_230_940_800;
