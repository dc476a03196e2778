// [libs/domain/analytics/src/top_balances.rs]
/*!
 * =================================================================
 * APARATO: TOP BALANCES REPORT (V4.0 - SOBERANO)
 * CLASIFICACIÓN: DOMAIN LAYER (ESTRATO L2)
 * RESPONSABILIDAD: RANKING DE DIRECCIONES POR BALANCE AL CORTE
 *
 * VISION HIPER-HOLÍSTICA:
 * 1. El balance de cada dirección se computa al instante de corte
 *    sumando los valores con signo de sus entradas cronológicas.
 * 2. El arreglo de punteros (índices de dirección) se ordena in-place
 *    con el heap sort propio; ninguna copia de registros ocurre.
 * 3. El CSV emite dirección, balance en BTC y días sin actividad
 *    relativos a la marca de tiempo más reciente del ledger.
 * =================================================================
 */

use crate::errors::ReportFault;
use crate::heap::heap_sort_indices;
use crate::ONE_BTC;
use chronicler_infra_ledger::{PublicKeyRecordsView, PublicKeyTableView};
use std::path::Path;
use tracing::{info, warn};

/**
 * Cristaliza TopBalances.csv con las `maximum_rows` direcciones de
 * mayor balance al instante de corte.
 *
 * # Errors:
 * Propaga fallos de E/S o del motor CSV; los registros individuales
 * ilegibles degradan a trazas y quedan excluidos del ranking.
 */
pub fn report_top_balances(
    records: &PublicKeyRecordsView,
    key_table: &PublicKeyTableView,
    report_path: &Path,
    maximum_rows: u32,
    cutoff_timestamp: u32,
) -> Result<u32, ReportFault> {
    let address_count = records.address_count();
    info!(
        "📊 [TOP_BALANCES]: Ranking {} addresses at cutoff {}.",
        address_count, cutoff_timestamp
    );

    // Balance y última actividad por dirección, resueltos una vez.
    let mut balances = vec![0i64; address_count as usize];
    let mut last_activity = vec![0u32; address_count as usize];
    let mut newest_timestamp = 0u32;
    for address_index in 0..address_count {
        match records.record(address_index) {
            Ok(record_view) => {
                balances[address_index as usize] = record_view.balance_at(cutoff_timestamp);
                if let Some(activity_timestamp) = record_view.last_activity() {
                    last_activity[address_index as usize] = activity_timestamp;
                    newest_timestamp = newest_timestamp.max(activity_timestamp);
                }
            }
            Err(record_fault) => {
                warn!(
                    "Top-balances: unreadable record {} skipped: {}",
                    address_index, record_fault
                );
            }
        }
    }

    // Arreglo de punteros ordenado por balance descendente.
    let mut ranking: Vec<u32> = (0..address_count).collect();
    heap_sort_indices(&mut ranking, |left, right| {
        // Comparador invertido: el mayor balance primero.
        balances[right as usize].cmp(&balances[left as usize])
    });

    let mut csv_writer = csv::Writer::from_path(report_path)?;
    csv_writer.write_record(["address", "balance", "days"])?;

    let mut emitted_rows = 0u32;
    for &address_index in ranking.iter().take(maximum_rows as usize) {
        let balance = balances[address_index as usize];
        if balance <= 0 {
            break;
        }
        let Some(address) = key_table.address_at(address_index) else {
            warn!(
                "Top-balances: address index {} missing from the key table.",
                address_index
            );
            continue;
        };
        let idle_days =
            u64::from(newest_timestamp.saturating_sub(last_activity[address_index as usize]))
                / 86_400;
        csv_writer.write_record([
            address.to_ascii(),
            format!("{:.8}", balance as f64 / ONE_BTC as f64),
            idle_days.to_string(),
        ])?;
        emitted_rows += 1;
    }
    csv_writer.flush()?;

    info!(
        "✅ [TOP_BALANCES]: {} rows crystallized at '{}'.",
        emitted_rows,
        report_path.display()
    );
    Ok(emitted_rows)
}
