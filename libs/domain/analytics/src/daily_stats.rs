// [libs/domain/analytics/src/daily_stats.rs]
/*!
 * =================================================================
 * APARATO: DAILY STATISTICS ENGINE (V6.0 - SOBERANO)
 * CLASIFICACIÓN: DOMAIN LAYER (ESTRATO L2)
 * RESPONSABILIDAD: AGREGACIÓN POR DÍA + ARQUEOLOGÍA DE UTXO DORMIDOS
 *
 * VISION HIPER-HOLÍSTICA:
 * 1. UNA SOLA PASADA: el motor recorre TransactionFile.bin una única
 *    vez; cada transacción cae en el balde (timestamp - génesis)/86400
 *    usando su propia marca de tiempo (los pequeños desórdenes que el
 *    protocolo permite quedan tolerados por construcción).
 * 2. MAPA LATERAL DE EDAD: los outputs ingresan con su timestamp
 *    productor y se retiran al gastarse; en cada transición de día el
 *    residuo se fotografía en las diez bandas de edad.
 * 3. ZOMBIES: un input cuyo productor duerme más de cuatro años
 *    emite su fila en ZombieReport.csv con score = edadDías² · BTC.
 * 4. MÁXIMOS DISJUNTOS: los campos max_input_count y max_output_count
 *    son independientes entre sí.
 * =================================================================
 */

use crate::errors::ReportFault;
use crate::{DUST_THRESHOLD, GENESIS_DAY_EPOCH, ONE_BTC, ZOMBIE_AGE_SECONDS};
use chrono::DateTime;
use chronicler_domain_models::BlockInput;
use chronicler_infra_ledger::{PublicKeyTableView, TransactionStreamView, UtxoKey};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::{info, warn};

/// Cantidad de bandas del histograma de edad UTXO.
pub const AGE_BAND_COUNT: usize = 10;
/// Límites superiores de cada banda de edad, en días.
const AGE_BAND_DAYS: [u64; AGE_BAND_COUNT - 1] = [1, 7, 30, 91, 182, 365, 730, 1095, 1460];
/// Etiquetas de las bandas de edad para los encabezados CSV.
const AGE_BAND_LABELS: [&str; AGE_BAND_COUNT] = [
    "1d", "7d", "30d", "91d", "182d", "365d", "2y", "3y", "4y", "over4y",
];

/// Cantidad de bandas logarítmicas de valor (10⁻⁴ BTC .. 10⁶ BTC).
pub const VALUE_BAND_COUNT: usize = 12;
/// Etiquetas de las bandas de valor para los encabezados CSV.
const VALUE_BAND_LABELS: [&str; VALUE_BAND_COUNT] = [
    "lt0.0001", "lt0.001", "lt0.01", "lt0.1", "lt1", "lt10", "lt100", "lt1k", "lt10k", "lt100k",
    "lt1m", "ge1m",
];

/// Acumulador de un día calendario del ledger.
#[derive(Default, Clone)]
struct DayAccumulator {
    transaction_count: u32,
    block_count: u32,
    input_count: u32,
    output_count: u32,
    output_value: u64,
    script_bytes: u64,
    max_input_count: u32,
    max_output_count: u32,
    dust_count: u32,
    zombie_count: u32,
    value_band_counts: [u32; VALUE_BAND_COUNT],
    value_band_totals: [u64; VALUE_BAND_COUNT],
}

/// Fotografía del conjunto UTXO vivo por bandas de edad.
#[derive(Default, Clone, Copy)]
struct AgeSnapshot {
    counts: [u32; AGE_BAND_COUNT],
    values: [u64; AGE_BAND_COUNT],
}

/// Fila completa de un día: acumulador + fotografía al cierre.
#[derive(Default, Clone)]
struct DayRow {
    accumulator: DayAccumulator,
    age_snapshot: AgeSnapshot,
}

/// Output vivo en el mapa lateral de edad.
#[derive(Clone, Copy)]
struct LiveOutput {
    value: u64,
    producing_timestamp: u32,
}

/// Resumen de la corrida analítica diaria.
#[derive(Debug, PartialEq, Eq)]
pub struct DailyStatsSummary {
    /// Cantidad de días calendario emitidos.
    pub days_emitted: u32,
    /// Cantidad de filas zombie detectadas.
    pub zombie_rows: u32,
}

/// Motor de estadísticas diarias sobre el flujo plano.
pub struct DailyStatisticsEngine<'a> {
    stream: &'a TransactionStreamView,
    key_table: &'a PublicKeyTableView,
}

impl<'a> DailyStatisticsEngine<'a> {
    /// Construye el motor sobre las vistas de la pasada 1.
    #[must_use]
    pub fn new(stream: &'a TransactionStreamView, key_table: &'a PublicKeyTableView) -> Self {
        Self { stream, key_table }
    }

    /**
     * Corre la pasada analítica y cristaliza los tres reportes:
     * Transactions.csv, ValueDistribution.csv y ZombieReport.csv.
     *
     * # Errors:
     * Sólo los fallos de E/S de los CSV son fatales; los registros
     * ilegibles del flujo degradan a trazas y la agregación continúa.
     */
    pub fn run(&self, output_directory: &Path) -> Result<DailyStatsSummary, ReportFault> {
        info!(
            "📈 [DAILY_STATS]: Streaming {} transactions once.",
            self.stream.transaction_count()
        );

        let mut zombie_writer =
            csv::Writer::from_path(output_directory.join("ZombieReport.csv"))?;
        zombie_writer.write_record([
            "spendingDate",
            "producingDate",
            "address",
            "ageDays",
            "value",
            "score",
        ])?;

        let mut rows: BTreeMap<u32, DayRow> = BTreeMap::new();
        let mut live_outputs: HashMap<UtxoKey, LiveOutput> = HashMap::new();
        let mut last_block_number: Option<u32> = None;
        let mut max_day_seen: Option<u32> = None;
        let mut zombie_rows = 0u32;

        for stream_item in self.stream.iter() {
            let (record_offset, transaction) = match stream_item {
                Ok(decoded) => decoded,
                Err(stream_fault) => {
                    warn!(
                        "Daily-stats stream truncated; aggregation continues with partial input: {}",
                        stream_fault
                    );
                    break;
                }
            };

            let day_index = day_of(transaction.timestamp);

            // Transición de día hacia adelante: fotografiar el residuo
            // UTXO al cierre del día que termina.
            if let Some(previous_max) = max_day_seen {
                if day_index > previous_max {
                    let closing_snapshot =
                        snapshot_residual(&live_outputs, day_start_epoch(previous_max + 1));
                    rows.entry(previous_max).or_default().age_snapshot = closing_snapshot;
                    max_day_seen = Some(day_index);
                }
            } else {
                max_day_seen = Some(day_index);
            }

            let row = rows.entry(day_index).or_default();
            let accumulator = &mut row.accumulator;

            accumulator.transaction_count += 1;
            if last_block_number != Some(transaction.block_number) {
                accumulator.block_count += 1;
                last_block_number = Some(transaction.block_number);
            }
            accumulator.input_count += transaction.inputs.len() as u32;
            accumulator.output_count += transaction.outputs.len() as u32;
            accumulator.max_input_count = accumulator
                .max_input_count
                .max(transaction.inputs.len() as u32);
            accumulator.max_output_count = accumulator
                .max_output_count
                .max(transaction.outputs.len() as u32);

            for input in &transaction.inputs {
                if input.output_index == BlockInput::COINBASE_SENTINEL {
                    continue;
                }
                accumulator.script_bytes += u64::from(input.script_length);

                let consumed = live_outputs.remove(&UtxoKey {
                    producing_offset: input.producing_offset,
                    output_index: input.output_index,
                });
                if consumed.is_none() {
                    // Estado de pasada 1 incompleto: se registra y sigue.
                    warn!(
                        "Age histogram: missing UTXO entry (offset {}, index {}); ignored.",
                        input.producing_offset, input.output_index
                    );
                }

                let dormancy_seconds = u64::from(
                    transaction
                        .timestamp
                        .saturating_sub(input.producing_timestamp),
                );
                if input.producing_timestamp > 0 && dormancy_seconds > ZOMBIE_AGE_SECONDS {
                    accumulator.zombie_count += 1;
                    zombie_rows += 1;
                    self.emit_zombie_row(
                        &mut zombie_writer,
                        transaction.timestamp,
                        input.producing_timestamp,
                        input.producing_offset,
                        input.output_index,
                        input.value,
                        dormancy_seconds,
                    )?;
                }
            }

            for (output_index, output) in transaction.outputs.iter().enumerate() {
                accumulator.script_bytes += u64::from(output.script_length);
                accumulator.output_value += output.value;
                if output.value < DUST_THRESHOLD {
                    accumulator.dust_count += 1;
                }
                let band = value_band_of(output.value);
                accumulator.value_band_counts[band] += 1;
                accumulator.value_band_totals[band] += output.value;

                live_outputs.insert(
                    UtxoKey {
                        producing_offset: record_offset,
                        output_index: output_index as u32,
                    },
                    LiveOutput {
                        value: output.value,
                        producing_timestamp: transaction.timestamp,
                    },
                );
            }
        }

        // Cierre del último día observado.
        if let Some(final_day) = max_day_seen {
            let closing_snapshot =
                snapshot_residual(&live_outputs, day_start_epoch(final_day + 1));
            rows.entry(final_day).or_default().age_snapshot = closing_snapshot;
        }

        zombie_writer.flush()?;
        self.write_transactions_csv(output_directory, &rows)?;
        self.write_value_distribution_csv(output_directory, &rows)?;

        let summary = DailyStatsSummary {
            days_emitted: rows.len() as u32,
            zombie_rows,
        };
        info!(
            "✅ [DAILY_STATS]: {} days and {} zombie rows crystallized.",
            summary.days_emitted, summary.zombie_rows
        );
        Ok(summary)
    }

    /// Emite una fila de ZombieReport.csv resolviendo la dirección gastada.
    #[allow(clippy::too_many_arguments)]
    fn emit_zombie_row<W: std::io::Write>(
        &self,
        zombie_writer: &mut csv::Writer<W>,
        spending_timestamp: u32,
        producing_timestamp: u32,
        producing_offset: u64,
        output_index: u32,
        value: u64,
        dormancy_seconds: u64,
    ) -> Result<(), ReportFault> {
        let spent_address = self
            .stream
            .read_at(producing_offset)
            .ok()
            .and_then(|producing| {
                producing
                    .outputs
                    .get(output_index as usize)
                    .map(|output| output.address_index)
            })
            .and_then(|address_index| self.key_table.address_at(address_index))
            .map(|address| address.to_ascii())
            .unwrap_or_else(|| "UNKNOWN".to_string());

        let age_days = dormancy_seconds / 86_400;
        let value_btc = value as f64 / ONE_BTC as f64;
        let score = (age_days * age_days) as f64 * value_btc;

        zombie_writer.write_record([
            date_string(spending_timestamp),
            date_string(producing_timestamp),
            spent_address,
            age_days.to_string(),
            format!("{:.8}", value_btc),
            format!("{:.2}", score),
        ])?;
        Ok(())
    }

    /// Cristaliza Transactions.csv (agregados diarios + bandas de edad).
    fn write_transactions_csv(
        &self,
        output_directory: &Path,
        rows: &BTreeMap<u32, DayRow>,
    ) -> Result<(), ReportFault> {
        let mut csv_writer =
            csv::Writer::from_path(output_directory.join("Transactions.csv"))?;

        let mut header = vec![
            "date".to_string(),
            "transactions".to_string(),
            "blocks".to_string(),
            "inputCount".to_string(),
            "outputCount".to_string(),
            "maxInputCount".to_string(),
            "maxOutputCount".to_string(),
            "outputValueBTC".to_string(),
            "scriptBytes".to_string(),
            "dustCount".to_string(),
            "zombieCount".to_string(),
        ];
        for band_label in AGE_BAND_LABELS {
            header.push(format!("utxoCount_{}", band_label));
        }
        for band_label in AGE_BAND_LABELS {
            header.push(format!("utxoValueBTC_{}", band_label));
        }
        csv_writer.write_record(&header)?;

        for (&day_index, row) in rows {
            let accumulator = &row.accumulator;
            let mut record = vec![
                date_string(day_start_epoch(day_index)),
                accumulator.transaction_count.to_string(),
                accumulator.block_count.to_string(),
                accumulator.input_count.to_string(),
                accumulator.output_count.to_string(),
                accumulator.max_input_count.to_string(),
                accumulator.max_output_count.to_string(),
                format!("{:.8}", accumulator.output_value as f64 / ONE_BTC as f64),
                accumulator.script_bytes.to_string(),
                accumulator.dust_count.to_string(),
                accumulator.zombie_count.to_string(),
            ];
            for band_count in row.age_snapshot.counts {
                record.push(band_count.to_string());
            }
            for band_value in row.age_snapshot.values {
                record.push(format!("{:.8}", band_value as f64 / ONE_BTC as f64));
            }
            csv_writer.write_record(&record)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Cristaliza ValueDistribution.csv (bandas logarítmicas de valor).
    fn write_value_distribution_csv(
        &self,
        output_directory: &Path,
        rows: &BTreeMap<u32, DayRow>,
    ) -> Result<(), ReportFault> {
        let mut csv_writer =
            csv::Writer::from_path(output_directory.join("ValueDistribution.csv"))?;

        let mut header = vec!["date".to_string()];
        for band_label in VALUE_BAND_LABELS {
            header.push(format!("count_{}", band_label));
        }
        for band_label in VALUE_BAND_LABELS {
            header.push(format!("totalBTC_{}", band_label));
        }
        csv_writer.write_record(&header)?;

        for (&day_index, row) in rows {
            let accumulator = &row.accumulator;
            let mut record = vec![date_string(day_start_epoch(day_index))];
            for band_count in accumulator.value_band_counts {
                record.push(band_count.to_string());
            }
            for band_total in accumulator.value_band_totals {
                record.push(format!("{:.8}", band_total as f64 / ONE_BTC as f64));
            }
            csv_writer.write_record(&record)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

/// Día calendario relativo al 3 de enero de 2009.
#[inline(always)]
fn day_of(timestamp: u32) -> u32 {
    timestamp.saturating_sub(GENESIS_DAY_EPOCH) / 86_400
}

/// Medianoche UTC del día calendario dado.
#[inline(always)]
fn day_start_epoch(day_index: u32) -> u32 {
    GENESIS_DAY_EPOCH + day_index * 86_400
}

/// Fecha `YYYY-MM-DD` de una marca de tiempo Unix.
fn date_string(timestamp: u32) -> String {
    DateTime::from_timestamp(i64::from(timestamp), 0)
        .map(|moment| moment.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "????-??-??".to_string())
}

/// Banda logarítmica de valor de un output (10⁻⁴ BTC .. 10⁶ BTC).
fn value_band_of(value: u64) -> usize {
    let mut band = 0usize;
    let mut threshold = 10_000u64; // 10⁻⁴ BTC en satoshis
    while band < VALUE_BAND_COUNT - 1 && value >= threshold {
        band += 1;
        threshold = threshold.saturating_mul(10);
    }
    band
}

/// Banda de edad de un UTXO dormido `dormancy_days` días.
fn age_band_of(dormancy_days: u64) -> usize {
    for (band_index, &band_limit) in AGE_BAND_DAYS.iter().enumerate() {
        if dormancy_days <= band_limit {
            return band_index;
        }
    }
    AGE_BAND_COUNT - 1
}

/// Fotografía el residuo UTXO vivo por bandas de edad.
fn snapshot_residual(
    live_outputs: &HashMap<UtxoKey, LiveOutput>,
    reference_timestamp: u32,
) -> AgeSnapshot {
    let mut snapshot = AgeSnapshot::default();
    for live_output in live_outputs.values() {
        let dormancy_days = u64::from(
            reference_timestamp.saturating_sub(live_output.producing_timestamp),
        ) / 86_400;
        let band = age_band_of(dormancy_days);
        snapshot.counts[band] += 1;
        snapshot.values[band] += live_output.value;
    }
    snapshot
}
