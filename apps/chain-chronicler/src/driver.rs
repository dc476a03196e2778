// [apps/chain-chronicler/src/driver.rs]
/*!
 * =================================================================
 * APARATO: MISSION DRIVER (V5.0 - SOBERANO)
 * CLASIFICACIÓN: APPLICATION LAYER (ESTRATO L6)
 * RESPONSABILIDAD: ORQUESTACIÓN SECUENCIAL DEL PIPELINE COMPLETO
 *
 * VISION HIPER-HOLÍSTICA:
 * El pipeline es estrictamente secuencial y síncrono:
 *   Scan -> Chain -> Pass1 -> Pass2            (corrida completa)
 *   Pass2 solamente                            (--rebuild)
 *   Reportes desde archivos persistidos        (--analyze)
 * La cancelación es cooperativa y gruesa: Ctrl-C se sondea entre
 * bloques de la pasada 1; el checkpoint periódico preserva la salida
 * parcial.
 * =================================================================
 */

use crate::format::format_number;
use anyhow::{Context, Result};
use chronicler_domain_analytics::{report_top_balances, DailyStatisticsEngine};
use chronicler_domain_classifier::ScriptClassifier;
use chronicler_infra_blockstore::{
    AsciiTextExtractor, BlockFileScanner, BlockStore, ScanProgress,
};
use chronicler_infra_ledger::{
    build_address_records, LedgerIndexer, PublicKeyRecordsView, PublicKeyTableView,
    TransactionStreamView, PUBLIC_KEYS_FILE_NAME, PUBLIC_KEY_RECORDS_FILE_NAME,
    TRANSACTION_FILE_NAME,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

/// Tope de filas del reporte de balances.
const TOP_BALANCES_ROW_CAP: u32 = 50_000;
/// Cadencia de las trazas de progreso del escaneo.
const SCAN_LOG_CADENCE: u32 = 1_000;

/// Configuración completa de una corrida del Cronista.
#[derive(Debug, Clone)]
pub struct MissionConfiguration {
    /// Directorio que contiene los archivos blk?????.dat.
    pub data_directory: PathBuf,
    /// Directorio de salida para los índices binarios y reportes.
    pub output_directory: PathBuf,
    /// Tope de bloques a escanear.
    pub max_blocks: u32,
    /// Saltar el escaneo y correr los reportes desde archivos previos.
    pub analyze: bool,
    /// Re-correr únicamente la pasada 2.
    pub rebuild: bool,
    /// Longitud mínima de corrida ASCII (0 desactiva la extracción).
    pub text_run_length: u32,
}

/**
 * Ejecuta la misión configurada de punta a punta.
 *
 * # Errors:
 * Los fallos fatales del escáner o de la pasada 1 abortan la corrida
 * con contexto; el binario traduce el error a código de salida != 0.
 */
pub fn execute_mission(configuration: &MissionConfiguration) -> Result<()> {
    if configuration.rebuild {
        return rebuild_address_records(configuration);
    }
    if configuration.analyze {
        return run_reports(configuration);
    }
    run_full_indexing(configuration)
}

/// Corrida completa: Scan -> Chain -> Pass1 -> Pass2.
fn run_full_indexing(configuration: &MissionConfiguration) -> Result<()> {
    // Cancelación cooperativa: Ctrl-C marca la bandera; el bucle de la
    // pasada 1 la sondea entre bloques.
    let cancel_requested = Arc::new(AtomicBool::new(false));
    let cancel_hook_flag = Arc::clone(&cancel_requested);
    if let Err(hook_fault) = ctrlc::set_handler(move || {
        cancel_hook_flag.store(true, Ordering::SeqCst);
    }) {
        warn!("Ctrl-C hook unavailable; cooperative cancel disabled: {}", hook_fault);
    }

    info!("Scanning the blockchain for blocks.");
    let mut scanner = BlockFileScanner::new(&configuration.data_directory, configuration.max_blocks)
        .context("No fue posible iniciar el escáner de bloques")?;
    loop {
        match scanner.scan_next()? {
            ScanProgress::Progress(scanned_count) => {
                if scanned_count % SCAN_LOG_CADENCE == 0 {
                    info!("Scanned block header: {}", format_number(u64::from(scanned_count)));
                }
            }
            ScanProgress::Complete => break,
        }
    }
    info!(
        "Finished scanning the available blocks. {} headers registered.",
        format_number(scanner.header_count() as u64)
    );

    info!("Now building the blockchain");
    let store = BlockStore::from_scanner(scanner)
        .context("La linealización de la cadena canónica falló")?;
    info!(
        "Found {} blocks.",
        format_number(u64::from(store.block_count()))
    );

    let classifier = ScriptClassifier::new()
        .context("El clasificador de scripts no pudo construirse")?;
    let mut text_extractor = (configuration.text_run_length > 0).then(|| {
        AsciiTextExtractor::new(
            &configuration.output_directory.join("AsciiTextReport.txt"),
            configuration.text_run_length as usize,
        )
    });

    let mut indexer = LedgerIndexer::create(&configuration.output_directory)
        .context("La pasada 1 no pudo crear sus archivos")?;

    let progress_bar = ProgressBar::new(u64::from(store.block_count()));
    progress_bar.set_style(
        ProgressStyle::with_template(
            "{spinner} [{elapsed_precise}] {bar:40} {pos}/{len} blocks ({per_sec})",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    for block_index in 0..store.block_count() {
        let block = store
            .read_block(block_index, &classifier, text_extractor.as_mut())
            .with_context(|| format!("Fallo al materializar el bloque {}", block_index))?;
        indexer
            .add_block(&block)
            .with_context(|| format!("La pasada 1 rechazó el bloque {}", block_index))?;
        progress_bar.inc(1);

        if cancel_requested.load(Ordering::SeqCst) {
            warn!(
                "Cooperative cancel at block {}; partial pass-1 output preserved by checkpoint.",
                block_index
            );
            break;
        }
    }
    progress_bar.finish_and_clear();

    info!("Completed parsing the blockchain.");
    let manifest = indexer.seal().context("El sellado de la pasada 1 falló")?;
    info!(
        "Pass-1 sealed: {} transactions, {} unique addresses.",
        format_number(u64::from(manifest.transaction_count)),
        format_number(u64::from(manifest.unique_address_count))
    );

    info!("Now building the public-key records database.");
    rebuild_address_records(configuration)
}

/// Pasada 2 sola: relee el flujo y reemite los registros por dirección.
fn rebuild_address_records(configuration: &MissionConfiguration) -> Result<()> {
    let stream = TransactionStreamView::open(
        &configuration.output_directory.join(TRANSACTION_FILE_NAME),
    )
    .context("TransactionFile.bin ilegible; corra primero la pasada 1")?;
    let key_table = PublicKeyTableView::open(
        &configuration.output_directory.join(PUBLIC_KEYS_FILE_NAME),
    )
    .context("PublicKeys.bin ilegible; corra primero la pasada 1")?;

    let collated_count = build_address_records(
        &stream,
        &key_table,
        &configuration.output_directory.join(PUBLIC_KEY_RECORDS_FILE_NAME),
    )
    .context("La pasada 2 no pudo cristalizar los registros")?;
    info!(
        "Public-key records database ready: {} addresses.",
        format_number(u64::from(collated_count))
    );
    Ok(())
}

/// Reportes desde los archivos persistidos de corridas previas.
fn run_reports(configuration: &MissionConfiguration) -> Result<()> {
    let stream = TransactionStreamView::open(
        &configuration.output_directory.join(TRANSACTION_FILE_NAME),
    )
    .context("TransactionFile.bin ilegible; corra primero la pasada 1")?;
    let key_table = PublicKeyTableView::open(
        &configuration.output_directory.join(PUBLIC_KEYS_FILE_NAME),
    )
    .context("PublicKeys.bin ilegible; corra primero la pasada 1")?;

    // Política del estrato analítico: un reporte que falla se registra
    // y se omite sin arrastrar al resto.
    let daily_engine = DailyStatisticsEngine::new(&stream, &key_table);
    if let Err(report_fault) = daily_engine.run(&configuration.output_directory) {
        warn!("Daily statistics report skipped: {}", report_fault);
    }

    match PublicKeyRecordsView::open(
        &configuration.output_directory.join(PUBLIC_KEY_RECORDS_FILE_NAME),
    ) {
        Ok(records) => {
            if let Err(report_fault) = report_top_balances(
                &records,
                &key_table,
                &configuration.output_directory.join("TopBalances.csv"),
                TOP_BALANCES_ROW_CAP,
                u32::MAX,
            ) {
                warn!("Top-balances report skipped: {}", report_fault);
            }
        }
        Err(open_fault) => {
            warn!(
                "PublicKeyRecords.bin unavailable; top-balances skipped: {}",
                open_fault
            );
        }
    }

    Ok(())
}
