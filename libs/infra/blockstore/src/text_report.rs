// [libs/infra/blockstore/src/text_report.rs]
/*!
 * =================================================================
 * APARATO: ASCII TEXT EXTRACTOR (V3.0 - SOBERANO)
 * CLASIFICACIÓN: INFRA LAYER (ESTRATO L3)
 * RESPONSABILIDAD: ARQUEOLOGÍA DE TEXTO EMBEBIDO EN BLOQUES
 *
 * VISION HIPER-HOLÍSTICA:
 * La cadena histórica porta mensajes incrustados en scripts y datos
 * de coinbase (el titular del Times en el génesis es el más célebre).
 * Este extractor barre los bytes crudos de cada bloque canónico en
 * busca de corridas ASCII imprimibles de longitud mínima configurable
 * y las acumula en AsciiTextReport.txt.
 * =================================================================
 */

use chrono::DateTime;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Umbral de texto "largo" en el pie del reporte.
const LONG_TEXT_THRESHOLD: usize = 64;
/// Umbral de texto "muy largo" en el pie del reporte.
const VERY_LONG_TEXT_THRESHOLD: usize = 128;
/// Ancho de línea del reporte.
const REPORT_LINE_WIDTH: usize = 80;

/// Byte imprimible para la arqueología de texto (32..126 más CR).
#[inline(always)]
fn is_printable_ascii(byte: u8) -> bool {
    (32..127).contains(&byte) || byte == 13
}

/// Extractor de corridas ASCII sobre los bytes crudos de bloques.
pub struct AsciiTextExtractor {
    minimum_run_length: usize,
    report_path: PathBuf,
    sink: Option<BufWriter<File>>,
}

impl AsciiTextExtractor {
    /// Construye el extractor; el archivo se crea recién al primer hallazgo.
    #[must_use]
    pub fn new(report_path: &Path, minimum_run_length: usize) -> Self {
        Self {
            minimum_run_length: minimum_run_length.max(1),
            report_path: report_path.to_path_buf(),
            sink: None,
        }
    }

    /**
     * Barre la región cruda de un bloque y acumula sus corridas ASCII.
     *
     * # Errors:
     * Propaga los fallos de E/S del archivo de reporte.
     */
    pub fn scan_block(
        &mut self,
        block_region: &[u8],
        block_index: u32,
        block_timestamp: u32,
    ) -> std::io::Result<()> {
        let mut findings_in_block = 0usize;
        let mut total_text_bytes = 0usize;
        let mut line_fill = 0usize;
        let mut cursor = 0usize;

        while cursor < block_region.len() {
            let run_start = cursor;
            while cursor < block_region.len() && is_printable_ascii(block_region[cursor]) {
                cursor += 1;
            }
            let run_length = cursor - run_start;
            if run_length >= self.minimum_run_length {
                if findings_in_block == 0 {
                    self.write_block_banner(block_index, block_timestamp)?;
                }
                findings_in_block += 1;
                total_text_bytes += run_length;
                line_fill += run_length;

                let run_text = String::from_utf8_lossy(&block_region[run_start..cursor]);
                if let Some(sink) = self.sink.as_mut() {
                    write!(sink, "{}", run_text)?;
                    if line_fill > REPORT_LINE_WIDTH {
                        writeln!(sink)?;
                        line_fill = 0;
                    }
                }
            }
            cursor += 1;
        }

        if findings_in_block > 0 {
            self.write_block_trailer(total_text_bytes)?;
        }
        Ok(())
    }

    fn write_block_banner(&mut self, block_index: u32, block_timestamp: u32) -> std::io::Result<()> {
        if self.sink.is_none() {
            info!(
                "📜 [TEXT_REPORT]: Creating '{}' for ASCII archaeology.",
                self.report_path.display()
            );
            self.sink = Some(BufWriter::new(File::create(&self.report_path)?));
        }
        let block_date = DateTime::from_timestamp(i64::from(block_timestamp), 0)
            .map(|moment| moment.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "????-??-??".to_string());
        if let Some(sink) = self.sink.as_mut() {
            writeln!(sink, "==========================================")?;
            writeln!(
                sink,
                "= ASCII TEXT REPORT for Block #{} on {}",
                block_index, block_date
            )?;
            writeln!(sink, "==========================================")?;
        }
        Ok(())
    }

    fn write_block_trailer(&mut self, total_text_bytes: usize) -> std::io::Result<()> {
        if let Some(sink) = self.sink.as_mut() {
            writeln!(sink)?;
            writeln!(sink, "==========================================")?;
            if total_text_bytes >= VERY_LONG_TEXT_THRESHOLD {
                writeln!(sink, "Very Long Text: {} bytes", total_text_bytes)?;
            } else if total_text_bytes >= LONG_TEXT_THRESHOLD {
                writeln!(sink, "Long Text: {} bytes", total_text_bytes)?;
            } else {
                writeln!(sink, "Short Text: {} bytes", total_text_bytes)?;
            }
            writeln!(sink)?;
            sink.flush()?;
        }
        Ok(())
    }
}
