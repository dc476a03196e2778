// [libs/domain/analytics/src/errors.rs]
// =================================================================
// APARATO: ANALYTICS ERRORS
// RESPONSABILIDAD: CATÁLOGO DE FALLOS DE LA CAPA DE REPORTES
// ESTADO: ELITE COMPLIANCE (FULL RUSTDOC)
// =================================================================

use chronicler_infra_ledger::IndexFault;
use thiserror::Error;

/// Fallos de la capa de reportes.
///
/// La política del estrato analítico es degradar: un reporte que falla
/// se registra y se omite, sin arrastrar al resto de la corrida.
#[derive(Error, Debug)]
pub enum ReportFault {
    /// Fallo de E/S sobre un archivo CSV de salida.
    #[error("Error de I/O sobre el reporte: {0}")]
    Io(#[from] std::io::Error),

    /// Fallo del motor CSV.
    #[error("Error del escritor CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Las vistas del ledger rechazaron la lectura.
    #[error(transparent)]
    Ledger(#[from] IndexFault),
}
