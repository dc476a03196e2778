// [libs/infra/blockstore/src/errors.rs]
// =================================================================
// APARATO: BLOCKSTORE ERRORS
// RESPONSABILIDAD: CATÁLOGO DE FALLOS DEL ESCÁNER Y DEL PARSER
// ESTADO: ELITE COMPLIANCE (FULL RUSTDOC)
// =================================================================

use chronicler_core_bytes::StreamFault;
use thiserror::Error;

/// Fallos fatales del escáner de archivos blk?????.dat.
///
/// La política de propagación es estricta: una violación de invariante
/// durante el escaneo aborta la corrida completa, de modo que el estado
/// a medio escribir en disco sea evidentemente incompleto.
#[derive(Error, Debug)]
pub enum ScanFault {
    /// Fallo de E/S al abrir o mapear un archivo de bloques.
    #[error("Error de I/O sobre el archivo de bloques: {0}")]
    Io(#[from] std::io::Error),

    /// El directorio no contiene ni siquiera blk00000.dat.
    #[error("No se encontró ningún archivo blk?????.dat en '{0}'")]
    NoBlockFiles(String),

    /// La longitud declarada de un bloque excede el techo de sanidad.
    #[error("Bloque de {declared} bytes excede el techo de {ceiling} bytes (archivo {file_index}, offset {file_offset})")]
    OversizedBlock {
        /// Longitud declarada en la trama.
        declared: u32,
        /// Techo de sanidad vigente.
        ceiling: u32,
        /// Archivo blk donde ocurrió.
        file_index: u32,
        /// Offset de la trama ofensora.
        file_offset: u64,
    },

    /// El escaneo terminó sin registrar ningún bloque.
    #[error("El escaneo no produjo ningún encabezado de bloque")]
    EmptyScan,
}

/// Fallos al materializar un bloque canónico desde su archivo mapeado.
#[derive(Error, Debug)]
pub enum StoreFault {
    /// El índice pedido no pertenece a la cadena canónica.
    #[error("Índice de bloque fuera de la cadena canónica: {0}")]
    UnknownBlock(u32),

    /// La región declarada del bloque excede el archivo mapeado.
    #[error("Región de bloque fuera del archivo mapeado (archivo {file_index}, offset {file_offset}, longitud {block_length})")]
    RegionOutOfBounds {
        /// Archivo blk de origen.
        file_index: u32,
        /// Offset del cuerpo declarado.
        file_offset: u64,
        /// Longitud declarada.
        block_length: u32,
    },

    /// El parseo del bloque falló.
    #[error(transparent)]
    Parse(#[from] ParseFault),

    /// Fallo de E/S del reporte de texto ASCII.
    #[error("Error de I/O sobre el reporte de texto: {0}")]
    Io(#[from] std::io::Error),
}

/// Fallos fatales del parser de bloques y transacciones.
#[derive(Error, Debug)]
pub enum ParseFault {
    /// La región del bloque terminó antes de completar una lectura.
    #[error("Bloque truncado: {0}")]
    Truncated(#[from] StreamFault),

    /// El conteo declarado excede el techo de sanidad.
    #[error("Conteo de {kind} fuera de rango: {declared} (techo {ceiling})")]
    UnreasonableCount {
        /// Qué conteo se desbordó (transacciones, inputs, outputs).
        kind: &'static str,
        /// Valor declarado en el flujo.
        declared: u64,
        /// Techo de sanidad vigente.
        ceiling: u64,
    },

    /// Un script declara una longitud por encima del techo de 32 KiB.
    #[error("Script de {declared} bytes excede el techo de {ceiling} bytes")]
    OutrageousScript {
        /// Longitud declarada.
        declared: u64,
        /// Techo de sanidad vigente.
        ceiling: u64,
    },

    /// Una transacción sin outputs viola el protocolo.
    #[error("Transacción {transaction_index} sin outputs en el bloque {block_index}")]
    EmptyOutputs {
        /// Bloque contenedor.
        block_index: u32,
        /// Transacción ofensora.
        transaction_index: u32,
    },

    /// Una transacción sin inputs sólo es válida como coinbase singular.
    #[error("Transacción {transaction_index} sin inputs en el bloque {block_index}")]
    EmptyInputs {
        /// Bloque contenedor.
        block_index: u32,
        /// Transacción ofensora.
        transaction_index: u32,
    },
}
