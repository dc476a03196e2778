// [apps/chain-chronicler/src/main.rs]
/**
 * =================================================================
 * APARATO: CHRONICLER SHELL (V4.0 - SOBERANO)
 * CLASIFICACIÓN: APPLICATION LAYER (ENTRY POINT)
 * RESPONSABILIDAD: ORQUESTACIÓN DE ARGUMENTOS Y DISPARO DEL DRIVER
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. LIBRARY SYNERGY: El binario es un orquestador puro y ligero;
 *    toda la lógica reside en 'chronicler_cli' para su auditoría en
 *    Proving Grounds.
 * 2. TRACING INITIALIZATION: Configura el sumidero de telemetría
 *    antes de cualquier acceso a disco.
 * 3. ERROR TRIAGE: 'anyhow' captura los fallos fatales del pipeline
 *    y el proceso termina con código distinto de cero.
 * =================================================================
 */

use anyhow::Result;
use chronicler_cli::{execute_mission, MissionConfiguration};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Configuración de argumentos del analizador offline de la cadena.
#[derive(Parser, Debug)]
#[command(
    author = "Raz Podesta <metaShark Tech>",
    version = "4.0",
    about = "El Cronista: analiza los archivos blk?????.dat de un nodo completo y cristaliza índices binarios y reportes CSV."
)]
struct CommandArguments {
    /// Directorio que contiene los archivos blk?????.dat del nodo.
    #[arg(value_name = "DATA_DIRECTORY", default_value = ".")]
    data_directory: PathBuf,

    /// Directorio de salida para índices binarios y reportes CSV.
    #[arg(short, long, default_value = ".")]
    output_directory: PathBuf,

    /// Tope de bloques a escanear.
    #[arg(long = "max-blocks", default_value_t = 10_000_000)]
    max_blocks: u32,

    /// Saltar el escaneo; correr los reportes desde archivos previos.
    #[arg(long)]
    analyze: bool,

    /// Re-correr únicamente la pasada 2 (registros por dirección).
    #[arg(long)]
    rebuild: bool,

    /// Longitud mínima de corrida ASCII a extraer (0 la desactiva).
    #[arg(long = "text", default_value_t = 0)]
    text_run_length: u32,
}

/**
 * Punto de ignición del binario ejecutable.
 *
 * # Performance:
 * El parseo de bloques y el doble SHA-256 son intensivos; se
 * recomienda ejecutar con el flag --release.
 */
fn main() -> Result<()> {
    // 1. INICIALIZACIÓN DEL SISTEMA NERVIOSO (LOGGING)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    info!("🗺️ [CHRONICLER]: Initializing execution shell V4.0...");

    // 2. PARSEO DE DIRECTIVAS DE MANDO
    let cli_configuration = CommandArguments::parse();

    // 3. CONSTRUCCIÓN DE LA MISIÓN
    let mission = MissionConfiguration {
        data_directory: cli_configuration.data_directory,
        output_directory: cli_configuration.output_directory,
        max_blocks: cli_configuration.max_blocks.max(1),
        analyze: cli_configuration.analyze,
        rebuild: cli_configuration.rebuild,
        text_run_length: cli_configuration.text_run_length,
    };

    info!("🚀 [IGNITION]: Starting chain chronicle sequence.");

    // 4. EJECUCIÓN DE LA MISIÓN (bloquea hasta sellar los archivos)
    execute_mission(&mission)
}
