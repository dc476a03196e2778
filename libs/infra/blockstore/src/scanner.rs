// [libs/infra/blockstore/src/scanner.rs]
#![allow(unsafe_code)] // Autorizado exclusivamente para el mapeo de memoria virtual (mmap)

/*!
 * =================================================================
 * APARATO: BLOCK FILE SCANNER (V6.0 - SOBERANO)
 * CLASIFICACIÓN: INFRA LAYER (ESTRATO L3)
 * RESPONSABILIDAD: ESCANEO DE TRAMAS BLK CON RESINCRONIZACIÓN
 *
 * VISION HIPER-HOLÍSTICA:
 * 1. MEMORY SOBERANEITY: Cada archivo blk se mapea en modo sólo
 *    lectura una única vez; el escaneo y las relecturas posteriores
 *    comparten la misma vista Zero-Copy.
 * 2. RECOVERY MODE: Ante un magic ausente se barre linealmente hasta
 *    una ventana de bloque completa buscando la próxima trama; la
 *    distancia saltada queda registrada en la traza.
 * 3. CLEAN EOF: Una cola de bytes cero termina el archivo sin ruido;
 *    una trama parcial al final tampoco aborta los archivos restantes.
 *
 * # Mathematical Proof (Frame Advance):
 * Tras aceptar una trama el cursor avanza exactamente 8 + longitud
 * bytes, por lo que el escaneo visita cada trama una sola vez y
 * termina en O(bytes totales).
 * =================================================================
 */

use crate::chain::ChainHeader;
use crate::errors::ScanFault;
use byteorder::{ByteOrder, LittleEndian};
use chronicler_core_hash::sha256d;
use chronicler_domain_models::Hash256;
use memmap2::Mmap;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Sello mágico de cada trama de bloque en disco.
pub const BLOCK_MAGIC: u32 = 0xD9B4_BEF9;
/// Techo de sanidad: jamás se espera un bloque mayor a 32 MiB.
pub const MAX_BLOCK_SIZE: u32 = 32 * 1024 * 1024;
/// Bytes de la cabecera de trama (magic + longitud).
const FRAME_PREFIX_SIZE: usize = 8;
/// Bytes de la cabecera de bloque del protocolo.
const BLOCK_HEADER_SIZE: usize = 80;

/// Resultado de un paso del escaneo síncrono.
#[derive(Debug, PartialEq, Eq)]
pub enum ScanProgress {
    /// Se registró un encabezado más; total escaneado hasta ahora.
    Progress(u32),
    /// No quedan tramas por leer (o se alcanzó el tope configurado).
    Complete,
}

/// Un archivo blk?????.dat mapeado en modo sólo lectura.
pub struct MappedBlockFile {
    path: PathBuf,
    map: Option<Mmap>,
}

impl MappedBlockFile {
    fn open(path: PathBuf) -> Result<Self, ScanFault> {
        let file_handle = File::open(&path)?;
        let file_metadata = file_handle.metadata()?;

        // Auditoría de Pre-Vuelo: un archivo vacío no puede mapearse.
        let map = if file_metadata.len() == 0 {
            None
        } else {
            // SAFETY: El mapeo se realiza sobre un descriptor verificado,
            // abierto en modo lectura exclusiva. Se asume inmutabilidad
            // del archivo en disco durante el tiempo de ejecución.
            Some(unsafe { Mmap::map(&file_handle)? })
        };

        info!("Opened blockchain file '{}' for read access.", path.display());
        Ok(Self { path, map })
    }

    /// Vista contigua del archivo completo (vacía si el archivo lo es).
    #[must_use]
    pub fn region(&self) -> &[u8] {
        self.map.as_deref().unwrap_or(&[])
    }

    /// Ruta física del archivo.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Escáner secuencial del bosque de bloques en disco.
pub struct BlockFileScanner {
    root_directory: PathBuf,
    files: Vec<MappedBlockFile>,
    max_blocks: u32,
    current_file_index: usize,
    current_offset: usize,
    scan_count: u32,
    headers: HashMap<Hash256, ChainHeader>,
    last_header_hash: Option<Hash256>,
}

impl BlockFileScanner {
    /// Abre el primer archivo blk00000.dat del directorio raíz.
    ///
    /// # Errors:
    /// - `ScanFault::NoBlockFiles` si el directorio no contiene bloques.
    /// - `ScanFault::Io` ante un fallo del sistema de archivos.
    pub fn new(root_directory: &Path, max_blocks: u32) -> Result<Self, ScanFault> {
        let first_path = block_file_path(root_directory, 0);
        if !first_path.exists() {
            return Err(ScanFault::NoBlockFiles(
                root_directory.display().to_string(),
            ));
        }

        let mut scanner = Self {
            root_directory: root_directory.to_path_buf(),
            files: Vec::new(),
            max_blocks,
            current_file_index: 0,
            current_offset: 0,
            scan_count: 0,
            headers: HashMap::new(),
            last_header_hash: None,
        };
        scanner.files.push(MappedBlockFile::open(first_path)?);
        Ok(scanner)
    }

    /// Total de encabezados registrados hasta ahora.
    #[must_use]
    pub fn header_count(&self) -> usize {
        self.headers.len()
    }

    /// Total de tramas aceptadas hasta ahora.
    #[must_use]
    pub fn scan_count(&self) -> u32 {
        self.scan_count
    }

    /// Avanza el escaneo en exactamente una trama.
    ///
    /// Operación síncrona: la suspensión no existe; el tope configurado
    /// 'max_blocks' acota la corrida completa.
    pub fn scan_next(&mut self) -> Result<ScanProgress, ScanFault> {
        if self.scan_count >= self.max_blocks {
            return Ok(ScanProgress::Complete);
        }
        if self.read_block_header()? {
            self.scan_count += 1;
            Ok(ScanProgress::Progress(self.scan_count))
        } else {
            Ok(ScanProgress::Complete)
        }
    }

    /// Desarma el escáner entregando los mapas, el set de encabezados
    /// y el último encabezado visto (la punta provisional de la cadena).
    pub fn into_parts(
        self,
    ) -> (
        Vec<MappedBlockFile>,
        HashMap<Hash256, ChainHeader>,
        Option<Hash256>,
    ) {
        (self.files, self.headers, self.last_header_hash)
    }

    /// Lee el próximo encabezado de bloque disponible.
    /// Retorna false cuando el bosque completo fue agotado.
    fn read_block_header(&mut self) -> Result<bool, ScanFault> {
        loop {
            if self.current_file_index >= self.files.len() && !self.open_next_file()? {
                return Ok(false);
            }

            let region_length = self.files[self.current_file_index].region().len();

            if self.current_offset + FRAME_PREFIX_SIZE > region_length {
                if self.current_offset < region_length {
                    warn!(
                        "Partial trailing frame in '{}'; advancing to the next data file.",
                        self.files[self.current_file_index].path().display()
                    );
                }
                self.advance_file();
                continue;
            }

            let magic = {
                let region = self.files[self.current_file_index].region();
                LittleEndian::read_u32(&region[self.current_offset..])
            };
            if magic != BLOCK_MAGIC {
                if !self.resynchronize() {
                    self.advance_file();
                }
                continue;
            }

            let block_length = {
                let region = self.files[self.current_file_index].region();
                LittleEndian::read_u32(&region[self.current_offset + 4..]) as usize
            };
            if block_length as u32 >= MAX_BLOCK_SIZE {
                return Err(ScanFault::OversizedBlock {
                    declared: block_length as u32,
                    ceiling: MAX_BLOCK_SIZE,
                    file_index: self.current_file_index as u32,
                    file_offset: self.current_offset as u64,
                });
            }

            let body_offset = self.current_offset + FRAME_PREFIX_SIZE;
            if block_length < BLOCK_HEADER_SIZE || body_offset + block_length > region_length {
                warn!(
                    "Partial trailing frame in '{}'; advancing to the next data file.",
                    self.files[self.current_file_index].path().display()
                );
                self.advance_file();
                continue;
            }

            let region = self.files[self.current_file_index].region();
            let header_bytes = &region[body_offset..body_offset + BLOCK_HEADER_SIZE];
            let block_hash = Hash256(sha256d(header_bytes));

            let mut previous_hash_bytes = [0u8; 32];
            previous_hash_bytes.copy_from_slice(&header_bytes[4..36]);

            let header = ChainHeader {
                hash: block_hash,
                previous: Hash256(previous_hash_bytes),
                file_index: self.current_file_index as u32,
                file_offset: body_offset as u64,
                block_length: block_length as u32,
            };

            // Un encabezado repetido conserva su primera aparición.
            if let Entry::Vacant(slot) = self.headers.entry(block_hash) {
                slot.insert(header);
            }
            self.last_header_hash = Some(block_hash);
            self.current_offset = body_offset + block_length;
            return Ok(true);
        }
    }

    /// Barrido lineal de recuperación dentro de una ventana de bloque.
    /// Retorna true si reposicionó el cursor sobre un magic válido.
    fn resynchronize(&mut self) -> bool {
        let region = self.files[self.current_file_index].region();
        let tail = &region[self.current_offset..];

        // Cola de ceros: fin de archivo limpio, sin advertencias.
        if tail.iter().all(|&byte| byte == 0) {
            debug!(
                "Trailing zero run in '{}'; clean end of file.",
                self.files[self.current_file_index].path().display()
            );
            return false;
        }

        warn!("Warning: Missing block-header; scanning for next one.");
        let window_length = tail.len().min(MAX_BLOCK_SIZE as usize);
        let window = &tail[..window_length];
        for skip_distance in 1..window_length.saturating_sub(3) {
            if LittleEndian::read_u32(&window[skip_distance..]) == BLOCK_MAGIC {
                warn!(
                    "Found the next block header after skipping: {} bytes forward in the file.",
                    skip_distance
                );
                self.current_offset += skip_distance;
                return true;
            }
        }
        warn!(
            "No block header found within one window in '{}'; advancing to the next data file.",
            self.files[self.current_file_index].path().display()
        );
        false
    }

    /// Salta al siguiente archivo del bosque.
    fn advance_file(&mut self) {
        self.current_file_index += 1;
        self.current_offset = 0;
    }

    /// Intenta abrir blk{N}.dat para el siguiente índice de archivo.
    fn open_next_file(&mut self) -> Result<bool, ScanFault> {
        let next_index = self.files.len();
        let next_path = block_file_path(&self.root_directory, next_index as u32);
        if !next_path.exists() {
            debug!(
                "Failed to open blockchain file '{}' for read access.",
                next_path.display()
            );
            return Ok(false);
        }
        self.files.push(MappedBlockFile::open(next_path)?);
        self.current_file_index = next_index;
        self.current_offset = 0;
        Ok(true)
    }
}

/// Nombre canónico blkNNNNN.dat bajo el directorio raíz.
#[must_use]
pub fn block_file_path(root_directory: &Path, file_index: u32) -> PathBuf {
    root_directory.join(format!("blk{:05}.dat", file_index))
}
