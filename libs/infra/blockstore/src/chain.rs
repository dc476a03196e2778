// [libs/infra/blockstore/src/chain.rs]
/*!
 * =================================================================
 * APARATO: CANONICAL CHAIN BUILDER (V4.0 - SOBERANO)
 * CLASIFICACIÓN: INFRA LAYER (ESTRATO L3)
 * RESPONSABILIDAD: LINEALIZACIÓN DE LA CADENA Y PODA DE HUÉRFANOS
 *
 * VISION HIPER-HOLÍSTICA:
 * Los bloques no llegan ordenados en los archivos blk: el cliente
 * escribe huérfanos mientras está conectado a la red. La única cadena
 * verdadera se reconstruye caminando los punteros previous-hash hacia
 * atrás desde la punta; todo encabezado no alcanzable queda podado.
 *
 * # Mathematical Proof (Two-Walk Fill):
 * La primera caminata punta->génesis cuenta los eslabones; la segunda
 * llena el arreglo desde la longitud conocida hacia atrás. Ambas son
 * O(n) sobre la tabla hash de encabezados.
 * =================================================================
 */

use chronicler_domain_models::Hash256;
use std::collections::HashMap;
use tracing::info;

/// Encabezado registrado durante el escaneo; se descarta tras el build.
#[derive(Clone, Copy, Debug)]
pub struct ChainHeader {
    /// Doble SHA-256 de la cabecera de 80 bytes.
    pub hash: Hash256,
    /// Hash del bloque anterior.
    pub previous: Hash256,
    /// Archivo blk que contiene el cuerpo del bloque.
    pub file_index: u32,
    /// Offset del cuerpo dentro de ese archivo.
    pub file_offset: u64,
    /// Longitud declarada del bloque.
    pub block_length: u32,
}

/// La cadena canónica en orden hacia adelante (génesis en el índice 0).
pub struct CanonicalChain {
    headers: Vec<ChainHeader>,
    orphan_count: usize,
}

impl CanonicalChain {
    /// Linealiza el bosque de encabezados desde la punta escaneada.
    #[must_use]
    pub fn build(
        header_set: &HashMap<Hash256, ChainHeader>,
        tip_hash: Hash256,
    ) -> Self {
        info!("Found {} block headers total.", header_set.len());
        info!("Building complete block-chain.");

        // Primera caminata: contar los eslabones alcanzables.
        let mut link_count = 0usize;
        let mut walk_cursor = header_set.get(&tip_hash);
        while let Some(header) = walk_cursor {
            link_count += 1;
            walk_cursor = header_set.get(&header.previous);
        }

        let orphan_count = header_set.len() - link_count;
        info!(
            "Found {} blocks and skipped {} orphan blocks.",
            link_count, orphan_count
        );

        // Segunda caminata: llenar el arreglo desde el final.
        info!("Gathering {} block headers.", link_count);
        let mut headers = vec![
            ChainHeader {
                hash: Hash256::ZERO,
                previous: Hash256::ZERO,
                file_index: 0,
                file_offset: 0,
                block_length: 0,
            };
            link_count
        ];
        let mut fill_index = link_count;
        let mut walk_cursor = header_set.get(&tip_hash);
        while let Some(header) = walk_cursor {
            fill_index -= 1;
            headers[fill_index] = *header;
            walk_cursor = header_set.get(&header.previous);
        }

        Self {
            headers,
            orphan_count,
        }
    }

    /// Cantidad de bloques canónicos.
    #[must_use]
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    /// Verdadero si la cadena quedó vacía.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Encabezados huérfanos podados durante la linealización.
    #[must_use]
    pub fn orphan_count(&self) -> usize {
        self.orphan_count
    }

    /// Encabezado del bloque canónico en la posición dada.
    #[must_use]
    pub fn header(&self, block_index: usize) -> Option<&ChainHeader> {
        self.headers.get(block_index)
    }

    /// Hash del bloque siguiente al dado, si existe.
    #[must_use]
    pub fn next_block_hash(&self, block_index: usize) -> Option<Hash256> {
        self.headers.get(block_index + 1).map(|header| header.hash)
    }
}
