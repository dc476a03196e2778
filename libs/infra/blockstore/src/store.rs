// [libs/infra/blockstore/src/store.rs]
/*!
 * =================================================================
 * APARATO: CANONICAL BLOCK STORE (V5.0 - SOBERANO)
 * CLASIFICACIÓN: INFRA LAYER (ESTRATO L3)
 * RESPONSABILIDAD: MATERIALIZACIÓN DE BLOQUES CANÓNICOS PARSEADOS
 *
 * VISION HIPER-HOLÍSTICA:
 * El almacén retiene los mapas de memoria del escaneo y la cadena ya
 * linealizada. 'read_block' entrega un bloque parseado cuyo alcance
 * queda ligado a la vista mapeada: los bytes crudos pertenecen al
 * mapa de su archivo, nunca al bloque.
 * =================================================================
 */

use crate::chain::CanonicalChain;
use crate::errors::{ScanFault, StoreFault};
use crate::parser::{parse_block, BlockParseContext};
use crate::scanner::{BlockFileScanner, MappedBlockFile};
use crate::text_report::AsciiTextExtractor;
use chronicler_domain_classifier::ScriptClassifier;
use chronicler_domain_models::Block;

/// Almacén de bloques canónicos respaldado por los mapas del escaneo.
pub struct BlockStore {
    files: Vec<MappedBlockFile>,
    chain: CanonicalChain,
}

impl BlockStore {
    /// Consume el escáner terminado y linealiza la cadena canónica.
    ///
    /// # Errors:
    /// `ScanFault::EmptyScan` si el escaneo no registró ningún bloque.
    pub fn from_scanner(scanner: BlockFileScanner) -> Result<Self, ScanFault> {
        let (files, header_set, last_header_hash) = scanner.into_parts();
        let tip_hash = last_header_hash.ok_or(ScanFault::EmptyScan)?;
        let chain = CanonicalChain::build(&header_set, tip_hash);
        Ok(Self { files, chain })
    }

    /// Cadena canónica linealizada.
    #[must_use]
    pub fn chain(&self) -> &CanonicalChain {
        &self.chain
    }

    /// Total de bloques canónicos disponibles.
    #[must_use]
    pub fn block_count(&self) -> u32 {
        self.chain.len() as u32
    }

    /**
     * Materializa el bloque canónico en la posición dada.
     *
     * Si el extractor de texto está presente, el barrido ASCII ocurre
     * sobre la misma región mapeada antes de retornar.
     *
     * # Errors:
     * Propaga fallos de parseo como fatales; un bloque corrupto en la
     * cadena canónica invalida la corrida completa.
     */
    pub fn read_block(
        &self,
        block_index: u32,
        classifier: &ScriptClassifier,
        mut text_extractor: Option<&mut AsciiTextExtractor>,
    ) -> Result<Block<'_>, StoreFault> {
        let header = self
            .chain
            .header(block_index as usize)
            .ok_or(StoreFault::UnknownBlock(block_index))?;

        let region_start = header.file_offset as usize;
        let region_end = region_start + header.block_length as usize;
        let file_region = self
            .files
            .get(header.file_index as usize)
            .map(MappedBlockFile::region)
            .filter(|region| region_end <= region.len())
            .ok_or(StoreFault::RegionOutOfBounds {
                file_index: header.file_index,
                file_offset: header.file_offset,
                block_length: header.block_length,
            })?;
        let block_region = &file_region[region_start..region_end];

        let context = BlockParseContext {
            block_index,
            file_index: header.file_index,
            file_offset: header.file_offset,
        };
        let mut block = parse_block(block_region, &context, classifier)?;
        block.next_block_hash = self.chain.next_block_hash(block_index as usize);

        if let Some(extractor) = text_extractor.as_deref_mut() {
            extractor.scan_block(block_region, block_index, block.timestamp)?;
        }

        Ok(block)
    }
}
