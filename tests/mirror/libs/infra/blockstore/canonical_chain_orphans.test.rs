/**
 * =================================================================
 * APARATO: CERTIFICADOR DE CADENA CANÓNICA (PROVING GROUNDS)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L3-BLOCKSTORE
 * OBJETIVO: Certificar la poda de huérfanos y los invariantes de
 *           encadenamiento previous-hash sobre un bosque sintético.
 * =================================================================
 */

#[cfg(test)]
mod tests {
    use chronicler_core_hash::sha256d;
    use chronicler_domain_classifier::ScriptClassifier;
    use chronicler_domain_models::Hash256;
    use chronicler_infra_blockstore::{BlockFileScanner, BlockStore, ScanProgress};
    use std::io::Write;
    use tempfile::tempdir;

    /// Forja mínima de bloques sintéticos con el framing de disco.
    mod forge {
        use super::sha256d;

        pub fn coinbase_transaction(value: u64, script_tag: u8) -> Vec<u8> {
            let mut transaction = Vec::new();
            transaction.extend_from_slice(&1u32.to_le_bytes());
            transaction.push(1);
            transaction.extend_from_slice(&[0u8; 32]);
            transaction.extend_from_slice(&0xFFFF_FFFFu32.to_le_bytes());
            transaction.push(2);
            transaction.extend_from_slice(&[script_tag, script_tag]);
            transaction.extend_from_slice(&0xFFFF_FFFFu32.to_le_bytes());
            transaction.push(1);
            transaction.extend_from_slice(&value.to_le_bytes());
            transaction.push(25);
            transaction.extend_from_slice(&[0x76, 0xa9, 0x14]);
            transaction.extend_from_slice(&[script_tag; 20]);
            transaction.extend_from_slice(&[0x88, 0xac]);
            transaction.extend_from_slice(&0u32.to_le_bytes());
            transaction
        }

        pub fn block(previous_hash: [u8; 32], timestamp: u32, script_tag: u8) -> (Vec<u8>, [u8; 32]) {
            let mut body = Vec::new();
            body.extend_from_slice(&1u32.to_le_bytes());
            body.extend_from_slice(&previous_hash);
            body.extend_from_slice(&[0xAA; 32]);
            body.extend_from_slice(&timestamp.to_le_bytes());
            body.extend_from_slice(&0x1d00_ffffu32.to_le_bytes());
            body.extend_from_slice(&42u32.to_le_bytes());
            let block_hash = sha256d(&body[0..80]);
            body.push(1);
            body.extend_from_slice(&coinbase_transaction(5_000_000_000, script_tag));
            (body, block_hash)
        }

        pub fn frame(block_bytes: &[u8]) -> Vec<u8> {
            let mut framed = Vec::new();
            framed.extend_from_slice(&0xD9B4_BEF9u32.to_le_bytes());
            framed.extend_from_slice(&(block_bytes.len() as u32).to_le_bytes());
            framed.extend_from_slice(block_bytes);
            framed
        }
    }

    #[test]
    fn certificar_poda_de_huerfanos_e_invariantes() {
        println!("\n🔍 [CAMPOS DE PRUEBA]: Auditando la linealización con huérfano...");

        let workspace = tempdir().expect("FALLO_TEMPDIR");
        let base_time = 1_231_006_505u32;

        let (genesis, genesis_hash) = forge::block([0u8; 32], base_time, 0x30);
        let (block_a, hash_a) = forge::block(genesis_hash, base_time + 600, 0x31);
        // Huérfano: también apunta al génesis pero con contenido distinto.
        let (orphan, orphan_hash) = forge::block(genesis_hash, base_time + 650, 0x3F);
        let (block_b, hash_b) = forge::block(hash_a, base_time + 1_200, 0x32);

        let mut file_0 = forge::frame(&genesis);
        file_0.extend_from_slice(&forge::frame(&block_a));
        file_0.extend_from_slice(&forge::frame(&orphan));
        file_0.extend_from_slice(&forge::frame(&block_b)); // la punta escaneada
        std::fs::File::create(workspace.path().join("blk00000.dat"))
            .expect("FALLO_CREACION")
            .write_all(&file_0)
            .expect("FALLO_ESCRITURA");

        let mut scanner = BlockFileScanner::new(workspace.path(), 1_000).expect("FALLO_SCANNER");
        while scanner.scan_next().expect("FALLO_SCAN") != ScanProgress::Complete {}
        assert_eq!(scanner.header_count(), 4, "Los cuatro encabezados se registran.");

        let store = BlockStore::from_scanner(scanner).expect("FALLO_STORE");
        let chain = store.chain();

        // 1. PODA: |cadena| <= |set escaneado|, huérfano contado.
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.orphan_count(), 1);

        // 2. INVARIANTES DE ENCADENAMIENTO
        println!("   🧪 Verificando previous-hash eslabón a eslabón...");
        assert!(chain.header(0).expect("FALLO_HEADER").previous.is_zero());
        for link_index in 1..chain.len() {
            let previous_header = chain.header(link_index - 1).expect("FALLO_HEADER");
            let current_header = chain.header(link_index).expect("FALLO_HEADER");
            assert_eq!(
                current_header.previous, previous_header.hash,
                "El eslabón {} no apunta a su antecesor.",
                link_index
            );
        }
        assert_eq!(chain.header(1).expect("FALLO_HEADER").hash, Hash256(hash_a));
        assert_eq!(chain.header(2).expect("FALLO_HEADER").hash, Hash256(hash_b));
        assert_ne!(chain.header(1).expect("FALLO_HEADER").hash, Hash256(orphan_hash));

        // 3. EL BLOQUE MATERIALIZADO CONOCE A SU SUCESOR
        let classifier = ScriptClassifier::new().expect("FALLO_CLASSIFIER");
        let middle_block = store.read_block(1, &classifier, None).expect("FALLO_READ");
        assert_eq!(middle_block.next_block_hash, Some(Hash256(hash_b)));
        assert_eq!(middle_block.computed_block_hash, Hash256(hash_a));

        println!("\n🏁 [VEREDICTO]: Cadena canónica y poda certificadas.");
    }
}
