/**
 * =================================================================
 * APARATO: CERTIFICADOR DE RESINCRONIZACIÓN DEL ESCÁNER (PROVING GROUNDS)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L3-BLOCKSTORE
 * OBJETIVO: Certificar la recuperación ante tramas corruptas (salto de
 *           1536 bytes), colas de ceros y tramas parciales multi-archivo.
 * =================================================================
 */

#[cfg(test)]
mod tests {
    use chronicler_core_hash::sha256d;
    use chronicler_domain_classifier::ScriptClassifier;
    use chronicler_infra_blockstore::{BlockFileScanner, BlockStore, ScanProgress};
    use std::io::Write;
    use std::path::Path;
    use tempfile::tempdir;

    /// Forja mínima de bloques sintéticos con el framing de disco.
    mod forge {
        use super::sha256d;

        pub fn coinbase_transaction(value: u64, script_tag: u8) -> Vec<u8> {
            let mut transaction = Vec::new();
            transaction.extend_from_slice(&1u32.to_le_bytes()); // versión
            transaction.push(1); // un input
            transaction.extend_from_slice(&[0u8; 32]); // hash previo nulo
            transaction.extend_from_slice(&0xFFFF_FFFFu32.to_le_bytes()); // centinela
            transaction.push(2); // script de respuesta de 2 bytes
            transaction.extend_from_slice(&[script_tag, script_tag]);
            transaction.extend_from_slice(&0xFFFF_FFFFu32.to_le_bytes()); // secuencia
            transaction.push(1); // un output
            transaction.extend_from_slice(&value.to_le_bytes());
            // Script P2PKH estándar de 25 bytes.
            transaction.push(25);
            transaction.extend_from_slice(&[0x76, 0xa9, 0x14]);
            transaction.extend_from_slice(&[script_tag; 20]);
            transaction.extend_from_slice(&[0x88, 0xac]);
            transaction.extend_from_slice(&0u32.to_le_bytes()); // lock-time
            transaction
        }

        /// Bloque de una transacción; retorna (bytes, hash propio).
        pub fn block(previous_hash: [u8; 32], timestamp: u32, script_tag: u8) -> (Vec<u8>, [u8; 32]) {
            let mut body = Vec::new();
            body.extend_from_slice(&1u32.to_le_bytes()); // versión de formato
            body.extend_from_slice(&previous_hash);
            body.extend_from_slice(&[0xAA; 32]); // raíz de Merkle (no validada)
            body.extend_from_slice(&timestamp.to_le_bytes());
            body.extend_from_slice(&0x1d00_ffffu32.to_le_bytes()); // bits
            body.extend_from_slice(&42u32.to_le_bytes()); // nonce
            let block_hash = sha256d(&body[0..80]);
            body.push(1); // una transacción
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

    fn write_file(path: &Path, contents: &[u8]) {
        std::fs::File::create(path)
            .expect("FALLO_CREACION")
            .write_all(contents)
            .expect("FALLO_ESCRITURA");
    }

    #[test]
    fn certificar_salto_de_1536_bytes_y_eof_limpios() {
        println!("\n🔍 [CAMPOS DE PRUEBA]: Auditando la recuperación del escáner...");

        let workspace = tempdir().expect("FALLO_TEMPDIR");
        let base_time = 1_231_006_505u32;

        let (block_0, hash_0) = forge::block([0u8; 32], base_time, 0x10);
        let (block_1, hash_1) = forge::block(hash_0, base_time + 600, 0x11);
        let (block_2, hash_2) = forge::block(hash_1, base_time + 1_200, 0x12);
        let (block_3, hash_3) = forge::block(hash_2, base_time + 1_800, 0x13);
        let (block_4, _hash_4) = forge::block(hash_3, base_time + 2_400, 0x14);

        // Archivo 0: trama válida + 1536 bytes de basura + dos tramas válidas.
        let mut file_0 = forge::frame(&block_0);
        file_0.extend_from_slice(&[0x01u8; 1536]); // basura sin magic ni ceros
        file_0.extend_from_slice(&forge::frame(&block_1));
        file_0.extend_from_slice(&forge::frame(&block_2));
        write_file(&workspace.path().join("blk00000.dat"), &file_0);

        // Archivo 1: trama válida + cola de ceros (EOF limpio).
        let mut file_1 = forge::frame(&block_3);
        file_1.extend_from_slice(&[0u8; 600]);
        write_file(&workspace.path().join("blk00001.dat"), &file_1);

        // Archivo 2: trama válida + trama parcial al final.
        let mut file_2 = forge::frame(&block_4);
        file_2.extend_from_slice(&0xD9B4_BEF9u32.to_le_bytes());
        file_2.extend_from_slice(&500u32.to_le_bytes());
        file_2.extend_from_slice(&[0x02u8; 90]); // cuerpo truncado
        write_file(&workspace.path().join("blk00002.dat"), &file_2);

        // 2. ESCANEO COMPLETO
        let mut scanner = BlockFileScanner::new(workspace.path(), 1_000).expect("FALLO_SCANNER");
        let mut scanned_total = 0u32;
        loop {
            match scanner.scan_next().expect("FALLO_SCAN") {
                ScanProgress::Progress(progress_count) => scanned_total = progress_count,
                ScanProgress::Complete => break,
            }
        }
        assert_eq!(scanned_total, 5, "Las cinco tramas válidas deben registrarse.");
        assert_eq!(scanner.header_count(), 5);

        // 3. NINGÚN BLOQUE POSTERIOR SE PIERDE (vector E6)
        let store = BlockStore::from_scanner(scanner).expect("FALLO_STORE");
        assert_eq!(store.block_count(), 5, "La cadena cruza los tres archivos.");
        assert_eq!(store.chain().orphan_count(), 0);

        let classifier = ScriptClassifier::new().expect("FALLO_CLASSIFIER");
        for block_index in 0..5 {
            let block = store
                .read_block(block_index, &classifier, None)
                .expect("FALLO_READ");
            assert_eq!(block.transactions.len(), 1);
            assert_eq!(block.output_sum, 5_000_000_000);
        }

        println!("\n🏁 [VEREDICTO]: Resincronización y EOF certificados.");
    }

    #[test]
    fn certificar_tope_de_escaneo() {
        let workspace = tempdir().expect("FALLO_TEMPDIR");
        let (block_0, hash_0) = forge::block([0u8; 32], 1_231_006_505, 0x20);
        let (block_1, _) = forge::block(hash_0, 1_231_007_105, 0x21);
        let mut file_0 = forge::frame(&block_0);
        file_0.extend_from_slice(&forge::frame(&block_1));
        write_file(&workspace.path().join("blk00000.dat"), &file_0);

        let mut scanner = BlockFileScanner::new(workspace.path(), 1).expect("FALLO_SCANNER");
        assert_eq!(scanner.scan_next().expect("FALLO_SCAN"), ScanProgress::Progress(1));
        assert_eq!(
            scanner.scan_next().expect("FALLO_SCAN"),
            ScanProgress::Complete,
            "El tope configurado acota la corrida."
        );
        assert_eq!(scanner.header_count(), 1);
    }
}
