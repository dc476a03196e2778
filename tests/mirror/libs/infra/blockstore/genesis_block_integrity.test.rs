/**
 * =================================================================
 * APARATO: CERTIFICADOR DEL BLOQUE GÉNESIS (PROVING GROUNDS)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L3-BLOCKSTORE
 * OBJETIVO: Certificar el pipeline Scan -> Chain -> Parse contra el
 *           bloque 0 real de Mainnet, byte por byte.
 * =================================================================
 */

#[cfg(test)]
mod tests {
    use chronicler_domain_classifier::ScriptClassifier;
    use chronicler_domain_models::KeyType;
    use chronicler_infra_blockstore::{BlockFileScanner, BlockStore, ScanProgress};
    use std::io::Write;
    use tempfile::tempdir;

    /// Los 285 bytes reales del bloque génesis de Mainnet.
    const GENESIS_BLOCK_HEX: &str = concat!(
        "01000000",
        "0000000000000000000000000000000000000000000000000000000000000000",
        "3ba3edfd7a7b12b27ac72c3e67768f617fc81bc3888a51323a9fb8aa4b1e5e4a",
        "29ab5f49",
        "ffff001d",
        "1dac2b7c",
        "01",
        "01000000",
        "01",
        "0000000000000000000000000000000000000000000000000000000000000000",
        "ffffffff",
        "4d",
        "04ffff001d0104455468652054696d65732030332f4a616e2f32303039204368616e63656c6c6f72206f6e206272696e6b206f66207365636f6e64206261696c6f757420666f722062616e6b73",
        "ffffffff",
        "01",
        "00f2052a01000000",
        "43",
        "4104678afdb0fe5548271967f1a67130b7105cd6a828e03909a67962e0ea1f61deb649f6bc3f4cef38c4f35504e51ec112de5c384df7ba0b8d578a4c702b6bf11d5fac",
        "00000000",
    );

    const GENESIS_BLOCK_HASH: &str =
        "000000000019d6689c085ae165831e934ff763ae46a2a6c172b3f1b60a8ce26f";
    const GENESIS_TX_HASH: &str =
        "4a5e1e4baab89f3a32518a88c31bc87f618f76673e2cc77ab2127b7afdeda33b";
    const GENESIS_ADDRESS: &str = "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa";

    #[test]
    fn certificar_bloque_cero_de_mainnet() {
        println!("\n🔍 [CAMPOS DE PRUEBA]: Auditando el bloque génesis real...");

        // 1. FORJA DEL ARCHIVO blk00000.dat
        let workspace = tempdir().expect("FALLO_TEMPDIR");
        let block_bytes = hex::decode(GENESIS_BLOCK_HEX).expect("FALLO_HEX");
        assert_eq!(block_bytes.len(), 285, "El génesis mide 285 bytes.");

        let mut framed = Vec::new();
        framed.extend_from_slice(&0xD9B4_BEF9u32.to_le_bytes());
        framed.extend_from_slice(&(block_bytes.len() as u32).to_le_bytes());
        framed.extend_from_slice(&block_bytes);

        let file_path = workspace.path().join("blk00000.dat");
        std::fs::File::create(&file_path)
            .expect("FALLO_CREACION")
            .write_all(&framed)
            .expect("FALLO_ESCRITURA");

        // 2. ESCANEO Y LINEALIZACIÓN
        let mut scanner = BlockFileScanner::new(workspace.path(), 1_000).expect("FALLO_SCANNER");
        assert_eq!(scanner.scan_next().expect("FALLO_SCAN"), ScanProgress::Progress(1));
        assert_eq!(scanner.scan_next().expect("FALLO_SCAN"), ScanProgress::Complete);
        assert_eq!(scanner.header_count(), 1);

        let store = BlockStore::from_scanner(scanner).expect("FALLO_STORE");
        assert_eq!(store.block_count(), 1);
        assert_eq!(store.chain().orphan_count(), 0);

        // 3. PARSEO Y VECTORES LITERALES
        let classifier = ScriptClassifier::new().expect("FALLO_CLASSIFIER");
        let block = store.read_block(0, &classifier, None).expect("FALLO_READ");

        println!("   🧪 Verificando hash de bloque (doble SHA-256 de la cabecera)...");
        assert_eq!(block.computed_block_hash.to_string(), GENESIS_BLOCK_HASH);
        assert!(block.previous_block_hash.iter().all(|&byte| byte == 0));
        assert_eq!(block.timestamp, 1_231_006_505);

        println!("   🧪 Verificando la transacción coinbase...");
        assert_eq!(block.transactions.len(), 1);
        let coinbase = &block.transactions[0];
        assert_eq!(coinbase.transaction_hash.to_string(), GENESIS_TX_HASH);
        assert!(coinbase.has_coinbase_input());
        assert_eq!(coinbase.serialized_length, 204);

        println!("   🧪 Verificando el output de 50 BTC...");
        assert_eq!(coinbase.outputs.len(), 1);
        let reward_output = &coinbase.outputs[0];
        assert_eq!(reward_output.value, 5_000_000_000);
        assert_eq!(reward_output.key_type, KeyType::UncompressedP2pk);
        assert_eq!(reward_output.addresses[0].to_ascii(), GENESIS_ADDRESS);
        assert_eq!(block.output_sum, 5_000_000_000);
        assert!(!block.warning);

        // 4. VOLCADO DIAGNÓSTICO (no debe entrar en pánico)
        chronicler_infra_blockstore::printer::print_block(&block);

        println!("\n🏁 [VEREDICTO]: El bloque génesis parsea bit-perfecto.");
    }
}
