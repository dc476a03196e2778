/**
 * =================================================================
 * APARATO: CERTIFICADOR DE LA PASADA 2 (PROVING GROUNDS)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L3-LEDGER
 * OBJETIVO: Certificar la colación cronológica por dirección (gasto,
 *           coinbase, cambio) y la idempotencia byte a byte.
 * =================================================================
 */

#[cfg(test)]
mod tests {
    use chronicler_core_hash::ripemd160_to_address;
    use chronicler_domain_models::{
        Address, Block, BlockInput, BlockOutput, BlockTransaction, Hash256, KeyType,
    };
    use chronicler_infra_ledger::{
        build_address_records, LedgerIndexer, PublicKeyRecordsView, PublicKeyTableView,
        TransactionStreamView, PUBLIC_KEYS_FILE_NAME, PUBLIC_KEY_RECORDS_FILE_NAME,
        TRANSACTION_FILE_NAME,
    };
    use std::path::Path;
    use tempfile::tempdir;

    static ZERO_HASH: [u8; 32] = [0u8; 32];
    static COINBASE_0_HASH: [u8; 32] = [0xA0; 32];
    static COINBASE_1_HASH: [u8; 32] = [0xA1; 32];
    static SPEND_HASH: [u8; 32] = [0xB0; 32];

    const BASE_TIME: u32 = 1_231_006_505;

    fn classified_output(value: u64, address_tag: u8) -> BlockOutput<'static> {
        let mut output = BlockOutput::new(value, &[]);
        output.key_type = KeyType::P2pkh;
        output.addresses[0] = Address(ripemd160_to_address(&[address_tag; 20]));
        output
    }

    fn coinbase_input() -> BlockInput<'static> {
        BlockInput {
            previous_transaction_hash: &ZERO_HASH,
            previous_output_index: BlockInput::COINBASE_SENTINEL,
            response_script: &[],
            sequence_number: 0xFFFF_FFFF,
        }
    }

    fn transaction(
        hash: &[u8; 32],
        inputs: Vec<BlockInput<'static>>,
        outputs: Vec<BlockOutput<'static>>,
    ) -> BlockTransaction<'static> {
        BlockTransaction {
            transaction_hash: Hash256(*hash),
            version: 1,
            inputs,
            outputs,
            lock_time: 0,
            serialized_length: 204,
            file_index: 0,
            file_offset: 0,
        }
    }

    fn block(
        block_index: u32,
        timestamp: u32,
        transactions: Vec<BlockTransaction<'static>>,
    ) -> Block<'static> {
        let output_sum = transactions
            .iter()
            .flat_map(|tx| tx.outputs.iter())
            .map(|output| output.value)
            .sum();
        Block {
            format_version: 1,
            previous_block_hash: &ZERO_HASH,
            merkle_root: &ZERO_HASH,
            timestamp,
            bits: 0x1d00_ffff,
            nonce: 0,
            transactions,
            computed_block_hash: Hash256([block_index as u8 + 1; 32]),
            block_index,
            file_index: 0,
            file_offset: 8,
            block_length: 285,
            output_sum,
            next_block_hash: None,
            warning: false,
        }
    }

    /// Corre la Pasada 1 con la cadena sintética de dos bloques:
    /// A recibe 50 BTC de coinbase y luego gasta hacia B con cambio.
    fn run_pass_one(workspace: &Path) {
        let mut indexer = LedgerIndexer::create(workspace).expect("FALLO_CREACION");
        indexer
            .add_block(&block(
                0,
                BASE_TIME,
                vec![transaction(
                    &COINBASE_0_HASH,
                    vec![coinbase_input()],
                    vec![classified_output(5_000_000_000, 0xAA)],
                )],
            ))
            .expect("FALLO_BLOQUE_0");
        indexer
            .add_block(&block(
                1,
                BASE_TIME + 600,
                vec![
                    transaction(
                        &COINBASE_1_HASH,
                        vec![coinbase_input()],
                        vec![classified_output(5_000_000_000, 0xCC)],
                    ),
                    transaction(
                        &SPEND_HASH,
                        vec![BlockInput {
                            previous_transaction_hash: &COINBASE_0_HASH,
                            previous_output_index: 0,
                            response_script: &[],
                            sequence_number: 0xFFFF_FFFF,
                        }],
                        vec![
                            classified_output(1_000_000_000, 0xBB),
                            classified_output(4_000_000_000, 0xAA),
                        ],
                    ),
                ],
            ))
            .expect("FALLO_BLOQUE_1");
        indexer.seal().expect("FALLO_SEAL");
    }

    fn run_pass_two(workspace: &Path) {
        let stream = TransactionStreamView::open(&workspace.join(TRANSACTION_FILE_NAME))
            .expect("FALLO_STREAM");
        let key_table = PublicKeyTableView::open(&workspace.join(PUBLIC_KEYS_FILE_NAME))
            .expect("FALLO_TABLA");
        build_address_records(
            &stream,
            &key_table,
            &workspace.join(PUBLIC_KEY_RECORDS_FILE_NAME),
        )
        .expect("FALLO_PASS2");
    }

    #[test]
    fn certificar_colacion_gasto_coinbase_y_cambio() {
        println!("\n🔍 [CAMPOS DE PRUEBA]: Auditando la colación por dirección...");

        let workspace = tempdir().expect("FALLO_TEMPDIR");
        run_pass_one(workspace.path());
        run_pass_two(workspace.path());

        let records =
            PublicKeyRecordsView::open(&workspace.path().join(PUBLIC_KEY_RECORDS_FILE_NAME))
                .expect("FALLO_VISTA");
        assert_eq!(records.address_count(), 3);

        // Dirección A (índice 0): coinbase, gasto y cambio.
        println!("   🧪 Verificando el registro del emisor A...");
        let record_a = records.record(0).expect("FALLO_REGISTRO");
        assert_eq!(record_a.header.entry_count, 3);
        let entries_a: Vec<_> = record_a.entries().collect();
        assert!(entries_a[0].is_coinbase() && !entries_a[0].is_spend());
        assert_eq!(entries_a[0].value, 5_000_000_000);
        assert!(entries_a[1].is_spend());
        assert_eq!(entries_a[1].value, 5_000_000_000);
        assert!(entries_a[2].is_change() && !entries_a[2].is_spend());
        assert_eq!(entries_a[2].value, 4_000_000_000);
        assert_eq!(record_a.balance_at(u32::MAX), 4_000_000_000);
        assert_eq!(record_a.balance_at(BASE_TIME), 5_000_000_000);

        // Dirección C (índice 1): coinbase del bloque 1.
        let record_c = records.record(1).expect("FALLO_REGISTRO");
        assert_eq!(record_c.header.entry_count, 1);
        let entry_c = record_c.entry(0).expect("FALLO_ENTRADA");
        assert!(entry_c.is_coinbase());

        // Dirección B (índice 2): recepción simple de 1000000000 satoshis.
        println!("   🧪 Verificando el registro del receptor B (vector E2)...");
        let record_b = records.record(2).expect("FALLO_REGISTRO");
        assert_eq!(record_b.header.entry_count, 1);
        let entry_b = record_b.entry(0).expect("FALLO_ENTRADA");
        assert_eq!(entry_b.value, 1_000_000_000);
        assert!(!entry_b.is_spend() && !entry_b.is_change() && !entry_b.is_coinbase());
        assert_eq!(record_b.balance_at(u32::MAX), 1_000_000_000);

        println!("\n🏁 [VEREDICTO]: La colación cronológica es bit-perfecta.");
    }

    #[test]
    fn certificar_idempotencia_byte_a_byte() {
        let workspace = tempdir().expect("FALLO_TEMPDIR");
        run_pass_one(workspace.path());

        run_pass_two(workspace.path());
        let first_run =
            std::fs::read(workspace.path().join(PUBLIC_KEY_RECORDS_FILE_NAME)).expect("FALLO_LECTURA");

        run_pass_two(workspace.path());
        let second_run =
            std::fs::read(workspace.path().join(PUBLIC_KEY_RECORDS_FILE_NAME)).expect("FALLO_LECTURA");

        assert_eq!(first_run, second_run, "Re-correr la Pasada 2 debe ser idéntico.");
    }
}
