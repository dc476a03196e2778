/**
 * =================================================================
 * APARATO: PARIDAD BINARIA DE REGISTROS PERSISTIDOS (PROVING GROUNDS)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L2-MODELS
 * OBJETIVO: Certificar que la codificación congelada del ledger es
 *           exactamente invertible y de tamaño contado.
 * =================================================================
 */

#[cfg(test)]
mod tests {
    use chronicler_core_bytes::ByteReader;
    use chronicler_domain_models::{
        AddressRecordHeader, AddressTxEntry, Hash256, KeyType, PersistedInput, PersistedOutput,
        PersistedTransaction, ADDRESS_RECORD_HEADER_SIZE, ADDRESS_TX_ENTRY_SIZE,
        PERSISTED_INPUT_SIZE, PERSISTED_OUTPUT_SIZE,
    };

    fn synthetic_transaction(tag: u8, input_count: usize, output_count: usize) -> PersistedTransaction {
        PersistedTransaction {
            transaction_hash: Hash256([tag; 32]),
            block_number: u32::from(tag),
            version: 1,
            timestamp: 1_231_006_505 + u32::from(tag),
            lock_time: 0,
            serialized_length: 204,
            inputs: (0..input_count)
                .map(|input_index| PersistedInput {
                    producing_offset: 20 + input_index as u64 * 100,
                    output_index: input_index as u32,
                    value: 5_000_000_000,
                    script_length: 72,
                    producing_timestamp: 1_231_006_505,
                })
                .collect(),
            outputs: (0..output_count)
                .map(|output_index| PersistedOutput {
                    value: 1_000_000_000 * (output_index as u64 + 1),
                    address_index: output_index as u32,
                    key_type: KeyType::P2pkh,
                    script_length: 25,
                })
                .collect(),
        }
    }

    #[test]
    fn certificar_paridad_de_flujo_multi_registro() {
        println!("\n🔍 [CAMPOS DE PRUEBA]: Auditando la paridad del flujo plano...");

        let records = [
            synthetic_transaction(1, 0, 1),
            synthetic_transaction(2, 1, 2),
            synthetic_transaction(3, 3, 5),
        ];

        // 1. CRISTALIZACIÓN CONTIGUA
        let mut encoded_stream = Vec::new();
        for record in &records {
            let before = encoded_stream.len();
            record.write_to(&mut encoded_stream).expect("FALLO_ESCRITURA");
            assert_eq!(
                encoded_stream.len() - before,
                record.encoded_size(),
                "encoded_size no coincide con los bytes reales."
            );
        }

        // 2. RELECTURA SECUENCIAL
        let mut reader = ByteReader::new(&encoded_stream);
        for record in &records {
            let decoded = PersistedTransaction::read_from(&mut reader).expect("FALLO_LECTURA");
            assert_eq!(&decoded, record, "El registro no sobrevivió el viaje.");
        }
        assert_eq!(reader.remaining(), 0, "Bytes residuales en el flujo.");

        println!("🏁 [VEREDICTO]: El formato congelado es exactamente invertible.");
    }

    #[test]
    fn certificar_anchos_congelados() {
        // Los anchos viajan a disco: cualquier deriva rompe corridas previas.
        assert_eq!(PERSISTED_INPUT_SIZE, 28);
        assert_eq!(PERSISTED_OUTPUT_SIZE, 20);
        assert_eq!(ADDRESS_RECORD_HEADER_SIZE, 32);
        assert_eq!(ADDRESS_TX_ENTRY_SIZE, 32);

        let mut header_bytes = Vec::new();
        AddressRecordHeader::default()
            .write_to(&mut header_bytes)
            .expect("FALLO_ESCRITURA");
        assert_eq!(header_bytes.len(), ADDRESS_RECORD_HEADER_SIZE);

        let mut entry_bytes = Vec::new();
        AddressTxEntry::default()
            .write_to(&mut entry_bytes)
            .expect("FALLO_ESCRITURA");
        assert_eq!(entry_bytes.len(), ADDRESS_TX_ENTRY_SIZE);
    }

    #[test]
    fn certificar_flags_de_entrada() {
        let entry = AddressTxEntry {
            transaction_offset: 0,
            value: 777,
            timestamp: 0,
            flags: AddressTxEntry::FLAG_SPEND | AddressTxEntry::FLAG_COINBASE,
            reserved_balance: 0,
        };
        assert!(entry.is_spend());
        assert!(entry.is_coinbase());
        assert!(!entry.is_change());
        assert_eq!(entry.signed_value(), -777);
    }
}
