/**
 * =================================================================
 * APARATO: CERTIFICADOR DE DIRECCIÓN COMPUESTA MULTISIG (PROVING GROUNDS)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L2-CLASSIFIER
 * OBJETIVO: Certificar un output 2-de-3 con llaves sin comprimir:
 *           tres ranuras llenas, dos en cero y la dirección compuesta
 *           RIPEMD160 sobre la concatenación de 125 bytes.
 * =================================================================
 */

#[cfg(test)]
mod tests {
    use chronicler_core_hash::{hashing::ripemd160, ripemd160_to_address};
    use chronicler_domain_classifier::{ScriptClassifier, ScriptLocation};
    use chronicler_domain_models::{Address, BlockOutput, KeyType, MAX_MULTISIG_KEYS};

    const OP_2: u8 = 0x52;
    const OP_3: u8 = 0x53;
    const OP_CHECKMULTISIG: u8 = 0xae;

    fn synthetic_uncompressed_key(tag: u8) -> Vec<u8> {
        let mut key = vec![0x04u8];
        key.extend_from_slice(&[tag; 64]);
        key
    }

    #[test]
    fn certificar_dos_de_tres_sin_comprimir() {
        println!("\n🔍 [CAMPOS DE PRUEBA]: Auditando el output MultiSig 2-de-3...");

        // 1. FORJA DEL SCRIPT: OP_2 [65]k1 [65]k2 [65]k3 OP_3 OP_CHECKMULTISIG
        let mut script = vec![OP_2];
        for key_tag in [0xA1u8, 0xB2, 0xC3] {
            script.push(0x41);
            script.extend_from_slice(&synthetic_uncompressed_key(key_tag));
        }
        script.push(OP_3);
        script.push(OP_CHECKMULTISIG);

        // 2. CLASIFICACIÓN
        let classifier = ScriptClassifier::new().expect("FALLO_CONSTRUCCION");
        let location = ScriptLocation {
            block_index: 0,
            transaction_index: 0,
            output_index: 0,
        };
        let mut output = BlockOutput::new(100_000_000, &script);
        let warning = classifier.classify_output(&mut output, &location);

        assert_eq!(output.key_type, KeyType::MultiSig);
        assert!(!warning, "Un MultiSig bien formado no advierte.");
        assert_eq!(output.signature_count, 3);
        assert_eq!(output.multisig_compressed_mask, 0, "Ninguna llave comprimida.");

        // 3. TRES RANURAS LLENAS, DOS VACANTES
        println!("   🧪 Verificando las cinco ranuras...");
        for slot_index in 0..3 {
            assert!(output.public_keys[slot_index].is_some());
            assert!(!output.addresses[slot_index].is_zero());
        }
        for slot_index in 3..MAX_MULTISIG_KEYS {
            assert!(output.public_keys[slot_index].is_none());
            assert!(output.addresses[slot_index].is_zero());
        }

        // 4. DIRECCIÓN COMPUESTA MANUAL: RIPEMD160(addr1‖addr2‖addr3‖0₍₂₅₎‖0₍₂₅₎)
        println!("   🧪 Recalculando la dirección compuesta a mano...");
        let mut concatenation = [0u8; 25 * MAX_MULTISIG_KEYS];
        for slot_index in 0..3 {
            concatenation[slot_index * 25..(slot_index + 1) * 25]
                .copy_from_slice(output.addresses[slot_index].as_bytes());
        }
        let expected_composite = Address(ripemd160_to_address(&ripemd160(&concatenation)));
        assert_eq!(
            output.multisig_address, expected_composite,
            "La dirección compuesta no coincide con el cálculo manual."
        );
        assert_eq!(output.multisig_address.as_bytes()[0], 0x00);

        // 5. PRESENTACIÓN ASCII
        assert!(output.ascii_address.starts_with("MultiSig[3]"));
        assert_eq!(output.ascii_address.matches(':').count(), 2);

        println!("\n🏁 [VEREDICTO]: La síntesis MultiSig es bit-perfecta.");
    }

    #[test]
    fn mezcla_de_llaves_marca_el_bitmask_comprimido() {
        // OP_2 [33]k1 [65]k2 OP_2 OP_CHECKMULTISIG
        let mut script = vec![OP_2];
        script.push(0x21);
        script.push(0x02);
        script.extend_from_slice(&[0xD4u8; 32]);
        script.push(0x41);
        script.extend_from_slice(&synthetic_uncompressed_key(0xE5));
        script.push(OP_2);
        script.push(OP_CHECKMULTISIG);

        let classifier = ScriptClassifier::new().expect("FALLO_CONSTRUCCION");
        let location = ScriptLocation {
            block_index: 0,
            transaction_index: 0,
            output_index: 0,
        };
        let mut output = BlockOutput::new(1, &script);
        classifier.classify_output(&mut output, &location);

        assert_eq!(output.key_type, KeyType::MultiSig);
        assert_eq!(output.signature_count, 2);
        assert_eq!(output.multisig_compressed_mask, 0b01, "Sólo la ranura 0 es comprimida.");
    }
}
