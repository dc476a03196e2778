/**
 * =================================================================
 * APARATO: CERTIFICADOR DE TAXONOMÍA DE SCRIPTS (PROVING GROUNDS)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L2-CLASSIFIER
 * OBJETIVO: Certificar el orden congelado de plantillas y los offsets
 *           de llave que cada forma extrae.
 * =================================================================
 */

#[cfg(test)]
mod tests {
    use chronicler_domain_classifier::{ScriptClassifier, ScriptLocation};
    use chronicler_domain_models::{BlockOutput, KeyType};

    const OP_RETURN: u8 = 0x6a;
    const OP_DUP: u8 = 0x76;
    const OP_EQUAL: u8 = 0x87;
    const OP_EQUALVERIFY: u8 = 0x88;
    const OP_HASH160: u8 = 0xa9;
    const OP_CHECKSIG: u8 = 0xac;

    fn classify(script: &[u8]) -> (BlockOutput<'_>, bool) {
        let classifier = ScriptClassifier::new().expect("FALLO_CONSTRUCCION");
        let location = ScriptLocation {
            block_index: 170,
            transaction_index: 1,
            output_index: 0,
        };
        let mut output = BlockOutput::new(1_000_000_000, script);
        let warning = classifier.classify_output(&mut output, &location);
        (output, warning)
    }

    #[test]
    fn p2pk_de_67_bytes_extrae_la_llave_en_offset_1() {
        let mut script = vec![0x41u8];
        let mut key = vec![0x04u8];
        key.extend_from_slice(&[0x11u8; 64]);
        script.extend_from_slice(&key);
        script.push(OP_CHECKSIG);
        assert_eq!(script.len(), 67);

        let (output, warning) = classify(&script);
        assert_eq!(output.key_type, KeyType::UncompressedP2pk);
        assert_eq!(output.public_keys[0], Some(&script[1..66]));
        assert!(!warning);
        assert!(!output.addresses[0].is_zero());
    }

    #[test]
    fn p2pk_desnudo_de_66_bytes_extrae_desde_offset_0() {
        let mut script = vec![0x04u8];
        script.extend_from_slice(&[0x22u8; 64]);
        script.push(OP_CHECKSIG);
        assert_eq!(script.len(), 66);

        let (output, _) = classify(&script);
        assert_eq!(output.key_type, KeyType::UncompressedP2pk);
        assert_eq!(output.public_keys[0], Some(&script[0..65]));
    }

    #[test]
    fn p2pk_comprimido_de_35_bytes() {
        let mut script = vec![0x21u8, 0x02];
        script.extend_from_slice(&[0x33u8; 32]);
        script.push(OP_CHECKSIG);
        assert_eq!(script.len(), 35);

        let (output, warning) = classify(&script);
        assert_eq!(output.key_type, KeyType::CompressedP2pk);
        assert_eq!(output.public_keys[0], Some(&script[1..34]));
        assert!(!warning);
    }

    #[test]
    fn llave_truncada_de_33_bytes() {
        let mut script = vec![0x20u8];
        script.extend_from_slice(&[0x44u8; 32]);
        assert_eq!(script.len(), 33);

        let (output, _) = classify(&script);
        assert_eq!(output.key_type, KeyType::TruncatedCompressed);
        assert_eq!(output.public_keys[0], Some(&script[1..33]));
        assert!(!output.addresses[0].is_zero());
    }

    #[test]
    fn stealth_de_40_bytes_con_op_return() {
        let mut script = vec![OP_RETURN];
        script.extend_from_slice(&[0x55u8; 39]);
        assert_eq!(script.len(), 40);

        let (output, _) = classify(&script);
        assert_eq!(output.key_type, KeyType::Stealth);
        assert!(output.ascii_address.starts_with("*STEALTH*"));
    }

    #[test]
    fn p2sh_de_23_bytes_produce_prefijo_de_red_5() {
        let mut script = vec![OP_HASH160, 0x14];
        script.extend_from_slice(&[0x66u8; 20]);
        script.push(OP_EQUAL);
        assert_eq!(script.len(), 23);

        let (output, _) = classify(&script);
        assert_eq!(output.key_type, KeyType::P2sh);
        assert_eq!(output.addresses[0].as_bytes()[0], 0x05);
        assert!(output.addresses[0].to_ascii().starts_with('3'));
    }

    #[test]
    fn p2pkh_embebido_es_ultimo_recurso_con_advertencia() {
        // Plantilla P2PKH válida enterrada tras bytes de relleno.
        let mut script = vec![0x99u8, 0x98, 0x97];
        script.extend_from_slice(&[OP_DUP, OP_HASH160, 0x14]);
        script.extend_from_slice(&[0x77u8; 20]);
        script.extend_from_slice(&[OP_EQUALVERIFY, OP_CHECKSIG]);
        assert!(script.len() > 25);

        let (output, warning) = classify(&script);
        assert_eq!(output.key_type, KeyType::P2pkh);
        assert!(warning, "El barrido heurístico debe marcar advertencia.");
    }

    #[test]
    fn el_mismo_script_clasifica_identico_en_toda_llamada() {
        let mut script = vec![OP_DUP, OP_HASH160, 0x14];
        script.extend_from_slice(&[0x88u8; 20]);
        script.extend_from_slice(&[OP_EQUALVERIFY, OP_CHECKSIG]);

        let (first, _) = classify(&script);
        let (second, _) = classify(&script);
        assert_eq!(first.key_type, second.key_type);
        assert_eq!(first.addresses[0], second.addresses[0]);
        assert_eq!(first.ascii_address, second.ascii_address);
    }
}
