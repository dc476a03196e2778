/**
 * =================================================================
 * APARATO: LEYES DE IDA Y VUELTA BASE58CHECK (PROVING GROUNDS)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L1-HASH
 * OBJETIVO: Certificar por propiedades que encode/decode son inversas
 *           y que todo bit corrupto rompe la decodificación.
 * =================================================================
 */

#[cfg(test)]
mod tests {
    use chronicler_core_hash::{
        decode_address, encode_address, ripemd160_to_address, ripemd160_to_script_address,
        verify_checksum,
    };
    use proptest::prelude::*;

    proptest! {
        /// Toda dirección derivada sobrevive el viaje ASCII completo.
        #[test]
        fn ida_y_vuelta_para_todo_hash160(key_hash in any::<[u8; 20]>()) {
            let address = ripemd160_to_address(&key_hash);
            let ascii = encode_address(&address);
            let decoded = decode_address(&ascii).expect("FALLO_DECODE");
            prop_assert_eq!(decoded, address);

            let script_address = ripemd160_to_script_address(&key_hash);
            let script_ascii = encode_address(&script_address);
            prop_assert_eq!(decode_address(&script_ascii).expect("FALLO_DECODE"), script_address);
        }

        /// Voltear cualquier bit individual rompe el sello de integridad.
        #[test]
        fn todo_bit_corrupto_rompe_el_sello(
            key_hash in any::<[u8; 20]>(),
            byte_position in 0usize..25,
            bit_position in 0u8..8,
        ) {
            let mut address = ripemd160_to_address(&key_hash);
            address[byte_position] ^= 1 << bit_position;
            prop_assert!(verify_checksum(&address).is_err());
        }
    }
}
