/**
 * =================================================================
 * APARATO: CERTIFICADOR DE DERIVACIÓN DE DIRECCIONES (PROVING GROUNDS)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L1-HASH
 * OBJETIVO: Certificar la cadena SHA256 -> RIPEMD160 -> Base58Check
 *           contra el vector público del bloque génesis.
 * =================================================================
 */

#[cfg(test)]
mod tests {
    use chronicler_core_hash::{
        compressed_public_key_to_address, decode_address, encode_address, hash160, sha256d,
        uncompressed_public_key_to_address,
    };

    /// Llave pública ECDSA sin comprimir del output del bloque génesis.
    const GENESIS_PUBLIC_KEY_HEX: &str = "04678afdb0fe5548271967f1a67130b7105cd6a828e03909a67962e0ea1f61deb649f6bc3f4cef38c4f35504e51ec112de5c384df7ba0b8d578a4c702b6bf11d5f";
    /// Dirección pública históricamente asociada a esa llave.
    const GENESIS_ADDRESS_ASCII: &str = "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa";

    #[test]
    fn certificar_vector_genesis_bit_perfecto() {
        println!("\n🔍 [CAMPOS DE PRUEBA]: Iniciando Auditoría de Derivación Génesis...");

        // 1. RECONSTRUCCIÓN DE LA LLAVE
        let key_bytes = hex::decode(GENESIS_PUBLIC_KEY_HEX).expect("FALLO_HEX");
        let public_key: [u8; 65] = key_bytes.as_slice().try_into().expect("FALLO_ANCHO");

        // 2. DERIVACIÓN COMPLETA
        println!("   🧪 Derivando dirección desde la llave de 65 bytes...");
        let address = uncompressed_public_key_to_address(&public_key).expect("FALLO_DERIVACION");
        assert_eq!(
            encode_address(&address),
            GENESIS_ADDRESS_ASCII,
            "La dirección génesis no coincide con el vector público."
        );
        println!("   ✅ Dirección certificada: {}", GENESIS_ADDRESS_ASCII);

        // 3. IDA Y VUELTA BASE58CHECK
        println!("   🧪 Verificando la ley de ida y vuelta Base58Check...");
        let decoded = decode_address(GENESIS_ADDRESS_ASCII).expect("FALLO_DECODE");
        assert_eq!(decoded, address, "La decodificación no es la inversa exacta.");

        // 4. COHERENCIA INTERNA DEL HASH160
        let expected_hash = hash160(&public_key);
        assert_eq!(&address[1..21], &expected_hash, "El cuerpo no es HASH160(llave).");
        let checksum = sha256d(&address[0..21]);
        assert_eq!(&address[21..25], &checksum[0..4], "El sello no es SHA256d.");

        println!("\n🏁 [VEREDICTO]: La cadena de derivación es bit-perfecta.");
    }

    #[test]
    fn certificar_rechazo_de_prefijos_corruptos() {
        let mut corrupt_uncompressed = [0u8; 65];
        corrupt_uncompressed[0] = 0x02; // prefijo de llave comprimida
        assert!(uncompressed_public_key_to_address(&corrupt_uncompressed).is_err());

        let mut corrupt_compressed = [0u8; 33];
        corrupt_compressed[0] = 0x04; // prefijo de llave sin comprimir
        assert!(compressed_public_key_to_address(&corrupt_compressed).is_err());
    }
}
