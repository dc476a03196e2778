// [libs/domain/classifier/src/classify.rs]
/*!
 * =================================================================
 * APARATO: OUTPUT ADDRESS CLASSIFIER (V6.0 - SOBERANO)
 * CLASIFICACIÓN: DOMAIN ENGINE (ESTRATO L2)
 * RESPONSABILIDAD: TAXONOMÍA DETERMINISTA DE SCRIPTS DE DESAFÍO
 *
 * VISION HIPER-HOLÍSTICA:
 * 1. ORDEN FIJO: Los patrones se prueban en un orden congelado; el
 *    primero que coincide gana. La misma secuencia de bytes produce
 *    siempre la misma forma de llave y los mismos offsets.
 * 2. ÚLTIMO RECURSO: El barrido de P2PKH embebido es heurístico y se
 *    ejecuta únicamente cuando toda plantilla estándar falló.
 * 3. SUSTITUCIÓN CONTROLADA: Un script indescifrable nunca detiene la
 *    corrida; se interna la dirección ficticia y se marca advertencia.
 * =================================================================
 */

use crate::opcodes::*;
use chronicler_core_hash::{
    compressed_public_key_to_address, dummy_key_address, hashing::ripemd160,
    ripemd160_to_address, ripemd160_to_script_address, truncated_compressed_key_to_address,
    uncompressed_public_key_to_address, zero_length_address, AddressFault,
};
use chronicler_domain_models::{Address, BlockOutput, KeyType, MAX_MULTISIG_KEYS};
use tracing::{debug, warn};

/// Coordenadas del output bajo análisis, para el contexto de las trazas.
#[derive(Clone, Copy, Debug)]
pub struct ScriptLocation {
    /// Índice del bloque canónico.
    pub block_index: u32,
    /// Índice de la transacción dentro del bloque.
    pub transaction_index: u32,
    /// Índice del output dentro de la transacción.
    pub output_index: u32,
}

/// Motor de clasificación de scripts de desafío.
///
/// Mantiene las dos direcciones sustitutas decodificadas una sola vez
/// en la construcción, de modo que el Hot-Loop no re-decodifique ASCII.
pub struct ScriptClassifier {
    dummy_key_address: Address,
    zero_length_address: Address,
}

impl ScriptClassifier {
    /// Construye el clasificador decodificando las direcciones sustitutas.
    ///
    /// # Errors:
    /// Propaga `AddressFault` si las constantes sustitutas fueran
    /// ilegibles, condición que la matriz de certificación vigila.
    pub fn new() -> Result<Self, AddressFault> {
        Ok(Self {
            dummy_key_address: Address(dummy_key_address()?),
            zero_length_address: Address(zero_length_address()?),
        })
    }

    /**
     * Clasifica un output y deriva sus direcciones de 25 bytes.
     *
     * Retorna `true` si el análisis emitió alguna advertencia (script
     * indescifrable, plantilla inusual o llave con prefijo corrupto).
     */
    pub fn classify_output<'a>(
        &self,
        output: &mut BlockOutput<'a>,
        location: &ScriptLocation,
    ) -> bool {
        let mut warning_flagged = false;

        if output.challenge_script.is_empty() {
            debug!(
                "Block {} : has a zero byte length output script",
                location.block_index
            );
            output.key_type = KeyType::ZeroLength;
            output.addresses[0] = self.zero_length_address;
            self.compose_ascii_address(output);
            return true;
        }

        warning_flagged |= self.match_pattern_table(output, location);

        if output.public_keys[0].is_none() && output.key_type == KeyType::Unknown {
            warning_flagged |= self.scan_for_embedded_p2pkh(output, location);
        }

        if output.public_keys[0].is_none() && output.key_type == KeyType::Unknown {
            debug!(
                "FAILED TO LOCATE PUBLIC KEY :: length={} script={}",
                output.challenge_script.len(),
                hex::encode(output.challenge_script)
            );
            warn!(
                "WARNING: Failed to decode public key in output script. Block {} : Transaction: {} : OutputIndex: {} scriptLength: {}",
                location.block_index,
                location.transaction_index,
                location.output_index,
                output.challenge_script.len()
            );
            output.addresses[0] = self.dummy_key_address;
            self.compose_ascii_address(output);
            return true;
        }

        warning_flagged |= self.derive_addresses(output, location);
        self.compose_ascii_address(output);
        warning_flagged
    }

    /// Tabla de plantillas estándar, en el orden congelado.
    fn match_pattern_table<'a>(
        &self,
        output: &mut BlockOutput<'a>,
        location: &ScriptLocation,
    ) -> bool {
        let script = output.challenge_script;
        let script_length = script.len();
        let last_instruction = script[script_length - 1];

        if script_length == 67 && script[0] == PUSH_65 && script[66] == OP_CHECKSIG {
            output.public_keys[0] = Some(&script[1..66]);
            output.key_type = KeyType::UncompressedP2pk;
        } else if script_length == 40 && script[0] == OP_RETURN {
            output.public_keys[0] = Some(&script[1..40]);
            output.key_type = KeyType::Stealth;
        } else if script_length == 66 && script[65] == OP_CHECKSIG {
            output.public_keys[0] = Some(&script[0..65]);
            output.key_type = KeyType::UncompressedP2pk;
        } else if script_length == 35 && script[34] == OP_CHECKSIG {
            output.public_keys[0] = Some(&script[1..34]);
            output.key_type = KeyType::CompressedP2pk;
        } else if script_length == 33 && script[0] == PUSH_32 {
            output.public_keys[0] = Some(&script[1..33]);
            output.key_type = KeyType::TruncatedCompressed;
        } else if script_length == 23
            && script[0] == OP_HASH160
            && script[1] == PUSH_20
            && script[22] == OP_EQUAL
        {
            output.public_keys[0] = Some(&script[2..22]);
            output.key_type = KeyType::P2sh;
        } else if script_length >= 25
            && script[0] == OP_DUP
            && script[1] == OP_HASH160
            && script[2] == PUSH_20
        {
            output.public_keys[0] = Some(&script[3..23]);
            output.key_type = KeyType::P2pkh;
        } else if script_length == 5
            && script[0] == OP_DUP
            && script[1] == OP_HASH160
            && script[2] == OP_0
            && script[3] == OP_EQUALVERIFY
            && script[4] == OP_CHECKSIG
        {
            warn!(
                "WARNING: Unusual but expected output script. Block {} : Transaction: {} : OutputIndex: {}",
                location.block_index, location.transaction_index, location.output_index
            );
            return true;
        } else if last_instruction == OP_CHECKMULTISIG && script_length > 25 {
            return self.walk_multisig_pushes(output, location);
        }

        false
    }

    /// Camina los empujes internos de un candidato MultiSig (hasta 5 llaves).
    fn walk_multisig_pushes<'a>(
        &self,
        output: &mut BlockOutput<'a>,
        location: &ScriptLocation,
    ) -> bool {
        let script = output.challenge_script;
        let script_length = script.len();

        let expected_prefix = matches!(script[0], OP_0 | OP_1..=OP_5);
        let expected_postfix = matches!(script[script_length - 2], OP_1..=OP_5);

        if expected_prefix && expected_postfix {
            let scan_end = script_length - 2;
            let mut cursor = 1usize;
            let mut key_index = 0usize;
            while key_index < MAX_MULTISIG_KEYS && cursor < scan_end {
                let push_width = match script[cursor] {
                    PUSH_33 => 33usize,
                    PUSH_65 => 65usize,
                    _ => break,
                };
                if cursor + 1 + push_width > script_length {
                    break;
                }
                output.key_type = KeyType::MultiSig;
                output.public_keys[key_index] = Some(&script[cursor + 1..cursor + 1 + push_width]);
                if push_width == 33 {
                    output.multisig_compressed_mask |= 1 << key_index;
                }
                cursor += 1 + push_width;
                key_index += 1;
            }
            output.signature_count = key_index as u32;
        }

        if output.public_keys[0].is_none() {
            warn!(
                "****MULTI_SIG WARNING: Unable to decipher multi-sig output. Block {} : Transaction: {} : OutputIndex: {}",
                location.block_index, location.transaction_index, location.output_index
            );
            return true;
        }
        false
    }

    /// Barrido heurístico de último recurso: plantilla P2PKH embebida.
    fn scan_for_embedded_p2pkh<'a>(
        &self,
        output: &mut BlockOutput<'a>,
        location: &ScriptLocation,
    ) -> bool {
        let script = output.challenge_script;
        if script.len() <= 25 {
            return false;
        }
        let end_index = script.len() - 25;
        for scan_offset in 0..end_index {
            let window = &script[scan_offset..];
            if window[0] == OP_DUP
                && window[1] == OP_HASH160
                && window[2] == PUSH_20
                && window[23] == OP_EQUALVERIFY
                && window[24] == OP_CHECKSIG
            {
                output.public_keys[0] = Some(&window[3..23]);
                output.key_type = KeyType::P2pkh;
                warn!(
                    "WARNING: Unusual output script. Block {} : Transaction: {} : OutputIndex: {}",
                    location.block_index, location.transaction_index, location.output_index
                );
                return true;
            }
        }
        false
    }

    /// Deriva las direcciones de 25 bytes según la forma detectada.
    fn derive_addresses<'a>(
        &self,
        output: &mut BlockOutput<'a>,
        location: &ScriptLocation,
    ) -> bool {
        let mut warning_flagged = false;

        match output.key_type {
            KeyType::P2pkh | KeyType::Stealth => {
                if let Some(hash_slice) = slot_hash20(output.public_keys[0]) {
                    output.addresses[0] = Address(ripemd160_to_address(&hash_slice));
                }
            }
            KeyType::P2sh => {
                if let Some(hash_slice) = slot_hash20(output.public_keys[0]) {
                    output.addresses[0] = Address(ripemd160_to_script_address(&hash_slice));
                }
            }
            KeyType::UncompressedP2pk => {
                warning_flagged |= self.derive_slot(output, 0, false, location);
            }
            KeyType::CompressedP2pk => {
                warning_flagged |= self.derive_slot(output, 0, true, location);
            }
            KeyType::TruncatedCompressed => {
                if let Some(key_slice) = output.public_keys[0] {
                    if let Ok(x_coordinate) = <&[u8; 32]>::try_from(key_slice) {
                        output.addresses[0] =
                            Address(truncated_compressed_key_to_address(x_coordinate));
                    }
                }
            }
            KeyType::MultiSig => {
                for slot_index in 0..MAX_MULTISIG_KEYS {
                    if output.public_keys[slot_index].is_none() {
                        break;
                    }
                    let compressed = output.multisig_compressed_mask & (1 << slot_index) != 0;
                    warning_flagged |= self.derive_slot(output, slot_index, compressed, location);
                }
                output.multisig_address = synthesize_multisig_address(&output.addresses);
            }
            KeyType::Unknown | KeyType::ZeroLength => {}
        }

        warning_flagged
    }

    /// Deriva una ranura individual desde su llave ECDSA.
    fn derive_slot<'a>(
        &self,
        output: &mut BlockOutput<'a>,
        slot_index: usize,
        compressed: bool,
        location: &ScriptLocation,
    ) -> bool {
        let derivation: Result<[u8; 25], AddressFault> = match output.public_keys[slot_index] {
            Some(key_slice) if compressed => <&[u8; 33]>::try_from(key_slice)
                .map_err(|_| AddressFault::InvalidLength(key_slice.len()))
                .and_then(compressed_public_key_to_address),
            Some(key_slice) => <&[u8; 65]>::try_from(key_slice)
                .map_err(|_| AddressFault::InvalidLength(key_slice.len()))
                .and_then(uncompressed_public_key_to_address),
            None => return false,
        };

        match derivation {
            Ok(address_bytes) => {
                output.addresses[slot_index] = Address(address_bytes);
                false
            }
            Err(derivation_fault) => {
                warn!(
                    "WARNING: Corrupt public key in output. Block {} : Transaction: {} : OutputIndex: {} : {}",
                    location.block_index,
                    location.transaction_index,
                    location.output_index,
                    derivation_fault
                );
                output.addresses[slot_index] = self.dummy_key_address;
                true
            }
        }
    }

    /// Concatenación ASCII de presentación (marcador + direcciones).
    fn compose_ascii_address(&self, output: &mut BlockOutput<'_>) {
        let mut ascii_address = match output.key_type {
            KeyType::MultiSig => format!("MultiSig[{}]", output.signature_count),
            KeyType::Stealth => "*STEALTH*".to_string(),
            KeyType::P2sh => "*SCRIPT_HASH*".to_string(),
            _ => String::new(),
        };

        for (slot_index, slot_address) in output.addresses.iter().enumerate() {
            if slot_address.is_zero() {
                break;
            }
            if slot_index > 0 {
                ascii_address.push(':');
            }
            ascii_address.push_str(&slot_address.to_ascii());
        }

        output.ascii_address = ascii_address;
    }
}

/// Sintetiza la dirección compuesta de un output MultiSig.
///
/// RIPEMD-160 de la concatenación de las cinco ranuras de 25 bytes
/// (incluidas las vacantes en cero), envuelto como dirección de red 0.
#[must_use]
pub fn synthesize_multisig_address(addresses: &[Address; MAX_MULTISIG_KEYS]) -> Address {
    let mut concatenation = [0u8; 25 * MAX_MULTISIG_KEYS];
    for (slot_index, slot_address) in addresses.iter().enumerate() {
        concatenation[slot_index * 25..(slot_index + 1) * 25]
            .copy_from_slice(slot_address.as_bytes());
    }
    Address(ripemd160_to_address(&ripemd160(&concatenation)))
}

/// Extrae los primeros 20 bytes de una ranura como HASH160.
fn slot_hash20(slot: Option<&[u8]>) -> Option<[u8; 20]> {
    let key_slice = slot?;
    if key_slice.len() < 20 {
        return None;
    }
    let mut hash_bytes = [0u8; 20];
    hash_bytes.copy_from_slice(&key_slice[0..20]);
    Some(hash_bytes)
}
