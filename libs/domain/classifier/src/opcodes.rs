// [libs/domain/classifier/src/opcodes.rs]
/*!
 * =================================================================
 * APARATO: SCRIPT OPCODE CATALOG (V2.0 - BITCOIN STANDARD)
 * CLASIFICACIÓN: DOMAIN LAYER (ESTRATO L2)
 * RESPONSABILIDAD: CONSTANTES DE LA MÁQUINA DE SCRIPTS RELEVANTES
 *
 * El clasificador no ejecuta scripts: sólo reconoce las plantillas
 * estándar por coincidencia de bytes. Aquí viven únicamente los
 * opcodes que esas plantillas mencionan.
 * =================================================================
 */

/// Empuja el valor vacío (también conocido como OP_FALSE).
pub const OP_0: u8 = 0x00;
/// Empuja el entero 1.
pub const OP_1: u8 = 0x51;
/// Empuja el entero 2.
pub const OP_2: u8 = 0x52;
/// Empuja el entero 3.
pub const OP_3: u8 = 0x53;
/// Empuja el entero 4.
pub const OP_4: u8 = 0x54;
/// Empuja el entero 5.
pub const OP_5: u8 = 0x55;
/// Marca el output como no gastable y porta datos arbitrarios.
pub const OP_RETURN: u8 = 0x6a;
/// Duplica el elemento superior de la pila.
pub const OP_DUP: u8 = 0x76;
/// Igualdad estricta de los dos elementos superiores.
pub const OP_EQUAL: u8 = 0x87;
/// OP_EQUAL seguido de verificación destructiva.
pub const OP_EQUALVERIFY: u8 = 0x88;
/// HASH160 del elemento superior.
pub const OP_HASH160: u8 = 0xa9;
/// Verificación de firma simple.
pub const OP_CHECKSIG: u8 = 0xac;
/// Verificación de firmas k-de-n.
pub const OP_CHECKMULTISIG: u8 = 0xae;

/// Empuje directo de 32 bytes (llave comprimida truncada).
pub const PUSH_32: u8 = 0x20;
/// Empuje directo de 33 bytes (llave comprimida).
pub const PUSH_33: u8 = 0x21;
/// Empuje directo de 65 bytes (llave sin comprimir).
pub const PUSH_65: u8 = 0x41;
/// Empuje directo de 20 bytes (HASH160).
pub const PUSH_20: u8 = 0x14;
