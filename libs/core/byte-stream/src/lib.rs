// [libs/core/byte-stream/src/lib.rs]
/*!
 * =================================================================
 * APARATO: BYTE STREAM CURSOR (V3.0 - SOBERANO)
 * CLASIFICACIÓN: CORE INFRASTRUCTURE (ESTRATO L1)
 * RESPONSABILIDAD: LECTURA LITTLE-ENDIAN VERIFICADA Y VARINTS BITCOIN
 *
 * VISION HIPER-HOLÍSTICA:
 * Sustituye los punteros crudos del parser clásico por un cursor con
 * verificación de límites: toda lectura fuera de rango retorna
 * 'StreamFault' en lugar de invocar comportamiento indefinido. Los
 * scripts se capturan por referencia (slices) con vida ligada a la
 * región de origen, preservando la disciplina Zero-Copy.
 * =================================================================
 */

pub mod reader;

pub use reader::{ByteReader, StreamFault};
