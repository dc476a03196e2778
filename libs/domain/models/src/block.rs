// [libs/domain/models/src/block.rs]
/*!
 * =================================================================
 * APARATO: PARSED BLOCK MODELS (V4.0 - SOBERANO)
 * CLASIFICACIÓN: DOMAIN LAYER (ESTRATO L2)
 * RESPONSABILIDAD: REPRESENTACIÓN EFÍMERA DE BLOQUES Y TRANSACCIONES
 *
 * VISION HIPER-HOLÍSTICA:
 * Los campos "puntero" del modelo (hashes previos, scripts) son
 * referencias prestadas cuyo alcance es una única operación de parseo
 * de bloque: la vida `'a` los liga al buffer crudo del archivo blk.
 * Nada de este estrato sobrevive al bloque que lo originó; lo que
 * debe persistir viaja al módulo 'persisted'.
 * =================================================================
 */

use crate::address::Address;
use crate::hash256::Hash256;
use crate::key_type::KeyType;

/// Número máximo de ranuras de llave en un output MultiSig.
pub const MAX_MULTISIG_KEYS: usize = 5;

/// Una entrada (input) de transacción tal como viaja en el protocolo.
#[derive(Debug)]
pub struct BlockInput<'a> {
    /// Hash de la transacción productora, prestado del buffer del bloque.
    pub previous_transaction_hash: &'a [u8; 32],
    /// Índice del output gastado; 0xFFFFFFFF identifica al coinbase.
    pub previous_output_index: u32,
    /// Script de respuesta, prestado del buffer del bloque.
    pub response_script: &'a [u8],
    /// Número de secuencia del protocolo.
    pub sequence_number: u32,
}

impl BlockInput<'_> {
    /// Centinela de coinbase en el índice de output previo.
    pub const COINBASE_SENTINEL: u32 = 0xFFFF_FFFF;

    /// Verdadero si este input es la entrada del coinbase.
    #[must_use]
    pub fn is_coinbase(&self) -> bool {
        self.previous_output_index == Self::COINBASE_SENTINEL
    }
}

/// Una salida (output) ya clasificada por el motor de scripts.
#[derive(Debug)]
pub struct BlockOutput<'a> {
    /// Valor del output en satoshis.
    pub value: u64,
    /// Script de desafío, prestado del buffer del bloque.
    pub challenge_script: &'a [u8],
    /// Forma de llave detectada por el clasificador.
    pub key_type: KeyType,
    /// Ranuras de llave pública extraídas del script (hasta 5).
    pub public_keys: [Option<&'a [u8]>; MAX_MULTISIG_KEYS],
    /// Direcciones de 25 bytes derivadas de cada ranura.
    pub addresses: [Address; MAX_MULTISIG_KEYS],
    /// Cantidad de firmas requeridas (1 salvo MultiSig).
    pub signature_count: u32,
    /// Máscara de bits: la ranura i contiene una llave comprimida.
    pub multisig_compressed_mask: u32,
    /// Dirección compuesta sintetizada para outputs MultiSig.
    pub multisig_address: Address,
    /// Concatenación ASCII de las direcciones para presentación.
    pub ascii_address: String,
}

impl<'a> BlockOutput<'a> {
    /// Output recién parseado, aún sin clasificar.
    #[must_use]
    pub fn new(value: u64, challenge_script: &'a [u8]) -> Self {
        Self {
            value,
            challenge_script,
            key_type: KeyType::Unknown,
            public_keys: [None; MAX_MULTISIG_KEYS],
            addresses: [Address::ZERO; MAX_MULTISIG_KEYS],
            signature_count: 1,
            multisig_compressed_mask: 0,
            multisig_address: Address::ZERO,
            ascii_address: String::new(),
        }
    }

    /// Dirección primaria del output (ranura 0).
    #[must_use]
    pub fn primary_address(&self) -> &Address {
        &self.addresses[0]
    }
}

/// Una transacción parseada, con su identidad content-addressed.
#[derive(Debug)]
pub struct BlockTransaction<'a> {
    /// Doble SHA-256 de la serialización cruda completa.
    pub transaction_hash: Hash256,
    /// Versión declarada (1 o 2 en la cadena histórica).
    pub version: u32,
    /// Entradas de la transacción.
    pub inputs: Vec<BlockInput<'a>>,
    /// Salidas clasificadas de la transacción.
    pub outputs: Vec<BlockOutput<'a>>,
    /// Lock-time del protocolo.
    pub lock_time: u32,
    /// Longitud de la serialización cruda en bytes.
    pub serialized_length: u32,
    /// Índice del archivo blk que contiene la transacción.
    pub file_index: u32,
    /// Offset absoluto de la transacción dentro de ese archivo.
    pub file_offset: u64,
}

impl BlockTransaction<'_> {
    /// Verdadero si alguna entrada porta el centinela de coinbase.
    #[must_use]
    pub fn has_coinbase_input(&self) -> bool {
        self.inputs.iter().any(BlockInput::is_coinbase)
    }
}

/// Un bloque parseado completo, efímero por diseño.
#[derive(Debug)]
pub struct Block<'a> {
    /// Versión del formato de bloque.
    pub format_version: u32,
    /// Hash del bloque anterior, prestado del buffer.
    pub previous_block_hash: &'a [u8; 32],
    /// Raíz de Merkle, prestada del buffer (no se valida; ver contrato).
    pub merkle_root: &'a [u8; 32],
    /// Marca de tiempo Unix del bloque.
    pub timestamp: u32,
    /// Campo 'bits' (objetivo de dificultad compacto).
    pub bits: u32,
    /// Nonce de minado.
    pub nonce: u32,
    /// Transacciones del bloque en orden de aparición.
    pub transactions: Vec<BlockTransaction<'a>>,
    /// Doble SHA-256 de la cabecera de 80 bytes.
    pub computed_block_hash: Hash256,
    /// Posición del bloque en la cadena canónica (génesis = 0).
    pub block_index: u32,
    /// Índice del archivo blk de origen.
    pub file_index: u32,
    /// Offset del cuerpo del bloque dentro del archivo.
    pub file_offset: u64,
    /// Longitud declarada del bloque en bytes.
    pub block_length: u32,
    /// Suma de todos los valores de output del bloque.
    ///
    /// El analizador clásico la llamaba "blockReward"; el nombre aquí
    /// refleja lo que realmente acumula.
    pub output_sum: u64,
    /// Hash del bloque siguiente en la cadena, si se conoce.
    pub next_block_hash: Option<Hash256>,
    /// Se emitió al menos una advertencia al procesar este bloque.
    pub warning: bool,
}

impl Block<'_> {
    /// Total de entradas en todas las transacciones.
    #[must_use]
    pub fn total_input_count(&self) -> usize {
        self.transactions.iter().map(|tx| tx.inputs.len()).sum()
    }

    /// Total de salidas en todas las transacciones.
    #[must_use]
    pub fn total_output_count(&self) -> usize {
        self.transactions.iter().map(|tx| tx.outputs.len()).sum()
    }
}
