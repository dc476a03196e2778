// [libs/infra/ledger/src/utxo.rs]
/*!
 * =================================================================
 * APARATO: LIVE UTXO LEDGER (V4.0 - SOBERANO)
 * CLASIFICACIÓN: INFRA LAYER (ESTRATO L3)
 * RESPONSABILIDAD: RESOLUCIÓN DE VALORES DE INPUT EN LA PASADA 1
 *
 * VISION HIPER-HOLÍSTICA:
 * El protocolo no serializa el valor de un input: sólo la referencia
 * (hash productor, índice de output). Este mapa vive durante toda la
 * pasada 1 registrando cada output emitido y consumiéndolo cuando un
 * input lo gasta, de modo que el valor quede resuelto en el acto.
 *
 * # Mathematical Proof (Conservación):
 * En ausencia de coinbase, la suma de valores consumidos iguala a la
 * suma de valores insertados menos el residuo vivo; el test de
 * conservación del Proving Grounds audita la forma relajada.
 * =================================================================
 */

use std::collections::HashMap;

/// Clave de un output no gastado: (offset productor, índice de output).
///
/// La relación se expresa por offset dentro de TransactionFile.bin,
/// nunca por puntero: sobrevive a la frontera Pass1/Pass2 y a las
/// recargas de mmap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UtxoKey {
    /// Offset de la transacción productora en el flujo plano.
    pub producing_offset: u64,
    /// Índice del output dentro de esa transacción.
    pub output_index: u32,
}

/// Mapa vivo de outputs no gastados durante la pasada 1.
#[derive(Default)]
pub struct UtxoLedger {
    live_entries: HashMap<UtxoKey, u64>,
}

impl UtxoLedger {
    /// Construye un mapa vacío.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra un output recién emitido con su valor en satoshis.
    pub fn insert(&mut self, producing_offset: u64, output_index: u32, value: u64) {
        self.live_entries.insert(
            UtxoKey {
                producing_offset,
                output_index,
            },
            value,
        );
    }

    /// Consume la entrada gastada por un input, retornando su valor.
    /// `None` delata un estado de pasada 1 inconsistente.
    pub fn consume(&mut self, producing_offset: u64, output_index: u32) -> Option<u64> {
        self.live_entries.remove(&UtxoKey {
            producing_offset,
            output_index,
        })
    }

    /// Verdadero si la entrada sigue viva (sin gastar).
    #[must_use]
    pub fn contains(&self, producing_offset: u64, output_index: u32) -> bool {
        self.live_entries.contains_key(&UtxoKey {
            producing_offset,
            output_index,
        })
    }

    /// Cantidad de entradas vivas.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live_entries.len()
    }

    /// Verdadero si no queda ninguna entrada viva.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live_entries.is_empty()
    }

    /// Suma de los valores vivos, para la auditoría de conservación.
    #[must_use]
    pub fn total_live_value(&self) -> u64 {
        self.live_entries.values().sum()
    }
}
