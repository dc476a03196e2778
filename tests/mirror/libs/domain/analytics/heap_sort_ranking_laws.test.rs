/**
 * =================================================================
 * APARATO: LEYES DEL HEAP SORT DE PUNTEROS (PROVING GROUNDS)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L2-ANALYTICS
 * OBJETIVO: Certificar por propiedades que el ordenamiento in-place
 *           coincide con el orden de referencia para toda entrada.
 * =================================================================
 */

#[cfg(test)]
mod tests {
    use chronicler_domain_analytics::heap_sort_indices;
    use proptest::prelude::*;

    proptest! {
        /// El heap sort produce la misma permutación de claves que el
        /// ordenamiento de referencia de la biblioteca estándar.
        #[test]
        fn coincide_con_el_orden_de_referencia(balances in prop::collection::vec(any::<u64>(), 0..300)) {
            let mut indices: Vec<u32> = (0..balances.len() as u32).collect();
            heap_sort_indices(&mut indices, |left, right| {
                balances[left as usize].cmp(&balances[right as usize])
            });

            let sorted_by_heap: Vec<u64> =
                indices.iter().map(|&index| balances[index as usize]).collect();
            let mut reference = balances.clone();
            reference.sort_unstable();
            prop_assert_eq!(sorted_by_heap, reference);

            // La permutación es completa: cada índice aparece una vez.
            let mut seen = indices.clone();
            seen.sort_unstable();
            let expected: Vec<u32> = (0..balances.len() as u32).collect();
            prop_assert_eq!(seen, expected);
        }

        /// Orden descendente con el comparador invertido.
        #[test]
        fn comparador_invertido_rankea_descendente(balances in prop::collection::vec(any::<i64>(), 1..100)) {
            let mut indices: Vec<u32> = (0..balances.len() as u32).collect();
            heap_sort_indices(&mut indices, |left, right| {
                balances[right as usize].cmp(&balances[left as usize])
            });
            for window in indices.windows(2) {
                prop_assert!(
                    balances[window[0] as usize] >= balances[window[1] as usize],
                    "El ranking debe ser no creciente."
                );
            }
        }
    }
}
