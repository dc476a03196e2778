// [libs/domain/analytics/src/heap.rs]
/*!
 * =================================================================
 * APARATO: POINTER HEAP SORT (V3.0 - SOBERANO)
 * CLASIFICACIÓN: DOMAIN LAYER (ESTRATO L2)
 * RESPONSABILIDAD: ORDENAMIENTO IN-PLACE DEL ARREGLO DE PUNTEROS
 *
 * VISION HIPER-HOLÍSTICA:
 * El ranking por balance ordena millones de índices sin memoria
 * auxiliar: heapify inicial y extracción con shift-right, el mismo
 * algoritmo del ordenador de punteros clásico expresado sobre un
 * slice de índices con comparador inyectado.
 *
 * # Mathematical Proof (Heap Property):
 * Tras heapify, todo nodo domina a sus hijos bajo el comparador; cada
 * extracción restaura la propiedad en O(log n), totalizando
 * O(n log n) comparaciones.
 * =================================================================
 */

use std::cmp::Ordering;

/**
 * Ordena el slice de índices in-place en orden ascendente según el
 * comparador. Para un ranking descendente se invierte el comparador.
 */
pub fn heap_sort_indices<F>(indices: &mut [u32], compare: F)
where
    F: Fn(u32, u32) -> Ordering,
{
    if indices.len() < 2 {
        return;
    }

    heapify(indices, &compare);

    let mut high = indices.len() - 1;
    while high > 0 {
        indices.swap(0, high);
        high -= 1;
        shift_right(indices, 0, high, &compare);
    }
}

/// Construye el heap máximo desde el elemento medio hacia la raíz.
fn heapify<F>(indices: &mut [u32], compare: &F)
where
    F: Fn(u32, u32) -> Ordering,
{
    let high = indices.len() - 1;
    let mut mid_index = (high as isize - 1) / 2;
    while mid_index >= 0 {
        shift_right(indices, mid_index as usize, high, compare);
        mid_index -= 1;
    }
}

/// Hunde la raíz hasta restaurar la propiedad de heap en [low..=high].
fn shift_right<F>(indices: &mut [u32], low: usize, high: usize, compare: &F)
where
    F: Fn(u32, u32) -> Ordering,
{
    let mut root = low;
    while root * 2 + 1 <= high {
        let left_child = root * 2 + 1;
        let right_child = left_child + 1;
        let mut swap_candidate = root;

        if compare(indices[swap_candidate], indices[left_child]) == Ordering::Less {
            swap_candidate = left_child;
        }
        if right_child <= high
            && compare(indices[swap_candidate], indices[right_child]) == Ordering::Less
        {
            swap_candidate = right_child;
        }

        if swap_candidate == root {
            break;
        }
        indices.swap(root, swap_candidate);
        root = swap_candidate;
    }
}
