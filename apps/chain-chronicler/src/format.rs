// [apps/chain-chronicler/src/format.rs]
/*!
 * =================================================================
 * APARATO: NUMBER FORMATTER (V2.0 - SOBERANO)
 * CLASIFICACIÓN: APPLICATION LAYER (ESTRATO L6)
 * RESPONSABILIDAD: PRESENTACIÓN DE ENTEROS CON SEPARADOR DE MILES
 * =================================================================
 */

/// Formatea un entero con comas separadoras de miles para las trazas.
#[must_use]
pub fn format_number(number: u64) -> String {
    let digits = number.to_string();
    let mut formatted = String::with_capacity(digits.len() + digits.len() / 3);
    for (position, digit) in digits.chars().enumerate() {
        let place = digits.len() - position;
        formatted.push(digit);
        if place > 1 && (place - 1) % 3 == 0 {
            formatted.push(',');
        }
    }
    formatted
}
