// [libs/domain/models/src/key_type.rs]
/*!
 * =================================================================
 * APARATO: KEY TYPE TAXONOMY (V3.0 - SOBERANO)
 * CLASIFICACIÓN: DOMAIN LAYER (ESTRATO L2)
 * RESPONSABILIDAD: DISCRIMINADOR DE FORMAS DE LLAVE EN OUTPUTS
 *
 * VISION HIPER-HOLÍSTICA:
 * La jerarquía polimórfica del analizador clásico colapsa en este
 * enum etiquetado: ningún despacho virtual es necesario. El valor
 * numérico de cada variante está congelado porque viaja a disco en
 * TransactionFile.bin y PublicKeyRecords.bin.
 * =================================================================
 */

/// Taxonomía de formas de llave reconocidas en scripts de desafío.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum KeyType {
    /// Forma indescifrable; se sustituye la dirección ficticia.
    #[default]
    Unknown = 0,
    /// Llave ECDSA sin comprimir de 65 bytes (P2PK histórico).
    UncompressedP2pk = 1,
    /// Llave ECDSA comprimida de 33 bytes (P2PK).
    CompressedP2pk = 2,
    /// HASH160 directo de 20 bytes (P2PKH estándar).
    P2pkh = 3,
    /// Coordenada X de 32 bytes sin prefijo de paridad.
    TruncatedCompressed = 4,
    /// Script k-de-n sellado por OP_CHECKMULTISIG.
    MultiSig = 5,
    /// Output OP_RETURN de 40 bytes usado por protocolos stealth.
    Stealth = 6,
    /// Pay-to-Script-Hash (OP_HASH160 <20> OP_EQUAL).
    P2sh = 7,
    /// Script de desafío de longitud cero.
    ZeroLength = 8,
}

impl KeyType {
    /// Reconstruye la variante desde su discriminante persistido.
    /// Un discriminante desconocido degrada a `Unknown`.
    #[must_use]
    pub fn from_u32(discriminant: u32) -> Self {
        match discriminant {
            1 => KeyType::UncompressedP2pk,
            2 => KeyType::CompressedP2pk,
            3 => KeyType::P2pkh,
            4 => KeyType::TruncatedCompressed,
            5 => KeyType::MultiSig,
            6 => KeyType::Stealth,
            7 => KeyType::P2sh,
            8 => KeyType::ZeroLength,
            _ => KeyType::Unknown,
        }
    }

    /// Etiqueta ASCII para reportes y trazas.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            KeyType::Unknown => "UNKNOWN",
            KeyType::UncompressedP2pk => "UNCOMPRESSED_PUBLIC_KEY",
            KeyType::CompressedP2pk => "COMPRESSED_PUBLIC_KEY",
            KeyType::P2pkh => "RIPEMD160",
            KeyType::TruncatedCompressed => "TRUNCATED_COMPRESSED_KEY",
            KeyType::MultiSig => "MULTISIG",
            KeyType::Stealth => "STEALTH",
            KeyType::P2sh => "SCRIPT_HASH",
            KeyType::ZeroLength => "ZERO_LENGTH",
        }
    }
}
