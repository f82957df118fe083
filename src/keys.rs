use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::{Error, Result};
use crate::opc::{derive_opc, Aes128Ecb, CoreFunction};
use crate::{decode_hex, KEY_SIZE, OP_SIZE};

/// Long-term subscriber secrets: K, OP and the OPc derived from them.
///
/// OPc is derived once, when the value is built, and reused for every vector
/// generated for the subscriber. The value is immutable and may be shared
/// across threads. Secrets are wiped on drop and never printed.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct KeyMaterial {
    k: [u8; KEY_SIZE],
    op: Option<[u8; OP_SIZE]>,
    opc: [u8; OP_SIZE],
}

impl KeyMaterial {
    /// Build from raw K and OP, deriving OPc with `core`.
    pub fn new<C: CoreFunction + ?Sized>(
        k: [u8; KEY_SIZE],
        op: [u8; OP_SIZE],
        core: &C,
    ) -> Result<KeyMaterial> {
        let opc = derive_opc(core, &k, &op)?;
        Ok(KeyMaterial {
            k,
            op: Some(op),
            opc,
        })
    }

    /// Build from K and an already provisioned OPc. No OP is held.
    pub fn with_opc(k: [u8; KEY_SIZE], opc: [u8; OP_SIZE]) -> KeyMaterial {
        KeyMaterial { k, op: None, opc }
    }

    /// Decode hex `op` and `key` and derive OPc with AES-128.
    ///
    /// Fails with [`Error::MalformedInput`] when either string is not hex and
    /// with [`Error::InvalidKeyLength`] when either does not decode to 16 bytes.
    pub fn from_hex(op: &str, key: &str) -> Result<KeyMaterial> {
        KeyMaterial::from_hex_with(op, key, &Aes128Ecb)
    }

    /// Like [`KeyMaterial::from_hex`] with a caller-supplied core function.
    pub fn from_hex_with<C: CoreFunction + ?Sized>(
        op: &str,
        key: &str,
        core: &C,
    ) -> Result<KeyMaterial> {
        let op = decode_key("op", op)?;
        let k = decode_key("secretKey", key)?;
        KeyMaterial::new(*k, *op, core)
    }

    /// K, the 128-bit subscriber key.
    pub fn k(&self) -> &[u8; KEY_SIZE] {
        &self.k
    }

    /// OP, when the material was built from it.
    pub fn op(&self) -> Option<&[u8; OP_SIZE]> {
        self.op.as_ref()
    }

    /// OPc, the operator variant constant used by f1 to f5.
    pub fn opc(&self) -> &[u8; OP_SIZE] {
        &self.opc
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("k", &"<redacted>")
            .field("op", &self.op.map(|_| "<redacted>"))
            .field("opc", &"<redacted>")
            .finish()
    }
}

fn decode_key(field: &'static str, value: &str) -> Result<Zeroizing<[u8; KEY_SIZE]>> {
    let raw = Zeroizing::new(decode_hex(field, value)?);
    if raw.len() != KEY_SIZE {
        return Err(Error::InvalidKeyLength {
            field,
            len: raw.len(),
        });
    }
    let mut key = Zeroizing::new([0u8; KEY_SIZE]);
    key.copy_from_slice(&raw);
    Ok(key)
}
