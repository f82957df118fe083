//! AUTN, the 16-byte authentication token: `SQN ^ AK || AMF || MAC-A`.

use std::convert::TryFrom;
use std::fmt;

use subtle::ConstantTimeEq;

use crate::functions::{f1, f5};
use crate::error::{Error, Result};
use crate::keys::KeyMaterial;
use crate::{decode_hex, xor, AK_SIZE, AMF_SIZE, AUTN_SIZE, MAC_SIZE, RAND_SIZE, SQN_SIZE};

const AMF_OFFSET: usize = SQN_SIZE;
const MAC_OFFSET: usize = SQN_SIZE + AMF_SIZE;

/// Authentication token sent to the UE alongside RAND.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Autn([u8; AUTN_SIZE]);

impl Autn {
    /// Lay out `SQN ^ AK || AMF || MAC-A`.
    pub fn assemble(
        sqn: &[u8; SQN_SIZE],
        ak: &[u8; AK_SIZE],
        amf: &[u8; AMF_SIZE],
        mac_a: &[u8; MAC_SIZE],
    ) -> Autn {
        let mut autn = [0u8; AUTN_SIZE];
        autn[..AMF_OFFSET].copy_from_slice(&xor(sqn, ak));
        autn[AMF_OFFSET..MAC_OFFSET].copy_from_slice(amf);
        autn[MAC_OFFSET..].copy_from_slice(mac_a);
        Autn(autn)
    }

    /// Parse a token received on the wire. Must be exactly 16 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Autn> {
        <[u8; AUTN_SIZE]>::try_from(bytes)
            .map(Autn)
            .map_err(|_| Error::InvalidInputLength {
                field: "autn",
                expected: AUTN_SIZE,
                len: bytes.len(),
            })
    }

    /// Parse a hex encoded token.
    pub fn from_hex(value: &str) -> Result<Autn> {
        Autn::from_bytes(&decode_hex("autn", value)?)
    }

    pub fn as_bytes(&self) -> &[u8; AUTN_SIZE] {
        &self.0
    }

    /// The concealed sequence number, `SQN ^ AK`.
    pub fn sqn_xor_ak(&self) -> [u8; SQN_SIZE] {
        let mut out = [0u8; SQN_SIZE];
        out.copy_from_slice(&self.0[..AMF_OFFSET]);
        out
    }

    pub fn amf(&self) -> [u8; AMF_SIZE] {
        let mut out = [0u8; AMF_SIZE];
        out.copy_from_slice(&self.0[AMF_OFFSET..MAC_OFFSET]);
        out
    }

    pub fn mac_a(&self) -> [u8; MAC_SIZE] {
        let mut out = [0u8; MAC_SIZE];
        out.copy_from_slice(&self.0[MAC_OFFSET..]);
        out
    }

    /// Uppercase hex, as carried in an [`AuthVector`](crate::AuthVector).
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }
}

impl From<[u8; AUTN_SIZE]> for Autn {
    fn from(bytes: [u8; AUTN_SIZE]) -> Self {
        Autn(bytes)
    }
}

impl fmt::Debug for Autn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Autn({})", self.to_hex())
    }
}

impl fmt::Display for Autn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Check an AUTN the way the UE does and return the SQN it carries.
///
/// AK is recomputed from RAND to unmask SQN, then MAC-A is recomputed over
/// `RAND || SQN || AMF` (AMF as found in the token) and compared in constant
/// time. Freshness of the recovered SQN is left to the caller.
pub fn verify_autn(
    keys: &KeyMaterial,
    rand: &[u8; RAND_SIZE],
    autn: &Autn,
) -> Result<[u8; SQN_SIZE]> {
    let ak = f5(keys.opc(), rand)?;
    let sqn = xor(&autn.sqn_xor_ak(), &ak);
    let expected = f1(keys.opc(), rand, &sqn, &autn.amf())?;

    if bool::from(expected[..].ct_eq(&autn.mac_a()[..])) {
        Ok(sqn)
    } else {
        tracing::warn!(rand = %hex::encode_upper(rand), "AUTN MAC-A mismatch");
        Err(Error::MacMismatch)
    }
}
