//! Derivation functions f1 to f5.
//!
//! Each function is HMAC-SHA-256 keyed with OPc over its own message, truncated
//! to the leading bytes of the digest:
//!
//! | Function | Message               | Output |
//! |----------|-----------------------|--------|
//! | f1       | RAND \|\| SQN \|\| AMF | MAC-A  |
//! | f2       | RAND                  | RES    |
//! | f3       | RAND \|\| 0x01         | CK     |
//! | f4       | RAND \|\| 0x02         | IK     |
//! | f5       | RAND \|\| 0x03         | AK     |

use hmac::{Hmac, Mac, NewMac};
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Error, Result};
use crate::{AK_SIZE, AMF_SIZE, CK_SIZE, IK_SIZE, MAC_SIZE, OP_SIZE, RAND_SIZE, RES_SIZE, SQN_SIZE};

type HmacSha256 = Hmac<Sha256>;

const CK_DOMAIN: u8 = 0x01;
const IK_DOMAIN: u8 = 0x02;
const AK_DOMAIN: u8 = 0x03;

/// HMAC-SHA-256 under `opc` over the concatenation of `parts`, keeping the
/// first `N` bytes. `N` never exceeds the 32-byte digest.
fn keyed_digest<const N: usize>(opc: &[u8; OP_SIZE], parts: &[&[u8]]) -> Result<[u8; N]> {
    let mut mac = HmacSha256::new_varkey(opc).map_err(|e| Error::Crypto(format!("{:?}", e)))?;
    for part in parts {
        mac.update(part);
    }
    let digest = mac.finalize().into_bytes();

    let mut output = [0u8; N];
    output.copy_from_slice(&digest[..N]);
    Ok(output)
}

/// F1 is the network authentication function.
/// F1 computes network authentication code MAC-A from OPc, random challenge RAND,
/// sequence number SQN and authentication management field AMF.
pub fn f1(
    opc: &[u8; OP_SIZE],
    rand: &[u8; RAND_SIZE],
    sqn: &[u8; SQN_SIZE],
    amf: &[u8; AMF_SIZE],
) -> Result<[u8; MAC_SIZE]> {
    keyed_digest(opc, &[rand, sqn, amf])
}

/// F2 computes the response RES (XRES on the network side) from RAND.
pub fn f2(opc: &[u8; OP_SIZE], rand: &[u8; RAND_SIZE]) -> Result<[u8; RES_SIZE]> {
    keyed_digest(opc, &[rand])
}

/// F3 computes the 128-bit confidentiality key CK.
pub fn f3(opc: &[u8; OP_SIZE], rand: &[u8; RAND_SIZE]) -> Result<[u8; CK_SIZE]> {
    keyed_digest(opc, &[rand, &[CK_DOMAIN]])
}

/// F4 computes the 128-bit integrity key IK.
pub fn f4(opc: &[u8; OP_SIZE], rand: &[u8; RAND_SIZE]) -> Result<[u8; IK_SIZE]> {
    keyed_digest(opc, &[rand, &[IK_DOMAIN]])
}

/// F5 computes the 48-bit anonymity key AK that conceals SQN inside AUTN.
pub fn f5(opc: &[u8; OP_SIZE], rand: &[u8; RAND_SIZE]) -> Result<[u8; AK_SIZE]> {
    keyed_digest(opc, &[rand, &[AK_DOMAIN]])
}

/// Outputs of f1 to f5 for a single challenge.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKeys {
    /// MAC-A, output of f1.
    pub mac_a: [u8; MAC_SIZE],
    /// RES, output of f2.
    pub res: [u8; RES_SIZE],
    /// CK, output of f3.
    pub ck: [u8; CK_SIZE],
    /// IK, output of f4.
    pub ik: [u8; IK_SIZE],
    /// AK, output of f5.
    pub ak: [u8; AK_SIZE],
}

impl DerivedKeys {
    /// Run f1 to f5 over one (RAND, SQN, AMF) triple.
    pub fn derive(
        opc: &[u8; OP_SIZE],
        rand: &[u8; RAND_SIZE],
        sqn: &[u8; SQN_SIZE],
        amf: &[u8; AMF_SIZE],
    ) -> Result<DerivedKeys> {
        Ok(DerivedKeys {
            mac_a: f1(opc, rand, sqn, amf)?,
            res: f2(opc, rand)?,
            ck: f3(opc, rand)?,
            ik: f4(opc, rand)?,
            ak: f5(opc, rand)?,
        })
    }
}
