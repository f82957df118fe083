//! Authentication vector assembly.

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};

use crate::autn::Autn;
use crate::functions::DerivedKeys;
use crate::error::{Error, Result};
use crate::keys::KeyMaterial;
use crate::opc::{Aes128Ecb, CoreFunction};
use crate::{decode_hex, AMF, CK_SIZE, DEFAULT_SQN, IK_SIZE, RAND_SIZE, RES_SIZE, SQN_SIZE};

/// Byte-level vector for one challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quintet {
    pub rand: [u8; RAND_SIZE],
    pub xres: [u8; RES_SIZE],
    pub autn: Autn,
    pub ck: [u8; CK_SIZE],
    pub ik: [u8; IK_SIZE],
}

impl Quintet {
    /// Encode every field as uppercase hex.
    pub fn to_auth_vector(&self) -> AuthVector {
        AuthVector {
            rand: hex::encode_upper(self.rand),
            xres: hex::encode_upper(self.xres),
            autn: self.autn.to_hex(),
            ck: hex::encode_upper(self.ck),
            ik: hex::encode_upper(self.ik),
        }
    }
}

/// Authentication vector handed to the serving network, hex encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct AuthVector {
    rand: String,
    xres: String,
    autn: String,
    ck: String,
    ik: String,
}

impl AuthVector {
    pub fn rand(&self) -> &str {
        &self.rand
    }

    pub fn xres(&self) -> &str {
        &self.xres
    }

    pub fn autn(&self) -> &str {
        &self.autn
    }

    pub fn ck(&self) -> &str {
        &self.ck
    }

    pub fn ik(&self) -> &str {
        &self.ik
    }
}

/// Build the vector for a fixed SQN and RAND.
///
/// Deterministic: the same key material, SQN and RAND always give the same
/// quintet. AMF is the all-zero policy value.
pub fn assemble(
    keys: &KeyMaterial,
    sqn: &[u8; SQN_SIZE],
    rand: &[u8; RAND_SIZE],
) -> Result<Quintet> {
    let derived = DerivedKeys::derive(keys.opc(), rand, sqn, &AMF)?;
    let autn = Autn::assemble(sqn, &derived.ak, &AMF, &derived.mac_a);

    tracing::trace!(rand = %hex::encode_upper(rand), autn = %autn, "assembled AUTN");

    Ok(Quintet {
        rand: *rand,
        xres: derived.res,
        autn,
        ck: derived.ck,
        ik: derived.ik,
    })
}

/// Produces authentication vectors, drawing RAND from an injected random
/// source when the caller does not supply one.
#[derive(Debug, Clone)]
pub struct AvAssembler<C = Aes128Ecb, R = OsRng> {
    core: C,
    rng: R,
}

impl AvAssembler {
    /// AES-128 core function and the operating system CSPRNG.
    pub fn new() -> Self {
        AvAssembler {
            core: Aes128Ecb,
            rng: OsRng,
        }
    }
}

impl Default for AvAssembler {
    fn default() -> Self {
        AvAssembler::new()
    }
}

impl<R: RngCore + CryptoRng> AvAssembler<Aes128Ecb, R> {
    /// AES-128 core function with a caller-supplied random source.
    pub fn with_rng(rng: R) -> Self {
        AvAssembler {
            core: Aes128Ecb,
            rng,
        }
    }
}

impl<C: CoreFunction, R: RngCore + CryptoRng> AvAssembler<C, R> {
    pub fn with_parts(core: C, rng: R) -> Self {
        AvAssembler { core, rng }
    }

    pub fn core(&self) -> &C {
        &self.core
    }

    /// Decode hex OP and K and derive OPc with this assembler's core function.
    pub fn key_material(&self, op: &str, key: &str) -> Result<KeyMaterial> {
        KeyMaterial::from_hex_with(op, key, &self.core)
    }

    /// Generate one vector from hex inputs.
    ///
    /// A missing (or empty) `sqn` defaults to zero and a missing `rand` is
    /// drawn from the random source. Supplied values must decode to 6 and 16
    /// bytes respectively.
    pub fn generate(
        &mut self,
        keys: &KeyMaterial,
        sqn: Option<&str>,
        rand: Option<&str>,
    ) -> Result<AuthVector> {
        let sqn = non_empty(sqn)
            .map(|v| decode_fixed::<SQN_SIZE>("sqn", v))
            .transpose()?;
        let rand = non_empty(rand)
            .map(|v| decode_fixed::<RAND_SIZE>("rand", v))
            .transpose()?;

        Ok(self.generate_raw(keys, sqn, rand)?.to_auth_vector())
    }

    /// Generate one vector from raw inputs, with the same defaults as
    /// [`AvAssembler::generate`].
    pub fn generate_raw(
        &mut self,
        keys: &KeyMaterial,
        sqn: Option<[u8; SQN_SIZE]>,
        rand: Option<[u8; RAND_SIZE]>,
    ) -> Result<Quintet> {
        tracing::debug!(
            sqn_supplied = sqn.is_some(),
            rand_supplied = rand.is_some(),
            "generating authentication vector"
        );

        let rand = match rand {
            Some(rand) => rand,
            None => self.random_challenge()?,
        };
        let sqn = sqn.unwrap_or(DEFAULT_SQN);

        assemble(keys, &sqn, &rand)
    }

    fn random_challenge(&mut self) -> Result<[u8; RAND_SIZE]> {
        let mut rand = [0u8; RAND_SIZE];
        self.rng
            .try_fill_bytes(&mut rand)
            .map_err(|e| Error::Crypto(e.to_string()))?;
        Ok(rand)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn decode_fixed<const N: usize>(field: &'static str, value: &str) -> Result<[u8; N]> {
    let raw = decode_hex(field, value)?;
    if raw.len() != N {
        return Err(Error::InvalidInputLength {
            field,
            expected: N,
            len: raw.len(),
        });
    }
    let mut out = [0u8; N];
    out.copy_from_slice(&raw);
    Ok(out)
}
