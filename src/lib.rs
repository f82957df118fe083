//! Authentication vector generation with the structure of the 3GPP AKA
//! Milenage algorithm set.
//!
//! OPc is derived from K and OP with a pluggable core function (AES-128 by
//! default, see [`CoreFunction`]). The five derivation functions f1 to f5 are
//! HMAC-SHA-256 keyed with OPc and domain separated by their inputs. Their
//! outputs have the sizes of the Milenage functions, but they do not
//! interoperate with the AES-based f1 to f5 of 3GPP TS 35.206.
//!
//! # Usage example
//! ```
//!use aka_vector::{AvAssembler, KeyMaterial};
//!
//!fn main() {
//!        let zero = "00000000000000000000000000000000";
//!        let keys = KeyMaterial::from_hex(zero, zero).unwrap();
//!
//!        let mut assembler = AvAssembler::new();
//!        let av = assembler
//!            .generate(&keys, Some("000000000000"), Some(zero))
//!            .unwrap();
//!
//!        assert_eq!(av.xres(), "FB5490548B6EC02D");
//!        assert_eq!(av.autn(), "30B6875EBAED0000373D6E8654D581AA");
//!        assert_eq!(av.ck(), "758A950F167EC5BC742FFA8F9766C733");
//!        assert_eq!(av.ik(), "20939C2A08201C7AD979A29F7C817844");
//!
//!        // Without RAND, a fresh challenge is drawn from the OS CSPRNG.
//!        let fresh = assembler.generate(&keys, None, None).unwrap();
//!        assert_eq!(fresh.rand().len(), 32);
//!}
//!
//! ```

#[cfg(test)]
#[macro_use]
extern crate hex_literal;

pub mod autn;
pub mod error;
pub mod functions;
pub mod keys;
pub mod opc;
pub mod request;
pub mod vector;

pub use autn::{verify_autn, Autn};
pub use error::{Error, Result};
pub use functions::{f1, f2, f3, f4, f5, DerivedKeys};
pub use keys::KeyMaterial;
pub use opc::{derive_opc, Aes128Ecb, CoreFunction};
pub use request::{handle_request, AuthRequest, AuthResponse};
pub use vector::{assemble, AuthVector, AvAssembler, Quintet};

/// K, the subscriber key, in bytes.
pub const KEY_SIZE: usize = 16;
/// OP and OPc, in bytes.
pub const OP_SIZE: usize = 16;
/// Core function block, in bytes.
pub const BLOCK_SIZE: usize = 16;
pub const RAND_SIZE: usize = 16;
pub const SQN_SIZE: usize = 6;
pub const AMF_SIZE: usize = 2;
pub const MAC_SIZE: usize = 8;
pub const RES_SIZE: usize = 8;
pub const CK_SIZE: usize = 16;
pub const IK_SIZE: usize = 16;
pub const AK_SIZE: usize = 6;
/// `SQN ^ AK || AMF || MAC-A`
pub const AUTN_SIZE: usize = SQN_SIZE + AMF_SIZE + MAC_SIZE;

/// Authentication management field. Fixed to zero.
pub const AMF: [u8; AMF_SIZE] = [0u8; AMF_SIZE];
/// SQN used when the caller does not supply one.
pub const DEFAULT_SQN: [u8; SQN_SIZE] = [0u8; SQN_SIZE];

/// xor two arrays of the same length
pub(crate) fn xor<const N: usize>(a1: &[u8; N], a2: &[u8; N]) -> [u8; N] {
    let mut output = [0u8; N];
    for (out, (a, b)) in output.iter_mut().zip(a1.iter().zip(a2.iter())) {
        *out = a ^ b;
    }
    output
}

pub(crate) fn decode_hex(field: &'static str, value: &str) -> Result<Vec<u8>> {
    hex::decode(value).map_err(|e| Error::MalformedInput {
        field,
        reason: e.to_string(),
    })
}
