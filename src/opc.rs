//! Core function `E_K` and OPc derivation.
//!
//! `OPc = E_K(OP) XOR OP`. The core function is the pluggable piece: any
//! deterministic, keyed, 16-bytes-in/16-bytes-out transform may stand in for
//! the default AES-128 block encryption.

use crate::error::{Error, Result};
use crate::{xor, BLOCK_SIZE, KEY_SIZE, OP_SIZE};

/// A keyed one-way transform of a single 128-bit block.
pub trait CoreFunction {
    /// Transform `block` under `key`.
    fn encrypt(&self, key: &[u8; KEY_SIZE], block: &[u8; BLOCK_SIZE]) -> Result<[u8; BLOCK_SIZE]>;
}

impl<T: CoreFunction + ?Sized> CoreFunction for &T {
    fn encrypt(&self, key: &[u8; KEY_SIZE], block: &[u8; BLOCK_SIZE]) -> Result<[u8; BLOCK_SIZE]> {
        (**self).encrypt(key, block)
    }
}

/// AES-128 in ECB mode over one block, zero padded.
///
/// Backed by RustCrypto `aes` with the default `aes` feature, or by OpenSSL
/// with the `openssl` feature.
#[derive(Debug, Default, Clone, Copy)]
pub struct Aes128Ecb;

impl CoreFunction for Aes128Ecb {
    fn encrypt(&self, key: &[u8; KEY_SIZE], block: &[u8; BLOCK_SIZE]) -> Result<[u8; BLOCK_SIZE]> {
        rijndael_encrypt(key, block)
    }
}

#[cfg(all(feature = "aes", not(feature = "openssl")))]
fn rijndael_encrypt(key: &[u8; KEY_SIZE], input: &[u8; BLOCK_SIZE]) -> Result<[u8; BLOCK_SIZE]> {
    use aes::Aes128;
    use block_modes::block_padding::ZeroPadding;
    use block_modes::{BlockMode, Ecb};

    let cipher = Ecb::<Aes128, ZeroPadding>::new_var(key, &[])
        .map_err(|e| Error::Crypto(format!("{:?}", e)))?;
    let mut output = *input;
    cipher
        .encrypt(&mut output, BLOCK_SIZE)
        .map_err(|e| Error::Crypto(format!("{:?}", e)))?;
    Ok(output)
}

#[cfg(feature = "openssl")]
fn rijndael_encrypt(key: &[u8; KEY_SIZE], input: &[u8; BLOCK_SIZE]) -> Result<[u8; BLOCK_SIZE]> {
    use openssl::symm::{Cipher, Crypter, Mode};

    let crypto_err = |e: openssl::error::ErrorStack| Error::Crypto(e.to_string());

    let mut crypter =
        Crypter::new(Cipher::aes_128_ecb(), Mode::Encrypt, key, None).map_err(crypto_err)?;
    crypter.pad(false);

    // OpenSSL wants room for one extra block in the update buffer.
    let mut buf = [0u8; 2 * BLOCK_SIZE];
    let mut count = crypter.update(input, &mut buf).map_err(crypto_err)?;
    count += crypter.finalize(&mut buf[count..]).map_err(crypto_err)?;
    if count != BLOCK_SIZE {
        return Err(Error::Crypto(format!(
            "AES-128-ECB produced {} bytes, expected {}",
            count, BLOCK_SIZE
        )));
    }

    let mut output = [0u8; BLOCK_SIZE];
    output.copy_from_slice(&buf[..BLOCK_SIZE]);
    Ok(output)
}

#[cfg(not(any(feature = "aes", feature = "openssl")))]
compile_error!("enable either the `aes` or the `openssl` feature");

/// Derive OP with K to produce OPc
pub fn derive_opc<C: CoreFunction + ?Sized>(
    core: &C,
    k: &[u8; KEY_SIZE],
    op: &[u8; OP_SIZE],
) -> Result<[u8; OP_SIZE]> {
    let ciphered = core.encrypt(k, op)?;
    tracing::trace!("derived OPc from OP");
    Ok(xor(&ciphered, op))
}
