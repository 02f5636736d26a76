//! Message cipher for the chat log.
//!
//! Every call to [`MessageCipher::encode`] on [`AesGcmCipher`] seals with a
//! fresh random 96-bit nonce from the system CSPRNG. The wire form is
//! `base64(nonce || ciphertext || tag)`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use ring::aead::{Aad, LessSafeKey, Nonce, UnboundKey, AES_256_GCM, NONCE_LEN};
use ring::rand::{SecureRandom, SystemRandom};

use launchpad_core::{LaunchpadError, Result};

/// Key length in bytes.
pub const KEY_LEN: usize = 32;

/// Reversible text cipher used for stored chat messages.
pub trait MessageCipher: Send + Sync {
    /// Encrypt `plaintext` into printable cipher text.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchpadError::Cipher`] if sealing fails.
    fn encode(&self, plaintext: &str) -> Result<String>;

    /// Recover the plaintext produced by [`MessageCipher::encode`].
    ///
    /// # Errors
    ///
    /// Returns [`LaunchpadError::Cipher`] for malformed input, a wrong key or
    /// tampered data.
    fn decode(&self, ciphertext: &str) -> Result<String>;

    /// Name reported to clients as the encryption provider.
    fn provider(&self) -> &'static str;
}

/// AES-256-GCM cipher backed by `ring`.
pub struct AesGcmCipher {
    key: LessSafeKey,
    rng: SystemRandom,
}

impl std::fmt::Debug for AesGcmCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AesGcmCipher").finish_non_exhaustive()
    }
}

impl AesGcmCipher {
    /// Build a cipher from raw key bytes.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchpadError::Cipher`] if `ring` rejects the key.
    pub fn new(key: &[u8; KEY_LEN]) -> Result<Self> {
        let unbound = UnboundKey::new(&AES_256_GCM, key)
            .map_err(|_| cipher_error("failed to create AES-256-GCM key"))?;

        Ok(Self {
            key: LessSafeKey::new(unbound),
            rng: SystemRandom::new(),
        })
    }

    /// Build a cipher from a base64-encoded 32-byte key.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchpadError::Cipher`] if the key is not valid base64 or
    /// does not decode to exactly 32 bytes.
    pub fn from_base64(encoded: &str) -> Result<Self> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| cipher_error(format!("encryption key is not valid base64: {e}")))?;

        let key: [u8; KEY_LEN] = bytes.as_slice().try_into().map_err(|_| {
            cipher_error(format!(
                "encryption key must be {KEY_LEN} bytes, got {}",
                bytes.len()
            ))
        })?;

        Self::new(&key)
    }
}

impl MessageCipher for AesGcmCipher {
    fn encode(&self, plaintext: &str) -> Result<String> {
        let mut nonce_bytes = [0u8; NONCE_LEN];
        self.rng
            .fill(&mut nonce_bytes)
            .map_err(|_| cipher_error("failed to generate random nonce"))?;
        let nonce = Nonce::assume_unique_for_key(nonce_bytes);

        let mut in_out = plaintext.as_bytes().to_vec();
        self.key
            .seal_in_place_append_tag(nonce, Aad::empty(), &mut in_out)
            .map_err(|_| cipher_error("AES-256-GCM encryption failed"))?;

        let mut wire = Vec::with_capacity(NONCE_LEN + in_out.len());
        wire.extend_from_slice(&nonce_bytes);
        wire.extend_from_slice(&in_out);

        Ok(STANDARD.encode(wire))
    }

    fn decode(&self, ciphertext: &str) -> Result<String> {
        let wire = STANDARD
            .decode(ciphertext)
            .map_err(|e| cipher_error(format!("ciphertext is not valid base64: {e}")))?;

        if wire.len() < NONCE_LEN + AES_256_GCM.tag_len() {
            return Err(cipher_error("ciphertext is too short"));
        }

        let (nonce_bytes, sealed) = wire.split_at(NONCE_LEN);
        let nonce = Nonce::try_assume_unique_for_key(nonce_bytes)
            .map_err(|_| cipher_error("invalid nonce"))?;

        let mut in_out = sealed.to_vec();
        let plaintext = self
            .key
            .open_in_place(nonce, Aad::empty(), &mut in_out)
            .map_err(|_| cipher_error("AES-256-GCM decryption failed, wrong key or corrupted data"))?;

        String::from_utf8(plaintext.to_vec())
            .map_err(|_| cipher_error("decrypted message is not valid UTF-8"))
    }

    fn provider(&self) -> &'static str {
        "AES-256-GCM"
    }
}

/// Generate a random 32-byte key.
///
/// # Errors
///
/// Returns [`LaunchpadError::Cipher`] if the system RNG fails.
pub fn generate_key() -> Result<[u8; KEY_LEN]> {
    let rng = SystemRandom::new();
    let mut key = [0u8; KEY_LEN];
    rng.fill(&mut key)
        .map_err(|_| cipher_error("failed to generate random key"))?;
    Ok(key)
}

fn cipher_error(message: impl Into<String>) -> LaunchpadError {
    LaunchpadError::Cipher(message.into())
}
