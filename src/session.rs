//! Stored login session for the TransactionHub backend
//!
//! The session (API token + user identity) is encrypted at rest with a
//! passphrase-derived key. The token itself is opaque; every authenticated
//! request sends it as `Authorization: Token <token>`.

use crate::data_paths::DataPaths;
use aes_gcm::{
    aead::{
        rand_core::{OsRng, RngCore},
        Aead, KeyInit,
    },
    Aes256Gcm, Key, Nonce,
};
use anyhow::{anyhow, Result};
use argon2::Argon2;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// An authenticated session against a TransactionHub server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user_id: u64,
    pub username: String,
    /// Host the token was issued by; commands warn when it differs from --host
    pub host: String,
}

/// Get the path to the encrypted session file
fn get_session_path(data_paths: &DataPaths) -> Result<PathBuf> {
    let auth_dir = data_paths.auth();
    std::fs::create_dir_all(&auth_dir)?;
    Ok(auth_dir.join("session.json.enc"))
}

/// Legacy plaintext location for backward compatibility
fn get_legacy_session_path() -> Result<PathBuf> {
    let config_dir = directories::ProjectDirs::from("com", "hubcli", "hubcli")
        .ok_or_else(|| anyhow!("Could not determine config directory"))?
        .config_dir()
        .to_path_buf();

    Ok(config_dir.join("session.json"))
}

/// Get or prompt for passphrase
fn get_passphrase() -> Result<String> {
    // First check environment variable
    if let Ok(passphrase) = std::env::var("HUBCLI_PASSPHRASE") {
        return Ok(passphrase);
    }

    // Otherwise prompt
    let passphrase = rpassword::prompt_password("Enter passphrase for session encryption: ")?;
    if passphrase.is_empty() {
        return Err(anyhow!("Passphrase cannot be empty"));
    }
    Ok(passphrase)
}

/// Derive encryption key from passphrase
fn derive_key(passphrase: &str, salt: &[u8]) -> Result<Key<Aes256Gcm>> {
    let mut key_bytes = [0u8; 32];
    Argon2::default()
        .hash_password_into(passphrase.as_bytes(), salt, &mut key_bytes)
        .map_err(|e| anyhow!("Failed to derive key: {}", e))?;
    Ok(Key::<Aes256Gcm>::from_slice(&key_bytes).clone())
}

/// Decrypt and deserialize a stored session file
fn read_encrypted(path: &PathBuf, passphrase: &str) -> Result<Session> {
    let encrypted = std::fs::read(path)?;

    if encrypted.len() < 28 {
        // 16 (salt) + 12 (nonce) = 28
        return Err(anyhow!("Invalid encrypted file format"));
    }

    let salt = &encrypted[..16];
    let nonce_bytes = &encrypted[16..28];
    let ciphertext = &encrypted[28..];

    let key = derive_key(passphrase, salt)?;
    let cipher = Aes256Gcm::new(&key);
    let nonce = Nonce::from_slice(nonce_bytes);

    let plaintext = cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| anyhow!("Decryption failed. Wrong passphrase?"))?;

    let session: Session = serde_json::from_slice(&plaintext)?;
    Ok(session)
}

/// Serialize and encrypt a session to a file
fn write_encrypted(path: &PathBuf, passphrase: &str, session: &Session) -> Result<()> {
    let json = serde_json::to_string(session)?;

    let mut salt = [0u8; 16];
    let mut nonce_bytes = [0u8; 12];
    OsRng.fill_bytes(&mut salt);
    OsRng.fill_bytes(&mut nonce_bytes);

    let key = derive_key(passphrase, &salt)?;
    let cipher = Aes256Gcm::new(&key);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, json.as_bytes())
        .map_err(|e| anyhow!("Encryption failed: {}", e))?;

    // Write salt + nonce + ciphertext
    let mut output = Vec::new();
    output.extend_from_slice(&salt);
    output.extend_from_slice(&nonce_bytes);
    output.extend_from_slice(&ciphertext);

    std::fs::write(path, output)?;
    Ok(())
}

/// Save the session after a successful login
pub fn save_session(data_paths: &DataPaths, session: &Session) -> Result<()> {
    let session_path = get_session_path(data_paths)?;
    let passphrase = get_passphrase()?;
    write_encrypted(&session_path, &passphrase, session)
}

/// Load the stored session (with legacy plaintext migration)
pub fn load_session(data_paths: &DataPaths) -> Result<Session> {
    let session_path = get_session_path(data_paths)?;

    if session_path.exists() {
        let passphrase = get_passphrase()?;
        return read_encrypted(&session_path, &passphrase);
    }

    // Check legacy plaintext location
    if let Ok(legacy_path) = get_legacy_session_path() {
        if legacy_path.exists() {
            let bytes = std::fs::read(&legacy_path)?;
            let session: Session = serde_json::from_slice(&bytes)?;

            // Migrate to the encrypted store
            let passphrase = get_passphrase()?;
            write_encrypted(&session_path, &passphrase, &session)?;
            std::fs::remove_file(&legacy_path).ok();

            return Ok(session);
        }
    }

    Err(anyhow!("Not logged in. Run 'hubcli login' first"))
}

/// Remove the stored session (logout). Missing file is not an error.
pub fn clear_session(data_paths: &DataPaths) -> Result<bool> {
    let session_path = get_session_path(data_paths)?;
    if session_path.exists() {
        std::fs::remove_file(&session_path)?;
        Ok(true)
    } else {
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_session() -> Session {
        Session {
            token: "9f2c1f0f6a1e4d5b".to_string(),
            user_id: 7,
            username: "operator".to_string(),
            host: "http://localhost:8000".to_string(),
        }
    }

    #[test]
    fn test_encrypt_decrypt_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json.enc");

        write_encrypted(&path, "hunter2", &sample_session()).unwrap();
        let loaded = read_encrypted(&path, "hunter2").unwrap();

        assert_eq!(loaded.token, "9f2c1f0f6a1e4d5b");
        assert_eq!(loaded.user_id, 7);
        assert_eq!(loaded.username, "operator");
    }

    #[test]
    fn test_wrong_passphrase_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json.enc");

        write_encrypted(&path, "hunter2", &sample_session()).unwrap();
        assert!(read_encrypted(&path, "letmein").is_err());
    }

    #[test]
    fn test_truncated_file_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json.enc");
        std::fs::write(&path, b"too short").unwrap();

        assert!(read_encrypted(&path, "hunter2").is_err());
    }

    #[test]
    fn test_clear_session_missing_is_ok() {
        let dir = TempDir::new().unwrap();
        let data_paths = DataPaths::new(dir.path());

        assert!(!clear_session(&data_paths).unwrap());
    }
}
