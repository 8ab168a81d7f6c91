// src/domain/authorization/pkce.rs
//! Proof Key for Code Exchange verification.
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use sha2::{Digest, Sha256};
use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PkceError {
    #[error("unsupported hash method '{method}'")]
    UnsupportedMethod { method: String },
    #[error("the authorization code is unverified")]
    Unverified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeChallengeMethod {
    S256,
}

impl CodeChallengeMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            CodeChallengeMethod::S256 => "S256",
        }
    }

    fn challenge_for(self, verifier: &str) -> String {
        match self {
            CodeChallengeMethod::S256 => URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes())),
        }
    }
}

impl fmt::Display for CodeChallengeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CodeChallengeMethod {
    type Err = PkceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("s256") || s.eq_ignore_ascii_case("sha256") {
            Ok(CodeChallengeMethod::S256)
        } else {
            Err(PkceError::UnsupportedMethod {
                method: s.to_owned(),
            })
        }
    }
}

/// Check `verifier` against the challenge issued with the authorization request.
pub fn verify_code_challenge(method: &str, challenge: &str, verifier: &str) -> Result<(), PkceError> {
    let method: CodeChallengeMethod = method.parse()?;
    let computed = method.challenge_for(verifier);

    if constant_time_eq(computed.as_bytes(), challenge.as_bytes()) {
        Ok(())
    } else {
        Err(PkceError::Unverified)
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
