// src/infrastructure/util.rs
use crate::application::{
    error::{ApplicationError, ApplicationResult},
    ports::util::CodeGenerator,
};
use base64::{Engine as _, engine::general_purpose::URL_SAFE};
use rand::{RngCore, rngs::OsRng};

const TOKEN_BYTES: usize = 32;

#[derive(Default, Clone)]
pub struct RandomCodeGenerator;

impl RandomCodeGenerator {
    fn random_bytes() -> ApplicationResult<[u8; TOKEN_BYTES]> {
        let mut bytes = [0u8; TOKEN_BYTES];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|err| ApplicationError::infrastructure(format!("unable to create random bytes: {err}")))?;
        Ok(bytes)
    }
}

impl CodeGenerator for RandomCodeGenerator {
    fn authorization_code(&self) -> ApplicationResult<String> {
        Ok(hex::encode(Self::random_bytes()?))
    }

    fn bearer_token(&self) -> ApplicationResult<String> {
        Ok(URL_SAFE.encode(Self::random_bytes()?))
    }
}
