// src/application/dto/mod.rs
pub mod authorization;
pub mod profile;
pub mod serde_time;
pub mod session;

pub use authorization::{
    AuthorizationQuery, ConsentDto, ExchangeForm, ProfileClaimsDto, ProfileExchangeDto,
    TokenExchangeDto,
};
pub use profile::ProfileDto;
pub use session::{AuthenticatedProfile, SessionTokenDto};
