pub mod claims;
pub mod codec;
pub mod errors;

pub use claims::AccessClaims;
pub use claims::ACCESS_TOKEN_ISSUER;
pub use codec::AccessTokenCodec;
pub use errors::TokenError;
