/*
[INPUT]:  API key pair and channel parameters
[OUTPUT]: Validated credentials and signed parameter maps
[POS]:    Auth layer - handles OKCoin request authentication
[UPDATE]: When auth flow or signature methods change
*/

pub mod credentials;
pub mod signer;

pub use credentials::Credentials;
pub use signer::{RequestSigner, canonical_string, sign, sign_param_string};
