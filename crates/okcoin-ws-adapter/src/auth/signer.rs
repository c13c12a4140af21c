/*
[INPUT]:  Channel parameters, api key and secret key
[OUTPUT]: Parameter maps carrying api_key and uppercase MD5 sign
[POS]:    Auth layer - deterministic request signing for parameterized channels
[UPDATE]: When changing signing algorithm or canonical string format
*/

use std::collections::BTreeMap;

use md5::{Digest, Md5};

use crate::auth::Credentials;

const API_KEY_PARAM: &str = "api_key";
const SIGN_PARAM: &str = "sign";

/// Signs channel parameters with a stored key pair
#[derive(Debug, Clone)]
pub struct RequestSigner {
    credentials: Credentials,
}

impl RequestSigner {
    /// Create a new request signer with the given credentials
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Return a signed copy of `params`
    pub fn sign(&self, params: &BTreeMap<String, String>) -> BTreeMap<String, String> {
        sign(
            params,
            self.credentials.api_key(),
            self.credentials.secret_key(),
        )
    }
}

/// Sign a parameter map.
///
/// The result holds every input pair plus `api_key` and `sign`, where `sign`
/// is the uppercase hex MD5 of the canonical string followed by
/// `&secret_key=<secret_key>`. The input map is left untouched.
pub fn sign(
    params: &BTreeMap<String, String>,
    api_key: &str,
    secret_key: &str,
) -> BTreeMap<String, String> {
    let mut signed = params.clone();
    signed.insert(API_KEY_PARAM.to_string(), api_key.to_string());
    let signature = sign_param_string(&canonical_string(&signed), secret_key);
    signed.insert(SIGN_PARAM.to_string(), signature);
    signed
}

/// Join `key=value` pairs with `&` in ascending key order
pub fn canonical_string(params: &BTreeMap<String, String>) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Append the secret key and return the uppercase hex MD5 digest
pub fn sign_param_string(canonical: &str, secret_key: &str) -> String {
    let payload = format!("{canonical}&secret_key={secret_key}");
    hex::encode_upper(Md5::digest(payload.as_bytes()))
}
