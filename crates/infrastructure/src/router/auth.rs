//! NDM challenge-response login.
//!
//! A `401` from `GET /auth` carries `X-NDM-Realm` and `X-NDM-Challenge`.
//! The client answers with `SHA256(challenge + MD5("login:realm:password"))`,
//! both digests lower-case hex.

use md5::Md5;
use serde::Serialize;
use sha2::{Digest, Sha256};

pub const REALM_HEADER: &str = "X-NDM-Realm";
pub const CHALLENGE_HEADER: &str = "X-NDM-Challenge";

#[derive(Debug, Serialize)]
pub struct AuthRequest<'a> {
    pub login: &'a str,
    pub password: String,
}

pub fn challenge_answer(login: &str, realm: &str, password: &str, challenge: &str) -> String {
    let credentials = hex::encode(Md5::digest(format!("{}:{}:{}", login, realm, password)));
    hex::encode(Sha256::digest(format!("{}{}", challenge, credentials)))
}
