//! Authentication: password hashing and stateless bearer tokens.
//!
//! Passwords are stored as Argon2id PHC strings; there is no plaintext
//! comparison anywhere. Tokens are HS256 JWTs signed with the single server
//! secret and carry everything the admin gate needs, so no session state is
//! kept on the server.

pub mod password;
pub mod token;

pub use token::{Claims, TokenService};
