use crate::error::HotelError;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Hash `password` with bcrypt on the blocking pool.
pub async fn hash_password(password: String, cost: u32) -> Result<String, HotelError> {
    let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
    Ok(hashed)
}

/// Check `candidate` against a stored bcrypt hash.
///
/// A malformed stored hash counts as a mismatch rather than an error.
pub async fn verify_password(candidate: String, hash: String) -> Result<bool, HotelError> {
    let ok = tokio::task::spawn_blocking(move || bcrypt::verify(candidate, &hash).unwrap_or(false))
        .await?;
    Ok(ok)
}

pub fn is_long_enough(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
}
