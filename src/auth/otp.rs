use rand::Rng;
use rand::distributions::Alphanumeric;

pub const OTP_LEN: usize = 6;

/// Random code over `[A-Za-z0-9]` from the thread-local CSPRNG.
pub fn generate_otp() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(OTP_LEN)
        .map(char::from)
        .collect()
}
