use rand::Rng;

/// Generate a driver code of the form `DRV-XXXXXX`.
/// Uniqueness is enforced by the database; a collision surfaces as a
/// conflict the caller can retry.
pub fn generate_driver_code() -> String {
    const CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
    let mut rng = rand::rng();
    let suffix: String = (0..6)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect();
    format!("DRV-{suffix}")
}
