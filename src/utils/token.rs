use rand::{thread_rng, Rng};

pub const ACCESS_CODE_LENGTH: usize = 6;

const ACCESS_CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub fn generate_access_code(length: usize) -> String {
    let mut rng = thread_rng();
    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..ACCESS_CODE_CHARSET.len());
            ACCESS_CODE_CHARSET[idx] as char
        })
        .collect()
}
