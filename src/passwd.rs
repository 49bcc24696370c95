//! SHA-512 crypt, the `$6$` scheme the `passwd`/`chpasswd` modules consume
//!
//! Implements the glibc crypt(3) construction with the default 5000 rounds,
//! no `rounds=` parameter support. The rest of the crate treats the produced
//! hash as an opaque string, only the `$6$` prefix is ever inspected again.

use rand::Rng;
use sha2::{Digest, Sha512};

/// Alphabet shared by the hash encoding and valid salt characters
const CRYPT_ALPHABET: &[u8; 64] =
    b"./0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

const ROUNDS: usize = 5000;
const SALT_MAX: usize = 16;

/// Prefix every hash carries, doubles as the best-effort "already hashed" check
pub const SHA512_PREFIX: &str = "$6$";

/// Heuristic used when classifying an imported password as hashed or plain
///
/// May misclassify a plain text password that happens to start with `$6$`,
/// known limitation, not corrected by validation
pub fn looks_hashed(password: &str) -> bool {
    password.starts_with(SHA512_PREFIX)
}

/// Random salt from the crypt alphabet, capped at the scheme maximum
pub fn generate_salt(len: usize) -> String {
    let mut rng = rand::rng();

    (0..len.min(SALT_MAX))
        .map(|_| CRYPT_ALPHABET[rng.random_range(0..CRYPT_ALPHABET.len())] as char)
        .collect()
}

/// Hash `password` with the given salt
///
/// The salt may be passed with its `$6$` prefix, it is stripped, truncated at
/// the first `$` and capped at 16 characters like crypt(3) does
pub fn sha512_crypt(password: &str, salt: &str) -> String {
    let salt: String = salt
        .strip_prefix(SHA512_PREFIX)
        .unwrap_or(salt)
        .chars()
        .take_while(|x| *x != '$')
        .take(SALT_MAX)
        .collect();

    let pw = password.as_bytes();
    let sb = salt.as_bytes();

    // digest B, password + salt + password
    let digest_b = Sha512::new()
        .chain_update(pw)
        .chain_update(sb)
        .chain_update(pw)
        .finalize();

    // digest A, password + salt + B material keyed by the password length
    let mut a = Sha512::new();
    a.update(pw);
    a.update(sb);

    let mut cnt = pw.len();
    while cnt > 64 {
        a.update(digest_b);
        cnt -= 64;
    }
    a.update(&digest_b[..cnt]);

    let mut bits = pw.len();
    while bits > 0 {
        if bits & 1 == 1 {
            a.update(digest_b);
        } else {
            a.update(pw);
        }
        bits >>= 1;
    }
    let digest_a = a.finalize();

    // sequence P from the password
    let mut dp = Sha512::new();
    for _ in 0..pw.len() {
        dp.update(pw);
    }
    let p = repeat_to(&dp.finalize(), pw.len());

    // sequence S from the salt, length keyed on the first byte of A
    let mut ds = Sha512::new();
    for _ in 0..16 + digest_a[0] as usize {
        ds.update(sb);
    }
    let s = repeat_to(&ds.finalize(), sb.len());

    // stretching rounds
    let mut c = [0u8; 64];
    c.copy_from_slice(&digest_a);
    for round in 0..ROUNDS {
        let mut h = Sha512::new();

        if round & 1 == 1 {
            h.update(&p);
        } else {
            h.update(c);
        }
        if round % 3 != 0 {
            h.update(&s);
        }
        if round % 7 != 0 {
            h.update(&p);
        }
        if round & 1 == 1 {
            h.update(c);
        } else {
            h.update(&p);
        }

        c.copy_from_slice(&h.finalize());
    }

    format!("{SHA512_PREFIX}{salt}${}", encode_digest(&c))
}

fn repeat_to(block: &[u8], len: usize) -> Vec<u8> {
    block.iter().cycle().take(len).copied().collect()
}

/// The byte triplet order is fixed by the scheme, not sequential
fn encode_digest(c: &[u8; 64]) -> String {
    const ORDER: [(usize, usize, usize); 21] = [
        (0, 21, 42),
        (22, 43, 1),
        (44, 2, 23),
        (3, 24, 45),
        (25, 46, 4),
        (47, 5, 26),
        (6, 27, 48),
        (28, 49, 7),
        (50, 8, 29),
        (9, 30, 51),
        (31, 52, 10),
        (53, 11, 32),
        (12, 33, 54),
        (34, 55, 13),
        (56, 14, 35),
        (15, 36, 57),
        (37, 58, 16),
        (59, 17, 38),
        (18, 39, 60),
        (40, 61, 19),
        (62, 20, 41),
    ];

    let mut out = String::with_capacity(86);
    for &(b2, b1, b0) in &ORDER {
        b64_from_24bit(c[b2], c[b1], c[b0], 4, &mut out);
    }
    b64_from_24bit(0, 0, c[63], 2, &mut out);

    out
}

fn b64_from_24bit(b2: u8, b1: u8, b0: u8, n: usize, out: &mut String) {
    let mut w = (u32::from(b2) << 16) | (u32::from(b1) << 8) | u32::from(b0);
    for _ in 0..n {
        out.push(CRYPT_ALPHABET[(w & 0x3f) as usize] as char);
        w >>= 6;
    }
}
