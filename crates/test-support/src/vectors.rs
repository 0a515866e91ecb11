//! Known-answer vectors.
//!
//! The Argon2 tags come from the reference `genkat` tool and RFC 9106 §5.
//! All of them use the fixed inputs below.

/// Password used by every Argon2 vector: 32 bytes of `0x01`.
pub const GENKAT_PASSWORD: [u8; 32] = [0x01; 32];
/// Salt: 16 bytes of `0x02`.
pub const GENKAT_SALT: [u8; 16] = [0x02; 16];
/// Secret: 8 bytes of `0x03`.
pub const GENKAT_SECRET: [u8; 8] = [0x03; 8];
/// Associated data: 12 bytes of `0x04`.
pub const GENKAT_AAD: [u8; 12] = [0x04; 12];

/// BLAKE2b-256 over the RFC 7693 Appendix E self-test transcript.
pub const RFC7693_SELFTEST_DIGEST: &str =
    "c23a7800d98123bd10f506c61e29da5603d763b8bbad2e737f5e765a7bccd475";

/// One Argon2 known answer.
#[derive(Clone, Copy, Debug)]
pub struct Argon2Vector {
    /// `"Argon2d"`, `"Argon2i"` or `"Argon2id"`.
    pub variant: &'static str,
    /// Passes.
    pub time_cost: u32,
    /// Memory in KiB.
    pub memory_cost: u32,
    /// Lanes.
    pub lanes: u32,
    /// Expected 32-byte tag, hex.
    pub tag: &'static str,
}

macro_rules! vector {
    ($variant:literal, $t:literal, $m:literal, $p:literal, $tag:literal) => {
        Argon2Vector {
            variant: $variant,
            time_cost: $t,
            memory_cost: $m,
            lanes: $p,
            tag: $tag,
        }
    };
}

/// Vectors over the `GENKAT_*` inputs with a 32-byte tag.
pub const ARGON2_VECTORS: &[Argon2Vector] = &[
    vector!("Argon2d", 1, 32, 1, "7ba5a17a72f7e59977f7f23d10e621898c63cebeeddabd15d8c68f53eab21a32"),
    vector!("Argon2i", 1, 32, 1, "874d23fb9f55e2ff66bc190346e701197c9f25d11da45aad0d5d24198aacd2bb"),
    vector!("Argon2id", 1, 32, 1, "99dfcfc28976939da297094434d86fd00c949a0f318c22f0cbb469aaa87218ba"),
    vector!("Argon2d", 2, 32, 1, "59b09462cfdcd2b40abd17810a474a8ec1abb7c18d07537cb964a2593fe9d9c5"),
    vector!("Argon2i", 2, 32, 1, "c10f005ef878c8070e2cc52f577525c971c730eb00644a4e26d06ead7546e044"),
    vector!("Argon2id", 2, 32, 1, "6c00b7a900e5004c24469ec1e7c01a99b2b8f77375d4eca7d8084211d3236b7a"),
    vector!("Argon2d", 2, 64, 4, "8fa27ced2838790fba5c11851cdf9088b21844d7f04c97b2caafe4dc614caeb2"),
    vector!("Argon2i", 2, 64, 4, "611c993cb0b72316bda26c4c2fe82d399c8f1cfd45d958a9b49c6c64aff0790b"),
    vector!("Argon2id", 2, 64, 4, "4f93b5ad78a4a949fbe35596d5a0c2ab6f522d2d29bc9849ca92aaaeba0529d8"),
    vector!("Argon2d", 3, 32, 4, "512b391b6f1162975371d30919734294f868e3be3984f3c1a13a4db9fabe4acb"),
    vector!("Argon2i", 3, 32, 4, "c814d9d1dc7f37aa13f0d77f2494bda1c8de6b016dd388d29952a4c4672b6ce8"),
    vector!("Argon2id", 3, 32, 4, "0d640df58d78766c08c037a34a8b53c9d01ef0452d75b65eb52520e96b01e659"),
];
