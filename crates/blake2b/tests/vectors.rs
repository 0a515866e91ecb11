//! Known-answer and streaming tests for every compression tier.

use blake2b::{Avx2, Blake2b, Blake2bKernel, Error, Kernel, Portable, Sse2, Sse41, Ssse3, digest_into};
use proptest::prelude::*;
use test_support::{RFC7693_SELFTEST_DIGEST, hex_array, rfc7693_sequence, to_hex};

const ABC_512: &str = "ba80a53f981c4d0d6a2797b69f12f6e94c212f14685ac4b74b12bb6fdbffa2d17d87c5392aab792dc252d5de4533cc9518d38aa8dbf1925ab92386edd4009923";
const EMPTY_512: &str = "786a02f742015903c6c6fd852552d272912f4740e15847618a86e217f71f5419d25e1031afee585313896444934eb04b903a685b1448b755d56f701afe9be2ce";
const KEYED_EMPTY_512: &str = "10ebb67700b1868efb4417987acf4690ae9d972fb7a590c2f02871799aaa4786b5e996e8f0f4eb981fc214b005f42d2ff4233499391653df7aefcbc13fc51568";

fn digest<K: Blake2bKernel>(kernel: K, len: usize, key: &[u8], input: &[u8]) -> Vec<u8> {
    let mut out = vec![0u8; len];
    digest_into(kernel, key, input, &mut out).unwrap();
    out
}

fn hex_digest<K: Blake2bKernel>(kernel: K, len: usize, key: &[u8], input: &[u8]) -> String {
    to_hex(&digest(kernel, len, key, input))
}

fn rfc7693_selftest<K: Blake2bKernel>(kernel: K) -> String {
    let mut transcript = Blake2b::new(kernel, 32).unwrap();
    for outlen in [20usize, 32, 48, 64] {
        for inlen in [0usize, 3, 128, 129, 255, 1024] {
            let input = rfc7693_sequence(inlen, inlen as u32);
            let mut md = vec![0u8; outlen];

            digest_into(kernel, &[], &input, &mut md).unwrap();
            transcript.update(&md).unwrap();

            let key = rfc7693_sequence(outlen, outlen as u32);
            digest_into(kernel, &key, &input, &mut md).unwrap();
            transcript.update(&md).unwrap();
        }
    }
    to_hex(&transcript.finalize_vec().unwrap())
}

fn check_tier<K: Blake2bKernel>() {
    let Some(kernel) = K::detect() else {
        eprintln!("skipping {}: not supported on this CPU", K::TIER);
        return;
    };

    assert_eq!(digest(kernel, 64, &[], b"abc"), hex_array::<64>(ABC_512), "{}", K::TIER);
    assert_eq!(digest(kernel, 64, &[], b""), hex_array::<64>(EMPTY_512), "{}", K::TIER);
    let key: Vec<u8> = (0u8..64).collect();
    assert_eq!(digest(kernel, 64, &key, b""), hex_array::<64>(KEYED_EMPTY_512), "{}", K::TIER);
    assert_eq!(rfc7693_selftest(kernel), RFC7693_SELFTEST_DIGEST, "{}", K::TIER);
}

#[test]
fn portable_known_answers() {
    check_tier::<Portable>();
}

#[test]
fn sse2_known_answers() {
    check_tier::<Sse2>();
}

#[test]
fn ssse3_known_answers() {
    check_tier::<Ssse3>();
}

#[test]
fn sse41_known_answers() {
    check_tier::<Sse41>();
}

#[test]
fn avx2_known_answers() {
    check_tier::<Avx2>();
}

#[test]
fn truncated_digest_of_abc() {
    assert_eq!(digest(Portable, 16, &[], b"abc"), hex_array::<16>("cf4ab791c62b8d2b2109c90275287816"));
}

#[test]
fn finalize_twice_is_an_error() {
    let mut state = Blake2b::new(Portable, 64).unwrap();
    state.update(b"abc").unwrap();
    assert_eq!(state.finalize_vec().unwrap(), hex_array::<64>(ABC_512));
    assert_eq!(state.finalize_vec(), Err(Error::AlreadyFinalized));
}

#[test]
fn expected_digests_are_full_width() {
    for hex in [ABC_512, EMPTY_512, KEYED_EMPTY_512] {
        assert_eq!(hex_array::<64>(hex).len() * 2, hex.len());
    }
}

#[test]
fn update_after_finalize_is_an_error() {
    let mut state = Blake2b::new(Portable, 64).unwrap();
    state.finalize_vec().unwrap();
    assert_eq!(state.update(b"more"), Err(Error::AlreadyFinalized));
}

proptest! {
    #[test]
    fn chunking_does_not_change_the_digest(
        data in proptest::collection::vec(any::<u8>(), 0..1024),
        cuts in proptest::collection::vec(0usize..1024, 0..8),
    ) {
        let mut whole = Blake2b::new(Portable, 64).unwrap();
        whole.update(&data).unwrap();
        let expected = whole.finalize_vec().unwrap();

        let mut offsets: Vec<usize> = cuts.into_iter().map(|c| c.min(data.len())).collect();
        offsets.sort_unstable();
        let mut chunked = Blake2b::new(Portable, 64).unwrap();
        let mut start = 0;
        for end in offsets.into_iter().chain(std::iter::once(data.len())) {
            chunked.update(&data[start..end]).unwrap();
            start = end;
        }
        prop_assert_eq!(chunked.finalize_vec().unwrap(), expected);
    }

    #[test]
    fn best_tier_matches_portable(data in proptest::collection::vec(any::<u8>(), 0..600), len in 1usize..=64) {
        let expected = hex_digest(Portable, len, &[], &data);
        if let Some(kernel) = Avx2::detect() {
            prop_assert_eq!(hex_digest(kernel, len, &[], &data), expected.clone());
        }
        if let Some(kernel) = Sse2::detect() {
            prop_assert_eq!(hex_digest(kernel, len, &[], &data), expected);
        }
    }
}
