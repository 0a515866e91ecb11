//! Known-answer tests for every variant on every available tier.

use argon2::{Argon2, BlamkaKernel, Error, Params, PasswordHasher, Variant};
use cpu::{Avx2, Kernel, Portable, Sse2, Sse41, Ssse3};
use test_support::{
    ARGON2_VECTORS, AlignedBytes, GENKAT_AAD, GENKAT_PASSWORD, GENKAT_SALT, GENKAT_SECRET, from_hex, to_hex,
};

fn genkat_engine<K: BlamkaKernel>(kernel: K, variant: Variant, t: u32, m: u32, p: u32) -> Argon2<K> {
    let params = Params::new(variant, t, m, p)
        .unwrap()
        .with_secret(&GENKAT_SECRET)
        .unwrap();
    Argon2::new(kernel, params)
}

fn check_tier<K: BlamkaKernel>() {
    let Some(kernel) = K::detect() else {
        eprintln!("skipping {}: not supported on this CPU", K::TIER);
        return;
    };

    for vector in ARGON2_VECTORS {
        let variant: Variant = vector.variant.parse().unwrap();
        let engine = genkat_engine(kernel, variant, vector.time_cost, vector.memory_cost, vector.lanes);

        let mut tag = [0u8; 32];
        engine.hash(&GENKAT_PASSWORD, &GENKAT_SALT, &GENKAT_AAD, &mut tag).unwrap();
        assert_eq!(
            to_hex(&tag),
            vector.tag,
            "{} {variant} t={} m={} p={}",
            K::TIER,
            vector.time_cost,
            vector.memory_cost,
            vector.lanes
        );

        let expected = from_hex(vector.tag);
        assert!(engine.verify(&GENKAT_PASSWORD, &GENKAT_SALT, &expected, &GENKAT_AAD).unwrap());
    }
}

#[test]
fn portable_vectors() {
    check_tier::<Portable>();
}

#[test]
fn sse2_vectors() {
    check_tier::<Sse2>();
}

#[test]
fn ssse3_vectors() {
    check_tier::<Ssse3>();
}

#[test]
fn sse41_vectors() {
    check_tier::<Sse41>();
}

#[test]
fn avx2_vectors() {
    check_tier::<Avx2>();
}

#[test]
fn password_somesalt_vectors() {
    let expected = [
        (Variant::Argon2d, "2e2e5e05fe57ac2cf472ecd045ef687e562a980fd50339b389c870e1962bbc45"),
        (Variant::Argon2i, "95466cc4f92f874954617eec0aa1195d22980abd625e5cac44763ae3a9cb6ab7"),
        (Variant::Argon2id, "c8e9aedc956f6a7dff0a4d42940df628623f328ea1235005abac933c57093e23"),
    ];
    for (variant, tag) in expected {
        let engine = Argon2::new(Portable, Params::new(variant, 1, 1024, 1).unwrap());
        let mut out = [0u8; 32];
        engine.hash(b"password", b"somesalt", &[], &mut out).unwrap();
        assert_eq!(to_hex(&out), tag, "{variant}");
    }
}

#[test]
fn extra_pass_changes_the_tag() {
    for variant in Variant::ALL {
        let mut one = [0u8; 32];
        let mut two = [0u8; 32];
        genkat_engine(Portable, variant, 1, 32, 1)
            .hash(&GENKAT_PASSWORD, &GENKAT_SALT, &GENKAT_AAD, &mut one)
            .unwrap();
        genkat_engine(Portable, variant, 2, 32, 1)
            .hash(&GENKAT_PASSWORD, &GENKAT_SALT, &GENKAT_AAD, &mut two)
            .unwrap();
        assert_ne!(one, two, "{variant}");
    }
}

#[test]
fn verify_rejects_any_single_flipped_byte() {
    let engine = genkat_engine(Portable, Variant::Argon2id, 1, 32, 1);
    let good = from_hex(ARGON2_VECTORS[2].tag);
    for position in [0, 15, 31] {
        let mut bad = good.clone();
        bad[position] ^= 0x80;
        assert!(!engine.verify(&GENKAT_PASSWORD, &GENKAT_SALT, &bad, &GENKAT_AAD).unwrap());
    }
}

#[test]
fn long_tags_use_the_chained_digest() {
    let engine = Argon2::new(Portable, Params::new(Variant::Argon2id, 1, 32, 1).unwrap());
    let mut short = [0u8; 64];
    let mut long = [0u8; 100];
    engine.hash(b"password", b"somesalt", &[], &mut short).unwrap();
    engine.hash(b"password", b"somesalt", &[], &mut long).unwrap();
    // The tag length is part of H0, so the prefixes differ.
    assert_ne!(short[..], long[..64]);
    assert_eq!(
        to_hex(&long),
        "25a61afdcc32bf7bccc6b666d9c8b601a74aface2447324c78b4c63a33e5a8eecefeffae48ceb4a9194d52557b76c38b\
         9bc2fb206e05f326baaf3bb25fce1be3616bbcc0b45061889a7cd78e2bbcf2621a586f0a63ff13b31b3e36732a87a539645f8db2"
    );
    assert!(engine.verify(b"password", b"somesalt", &long, &[]).unwrap());
}

const GENKAT_ID_100: &str = "adffd558499dbde5cb7dae49b14116f17dd2187b1f68baac5c5831dcc3fe095d6c5e0fc6463e71a43d5eea58fc7e51\
                             5e7745e1486914c4af524775779891fc0c6c657e618fdfa0ec5a3b271c5d67d3d3825f119492ac3d99d25b63805006d47c939dcb2d";

fn check_hundred_byte_tag<K: BlamkaKernel>() {
    let Some(kernel) = K::detect() else {
        eprintln!("skipping {}: not supported on this CPU", K::TIER);
        return;
    };
    let mut tag = [0u8; 100];
    genkat_engine(kernel, Variant::Argon2id, 1, 32, 1)
        .hash(&GENKAT_PASSWORD, &GENKAT_SALT, &GENKAT_AAD, &mut tag)
        .unwrap();
    assert_eq!(to_hex(&tag), GENKAT_ID_100, "{}", K::TIER);
}

#[test]
fn hundred_byte_tag_on_every_tier() {
    check_hundred_byte_tag::<Portable>();
    check_hundred_byte_tag::<Sse2>();
    check_hundred_byte_tag::<Ssse3>();
    check_hundred_byte_tag::<Sse41>();
    check_hundred_byte_tag::<Avx2>();
}

#[test]
fn memory_size_boundaries() {
    let engine = genkat_engine(Portable, Variant::Argon2d, 1, 32, 1);
    let size = engine.memory_size();
    assert_eq!(size, 32 * 1024);

    let mut exact = AlignedBytes::zeroed(size);
    let mut tag = [0u8; 32];
    engine
        .hash_with_memory(exact.as_mut_bytes(), &GENKAT_PASSWORD, &GENKAT_SALT, &GENKAT_AAD, &mut tag)
        .unwrap();
    assert_eq!(to_hex(&tag), ARGON2_VECTORS[0].tag);
    assert!(
        engine
            .verify_with_memory(exact.as_mut_bytes(), &GENKAT_PASSWORD, &GENKAT_SALT, &tag, &GENKAT_AAD)
            .unwrap()
    );

    let mut short = AlignedBytes::zeroed(size - 1);
    let err = engine
        .hash_with_memory(short.as_mut_bytes(), &GENKAT_PASSWORD, &GENKAT_SALT, &GENKAT_AAD, &mut tag)
        .unwrap_err();
    assert_eq!(
        err,
        Error::InsufficientMemory {
            required: size,
            provided: size - 1
        }
    );

    let mut shifted = AlignedBytes::zeroed(size + 8);
    let err = engine
        .hash_with_memory(
            &mut shifted.as_mut_bytes()[4..],
            &GENKAT_PASSWORD,
            &GENKAT_SALT,
            &GENKAT_AAD,
            &mut tag,
        )
        .unwrap_err();
    assert_eq!(err, Error::MisalignedMemory);
}

#[test]
fn memory_size_is_independent_of_inputs_and_time_cost() {
    let a = genkat_engine(Portable, Variant::Argon2i, 1, 100, 4);
    let b = genkat_engine(Portable, Variant::Argon2d, 7, 100, 4);
    assert_eq!(a.memory_size(), b.memory_size());
    assert_eq!(a.memory_size(), 96 * 1024);
}

#[test]
fn trait_objects_hash_like_engines() {
    let hasher: Box<dyn PasswordHasher> = Box::new(genkat_engine(Portable, Variant::Argon2i, 2, 64, 4));
    let mut tag = [0u8; 32];
    hasher.hash(&GENKAT_PASSWORD, &GENKAT_SALT, &GENKAT_AAD, &mut tag).unwrap();
    assert_eq!(to_hex(&tag), ARGON2_VECTORS[7].tag);
    assert_eq!(hasher.variant(), Variant::Argon2i);
}

#[test]
fn best_tier_matches_portable_for_odd_memory_costs() {
    let Some(kernel) = Avx2::detect() else {
        eprintln!("skipping: AVX2 not supported on this CPU");
        return;
    };
    for memory_cost in [8, 37, 129] {
        for lanes in [1, 2, 4] {
            let mut expected = [0u8; 16];
            let mut actual = [0u8; 16];
            genkat_engine(Portable, Variant::Argon2id, 2, memory_cost, lanes)
                .hash(b"pw", b"salt", &[], &mut expected)
                .unwrap();
            genkat_engine(kernel, Variant::Argon2id, 2, memory_cost, lanes)
                .hash(b"pw", b"salt", &[], &mut actual)
                .unwrap();
            assert_eq!(actual, expected, "m={memory_cost} p={lanes}");
        }
    }
}
