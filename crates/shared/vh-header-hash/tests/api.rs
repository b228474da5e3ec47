use rand_chacha::ChaCha8Rng;
use rand_core::{RngCore, SeedableRng};
use std::thread;
use vh_core_primitives::block::BlockHash;
use vh_core_primitives::block::header::BlockHeader;
use vh_core_primitives::hashes::Hash256;
use vh_core_primitives::solutions::{SolutionDescriptor, SolutionVersion};
use vh_header_hash::api::{
    hash_header_canonical, hash_v1, hash_v2, hash_v2b, hash_v2b1, hash_v2b2, hash_v2b2_raw,
    try_hash_header_canonical,
};
use vh_header_hash::init::{config, initialize, is_initialized, reference_primitives};
use vh_header_hash::primitives::HashPrimitives;

fn random_hash(rng: &mut ChaCha8Rng) -> Hash256 {
    let mut hash = [0; Hash256::SIZE];
    rng.fill_bytes(&mut hash);
    Hash256::new(hash)
}

fn random_header(rng: &mut ChaCha8Rng, solution_version: SolutionVersion) -> BlockHeader {
    let mut solution = Vec::new();
    SolutionDescriptor {
        version: solution_version,
        ..SolutionDescriptor::default()
    }
    .encode_into(&mut solution);
    let descriptor_size = solution.len();
    solution.resize(1344, 0);
    rng.fill_bytes(&mut solution[descriptor_size..]);

    BlockHeader {
        version: BlockHeader::VERSION_V2,
        prev_block_hash: BlockHash::new(random_hash(rng)),
        merkle_root: random_hash(rng),
        final_sapling_root: random_hash(rng),
        timestamp: rng.next_u32(),
        bits: rng.next_u32(),
        nonce: random_hash(rng),
        solution,
    }
}

#[test]
fn sha256d_test_vectors() {
    let primitives = reference_primitives();

    assert_eq!(
        primitives.sha256d(b""),
        "5df6e0e2761359d30a8275058e299fcc0381534545f55cf43e41983f5d4c9456"
            .parse::<Hash256>()
            .unwrap()
    );
    assert_eq!(
        primitives.sha256d(b"abc"),
        "4f8b42c22dd3729b519ba6f68d2da7cc5b2d606d05daed5ad5128cc03e6c6358"
            .parse::<Hash256>()
            .unwrap()
    );
}

#[test]
fn raw_hash_functions_are_independent() {
    let data = b"The quick brown fox jumps over the lazy dog";
    let hashes = [
        hash_v1(data),
        hash_v2(data),
        hash_v2b(data),
        hash_v2b1(data),
        hash_v2b2_raw(data),
        reference_primitives().sha256d(data),
    ];

    for (index, hash) in hashes.iter().enumerate() {
        assert!(!hash.is_zero());
        for other in &hashes[index + 1..] {
            assert_ne!(hash, other);
        }
    }

    assert_eq!(hash_v2b2_raw(data), hash_v2b2_raw(data));
    assert_ne!(hash_v2b2_raw(data), hash_v2b2_raw(b""));
}

#[test]
fn implicit_initialization() {
    hash_v1(&[]);

    assert!(is_initialized());
    assert_eq!(config(), Some(Default::default()));
}

#[test]
#[cfg_attr(miri, ignore)]
fn concurrent_initialization() {
    let handles = (0..8)
        .map(|_| thread::spawn(initialize))
        .collect::<Vec<_>>();

    for handle in handles {
        handle.join().unwrap().unwrap();
    }
    assert!(is_initialized());

    initialize().unwrap();
}

#[test]
fn header_hash_is_deterministic() {
    let mut rng = ChaCha8Rng::from_seed(Default::default());
    let encoded = random_header(&mut rng, SolutionVersion::V7).encode();

    let hash = hash_header_canonical(&encoded);
    assert!(!hash.is_zero());
    assert_eq!(hash_header_canonical(&encoded), hash);
    assert_eq!(try_hash_header_canonical(&encoded), Ok(hash));
}

#[test]
fn garbage_hashes_to_zero() {
    let mut rng = ChaCha8Rng::from_seed(Default::default());
    let encoded = random_header(&mut rng, SolutionVersion::V7).encode();

    for garbage in [
        &[][..],
        &[0xff; 10][..],
        &encoded[..BlockHeader::FIXED_SIZE - 1],
        &encoded[..BlockHeader::FIXED_SIZE],
        &encoded[..encoded.len() - 1],
    ] {
        assert_eq!(hash_header_canonical(garbage), Hash256::ZERO);
        assert!(try_hash_header_canonical(garbage).is_err());
    }

    // Length prefix claims more than the maximum size
    let mut oversized = encoded[..BlockHeader::FIXED_SIZE].to_vec();
    oversized.extend_from_slice(&[0xff; 9]);
    assert_eq!(hash_header_canonical(&oversized), Hash256::ZERO);
}

#[test]
fn trailing_bytes_are_ignored() {
    let mut rng = ChaCha8Rng::from_seed(Default::default());
    let mut encoded = random_header(&mut rng, SolutionVersion::V7).encode();
    let hash = hash_header_canonical(&encoded);

    encoded.extend_from_slice(&[1, 2, 3]);
    assert_eq!(hash_header_canonical(&encoded), hash);
}

#[test]
fn genesis_hash_ignores_version() {
    let mut rng = ChaCha8Rng::from_seed(Default::default());
    let mut header = random_header(&mut rng, SolutionVersion::V7);
    header.prev_block_hash = BlockHash::NULL;

    header.version = BlockHeader::VERSION_V1;
    let v1_hash = hash_header_canonical(&header.encode());
    assert_eq!(v1_hash, reference_primitives().sha256d(&header.encode()));

    header.version = BlockHeader::VERSION_V2;
    let v2_hash = hash_header_canonical(&header.encode());
    assert_eq!(v2_hash, reference_primitives().sha256d(&header.encode()));

    // Version is part of the hashed data, but never selects the hash function
    assert_ne!(v1_hash, v2_hash);
    assert_ne!(v2_hash, hash_v2b2_raw(&header.encode()));
}

#[test]
fn legacy_header_matches_hash_v1() {
    let mut rng = ChaCha8Rng::from_seed(Default::default());
    let mut header = random_header(&mut rng, SolutionVersion::V7);
    header.version = BlockHeader::VERSION_V1;

    let encoded = header.encode();
    assert_eq!(hash_header_canonical(&encoded), hash_v1(&encoded));
}

#[test]
fn hash_v2b2_hashes_headers() {
    let mut rng = ChaCha8Rng::from_seed(Default::default());

    let mut legacy = random_header(&mut rng, SolutionVersion::V7);
    legacy.version = BlockHeader::VERSION_V1;
    let encoded = legacy.encode();
    assert_eq!(hash_v2b2(&encoded), hash_header_canonical(&encoded));
    assert_eq!(hash_v2b2(&encoded), hash_v1(&encoded));
    assert_ne!(hash_v2b2(&encoded), hash_v2b2_raw(&encoded));

    let mut genesis = random_header(&mut rng, SolutionVersion::V4);
    genesis.prev_block_hash = BlockHash::NULL;
    let encoded = genesis.encode();
    assert_eq!(hash_v2b2(&encoded), reference_primitives().sha256d(&encoded));

    let encoded = random_header(&mut rng, SolutionVersion::V5_1).encode();
    assert_eq!(hash_v2b2(&encoded), hash_header_canonical(&encoded));

    assert_eq!(hash_v2b2(&[]), Hash256::ZERO);
    assert_eq!(hash_v2b2(&encoded[..100]), Hash256::ZERO);
}

#[test]
fn standalone_header_matches_raw_hash() {
    let mut rng = ChaCha8Rng::from_seed(Default::default());

    let cases: [(SolutionVersion, fn(&[u8]) -> Hash256); 7] = [
        (SolutionVersion::V1, hash_v2b),
        (SolutionVersion::V3, hash_v2b),
        (SolutionVersion::V4, hash_v2b1),
        (SolutionVersion::V5, hash_v2b1),
        (SolutionVersion::V5_1, hash_v2b2_raw),
        (SolutionVersion::V6, hash_v2b2_raw),
        (SolutionVersion::V7, hash_v2b2_raw),
    ];

    for (solution_version, expected_hash) in cases {
        let header = random_header(&mut rng, solution_version);
        assert_eq!(header.descriptor().pbaas_type(), 0);

        let encoded = header.encode();
        assert_eq!(hash_header_canonical(&encoded), expected_hash(&encoded));
    }
}
