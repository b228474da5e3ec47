use super::{BlockHeader, HeaderDecodeError};
use crate::block::BlockHash;
use crate::compact_size::CompactSizeError;
use crate::hashes::Hash256;
use crate::solutions::{PbaasHeaderEntry, SolutionDescriptor, SolutionVersion};
use alloc::vec;
use alloc::vec::Vec;
use rand_chacha::ChaCha8Rng;
use rand_core::{RngCore, SeedableRng};

fn random_hash(rng: &mut ChaCha8Rng) -> Hash256 {
    let mut hash = [0; Hash256::SIZE];
    rng.fill_bytes(&mut hash);
    Hash256::new(hash)
}

fn random_header(rng: &mut ChaCha8Rng, solution: Vec<u8>) -> BlockHeader {
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

fn pbaas_solution(prev_mmr_root: Hash256, block_mmr_root: Hash256) -> Vec<u8> {
    let mut solution = Vec::new();
    SolutionDescriptor {
        version: SolutionVersion::V7,
        descr_bits: 0,
        num_pbaas_headers: 1,
        extra_data_size: 0,
        prev_mmr_root,
        block_mmr_root,
    }
    .encode_into(&mut solution);
    solution.extend_from_slice(&PbaasHeaderEntry::default().to_bytes());
    solution.resize(1344, 0);
    solution
}

#[test]
fn layout() {
    let header = BlockHeader {
        version: BlockHeader::VERSION_V2,
        prev_block_hash: BlockHash::from([1; 32]),
        merkle_root: Hash256::new([2; 32]),
        final_sapling_root: Hash256::new([3; 32]),
        timestamp: 0x0102_0304,
        bits: 0x1d00_ffff,
        nonce: Hash256::new([4; 32]),
        solution: vec![5; 1344],
    };

    let encoded = header.encode();
    assert_eq!(encoded.len(), header.encoded_size());
    assert_eq!(encoded.len(), 140 + 3 + 1344);
    assert_eq!(&encoded[..4], &[0x04, 0x00, 0x01, 0x00]);
    assert_eq!(&encoded[4..36], &[1; 32]);
    assert_eq!(&encoded[36..68], &[2; 32]);
    assert_eq!(&encoded[68..100], &[3; 32]);
    assert_eq!(&encoded[100..104], &[0x04, 0x03, 0x02, 0x01]);
    assert_eq!(&encoded[104..108], &[0xff, 0xff, 0x00, 0x1d]);
    assert_eq!(&encoded[108..140], &[4; 32]);
    assert_eq!(&encoded[140..143], &[0xfd, 0x40, 0x05]);
    assert_eq!(&encoded[143..], &[5; 1344]);

    let (decoded, remainder) = BlockHeader::try_from_bytes(&encoded).unwrap();
    assert_eq!(decoded, header);
    assert!(remainder.is_empty());
}

#[test]
fn trailing_bytes_are_returned() {
    let mut rng = ChaCha8Rng::from_seed(Default::default());
    let header = random_header(&mut rng, vec![9; 17]);

    let mut encoded = header.encode();
    encoded.extend_from_slice(&[0xde, 0xad]);

    let (decoded, remainder) = BlockHeader::try_from_bytes(&encoded).unwrap();
    assert_eq!(decoded, header);
    assert_eq!(remainder, &[0xde, 0xad]);
}

#[test]
fn decode_errors() {
    let mut rng = ChaCha8Rng::from_seed(Default::default());
    let header = random_header(&mut rng, vec![7; 300]);
    let encoded = header.encode();

    assert_eq!(
        BlockHeader::try_from_bytes(&[]),
        Err(HeaderDecodeError::TruncatedFixedFields {
            expected: BlockHeader::FIXED_SIZE,
            actual: 0,
        })
    );
    assert_eq!(
        BlockHeader::try_from_bytes(&encoded[..BlockHeader::FIXED_SIZE - 1]),
        Err(HeaderDecodeError::TruncatedFixedFields {
            expected: BlockHeader::FIXED_SIZE,
            actual: BlockHeader::FIXED_SIZE - 1,
        })
    );
    assert_eq!(
        BlockHeader::try_from_bytes(&encoded[..BlockHeader::FIXED_SIZE]),
        Err(HeaderDecodeError::SolutionLength {
            error: CompactSizeError::Truncated
        })
    );
    assert_eq!(
        BlockHeader::try_from_bytes(&encoded[..encoded.len() - 1]),
        Err(HeaderDecodeError::TruncatedSolution {
            expected: 300,
            actual: 299,
        })
    );

    let mut non_canonical = encoded[..BlockHeader::FIXED_SIZE].to_vec();
    non_canonical.extend_from_slice(&[0xfd, 0x05, 0x00]);
    non_canonical.extend_from_slice(&[0; 5]);
    assert_eq!(
        BlockHeader::try_from_bytes(&non_canonical),
        Err(HeaderDecodeError::SolutionLength {
            error: CompactSizeError::NonCanonical { value: 5 }
        })
    );
}

#[test]
fn genesis_and_version() {
    let mut rng = ChaCha8Rng::from_seed(Default::default());
    let mut header = random_header(&mut rng, Vec::new());
    assert!(!header.is_genesis());
    assert!(header.is_version_v2());

    header.prev_block_hash = BlockHash::NULL;
    header.version = BlockHeader::VERSION_V1;
    assert!(header.is_genesis());
    assert!(!header.is_version_v2());
}

#[test]
fn pre_header_copies_mmr_roots_when_supported() {
    let mut rng = ChaCha8Rng::from_seed(Default::default());
    let prev_mmr_root = random_hash(&mut rng);
    let block_mmr_root = random_hash(&mut rng);
    let header = random_header(&mut rng, pbaas_solution(prev_mmr_root, block_mmr_root));

    let pre_header = header.pre_header();
    assert_eq!(pre_header.prev_block_hash(), &header.prev_block_hash);
    assert_eq!(pre_header.merkle_root(), &header.merkle_root);
    assert_eq!(pre_header.final_sapling_root(), &header.final_sapling_root);
    assert_eq!(pre_header.nonce(), &header.nonce);
    assert_eq!(pre_header.bits(), header.bits);
    assert_eq!(pre_header.prev_mmr_root(), &prev_mmr_root);
    assert_eq!(pre_header.block_mmr_root(), &block_mmr_root);

    let bytes = pre_header.to_bytes();
    assert_eq!(&bytes[..32], header.prev_block_hash.as_bytes());
    assert_eq!(&bytes[128..132], &header.bits.to_le_bytes());
    assert_eq!(&bytes[132..164], prev_mmr_root.as_bytes());
    assert_eq!(&bytes[164..], block_mmr_root.as_bytes());
}

#[test]
fn pre_header_ignores_descriptor_garbage_below_activation() {
    let mut rng = ChaCha8Rng::from_seed(Default::default());
    let mut solution = vec![0; 1344];
    rng.fill_bytes(&mut solution);
    solution[..4].copy_from_slice(&SolutionVersion::V5.as_u32().to_le_bytes());
    let header = random_header(&mut rng, solution);

    let pre_header = header.pre_header();
    assert_eq!(pre_header.prev_mmr_root(), &Hash256::ZERO);
    assert_eq!(pre_header.block_mmr_root(), &Hash256::ZERO);
    assert_eq!(pre_header.merkle_root(), &header.merkle_root);
}

#[test]
fn canonical_projection_only_touches_mmr_roots() {
    let mut rng = ChaCha8Rng::from_seed(Default::default());
    let header = random_header(
        &mut rng,
        pbaas_solution(Hash256::new([0xaa; 32]), Hash256::new([0xbb; 32])),
    );

    let canonical = header.to_canonical();
    let projected = canonical.header();
    assert_eq!(projected.version, header.version);
    assert_eq!(projected.prev_block_hash, header.prev_block_hash);
    assert_eq!(projected.merkle_root, header.merkle_root);
    assert_eq!(projected.final_sapling_root, header.final_sapling_root);
    assert_eq!(projected.timestamp, header.timestamp);
    assert_eq!(projected.bits, header.bits);
    assert_eq!(projected.nonce, header.nonce);
    assert_eq!(projected.solution.len(), header.solution.len());

    let descriptor = projected.descriptor();
    assert_eq!(descriptor.prev_mmr_root, Hash256::ZERO);
    assert_eq!(descriptor.block_mmr_root, Hash256::ZERO);
    assert_eq!(descriptor.pbaas_type(), 1);

    // Headers that only differ in MMR roots have the same canonical encoding
    let mut other = header.clone();
    other.solution = pbaas_solution(Hash256::new([0xcc; 32]), Hash256::new([0xdd; 32]));
    assert_ne!(other.encode(), header.encode());
    assert_eq!(other.to_canonical().encode(), canonical.encode());

    // Original is not modified
    assert_eq!(header.descriptor().prev_mmr_root, Hash256::new([0xaa; 32]));
}
