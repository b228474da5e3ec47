use super::{CompactSizeError, MAX_SIZE, compact_size_len, read_compact_size, write_compact_size};
use alloc::vec::Vec;

#[test]
fn boundaries() {
    let test_vectors: [(u64, &[u8]); 6] = [
        (0, &[0x00]),
        (0xfc, &[0xfc]),
        (0xfd, &[0xfd, 0xfd, 0x00]),
        (1344, &[0xfd, 0x40, 0x05]),
        (0xffff, &[0xfd, 0xff, 0xff]),
        (0x1_0000, &[0xfe, 0x00, 0x00, 0x01, 0x00]),
    ];

    for (value, encoding) in test_vectors {
        let mut buffer = Vec::new();
        write_compact_size(&mut buffer, value);
        assert_eq!(buffer, encoding, "{value}");
        assert_eq!(compact_size_len(value), encoding.len(), "{value}");

        let (decoded, remainder) = read_compact_size(encoding).unwrap();
        assert_eq!(decoded, value);
        assert!(remainder.is_empty());
    }
}

#[test]
fn remainder_is_returned() {
    let (value, remainder) = read_compact_size(&[0x03, 0xaa, 0xbb, 0xcc, 0xdd]).unwrap();
    assert_eq!(value, 3);
    assert_eq!(remainder, &[0xaa, 0xbb, 0xcc, 0xdd]);
}

#[test]
fn rejects_invalid() {
    assert_eq!(read_compact_size(&[]), Err(CompactSizeError::Truncated));
    assert_eq!(read_compact_size(&[0xfd, 0x01]), Err(CompactSizeError::Truncated));
    assert_eq!(
        read_compact_size(&[0xfe, 0x01, 0x02, 0x03]),
        Err(CompactSizeError::Truncated)
    );

    // Values that fit into a shorter form
    assert_eq!(
        read_compact_size(&[0xfd, 0xfc, 0x00]),
        Err(CompactSizeError::NonCanonical { value: 0xfc })
    );
    assert_eq!(
        read_compact_size(&[0xfe, 0xff, 0xff, 0x00, 0x00]),
        Err(CompactSizeError::NonCanonical { value: 0xffff })
    );
    assert_eq!(
        read_compact_size(&[0xff, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
        Err(CompactSizeError::NonCanonical { value: 1 })
    );

    let mut too_large = Vec::new();
    write_compact_size(&mut too_large, MAX_SIZE + 1);
    assert_eq!(
        read_compact_size(&too_large),
        Err(CompactSizeError::TooLarge { value: MAX_SIZE + 1 })
    );
}
