//! Counted collections and alignment padding.
//!
//! Two independent termination conventions exist on the wire and are kept
//! deliberately separate here (collapsing them would break byte
//! compatibility):
//!
//! 1. **Element count** -- the declaring descriptor reads an integer count
//!    (its width is a property of that field: 1, 2, 4 or 8 bytes) and then
//!    calls [`read_counted`] with it.
//! 2. **Byte budget** -- the collection fills a region whose byte length is
//!    already known; [`read_byte_budget`] consumes exactly that many bytes,
//!    subtracting `element + padding` after each element and stopping at
//!    zero, never at an element counter.
//!
//! Elements embedded in another container may be padded to an alignment
//! boundary. Padding is skipped on read and emitted as zeros on write; the
//! two sides are exact mirrors, so a decode-then-encode round trip
//! reproduces the original bytes including the padding.

use super::error::CodecError;
use super::reader::ByteReader;
use super::writer::ByteWriter;
use super::Entity;

/// Number of pad bytes that bring `size` up to `alignment`.
///
/// `alignment == 0` means "no padding". Otherwise the result is
/// `(alignment - size % alignment) % alignment`, i.e. zero when already
/// aligned.
pub fn padding(size: usize, alignment: usize) -> usize {
    if alignment == 0 {
        0
    } else {
        (alignment - size % alignment) % alignment
    }
}

/// Serialized size of `items` written with [`write_collection`], padding
/// included.
pub fn collection_size<T: Entity>(items: &[T], alignment: usize) -> usize {
    items
        .iter()
        .map(|item| {
            let size = item.size();
            size + padding(size, alignment)
        })
        .sum()
}

/// Writes each element followed by its zero padding.
pub fn write_collection<T: Entity>(w: &mut ByteWriter, items: &[T], alignment: usize) {
    for item in items {
        item.write(w);
        w.write_zeros(padding(item.size(), alignment));
    }
}

/// Reads exactly `count` elements, skipping each element's padding.
///
/// The element size used for the padding computation is measured from the
/// reader's position delta, so variable-length elements align correctly.
pub fn read_counted<T>(
    r: &mut ByteReader<'_>,
    count: usize,
    alignment: usize,
    mut parse: impl FnMut(&mut ByteReader<'_>) -> Result<T, CodecError>,
) -> Result<Vec<T>, CodecError> {
    let mut items = Vec::with_capacity(count);
    for _ in 0..count {
        let start = r.position();
        let item = parse(r)?;
        let consumed = r.position() - start;
        r.skip(padding(consumed, alignment))?;
        items.push(item);
    }
    Ok(items)
}

/// Reads elements until exactly `byte_len` bytes have been consumed.
///
/// The budgeted region is sliced off the parent reader first, so an element
/// that overruns its budget fails with [`CodecError::Truncated`] instead of
/// silently eating the bytes of whatever follows the collection.
pub fn read_byte_budget<T>(
    r: &mut ByteReader<'_>,
    byte_len: usize,
    alignment: usize,
    mut parse: impl FnMut(&mut ByteReader<'_>) -> Result<T, CodecError>,
) -> Result<Vec<T>, CodecError> {
    let region = r.read_bytes(byte_len)?;
    let mut sub = ByteReader::new(region);
    let mut items = Vec::new();
    while !sub.at_end() {
        let start = sub.position();
        let item = parse(&mut sub)?;
        let consumed = sub.position() - start;
        // Every element carries its padding, the last one included; the
        // budget accounts for it, so a short region is simply truncated.
        sub.skip(padding(consumed, alignment))?;
        items.push(item);
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal variable-width element for exercising the helpers.
    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Blob(Vec<u8>);

    impl Entity for Blob {
        fn size(&self) -> usize {
            1 + self.0.len()
        }

        fn write(&self, w: &mut ByteWriter) {
            w.write_u8(self.0.len() as u8);
            w.write_bytes(&self.0);
        }
    }

    fn parse_blob(r: &mut ByteReader<'_>) -> Result<Blob, CodecError> {
        let len = r.read_u8()? as usize;
        Ok(Blob(r.read_bytes(len)?.to_vec()))
    }

    #[test]
    fn padding_formula() {
        assert_eq!(padding(0, 8), 0);
        assert_eq!(padding(1, 8), 7);
        assert_eq!(padding(8, 8), 0);
        assert_eq!(padding(9, 8), 7);
        assert_eq!(padding(13, 8), 3);
        // Alignment zero disables padding entirely.
        for size in 0..64 {
            assert_eq!(padding(size, 0), 0);
        }
    }

    #[test]
    fn padding_symmetry_for_element_sizes_1_through_64() {
        // Spec property: write then read with the same alignment must
        // reproduce the elements and leave the cursor at the same offset.
        for alignment in [0usize, 8] {
            for payload_len in 0..=63usize {
                let items = vec![Blob(vec![0xAB; payload_len]), Blob(vec![0xCD; 3])];
                let mut w = ByteWriter::new();
                write_collection(&mut w, &items, alignment);
                let bytes = w.into_bytes();
                assert_eq!(bytes.len(), collection_size(&items, alignment));

                let mut r = ByteReader::new(&bytes);
                let back = read_counted(&mut r, items.len(), alignment, parse_blob).unwrap();
                assert_eq!(back, items);
                assert!(r.at_end(), "cursor must land exactly at the end");
            }
        }
    }

    #[test]
    fn padding_bytes_are_zero_on_the_wire() {
        let items = vec![Blob(vec![0xFF; 2])]; // element size 3, pad 5
        let mut w = ByteWriter::new();
        write_collection(&mut w, &items, 8);
        let bytes = w.into_bytes();
        assert_eq!(bytes.len(), 8);
        assert!(bytes[3..].iter().all(|&b| b == 0));
    }

    #[test]
    fn byte_budget_stops_at_zero_not_at_a_count() {
        let items = vec![Blob(vec![1, 2, 3]), Blob(vec![]), Blob(vec![9; 10])];
        let mut w = ByteWriter::new();
        write_collection(&mut w, &items, 8);
        let body = w.into_bytes();

        // Append trailing bytes that belong to the *next* field; the budget
        // must protect them.
        let mut full = body.clone();
        full.extend_from_slice(&[0xEE; 4]);

        let mut r = ByteReader::new(&full);
        let back = read_byte_budget(&mut r, body.len(), 8, parse_blob).unwrap();
        assert_eq!(back, items);
        assert_eq!(r.remaining(), 4);
        assert_eq!(r.read_bytes(4).unwrap(), &[0xEE; 4]);
    }

    #[test]
    fn byte_budget_rejects_overrunning_element() {
        // Element claims 200 bytes of payload but the budget holds 4.
        let bytes = [200u8, 1, 2, 3];
        let mut r = ByteReader::new(&bytes);
        let err = read_byte_budget(&mut r, bytes.len(), 0, parse_blob).unwrap_err();
        assert!(matches!(err, CodecError::Truncated { .. }));
    }

    #[test]
    fn count_read_at_eight_byte_width() {
        // The count's width belongs to the declaring context; here it is a
        // u64 prefix, the widest convention on the wire.
        let items = vec![Blob(vec![7; 5]), Blob(vec![8; 2])];
        let mut w = ByteWriter::new();
        w.write_u64(items.len() as u64);
        write_collection(&mut w, &items, 0);
        let bytes = w.into_bytes();

        let mut r = ByteReader::new(&bytes);
        let count = r.read_u64().unwrap() as usize;
        let back = read_counted(&mut r, count, 0, parse_blob).unwrap();
        assert_eq!(back, items);
        assert!(r.at_end());
    }

    #[test]
    fn truncated_collection_propagates() {
        let items = vec![Blob(vec![1; 4])];
        let mut w = ByteWriter::new();
        write_collection(&mut w, &items, 0);
        let mut bytes = w.into_bytes();
        bytes.truncate(bytes.len() - 1);

        let mut r = ByteReader::new(&bytes);
        let err = read_counted(&mut r, 1, 0, parse_blob).unwrap_err();
        assert!(matches!(err, CodecError::Truncated { .. }));
    }
}
