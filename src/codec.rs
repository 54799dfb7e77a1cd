//! Line-based text transport for shares.
//!
//! Each share is written as one line of lowercase hex. Blank lines and
//! surrounding whitespace are ignored when reading, so share files can be
//! concatenated or hand-edited.

use crate::error::{Error, Result};

/// Encodes each share on its own newline-terminated line.
pub fn encode_shares<B: AsRef<[u8]>>(shares: &[B]) -> String {
    shares
        .iter()
        .map(|share| hex::encode(share) + "\n")
        .collect()
}

/// Decodes shares written by [`encode_shares`].
pub fn decode_shares(text: &str) -> Result<Vec<Vec<u8>>> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| hex::decode(line).map_err(Error::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sss::{combine, split};

    #[test]
    fn test_encode_one_share_per_line() {
        let text = encode_shares(&[vec![0x00, 0xff], vec![0x12, 0x34, 0x56]]);
        assert_eq!(text, "00ff\n123456\n");
    }

    #[test]
    fn test_decode_skips_blank_lines_and_whitespace() {
        let shares = decode_shares("\n  00ff \r\n\n123456\n\n").unwrap();
        assert_eq!(shares, vec![vec![0x00, 0xff], vec![0x12, 0x34, 0x56]]);
        assert!(decode_shares("").unwrap().is_empty());
    }

    #[test]
    fn test_decode_rejects_bad_hex() {
        assert!(matches!(decode_shares("zz\n"), Err(Error::Encoding(_))));
        assert!(matches!(decode_shares("abc\n"), Err(Error::Encoding(_))));
    }

    #[test]
    fn test_decode_rejects_base64_shares() {
        assert!(matches!(
            decode_shares("aGVsbG8gd29ybGQh\n"),
            Err(Error::Encoding(_))
        ));
    }

    #[test]
    fn test_split_through_text_and_back() {
        let secret = b"through the pipe";
        let text = encode_shares(&split(secret, 5, 3).unwrap());
        assert_eq!(text.lines().count(), 5);

        let lines: Vec<&str> = text.lines().collect();
        let subset = format!("{}\n{}\n{}\n", lines[4], lines[0], lines[2]);
        let recovered = combine(&decode_shares(&subset).unwrap()).unwrap();
        assert_eq!(recovered, secret);
    }
}
