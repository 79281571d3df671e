use crate::bitcoin::VarInt;

/// The magic text that is prepended to a message before it is signed.
pub const SIGNED_MESSAGE_HEADER: &str = "Bitcoin Signed Message:\n";

/// Given a textual message, returns the byte buffer that is hashed and signed when signing a
/// message.
///
/// The format is the length of the header as a single byte, the header, the length of the
/// message (UTF-8 encoded) as a VarInt, and the message.
pub fn format_message_for_signing(message: &str) -> Vec<u8> {
    let header = SIGNED_MESSAGE_HEADER.as_bytes();
    let body = message.as_bytes();
    let len = VarInt::new(body.len() as u64);
    let mut v = Vec::with_capacity(1 + header.len() + len.size + body.len());
    v.push(header.len() as u8);
    v.extend_from_slice(header);
    v.extend_from_slice(&len.encode());
    v.extend_from_slice(body);
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_message() {
        let v = format_message_for_signing("hello");
        assert_eq!(v.len(), 31);
        assert_eq!(v[0], 24);
        assert_eq!(&v[1..25], b"Bitcoin Signed Message:\n");
        assert_eq!(v[25], 5);
        assert_eq!(&v[26..], b"hello");
    }

    #[test]
    fn empty_message() {
        let v = format_message_for_signing("");
        assert_eq!(v.len(), 26);
        assert_eq!(v[25], 0);
    }

    #[test]
    fn long_message_uses_multi_byte_length() {
        let msg = "x".repeat(300);
        let v = format_message_for_signing(&msg);
        assert_eq!(&v[25..28], &[0xfd, 0x2c, 0x01]);
        assert_eq!(v.len(), 25 + 3 + 300);
    }

    #[test]
    fn length_counts_utf8_bytes() {
        // two characters, four bytes
        let v = format_message_for_signing("éé");
        assert_eq!(v[25], 4);
    }
}
