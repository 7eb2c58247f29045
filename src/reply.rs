// https://redis.io/docs/reference/protocol-spec

use std::fmt::Display;

use bytes::Bytes;

use crate::error::{has_resp_prefix, CommandError, ERR};
use crate::frame::DataType;

static CRLF: &[u8; 2] = b"\r\n";

/// The outcome of executing one command: a reply or an error, never both.
pub type Message = Result<Reply, CommandError>;

/// A successful command reply. Nil bulk strings and nil arrays are `None`.
#[derive(Clone, Debug, PartialEq)]
pub enum Reply {
    Integer(i64),
    Simple(String),
    Bulk(Option<Bytes>),
    Array(Option<Vec<Reply>>),
}

impl Reply {
    pub fn ok() -> Reply {
        Reply::Simple("OK".to_string())
    }

    pub fn bulk(value: impl Into<Bytes>) -> Reply {
        Reply::Bulk(Some(value.into()))
    }

    pub fn nil() -> Reply {
        Reply::Bulk(None)
    }

    /// An array of bulk strings, in the order given.
    pub fn bulk_array<I, T>(values: I) -> Reply
    where
        I: IntoIterator<Item = T>,
        T: Into<Bytes>,
    {
        Reply::Array(Some(values.into_iter().map(Reply::bulk).collect()))
    }

    pub fn serialize(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        self.write_to(&mut bytes);
        bytes
    }

    fn write_to(&self, bytes: &mut Vec<u8>) {
        match self {
            Reply::Integer(i) => {
                bytes.push(u8::from(DataType::Integer));
                bytes.extend_from_slice(i.to_string().as_bytes());
                bytes.extend_from_slice(CRLF);
            }
            Reply::Simple(s) => {
                bytes.push(u8::from(DataType::SimpleString));
                bytes.extend_from_slice(s.as_bytes());
                bytes.extend_from_slice(CRLF);
            }
            Reply::Bulk(None) => {
                bytes.push(u8::from(DataType::BulkString));
                bytes.extend_from_slice(b"-1");
                bytes.extend_from_slice(CRLF);
            }
            Reply::Bulk(Some(data)) => {
                bytes.push(u8::from(DataType::BulkString));
                bytes.extend_from_slice(data.len().to_string().as_bytes());
                bytes.extend_from_slice(CRLF);
                bytes.extend_from_slice(data);
                bytes.extend_from_slice(CRLF);
            }
            Reply::Array(None) => {
                bytes.push(u8::from(DataType::Array));
                bytes.extend_from_slice(b"-1");
                bytes.extend_from_slice(CRLF);
            }
            Reply::Array(Some(elems)) => {
                bytes.push(u8::from(DataType::Array));
                bytes.extend_from_slice(elems.len().to_string().as_bytes());
                bytes.extend_from_slice(CRLF);
                for elem in elems {
                    elem.write_to(bytes);
                }
            }
        }
    }
}

impl From<Reply> for Vec<u8> {
    fn from(reply: Reply) -> Self {
        reply.serialize()
    }
}

/// Encodes a message. An error always takes the error path.
pub fn encode(message: &Message) -> Vec<u8> {
    match message {
        Ok(reply) => reply.serialize(),
        Err(err) => encode_command_error(err),
    }
}

pub fn encode_command_error(err: &CommandError) -> Vec<u8> {
    let message = err.to_string();
    if has_resp_prefix(&message) {
        return error_frame(&message);
    }
    error_frame(&format!("{}:{}", err.prefix(), message))
}

/// Encodes any error as `-<message>\r\n`, prepending `ERR:` unless the message already carries
/// a known prefix.
pub fn encode_error(err: &impl Display) -> Vec<u8> {
    let message = err.to_string();
    if has_resp_prefix(&message) {
        return error_frame(&message);
    }
    error_frame(&format!("{ERR}:{message}"))
}

fn error_frame(message: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(1 + message.len() + CRLF.len());
    bytes.push(u8::from(DataType::SimpleError));
    bytes.extend_from_slice(message.as_bytes());
    bytes.extend_from_slice(CRLF);
    bytes
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::frame::Frame;

    #[test]
    fn integer() {
        assert_eq!(Reply::Integer(11).serialize(), b":11\r\n");
        assert_eq!(Reply::Integer(-3).serialize(), b":-3\r\n");
    }

    #[test]
    fn simple_string() {
        assert_eq!(Reply::ok().serialize(), b"+OK\r\n");
    }

    #[test]
    fn bulk_string() {
        assert_eq!(Reply::bulk("hello").serialize(), b"$5\r\nhello\r\n");
        assert_eq!(Reply::bulk("").serialize(), b"$0\r\n\r\n");
        assert_eq!(Reply::nil().serialize(), b"$-1\r\n");
    }

    #[test]
    fn bulk_string_length_counts_bytes() {
        assert_eq!(Reply::bulk("héllo").serialize(), "$6\r\nhéllo\r\n".as_bytes());
    }

    #[test]
    fn array() {
        let reply = Reply::Array(Some(vec![
            Reply::Integer(1),
            Reply::bulk("foo"),
            Reply::nil(),
            Reply::Array(Some(vec![Reply::ok()])),
        ]));

        assert_eq!(
            reply.serialize(),
            b"*4\r\n:1\r\n$3\r\nfoo\r\n$-1\r\n*1\r\n+OK\r\n"
        );
        assert_eq!(Reply::Array(None).serialize(), b"*-1\r\n");
        assert_eq!(Reply::Array(Some(vec![])).serialize(), b"*0\r\n");
    }

    #[test]
    fn errors() {
        let err = CommandError::UnknownCommand {
            name: "frobnicate".to_string(),
        };
        assert_eq!(encode(&Err(err)), b"-ERR:unknown command frobnicate\r\n");

        let err = CommandError::wrong_number_of_args("exists");
        assert_eq!(
            encode(&Err(err)),
            b"-WRONGTYP:exists has wrong number of arguments\r\n"
        );

        let err = CommandError::KeyNotFound {
            key: "foo".to_string(),
        };
        assert_eq!(encode(&Err(err)), b"-ERR:foo not found\r\n");
    }

    #[test]
    fn foreign_errors_get_a_prefix() {
        assert_eq!(encode_error(&"boom"), b"-ERR:boom\r\n");
        assert_eq!(encode_error(&"ERR:already"), b"-ERR:already\r\n");
        assert_eq!(encode_error(&"WRONGTYP:kind"), b"-WRONGTYP:kind\r\n");
    }

    #[test]
    fn ok_message() {
        assert_eq!(encode(&Ok(Reply::Integer(0))), b":0\r\n");
    }

    fn round_trip(reply: &Reply) -> Frame {
        let bytes = reply.serialize();
        let mut cursor = Cursor::new(&bytes[..]);
        let frame = Frame::parse(&mut cursor).unwrap();
        assert_eq!(cursor.position() as usize, bytes.len());
        frame
    }

    #[test]
    fn round_trip_through_parser() {
        assert_eq!(round_trip(&Reply::Integer(42)), Frame::Integer(42));
        assert_eq!(
            round_trip(&Reply::Simple("PONG".to_string())),
            Frame::Simple("PONG".to_string())
        );
        assert_eq!(round_trip(&Reply::nil()), Frame::Null);
        assert_eq!(
            round_trip(&Reply::bulk_array(["a", "b"])),
            Frame::Array(vec![
                Frame::Bulk(Bytes::from("a")),
                Frame::Bulk(Bytes::from("b"))
            ])
        );
    }

    #[test]
    fn round_trip_binary_bulk() {
        let payload = Bytes::from_static(b"line one\r\nline two\r\n\x00\xff");
        assert_eq!(
            round_trip(&Reply::Bulk(Some(payload.clone()))),
            Frame::Bulk(payload)
        );
    }
}
