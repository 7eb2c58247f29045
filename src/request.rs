use bytes::Bytes;

use crate::frame::Frame;
use crate::Error;

/// A client request: a lower-cased command name and its arguments.
#[derive(Debug, PartialEq)]
pub struct Request {
    pub name: String,
    pub args: Vec<String>,
}

impl TryFrom<Frame> for Request {
    type Error = Error;

    fn try_from(frame: Frame) -> Result<Self, Self::Error> {
        // Clients send commands as RESP arrays, inline commands are parsed into arrays too.
        let array = match frame {
            Frame::Array(array) => array,
            frame => return Err(format!("protocol error; expected array, got {:?}", frame).into()),
        };

        let mut parts = array.into_iter().map(into_string);

        let name = match parts.next() {
            Some(name) => name?.to_lowercase(),
            None => return Err("protocol error; empty request".into()),
        };
        let args = parts.collect::<Result<Vec<_>, _>>()?;

        Ok(Request { name, args })
    }
}

fn into_string(frame: Frame) -> Result<String, Error> {
    match frame {
        Frame::Simple(s) => Ok(s),
        Frame::Bulk(bytes) => utf8(bytes),
        frame => Err(format!("protocol error; expected string, got {:?}", frame).into()),
    }
}

fn utf8(bytes: Bytes) -> Result<String, Error> {
    Ok(String::from_utf8(bytes.to_vec())?)
}
