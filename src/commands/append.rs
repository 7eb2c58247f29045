use bytes::Bytes;

use crate::commands::{CommandParser, Executable};
use crate::error::CommandError;
use crate::reply::{Message, Reply};
use crate::store::Store;

/// If `key` already exists and is a string, this command appends the value at the end of the
/// string. If `key` does not exist it is created and set as an empty string, so APPEND will be
/// similar to SET in this special case.
///
/// Ref: <https://redis.io/docs/latest/commands/append/>
#[derive(Debug, PartialEq)]
pub struct Append {
    pub key: String,
    pub value: Bytes,
}

impl Executable for Append {
    const NAME: &'static str = "append";

    fn exec(self, store: &Store) -> Message {
        let len = store.append(&self.key, &self.value)?;
        Ok(Reply::Integer(len as i64))
    }
}

impl TryFrom<&mut CommandParser> for Append {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        let value = parser.next_bytes()?;

        Ok(Self { key, value })
    }
}
