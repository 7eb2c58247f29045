use bytes::Bytes;

use crate::commands::{CommandParser, Executable};
use crate::error::CommandError;
use crate::reply::{Message, Reply};
use crate::store::{Store, Value};
use crate::types::Buffer;

/// Set `key` to hold the string `value`, replacing whatever it held before.
///
/// Ref: <https://redis.io/docs/latest/commands/set/>
#[derive(Debug, PartialEq)]
pub struct Set {
    pub key: String,
    pub value: Bytes,
}

impl Executable for Set {
    const NAME: &'static str = "set";

    fn exec(self, store: &Store) -> Message {
        store.set(self.key, Value::String(Buffer::from_bytes(&self.value)));

        Ok(Reply::ok())
    }
}

impl TryFrom<&mut CommandParser> for Set {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        let value = parser.next_bytes()?;

        Ok(Self { key, value })
    }
}
