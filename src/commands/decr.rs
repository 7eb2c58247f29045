use crate::commands::{CommandParser, Executable};
use crate::error::CommandError;
use crate::reply::{Message, Reply};
use crate::store::Store;

/// Decrements the number stored at key by one. A missing key counts as `0`.
///
/// Ref: <https://redis.io/docs/latest/commands/decr/>
#[derive(Debug, PartialEq)]
pub struct Decr {
    pub key: String,
}

impl Executable for Decr {
    const NAME: &'static str = "decr";

    fn exec(self, store: &Store) -> Message {
        let value = store.incr_by(&self.key, -1)?;
        Ok(Reply::Integer(value))
    }
}

impl TryFrom<&mut CommandParser> for Decr {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;

        Ok(Self { key })
    }
}
