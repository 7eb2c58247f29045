use crate::commands::{CommandParser, Executable};
use crate::error::CommandError;
use crate::reply::{Message, Reply};
use crate::store::Store;

/// Increments the number stored at key by one. A missing key counts as `0`.
///
/// Ref: <https://redis.io/docs/latest/commands/incr/>
#[derive(Debug, PartialEq)]
pub struct Incr {
    pub key: String,
}

impl Executable for Incr {
    const NAME: &'static str = "incr";

    fn exec(self, store: &Store) -> Message {
        let value = store.incr_by(&self.key, 1)?;
        Ok(Reply::Integer(value))
    }
}

impl TryFrom<&mut CommandParser> for Incr {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;

        Ok(Self { key })
    }
}
