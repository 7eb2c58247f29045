use crate::commands::{CommandParser, Executable};
use crate::error::CommandError;
use crate::reply::{Message, Reply};
use crate::store::Store;

/// Returns `1` if `key` exists, `0` otherwise.
///
/// Ref: <https://redis.io/docs/latest/commands/exists/>
#[derive(Debug, PartialEq)]
pub struct Exists {
    pub key: String,
}

impl Executable for Exists {
    const NAME: &'static str = "exists";

    fn exec(self, store: &Store) -> Message {
        let found = store.exists(&self.key);
        Ok(Reply::Integer(found as i64))
    }
}

impl TryFrom<&mut CommandParser> for Exists {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        Ok(Self { key })
    }
}
