use crate::commands::{CommandParser, Executable};
use crate::error::CommandError;
use crate::reply::{Message, Reply};
use crate::store::Store;

// https://redis.io/commands/del
#[derive(Debug, PartialEq)]
pub struct Del {
    pub keys: Vec<String>,
}

impl Executable for Del {
    const NAME: &'static str = "del";

    fn exec(self, store: &Store) -> Message {
        let deleted = store.del(&self.keys);
        Ok(Reply::Integer(deleted as i64))
    }
}

impl TryFrom<&mut CommandParser> for Del {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let keys = parser.remaining()?;
        Ok(Self { keys })
    }
}
