use crate::commands::{CommandParser, Executable};
use crate::error::CommandError;
use crate::reply::{Message, Reply};
use crate::store::Store;

/// Remove the specified members from the set stored at `key`. Returns the number of members that
/// were removed; members that are not present are ignored.
///
/// Ref: <https://redis.io/docs/latest/commands/srem/>
#[derive(Debug, PartialEq)]
pub struct Srem {
    pub key: String,
    pub members: Vec<String>,
}

impl Executable for Srem {
    const NAME: &'static str = "srem";

    fn exec(self, store: &Store) -> Message {
        let removed = match store.get_set(&self.key)? {
            Some(set) => set.delete(&self.members),
            None => 0,
        };

        Ok(Reply::Integer(removed as i64))
    }
}

impl TryFrom<&mut CommandParser> for Srem {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        let members = parser.remaining()?;

        Ok(Self { key, members })
    }
}
