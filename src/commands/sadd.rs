use crate::commands::{CommandParser, Executable};
use crate::error::CommandError;
use crate::reply::{Message, Reply};
use crate::store::Store;

/// Add the specified members to the set stored at `key`, creating the set if needed. Returns the
/// number of members that were not already present.
///
/// Ref: <https://redis.io/docs/latest/commands/sadd/>
#[derive(Debug, PartialEq)]
pub struct Sadd {
    pub key: String,
    pub members: Vec<String>,
}

impl Executable for Sadd {
    const NAME: &'static str = "sadd";

    fn exec(self, store: &Store) -> Message {
        let set = store.get_or_create_set(&self.key)?;
        let added = set.add(&self.members);

        Ok(Reply::Integer(added as i64))
    }
}

impl TryFrom<&mut CommandParser> for Sadd {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        let members = parser.remaining()?;

        Ok(Self { key, members })
    }
}
