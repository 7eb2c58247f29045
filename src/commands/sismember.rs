use crate::commands::{CommandParser, Executable};
use crate::error::CommandError;
use crate::reply::{Message, Reply};
use crate::store::Store;

/// Returns `1` if `member` belongs to the set stored at `key`, `0` otherwise.
///
/// Ref: <https://redis.io/docs/latest/commands/sismember/>
#[derive(Debug, PartialEq)]
pub struct Sismember {
    pub key: String,
    pub member: String,
}

impl Executable for Sismember {
    const NAME: &'static str = "sismember";

    fn exec(self, store: &Store) -> Message {
        let found = store
            .get_set(&self.key)?
            .map_or(false, |set| set.exists(&self.member));

        Ok(Reply::Integer(found as i64))
    }
}

impl TryFrom<&mut CommandParser> for Sismember {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        let member = parser.next_string()?;

        Ok(Self { key, member })
    }
}
