use crate::commands::{CommandParser, Executable};
use crate::error::CommandError;
use crate::reply::{Message, Reply};
use crate::store::Store;

/// Returns the cardinality of the set stored at `key`, `0` if it does not exist.
///
/// Ref: <https://redis.io/docs/latest/commands/scard/>
#[derive(Debug, PartialEq)]
pub struct Scard {
    pub key: String,
}

impl Executable for Scard {
    const NAME: &'static str = "scard";

    fn exec(self, store: &Store) -> Message {
        let card = store.get_set(&self.key)?.map_or(0, |set| set.card());
        Ok(Reply::Integer(card as i64))
    }
}

impl TryFrom<&mut CommandParser> for Scard {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        Ok(Self { key })
    }
}
