use crate::commands::{CommandParser, Executable};
use crate::error::CommandError;
use crate::reply::{Message, Reply};
use crate::store::Store;
use crate::types::MultiSet;

/// Move `member` from the set at `source` to the set at `destination`. Returns `1` if the member
/// was moved, `0` if `source` did not hold it.
///
/// Ref: <https://redis.io/docs/latest/commands/smove/>
#[derive(Debug, PartialEq)]
pub struct Smove {
    pub source: String,
    pub destination: String,
    pub member: String,
}

impl Executable for Smove {
    const NAME: &'static str = "smove";

    fn exec(self, store: &Store) -> Message {
        let src = store.get_set(&self.source)?;
        // A string-valued destination is an error whether or not anything would move.
        let dest = store.get_set(&self.destination)?;

        let Some(src) = src else {
            return Ok(Reply::Integer(0));
        };
        if !src.exists(&self.member) {
            return Ok(Reply::Integer(0));
        }

        let dest = match dest {
            Some(dest) => dest,
            None => store.get_or_create_set(&self.destination)?,
        };
        let moved = MultiSet::move_member(&self.member, &src, &dest);

        Ok(Reply::Integer(moved as i64))
    }
}

impl TryFrom<&mut CommandParser> for Smove {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let source = parser.next_string()?;
        let destination = parser.next_string()?;
        let member = parser.next_string()?;

        Ok(Self {
            source,
            destination,
            member,
        })
    }
}
