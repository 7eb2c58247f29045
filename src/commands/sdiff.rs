use std::sync::Arc;

use crate::commands::{operand_sets, CommandParser, Executable};
use crate::error::CommandError;
use crate::reply::{Message, Reply};
use crate::store::Store;
use crate::types::MultiSet;

/// Returns the members of the first set that are in none of the following sets. Missing keys
/// are treated as empty sets.
///
/// Ref: <https://redis.io/docs/latest/commands/sdiff/>
#[derive(Debug, PartialEq)]
pub struct Sdiff {
    pub keys: Vec<String>,
}

impl Executable for Sdiff {
    const NAME: &'static str = "sdiff";

    fn exec(self, store: &Store) -> Message {
        let sets = operand_sets(store, &self.keys)?;
        let Some((first, rest)) = sets.split_first() else {
            return Ok(Reply::bulk_array(Vec::<String>::new()));
        };

        let others: Vec<&MultiSet> = rest.iter().map(Arc::as_ref).collect();
        Ok(Reply::bulk_array(first.diff(&others)))
    }
}

impl TryFrom<&mut CommandParser> for Sdiff {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let keys = parser.remaining()?;
        Ok(Self { keys })
    }
}
