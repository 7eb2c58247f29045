use std::sync::Arc;

use crate::commands::{operand_sets, CommandParser, Executable};
use crate::error::CommandError;
use crate::reply::{Message, Reply};
use crate::store::Store;
use crate::types::MultiSet;

/// Returns the members present in at least one of the given sets.
///
/// Ref: <https://redis.io/docs/latest/commands/sunion/>
#[derive(Debug, PartialEq)]
pub struct Sunion {
    pub keys: Vec<String>,
}

impl Executable for Sunion {
    const NAME: &'static str = "sunion";

    fn exec(self, store: &Store) -> Message {
        let sets = operand_sets(store, &self.keys)?;
        let operands: Vec<&MultiSet> = sets.iter().map(Arc::as_ref).collect();

        Ok(Reply::bulk_array(MultiSet::union(&operands)))
    }
}

impl TryFrom<&mut CommandParser> for Sunion {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let keys = parser.remaining()?;
        Ok(Self { keys })
    }
}
