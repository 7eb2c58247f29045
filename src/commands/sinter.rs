use std::sync::Arc;

use crate::commands::{operand_sets, CommandParser, Executable};
use crate::error::CommandError;
use crate::reply::{Message, Reply};
use crate::store::Store;
use crate::types::MultiSet;

/// Returns the members present in every given set. A missing key is an empty set, so it makes
/// the whole result empty.
///
/// Ref: <https://redis.io/docs/latest/commands/sinter/>
#[derive(Debug, PartialEq)]
pub struct Sinter {
    pub keys: Vec<String>,
}

impl Executable for Sinter {
    const NAME: &'static str = "sinter";

    fn exec(self, store: &Store) -> Message {
        let sets = operand_sets(store, &self.keys)?;
        let operands: Vec<&MultiSet> = sets.iter().map(Arc::as_ref).collect();

        Ok(Reply::bulk_array(MultiSet::intersection(&operands)))
    }
}

impl TryFrom<&mut CommandParser> for Sinter {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let keys = parser.remaining()?;
        Ok(Self { keys })
    }
}
