use std::sync::Arc;

use crate::commands::{operand_sets, CommandParser, Executable};
use crate::error::CommandError;
use crate::reply::{Message, Reply};
use crate::store::{Store, Value};
use crate::types::MultiSet;

/// Like SINTER, but stores the result at `destination` and returns its cardinality.
///
/// Ref: <https://redis.io/docs/latest/commands/sinterstore/>
#[derive(Debug, PartialEq)]
pub struct Sinterstore {
    pub destination: String,
    pub keys: Vec<String>,
}

impl Executable for Sinterstore {
    const NAME: &'static str = "sinterstore";

    fn exec(self, store: &Store) -> Message {
        let sets = operand_sets(store, &self.keys)?;
        let operands: Vec<&MultiSet> = sets.iter().map(Arc::as_ref).collect();
        let result = MultiSet::intersection_set(&operands);

        let card = result.card();
        store.set(self.destination, Value::from(result));

        Ok(Reply::Integer(card as i64))
    }
}

impl TryFrom<&mut CommandParser> for Sinterstore {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let destination = parser.next_string()?;
        let keys = parser.remaining()?;

        Ok(Self { destination, keys })
    }
}
