use std::sync::Arc;

use crate::commands::{operand_sets, CommandParser, Executable};
use crate::error::CommandError;
use crate::reply::{Message, Reply};
use crate::store::{Store, Value};
use crate::types::MultiSet;

/// Like SDIFF, but stores the result at `destination` and returns its cardinality.
///
/// Ref: <https://redis.io/docs/latest/commands/sdiffstore/>
#[derive(Debug, PartialEq)]
pub struct Sdiffstore {
    pub destination: String,
    pub keys: Vec<String>,
}

impl Executable for Sdiffstore {
    const NAME: &'static str = "sdiffstore";

    fn exec(self, store: &Store) -> Message {
        let sets = operand_sets(store, &self.keys)?;
        let result = match sets.split_first() {
            Some((first, rest)) => {
                let others: Vec<&MultiSet> = rest.iter().map(Arc::as_ref).collect();
                first.diff_set(&others)
            }
            None => MultiSet::new(),
        };

        let card = result.card();
        store.set(self.destination, Value::from(result));

        Ok(Reply::Integer(card as i64))
    }
}

impl TryFrom<&mut CommandParser> for Sdiffstore {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let destination = parser.next_string()?;
        let keys = parser.remaining()?;

        Ok(Self { destination, keys })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{args, execute, sorted_members};

    #[test]
    fn stores_difference() {
        let store = Store::new();
        execute(&store, "sadd", &args(&["a", "1", "2", "3"])).unwrap();
        execute(&store, "sadd", &args(&["b", "2"])).unwrap();

        let res = execute(&store, "sdiffstore", &args(&["dest", "a", "b"]));

        assert_eq!(res, Ok(Reply::Integer(2)));
        assert_eq!(
            sorted_members(execute(&store, "smembers", &args(&["dest"]))),
            vec!["1", "3"]
        );

        // The stored result is independent of its sources.
        execute(&store, "sadd", &args(&["a", "4"])).unwrap();
        assert_eq!(
            execute(&store, "scard", &args(&["dest"])),
            Ok(Reply::Integer(2))
        );
    }

    #[test]
    fn wrong_arity() {
        let store = Store::new();

        let res = execute(&store, "sdiffstore", &args(&["dest"]));

        assert_eq!(res, Err(CommandError::wrong_number_of_args("sdiffstore")));
    }
}
