use crate::commands::{CommandParser, Executable};
use crate::error::CommandError;
use crate::reply::{Message, Reply};
use crate::store::Store;

/// Returns all the members of the set stored at `key`, in no particular order.
///
/// Ref: <https://redis.io/docs/latest/commands/smembers/>
#[derive(Debug, PartialEq)]
pub struct Smembers {
    pub key: String,
}

impl Executable for Smembers {
    const NAME: &'static str = "smembers";

    fn exec(self, store: &Store) -> Message {
        let members = store
            .get_set(&self.key)?
            .map(|set| set.elems())
            .unwrap_or_default();

        Ok(Reply::bulk_array(members))
    }
}

impl TryFrom<&mut CommandParser> for Smembers {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        Ok(Self { key })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{args, execute, sorted_members};
    use crate::reply::encode;
    use crate::store::Value;

    #[test]
    fn members() {
        let store = Store::new();
        execute(&store, "sadd", &args(&["s", "b", "a", "c"])).unwrap();

        let res = execute(&store, "smembers", &args(&["s"]));

        assert_eq!(sorted_members(res), vec!["a", "b", "c"]);
    }

    #[test]
    fn missing_key() {
        let store = Store::new();

        let res = execute(&store, "smembers", &args(&["s"]));

        assert_eq!(encode(&res), b"*0\r\n");
    }

    #[test]
    fn string_valued_key() {
        let store = Store::new();
        store.set("s", Value::from("x"));

        let res = execute(&store, "smembers", &args(&["s"]));

        assert_eq!(res, Err(CommandError::WrongType));
    }
}
