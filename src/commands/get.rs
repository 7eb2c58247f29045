use crate::commands::{CommandParser, Executable};
use crate::error::CommandError;
use crate::reply::{Message, Reply};
use crate::store::{Store, Value};

/// Get the value of `key`. If the key does not exist, or holds something other than a string,
/// the special value `nil` is returned.
///
/// Ref: <https://redis.io/docs/latest/commands/get/>
#[derive(Debug, PartialEq)]
pub struct Get {
    pub key: String,
}

impl Executable for Get {
    const NAME: &'static str = "get";

    fn exec(self, store: &Store) -> Message {
        match store.get(&self.key) {
            Ok(Value::String(buffer)) => Ok(Reply::bulk(buffer.to_bytes())),
            Ok(Value::Set(_)) | Err(CommandError::KeyNotFound { .. }) => Ok(Reply::nil()),
            Err(err) => Err(err),
        }
    }
}

impl TryFrom<&mut CommandParser> for Get {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        Ok(Self { key })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{args, execute, parse};
    use crate::reply::encode;
    use crate::types::MultiSet;

    #[test]
    fn existing_key() {
        let store = Store::new();
        store.set("key1", Value::from("1"));

        let cmd = parse::<Get>(&["key1"]).unwrap();
        assert_eq!(
            cmd,
            Get {
                key: String::from("key1")
            }
        );

        let res = cmd.exec(&store);
        assert_eq!(encode(&res), b"$1\r\n1\r\n");
    }

    #[test]
    fn missing_key() {
        let store = Store::new();

        let res = execute(&store, "get", &args(&["key1"]));

        assert_eq!(res, Ok(Reply::nil()));
        assert_eq!(encode(&res), b"$-1\r\n");
    }

    #[test]
    fn set_valued_key() {
        let store = Store::new();
        store.set("key1", Value::from(MultiSet::new()));

        let res = execute(&store, "get", &args(&["key1"]));

        assert_eq!(res, Ok(Reply::nil()));
    }

    #[test]
    fn wrong_arity() {
        let err = parse::<Get>(&["a", "b"]).unwrap_err();

        assert_eq!(err, CommandError::wrong_number_of_args("get"));
    }
}
