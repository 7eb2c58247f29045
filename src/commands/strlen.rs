use crate::commands::{CommandParser, Executable};
use crate::error::CommandError;
use crate::reply::{Message, Reply};
use crate::store::{Store, Value};

/// Returns the length of the string value stored at key. An error is returned when key holds a
/// non-string value.
///
/// Ref: <https://redis.io/docs/latest/commands/strlen/>
#[derive(Debug, PartialEq)]
pub struct Strlen {
    pub key: String,
}

impl Executable for Strlen {
    const NAME: &'static str = "strlen";

    fn exec(self, store: &Store) -> Message {
        match store.get(&self.key) {
            Ok(Value::String(buffer)) => Ok(Reply::Integer(buffer.len() as i64)),
            Ok(Value::Set(_)) => Err(CommandError::WrongType),
            Err(CommandError::KeyNotFound { .. }) => Ok(Reply::Integer(0)),
            Err(err) => Err(err),
        }
    }
}

impl TryFrom<&mut CommandParser> for Strlen {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        Ok(Self { key })
    }
}
