use crate::commands::{CommandParser, Executable};
use crate::error::CommandError;
use crate::reply::{Message, Reply};
use crate::store::Store;

/// Returns the string representation of the type of the value stored at `key`: `string` or
/// `set`. If the key does not exist, `none` is returned.
///
/// Ref: <https://redis.io/docs/latest/commands/type/>
#[derive(Debug, PartialEq)]
pub struct Type {
    pub key: String,
}

impl Executable for Type {
    const NAME: &'static str = "type";

    fn exec(self, store: &Store) -> Message {
        let type_ = store
            .get(&self.key)
            .map(|value| value.type_name())
            .unwrap_or("none");

        Ok(Reply::Simple(type_.to_string()))
    }
}

impl TryFrom<&mut CommandParser> for Type {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        Ok(Self { key })
    }
}
