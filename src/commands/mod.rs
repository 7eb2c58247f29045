pub mod append;
pub mod decr;
pub mod del;
pub mod exists;
pub mod get;
pub mod incr;
pub mod ping;
pub mod sadd;
pub mod scard;
pub mod sdiff;
pub mod sdiffstore;
pub mod set;
pub mod sinter;
pub mod sinterstore;
pub mod sismember;
pub mod smembers;
pub mod smove;
pub mod srem;
pub mod strlen;
pub mod sunion;
pub mod sunionstore;
pub mod type_;

use bytes::Bytes;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};
use std::vec;

use crate::error::CommandError;
use crate::reply::Message;
use crate::store::Store;
use crate::types::MultiSet;

use append::Append;
use decr::Decr;
use del::Del;
use exists::Exists;
use get::Get;
use incr::Incr;
use ping::Ping;
use sadd::Sadd;
use scard::Scard;
use sdiff::Sdiff;
use sdiffstore::Sdiffstore;
use set::Set;
use sinter::Sinter;
use sinterstore::Sinterstore;
use sismember::Sismember;
use smembers::Smembers;
use smove::Smove;
use srem::Srem;
use strlen::Strlen;
use sunion::Sunion;
use sunionstore::Sunionstore;
use type_::Type;

/// A command parsed from its argument list, ready to run against the store.
pub trait Executable {
    /// Lower-case name the command is registered under.
    const NAME: &'static str;

    fn exec(self, store: &Store) -> Message;
}

/// Signature shared by every entry of a [`CommandTable`].
pub type Handler = fn(&Store, &[String]) -> Message;

#[derive(Clone, Copy)]
pub struct CommandSpec {
    pub name: &'static str,
    /// Whether the command writes to the key space. Recorded for write logging and replication
    /// hooks; dispatch does not consult it.
    pub modifies_key_space: bool,
    pub handler: Handler,
}

impl CommandSpec {
    pub fn new<C>(modifies_key_space: bool) -> CommandSpec
    where
        C: Executable,
        for<'a> C: TryFrom<&'a mut CommandParser, Error = CommandError>,
    {
        CommandSpec {
            name: C::NAME,
            modifies_key_space,
            handler: run::<C>,
        }
    }
}

impl fmt::Debug for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandSpec")
            .field("name", &self.name)
            .field("modifies_key_space", &self.modifies_key_space)
            .finish_non_exhaustive()
    }
}

/// Parses the arguments into `C`, rejecting missing or surplus arguments before the store is
/// touched, then executes it.
fn run<C>(store: &Store, args: &[String]) -> Message
where
    C: Executable,
    for<'a> C: TryFrom<&'a mut CommandParser, Error = CommandError>,
{
    let mut parser = CommandParser::new(C::NAME, args);
    let cmd = C::try_from(&mut parser)?;
    parser.finish()?;

    cmd.exec(store)
}

/// Immutable mapping from command name to its handler.
///
/// The built-in table is shared process-wide through [`CommandTable::builtin`]; tests and
/// embedders can build their own with [`CommandTable::new`] and pass it where a table is needed.
#[derive(Debug, Clone)]
pub struct CommandTable {
    commands: HashMap<&'static str, CommandSpec>,
}

impl CommandTable {
    pub fn new(commands: impl IntoIterator<Item = CommandSpec>) -> CommandTable {
        CommandTable {
            commands: commands.into_iter().map(|c| (c.name, c)).collect(),
        }
    }

    pub fn builtin() -> &'static CommandTable {
        static BUILTIN: OnceLock<CommandTable> = OnceLock::new();

        BUILTIN.get_or_init(|| {
            CommandTable::new([
                // server
                CommandSpec::new::<Ping>(false),
                // key space
                CommandSpec::new::<Exists>(false),
                CommandSpec::new::<Del>(true),
                CommandSpec::new::<Type>(false),
                // strings
                CommandSpec::new::<Get>(false),
                CommandSpec::new::<Set>(true),
                CommandSpec::new::<Incr>(true),
                CommandSpec::new::<Decr>(true),
                CommandSpec::new::<Append>(true),
                CommandSpec::new::<Strlen>(false),
                // sets
                CommandSpec::new::<Sadd>(true),
                CommandSpec::new::<Srem>(true),
                CommandSpec::new::<Scard>(false),
                CommandSpec::new::<Sismember>(false),
                CommandSpec::new::<Smembers>(false),
                CommandSpec::new::<Sdiff>(false),
                CommandSpec::new::<Sinter>(false),
                CommandSpec::new::<Sunion>(false),
                CommandSpec::new::<Smove>(true),
                CommandSpec::new::<Sdiffstore>(true),
                CommandSpec::new::<Sinterstore>(true),
                CommandSpec::new::<Sunionstore>(true),
            ])
        })
    }

    /// Names are matched exactly; callers normalise case beforehand.
    pub fn lookup(&self, name: &str) -> Result<&CommandSpec, CommandError> {
        self.commands
            .get(name)
            .ok_or_else(|| CommandError::UnknownCommand {
                name: name.to_string(),
            })
    }

    /// Resolves `name` and runs its handler. An unknown command comes back as an error message
    /// like any other failure.
    pub fn execute(&self, store: &Store, name: &str, args: &[String]) -> Message {
        let command = self.lookup(name)?;
        (command.handler)(store, args)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Runs a command from the built-in table.
pub fn execute(store: &Store, name: &str, args: &[String]) -> Message {
    CommandTable::builtin().execute(store, name, args)
}

/// Walks a command's arguments, reporting a wrong number of arguments on behalf of the command
/// whenever one is missing or left over.
pub struct CommandParser {
    command: &'static str,
    parts: vec::IntoIter<String>,
}

impl CommandParser {
    pub fn new(command: &'static str, args: &[String]) -> CommandParser {
        CommandParser {
            command,
            parts: args.to_vec().into_iter(),
        }
    }

    pub fn next_string(&mut self) -> Result<String, CommandError> {
        self.parts.next().ok_or_else(|| self.wrong_arity())
    }

    pub fn next_bytes(&mut self) -> Result<Bytes, CommandError> {
        self.next_string().map(Bytes::from)
    }

    /// Takes every remaining argument, requiring at least one.
    pub fn remaining(&mut self) -> Result<Vec<String>, CommandError> {
        let rest: Vec<String> = self.parts.by_ref().collect();
        if rest.is_empty() {
            return Err(self.wrong_arity());
        }
        Ok(rest)
    }

    pub fn finish(&mut self) -> Result<(), CommandError> {
        match self.parts.next() {
            Some(_) => Err(self.wrong_arity()),
            None => Ok(()),
        }
    }

    fn wrong_arity(&self) -> CommandError {
        CommandError::wrong_number_of_args(self.command)
    }
}

/// Loads the sets under `keys` in order. Missing keys count as empty sets.
pub(crate) fn operand_sets(
    store: &Store,
    keys: &[String],
) -> Result<Vec<Arc<MultiSet>>, CommandError> {
    keys.iter()
        .map(|key| {
            store
                .get_set(key)
                .map(|set| set.unwrap_or_else(|| Arc::new(MultiSet::new())))
        })
        .collect()
}

#[cfg(test)]
pub(crate) fn args(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
pub(crate) fn parse<C>(raw: &[&str]) -> Result<C, CommandError>
where
    C: Executable,
    for<'a> C: TryFrom<&'a mut CommandParser, Error = CommandError>,
{
    let mut parser = CommandParser::new(C::NAME, &args(raw));
    let cmd = C::try_from(&mut parser)?;
    parser.finish()?;
    Ok(cmd)
}

/// Members of an array reply, sorted for comparison.
#[cfg(test)]
pub(crate) fn sorted_members(res: Message) -> Vec<String> {
    use crate::reply::Reply;

    let elems = match res {
        Ok(Reply::Array(Some(elems))) => elems,
        other => panic!("expected an array reply, got {other:?}"),
    };

    let mut members: Vec<String> = elems
        .into_iter()
        .map(|elem| match elem {
            Reply::Bulk(Some(bytes)) => String::from_utf8(bytes.to_vec()).unwrap(),
            other => panic!("expected a bulk string, got {other:?}"),
        })
        .collect();
    members.sort();
    members
}
