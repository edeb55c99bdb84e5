//! The interactive command protocol.
//!
//! One command per line, tokens separated by whitespace:
//!
//! | Command    | Arguments   | Reply                                              |
//! |------------|-------------|----------------------------------------------------|
//! | `count`    | `id`        | counter, or `0` if absent                          |
//! | `next`     | `id`        | `<id> <counter>` of the successor, or `0 0`        |
//! | `previous` | `id`        | `<id> <counter>` of the predecessor, or `0 0`      |
//! | `increase` | `id amount` | resulting counter                                  |
//! | `reduce`   | `id amount` | resulting counter, or `0` once removed             |
//! | `inrange`  | `low high`  | counters in key order, space separated (may be empty) |
//! | `quit`     |             | none, ends the session                             |
//!
//! A blank line also ends the session.
//!
//! # Examples
//!
//! ```
//! use tally_tree::TallyTree;
//! use tally_tree::command::Command;
//!
//! let mut tally: TallyTree = [(5, 10), (3, 7), (8, 2)].into_iter().collect();
//!
//! let reply = Command::parse("next 5")?.execute(&mut tally).unwrap();
//! assert_eq!(reply.to_string(), "8 2");
//!
//! let reply = Command::parse("inrange 3 8")?.execute(&mut tally).unwrap();
//! assert_eq!(reply.to_string(), "7 10 2");
//!
//! assert!(Command::parse("quit")?.execute(&mut tally).is_none());
//! # Ok::<(), tally_tree::Error>(())
//! ```

use alloc::string::ToString;
use alloc::vec::Vec;
use core::fmt;
use core::str::{FromStr, SplitWhitespace};

use crate::{Counter, Error, Key, Result, TallyTree};

/// A parsed command line.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Command {
    /// `count <id>`
    Count(Key),
    /// `next <id>`
    Next(Key),
    /// `previous <id>`
    Previous(Key),
    /// `increase <id> <amount>`
    Increase(Key, Counter),
    /// `reduce <id> <amount>`
    Reduce(Key, Counter),
    /// `inrange <low> <high>`
    InRange(Key, Key),
    /// `quit`, or a blank line.
    Quit,
}

impl Command {
    /// Parses one command line.
    ///
    /// # Errors
    ///
    /// Returns an error naming the problem if the command is unknown, an argument is
    /// missing or not an `i32`, or there are too many arguments.
    pub fn parse(line: &str) -> Result<Self> {
        let mut tokens = line.split_whitespace();
        let Some(name) = tokens.next() else {
            return Ok(Command::Quit);
        };

        let (arity, build): (usize, fn(Key, Counter) -> Command) = match name {
            "count" => (1, |key, _| Command::Count(key)),
            "next" => (1, |key, _| Command::Next(key)),
            "previous" => (1, |key, _| Command::Previous(key)),
            "increase" => (2, Command::Increase),
            "reduce" => (2, Command::Reduce),
            "inrange" => (2, Command::InRange),
            "quit" => (0, |_, _| Command::Quit),
            unknown => return Err(Error::UnknownCommand(unknown.to_string())),
        };

        let mut args = Arguments {
            command: build(0, 0).name(),
            tokens,
            position: 0,
        };
        let mut values = [0; 2];
        for value in values.iter_mut().take(arity) {
            *value = args.integer()?;
        }
        args.finish()?;

        let [first, second] = values;
        Ok(build(first, second))
    }

    /// Returns the protocol name of the command.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Command::Count(_) => "count",
            Command::Next(_) => "next",
            Command::Previous(_) => "previous",
            Command::Increase(..) => "increase",
            Command::Reduce(..) => "reduce",
            Command::InRange(..) => "inrange",
            Command::Quit => "quit",
        }
    }

    /// Applies the command to `tree`, returning the reply to report.
    ///
    /// [`Command::Quit`] has no reply and leaves the tree alone.
    pub fn execute(self, tree: &mut TallyTree) -> Option<Reply> {
        let reply = match self {
            Command::Count(key) => Reply::Counter(tree.count(key)),
            Command::Next(key) => Reply::Entry(tree.next(key)),
            Command::Previous(key) => Reply::Entry(tree.previous(key)),
            Command::Increase(key, amount) => Reply::Counter(tree.increase(key, amount)),
            Command::Reduce(key, amount) => Reply::Counter(tree.reduce(key, amount)),
            Command::InRange(low, high) => Reply::Counters(tree.range_counters(low, high)),
            Command::Quit => return None,
        };
        Some(reply)
    }
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        Command::parse(line)
    }
}

struct Arguments<'a> {
    command: &'static str,
    tokens: SplitWhitespace<'a>,
    position: usize,
}

impl Arguments<'_> {
    fn integer(&mut self) -> Result<i32> {
        self.position += 1;
        let token = self.tokens.next().ok_or(Error::MissingArgument {
            command: self.command,
            position: self.position,
        })?;
        token.parse().map_err(|_| Error::InvalidInteger(token.to_string()))
    }

    fn finish(mut self) -> Result<()> {
        match self.tokens.next() {
            Some(_) => Err(Error::UnexpectedArgument { command: self.command }),
            None => Ok(()),
        }
    }
}

/// The result of executing a [`Command`], rendered in protocol form by [`Display`](fmt::Display).
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Reply {
    /// A single counter: `count`, `increase` and `reduce`.
    Counter(Counter),
    /// A neighbouring entry: `next` and `previous`. `None` renders as `0 0`.
    Entry(Option<(Key, Counter)>),
    /// Counters in key order: `inrange`. Renders as an empty line when empty.
    Counters(Vec<Counter>),
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Counter(counter) => write!(f, "{counter}"),
            Reply::Entry(Some((key, counter))) => write!(f, "{key} {counter}"),
            Reply::Entry(None) => f.write_str("0 0"),
            Reply::Counters(counters) => {
                for (i, counter) in counters.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{counter}")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::string::String;
    use alloc::vec;
    use proptest::prelude::*;

    fn run(tree: &mut TallyTree, line: &str) -> String {
        Command::parse(line)
            .expect("command should parse")
            .execute(tree)
            .map(|reply| reply.to_string())
            .unwrap_or_default()
    }

    #[test]
    fn parses_every_command() {
        assert_eq!(Command::parse("count 3"), Ok(Command::Count(3)));
        assert_eq!(Command::parse("next -4"), Ok(Command::Next(-4)));
        assert_eq!(Command::parse("previous 0"), Ok(Command::Previous(0)));
        assert_eq!(Command::parse("increase 3 5"), Ok(Command::Increase(3, 5)));
        assert_eq!(Command::parse("reduce 8 2"), Ok(Command::Reduce(8, 2)));
        assert_eq!(Command::parse("  inrange   3\t8 "), Ok(Command::InRange(3, 8)));
        assert_eq!(Command::parse("quit"), Ok(Command::Quit));
        assert_eq!(Command::parse(""), Ok(Command::Quit));
        assert_eq!(Command::parse("   "), Ok(Command::Quit));
        assert_eq!("count 1".parse::<Command>(), Ok(Command::Count(1)));
    }

    #[test]
    fn rejects_malformed_lines() {
        assert_eq!(Command::parse("total 3"), Err(Error::UnknownCommand("total".into())));
        assert_eq!(Command::parse("Count 3"), Err(Error::UnknownCommand("Count".into())));
        assert_eq!(
            Command::parse("increase 3"),
            Err(Error::MissingArgument {
                command: "increase",
                position: 2
            })
        );
        assert_eq!(
            Command::parse("count"),
            Err(Error::MissingArgument {
                command: "count",
                position: 1
            })
        );
        assert_eq!(Command::parse("next 1 2"), Err(Error::UnexpectedArgument { command: "next" }));
        assert_eq!(Command::parse("quit now"), Err(Error::UnexpectedArgument { command: "quit" }));
        assert_eq!(Command::parse("count x"), Err(Error::InvalidInteger("x".into())));
        assert_eq!(
            Command::parse("count 2147483648"),
            Err(Error::InvalidInteger("2147483648".into()))
        );
    }

    #[test]
    fn name_matches_protocol() {
        for line in ["count 1", "next 1", "previous 1", "increase 1 1", "reduce 1 1", "inrange 1 1", "quit"] {
            let command = Command::parse(line).expect("command should parse");
            assert!(line.starts_with(command.name()));
        }
    }

    #[test]
    fn errors_name_the_parsed_command() {
        for (name, arity) in [("count", 1), ("next", 1), ("previous", 1), ("increase", 2), ("reduce", 2), ("inrange", 2)] {
            assert_eq!(
                Command::parse(name),
                Err(Error::MissingArgument {
                    command: name,
                    position: 1
                })
            );

            let line = alloc::format!("{name}{} 9", " 1".repeat(arity));
            assert_eq!(Command::parse(&line), Err(Error::UnexpectedArgument { command: name }));
        }
    }

    #[test]
    fn reply_formats() {
        assert_eq!(Reply::Counter(-3).to_string(), "-3");
        assert_eq!(Reply::Entry(Some((8, 2))).to_string(), "8 2");
        assert_eq!(Reply::Entry(None).to_string(), "0 0");
        assert_eq!(Reply::Counters(vec![7, 12, 2]).to_string(), "7 12 2");
        assert_eq!(Reply::Counters(Vec::new()).to_string(), "");
    }

    #[test]
    fn session_walkthrough() {
        let mut tree: TallyTree = [(5, 10), (3, 7), (8, 2)].into_iter().collect();

        assert_eq!(run(&mut tree, "count 3"), "7");
        assert_eq!(run(&mut tree, "count 99"), "0");
        assert_eq!(run(&mut tree, "next 5"), "8 2");
        assert_eq!(run(&mut tree, "previous 5"), "3 7");
        assert_eq!(run(&mut tree, "next 8"), "0 0");
        assert_eq!(run(&mut tree, "increase 3 5"), "12");
        assert_eq!(run(&mut tree, "increase 20 4"), "4");
        assert_eq!(run(&mut tree, "inrange 3 8"), "12 10 2");
        assert_eq!(run(&mut tree, "reduce 8 2"), "0");
        assert_eq!(run(&mut tree, "count 8"), "0");
        assert_eq!(run(&mut tree, "inrange 100 200"), "");
        assert_eq!(run(&mut tree, "quit"), "");
    }

    proptest! {
        #[test]
        fn parse_never_panics(line in "\\PC*") {
            let _ = Command::parse(&line);
        }

        #[test]
        fn integer_arguments_round_trip(key in any::<i32>(), amount in any::<i32>()) {
            let line = alloc::format!("increase {key} {amount}");
            prop_assert_eq!(Command::parse(&line), Ok(Command::Increase(key, amount)));
        }
    }
}
