//! Command line parsing
//!
//! Lines are split on whitespace. The first token picks the command
//! (case-insensitive), the rest are its arguments:
//!
//! ```text
//! stack NAME SIZE     place NAME on the stack side
//! heap NAME SIZE      place NAME on the heap side
//! get NAME            bring NAME's page into the cache
//! load FILE           run every line of FILE
//! ```
//!
//! Blank lines and lines starting with `#` parse to `None`.

use super::errors::SimError;
use crate::memory::AllocKind;
use std::path::PathBuf;

const ALLOC_USAGE_STACK: &str = "stack NAME SIZE";
const ALLOC_USAGE_HEAP: &str = "heap NAME SIZE";
const GET_USAGE: &str = "get NAME";
const LOAD_USAGE: &str = "load FILE";

/// A parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Allocate {
        kind: AllocKind,
        name: String,
        size: usize,
    },
    Get {
        name: String,
    },
    Load {
        path: PathBuf,
    },
}

impl Command {
    /// Parse one line of input
    pub fn parse(line: &str) -> Result<Option<Command>, SimError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((&keyword, args)) = tokens.split_first() else {
            return Ok(None);
        };
        if keyword.starts_with('#') {
            return Ok(None);
        }

        let command = match keyword.to_ascii_lowercase().as_str() {
            "stack" => parse_alloc(AllocKind::Stack, args, ALLOC_USAGE_STACK)?,
            "heap" => parse_alloc(AllocKind::Heap, args, ALLOC_USAGE_HEAP)?,
            "get" => match args {
                [name] => Command::Get {
                    name: name.to_string(),
                },
                _ => return Err(invalid_arguments("get", GET_USAGE)),
            },
            "load" => match args {
                [path] => Command::Load {
                    path: PathBuf::from(*path),
                },
                _ => return Err(invalid_arguments("load", LOAD_USAGE)),
            },
            _ => {
                return Err(SimError::UnknownCommand {
                    command: keyword.to_string(),
                })
            }
        };

        Ok(Some(command))
    }
}

fn parse_alloc(kind: AllocKind, args: &[&str], usage: &'static str) -> Result<Command, SimError> {
    let [name, size] = args else {
        return Err(invalid_arguments(kind.keyword(), usage));
    };

    let size = match size.parse::<usize>() {
        Ok(n) if n > 0 => n,
        _ => {
            return Err(SimError::InvalidSize {
                name: name.to_string(),
                size: size.to_string(),
            })
        }
    };

    Ok(Command::Allocate {
        kind,
        name: name.to_string(),
        size,
    })
}

fn invalid_arguments(command: &str, usage: &'static str) -> SimError {
    SimError::InvalidArguments {
        command: command.to_string(),
        usage,
    }
}
