//! Backend command model

use std::fmt;

/// One positional command argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Str(String),
    Int(i64),
    Float(f64),
}

impl Arg {
    /// Wire form of the argument.
    pub fn as_wire(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Str(s) => f.write_str(s),
            Arg::Int(v) => write!(f, "{v}"),
            Arg::Float(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for Arg {
    fn from(v: &str) -> Self {
        Arg::Str(v.to_string())
    }
}

impl From<String> for Arg {
    fn from(v: String) -> Self {
        Arg::Str(v)
    }
}

impl From<&String> for Arg {
    fn from(v: &String) -> Self {
        Arg::Str(v.clone())
    }
}

impl From<i64> for Arg {
    fn from(v: i64) -> Self {
        Arg::Int(v)
    }
}

/// A backend command: name plus positional arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub name: &'static str,
    pub args: Vec<Arg>,
}

impl Command {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<Arg>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, A>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Arg>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// First argument, which is the target key for every command this crate issues.
    pub fn key(&self) -> Option<&Arg> {
        self.args.first()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Command names consumed from the backend.
pub mod names {
    pub const HGETALL: &str = "HGETALL";
    pub const HSET: &str = "HSET";
    pub const DEL: &str = "DEL";
    pub const ZADD: &str = "ZADD";
    pub const ZREM: &str = "ZREM";
    pub const SADD: &str = "SADD";
    pub const SMEMBERS: &str = "SMEMBERS";
    pub const ZRANGE: &str = "ZRANGE";
    pub const ZREVRANGE: &str = "ZREVRANGE";
    pub const ZRANGEBYSCORE: &str = "ZRANGEBYSCORE";
    pub const ZREVRANGEBYSCORE: &str = "ZREVRANGEBYSCORE";
    pub const ZCARD: &str = "ZCARD";
    pub const ZCOUNT: &str = "ZCOUNT";
    pub const LIMIT: &str = "LIMIT";
}
