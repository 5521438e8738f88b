//! In-memory backend with Redis command semantics
//!
//! Hash, set and sorted-set values in a single keyspace behind one lock.
//! Transactions run under that lock and are rolled back from an undo log
//! when any queued command fails, so they are all-or-nothing.

use super::{BackendFailure, Connection, ConnectionProvider, Reply};
use crate::error::{StoreError, StoreResult};
use crate::query::{Command, names};
use ahash::AHashMap;
use parking_lot::Mutex;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};

const WRONGTYPE: &str = "WRONGTYPE Operation against a key holding the wrong kind of value";

/// Total order over finite scores
#[derive(Debug, Clone, Copy)]
struct ScoreKey(f64);

impl PartialEq for ScoreKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScoreKey {}

impl PartialOrd for ScoreKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScoreKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Sorted set: ordered by (score, member) like Redis
#[derive(Debug, Clone, Default)]
struct SortedSet {
    scores: AHashMap<String, f64>,
    ordered: BTreeSet<(ScoreKey, String)>,
}

impl SortedSet {
    /// Returns `true` when the member is new.
    fn insert(&mut self, member: String, score: f64) -> bool {
        // -0.0 and 0.0 are the same score
        let score = if score == 0.0 { 0.0 } else { score };
        let added = match self.scores.insert(member.clone(), score) {
            Some(old) => {
                self.ordered.remove(&(ScoreKey(old), member.clone()));
                false
            }
            None => true,
        };
        self.ordered.insert((ScoreKey(score), member));
        added
    }

    fn remove(&mut self, member: &str) -> bool {
        match self.scores.remove(member) {
            Some(score) => {
                self.ordered.remove(&(ScoreKey(score), member.to_string()));
                true
            }
            None => false,
        }
    }

    fn len(&self) -> usize {
        self.scores.len()
    }

    fn in_range<'a>(
        &'a self,
        min: &'a ScoreBound,
        max: &'a ScoreBound,
    ) -> impl DoubleEndedIterator<Item = &'a String> + 'a {
        self.ordered
            .iter()
            .filter(move |(score, _)| min.admits_min(score.0) && max.admits_max(score.0))
            .map(|(_, member)| member)
    }
}

#[derive(Debug, Clone)]
enum Value {
    Hash(BTreeMap<String, String>),
    Set(BTreeSet<String>),
    ZSet(SortedSet),
}

/// `ZRANGEBYSCORE` interval endpoint
#[derive(Debug, Clone, Copy)]
struct ScoreBound {
    value: f64,
    exclusive: bool,
}

impl ScoreBound {
    fn parse(raw: &str) -> Result<Self, String> {
        let (exclusive, number) = match raw.strip_prefix('(') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };
        let value = match number {
            "+inf" | "inf" => f64::INFINITY,
            "-inf" => f64::NEG_INFINITY,
            other => other
                .parse::<f64>()
                .map_err(|_| "ERR min or max is not a float".to_string())?,
        };
        if value.is_nan() {
            return Err("ERR min or max is not a float".to_string());
        }
        Ok(Self { value, exclusive })
    }

    fn admits_min(&self, score: f64) -> bool {
        if self.exclusive {
            score > self.value
        } else {
            score >= self.value
        }
    }

    fn admits_max(&self, score: f64) -> bool {
        if self.exclusive {
            score < self.value
        } else {
            score <= self.value
        }
    }
}

fn syntax_error(name: &str) -> Reply {
    Reply::Error(format!(
        "ERR wrong number of arguments for '{}' command",
        name.to_ascii_lowercase()
    ))
}

fn parse_int(raw: &str) -> Result<i64, Reply> {
    raw.parse::<i64>()
        .map_err(|_| Reply::Error("ERR value is not an integer or out of range".to_string()))
}

fn bulk_array<'a>(items: impl Iterator<Item = &'a String>) -> Reply {
    Reply::Array(items.map(|s| Reply::Bulk(s.clone())).collect())
}

/// Glob match supporting `*` and `?`
fn glob_match(pattern: &str, text: &str) -> bool {
    let p: Vec<char> = pattern.chars().collect();
    let t: Vec<char> = text.chars().collect();
    let (mut pi, mut ti) = (0, 0);
    let (mut star, mut mark) = (None, 0);
    while ti < t.len() {
        if pi < p.len() && (p[pi] == '?' || p[pi] == t[ti]) {
            pi += 1;
            ti += 1;
        } else if pi < p.len() && p[pi] == '*' {
            star = Some(pi);
            mark = ti;
            pi += 1;
        } else if let Some(s) = star {
            pi = s + 1;
            mark += 1;
            ti = mark;
        } else {
            return false;
        }
    }
    while pi < p.len() && p[pi] == '*' {
        pi += 1;
    }
    pi == p.len()
}

/// Redis rank range → slice bounds, `None` when empty
fn rank_bounds(len: usize, start: i64, stop: i64) -> Option<(usize, usize)> {
    let len = len as i64;
    let start = if start < 0 { (len + start).max(0) } else { start };
    let stop = if stop < 0 { len + stop } else { stop.min(len - 1) };
    if len == 0 || start > stop || start >= len {
        return None;
    }
    Some((start as usize, stop as usize))
}

/// The keyspace guarded by [`MemoryBackend`]'s lock
#[derive(Debug, Default)]
struct Keyspace {
    data: AHashMap<String, Value>,
}

impl Keyspace {
    fn zset(&self, key: &str) -> Result<Option<&SortedSet>, Reply> {
        match self.data.get(key) {
            None => Ok(None),
            Some(Value::ZSet(z)) => Ok(Some(z)),
            Some(_) => Err(Reply::Error(WRONGTYPE.to_string())),
        }
    }

    /// Keys a write command may modify
    fn touched_keys(name: &str, args: &[String]) -> Vec<String> {
        match name {
            names::DEL => args.to_vec(),
            "FLUSHALL" => Vec::new(),
            _ => args.first().cloned().into_iter().collect(),
        }
    }

    fn dispatch(&mut self, name: &str, args: &[String]) -> Reply {
        let result = match name {
            names::HGETALL => self.hgetall(args),
            names::HSET => self.hset(args),
            names::DEL => self.del(args),
            "EXISTS" => self.exists(args),
            names::ZADD => self.zadd(args),
            names::ZREM => self.zrem(args),
            names::ZRANGE => self.zrange(args, false),
            names::ZREVRANGE => self.zrange(args, true),
            names::ZRANGEBYSCORE => self.zrange_by_score(args, false),
            names::ZREVRANGEBYSCORE => self.zrange_by_score(args, true),
            names::ZCARD => self.zcard(args),
            names::ZCOUNT => self.zcount(args),
            names::SADD => self.sadd(args),
            names::SMEMBERS => self.smembers(args),
            "KEYS" => self.keys(args),
            "FLUSHALL" => {
                self.data.clear();
                Ok(Reply::Status("OK".to_string()))
            }
            other => Err(Reply::Error(format!(
                "ERR unknown command '{}'",
                other.to_ascii_lowercase()
            ))),
        };
        result.unwrap_or_else(|err| err)
    }

    fn hgetall(&self, args: &[String]) -> Result<Reply, Reply> {
        let [key] = args else {
            return Err(syntax_error(names::HGETALL));
        };
        match self.data.get(key) {
            None => Ok(Reply::Array(Vec::new())),
            Some(Value::Hash(h)) => Ok(Reply::Array(
                h.iter()
                    .flat_map(|(f, v)| [Reply::Bulk(f.clone()), Reply::Bulk(v.clone())])
                    .collect(),
            )),
            Some(_) => Err(Reply::Error(WRONGTYPE.to_string())),
        }
    }

    fn hset(&mut self, args: &[String]) -> Result<Reply, Reply> {
        let Some((key, pairs)) = args.split_first() else {
            return Err(syntax_error(names::HSET));
        };
        if pairs.is_empty() || pairs.len() % 2 != 0 {
            return Err(syntax_error(names::HSET));
        }
        let entry = self
            .data
            .entry(key.clone())
            .or_insert_with(|| Value::Hash(BTreeMap::new()));
        let Value::Hash(hash) = entry else {
            return Err(Reply::Error(WRONGTYPE.to_string()));
        };
        let mut added = 0;
        for pair in pairs.chunks(2) {
            if hash.insert(pair[0].clone(), pair[1].clone()).is_none() {
                added += 1;
            }
        }
        Ok(Reply::Int(added))
    }

    fn del(&mut self, args: &[String]) -> Result<Reply, Reply> {
        if args.is_empty() {
            return Err(syntax_error(names::DEL));
        }
        let removed = args
            .iter()
            .filter(|key| self.data.remove(key.as_str()).is_some())
            .count();
        Ok(Reply::Int(removed as i64))
    }

    fn exists(&self, args: &[String]) -> Result<Reply, Reply> {
        if args.is_empty() {
            return Err(syntax_error("EXISTS"));
        }
        let found = args.iter().filter(|key| self.data.contains_key(key.as_str())).count();
        Ok(Reply::Int(found as i64))
    }

    fn zadd(&mut self, args: &[String]) -> Result<Reply, Reply> {
        let Some((key, pairs)) = args.split_first() else {
            return Err(syntax_error(names::ZADD));
        };
        if pairs.is_empty() || pairs.len() % 2 != 0 {
            return Err(syntax_error(names::ZADD));
        }
        let mut parsed = Vec::with_capacity(pairs.len() / 2);
        for pair in pairs.chunks(2) {
            let score = pair[0]
                .parse::<f64>()
                .ok()
                .filter(|s| !s.is_nan())
                .ok_or_else(|| Reply::Error("ERR value is not a valid float".to_string()))?;
            parsed.push((score, pair[1].clone()));
        }
        let entry = self
            .data
            .entry(key.clone())
            .or_insert_with(|| Value::ZSet(SortedSet::default()));
        let Value::ZSet(zset) = entry else {
            return Err(Reply::Error(WRONGTYPE.to_string()));
        };
        let added = parsed
            .into_iter()
            .filter(|(score, member)| zset.insert(member.clone(), *score))
            .count();
        Ok(Reply::Int(added as i64))
    }

    fn zrem(&mut self, args: &[String]) -> Result<Reply, Reply> {
        let Some((key, members)) = args.split_first() else {
            return Err(syntax_error(names::ZREM));
        };
        if members.is_empty() {
            return Err(syntax_error(names::ZREM));
        }
        let removed = match self.data.get_mut(key) {
            None => 0,
            Some(Value::ZSet(zset)) => members.iter().filter(|m| zset.remove(m)).count(),
            Some(_) => return Err(Reply::Error(WRONGTYPE.to_string())),
        };
        if matches!(self.data.get(key), Some(Value::ZSet(z)) if z.len() == 0) {
            self.data.remove(key);
        }
        Ok(Reply::Int(removed as i64))
    }

    fn zrange(&self, args: &[String], reverse: bool) -> Result<Reply, Reply> {
        let name = if reverse { names::ZREVRANGE } else { names::ZRANGE };
        let [key, start, stop] = args else {
            return Err(syntax_error(name));
        };
        let (start, stop) = (parse_int(start)?, parse_int(stop)?);
        let Some(zset) = self.zset(key)? else {
            return Ok(Reply::Array(Vec::new()));
        };
        let Some((from, to)) = rank_bounds(zset.len(), start, stop) else {
            return Ok(Reply::Array(Vec::new()));
        };
        let members = zset.ordered.iter().map(|(_, m)| m);
        let count = to - from + 1;
        if reverse {
            Ok(bulk_array(members.rev().skip(from).take(count)))
        } else {
            Ok(bulk_array(members.skip(from).take(count)))
        }
    }

    fn zrange_by_score(&self, args: &[String], reverse: bool) -> Result<Reply, Reply> {
        let name = if reverse {
            names::ZREVRANGEBYSCORE
        } else {
            names::ZRANGEBYSCORE
        };
        let (key, first, second, rest) = match args {
            [key, first, second, rest @ ..] => (key, first, second, rest),
            _ => return Err(syntax_error(name)),
        };
        // reverse form takes (max, min)
        let (min, max) = if reverse {
            (ScoreBound::parse(second), ScoreBound::parse(first))
        } else {
            (ScoreBound::parse(first), ScoreBound::parse(second))
        };
        let (min, max) = (min.map_err(Reply::Error)?, max.map_err(Reply::Error)?);
        let (offset, count) = match rest {
            [] => (0, -1),
            [limit, offset, count] if limit.eq_ignore_ascii_case(names::LIMIT) => {
                (parse_int(offset)?, parse_int(count)?)
            }
            _ => return Err(Reply::Error("ERR syntax error".to_string())),
        };
        if offset < 0 {
            return Ok(Reply::Array(Vec::new()));
        }
        let Some(zset) = self.zset(key)? else {
            return Ok(Reply::Array(Vec::new()));
        };
        let take = if count < 0 { usize::MAX } else { count as usize };
        let members = zset.in_range(&min, &max);
        if reverse {
            Ok(bulk_array(members.rev().skip(offset as usize).take(take)))
        } else {
            Ok(bulk_array(members.skip(offset as usize).take(take)))
        }
    }

    fn zcard(&self, args: &[String]) -> Result<Reply, Reply> {
        let [key] = args else {
            return Err(syntax_error(names::ZCARD));
        };
        let len = self.zset(key)?.map_or(0, SortedSet::len);
        Ok(Reply::Int(len as i64))
    }

    fn zcount(&self, args: &[String]) -> Result<Reply, Reply> {
        let [key, min, max] = args else {
            return Err(syntax_error(names::ZCOUNT));
        };
        let min = ScoreBound::parse(min).map_err(Reply::Error)?;
        let max = ScoreBound::parse(max).map_err(Reply::Error)?;
        let count = self
            .zset(key)?
            .map_or(0, |zset| zset.in_range(&min, &max).count());
        Ok(Reply::Int(count as i64))
    }

    fn sadd(&mut self, args: &[String]) -> Result<Reply, Reply> {
        let Some((key, members)) = args.split_first() else {
            return Err(syntax_error(names::SADD));
        };
        if members.is_empty() {
            return Err(syntax_error(names::SADD));
        }
        let entry = self
            .data
            .entry(key.clone())
            .or_insert_with(|| Value::Set(BTreeSet::new()));
        let Value::Set(set) = entry else {
            return Err(Reply::Error(WRONGTYPE.to_string()));
        };
        let added = members.iter().filter(|m| set.insert((*m).clone())).count();
        Ok(Reply::Int(added as i64))
    }

    fn smembers(&self, args: &[String]) -> Result<Reply, Reply> {
        let [key] = args else {
            return Err(syntax_error(names::SMEMBERS));
        };
        match self.data.get(key) {
            None => Ok(Reply::Array(Vec::new())),
            Some(Value::Set(set)) => Ok(bulk_array(set.iter())),
            Some(_) => Err(Reply::Error(WRONGTYPE.to_string())),
        }
    }

    fn keys(&self, args: &[String]) -> Result<Reply, Reply> {
        let [pattern] = args else {
            return Err(syntax_error("KEYS"));
        };
        let mut keys: Vec<&String> = self
            .data
            .keys()
            .filter(|k| glob_match(pattern, k))
            .collect();
        keys.sort();
        Ok(bulk_array(keys.into_iter()))
    }
}

fn wire_args(cmd: &Command) -> Vec<String> {
    cmd.args.iter().map(|a| a.as_wire()).collect()
}

/// In-memory backend — `ConnectionProvider` over a shared keyspace
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    keyspace: Arc<Mutex<Keyspace>>,
    unavailable: Arc<AtomicBool>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// 연결 획득을 실패시킴 (장애 시뮬레이션)
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, AtomicOrdering::SeqCst);
    }

    /// 패턴과 일치하는 key 목록 (정렬됨)
    pub fn keys(&self, pattern: &str) -> Vec<String> {
        let keyspace = self.keyspace.lock();
        let mut keys: Vec<String> = keyspace
            .data
            .keys()
            .filter(|k| glob_match(pattern, k))
            .cloned()
            .collect();
        keys.sort();
        keys
    }

    pub fn flush_all(&self) {
        self.keyspace.lock().data.clear();
    }

    /// 획득 없이 단일 명령 실행 (테스트/진단용)
    pub fn execute(&self, cmd: &Command) -> Reply {
        self.keyspace.lock().dispatch(cmd.name, &wire_args(cmd))
    }
}

impl ConnectionProvider for MemoryBackend {
    type Conn = MemoryConnection;

    fn acquire(&self) -> StoreResult<MemoryConnection> {
        if self.unavailable.load(AtomicOrdering::SeqCst) {
            return Err(StoreError::backend(
                "failed to acquire a connection",
                BackendFailure("backend unavailable".to_string()),
            ));
        }
        Ok(MemoryConnection {
            keyspace: Arc::clone(&self.keyspace),
        })
    }
}

/// [`MemoryBackend`] connection
#[derive(Debug)]
pub struct MemoryConnection {
    keyspace: Arc<Mutex<Keyspace>>,
}

impl Connection for MemoryConnection {
    fn execute(&mut self, cmd: &Command) -> StoreResult<Reply> {
        Ok(self.keyspace.lock().dispatch(cmd.name, &wire_args(cmd)))
    }

    fn pipeline(&mut self, cmds: &[Command]) -> StoreResult<Vec<Reply>> {
        let mut keyspace = self.keyspace.lock();
        Ok(cmds
            .iter()
            .map(|cmd| keyspace.dispatch(cmd.name, &wire_args(cmd)))
            .collect())
    }

    fn transaction(&mut self, cmds: &[Command]) -> StoreResult<Vec<Reply>> {
        let mut keyspace = self.keyspace.lock();
        let mut undo: AHashMap<String, Option<Value>> = AHashMap::new();
        let mut replies = Vec::with_capacity(cmds.len());

        for cmd in cmds {
            let args = wire_args(cmd);
            if cmd.name == "FLUSHALL" {
                for (key, value) in &keyspace.data {
                    undo.entry(key.clone()).or_insert_with(|| Some(value.clone()));
                }
            }
            for key in Keyspace::touched_keys(cmd.name, &args) {
                if !undo.contains_key(&key) {
                    let previous = keyspace.data.get(&key).cloned();
                    undo.insert(key, previous);
                }
            }
            match keyspace.dispatch(cmd.name, &args) {
                Reply::Error(message) => {
                    for (key, previous) in undo {
                        match previous {
                            Some(value) => {
                                keyspace.data.insert(key, value);
                            }
                            None => {
                                keyspace.data.remove(&key);
                            }
                        }
                    }
                    return Err(StoreError::backend(
                        format!("transaction aborted at {cmd}"),
                        BackendFailure(message),
                    ));
                }
                reply => replies.push(reply),
            }
        }
        Ok(replies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(conn: &mut MemoryConnection, cmd: Command) -> Reply {
        conn.execute(&cmd).unwrap()
    }

    fn strings(reply: Reply) -> Vec<String> {
        reply
            .into_strings(&Command::new("TEST"))
            .unwrap()
    }

    fn seeded() -> MemoryConnection {
        let backend = MemoryBackend::new();
        let mut conn = backend.acquire().unwrap();
        let cmd = Command::new(names::ZADD)
            .arg("z")
            .args(["1", "a", "2", "b", "3", "c", "3", "d", "5", "e"]);
        assert_eq!(run(&mut conn, cmd), Reply::Int(5));
        conn
    }

    #[test]
    fn test_hash_roundtrip() {
        let backend = MemoryBackend::new();
        let mut conn = backend.acquire().unwrap();
        let set = Command::new(names::HSET).args(["h", "f1", "v1", "f2", "v2"]);
        assert_eq!(run(&mut conn, set), Reply::Int(2));
        let fields = run(&mut conn, Command::new(names::HGETALL).arg("h"))
            .into_field_map(&Command::new(names::HGETALL))
            .unwrap();
        assert_eq!(fields["f1"], "v1");
        assert_eq!(fields["f2"], "v2");
    }

    #[test]
    fn test_zrange_ranks() {
        let mut conn = seeded();
        let all = run(&mut conn, Command::new(names::ZRANGE).args(["z", "0", "-1"]));
        assert_eq!(strings(all), ["a", "b", "c", "d", "e"]);
        let mid = run(&mut conn, Command::new(names::ZRANGE).args(["z", "1", "2"]));
        assert_eq!(strings(mid), ["b", "c"]);
        let rev = run(&mut conn, Command::new(names::ZREVRANGE).args(["z", "0", "1"]));
        assert_eq!(strings(rev), ["e", "d"]);
        let past = run(&mut conn, Command::new(names::ZRANGE).args(["z", "10", "-1"]));
        assert!(strings(past).is_empty());
    }

    #[test]
    fn test_zrange_by_score() {
        let mut conn = seeded();
        let inc = run(
            &mut conn,
            Command::new(names::ZRANGEBYSCORE).args(["z", "2", "3"]),
        );
        assert_eq!(strings(inc), ["b", "c", "d"]);
        let exc = run(
            &mut conn,
            Command::new(names::ZRANGEBYSCORE).args(["z", "(2", "+inf"]),
        );
        assert_eq!(strings(exc), ["c", "d", "e"]);
        let rev = run(
            &mut conn,
            Command::new(names::ZREVRANGEBYSCORE).args(["z", "+inf", "3", "LIMIT", "1", "2"]),
        );
        assert_eq!(strings(rev), ["d", "c"]);
        let unlimited = run(
            &mut conn,
            Command::new(names::ZRANGEBYSCORE).args(["z", "-inf", "+inf", "LIMIT", "3", "-1"]),
        );
        assert_eq!(strings(unlimited), ["d", "e"]);
    }

    #[test]
    fn test_zcount_and_zcard() {
        let mut conn = seeded();
        assert_eq!(run(&mut conn, Command::new(names::ZCARD).arg("z")), Reply::Int(5));
        assert_eq!(
            run(&mut conn, Command::new(names::ZCOUNT).args(["z", "(1", "3"])),
            Reply::Int(3)
        );
        assert_eq!(run(&mut conn, Command::new(names::ZCARD).arg("missing")), Reply::Int(0));
    }

    #[test]
    fn test_zadd_updates_score() {
        let mut conn = seeded();
        assert_eq!(
            run(&mut conn, Command::new(names::ZADD).args(["z", "0", "e"])),
            Reply::Int(0)
        );
        let all = run(&mut conn, Command::new(names::ZRANGE).args(["z", "0", "0"]));
        assert_eq!(strings(all), ["e"]);
    }

    #[test]
    fn test_zrem_removes_empty_key() {
        let backend = MemoryBackend::new();
        let mut conn = backend.acquire().unwrap();
        run(&mut conn, Command::new(names::ZADD).args(["z", "1", "a"]));
        assert_eq!(
            run(&mut conn, Command::new(names::ZREM).args(["z", "a", "b"])),
            Reply::Int(1)
        );
        assert!(backend.keys("*").is_empty());
    }

    #[test]
    fn test_wrong_type() {
        let backend = MemoryBackend::new();
        let mut conn = backend.acquire().unwrap();
        run(&mut conn, Command::new(names::HSET).args(["k", "f", "v"]));
        let reply = run(&mut conn, Command::new(names::ZADD).args(["k", "1", "m"]));
        assert!(matches!(reply, Reply::Error(e) if e.starts_with("WRONGTYPE")));
    }

    #[test]
    fn test_transaction_rolls_back_on_error() {
        let backend = MemoryBackend::new();
        let mut conn = backend.acquire().unwrap();
        run(&mut conn, Command::new(names::HSET).args(["k", "f", "v"]));

        let result = conn.transaction(&[
            Command::new(names::SADD).args(["s", "a"]),
            Command::new(names::DEL).arg("k"),
            Command::new(names::HSET).args(["k2", "f", "v"]),
            Command::new(names::ZADD).args(["k2", "1", "m"]),
        ]);
        assert!(result.is_err());
        assert_eq!(backend.keys("*"), ["k"]);
    }

    #[test]
    fn test_transaction_commits() {
        let backend = MemoryBackend::new();
        let mut conn = backend.acquire().unwrap();
        let replies = conn
            .transaction(&[
                Command::new(names::SADD).args(["s", "a", "b"]),
                Command::new(names::ZADD).args(["z", "1", "a"]),
            ])
            .unwrap();
        assert_eq!(replies, vec![Reply::Int(2), Reply::Int(1)]);
        assert_eq!(backend.keys("*"), ["s", "z"]);
    }

    #[test]
    fn test_unavailable_backend() {
        let backend = MemoryBackend::new();
        backend.set_unavailable(true);
        assert!(backend.acquire().is_err());
        backend.set_unavailable(false);
        assert!(backend.acquire().is_ok());
    }

    #[test]
    fn test_glob_match() {
        assert!(glob_match("*", "Post:1"));
        assert!(glob_match("Post:*", "Post:1"));
        assert!(glob_match("Post/?ecent", "Post/recent"));
        assert!(!glob_match("Post:*", "Post/recent"));
    }

    #[test]
    fn test_rank_bounds() {
        assert_eq!(rank_bounds(5, 0, -1), Some((0, 4)));
        assert_eq!(rank_bounds(5, 3, 100), Some((3, 4)));
        assert_eq!(rank_bounds(5, 4, 2), None);
        assert_eq!(rank_bounds(0, 0, -1), None);
        assert_eq!(rank_bounds(5, -2, -1), Some((3, 4)));
    }
}
