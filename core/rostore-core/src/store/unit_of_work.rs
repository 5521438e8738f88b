//! Typestate UnitOfWork — 한 번만 제출되는 명령 묶음
//!
//! Typestate 패턴으로 이중 커밋과 폐기 후 사용을 컴파일 타임에 방지합니다.
//! 명령은 로컬 버퍼에 축적되며 `commit()` 시 하나의 트랜잭션
//! (MULTI/EXEC)으로 원자적으로 전송됩니다.

use crate::backend::{Connection, Reply};
use crate::error::StoreResult;
use crate::query::Command;
use std::marker::PhantomData;
use tracing::debug;

/// 작업 단위 상태 트레이트
pub trait UnitState {}

/// Open 상태 — 명령 축적 중
pub struct Open;

/// Committed 상태 — 제출 완료
pub struct Committed;

/// Discarded 상태 — 전송 없이 폐기됨
pub struct Discarded;

impl UnitState for Open {}
impl UnitState for Committed {}
impl UnitState for Discarded {}

/// Typestate UnitOfWork
///
/// Open 상태에서만 명령을 추가할 수 있으며,
/// commit/discard 후에는 컴파일 타임에 사용 불가.
pub struct UnitOfWork<S: UnitState> {
    commands: Vec<Command>,
    replies: Vec<Reply>,
    _state: PhantomData<S>,
}

impl Default for UnitOfWork<Open> {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitOfWork<Open> {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            replies: Vec::new(),
            _state: PhantomData,
        }
    }

    pub fn enqueue(&mut self, cmd: Command) {
        self.commands.push(cmd);
    }

    pub fn extend(&mut self, cmds: impl IntoIterator<Item = Command>) {
        self.commands.extend(cmds);
    }

    /// 보류 중인 명령 개수
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// 모든 명령을 하나의 트랜잭션으로 제출
    ///
    /// 빈 작업 단위는 백엔드와 통신하지 않고 커밋됩니다.
    /// 실패 시 백엔드에는 아무것도 적용되지 않습니다.
    pub fn commit<C: Connection>(self, conn: &mut C) -> StoreResult<UnitOfWork<Committed>> {
        let replies = if self.commands.is_empty() {
            Vec::new()
        } else {
            debug!(commands = self.commands.len(), "committing unit of work");
            conn.transaction(&self.commands)?
        };
        Ok(UnitOfWork {
            commands: Vec::new(),
            replies,
            _state: PhantomData,
        })
    }

    /// 전송 없이 폐기
    pub fn discard(self) -> UnitOfWork<Discarded> {
        if !self.commands.is_empty() {
            debug!(commands = self.commands.len(), "discarding unit of work");
        }
        UnitOfWork {
            commands: Vec::new(),
            replies: Vec::new(),
            _state: PhantomData,
        }
    }
}

impl UnitOfWork<Committed> {
    pub fn is_committed(&self) -> bool {
        true
    }

    /// 트랜잭션 응답 (명령 순서대로)
    pub fn replies(&self) -> &[Reply] {
        &self.replies
    }
}

impl UnitOfWork<Discarded> {
    pub fn is_discarded(&self) -> bool {
        true
    }
}
