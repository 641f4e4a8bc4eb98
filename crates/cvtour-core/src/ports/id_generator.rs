//! IdGenerator port - セッション ID の生成
//!
//! SessionId の timestamp 部分がツアーの開始時刻になるので、
//! Clock を差し替えると開始時刻も固定できます。

use std::sync::Arc;

use ulid::Ulid;

use crate::domain::SessionId;
use crate::ports::Clock;

pub trait IdGenerator: Send + Sync {
    fn next_session_id(&self) -> SessionId;
}

/// Clock time + random bits.
pub struct UlidGenerator {
    clock: Arc<dyn Clock>,
}

impl UlidGenerator {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

impl IdGenerator for UlidGenerator {
    fn next_session_id(&self) -> SessionId {
        let now = self.clock.now().timestamp_millis() as u64;
        SessionId::new(Ulid::from_parts(now, rand::random()))
    }
}
