//! ゲームセッション管理モジュール
//! ブラウザごとに独立したゲームインスタンスを保持し、
//! セッション数制限、タイムアウト処理、クリーンアップを担当する。

use chrono::{Duration, Utc};
use dashmap::DashMap;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{GameError, Result};
use crate::game::GameController;

/// ゲームセッションの管理を行うメイン構造体
/// スレッドセーフなDashMapで同時アクセスを処理する
#[derive(Debug, Clone)]
pub struct GameSessionManager {
    /// アクティブなゲームのコレクション
    sessions: Arc<DashMap<Uuid, GameController>>,
    /// 上限チェックと追加を一体で行うためのロック
    create_lock: Arc<Mutex<()>>,
    /// 同時存在可能な最大セッション数
    max_sessions: usize,
    /// 無操作でセッションを破棄するまでの時間（分）
    session_timeout_minutes: i64,
}

impl GameSessionManager {
    /// デフォルトタイムアウト（30分）でセッションマネージャーを作成
    pub fn new(max_sessions: usize) -> Self {
        Self::with_timeout(max_sessions, 30)
    }

    pub fn with_timeout(max_sessions: usize, timeout_minutes: i64) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            create_lock: Arc::new(Mutex::new(())),
            max_sessions,
            session_timeout_minutes: timeout_minutes,
        }
    }

    /// 新しいゲームを作成する
    /// 最大セッション数に達している場合はエラーを返す
    pub fn create_session(&self) -> Result<Uuid> {
        let _guard = self.create_lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if self.sessions.len() >= self.max_sessions {
            return Err(GameError::SessionLimitExceeded { max: self.max_sessions });
        }

        let game = GameController::new();
        let game_id = game.id;
        self.sessions.insert(game_id, game);

        info!(%game_id, total = self.sessions.len(), "game session created");
        Ok(game_id)
    }

    /// 指定したIDのゲームのスナップショットを取得する
    pub fn get_session(&self, game_id: &Uuid) -> Result<GameController> {
        self.sessions
            .get(game_id)
            .map(|entry| entry.value().clone())
            .ok_or(GameError::GameNotFound { game_id: *game_id })
    }

    /// 指定したゲームをロックしたまま操作する
    /// 1つのゲームへの操作は常に逐次的に適用される
    pub fn with_session_mut<T>(
        &self,
        game_id: &Uuid,
        f: impl FnOnce(&mut GameController) -> Result<T>,
    ) -> Result<T> {
        match self.sessions.get_mut(game_id) {
            Some(mut entry) => f(entry.value_mut()),
            None => Err(GameError::GameNotFound { game_id: *game_id }),
        }
    }

    pub fn remove_session(&self, game_id: &Uuid) -> Result<GameController> {
        match self.sessions.remove(game_id) {
            Some((_, game)) => {
                info!(%game_id, "game session removed");
                Ok(game)
            }
            None => Err(GameError::GameNotFound { game_id: *game_id }),
        }
    }

    pub fn list_sessions(&self) -> Vec<GameController> {
        self.sessions.iter().map(|entry| entry.value().clone()).collect()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    pub fn session_exists(&self, game_id: &Uuid) -> bool {
        self.sessions.contains_key(game_id)
    }

    /// 一定時間操作のないゲームを削除する
    /// 戻り値は削除した件数
    pub fn cleanup_inactive_sessions(&self) -> usize {
        let cutoff_time = match Duration::try_minutes(self.session_timeout_minutes)
            .and_then(|timeout| Utc::now().checked_sub_signed(timeout))
        {
            Some(cutoff_time) => cutoff_time,
            None => {
                warn!(
                    timeout_minutes = self.session_timeout_minutes,
                    "session timeout out of range; skipping cleanup"
                );
                return 0;
            }
        };
        let before = self.sessions.len();

        self.sessions.retain(|_, game| game.last_updated >= cutoff_time);

        let removed_count = before.saturating_sub(self.sessions.len());
        if removed_count > 0 {
            info!(removed_count, "inactive game sessions cleaned up");
        }
        removed_count
    }

    pub fn get_stats(&self) -> SessionStats {
        let decided_games = self
            .sessions
            .iter()
            .filter(|entry| entry.value().status().is_decided())
            .count();

        SessionStats {
            total_sessions: self.sessions.len(),
            max_sessions: self.max_sessions,
            decided_games,
        }
    }
}

impl Default for GameSessionManager {
    fn default() -> Self {
        Self::new(100)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct SessionStats {
    pub total_sessions: usize,
    pub max_sessions: usize,
    pub decided_games: usize,
}
