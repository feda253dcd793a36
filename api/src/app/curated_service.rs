//! Curated session service
//!
//! The live consensus round: one moderator-controlled session at a time,
//! named expert slots, and a permanent curated ranking written on confirm.
//! The single-active invariant is enforced by the store, not in memory, so
//! multiple server instances agree.

use std::sync::Arc;

use serde::Serialize;

use crate::app::rating_config::RatingConfig;
use crate::domain::entities::{
    running_mean, score_in_scale, CuratedEntry, CuratedRanking, CuratedSession, CuratedSessionId,
    NewCuratedEntry, PlayerId, MAX_SCORE, MIN_SCORE,
};
use crate::domain::ports::{
    CuratedRankingRepository, CuratedSessionRepository, PlayerRepository,
};
use crate::error::{AppError, DomainError};

/// The active session as clients poll it
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session: CuratedSession,
    pub entries: Vec<CuratedEntry>,
    /// Mean of the non-null scores, recomputed on every fetch. Display
    /// only; gating always re-reads the entries.
    pub running_mean: Option<f64>,
}

/// A curated ranking row joined with its player's gamertag
#[derive(Debug, Clone, Serialize)]
pub struct CuratedRankingEntry {
    pub player_id: PlayerId,
    pub gamertag: String,
    pub score: i32,
    pub confirmed_at: chrono::DateTime<chrono::Utc>,
}

/// Service for the curated consensus protocol
pub struct CuratedSessionService<PR, SR, CR>
where
    PR: PlayerRepository,
    SR: CuratedSessionRepository,
    CR: CuratedRankingRepository,
{
    players: Arc<PR>,
    sessions: Arc<SR>,
    rankings: Arc<CR>,
    config: RatingConfig,
}

impl<PR, SR, CR> CuratedSessionService<PR, SR, CR>
where
    PR: PlayerRepository,
    SR: CuratedSessionRepository,
    CR: CuratedRankingRepository,
{
    pub fn new(players: Arc<PR>, sessions: Arc<SR>, rankings: Arc<CR>) -> Self {
        Self {
            players,
            sessions,
            rankings,
            config: RatingConfig::default(),
        }
    }

    pub fn with_config(mut self, config: RatingConfig) -> Self {
        self.config = config;
        self
    }

    /// Open a session for a player, force-deactivating any prior active
    /// session in the same store transaction.
    pub async fn create_session(&self, player_id: &PlayerId) -> Result<CuratedSession, AppError> {
        self.players
            .find_by_id(player_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Player not found: {}", player_id)))?;

        let session = self.sessions.create_active(player_id).await?;
        tracing::info!(
            session_id = %session.id,
            player_id = %player_id,
            "curated session opened"
        );
        Ok(session)
    }

    /// The active session with its entries and running mean, or None.
    /// This is the poll endpoint; everything here is recomputed per fetch.
    pub async fn current_session(&self) -> Result<Option<SessionView>, AppError> {
        let Some(session) = self.sessions.find_active().await? else {
            return Ok(None);
        };
        let entries = self.sessions.find_entries(&session.id).await?;
        let mean = running_mean(&entries);
        Ok(Some(SessionView {
            session,
            entries,
            running_mean: mean,
        }))
    }

    /// Upsert one named slot. Votes carry the session id so a vote meant
    /// for a superseded session fails instead of landing in the new one.
    pub async fn submit_vote(
        &self,
        session_id: &CuratedSessionId,
        entry: NewCuratedEntry,
    ) -> Result<CuratedEntry, AppError> {
        let rater_name = entry.rater_name.trim().to_string();
        if rater_name.is_empty() {
            return Err(DomainError::Validation("rater name must not be empty".to_string()).into());
        }
        if let Some(score) = entry.score {
            if !score_in_scale(score) {
                return Err(DomainError::Validation(format!(
                    "score {} is outside the {}-{} scale",
                    score, MIN_SCORE, MAX_SCORE
                ))
                .into());
            }
        }

        let session = self
            .sessions
            .find_by_id(session_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Session not found: {}", session_id)))?;
        if !session.is_active {
            return Err(DomainError::Conflict(
                "session has ended; refresh to pick up the current one".to_string(),
            )
            .into());
        }

        let entries = self.sessions.find_entries(&session.id).await?;
        let existing = entries.iter().find(|e| e.rater_name == rater_name);
        match existing {
            Some(current) if current.confirmed && entry.confirmed => {
                // Locked slot: only the same name submitting
                // confirmed=false may change it again.
                return Err(DomainError::Conflict(format!(
                    "entry for '{}' is confirmed; submit with confirmed=false to unlock",
                    rater_name
                ))
                .into());
            }
            Some(_) => {}
            None => {
                if entries.len() >= self.config.max_curated_slots {
                    return Err(DomainError::Validation(format!(
                        "session already has {} expert slots",
                        self.config.max_curated_slots
                    ))
                    .into());
                }
            }
        }

        let saved = self
            .sessions
            .upsert_entry(
                &session.id,
                &NewCuratedEntry {
                    rater_name,
                    score: entry.score,
                    note: entry.note,
                    confirmed: entry.confirmed,
                },
            )
            .await?;

        tracing::debug!(
            session_id = %session.id,
            rater = %saved.rater_name,
            score = ?saved.score,
            confirmed = saved.confirmed,
            "curated vote recorded"
        );

        Ok(saved)
    }

    /// Accept the session's consensus into the permanent curated ranking.
    ///
    /// The deactivation is conditional on the row still being active, so a
    /// session superseded by a racing create can never be confirmed.
    pub async fn confirm_session(&self) -> Result<CuratedRanking, AppError> {
        let session = self.sessions.find_active().await?.ok_or_else(|| {
            DomainError::Conflict("no active session to confirm".to_string())
        })?;

        let entries = self.sessions.find_entries(&session.id).await?;
        let Some(mean) = running_mean(&entries) else {
            return Err(DomainError::Validation(
                "cannot confirm a session without any scores".to_string(),
            )
            .into());
        };
        let score = mean.round() as i32;

        if !self.sessions.confirm(&session.id).await? {
            return Err(DomainError::Conflict(
                "session was superseded before it could be confirmed".to_string(),
            )
            .into());
        }

        let ranking = self.rankings.upsert(&session.player_id, score).await?;
        tracing::info!(
            session_id = %session.id,
            player_id = %session.player_id,
            score,
            "curated session confirmed"
        );
        Ok(ranking)
    }

    /// Discard the active session without writing anything permanent.
    /// Returns false when there was nothing to end (already gone).
    pub async fn end_session(&self) -> Result<bool, AppError> {
        let Some(session) = self.sessions.find_active().await? else {
            return Ok(false);
        };
        let ended = self.sessions.deactivate(&session.id).await?;
        if ended {
            tracing::info!(session_id = %session.id, "curated session discarded");
        }
        Ok(ended)
    }

    /// The permanent curated ranking, highest score first, joined with
    /// player gamertags.
    pub async fn curated_rankings(&self) -> Result<Vec<CuratedRankingEntry>, AppError> {
        let rows = self.rankings.list().await?;
        let players = self.players.find_all().await?;
        let tags: std::collections::HashMap<PlayerId, String> = players
            .into_iter()
            .map(|p| (p.id, p.gamertag))
            .collect();
        Ok(rows
            .into_iter()
            .map(|row| CuratedRankingEntry {
                gamertag: tags.get(&row.player_id).cloned().unwrap_or_default(),
                player_id: row.player_id,
                score: row.score,
                confirmed_at: row.confirmed_at,
            })
            .collect())
    }
}
