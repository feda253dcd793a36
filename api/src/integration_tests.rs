//! Full integration tests for the SquadRank API
//!
//! Service-level flows wired over the in-memory repositories, covering the
//! paths a real deployment exercises:
//! 1. Rater submits a batch -> deviation guard -> ranking reflects it
//! 2. Moderator snapshots a season -> all-time merge (legends stay live)
//! 3. Moderator runs a curated session -> permanent curated ranking
//! 4. Anomaly scan -> skip -> rescan
//!
//! Run with: cargo test integration_tests

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::app::{
        AnomalyService, CuratedSessionService, RankingService, RatingService, SnapshotService,
    };
    use crate::domain::entities::{
        Category, Division, NewCuratedEntry, NewRating, Player, Rater,
    };
    use crate::error::AppError;
    use crate::test_utils::{
        rate_enough_to_qualify, test_player_in_category, test_rater_with_division,
        InMemoryAnomalySkipRepository, InMemoryCuratedRankingRepository,
        InMemoryCuratedSessionRepository, InMemoryPlayerRepository, InMemoryRaterRepository,
        InMemoryRatingRepository, InMemorySnapshotRepository,
    };

    struct TestStore {
        players: Arc<InMemoryPlayerRepository>,
        raters: Arc<InMemoryRaterRepository>,
        ratings: Arc<InMemoryRatingRepository>,
        snapshots: Arc<InMemorySnapshotRepository>,
        sessions: Arc<InMemoryCuratedSessionRepository>,
        curated_rankings: Arc<InMemoryCuratedRankingRepository>,
        skips: Arc<InMemoryAnomalySkipRepository>,
    }

    impl TestStore {
        fn new() -> Self {
            let raters = Arc::new(InMemoryRaterRepository::new());
            Self {
                players: Arc::new(InMemoryPlayerRepository::new()),
                ratings: Arc::new(
                    InMemoryRatingRepository::new().with_rater_store(raters.clone()),
                ),
                raters,
                snapshots: Arc::new(InMemorySnapshotRepository::new()),
                sessions: Arc::new(InMemoryCuratedSessionRepository::new()),
                curated_rankings: Arc::new(InMemoryCuratedRankingRepository::new()),
                skips: Arc::new(InMemoryAnomalySkipRepository::new()),
            }
        }

        fn qualified_rater(&self, division: Option<Division>) -> Rater {
            let rater = test_rater_with_division(division);
            self.raters.insert(rater.clone());
            rate_enough_to_qualify(&self.players, &self.ratings, &rater);
            rater
        }

        fn player(&self, category: Category) -> Player {
            let player = test_player_in_category(category);
            self.players.insert(player.clone());
            player
        }
    }

    fn entry(player: &Player, score: i32) -> NewRating {
        NewRating {
            player_id: player.id,
            score,
            note: None,
        }
    }

    /// Basic smoke test - verify services can be created
    #[tokio::test]
    async fn services_can_be_created() {
        let store = TestStore::new();

        let _ranking = RankingService::new(
            store.players.clone(),
            store.raters.clone(),
            store.ratings.clone(),
        );
        let _rating = RatingService::new(
            store.players.clone(),
            store.raters.clone(),
            store.ratings.clone(),
        );
        let _anomaly = AnomalyService::new(
            store.players.clone(),
            store.raters.clone(),
            store.ratings.clone(),
            store.skips.clone(),
        );
        let _snapshot = SnapshotService::new(
            store.players.clone(),
            store.raters.clone(),
            store.ratings.clone(),
            store.snapshots.clone(),
        );
        let _curated = CuratedSessionService::new(
            store.players.clone(),
            store.sessions.clone(),
            store.curated_rankings.clone(),
        );
    }

    /// A committed batch shows up in the ranking; a later over-the-band
    /// vote bounces off the guard without disturbing the board.
    #[tokio::test]
    async fn submit_then_rank_flow() {
        let store = TestStore::new();
        let rating_service = RatingService::new(
            store.players.clone(),
            store.raters.clone(),
            store.ratings.clone(),
        );
        let ranking_service = RankingService::new(
            store.players.clone(),
            store.raters.clone(),
            store.ratings.clone(),
        );

        let striker = store.player(Category::Outfield);
        let keeper = store.player(Category::Goalkeeper);

        // Five qualified voters agree the striker is an 84.
        for _ in 0..5 {
            let voter = store.qualified_rater(Some(Division::First));
            rating_service
                .submit_ratings(&voter.id, vec![entry(&striker, 84), entry(&keeper, 77)])
                .await
                .expect("in-band batch commits");
        }

        let board = ranking_service
            .get_ranking(Category::Outfield)
            .await
            .unwrap();
        let row = board.iter().find(|r| r.player_id == striker.id).unwrap();
        assert_eq!(row.score, 84.0);
        assert_eq!(row.rating_count, 5);

        // A sixth voter tries to drag the striker to 50: the average is 84
        // over 5 votes, so the whole batch is rejected.
        let troll = store.qualified_rater(None);
        let err = rating_service
            .submit_ratings(&troll.id, vec![entry(&striker, 50)])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::RatingRejected(_)));

        let board = ranking_service
            .get_ranking(Category::Outfield)
            .await
            .unwrap();
        let row = board.iter().find(|r| r.player_id == striker.id).unwrap();
        assert_eq!(row.score, 84.0, "rejected batch left no trace");
    }

    /// Season snapshots freeze ordinary players; the all-time merge
    /// averages periods while a legend keeps tracking live votes.
    #[tokio::test]
    async fn snapshot_then_all_time_flow() {
        let store = TestStore::new();
        let rating_service = RatingService::new(
            store.players.clone(),
            store.raters.clone(),
            store.ratings.clone(),
        );
        let snapshot_service = SnapshotService::new(
            store.players.clone(),
            store.raters.clone(),
            store.ratings.clone(),
            store.snapshots.clone(),
        );

        let veteran = store.player(Category::Outfield);
        let legend = {
            let mut p = test_player_in_category(Category::Outfield);
            p.is_legend = true;
            store.players.insert(p.clone());
            p
        };
        let voter = store.qualified_rater(Some(Division::Elite));

        rating_service
            .submit_ratings(&voter.id, vec![entry(&veteran, 70), entry(&legend, 70)])
            .await
            .unwrap();
        snapshot_service
            .create_snapshot("season-1", None, None)
            .await
            .unwrap();

        rating_service
            .submit_ratings(&voter.id, vec![entry(&veteran, 90), entry(&legend, 90)])
            .await
            .unwrap();
        snapshot_service
            .create_snapshot("season-2", None, None)
            .await
            .unwrap();

        let all_time = snapshot_service.all_time_ranking(None).await.unwrap();
        let veteran_row = all_time.iter().find(|e| e.player_id == veteran.id).unwrap();
        let legend_row = all_time.iter().find(|e| e.player_id == legend.id).unwrap();

        // Ordinary player: mean of the two frozen seasons.
        assert_eq!(veteran_row.score, 80.0);
        assert_eq!(veteran_row.period_count, 2);
        // Legend: live aggregate only, history discarded.
        assert_eq!(legend_row.score, 90.0);
        assert_eq!(legend_row.period_count, 1);
        // The legend outranks the veteran on the merged board.
        assert!(legend_row.rank < veteran_row.rank);
    }

    /// The full curated lifecycle, including a superseding session.
    #[tokio::test]
    async fn curated_session_flow() {
        let store = TestStore::new();
        let curated = CuratedSessionService::new(
            store.players.clone(),
            store.sessions.clone(),
            store.curated_rankings.clone(),
        );

        let icon = store.player(Category::Outfield);
        let session = curated.create_session(&icon.id).await.unwrap();

        for (name, score) in [("panel-a", Some(80)), ("panel-b", Some(85)), ("panel-c", None)] {
            curated
                .submit_vote(
                    &session.id,
                    NewCuratedEntry {
                        rater_name: name.to_string(),
                        score,
                        note: None,
                        confirmed: score.is_some(),
                    },
                )
                .await
                .unwrap();
        }

        let view = curated.current_session().await.unwrap().unwrap();
        assert_eq!(view.running_mean, Some(82.5));

        // A new session for another player supersedes this one; the old
        // session can no longer be voted into or confirmed.
        let other = store.player(Category::Manager);
        let second = curated.create_session(&other.id).await.unwrap();
        let err = curated
            .submit_vote(
                &session.id,
                NewCuratedEntry {
                    rater_name: "latecomer".to_string(),
                    score: Some(90),
                    note: None,
                    confirmed: false,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Domain(_)));

        // Confirm the new session.
        curated
            .submit_vote(
                &second.id,
                NewCuratedEntry {
                    rater_name: "panel-a".to_string(),
                    score: Some(91),
                    note: Some("generational".to_string()),
                    confirmed: true,
                },
            )
            .await
            .unwrap();
        let ranking = curated.confirm_session().await.unwrap();
        assert_eq!(ranking.player_id, other.id);
        assert_eq!(ranking.score, 91);

        let rankings = curated.curated_rankings().await.unwrap();
        assert_eq!(rankings.len(), 1);
        assert_eq!(rankings[0].player_id, other.id);
        assert!(curated.current_session().await.unwrap().is_none());
    }

    /// Scan, dismiss, rescan: the skip list suppresses repeat flags.
    #[tokio::test]
    async fn anomaly_triage_flow() {
        let store = TestStore::new();
        let rating_service = RatingService::new(
            store.players.clone(),
            store.raters.clone(),
            store.ratings.clone(),
        );
        let anomaly_service = AnomalyService::new(
            store.players.clone(),
            store.raters.clone(),
            store.ratings.clone(),
            store.skips.clone(),
        );

        // Two friends boost a brand-new player to the mid 90s.
        let newcomer = store.player(Category::Outfield);
        for score in [95, 97] {
            let friend = store.qualified_rater(None);
            rating_service
                .submit_ratings(&friend.id, vec![entry(&newcomer, score)])
                .await
                .unwrap();
        }

        let report = anomaly_service.scan().await.unwrap();
        let flagged: Vec<_> = report
            .flags
            .iter()
            .filter(|f| f.player_id == newcomer.id)
            .collect();
        assert_eq!(flagged.len(), 2, "every boost rating flagged individually");

        // A moderator reviews one and dismisses it.
        anomaly_service.skip(&flagged[0].rating_id).await.unwrap();
        let report = anomaly_service.scan().await.unwrap();
        assert_eq!(
            report
                .flags
                .iter()
                .filter(|f| f.player_id == newcomer.id)
                .count(),
            1
        );
    }
}
