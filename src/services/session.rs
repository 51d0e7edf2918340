use crate::activities::Activity;
use crate::app_config::Settings;
use crate::environment::EnvironmentSnapshot;
use crate::errors::AppError;
use crate::processing::parameter_mapper::{ActivityParameterMapper, ParameterPairs};
use crate::storage::state_store::StateStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-client state persisted across application runs.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SessionState {
    pub client_id: Uuid,
    pub first_visit_at: DateTime<Utc>,
    pub session_count: u64,
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState {
            client_id: Uuid::new_v4(),
            first_visit_at: Utc::now(),
            session_count: 0,
        }
    }
}

impl SessionState {
    pub fn start_new_session(&mut self) {
        self.session_count += 1;
    }
}

/// The application-level tracker: owns one mapper, the session state, and an
/// environment snapshot. Each tracked activity yields the full ordered
/// parameter list for one collection request; transmission is the caller's
/// concern.
pub struct ActivityTracker {
    session: SessionState,
    environment: EnvironmentSnapshot,
    mapper: ActivityParameterMapper,
}

impl ActivityTracker {
    pub fn new(session: SessionState, environment: EnvironmentSnapshot) -> Self {
        ActivityTracker {
            session,
            environment,
            mapper: ActivityParameterMapper::new(),
        }
    }

    /// Restore the persisted session state (a fresh default on first run),
    /// bump the session count, and persist it back before tracking starts.
    pub async fn restore(
        settings: &Settings,
        store: &StateStore,
        environment: EnvironmentSnapshot,
    ) -> Result<Self, AppError> {
        let filename = settings.state_filename.as_deref();
        let mut session: SessionState = store
            .restore(filename, settings.delete_corrupt_state)
            .await?;
        if let Some(client_id) = settings.client_id {
            session.client_id = client_id;
        }
        session.start_new_session();
        store.save(&session, filename).await?;
        tracing::info!(
            "Session restored. Client ID: {}, session #{}",
            session.client_id,
            session.session_count
        );
        Ok(Self::new(session, environment))
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Map one activity and prepend the protocol-common and environment
    /// pairs, producing the complete ordered parameter list for the request.
    pub fn track(&mut self, activity: &Activity) -> Result<ParameterPairs, AppError> {
        let mut pairs: ParameterPairs = vec![
            ("v", "1".to_string()),
            ("cid", self.session.client_id.to_string()),
        ];
        pairs.extend(self.environment_parameters());
        pairs.extend(self.mapper.map(activity)?);
        Ok(pairs)
    }

    fn environment_parameters(&self) -> ParameterPairs {
        let env = &self.environment;
        vec![
            (
                "sr",
                format!("{}x{}", env.screen_width(), env.screen_height()),
            ),
            (
                "vp",
                format!("{}x{}", env.viewport_width(), env.viewport_height()),
            ),
            ("sd", format!("{}-bits", env.screen_color_depth())),
            ("ul", env.language_code().to_string()),
            ("de", env.character_set().to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activities::Social;
    use crate::environment::DisplayMetrics;

    fn snapshot() -> EnvironmentSnapshot {
        EnvironmentSnapshot::capture(
            DisplayMetrics {
                viewport_width: 480,
                viewport_height: 800,
                scale_percent: 100,
            },
            "en-US",
        )
    }

    #[test]
    fn track_prepends_common_and_environment_pairs() {
        let session = SessionState::default();
        let client_id = session.client_id;
        let mut tracker = ActivityTracker::new(session, snapshot());

        let pairs = tracker
            .track(&Activity::Social(Social::new("mastodon", "boost", "/p/1")))
            .unwrap();

        assert_eq!(pairs[0], ("v", "1".to_string()));
        assert_eq!(pairs[1], ("cid", client_id.to_string()));
        assert_eq!(pairs[2], ("sr", "480x800".to_string()));
        assert_eq!(pairs[3], ("vp", "480x800".to_string()));
        assert_eq!(pairs[4], ("sd", "32-bits".to_string()));
        assert_eq!(pairs[5], ("ul", "en-US".to_string()));
        assert_eq!(pairs[6], ("de", "UTF-8".to_string()));
        assert_eq!(pairs[7], ("t", "social".to_string()));
    }

    #[test]
    fn tracker_threads_transaction_state_through_the_mapper() {
        let mut tracker = ActivityTracker::new(SessionState::default(), snapshot());
        let mut transaction = crate::activities::Transaction::new("ORD9");
        transaction.currency = Some("JPY".to_string());
        tracker.track(&Activity::Transaction(transaction)).unwrap();

        let pairs = tracker
            .track(&Activity::TransactionItem(
                crate::activities::TransactionItem::default(),
            ))
            .unwrap();
        assert!(pairs.contains(&("ti", "ORD9".to_string())));
        assert!(pairs.contains(&("cu", "JPY".to_string())));
    }

    #[test]
    fn new_session_bumps_the_count() {
        let mut state = SessionState::default();
        assert_eq!(state.session_count, 0);
        state.start_new_session();
        state.start_new_session();
        assert_eq!(state.session_count, 2);
    }
}
