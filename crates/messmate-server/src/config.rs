//! Process configuration read from `MESSMATE_*` environment variables.

use messmate_core::error::{MessmateError, MessmateResult};
use messmate_core::models::ActorId;
use messmate_core::period::Period;
use messmate_core::repository::LedgerMode;
use messmate_db::DbConfig;
use messmate_ledger::LedgerConfig;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub ledger: LedgerConfig,
    pub db: DbConfig,
    /// Signed-in actor for remote sessions.
    pub actor: Option<ActorId>,
    /// Month to report on; the current month when unset.
    pub period: Option<Period>,
    /// Fixed fee for the detailed settlement; the month's bills when unset.
    pub fixed_fee: Option<f64>,
}

fn invalid(var: &str, value: &str) -> MessmateError {
    MessmateError::Validation {
        message: format!("{var}: unrecognised value {value:?}"),
    }
}

impl ServerConfig {
    pub fn from_env() -> MessmateResult<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable lookup, on top of the defaults.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> MessmateResult<Self> {
        let mut ledger = LedgerConfig::default();
        if let Some(mode) = get("MESSMATE_MODE") {
            ledger.mode = match mode.trim().to_ascii_lowercase().as_str() {
                "guest" => LedgerMode::Guest,
                "remote" => LedgerMode::Remote,
                _ => return Err(invalid("MESSMATE_MODE", &mode)),
            };
        }
        if let Some(seed) = get("MESSMATE_SEED") {
            ledger.seed_sample_data = match seed.trim() {
                "1" | "true" => true,
                "0" | "false" => false,
                _ => return Err(invalid("MESSMATE_SEED", &seed)),
            };
        }

        let mut db = DbConfig::default();
        if let Some(url) = get("MESSMATE_DB_URL") {
            db.url = url;
        }

        let actor = get("MESSMATE_ACTOR_ID")
            .map(|raw| Uuid::parse_str(raw.trim()).map_err(|_| invalid("MESSMATE_ACTOR_ID", &raw)))
            .transpose()?;

        let period = get("MESSMATE_PERIOD")
            .map(|raw| Period::parse(raw.trim()))
            .transpose()?;

        let fixed_fee = match get("MESSMATE_FIXED_FEE") {
            Some(raw) if raw.trim().is_empty() => Some(0.0),
            Some(raw) => {
                let fee: f64 = raw
                    .trim()
                    .parse()
                    .map_err(|_| invalid("MESSMATE_FIXED_FEE", &raw))?;
                if !fee.is_finite() || fee < 0.0 {
                    return Err(MessmateError::Validation {
                        message: format!("MESSMATE_FIXED_FEE must be a non-negative amount, got {fee}"),
                    });
                }
                Some(fee)
            }
            None => None,
        };

        Ok(Self {
            ledger,
            db,
            actor,
            period,
            fixed_fee,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_to_seeded_guest() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.ledger.mode, LedgerMode::Guest);
        assert!(config.ledger.seed_sample_data);
        assert_eq!(config.db.url, "127.0.0.1:8000");
        assert!(config.actor.is_none());
        assert!(config.period.is_none());
        assert!(config.fixed_fee.is_none());
    }

    #[test]
    fn reads_remote_settings() {
        let actor = Uuid::new_v4();
        let actor_str = actor.to_string();
        let config = ServerConfig::from_lookup(lookup(&[
            ("MESSMATE_MODE", "Remote"),
            ("MESSMATE_DB_URL", "db.internal:8000"),
            ("MESSMATE_ACTOR_ID", &actor_str),
            ("MESSMATE_PERIOD", "2024-07"),
            ("MESSMATE_FIXED_FEE", "1500"),
        ]))
        .unwrap();

        assert_eq!(config.ledger.mode, LedgerMode::Remote);
        assert_eq!(config.db.url, "db.internal:8000");
        assert_eq!(config.actor, Some(actor));
        assert_eq!(config.period, Some(Period::new(2024, 7).unwrap()));
        assert_eq!(config.fixed_fee, Some(1500.0));
    }

    #[test]
    fn blank_fixed_fee_is_zero() {
        let config = ServerConfig::from_lookup(lookup(&[("MESSMATE_FIXED_FEE", "  ")])).unwrap();
        assert_eq!(config.fixed_fee, Some(0.0));
    }

    #[test]
    fn rejects_bad_values() {
        for vars in [
            [("MESSMATE_MODE", "cloud")],
            [("MESSMATE_ACTOR_ID", "not-a-uuid")],
            [("MESSMATE_PERIOD", "2024-7")],
            [("MESSMATE_FIXED_FEE", "-5")],
            [("MESSMATE_SEED", "maybe")],
        ] {
            let err = ServerConfig::from_lookup(lookup(&vars)).unwrap_err();
            assert!(matches!(err, MessmateError::Validation { .. }), "{vars:?}");
        }
    }
}
