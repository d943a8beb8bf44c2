//! Play command implementation.
//!
//! A replay harness, not a protocol engine: the scenario's counterpart
//! offers are delivered one per turn at evenly spaced normalized times,
//! and the agent answers each one. The replay stops when the agent
//! accepts or the rounds run out. Once the scripted offers are exhausted
//! the last one is repeated.

use std::io::Write;

use borda_agent::{NegotiationParty, OrdinalAgent};
use borda_core::{Action, ActionKind, PartyId};
use tracing::info;

use super::load_config;
use crate::cli::PlayArgs;
use crate::error::CliError;
use crate::output::{OutputFormat, PlayTranscript, TurnRecord};
use crate::scenario::Scenario;

const AGENT_ID: &str = "borda";
const COUNTERPART_ID: &str = "counterpart";

/// Play command executor.
#[derive(Debug, Default)]
pub struct PlayCommand;

impl PlayCommand {
    /// Create a new play command.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Execute the play command.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails, `rounds` is zero, the agent
    /// fails to act, or output fails.
    pub fn execute<W: Write>(
        &self,
        writer: &mut W,
        format: &OutputFormat,
        args: &PlayArgs,
    ) -> Result<(), CliError> {
        let transcript = self.replay(args)?;
        format.write(writer, &transcript)
    }

    /// Replay the scenario and collect the transcript.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails, `rounds` is zero, or the agent
    /// fails to act.
    pub fn replay(&self, args: &PlayArgs) -> Result<PlayTranscript, CliError> {
        if args.rounds == 0 {
            return Err(CliError::InvalidArgument(
                "rounds must be at least 1".to_string(),
            ));
        }
        let scenario = Scenario::from_file(&args.scenario)?;
        let config = load_config(args.config.as_deref())?;
        let mut agent = OrdinalAgent::initialize(
            PartyId::new(AGENT_ID),
            &scenario.domain,
            &scenario.ranking,
            config,
        )?;

        let counterpart = PartyId::new(COUNTERPART_ID);
        let last_turn = (args.rounds - 1).max(1) as f64;
        let mut turns = Vec::with_capacity(args.rounds);
        let mut agreement = None;

        for round in 0..args.rounds {
            let time = round as f64 / last_turn;
            let offer = scenario
                .counterpart_offers
                .get(round)
                .or_else(|| scenario.counterpart_offers.last())
                .cloned();
            if let Some(bid) = &offer {
                agent.receive_message(&counterpart, &Action::Offer(bid.clone()));
            }

            let action = agent.choose_action(time, &ActionKind::ALL)?;
            let utility = action
                .bid()
                .map(|bid| agent.utility_function().utility_or_zero(bid));
            if let Action::Accept(bid) = &action {
                agreement = Some(bid.clone());
            }
            turns.push(TurnRecord {
                round,
                time,
                counterpart_offer: offer,
                action,
                utility,
            });
            if agreement.is_some() {
                break;
            }
        }

        info!(
            session = %agent.session_id(),
            turns = turns.len(),
            agreed = agreement.is_some(),
            "replay finished"
        );
        Ok(PlayTranscript {
            agent: agent.description().to_string(),
            session: agent.session_id(),
            domain: scenario.domain.name().to_string(),
            turns,
            agreement,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use borda_agent::AgentError;
    use borda_core::Bid;
    use std::io::Write as _;
    use std::path::{Path, PathBuf};

    /// Value grades on one issue; the counterpart escalates toward "best".
    const SCENARIO: &str = r#"{
        "domain": {
            "name": "grades",
            "issues": [{ "number": 1, "name": "grade", "values": ["poor", "fair", "good", "great", "best"] }]
        },
        "ranking": [
            { "1": "poor" },
            { "1": "fair" },
            { "1": "good" },
            { "1": "great" },
            { "1": "best" }
        ],
        "counterpart_offers": [{ "1": "poor" }, { "1": "fair" }, { "1": "best" }]
    }"#;

    fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    fn args(dir: &Path, rounds: usize) -> PlayArgs {
        let config = write_file(dir, "agent.toml", "seed = 7\n");
        PlayArgs {
            scenario: write_file(dir, "scenario.json", SCENARIO),
            config: Some(config),
            rounds,
        }
    }

    #[test]
    fn early_turns_offer_best_bid() {
        let dir = tempfile::tempdir().unwrap();
        let transcript = PlayCommand::new().replay(&args(dir.path(), 10)).unwrap();

        // Times are 0, 1/9, ... so the first five turns are early.
        for turn in &transcript.turns[..5] {
            assert!(turn.time < 0.5);
            assert_eq!(turn.action, Action::Offer(Bid::new([(1, "best")])));
        }
    }

    #[test]
    fn accepts_best_offer_once_late() {
        let dir = tempfile::tempdir().unwrap();
        let transcript = PlayCommand::new().replay(&args(dir.path(), 10)).unwrap();

        // "best" repeats from turn 2 and beats any own offer below it.
        let best = Bid::new([(1, "best")]);
        assert_eq!(transcript.agreement, Some(best.clone()));

        let last = transcript.turns.last().unwrap();
        assert_eq!(last.action, Action::Accept(best));
        assert!(last.time >= 0.5);
        assert!(transcript.turns.len() < 10);
    }

    #[test]
    fn stops_on_accept() {
        let dir = tempfile::tempdir().unwrap();
        let transcript = PlayCommand::new().replay(&args(dir.path(), 50)).unwrap();

        let accepts = transcript
            .turns
            .iter()
            .filter(|turn| turn.action.is_accept())
            .count();
        assert_eq!(accepts, 1);
        assert!(transcript.turns.last().unwrap().action.is_accept());
        assert!(transcript.agreement.is_some());
    }

    #[test]
    fn late_offers_clear_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let transcript = PlayCommand::new().replay(&args(dir.path(), 20)).unwrap();

        for turn in transcript.turns.iter().filter(|t| t.action.is_offer()) {
            assert!(turn.utility.unwrap() >= 0.7);
        }
    }

    #[test]
    fn zero_rounds_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let result = PlayCommand::new().replay(&args(dir.path(), 0));
        assert!(matches!(result, Err(CliError::InvalidArgument(_))));
    }

    #[test]
    fn invalid_config_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut play = args(dir.path(), 5);
        play.config = Some(write_file(dir.path(), "bad.toml", "offer_threshold = 2.0\n"));
        let result = PlayCommand::new().replay(&play);
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn out_of_catalog_ranking_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let scenario = SCENARIO.replace(r#"{ "1": "fair" },"#, r#"{ "1": "awful" },"#);
        let play = PlayArgs {
            scenario: write_file(dir.path(), "scenario.json", &scenario),
            config: None,
            rounds: 5,
        };
        let result = PlayCommand::new().replay(&play);
        assert!(matches!(result, Err(CliError::Agent(AgentError::Estimation(_)))));
    }
}
