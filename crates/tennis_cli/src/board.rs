//! Text scoreboard for the operator console.

use std::cell::RefCell;
use std::rc::Rc;

use tennis_core::{MatchEngine, ScoreSnapshot, TeamSide};

/// One scoreboard row: `*Halep 6-4 2-1 30-15 Kvitova | Break Point`.
/// The star marks the server.
pub fn score_line(snapshot: &ScoreSnapshot) -> String {
    let serve = |side: TeamSide| if snapshot.server == Some(side) { "*" } else { "" };
    let sets = snapshot
        .sets_in_play()
        .iter()
        .map(|[a, b]| format!("{a}-{b}"))
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        "{}{} {} {}-{} {}{} | {}",
        serve(TeamSide::First),
        snapshot.teams[0],
        sets,
        snapshot.labels[0],
        snapshot.labels[1],
        snapshot.teams[1],
        serve(TeamSide::Second),
        snapshot.message
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Announcement {
    /// Scoreboard message changed.
    Message(String),
    Winner(String),
}

/// Collects announcements from the engine's observable fields between taps.
pub struct Announcer {
    queue: Rc<RefCell<Vec<Announcement>>>,
}

impl Announcer {
    /// Subscribe to `engine` and replay its current state, so attaching to a
    /// decided match still announces the winner.
    pub fn attach(engine: &mut MatchEngine) -> Self {
        let queue = Rc::new(RefCell::new(Vec::new()));
        let names = engine.teams().clone().map(|team| team.name);
        let feed = engine.feed_mut();

        let sink = Rc::clone(&queue);
        let mut last = feed.message.get().clone();
        feed.message.subscribe(move |message: &String| {
            if *message != last {
                last = message.clone();
                sink.borrow_mut().push(Announcement::Message(message.clone()));
            }
        });

        let sink = Rc::clone(&queue);
        feed.winner.subscribe(move |winner: &Option<TeamSide>| {
            if let Some(side) = winner {
                let name = names[side.index()].clone();
                sink.borrow_mut().push(Announcement::Winner(name));
            }
        });

        feed.refresh();
        Self { queue }
    }

    pub fn drain(&self) -> Vec<Announcement> {
        self.queue.borrow_mut().drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tennis_core::{Category, MatchConfig, TeamIdentity};

    fn engine() -> MatchEngine {
        let cfg = MatchConfig::for_category(Category::Women, false)
            .with_first_server(TeamSide::First)
            .with_match_type("Semifinal");
        MatchEngine::new(cfg, [TeamIdentity::new("Halep"), TeamIdentity::new("Kvitova")]).unwrap()
    }

    #[test]
    fn test_score_line() {
        let mut e = engine();
        assert_eq!(score_line(&e.snapshot()), "*Halep 0-0 0-0 Kvitova | Semifinal");
        for side in [0, 0, 0, 0, 1, 1, 1] {
            e.record_point(side).unwrap();
        }
        assert_eq!(
            score_line(&e.snapshot()),
            "Halep 1-0 0-40 Kvitova* | Semifinal"
        );
    }

    #[test]
    fn test_announcer_reports_changes_only() {
        let mut e = engine();
        let announcer = Announcer::attach(&mut e);
        e.record_point(0).unwrap();
        assert!(announcer.drain().is_empty());

        for side in [0, 0, 1, 1, 1] {
            e.record_point(side).unwrap();
        }
        assert_eq!(
            announcer.drain(),
            vec![Announcement::Message("Deuce".to_string())]
        );
    }

    #[test]
    fn test_announcer_reports_winner() {
        let mut e = engine();
        let announcer = Announcer::attach(&mut e);
        for _ in 0..48 {
            e.record_point(1).unwrap();
        }
        let events = announcer.drain();
        assert!(events.contains(&Announcement::Winner("Kvitova".to_string())));
        assert!(events.contains(&Announcement::Message("Kvitova won match!".to_string())));
    }

    #[test]
    fn test_announcer_attached_late_reports_decided_match() {
        let mut e = engine();
        for _ in 0..48 {
            e.record_point(0).unwrap();
        }
        let announcer = Announcer::attach(&mut e);
        assert_eq!(
            announcer.drain(),
            vec![Announcement::Winner("Halep".to_string())]
        );
    }
}
