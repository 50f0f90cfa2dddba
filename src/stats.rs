use crate::models::Team;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeamShares {
    pub blue: f64,
    pub red: f64,
}

/// Share of all clicks held by `team`, in percent. The total is floored at 1
/// so an empty board reads 0% for both teams.
pub fn percentage(team: Team, blue: u64, red: u64) -> f64 {
    let count = match team {
        Team::Blue => blue,
        Team::Red => red,
    };
    let total = blue.saturating_add(red).max(1);
    count as f64 / total as f64 * 100.0
}

pub fn team_shares(blue: u64, red: u64) -> TeamShares {
    TeamShares {
        blue: percentage(Team::Blue, blue, red),
        red: percentage(Team::Red, blue, red),
    }
}
