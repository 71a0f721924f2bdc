//! Weekly leaderboard.
//!
//! There is no server; the other players are placed relative to the user's
//! XP so the table always has someone to chase.

/// One ranked row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardRow {
    pub rank: usize,
    pub name: &'static str,
    pub xp: u64,
    pub is_user: bool,
}

/// Rows sorted by XP, highest first.
pub fn weekly_rows(user_xp: u64) -> Vec<LeaderboardRow> {
    let mut players = [
        ("Nova", (user_xp + 420).max(1200), false),
        ("Rin", (user_xp + 210).max(980), false),
        ("You", user_xp, true),
        ("Kai", user_xp.saturating_sub(180).max(420), false),
        ("Mila", user_xp.saturating_sub(320).max(250), false),
    ];
    players.sort_by(|a, b| b.1.cmp(&a.1));

    players
        .into_iter()
        .enumerate()
        .map(|(i, (name, xp, is_user))| LeaderboardRow {
            rank: i + 1,
            name,
            xp,
            is_user,
        })
        .collect()
}
