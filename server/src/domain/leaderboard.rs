//! Static "Most Used Templates" table

use serde::Serialize;
use utoipa::ToSchema;

use crate::data::types::RepoKind;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: RepoKind,
    pub uses: u64,
}

const ENTRIES: [LeaderboardEntry; 5] = [
    LeaderboardEntry {
        rank: 1,
        name: "Next.js Starter",
        kind: RepoKind::GitHub,
        uses: 15234,
    },
    LeaderboardEntry {
        rank: 2,
        name: "Python Flask API",
        kind: RepoKind::Replit,
        uses: 12789,
    },
    LeaderboardEntry {
        rank: 3,
        name: "React Todo App",
        kind: RepoKind::Replit,
        uses: 10567,
    },
    LeaderboardEntry {
        rank: 4,
        name: "Node.js Express Boilerplate",
        kind: RepoKind::GitHub,
        uses: 9876,
    },
    LeaderboardEntry {
        rank: 5,
        name: "Vue.js Dashboard",
        kind: RepoKind::GitHub,
        uses: 8765,
    },
];

pub fn most_used() -> &'static [LeaderboardEntry] {
    &ENTRIES
}
