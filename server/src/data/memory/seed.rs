//! Demo catalog loaded into the in-memory backend

use crate::data::types::{RepoKind, RepoRow};

struct SeedRepo {
    name: &'static str,
    description: &'static str,
    tags: &'static [&'static str],
    upvotes: i64,
    kind: RepoKind,
    rating: Option<f64>,
    url: &'static str,
}

const SEED: &[SeedRepo] = &[
    SeedRepo {
        name: "Next.js Starter",
        description: "App Router template with TypeScript, ESLint and Tailwind preconfigured.",
        tags: &["react", "typescript", "ssr"],
        upvotes: 412,
        kind: RepoKind::GitHub,
        rating: Some(4.7),
        url: "https://github.com/vercel/next.js/tree/canary/examples",
    },
    SeedRepo {
        name: "Python Flask API",
        description: "Minimal REST API with blueprints, SQLAlchemy and pytest.",
        tags: &["python", "api", "flask"],
        upvotes: 298,
        kind: RepoKind::Replit,
        rating: Some(4.3),
        url: "https://replit.com/@templates/Flask",
    },
    SeedRepo {
        name: "React Todo App",
        description: "Classic todo list built with hooks and local storage.",
        tags: &["react", "beginner"],
        upvotes: 255,
        kind: RepoKind::Replit,
        rating: Some(3.8),
        url: "https://replit.com/@templates/React-Todo",
    },
    SeedRepo {
        name: "Node.js Express Boilerplate",
        description: "Express server with routing, logging and environment config.",
        tags: &["node", "express", "api"],
        upvotes: 240,
        kind: RepoKind::GitHub,
        rating: Some(4.1),
        url: "https://github.com/expressjs/express/tree/master/examples",
    },
    SeedRepo {
        name: "Vue.js Dashboard",
        description: "Admin dashboard with charts, auth pages and dark mode.",
        tags: &["vue", "dashboard"],
        upvotes: 187,
        kind: RepoKind::GitHub,
        rating: Some(4.5),
        url: "https://github.com/vuejs/create-vue",
    },
    SeedRepo {
        name: "Rust Axum Service",
        description: "Async HTTP service with tracing and graceful shutdown.",
        tags: &["rust", "api"],
        upvotes: 96,
        kind: RepoKind::GitHub,
        rating: None,
        url: "https://github.com/tokio-rs/axum/tree/main/examples",
    },
    SeedRepo {
        name: "Discord Bot",
        description: "Slash-command bot skeleton with a keep-alive web server.",
        tags: &[],
        upvotes: 73,
        kind: RepoKind::Replit,
        rating: Some(3.5),
        url: "https://replit.com/@templates/Discord-Bot",
    },
];

/// Rows for the seeded catalog, ids starting at 1
pub fn demo_repos() -> Vec<RepoRow> {
    SEED.iter()
        .zip(1..)
        .map(|(seed, id)| RepoRow {
            id,
            name: seed.name.to_string(),
            description: seed.description.to_string(),
            icon: format!("/static/icons/{}.svg", seed.kind.as_str().to_lowercase()),
            tags: (!seed.tags.is_empty())
                .then(|| seed.tags.iter().map(|t| t.to_string()).collect()),
            upvotes: seed.upvotes,
            kind: seed.kind,
            rating: seed.rating,
            url: seed.url.to_string(),
        })
        .collect()
}
