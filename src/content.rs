//! Static portfolio content.
//!
//! The page renders fixed arrays of content records, defined once at startup
//! and immutable thereafter. Nothing in here is reactive; reactivity lives in
//! `state` and `theme`.

// =============================================================================
// Section descriptors
// =============================================================================

/// One navigable region of the page.
///
/// Ids are unique and the list order is the page order. The first section is
/// the hero banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub id: &'static str,
    pub label: &'static str,
}

/// The fixed, ordered section set.
pub const SECTIONS: &[Section] = &[
    Section { id: "home", label: "Home" },
    Section { id: "about", label: "About" },
    Section { id: "skills", label: "Skills" },
    Section { id: "projects", label: "Projects" },
    Section { id: "experience", label: "Experience" },
    Section { id: "education", label: "Education" },
    Section { id: "contact", label: "Contact" },
];

/// Section ids in page order.
pub fn section_ids() -> Vec<String> {
    SECTIONS.iter().map(|s| s.id.to_string()).collect()
}

// =============================================================================
// Content records
// =============================================================================

#[derive(Debug, Clone, Copy)]
pub struct Socials {
    pub email: &'static str,
    pub github: &'static str,
    pub linkedin: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct Project {
    pub title: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
    pub link: &'static str,
    pub repo: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct Experience {
    pub role: &'static str,
    pub org: &'static str,
    pub period: &'static str,
    pub location: &'static str,
    pub bullets: &'static [&'static str],
}

#[derive(Debug, Clone, Copy)]
pub struct Education {
    pub degree: &'static str,
    pub inst: &'static str,
    pub place: &'static str,
    pub when: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct SkillGroup {
    pub name: &'static str,
    pub items: &'static [&'static str],
}

/// One sample point of the "skill growth" trend chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendPoint {
    pub month: &'static str,
    pub score: u8,
}

/// Everything the page shell renders.
#[derive(Debug, Clone)]
pub struct Portfolio {
    pub name: &'static str,
    pub brand: &'static str,
    pub headline: &'static str,
    pub summary: &'static str,
    pub about: &'static str,
    pub contact_blurb: &'static str,
    pub footer: &'static str,
    pub socials: Socials,
    pub skills: &'static [SkillGroup],
    pub projects: &'static [Project],
    pub experience: &'static [Experience],
    pub education: &'static [Education],
    pub trend: &'static [TrendPoint],
}

// =============================================================================
// The content set
// =============================================================================

/// Build the fixed portfolio content.
pub fn portfolio() -> Portfolio {
    Portfolio {
        name: "Avery Lindqvist",
        brand: "averylindqvist",
        headline: "Hi, I'm Avery Lindqvist",
        summary: "Systems-minded software engineer with a focus on reliable \
                  services, tooling, and developer experience. Comfortable from \
                  the wire format up to the UI.",
        about: "I build clean, maintainable software and data-driven features. \
                I enjoy translating real requirements into robust systems, \
                writing reliable tests, and collaborating with cross-functional \
                teams.",
        contact_blurb: "I'm open to full-time roles and collaborations. The \
                        fastest way to reach me is by email.",
        footer: "© 2026 Avery Lindqvist. Rendered in your terminal.",
        socials: Socials {
            email: "avery.lindqvist@example.com",
            github: "https://github.com/averylindqvist",
            linkedin: "https://www.linkedin.com/in/averylindqvist",
        },
        skills: &[
            SkillGroup {
                name: "Languages",
                items: &["Rust", "Python", "TypeScript", "SQL", "C", "Shell"],
            },
            SkillGroup {
                name: "Frameworks",
                items: &["Tokio", "Axum", "React", "Flask", "PostgreSQL"],
            },
            SkillGroup {
                name: "Infrastructure",
                items: &["Docker", "Terraform", "GitHub Actions", "Prometheus"],
            },
            SkillGroup {
                name: "Concepts",
                items: &["Distributed systems", "Observability", "REST APIs", "Property testing"],
            },
            SkillGroup {
                name: "Tools",
                items: &["Git", "Linux", "tmux", "Wireshark"],
            },
        ],
        projects: &[
            Project {
                title: "ledgerline",
                description: "Double-entry bookkeeping engine with an append-only \
                              event log, snapshot compaction, and a query DSL. \
                              Sub-millisecond balance lookups on 10M-entry books.",
                tags: &["Rust", "SQLite", "CLI"],
                link: "https://ledgerline.example.com",
                repo: "https://github.com/averylindqvist/ledgerline",
            },
            Project {
                title: "hivemetrics",
                description: "Metrics aggregation service: statsd-compatible \
                              ingestion, windowed rollups, and a Grafana-ready \
                              HTTP surface. Handles 200k points/s per node.",
                tags: &["Rust", "Tokio", "Prometheus"],
                link: "",
                repo: "https://github.com/averylindqvist/hivemetrics",
            },
            Project {
                title: "shelfwise",
                description: "Full-stack inventory tracker for small libraries: \
                              barcode intake, lending workflows, overdue \
                              reminders, and a nightly reconciliation job.",
                tags: &["TypeScript", "React", "PostgreSQL"],
                link: "https://shelfwise.example.com",
                repo: "https://github.com/averylindqvist/shelfwise",
            },
            Project {
                title: "packet-peek",
                description: "Terminal network flow inspector with live capture \
                              summaries and per-protocol drill-down views.",
                tags: &["Rust", "pcap", "TUI"],
                link: "",
                repo: "https://github.com/averylindqvist/packet-peek",
            },
            Project {
                title: "gradekeeper",
                description: "Course management app with role-based access, \
                              CSV import, and automated grade curves. Modular \
                              templates cut duplicate UI code by half.",
                tags: &["Python", "Flask", "MySQL"],
                link: "",
                repo: "",
            },
        ],
        experience: &[
            Experience {
                role: "Software Engineer",
                org: "Fjordworks",
                period: "Jan 2024 – Present",
                location: "Oslo, Norway",
                bullets: &[
                    "Own the ingestion path of a telemetry platform; cut p99 \
                     write latency from 40ms to 6ms by batching and backpressure.",
                    "Introduced contract tests between services, eliminating a \
                     class of deploy-order incidents.",
                ],
            },
            Experience {
                role: "Backend Engineering Intern",
                org: "Brightharbor",
                period: "May 2023 – Sep 2023",
                location: "Remote",
                bullets: &[
                    "Built the audit-trail service for billing events with \
                     tamper-evident hashing.",
                    "Wrote 30+ runbook entries; tracked weekly error budgets to \
                     reduce repeated pages.",
                ],
            },
        ],
        education: &[
            Education {
                degree: "M.Sc. in Computer Science",
                inst: "NTNU",
                place: "Trondheim, Norway",
                when: "2021 – 2023",
            },
            Education {
                degree: "B.Sc. in Computer Engineering",
                inst: "University of Bergen",
                place: "Bergen, Norway",
                when: "2018 – 2021",
            },
        ],
        trend: &[
            TrendPoint { month: "Jan", score: 45 },
            TrendPoint { month: "Mar", score: 55 },
            TrendPoint { month: "May", score: 62 },
            TrendPoint { month: "Jul", score: 70 },
            TrendPoint { month: "Sep", score: 78 },
            TrendPoint { month: "Nov", score: 85 },
        ],
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sections_nonempty_and_unique() {
        assert!(!SECTIONS.is_empty());
        let ids: HashSet<_> = SECTIONS.iter().map(|s| s.id).collect();
        assert_eq!(ids.len(), SECTIONS.len());
        for s in SECTIONS {
            assert!(!s.id.is_empty());
            assert!(!s.label.is_empty());
        }
    }

    #[test]
    fn test_first_section_is_hero() {
        assert_eq!(SECTIONS[0].id, "home");
    }

    #[test]
    fn test_section_ids_order() {
        let ids = section_ids();
        assert_eq!(ids.first().map(String::as_str), Some("home"));
        assert_eq!(ids.last().map(String::as_str), Some("contact"));
        assert_eq!(ids.len(), SECTIONS.len());
    }

    #[test]
    fn test_trend_scores_in_range() {
        let p = portfolio();
        assert_eq!(p.trend.len(), 6);
        for point in p.trend {
            assert!(point.score <= 100);
        }
    }

    #[test]
    fn test_content_arrays_populated() {
        let p = portfolio();
        assert!(!p.projects.is_empty());
        assert!(!p.experience.is_empty());
        assert!(!p.education.is_empty());
        assert!(!p.skills.is_empty());
        for project in p.projects {
            assert!(!project.tags.is_empty());
        }
    }
}
