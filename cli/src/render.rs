//! Plain-text rendering of the views

use std::fmt::Write;

use chrono::{DateTime, Utc};
use esociety::domain::{Booking, Complaint, Facility, Visitor};
use esociety::routing::{NavLink, NavTarget};
use esociety::views::admin::SocietyStats;
use esociety::views::resident::MenuCard;
use esociety::views::security::GateSummary;
use esociety::{Identity, Notice};

fn stamp(at: Option<DateTime<Utc>>) -> String {
    at.map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub fn notice(notice: Option<&Notice>) -> String {
    match notice {
        Some(Notice::Error(text)) => format!("! {text}\n"),
        Some(Notice::Success(text)) => format!("✓ {text}\n"),
        Some(Notice::Warning(text)) => format!("~ {text}\n"),
        None => String::new(),
    }
}

pub fn nav(links: &[NavLink]) -> String {
    let mut out = String::new();
    for link in links {
        let target = match link.target {
            NavTarget::Go(route) => route.path(),
            NavTarget::Logout => "esociety logout",
        };
        writeln!(out, "  {:<14} {}", link.label, target).ok();
    }
    out
}

pub fn whoami(identity: &Identity) -> String {
    let mut out = String::new();
    writeln!(out, "{} ({})", identity.display_name(), identity.role).ok();
    for (label, value) in [
        ("email", &identity.email),
        ("phone", &identity.phone),
        ("address", &identity.address),
    ] {
        if let Some(value) = value {
            writeln!(out, "  {label:<8} {value}").ok();
        }
    }
    out
}

pub fn complaints(items: &[Complaint]) -> String {
    if items.is_empty() {
        return "No complaints.\n".into();
    }
    let mut out = String::new();
    for c in items {
        writeln!(
            out,
            "{}  [{}] {:<12} {}",
            c.id, c.status.as_str(), c.title, c.description
        )
        .ok();
        writeln!(
            out,
            "    filed {}  resolved {}",
            stamp(c.created_at),
            stamp(c.resolved_at)
        )
        .ok();
    }
    out
}

pub fn facilities(items: &[Facility]) -> String {
    if items.is_empty() {
        return "No facilities.\n".into();
    }
    let mut out = String::new();
    for f in items {
        writeln!(out, "{}  {:<16} {}", f.id, f.name, f.slots_label()).ok();
    }
    out
}

pub fn bookings(items: &[Booking]) -> String {
    if items.is_empty() {
        return "No bookings.\n".into();
    }
    let mut out = String::new();
    for b in items {
        writeln!(
            out,
            "{}  {:<16} {:<14} {}",
            b.id,
            b.facility_label(),
            b.slot,
            stamp(b.booked_at)
        )
        .ok();
    }
    out
}

pub fn visitors(items: &[Visitor]) -> String {
    if items.is_empty() {
        return "No visitors.\n".into();
    }
    let mut out = String::new();
    for v in items {
        writeln!(
            out,
            "{}  {:<16} {:<20} {:<8} {}",
            v.id,
            v.name,
            v.purpose,
            v.status,
            stamp(v.last_activity())
        )
        .ok();
    }
    out
}

pub fn gate_summary(summary: &GateSummary<'_>) -> String {
    let mut out = format!("Pending visitors: {}\nRecent entries:\n", summary.pending);
    if summary.recent_entries.is_empty() {
        out.push_str("  none\n");
    }
    for v in &summary.recent_entries {
        writeln!(out, "  {:<16} {:<20} {}", v.name, v.purpose, stamp(v.last_activity())).ok();
    }
    out
}

pub fn stats(stats: SocietyStats) -> String {
    format!(
        "Complaints:        {}\nBookings:          {}\nPending visitors:  {}\n",
        stats.complaints, stats.bookings, stats.pending_visitors
    )
}

pub fn menu(greeting: &str, cards: &[MenuCard]) -> String {
    let mut out = format!("{greeting}\n");
    for card in cards {
        writeln!(out, "  {:<20} {:<44} {}", card.title, card.blurb, card.route).ok();
    }
    out
}
