//! HTML rendering for the browser-facing pages
//!
//! Every value that comes from a lead goes through [`escape`] before it is
//! written into markup.

use axum::response::Html;
use shared::{Lead, LeadStatus, Transition};
use std::fmt::Write;

use crate::core::Dashboard;

const STYLE: &str = "
body { font-family: system-ui, sans-serif; margin: 0; background: #f5f6f8; color: #222; }
header { background: #1f3a5f; padding: 0.8rem 1.5rem; }
header a { color: #fff; margin-right: 1.2rem; text-decoration: none; font-weight: 600; }
main { padding: 1.5rem; max-width: 960px; }
table { border-collapse: collapse; width: 100%; background: #fff; }
th, td { border-bottom: 1px solid #ddd; padding: 0.4rem 0.6rem; text-align: left; }
.notice { background: #e3f4e8; border: 1px solid #9fd3ad; padding: 0.6rem; margin-bottom: 1rem; }
.status { padding: 0.1rem 0.5rem; border-radius: 0.6rem; background: #e8ecf3; font-size: 0.85rem; }
form.inline { display: inline; }
label { display: block; margin-top: 0.6rem; }
";

/// Escape text for use in HTML content and attribute values
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

fn opt(value: &Option<String>) -> String {
    value.as_deref().map(escape).unwrap_or_default()
}

/// Message shown after a form redirect
pub fn notice_message(code: &str) -> Option<&'static str> {
    match code {
        "added" => Some("Lead added successfully"),
        "updated" => Some("Lead updated"),
        "deleted" => Some("Lead deleted"),
        _ => None,
    }
}

fn layout(title: &str, notice: Option<&str>, body: &str) -> Html<String> {
    let notice_html = notice
        .and_then(notice_message)
        .map(|message| format!("<div class=\"notice\">{message}</div>"))
        .unwrap_or_default();

    Html(format!(
        "<!DOCTYPE html>
<html lang=\"en\">
<head><meta charset=\"utf-8\"><title>{title} · Mini CRM</title><style>{STYLE}</style></head>
<body>
<header>
  <a href=\"/\">Dashboard</a><a href=\"/leads\">Leads</a><a href=\"/lead/add\">Add lead</a><a href=\"/automation/run\">Automation</a>
</header>
<main>
{notice_html}<h1>{title}</h1>
{body}
</main>
</body>
</html>",
        title = escape(title),
    ))
}

fn status_badge(status: LeadStatus) -> String {
    format!("<span class=\"status status-{status}\">{status}</span>")
}

fn lead_rows(leads: &[Lead]) -> String {
    let mut rows = String::new();
    for lead in leads {
        let _ = write!(
            rows,
            "<tr><td><a href=\"/lead/{id}\">{name}</a></td><td>{email}</td><td>{source}</td><td>{status}</td><td>{score}</td><td>{created}</td></tr>",
            id = lead.id,
            name = escape(&lead.name),
            email = opt(&lead.email),
            source = opt(&lead.source),
            status = status_badge(lead.status),
            score = lead.score,
            created = lead.created_at.format(shared::timestamp::FORMAT),
        );
    }
    rows
}

fn lead_table(leads: &[Lead]) -> String {
    if leads.is_empty() {
        return "<p>No leads yet.</p>".to_string();
    }
    format!(
        "<table><thead><tr><th>Name</th><th>Email</th><th>Source</th><th>Status</th><th>Score</th><th>Created</th></tr></thead><tbody>{}</tbody></table>",
        lead_rows(leads)
    )
}

pub fn dashboard(dashboard: &Dashboard) -> Html<String> {
    let mut counts = String::new();
    for (status, count) in dashboard.rows() {
        let _ = write!(
            counts,
            "<tr><td><a href=\"/leads?status={status}\">{status}</a></td><td>{count}</td></tr>"
        );
    }

    let body = format!(
        "<p>Total leads: <strong>{total}</strong> · Conversion rate: {rate:.1}%</p>
<h2>By status</h2>
<table><thead><tr><th>Status</th><th>Leads</th></tr></thead><tbody>{counts}</tbody></table>
<h2>Top leads</h2>
{top}",
        total = dashboard.total_leads,
        rate = dashboard.conversion_rate(),
        top = lead_table(&dashboard.top_leads),
    );
    layout("Dashboard", None, &body)
}

pub fn lead_list(leads: &[Lead], filter: Option<LeadStatus>, notice: Option<&str>) -> Html<String> {
    let mut filters = String::from("<p>Filter: <a href=\"/leads\">all</a>");
    for status in LeadStatus::ALL {
        let _ = write!(filters, " · <a href=\"/leads?status={status}\">{status}</a>");
    }
    filters.push_str("</p>");

    let title = match filter {
        Some(status) => format!("Leads ({status})"),
        None => "Leads".to_string(),
    };
    layout(&title, notice, &format!("{filters}{}", lead_table(leads)))
}

pub fn lead_detail(lead: &Lead, notice: Option<&str>) -> Html<String> {
    let body = format!(
        "<table>
<tr><th>Email</th><td>{email}</td></tr>
<tr><th>Phone</th><td>{phone}</td></tr>
<tr><th>Source</th><td>{source}</td></tr>
<tr><th>Status</th><td>{status}</td></tr>
<tr><th>Score</th><td>{score}</td></tr>
<tr><th>Notes</th><td>{notes}</td></tr>
<tr><th>Created</th><td>{created}</td></tr>
<tr><th>Updated</th><td>{updated}</td></tr>
</table>
<p><a href=\"/lead/{id}/edit\">Edit</a></p>
<form class=\"inline\" method=\"post\" action=\"/lead/{id}/delete\"><button type=\"submit\">Delete</button></form>",
        id = lead.id,
        email = opt(&lead.email),
        phone = opt(&lead.phone),
        source = opt(&lead.source),
        status = status_badge(lead.status),
        score = lead.score,
        notes = opt(&lead.notes),
        created = lead.created_at.format(shared::timestamp::FORMAT),
        updated = lead.updated_at.format(shared::timestamp::FORMAT),
    );
    layout(&lead.name, notice, &body)
}

fn text_input(label: &str, name: &str, value: &str) -> String {
    format!("<label>{label}<br><input type=\"text\" name=\"{name}\" value=\"{value}\"></label>")
}

pub fn add_form() -> Html<String> {
    let body = format!(
        "<form method=\"post\" action=\"/lead/add\">
<label>Name<br><input type=\"text\" name=\"name\" required></label>
{email}{phone}{source}
<label>Score (blank for a random score)<br><input type=\"number\" name=\"score\" min=\"0\" max=\"100\"></label>
<label>Notes<br><textarea name=\"notes\"></textarea></label>
<p><button type=\"submit\">Add lead</button></p>
</form>",
        email = text_input("Email", "email", ""),
        phone = text_input("Phone", "phone", ""),
        source = text_input("Source", "source", "website"),
    );
    layout("Add lead", None, &body)
}

pub fn edit_form(lead: &Lead) -> Html<String> {
    let mut options = String::new();
    for status in LeadStatus::ALL {
        let selected = if status == lead.status { " selected" } else { "" };
        let _ = write!(options, "<option value=\"{status}\"{selected}>{status}</option>");
    }

    let body = format!(
        "<form method=\"post\" action=\"/lead/{id}/update\">
{name}{email}{phone}{source}
<label>Status<br><select name=\"status\">{options}</select></label>
<label>Score<br><input type=\"number\" name=\"score\" min=\"0\" max=\"100\" value=\"{score}\"></label>
<label>Notes<br><textarea name=\"notes\">{notes}</textarea></label>
<p><button type=\"submit\">Save</button> <a href=\"/lead/{id}\">Cancel</a></p>
</form>",
        id = lead.id,
        name = text_input("Name", "name", &escape(&lead.name)),
        email = text_input("Email", "email", &opt(&lead.email)),
        phone = text_input("Phone", "phone", &opt(&lead.phone)),
        source = text_input("Source", "source", &opt(&lead.source)),
        score = lead.score,
        notes = opt(&lead.notes),
    );
    layout(&format!("Edit {}", lead.name), None, &body)
}

pub fn automation(pending: &[Transition]) -> Html<String> {
    let listing = if pending.is_empty() {
        "<p>No leads would change.</p>".to_string()
    } else {
        let mut rows = String::new();
        for transition in pending {
            let _ = write!(
                rows,
                "<tr><td><a href=\"/lead/{id}\">#{id}</a></td><td>{from}</td><td>{to}</td><td>{score}</td></tr>",
                id = transition.id,
                from = status_badge(transition.from),
                to = status_badge(transition.to),
                score = transition.score,
            );
        }
        format!("<table><thead><tr><th>Lead</th><th>From</th><th>To</th><th>Score</th></tr></thead><tbody>{rows}</tbody></table>")
    };

    let body = format!(
        "<p>Rules: score ≥ 90 converts, score ≥ 80 qualifies, a new lead with an email is marked contacted. Converted and lost leads are left alone.</p>
<h2>Pending changes ({count})</h2>
{listing}
<form method=\"post\" action=\"/automation/run\"><p><button type=\"submit\">Run automation</button></p></form>",
        count = pending.len(),
    );
    layout("Automation", None, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn lead_named(name: &str) -> Lead {
        Lead {
            id: 3,
            name: name.to_string(),
            email: Some("a&b@example.com".to_string()),
            phone: None,
            source: None,
            status: LeadStatus::Qualified,
            score: 81,
            notes: None,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("<b>\"Tom\" & 'Jerry'</b>"), "&lt;b&gt;&quot;Tom&quot; &amp; &#x27;Jerry&#x27;&lt;/b&gt;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_detail_escapes_lead_fields() {
        let Html(page) = lead_detail(&lead_named("<script>alert(1)</script>"), None);
        assert!(!page.contains("<script>alert(1)</script>"));
        assert!(page.contains("&lt;script&gt;"));
        assert!(page.contains("a&amp;b@example.com"));
        assert!(page.contains("/lead/3/edit"));
    }

    #[test]
    fn test_notice_rendering() {
        let Html(page) = lead_list(&[], None, Some("added"));
        assert!(page.contains("Lead added successfully"));
        let Html(page) = lead_list(&[], None, Some("<junk>"));
        assert!(!page.contains("class=\"notice\""));
    }

    #[test]
    fn test_edit_form_selects_current_status() {
        let Html(page) = edit_form(&lead_named("Ada"));
        assert!(page.contains("<option value=\"qualified\" selected>"));
        assert!(page.contains("action=\"/lead/3/update\""));
    }
}
