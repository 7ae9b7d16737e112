// src/services/email_templates.rs

use crate::models::notification::Notification;

pub fn subject(notification: &Notification) -> String {
    match notification {
        Notification::PayoutNotice { .. } => "Payout Notification".to_string(),
        Notification::EsopGrant { company_name, .. } => {
            format!("You've been granted an ESOP by {}", company_name)
        }
    }
}

pub fn html(notification: &Notification) -> String {
    match notification {
        Notification::PayoutNotice {
            employee_name,
            amount_usd,
            tx_hash,
            wallet_address,
            company_name,
        } => format!(
            concat!(
                "<h1>Hi {name},</h1>",
                "<p>{company} has sent you a payout of <strong>${amount} USD</strong>.</p>",
                "<p>Wallet: <code>{wallet}</code></p>",
                "<p>Transaction hash: <code>{tx}</code></p>",
                "<p>Thanks,<br/>{company}</p>",
            ),
            name = escape(employee_name),
            company = escape(company_name),
            amount = amount_usd,
            wallet = escape(wallet_address),
            tx = escape(tx_hash),
        ),
        Notification::EsopGrant {
            employee_name,
            company_name,
            total_tokens,
            duration_months,
            cliff_months,
            start_date,
            portal_url,
        } => format!(
            concat!(
                "<h1>Hi {name},</h1>",
                "<p>{company} has granted you an ESOP of <strong>{tokens} tokens</strong>.</p>",
                "<ul>",
                "<li>Vesting duration: {duration} months</li>",
                "<li>Cliff: {cliff} months</li>",
                "<li>Start date: {start}</li>",
                "</ul>",
                "<p><a href=\"{portal}\">Open the employee portal</a></p>",
            ),
            name = escape(employee_name),
            company = escape(company_name),
            tokens = total_tokens,
            duration = duration_months,
            cliff = cliff_months,
            start = escape(start_date),
            portal = escape(portal_url),
        ),
    }
}

// Os parâmetros vêm do banco e da requisição
fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
